use shared::{domain::Category, error::GameError};
use tracing::debug;

use crate::signal::OneShot;

/// Title screen state: the injected category list, a "pick a category"
/// prompt signal and the navigation signal carrying the chosen key.
#[derive(Debug, Clone)]
pub struct CategoryMenu {
    categories: Vec<Category>,
    select_category: OneShot<()>,
    navigate_to_game: OneShot<String>,
}

impl CategoryMenu {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories,
            select_category: OneShot::new(),
            navigate_to_game: OneShot::new(),
        }
    }

    pub fn labels(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.label.as_str()).collect()
    }

    /// The player pressed Play; the presentation layer should offer the list.
    pub fn request_selection(&mut self) {
        self.select_category.raise(());
    }

    pub fn selection_requested(&self) -> bool {
        self.select_category.is_pending()
    }

    /// Leaves every signal untouched when `index` is out of range.
    pub fn select_index(&mut self, index: usize) -> Result<&Category, GameError> {
        let len = self.categories.len();
        let category = self
            .categories
            .get(index)
            .ok_or(GameError::InvalidCategoryIndex { index, len })?;

        debug!(index, key = %category.key, "menu: category selected");
        self.select_category.acknowledge();
        self.navigate_to_game.raise(category.key.clone());
        Ok(category)
    }

    pub fn navigation_target(&self) -> Option<&str> {
        self.navigate_to_game.pending().map(String::as_str)
    }

    pub fn acknowledge_navigation(&mut self) -> Option<String> {
        self.navigate_to_game.acknowledge()
    }
}
