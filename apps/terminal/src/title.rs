use anyhow::{Context, Result};
use game_core::CategoryMenu;

use crate::{prompt, Input};

/// Shows the category list until the player picks one. `None` means quit.
pub async fn choose_category(menu: &mut CategoryMenu, input: &mut Input) -> Result<Option<String>> {
    menu.request_selection();

    while menu.selection_requested() {
        println!();
        println!("Pick a category:");
        for (number, label) in menu.labels().iter().enumerate() {
            println!("  {}) {label}", number + 1);
        }
        prompt("category (q to quit)");

        let Some(line) = input.next_line().await.context("failed to read from stdin")? else {
            return Ok(None);
        };
        let line = line.trim();
        if line.eq_ignore_ascii_case("q") {
            return Ok(None);
        }

        let index = line
            .parse::<usize>()
            .ok()
            .and_then(|number| number.checked_sub(1))
            .unwrap_or(usize::MAX);
        if let Err(err) = menu.select_index(index) {
            println!("{}", err.user_message());
        }
    }

    Ok(menu.acknowledge_navigation())
}
