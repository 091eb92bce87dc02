/// A pending event with room for one value.
///
/// Raising replaces whatever is pending; the consumer observes it with
/// [`OneShot::pending`] and clears it with [`OneShot::acknowledge`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneShot<T> {
    value: Option<T>,
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self { value: None }
    }
}

impl<T> OneShot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raise(&mut self, value: T) {
        self.value = Some(value);
    }

    pub fn pending(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn is_pending(&self) -> bool {
        self.value.is_some()
    }

    /// Clears the slot, returning what was pending. A second call is a no-op.
    pub fn acknowledge(&mut self) -> Option<T> {
        self.value.take()
    }
}
