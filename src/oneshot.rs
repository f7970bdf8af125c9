//! At-most-once notification to the controller's owner.

/// A callback that fires at most once, no matter how often it is triggered.
pub struct OneShot {
    callback: Option<Box<dyn FnOnce()>>,
}

impl OneShot {
    pub fn new(callback: impl FnOnce() + 'static) -> Self {
        Self {
            callback: Some(Box::new(callback)),
        }
    }

    /// A notification nobody listens to.
    pub fn none() -> Self {
        Self { callback: None }
    }

    /// Run the callback if it has not run yet. Returns whether it ran.
    pub fn fire(&mut self) -> bool {
        match self.callback.take() {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.callback.is_some()
    }
}

impl std::fmt::Debug for OneShot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OneShot")
            .field("pending", &self.is_pending())
            .finish()
    }
}
