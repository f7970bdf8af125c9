//! Two-state handles for resources that can disappear underneath us.
//!
//! The gutter and the editor can be destroyed by the host at any time. Holding
//! them as a [`Resource`] forces every caller to check the state before using
//! the handle.

/// A handle that is either usable or known to be gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource<T> {
    Active(T),
    Destroyed,
}

impl<T> Resource<T> {
    pub fn active(&self) -> Option<&T> {
        match self {
            Resource::Active(value) => Some(value),
            Resource::Destroyed => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Resource::Active(_))
    }

    /// Move the handle out, leaving `Destroyed` behind.
    pub fn take(&mut self) -> Option<T> {
        match std::mem::replace(self, Resource::Destroyed) {
            Resource::Active(value) => Some(value),
            Resource::Destroyed => None,
        }
    }
}

impl<T> From<Option<T>> for Resource<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Resource::Active(value),
            None => Resource::Destroyed,
        }
    }
}
