//! Placeholder shown while something loads

use std::fmt;

/// Spinner with a caption
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Loading {
    /// Caption under the spinner
    pub message: &'static str,
}

impl Loading {
    /// Spinner captioned `message`
    #[must_use]
    pub const fn new(message: &'static str) -> Self {
        Self { message }
    }
}

impl Default for Loading {
    fn default() -> Self {
        Self::new("Loading...")
    }
}

impl fmt::Display for Loading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "... {}", self.message)
    }
}
