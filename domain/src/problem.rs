//! Problem value object

use serde::{Deserialize, Serialize};

/// A decision problem to put before the council (Value Object)
///
/// Represents the prompt text sent verbatim to every provider. No structure
/// is imposed beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    content: String,
}

impl Problem {
    /// Create a new problem
    ///
    /// # Panics
    /// Panics if the content is empty or only whitespace
    pub fn new(content: impl Into<String>) -> Self {
        let content = content.into();
        assert!(!content.trim().is_empty(), "Problem cannot be empty");
        Self { content }
    }

    /// Try to create a new problem, returning None if invalid
    pub fn try_new(content: impl Into<String>) -> Option<Self> {
        let content = content.into();
        if content.trim().is_empty() {
            None
        } else {
            Some(Self { content })
        }
    }

    /// Get the problem content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }

    /// A short prefix of the content for log lines, capped at `max_chars`
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            self.content.clone()
        } else {
            let mut cut: String = self.content.chars().take(max_chars).collect();
            cut.push_str("...");
            cut
        }
    }
}

impl std::fmt::Display for Problem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

impl From<&str> for Problem {
    fn from(s: &str) -> Self {
        Problem::new(s)
    }
}

impl From<String> for Problem {
    fn from(s: String) -> Self {
        Problem::new(s)
    }
}
