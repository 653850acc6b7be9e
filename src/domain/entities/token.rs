//! API token value object.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer token for either the source tracker or the destination platform.
///
/// Wiped from memory on drop and masked in `Debug`/`Display`.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct ApiToken {
    value: String,
}

impl ApiToken {
    /// Creates a token, rejecting empty or whitespace-only input.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() || value.chars().any(char::is_whitespace) {
            return None;
        }

        Some(Self { value })
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars = self.value.chars().count();
        if chars <= 10 {
            return "*".repeat(chars);
        }

        let prefix_end = self
            .value
            .char_indices()
            .nth(4)
            .map_or(self.value.len(), |(i, _)| i);
        let suffix_start = self
            .value
            .char_indices()
            .nth(chars - 4)
            .map_or(self.value.len(), |(i, _)| i);
        format!(
            "{}...{}",
            &self.value[..prefix_end],
            &self.value[suffix_start..]
        )
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}
