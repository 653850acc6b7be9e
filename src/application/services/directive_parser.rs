//! Leading directive block parsing.
//!
//! A comment may start with an HTML comment wrapping a JSON object:
//!
//! ```text
//! <!-- { "visibility": "home", "cw": "spoilers" } -->
//! The actual post text.
//! ```
//!
//! The object's keys override fields of the created post.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::entities::Directives;
use crate::domain::errors::{MigrationError, MigrationResult};

static DIRECTIVE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A<!--(.*?)-->").unwrap());

/// Body with its directive block removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody {
    /// Trimmed remaining text.
    pub body: String,
    /// Decoded overrides, empty when no block was present.
    pub directives: Directives,
}

/// Parser for the optional leading directive block.
pub struct DirectiveParser;

impl DirectiveParser {
    /// Splits a leading directive block off `body`.
    ///
    /// # Errors
    /// Returns `MalformedDirective` if the leading comment opens with `{` but
    /// does not hold exactly one JSON object.
    pub fn parse(body: &str) -> MigrationResult<ParsedBody> {
        let trimmed = body.trim();

        let Some(caps) = DIRECTIVE_RE.captures(trimmed) else {
            return Ok(ParsedBody {
                body: trimmed.to_string(),
                directives: Directives::default(),
            });
        };

        let (Some(block), Some(inner)) = (caps.get(0), caps.get(1)) else {
            unreachable!("directive pattern always captures the comment text");
        };

        let object = inner.as_str().trim();
        if !object.starts_with('{') {
            return Ok(ParsedBody {
                body: trimmed.to_string(),
                directives: Directives::default(),
            });
        }

        let value: Value = serde_json::from_str(object)
            .map_err(|e| MigrationError::malformed_directive(e.to_string()))?;

        let Value::Object(options) = value else {
            return Err(MigrationError::malformed_directive(
                "directive block must be a JSON object",
            ));
        };

        debug!(keys = options.len(), "Parsed directive block");

        Ok(ParsedBody {
            body: trimmed[block.end()..].trim().to_string(),
            directives: Directives::new(options),
        })
    }
}
