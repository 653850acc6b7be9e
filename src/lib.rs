//! issue2misskey - moves GitHub issue comments to Misskey notes.
//!
//! Each comment becomes a note: images referenced in the comment are
//! downloaded, uploaded to the Misskey drive and attached, a leading
//! `<!-- {...} -->` block can override note fields, and the comment is
//! deleted once its note exists.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing transformation services and use cases.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
