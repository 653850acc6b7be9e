//! Comment transformation services.

mod attachment_extractor;
mod directive_parser;
mod post_composer;
mod resource_cache;
mod upload_registry;

pub use attachment_extractor::{AttachmentExtractor, Extraction};
pub use directive_parser::{DirectiveParser, ParsedBody};
pub use post_composer::PostComposer;
pub use resource_cache::ResourceCache;
pub use upload_registry::UploadRegistry;
