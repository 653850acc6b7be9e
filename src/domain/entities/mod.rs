//! Domain entities.

mod comment;
mod content_name;
mod post;
mod token;

pub use comment::{Comment, CommentId, first_line};
pub use content_name::ContentName;
pub use post::{
    AttachmentReference, Directives, FILE_IDS_KEY, FileId, PostId, PostPayload, TEXT_KEY,
    UploadedFile,
};
pub use token::ApiToken;
