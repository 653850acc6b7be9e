mod comment_source_port;
mod file_fetcher_port;
mod post_destination_port;

pub use comment_source_port::CommentSourcePort;
pub use file_fetcher_port::FileFetcherPort;
pub use post_destination_port::PostDestinationPort;
