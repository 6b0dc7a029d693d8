pub mod content;
pub mod feed;
pub mod http;
