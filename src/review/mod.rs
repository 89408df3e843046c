pub mod fetcher;
pub mod resolver;
pub mod types;


pub use fetcher::{client_builder, HttpStatusSource, StatusSource};
pub use resolver::{issue_url, IssueRef};
pub use types::IssueStatus;
