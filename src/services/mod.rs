pub mod assembler;
pub mod book;
pub mod converter;
pub mod github;
pub mod rate_limit;
pub mod workspace;

pub use book::{BookError, BookService};
pub use converter::{ConvertError, Converter};
pub use github::{GithubError, GithubService};
pub use rate_limit::RateLimitNotice;
pub use workspace::{Workspace, WorkspaceError};
