pub mod book;
pub mod contents;
pub mod repository;

pub use book::*;
pub use contents::*;
pub use repository::*;
