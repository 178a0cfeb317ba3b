//! RepoBook - GitHub repositories bound into PDF books
//!
//! This library provides the request pipeline for the RepoBook service:
//! repository URL parsing, GitHub Contents API orchestration, deterministic
//! book assembly and PDF conversion through an external converter.

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::AppError;

pub use models::{Chapter, GenerateRequest, RenderedBook, RepoRef};
pub use services::{BookError, BookService, Converter, GithubService};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub books: BookService,
}
