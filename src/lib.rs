//! Resets the schema of the article/comment publishing database.
//!
//! A reset drops `article_media`, `comments`, `articles` and `admins`,
//! recreates them with cascading foreign keys to `articles`, and inserts one
//! admin, one article, one media entry and one comment.
//!
//! **This is destructive.** Every existing row in those four tables is
//! deleted and cannot be recovered.
//!
//! Both PostgreSQL and SQLite are supported; see [`config::Backend`].

pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod seed;

pub use config::Config;
pub use error::{AppError, FailureKind, Result};
