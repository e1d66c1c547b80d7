//! Content-based movie recommender served over HTTP.
//!
//! Movies are matched to a user's genre, actor and director preferences by
//! cosine similarity of term-count vectors over the catalog vocabulary.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod services;
pub mod store;
