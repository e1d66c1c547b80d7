pub mod movie_details;
pub mod preferences;
pub mod providers;
pub mod recommendations;
pub mod title_search;

pub use providers::{MetadataProvider, TmdbProvider};
