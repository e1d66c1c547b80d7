pub mod metadata;
pub mod movie;
pub mod user;
pub mod user_preferences;

pub use metadata::{
    CastMember, MovieDetails, TmdbCastMember, TmdbCredits, TmdbGenre, TmdbMovie,
    NO_DETAILS_SUMMARY, NO_SUMMARY,
};
pub use movie::{MovieRecord, RawMovieRow, Recommendation};
pub use user::{User, UserMap};
pub use user_preferences::{canonical_genre, UserPreferences, SELECTABLE_GENRES};
