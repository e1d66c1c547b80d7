pub mod password;
pub mod sessions;
pub mod users;

pub use password::{Argon2Hasher, CredentialHasher};
pub use sessions::{Session, SessionStore};
pub use users::{JsonFileUserStore, UserStore};
