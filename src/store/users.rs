use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    error::{AppError, AppResult},
    models::{User, UserMap, UserPreferences},
};

use super::password::CredentialHasher;

/// Persistent account storage
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    /// All users; an unreadable store reads as empty
    async fn load(&self) -> UserMap;

    async fn save(&self, users: &UserMap) -> AppResult<()>;

    /// Adds a user. Returns false, changing nothing, if the name is taken.
    async fn register(
        &self,
        username: &str,
        password: &str,
        preferences: UserPreferences,
    ) -> AppResult<bool>;

    async fn authenticate(&self, username: &str, password: &str) -> AppResult<bool>;

    async fn preferences(&self, username: &str) -> AppResult<UserPreferences>;

    async fn update_preferences(
        &self,
        username: &str,
        preferences: UserPreferences,
    ) -> AppResult<()>;
}

/// Users kept in a single pretty-printed JSON object keyed by username
pub struct JsonFileUserStore {
    path: PathBuf,
    hasher: Arc<dyn CredentialHasher>,
    /// Writers hold it exclusively for a whole read-modify-write cycle
    lock: RwLock<()>,
}

impl JsonFileUserStore {
    /// Opens the store, creating an empty file if none exists
    pub async fn open(
        path: impl AsRef<Path>,
        hasher: Arc<dyn CredentialHasher>,
    ) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path).await? {
            tokio::fs::write(&path, "{}").await?;
            tracing::info!(path = %path.display(), "Created empty user store");
        }

        Ok(Self {
            path,
            hasher,
            lock: RwLock::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_users(&self) -> UserMap {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    path = %self.path.display(),
                    "User store unreadable, treating as empty"
                );
                return UserMap::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!(
                error = %e,
                path = %self.path.display(),
                "User store corrupt, treating as empty"
            );
            UserMap::new()
        })
    }

    /// Replaces the file through a sibling temp file so readers never see a partial write
    async fn write_users(&self, users: &UserMap) -> AppResult<()> {
        let json = serde_json::to_string_pretty(users)?;
        let temp_path = self.path.with_extension("json.tmp");

        tokio::fs::write(&temp_path, json).await?;
        if let Err(e) = tokio::fs::rename(&temp_path, &self.path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn hash_password(&self, password: &str) -> AppResult<String> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?
    }

    async fn verify_password(&self, password: &str, stored: &str) -> AppResult<bool> {
        let hasher = Arc::clone(&self.hasher);
        let password = password.to_string();
        let stored = stored.to_string();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
            .await
            .map_err(|e| AppError::Internal(format!("Verification task failed: {}", e)))
    }
}

#[async_trait::async_trait]
impl UserStore for JsonFileUserStore {
    async fn load(&self) -> UserMap {
        let _guard = self.lock.read().await;
        self.read_users().await
    }

    async fn save(&self, users: &UserMap) -> AppResult<()> {
        let _guard = self.lock.write().await;
        self.write_users(users).await
    }

    async fn register(
        &self,
        username: &str,
        password: &str,
        preferences: UserPreferences,
    ) -> AppResult<bool> {
        // Hashed before locking; a rejected duplicate just discards it
        let password_hash = self.hash_password(password).await?;

        let _guard = self.lock.write().await;
        let mut users = self.read_users().await;

        if users.contains_key(username) {
            tracing::info!(username = %username, "Registration rejected, username taken");
            return Ok(false);
        }

        users.insert(username.to_string(), User::new(password_hash, preferences));
        self.write_users(&users).await?;

        tracing::info!(username = %username, users = users.len(), "User registered");
        Ok(true)
    }

    async fn authenticate(&self, username: &str, password: &str) -> AppResult<bool> {
        let stored = {
            let _guard = self.lock.read().await;
            match self.read_users().await.remove(username) {
                Some(user) => user.password_hash,
                None => return Ok(false),
            }
        };

        if !self.verify_password(password, &stored).await? {
            return Ok(false);
        }

        if self.hasher.needs_rehash(&stored) {
            let upgraded = self.hash_password(password).await?;

            let _guard = self.lock.write().await;
            let mut users = self.read_users().await;
            // Only replace the credential that was just verified
            if let Some(user) = users
                .get_mut(username)
                .filter(|user| user.password_hash == stored)
            {
                user.password_hash = upgraded;
                self.write_users(&users).await?;
                tracing::info!(username = %username, "Upgraded stored credential");
            }
        }

        Ok(true)
    }

    async fn preferences(&self, username: &str) -> AppResult<UserPreferences> {
        let _guard = self.lock.read().await;
        self.read_users()
            .await
            .remove(username)
            .map(|user| user.preferences)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))
    }

    async fn update_preferences(
        &self,
        username: &str,
        preferences: UserPreferences,
    ) -> AppResult<()> {
        let _guard = self.lock.write().await;
        let mut users = self.read_users().await;

        let user = users
            .get_mut(username)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", username)))?;
        user.preferences = preferences;
        self.write_users(&users).await?;

        tracing::info!(username = %username, "Preferences updated");
        Ok(())
    }
}
