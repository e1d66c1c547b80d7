use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Path to the movie catalog CSV
    #[serde(default = "default_dataset_path")]
    pub dataset_path: String,

    /// Path to the JSON user store
    #[serde(default = "default_user_store_path")]
    pub user_store_path: String,

    /// TMDb API key; metadata lookups return placeholders when unset
    #[serde(default)]
    pub tmdb_api_key: Option<String>,

    /// TMDb API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Base URL prepended to TMDb poster and profile paths
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Per-request timeout for metadata lookups
    #[serde(default = "default_metadata_timeout_secs")]
    pub metadata_timeout_secs: u64,

    /// Number of recommendations shown to a fresh session
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Increment applied by "load more"
    #[serde(default = "default_page_step")]
    pub page_step: usize,

    /// Seconds a login session stays valid
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: i64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_dataset_path() -> String {
    "tmdb_movies_data.csv".to_string()
}

fn default_user_store_path() -> String {
    "users.json".to_string()
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_metadata_timeout_secs() -> u64 {
    10
}

fn default_page_size() -> usize {
    5
}

fn default_page_step() -> usize {
    5
}

fn default_session_ttl_secs() -> i64 {
    24 * 60 * 60
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config: Config = envy::from_iter(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

        if config.default_page_size == 0 {
            anyhow::bail!("DEFAULT_PAGE_SIZE must be positive");
        }
        if config.session_ttl_secs <= 0 {
            anyhow::bail!("SESSION_TTL_SECS must be positive");
        }

        Ok(config)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
