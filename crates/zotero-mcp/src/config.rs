//! Configuration for the Zotero MCP server.

use std::fmt;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Zotero Web API.
    pub const BASE_URL: &str = "https://api.zotero.org";

    /// Zotero Web API version sent with every request.
    pub const API_VERSION: &str = "3";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Largest page the API serves for item and collection listings.
    pub const PAGE_SIZE: usize = 100;

    /// Item type used when a create request does not name one.
    pub const DEFAULT_ITEM_TYPE: &str = "journalArticle";
}

/// Environment variable names read by [`Config::from_env`].
pub mod env {
    /// Numeric user or group id.
    pub const LIBRARY_ID: &str = "LIBRARY_ID";

    /// `user` or `group`.
    pub const LIBRARY_TYPE: &str = "LIBRARY_TYPE";

    /// Zotero API key.
    pub const API_KEY: &str = "ZOTERO_API_KEY";

    /// Override for the API base URL.
    pub const API_URL: &str = "ZOTERO_API_URL";
}

/// Kind of library the credentials address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LibraryType {
    /// A personal library (`/users/{id}`).
    #[default]
    User,
    /// A group library (`/groups/{id}`).
    Group,
}

impl LibraryType {
    /// Parse a library type leniently: `group` selects a group library,
    /// anything else a user library.
    #[must_use]
    pub fn from_str_loose(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("group") {
            Self::Group
        } else {
            Self::User
        }
    }

    /// URL path segment for this library type.
    #[must_use]
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::User => "users",
            Self::Group => "groups",
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => f.write_str("user"),
            Self::Group => f.write_str("group"),
        }
    }
}

/// Server configuration.
///
/// Credentials are carried as given; nothing is checked locally. A missing or
/// wrong key surfaces as an authorization error on the first remote call.
#[derive(Clone)]
pub struct Config {
    /// Zotero library id.
    pub library_id: String,

    /// Whether `library_id` names a user or a group.
    pub library_type: LibraryType,

    /// Zotero API key.
    pub api_key: String,

    /// Base URL for the Web API (for testing with mock servers).
    pub api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Page size used when enumerating listings.
    pub page_size: usize,
}

impl Config {
    /// Create a configuration for the given library.
    #[must_use]
    pub fn new(
        library_id: impl Into<String>,
        library_type: LibraryType,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            library_id: library_id.into(),
            library_type,
            api_key: api_key.into(),
            api_url: api::BASE_URL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            page_size: api::PAGE_SIZE,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            library_id: "12345".to_string(),
            library_type: LibraryType::User,
            api_key: "test-key".to_string(),
            api_url: base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            page_size: api::PAGE_SIZE,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Unset variables become empty strings; `LIBRARY_TYPE` defaults to `user`.
    #[must_use]
    pub fn from_env() -> Self {
        let library_id = std::env::var(env::LIBRARY_ID).unwrap_or_default();
        let library_type = std::env::var(env::LIBRARY_TYPE)
            .map(|v| LibraryType::from_str_loose(&v))
            .unwrap_or_default();
        let api_key = std::env::var(env::API_KEY).unwrap_or_default();

        let mut config = Self::new(library_id, library_type, api_key);
        if let Ok(url) = std::env::var(env::API_URL) {
            if !url.is_empty() {
                config = config.with_api_url(&url);
            }
        }
        config
    }

    /// Override the API base URL.
    #[must_use]
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Override the listing page size.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Path prefix for this library, e.g. `/users/12345`.
    #[must_use]
    pub fn library_prefix(&self) -> String {
        format!("/{}/{}", self.library_type.path_segment(), self.library_id)
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("library_id", &self.library_id)
            .field("library_type", &self.library_type)
            .field("has_api_key", &self.has_api_key())
            .field("api_url", &self.api_url)
            .finish()
    }
}
