//! Zotero Web API v3 client.
//!
//! Thin typed wrapper over the item, collection, template and export
//! endpoints of one library. Requests are issued exactly once: no retries,
//! no caching.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Collection, ExportFormat, Item, ItemTemplate, NewCollection, WriteResponse};

/// Header carrying the API key.
const API_KEY_HEADER: &str = "Zotero-API-Key";

/// Header selecting the API version.
const API_VERSION_HEADER: &str = "Zotero-API-Version";

/// Header carrying the total size of a paged listing.
const TOTAL_RESULTS_HEADER: &str = "Total-Results";

/// Header for optimistic concurrency on writes.
const IF_UNMODIFIED_HEADER: &str = "If-Unmodified-Since-Version";

type Params = [(String, String)];

/// Zotero API client bound to one library.
#[derive(Clone)]
pub struct ZoteroClient {
    /// HTTP client.
    client: Client,

    /// API key (may be empty for public libraries).
    api_key: String,

    /// API base URL.
    api_url: String,

    /// `/users/{id}` or `/groups/{id}`.
    library_prefix: String,

    /// Listing page size.
    page_size: usize,
}

impl ZoteroClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(API_VERSION_HEADER, HeaderValue::from_static(api::API_VERSION));

        let client = Client::builder()
            .default_headers(headers)
            .user_agent(concat!("zotero-mcp/", env!("CARGO_PKG_VERSION")))
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            library_prefix: config.library_prefix(),
            page_size: config.page_size.max(1),
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// URL of a library-scoped path, e.g. `/items` -> `{base}/users/1/items`.
    #[must_use]
    pub fn library_url(&self, path: &str) -> String {
        format!("{}{}{}", self.api_url, self.library_prefix, path)
    }

    /// All items in the library, following pages until exhausted.
    pub async fn all_items(&self) -> ClientResult<Vec<Item>> {
        self.get_all(&self.library_url("/items"), &[]).await
    }

    /// One page of up to `page_size` items matching the given query parameters.
    pub async fn items(&self, params: &Params) -> ClientResult<Vec<Item>> {
        let mut params = params.to_vec();
        params.push(("limit".to_string(), self.page_size.to_string()));
        self.get_json(&self.library_url("/items"), &params).await
    }

    /// A single item by key.
    pub async fn item(&self, key: &str) -> ClientResult<Item> {
        self.get_json(&self.library_url(&format!("/items/{key}")), &[]).await
    }

    /// Field template for an item type.
    ///
    /// Unknown item types are rejected upstream with 400; that is reported as
    /// [`ClientError::UnknownItemType`].
    pub async fn item_template(&self, item_type: &str) -> ClientResult<ItemTemplate> {
        let url = format!("{}/items/new", self.api_url);
        let params = [("itemType".to_string(), item_type.to_string())];

        match self.get_json(&url, &params).await {
            Err(ClientError::BadRequest { .. } | ClientError::NotFound { .. }) => {
                Err(ClientError::unknown_item_type(item_type))
            }
            other => other,
        }
    }

    /// Create items from full field maps.
    pub async fn create_items(&self, items: &[Value]) -> ClientResult<WriteResponse> {
        let body = serde_json::to_value(items)?;
        self.post_json(&self.library_url("/items"), &body).await
    }

    /// Patch fields of an item written at `version`.
    pub async fn patch_item(&self, key: &str, version: u64, fields: &Value) -> ClientResult<()> {
        let url = self.library_url(&format!("/items/{key}"));
        let request = self
            .request(Method::PATCH, &url)
            .header(IF_UNMODIFIED_HEADER, version.to_string())
            .json(fields);
        self.send(request).await?;
        Ok(())
    }

    /// Delete an item written at `version`.
    pub async fn delete_item(&self, key: &str, version: u64) -> ClientResult<()> {
        let url = self.library_url(&format!("/items/{key}"));
        let request = self
            .request(Method::DELETE, &url)
            .header(IF_UNMODIFIED_HEADER, version.to_string());
        self.send(request).await?;
        Ok(())
    }

    /// All collections in the library.
    pub async fn all_collections(&self) -> ClientResult<Vec<Collection>> {
        self.get_all(&self.library_url("/collections"), &[]).await
    }

    /// Create collections.
    pub async fn create_collections(
        &self,
        collections: &[NewCollection],
    ) -> ClientResult<WriteResponse> {
        let body = serde_json::to_value(collections)?;
        self.post_json(&self.library_url("/collections"), &body).await
    }

    /// All items in a collection.
    pub async fn all_collection_items(&self, collection_key: &str) -> ClientResult<Vec<Item>> {
        let url = self.library_url(&format!("/collections/{collection_key}/items"));
        self.get_all(&url, &[]).await
    }

    /// Render the given items in an export format with a single request.
    pub async fn export_items(&self, keys: &[String], format: ExportFormat) -> ClientResult<String> {
        // Without a limit the server renders only its default page of 25.
        let params = [
            ("itemKey".to_string(), keys.join(",")),
            ("format".to_string(), format.as_api_str().to_string()),
            ("limit".to_string(), self.page_size.max(keys.len()).to_string()),
        ];
        let request = self.request(Method::GET, &self.library_url("/items")).query(&params);
        let response = self.send(request).await?;
        Ok(response.text().await?)
    }

    /// Build a request with per-request auth.
    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        tracing::debug!(%method, url, "Zotero API request");

        let request = self.client.request(method, url);
        if self.api_key.is_empty() {
            request
        } else {
            request.header(API_KEY_HEADER, &self.api_key)
        }
    }

    /// Send a request and map error statuses.
    async fn send(&self, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await?;
        self.handle_response(response).await
    }

    /// Make a GET request and decode the JSON body.
    async fn get_json<T>(&self, url: &str, params: &Params) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let (value, _) = self.get_page(url, params).await?;
        Ok(value)
    }

    /// Make a GET request, returning the body and the `Total-Results` header.
    async fn get_page<T>(&self, url: &str, params: &Params) -> ClientResult<(T, Option<usize>)>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::GET, url).query(params);
        let response = self.send(request).await?;

        let total = response
            .headers()
            .get(TOTAL_RESULTS_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());

        let value: Value = response.json().await?;
        Ok((serde_json::from_value(value)?, total))
    }

    /// GET every page of a listing.
    ///
    /// Stops on a short page or once `Total-Results` entries have been read.
    async fn get_all<T>(&self, url: &str, params: &Params) -> ClientResult<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut results = Vec::new();
        let mut start = 0usize;

        loop {
            let mut page_params = params.to_vec();
            page_params.push(("start".to_string(), start.to_string()));
            page_params.push(("limit".to_string(), self.page_size.to_string()));

            let (page, total): (Vec<T>, Option<usize>) = self.get_page(url, &page_params).await?;
            let fetched = page.len();
            results.extend(page);
            start += fetched;

            tracing::debug!(url, fetched, start, ?total, "Fetched page");

            if fetched < self.page_size || total.is_some_and(|t| start >= t) {
                break;
            }
        }

        Ok(results)
    }

    /// Make a POST request with a JSON body.
    async fn post_json<T>(&self, url: &str, body: &Value) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, url).json(body);
        let response = self.send(request).await?;
        let value: Value = response.json().await?;
        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Handle API response status codes.
    async fn handle_response(&self, response: Response) -> ClientResult<Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let path = response.url().path().to_string();
        tracing::warn!(status = status.as_u16(), path = %path, "Zotero API returned an error status");

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .or_else(|| response.headers().get("Backoff"))
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(60);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                let resource = if text.trim().is_empty() { path } else { text };
                Err(ClientError::not_found(resource))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            401 | 403 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::Unauthorized { status: status.as_u16(), message: text })
            }
            412 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::PreconditionFailed { message: text })
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for ZoteroClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZoteroClient")
            .field("library", &self.library_prefix)
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
