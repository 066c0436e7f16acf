//! Blocking HTTP client for the Notion API.

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;

use super::types::{BlockRecord, PageRecord, Paginated};
use super::ContentSource;
use crate::error::{Error, Result};

const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API revision this client is written against.
const API_VERSION: &str = "2022-06-28";

/// Records requested per listing call; cursors cover the rest.
const PAGE_SIZE: u32 = 100;

/// Blocking client for the remote content API.
///
/// All calls are synchronous request/response units issued in traversal
/// order; the exporter never fetches concurrently.
///
/// # Example
///
/// ```no_run
/// use unnotion::api::{ContentSource, NotionClient};
///
/// fn main() -> unnotion::Result<()> {
///     let client = NotionClient::new("secret_token")?;
///     let roots = client.all_collection_pages("a1b2c3")?;
///     println!("{} root pages", roots.len());
///     Ok(())
/// }
/// ```
pub struct NotionClient {
    http: Client,
    base_url: String,
}

impl NotionClient {
    /// Create a client against the public API endpoint.
    pub fn new(token: &str) -> Result<Self> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (proxies, test servers).
    pub fn with_base_url(token: &str, base_url: impl Into<String>) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
            Error::InvalidConfig("auth token contains characters not valid in a header".to_string())
        })?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert("Notion-Version", HeaderValue::from_static(API_VERSION));

        let http = Client::builder().default_headers(headers).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

/// Decode a response, mapping non-success statuses to [`Error::Api`] with
/// the server's message when the error body is decodable.
fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.text()?;
    if !status.is_success() {
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(Error::Api {
            status: status.as_u16(),
            message,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

/// Error body shape returned by the API on non-success statuses.
#[derive(Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
}

impl ContentSource for NotionClient {
    fn query_collection(
        &self,
        collection_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<PageRecord>> {
        let url = format!("{}/databases/{}/query", self.base_url, collection_id);
        let mut body = json!({ "page_size": PAGE_SIZE });
        if let Some(cursor) = cursor {
            body["start_cursor"] = json!(cursor);
        }
        log::debug!("query_collection {collection_id} cursor={cursor:?}");
        decode(self.http.post(url).json(&body).send()?)
    }

    fn get_page(&self, page_id: &str) -> Result<PageRecord> {
        let url = format!("{}/pages/{}", self.base_url, page_id);
        log::debug!("get_page {page_id}");
        decode(self.http.get(url).send()?)
    }

    fn list_children(
        &self,
        node_id: &str,
        cursor: Option<&str>,
    ) -> Result<Paginated<BlockRecord>> {
        let url = format!("{}/blocks/{}/children", self.base_url, node_id);
        let mut request = self
            .http
            .get(url)
            .query(&[("page_size", PAGE_SIZE.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }
        log::debug!("list_children {node_id} cursor={cursor:?}");
        decode(request.send()?)
    }
}
