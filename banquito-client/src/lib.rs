//! # Banquito Client SDK
//!
//! A typed Rust client for the catalog API (branches, interest rates,
//! product accounts).

use banquito_types::{BranchRqrs, InterestRateId, InterestRateRqrs, ProductAccountRqrs};
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with an error status; `code` is the CRUD code
    /// from the body when present.
    #[error("API error: {status} - {message}")]
    Api {
        status: u16,
        code: Option<u16>,
        message: String,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid base URL: {0}")]
    InvalidUrl(String),
}

/// Catalog API client.
pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self.http.get(self.url(&["health"])?).send().await?;
        Ok(resp.status().is_success())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Branches
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn list_branches(&self) -> Result<Vec<BranchRqrs>, ClientError> {
        self.get(&["api", "branches"]).await
    }

    pub async fn get_branch(&self, code: &str) -> Result<BranchRqrs, ClientError> {
        self.get(&["api", "branches", code]).await
    }

    pub async fn create_branch(&self, code: &str, name: &str) -> Result<BranchRqrs, ClientError> {
        let req = BranchRqrs {
            id: None,
            code: code.to_string(),
            name: name.to_string(),
        };
        self.post(&["api", "branches"], &req).await
    }

    /// Renames the branch with the given code.
    pub async fn update_branch(&self, code: &str, name: &str) -> Result<BranchRqrs, ClientError> {
        let req = BranchRqrs {
            id: None,
            code: code.to_string(),
            name: name.to_string(),
        };
        self.put(&["api", "branches", code], &req).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Interest rates
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists the active interest rates.
    pub async fn list_interest_rates(&self) -> Result<Vec<InterestRateRqrs>, ClientError> {
        self.get(&["api", "interest-rates"]).await
    }

    pub async fn get_interest_rate(
        &self,
        id: InterestRateId,
    ) -> Result<InterestRateRqrs, ClientError> {
        let id = id.to_string();
        self.get(&["api", "interest-rates", id.as_str()]).await
    }

    pub async fn create_interest_rate(
        &self,
        rate: &InterestRateRqrs,
    ) -> Result<InterestRateRqrs, ClientError> {
        self.post(&["api", "interest-rates"], rate).await
    }

    pub async fn update_interest_rate(
        &self,
        id: InterestRateId,
        rate: &InterestRateRqrs,
    ) -> Result<InterestRateRqrs, ClientError> {
        let id = id.to_string();
        self.put(&["api", "interest-rates", id.as_str()], rate).await
    }

    /// Inactivates an interest rate.
    pub async fn delete_interest_rate(&self, id: InterestRateId) -> Result<(), ClientError> {
        let id = id.to_string();
        self.delete(&["api", "interest-rates", id.as_str()]).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Product accounts
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists the active product accounts.
    pub async fn list_product_accounts(&self) -> Result<Vec<ProductAccountRqrs>, ClientError> {
        self.get(&["api", "product-accounts"]).await
    }

    pub async fn get_product_account(&self, id: &str) -> Result<ProductAccountRqrs, ClientError> {
        self.get(&["api", "product-accounts", id]).await
    }

    pub async fn create_product_account(
        &self,
        account: &ProductAccountRqrs,
    ) -> Result<ProductAccountRqrs, ClientError> {
        self.post(&["api", "product-accounts"], account).await
    }

    pub async fn update_product_account(
        &self,
        id: &str,
        account: &ProductAccountRqrs,
    ) -> Result<ProductAccountRqrs, ClientError> {
        self.put(&["api", "product-accounts", id], account).await
    }

    /// Inactivates a product account.
    pub async fn delete_product_account(&self, id: &str) -> Result<(), ClientError> {
        self.delete(&["api", "product-accounts", id]).await
    }

    /// Joins `segments` onto the base URL, percent-encoding each one so a
    /// code like `"a/b"` stays a single path segment.
    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &[&str]) -> Result<T, ClientError> {
        let resp = self.http.get(self.url(path)?).send().await?;
        self.handle_response(resp).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.http.post(self.url(path)?).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn put<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self.http.put(self.url(path)?).json(body).send().await?;
        self.handle_response(resp).await
    }

    async fn delete(&self, path: &[&str]) -> Result<(), ClientError> {
        let resp = self.http.delete(self.url(path)?).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        if resp.status().is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            Err(Self::api_error(resp).await)
        }
    }

    async fn api_error(resp: reqwest::Response) -> ClientError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        let (code, message) = parse_error_body(&body);
        ClientError::Api {
            status,
            code,
            message,
        }
    }
}

/// Extracts `code` and `error` from a `{"error", "code"}` body, falling back
/// to the raw text.
fn parse_error_body(body: &str) -> (Option<u16>, String) {
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(v) => {
            let code = v
                .get("code")
                .and_then(|c| c.as_u64())
                .and_then(|c| u16::try_from(c).ok());
            let message = v
                .get("error")
                .and_then(|e| e.as_str())
                .map(String::from)
                .unwrap_or_else(|| body.to_string());
            (code, message)
        }
        Err(_) => (None, body.to_string()),
    }
}
