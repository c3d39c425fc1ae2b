//! Transactions API client
//!
//! Reads `GET {base_url}/transactions`, which returns the full transaction
//! list and the balance aggregate in one body:
//!
//! ```json
//! { "transactions": [ { "id", "title", "type", "value", "created_at", "category" } ],
//!   "balance": { "income": 0, "outcome": 0, "total": 0 } }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};

use crate::domain::result::{Error, Result};
use crate::domain::TransactionsPayload;
use crate::ports::TransactionSource;

/// Default API URL (local development server)
pub const DEFAULT_BASE_URL: &str = "http://localhost:3333";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// HTTP transaction source
#[derive(Debug)]
pub struct HttpTransactionSource {
    client: Client,
    base_url: String,
    timeout_secs: u64,
}

impl HttpTransactionSource {
    /// Create a client for the given base URL with the default timeout
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT_SECS)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let base_url = base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(Error::config("API base URL cannot be empty"));
        }
        if timeout_secs == 0 {
            return Err(Error::config("Request timeout must be at least 1 second"));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| Error::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.to_string(),
            timeout_secs,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn transactions_url(&self) -> String {
        format!("{}/transactions", self.base_url)
    }

    /// Map request errors to user-friendly messages
    fn map_request_error(&self, error: reqwest::Error) -> Error {
        if error.is_timeout() {
            Error::fetch(format!(
                "Connection timed out after {} seconds",
                self.timeout_secs
            ))
        } else if error.is_connect() {
            Error::fetch(format!("Unable to connect to {}", self.base_url))
        } else {
            Error::fetch(format!("Request failed: {}", error))
        }
    }

    /// Check response status and return appropriate errors
    fn check_response_status(&self, response: &Response) -> Result<()> {
        match response.status().as_u16() {
            200 => Ok(()),
            401 => Err(Error::api(
                401,
                "Authentication failed. The API rejected the request credentials",
            )),
            403 => Err(Error::api(403, "Access denied by the transactions API")),
            404 => Err(Error::api(
                404,
                format!("Transactions endpoint not found at {}", self.transactions_url()),
            )),
            429 => Err(Error::api(
                429,
                "Rate limit exceeded. Please wait a moment and try again",
            )),
            status => Err(Error::api(status, format!("API error: HTTP {}", status))),
        }
    }
}

#[async_trait]
impl TransactionSource for HttpTransactionSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_transactions(&self) -> Result<TransactionsPayload> {
        let response = self
            .client
            .get(self.transactions_url())
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        self.check_response_status(&response)?;

        // Read the body first so malformed JSON surfaces as a JSON error
        let body = response
            .bytes()
            .await
            .map_err(|e| self.map_request_error(e))?;

        Ok(serde_json::from_slice(&body)?)
    }
}
