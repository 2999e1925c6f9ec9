use crate::config;
use crate::error::PricingError;
use crate::models::{OptionRecord, PriceResponse};
use futures::stream::{self, StreamExt};
use reqwest::{header, Client};
use serde_json::Value;
use tracing::{debug, info, warn};

// -----------------------------------------------
// CLIENT FOR THE EXTERNAL PRICING SERVER
// -----------------------------------------------
#[derive(Debug, Clone)]
pub struct PricingClient {
    client: Client,
    base_url: String,
}

impl PricingClient {
    pub fn new() -> Result<Self, PricingError> {
        Self::with_base_url(config::PRICING_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, PricingError> {
        Ok(Self::with_client(build_client()?, base_url))
    }

    /// Use an already configured transport
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET the endpoint and return the raw body, failing on non-success status
    async fn fetch_text(&self, url: &str) -> Result<String, PricingError> {
        debug!(url, "GET pricing endpoint");

        let res = self.client.get(url).send().await?;
        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(PricingError::Status {
                status: status.as_u16(),
                body: preview(&body),
            });
        }

        Ok(res.text().await?)
    }

    // -----------------------------------------------
    // FETCH PRICED OPTIONS FOR ONE SYMBOL
    // -----------------------------------------------
    pub async fn fetch_options(
        &self,
        symbol: &str,
        rate: f64,
    ) -> Result<Vec<OptionRecord>, PricingError> {
        let url = config::price_url(&self.base_url, symbol, rate);
        let text = self.fetch_text(&url).await?;

        let envelope = parse_envelope(&text)?;
        let records = envelope.map(|e| e.records_for(symbol)).unwrap_or_default();

        info!(symbol, count = records.len(), "Fetched priced options");
        Ok(records)
    }

    // -----------------------------------------------
    // BATCH FETCH WITH CONCURRENCY CONTROL
    // -----------------------------------------------
    /// Results come back in the same order as `symbols`.
    pub async fn fetch_many(
        &self,
        symbols: &[String],
        rate: f64,
        max_concurrent: usize,
    ) -> Vec<(String, Result<Vec<OptionRecord>, PricingError>)> {
        stream::iter(symbols.iter().cloned())
            .map(move |symbol| async move {
                let result = self.fetch_options(&symbol, rate).await;
                if let Err(e) = &result {
                    warn!(symbol = %symbol, error = %e, "Fetch failed");
                }
                (symbol, result)
            })
            .buffered(max_concurrent.max(1))
            .collect()
            .await
    }
}

/// Decode a response body; a literal `null` means no envelope.
/// Bodies that are not JSON at all are reported separately from
/// JSON of the wrong shape.
fn parse_envelope(text: &str) -> Result<Option<PriceResponse>, PricingError> {
    let value: Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) if looks_like_json(text) => return Err(e.into()),
        Err(_) => return Err(PricingError::NonJsonResponse(preview(text))),
    };

    Ok(serde_json::from_value(value)?)
}

fn looks_like_json(text: &str) -> bool {
    matches!(
        text.trim_start().chars().next(),
        Some('{' | '[' | '"' | '-' | '0'..='9' | 't' | 'f' | 'n')
    )
}

fn preview(body: &str) -> String {
    body.chars().take(config::BODY_PREVIEW_CHARS).collect()
}

// -----------------------------------------------
// HTTP CLIENT BUILDER
// -----------------------------------------------
fn build_client() -> Result<Client, PricingError> {
    let mut headers = header::HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        header::HeaderValue::from_static(config::HEADER_ACCEPT_JSON),
    );

    Ok(Client::builder()
        .default_headers(headers)
        .user_agent(config::USER_AGENT)
        .build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_base_url() {
        let client = PricingClient::new().unwrap();
        assert_eq!(client.base_url(), config::PRICING_BASE_URL);
    }

    #[test]
    fn test_parse_envelope_null_body() {
        assert!(parse_envelope(" null ").unwrap().is_none());
    }

    #[test]
    fn test_parse_envelope_rejects_html() {
        let err = parse_envelope("<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, PricingError::NonJsonResponse(_)));
    }

    #[test]
    fn test_parse_envelope_wrong_shape() {
        let err = parse_envelope(r#"{"options": [1, 2, 3]}"#).unwrap_err();
        assert!(matches!(err, PricingError::Parse(_)));
    }

    #[test]
    fn test_parse_envelope_non_object_json_is_parse_error() {
        for body in ["[1, 2]", r#""x""#, "42", "true"] {
            let err = parse_envelope(body).unwrap_err();
            assert!(matches!(err, PricingError::Parse(_)), "body {} gave {:?}", body, err);
        }
    }

    #[test]
    fn test_parse_envelope_truncated_json_is_parse_error() {
        let err = parse_envelope(r#"{"options": {"AAPL": ["#).unwrap_err();
        assert!(matches!(err, PricingError::Parse(_)));
    }

    #[test]
    fn test_preview_truncates() {
        let long = "x".repeat(500);
        assert_eq!(preview(&long).len(), config::BODY_PREVIEW_CHARS);
    }
}
