//! Google Sheets adapter. Implements SheetSink via the Sheets REST API.

use crate::domain::DomainError;
use crate::ports::SheetSink;
use reqwest::{Client, Url};
use std::sync::Arc;
use tracing::info;

/// Replaces a worksheet's contents: `values.clear` on the whole worksheet, then
/// `values.update` starting at `A1`.
///
/// Requires an OAuth access token with the `spreadsheets` scope.
pub struct GoogleSheetsSink {
    client: Arc<Client>,
    api_url: String,
    access_token: String,
}

impl GoogleSheetsSink {
    /// # Arguments
    /// * `api_url` - Sheets base (e.g. "https://sheets.googleapis.com/v4/spreadsheets")
    /// * `access_token` - Bearer token
    pub fn new(api_url: String, access_token: String) -> Self {
        Self {
            client: Arc::new(Client::new()),
            api_url,
            access_token,
        }
    }

    /// `{api_url}/{sheet_key}/values/{range}`, with path segments
    /// percent-encoded.
    fn values_url(&self, sheet_key: &str, range: &str) -> Result<Url, DomainError> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| DomainError::Config(format!("invalid Sheets API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| DomainError::Config("Sheets API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push(sheet_key)
            .push("values")
            .push(range);
        Ok(url)
    }

    fn update_url(&self, sheet_key: &str, worksheet: &str) -> Result<Url, DomainError> {
        let mut url = self.values_url(sheet_key, &format!("{}!A1", worksheet))?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        Ok(url)
    }

    fn clear_url(&self, sheet_key: &str, worksheet: &str) -> Result<Url, DomainError> {
        self.values_url(sheet_key, &format!("{}:clear", worksheet))
    }

    async fn check(res: reqwest::Response, step: &str) -> Result<(), DomainError> {
        if res.status().is_success() {
            return Ok(());
        }
        let status = res.status();
        let text = res.text().await.unwrap_or_else(|_| "unknown".to_string());
        Err(DomainError::Sink(format!(
            "Sheets API {} error {}: {}",
            step,
            status,
            text.chars().take(200).collect::<String>()
        )))
    }

    /// Remove every value on the worksheet so a shorter table leaves no stale rows.
    async fn clear(&self, sheet_key: &str, worksheet: &str) -> Result<(), DomainError> {
        let res = self
            .client
            .post(self.clear_url(sheet_key, worksheet)?)
            .bearer_auth(&self.access_token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| DomainError::Sink(format!("Clear request failed: {}", e)))?;
        Self::check(res, "clear").await
    }
}

#[async_trait::async_trait]
impl SheetSink for GoogleSheetsSink {
    async fn write_table(
        &self,
        sheet_key: &str,
        worksheet: &str,
        rows: &[Vec<String>],
    ) -> Result<(), DomainError> {
        let url = self.update_url(sheet_key, worksheet)?;
        self.clear(sheet_key, worksheet).await?;

        let body = serde_json::json!({
            "range": format!("{}!A1", worksheet),
            "majorDimension": "ROWS",
            "values": rows,
        });

        let res = self
            .client
            .put(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::Sink(format!("Request failed: {}", e)))?;
        Self::check(res, "update").await?;

        info!(sheet_key, worksheet, rows = rows.len(), "wrote table to Google Sheets");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_url_encodes_worksheet() {
        let sink = GoogleSheetsSink::new(
            "https://sheets.googleapis.com/v4/spreadsheets".into(),
            "token".into(),
        );
        let url = sink.update_url("abc123", "Daily Standups").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Daily%20Standups!A1?valueInputOption=RAW"
        );
    }

    #[test]
    fn test_clear_url_targets_whole_worksheet() {
        let sink = GoogleSheetsSink::new(
            "https://sheets.googleapis.com/v4/spreadsheets/".into(),
            "token".into(),
        );
        let url = sink.clear_url("abc123", "Daily Standups").unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/Daily%20Standups:clear"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let sink = GoogleSheetsSink::new("not a url".into(), "token".into());
        assert!(matches!(
            sink.update_url("k", "w"),
            Err(DomainError::Config(_))
        ));
    }

    #[tokio::test]
    async fn test_write_failure_is_sink_error() {
        let sink = GoogleSheetsSink::new("http://127.0.0.1:9/v4/spreadsheets".into(), "t".into());
        let rows = vec![vec!["Time".to_string()]];
        let err = sink.write_table("k", "w", &rows).await.unwrap_err();
        assert!(matches!(err, DomainError::Sink(_)));
    }
}
