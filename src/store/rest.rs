use anyhow::{anyhow, Context, Result};
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use crate::faculty::FacultyRecord;

/// Client for a PostgREST-style record store exposing the `faculty` table.
///
/// All requests carry the API key both as `apikey` and as a bearer token,
/// which is what the hosted store expects.
pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("facdash")
            .build()
            .context("Failed to create record store client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/faculty", self.base_url)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    /// Retry strategy: exponential backoff with 3 attempts
    fn retry_strategy() -> impl Iterator<Item = std::time::Duration> {
        ExponentialBackoff::from_millis(100)
            .max_delay(std::time::Duration::from_secs(5))
            .take(3)
    }

    async fn fetch_records(&self, query: &str) -> Result<Vec<FacultyRecord>> {
        let url = format!("{}?select=*{}", self.table_url(), query);

        let records = Retry::spawn(Self::retry_strategy(), || async {
            let response = self
                .authed(self.client.get(&url))
                .send()
                .await
                .map_err(|e| anyhow!("Record store unreachable: {}", e))?;

            let status = response.status();
            if !status.is_success() {
                return Err(map_store_error(status));
            }

            response
                .json::<Vec<FacultyRecord>>()
                .await
                .map_err(|e| anyhow!("Record store returned malformed data: {}", e))
        })
        .await?;

        Ok(records)
    }
}

impl crate::store::FacultyStore for RestStore {
    async fn list(&self) -> Result<Vec<FacultyRecord>> {
        self.fetch_records("").await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<FacultyRecord>> {
        let records = self.fetch_records(&format!("&id=eq.{}", id)).await?;
        Ok(records.into_iter().next())
    }

    async fn upsert(&self, record: &FacultyRecord) -> Result<()> {
        let response = self
            .authed(self.client.post(self.table_url()))
            .header("Prefer", "resolution=merge-duplicates")
            .json(&[record])
            .send()
            .await
            .map_err(|e| anyhow!("Record store unreachable: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(map_store_error(status));
        }

        Ok(())
    }
}

/// Turn an HTTP status into an actionable message.
fn map_store_error(status: reqwest::StatusCode) -> anyhow::Error {
    match status.as_u16() {
        401 | 403 => anyhow!(
            "Record store rejected the API key. Check store.api_key in your config \
             (or the FACDASH_API_KEY environment variable)."
        ),
        404 => anyhow!(
            "Faculty table not found. Check store.url points at the record store root."
        ),
        429 => anyhow!("Record store rate limit exceeded. Wait a few minutes and try again."),
        _ => anyhow!("Record store error: HTTP {}", status),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = RestStore::new("https://example.supabase.co/", "key").unwrap();
        assert_eq!(
            store.table_url(),
            "https://example.supabase.co/rest/v1/faculty"
        );
    }

    #[test]
    fn test_auth_error_message_mentions_api_key() {
        let err = map_store_error(reqwest::StatusCode::UNAUTHORIZED);
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_rate_limit_error_message() {
        let err = map_store_error(reqwest::StatusCode::TOO_MANY_REQUESTS);
        assert!(err.to_string().contains("rate limit"));
    }
}
