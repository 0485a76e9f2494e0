//! name.com v4 API client for record management

use reqwest::Client;
use serde::{Deserialize, Serialize};

use async_trait::async_trait;

use crate::config::Credentials;
use crate::provider::{NewRecord, ProviderError, Record, RecordClient};

/// Production API endpoint
pub const DEFAULT_API_URL: &str = "https://api.name.com";

/// name.com record API client authenticated with an account's API username
/// and token
pub struct NameComClient {
    client: Client,
    base_url: String,
    username: String,
    token: String,
}

#[derive(Debug, Serialize)]
struct CreateRecordBody<'a> {
    host: &'a str,
    #[serde(rename = "type")]
    record_type: &'a str,
    answer: &'a str,
    ttl: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListRecordsResponse {
    #[serde(default)]
    records: Vec<Record>,
    /// Set when more pages follow the current one
    next_page: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: String,
}

impl NameComClient {
    pub fn new(credentials: &Credentials) -> Self {
        Self::with_base_url(credentials, DEFAULT_API_URL)
    }

    /// Point the client at a different endpoint (e.g. name.com's dev API)
    pub fn with_base_url(credentials: &Credentials, base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            username: credentials.username.clone(),
            token: credentials.token.clone(),
        }
    }

    fn records_url(&self, domain_name: &str) -> String {
        format!("{}/v4/domains/{}/records", self.base_url, domain_name)
    }

    /// Turn a non-2xx response into an API error with the provider's message
    async fn api_error(response: reqwest::Response) -> ProviderError {
        let status = response.status();
        let body: ApiErrorBody = response.json().await.unwrap_or(ApiErrorBody {
            message: "unparseable error response".to_string(),
            details: String::new(),
        });
        if body.details.is_empty() {
            ProviderError::Api(format!("{}: {}", status, body.message))
        } else {
            ProviderError::Api(format!("{}: {}: {}", status, body.message, body.details))
        }
    }
}

#[async_trait]
impl RecordClient for NameComClient {
    async fn create_record(&self, record: &NewRecord) -> Result<Record, ProviderError> {
        let response = self
            .client
            .post(self.records_url(&record.domain_name))
            .basic_auth(&self.username, Some(&self.token))
            .json(&CreateRecordBody {
                host: &record.host,
                record_type: &record.record_type,
                answer: &record.answer,
                ttl: record.ttl,
            })
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        let created: Record = response
            .json()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;
        tracing::debug!(
            "name.com created record {} in {}",
            created.id,
            record.domain_name
        );
        Ok(created)
    }

    async fn list_records(&self, domain_name: &str) -> Result<Vec<Record>, ProviderError> {
        let mut records = Vec::new();
        let mut page = 1u32;

        // The API pages its listings; follow nextPage until exhausted so a
        // cleanup scan never works from a truncated view.
        loop {
            let response = self
                .client
                .get(self.records_url(domain_name))
                .query(&[("page", page)])
                .basic_auth(&self.username, Some(&self.token))
                .send()
                .await
                .map_err(|e| ProviderError::Request(e.to_string()))?;

            if !response.status().is_success() {
                return Err(Self::api_error(response).await);
            }

            let body: ListRecordsResponse = response
                .json()
                .await
                .map_err(|e| ProviderError::Request(e.to_string()))?;
            records.extend(body.records);

            match body.next_page {
                Some(next) => page = next,
                None => break,
            }
        }

        tracing::debug!("name.com listed {} records in {}", records.len(), domain_name);
        Ok(records)
    }

    async fn delete_record(&self, domain_name: &str, id: i32) -> Result<(), ProviderError> {
        let response = self
            .client
            .delete(format!("{}/{}", self.records_url(domain_name), id))
            .basic_auth(&self.username, Some(&self.token))
            .send()
            .await
            .map_err(|e| ProviderError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }

        tracing::debug!("name.com deleted record {} in {}", id, domain_name);
        Ok(())
    }
}
