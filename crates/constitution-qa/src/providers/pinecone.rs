//! Pinecone integrated-inference search client
//!
//! The index embeds the raw query text itself, so no embedding model runs in
//! this process. Queries go to the index's data-plane host; when that host is
//! not configured it is looked up once through the control plane.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};

use crate::config::VectorSearchConfig;
use crate::error::{Error, Result};
use crate::providers::vector_store::VectorSearchProvider;
use crate::types::passage::{passages_from_response, PASSAGE_FIELDS};
use crate::types::RetrievedPassage;

const API_KEY_HEADER: &str = "api-key";
const API_VERSION_HEADER: &str = "x-pinecone-api-version";

/// Search client bound to one index and namespace
pub struct PineconeSearch {
    client: reqwest::Client,
    base_url: String,
    index_name: String,
    namespace: String,
}

impl PineconeSearch {
    /// Build the client, resolving the index host through the control plane
    /// when `index_host` is not set
    pub async fn connect(config: &VectorSearchConfig) -> Result<Self> {
        let client = build_client(config)?;

        let host = match &config.index_host {
            Some(host) => host.clone(),
            None => describe_index_host(&client, config).await?,
        };

        tracing::info!(
            index = %config.index_name,
            namespace = %config.namespace,
            host = %host,
            "Pinecone index resolved"
        );

        Ok(Self::from_client(client, config, &host))
    }

    /// Build the client against a known data-plane host, without network access
    pub fn with_host(config: &VectorSearchConfig, host: &str) -> Result<Self> {
        Ok(Self::from_client(build_client(config)?, config, host))
    }

    fn from_client(client: reqwest::Client, config: &VectorSearchConfig, host: &str) -> Self {
        Self {
            client,
            base_url: normalize_host(host),
            index_name: config.index_name.clone(),
            namespace: config.namespace.clone(),
        }
    }

    /// Records search URL for the configured namespace
    fn search_endpoint(&self) -> String {
        format!("{}/records/namespaces/{}/search", self.base_url, self.namespace)
    }
}

#[derive(Serialize)]
struct SearchRecordsRequest<'a> {
    query: SearchQuery<'a>,
    fields: &'a [&'a str],
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    inputs: QueryInputs<'a>,
    top_k: usize,
}

#[derive(Serialize)]
struct QueryInputs<'a> {
    text: &'a str,
}

impl<'a> SearchRecordsRequest<'a> {
    fn new(text: &'a str, top_k: usize) -> Self {
        Self {
            query: SearchQuery {
                inputs: QueryInputs { text },
                top_k,
            },
            fields: &PASSAGE_FIELDS,
        }
    }
}

#[derive(Deserialize)]
struct IndexDescription {
    host: String,
}

#[async_trait]
impl VectorSearchProvider for PineconeSearch {
    async fn search(&self, query: &str, top_k: usize) -> Result<Vec<RetrievedPassage>> {
        let start = Instant::now();

        let response = self
            .client
            .post(self.search_endpoint())
            .json(&SearchRecordsRequest::new(query, top_k))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::upstream_status("Pinecone search", status.as_u16(), &body));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::vector_db(format!("Failed to parse Pinecone response: {}", e)))?;

        let passages = passages_from_response(&body);

        tracing::debug!(
            namespace = %self.namespace,
            top_k,
            hits = passages.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Pinecone search complete"
        );

        Ok(passages)
    }

    fn index_name(&self) -> &str {
        &self.index_name
    }

    fn name(&self) -> &str {
        "pinecone"
    }
}

fn build_client(config: &VectorSearchConfig) -> Result<reqwest::Client> {
    let mut api_key = HeaderValue::from_str(&config.api_key)
        .map_err(|_| Error::Config("PINECONE_API_KEY is not a valid header value".to_string()))?;
    api_key.set_sensitive(true);

    let api_version = HeaderValue::from_str(&config.api_version)
        .map_err(|_| Error::Config("PINECONE_API_VERSION is not a valid header value".to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(API_KEY_HEADER, api_key);
    headers.insert(API_VERSION_HEADER, api_version);

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))
}

async fn describe_index_host(client: &reqwest::Client, config: &VectorSearchConfig) -> Result<String> {
    let url = format!(
        "{}/indexes/{}",
        config.control_url.trim_end_matches('/'),
        config.index_name
    );

    let response = client.get(&url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::upstream_status("Pinecone control plane", status.as_u16(), &body));
    }

    let description: IndexDescription = response
        .json()
        .await
        .map_err(|e| Error::vector_db(format!("Failed to parse index description: {}", e)))?;

    Ok(description.host)
}

/// Control plane hosts come back bare (`name-xxxx.svc.pinecone.io`)
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    }
}
