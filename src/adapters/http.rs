use crate::domain::model::{LookupTable, Record};
use crate::utils::error::{ReportError, Result};
use reqwest::Client;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;

/// Resources exposed by the back-office REST API.
pub const API_RESOURCES: [&str; 12] = [
    "shipments",
    "products",
    "sales",
    "payments",
    "purchases",
    "costs",
    "currencies",
    "exchange-rates",
    "users",
    "roles",
    "audit-logs",
    "system-parameters",
];

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Thin typed client over the REST API: list endpoints only.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = Duration::from_secs(seconds);
        self
    }

    /// `<base>/<resource>/`, tolerant of stray slashes on either side.
    pub fn endpoint(&self, resource: &str) -> String {
        format!(
            "{}/{}/",
            self.base_url.trim_end_matches('/'),
            resource.trim_matches('/')
        )
    }

    async fn get_json(&self, url: &str) -> Result<Value> {
        let mut request = self.client.get(url).timeout(self.timeout);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        tracing::debug!("📡 GET {}", url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 {} -> {}", url, status);

        if !status.is_success() {
            tracing::error!("❌ API request to {} failed with status {}", url, status);
            return Err(ReportError::ApiStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// All records of a list resource. Accepts a bare array, a paginated
    /// `{"results": [...], "next": ...}` envelope, or a single object.
    pub async fn fetch_records(&self, resource: &str) -> Result<Vec<Record>> {
        if !API_RESOURCES.contains(&resource.trim_matches('/')) {
            tracing::warn!("'{}' is not a known API resource, fetching anyway", resource);
        }

        let mut records = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(self.endpoint(resource));

        while let Some(url) = next.take() {
            if !visited.insert(url.clone()) {
                return Err(ReportError::ProcessingError {
                    message: format!("Pagination of '{}' revisits {}", resource, url),
                });
            }
            match self.get_json(&url).await? {
                Value::Array(items) => {
                    records.extend(items.into_iter().filter_map(into_record));
                }
                Value::Object(mut obj) => match obj.remove("results") {
                    Some(Value::Array(items)) => {
                        records.extend(items.into_iter().filter_map(into_record));
                        next = obj
                            .get("next")
                            .and_then(Value::as_str)
                            .filter(|n| !n.is_empty())
                            .map(str::to_string);
                    }
                    Some(other) => {
                        obj.insert("results".to_string(), other);
                        records.push(obj);
                    }
                    None => records.push(obj),
                },
                other => {
                    return Err(ReportError::ProcessingError {
                        message: format!("Unexpected response shape from {}: {}", url, other),
                    })
                }
            }
        }

        tracing::info!("📡 Fetched {} records from '{}'", records.len(), resource);
        Ok(records)
    }

    /// Currency and shipment codes keyed by id, for resolving bare foreign keys.
    pub async fn fetch_lookups(&self) -> Result<LookupTable> {
        let currencies = self.fetch_records("currencies").await?;
        let shipments = self.fetch_records("shipments").await?;
        Ok(build_lookups(&currencies, &shipments))
    }
}

fn into_record(value: Value) -> Option<Record> {
    match value {
        Value::Object(obj) => Some(obj),
        other => {
            tracing::warn!("Skipping non-object list entry: {}", other);
            None
        }
    }
}

fn lookup_entries(records: &[Record], label_fields: &[&str]) -> Vec<(String, String)> {
    records
        .iter()
        .filter_map(|record| {
            let id = record.get("id")?.as_str()?;
            let label = label_fields
                .iter()
                .filter_map(|f| record.get(*f).and_then(Value::as_str))
                .find(|s| !s.is_empty())?;
            Some((id.to_string(), label.to_string()))
        })
        .collect()
}

pub fn build_lookups(currencies: &[Record], shipments: &[Record]) -> LookupTable {
    LookupTable {
        currencies: lookup_entries(currencies, &["code", "name"]).into_iter().collect(),
        shipments: lookup_entries(shipments, &["shipment_code", "code", "tracking_number"])
            .into_iter()
            .collect(),
    }
}
