//! Dune query client and result-row mapping.
//!
//! A query run is: execute with parameters, poll the execution status until it reaches a
//! terminal state, then fetch the result rows.

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;
use serde_json::{Map, Value, json};

use era_common::config::AppConfig;
use era_common::error::AppError;
use era_common::types::AirdropData;

/// One result row, keyed by column name.
pub type Row = Map<String, Value>;

/// Timestamp layout Dune uses for `timestamp` columns.
const DUNE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f UTC";

#[derive(Debug, Deserialize)]
struct ExecuteResponse {
    execution_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
enum ExecutionState {
    #[serde(rename = "QUERY_STATE_PENDING")]
    Pending,
    #[serde(rename = "QUERY_STATE_EXECUTING")]
    Executing,
    #[serde(rename = "QUERY_STATE_COMPLETED")]
    Completed,
    #[serde(rename = "QUERY_STATE_COMPLETED_PARTIAL")]
    CompletedPartial,
    #[serde(rename = "QUERY_STATE_FAILED")]
    Failed,
    #[serde(rename = "QUERY_STATE_CANCELLED")]
    Cancelled,
    #[serde(rename = "QUERY_STATE_EXPIRED")]
    Expired,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    state: ExecutionState,
}

#[derive(Debug, Default, Deserialize)]
struct ResultSet {
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Debug, Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    result: Option<ResultSet>,
}

/// Client for the Dune query execution API.
pub struct DuneClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    poll_interval: Duration,
    max_wait: Duration,
}

impl DuneClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        poll_interval: Duration,
        max_wait: Duration,
    ) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build Dune HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            poll_interval,
            max_wait,
        })
    }

    /// Build a client when a Dune API key is configured.
    pub fn from_config(config: &AppConfig) -> Result<Option<Self>, AppError> {
        let Some(api_key) = config.dune_api_key.as_deref() else {
            return Ok(None);
        };
        Self::new(
            &config.dune_api_url,
            api_key,
            Duration::from_millis(config.dune_poll_interval_ms),
            Duration::from_secs(config.dune_max_wait_secs),
        )
        .map(Some)
    }

    /// Execute `query_id` with text parameters and return its result rows.
    pub async fn run_query(
        &self,
        query_id: u64,
        params: &[(&str, &str)],
    ) -> Result<Vec<Row>, AppError> {
        let parameters: Map<String, Value> = params
            .iter()
            .map(|(name, value)| (name.to_string(), Value::String(value.to_string())))
            .collect();

        let execution: ExecuteResponse = self
            .post(
                &format!("/api/v1/query/{query_id}/execute"),
                json!({ "query_parameters": parameters, "performance": "medium" }),
            )
            .await?;
        let execution_id = execution.execution_id;
        tracing::debug!(query_id, %execution_id, "Dune execution started");

        let deadline = tokio::time::Instant::now() + self.max_wait;
        loop {
            let status: StatusResponse = self
                .get(&format!("/api/v1/execution/{execution_id}/status"))
                .await?;

            match status.state {
                ExecutionState::Completed | ExecutionState::CompletedPartial => break,
                ExecutionState::Failed | ExecutionState::Cancelled | ExecutionState::Expired => {
                    return Err(AppError::Upstream(format!(
                        "Dune execution {execution_id} ended in state {:?}",
                        status.state
                    )));
                }
                ExecutionState::Pending | ExecutionState::Executing | ExecutionState::Unknown => {}
            }

            if tokio::time::Instant::now() >= deadline {
                return Err(AppError::Upstream(format!(
                    "Dune execution {execution_id} did not finish within {:?}",
                    self.max_wait
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }

        let results: ResultsResponse = self
            .get(&format!("/api/v1/execution/{execution_id}/results"))
            .await?;
        let rows = results.result.unwrap_or_default().rows;
        tracing::debug!(query_id, %execution_id, rows = rows.len(), "Dune execution finished");
        Ok(rows)
    }

    async fn post<T: for<'de> Deserialize<'de>>(&self, path: &str, body: Value) -> Result<T, AppError> {
        let request = self.client.post(format!("{}{path}", self.base_url)).json(&body);
        self.send(path, request).await
    }

    async fn get<T: for<'de> Deserialize<'de>>(&self, path: &str) -> Result<T, AppError> {
        let request = self.client.get(format!("{}{path}", self.base_url));
        self.send(path, request).await
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<T, AppError> {
        let response = request
            .header("X-DUNE-API-KEY", &self.api_key)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Dune request {path} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "Dune request {path} returned {status}: {body}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Dune response for {path} unreadable: {e}")))
    }
}

/// Map the first result row for a wallet to the service's allocation record.
pub fn row_to_airdrop(row: &Row, wallet_address: &str, now: DateTime<Utc>) -> AirdropData {
    let vesting_end_date = match row.get("vesting_end_date") {
        None | Some(Value::Null) => None,
        Some(raw) => {
            let parsed = parse_timestamp(raw);
            if parsed.is_none() {
                tracing::warn!(value = %raw, "Unparseable vesting_end_date");
            }
            parsed
        }
    };

    let days_left_vesting = vesting_end_date
        .map(|end| (end - now).num_days().max(0))
        .map(|days| u32::try_from(days).unwrap_or(u32::MAX))
        .unwrap_or(0);

    AirdropData {
        wallet_address: Some(wallet_address.to_string()),
        is_claimed: row.get("is_claimed").is_some_and(truthy),
        claimed_amount: row.get("claimed_amount").and_then(number).unwrap_or(0.0),
        vested_amount: 0.0,
        total_allocation: row.get("total_allocation").and_then(number).unwrap_or(0.0),
        pre_claim_status: row.get("pre_claim_status").is_some_and(truthy),
        vesting_end_date,
        days_left_vesting: Some(days_left_vesting),
        claim_transaction_hash: row
            .get("claim_transaction_hash")
            .and_then(Value::as_str)
            .map(str::to_string),
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// RFC 3339, Dune's `YYYY-MM-DD HH:MM:SS.fff UTC`, or unix seconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, DUNE_TIMESTAMP_FORMAT)
                    .ok()
                    .map(|naive| naive.and_utc())
            }),
        Value::Number(n) => {
            let secs = n.as_f64()?;
            Utc.timestamp_opt(secs.trunc() as i64, 0).single()
        }
        _ => None,
    }
}
