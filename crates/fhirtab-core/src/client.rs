use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::bundle::{self, EmptyBundlePolicy};
use crate::error::{FetchError, Result};
use crate::projection::Projection;
use crate::request::FetchRequest;
use crate::row::DisplayRow;

/// Client for the single-GET table fetch.
///
/// Holds nothing but the HTTP connection pool; calls share no mutable state,
/// so concurrent fetches are fully independent.
pub struct TableClient {
    http: reqwest::Client,
}

impl TableClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    /// Applies a deadline to the whole GET. Expiry surfaces as
    /// `FetchError::Timeout`, distinct from other transport failures.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http })
    }

    /// Issues the single search GET and returns the parsed payload.
    pub async fn fetch_bundle(&self, request: &FetchRequest) -> Result<Value> {
        let url = request.url();
        debug!(url = %url, patient = request.patient_id(), "searching");
        let resp = self
            .http
            .get(&url)
            .query(&request.query())
            .header("Accept", "application/fhir+json")
            .send()
            .await?;
        handle_response(resp).await
    }

    /// The whole operation: one GET, entry location, projection. Rows come
    /// back in bundle order, one per entry that projected cleanly.
    pub async fn fetch(
        &self,
        request: &FetchRequest,
        projection: &Projection,
    ) -> Result<Vec<DisplayRow>> {
        let body = self.fetch_bundle(request).await?;
        let Some(entries) = bundle::entries(&body).filter(|e| !e.is_empty()) else {
            return match request.empty_policy() {
                EmptyBundlePolicy::Accept => Ok(Vec::new()),
                EmptyBundlePolicy::Reject => Err(FetchError::empty_result(
                    request.resource_type(),
                    request.patient_id(),
                )),
            };
        };
        projection.project(entries)
    }
}

impl Default for TableClient {
    fn default() -> Self {
        Self::new()
    }
}

async fn handle_response(resp: reqwest::Response) -> Result<Value> {
    let status = resp.status();
    let body = resp.text().await?;

    if !status.is_success() {
        let message = operation_outcome_diagnostics(&body).unwrap_or(body);
        return Err(FetchError::http(status.as_u16(), message));
    }

    serde_json::from_str(&body).map_err(FetchError::MalformedResponse)
}

/// Pulls issue diagnostics out of an OperationOutcome error body, when that
/// is what the server sent back.
fn operation_outcome_diagnostics(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    if json.get("resourceType")?.as_str()? != "OperationOutcome" {
        return None;
    }
    let msgs: Vec<&str> = json
        .get("issue")?
        .as_array()?
        .iter()
        .filter_map(|i| i.get("diagnostics").and_then(|d| d.as_str()))
        .collect();
    if msgs.is_empty() {
        None
    } else {
        Some(msgs.join("; "))
    }
}
