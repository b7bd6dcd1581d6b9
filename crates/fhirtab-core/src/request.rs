use url::Url;

use crate::bundle::EmptyBundlePolicy;
use crate::error::{FetchError, Result};

/// The parameters of one fetch call. Immutable once constructed; build a new
/// request per call.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    base_url: String,
    resource_type: String,
    patient_id: String,
    empty_policy: EmptyBundlePolicy,
}

impl FetchRequest {
    /// Validates the three inputs: all non-empty, and the base URL a
    /// well-formed http(s) address.
    pub fn new(base_url: &str, resource_type: &str, patient_id: &str) -> Result<Self> {
        if base_url.trim().is_empty() {
            return Err(FetchError::invalid_request("base URL must not be empty"));
        }
        if resource_type.trim().is_empty() {
            return Err(FetchError::invalid_request(
                "resource type must not be empty",
            ));
        }
        if patient_id.trim().is_empty() {
            return Err(FetchError::invalid_request("patient id must not be empty"));
        }

        let parsed = Url::parse(base_url).map_err(|e| {
            FetchError::invalid_request(format!("base URL `{base_url}` is not valid: {e}"))
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(FetchError::invalid_request(format!(
                    "unsupported URL scheme `{other}`, expected http or https"
                )));
            }
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            resource_type: resource_type.to_string(),
            patient_id: patient_id.to_string(),
            empty_policy: EmptyBundlePolicy::default(),
        })
    }

    /// Makes the empty-bundle outcome explicit: accept (default) or reject.
    pub fn with_empty_policy(mut self, policy: EmptyBundlePolicy) -> Self {
        self.empty_policy = policy;
        self
    }

    /// Target address: base URL and resource type joined as path segments.
    pub fn url(&self) -> String {
        format!("{}/{}", self.base_url, self.resource_type)
    }

    /// The fixed search query string.
    pub fn query(&self) -> [(&str, &str); 2] {
        [
            ("patient", self.patient_id.as_str()),
            ("_format", "json"),
        ]
    }

    pub fn resource_type(&self) -> &str {
        &self.resource_type
    }

    pub fn patient_id(&self) -> &str {
        &self.patient_id
    }

    pub fn empty_policy(&self) -> EmptyBundlePolicy {
        self.empty_policy
    }
}
