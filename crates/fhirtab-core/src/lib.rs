//! Fetch one resource type for one patient from a FHIR server and render the
//! result as a pipe-delimited table.
//!
//! # Overview
//!
//! The crate is a single stateless pipeline: build a [`FetchRequest`], let a
//! [`TableClient`] issue the one search GET, project each bundle entry
//! through a [`Projection`], and [`render`] the resulting [`DisplayRow`]s one
//! line each. There is no retry, pagination, or caching; a failed GET is a
//! failed call.
//!
//! # Example
//!
//! ```ignore
//! use fhirtab_core::{FetchRequest, Projection, TableClient, render};
//!
//! let request = FetchRequest::new("http://example.org/fhir", "Goal", "X12984")?;
//! let projection = Projection::parse([
//!     "effectiveDateTime",
//!     "code.text",
//!     "valueQuantity.value+valueQuantity.unit",
//! ])?;
//!
//! let client = TableClient::new();
//! let rows = client.fetch(&request, &projection).await?;
//! for line in render(&rows) {
//!     println!("{line}");
//! }
//! ```

pub mod bundle;
pub mod client;
pub mod error;
pub mod projection;
pub mod request;
pub mod row;

pub use bundle::EmptyBundlePolicy;
pub use client::TableClient;
pub use error::{FetchError, Result};
pub use projection::{Column, FieldPath, MissingFieldPolicy, Projection};
pub use request::FetchRequest;
pub use row::{DisplayRow, render};

/// Maintainer attribution. Guaranteed non-empty; calling code may treat an
/// empty return as an unsupplied extension point and raise
/// [`FetchError::Unimplemented`].
pub fn author() -> &'static str {
    "FhirTab Team"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_is_never_empty() {
        assert!(!author().is_empty());
    }
}
