use std::time::Duration;

use anyhow::{Context, Result};
use fhirtab_core::{
    EmptyBundlePolicy, FetchRequest, MissingFieldPolicy, Projection, TableClient,
};

use crate::cli::{FetchArgs, OnMissing, OutputFormat};
use crate::output::print_rows;

/// Default columns: when the reading was taken, what it measures, and the
/// value with its unit. Other resource types want their own --field set.
pub const DEFAULT_FIELDS: [&str; 3] = [
    "effectiveDateTime",
    "code.text",
    "valueQuantity.value+valueQuantity.unit",
];

pub async fn fetch(
    server: &str,
    args: &FetchArgs,
    profile_fields: Option<&[String]>,
    format: OutputFormat,
) -> Result<()> {
    let specs: Vec<&str> = if !args.fields.is_empty() {
        args.fields.iter().map(String::as_str).collect()
    } else if let Some(fields) = profile_fields {
        fields.iter().map(String::as_str).collect()
    } else {
        DEFAULT_FIELDS.to_vec()
    };

    let projection = Projection::parse(&specs)
        .context("Invalid --field specification")?
        .with_policy(match args.on_missing {
            OnMissing::Abort => MissingFieldPolicy::Abort,
            OnMissing::Skip => MissingFieldPolicy::Skip,
        });

    let mut request = FetchRequest::new(server, &args.resource_type, &args.patient)?;
    if args.fail_empty {
        request = request.with_empty_policy(EmptyBundlePolicy::Reject);
    }

    let client = match args.timeout {
        Some(secs) => TableClient::with_timeout(Duration::from_secs(secs))?,
        None => TableClient::new(),
    };

    let rows = client.fetch(&request, &projection).await?;
    print_rows(&projection.column_names(), &rows, format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_fields_parse() {
        let projection = Projection::parse(DEFAULT_FIELDS).unwrap();
        assert_eq!(
            projection.column_names(),
            [
                "effectiveDateTime",
                "code.text",
                "valueQuantity.value+valueQuantity.unit",
            ]
        );
    }
}
