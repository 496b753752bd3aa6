//! Argument parsing helpers shared by the CLI commands.

use anyhow::{Context, bail};
use chalkportal_core::FetchParams;
use chrono::NaiveDate;
use serde_json::Value;

/// Parses a `key=value` filter argument.
pub fn parse_filter(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("filter '{raw}' has an empty key"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Parses a `--data` argument as a JSON object.
pub fn parse_payload(raw: &str) -> anyhow::Result<Value> {
    let value: Value = serde_json::from_str(raw).context("--data must be valid JSON")?;
    if !value.is_object() {
        bail!("--data must be a JSON object");
    }
    Ok(value)
}

/// Builds fetch parameters from the `fetch` command's options.
pub fn fetch_params(
    parent: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    filters: Vec<(String, String)>,
) -> FetchParams {
    let mut params = FetchParams {
        parent,
        from,
        to,
        ..FetchParams::default()
    };
    params.filters.extend(filters);
    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_filter("status=present").unwrap(),
            ("status".to_string(), "present".to_string())
        );
        assert_eq!(
            parse_filter("note=a=b").unwrap(),
            ("note".to_string(), "a=b".to_string())
        );
        assert!(parse_filter("status").is_err());
        assert!(parse_filter("=x").is_err());
    }

    #[test]
    fn test_parse_payload() {
        assert!(parse_payload(r#"{"className": "Math"}"#).is_ok());
        assert!(parse_payload("[1, 2]").is_err());
        assert!(parse_payload("{oops").is_err());
    }

    #[test]
    fn test_fetch_params() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let params = fetch_params(
            Some("c1".into()),
            Some(from),
            None,
            vec![("status".into(), "late".into())],
        );
        assert_eq!(params.path_suffix(), Some("c1"));
        assert_eq!(
            params.query_pairs(),
            vec![
                ("from".to_string(), "2024-01-01".to_string()),
                ("status".to_string(), "late".to_string())
            ]
        );
    }
}
