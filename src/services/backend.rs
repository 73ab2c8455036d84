//! Custom backend options validation.
//!
//! Webviews ask to rebind an account to a custom backend by sending a
//! loosely typed JSON object. Before anything is authorised the object is
//! checked for an `endpoints` map holding every required URL, and each URL
//! is normalised by parsing and re-serialising it.

use serde_json::{Map, Value};
use thiserror::Error;
use url::Url;

use crate::domain::{BackendEndpoints, BackendOptions};

/// Endpoint keys every custom backend must provide, in validation order.
pub const REQUIRED_ENDPOINTS: [&str; 6] = [
    "backendURL",
    "backendWSURL",
    "blackListURL",
    "teamsURL",
    "accountsURL",
    "websiteURL",
];

/// Errors raised while validating custom backend options.
#[derive(Debug, Error, PartialEq)]
pub enum BackendError {
    /// No options were sent.
    #[error("Custom backend options not set")]
    OptionsNotSet,

    /// `endpoints` is absent or not an object.
    #[error("Invalid or missing \"endpoints\" key")]
    InvalidEndpoints,

    /// A required endpoint key is absent.
    #[error("Missing required value {0}")]
    MissingRequiredValue(&'static str),

    /// An endpoint value is not a valid URL.
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: &'static str, reason: String },
}

/// Result type for backend validation.
pub type BackendResult<T> = Result<T, BackendError>;

/// Validates raw backend options and returns them with normalised URLs.
pub fn validate_backend_options(raw: Option<&Value>) -> BackendResult<BackendOptions> {
    let raw = raw
        .filter(|value| !value.is_null())
        .ok_or(BackendError::OptionsNotSet)?;

    let endpoints = raw
        .get("endpoints")
        .and_then(Value::as_object)
        .ok_or(BackendError::InvalidEndpoints)?;

    let title = raw
        .get("title")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // Fields are evaluated in REQUIRED_ENDPOINTS order.
    let endpoints = BackendEndpoints {
        backend_url: normalize_endpoint(endpoints, "backendURL")?,
        backend_ws_url: normalize_endpoint(endpoints, "backendWSURL")?,
        black_list_url: normalize_endpoint(endpoints, "blackListURL")?,
        teams_url: normalize_endpoint(endpoints, "teamsURL")?,
        accounts_url: normalize_endpoint(endpoints, "accountsURL")?,
        website_url: normalize_endpoint(endpoints, "websiteURL")?,
    };

    Ok(BackendOptions { title, endpoints })
}

fn normalize_endpoint(endpoints: &Map<String, Value>, field: &'static str) -> BackendResult<String> {
    let value = endpoints
        .get(field)
        .ok_or(BackendError::MissingRequiredValue(field))?;

    let raw = value.as_str().ok_or_else(|| BackendError::InvalidUrl {
        field,
        reason: format!("expected a string, got {value}"),
    })?;

    Url::parse(raw)
        .map(|url| url.to_string())
        .map_err(|e| BackendError::InvalidUrl {
            field,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn raw_options() -> Value {
        json!({
            "title": "Acme On-Prem",
            "endpoints": {
                "backendURL": "https://nginz-https.acme.test",
                "backendWSURL": "wss://nginz-ssl.acme.test",
                "blackListURL": "https://clientblacklist.acme.test/prod",
                "teamsURL": "https://teams.acme.test",
                "accountsURL": "https://account.acme.test",
                "websiteURL": "https://acme.test"
            }
        })
    }

    #[test]
    fn valid_options_are_normalized() {
        let options = validate_backend_options(Some(&raw_options())).unwrap();

        assert_eq!(options.title, "Acme On-Prem");
        assert_eq!(options.endpoints.backend_url, "https://nginz-https.acme.test/");
        assert_eq!(options.endpoints.backend_ws_url, "wss://nginz-ssl.acme.test/");
        assert_eq!(
            options.endpoints.black_list_url,
            "https://clientblacklist.acme.test/prod"
        );
        assert_eq!(options.endpoints.website_url, "https://acme.test/");
    }

    #[test]
    fn missing_options() {
        assert_eq!(
            validate_backend_options(None),
            Err(BackendError::OptionsNotSet)
        );
        assert_eq!(
            validate_backend_options(Some(&Value::Null)),
            Err(BackendError::OptionsNotSet)
        );
    }

    #[test]
    fn missing_or_invalid_endpoints_key() {
        let missing = json!({ "title": "x" });
        assert_eq!(
            validate_backend_options(Some(&missing)),
            Err(BackendError::InvalidEndpoints)
        );

        let not_object = json!({ "endpoints": "https://acme.test" });
        assert_eq!(
            validate_backend_options(Some(&not_object)),
            Err(BackendError::InvalidEndpoints)
        );
    }

    #[test]
    fn missing_teams_url() {
        let mut raw = raw_options();
        raw["endpoints"].as_object_mut().unwrap().remove("teamsURL");

        let err = validate_backend_options(Some(&raw)).unwrap_err();
        assert_eq!(err, BackendError::MissingRequiredValue("teamsURL"));
        assert_eq!(err.to_string(), "Missing required value teamsURL");
    }

    #[test]
    fn every_required_endpoint_is_checked() {
        for field in REQUIRED_ENDPOINTS {
            let mut raw = raw_options();
            raw["endpoints"].as_object_mut().unwrap().remove(field);

            assert_eq!(
                validate_backend_options(Some(&raw)),
                Err(BackendError::MissingRequiredValue(field))
            );
        }
    }

    #[test]
    fn first_missing_field_is_reported() {
        let raw = json!({ "endpoints": {} });
        assert_eq!(
            validate_backend_options(Some(&raw)),
            Err(BackendError::MissingRequiredValue("backendURL"))
        );
    }

    #[test]
    fn unparseable_url() {
        let mut raw = raw_options();
        raw["endpoints"]["accountsURL"] = json!("not a url");

        let err = validate_backend_options(Some(&raw)).unwrap_err();
        assert!(matches!(
            err,
            BackendError::InvalidUrl {
                field: "accountsURL",
                ..
            }
        ));
    }

    #[test]
    fn non_string_url() {
        let mut raw = raw_options();
        raw["endpoints"]["websiteURL"] = json!(42);

        assert!(matches!(
            validate_backend_options(Some(&raw)),
            Err(BackendError::InvalidUrl {
                field: "websiteURL",
                ..
            })
        ));
    }

    #[test]
    fn title_is_optional() {
        let mut raw = raw_options();
        raw.as_object_mut().unwrap().remove("title");

        let options = validate_backend_options(Some(&raw)).unwrap();
        assert_eq!(options.title, "");
    }
}
