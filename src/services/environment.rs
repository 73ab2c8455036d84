//! Environment URL construction.
//!
//! Every webview loads the backend named by the `env` query parameter of
//! the window location, decorated with the account it belongs to.

use thiserror::Error;
use url::Url;

use crate::domain::Account;

/// Path of the authentication page.
pub const AUTH_PATH: &str = "/auth";

/// Errors raised while building environment URLs.
#[derive(Debug, Error)]
pub enum EnvironmentError {
    /// The window location is not a URL.
    #[error("invalid window location: {0}")]
    InvalidLocation(#[source] url::ParseError),

    /// The window location has no `env` parameter.
    #[error("window location has no env parameter")]
    MissingEnv,

    /// The `env` parameter is not a URL.
    #[error("invalid env parameter {value:?}: {source}")]
    InvalidEnv {
        value: String,
        #[source]
        source: url::ParseError,
    },

    /// Backend options could not be encoded.
    #[error("failed to encode backend options: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for environment URL operations.
pub type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// Builds per-account webview URLs from the window location.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    location: Url,
}

impl Environment {
    /// Creates an environment from the window location URL.
    pub fn new(window_location: &str) -> EnvironmentResult<Self> {
        let location = Url::parse(window_location).map_err(EnvironmentError::InvalidLocation)?;
        Ok(Self { location })
    }

    /// The window location this environment was built from.
    pub fn location(&self) -> &Url {
        &self.location
    }

    /// The backend URL carried by the `env` query parameter.
    pub fn base_url(&self) -> EnvironmentResult<Url> {
        // query_pairs already percent-decodes the value.
        let env = self
            .location
            .query_pairs()
            .find(|(key, _)| key == "env")
            .map(|(_, value)| value.into_owned())
            .ok_or(EnvironmentError::MissingEnv)?;

        Url::parse(&env).map_err(|source| EnvironmentError::InvalidEnv { value: env, source })
    }

    /// Builds the URL an account's webview loads.
    ///
    /// `force_login` routes the webview to the login form of the
    /// authentication page. A pending SSO code on an account that is still
    /// being added routes to the SSO form instead.
    pub fn url_for(&self, account: &Account, force_login: bool) -> EnvironmentResult<String> {
        let mut url = self.base_url()?;

        // The preload script reads the account id from the URL.
        set_query_param(&mut url, "id", account.id.as_str());

        // Stripped again by the webview once read.
        if let Some(options) = &account.backend_options {
            set_query_param(&mut url, "backendOptions", &serde_json::to_string(options)?);
        }

        if force_login || account.sso_code.is_some() {
            url.set_path(AUTH_PATH);
        }
        if force_login {
            url.set_fragment(Some("login"));
        }
        if let (Some(code), true) = (&account.sso_code, account.is_adding) {
            url.set_fragment(Some(&format!("sso/{code}")));
        }

        Ok(url.to_string())
    }
}

/// Replaces every value of `key` with `value`.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(retained)
        .append_pair(key, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BackendEndpoints, BackendOptions};
    use pretty_assertions::assert_eq;

    const LOCATION: &str = "file:///app/index.html?env=https%3A%2F%2Fapp.wire.com";

    fn env() -> Environment {
        Environment::new(LOCATION).unwrap()
    }

    fn param(url: &str, key: &str) -> Option<String> {
        Url::parse(url)
            .unwrap()
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    fn options() -> BackendOptions {
        BackendOptions {
            title: "Acme".to_string(),
            endpoints: BackendEndpoints {
                backend_url: "https://nginz-https.acme.test/".to_string(),
                backend_ws_url: "wss://nginz-ssl.acme.test/".to_string(),
                black_list_url: "https://clientblacklist.acme.test/prod".to_string(),
                teams_url: "https://teams.acme.test/".to_string(),
                accounts_url: "https://account.acme.test/".to_string(),
                website_url: "https://acme.test/".to_string(),
            },
        }
    }

    #[test]
    fn base_url_is_decoded_env_param() {
        assert_eq!(env().base_url().unwrap().as_str(), "https://app.wire.com/");
    }

    #[test]
    fn signed_in_account() {
        let account = Account::signed_in("acc-1", "s-1", "user-1");
        let url = env().url_for(&account, false).unwrap();

        assert_eq!(url, "https://app.wire.com/?id=acc-1");
    }

    #[test]
    fn forced_login_routes_to_login_form() {
        let account = Account::adding("acc-2", "s-2");
        let url = env().url_for(&account, true).unwrap();

        assert_eq!(url, "https://app.wire.com/auth?id=acc-2#login");
    }

    #[test]
    fn sso_code_while_adding() {
        let account = Account::adding("acc-3", "s-3").sso_code("wire-1234");
        let url = env().url_for(&account, false).unwrap();

        assert_eq!(url, "https://app.wire.com/auth?id=acc-3#sso/wire-1234");
    }

    #[test]
    fn sso_code_takes_precedence_over_forced_login() {
        let account = Account::adding("acc-3", "s-3").sso_code("wire-1234");
        let url = env().url_for(&account, true).unwrap();

        assert!(url.ends_with("/auth?id=acc-3#sso/wire-1234"));
    }

    #[test]
    fn sso_code_after_sign_in_keeps_auth_path_without_fragment() {
        let account = Account::signed_in("acc-4", "s-4", "user-4").sso_code("wire-1234");
        let url = env().url_for(&account, false).unwrap();

        assert_eq!(url, "https://app.wire.com/auth?id=acc-4");
    }

    #[test]
    fn backend_options_are_embedded_as_json() {
        let account = Account::adding("acc-5", "s-5").backend_options(options());
        let url = env().url_for(&account, false).unwrap();

        let embedded = param(&url, "backendOptions").unwrap();
        let decoded: BackendOptions = serde_json::from_str(&embedded).unwrap();
        assert_eq!(decoded, options());
        assert_eq!(param(&url, "id").as_deref(), Some("acc-5"));
    }

    #[test]
    fn no_backend_options_param_without_custom_backend() {
        let url = env().url_for(&Account::adding("acc-6", "s-6"), false).unwrap();
        assert_eq!(param(&url, "backendOptions"), None);
    }

    #[test]
    fn existing_id_param_is_replaced() {
        let env = Environment::new(
            "file:///app/index.html?env=https%3A%2F%2Fapp.wire.com%2F%3Fid%3Dstale%26hl%3Den",
        )
        .unwrap();
        let url = env.url_for(&Account::adding("acc-7", "s-7"), false).unwrap();

        assert_eq!(param(&url, "id").as_deref(), Some("acc-7"));
        assert_eq!(param(&url, "hl").as_deref(), Some("en"));
        assert_eq!(url.matches("id=").count(), 1);
    }

    #[test]
    fn missing_env_param() {
        let env = Environment::new("file:///app/index.html").unwrap();
        assert!(matches!(
            env.url_for(&Account::adding("acc", "s"), false),
            Err(EnvironmentError::MissingEnv)
        ));
    }

    #[test]
    fn invalid_window_location() {
        assert!(matches!(
            Environment::new("not a location"),
            Err(EnvironmentError::InvalidLocation(_))
        ));
    }
}
