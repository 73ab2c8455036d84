//! Localised UI strings.

use crate::config::Locale;

/// Keys of the strings the deck shows itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Text {
    /// Prefix of the banner shown while signing in to a custom backend.
    ThirdPartyBackendNotice,
    /// Tooltip of the close affordance.
    CloseWebview,
}

/// Returns the string for `key` in `locale`.
pub fn get_text(locale: Locale, key: Text) -> &'static str {
    match (locale, key) {
        (Locale::En, Text::ThirdPartyBackendNotice) => "You are connecting to the third-party server",
        (Locale::De, Text::ThirdPartyBackendNotice) => "Sie verbinden sich mit dem Drittanbieter-Server",
        (Locale::En, Text::CloseWebview) => "Cancel",
        (Locale::De, Text::CloseWebview) => "Abbrechen",
    }
}

/// The third-party backend banner for a backend titled `title`.
pub fn third_party_notice(locale: Locale, title: &str) -> String {
    format!("{} \"{}\"", get_text(locale, Text::ThirdPartyBackendNotice), title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_quotes_backend_title() {
        assert_eq!(
            third_party_notice(Locale::En, "Acme"),
            "You are connecting to the third-party server \"Acme\""
        );
    }

    #[test]
    fn german_strings() {
        assert_eq!(get_text(Locale::De, Text::CloseWebview), "Abbrechen");
        assert!(third_party_notice(Locale::De, "Acme").ends_with("\"Acme\""));
    }
}
