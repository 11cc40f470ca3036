//! Survey lookup with locale fallback.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::models::SurveyInfo;

/// Remote document mapping locales to survey entries.
pub const SURVEY_URL: &str = "https://raw.githubusercontent.com/skiff-proxy/loconf/master/ui.json";

/// Locale tried when the requested one has no entry.
pub const DEFAULT_LOCALE: &str = "en-US";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches the survey document and resolves the entry for a locale.
///
/// The document is fetched fresh on every call; nothing is cached.
pub struct SurveyResolver {
    url: String,
}

impl SurveyResolver {
    /// Resolver against the production survey document.
    pub fn new() -> Self {
        Self::with_url(SURVEY_URL)
    }

    /// Resolver against a custom document URL.
    pub fn with_url(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// Resolve the survey URL for `locale`.
    ///
    /// Underscores in the locale are normalized to hyphens before lookup.
    /// `Ok("")` means no survey is configured; only transport and parse
    /// failures are errors.
    pub async fn resolve(&self, locale: &str) -> Result<String> {
        let client = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|e| Error::SurveyFetch(e.to_string()))?;

        let response = client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::SurveyFetch(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::SurveyFetch(format!(
                "unexpected status {}",
                response.status()
            )));
        }
        let body = response
            .text()
            .await
            .map_err(|e| Error::SurveyFetch(e.to_string()))?;

        let document: SurveyDocument =
            serde_json::from_str(&body).map_err(|e| Error::SurveyParse(e.to_string()))?;
        let Some(surveys) = document.survey else {
            tracing::warn!("survey document has no survey map");
            return Ok(String::new());
        };

        resolve_in_map(&surveys, &normalize_locale(locale))
    }
}

impl Default for SurveyResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(serde::Deserialize)]
struct SurveyDocument {
    survey: Option<HashMap<String, serde_json::Value>>,
}

/// Replace underscores with hyphens (`fr_FR` -> `fr-FR`).
pub fn normalize_locale(locale: &str) -> String {
    locale.replace('_', "-")
}

/// Resolve a locale against the survey map.
///
/// Exact key first; a missing key falls back to [`DEFAULT_LOCALE`] at most
/// once; a missing default resolves to no survey. A malformed entry at the
/// matched key is a parse error and is not retried against the default.
fn resolve_in_map(surveys: &HashMap<String, serde_json::Value>, locale: &str) -> Result<String> {
    let mut locale = locale;
    let mut tried_default = false;
    loop {
        if let Some(raw) = surveys.get(locale) {
            let info: SurveyInfo = serde_json::from_value(raw.clone())
                .map_err(|e| Error::SurveyParse(e.to_string()))?;
            tracing::debug!(%locale, url = %info.url, "survey entry found");
            return Ok(info.url);
        }
        if locale != DEFAULT_LOCALE && !tried_default {
            tracing::debug!(%locale, default = DEFAULT_LOCALE, "no survey entry; trying default locale");
            locale = DEFAULT_LOCALE;
            tried_default = true;
            continue;
        }
        return Ok(String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(entries: &[(&str, serde_json::Value)]) -> HashMap<String, serde_json::Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn normalizes_underscores() {
        assert_eq!(normalize_locale("fr_FR"), "fr-FR");
        assert_eq!(normalize_locale("en-US"), "en-US");
    }

    #[test]
    fn exact_locale_wins() {
        let surveys = map(&[
            ("fr-FR", json!({"url": "https://example.com/fr"})),
            ("en-US", json!({"url": "https://example.com/en"})),
        ]);
        assert_eq!(
            resolve_in_map(&surveys, "fr-FR").unwrap(),
            "https://example.com/fr"
        );
    }

    #[test]
    fn missing_locale_falls_back_to_default() {
        let surveys = map(&[("en-US", json!({"url": "https://example.com/en"}))]);
        assert_eq!(
            resolve_in_map(&surveys, "de-DE").unwrap(),
            "https://example.com/en"
        );
    }

    #[test]
    fn missing_default_means_no_survey() {
        let surveys = map(&[]);
        assert_eq!(resolve_in_map(&surveys, "en-US").unwrap(), "");
    }

    #[test]
    fn empty_url_is_a_valid_result() {
        let surveys = map(&[("en-US", json!({"enabled": false}))]);
        assert_eq!(resolve_in_map(&surveys, "en-US").unwrap(), "");
    }

    #[test]
    fn malformed_exact_entry_is_not_retried() {
        let surveys = map(&[
            ("de-DE", json!("not an object")),
            ("en-US", json!({"url": "https://example.com/en"})),
        ]);
        let err = resolve_in_map(&surveys, "de-DE").unwrap_err();
        assert!(matches!(err, Error::SurveyParse(_)), "got {err:?}");
    }
}
