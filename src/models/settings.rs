//! Device-local display settings.

use serde::{Deserialize, Serialize};

use super::{Currency, Language};

/// Financial year start used until the user picks one.
const DEFAULT_FINANCIAL_YEAR_START: &str = "April";

/// Display settings persisted on the device, independent of the backend.
///
/// Fields missing from a stored record fall back to their defaults, so an
/// older or hand-edited record still loads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisplaySettings {
    /// Currency used to label amounts.
    pub currency: Currency,
    /// Interface language.
    pub language: Language,
    /// Whether budget alerts are shown.
    pub notifications: bool,
    /// Dark colour scheme.
    pub dark_mode: bool,
    /// First month of the financial year.
    pub financial_year_start: String,
}

impl Default for DisplaySettings {
    #[inline]
    fn default() -> Self {
        Self {
            currency: Currency::default(),
            language: Language::default(),
            notifications: true,
            dark_mode: false,
            financial_year_start: DEFAULT_FINANCIAL_YEAR_START.to_owned(),
        }
    }
}

impl DisplaySettings {
    /// Returns a copy with every field set in `patch` applied.
    #[inline]
    #[must_use]
    pub fn merged(&self, patch: SettingsPatch) -> Self {
        Self {
            currency: patch.currency.unwrap_or(self.currency),
            language: patch.language.unwrap_or(self.language),
            notifications: patch.notifications.unwrap_or(self.notifications),
            dark_mode: patch.dark_mode.unwrap_or(self.dark_mode),
            financial_year_start: patch
                .financial_year_start
                .unwrap_or_else(|| self.financial_year_start.clone()),
        }
    }
}

/// A partial settings update.
///
/// Only the recognized fields are ever applied; unknown keys in a JSON
/// patch are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    /// New currency.
    pub currency: Option<Currency>,
    /// New language.
    pub language: Option<Language>,
    /// New notifications flag.
    pub notifications: Option<bool>,
    /// New dark mode flag.
    pub dark_mode: Option<bool>,
    /// New financial year start.
    pub financial_year_start: Option<String>,
}

impl SettingsPatch {
    /// Returns `true` when the patch changes nothing.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.currency.is_none()
            && self.language.is_none()
            && self.notifications.is_none()
            && self.dark_mode.is_none()
            && self.financial_year_start.is_none()
    }
}

impl From<DisplaySettings> for SettingsPatch {
    #[inline]
    fn from(settings: DisplaySettings) -> Self {
        Self {
            currency: Some(settings.currency),
            language: Some(settings.language),
            notifications: Some(settings.notifications),
            dark_mode: Some(settings.dark_mode),
            financial_year_start: Some(settings.financial_year_start),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_record_field_names() {
        let value = serde_json::to_value(DisplaySettings::default()).unwrap();
        assert_eq!(value["currency"], "INR");
        assert_eq!(value["language"], "en");
        assert_eq!(value["notifications"], true);
        assert_eq!(value["darkMode"], false);
        assert_eq!(value["financialYearStart"], "April");
    }

    #[test]
    fn partial_record_falls_back_to_defaults() {
        let settings: DisplaySettings = serde_json::from_str(r#"{"currency": "USD"}"#).unwrap();
        assert_eq!(settings.currency, Currency::Usd);
        assert_eq!(settings.language, Language::En);
        assert!(settings.notifications);
    }

    #[test]
    fn patch_ignores_unknown_fields() {
        let patch: SettingsPatch =
            serde_json::from_str(r#"{"language": "hi", "theme": "solarized"}"#).unwrap();
        assert_eq!(patch.language, Some(Language::Hi));
        assert!(patch.currency.is_none());

        let merged = DisplaySettings::default().merged(patch);
        assert_eq!(merged.language, Language::Hi);
        assert_eq!(merged.currency, Currency::Inr);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let patch = SettingsPatch::default();
        assert!(patch.is_empty());
        let settings = DisplaySettings::default();
        assert_eq!(settings.merged(patch), settings);
    }
}
