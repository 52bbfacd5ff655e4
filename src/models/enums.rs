//! Enumeration types for constrained API and settings values.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    /// Name of the enum being parsed.
    kind: &'static str,
    /// Rejected input.
    value: String,
}

impl ParseEnumError {
    /// Creates a parse error for `kind` rejecting `value`.
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Direction of a stored transaction as labelled by the backend.
///
/// `Credit` is income, `Debit` is expense. The backend writes the labels
/// upper-case but older rows are not normalized, so decoding ignores case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransactionKind {
    /// Money coming in.
    #[serde(rename = "CREDIT")]
    Credit,
    /// Money going out.
    #[serde(rename = "DEBIT")]
    Debit,
}

impl TransactionKind {
    /// Returns the wire label (`CREDIT` / `DEBIT`).
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credit => "CREDIT",
            Self::Debit => "DEBIT",
        }
    }

    /// Returns `true` for expenses.
    #[inline]
    #[must_use]
    pub const fn is_debit(self) -> bool {
        matches!(self, Self::Debit)
    }
}

impl fmt::Display for TransactionKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = ParseEnumError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("CREDIT") {
            Ok(Self::Credit)
        } else if s.eq_ignore_ascii_case("DEBIT") {
            Ok(Self::Debit)
        } else {
            Err(ParseEnumError::new("transaction type", s))
        }
    }
}

impl<'de> Deserialize<'de> for TransactionKind {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Direction chosen on the manual entry form.
///
/// The create endpoint expects the form vocabulary and maps it to
/// [`TransactionKind`] itself: `expense` becomes `DEBIT`, anything else
/// `CREDIT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Outgoing money.
    #[default]
    Expense,
    /// Incoming money.
    Income,
}

impl EntryKind {
    /// Returns the stored direction this entry kind maps to.
    #[inline]
    #[must_use]
    pub const fn transaction_kind(self) -> TransactionKind {
        match self {
            Self::Expense => TransactionKind::Debit,
            Self::Income => TransactionKind::Credit,
        }
    }

    /// Returns the category choices offered for this kind.
    #[inline]
    #[must_use]
    pub const fn categories(self) -> &'static [&'static str] {
        match self {
            Self::Expense => &super::EXPENSE_CATEGORIES,
            Self::Income => &super::INCOME_CATEGORIES,
        }
    }
}

impl FromStr for EntryKind {
    type Err = ParseEnumError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "expense" => Ok(Self::Expense),
            "income" => Ok(Self::Income),
            _ => Err(ParseEnumError::new("entry kind", s)),
        }
    }
}

/// Display currency. Amounts are never converted, only labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian rupee.
    #[default]
    Inr,
    /// US dollar.
    Usd,
    /// Euro.
    Eur,
    /// Pound sterling.
    Gbp,
}

impl Currency {
    /// Every supported currency.
    pub const ALL: [Self; 4] = [Self::Inr, Self::Usd, Self::Eur, Self::Gbp];

    /// Returns the ISO 4217 code.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Inr => "INR",
            Self::Usd => "USD",
            Self::Eur => "EUR",
            Self::Gbp => "GBP",
        }
    }

    /// Returns the symbol prefixed to formatted amounts.
    #[inline]
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Inr => "\u{20b9}",
            Self::Usd => "$",
            Self::Eur => "\u{20ac}",
            Self::Gbp => "\u{a3}",
        }
    }
}

impl fmt::Display for Currency {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = ParseEnumError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseEnumError::new("currency", s))
    }
}

/// Interface language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Hindi.
    Hi,
}

impl Language {
    /// Returns the language tag.
    #[inline]
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Hi => "hi",
        }
    }
}

impl fmt::Display for Language {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = ParseEnumError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "hi" => Ok(Self::Hi),
            _ => Err(ParseEnumError::new("language", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transaction_kind_serializes_upper_case() {
        assert_eq!(
            serde_json::to_string(&TransactionKind::Debit).unwrap(),
            r#""DEBIT""#
        );
        assert_eq!(
            serde_json::to_string(&TransactionKind::Credit).unwrap(),
            r#""CREDIT""#
        );
    }

    #[test]
    fn transaction_kind_decodes_any_case() {
        let kind: TransactionKind = serde_json::from_str(r#""debit""#).unwrap();
        assert_eq!(kind, TransactionKind::Debit);
        let kind: TransactionKind = serde_json::from_str(r#""Credit""#).unwrap();
        assert_eq!(kind, TransactionKind::Credit);
    }

    #[test]
    fn invalid_transaction_kind_fails() {
        let result = serde_json::from_str::<TransactionKind>(r#""TRANSFER""#);
        assert!(result.is_err());
    }

    #[test]
    fn entry_kind_maps_to_transaction_kind() {
        assert_eq!(EntryKind::Expense.transaction_kind(), TransactionKind::Debit);
        assert_eq!(EntryKind::Income.transaction_kind(), TransactionKind::Credit);
        assert_eq!(
            serde_json::to_string(&EntryKind::Income).unwrap(),
            r#""income""#
        );
        assert!(EntryKind::Income.categories().contains(&"Salary"));
    }

    #[test]
    fn currency_codes_and_symbols() {
        assert_eq!(serde_json::to_string(&Currency::Gbp).unwrap(), r#""GBP""#);
        assert_eq!(Currency::Usd.symbol(), "$");
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert!("JPY".parse::<Currency>().is_err());
    }

    #[test]
    fn language_parse() {
        assert_eq!("HI".parse::<Language>().unwrap(), Language::Hi);
        let err = "fr".parse::<Language>().unwrap_err();
        assert!(err.to_string().contains("language"));
    }
}
