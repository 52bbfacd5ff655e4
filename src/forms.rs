//! Create-flow form models and the submission guard.
//!
//! Forms hold raw user input. They perform only the parsing the backend
//! cannot do for them (numeric amounts) and otherwise send fields as
//! entered. A submission moves through `Idle -> Submitting -> Idle`; while
//! a form is `Submitting`, further submits of the same form are refused.

use core::sync::atomic::{AtomicBool, Ordering};

use crate::error::FinSmartError;
use crate::models::{EntryKind, NaiveDate, NewTransaction};

/// Manual transaction entry form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionForm {
    /// Expense or income.
    pub kind: EntryKind,
    /// Amount as typed.
    pub amount: String,
    /// Chosen category.
    pub category: String,
    /// Free-text description, also sent as raw text.
    pub description: String,
    /// Transaction date.
    pub date: NaiveDate,
}

impl TransactionForm {
    /// Creates an empty expense form dated `today`.
    #[inline]
    #[must_use]
    pub fn new(today: NaiveDate) -> Self {
        Self {
            kind: EntryKind::default(),
            amount: String::new(),
            category: String::new(),
            description: String::new(),
            date: today,
        }
    }

    /// Builds the request body, or `None` when the amount is not a number.
    #[must_use]
    pub fn to_request(&self) -> Option<NewTransaction> {
        let amount = parse_amount(&self.amount)?;
        Some(NewTransaction {
            kind: self.kind,
            amount,
            description: self.description.clone(),
            category: self.category.clone(),
            date: self.date,
            raw_text: self.description.clone(),
        })
    }

    /// Clears every field and re-dates the form to `today`.
    #[inline]
    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}

/// Free-text entry form parsed by the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTextForm {
    /// Pasted SMS or e-mail text.
    pub text: String,
}

impl RawTextForm {
    /// Creates a form holding `text`.
    #[inline]
    #[must_use]
    pub fn new<T: Into<String>>(text: T) -> Self {
        Self { text: text.into() }
    }

    /// Returns the trimmed text, or `None` if nothing was pasted.
    #[inline]
    #[must_use]
    pub fn trimmed(&self) -> Option<&str> {
        Some(self.text.trim()).filter(|text| !text.is_empty())
    }

    /// Clears the text.
    #[inline]
    pub fn reset(&mut self) {
        self.text.clear();
    }
}

/// Monthly budget form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BudgetForm {
    /// Expense category.
    pub category: String,
    /// Limit as typed.
    pub limit: String,
}

impl BudgetForm {
    /// Creates a form with the given fields.
    #[inline]
    #[must_use]
    pub fn new<C: Into<String>, L: Into<String>>(category: C, limit: L) -> Self {
        Self {
            category: category.into(),
            limit: limit.into(),
        }
    }

    /// Returns `(category, limit)`, or `None` when the category is empty or
    /// the limit is missing, zero or not a number.
    #[must_use]
    pub fn to_request(&self) -> Option<(&str, f64)> {
        if self.category.is_empty() {
            return None;
        }
        let limit = parse_amount(&self.limit).filter(|limit| *limit != 0.0)?;
        Some((self.category.as_str(), limit))
    }

    /// Clears both fields.
    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Parses a typed amount, accepting surrounding whitespace.
fn parse_amount(input: &str) -> Option<f64> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Result of submitting a create-flow form.
#[derive(Debug)]
pub enum SubmitOutcome<T> {
    /// The backend accepted the submission.
    Accepted(T),
    /// The request failed; the form was left populated.
    Failed(FinSmartError),
    /// Input did not parse and nothing was sent.
    Skipped,
    /// A submission of the same form is still in flight.
    InFlight,
    /// The backend answered without confirming the write.
    Declined,
}

impl<T> SubmitOutcome<T> {
    /// Returns `true` when the backend accepted the submission.
    #[inline]
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(*self, Self::Accepted(_))
    }
}

/// Tracks whether a form is in its `Submitting` state.
#[derive(Debug, Default)]
pub struct SubmitGuard {
    /// Set while a submission is in flight.
    busy: AtomicBool,
}

impl SubmitGuard {
    /// Creates an idle guard.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy: AtomicBool::new(false),
        }
    }

    /// Enters `Submitting`, or returns `None` if already there. The guard
    /// returns to idle when the ticket is dropped.
    #[inline]
    #[must_use]
    pub fn try_begin(&self) -> Option<SubmitTicket<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitTicket { guard: self })
    }

    /// Returns `true` while a submission is in flight.
    #[inline]
    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof that a submission is in flight; releases the guard on drop.
#[derive(Debug)]
pub struct SubmitTicket<'guard> {
    /// Guard to release.
    guard: &'guard SubmitGuard,
}

impl Drop for SubmitTicket<'_> {
    #[inline]
    fn drop(&mut self) {
        self.guard.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[test]
    fn transaction_form_builds_request() {
        let form = TransactionForm {
            kind: EntryKind::Income,
            amount: " 2500.5 ".to_owned(),
            category: "Salary".to_owned(),
            description: "May salary".to_owned(),
            date: today(),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.kind, EntryKind::Income);
        assert!((request.amount - 2500.5).abs() < f64::EPSILON);
        assert_eq!(request.raw_text, "May salary");
    }

    #[test]
    fn non_numeric_amount_is_skipped() {
        let mut form = TransactionForm::new(today());
        form.amount = "abc".to_owned();
        assert!(form.to_request().is_none());
        form.amount = String::new();
        assert!(form.to_request().is_none());
    }

    #[test]
    fn empty_category_is_sent_as_is() {
        let mut form = TransactionForm::new(today());
        form.amount = "10".to_owned();
        assert_eq!(form.to_request().unwrap().category, "");
    }

    #[test]
    fn reset_clears_fields() {
        let mut form = TransactionForm::new(today());
        form.amount = "10".to_owned();
        form.description = "x".to_owned();
        let tomorrow = today().succ_opt().unwrap();
        form.reset(tomorrow);
        assert_eq!(form, TransactionForm::new(tomorrow));
    }

    #[test]
    fn raw_text_form_trims() {
        assert!(RawTextForm::new("   ").trimmed().is_none());
        assert_eq!(RawTextForm::new(" Paid 50 ").trimmed(), Some("Paid 50"));
    }

    #[test]
    fn budget_form_validation() {
        assert!(BudgetForm::new("", "100").to_request().is_none());
        assert!(BudgetForm::new("Shopping", "0").to_request().is_none());
        assert!(BudgetForm::new("Shopping", "lots").to_request().is_none());
        let form = BudgetForm::new("Shopping", "250");
        let (category, limit) = form.to_request().unwrap();
        assert_eq!(category, "Shopping");
        assert!((limit - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn guard_refuses_second_submit() {
        let guard = SubmitGuard::new();
        let ticket = guard.try_begin();
        assert!(ticket.is_some());
        assert!(guard.is_submitting());
        assert!(guard.try_begin().is_none());
        drop(ticket);
        assert!(!guard.is_submitting());
        assert!(guard.try_begin().is_some());
    }
}
