//! Dashboard summary and expense breakdown payloads.

use serde::{Deserialize, Serialize};

use super::OrderedMap;

/// Headline totals for the recent period plus backend recommendations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Total income.
    pub total_income: f64,
    /// Total expense.
    pub total_expense: f64,
    /// Income minus expense, as computed by the backend.
    pub net_savings: f64,
    /// Ordered recommendation messages.
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// Aggregate expense per category, used only by the chart.
pub type Breakdown = OrderedMap<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_summary() {
        let json = r#"{
            "total_income": 60000.0,
            "total_expense": 18250.5,
            "net_savings": 41749.5,
            "recommendations": ["Excellent! Your net savings are positive for the last 30 days."]
        }"#;
        let summary: Summary = serde_json::from_str(json).unwrap();
        assert!((summary.net_savings - 41_749.5).abs() < f64::EPSILON);
        assert_eq!(summary.recommendations.len(), 1);
    }

    #[test]
    fn missing_recommendations_default_to_empty() {
        let summary: Summary =
            serde_json::from_str(r#"{"total_income": 0, "total_expense": 0, "net_savings": 0}"#)
                .unwrap();
        assert!(summary.recommendations.is_empty());
    }
}
