//! Naive average-based offer prediction.
//!
//! The forecast is a thin statistical rollup over the uploaded offers:
//! integer means for clicks and revenue, a fixed conversion rate, and a
//! heuristic confidence score that grows with the amount of evidence. The
//! constants are frozen for compatibility with the deployed API; do not tune
//! them.

use serde::Serialize;

use crate::error::EngineError;
use crate::record::{numeric_field, Record};

/// Fraction of predicted clicks expected to convert.
const CONVERSION_RATE: f64 = 0.08;
/// Confidence intercept and per-record gain.
const CONFIDENCE_BASE: f64 = 0.6;
const CONFIDENCE_STEP: f64 = 0.05;
/// Confidence is never reported above this.
const CONFIDENCE_CAP: f64 = 0.95;

/// Derived forecast over the offers collection.
///
/// A pure function of the collection it was computed from; never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Prediction {
    pub predicted_clicks: i64,
    pub predicted_conversions: i64,
    pub predicted_revenue: i64,
    pub confidence: f64,
    pub based_on_records: usize,
}

/// Heuristic confidence for an estimate backed by `n` records.
///
/// Monotonically non-decreasing in `n`, capped at 0.95, rounded to two
/// decimals.
pub fn confidence_for(n: usize) -> f64 {
    let raw = CONFIDENCE_CAP.min(CONFIDENCE_BASE + CONFIDENCE_STEP * n as f64);
    (raw * 100.0).round() / 100.0
}

/// Compute a forecast from an offers snapshot.
///
/// Fails with [`EngineError::InsufficientData`] when the collection is empty.
/// Missing `clicks`/`revenue` fields contribute 0 to the respective sums, so
/// partial records never fail. Fully reproducible: no randomness, no external
/// model call.
pub fn predict(offers: &[Record]) -> Result<Prediction, EngineError> {
    if offers.is_empty() {
        return Err(EngineError::InsufficientData);
    }

    let n = offers.len();
    let total_clicks: f64 = offers.iter().map(|o| numeric_field(o, "clicks")).sum();
    let total_revenue: f64 = offers.iter().map(|o| numeric_field(o, "revenue")).sum();

    let predicted_clicks = (total_clicks / n as f64).floor() as i64;
    let predicted_conversions = (predicted_clicks as f64 * CONVERSION_RATE).floor() as i64;
    let predicted_revenue = (total_revenue / n as f64).floor() as i64;

    Ok(Prediction {
        predicted_clicks,
        predicted_conversions,
        predicted_revenue,
        confidence: confidence_for(n),
        based_on_records: n,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_predicts_means_over_two_offers() {
        let offers = vec![
            json!({ "clicks": 100, "revenue": 50 }),
            json!({ "clicks": 200, "revenue": 150 }),
        ];

        let prediction = predict(&offers).unwrap();
        assert_eq!(prediction.predicted_clicks, 150);
        assert_eq!(prediction.predicted_conversions, 12);
        assert_eq!(prediction.predicted_revenue, 100);
        assert_eq!(prediction.confidence, 0.7);
        assert_eq!(prediction.based_on_records, 2);
    }

    #[test]
    fn test_empty_collection_is_insufficient_data() {
        assert_eq!(predict(&[]), Err(EngineError::InsufficientData));
    }

    #[test]
    fn test_missing_fields_contribute_zero() {
        let offers = vec![
            json!({ "clicks": 300 }),
            json!({ "revenue": 90 }),
            json!({ "name": "no numbers at all" }),
        ];

        let prediction = predict(&offers).unwrap();
        assert_eq!(prediction.predicted_clicks, 100);
        assert_eq!(prediction.predicted_revenue, 30);
        assert_eq!(prediction.based_on_records, 3);
    }

    #[test]
    fn test_means_are_floored() {
        let offers = vec![
            json!({ "clicks": 100, "revenue": 10 }),
            json!({ "clicks": 101, "revenue": 11 }),
        ];

        let prediction = predict(&offers).unwrap();
        assert_eq!(prediction.predicted_clicks, 100);
        assert_eq!(prediction.predicted_revenue, 10);
        // 100 * 0.08 = 8.0, truncated
        assert_eq!(prediction.predicted_conversions, 8);
    }

    #[test]
    fn test_confidence_is_monotone_and_capped() {
        let mut previous = 0.0;
        for n in 1..=20 {
            let confidence = confidence_for(n);
            assert!(confidence >= previous, "dipped at n={}", n);
            assert!(confidence <= 0.95);
            previous = confidence;
        }
        assert_eq!(confidence_for(7), 0.95);
        assert_eq!(confidence_for(10), 0.95);
        assert_eq!(confidence_for(100), 0.95);
    }

    #[test]
    fn test_confidence_rounds_to_two_decimals() {
        assert_eq!(confidence_for(1), 0.65);
        assert_eq!(confidence_for(2), 0.7);
        assert_eq!(confidence_for(3), 0.75);
    }

    #[test]
    fn test_prediction_serializes_with_wire_field_names() {
        let offers = vec![json!({ "clicks": 10, "revenue": 5 })];
        let value = serde_json::to_value(predict(&offers).unwrap()).unwrap();

        assert_eq!(value["predicted_clicks"], 10);
        assert_eq!(value["predicted_conversions"], 0);
        assert_eq!(value["predicted_revenue"], 5);
        assert_eq!(value["confidence"], 0.65);
        assert_eq!(value["based_on_records"], 1);
    }
}
