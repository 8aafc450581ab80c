//! Least-squares trend over three consecutive months of sales.

use serde::{Deserialize, Serialize, Serializer};

use super::round_half_up;
use super::validation::FieldChecks;
use crate::error::{Result, ScoringError};

const MONTHS: [f64; 3] = [1.0, 2.0, 3.0];
const NEXT_MONTH: f64 = 4.0;
const CONFIDENCE_FLOOR: u32 = 50;

/// Three chronological sales figures. A missing or zero figure is rejected.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct TrendInput {
    #[serde(default)]
    pub month_1_sales: Option<f64>,
    #[serde(default)]
    pub month_2_sales: Option<f64>,
    #[serde(default)]
    pub month_3_sales: Option<f64>,
}

impl TrendInput {
    pub fn new(m1: f64, m2: f64, m3: f64) -> Self {
        Self {
            month_1_sales: Some(m1),
            month_2_sales: Some(m2),
            month_3_sales: Some(m3),
        }
    }

    fn sales(&self) -> Option<[f64; 3]> {
        match (self.month_1_sales, self.month_2_sales, self.month_3_sales) {
            (Some(a), Some(b), Some(c)) if a != 0.0 && b != 0.0 && c != 0.0 => Some([a, b, c]),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendResult {
    #[serde(rename = "prediction", serialize_with = "serialize_rounded")]
    pub predicted_next_value: f64,
    #[serde(rename = "confidence")]
    pub confidence_percent: u32,
    pub slope: f64,
    pub intercept: f64,
    pub formula: String,
}

fn serialize_rounded<S: Serializer>(value: &f64, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_i64(round_half_up(*value) as i64)
}

pub fn predict(input: &TrendInput) -> Result<TrendResult> {
    let ys = input
        .sales()
        .ok_or_else(|| ScoringError::validation("Missing required fields"))?;
    FieldChecks::new()
        .finite("month_1_sales", ys[0])
        .finite("month_2_sales", ys[1])
        .finite("month_3_sales", ys[2])
        .finish()?;

    let n = ys.len() as f64;
    let sum_x: f64 = MONTHS.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = MONTHS.iter().zip(ys.iter()).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = MONTHS.iter().map(|x| x * x).sum();

    let slope = (n * sum_xy - sum_x * sum_y) / (n * sum_x2 - sum_x * sum_x);
    let intercept = (sum_y - slope * sum_x) / n;
    let predicted_next_value = slope * NEXT_MONTH + intercept;

    if !predicted_next_value.is_finite() {
        return Err(ScoringError::unexpected("forecast is not a finite number"));
    }

    Ok(TrendResult {
        predicted_next_value,
        confidence_percent: confidence(&ys, slope, intercept),
        slope,
        intercept,
        formula: format!("y = {:.2}x + {:.2}", slope, intercept),
    })
}

/// R² as a percentage, never below the floor. A flat series has no variance
/// to explain and gets the floor.
fn confidence(ys: &[f64; 3], slope: f64, intercept: f64) -> u32 {
    let mean = ys.iter().sum::<f64>() / ys.len() as f64;
    let ss_total: f64 = ys.iter().map(|y| (y - mean).powi(2)).sum();
    if ss_total == 0.0 {
        return CONFIDENCE_FLOOR;
    }
    let ss_res: f64 = MONTHS
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| (y - (slope * x + intercept)).powi(2))
        .sum();
    let r_squared = 1.0 - ss_res / ss_total;
    let percent = round_half_up(r_squared * 100.0);
    if percent.is_nan() {
        CONFIDENCE_FLOOR
    } else {
        (percent.clamp(0.0, 100.0) as u32).max(CONFIDENCE_FLOOR)
    }
}

pub fn interpretation(input: &TrendInput, result: &TrendResult) -> String {
    let show = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
    format!(
        "Based on your sales trend ({} → {} → {}), next month's predicted sales: ${}",
        show(input.month_1_sales),
        show(input.month_2_sales),
        show(input.month_3_sales),
        group_thousands(round_half_up(result.predicted_next_value))
    )
}

/// 55000 -> "55,000"
fn group_thousands(value: f64) -> String {
    let digits = format!("{}", value.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if value < 0.0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_linear_fit() {
        let result = predict(&TrendInput::new(40000.0, 45000.0, 50000.0)).unwrap();
        assert_eq!(result.slope, 5000.0);
        assert_eq!(result.intercept, 35000.0);
        assert_eq!(result.predicted_next_value, 55000.0);
        assert_eq!(result.confidence_percent, 100);
        assert_eq!(result.formula, "y = 5000.00x + 35000.00");
    }

    #[test]
    fn test_flat_series_has_floor_confidence() {
        let result = predict(&TrendInput::new(100.0, 100.0, 100.0)).unwrap();
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.predicted_next_value, 100.0);
        assert_eq!(result.confidence_percent, 50);
    }

    #[test]
    fn test_poor_fit_is_floored() {
        // y = [10, 30, 10]: slope 0, R² = 0
        let result = predict(&TrendInput::new(10.0, 30.0, 10.0)).unwrap();
        assert_eq!(result.slope, 0.0);
        assert_eq!(result.confidence_percent, 50);
    }

    #[test]
    fn test_partial_fit_confidence() {
        // y = [1, 3, 2]: slope 0.5, R² = 0.25 -> floored
        let result = predict(&TrendInput::new(1.0, 3.0, 2.0)).unwrap();
        assert_eq!(result.slope, 0.5);
        assert_eq!(result.confidence_percent, 50);

        // y = [10, 20, 40]: slope 15, R² ≈ 0.964 -> 96
        let result = predict(&TrendInput::new(10.0, 20.0, 40.0)).unwrap();
        assert_eq!(result.slope, 15.0);
        assert_eq!(result.confidence_percent, 96);
    }

    #[test]
    fn test_downward_trend() {
        let result = predict(&TrendInput::new(300.0, 200.0, 100.0)).unwrap();
        assert_eq!(result.slope, -100.0);
        assert_eq!(result.predicted_next_value, 0.0);
        assert_eq!(result.confidence_percent, 100);
    }

    #[test]
    fn test_zero_month_is_missing() {
        let err = predict(&TrendInput::new(0.0, 45000.0, 50000.0)).unwrap_err();
        assert_eq!(err, ScoringError::validation("Missing required fields"));
    }

    #[test]
    fn test_absent_month_is_missing() {
        let input = TrendInput {
            month_1_sales: Some(1.0),
            month_2_sales: None,
            month_3_sales: Some(3.0),
        };
        assert!(predict(&input).unwrap_err().is_validation());
        assert!(predict(&TrendInput::default()).is_err());
    }

    #[test]
    fn test_idempotent() {
        let input = TrendInput::new(123.4, 567.8, 91.2);
        assert_eq!(predict(&input).unwrap(), predict(&input).unwrap());
    }

    #[test]
    fn test_interpretation_groups_thousands() {
        let input = TrendInput::new(40000.0, 45000.0, 50000.0);
        let result = predict(&input).unwrap();
        assert_eq!(
            interpretation(&input, &result),
            "Based on your sales trend (40000 → 45000 → 50000), next month's predicted sales: $55,000"
        );
    }

    #[test]
    fn test_prediction_is_a_whole_number_on_the_wire() {
        let result = predict(&TrendInput::new(40000.0, 45000.0, 50000.0)).unwrap();
        let body = serde_json::to_string(&result).unwrap();
        assert!(body.contains(r#""prediction":55000,"#));
        assert!(!body.contains("55000.0"));
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.0), "1,234,567");
        assert_eq!(group_thousands(-2500.0), "-2,500");
    }

    #[test]
    fn test_serializes_rounded_prediction() {
        let result = predict(&TrendInput::new(10.0, 20.0, 40.0)).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        // 15 * 4 - 6.666.. = 53.333..
        assert_eq!(json["prediction"], 53);
        assert!(json["prediction"].is_i64());
        assert_eq!(json["confidence"], 96);
        assert_eq!(json["slope"], 15.0);
    }
}
