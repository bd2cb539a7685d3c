use serde::{Deserialize, Deserializer, Serialize};

use crate::shared::analytics::PaymentShares;

/// One car model as returned by the installment API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentModel {
    #[serde(default, deserialize_with = "lenient_id")]
    pub model_id: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub model_name: String,
    #[serde(default)]
    pub filter_by_region: Vec<RegionInstallment>,
}

/// Contract sums of one model in one region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionInstallment {
    #[serde(default, deserialize_with = "lenient_id")]
    pub region_id: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub region_name: String,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub contract_count: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_price: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_paid: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_prepayment: f64,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub total_overdue: f64,
}

/// The API mixes numbers and numeric strings; null, garbage and non-finite values count as zero.
fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite())
    .unwrap_or(0.0))
}

fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

/// GET /api/d402/installments
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallmentsRequest {
    /// Region id or "all"
    pub region: Option<String>,
    /// Model id or "all"
    pub model: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstallmentTotals {
    pub contract_count: f64,
    pub total_price: f64,
    pub total_paid: f64,
    pub total_prepayment: f64,
    pub total_overdue: f64,
    /// max(0, price - paid - overdue)
    pub remaining: f64,
    pub paid_percent: f64,
    pub overdue_percent: f64,
    pub prepayment_percent: f64,
    pub shares: PaymentShares,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBreakdown {
    pub model_id: String,
    pub model_name: String,
    pub totals: InstallmentTotals,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionBreakdown {
    pub region_id: String,
    pub region_name: String,
    pub totals: InstallmentTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallmentsResponse {
    /// The upstream request failed; every figure below is empty
    pub fetch_failed: bool,
    pub totals: InstallmentTotals,
    pub by_model: Vec<ModelBreakdown>,
    pub by_region: Vec<RegionBreakdown>,
    pub regions: Vec<NamedRef>,
    pub models: Vec<NamedRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mixed_numeric_fields() {
        let json = r#"[{
            "model_id": 7,
            "model_name": "Cobalt",
            "filter_by_region": [
                {"region_id": 1, "region_name": "Toshkent", "contract_count": "12",
                 "total_price": 1500000.5, "total_paid": "500000", "total_prepayment": null,
                 "total_overdue": 25000}
            ]
        }]"#;
        let models: Vec<InstallmentModel> = serde_json::from_str(json).unwrap();
        assert_eq!(models[0].model_id, "7");
        let region = &models[0].filter_by_region[0];
        assert_eq!(region.region_id, "1");
        assert_eq!(region.contract_count, 12.0);
        assert_eq!(region.total_price, 1500000.5);
        assert_eq!(region.total_paid, 500000.0);
        assert_eq!(region.total_prepayment, 0.0);
        assert_eq!(region.total_overdue, 25000.0);
    }

    #[test]
    fn test_missing_regions_default_to_empty() {
        let models: Vec<InstallmentModel> =
            serde_json::from_str(r#"[{"model_name": "Spark"}]"#).unwrap();
        assert!(models[0].filter_by_region.is_empty());
        assert_eq!(models[0].model_id, "");
    }

    #[test]
    fn test_missing_model_name_defaults_to_empty() {
        let models: Vec<InstallmentModel> = serde_json::from_str(
            r#"[{"model_id": 3, "filter_by_region": []}, {"model_id": 4, "model_name": null}]"#,
        )
        .unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(models[0].model_name, "");
        assert_eq!(models[1].model_name, "");
    }

    #[test]
    fn test_non_finite_strings_count_as_zero() {
        let region: RegionInstallment = serde_json::from_str(
            r#"{"total_price": "1000", "total_paid": "NaN", "total_overdue": "inf",
                "total_prepayment": "-infinity", "contract_count": " 3 "}"#,
        )
        .unwrap();
        assert_eq!(region.total_price, 1000.0);
        assert_eq!(region.total_paid, 0.0);
        assert_eq!(region.total_overdue, 0.0);
        assert_eq!(region.total_prepayment, 0.0);
        assert_eq!(region.contract_count, 3.0);
    }

    #[test]
    fn test_totals_from_garbage_still_round_trip_through_json() {
        let region: RegionInstallment =
            serde_json::from_str(r#"{"total_price": "500", "total_paid": "NaN", "total_overdue": "inf"}"#)
                .unwrap();
        let totals = InstallmentTotals {
            total_price: region.total_price,
            total_paid: region.total_paid,
            total_overdue: region.total_overdue,
            remaining: crate::shared::analytics::remaining(
                region.total_price,
                region.total_paid,
                region.total_overdue,
            ),
            paid_percent: crate::shared::analytics::percentage(region.total_paid, region.total_price),
            ..Default::default()
        };
        let json = serde_json::to_string(&totals).unwrap();
        assert!(!json.contains("null"), "{json}");
        let back: InstallmentTotals = serde_json::from_str(&json).unwrap();
        assert_eq!(back, totals);
        assert_eq!(back.remaining, 500.0);
    }
}
