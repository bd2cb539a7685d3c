use contracts::dashboards::d402_installments::{
    InstallmentModel, InstallmentTotals, InstallmentsResponse, ModelBreakdown, NamedRef,
    RegionBreakdown, RegionInstallment,
};
use contracts::shared::analytics::{payment_shares, percentage, remaining, Selection};
use once_cell::sync::OnceCell;
use std::collections::HashMap;

use super::client::{HttpInstallmentSource, InstallmentFetchError, InstallmentSource};
use crate::shared::config::get_config;

static HTTP_SOURCE: OnceCell<HttpInstallmentSource> = OnceCell::new();

/// Shared HTTP source built from `[installments]` config
pub fn http_source() -> Result<&'static HttpInstallmentSource, InstallmentFetchError> {
    HTTP_SOURCE.get_or_try_init(|| HttpInstallmentSource::new(&get_config().installments))
}

/// Fetch once and aggregate. A failed fetch yields an empty dashboard with
/// `fetch_failed` set; there is no retry.
pub async fn get_installments(
    source: &dyn InstallmentSource,
    region: &Selection,
    model: &Selection,
) -> InstallmentsResponse {
    match source.fetch().await {
        Ok(models) => {
            tracing::info!("D402 Dashboard: fetched {} models", models.len());
            build_response(&models, region, model)
        }
        Err(e) => {
            tracing::error!("D402 Dashboard: installment fetch failed: {}", e);
            failed_response()
        }
    }
}

pub fn failed_response() -> InstallmentsResponse {
    InstallmentsResponse {
        fetch_failed: true,
        ..Default::default()
    }
}

pub fn build_response(
    models: &[InstallmentModel],
    region: &Selection,
    model: &Selection,
) -> InstallmentsResponse {
    InstallmentsResponse {
        fetch_failed: false,
        totals: aggregate(models, region, model),
        by_model: by_model(models, region),
        by_region: by_region(models, model),
        regions: regions(models),
        models: model_refs(models),
    }
}

/// Models without an id are keyed by name
fn model_key(model: &InstallmentModel) -> &str {
    if model.model_id.is_empty() {
        &model.model_name
    } else {
        &model.model_id
    }
}

fn region_key(region: &RegionInstallment) -> &str {
    if region.region_id.is_empty() {
        &region.region_name
    } else {
        &region.region_id
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct Sums {
    contract_count: f64,
    total_price: f64,
    total_paid: f64,
    total_prepayment: f64,
    total_overdue: f64,
}

impl Sums {
    fn add(&mut self, r: &RegionInstallment) {
        self.contract_count += r.contract_count;
        self.total_price += r.total_price;
        self.total_paid += r.total_paid;
        self.total_prepayment += r.total_prepayment;
        self.total_overdue += r.total_overdue;
    }

    fn into_totals(self) -> InstallmentTotals {
        let shares = payment_shares(self.total_price, self.total_paid, self.total_overdue);
        if shares.drift() > 0.0 {
            tracing::debug!("D402 Dashboard: payment shares drift {}%", shares.drift());
        }

        InstallmentTotals {
            contract_count: self.contract_count,
            total_price: self.total_price,
            total_paid: self.total_paid,
            total_prepayment: self.total_prepayment,
            total_overdue: self.total_overdue,
            remaining: remaining(self.total_price, self.total_paid, self.total_overdue),
            paid_percent: percentage(self.total_paid, self.total_price),
            overdue_percent: percentage(self.total_overdue, self.total_price),
            prepayment_percent: percentage(self.total_prepayment, self.total_price),
            shares,
        }
    }
}

/// Totals of the selected model(s) in the selected region(s)
pub fn aggregate(
    models: &[InstallmentModel],
    region: &Selection,
    model: &Selection,
) -> InstallmentTotals {
    let mut sums = Sums::default();
    for m in models.iter().filter(|m| model.matches(model_key(m))) {
        for r in m.filter_by_region.iter().filter(|r| region.matches(region_key(r))) {
            sums.add(r);
        }
    }
    sums.into_totals()
}

/// One row per model within the selected region(s), largest contract value first
pub fn by_model(models: &[InstallmentModel], region: &Selection) -> Vec<ModelBreakdown> {
    let mut rows: Vec<ModelBreakdown> = models
        .iter()
        .map(|m| {
            let mut sums = Sums::default();
            for r in m.filter_by_region.iter().filter(|r| region.matches(region_key(r))) {
                sums.add(r);
            }
            ModelBreakdown {
                model_id: model_key(m).to_string(),
                model_name: m.model_name.clone(),
                totals: sums.into_totals(),
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.totals
            .total_price
            .total_cmp(&a.totals.total_price)
            .then_with(|| a.model_name.cmp(&b.model_name))
    });
    rows
}

/// One row per region over the selected model(s), largest contract value first
pub fn by_region(models: &[InstallmentModel], model: &Selection) -> Vec<RegionBreakdown> {
    let mut order: Vec<(String, String)> = Vec::new();
    let mut sums: HashMap<String, Sums> = HashMap::new();

    for m in models.iter().filter(|m| model.matches(model_key(m))) {
        for r in &m.filter_by_region {
            let key = region_key(r).to_string();
            if !sums.contains_key(&key) {
                order.push((key.clone(), r.region_name.clone()));
            }
            sums.entry(key).or_default().add(r);
        }
    }

    let mut rows: Vec<RegionBreakdown> = order
        .into_iter()
        .map(|(id, name)| RegionBreakdown {
            totals: sums.get(&id).copied().unwrap_or_default().into_totals(),
            region_id: id,
            region_name: name,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.totals
            .total_price
            .total_cmp(&a.totals.total_price)
            .then_with(|| a.region_name.cmp(&b.region_name))
    });
    rows
}

/// Distinct regions in first-seen order
pub fn regions(models: &[InstallmentModel]) -> Vec<NamedRef> {
    let mut out: Vec<NamedRef> = Vec::new();
    for r in models.iter().flat_map(|m| m.filter_by_region.iter()) {
        let id = region_key(r);
        if !out.iter().any(|known| known.id == id) {
            out.push(NamedRef {
                id: id.to_string(),
                name: r.region_name.clone(),
            });
        }
    }
    out
}

pub fn model_refs(models: &[InstallmentModel]) -> Vec<NamedRef> {
    let mut out: Vec<NamedRef> = Vec::new();
    for m in models {
        let id = model_key(m);
        if !out.iter().any(|known| known.id == id) {
            out.push(NamedRef {
                id: id.to_string(),
                name: m.model_name.clone(),
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use contracts::shared::analytics::round2;

    fn region(id: &str, name: &str, count: f64, price: f64, paid: f64, prepay: f64, overdue: f64) -> RegionInstallment {
        RegionInstallment {
            region_id: id.into(),
            region_name: name.into(),
            contract_count: count,
            total_price: price,
            total_paid: paid,
            total_prepayment: prepay,
            total_overdue: overdue,
        }
    }

    fn sample() -> Vec<InstallmentModel> {
        vec![
            InstallmentModel {
                model_id: "1".into(),
                model_name: "Cobalt".into(),
                filter_by_region: vec![
                    region("10", "Toshkent", 40.0, 4_000.0, 1_500.0, 400.0, 200.0),
                    region("20", "Samarqand", 10.0, 1_000.0, 300.0, 100.0, 100.0),
                ],
            },
            InstallmentModel {
                model_id: "2".into(),
                model_name: "Damas".into(),
                filter_by_region: vec![
                    region("10", "Toshkent", 5.0, 500.0, 500.0, 50.0, 0.0),
                    region("30", "Farg'ona", 20.0, 2_000.0, 600.0, 200.0, 1_600.0),
                ],
            },
        ]
    }

    #[test]
    fn test_aggregate_all() {
        let totals = aggregate(&sample(), &Selection::All, &Selection::All);
        assert_eq!(totals.contract_count, 75.0);
        assert_eq!(totals.total_price, 7_500.0);
        assert_eq!(totals.total_paid, 2_900.0);
        assert_eq!(totals.total_overdue, 1_900.0);
        assert_eq!(totals.remaining, 2_700.0);
        assert_eq!(totals.paid_percent, 38.67);
        assert_eq!(totals.prepayment_percent, 10.0);
    }

    #[test]
    fn test_all_equals_sum_of_regions() {
        let models = sample();
        let all = aggregate(&models, &Selection::All, &Selection::All);

        let mut count = 0.0;
        let mut price = 0.0;
        let mut paid = 0.0;
        let mut prepayment = 0.0;
        let mut overdue = 0.0;
        for r in regions(&models) {
            let t = aggregate(&models, &Selection::Only(r.id), &Selection::All);
            count += t.contract_count;
            price += t.total_price;
            paid += t.total_paid;
            prepayment += t.total_prepayment;
            overdue += t.total_overdue;
        }

        assert_eq!(count, all.contract_count);
        assert_eq!(price, all.total_price);
        assert_eq!(paid, all.total_paid);
        assert_eq!(prepayment, all.total_prepayment);
        assert_eq!(overdue, all.total_overdue);
    }

    #[test]
    fn test_remaining_clamped_for_overdue_region() {
        let totals = aggregate(&sample(), &Selection::Only("30".into()), &Selection::All);
        // 2000 - 600 - 1600 < 0
        assert_eq!(totals.remaining, 0.0);
        assert_eq!(totals.shares.remaining, 0.0);
        assert_eq!(round2(totals.shares.paid + totals.shares.overdue), 100.0);
    }

    #[test]
    fn test_model_filter() {
        let totals = aggregate(&sample(), &Selection::All, &Selection::Only("2".into()));
        assert_eq!(totals.total_price, 2_500.0);
        assert_eq!(totals.contract_count, 25.0);
    }

    #[test]
    fn test_breakdowns_sorted_by_price() {
        let models = sample();
        let rows = by_model(&models, &Selection::All);
        assert_eq!(rows[0].model_name, "Cobalt");
        assert_eq!(rows[1].totals.total_price, 2_500.0);

        let rows = by_region(&models, &Selection::All);
        let names: Vec<&str> = rows.iter().map(|r| r.region_name.as_str()).collect();
        assert_eq!(names, vec!["Toshkent", "Farg'ona", "Samarqand"]);
        assert_eq!(rows[0].totals.total_price, 4_500.0);
    }

    #[test]
    fn test_by_model_respects_region() {
        let rows = by_model(&sample(), &Selection::Only("20".into()));
        let damas = rows.iter().find(|r| r.model_name == "Damas").unwrap();
        assert_eq!(damas.totals.total_price, 0.0);
        assert_eq!(damas.totals.paid_percent, 0.0);
    }

    #[test]
    fn test_catalogs() {
        let models = sample();
        let ids: Vec<String> = regions(&models).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["10", "20", "30"]);
        assert_eq!(model_refs(&models).len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let response = build_response(&[], &Selection::All, &Selection::All);
        assert!(!response.fetch_failed);
        assert_eq!(response.totals, InstallmentTotals::default());
        assert!(response.by_model.is_empty());
        assert!(response.regions.is_empty());
    }

    struct StaticSource(Vec<InstallmentModel>);

    #[async_trait]
    impl InstallmentSource for StaticSource {
        async fn fetch(&self) -> Result<Vec<InstallmentModel>, InstallmentFetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl InstallmentSource for FailingSource {
        async fn fetch(&self) -> Result<Vec<InstallmentModel>, InstallmentFetchError> {
            Err(InstallmentFetchError::Status {
                status: 502,
                body: "bad gateway".into(),
            })
        }
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let source = StaticSource(sample());
        let response = get_installments(&source, &Selection::All, &Selection::All).await;
        assert!(!response.fetch_failed);
        assert_eq!(response.by_region.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_failure_gives_empty_dashboard() {
        let response = get_installments(&FailingSource, &Selection::All, &Selection::All).await;
        assert!(response.fetch_failed);
        assert_eq!(response.totals.total_price, 0.0);
        assert!(response.by_model.is_empty());
        assert!(response.by_region.is_empty());
    }
}
