//! Chart series for the risk panel.

use serde::Serialize;
use site_analysis_site_models::RiskBundle;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Site scores against submarket averages, one axis per risk factor.
#[must_use]
pub fn radar_chart(risk: &RiskBundle) -> ChartData {
    ChartData {
        labels: labels(risk),
        datasets: vec![
            dataset("Current Location", risk.risks.iter().map(|r| r.value)),
            dataset(
                "Submarket Average",
                risk.risks.iter().map(|r| r.market_average),
            ),
        ],
    }
}

/// Site scores only, as a polar-area breakdown.
#[must_use]
pub fn polar_area_chart(risk: &RiskBundle) -> ChartData {
    ChartData {
        labels: labels(risk),
        datasets: vec![dataset("Risk Score", risk.risks.iter().map(|r| r.value))],
    }
}

fn labels(risk: &RiskBundle) -> Vec<String> {
    risk.risks.iter().map(|r| r.name.clone()).collect()
}

fn dataset(label: &str, data: impl Iterator<Item = u32>) -> ChartDataset {
    ChartDataset {
        label: label.to_string(),
        data: data.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_analysis_mock::generate_risk_bundle;
    use site_analysis_site_models::{Coordinate, RiskCategory};

    #[test]
    fn radar_pairs_site_and_market() {
        let chart = radar_chart(&generate_risk_bundle(Coordinate::new(-74.006, 40.7128)));
        assert_eq!(
            chart.labels,
            [
                "Flood Risk",
                "Crime Rate",
                "Environmental",
                "Traffic Congestion",
                "Market Volatility",
            ]
        );
        assert_eq!(chart.datasets[0].label, "Current Location");
        assert_eq!(chart.datasets[0].data, [76, 74, 57, 72, 60]);
        assert_eq!(chart.datasets[1].label, "Submarket Average");
        assert_eq!(chart.datasets[1].data, [44, 56, 39, 54, 51]);
    }

    #[test]
    fn polar_has_single_series() {
        let chart = polar_area_chart(&generate_risk_bundle(Coordinate::new(-74.006, 40.7128)));
        assert_eq!(chart.datasets.len(), 1);
        assert_eq!(chart.datasets[0].label, "Risk Score");
        assert_eq!(chart.datasets[0].data.len(), 5);
    }

    #[test]
    fn empty_bundle_gives_empty_series() {
        let empty = RiskBundle {
            overall_score: 0,
            risk_category: RiskCategory::HighRisk,
            risks: vec![],
        };
        let chart = radar_chart(&empty);
        assert!(chart.labels.is_empty());
        assert!(chart.datasets.iter().all(|d| d.data.is_empty()));
    }
}
