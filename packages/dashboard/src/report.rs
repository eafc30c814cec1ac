//! Plain-text "Full Analysis" report.

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use site_analysis_mock::{format::to_fixed, metric_cards};
use site_analysis_site_models::{
    BenchmarkBundle, Coordinate, MetricsBundle, RiskBundle, SiteAnalysis,
};

use crate::state::DashboardState;

pub const REPORT_TYPE: &str = "Full Analysis";
pub const NO_METRICS: &str = "No metrics data available for this location.";
pub const NO_BENCHMARKS: &str = "No benchmark data available for this location.";
pub const NO_RISK: &str = "No risk data available for this location.";

/// The sections of a report. Missing bundles render a "no data" line.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a> {
    pub location_name: &'a str,
    pub coordinate: Coordinate,
    pub metrics: Option<&'a MetricsBundle>,
    pub benchmarks: Option<&'a BenchmarkBundle>,
    pub risk: Option<&'a RiskBundle>,
    pub generated_at: DateTime<Utc>,
}

impl<'a> Report<'a> {
    #[must_use]
    pub const fn from_analysis(
        location_name: &'a str,
        analysis: &'a SiteAnalysis,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            location_name,
            coordinate: analysis.coordinate,
            metrics: Some(&analysis.metrics),
            benchmarks: Some(&analysis.benchmarks),
            risk: Some(&analysis.risk),
            generated_at,
        }
    }

    /// Uses whatever panels have loaded so far.
    #[must_use]
    pub fn from_state(state: &'a DashboardState, generated_at: DateTime<Utc>) -> Self {
        Self {
            location_name: state.location_name(),
            coordinate: state.coordinate(),
            metrics: state.metrics().loaded(),
            benchmarks: state.benchmarks().loaded(),
            risk: state.risk().loaded(),
            generated_at,
        }
    }

    fn write_metrics(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Key Location Metrics")?;

        let Some(metrics) = self.metrics.filter(|m| !m.is_empty()) else {
            return writeln!(f, "{NO_METRICS}");
        };

        for card in metric_cards() {
            let (value, status) = metrics.get(card.id).map_or_else(
                || ("N/A".to_string(), String::new()),
                |reading| (reading.value.to_string(), format!("[{}]", reading.status)),
            );
            let value = if card.unit.is_empty() || value == "N/A" {
                value
            } else {
                format!("{value} {}", card.unit)
            };
            writeln!(
                f,
                "{:<20} {:<22} {:<10} Source: {}",
                card.label, value, status, card.source
            )?;
        }
        Ok(())
    }

    fn write_benchmarks(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Benchmark Comparison")?;

        let Some(bundle) = self.benchmarks.filter(|b| !b.is_empty()) else {
            return writeln!(f, "{NO_BENCHMARKS}");
        };

        for benchmark in &bundle.benchmarks {
            let value = if benchmark.unit.is_empty() {
                benchmark.value.clone()
            } else {
                format!("{} {}", benchmark.value, benchmark.unit)
            };
            writeln!(
                f,
                "{:<20} {:<22} Submarket {:>3}%  National {:>3}%",
                benchmark.name, value, benchmark.market_percentile, benchmark.national_percentile
            )?;
        }
        Ok(())
    }

    fn write_risk(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        heading(f, "Risk Assessment")?;

        let Some(risk) = self.risk.filter(|r| !r.risks.is_empty()) else {
            return writeln!(f, "{NO_RISK}");
        };

        writeln!(
            f,
            "Overall Risk Score: {}/100 ({})",
            risk.overall_score, risk.risk_category
        )?;
        writeln!(f)?;
        writeln!(
            f,
            "{:<20} {:>5} {:>11}  Level",
            "Factor", "Score", "Market Avg"
        )?;
        for factor in &risk.risks {
            writeln!(
                f,
                "{:<20} {:>5} {:>11}  {}",
                factor.name, factor.value, factor.market_average, factor.category
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = "Industrial Site Analysis Report";
        writeln!(f, "{title}")?;
        writeln!(f, "{}", "=".repeat(title.len()))?;
        writeln!(f, "Location:     {}", self.location_name)?;
        writeln!(
            f,
            "Coordinates:  {}, {}",
            to_fixed(self.coordinate.longitude, 4),
            to_fixed(self.coordinate.latitude, 4)
        )?;
        writeln!(f, "Report Type:  {REPORT_TYPE}")?;
        writeln!(
            f,
            "Generated:    {}",
            self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;

        writeln!(f)?;
        self.write_metrics(f)?;
        writeln!(f)?;
        self.write_benchmarks(f)?;
        writeln!(f)?;
        self.write_risk(f)
    }
}

fn heading(f: &mut fmt::Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.len()))
}
