//! Overall risk score and the five-factor risk radar.

use site_analysis_site_models::{
    Coordinate, RiskBundle, RiskCategory, RiskFactor, RiskLevel, Seed,
};

use crate::format::floor_score;
use crate::seed::derive_seed;

/// Linear formulas and level thresholds for one risk factor.
struct FactorTemplate {
    name: &'static str,
    /// `(base, slope)` for the site value.
    value: (f64, f64),
    /// `(base, slope)` for the submarket average.
    market_average: (f64, f64),
    /// Seed below which the factor is `Low`.
    low_below: f64,
    /// Seed below which the factor is `Medium`; `High` otherwise.
    medium_below: f64,
}

const FACTORS: [FactorTemplate; 5] = [
    FactorTemplate {
        name: "Flood Risk",
        value: (20.0, 8.0),
        market_average: (30.0, 2.0),
        low_below: 3.0,
        medium_below: 7.0,
    },
    FactorTemplate {
        name: "Crime Rate",
        value: (25.0, 7.0),
        market_average: (35.0, 3.0),
        low_below: 4.0,
        medium_below: 8.0,
    },
    FactorTemplate {
        name: "Environmental",
        value: (15.0, 6.0),
        market_average: (25.0, 2.0),
        low_below: 5.0,
        medium_below: 8.0,
    },
    FactorTemplate {
        name: "Traffic Congestion",
        value: (30.0, 6.0),
        market_average: (40.0, 2.0),
        low_below: 4.0,
        medium_below: 7.0,
    },
    FactorTemplate {
        name: "Market Volatility",
        value: (25.0, 5.0),
        market_average: (30.0, 3.0),
        low_below: 5.0,
        medium_below: 8.0,
    },
];

/// Generates the risk assessment for `coordinate`.
#[must_use]
pub fn generate_risk_bundle(coordinate: Coordinate) -> RiskBundle {
    risk_for_seed(derive_seed(coordinate))
}

/// Generates the risk assessment for an already derived seed.
#[must_use]
pub fn risk_for_seed(seed: Seed) -> RiskBundle {
    let s = seed.value();
    let overall_score = floor_score(70.0 + s * 3.0);

    RiskBundle {
        overall_score,
        risk_category: RiskCategory::from_score(overall_score),
        risks: FACTORS.iter().map(|template| factor(template, s)).collect(),
    }
}

fn factor(template: &FactorTemplate, s: f64) -> RiskFactor {
    let category = if s < template.low_below {
        RiskLevel::Low
    } else if s < template.medium_below {
        RiskLevel::Medium
    } else {
        RiskLevel::High
    };

    RiskFactor {
        name: template.name.to_string(),
        value: floor_score(template.value.0 + s * template.value.1),
        market_average: floor_score(template.market_average.0 + s * template.market_average.1),
        category,
    }
}
