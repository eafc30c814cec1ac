#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Deterministic mock data generator for industrial site analysis.
//!
//! Every bundle is a pure function of the input [`Coordinate`]: the
//! coordinate is folded into a [`Seed`] in `[0, 10)` (see [`derive_seed`])
//! and each metric, benchmark and risk value is a fixed linear formula of
//! that seed. Location features are static offset tables around the
//! coordinate and do not depend on the seed at all.
//!
//! There is no I/O, no randomness and no failure path. Out-of-range
//! coordinates are accepted as-is.

pub mod benchmark;
pub mod cards;
pub mod format;
pub mod location;
pub mod metrics;
pub mod risk;
pub mod seed;

pub use benchmark::generate_benchmark_bundle;
pub use cards::{metric_card, metric_cards};
pub use location::generate_location_bundle;
pub use metrics::generate_metrics_bundle;
pub use risk::generate_risk_bundle;
pub use seed::derive_seed;

use site_analysis_site_models::{Coordinate, Seed, SiteAnalysis};

/// Generates all four bundles for `coordinate`.
#[must_use]
pub fn generate_site_analysis(coordinate: Coordinate) -> SiteAnalysis {
    let seed: Seed = derive_seed(coordinate);

    SiteAnalysis {
        coordinate,
        seed,
        location: generate_location_bundle(coordinate),
        metrics: metrics::metrics_for_seed(seed),
        benchmarks: benchmark::benchmarks_for_seed(seed),
        risk: risk::risk_for_seed(seed),
    }
}
