//! Simulated data service.
//!
//! Wraps the pure generators behind an async interface that sleeps for a
//! per-bundle latency before answering, the way a real backend would.

use std::time::Duration;

use serde::Deserialize;
use site_analysis_mock::{
    derive_seed, generate_benchmark_bundle, generate_location_bundle, generate_metrics_bundle,
    generate_risk_bundle,
};
use site_analysis_site_models::{
    BenchmarkBundle, BundleKind, Coordinate, LocationBundle, MetricsBundle, RiskBundle,
    SiteAnalysis,
};
use thiserror::Error;

const FETCH_TOML: &str = include_str!("../config/fetch.toml");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid fetch config: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum FetchError {
    /// The generator task panicked or was cancelled.
    #[error("{kind} fetch task failed: {source}")]
    Task {
        kind: BundleKind,
        #[source]
        source: tokio::task::JoinError,
    },
}

impl FetchError {
    /// Generic message safe to show to users.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Task { kind, .. } => kind.failure_message(),
        }
    }
}

/// Per-bundle response delay in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct LatencyTable {
    pub location_ms: u64,
    pub metrics_ms: u64,
    pub benchmark_ms: u64,
    pub risk_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FetchConfig {
    pub latency: LatencyTable,
}

impl FetchConfig {
    /// Parses a fetch config from TOML text.
    ///
    /// # Errors
    ///
    /// * If the text is not valid TOML or is missing a latency entry
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(text)?)
    }

    /// Loads the compiled-in latency table.
    ///
    /// # Panics
    ///
    /// Panics if the embedded `fetch.toml` is malformed.
    #[must_use]
    pub fn embedded() -> Self {
        Self::from_toml_str(FETCH_TOML)
            .unwrap_or_else(|e| panic!("Failed to parse embedded fetch config: {e}"))
    }

    /// A config with no simulated delay at all.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            latency: LatencyTable {
                location_ms: 0,
                metrics_ms: 0,
                benchmark_ms: 0,
                risk_ms: 0,
            },
        }
    }

    #[must_use]
    pub const fn latency(&self, kind: BundleKind) -> Duration {
        let ms = match kind {
            BundleKind::Location => self.latency.location_ms,
            BundleKind::Metrics => self.latency.metrics_ms,
            BundleKind::Benchmark => self.latency.benchmark_ms,
            BundleKind::Risk => self.latency.risk_ms,
        };
        Duration::from_millis(ms)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self::embedded()
    }
}

/// One fetched bundle of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum BundlePayload {
    Location(LocationBundle),
    Metrics(MetricsBundle),
    Benchmark(BenchmarkBundle),
    Risk(RiskBundle),
}

impl BundlePayload {
    /// Runs the generator for `kind` synchronously.
    #[must_use]
    pub fn generate(kind: BundleKind, coordinate: Coordinate) -> Self {
        match kind {
            BundleKind::Location => Self::Location(generate_location_bundle(coordinate)),
            BundleKind::Metrics => Self::Metrics(generate_metrics_bundle(coordinate)),
            BundleKind::Benchmark => Self::Benchmark(generate_benchmark_bundle(coordinate)),
            BundleKind::Risk => Self::Risk(generate_risk_bundle(coordinate)),
        }
    }

    #[must_use]
    pub const fn kind(&self) -> BundleKind {
        match self {
            Self::Location(_) => BundleKind::Location,
            Self::Metrics(_) => BundleKind::Metrics,
            Self::Benchmark(_) => BundleKind::Benchmark,
            Self::Risk(_) => BundleKind::Risk,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MockDataService {
    config: FetchConfig,
}

impl MockDataService {
    #[must_use]
    pub const fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Fetches one bundle after the configured delay.
    ///
    /// # Errors
    ///
    /// * If the generator task panics
    pub async fn fetch(
        &self,
        kind: BundleKind,
        coordinate: Coordinate,
    ) -> Result<BundlePayload, FetchError> {
        self.delayed(kind, coordinate, move |c| BundlePayload::generate(kind, c))
            .await
    }

    /// Fetches all four bundles concurrently.
    ///
    /// Completes after the slowest configured latency, not their sum.
    ///
    /// # Errors
    ///
    /// * If any generator task panics
    pub async fn fetch_all(&self, coordinate: Coordinate) -> Result<SiteAnalysis, FetchError> {
        let (location, metrics, benchmarks, risk) = tokio::try_join!(
            self.delayed(BundleKind::Location, coordinate, generate_location_bundle),
            self.delayed(BundleKind::Metrics, coordinate, generate_metrics_bundle),
            self.delayed(BundleKind::Benchmark, coordinate, generate_benchmark_bundle),
            self.delayed(BundleKind::Risk, coordinate, generate_risk_bundle),
        )?;

        Ok(SiteAnalysis {
            coordinate,
            seed: derive_seed(coordinate),
            location,
            metrics,
            benchmarks,
            risk,
        })
    }

    async fn delayed<T, F>(
        &self,
        kind: BundleKind,
        coordinate: Coordinate,
        generate: F,
    ) -> Result<T, FetchError>
    where
        T: Send + 'static,
        F: FnOnce(Coordinate) -> T + Send + 'static,
    {
        let delay = self.config.latency(kind);
        log::debug!("Fetching {kind} for {coordinate} ({}ms)", delay.as_millis());

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        tokio::task::spawn_blocking(move || generate(coordinate))
            .await
            .map_err(|source| FetchError::Task { kind, source })
    }
}
