#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Coordinate, bundle, and taxonomy types for industrial site analysis.
//!
//! This crate defines the canonical shapes exchanged between the mock data
//! generator, the dashboard runtime, the HTTP API and the CLI. Everything
//! serializes to camelCase JSON, and the closed enums ([`MetricStatus`],
//! [`RiskLevel`], [`RiskCategory`]) keep the exact wire strings that
//! visualization consumers style against.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use geojson::FeatureCollection;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A WGS84 position. Never validated: out-of-range values are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Longitude in degrees, nominally -180..=180.
    pub longitude: f64,
    /// Latitude in degrees, nominally -90..=90.
    pub latitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from a longitude/latitude pair.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Returns a new coordinate shifted by the given deltas (in degrees).
    #[must_use]
    pub fn offset(self, d_lon: f64, d_lat: f64) -> Self {
        Self::new(self.longitude + d_lon, self.latitude + d_lat)
    }

    /// Returns the `GeoJSON` position (`[longitude, latitude]`).
    #[must_use]
    pub fn position(self) -> geojson::Position {
        vec![self.longitude, self.latitude]
    }

    /// Whether the coordinate lies inside [-180,180]×[-90,90].
    #[must_use]
    pub fn is_within_bounds(self) -> bool {
        (-180.0..=180.0).contains(&self.longitude) && (-90.0..=90.0).contains(&self.latitude)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}, {:.4}", self.longitude, self.latitude)
    }
}

impl FromStr for Coordinate {
    type Err = InvalidCoordinateError;

    /// Parses `"lng,lat"` (whitespace around either number is ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || InvalidCoordinateError {
            input: s.to_string(),
        };

        let (lng, lat) = s.split_once(',').ok_or_else(err)?;
        let longitude: f64 = lng.trim().parse().map_err(|_| err())?;
        let latitude: f64 = lat.trim().parse().map_err(|_| err())?;

        Ok(Self::new(longitude, latitude))
    }
}

/// Error returned when a `"lng,lat"` string cannot be parsed into a
/// [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidCoordinateError {
    /// The rejected input.
    pub input: String,
}

impl fmt::Display for InvalidCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid coordinate '{}': expected \"longitude,latitude\"",
            self.input
        )
    }
}

impl std::error::Error for InvalidCoordinateError {}

/// Scalar in `[0, 10)` that drives every mock value for a coordinate.
///
/// Construction always reduces with the floored modulo, so a `Seed` can
/// never hold a negative value or `10.0`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Seed(f64);

impl Seed {
    /// Exclusive upper bound of the seed range.
    pub const MODULUS: f64 = 10.0;

    /// Largest `f64` strictly below [`Self::MODULUS`].
    const MAX_BELOW_MODULUS: f64 = 9.999_999_999_999_998;

    /// Reduces `raw` into `[0, 10)` with the floored (Euclidean) modulo.
    ///
    /// Tiny negative inputs make `rem_euclid` round up to exactly `10.0`;
    /// those are pinned to the largest value below the modulus.
    #[must_use]
    pub fn new(raw: f64) -> Self {
        let reduced = raw.rem_euclid(Self::MODULUS);
        if reduced >= Self::MODULUS {
            Self(Self::MAX_BELOW_MODULUS)
        } else {
            Self(reduced)
        }
    }

    /// Returns the seed value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for Seed {
    fn from(raw: f64) -> Self {
        Self::new(raw)
    }
}

impl From<Seed> for f64 {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

/// The nine fixed metric keys, in display order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MetricKey {
    /// Distance to the nearest highway.
    Highway,
    /// Median household income.
    Income,
    /// Flood risk score.
    Flood,
    /// Population within one mile.
    Population,
    /// Daily traffic volume.
    Traffic,
    /// Crime index.
    Crime,
    /// Zoning designation.
    Zoning,
    /// Distance to the nearest airport.
    Airport,
    /// Environmental risk score.
    Environmental,
}

impl MetricKey {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Highway,
            Self::Income,
            Self::Flood,
            Self::Population,
            Self::Traffic,
            Self::Crime,
            Self::Zoning,
            Self::Airport,
            Self::Environmental,
        ]
    }
}

/// Status classification of a metric card.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MetricStatus {
    Good,
    Warning,
    Bad,
    Neutral,
}

impl MetricStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Good, Self::Warning, Self::Bad, Self::Neutral]
    }
}

/// A metric value as displayed on a card.
///
/// Fixed-point values (e.g. `"3.3"`) and labels (e.g. `"Industrial"`) are
/// both carried as preformatted text; whole counts stay numeric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Count(i64),
    Text(String),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A single metric value together with its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricReading {
    pub value: MetricValue,
    pub status: MetricStatus,
}

/// Metric readings keyed by [`MetricKey`], iterated in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetricsBundle(BTreeMap<MetricKey, MetricReading>);

impl MetricsBundle {
    /// Returns the reading for `key`, if present.
    #[must_use]
    pub fn get(&self, key: MetricKey) -> Option<&MetricReading> {
        self.0.get(&key)
    }

    /// Iterates readings in [`MetricKey`] order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricKey, &MetricReading)> {
        self.0.iter().map(|(key, reading)| (*key, reading))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(MetricKey, MetricReading)> for MetricsBundle {
    fn from_iter<I: IntoIterator<Item = (MetricKey, MetricReading)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Display metadata for one metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricCard {
    /// Which metric this card shows.
    pub id: MetricKey,
    /// Card title (e.g. "Nearest Highway").
    pub label: String,
    /// Attribution of the (nominal) data source.
    pub source: String,
    /// Unit suffix; empty when the value is unitless.
    #[serde(default)]
    pub unit: String,
}

/// One benchmark comparison row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Benchmark {
    /// Benchmark name (e.g. "Cap Rate").
    pub name: String,
    /// Preformatted value (currency, percentage or grouped integer).
    pub value: String,
    /// Unit suffix; empty when the value already carries its unit.
    pub unit: String,
    /// Percentile within the submarket.
    pub market_percentile: u32,
    /// Percentile nationally.
    pub national_percentile: u32,
}

/// Ordered benchmark comparisons. An empty bundle is a valid "no data"
/// state, not an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchmarkBundle {
    pub benchmarks: Vec<Benchmark>,
}

impl BenchmarkBundle {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.benchmarks.is_empty()
    }
}

/// Per-factor risk level.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Low, Self::Medium, Self::High]
    }
}

/// Overall risk classification derived from the overall score.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    #[strum(serialize = "Low Risk")]
    LowRisk,
    #[serde(rename = "Moderate Risk")]
    #[strum(serialize = "Moderate Risk")]
    ModerateRisk,
    #[serde(rename = "High Risk")]
    #[strum(serialize = "High Risk")]
    HighRisk,
}

impl RiskCategory {
    /// Scores of 80 and above are low risk, 60 to 79 moderate, below 60 high.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score >= 80 {
            Self::LowRisk
        } else if score >= 60 {
            Self::ModerateRisk
        } else {
            Self::HighRisk
        }
    }
}

/// One axis of the risk radar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskFactor {
    pub name: String,
    /// Score for the analyzed site.
    pub value: u32,
    /// Submarket average score.
    pub market_average: u32,
    pub category: RiskLevel,
}

/// Overall risk assessment with its per-factor breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskBundle {
    /// Overall score, 0-100 (higher is safer).
    pub overall_score: u32,
    pub risk_category: RiskCategory,
    /// An empty list is a valid "no data" state.
    pub risks: Vec<RiskFactor>,
}

/// Map layers carried by a [`LocationBundle`].
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum MapLayer {
    Parcels,
    Transportation,
    Amenities,
    Competitors,
    RiskFactors,
}

impl MapLayer {
    /// Human-readable layer name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Parcels => "Parcels",
            Self::Transportation => "Transportation",
            Self::Amenities => "Amenities",
            Self::Competitors => "Competitors",
            Self::RiskFactors => "Risk Factors",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Parcels,
            Self::Transportation,
            Self::Amenities,
            Self::Competitors,
            Self::RiskFactors,
        ]
    }
}

/// The five `GeoJSON` feature collections drawn on the site map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationBundle {
    pub parcels: FeatureCollection,
    pub transportation: FeatureCollection,
    pub amenities: FeatureCollection,
    pub competitors: FeatureCollection,
    pub risk_factors: FeatureCollection,
}

impl LocationBundle {
    /// Returns the feature collection backing `layer`.
    #[must_use]
    pub const fn layer(&self, layer: MapLayer) -> &FeatureCollection {
        match layer {
            MapLayer::Parcels => &self.parcels,
            MapLayer::Transportation => &self.transportation,
            MapLayer::Amenities => &self.amenities,
            MapLayer::Competitors => &self.competitors,
            MapLayer::RiskFactors => &self.risk_factors,
        }
    }

    /// Total number of features across all layers.
    #[must_use]
    pub fn feature_count(&self) -> usize {
        MapLayer::all()
            .iter()
            .map(|layer| self.layer(*layer).features.len())
            .sum()
    }
}

/// The four independently fetched result bundles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BundleKind {
    Location,
    Metrics,
    Benchmark,
    Risk,
}

impl BundleKind {
    /// Generic user-facing message shown when a fetch of this kind fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Location => "Failed to fetch location data",
            Self::Metrics => "Failed to fetch metrics data",
            Self::Benchmark => "Failed to fetch benchmark data",
            Self::Risk => "Failed to fetch risk data",
        }
    }

    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Location, Self::Metrics, Self::Benchmark, Self::Risk]
    }
}

/// Every bundle for one coordinate, plus the seed they were derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteAnalysis {
    pub coordinate: Coordinate,
    pub seed: Seed,
    pub location: LocationBundle,
    pub metrics: MetricsBundle,
    pub benchmarks: BenchmarkBundle,
    pub risk: RiskBundle,
}
