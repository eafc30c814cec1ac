//! Immutable view state for one dashboard session.
//!
//! A [`DashboardState`] is only ever replaced through
//! [`crate::update::update`]; nothing outside this crate can mutate it in
//! place.

use serde::Serialize;
use site_analysis_site_models::{
    BenchmarkBundle, BundleKind, Coordinate, LocationBundle, MapLayer, MetricsBundle, RiskBundle,
};
use strum_macros::{AsRefStr, Display, EnumString};

/// Name shown for the initial coordinate before anything is picked.
pub const INITIAL_LOCATION_NAME: &str = "Current Selection";

/// Name used when a selection arrives without one.
pub const UNNAMED_LOCATION: &str = "Selected Location";

/// Name used for a plain map click that did not hit a property.
pub const CUSTOM_LOCATION: &str = "Custom Location";

/// Name to show for a selection, falling back to [`UNNAMED_LOCATION`].
///
/// Only an absent or empty name falls back; whitespace is kept as given.
#[must_use]
pub fn location_name_or_default(name: Option<&str>) -> &str {
    name.filter(|name| !name.is_empty()).unwrap_or(UNNAMED_LOCATION)
}

/// Default map center (New York City).
pub const DEFAULT_COORDINATE: Coordinate = Coordinate::new(-74.006, 40.7128);

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    #[default]
    Map,
    Metrics,
    Risks,
}

impl Tab {
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Map, Self::Metrics, Self::Risks]
    }
}

/// How the risks tab charts the risk factors.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum RiskView {
    #[default]
    Radar,
    PolarArea,
    Table,
}

impl RiskView {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Radar => "Radar",
            Self::PolarArea => "Polar Area",
            Self::Table => "Table",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Radar, Self::PolarArea, Self::Table]
    }
}

/// Overlays the user can switch on and off.
///
/// Parcels are always drawn and have no toggle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LayerToggle {
    Transportation,
    Amenities,
    Competitors,
    RiskFactors,
    RadiusRings,
}

impl LayerToggle {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Transportation => "Transportation",
            Self::Amenities => "Amenities",
            Self::Competitors => "Competitors",
            Self::RiskFactors => "Risk Factors",
            Self::RadiusRings => "Radius Rings",
        }
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Transportation,
            Self::Amenities,
            Self::Competitors,
            Self::RiskFactors,
            Self::RadiusRings,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[allow(clippy::struct_excessive_bools)]
pub struct LayerVisibility {
    pub transportation: bool,
    pub amenities: bool,
    pub competitors: bool,
    pub risk_factors: bool,
    pub radius_rings: bool,
}

impl Default for LayerVisibility {
    fn default() -> Self {
        Self {
            transportation: true,
            amenities: false,
            competitors: false,
            risk_factors: false,
            radius_rings: true,
        }
    }
}

impl LayerVisibility {
    #[must_use]
    pub const fn is_enabled(self, toggle: LayerToggle) -> bool {
        match toggle {
            LayerToggle::Transportation => self.transportation,
            LayerToggle::Amenities => self.amenities,
            LayerToggle::Competitors => self.competitors,
            LayerToggle::RiskFactors => self.risk_factors,
            LayerToggle::RadiusRings => self.radius_rings,
        }
    }

    /// Returns a copy with `toggle` set to `enabled`.
    #[must_use]
    pub const fn with(mut self, toggle: LayerToggle, enabled: bool) -> Self {
        match toggle {
            LayerToggle::Transportation => self.transportation = enabled,
            LayerToggle::Amenities => self.amenities = enabled,
            LayerToggle::Competitors => self.competitors = enabled,
            LayerToggle::RiskFactors => self.risk_factors = enabled,
            LayerToggle::RadiusRings => self.radius_rings = enabled,
        }
        self
    }

    /// Whether features of `layer` should be drawn.
    #[must_use]
    pub const fn shows(self, layer: MapLayer) -> bool {
        match layer {
            MapLayer::Parcels => true,
            MapLayer::Transportation => self.transportation,
            MapLayer::Amenities => self.amenities,
            MapLayer::Competitors => self.competitors,
            MapLayer::RiskFactors => self.risk_factors,
        }
    }
}

/// Radius of the rings drawn around the site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "u32")]
pub enum RadiusMiles {
    #[default]
    One,
    Three,
    Five,
}

impl RadiusMiles {
    #[must_use]
    pub const fn miles(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Five => 5,
        }
    }

    /// Ring diameter in map pixels.
    #[must_use]
    pub const fn ring_diameter_px(self) -> u32 {
        self.miles() * 100
    }

    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::One, Self::Three, Self::Five]
    }
}

impl From<RadiusMiles> for u32 {
    fn from(value: RadiusMiles) -> Self {
        value.miles()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidRadiusError {
    pub miles: u32,
}

impl std::fmt::Display for InvalidRadiusError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invalid radius: {} miles (expected 1, 3 or 5)", self.miles)
    }
}

impl std::error::Error for InvalidRadiusError {}

impl TryFrom<u32> for RadiusMiles {
    type Error = InvalidRadiusError;

    fn try_from(miles: u32) -> Result<Self, Self::Error> {
        match miles {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            _ => Err(InvalidRadiusError { miles }),
        }
    }
}

/// Property popup opened by a map click.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Popup {
    pub name: String,
    pub coordinate: Coordinate,
    /// Click position within the map, each axis in `[0, 1]`.
    pub x_fraction: f64,
    pub y_fraction: f64,
}

/// Loading state of one result panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum Panel<T> {
    Loading,
    Loaded(T),
    /// Holds the generic user-facing message.
    Failed(String),
}

impl<T> Panel<T> {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub const fn loaded(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Loading | Self::Failed(_) => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message.as_str()),
            Self::Loading | Self::Loaded(_) => None,
        }
    }
}

/// Everything the dashboard renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    pub(crate) coordinate: Coordinate,
    pub(crate) location_name: String,
    pub(crate) tab: Tab,
    pub(crate) risk_view: RiskView,
    pub(crate) layers: LayerVisibility,
    pub(crate) radius: RadiusMiles,
    pub(crate) popup: Option<Popup>,
    /// Bumped on every selection; results for older generations are dropped.
    pub(crate) generation: u64,
    pub(crate) location: Panel<LocationBundle>,
    pub(crate) metrics: Panel<MetricsBundle>,
    pub(crate) benchmarks: Panel<BenchmarkBundle>,
    pub(crate) risk: Panel<RiskBundle>,
}

impl DashboardState {
    pub(crate) fn new(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            location_name: INITIAL_LOCATION_NAME.to_string(),
            tab: Tab::default(),
            risk_view: RiskView::default(),
            layers: LayerVisibility::default(),
            radius: RadiusMiles::default(),
            popup: None,
            generation: 0,
            location: Panel::Loading,
            metrics: Panel::Loading,
            benchmarks: Panel::Loading,
            risk: Panel::Loading,
        }
    }

    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    #[must_use]
    pub fn location_name(&self) -> &str {
        &self.location_name
    }

    #[must_use]
    pub const fn tab(&self) -> Tab {
        self.tab
    }

    #[must_use]
    pub const fn risk_view(&self) -> RiskView {
        self.risk_view
    }

    #[must_use]
    pub const fn layers(&self) -> LayerVisibility {
        self.layers
    }

    #[must_use]
    pub const fn radius(&self) -> RadiusMiles {
        self.radius
    }

    #[must_use]
    pub const fn popup(&self) -> Option<&Popup> {
        self.popup.as_ref()
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn location(&self) -> &Panel<LocationBundle> {
        &self.location
    }

    #[must_use]
    pub const fn metrics(&self) -> &Panel<MetricsBundle> {
        &self.metrics
    }

    #[must_use]
    pub const fn benchmarks(&self) -> &Panel<BenchmarkBundle> {
        &self.benchmarks
    }

    #[must_use]
    pub const fn risk(&self) -> &Panel<RiskBundle> {
        &self.risk
    }

    /// Whether any panel is still waiting on a fetch.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.location.is_loading()
            || self.metrics.is_loading()
            || self.benchmarks.is_loading()
            || self.risk.is_loading()
    }

    /// Loading flag for a single bundle kind.
    #[must_use]
    pub const fn is_kind_loading(&self, kind: BundleKind) -> bool {
        match kind {
            BundleKind::Location => self.location.is_loading(),
            BundleKind::Metrics => self.metrics.is_loading(),
            BundleKind::Benchmark => self.benchmarks.is_loading(),
            BundleKind::Risk => self.risk.is_loading(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layers_match_initial_toggles() {
        let layers = LayerVisibility::default();
        let enabled: Vec<_> = LayerToggle::all()
            .iter()
            .filter(|toggle| layers.is_enabled(**toggle))
            .copied()
            .collect();
        assert_eq!(
            enabled,
            [LayerToggle::Transportation, LayerToggle::RadiusRings]
        );
        assert!(layers.shows(MapLayer::Parcels));
        assert!(!layers.shows(MapLayer::Competitors));
    }

    #[test]
    fn with_only_touches_one_layer() {
        let layers = LayerVisibility::default().with(LayerToggle::Amenities, true);
        assert!(layers.amenities);
        assert!(layers.transportation);
        assert!(!layers.competitors);
        assert!(layers.shows(MapLayer::Amenities));
    }

    #[test]
    fn radius_diameters() {
        let diameters: Vec<_> = RadiusMiles::all()
            .iter()
            .map(|r| r.ring_diameter_px())
            .collect();
        assert_eq!(diameters, [100, 300, 500]);
        assert_eq!(RadiusMiles::try_from(3), Ok(RadiusMiles::Three));
        assert_eq!(
            RadiusMiles::try_from(2),
            Err(InvalidRadiusError { miles: 2 })
        );
    }

    #[test]
    fn only_missing_or_empty_names_fall_back() {
        assert_eq!(location_name_or_default(None), UNNAMED_LOCATION);
        assert_eq!(location_name_or_default(Some("")), UNNAMED_LOCATION);
        assert_eq!(location_name_or_default(Some("  ")), "  ");
        assert_eq!(location_name_or_default(Some("Chicago")), "Chicago");
    }

    #[test]
    fn risk_views_parse_from_wire_names() {
        assert_eq!("polarArea".parse::<RiskView>(), Ok(RiskView::PolarArea));
        assert_eq!(RiskView::default(), RiskView::Radar);
        assert_eq!(RiskView::Table.to_string(), "table");
    }

    #[test]
    fn new_state_is_loading_everything() {
        let state = DashboardState::new(DEFAULT_COORDINATE);
        assert_eq!(state.location_name(), INITIAL_LOCATION_NAME);
        assert_eq!(state.tab(), Tab::Map);
        assert_eq!(state.radius(), RadiusMiles::One);
        assert!(state.is_loading());
        for kind in BundleKind::all() {
            assert!(state.is_kind_loading(*kind));
        }
        assert_eq!(state.generation(), 0);
    }

    #[test]
    fn panel_accessors() {
        let loaded: Panel<u32> = Panel::Loaded(3);
        assert_eq!(loaded.loaded(), Some(&3));
        assert_eq!(loaded.error(), None);

        let failed: Panel<u32> = Panel::Failed("boom".to_string());
        assert_eq!(failed.loaded(), None);
        assert_eq!(failed.error(), Some("boom"));
        assert!(!failed.is_loading());
    }

    #[test]
    fn tab_parses_from_wire_name() {
        assert_eq!("risks".parse::<Tab>().unwrap(), Tab::Risks);
        assert_eq!(Tab::Metrics.to_string(), "metrics");
        assert_eq!(
            "riskFactors".parse::<LayerToggle>().unwrap(),
            LayerToggle::RiskFactors
        );
    }
}
