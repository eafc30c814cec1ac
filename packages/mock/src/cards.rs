//! Compile-time registry of metric card metadata.
//!
//! Card labels, data-source attributions and units live in
//! `cards/metric_cards.toml` and are embedded at compile time. The file
//! order is the display order.

use serde::Deserialize;
use site_analysis_site_models::{MetricCard, MetricKey};

const METRIC_CARDS_TOML: &str = include_str!("../cards/metric_cards.toml");

#[derive(Deserialize)]
struct CardFile {
    card: Vec<MetricCard>,
}

/// Returns all metric cards in display order.
///
/// # Panics
///
/// Panics if the embedded TOML is malformed. The file is compiled in, so a
/// parse failure is a development error caught by the tests below.
#[must_use]
pub fn metric_cards() -> Vec<MetricCard> {
    toml::de::from_str::<CardFile>(METRIC_CARDS_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse metric card registry: {e}"))
        .card
}

/// Returns the card for `key`.
#[must_use]
pub fn metric_card(key: MetricKey) -> Option<MetricCard> {
    metric_cards().into_iter().find(|card| card.id == key)
}
