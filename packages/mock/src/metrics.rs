//! Metric card values and statuses.

use site_analysis_site_models::{
    Coordinate, MetricKey, MetricReading, MetricStatus, MetricValue, MetricsBundle, Seed,
};

use crate::format::{floor_count, to_fixed};
use crate::seed::derive_seed;

/// Generates the nine metric readings for `coordinate`.
#[must_use]
pub fn generate_metrics_bundle(coordinate: Coordinate) -> MetricsBundle {
    metrics_for_seed(derive_seed(coordinate))
}

/// Generates the nine metric readings for an already derived seed.
#[must_use]
pub fn metrics_for_seed(seed: Seed) -> MetricsBundle {
    MetricKey::all()
        .iter()
        .map(|key| (*key, reading(*key, seed.value())))
        .collect()
}

fn reading(key: MetricKey, s: f64) -> MetricReading {
    let (value, status) = match key {
        MetricKey::Highway => (fixed(1.2 + s * 0.3), lower_is_better(s, 3.0, 7.0)),
        MetricKey::Income => (count(65_000.0 + s * 2_000.0), higher_is_better(s, 5.0, 2.0)),
        MetricKey::Flood => (count(10.0 + s * 8.0), lower_is_better(s, 4.0, 8.0)),
        MetricKey::Population => (count(12_000.0 + s * 1_000.0), MetricStatus::Neutral),
        MetricKey::Traffic => (count(15_000.0 + s * 2_000.0), good_or_warning(s, 5.0)),
        MetricKey::Crime => (count(20.0 + s * 7.0), lower_is_better(s, 3.0, 7.0)),
        MetricKey::Zoning => {
            let zoning = if s < 5.0 { "Industrial" } else { "Mixed-Use" };
            (MetricValue::Text(zoning.to_string()), MetricStatus::Neutral)
        }
        MetricKey::Airport => (fixed(8.5 + s * 0.5), good_or_warning(s, 5.0)),
        MetricKey::Environmental => (count(15.0 + s * 8.0), lower_is_better(s, 4.0, 8.0)),
    };

    MetricReading { value, status }
}

fn fixed(value: f64) -> MetricValue {
    MetricValue::Text(to_fixed(value, 1))
}

fn count(value: f64) -> MetricValue {
    MetricValue::Count(floor_count(value))
}

/// Good below `good_below`, warning below `warning_below`, else bad.
fn lower_is_better(s: f64, good_below: f64, warning_below: f64) -> MetricStatus {
    if s < good_below {
        MetricStatus::Good
    } else if s < warning_below {
        MetricStatus::Warning
    } else {
        MetricStatus::Bad
    }
}

/// Good above `good_above`, warning above `warning_above`, else bad.
fn higher_is_better(s: f64, good_above: f64, warning_above: f64) -> MetricStatus {
    if s > good_above {
        MetricStatus::Good
    } else if s > warning_above {
        MetricStatus::Warning
    } else {
        MetricStatus::Bad
    }
}

fn good_or_warning(s: f64, good_below: f64) -> MetricStatus {
    if s < good_below {
        MetricStatus::Good
    } else {
        MetricStatus::Warning
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn status(bundle: &MetricsBundle, key: MetricKey) -> MetricStatus {
        bundle.get(key).unwrap().status
    }

    fn value(bundle: &MetricsBundle, key: MetricKey) -> MetricValue {
        bundle.get(key).unwrap().value.clone()
    }

    #[test]
    fn always_returns_all_nine_keys() {
        for coord in [
            Coordinate::new(-74.006, 40.7128),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(151.2093, -33.8688),
        ] {
            let bundle = generate_metrics_bundle(coord);
            assert_eq!(bundle.len(), 9);
            let keys: Vec<_> = bundle.iter().map(|(key, _)| key).collect();
            assert_eq!(keys, MetricKey::all());
        }
    }

    #[test]
    fn new_york_values() {
        let bundle = generate_metrics_bundle(Coordinate::new(-74.006, 40.7128));

        assert_eq!(value(&bundle, MetricKey::Highway), MetricValue::Text("3.3".into()));
        assert_eq!(status(&bundle, MetricKey::Highway), MetricStatus::Bad);
        assert_eq!(value(&bundle, MetricKey::Income), MetricValue::Count(79_136));
        assert_eq!(status(&bundle, MetricKey::Income), MetricStatus::Good);
        assert_eq!(value(&bundle, MetricKey::Flood), MetricValue::Count(66));
        assert_eq!(status(&bundle, MetricKey::Flood), MetricStatus::Warning);
        assert_eq!(value(&bundle, MetricKey::Population), MetricValue::Count(19_068));
        assert_eq!(value(&bundle, MetricKey::Traffic), MetricValue::Count(29_136));
        assert_eq!(status(&bundle, MetricKey::Traffic), MetricStatus::Warning);
        assert_eq!(value(&bundle, MetricKey::Crime), MetricValue::Count(69));
        assert_eq!(status(&bundle, MetricKey::Crime), MetricStatus::Bad);
        assert_eq!(
            value(&bundle, MetricKey::Zoning),
            MetricValue::Text("Mixed-Use".into())
        );
        assert_eq!(value(&bundle, MetricKey::Airport), MetricValue::Text("12.0".into()));
        assert_eq!(status(&bundle, MetricKey::Airport), MetricStatus::Warning);
        assert_eq!(value(&bundle, MetricKey::Environmental), MetricValue::Count(71));
        assert_eq!(status(&bundle, MetricKey::Environmental), MetricStatus::Warning);
    }

    #[test]
    fn zero_seed_values() {
        let bundle = metrics_for_seed(Seed::new(0.0));

        assert_eq!(value(&bundle, MetricKey::Highway), MetricValue::Text("1.2".into()));
        assert_eq!(value(&bundle, MetricKey::Income), MetricValue::Count(65_000));
        assert_eq!(status(&bundle, MetricKey::Income), MetricStatus::Bad);
        assert_eq!(
            value(&bundle, MetricKey::Zoning),
            MetricValue::Text("Industrial".into())
        );
        assert_eq!(value(&bundle, MetricKey::Airport), MetricValue::Text("8.5".into()));
        for key in [
            MetricKey::Highway,
            MetricKey::Flood,
            MetricKey::Traffic,
            MetricKey::Crime,
            MetricKey::Airport,
            MetricKey::Environmental,
        ] {
            assert_eq!(status(&bundle, key), MetricStatus::Good, "{key}");
        }
    }

    #[test]
    fn exact_ties_round_up_like_to_fixed() {
        // seed 2.5: airport = 9.75 exactly.
        let bundle = metrics_for_seed(Seed::new(2.5));
        assert_eq!(value(&bundle, MetricKey::Airport), MetricValue::Text("9.8".into()));
        assert_eq!(value(&bundle, MetricKey::Highway), MetricValue::Text("1.9".into()));
    }

    #[test]
    fn thresholds_are_strict() {
        let at_three = metrics_for_seed(Seed::new(3.0));
        assert_eq!(status(&at_three, MetricKey::Highway), MetricStatus::Warning);
        assert_eq!(status(&at_three, MetricKey::Crime), MetricStatus::Warning);

        let at_two = metrics_for_seed(Seed::new(2.0));
        assert_eq!(status(&at_two, MetricKey::Income), MetricStatus::Bad);

        let at_five = metrics_for_seed(Seed::new(5.0));
        assert_eq!(status(&at_five, MetricKey::Income), MetricStatus::Warning);
        assert_eq!(status(&at_five, MetricKey::Traffic), MetricStatus::Warning);
        assert_eq!(
            value(&at_five, MetricKey::Zoning),
            MetricValue::Text("Mixed-Use".into())
        );
    }

    #[test]
    fn extremes_cover_every_status_branch() {
        let mut seen: BTreeSet<(MetricKey, MetricStatus)> = BTreeSet::new();
        for raw in [0.0, 2.5, 3.5, 5.5, 7.5, 9.999] {
            for (key, reading) in metrics_for_seed(Seed::new(raw)).iter() {
                seen.insert((key, reading.status));
            }
        }

        for key in [
            MetricKey::Highway,
            MetricKey::Income,
            MetricKey::Flood,
            MetricKey::Crime,
            MetricKey::Environmental,
        ] {
            for expected in [MetricStatus::Good, MetricStatus::Warning, MetricStatus::Bad] {
                assert!(seen.contains(&(key, expected)), "{key} never hit {expected}");
            }
        }
        for key in [MetricKey::Traffic, MetricKey::Airport] {
            assert!(seen.contains(&(key, MetricStatus::Good)));
            assert!(seen.contains(&(key, MetricStatus::Warning)));
        }
        for key in [MetricKey::Population, MetricKey::Zoning] {
            assert!(seen.contains(&(key, MetricStatus::Neutral)));
        }
    }
}
