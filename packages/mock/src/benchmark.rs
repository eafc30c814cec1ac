//! Submarket and national benchmark comparisons.

use site_analysis_site_models::{Benchmark, BenchmarkBundle, Coordinate, Seed};

use crate::format::{currency, floor_count, floor_score, group_thousands, percent};
use crate::seed::derive_seed;

/// Generates the four benchmark rows for `coordinate`.
#[must_use]
pub fn generate_benchmark_bundle(coordinate: Coordinate) -> BenchmarkBundle {
    benchmarks_for_seed(derive_seed(coordinate))
}

/// Generates the four benchmark rows for an already derived seed.
#[must_use]
pub fn benchmarks_for_seed(seed: Seed) -> BenchmarkBundle {
    let s = seed.value();

    BenchmarkBundle {
        benchmarks: vec![
            benchmark(
                "Rent per Sq Ft",
                currency(12.5 + s * 0.8),
                "sq ft/yr",
                (60.0 + s * 4.0, 50.0 + s * 5.0),
            ),
            benchmark(
                "Vacancy Rate",
                percent(4.0 + s * 0.5, 1),
                "",
                (70.0 + s * 3.0, 65.0 + s * 3.5),
            ),
            benchmark(
                "Cap Rate",
                percent(5.2 + s * 0.3, 2),
                "",
                (55.0 + s * 4.5, 45.0 + s * 5.5),
            ),
            benchmark(
                "Traffic Count",
                group_thousands(floor_count(15_000.0 + s * 2_000.0)),
                "daily",
                (50.0 + s * 5.0, 40.0 + s * 6.0),
            ),
        ],
    }
}

fn benchmark(name: &str, value: String, unit: &str, percentiles: (f64, f64)) -> Benchmark {
    Benchmark {
        name: name.to_string(),
        value,
        unit: unit.to_string(),
        market_percentile: floor_score(percentiles.0),
        national_percentile: floor_score(percentiles.1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bundle: &BenchmarkBundle, name: &str) -> Benchmark {
        bundle
            .benchmarks
            .iter()
            .find(|b| b.name == name)
            .cloned()
            .unwrap_or_else(|| panic!("missing benchmark {name}"))
    }

    #[test]
    fn four_rows_in_fixed_order() {
        let bundle = generate_benchmark_bundle(Coordinate::new(2.35, 48.85));
        let names: Vec<_> = bundle.benchmarks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(
            names,
            ["Rent per Sq Ft", "Vacancy Rate", "Cap Rate", "Traffic Count"]
        );
        assert!(!bundle.is_empty());
    }

    #[test]
    fn new_york_rows() {
        let bundle = generate_benchmark_bundle(Coordinate::new(-74.006, 40.7128));

        let rent = row(&bundle, "Rent per Sq Ft");
        assert_eq!(rent.value, "$18.15");
        assert_eq!(rent.unit, "sq ft/yr");
        assert_eq!((rent.market_percentile, rent.national_percentile), (88, 85));

        let vacancy = row(&bundle, "Vacancy Rate");
        assert_eq!(vacancy.value, "7.5%");
        assert_eq!(vacancy.unit, "");
        assert_eq!(
            (vacancy.market_percentile, vacancy.national_percentile),
            (91, 89)
        );

        let cap = row(&bundle, "Cap Rate");
        assert_eq!(cap.value, "7.32%");
        assert_eq!((cap.market_percentile, cap.national_percentile), (86, 83));

        let traffic = row(&bundle, "Traffic Count");
        assert_eq!(traffic.value, "29,136");
        assert_eq!(traffic.unit, "daily");
        assert_eq!(
            (traffic.market_percentile, traffic.national_percentile),
            (85, 82)
        );
    }

    #[test]
    fn zero_seed_rows() {
        let bundle = benchmarks_for_seed(Seed::new(0.0));
        assert_eq!(row(&bundle, "Rent per Sq Ft").value, "$12.50");
        assert_eq!(row(&bundle, "Vacancy Rate").value, "4.0%");
        assert_eq!(row(&bundle, "Cap Rate").value, "5.20%");
        assert_eq!(row(&bundle, "Traffic Count").value, "15,000");
        assert_eq!(row(&bundle, "Traffic Count").national_percentile, 40);
    }

    #[test]
    fn tie_values_round_up() {
        let bundle = benchmarks_for_seed(Seed::new(2.5));
        assert_eq!(row(&bundle, "Vacancy Rate").value, "5.3%");
        assert_eq!(row(&bundle, "Rent per Sq Ft").value, "$14.50");
        assert_eq!(row(&bundle, "Cap Rate").value, "5.95%");
    }

    #[test]
    fn percentiles_stay_below_one_hundred() {
        let bundle = benchmarks_for_seed(Seed::new(9.999_999));
        for b in &bundle.benchmarks {
            assert!(b.market_percentile < 100, "{}", b.name);
            assert!(b.national_percentile < 100, "{}", b.name);
        }
    }

    #[test]
    fn serializes_camel_case() {
        let bundle = benchmarks_for_seed(Seed::new(0.0));
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["benchmarks"][0]["marketPercentile"], 60);
        assert_eq!(json["benchmarks"][0]["nationalPercentile"], 50);
    }
}
