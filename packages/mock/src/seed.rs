//! Seed derivation.

use site_analysis_site_models::{Coordinate, Seed};

/// Folds a coordinate into its seed: `(lon*10 + lat*10) mod 10`.
///
/// The modulo is floored, so western and southern coordinates still land in
/// `[0, 10)`. (-74.006, 40.7128) sums to about -332.932 and yields a seed of
/// about 7.068, not the truncated -2.932.
#[must_use]
pub fn derive_seed(coordinate: Coordinate) -> Seed {
    Seed::new(coordinate.longitude * 10.0 + coordinate.latitude * 10.0)
}
