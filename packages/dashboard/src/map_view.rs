//! Map click handling.

use rand::Rng;
use site_analysis_site_models::Coordinate;

use crate::state::Popup;

/// Degrees of longitude and latitude spanned by the visible map.
pub const MAP_SPAN_DEGREES: f64 = 0.1;

/// A click hits a property when the random draw exceeds this.
pub const PROPERTY_HIT_THRESHOLD: f64 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Click landed on a property; show its popup.
    Property(Popup),
    /// Click landed on open ground; analyze that point directly.
    Location(Coordinate),
}

/// Maps a click at `(x_fraction, y_fraction)` of the map to a coordinate.
///
/// The map is centered on `center`, `x` grows eastward and `y` grows
/// southward. Fractions are clamped to `[0, 1]`.
#[must_use]
pub fn click_coordinate(center: Coordinate, x_fraction: f64, y_fraction: f64) -> Coordinate {
    let x = x_fraction.clamp(0.0, 1.0);
    let y = y_fraction.clamp(0.0, 1.0);

    center.offset((x - 0.5) * MAP_SPAN_DEGREES, (0.5 - y) * MAP_SPAN_DEGREES)
}

/// Resolves a map click, drawing from `rng` to decide whether a property
/// was hit and, if so, which number it gets.
pub fn resolve_click<R: Rng>(
    center: Coordinate,
    x_fraction: f64,
    y_fraction: f64,
    rng: &mut R,
) -> ClickOutcome {
    let coordinate = click_coordinate(center, x_fraction, y_fraction);

    if rng.gen_range(0.0..1.0) > PROPERTY_HIT_THRESHOLD {
        let number = property_number(rng.gen_range(0.0..1.0));
        log::debug!("Map click hit Property {number} at {coordinate}");
        ClickOutcome::Property(Popup {
            name: format!("Property {number}"),
            coordinate,
            x_fraction: x_fraction.clamp(0.0, 1.0),
            y_fraction: y_fraction.clamp(0.0, 1.0),
        })
    } else {
        ClickOutcome::Location(coordinate)
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn property_number(draw: f64) -> u32 {
    (draw * 1000.0).floor() as u32
}
