//! Mock `GeoJSON` layers around a site.
//!
//! Geometry is a fixed offset table applied to the input coordinate; the
//! property text never varies with the seed.

use geojson::{Feature, FeatureCollection, Geometry, JsonObject, JsonValue, Value};
use site_analysis_site_models::{Coordinate, LocationBundle};

/// A point feature placed at a fixed offset from the site.
struct PointTemplate {
    id: u32,
    name: &'static str,
    offset: (f64, f64),
    /// Descriptive property as `(key, value)`, e.g. `("size", "250,000 sqft")`.
    detail: (&'static str, &'static str),
}

/// A two-vertex line running between two offsets.
struct LineTemplate {
    id: u32,
    name: &'static str,
    from: (f64, f64),
    to: (f64, f64),
    kind: &'static str,
}

/// An axis-aligned square zone spanning `min..max` offsets on both axes.
struct ZoneTemplate {
    id: u32,
    name: &'static str,
    min: (f64, f64),
    max: (f64, f64),
    risk: &'static str,
}

const PARCELS: [PointTemplate; 3] = [
    PointTemplate {
        id: 1,
        name: "Main Property",
        offset: (0.0, 0.0),
        detail: ("size", "250,000 sqft"),
    },
    PointTemplate {
        id: 2,
        name: "Adjacent Property",
        offset: (0.01, 0.005),
        detail: ("size", "180,000 sqft"),
    },
    PointTemplate {
        id: 3,
        name: "Nearby Property",
        offset: (-0.008, -0.003),
        detail: ("size", "120,000 sqft"),
    },
];

const TRANSPORTATION: [LineTemplate; 2] = [
    LineTemplate {
        id: 1,
        name: "Main Highway",
        from: (-0.02, -0.01),
        to: (0.02, 0.01),
        kind: "highway",
    },
    LineTemplate {
        id: 2,
        name: "Secondary Road",
        from: (-0.015, 0.015),
        to: (0.015, -0.015),
        kind: "road",
    },
];

const AMENITIES: [PointTemplate; 3] = [
    PointTemplate {
        id: 1,
        name: "Shopping Center",
        offset: (0.015, 0.01),
        detail: ("type", "retail"),
    },
    PointTemplate {
        id: 2,
        name: "School",
        offset: (-0.012, 0.008),
        detail: ("type", "education"),
    },
    PointTemplate {
        id: 3,
        name: "Transit Station",
        offset: (0.008, -0.012),
        detail: ("type", "transportation"),
    },
];

const COMPETITORS: [PointTemplate; 2] = [
    PointTemplate {
        id: 1,
        name: "Competitor A",
        offset: (0.02, -0.02),
        detail: ("size", "300,000 sqft"),
    },
    PointTemplate {
        id: 2,
        name: "Competitor B",
        offset: (-0.025, 0.015),
        detail: ("size", "220,000 sqft"),
    },
];

const RISK_ZONES: [ZoneTemplate; 2] = [
    ZoneTemplate {
        id: 1,
        name: "Flood Zone",
        min: (-0.02, -0.02),
        max: (-0.01, -0.01),
        risk: "high",
    },
    ZoneTemplate {
        id: 2,
        name: "Contamination Area",
        min: (0.01, 0.01),
        max: (0.02, 0.02),
        risk: "medium",
    },
];

/// Builds the five map layers around `coordinate`.
///
/// Always yields 3 parcels, 2 transportation lines, 3 amenities, 2
/// competitors and 2 risk-factor polygons.
#[must_use]
pub fn generate_location_bundle(coordinate: Coordinate) -> LocationBundle {
    LocationBundle {
        parcels: collection(PARCELS.iter().map(|t| point_feature(coordinate, t))),
        transportation: collection(TRANSPORTATION.iter().map(|t| line_feature(coordinate, t))),
        amenities: collection(AMENITIES.iter().map(|t| point_feature(coordinate, t))),
        competitors: collection(COMPETITORS.iter().map(|t| point_feature(coordinate, t))),
        risk_factors: collection(RISK_ZONES.iter().map(|t| zone_feature(coordinate, t))),
    }
}

fn collection(features: impl Iterator<Item = Feature>) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: features.collect(),
        foreign_members: None,
    }
}

fn point_feature(site: Coordinate, template: &PointTemplate) -> Feature {
    let position = site.offset(template.offset.0, template.offset.1).position();
    feature(
        Value::Point(position),
        properties(template.id, template.name, template.detail),
    )
}

fn line_feature(site: Coordinate, template: &LineTemplate) -> Feature {
    let line = vec![
        site.offset(template.from.0, template.from.1).position(),
        site.offset(template.to.0, template.to.1).position(),
    ];
    feature(
        Value::LineString(line),
        properties(template.id, template.name, ("type", template.kind)),
    )
}

fn zone_feature(site: Coordinate, template: &ZoneTemplate) -> Feature {
    let (x0, y0) = template.min;
    let (x1, y1) = template.max;
    let ring = [(x0, y0), (x0, y1), (x1, y1), (x1, y0), (x0, y0)]
        .into_iter()
        .map(|(dx, dy)| site.offset(dx, dy).position())
        .collect();
    feature(
        Value::Polygon(vec![ring]),
        properties(template.id, template.name, ("risk", template.risk)),
    )
}

fn feature(value: Value, properties: JsonObject) -> Feature {
    Feature {
        bbox: None,
        geometry: Some(Geometry::new(value)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn properties(id: u32, name: &str, detail: (&str, &str)) -> JsonObject {
    let mut props = JsonObject::new();
    props.insert("id".to_string(), JsonValue::from(id));
    props.insert("name".to_string(), JsonValue::from(name));
    props.insert(detail.0.to_string(), JsonValue::from(detail.1));
    props
}

#[cfg(test)]
mod tests {
    use super::*;
    use site_analysis_site_models::MapLayer;

    fn names(collection: &FeatureCollection) -> Vec<&str> {
        collection
            .features
            .iter()
            .filter_map(|f| f.property("name").and_then(JsonValue::as_str))
            .collect()
    }

    #[test]
    fn layer_counts_are_fixed() {
        for coord in [
            Coordinate::new(-74.006, 40.7128),
            Coordinate::new(0.0, 0.0),
            Coordinate::new(179.99, -89.99),
            Coordinate::new(500.0, 500.0),
        ] {
            let bundle = generate_location_bundle(coord);
            assert_eq!(bundle.parcels.features.len(), 3);
            assert_eq!(bundle.transportation.features.len(), 2);
            assert_eq!(bundle.amenities.features.len(), 3);
            assert_eq!(bundle.competitors.features.len(), 2);
            assert_eq!(bundle.risk_factors.features.len(), 2);
            assert_eq!(bundle.feature_count(), 12);
        }
    }

    #[test]
    fn parcel_offsets_follow_table() {
        let bundle = generate_location_bundle(Coordinate::new(10.0, 20.0));
        let geometry = bundle.parcels.features[1].geometry.as_ref().unwrap();
        assert_eq!(
            geometry.value,
            Value::Point(vec![10.0 + 0.01, 20.0 + 0.005])
        );
        assert_eq!(
            names(&bundle.parcels),
            ["Main Property", "Adjacent Property", "Nearby Property"]
        );
    }

    #[test]
    fn transportation_lines_have_two_vertices() {
        let bundle = generate_location_bundle(Coordinate::new(1.0, 2.0));
        for feature in &bundle.transportation.features {
            let Some(Value::LineString(line)) = feature.geometry.as_ref().map(|g| &g.value) else {
                panic!("expected LineString geometry");
            };
            assert_eq!(line.len(), 2);
        }
        assert_eq!(
            bundle.transportation.features[0].property("type"),
            Some(&JsonValue::from("highway"))
        );
    }

    #[test]
    fn risk_polygons_are_closed_rings() {
        let bundle = generate_location_bundle(Coordinate::new(-3.0, 4.0));
        for feature in &bundle.layer(MapLayer::RiskFactors).features {
            let Some(Value::Polygon(rings)) = feature.geometry.as_ref().map(|g| &g.value) else {
                panic!("expected Polygon geometry");
            };
            assert_eq!(rings.len(), 1);
            assert_eq!(rings[0].len(), 5);
            assert_eq!(rings[0].first(), rings[0].last());
        }
        assert_eq!(
            names(&bundle.risk_factors),
            ["Flood Zone", "Contamination Area"]
        );
        assert_eq!(
            bundle.risk_factors.features[0].property("risk"),
            Some(&JsonValue::from("high"))
        );
    }

    #[test]
    fn properties_carry_numeric_ids() {
        let bundle = generate_location_bundle(Coordinate::new(0.0, 0.0));
        let ids: Vec<_> = bundle
            .amenities
            .features
            .iter()
            .filter_map(|f| f.property("id").and_then(JsonValue::as_u64))
            .collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[test]
    fn serializes_as_geojson() {
        let bundle = generate_location_bundle(Coordinate::new(0.0, 0.0));
        let json = serde_json::to_value(&bundle).unwrap();
        assert_eq!(json["riskFactors"]["type"], "FeatureCollection");
        assert_eq!(json["parcels"]["features"][0]["geometry"]["type"], "Point");
        assert_eq!(
            json["competitors"]["features"][1]["properties"]["size"],
            "220,000 sqft"
        );
    }
}
