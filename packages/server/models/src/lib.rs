#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the site analysis server.
//!
//! Bundle responses reuse the domain types from
//! `site_analysis_site_models` directly; only query parameters and the
//! envelope types live here.

use std::fmt;

use serde::{Deserialize, Serialize};
use site_analysis_site_models::Coordinate;

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Server version.
    pub version: String,
}

/// Error body returned with any non-2xx status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Query parameters shared by every per-site endpoint.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordinateQueryParams {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
}

impl CoordinateQueryParams {
    /// Converts to a [`Coordinate`].
    ///
    /// Out-of-range values are accepted as-is; only non-finite numbers are
    /// rejected.
    ///
    /// # Errors
    ///
    /// * If either component is NaN or infinite
    pub fn coordinate(self) -> Result<Coordinate, InvalidQueryError> {
        for (field, value) in [("lng", self.lng), ("lat", self.lat)] {
            if !value.is_finite() {
                return Err(InvalidQueryError {
                    field,
                    value: value.to_string(),
                });
            }
        }
        Ok(Coordinate::new(self.lng, self.lat))
    }
}

/// Query parameters for the text report endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryParams {
    /// Longitude in degrees.
    pub lng: f64,
    /// Latitude in degrees.
    pub lat: f64,
    /// Display name for the report header.
    pub name: Option<String>,
}

impl ReportQueryParams {
    /// # Errors
    ///
    /// * If either component is NaN or infinite
    pub fn coordinate(&self) -> Result<Coordinate, InvalidQueryError> {
        CoordinateQueryParams {
            lng: self.lng,
            lat: self.lat,
        }
        .coordinate()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidQueryError {
    pub field: &'static str,
    pub value: String,
}

impl fmt::Display for InvalidQueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {} (must be a finite number)", self.field, self.value)
    }
}

impl std::error::Error for InvalidQueryError {}
