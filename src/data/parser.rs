//! NeoWs feed response parsing
//!
//! Decodes the nested feed JSON (date -> near-Earth objects -> close approach
//! events) into flat `Asteroid` records, keeping only potentially hazardous
//! objects.

use std::collections::HashMap;

use serde::Deserialize;

use super::{
    Asteroid, AsteroidsError, DiameterRange, EstimatedDiameter, MissDistance, RelativeVelocity,
};

/// Top-level feed response
#[derive(Debug, Default, Deserialize)]
struct FeedResponse {
    #[serde(default)]
    near_earth_objects: HashMap<String, Vec<NearEarthObject>>,
}

/// A single object listed under a feed date
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct NearEarthObject {
    id: String,
    name: String,
    nasa_jpl_url: String,
    /// Keyed by unit system ("kilometers", "miles", "meters", "feet")
    estimated_diameter: HashMap<String, DiameterEstimate>,
    is_potentially_hazardous_asteroid: bool,
    close_approach_data: Vec<CloseApproach>,
    is_sentry_object: bool,
}

/// Diameter estimate for one unit system
#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(default)]
struct DiameterEstimate {
    estimated_diameter_min: f64,
    estimated_diameter_max: f64,
}

/// One predicted close pass
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CloseApproach {
    epoch_date_close_approach: i64,
    relative_velocity: ApproachVelocity,
    miss_distance: ApproachDistance,
}

/// Velocities arrive as numeric strings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApproachVelocity {
    kilometers_per_hour: String,
    miles_per_hour: String,
}

/// Distances arrive as numeric strings
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApproachDistance {
    kilometers: String,
    miles: String,
}

/// Parses a raw feed response into hazardous asteroid records
///
/// Order of the returned records follows map iteration and is not meaningful.
///
/// # Returns
/// * `Ok(Vec<Asteroid>)` - Hazardous asteroids, possibly empty
/// * `Err(AsteroidsError::Decode)` - If the body is not JSON of the feed shape
/// * `Err(AsteroidsError::NumericParse)` - If a velocity or distance string is not a number
/// * `Err(AsteroidsError::MalformedEntry)` - If a hazardous object has no close approach data
pub fn parse_asteroids(raw: &[u8]) -> Result<Vec<Asteroid>, AsteroidsError> {
    let response: FeedResponse = serde_json::from_slice(raw)?;

    let mut asteroids = Vec::new();

    for objects in response.near_earth_objects.into_values() {
        for object in objects {
            // Only interested in hazardous ones
            if !object.is_potentially_hazardous_asteroid {
                continue;
            }
            asteroids.push(to_asteroid(object)?);
        }
    }

    Ok(asteroids)
}

/// Flattens a hazardous feed object into an `Asteroid`
fn to_asteroid(object: NearEarthObject) -> Result<Asteroid, AsteroidsError> {
    // Later approaches are ignored
    let approach = object
        .close_approach_data
        .first()
        .ok_or_else(|| AsteroidsError::MalformedEntry {
            id: object.id.clone(),
        })?;

    let relative_velocity = RelativeVelocity {
        kilometers_per_hour: parse_number(
            "relative_velocity.kilometers_per_hour",
            &approach.relative_velocity.kilometers_per_hour,
        )?,
        miles_per_hour: parse_number(
            "relative_velocity.miles_per_hour",
            &approach.relative_velocity.miles_per_hour,
        )?,
    };

    let miss_distance = MissDistance {
        kilometers: parse_number("miss_distance.kilometers", &approach.miss_distance.kilometers)?,
        miles: parse_number("miss_distance.miles", &approach.miss_distance.miles)?,
    };

    let estimated_diameter = EstimatedDiameter {
        kilometers: diameter_range(&object.estimated_diameter, "kilometers"),
        miles: diameter_range(&object.estimated_diameter, "miles"),
    };

    Ok(Asteroid {
        close_approach_timestamp: approach.epoch_date_close_approach,
        id: object.id,
        name: object.name,
        info_url: object.nasa_jpl_url,
        estimated_diameter,
        relative_velocity,
        miss_distance,
        is_sentry_object: object.is_sentry_object,
    })
}

/// Reads one unit system from the diameter map, zero when absent
fn diameter_range(estimates: &HashMap<String, DiameterEstimate>, unit: &str) -> DiameterRange {
    let estimate = estimates.get(unit).copied().unwrap_or_default();
    DiameterRange {
        min: estimate.estimated_diameter_min,
        max: estimate.estimated_diameter_max,
    }
}

/// Parses a numeric string field
fn parse_number(field: &'static str, value: &str) -> Result<f64, AsteroidsError> {
    value
        .parse::<f64>()
        .map_err(|source| AsteroidsError::NumericParse {
            field,
            value: value.to_string(),
            source,
        })
}
