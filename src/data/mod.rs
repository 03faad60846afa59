//! Core data models for the hazardous asteroids service
//!
//! This module contains the asteroid record served to clients, the error type
//! shared by the feed client and response parser, and the submodules that
//! fetch, decode and organize the feed data.

pub mod asteroids;
pub mod feed;
pub mod parser;

pub use asteroids::{AsteroidsDataHandler, AsteroidsSource, CACHE_KEY, CACHE_TTL_MINUTES};
pub use feed::{Feed, NeoWsFeed};
pub use parser::parse_asteroids;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while producing the asteroid list
#[derive(Debug, Error)]
pub enum AsteroidsError {
    /// HTTP request could not be built, sent, or its body read
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Feed answered with something other than 200 OK
    #[error("response status not OK: {0}")]
    UpstreamStatus(u16),

    /// Response body is not JSON of the expected shape
    #[error("Failed to decode feed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A numeric string field could not be parsed as a float
    #[error("Invalid number in field '{field}': '{value}'")]
    NumericParse {
        field: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A hazardous entry lacks close approach data
    #[error("Asteroid {id} has no close approach data")]
    MalformedEntry { id: String },
}

/// A potentially hazardous asteroid as served to clients
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Asteroid {
    /// Feed identifier
    pub id: String,
    /// Designation, e.g. "(2019 AB)"
    pub name: String,
    /// Link to the JPL small body database page
    ///
    /// Served as `info_url`; earlier releases of the service called this
    /// field `nasa_jpl_url`, which is still accepted when deserializing.
    #[serde(alias = "nasa_jpl_url")]
    pub info_url: String,
    /// Size estimate in two unit systems
    pub estimated_diameter: EstimatedDiameter,
    /// Epoch of the first close approach, as supplied by the feed
    pub close_approach_timestamp: i64,
    /// Velocity relative to Earth at close approach
    pub relative_velocity: RelativeVelocity,
    /// Miss distance at close approach
    pub miss_distance: MissDistance,
    /// Whether the object is on the Sentry impact monitoring list
    pub is_sentry_object: bool,
}

/// Estimated diameter range in kilometers and miles
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub kilometers: DiameterRange,
    pub miles: DiameterRange,
}

/// Lower and upper diameter estimates
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DiameterRange {
    pub min: f64,
    pub max: f64,
}

/// Relative velocity at close approach
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RelativeVelocity {
    pub kilometers_per_hour: f64,
    pub miles_per_hour: f64,
}

/// Miss distance at close approach
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MissDistance {
    pub kilometers: f64,
    pub miles: f64,
}
