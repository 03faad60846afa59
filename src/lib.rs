//! Potentially Hazardous Asteroids library
//!
//! Fetches the NASA NeoWs feed, keeps the raw response in a short-lived
//! cache, and turns it into a sorted list of hazardous asteroids served over
//! HTTP.

pub mod cache;
pub mod cli;
pub mod config;
pub mod data;
pub mod server;
