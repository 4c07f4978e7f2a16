//! stormcheck - Check a location against convective outlook hazard areas

pub mod api;
pub mod config;
pub mod domain;
pub mod geometry;
pub mod kml;
pub mod report;
