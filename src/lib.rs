//! poi-nearby - Find points of interest near a coordinate from OpenStreetMap data

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod osm;
pub mod query;
pub mod search;

pub use domain::{Category, PoiRecord};
pub use error::PoiError;
pub use search::{SearchRequest, find_nearby, try_find_nearby};
