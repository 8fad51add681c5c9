use crate::api::{Transport, fetch_elements};
use crate::config::{DEFAULT_RADIUS, FilterConfig};
use crate::domain::{Category, PoiRecord};
use crate::error::PoiError;
use crate::osm::normalize;
use crate::query::build_query;

/// One nearby search: a centre point, a radius in meters and category names
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub lat: f64,
    pub lon: f64,
    pub radius: i32,
    pub categories: Vec<String>,
}

impl SearchRequest {
    /// Search for every known category within the default radius
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            radius: DEFAULT_RADIUS,
            categories: Category::REQUESTABLE
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
        }
    }

    pub fn with_radius(mut self, radius: i32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_categories<S: Into<String>>(mut self, categories: impl IntoIterator<Item = S>) -> Self {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }
}

/// Run a search, surfacing failures
pub fn try_find_nearby(
    request: &SearchRequest,
    transport: &dyn Transport,
    filter: &FilterConfig,
) -> Result<Vec<PoiRecord>, PoiError> {
    let query = build_query(
        request.lat,
        request.lon,
        request.radius,
        &request.categories,
        &filter.query_options(),
    );
    let elements = fetch_elements(transport, &query)?;

    let requested = filter
        .unknown_categories
        .requested_categories(&request.categories);
    let records = normalize(&elements, &requested, &filter.normalize_options());
    tracing::info!(
        elements = elements.len(),
        records = records.len(),
        "normalized Overpass elements"
    );
    Ok(records)
}

/// Run a search. Any failure is logged and yields an empty list.
pub fn find_nearby(
    request: &SearchRequest,
    transport: &dyn Transport,
    filter: &FilterConfig,
) -> Vec<PoiRecord> {
    match try_find_nearby(request, transport, filter) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, "nearby search failed");
            Vec::new()
        }
    }
}
