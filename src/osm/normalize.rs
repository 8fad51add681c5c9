use serde::Deserialize;
use std::collections::HashSet;

use super::links::LinkBuilder;
use crate::api::Element;
use crate::domain::{Category, NO_ADDRESS, NO_WEBSITE, PoiRecord};
use crate::error::ElementError;

const ADDRESS_KEYS: [&str; 5] = [
    "addr:street",
    "addr:housenumber",
    "addr:city",
    "addr:postcode",
    "addr:country",
];
const WEBSITE_KEYS: [&str; 2] = ["website", "contact:website"];

/// How to label a record whose category was not requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum CategoryFallback {
    /// Keep the category classification produced
    #[default]
    Generic,
    /// Relabel it as the first requested category
    FirstRequested,
}

#[derive(Debug, Clone, Copy)]
pub struct NormalizeOptions {
    /// Drop records whose category is not among the requested ones
    pub strict_category_filter: bool,
    pub fallback: CategoryFallback,
    /// Treat `website=""` like a missing key
    pub empty_website_is_missing: bool,
    pub links: LinkBuilder,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            strict_category_filter: true,
            fallback: CategoryFallback::Generic,
            empty_website_is_missing: true,
            links: LinkBuilder::default(),
        }
    }
}

/// Turn raw Overpass elements into deduplicated, classified records.
///
/// # Algorithm
/// 1. Skip elements without a non-empty `name`
/// 2. Skip names already seen (first occurrence wins, even if it is dropped later)
/// 3. Resolve the coordinate; elements without one are logged and skipped
/// 4. Classify, apply the fallback and the strict filter
/// 5. Assemble address, website and links
pub fn normalize(
    elements: &[Element],
    requested: &[Category],
    options: &NormalizeOptions,
) -> Vec<PoiRecord> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for element in elements {
        let name = match element.tag("name") {
            Some(n) if !n.is_empty() => n,
            _ => continue,
        };

        if !seen.insert(name) {
            tracing::debug!(poi = name, "skipping duplicate name");
            continue;
        }

        match build_record(element, name, requested, options) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => tracing::warn!(poi = name, id = ?element.id, error = %e, "skipping element"),
        }
    }

    records
}

fn build_record(
    element: &Element,
    name: &str,
    requested: &[Category],
    options: &NormalizeOptions,
) -> Result<Option<PoiRecord>, ElementError> {
    let (lat, lon) = element.coordinate()?;

    let mut category = classify(element);
    if options.fallback == CategoryFallback::FirstRequested
        && !requested.contains(&category)
        && let Some(&first) = requested.first()
    {
        category = first;
    }

    if options.strict_category_filter && !requested.contains(&category) {
        tracing::debug!(poi = name, %category, "category not requested");
        return Ok(None);
    }

    Ok(Some(PoiRecord {
        name: name.to_string(),
        category,
        latitude: lat,
        longitude: lon,
        address: format_address(element),
        website: resolve_website(element, options.empty_website_is_missing),
        osm_url: options.links.osm_viewer(lat, lon)?,
        map_url: options.links.yandex_maps(name, lat, lon)?,
    }))
}

/// Classify an element from its tags; first matching rule wins
pub fn classify(element: &Element) -> Category {
    if matches!(element.tag("artwork"), Some("statue" | "sculpture")) {
        return Category::Statue;
    }
    if matches!(element.tag("historic"), Some("monument" | "memorial")) {
        return Category::Monument;
    }
    if element.tag("amenity") == Some("place_of_worship") {
        // unknown religions stay generic rather than falling through to tourism
        return element
            .tag("religion")
            .and_then(Category::from_religion_tag)
            .unwrap_or(Category::PointOfInterest);
    }
    match element.tag("tourism") {
        Some("museum") => Category::Museum,
        Some(_) => Category::Landmark,
        None => Category::PointOfInterest,
    }
}

/// Non-empty address parts in street, number, city, postcode, country order
pub fn format_address(element: &Element) -> String {
    let parts: Vec<&str> = ADDRESS_KEYS
        .iter()
        .filter_map(|key| element.tag(key))
        .filter(|v| !v.is_empty())
        .collect();

    if parts.is_empty() {
        NO_ADDRESS.to_string()
    } else {
        parts.join(", ")
    }
}

pub fn resolve_website(element: &Element, empty_is_missing: bool) -> String {
    WEBSITE_KEYS
        .iter()
        .filter_map(|key| element.tag(key))
        .find(|v| !empty_is_missing || !v.is_empty())
        .unwrap_or(NO_WEBSITE)
        .to_string()
}
