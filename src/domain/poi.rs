use serde::Serialize;
use url::Url;

use super::Category;

pub const NO_ADDRESS: &str = "no address available";
pub const NO_WEBSITE: &str = "no website";

/// A named point of interest with its resolved category and links
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PoiRecord {
    pub name: String,
    pub category: Category,
    pub latitude: f64,
    pub longitude: f64,
    pub address: String,
    pub website: String,
    /// openstreetmap.org viewer centred on the object
    pub osm_url: Url,
    /// Yandex Maps link with a pin and the name as search text
    pub map_url: Url,
}
