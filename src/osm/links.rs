use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

const OSM_VIEWER: &str = "https://www.openstreetmap.org/";
const YANDEX_MAPS: &str = "https://yandex.ru/maps/";
const YANDEX_PIN_STYLE: &str = "pm2rdm";

pub const DEFAULT_ZOOM: u8 = 16;

/// Everything except unreserved characters and `/`
const NAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/');

/// Builds viewer links for a coordinate at a fixed zoom level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkBuilder {
    pub zoom: u8,
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self { zoom: DEFAULT_ZOOM }
    }
}

impl LinkBuilder {
    pub fn new(zoom: u8) -> Self {
        Self { zoom }
    }

    /// `https://www.openstreetmap.org/?mlat=..&mlon=..#map=zoom/lat/lon`
    pub fn osm_viewer(&self, lat: f64, lon: f64) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(OSM_VIEWER)?;
        url.query_pairs_mut()
            .append_pair("mlat", &lat.to_string())
            .append_pair("mlon", &lon.to_string());
        url.set_fragment(Some(&format!("map={}/{lat}/{lon}", self.zoom)));
        Ok(url)
    }

    /// Yandex Maps link centred on the object, with a pin and `name` as search text
    pub fn yandex_maps(&self, name: &str, lat: f64, lon: f64) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(YANDEX_MAPS)?;
        let text = utf8_percent_encode(name, NAME_ENCODE_SET);
        // commas are literal in ll/pt
        url.set_query(Some(&format!(
            "ll={lon},{lat}&z={zoom}&text={text}&pt={lon},{lat},{YANDEX_PIN_STYLE}",
            zoom = self.zoom
        )));
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_osm_viewer_link() {
        let url = LinkBuilder::default().osm_viewer(59.93, 30.31).unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.openstreetmap.org/?mlat=59.93&mlon=30.31#map=16/59.93/30.31"
        );
    }

    #[test]
    fn test_yandex_link() {
        let url = LinkBuilder::default()
            .yandex_maps("X Museum", 59.93, 30.31)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://yandex.ru/maps/?ll=30.31,59.93&z=16&text=X%20Museum&pt=30.31,59.93,pm2rdm"
        );
    }

    #[test]
    fn test_name_cannot_inject_parameters() {
        let url = LinkBuilder::new(12)
            .yandex_maps("Café & Bar #1 z=3", -1.5, 2.25)
            .unwrap();
        assert_eq!(
            url.query(),
            Some("ll=2.25,-1.5&z=12&text=Caf%C3%A9%20%26%20Bar%20%231%20z%3D3&pt=2.25,-1.5,pm2rdm")
        );
        assert_eq!(url.fragment(), None);
    }

    #[test]
    fn test_cyrillic_name_is_encoded() {
        let url = LinkBuilder::default()
            .yandex_maps("Дацан", 59.95, 30.32)
            .unwrap();
        assert!(url.as_str().contains("text=%D0%94%D0%B0%D1%86%D0%B0%D0%BD&"));
    }
}
