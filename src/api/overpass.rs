use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::OverpassConfig;
use crate::error::{ElementError, PoiError};
use crate::query::OverpassQuery;

pub const OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";
pub const USER_AGENT: &str = concat!("poi-nearby/", env!("CARGO_PKG_VERSION"));

/// Raw Overpass API response
#[derive(Debug, Deserialize)]
pub struct OverpassResponse {
    pub elements: Vec<Element>,
}

/// Centroid Overpass attaches to ways and relations for `out center`
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct Center {
    pub lat: f64,
    pub lon: f64,
}

/// A single element from Overpass (node, way, relation or area)
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    #[serde(rename = "type")]
    pub type_: String,
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub center: Option<Center>,
}

impl Element {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref()?.get(key).map(String::as_str)
    }

    /// Nodes carry their own position, everything else its centroid
    pub fn coordinate(&self) -> Result<(f64, f64), ElementError> {
        let position = if self.type_ == "node" {
            self.lat.zip(self.lon)
        } else {
            self.center.map(|c| (c.lat, c.lon))
        };
        position.ok_or_else(|| ElementError::MissingCoordinate {
            kind: self.type_.clone(),
        })
    }
}

/// Parse a response body
pub fn parse_response(body: &str) -> Result<OverpassResponse, PoiError> {
    Ok(serde_json::from_str(body)?)
}

/// Outbound HTTP seam: sends a query and hands back the raw body
pub trait Transport {
    fn execute(&self, query: &OverpassQuery) -> Result<String, PoiError>;
}

/// Blocking reqwest transport. One POST, no retry.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: String,
}

impl HttpTransport {
    pub fn new(config: &OverpassConfig) -> Result<Self, PoiError> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(
            config
                .user_agent
                .clone()
                .unwrap_or_else(|| USER_AGENT.to_string()),
        );
        // reqwest's blocking client defaults to 30s; no timeout unless configured
        builder = match config.timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder.timeout(None),
        };
        let client = builder.build().map_err(PoiError::Client)?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

impl Transport for HttpTransport {
    fn execute(&self, query: &OverpassQuery) -> Result<String, PoiError> {
        tracing::debug!(url = %self.url, query = query.as_str(), "posting Overpass query");

        // Overpass expects form-encoded POST data: data=<query>
        let response = self
            .client
            .post(&self.url)
            .form(&[("data", query.as_str())])
            .send()
            .map_err(PoiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PoiError::Status(status));
        }

        response.text().map_err(PoiError::Transport)
    }
}

/// Run `query` through `transport` and parse the result
pub fn fetch_elements(
    transport: &dyn Transport,
    query: &OverpassQuery,
) -> Result<Vec<Element>, PoiError> {
    let body = transport.execute(query)?;
    let response = parse_response(&body)?;
    tracing::info!(elements = response.elements.len(), "received Overpass response");
    Ok(response.elements)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_overpass_response() {
        let json = r#"{
            "version": 0.6,
            "elements": [
                {"type": "node", "id": 1, "lat": 59.93, "lon": 30.31, "tags": {"name": "X"}},
                {"type": "way", "id": 2, "center": {"lat": 59.94, "lon": 30.32}, "tags": {"tourism": "museum"}}
            ]
        }"#;

        let response = parse_response(json).unwrap();
        assert_eq!(response.elements.len(), 2);
        assert_eq!(response.elements[0].type_, "node");
        assert_eq!(response.elements[0].tag("name"), Some("X"));
        assert_eq!(response.elements[1].type_, "way");
        assert_eq!(response.elements[1].coordinate(), Ok((59.94, 30.32)));
    }

    #[test]
    fn test_missing_elements_is_malformed() {
        let err = parse_response(r#"{"remark": "runtime error"}"#).unwrap_err();
        assert!(matches!(err, PoiError::MalformedResponse(_)));
    }

    #[test]
    fn test_wrong_shaped_tags_is_malformed() {
        let json = r#"{"elements": [{"type": "node", "lat": 1, "lon": 2, "tags": {"name": 5}}]}"#;
        assert!(matches!(
            parse_response(json),
            Err(PoiError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_node_coordinate() {
        let json = r#"{"type": "node", "lat": 59.93, "lon": 30.31}"#;
        let element: Element = serde_json::from_str(json).unwrap();
        assert_eq!(element.coordinate(), Ok((59.93, 30.31)));
        assert_eq!(element.tag("name"), None);
    }

    #[test]
    fn test_area_and_relation_use_center() {
        for kind in ["area", "relation"] {
            let json = format!(
                r#"{{"type": "{kind}", "id": 7, "center": {{"lat": 59.95, "lon": 30.32}},
                    "tags": {{"name": "Park"}}}}"#
            );
            let element: Element = serde_json::from_str(&json).unwrap();
            assert_eq!(element.coordinate(), Ok((59.95, 30.32)), "{kind}");
        }

        let bare: Element = serde_json::from_str(r#"{"type": "relation", "lat": 1, "lon": 2}"#).unwrap();
        assert_eq!(
            bare.coordinate(),
            Err(ElementError::MissingCoordinate {
                kind: "relation".to_string()
            })
        );
    }

    #[test]
    fn test_missing_coordinate() {
        for json in [
            r#"{"type": "node", "lat": 59.93}"#,
            r#"{"type": "way", "lat": 59.93, "lon": 30.31}"#,
        ] {
            let element: Element = serde_json::from_str(json).unwrap();
            assert!(matches!(
                element.coordinate(),
                Err(ElementError::MissingCoordinate { .. })
            ));
        }
    }

    #[test]
    fn test_http_transport_connection_failure() {
        let config = OverpassConfig {
            url: "http://127.0.0.1:1/api/interpreter".to_string(),
            timeout_secs: Some(5),
            user_agent: None,
        };
        let transport = HttpTransport::new(&config).unwrap();
        let query = crate::query::QueryBuilder::new().build();
        let err = fetch_elements(&transport, &query).unwrap_err();
        assert!(matches!(err, PoiError::Transport(_)));
    }
}
