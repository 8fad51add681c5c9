pub mod overpass;

pub use overpass::{
    Center, Element, HttpTransport, OverpassResponse, Transport, fetch_elements, parse_response,
};
