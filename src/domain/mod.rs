pub mod category;
pub mod poi;

pub use category::{Category, parse_categories};
pub use poi::{NO_ADDRESS, NO_WEBSITE, PoiRecord};
