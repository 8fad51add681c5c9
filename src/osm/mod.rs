pub mod links;
pub mod normalize;

pub use links::LinkBuilder;
pub use normalize::{CategoryFallback, NormalizeOptions, classify, normalize};
