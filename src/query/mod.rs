pub mod builder;
pub mod catalog;

use serde::Deserialize;

pub use builder::{Around, Clause, ElementType, OutputMode, OverpassQuery, QueryBuilder, TagPredicate};
pub use catalog::CategoryCatalog;

use crate::domain::{Category, parse_categories};

/// What to do with a requested category name the catalog does not know
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownCategoryPolicy {
    /// Contribute no clauses
    #[default]
    Skip,
    /// Match anything carrying a `tourism` tag
    AnyTourism,
}

impl UnknownCategoryPolicy {
    /// Categories to keep after classification for the given request names.
    ///
    /// With `AnyTourism`, an unknown name pulls in every `tourism` element, so
    /// the categories those classify as (museum, landmark) count as requested.
    pub fn requested_categories<S: AsRef<str>>(self, names: &[S]) -> Vec<Category> {
        let mut requested = parse_categories(names);
        let has_unknown = names
            .iter()
            .any(|name| Category::parse(name.as_ref()).is_none());

        if self == UnknownCategoryPolicy::AnyTourism && has_unknown {
            for category in [Category::Museum, Category::Landmark] {
                if !requested.contains(&category) {
                    requested.push(category);
                }
            }
        }
        requested
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryOptions {
    pub unknown_categories: UnknownCategoryPolicy,
    pub output: OutputMode,
}

/// Build the Overpass QL query for `categories` around `(lat, lon)`.
///
/// Each catalog predicate becomes one node clause and one way clause, both
/// requiring a `name` tag. A predicate shared by several requested categories
/// (the worship places) is emitted once. Coordinates and radius are not
/// validated.
pub fn build_query<S: AsRef<str>>(
    lat: f64,
    lon: f64,
    radius: i32,
    categories: &[S],
    options: &QueryOptions,
) -> OverpassQuery {
    let catalog = CategoryCatalog::standard();
    let around = Around { radius, lat, lon };
    let mut builder = QueryBuilder::new().output(options.output);

    for name in categories {
        let predicates = match Category::parse(name.as_ref()) {
            Some(category) => catalog.predicates(category),
            None => match options.unknown_categories {
                UnknownCategoryPolicy::Skip => {
                    tracing::debug!(category = name.as_ref(), "unknown category, no clauses");
                    &[]
                }
                UnknownCategoryPolicy::AnyTourism => {
                    tracing::debug!(
                        category = name.as_ref(),
                        "unknown category, matching any tourism tag"
                    );
                    catalog::ANY_TOURISM
                }
            },
        };

        for element in [ElementType::Node, ElementType::Way] {
            for predicate in predicates {
                builder.push(
                    Clause::new(element, around)
                        .with(*predicate)
                        .with(catalog::NAMED),
                );
            }
        }
    }

    builder.build()
}
