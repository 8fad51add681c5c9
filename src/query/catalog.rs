use std::collections::HashMap;
use std::sync::LazyLock;

use super::builder::TagPredicate;
use crate::domain::Category;

const ARTWORK: &[TagPredicate] = &[
    TagPredicate::tag("artwork", "statue"),
    TagPredicate::tag("artwork", "sculpture"),
];
const HISTORIC: &[TagPredicate] = &[
    TagPredicate::tag("historic", "monument"),
    TagPredicate::tag("historic", "memorial"),
];
const PLACE_OF_WORSHIP: &[TagPredicate] = &[TagPredicate::tag("amenity", "place_of_worship")];
const MUSEUM: &[TagPredicate] = &[TagPredicate::tag("tourism", "museum")];

/// Predicate used for categories the catalog does not know, in lenient mode
pub const ANY_TOURISM: &[TagPredicate] = &[TagPredicate::has("tourism")];

/// Every emitted clause also requires this
pub const NAMED: TagPredicate = TagPredicate::has("name");

static STANDARD: LazyLock<CategoryCatalog> = LazyLock::new(CategoryCatalog::build_standard);

/// Category to tag-predicate translation table.
///
/// Worship categories share one predicate; they are told apart after the
/// fact by the `religion` tag.
#[derive(Debug)]
pub struct CategoryCatalog {
    predicates: HashMap<Category, &'static [TagPredicate]>,
}

impl CategoryCatalog {
    /// The process-wide catalog, built on first use
    pub fn standard() -> &'static CategoryCatalog {
        &STANDARD
    }

    fn build_standard() -> Self {
        let entries: [(Category, &'static [TagPredicate]); 8] = [
            (Category::Statue, ARTWORK),
            (Category::Monument, HISTORIC),
            (Category::Church, PLACE_OF_WORSHIP),
            (Category::Datsan, PLACE_OF_WORSHIP),
            (Category::Mosque, PLACE_OF_WORSHIP),
            (Category::HinduTemple, PLACE_OF_WORSHIP),
            (Category::Museum, MUSEUM),
            (Category::Landmark, ANY_TOURISM),
        ];

        Self {
            predicates: entries.into_iter().collect(),
        }
    }

    /// Predicates for a category; empty for the output-only fallback
    pub fn predicates(&self, category: Category) -> &'static [TagPredicate] {
        self.predicates.get(&category).copied().unwrap_or(&[])
    }
}
