use serde::Serialize;
use std::fmt;

/// Point-of-interest category.
///
/// Everything except `PointOfInterest` can be requested; `PointOfInterest`
/// is only ever produced by classification when no specific rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Statue,
    Monument,
    Church,
    Datsan,
    Mosque,
    HinduTemple,
    Museum,
    Landmark,
    PointOfInterest,
}

impl Category {
    /// All requestable categories, in catalog order
    pub const REQUESTABLE: [Category; 8] = [
        Category::Statue,
        Category::Monument,
        Category::Church,
        Category::Datsan,
        Category::Mosque,
        Category::HinduTemple,
        Category::Museum,
        Category::Landmark,
    ];

    /// Parse a human-facing category name (case-insensitive).
    ///
    /// Accepts the English vocabulary, a few aliases and the Russian names
    /// used by the original tool. Returns `None` for anything else.
    pub fn parse(name: &str) -> Option<Category> {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "statue" | "sculpture" | "статуя" => Some(Category::Statue),
            "monument" | "memorial" | "памятник" => Some(Category::Monument),
            "church" | "церковь" => Some(Category::Church),
            "datsan" | "дацан" => Some(Category::Datsan),
            "mosque" | "мечеть" => Some(Category::Mosque),
            "hindu-temple" | "hindu temple" | "индуистский храм" => {
                Some(Category::HinduTemple)
            }
            "museum" | "музей" => Some(Category::Museum),
            "landmark" | "attraction" | "достопримечательность" => Some(Category::Landmark),
            _ => None,
        }
    }

    /// Map a `religion` tag value to a worship category
    pub fn from_religion_tag(religion: &str) -> Option<Category> {
        match religion.to_lowercase().as_str() {
            "christian" => Some(Category::Church),
            "buddhist" => Some(Category::Datsan),
            "muslim" => Some(Category::Mosque),
            "hindu" => Some(Category::HinduTemple),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Statue => "statue",
            Category::Monument => "monument",
            Category::Church => "church",
            Category::Datsan => "datsan",
            Category::Mosque => "mosque",
            Category::HinduTemple => "hindu temple",
            Category::Museum => "museum",
            Category::Landmark => "landmark",
            Category::PointOfInterest => "point of interest",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parse a list of names, dropping (and logging) anything unrecognized
pub fn parse_categories<S: AsRef<str>>(names: &[S]) -> Vec<Category> {
    let mut categories = Vec::new();
    for name in names {
        match Category::parse(name.as_ref()) {
            Some(c) if !categories.contains(&c) => categories.push(c),
            Some(_) => {}
            None => tracing::debug!(category = name.as_ref(), "ignoring unknown category"),
        }
    }
    categories
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Category::parse("Statue"), Some(Category::Statue));
        assert_eq!(Category::parse("  MUSEUM "), Some(Category::Museum));
        assert_eq!(Category::parse("Hindu Temple"), Some(Category::HinduTemple));
    }

    #[test]
    fn test_parse_russian_vocabulary() {
        assert_eq!(Category::parse("дацан"), Some(Category::Datsan));
        assert_eq!(Category::parse("Музей"), Some(Category::Museum));
        assert_eq!(
            Category::parse("достопримечательность"),
            Some(Category::Landmark)
        );
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(Category::parse("cafe"), None);
        // output-only marker is not requestable
        assert_eq!(Category::parse("point of interest"), None);
    }

    #[test]
    fn test_religion_tag() {
        assert_eq!(Category::from_religion_tag("Christian"), Some(Category::Church));
        assert_eq!(Category::from_religion_tag("buddhist"), Some(Category::Datsan));
        assert_eq!(Category::from_religion_tag("muslim"), Some(Category::Mosque));
        assert_eq!(Category::from_religion_tag("hindu"), Some(Category::HinduTemple));
        assert_eq!(Category::from_religion_tag("jewish"), None);
    }

    #[test]
    fn test_serializes_kebab_case() {
        assert_eq!(
            serde_json::to_value(Category::HinduTemple).unwrap(),
            serde_json::json!("hindu-temple")
        );
        assert_eq!(
            serde_json::to_value(Category::PointOfInterest).unwrap(),
            serde_json::json!("point-of-interest")
        );
    }

    #[test]
    fn test_parse_categories_dedups_and_skips_unknown() {
        let parsed = parse_categories(&["museum", "cafe", "Museum", "statue"]);
        assert_eq!(parsed, vec![Category::Museum, Category::Statue]);
    }
}
