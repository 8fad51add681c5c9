use serde::Deserialize;
use std::fmt;

/// Overpass element type a clause selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementType {
    Node,
    Way,
}

impl ElementType {
    fn keyword(self) -> &'static str {
        match self {
            ElementType::Node => "node",
            ElementType::Way => "way",
        }
    }
}

/// A single tag filter: `["key"]` or `["key"="value"]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagPredicate {
    pub key: &'static str,
    pub value: Option<&'static str>,
}

impl TagPredicate {
    pub const fn tag(key: &'static str, value: &'static str) -> Self {
        Self {
            key,
            value: Some(value),
        }
    }

    pub const fn has(key: &'static str) -> Self {
        Self { key, value: None }
    }
}

impl fmt::Display for TagPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.value {
            Some(value) => write!(f, "[{}={}]", quote(self.key), quote(value)),
            None => write!(f, "[{}]", quote(self.key)),
        }
    }
}

/// Overpass QL string literal with `\` and `"` escaped
fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        if ch == '"' || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('"');
    out
}

/// `around` filter. Values go out as given; the server does any validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Around {
    pub radius: i32,
    pub lat: f64,
    pub lon: f64,
}

impl fmt::Display for Around {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(around:{},{},{})", self.radius, self.lat, self.lon)
    }
}

/// One union member, e.g. `node(around:250,59.9,30.3)["tourism"="museum"]["name"]`
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    element: ElementType,
    around: Around,
    predicates: Vec<TagPredicate>,
}

impl Clause {
    pub fn new(element: ElementType, around: Around) -> Self {
        Self {
            element,
            around,
            predicates: Vec::new(),
        }
    }

    pub fn with(mut self, predicate: TagPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.element.keyword(), self.around)?;
        for predicate in &self.predicates {
            write!(f, "{predicate}")?;
        }
        Ok(())
    }
}

/// What the `out` statement asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// `out center;` tags plus a centroid for ways
    #[default]
    Center,
    /// `out body center;` full bodies plus a centroid for ways
    Body,
}

impl OutputMode {
    fn statement(self) -> &'static str {
        match self {
            OutputMode::Center => "out center;",
            OutputMode::Body => "out body center;",
        }
    }
}

/// Finished Overpass QL query text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverpassQuery(String);

impl OverpassQuery {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OverpassQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Collects clauses into a JSON-output union query
#[derive(Debug, Default)]
pub struct QueryBuilder {
    clauses: Vec<Clause>,
    output: OutputMode,
}

impl QueryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn output(mut self, mode: OutputMode) -> Self {
        self.output = mode;
        self
    }

    /// Add a clause unless an identical one is already present
    pub fn push(&mut self, clause: Clause) {
        if !self.clauses.contains(&clause) {
            self.clauses.push(clause);
        }
    }

    pub fn build(self) -> OverpassQuery {
        let mut query = String::from("[out:json];\n(\n");
        for clause in &self.clauses {
            query.push_str("  ");
            query.push_str(&clause.to_string());
            query.push_str(";\n");
        }
        query.push_str(");\n");
        query.push_str(self.output.statement());
        query.push('\n');
        OverpassQuery(query)
    }
}
