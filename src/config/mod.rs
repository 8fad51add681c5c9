use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::api::overpass::OVERPASS_URL;
use crate::error::ConfigError;
use crate::osm::{CategoryFallback, LinkBuilder, NormalizeOptions};
use crate::osm::links::DEFAULT_ZOOM;
use crate::query::{OutputMode, QueryOptions, UnknownCategoryPolicy};

pub const DEFAULT_RADIUS: i32 = 1000;

/// How the CLI prints records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Outcome of searching the default config locations
#[derive(Debug, Default)]
pub struct ConfigSearch {
    pub config: Option<FileConfig>,
    /// Where `config` came from
    pub path: Option<PathBuf>,
    /// Files found but not parseable, in search order
    pub skipped: Vec<ConfigError>,
}

#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub radius: Option<i32>,
    #[serde(default)]
    pub categories: Option<Vec<String>>,
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub overpass: Option<OverpassConfig>,
    #[serde(default)]
    pub filter: Option<FilterConfig>,
}

fn default_overpass_url() -> String {
    OVERPASS_URL.to_string()
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OverpassConfig {
    #[serde(default = "default_overpass_url")]
    pub url: String,
    /// Unset means wait for as long as the server takes
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub user_agent: Option<String>,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            url: default_overpass_url(),
            timeout_secs: None,
            user_agent: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

/// Query and normalization behaviour where the two historical variants of
/// the tool disagreed
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FilterConfig {
    #[serde(default = "default_true")]
    pub strict_category_filter: bool,
    #[serde(default)]
    pub unknown_categories: UnknownCategoryPolicy,
    #[serde(default)]
    pub fallback: CategoryFallback,
    #[serde(default = "default_true")]
    pub empty_website_is_missing: bool,
    #[serde(default)]
    pub output_mode: OutputMode,
    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            strict_category_filter: true,
            unknown_categories: UnknownCategoryPolicy::default(),
            fallback: CategoryFallback::default(),
            empty_website_is_missing: true,
            output_mode: OutputMode::default(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl FilterConfig {
    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            unknown_categories: self.unknown_categories,
            output: self.output_mode,
        }
    }

    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            strict_category_filter: self.strict_category_filter,
            fallback: self.fallback,
            empty_website_is_missing: self.empty_website_is_missing,
            links: LinkBuilder::new(self.zoom),
        }
    }
}

impl FileConfig {
    /// Load the first parseable config from the default search paths.
    ///
    /// Files that exist but fail to parse are skipped and handed back so the
    /// caller can report them once logging is set up.
    pub fn load() -> ConfigSearch {
        Self::load_from(&get_config_paths())
    }

    pub fn load_from(paths: &[PathBuf]) -> ConfigSearch {
        let mut search = ConfigSearch::default();

        for path in paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        search.config = Some(config);
                        search.path = Some(path.clone());
                        break;
                    }
                    Err(source) => search.skipped.push(ConfigError::Parse {
                        path: path.clone(),
                        source,
                    }),
                }
            }
        }
        search
    }

    /// Load an explicitly named config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("poi-nearby.toml"));
    paths.push(PathBuf::from(".poi-nearby.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("poi-nearby").join("config.toml"));
        paths.push(config_dir.join("poi-nearby.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".poi-nearby.toml"));
        paths.push(home.join(".config").join("poi-nearby").join("config.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.lat.is_none());
        assert!(config.overpass.is_none());

        let filter = config.filter.unwrap_or_default();
        assert!(filter.strict_category_filter);
        assert!(filter.empty_website_is_missing);
        assert_eq!(filter.zoom, 16);
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: FileConfig = toml::from_str(
            r#"
            radius = 250
            categories = ["museum", "дацан"]

            [overpass]
            timeout_secs = 60

            [filter]
            strict_category_filter = false
            unknown_categories = "any-tourism"
            fallback = "first-requested"
            "#,
        )
        .unwrap();

        assert_eq!(config.radius, Some(250));
        assert_eq!(config.categories.as_deref().map(<[String]>::len), Some(2));

        let overpass = config.overpass.unwrap();
        assert_eq!(overpass.url, OVERPASS_URL);
        assert_eq!(overpass.timeout_secs, Some(60));

        let filter = config.filter.unwrap();
        assert_eq!(filter.unknown_categories, UnknownCategoryPolicy::AnyTourism);
        assert_eq!(filter.fallback, CategoryFallback::FirstRequested);
        assert!(filter.empty_website_is_missing);

        let options = filter.normalize_options();
        assert!(!options.strict_category_filter);
        assert_eq!(options.links.zoom, 16);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "lat = 59.955232\nlon = 30.323435\nformat = \"json\"").unwrap();

        let config = FileConfig::from_file(file.path()).unwrap();
        assert_eq!(config.lat, Some(59.955232));
        assert_eq!(config.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_load_from_reports_unparseable_files() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        writeln!(broken, "radius = \"far\"").unwrap();
        let mut good = tempfile::NamedTempFile::new().unwrap();
        writeln!(good, "radius = 250").unwrap();

        let paths = vec![
            PathBuf::from("/nonexistent/poi-nearby.toml"),
            broken.path().to_path_buf(),
            good.path().to_path_buf(),
        ];
        let search = FileConfig::load_from(&paths);

        assert_eq!(search.config.unwrap().radius, Some(250));
        assert_eq!(search.path.as_deref(), Some(good.path()));
        assert_eq!(search.skipped.len(), 1);
        assert!(matches!(
            &search.skipped[0],
            ConfigError::Parse { path, .. } if path == broken.path()
        ));
    }

    #[test]
    fn test_load_from_nothing_found() {
        let search = FileConfig::load_from(&[PathBuf::from("/nonexistent/poi-nearby.toml")]);
        assert!(search.config.is_none());
        assert!(search.skipped.is_empty());
    }

    #[test]
    fn test_from_file_errors() {
        let missing = FileConfig::from_file(Path::new("/nonexistent/poi-nearby.toml"));
        assert!(matches!(missing, Err(ConfigError::Read { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "radius = \"far\"").unwrap();
        assert!(matches!(
            FileConfig::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
