use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use figment::{
    Figment,
    providers::{Format, Json, Serialized, Toml, Yaml},
};
use serde::{Deserialize, Serialize};

use crate::cli::CliArgs;

pub(crate) const DEFAULT_CONFIG_PATH: &str = "config.toml";

const QUERIES: [&str; 8] = [
    "jumping spider macro photo",
    "jumping spider close up photo",
    "salticidae macro photo",
    "phidippus regius macro photo",
    "phidippus audax macro photo",
    "maratus jumping spider macro photo",
    "jumping spider eyes macro",
    "cute jumping spider macro photo",
];

const NEGATIVE_TERMS: [&str; 12] = [
    "lizard",
    "gecko",
    "iguana",
    "scorpion",
    "mantis",
    "ant",
    "beetle",
    "fly",
    "moth",
    "butterfly",
    "tick",
    "tarantula",
];

const BLOCKED_SITES: [&str; 14] = [
    "pinterest.",
    "etsy.",
    "redbubble.",
    "aliexpress.",
    "temu.",
    "vectorstock.",
    "shutterstock.",
    "adobe.",
    "istockphoto.",
    "123rf.",
    "dreamstime.",
    "depositphotos.",
    "freepik.",
    "pngtree.",
];

const BLOCKED_WORDS: [&str; 18] = [
    "sticker",
    "clipart",
    "svg",
    "logo",
    "vector",
    "icon",
    "plush",
    "plushie",
    "toy",
    "merch",
    "tattoo",
    "drawing",
    "ai",
    "midjourney",
    "dalle",
    "generated",
    "meme",
    "cartoon",
];

const REQUIRED_WORDS: [&str; 9] = [
    "jump",
    "spider",
    "salticidae",
    "phidippus",
    "maratus",
    "habronattus",
    "portia",
    "regius",
    "audax",
];

const FALLBACK_IMAGES: [&str; 4] = [
    "https://upload.wikimedia.org/wikipedia/commons/e/ef/Phidippus_regius_-_male_2.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/b/b4/Phidippus_audax_jumping_spider.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/8/86/Phidippus_regius_female_01.jpg",
    "https://upload.wikimedia.org/wikipedia/commons/b/b7/Salticidae_-_jumping_spider_macro.jpg",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Serialize, Clone)]
pub struct SerpApi {
    /// API key, search is disabled without it
    pub key: Option<String>,
    /// Search endpoint
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl SerpApi {
    /// The configured key, treating a blank value as absent.
    pub fn api_key(&self) -> Option<&str> {
        self.key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl std::fmt::Debug for SerpApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpApi")
            .field("key", &self.api_key().map(|_| "<redacted>"))
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Search {
    /// Curated queries used when the caller gives none
    pub queries: Vec<String>,
    /// Terms excluded from every query
    pub negative_terms: Vec<String>,
    /// Result pages to pick from, the page offset is uniform in `0..max_pages`
    pub max_pages: u32,
    /// Upper bound on candidates fetched per request
    pub max_attempts: usize,
    /// Fixed seed for reproducible responses
    pub seed: Option<u64>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Filters {
    pub blocked_sites: Vec<String>,
    pub blocked_words: Vec<String>,
    pub required_words: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Fallback {
    pub images: Vec<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Fetch {
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Response {
    /// Filename stem for the content-disposition header
    pub filename: String,
    pub cache_control: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Config {
    pub server: Server,
    pub serpapi: SerpApi,
    pub search: Search,
    pub filters: Filters,
    pub fallback: Fallback,
    pub fetch: Fetch,
    pub response: Response,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: Server {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            serpapi: SerpApi {
                key: None,
                endpoint: "https://serpapi.com/search.json".to_string(),
                timeout: 10,
            },
            search: Search {
                queries: owned(&QUERIES),
                negative_terms: owned(&NEGATIVE_TERMS),
                max_pages: 6,
                max_attempts: 12,
                seed: None,
            },
            filters: Filters {
                blocked_sites: owned(&BLOCKED_SITES),
                blocked_words: owned(&BLOCKED_WORDS),
                required_words: owned(&REQUIRED_WORDS),
            },
            fallback: Fallback {
                images: owned(&FALLBACK_IMAGES),
            },
            fetch: Fetch {
                user_agent: "Mozilla/5.0".to_string(),
                timeout: 15,
            },
            response: Response {
                filename: "jumpingspider".to_string(),
                cache_control: "public, s-maxage=3600, stale-while-revalidate=43200".to_string(),
            },
        }
    }
}

fn with_file(figment: Figment, path: &Path) -> Result<Figment> {
    Ok(match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => figment.merge(Toml::file(path)),
        Some("json") => figment.merge(Json::file(path)),
        Some("yaml") | Some("yml") => figment.merge(Yaml::file(path)),
        _ => bail!("Cannot identify config file type. Must be .toml, .json or .yaml"),
    })
}

pub(crate) fn build_config(args: CliArgs) -> Result<Config> {
    let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

    let config_path = PathBuf::from(
        args.config
            .clone()
            .unwrap_or(DEFAULT_CONFIG_PATH.to_string()),
    );

    if config_path.exists() {
        log::info!("Config file found: {}", config_path.display());
        figment = with_file(figment, &config_path)?;
    } else if config_path.to_str() != Some(DEFAULT_CONFIG_PATH) {
        bail!("Config file not found: {}", config_path.display());
    }

    let config: Config = figment
        .merge(Serialized::defaults(args.as_overrides()))
        .extract()?;

    log::debug!("Loaded config: {:#?}", config);

    if config.serpapi.api_key().is_none() {
        log::warn!("No SerpApi key configured, serving fallback images only");
    }

    Ok(config)
}

pub(crate) fn load_config() -> Result<Config> {
    use clap::Parser;

    log::debug!("Parsing CLI args...");
    build_config(CliArgs::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(extra: &[&str]) -> CliArgs {
        let mut argv = vec!["jumpingspider", "--config", "does-not-exist.toml"];
        argv.extend_from_slice(extra);
        CliArgs::parse_from(argv)
    }

    #[test]
    fn test_defaults_match_known_lists() {
        let config = Config::default();
        assert_eq!(config.search.max_attempts, 12);
        assert_eq!(config.search.max_pages, 6);
        assert_eq!(config.fallback.images.len(), 4);
        assert!(
            config
                .fallback
                .images
                .iter()
                .all(|url| url.starts_with("https://upload.wikimedia.org/"))
        );
        assert!(config.filters.blocked_words.contains(&"midjourney".to_string()));
        assert!(config.search.negative_terms.contains(&"gecko".to_string()));
    }

    #[test]
    fn test_blank_key_counts_as_missing() {
        let mut serpapi = Config::default().serpapi;
        assert_eq!(serpapi.api_key(), None);

        serpapi.key = Some("   ".to_string());
        assert_eq!(serpapi.api_key(), None);

        serpapi.key = Some(" secret ".to_string());
        assert_eq!(serpapi.api_key(), Some("secret"));
    }

    #[test]
    fn test_debug_redacts_key() {
        let mut serpapi = Config::default().serpapi;
        serpapi.key = Some("secret".to_string());
        let debug = format!("{:?}", serpapi);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        assert!(build_config(args(&[])).is_err());
    }

    #[test]
    fn test_unknown_config_extension_is_an_error() {
        assert!(with_file(Figment::new(), Path::new("config.ini")).is_err());
    }

    #[test]
    fn test_cli_overrides_defaults() {
        let argv = [
            "jumpingspider",
            "--port",
            "8080",
            "--serpapi-key",
            "abc",
            "--max-attempts",
            "3",
            "--seed",
            "7",
        ];
        let overrides = Serialized::defaults(CliArgs::parse_from(argv).as_overrides());
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(overrides)
            .extract()
            .unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.serpapi.api_key(), Some("abc"));
        assert_eq!(config.search.max_attempts, 3);
        assert_eq!(config.search.seed, Some(7));
        assert_eq!(config.search.queries.len(), 8);
    }

    #[test]
    fn test_file_overrides_lists() {
        let file = r#"
            [filters]
            blocked_words = ["sticker"]

            [fallback]
            images = ["https://example.org/spider.jpg"]
        "#;
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(file))
            .extract()
            .unwrap();

        assert_eq!(config.filters.blocked_words, vec!["sticker".to_string()]);
        assert_eq!(config.filters.required_words.len(), 9);
        assert_eq!(
            config.fallback.images,
            vec!["https://example.org/spider.jpg".to_string()]
        );
    }
}
