use clap::Parser;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(about = "Serves a random jumping spider photo over HTTP")]
pub(crate) struct CliArgs {
    /// Address to listen on (default: 0.0.0.0)
    #[arg(long, env = "JUMP_HOST")]
    pub(crate) host: Option<String>,

    /// Port to listen on (default: 3000)
    #[arg(short, long, env = "JUMP_PORT")]
    pub(crate) port: Option<u16>,

    /// SerpApi key, only fallback images are served without it
    #[arg(long, env = "SERPAPI_KEY", hide_env_values = true)]
    pub(crate) serpapi_key: Option<String>,

    /// SerpApi search endpoint (default: https://serpapi.com/search.json)
    #[arg(long, env = "JUMP_SERPAPI_ENDPOINT")]
    pub(crate) serpapi_endpoint: Option<String>,

    /// Max candidates fetched per request (default: 12)
    #[arg(long, env = "JUMP_MAX_ATTEMPTS")]
    pub(crate) max_attempts: Option<usize>,

    /// Seed for reproducible picks
    #[arg(long, env = "JUMP_SEED")]
    pub(crate) seed: Option<u64>,

    /// Config file path (default: "config.toml")
    #[arg(short, long, env = "JUMP_CONFIG")]
    pub(crate) config: Option<String>,
}

#[derive(Serialize, Debug)]
pub(crate) struct ServerOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
}

#[derive(Serialize, Debug)]
pub(crate) struct SerpApiOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint: Option<String>,
}

#[derive(Serialize, Debug)]
pub(crate) struct SearchOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_attempts: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
}

/// The subset of `Config` settable from the command line. Unset flags are
/// skipped so they don't shadow the file or the defaults.
#[derive(Serialize, Debug)]
pub(crate) struct Overrides {
    server: ServerOverrides,
    serpapi: SerpApiOverrides,
    search: SearchOverrides,
}

impl CliArgs {
    pub(crate) fn as_overrides(self) -> Overrides {
        Overrides {
            server: ServerOverrides {
                host: self.host,
                port: self.port,
            },
            serpapi: SerpApiOverrides {
                key: self.serpapi_key,
                endpoint: self.serpapi_endpoint,
            },
            search: SearchOverrides {
                max_attempts: self.max_attempts,
                seed: self.seed,
            },
        }
    }
}
