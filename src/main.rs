mod cli;
mod config;
mod core;
mod engines;
mod error;
mod files;
mod handlers;
mod models;
mod server;
mod transformers;

fn init_logging() {
    let mut builder = pretty_env_logger::formatted_timed_builder();
    match std::env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) => builder.parse_filters("info"),
    };
    builder.init();
}

#[tokio::main]
async fn main() {
    init_logging();
    log::info!("Starting jumpingspider...");

    let config = match config::load_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    if let Err(err) = server::run(config).await {
        log::error!("Server error: {}", err);
        std::process::exit(1);
    }

    log::info!("Server stopped");
}
