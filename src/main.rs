use std::sync::Arc;

use astra::Server;
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::app::App;
use crate::backend::HttpBackend;
use crate::config::AppConfig;
use crate::router::handle;

mod app;
mod backend;
mod config;
mod domain;
mod errors;
mod layout;
mod map;
mod responses;
mod router;
mod session;
mod state;
mod templates;

#[cfg(test)]
mod tests;

const DEFAULT_LOG_FILTER: &str = "listing_map=info,reqwest=warn,hyper=warn";
const HTMX_FILE: &str = "htmx.min.js";

fn main() {
    // 1️⃣ Logging: RUST_LOG wins over the default filter
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2️⃣ Configuration and the backend client
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let backend = match HttpBackend::new(&config.backend_url, config.http_timeout) {
        Ok(backend) => backend,
        Err(e) => {
            error!("❌ Backend client setup failed: {e}");
            std::process::exit(1);
        }
    };

    if config.map_api_key.is_empty() {
        info!("GOOGLE_MAPS_API_KEY not set, serving without a map provider");
    }

    // 3️⃣ Start the server
    let addr = config.bind_addr;
    let workers = config.max_workers;
    info!(%addr, backend = %config.backend_url, "starting server");

    let htmx_path = config.static_dir.join(HTMX_FILE);
    let mut app = App::new(config, Box::new(backend));
    match std::fs::read_to_string(&htmx_path) {
        Ok(source) => app = app.with_htmx(source),
        Err(e) => warn!(path = %htmx_path.display(), error = %e, "htmx not found, pages will not be interactive"),
    }
    let app = Arc::new(app);
    let server = Server::bind(&addr).max_workers(workers);

    let result = server.serve(move |req: astra::Request, _info| {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        match handle(req, &app) {
            Ok(resp) => resp,
            Err(err) => {
                warn!(%method, %path, error = %err, "request failed");
                responses::error_to_response(err)
            }
        }
    });

    if let Err(e) = result {
        error!("Server ended with error: {e}");
    }

    info!("Server shut down cleanly.");
}
