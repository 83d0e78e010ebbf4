use std::{
    fs::OpenOptions,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    http::{HeaderValue, Method, header},
};
use axum_server::Handle;
use clap::Parser;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

use financeflow::{AppState, build_router, graceful_shutdown, stores::JsonFileStorage};

/// The REST API server for FinanceFlow.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to the JSON file that transactions are saved to.
    #[arg(long, env = "DATA_PATH", default_value = "transactions.json")]
    data_path: PathBuf,

    /// The address to listen on.
    #[arg(long, default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 5000)]
    port: u16,

    /// An origin that browsers may call the API from, e.g. "https://example.com".
    ///
    /// May be given more than once. Cross-origin requests are not allowed if omitted.
    #[arg(long = "allowed-origin")]
    allowed_origins: Vec<String>,

    /// File path for the debug log.
    #[arg(long, default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    setup_logging(&args.log_path);

    let addr = SocketAddr::new(args.host, args.port);

    let storage = JsonFileStorage::new(args.data_path.clone());
    tracing::info!("Using data file {}", storage.path().display());
    let state = AppState::new(storage);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));
    let router = add_cors_layer(router, &args.allowed_origins);

    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        std::process::exit(1);
    }
}

fn setup_logging(log_path: &Path) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    let stdout_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_filter(log_filter(rust_log.as_deref(), "info"));

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .with_filter(log_filter(rust_log.as_deref(), "debug"));

    tracing_subscriber::registry()
        .with(stdout_log)
        .with(debug_log)
        .init();
}

/// Build a log filter from the `RUST_LOG` directives, or `default` if they are absent or invalid.
fn log_filter(rust_log: Option<&str>, default: &str) -> EnvFilter {
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but we're doing our specific
        // logging of errors so disable that
        .on_failure(());

    router.layer(tracing_layer)
}

fn add_cors_layer(router: Router, allowed_origins: &[String]) -> Router {
    if allowed_origins.is_empty() {
        return router;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!("Ignoring invalid allowed origin \"{origin}\": {error}");
                None
            }
        })
        .collect();

    tracing::info!("Allowing cross-origin requests from {:?}", allowed_origins);

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    router.layer(cors)
}

#[cfg(test)]
mod tests {
    use tracing_subscriber::filter::LevelFilter;

    use super::log_filter;

    #[test]
    fn rust_log_overrides_default_level() {
        assert_eq!(
            log_filter(Some("warn"), "debug").max_level_hint(),
            Some(LevelFilter::WARN)
        );
        assert_eq!(
            log_filter(Some("trace"), "info").max_level_hint(),
            Some(LevelFilter::TRACE)
        );
    }

    #[test]
    fn default_level_used_without_rust_log() {
        assert_eq!(
            log_filter(None, "debug").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
        assert_eq!(
            log_filter(None, "info").max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }

    #[test]
    fn invalid_rust_log_falls_back_to_default() {
        assert_eq!(
            log_filter(Some("financeflow=notalevel"), "debug").max_level_hint(),
            Some(LevelFilter::DEBUG)
        );
    }
}
