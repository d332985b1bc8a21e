use std::{
    fs::OpenOptions,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::{Path, PathBuf},
    process::exit,
    sync::Arc,
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware,
};
use axum_server::Handle;
use clap::Parser;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{
    EnvFilter, Layer, filter, layer::SubscriberExt, util::SubscriberInitExt,
};

use expense_tracker::{
    AppState, CorsConfig, StoreConfig, build_router, cors_layer, graceful_shutdown,
    logging_middleware, open_connection,
};

/// The REST API server for expense_tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the database files, or ":memory:" for a throwaway store.
    #[arg(long, env = "STORE_URL")]
    store_url: String,

    /// Name of the database inside the store.
    #[arg(long, env = "DATABASE_NAME")]
    database_name: String,

    /// The address to listen on.
    #[arg(long, env = "HOST", default_value_t = IpAddr::V4(Ipv4Addr::LOCALHOST))]
    host: IpAddr,

    /// The port to serve the API from.
    #[arg(short, long, env = "PORT", default_value_t = 8000)]
    port: u16,

    /// Origin of the local development client.
    #[arg(long, env = "DEV_ORIGIN", default_value = "http://localhost:5173")]
    dev_origin: String,

    /// Any HTTPS subdomain of this domain may call the API.
    #[arg(long, env = "DEPLOY_DOMAIN", default_value = "vercel.app")]
    deploy_domain: String,

    /// File to append debug logs to.
    #[arg(long, env = "LOG_PATH", default_value = "debug.log")]
    log_path: PathBuf,
}

#[tokio::main]
async fn main() {
    // A missing .env file is fine, the variables may come from the environment.
    let _ = dotenv::dotenv();

    let args = Args::parse();

    setup_logging(&args.log_path);

    let store_config = StoreConfig {
        url: args.store_url,
        database_name: args.database_name,
    };

    let state = match open_connection(&store_config).and_then(AppState::new) {
        Ok(state) => state,
        Err(error) => {
            tracing::error!("Could not initialize the store: {error}");
            exit(1);
        }
    };

    let cors_config = CorsConfig {
        dev_origin: args.dev_origin,
        deploy_domain: args.deploy_domain,
    };

    let router = build_router(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(cors_layer(cors_config));
    let router = add_tracing_layer(router);

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let addr = SocketAddr::new(args.host, args.port);
    tracing::info!("HTTP server listening on {}", addr);
    if let Err(error) = axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
    {
        tracing::error!("Server stopped with an error: {error}");
        exit(1);
    }
}

fn setup_logging(log_path: &Path) {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("expense_tracker=debug,server=debug,tower_http=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_log.with_filter(filter::LevelFilter::INFO))
        .with(debug_log)
        .init();
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
        // By default, `TraceLayer` will log 5xx responses but the error type
        // logs unexpected failures itself, so disable that
        .on_failure(());

    router.layer(tracing_layer)
}
