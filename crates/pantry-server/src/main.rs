use clap::Parser;
use pantry_catalog::{CatalogSearch, ChompCatalog};
use pantry_server::http;
use pantry_server::service::AppState;
use pantry_store_adapters::{FileStore, MemoryStore};
use pantry_store_contract::ListStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "pantry-server")]
struct Args {
    #[arg(long, env = "PANTRY_HTTP_ADDR", default_value = "127.0.0.1:8000")]
    http_addr: String,

    #[arg(long, env = "PANTRY_STORAGE_DIR", default_value = "./lists")]
    storage_dir: PathBuf,

    /// Keep lists in memory instead of on disk. Data is lost on restart.
    #[arg(long, env = "PANTRY_MEMORY_STORE")]
    memory_store: bool,

    #[arg(long, env = "PANTRY_CATALOG_URL", default_value = pantry_catalog::DEFAULT_ENDPOINT)]
    catalog_url: String,

    #[arg(long, env = "PANTRY_CATALOG_API_KEY", default_value = "ABC")]
    catalog_api_key: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing();

    let store: Arc<dyn ListStore> = if args.memory_store {
        Arc::new(MemoryStore::new())
    } else {
        match FileStore::open(&args.storage_dir) {
            Ok(store) => Arc::new(store),
            Err(e) => {
                eprintln!(
                    "failed to open storage dir {}: {e}",
                    args.storage_dir.display()
                );
                std::process::exit(2);
            }
        }
    };
    let catalog: Arc<dyn CatalogSearch> =
        Arc::new(ChompCatalog::new(args.catalog_url, args.catalog_api_key));

    let app = http::router(AppState::new(store, catalog));

    let listener = tokio::net::TcpListener::bind(&args.http_addr)
        .await
        .expect("failed to bind http listener");
    tracing::info!(addr = %args.http_addr, "pantry server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("http server crashed");
}
