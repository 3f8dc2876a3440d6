use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "products_api=info,api_server=info,preflight=info,tower_http=info";

/// Installs the global `tracing` subscriber.
///
/// Verbosity follows `RUST_LOG` (e.g. `RUST_LOG=products_api=debug`), falling back to
/// info-level output for this crate. Calling it twice is harmless.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
