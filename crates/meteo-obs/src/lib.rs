use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter when RUST_LOG is unset
pub const DEFAULT_FILTER: &str = "info,meteo_db=debug";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line, for log collectors
    Json,
    /// Human readable, for terminals
    Pretty,
}

impl LogFormat {
    /// `METEO_LOG_FORMAT=pretty` selects [`LogFormat::Pretty`], anything else JSON
    pub fn from_env() -> Self {
        match std::env::var("METEO_LOG_FORMAT").as_deref() {
            Ok("pretty") => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

/// Initialize logging/tracing.
/// - RUST_LOG respected; defaults to [`DEFAULT_FILTER`]
/// - Does nothing if a global subscriber is already installed
pub fn init(service_name: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let registry = tracing_subscriber::registry().with(filter);
    let installed = match format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    if installed.is_ok() {
        tracing::info!(service = %service_name, ?format, "Observability initialized");
    }
}
