use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt as _};

/// Installs the global subscriber. `prod_format` emits flat JSON lines without colors.
pub fn init_tracing(prod_format: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let result = if prod_format {
        registry
            .with(fmt::layer().json().flatten_event(true).with_ansi(false))
            .try_init()
    } else {
        registry
            .with(fmt::layer().json().pretty().with_ansi(true))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("tracing subscriber already installed: {e}");
    }
}
