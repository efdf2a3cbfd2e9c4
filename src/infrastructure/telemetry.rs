use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Returns `false` when a subscriber
/// was already installed, which happens when tests share a process.
pub fn init_tracing(default_filter: &str) -> bool {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

  tracing_subscriber::registry()
    .with(filter)
    .with(fmt::layer())
    .try_init()
    .is_ok()
}
