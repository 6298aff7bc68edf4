use tracing::Subscriber;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Without `RUST_LOG` only `fxconv` events are shown: warnings and errors by
/// default, everything down to debug with `verbose`. A `RUST_LOG` filter
/// replaces this entirely.
fn build_subscriber(
    verbose: bool,
    env_filter: Option<EnvFilter>,
) -> impl Subscriber + Send + Sync + 'static {
    let app_filter = match env_filter {
        Some(_) => None,
        None => {
            let level = if verbose {
                LevelFilter::DEBUG
            } else {
                LevelFilter::WARN
            };
            Some(Targets::new().with_target("fxconv", level))
        }
    };

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(app_filter)
        .with(env_filter)
}

/// Installs the global subscriber.
pub fn init_logging(verbose: bool) {
    build_subscriber(verbose, EnvFilter::try_from_default_env().ok()).init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_errors_are_logged_by_default() {
        let subscriber = build_subscriber(false, None);
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "fxconv", Level::ERROR));
            assert!(tracing::enabled!(target: "fxconv", Level::WARN));
            assert!(!tracing::enabled!(target: "fxconv", Level::DEBUG));
            assert!(!tracing::enabled!(target: "hyper", Level::ERROR));
        });
    }

    #[test]
    fn test_verbose_enables_debug() {
        let subscriber = build_subscriber(true, None);
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "fxconv", Level::DEBUG));
            assert!(!tracing::enabled!(target: "fxconv", Level::TRACE));
        });
    }

    #[test]
    fn test_env_filter_overrides_verbosity_flag() {
        let subscriber = build_subscriber(false, Some(EnvFilter::new("fxconv=debug")));
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "fxconv", Level::ERROR));
            assert!(tracing::enabled!(target: "fxconv", Level::DEBUG));
        });

        let subscriber = build_subscriber(true, Some(EnvFilter::new("off")));
        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(target: "fxconv", Level::ERROR));
        });
    }
}
