use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Filter for this crate's events. `None` when `RUST_LOG` decides on its own.
fn app_targets(verbose: bool, env_configured: bool) -> Option<Targets> {
    if env_configured {
        return None;
    }
    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Some(Targets::new().with_target("kurs", level_filter))
}

/// Sets up tracing on stderr. Silent unless `verbose` or `RUST_LOG` is set.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "off" };
    let env_filter = EnvFilter::try_from_default_env().ok();
    let app_filter = app_targets(verbose, env_filter.is_some());
    let env_filter = env_filter.unwrap_or_else(|| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(app_filter)
        .with(env_filter)
        .init();
}
