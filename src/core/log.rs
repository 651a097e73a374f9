use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Crate-specific filter variable, checked before `RUST_LOG`.
pub const LOG_ENV: &str = "NBG_RATES_LOG";

/// Filter directives used when neither [`LOG_ENV`] nor `RUST_LOG` is set.
pub fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "nbg_rates=debug,reqwest=info"
    } else {
        "off"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    [LOG_ENV, EnvFilter::DEFAULT_ENV]
        .into_iter()
        .find_map(|var| EnvFilter::try_from_env(var).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber on stderr so table output on stdout stays
/// clean. Verbose mode logs this crate at debug with targets shown.
pub fn init_logging(verbose: bool) {
    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(verbose);
    let registry = tracing_subscriber::registry().with(env_filter(verbose));

    if verbose {
        registry.with(layer.pretty()).init();
    } else {
        registry.with(layer.compact()).init();
    }
}
