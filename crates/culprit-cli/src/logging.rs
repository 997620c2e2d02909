//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

use crate::config::CliConfig;

/// Build the event filter: `RUST_LOG` when set and valid, else the verbosity default
#[must_use]
pub fn env_filter(config: &CliConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.verbosity.log_filter()))
}

/// Install the global fmt subscriber writing to stderr.
///
/// A second call is a no-op.
pub fn init_tracing(config: &CliConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_ansi(config.color.should_color())
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColorChoice, Verbosity};

    #[test]
    fn test_init_twice_is_harmless() {
        let config = CliConfig::new()
            .with_verbosity(Verbosity::Quiet)
            .with_color(ColorChoice::Never);
        init_tracing(&config);
        init_tracing(&config);
    }
}
