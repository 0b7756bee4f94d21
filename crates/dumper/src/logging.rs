//! Structured logging setup.

use tracing::trace;
use tracing_subscriber::EnvFilter;

/// Install a stderr subscriber. `RUST_LOG` wins unless `verbose` is set.
///
/// Returns false when a global subscriber was already installed; that one
/// stays in place.
pub fn init(verbose: bool) -> bool {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .is_ok();
    if !installed {
        trace!("global subscriber already set, keeping it");
    }
    installed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_the_first_subscriber() {
        init(false);
        assert!(!init(true));
    }
}
