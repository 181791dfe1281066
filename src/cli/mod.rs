pub mod build;

use tracing_subscriber::EnvFilter;

/// Default log directives when `RUST_LOG` is unset
///
/// This crate logs at `info`, or `debug` with `--debug`; dependencies only
/// report warnings.
pub fn default_filter(debug: bool) -> &'static str {
    if debug {
        "warn,submission_docs=debug"
    } else {
        "warn,submission_docs=info"
    }
}

/// Install the stderr log subscriber
pub fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_levels() {
        assert_eq!(default_filter(false), "warn,submission_docs=info");
        assert_eq!(default_filter(true), "warn,submission_docs=debug");
        assert!(EnvFilter::try_new(default_filter(false)).is_ok());
        assert!(EnvFilter::try_new(default_filter(true)).is_ok());
    }
}
