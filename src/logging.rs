use std::env;
use tracing_subscriber::{fmt, EnvFilter};

pub const LOG_ENV: &str = "SYSREC_LOG";

/// `SYSREC_LOG` wins over the verbosity flags when set.
pub fn filter_directive(verbose: u8, quiet: bool) -> String {
    if let Ok(directive) = env::var(LOG_ENV) {
        if !directive.trim().is_empty() {
            return directive;
        }
    }
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    level.to_string()
}

/// Logs go to stderr so rendered reports on stdout stay machine readable.
pub fn init_logger(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_new(filter_directive(verbose, quiet))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_flags_map_to_levels() {
        if env::var(LOG_ENV).is_ok() {
            return;
        }
        assert_eq!(filter_directive(0, false), "warn");
        assert_eq!(filter_directive(1, false), "info");
        assert_eq!(filter_directive(3, false), "debug");
        assert_eq!(filter_directive(2, true), "error");
    }
}
