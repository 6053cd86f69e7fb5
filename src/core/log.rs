//! Diagnostics go to stderr so that command output on stdout stays clean.
use tracing_subscriber::EnvFilter;

/// Filter directives for the subscriber. A non-empty `RUST_LOG` wins;
/// otherwise this crate logs at debug when verbose and everything else at warn.
fn filter_directives(verbose: bool, rust_log: Option<&str>) -> String {
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => directives.to_string(),
        _ => format!("warn,fxconv={}", if verbose { "debug" } else { "warn" }),
    }
}

pub fn init_logging(verbose: bool) {
    let directives = filter_directives(verbose, std::env::var("RUST_LOG").ok().as_deref());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        eprintln!("Ignoring invalid RUST_LOG '{directives}': {e}");
        EnvFilter::new(filter_directives(verbose, None))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .without_time()
        .compact()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbose_raises_only_this_crate() {
        assert_eq!(filter_directives(false, None), "warn,fxconv=warn");
        assert_eq!(filter_directives(true, None), "warn,fxconv=debug");
    }

    #[test]
    fn test_rust_log_takes_precedence() {
        assert_eq!(filter_directives(false, Some("reqwest=trace")), "reqwest=trace");
        assert_eq!(filter_directives(true, Some("  ")), "warn,fxconv=debug");
        assert!(EnvFilter::try_new(filter_directives(true, None)).is_ok());
    }
}
