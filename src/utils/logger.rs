use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// Logs always go to stderr; stdout is reserved for the progress lines.

/// Directive used when `RUST_LOG` is unset. Only this crate's events pass,
/// so `-v` never turns on dependency logging.
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "compose_split=debug"
    } else {
        "compose_split=info"
    }
}

fn env_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)))
}

pub fn init_cli_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(std::io::stderr().is_terminal())
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

pub fn init_json_logger(verbose: bool) {
    tracing_subscriber::registry()
        .with(env_filter(verbose))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .json(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_only_names_this_crate() {
        assert_eq!(default_directive(false), "compose_split=info");
        assert_eq!(default_directive(true), "compose_split=debug");
        for verbose in [false, true] {
            assert_eq!(default_directive(verbose).split(',').count(), 1);
        }
    }
}
