use std::env;
use tracing_subscriber::EnvFilter;

/// Installs the global fmt subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level is `info`, or `debug` when
/// `DEBUG` is truthy. Output goes to stderr so stdout stays machine readable.
pub fn init() {
    let default_level = if debug_flag(env::var("DEBUG").ok().as_deref()) {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn debug_flag(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1" | "true" | "yes")
    )
}

#[cfg(test)]
mod tests {
    use super::debug_flag;

    #[test]
    fn debug_flag_values() {
        assert!(debug_flag(Some("1")));
        assert!(debug_flag(Some("TRUE")));
        assert!(debug_flag(Some("yes")));
        assert!(!debug_flag(Some("0")));
        assert!(!debug_flag(None));
    }
}
