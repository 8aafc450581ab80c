use anyhow::Result;
use tracing_subscriber::EnvFilter;

/// Pick the filter directive: `RUST_LOG` wins, then `--verbose`, then the
/// configured level.
pub fn filter_directive(configured: &str, verbose: bool, env: Option<&str>) -> String {
    match env {
        Some(directive) if !directive.trim().is_empty() => directive.to_string(),
        _ if verbose => "debug".to_string(),
        _ => configured.to_lowercase(),
    }
}

/// Install the global tracing subscriber, writing to stderr.
pub fn init(configured: &str, verbose: bool) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(configured, verbose, env.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", directive, e))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_takes_precedence() {
        assert_eq!(filter_directive("info", true, Some("warn")), "warn");
    }

    #[test]
    fn test_verbose_overrides_config() {
        assert_eq!(filter_directive("info", true, None), "debug");
        assert_eq!(filter_directive("info", true, Some("  ")), "debug");
    }

    #[test]
    fn test_configured_level() {
        assert_eq!(filter_directive("WARN", false, None), "warn");
    }
}
