use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber for an application embedding the engine.
///
/// `RUST_LOG` wins when set; otherwise events from this crate are filtered at `rust_log`.
/// Returns an error if a global subscriber is already installed.
pub fn init_tracing(rust_log: &str) -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .try_init()?;

    tracing::info!("Fit engine v{} tracing initialized", env!("CARGO_PKG_VERSION"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_fails() {
        // The first call may already have happened in this test binary.
        let _ = init_tracing("debug");
        assert!(init_tracing("debug").is_err());
    }
}
