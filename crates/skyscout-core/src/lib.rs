pub mod config;
pub mod interaction;

pub use config::{ApiConfig, Config, ConfigValidationError, UiConfig, ValidationResult};
pub use interaction::{Feedback, FeedbackSink, HapticStyle, InteractionKind};

use anyhow::Result;

/// Initialize the core application
pub fn init() -> Result<()> {
    // Initialize tracing/logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("SkyScout core initialized");
    Ok(())
}
