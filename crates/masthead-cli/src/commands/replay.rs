use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use masthead_core::trace::{replay, Trace};
use masthead_core::AppConfig;

use crate::OutputFormat;

pub async fn run(
    config: &AppConfig,
    file: &Path,
    format: OutputFormat,
    settle_ms: Option<u64>,
) -> Result<()> {
    let content = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read trace {}", file.display()))?;
    let mut trace = Trace::parse(file, &content)
        .with_context(|| format!("invalid trace {}", file.display()))?;
    if let Some(settle_ms) = settle_ms {
        trace.settle_ms = settle_ms;
    }

    info!(steps = trace.steps.len(), "replaying {}", file.display());
    let report = replay(config, &trace);

    match format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}
