//! `rumc event` – classify a JSON event payload from a file or stdin.

use anyhow::{Context, Result};
use rumc_core::config::RumConfig;
use rumc_core::event::{Classifier, RumEvent};
use rumc_core::time_mask;
use tokio::io::AsyncReadExt;

use super::parse_header_args;

async fn read_payload(path: &str) -> Result<String> {
    if path == "-" {
        let mut data = String::new();
        tokio::io::stdin()
            .read_to_string(&mut data)
            .await
            .context("read event from stdin")?;
        return Ok(data);
    }
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("read event from {path}"))
}

pub async fn run_event(
    cfg: &RumConfig,
    path: &str,
    header_args: &[String],
    now: Option<i64>,
) -> Result<()> {
    let headers = parse_header_args(header_args)?;
    let classifier = Classifier::from_config(cfg)?;
    let event = RumEvent::from_json(&read_payload(path).await?)?;
    let now = now.unwrap_or_else(time_mask::now_millis);

    let record = classifier.classify_event(&event, &headers, now);
    if !record.checkpoint_known {
        tracing::info!(checkpoint = ?record.checkpoint, "event has unknown checkpoint");
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
