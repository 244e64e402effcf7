//! CLI command handlers. Each command is in its own file.

mod checkpoint;
mod classify;
mod clean_url;
mod completions;
mod event;
mod mask_time;

pub use checkpoint::run_checkpoint;
pub use classify::run_classify;
pub use clean_url::run_clean_url;
pub use completions::run_completions;
pub use event::run_event;
pub use mask_time::run_mask_time;

use anyhow::{bail, Result};
use rumc_core::headers::HeaderMap;

/// Build a header map from repeated `-H "Name: value"` arguments.
pub(crate) fn parse_header_args(args: &[String]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for arg in args {
        if !headers.insert_line(arg) {
            bail!("invalid header {arg:?}, expected \"Name: value\"");
        }
    }
    Ok(headers)
}
