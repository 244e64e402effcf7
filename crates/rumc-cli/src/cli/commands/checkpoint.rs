//! `rumc checkpoint` – vocabulary membership check.

use rumc_core::checkpoint::{is_retired_checkpoint, CheckpointVocabulary};
use rumc_core::config::RumConfig;

pub fn run_checkpoint(cfg: &RumConfig, name: &str) {
    let vocabulary = CheckpointVocabulary::with_extra(cfg.extra_checkpoints.iter().cloned());
    if vocabulary.contains(name) {
        println!("known");
    } else if is_retired_checkpoint(name) {
        println!("unknown (retired)");
    } else {
        println!("unknown");
    }
}
