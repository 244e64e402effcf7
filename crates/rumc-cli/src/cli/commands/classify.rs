//! `rumc classify` – client class and subsystem for a set of headers.

use anyhow::Result;
use rumc_core::config::RumConfig;
use rumc_core::event::Classifier;
use rumc_core::subsystem::subsystem;

use super::parse_header_args;

pub fn run_classify(cfg: &RumConfig, header_args: &[String]) -> Result<()> {
    let headers = parse_header_args(header_args)?;
    let classifier = Classifier::from_config(cfg)?;
    println!("user_agent: {}", classifier.client_class(Some(&headers)));
    println!("host:       {}", subsystem(&headers));
    Ok(())
}
