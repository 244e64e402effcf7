//! `rumc clean-url` – sanitize a URL.

use rumc_core::url_model::clean_url;

pub fn run_clean_url(url: &str) {
    println!("{}", clean_url(url));
}
