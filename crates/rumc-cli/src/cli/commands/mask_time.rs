//! `rumc mask-time` – apply the hour-bucket time mask.

use rumc_core::time_mask::{mask_time, TimePadding};

pub fn run_mask_time(time: i64, padding: Option<&str>) {
    println!("{}", mask_time(time, &TimePadding::from(padding)));
}
