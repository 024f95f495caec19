use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;

fn since_epoch() -> Result<std::time::Duration, anyhow::Error> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("Failed to get system time")
}

pub fn get_unix_time() -> Result<u64, anyhow::Error> {
    Ok(since_epoch()?.as_secs())
}

pub fn get_unix_time_millis() -> Result<u128, anyhow::Error> {
    Ok(since_epoch()?.as_millis())
}
