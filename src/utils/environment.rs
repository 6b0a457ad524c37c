use std::env;

use anyhow::{Context, Result};

/// Default RNG seed for the CLI when `--seed` is not given
pub const SEED_ENV_VAR: &str = "ARCHIVE_SAMPLER_SEED";
/// Overrides the archive size cap, in megabytes
pub const MAX_MB_ENV_VAR: &str = "ARCHIVE_SAMPLER_MAX_MB";

pub const DEFAULT_MAX_ARCHIVE_MB: u64 = 512;

const BYTES_PER_MB: u64 = 1024 * 1024;

/// Seed from `ARCHIVE_SAMPLER_SEED`, if set
pub fn get_seed_from_env() -> Result<Option<u64>> {
    parse_seed(env::var(SEED_ENV_VAR).ok().as_deref())
}

/// Archive size cap in bytes, from `ARCHIVE_SAMPLER_MAX_MB` or the default
pub fn get_max_archive_bytes() -> Result<u64> {
    parse_max_bytes(env::var(MAX_MB_ENV_VAR).ok().as_deref())
}

fn parse_seed(value: Option<&str>) -> Result<Option<u64>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v
            .parse::<u64>()
            .map(Some)
            .with_context(|| format!("{} must be an unsigned integer, got {:?}", SEED_ENV_VAR, v)),
        None => Ok(None),
    }
}

fn parse_max_bytes(value: Option<&str>) -> Result<u64> {
    let megabytes = match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => v.parse::<u64>().with_context(|| {
            format!("{} must be a whole number of megabytes, got {:?}", MAX_MB_ENV_VAR, v)
        })?,
        None => DEFAULT_MAX_ARCHIVE_MB,
    };
    Ok(megabytes.saturating_mul(BYTES_PER_MB))
}
