use chrono::{DateTime, TimeZone};
use std::path::{Path, PathBuf};

pub mod metrics;
pub mod validation;

pub const USER_FACTORS_SUFFIX: &str = "uv.bin";
pub const ITEM_FACTORS_SUFFIX: &str = "iv.bin";

/// Timestamped `(user, item)` factor file paths, e.g. `20161217140707-uv.bin`.
pub fn model_file_names<Tz>(dir: &Path, at: &DateTime<Tz>) -> (PathBuf, PathBuf)
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let stamp = at.format("%Y%m%d%H%M%S");
    (
        dir.join(format!("{}-{}", stamp, USER_FACTORS_SUFFIX)),
        dir.join(format!("{}-{}", stamp, ITEM_FACTORS_SUFFIX)),
    )
}
