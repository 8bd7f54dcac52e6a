use crate::results::iso_timestamp;
use chrono::{DateTime, Utc};

/// Replace every character outside `[a-zA-Z0-9]` with `_`
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// ISO-8601 timestamp safe for filenames, e.g. `2024-01-15T10-30-00-000Z`
pub fn filename_timestamp(at: DateTime<Utc>) -> String {
    iso_timestamp(at).replace([':', '.'], "-")
}
