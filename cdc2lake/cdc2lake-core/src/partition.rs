use chrono::DateTime;

use crate::error::ConvertError;

/// `strftime` pattern of partition keys.
pub const PARTITION_FORMAT: &str = "%Y%m%d";

/// Map a Unix timestamp (seconds, UTC) to its `YYYYMMDD` partition key.
pub fn partition_key(timestamp: i64) -> Result<String, ConvertError> {
    let at = DateTime::from_timestamp(timestamp, 0)
        .ok_or(ConvertError::TimestampOutOfRange { timestamp })?;
    Ok(at.format(PARTITION_FORMAT).to_string())
}
