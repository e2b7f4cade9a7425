//! Commit records as persisted in `history.json`.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{TypeError, TypeResult};

/// Persisted timestamp format: `YYYY-MM-DD HH:MM:SS`.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// An immutable commit record.
///
/// Created only through [`CommitRecord::new`], which rejects an empty
/// message or an empty file list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    message: String,
    #[serde(with = "date_format")]
    date: NaiveDateTime,
    files: Vec<String>,
}

impl CommitRecord {
    /// Create a new record. The date is truncated to whole seconds so that
    /// it round-trips through the persisted format unchanged.
    pub fn new(
        message: impl Into<String>,
        date: NaiveDateTime,
        files: Vec<String>,
    ) -> TypeResult<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(TypeError::EmptyMessage);
        }
        if files.is_empty() {
            return Err(TypeError::EmptyFileList);
        }
        Ok(Self {
            message,
            date: date.with_nanosecond(0).unwrap_or(date),
            files,
        })
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn date(&self) -> NaiveDateTime {
        self.date
    }

    /// Paths staged at commit time, in staging order.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// The date rendered in the persisted format.
    pub fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Serde adapter for [`DATE_FORMAT`] timestamps.
pub mod date_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}
