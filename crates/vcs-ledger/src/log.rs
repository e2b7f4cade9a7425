//! The append-only commit log persisted as `history.json`.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use vcs_types::CommitRecord;

use crate::error::LedgerResult;

/// Ordered sequence of commit records, oldest first.
///
/// Serialized as a plain JSON array of records.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitLog {
    records: Vec<CommitRecord>,
}

impl CommitLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, oldest first.
    pub fn records(&self) -> &[CommitRecord] {
        &self.records
    }

    pub fn last(&self) -> Option<&CommitRecord> {
        self.records.last()
    }

    /// Append a new record stamped with `now`.
    ///
    /// If `now` is earlier than the last record (clock moved backwards),
    /// the last record's timestamp is reused so dates never decrease.
    pub fn append(
        &mut self,
        message: &str,
        files: Vec<String>,
        now: NaiveDateTime,
    ) -> LedgerResult<&CommitRecord> {
        let date = match self.last() {
            Some(last) if now < last.date() => {
                warn!(
                    now = %now,
                    last = %last.date(),
                    "clock is behind the last commit; reusing its timestamp"
                );
                last.date()
            }
            _ => now,
        };

        let record = CommitRecord::new(message, date, files)?;
        debug!(
            message = record.message(),
            files = record.files().len(),
            seq = self.records.len() + 1,
            "commit record appended"
        );
        self.records.push(record);
        Ok(&self.records[self.records.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use chrono::NaiveDate;
    use vcs_types::TypeError;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn append_records_in_order() {
        let mut log = CommitLog::new();
        log.append("first", vec!["a.txt".into()], at(9, 0, 0)).unwrap();
        log.append("second", vec!["b.txt".into()], at(9, 5, 0)).unwrap();

        assert_eq!(log.len(), 2);
        assert_eq!(log.records()[0].message(), "first");
        assert_eq!(log.records()[1].message(), "second");
        assert_eq!(log.last().unwrap().files(), ["b.txt".to_string()]);
    }

    #[test]
    fn timestamps_never_decrease() {
        let mut log = CommitLog::new();
        log.append("later", vec!["a".into()], at(12, 0, 0)).unwrap();
        let record = log.append("earlier", vec!["b".into()], at(11, 0, 0)).unwrap();
        assert_eq!(record.date(), at(12, 0, 0));
    }

    #[test]
    fn empty_file_list_rejected_and_log_unchanged() {
        let mut log = CommitLog::new();
        let err = log.append("msg", vec![], at(1, 0, 0)).unwrap_err();
        assert_eq!(err, LedgerError::InvalidRecord(TypeError::EmptyFileList));
        assert!(log.is_empty());
    }

    #[test]
    fn empty_message_rejected() {
        let mut log = CommitLog::new();
        let err = log.append("", vec!["a".into()], at(1, 0, 0)).unwrap_err();
        assert_eq!(err, LedgerError::InvalidRecord(TypeError::EmptyMessage));
    }

    #[test]
    fn persisted_as_array() {
        let mut log = CommitLog::new();
        log.append("first", vec!["a.txt".into()], at(8, 30, 0)).unwrap();
        let json = serde_json::to_string(&log).unwrap();
        assert_eq!(
            json,
            r#"[{"message":"first","date":"2024-06-01 08:30:00","files":["a.txt"]}]"#
        );
        let back: CommitLog = serde_json::from_str(&json).unwrap();
        assert_eq!(back, log);
    }
}
