//! Timestamp-based record ids.
//!
//! Ids are creation-time milliseconds, bumped past the last issued value so
//! two records created in the same millisecond still get distinct,
//! increasing ids. Crews and events draw from one sequence.

use chrono::Utc;

use crate::error::{Result, StoreError};

#[derive(Debug, Default, Clone)]
pub struct IdSequence {
    last: i64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the wall clock.
    pub fn next_id(&mut self) -> Result<i64> {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next id given the current time in milliseconds. Fails once the last
    /// id is `i64::MAX`; the sequence never wraps.
    pub fn next_at(&mut self, now_ms: i64) -> Result<i64> {
        let floor = self.last.checked_add(1).ok_or(StoreError::IdsExhausted)?;
        let id = now_ms.max(floor);
        self.last = id;
        Ok(id)
    }

    /// Make sure future ids sort after `id`, e.g. one loaded from storage.
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }
}
