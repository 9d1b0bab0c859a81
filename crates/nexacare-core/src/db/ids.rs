//! Identifier generation: role-prefixed user ids and patient codes.
//!
//! Allocation is sequential and single-writer: the next id is derived
//! from the greatest one already stored, with no retry on collision.
//! Two racing creates can draw the same id; the primary-key constraint
//! rejects the loser at insert time.

use chrono::{Datelike, Utc};
use rusqlite::OptionalExtension;

use super::{Database, DbResult};
use crate::models::Role;

/// Prefix of generated patient codes.
pub const PATIENT_CODE_PREFIX: &str = "NXCP";

/// Offset of the numeric suffix in a user id (`<year:4><prefix:1>`).
const USER_ID_SUFFIX_OFFSET: usize = 5;

impl Database {
    /// Next user id for a role: `<currentYear><Prefix><seq:04>`, where
    /// the sequence continues from the lexicographically greatest stored
    /// id and starts at 1 on an empty table or an unparseable suffix.
    pub fn next_user_id(&self, role: Role) -> DbResult<String> {
        let query = format!(
            "SELECT user_id FROM {} ORDER BY user_id DESC LIMIT 1",
            role.table()
        );
        let last: Option<String> = self
            .conn
            .query_row(&query, [], |row| row.get(0))
            .optional()?;

        let next = last
            .as_deref()
            .and_then(parse_user_id_suffix)
            .map_or(1, |n| n + 1);
        Ok(format_user_id(Utc::now().year(), role, next))
    }

    /// Next patient code: `NXCP<seq:04>`, continuing from the greatest
    /// numeric suffix across existing codes.
    pub fn next_patient_code(&self) -> DbResult<String> {
        let max: Option<i64> = self.conn.query_row(
            "SELECT MAX(CAST(SUBSTR(patient_code, 5) AS INTEGER)) FROM patients",
            [],
            |row| row.get(0),
        )?;
        Ok(format_patient_code(max.unwrap_or(0) + 1))
    }
}

/// Format a user id from its parts.
pub fn format_user_id(year: i32, role: Role, seq: u32) -> String {
    format!("{}{}{:04}", year, role.prefix(), seq)
}

/// Format a patient code from its sequence number.
pub fn format_patient_code(seq: i64) -> String {
    format!("{}{:04}", PATIENT_CODE_PREFIX, seq)
}

/// Extract the numeric suffix of a stored user id, if it parses.
fn parse_user_id_suffix(user_id: &str) -> Option<u32> {
    user_id.get(USER_ID_SUFFIX_OFFSET..)?.parse().ok()
}
