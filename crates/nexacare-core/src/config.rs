//! Application paths and constants.

use std::path::PathBuf;

pub const APP_NAME: &str = "NexaCare";
pub const DB_FILE_NAME: &str = "nexacare.db";

/// Application data directory (`<user data dir>/NexaCare`).
pub fn app_data_dir() -> PathBuf {
    let base = dirs::data_dir()
        .or_else(dirs::home_dir)
        .expect("Cannot determine a data directory");
    base.join(APP_NAME)
}

/// Default on-disk database path.
pub fn default_db_path() -> PathBuf {
    app_data_dir().join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_path_under_app_data() {
        let path = default_db_path();
        assert!(path.starts_with(app_data_dir()));
        assert!(path.ends_with(DB_FILE_NAME));
    }
}
