//! Helpers for storage tests.

use tempfile::TempDir;

use super::connection::CsvConnection;

/// A connection rooted in a fresh temp directory. Keep the returned guard
/// alive for the duration of the test or the directory disappears.
pub fn temp_connection() -> (CsvConnection, TempDir) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let connection = CsvConnection::new(dir.path()).expect("failed to create connection");
    (connection, dir)
}
