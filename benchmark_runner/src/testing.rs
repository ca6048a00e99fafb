//!
//! The test utilities.
//!

use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

/// Serializes the tests spawning processes.
static PROCESSES: Mutex<()> = Mutex::new(());

///
/// Locks the process spawning tests.
///
/// A script written by one test and executed while another test forks may
/// fail with `ETXTBSY`, so the tests that write or spawn programs run one
/// at a time.
///
pub fn lock() -> MutexGuard<'static, ()> {
    PROCESSES
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

///
/// Writes an executable shell script with the specified body.
///
pub fn script(directory: &Path, name: &str, body: &str) -> PathBuf {
    let path = directory.join(name);
    std::fs::write(path.as_path(), format!("#!/bin/sh\n{body}\n")).expect("Script writing");
    std::fs::set_permissions(path.as_path(), std::fs::Permissions::from_mode(0o755))
        .expect("Script permissions");
    path
}

///
/// Returns the file content, or an empty string if the file does not exist.
///
pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap_or_default()
}
