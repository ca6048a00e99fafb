//!
//! The scheduler job identifier.
//!

use std::path::Path;

///
/// The scheduler job identifier, used to name the run output file.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobId(String);

impl JobId {
    ///
    /// A shortcut constructor.
    ///
    pub fn new(value: String) -> Self {
        Self(value)
    }

    ///
    /// Reads the identifier written by the launcher hook and removes the file.
    ///
    /// Returns `None` if the hook did not run or wrote nothing.
    ///
    pub fn take(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let value = std::fs::read_to_string(path)
            .map_err(|error| anyhow::anyhow!("Job identifier file {path:?} reading: {error}"))?;
        std::fs::remove_file(path)
            .map_err(|error| anyhow::anyhow!("Job identifier file {path:?} removing: {error}"))?;

        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self(value.to_owned())))
    }

    ///
    /// The identifier used outside of a scheduler allocation.
    ///
    pub fn fallback() -> Self {
        Self(std::process::id().to_string())
    }

    ///
    /// Returns the run output file name.
    ///
    pub fn output_file_name(&self) -> String {
        format!("arkouda.{}.out", self.0)
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::JobId;

    #[test]
    fn read_and_removed() {
        let directory = tempfile::tempdir().expect("Temporary directory creation");
        let path = directory.path().join("write_slurm_filename.1");
        std::fs::write(path.as_path(), "123456\n").expect("File writing");

        let job_id = JobId::take(path.as_path()).expect("Must be read");
        assert_eq!(job_id, Some(JobId::new("123456".to_owned())));
        assert!(!path.exists());

        assert_eq!(JobId::take(path.as_path()).expect("Must not fail"), None);
    }

    #[test]
    fn empty_file_is_removed() {
        let directory = tempfile::tempdir().expect("Temporary directory creation");
        let path = directory.path().join("write_slurm_filename.2");
        std::fs::write(path.as_path(), " \n").expect("File writing");

        assert_eq!(JobId::take(path.as_path()).expect("Must not fail"), None);
        assert!(!path.exists());
    }

    #[test]
    fn output_file_name() {
        assert_eq!(
            JobId::new("987".to_owned()).output_file_name(),
            "arkouda.987.out"
        );
    }
}
