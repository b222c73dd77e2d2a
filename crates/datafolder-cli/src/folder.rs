//! Startup checks on the data folder.

use std::{io, path::Path};

use snafu::ResultExt;

use crate::error::{
    CliResult, FolderMissingSnafu, InspectSnafu, NotADirectorySnafu, PermissionDeniedSnafu,
};

/// Fail unless `path` names an accessible directory.
pub fn validate(path: &Path) -> CliResult<()> {
    let meta = match std::fs::metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return FolderMissingSnafu { path }.fail();
        }
        Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
            return PermissionDeniedSnafu { path }.fail();
        }
        Err(e) => return Err(e).context(InspectSnafu { path }),
    };

    if !meta.is_dir() {
        return NotADirectorySnafu { path }.fail();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    #[test]
    fn accepts_directories() -> TestResult {
        let tmp = tempfile::TempDir::new()?;
        validate(tmp.path())?;
        Ok(())
    }

    #[test]
    fn rejects_missing_paths_and_files() -> TestResult {
        let tmp = tempfile::TempDir::new()?;

        let missing = tmp.path().join("nope");
        assert!(matches!(
            validate(&missing),
            Err(CliError::FolderMissing { .. })
        ));

        let file = tmp.path().join("users.json");
        std::fs::write(&file, "[]")?;
        assert!(matches!(
            validate(&file),
            Err(CliError::NotADirectory { .. })
        ));
        Ok(())
    }
}
