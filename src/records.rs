use tracing::debug;

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    config::Config,
    error::{Error, Result},
};

/// A sales record file found by [`discover`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFile {
    pub path: PathBuf,
    pub name: String,
    /// The number encoded in the first eight characters of the name.
    pub sequence: u32,
}

impl RecordFile {
    fn new(path: PathBuf, name: String) -> Result<Self> {
        let sequence = name
            .get(..8)
            .and_then(|digits| digits.parse().ok())
            .ok_or_else(|| Error::usage(format!("record file name without sequence: {name}")))?;
        Ok(Self {
            path,
            name,
            sequence,
        })
    }
}

/// Finds the sales record files in `dir`, sorted by name.
///
/// Only regular files whose names match `config.record_pattern` are
/// considered; anything else in the directory is ignored.
///
/// # Errors
///
/// Returns [`Error::NonSequentialRecordFiles`] if the sorted sequence numbers
/// are not consecutive. This is checked for the whole list before any file is
/// read. Failures listing the directory are [`Error::Unknown`].
pub fn discover(dir: impl AsRef<Path>, config: &Config) -> Result<Vec<RecordFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir.as_ref())? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        // `Path::is_file` follows symlinks.
        if !config.record_pattern.is_match(&name) || !entry.path().is_file() {
            continue;
        }
        files.push(RecordFile::new(entry.path(), name)?);
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    check_sequence(&files)?;
    debug!(
        count = files.len(),
        first = files.first().map(|f| f.name.as_str()),
        last = files.last().map(|f| f.name.as_str()),
        "discovered record files"
    );
    Ok(files)
}

fn check_sequence(files: &[RecordFile]) -> Result<()> {
    for pair in files.windows(2) {
        if pair[0].sequence.checked_add(1) != Some(pair[1].sequence) {
            return Err(Error::NonSequentialRecordFiles {
                before: pair[0].name.clone(),
                after: pair[1].name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn touch(dir: &Path, names: &[&str]) {
        for name in names {
            fs::write(dir.join(name), "001\n1\n").unwrap();
        }
    }

    fn names(files: &[RecordFile]) -> Vec<&str> {
        files.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn discover_fn_returns_consecutive_files_in_order() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["00000003.rcd", "00000001.rcd", "00000002.rcd"]);
        let files = discover(dir.path(), &Config::branch_only().unwrap()).unwrap();
        assert_eq!(names(&files), vec!["00000001.rcd", "00000002.rcd", "00000003.rcd"]);
        assert_eq!(files[2].sequence, 3);
        assert_eq!(files[0].path, dir.path().join("00000001.rcd"));
    }

    #[test]
    fn discover_fn_returns_error_for_gap_in_sequence() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["00000001.rcd", "00000003.rcd"]);
        let err = discover(dir.path(), &Config::branch_only().unwrap()).unwrap_err();
        assert!(
            matches!(&err, Error::NonSequentialRecordFiles { before, after }
                if before == "00000001.rcd" && after == "00000003.rcd"),
            "{err:?}"
        );
    }

    #[test]
    fn discover_fn_checks_sequence_before_reading_contents() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("00000001.rcd"), "garbage").unwrap();
        fs::write(dir.path().join("00000005.rcd"), [0xff, 0xfe]).unwrap();
        let err = discover(dir.path(), &Config::branch_only().unwrap()).unwrap_err();
        assert!(matches!(err, Error::NonSequentialRecordFiles { .. }));
    }

    #[test]
    fn discover_fn_ignores_non_matching_entries() {
        let dir = tempdir().unwrap();
        touch(
            dir.path(),
            &[
                "00000001.rcd",
                "00000002.rcd",
                "00000004.RCD",
                "0000004.rcd",
                "00000009.rcd.bak",
                "branch.lst",
                "abcdefgh.rcd",
            ],
        );
        fs::create_dir(dir.path().join("00000003.rcd")).unwrap();
        let files = discover(dir.path(), &Config::branch_only().unwrap()).unwrap();
        assert_eq!(names(&files), vec!["00000001.rcd", "00000002.rcd"]);
    }

    #[cfg(unix)]
    #[test]
    fn discover_fn_follows_symlinked_records() {
        let dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        touch(dir.path(), &["00000001.rcd"]);
        touch(elsewhere.path(), &["target"]);
        std::os::unix::fs::symlink(
            elsewhere.path().join("target"),
            dir.path().join("00000002.rcd"),
        )
        .unwrap();
        let files = discover(dir.path(), &Config::branch_only().unwrap()).unwrap();
        assert_eq!(names(&files), vec!["00000001.rcd", "00000002.rcd"]);
    }

    #[cfg(unix)]
    #[test]
    fn discover_fn_skips_symlinked_directories() {
        let dir = tempdir().unwrap();
        let elsewhere = tempdir().unwrap();
        touch(dir.path(), &["00000001.rcd"]);
        std::os::unix::fs::symlink(elsewhere.path(), dir.path().join("00000002.rcd")).unwrap();
        let files = discover(dir.path(), &Config::branch_only().unwrap()).unwrap();
        assert_eq!(names(&files), vec!["00000001.rcd"]);
    }

    #[test]
    fn discover_fn_returns_empty_list_for_no_records() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["branch.lst"]);
        let files = discover(dir.path(), &Config::branch_only().unwrap()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn discover_fn_accepts_sequence_not_starting_at_one() {
        let dir = tempdir().unwrap();
        touch(dir.path(), &["20240101.rcd", "20240102.rcd"]);
        let files = discover(dir.path(), &Config::branch_only().unwrap()).unwrap();
        assert_eq!(names(&files), vec!["20240101.rcd", "20240102.rcd"]);
    }

    #[test]
    fn discover_fn_returns_unknown_error_for_missing_directory() {
        let dir = tempdir().unwrap();
        let err = discover(dir.path().join("nope"), &Config::branch_only().unwrap()).unwrap_err();
        assert!(matches!(err, Error::Unknown(_)));
    }
}
