//! Output file naming
//!
//! Derives `run_weighted.lhe` from `run.lhe`.

use crate::config::OutputNaming;
use crate::types::{Result, RewriteError};
use std::path::{Path, PathBuf};

/// Derive the output path for an input event file
///
/// Only the file name is touched: it is cut at the first occurrence of the
/// extension and the suffix plus extension are appended, so `run.lhe.gz`
/// becomes `run_weighted.lhe`. A file name without the extension keeps its
/// full name and gets suffix plus extension appended.
pub fn derive_output_path(input: &Path, naming: &OutputNaming) -> Result<PathBuf> {
    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RewriteError::OutputPath(format!("{:?} has no usable file name", input)))?;

    let stem = match find_extension(file_name, &naming.extension) {
        Some(pos) => &file_name[..pos],
        None => {
            log::warn!(
                "{:?} does not contain {:?}, appending {}{} to the full name",
                input,
                naming.extension,
                naming.suffix,
                naming.extension
            );
            file_name
        }
    };

    Ok(input.with_file_name(format!("{}{}{}", stem, naming.suffix, naming.extension)))
}

fn find_extension(file_name: &str, extension: &str) -> Option<usize> {
    if extension.is_empty() {
        return None;
    }
    file_name.find(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derive(input: &str) -> PathBuf {
        derive_output_path(Path::new(input), &OutputNaming::default()).unwrap()
    }

    #[test]
    fn test_plain_file_name() {
        assert_eq!(derive("run.lhe"), PathBuf::from("run_weighted.lhe"));
    }

    #[test]
    fn test_parent_directory_is_kept() {
        assert_eq!(
            derive("/data/bb4l/pwgevents.lhe"),
            PathBuf::from("/data/bb4l/pwgevents_weighted.lhe")
        );
        // Only the file name is searched for the extension
        assert_eq!(
            derive("/data/old.lhe.d/run.lhe"),
            PathBuf::from("/data/old.lhe.d/run_weighted.lhe")
        );
    }

    #[test]
    fn test_truncates_at_first_extension() {
        assert_eq!(derive("run.lhe.gz"), PathBuf::from("run_weighted.lhe"));
        assert_eq!(derive("run.lhe.lhe"), PathBuf::from("run_weighted.lhe"));
    }

    #[test]
    fn test_missing_extension_appends_to_full_name() {
        assert_eq!(derive("events.txt"), PathBuf::from("events.txt_weighted.lhe"));
        assert_eq!(derive("events"), PathBuf::from("events_weighted.lhe"));
    }

    #[test]
    fn test_custom_naming() {
        let naming = OutputNaming {
            extension: ".lhef".to_string(),
            suffix: "_xwgtup".to_string(),
        };
        let path = derive_output_path(Path::new("out/run.lhef"), &naming).unwrap();
        assert_eq!(path, PathBuf::from("out/run_xwgtup.lhef"));
    }

    #[test]
    fn test_path_without_file_name_is_rejected() {
        let result = derive_output_path(Path::new(".."), &OutputNaming::default());
        assert!(matches!(result, Err(RewriteError::OutputPath(_))));
    }
}
