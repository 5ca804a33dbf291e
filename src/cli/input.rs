//! Report input utilities
//!
//! Reports are read one per line from files, stdin or a directory tree.
//! Blank lines and `#` comments are skipped.

use crate::constants::REPORT_FILE_EXTENSIONS;
use crate::{Error, Result};
use std::io::BufRead;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// One report line and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLine {
    pub source: PathBuf,
    pub line_number: usize,
    pub text: String,
}

fn is_report(line: &str) -> bool {
    let line = line.trim();
    !line.is_empty() && !line.starts_with('#')
}

/// Read report lines from any buffered reader
pub fn read_reports<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut reports = Vec::new();
    for line in reader.lines() {
        let line = line.map_err(|e| Error::io("Failed to read report line".to_string(), e))?;
        if is_report(&line) {
            reports.push(line.trim().to_string());
        }
    }
    Ok(reports)
}

/// Read report lines from stdin
pub fn read_stdin_reports() -> Result<Vec<String>> {
    read_reports(std::io::stdin().lock())
}

/// Read report lines of one file, keeping line numbers
pub fn read_report_file(path: &Path) -> Result<Vec<ReportLine>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read {}", path.display()), e))?;

    Ok(contents
        .lines()
        .enumerate()
        .filter(|(_, line)| is_report(line))
        .map(|(index, line)| ReportLine {
            source: path.to_path_buf(),
            line_number: index + 1,
            text: line.trim().to_string(),
        })
        .collect())
}

/// Report files under `input`: the file itself, or every `.txt` / `.metar`
/// file below a directory, sorted by path
pub fn discover_report_files(input: &Path) -> Result<Vec<PathBuf>> {
    if input.is_file() {
        return Ok(vec![input.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(input) {
        let entry = entry.map_err(|e| {
            Error::directory_traversal(format!("Failed to walk {}", input.display()), e)
        })?;

        let has_report_extension = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| REPORT_FILE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));

        if entry.file_type().is_file() && has_report_extension {
            files.push(entry.into_path());
        }
    }

    files.sort();
    debug!("Discovered {} report files under {}", files.len(), input.display());
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_reports_skips_blanks_and_comments() {
        let input = "# archive of 26th\nKJFK 261651Z 18010KT 10SM FEW250 24/18 A3000\n\n   \n  KXYZ 261651Z NIL=  \n";
        let reports = read_reports(input.as_bytes()).unwrap();

        assert_eq!(
            reports,
            vec![
                "KJFK 261651Z 18010KT 10SM FEW250 24/18 A3000",
                "KXYZ 261651Z NIL="
            ]
        );
    }

    #[test]
    fn test_read_report_file_keeps_line_numbers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("reports.txt");
        fs::write(&path, "# header\nKXYZ 261651Z NIL\n\nLFPG 261630Z 24008KT CAVOK 22/12 Q1015\n")
            .unwrap();

        let lines = read_report_file(&path).unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].line_number, 2);
        assert_eq!(lines[1].line_number, 4);
        assert_eq!(lines[1].source, path);
    }

    #[test]
    fn test_read_missing_file() {
        let result = read_report_file(Path::new("/nonexistent/reports.txt"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }

    #[test]
    fn test_discover_report_files() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("2024").join("06");
        fs::create_dir_all(&nested).unwrap();

        fs::write(temp_dir.path().join("b.txt"), "KXYZ 261651Z NIL\n").unwrap();
        fs::write(nested.join("a.METAR"), "KXYZ 261651Z NIL\n").unwrap();
        fs::write(nested.join("notes.csv"), "ignored\n").unwrap();

        let files = discover_report_files(temp_dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|path| path.extension().is_some()));
        assert!(!files.iter().any(|path| path.ends_with("notes.csv")));

        let single = temp_dir.path().join("b.txt");
        assert_eq!(discover_report_files(&single).unwrap(), vec![single]);
    }

    #[test]
    fn test_discover_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        assert!(discover_report_files(temp_dir.path()).unwrap().is_empty());
    }
}
