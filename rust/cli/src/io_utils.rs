//! File and stdin helpers shared by the commands.
//!
//! - Reading one line of interactive input
//! - Creating parent directories before artifacts are written
//! - Opening buffered writers for CSV output

use std::fs::File;
use std::io::{BufRead, BufWriter};
use std::path::Path;

/// Reads a line of input from a buffered reader, blocking until available.
///
/// Whitespace is trimmed. Returns `None` on EOF or read errors.
///
/// # Example
///
/// ```rust,no_run
/// use std::io::{self, BufRead};
/// # use croupier_cli::io_utils::read_stdin_line;
///
/// let stdin = io::stdin();
/// let mut handle = stdin.lock();
/// if let Some(line) = read_stdin_line(&mut handle) {
///     println!("You entered: {}", line);
/// }
/// ```
pub fn read_stdin_line(stdin: &mut dyn BufRead) -> Option<String> {
    let mut line = String::new();
    match stdin.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line.trim().to_string()),
        Err(_) => None,
    }
}

/// Ensure parent directory exists for given path, creating if needed.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// # use croupier_cli::io_utils::ensure_parent_dir;
///
/// ensure_parent_dir(Path::new("models/eval/episodes.csv")).unwrap();
/// ```
pub fn ensure_parent_dir(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Create (or truncate) `path` for buffered writing, creating its parent
/// directory first.
pub fn create_output(path: &Path) -> std::io::Result<BufWriter<File>> {
    ensure_parent_dir(path)?;
    Ok(BufWriter::new(File::create(path)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    #[test]
    fn test_read_stdin_line_valid_input() {
        let mut cursor = Cursor::new(b"red\n");
        assert_eq!(read_stdin_line(&mut cursor), Some("red".to_string()));
    }

    #[test]
    fn test_read_stdin_line_with_whitespace() {
        let mut cursor = Cursor::new(b"  spin  \n");
        assert_eq!(read_stdin_line(&mut cursor), Some("spin".to_string()));
    }

    #[test]
    fn test_read_stdin_line_empty_after_trim() {
        let mut cursor = Cursor::new(b"   \n");
        assert_eq!(read_stdin_line(&mut cursor), Some(String::new()));
    }

    #[test]
    fn test_read_stdin_line_eof() {
        let mut cursor = Cursor::new(b"");
        assert_eq!(read_stdin_line(&mut cursor), None);
    }

    #[test]
    fn test_ensure_parent_dir_creates_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let nested_path = temp_dir.path().join("subdir").join("file.csv");
        ensure_parent_dir(&nested_path).unwrap();
        assert!(temp_dir.path().join("subdir").exists());
    }

    #[test]
    fn test_ensure_parent_dir_no_parent() {
        assert!(ensure_parent_dir(Path::new("file.csv")).is_ok());
    }

    #[test]
    fn test_create_output_writes_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("a").join("b.csv");
        {
            let mut w = create_output(&path).unwrap();
            writeln!(w, "episode,steps").unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "episode,steps\n");
    }
}
