//! Script file loading.
//!
//! Script layers live as plain text files next to the binary. Loading is
//! deliberately forgiving: a file that cannot be opened degrades to empty
//! content instead of failing the boot.

use std::fs;
use std::path::Path;

/// Read a script file fully into memory as text.
///
/// Returns the full contents, or an empty string (plus a warning on stderr)
/// if the file cannot be opened. The caller treats empty text as "load
/// produced no effect". Zero-length files load as empty without a warning.
pub fn load_script_file(path: &Path) -> String {
    match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("[Starwisp] couldn't open {}: {}", path.display(), err);
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let text = load_script_file(&dir.path().join("nope.js"));
        assert_eq!(text, "");
    }

    #[test]
    fn test_zero_length_file_loads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.js");
        fs::write(&path, "").unwrap();
        assert_eq!(load_script_file(&path), "");
    }

    #[test]
    fn test_contents_come_back_verbatim() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("layer.js");
        fs::write(&path, "var answer = 42;\n").unwrap();
        assert_eq!(load_script_file(&path), "var answer = 42;\n");
    }
}
