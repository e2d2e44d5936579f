use std::{
    io,
    path::{Path, PathBuf},
};

/// Trait for types that render to a file on disk
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, creating parent directories, and return its path
    fn write(&self, base: &Path) -> io::Result<PathBuf> {
        let path = self.path(base);
        write_file(&path, &self.render())?;
        Ok(path)
    }
}

fn write_file(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Recursively remove a directory.
///
/// A directory that does not exist is not an error. Returns whether anything
/// was removed.
pub fn remove_dir_if_exists(path: &Path) -> io::Result<bool> {
    match std::fs::remove_dir_all(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Remove a directory with everything below it and create it again empty.
pub fn recreate_dir(path: &Path) -> io::Result<()> {
    remove_dir_if_exists(path)?;
    std::fs::create_dir_all(path)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    struct Note(&'static str);

    impl GeneratedFile for Note {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("notes").join("note.txt")
        }

        fn render(&self) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn test_write_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();

        let path = Note("hello").write(temp.path()).unwrap();

        assert_eq!(path, temp.path().join("notes/note.txt"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp = TempDir::new().unwrap();

        Note("first").write(temp.path()).unwrap();
        let path = Note("second").write(temp.path()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_remove_missing_dir_is_ok() {
        let temp = TempDir::new().unwrap();

        let removed = remove_dir_if_exists(&temp.path().join("nope")).unwrap();

        assert!(!removed);
    }

    #[test]
    fn test_remove_nested_dir() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("dist");
        fs::create_dir_all(dir.join("a/b")).unwrap();
        fs::write(dir.join("a/b/main.js"), "x").unwrap();

        let removed = remove_dir_if_exists(&dir).unwrap();

        assert!(removed);
        assert!(!dir.exists());
    }

    #[test]
    fn test_recreate_dir_empties_contents() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("_build");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("stale.js"), "old").unwrap();

        recreate_dir(&dir).unwrap();

        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }
}
