//! Absolute, lexically normalised paths for the checks that guard recursive
//! removal.

use std::path::{Component, Path, PathBuf};

/// `path` joined onto `base`, made absolute, with `.` and `..` folded.
///
/// Symlinks are not followed.
pub(crate) fn resolve(base: &Path, path: &Path) -> PathBuf {
    let joined = base.join(path);
    let absolute = std::path::absolute(&joined).unwrap_or(joined);

    let mut normal = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normal.pop();
            }
            other => normal.push(other),
        }
    }
    normal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_folds_parent_dirs() {
        let base = Path::new("/work/web");
        assert_eq!(resolve(base, Path::new("dist/./a")), Path::new("/work/web/dist/a"));
        assert_eq!(resolve(base, Path::new("../web")), Path::new("/work/web"));
        assert_eq!(resolve(base, Path::new("../../..")), Path::new("/"));
        assert_eq!(resolve(base, Path::new("/srv/out")), Path::new("/srv/out"));
    }

    #[test]
    fn test_relative_base_becomes_absolute() {
        assert!(resolve(Path::new("."), Path::new("dist")).is_absolute());
    }
}
