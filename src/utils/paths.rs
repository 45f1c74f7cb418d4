use std::path::{Component, Path, PathBuf};

use crate::error::GopathsError;

pub const LIST_SEPARATOR: char = ':';

/// Resolve `candidate` against `cwd` and normalise it lexically.
///
/// `.` and `..` components are folded without touching the filesystem, and
/// trailing separators are dropped, so `./src/`, `src` and `/home/u/src`
/// (with cwd `/home/u`) all resolve to the same string. A result that is not
/// valid UTF-8 (from a non-UTF-8 `cwd`) is rejected rather than mangled.
pub fn resolve(candidate: &str, cwd: &Path) -> Result<String, GopathsError> {
    let path = Path::new(candidate);
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    normalize(&joined)
        .into_os_string()
        .into_string()
        .map_err(|raw| GopathsError::NonUnicodePath {
            path: PathBuf::from(raw),
        })
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

pub fn join_dir_list<S: AsRef<str>>(dirs: impl IntoIterator<Item = S>) -> String {
    let mut joined = String::new();
    for dir in dirs {
        if !joined.is_empty() {
            joined.push(LIST_SEPARATOR);
        }
        joined.push_str(dir.as_ref());
    }
    joined
}

/// Remove a trailing `segment` (and the separator before it) from a joined list.
pub fn strip_suffix_segment<'a>(list: &'a str, segment: &str) -> Option<&'a str> {
    if segment.is_empty() {
        return None;
    }
    if list == segment {
        return Some("");
    }
    list.strip_suffix(segment)?.strip_suffix(LIST_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved(candidate: &str, cwd: &str) -> String {
        resolve(candidate, Path::new(cwd)).expect("utf-8 path")
    }

    #[test]
    fn relative_paths_join_cwd() {
        assert_eq!(resolved("./src", "/home/u"), "/home/u/src");
        assert_eq!(resolved("src/", "/home/u"), "/home/u/src");
        assert_eq!(resolved("a/../b", "/home/u"), "/home/u/b");
    }

    #[test]
    fn dot_is_the_working_directory() {
        assert_eq!(resolved(".", "/home/u"), "/home/u");
    }

    #[test]
    fn absolute_paths_are_kept_but_normalised() {
        assert_eq!(resolved("/abs/path", "/ignored"), "/abs/path");
        assert_eq!(resolved("/abs/./path/", "/ignored"), "/abs/path");
        assert_eq!(resolved("/../abs", "/ignored"), "/abs");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_cwd_is_rejected() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let cwd = Path::new(OsStr::from_bytes(b"/home/\xffu"));
        let err = resolve("src", cwd).expect_err("non-utf-8 cwd");
        assert!(matches!(err, GopathsError::NonUnicodePath { .. }));
        // Absolute candidates never touch the cwd.
        assert_eq!(resolve("/abs", cwd).expect("absolute"), "/abs");
    }

    #[test]
    fn join_skips_separator_for_single_entry() {
        assert_eq!(join_dir_list(["/a"]), "/a");
        assert_eq!(join_dir_list(["/a", "/b"]), "/a:/b");
        assert_eq!(join_dir_list(Vec::<String>::new()), "");
    }

    #[test]
    fn strip_suffix_segment_requires_separator_boundary() {
        assert_eq!(strip_suffix_segment("/go:/a:/b", "/a:/b"), Some("/go"));
        assert_eq!(strip_suffix_segment("/a:/b", "/a:/b"), Some(""));
        assert_eq!(strip_suffix_segment("/go/a:/b", "a:/b"), None);
        assert_eq!(strip_suffix_segment("/go", ""), None);
    }
}
