//! Rebasing paths between the local and remote namespaces
//!
//! Both directions strip the configured source root from the front of an
//! entry and join what remains onto the destination root. Keys always use
//! `/`; local paths are joined component by component so the host separator
//! never leaks into a key.

use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::path::RemoteLocator;

/// Compute the object key for a local `file` found under `root`
///
/// When `file` is the root itself (a single-file upload), the key is
/// `dest_key` unless that is empty or ends with `/`, in which case the file
/// name is appended.
pub fn local_to_key(root: &Path, file: &Path, dest_key: &str) -> Result<String> {
    let relative = file.strip_prefix(root).map_err(|_| {
        Error::InvalidPath(format!(
            "'{}' is not under '{}'",
            file.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(
                part.to_str()
                    .ok_or_else(|| {
                        Error::InvalidPath(format!("'{}' is not valid UTF-8", file.display()))
                    })?
                    .to_string(),
            ),
            Component::CurDir => {}
            _ => {
                return Err(Error::InvalidPath(format!(
                    "unexpected component in '{}'",
                    relative.display()
                )));
            }
        }
    }

    if parts.is_empty() && (dest_key.is_empty() || dest_key.ends_with('/')) {
        let name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::InvalidPath(format!("'{}' has no file name", file.display())))?;
        return Ok(format!("{dest_key}{name}"));
    }

    Ok(join_key(dest_key, &parts.join("/")))
}

/// Compute the local path for `key` listed under the remote `root`
///
/// Empty and `.` segments are dropped. A `..` segment is rejected so a key
/// can never resolve outside `dest`.
pub fn key_to_local(root: &RemoteLocator, key: &str, dest: &Path) -> Result<PathBuf> {
    if !root.contains(key) {
        return Err(Error::InvalidPath(format!(
            "'{key}' is not under '{}'",
            root.key
        )));
    }

    let remainder = key.strip_prefix(root.key.as_str()).unwrap_or(key);

    let mut path = dest.to_path_buf();
    for segment in remainder.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                return Err(Error::InvalidPath(format!(
                    "key '{key}' escapes the destination directory"
                )));
            }
            _ => path.push(segment),
        }
    }

    Ok(path)
}

/// Join a relative key onto a key prefix with exactly one `/`
pub fn join_key(base: &str, relative: &str) -> String {
    let base = base.trim_end_matches('/');
    let relative = relative.trim_start_matches('/');
    match (base.is_empty(), relative.is_empty()) {
        (true, _) => relative.to_string(),
        (false, true) => base.to_string(),
        (false, false) => format!("{base}/{relative}"),
    }
}
