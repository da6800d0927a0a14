//! Transfer engine
//!
//! Walks either the local tree (upload) or the remote prefix (download) and
//! performs one object transfer per file. Every planned transfer is reported
//! to the caller before it is attempted, dry-run or not. The first failure
//! ends the run.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::error::{Error, Result};
use crate::options::{Direction, TransferOptions};
use crate::path::RemoteLocator;
use crate::traits::{CannedAcl, ObjectStore};
use crate::translate;

/// Delimiter used to browse the key space one level at a time
pub const DELIMITER: &str = "/";

/// A single planned file transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Upload { local: PathBuf, key: String },
    Download { key: String, local: PathBuf },
}

impl std::fmt::Display for Transfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transfer::Upload { local, key } => {
                write!(f, "upload '{}' -> '{key}'", local.display())
            }
            Transfer::Download { key, local } => {
                write!(f, "download {key} -> {}", local.display())
            }
        }
    }
}

/// Totals for a finished run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncSummary {
    /// Files transferred, or planned in dry-run mode
    pub files: u64,
    /// Bytes moved; always zero in dry-run mode
    pub bytes: u64,
}

/// Run a sync in the direction recorded in `options`
pub async fn run(
    store: &dyn ObjectStore,
    options: &TransferOptions,
    on_transfer: &mut (dyn FnMut(&Transfer) + Send),
) -> Result<SyncSummary> {
    match options.direction {
        Direction::Upload => upload(store, options, on_transfer).await,
        Direction::Download => download(store, options, on_transfer).await,
    }
}

/// Upload every regular file under the local source to the bucket
pub async fn upload(
    store: &dyn ObjectStore,
    options: &TransferOptions,
    on_transfer: &mut (dyn FnMut(&Transfer) + Send),
) -> Result<SyncSummary> {
    let root = options.local_root();
    let remote = options.remote_root();

    tokio::fs::metadata(&root)
        .await
        .map_err(|e| Error::local_io(&root, e))?;

    let files = walk_files(&root)?;
    tracing::debug!(root = %root.display(), count = files.len(), "walked local tree");

    let mut summary = SyncSummary::default();
    for file in files {
        let key = translate::local_to_key(&root, &file, &remote.key)?;
        let transfer = Transfer::Upload {
            local: file.clone(),
            key: key.clone(),
        };
        on_transfer(&transfer);
        summary.files += 1;

        if options.dry_run {
            continue;
        }

        let data = tokio::fs::read(&file)
            .await
            .map_err(|e| Error::local_io(&file, e))?;
        let size = data.len() as u64;
        let content_type = mime_guess::from_path(&file)
            .first()
            .map(|m| m.essence_str().to_string());

        store
            .put_object(
                &remote.with_key(key),
                data,
                content_type,
                CannedAcl::BucketOwnerFullControl,
            )
            .await?;
        summary.bytes += size;
    }

    Ok(summary)
}

/// Download every object under the remote source into the local destination
///
/// Each level is listed with a `/` delimiter. Objects are downloaded as they
/// are listed and child prefixes are visited afterwards, depth first, in
/// listing order.
pub async fn download(
    store: &dyn ObjectStore,
    options: &TransferOptions,
    on_transfer: &mut (dyn FnMut(&Transfer) + Send),
) -> Result<SyncSummary> {
    let root = options.remote_root();
    let dest = options.local_root();

    let mut summary = SyncSummary::default();
    let mut pending = vec![root.key.clone()];

    while let Some(prefix) = pending.pop() {
        let location = root.with_key(prefix.as_str());
        let mut children = Vec::new();
        let mut continuation_token = None;

        loop {
            let page = store
                .list_objects(&location, DELIMITER, continuation_token.take())
                .await?;
            tracing::debug!(
                prefix = %location.key,
                objects = page.objects.len(),
                prefixes = page.common_prefixes.len(),
                "listed page"
            );

            for key in page.objects {
                if !root.contains(&key) {
                    tracing::debug!(%key, "skipping key outside source prefix");
                    continue;
                }

                if key.ends_with(DELIMITER) {
                    let dir = translate::key_to_local(&root, &key, &dest)?;
                    if !options.dry_run {
                        tokio::fs::create_dir_all(&dir)
                            .await
                            .map_err(|e| Error::local_io(&dir, e))?;
                    }
                    continue;
                }

                let local = download_target(&root, &key, &dest)?;
                let transfer = Transfer::Download {
                    key: key.clone(),
                    local: local.clone(),
                };
                on_transfer(&transfer);
                summary.files += 1;

                if !options.dry_run {
                    summary.bytes += fetch(store, &root.with_key(key), &local).await?;
                }
            }

            for child in page.common_prefixes {
                if child == prefix || !root.contains(&child) {
                    tracing::debug!(prefix = %child, "skipping prefix");
                    continue;
                }
                children.push(child);
            }

            match page.next_continuation_token {
                Some(token) => continuation_token = Some(token),
                None => break,
            }
        }

        pending.extend(children.into_iter().rev());
    }

    Ok(summary)
}

/// Local path for `key`; a single object copied onto an existing directory
/// lands inside it under its own name
fn download_target(root: &RemoteLocator, key: &str, dest: &Path) -> Result<PathBuf> {
    let local = translate::key_to_local(root, key, dest)?;
    if key == root.key && local.is_dir() {
        if let Some(name) = key.rsplit(DELIMITER).next().filter(|n| !n.is_empty()) {
            return Ok(local.join(name));
        }
    }
    Ok(local)
}

async fn fetch(store: &dyn ObjectStore, location: &RemoteLocator, local: &Path) -> Result<u64> {
    let mut body = store.get_object(location).await?;

    if let Some(parent) = local.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| Error::local_io(parent, e))?;
    }

    let mut file = tokio::fs::File::create(local)
        .await
        .map_err(|e| Error::local_io(local, e))?;
    let written = tokio::io::copy(&mut body, &mut file)
        .await
        .map_err(|e| Error::local_io(local, e))?;
    file.flush().await.map_err(|e| Error::local_io(local, e))?;

    Ok(written)
}

/// Collect every regular file under `root`
///
/// Directories are only traversed. Symlinks are followed for files but never
/// descended into, so a link cycle cannot make the walk loop.
fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    let mut dirs = vec![root.to_path_buf()];
    while let Some(dir) = dirs.pop() {
        let entries = std::fs::read_dir(&dir).map_err(|e| Error::local_io(&dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| Error::local_io(&dir, e))?;
            let path = entry.path();
            let file_type = entry
                .file_type()
                .map_err(|e| Error::local_io(&path, e))?;

            if file_type.is_dir() {
                dirs.push(path);
            } else if path.is_file() {
                files.push(path);
            } else {
                tracing::debug!(path = %path.display(), "skipping non-regular entry");
            }
        }
    }

    Ok(files)
}
