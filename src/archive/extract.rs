//! Zip payload extraction
//!
//! Entries are flattened: only the part of the entry name after its last
//! `/` is kept, and the file is written directly into the output folder.
//! Before anything is written for an entry, its name is checked twice:
//! - the internal name may not be absolute or contain `..` segments
//! - the cleaned destination must sit strictly inside the cleaned output
//!   folder, compared component by component
//!
//! Either failure aborts the whole archive with [`ArchiveError::IllegalPath`].

use crate::archive::ArchiveError;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use zip::ZipArchive;

/// Extracts every entry of `archive` ending in `payload_extension`
///
/// # Returns
///
/// * `Ok(Vec<PathBuf>)` - Files written, in archive order
/// * `Err(ArchiveError)` - The archive could not be read, an entry could not
///   be written, or an entry name tried to leave the output folder
pub fn extract_payloads(
    archive: &Path,
    output_folder: &Path,
    payload_extension: &str,
) -> Result<Vec<PathBuf>, ArchiveError> {
    let root = absolute_root(output_folder)?;

    let file = File::open(archive).map_err(|e| ArchiveError::io(archive, e))?;
    let mut zip = ZipArchive::new(file).map_err(|source| ArchiveError::Open {
        path: archive.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index).map_err(|source| ArchiveError::Entry {
            path: archive.to_path_buf(),
            index,
            source,
        })?;

        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        if !has_extension(&name, payload_extension) {
            tracing::trace!("Skipping {}", name);
            continue;
        }

        let destination = destination_for(&root, &name)?;

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).map_err(|e| ArchiveError::io(parent, e))?;
        }

        let mut output =
            File::create(&destination).map_err(|e| ArchiveError::io(&destination, e))?;
        io::copy(&mut entry, &mut output).map_err(|e| ArchiveError::io(&destination, e))?;

        // Owner read and write are always kept so reruns can overwrite
        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode((mode & 0o777) | 0o600);
            fs::set_permissions(&destination, perms)
                .map_err(|e| ArchiveError::io(&destination, e))?;
        }

        tracing::info!("Extracted {}", destination.display());
        written.push(destination);
    }

    Ok(written)
}

/// Returns true if `name`'s extension, from its last `.`, equals `extension`
/// ignoring ASCII case
pub fn has_extension(name: &str, extension: &str) -> bool {
    name.rfind('.')
        .map(|index| name[index..].eq_ignore_ascii_case(extension))
        .unwrap_or(false)
}

/// Lexically normalizes a path, resolving `.` and `..` without touching the
/// filesystem
///
/// `..` at the root is dropped; leading `..` on a relative path is kept.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match cleaned.components().next_back() {
                Some(Component::Normal(_)) => {
                    cleaned.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => cleaned.push(".."),
            },
            other => cleaned.push(other.as_os_str()),
        }
    }

    if cleaned.as_os_str().is_empty() {
        cleaned.push(".");
    }
    cleaned
}

fn absolute_root(output_folder: &Path) -> Result<PathBuf, ArchiveError> {
    if output_folder.is_absolute() {
        return Ok(clean_path(output_folder));
    }

    let cwd = std::env::current_dir().map_err(|e| ArchiveError::io(output_folder, e))?;
    Ok(clean_path(&cwd.join(output_folder)))
}

/// Computes the flattened destination of entry `name` under `root`
fn destination_for(root: &Path, name: &str) -> Result<PathBuf, ArchiveError> {
    let illegal = || ArchiveError::IllegalPath {
        path: root.join(name),
    };

    // Backslashes count as separators so names built on Windows are checked too
    let internal = name.replace('\\', "/");
    let internal = Path::new(&internal);
    if internal
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        return Err(illegal());
    }

    let base = match name.rfind('/') {
        Some(index) => &name[index + 1..],
        None => name,
    };

    let destination = clean_path(&root.join(base));
    if destination == root || !destination.starts_with(root) {
        return Err(illegal());
    }

    Ok(destination)
}
