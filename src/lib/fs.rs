//! File utilities: manifest loading, source discovery, and rewriting files in place.

use std::{
    ffi::OsStr,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;

use crate::config::DiscoverySection;
use crate::lib::errors::{FileError, ManifestError};

const UTF8_BOM: char = '\u{feff}';

/// Load the list of files to process from a manifest.
///
/// One path per line; a leading BOM is tolerated, surrounding whitespace is
/// trimmed and blank lines are skipped.
pub fn read_manifest(path: &Path) -> Result<Vec<PathBuf>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ManifestError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            ManifestError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    Ok(content
        .trim_start_matches(UTF8_BOM)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// Write a manifest listing `paths`, one per line.
pub fn write_manifest(path: &Path, paths: &[PathBuf]) -> Result<(), FileError> {
    let mut body = paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join("\n");
    body.push('\n');
    fs::write(path, body).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read a source file as UTF-8 text.
pub fn read_source(path: &Path) -> Result<String, FileError> {
    fs::read_to_string(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Replace `path` with `contents` through a temporary file in the same directory.
pub fn write_source(path: &Path, contents: &str) -> Result<(), FileError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let mut temp = NamedTempFile::new_in(&dir).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    temp.write_all(contents.as_bytes())
        .and_then(|_| temp.flush())
        .map_err(|source| FileError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    temp.persist(path).map_err(|err| FileError::Persist {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}

/// Recursively list files under `root`, pruning directories for which
/// `should_skip_dir` returns true. A missing root yields an empty list.
pub fn walk_files(
    root: &Path,
    should_skip_dir: impl Fn(&Path) -> bool,
) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    walk_files_inner(root, &should_skip_dir, &mut out)?;
    Ok(out)
}

fn walk_files_inner(
    dir: &Path,
    should_skip_dir: &impl Fn(&Path) -> bool,
    out: &mut Vec<PathBuf>,
) -> io::Result<()> {
    if should_skip_dir(dir) {
        return Ok(());
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(err) => return Err(err),
    };

    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        let ty = entry.file_type()?;
        if ty.is_dir() {
            walk_files_inner(&path, should_skip_dir, out)?;
            continue;
        }
        if ty.is_file() {
            out.push(path);
        }
    }

    Ok(())
}

/// List source files under `root` matching the discovery rules, sorted by path.
///
/// A file matches when its extension equals `extension`, its name does not
/// end with `exclude_suffix`, and no directory between `root` and the file is
/// named in `skip_dirs`.
pub fn discover_source_files(root: &Path, rules: &DiscoverySection) -> io::Result<Vec<PathBuf>> {
    let mut files = walk_files(root, |dir| should_skip_dir(root, dir, &rules.skip_dirs))?;
    files.retain(|file| matches_rules(file, rules));
    files.sort();
    Ok(files)
}

fn should_skip_dir(root: &Path, dir: &Path, skip_dirs: &[String]) -> bool {
    let rel = rel_from(root, dir);
    rel.components()
        .any(|c| skip_dirs.iter().any(|skip| c.as_os_str() == OsStr::new(skip)))
}

fn matches_rules(path: &Path, rules: &DiscoverySection) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if !rules.exclude_suffix.is_empty() && name.ends_with(&rules.exclude_suffix) {
        return false;
    }
    path.extension() == Some(OsStr::new(&rules.extension))
}

/// `path` relative to `root`, or `path` itself when it lies elsewhere.
pub fn rel_from(root: &Path, path: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(p) => p.to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}
