//! In-memory zip assembly for the export response.

use std::fs::File;
use std::io::{self, Cursor};
use std::path::Path;

use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::tricount::export::Artifact;

/// Builds a deflate-compressed zip from the ordered artifact list.
///
/// A file artifact is stored under its base name; a directory artifact is
/// walked recursively and stored as `<dir-name>/<relative-path>`. An empty
/// artifact list yields a valid, empty archive.
pub fn build_archive(artifacts: &[Artifact]) -> Result<Vec<u8>> {
    let cursor = Cursor::new(Vec::new());
    let mut zip = ZipWriter::new(cursor);

    let file_opts = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o644);

    for artifact in artifacts {
        match artifact {
            Artifact::File(path) => {
                append_file(&mut zip, path, &entry_name(path), file_opts)?;
            }
            Artifact::Directory(path) => {
                append_directory(&mut zip, path, &entry_name(path), file_opts)?;
            }
        }
    }

    Ok(zip.finish()?.into_inner())
}

/// Base name of a path, lossily decoded for use as a zip entry name.
fn entry_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn append_file(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    path: &Path,
    name: &str,
    opts: FileOptions,
) -> Result<()> {
    zip.start_file(name, opts)?;
    let mut file = File::open(path)?;
    io::copy(&mut file, zip)?;
    Ok(())
}

/// Recursively appends every file under `dir`. Entries are visited in
/// name order so the archive layout is deterministic for fixed contents.
fn append_directory(
    zip: &mut ZipWriter<Cursor<Vec<u8>>>,
    dir: &Path,
    prefix: &str,
    opts: FileOptions,
) -> Result<()> {
    let mut entries: Vec<_> = std::fs::read_dir(dir)?.collect::<io::Result<_>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let name = format!("{}/{}", prefix, entry.file_name().to_string_lossy());
        if path.is_dir() {
            append_directory(zip, &path, &name, opts)?;
        } else {
            append_file(zip, &path, &name, opts)?;
        }
    }
    Ok(())
}
