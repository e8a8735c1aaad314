//! Locating the data file inside the packaged archive.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{DatasetError, Result};

const DATA_FILE_SUFFIX: &str = ".csv";

/// Upper bound on the buffer reserved up front from an entry's declared size.
const MAX_PREALLOCATION: u64 = 64 * 1024 * 1024;

/// A located data file and its raw bytes.
#[derive(Debug, Clone)]
pub struct DataFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// Open the archive at `path` and read its single data file.
///
/// # Errors
///
/// `ArchiveNotFound` if nothing exists at `path`; otherwise see
/// [`read_data_file_from`].
pub fn read_data_file(path: &Path) -> Result<DataFile> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DatasetError::ArchiveNotFound(path.to_path_buf()),
        _ => DatasetError::Io(e),
    })?;
    read_data_file_from(BufReader::new(file))
}

/// Read the single data file from an archive held by any seekable reader.
///
/// # Errors
///
/// `Archive` for a malformed container, `NoDataFile` / `AmbiguousDataFiles`
/// unless exactly one `.csv` entry exists.
pub fn read_data_file_from<R: Read + Seek>(reader: R) -> Result<DataFile> {
    let mut archive = ZipArchive::new(reader)?;

    let mut candidates: Vec<String> = archive
        .file_names()
        .filter(|name| is_data_file(name))
        .map(String::from)
        .collect();
    candidates.sort();

    let name = match candidates.len() {
        0 => return Err(DatasetError::NoDataFile),
        1 => candidates.remove(0),
        _ => return Err(DatasetError::AmbiguousDataFiles(candidates)),
    };

    let mut entry = archive.by_name(&name)?;
    let mut bytes = Vec::with_capacity(initial_capacity(entry.size()));
    entry.read_to_end(&mut bytes)?;

    tracing::debug!(entry = %name, bytes = bytes.len(), "Read data file from archive");

    Ok(DataFile { name, bytes })
}

/// The declared size comes from the archive header and is not trusted beyond the cap.
fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared.min(MAX_PREALLOCATION)).unwrap_or(0)
}

fn is_data_file(name: &str) -> bool {
    !name.ends_with('/') && name.to_ascii_lowercase().ends_with(DATA_FILE_SUFFIX)
}
