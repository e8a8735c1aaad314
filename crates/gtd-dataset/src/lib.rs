//! # GTD Dataset
//!
//! Data preparation for the GTD Insight service: turns the packaged dataset archive
//! into an immutable table of [`EventRecord`](gtd_domain::EventRecord)s.
//!
//! ```text
//! zip archive ──▶ single .csv entry ──▶ decode (ISO-8859-1) ──▶ parse + select
//!                                                              │
//!                                                              ▼
//!                                      rename, Total_Casualties, Weapon_Type fix
//!                                                              │
//!                                                              ▼
//!                                                         EventTable
//! ```
//!
//! Any failure along the way is fatal: the caller is expected to abort startup.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod archive;
pub mod encoding;
pub mod error;
pub mod prepare;
pub mod table;

use std::io::{Read, Seek};
use std::path::Path;

pub use archive::{read_data_file, read_data_file_from, DataFile};
pub use encoding::TextEncoding;
pub use error::{DatasetError, Result};
pub use prepare::{parse_events, SOURCE_COLUMNS};
pub use table::EventTable;

/// Load and prepare the event table from the archive at `path`.
///
/// # Errors
///
/// Any [`DatasetError`]; none of them are retryable.
pub fn load(path: &Path, encoding: TextEncoding) -> Result<EventTable> {
    tracing::info!(path = %path.display(), %encoding, "Loading dataset archive");
    let file = read_data_file(path)?;
    prepare(file, encoding)
}

/// Same as [`load`] for an archive already held in memory.
///
/// # Errors
///
/// Any [`DatasetError`].
pub fn load_from_reader<R: Read + Seek>(reader: R, encoding: TextEncoding) -> Result<EventTable> {
    let file = read_data_file_from(reader)?;
    prepare(file, encoding)
}

fn prepare(file: DataFile, encoding: TextEncoding) -> Result<EventTable> {
    let DataFile { name, bytes } = file;
    let size = bytes.len();
    let text = encoding.decode(bytes)?;
    let table = parse_events(&text)?;

    tracing::info!(
        entry = %name,
        bytes = size,
        events = table.len(),
        "Dataset prepared"
    );

    Ok(table)
}
