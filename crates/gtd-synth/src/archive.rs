//! CSV rendering and zip packaging.

use std::fs::File;
use std::io::{Cursor, Write};
use std::path::Path;

use gtd_dataset::TextEncoding;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::Result;
use crate::generator::{SyntheticEvent, HEADERS};

/// Entry name of the CSV inside the archive.
pub const ENTRY_NAME: &str = "globalterrorismdb_0718dist.csv";

/// Render events as CSV text with a header row.
///
/// # Errors
///
/// CSV writer failures.
pub fn to_csv(events: &[SyntheticEvent]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;
    for event in events {
        writer.write_record(event.to_record())?;
    }
    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Encode `csv` and pack it as the single entry of a deflated zip.
///
/// # Errors
///
/// Characters the encoding cannot represent, or zip writer failures.
pub fn archive_bytes(csv: &str, encoding: TextEncoding) -> Result<Vec<u8>> {
    let encoded = encoding.encode(csv)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(ENTRY_NAME, options)?;
    zip.write_all(&encoded)?;

    Ok(zip.finish()?.into_inner())
}

/// Write the archive to `path`, returning its size in bytes.
///
/// # Errors
///
/// See [`archive_bytes`], plus file IO errors.
pub fn write_archive(path: &Path, csv: &str, encoding: TextEncoding) -> Result<usize> {
    let bytes = archive_bytes(csv, encoding)?;
    let mut file = File::create(path)?;
    file.write_all(&bytes)?;
    file.sync_all()?;

    tracing::info!(path = %path.display(), bytes = bytes.len(), "Archive written");
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::{EventGenerator, SynthConfig};
    use gtd_domain::VEHICLE_LABEL;

    fn events(count: usize, seed: u64) -> Vec<SyntheticEvent> {
        let config = SynthConfig {
            events: count,
            seed,
            ..SynthConfig::default()
        };
        EventGenerator::new(config).unwrap().generate()
    }

    #[test]
    fn test_same_seed_same_csv() {
        let a = to_csv(&events(100, 9)).unwrap();
        let b = to_csv(&events(100, 9)).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with("eventid,iyear,imonth"));
        assert_eq!(a.lines().count(), 101);
    }

    #[test]
    fn test_archive_loads_through_dataset_loader() {
        let generated = events(3000, 42);
        let csv = to_csv(&generated).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gtd.zip");
        write_archive(&path, &csv, TextEncoding::Latin1).unwrap();

        let table = gtd_dataset::load(&path, TextEncoding::Latin1).unwrap();
        assert_eq!(table.len(), generated.len());
        assert!(table
            .iter()
            .any(|e| e.weapon_type.as_deref() == Some(VEHICLE_LABEL)));
        assert!(table
            .iter()
            .any(|e| e.country.as_deref() == Some("Côte d'Ivoire")));
    }

    #[test]
    fn test_latin1_archive_differs_from_utf8() {
        let csv = "country_txt\nCôte d'Ivoire\n";
        let latin1 = gtd_dataset::load_from_reader(
            Cursor::new(archive_bytes(csv, TextEncoding::Latin1).unwrap()),
            TextEncoding::Utf8,
        );
        assert!(latin1.is_err());
    }
}
