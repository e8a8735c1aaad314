//! Column selection, renaming, and derived fields.

use gtd_domain::{normalize_weapon_type, EventRecord};
use serde::Deserialize;

use crate::error::{DatasetError, Result};
use crate::table::EventTable;

/// Source columns read from the data file, in canonical order.
pub const SOURCE_COLUMNS: [&str; 14] = [
    "iyear",
    "imonth",
    "country_txt",
    "region_txt",
    "latitude",
    "longitude",
    "success",
    "attacktype1_txt",
    "targtype1_txt",
    "natlty1_txt",
    "gname",
    "weaptype1_txt",
    "nkill",
    "nwound",
];

/// One row as it appears in the source file. Columns not listed are ignored.
#[derive(Debug, Deserialize)]
struct SourceRow {
    iyear: i32,
    imonth: i32,
    country_txt: Option<String>,
    region_txt: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    success: Option<i32>,
    attacktype1_txt: Option<String>,
    targtype1_txt: Option<String>,
    natlty1_txt: Option<String>,
    gname: Option<String>,
    weaptype1_txt: Option<String>,
    nkill: Option<f64>,
    nwound: Option<f64>,
}

impl From<SourceRow> for EventRecord {
    fn from(row: SourceRow) -> Self {
        Self {
            year: row.iyear,
            month: row.imonth,
            country: row.country_txt,
            region: row.region_txt,
            latitude: row.latitude,
            longitude: row.longitude,
            success_status: row.success,
            attack_type: row.attacktype1_txt,
            target_type: row.targtype1_txt,
            nationality: row.natlty1_txt,
            group_name: row.gname,
            weapon_type: row
                .weaptype1_txt
                .map(|w| normalize_weapon_type(&w).to_string()),
            num_killed: row.nkill,
            num_wounded: row.nwound,
            total_casualties: EventRecord::casualties(row.nkill, row.nwound),
        }
    }
}

/// Parse decoded CSV text into the prepared event table.
///
/// # Errors
///
/// `MissingColumns` if any source column is absent from the header,
/// `Parse` on the first malformed record.
pub fn parse_events(text: &str) -> Result<EventTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = reader.headers()?.clone();
    let missing: Vec<String> = SOURCE_COLUMNS
        .iter()
        .filter(|col| !headers.iter().any(|h| h == **col))
        .map(|col| (*col).to_string())
        .collect();
    if !missing.is_empty() {
        return Err(DatasetError::MissingColumns(missing));
    }

    let events = reader
        .deserialize::<SourceRow>()
        .map(|row| row.map(EventRecord::from).map_err(DatasetError::from))
        .collect::<Result<Vec<_>>>()?;

    Ok(EventTable::new(events))
}
