//! CSV loading for the preset tables
//!
//! One table per family, each with a named-column header row. Loading
//! is all-or-nothing per family: the first invalid row aborts that
//! family's load with its 1-based row number (header = row 1).

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::{debug, info};

use crate::catalog::error::CatalogError;
use crate::catalog::preset::{Family, Preset};

/// Table file name for the Ferrule family
pub const FERRULE_TABLE: &str = "presets_ferrule_din32676a.csv";
/// Table file name for the Gasket family
pub const GASKET_TABLE: &str = "presets_gasket_din32676a.csv";

/// Per-family existence of the backing tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Availability {
    pub ferrule: bool,
    pub gasket: bool,
}

impl Availability {
    pub fn get(&self, family: Family) -> bool {
        match family {
            Family::Ferrule => self.ferrule,
            Family::Gasket => self.gasket,
        }
    }
}

/// Result of attempting a full load of one family
#[derive(Debug, Clone, Default)]
pub struct FamilyIntegrity {
    pub valid: bool,
    pub errors: Vec<String>,
    pub record_count: usize,
}

/// Integrity report across both tables; a failure in one family does
/// not suppress the report on the other
#[derive(Debug, Clone, Default)]
pub struct IntegrityReport {
    pub ferrule: FamilyIntegrity,
    pub gasket: FamilyIntegrity,
}

impl IntegrityReport {
    pub fn get(&self, family: Family) -> &FamilyIntegrity {
        match family {
            Family::Ferrule => &self.ferrule,
            Family::Gasket => &self.gasket,
        }
    }

    pub fn all_valid(&self) -> bool {
        self.ferrule.valid && self.gasket.valid
    }
}

/// Loader for the two preset tables under a data directory
#[derive(Debug, Clone)]
pub struct CsvLoader {
    data_dir: PathBuf,
}

impl CsvLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of the table backing the given family
    pub fn table_path(&self, family: Family) -> PathBuf {
        let file = match family {
            Family::Ferrule => FERRULE_TABLE,
            Family::Gasket => GASKET_TABLE,
        };
        self.data_dir.join(file)
    }

    /// Load and validate every row of one family's table.
    ///
    /// Fails fast on a missing file, on a header missing required
    /// columns (before any row is read), and on the first invalid row.
    pub fn load_family(&self, family: Family) -> Result<Vec<Preset>, CatalogError> {
        let path = self.table_path(family);
        if !path.exists() {
            return Err(CatalogError::TableNotFound { family, path });
        }

        info!(family = %family, path = %path.display(), "loading preset table");

        let file = File::open(&path).map_err(|e| CatalogError::Csv {
            family,
            source: csv::Error::from(e),
        })?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(BufReader::new(file));

        let headers = reader
            .headers()
            .map_err(|e| CatalogError::Csv { family, source: e })?
            .clone();
        validate_headers(family, &headers)?;

        let mut presets = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let row = row_idx + 2;
            let record = result.map_err(|e| CatalogError::Csv { family, source: e })?;

            // Zip against the header; short records simply leave the
            // trailing columns absent for the validator to judge.
            let fields: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();

            let preset = Preset::from_row(family, &fields)
                .map_err(|source| CatalogError::Row { row, source })?;
            debug!(preset = %preset, "loaded preset");
            presets.push(preset);
        }

        info!(family = %family, count = presets.len(), "preset table loaded");
        Ok(presets)
    }

    /// Cheap existence probe, no parsing
    pub fn check_availability(&self) -> Availability {
        Availability {
            ferrule: self.table_path(Family::Ferrule).exists(),
            gasket: self.table_path(Family::Gasket).exists(),
        }
    }

    /// Attempt a full load of each family independently and report
    pub fn check_integrity(&self) -> IntegrityReport {
        let mut report = IntegrityReport::default();
        for family in Family::all() {
            let entry = match family {
                Family::Ferrule => &mut report.ferrule,
                Family::Gasket => &mut report.gasket,
            };
            match self.load_family(*family) {
                Ok(presets) => {
                    entry.valid = true;
                    entry.record_count = presets.len();
                }
                Err(e) => entry.errors.push(e.to_string()),
            }
        }
        report
    }
}

fn validate_headers(family: Family, headers: &csv::StringRecord) -> Result<(), CatalogError> {
    let present: Vec<&str> = headers.iter().map(|h| h.trim()).collect();
    let missing: Vec<String> = family
        .required_columns()
        .iter()
        .filter(|col| !present.contains(*col))
        .map(|col| col.to_string())
        .collect();

    if headers.is_empty() || !missing.is_empty() {
        return Err(CatalogError::MissingColumns { family, missing });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const FERRULE_HEADER: &str = "Size,DN,FlangeOD_mm,C2_mm,TubeID_mm,PassageDia_mm,HeightTube_mm,HeightProfile_mm,SeatLipWidth_mm,Standard";
    const GASKET_HEADER: &str =
        "Size,DN,FlangeOD_mm,GasketOD_mm,GasketID_mm,BeadC2_mm,ProfileH_mm,SeatLipWidth_mm,Standard";

    fn write_ferrule(dir: &Path, rows: &[&str]) {
        let mut content = String::from(FERRULE_HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        fs::write(dir.join(FERRULE_TABLE), content).unwrap();
    }

    fn write_gasket(dir: &Path, rows: &[&str]) {
        let mut content = String::from(GASKET_HEADER);
        for row in rows {
            content.push('\n');
            content.push_str(row);
        }
        fs::write(dir.join(GASKET_TABLE), content).unwrap();
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempdir().unwrap();
        let loader = CsvLoader::new(dir.path());
        let err = loader.load_family(Family::Ferrule).unwrap_err();
        assert!(matches!(err, CatalogError::TableNotFound { .. }));
    }

    #[test]
    fn test_missing_column_fails_before_rows() {
        let dir = tempdir().unwrap();
        // Header lacks PassageDia_mm; the lone row is itself invalid,
        // but the schema failure must win.
        let header = FERRULE_HEADER.replace(",PassageDia_mm", "");
        fs::write(
            dir.path().join(FERRULE_TABLE),
            format!("{}\nnot,a,valid,row,at,all,x,y,z", header),
        )
        .unwrap();

        let loader = CsvLoader::new(dir.path());
        let err = loader.load_family(Family::Ferrule).unwrap_err();
        match err {
            CatalogError::MissingColumns { missing, .. } => {
                assert_eq!(missing, vec!["PassageDia_mm".to_string()]);
            }
            other => panic!("expected MissingColumns, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_table_loads_in_order() {
        let dir = tempdir().unwrap();
        write_ferrule(
            dir.path(),
            &[
                "1.5\",DN40,64.0,43.5,38.4,38.0,21.5,4.0,2.0,DIN 32676 A",
                "3\",DN80,106.0,83.5,81.2,81.0,21.5,4.5,2.0,DIN 32676 A",
            ],
        );

        let loader = CsvLoader::new(dir.path());
        let presets = loader.load_family(Family::Ferrule).unwrap();
        assert_eq!(presets.len(), 2);
        assert_eq!(presets[0].display_name(), "Ferrule_1.5in_DN40");
        assert_eq!(presets[1].display_name(), "Ferrule_3.0in_DN80");
    }

    #[test]
    fn test_bad_row_reports_row_number() {
        let dir = tempdir().unwrap();
        write_ferrule(
            dir.path(),
            &[
                "1.5\",DN40,64.0,43.5,38.4,38.0,21.5,4.0,2.0,DIN 32676 A",
                "2\",DN50,77.5,56.5,bad,49.6,21.5,4.0,2.0,DIN 32676 A",
            ],
        );

        let loader = CsvLoader::new(dir.path());
        let err = loader.load_family(Family::Ferrule).unwrap_err();
        match err {
            CatalogError::Row { row, .. } => assert_eq!(row, 3),
            other => panic!("expected Row error, got {:?}", other),
        }
    }

    #[test]
    fn test_values_are_trimmed() {
        let dir = tempdir().unwrap();
        write_gasket(
            dir.path(),
            &[" 3\" , DN80 ,106.0,106.0,81.2,83.5,4.5,2.0, DIN 32676 A "],
        );

        let loader = CsvLoader::new(dir.path());
        let presets = loader.load_family(Family::Gasket).unwrap();
        assert_eq!(presets[0].dn(), "DN80");
        assert_eq!(presets[0].standard(), "DIN 32676 A");
    }

    #[test]
    fn test_check_availability() {
        let dir = tempdir().unwrap();
        write_ferrule(dir.path(), &[]);

        let loader = CsvLoader::new(dir.path());
        let avail = loader.check_availability();
        assert!(avail.ferrule);
        assert!(!avail.gasket);
    }

    #[test]
    fn test_check_integrity_reports_both_families() {
        let dir = tempdir().unwrap();
        write_ferrule(
            dir.path(),
            &["3\",DN80,106.0,83.5,81.2,81.0,21.5,4.5,2.0,DIN 32676 A"],
        );
        // Gasket table absent: its report fails, ferrule's still lands.
        let loader = CsvLoader::new(dir.path());
        let report = loader.check_integrity();
        assert!(report.ferrule.valid);
        assert_eq!(report.ferrule.record_count, 1);
        assert!(!report.gasket.valid);
        assert_eq!(report.gasket.errors.len(), 1);
        assert!(!report.all_valid());
    }
}
