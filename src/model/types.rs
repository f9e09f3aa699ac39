//! Normalized catalog entity structs.

use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One experiment in the catalog, keyed by its unique name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub experiment: String,
    pub description: Option<String>,
    pub notes: Option<String>,
    pub contact: Option<String>,
    pub email: Option<String>,
    /// Number of output files recorded for the experiment.
    pub ncfiles: Option<i64>,
    pub created: Option<NaiveDateTime>,
    /// Curated tags used for experiment filtering.
    #[serde(default)]
    pub keywords: BTreeSet<String>,
}

/// One row of the joined (experiment × variable × frequency) metadata table.
///
/// The `restart` and `coordinate` flags are derived from `file_pattern` and
/// `units` once at load time via [`VariableRecord::derive_flags`] and are
/// never set independently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableRecord {
    /// Owning experiment.
    pub experiment: String,
    pub name: String,
    #[serde(default)]
    pub long_name: String,
    #[serde(default)]
    pub standard_name: String,
    #[serde(default)]
    pub units: String,
    /// Diagnostic output frequency, e.g. "1 monthly". Absent for files with
    /// no time axis.
    #[serde(default)]
    pub frequency: Option<String>,
    /// Path pattern of the file(s) this row was read from.
    pub file_pattern: String,
    #[serde(default)]
    pub file_count: i64,
    #[serde(default)]
    pub time_start: Option<NaiveDateTime>,
    #[serde(default)]
    pub time_end: Option<NaiveDateTime>,
    /// Derived: sourced from a model-restart file rather than regular output.
    #[serde(default)]
    pub restart: bool,
    /// Derived: units mark this as a spatial/temporal axis, not a field.
    #[serde(default)]
    pub coordinate: bool,
}

impl VariableRecord {
    /// Recompute the derived flags from `file_pattern` and `units`.
    /// Idempotent: the flags are pure functions of those two fields.
    pub fn derive_flags(&mut self) {
        self.restart = is_restart(&self.file_pattern);
        self.coordinate = is_coordinate(&self.units);
    }
}

/// A variable comes from a restart file when the file path says so.
pub fn is_restart(file_pattern: &str) -> bool {
    file_pattern.contains("restart")
}

/// Units that mark a variable as a coordinate axis rather than a physical
/// field. "days" is matched as a prefix only, so units like "%/day" survive.
pub fn is_coordinate(units: &str) -> bool {
    units.contains("degrees")
        || units.contains("since")
        || units == "radians"
        || units.starts_with("days")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(units: &str, file_pattern: &str) -> VariableRecord {
        VariableRecord {
            experiment: "exp0".to_string(),
            name: "temp".to_string(),
            long_name: "temperature".to_string(),
            standard_name: String::new(),
            units: units.to_string(),
            frequency: Some("1 monthly".to_string()),
            file_pattern: file_pattern.to_string(),
            file_count: 1,
            time_start: None,
            time_end: None,
            restart: false,
            coordinate: false,
        }
    }

    #[test]
    fn coordinate_units_patterns() {
        assert!(is_coordinate("degrees_east"));
        assert!(is_coordinate("days since 1900-01-01"));
        assert!(is_coordinate("radians"));
        assert!(is_coordinate("days"));
        assert!(!is_coordinate("kg/m^3"));
        // Prefix and equality matching, not substring.
        assert!(!is_coordinate("%/day"));
        assert!(!is_coordinate("microradians"));
    }

    #[test]
    fn restart_flag_from_file_pattern() {
        assert!(is_restart("output/restart000/ocean.nc"));
        assert!(!is_restart("output000/ocean.nc"));
    }

    #[test]
    fn derive_flags_is_idempotent() {
        let mut a = row("degrees_north", "output/restart001/ice.nc");
        a.derive_flags();
        let once = (a.restart, a.coordinate);
        a.derive_flags();
        assert_eq!(once, (a.restart, a.coordinate));
        assert_eq!(once, (true, true));
    }

    #[test]
    fn experiment_record_json_round_trip() {
        let expt = ExperimentRecord {
            experiment: "01deg_jra55".to_string(),
            description: Some("0.1 degree control run".to_string()),
            notes: None,
            contact: Some("A. Modeller".to_string()),
            email: Some("a.modeller@example.org".to_string()),
            ncfiles: Some(1234),
            created: None,
            keywords: ["cosima", "control"].iter().map(|s| s.to_string()).collect(),
        };
        let encoded = serde_json::to_string(&expt).unwrap();
        let decoded: ExperimentRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded.experiment, expt.experiment);
        assert_eq!(decoded.keywords, expt.keywords);
    }
}
