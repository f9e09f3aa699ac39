//! Shared fixture catalog for integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use modex::catalog::index::CatalogIndex;
use modex::catalog::memory::MemoryCatalog;
use modex::catalog::source::CatalogSource;
use modex::model::types::{ExperimentRecord, VariableRecord};

pub fn ts(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

pub fn experiment(name: &str, description: &str, keywords: &[&str]) -> ExperimentRecord {
    ExperimentRecord {
        experiment: name.to_string(),
        description: Some(description.to_string()),
        notes: None,
        contact: Some("A. Modeller".to_string()),
        email: Some("a.modeller@example.org".to_string()),
        ncfiles: Some(42),
        created: Some(ts(2019, 6, 1)),
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
    }
}

pub fn variable(
    experiment: &str,
    name: &str,
    long_name: &str,
    units: &str,
    frequency: Option<&str>,
    file_pattern: &str,
    bounds: Option<(NaiveDateTime, NaiveDateTime)>,
) -> VariableRecord {
    VariableRecord {
        experiment: experiment.to_string(),
        name: name.to_string(),
        long_name: long_name.to_string(),
        standard_name: String::new(),
        units: units.to_string(),
        frequency: frequency.map(str::to_string),
        file_pattern: file_pattern.to_string(),
        file_count: 4,
        time_start: bounds.map(|(s, _)| s),
        time_end: bounds.map(|(_, e)| e),
        restart: false,
        coordinate: false,
    }
}

/// Three experiments, five distinct variables: one from a restart file, one
/// coordinate, three regular fields. Default filtering must expose exactly
/// the three regular fields.
pub fn ocean_catalog() -> MemoryCatalog {
    let experiments = vec![
        experiment("01deg_jra55", "0.1 degree control run", &["cosima", "ocean", "ice"]),
        experiment("025deg_jra55", "0.25 degree control run", &["cosima", "ocean"]),
        experiment("1deg_era5", "1 degree forced run", &["cosima", "atmosphere"]),
    ];
    let decade = Some((ts(2000, 1, 1), ts(2009, 12, 31)));
    let rows = vec![
        variable(
            "01deg_jra55",
            "temp",
            "sea water temperature",
            "K",
            Some("1 monthly"),
            "output000/ocean.nc",
            decade,
        ),
        variable(
            "01deg_jra55",
            "salt",
            "sea water salinity",
            "psu",
            Some("1 monthly"),
            "output000/ocean.nc",
            decade,
        ),
        variable(
            "01deg_jra55",
            "u_restart",
            "restart zonal velocity",
            "m/s",
            None,
            "restart000/velocity.nc",
            None,
        ),
        variable(
            "01deg_jra55",
            "xt_ocean",
            "tracer longitude",
            "degrees_east",
            Some("static"),
            "output000/grid.nc",
            None,
        ),
        variable(
            "025deg_jra55",
            "temp",
            "sea water temperature",
            "K",
            Some("1 monthly"),
            "output000/ocean.nc",
            decade,
        ),
        variable(
            "025deg_jra55",
            "eta",
            "surface height",
            "m",
            Some("1 daily"),
            "output000/ocean_daily.nc",
            Some((ts(2004, 1, 1), ts(2004, 2, 1))),
        ),
        variable(
            "1deg_era5",
            "temp",
            "sea water temperature",
            "K",
            Some("1 monthly"),
            "output000/ocean.nc",
            decade,
        ),
    ];
    MemoryCatalog::new(experiments, rows)
}

pub fn ocean_index() -> Arc<CatalogIndex> {
    let source: Arc<dyn CatalogSource> = Arc::new(ocean_catalog());
    Arc::new(CatalogIndex::build(source, None).unwrap())
}
