// netpulse-core/src/application/sample.rs
//
// Synthetic telecom data for demos and local runs. Not part of the ETL path.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::info;

use crate::domain::dataset::{Dataset, Value};
use crate::domain::kpi::{
    AVG_LATENCY_MS, DATE_KEY, DOWNTIME_MINUTES, PACKET_LOSS_PCT, REGION_KEY, SERVICE_KEY,
    SITE_KEY, UPTIME_MINUTES, VENDOR_KEY,
};
use crate::domain::project::ProjectConfig;
use crate::error::NetpulseError;
use crate::infrastructure::adapters::DuckDbCsv;

const REGIONS: [&str; 7] = [
    "Sumatra",
    "Jabodetabek",
    "West Java",
    "Central Java",
    "East Java",
    "Kalimantan",
    "Sulawesi",
];

const SERVICES: [(&str, &str); 4] = [
    ("4G LTE", "Mobile"),
    ("5G", "Mobile"),
    ("FTTH", "Fixed"),
    ("Metro Ethernet", "Core"),
];

const VENDORS: [&str; 4] = ["Huawei", "Ericsson", "Nokia", "ZTE"];

/// Minutes in a 30-day month.
const MONTH_MINUTES: i64 = 30 * 24 * 60;

#[derive(Debug, Clone)]
pub struct SampleOptions {
    pub months: u32,
    pub sites: u32,
    pub start_year: i32,
    pub seed: u64,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            months: 24,
            sites: 120,
            start_year: 2024,
            seed: 42,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SampleSummary {
    pub kpi_rows: usize,
    pub incident_rows: usize,
    pub files: Vec<PathBuf>,
}

struct Month {
    date_key: i64,
    year: i64,
    month: i64,
}

/// Writes the reference dimensions plus both raw facts under the project's
/// data directory. The same seed always yields the same files.
pub fn generate_sample_data(
    project_dir: &Path,
    config: &ProjectConfig,
    options: &SampleOptions,
) -> Result<SampleSummary, NetpulseError> {
    let mut rng = StdRng::seed_from_u64(options.seed);
    let csv = DuckDbCsv::in_memory()?;

    let months: Vec<Month> = (0..i64::from(options.months))
        .map(|m| {
            let year = i64::from(options.start_year) + m / 12;
            let month = m % 12 + 1;
            Month {
                date_key: year * 100 + month,
                year,
                month,
            }
        })
        .collect();

    // --- DIMENSIONS ---
    let mut dim_date = Dataset::new([DATE_KEY, "year", "month", "year_month"]);
    for m in &months {
        dim_date.push_row(vec![
            m.date_key.into(),
            m.year.into(),
            m.month.into(),
            format!("{}-{:02}", m.year, m.month).into(),
        ])?;
    }

    let mut dim_region = Dataset::new([REGION_KEY, "region"]);
    for (i, name) in REGIONS.iter().enumerate() {
        dim_region.push_row(vec![key(i), (*name).into()])?;
    }

    let mut dim_service = Dataset::new([SERVICE_KEY, "service", "sla_class"]);
    for (i, (name, class)) in SERVICES.iter().enumerate() {
        dim_service.push_row(vec![key(i), (*name).into(), (*class).into()])?;
    }

    let mut dim_vendor = Dataset::new([VENDOR_KEY, "vendor"]);
    for (i, name) in VENDORS.iter().enumerate() {
        dim_vendor.push_row(vec![key(i), (*name).into()])?;
    }

    let site_regions: Vec<i64> = (0..options.sites)
        .map(|_| rng.gen_range(1..=REGIONS.len() as i64))
        .collect();
    let mut dim_site = Dataset::new([SITE_KEY, "site_code", REGION_KEY]);
    for (i, region) in site_regions.iter().enumerate() {
        dim_site.push_row(vec![key(i), format!("SITE-{:04}", i + 1).into(), (*region).into()])?;
    }

    // --- FACT: NETWORK KPI (date x site x service x vendor) ---
    let mut kpi = Dataset::new([
        DATE_KEY,
        SITE_KEY,
        REGION_KEY,
        SERVICE_KEY,
        VENDOR_KEY,
        UPTIME_MINUTES,
        DOWNTIME_MINUTES,
        AVG_LATENCY_MS,
        PACKET_LOSS_PCT,
        "availability_pct",
    ]);
    for m in &months {
        for (site, region) in site_regions.iter().enumerate() {
            for service in 0..SERVICES.len() {
                for vendor in 0..VENDORS.len() {
                    let availability: f64 = rng.gen_range(0.990..0.9995);
                    let downtime = (MONTH_MINUTES as f64 * (1.0 - availability)) as i64;
                    let latency = round_to(rng.gen_range(15.0..120.0), 2);
                    let packet_loss = round_to(rng.gen_range(0.05..1.5), 3);

                    kpi.push_row(vec![
                        m.date_key.into(),
                        key(site),
                        (*region).into(),
                        key(service),
                        key(vendor),
                        (MONTH_MINUTES - downtime).into(),
                        downtime.into(),
                        latency.into(),
                        packet_loss.into(),
                        round_to(availability * 100.0, 3).into(),
                    ])?;
                }
            }
        }
    }

    // --- FACT: INCIDENT (date x region x service) ---
    let mut incidents = Dataset::new([DATE_KEY, REGION_KEY, SERVICE_KEY, "incident_count"]);
    for m in &months {
        for region in 0..REGIONS.len() {
            for (service, (_, class)) in SERVICES.iter().enumerate() {
                let mut count: i64 = rng.gen_range(0..10);
                // Mobile services see more tickets
                if *class == "Mobile" {
                    count += rng.gen_range(5..20);
                }
                incidents.push_row(vec![m.date_key.into(), key(region), key(service), count.into()])?;
            }
        }
    }

    // --- SAVE ---
    let reference_dir = config.reference_dir(project_dir);
    let outputs = [
        (reference_dir.join("dim_date.csv"), &dim_date),
        (reference_dir.join("dim_region.csv"), &dim_region),
        (reference_dir.join("dim_service.csv"), &dim_service),
        (reference_dir.join("dim_vendor.csv"), &dim_vendor),
        (reference_dir.join("dim_site.csv"), &dim_site),
        (config.raw_kpi_path(project_dir), &kpi),
        (config.raw_incident_path(project_dir), &incidents),
    ];

    let mut files = Vec::with_capacity(outputs.len());
    for (path, dataset) in outputs {
        csv.write_csv(dataset, &path)?;
        files.push(path);
    }

    info!(kpi_rows = kpi.len(), incident_rows = incidents.len(), "Sample data generated");
    Ok(SampleSummary {
        kpi_rows: kpi.len(),
        incident_rows: incidents.len(),
        files,
    })
}

/// 1-based surrogate key from a 0-based position.
fn key(position: usize) -> Value {
    Value::Int(position as i64 + 1)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::kpi::RAW_GRAIN;
    use crate::domain::quality::QualityValidator;
    use anyhow::Result;
    use std::fs;
    use tempfile::tempdir;

    fn small() -> SampleOptions {
        SampleOptions {
            months: 2,
            sites: 3,
            ..Default::default()
        }
    }

    #[test]
    fn test_generates_expected_row_counts() -> Result<()> {
        let dir = tempdir()?;
        let config = ProjectConfig::new("sample");
        let summary = generate_sample_data(dir.path(), &config, &small())?;

        assert_eq!(summary.kpi_rows, 2 * 3 * 4 * 4);
        assert_eq!(summary.incident_rows, 2 * 7 * 4);
        assert_eq!(summary.files.len(), 7);
        assert!(config.raw_kpi_path(dir.path()).exists());
        assert!(config.reference_dir(dir.path()).join("dim_site.csv").exists());
        Ok(())
    }

    #[test]
    fn test_generated_kpi_passes_raw_validation() -> Result<()> {
        let dir = tempdir()?;
        let config = ProjectConfig::new("sample");
        generate_sample_data(dir.path(), &config, &small())?;

        let raw = DuckDbCsv::in_memory()?.read_csv(&config.raw_kpi_path(dir.path()))?;
        let report = QualityValidator::default().validate(&raw, &RAW_GRAIN)?;
        assert!(report.passed);
        assert_eq!(report.coverage_pct, 100.0);

        for (up, down) in raw
            .column(UPTIME_MINUTES)?
            .zip(raw.column(DOWNTIME_MINUTES)?)
        {
            assert_eq!(up.as_f64().unwrap() + down.as_f64().unwrap(), MONTH_MINUTES as f64);
        }
        Ok(())
    }

    #[test]
    fn test_same_seed_same_files() -> Result<()> {
        let (a, b) = (tempdir()?, tempdir()?);
        let config = ProjectConfig::new("sample");
        generate_sample_data(a.path(), &config, &small())?;
        generate_sample_data(b.path(), &config, &small())?;

        assert_eq!(
            fs::read_to_string(config.raw_kpi_path(a.path()))?,
            fs::read_to_string(config.raw_kpi_path(b.path()))?
        );
        Ok(())
    }

    #[test]
    fn test_date_keys_roll_over_years() -> Result<()> {
        let dir = tempdir()?;
        let config = ProjectConfig::new("sample");
        let options = SampleOptions {
            months: 14,
            sites: 1,
            ..Default::default()
        };
        generate_sample_data(dir.path(), &config, &options)?;

        let dates = DuckDbCsv::in_memory()?
            .read_csv(&config.reference_dir(dir.path()).join("dim_date.csv"))?;
        assert_eq!(dates.value(0, "date_key"), Some(&Value::Int(202401)));
        assert_eq!(dates.value(13, "date_key"), Some(&Value::Int(202502)));
        Ok(())
    }
}
