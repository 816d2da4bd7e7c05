// netpulse-core/src/domain/kpi/aggregator.rs

use std::collections::BTreeMap;

use crate::domain::dataset::{Dataset, Value};
use crate::domain::error::DomainError;

use super::{
    AVG_LATENCY_MS, CURATED_COLUMNS, CURATED_GRAIN, DOWNTIME_MINUTES, PACKET_LOSS_PCT,
    UPTIME_MINUTES,
};

/// Rolls site-level KPI rows up to the regional grain.
pub struct KpiAggregator;

impl KpiAggregator {
    /// Groups by `(date_key, region_key, service_key, vendor_key)`.
    ///
    /// Minutes are summed. Availability is the mean of the per-row ratios,
    /// not a ratio of the summed minutes, so every site weighs the same
    /// regardless of how many minutes it reported. Latency and packet loss
    /// are plain means. Nulls are skipped; a null key forms its own group.
    ///
    /// Output rows are sorted by group key.
    pub fn aggregate(dataset: &Dataset) -> Result<Dataset, DomainError> {
        let key_idx = dataset.column_indices(&CURATED_GRAIN)?;
        let uptime_idx = dataset.column_index(UPTIME_MINUTES)?;
        let downtime_idx = dataset.column_index(DOWNTIME_MINUTES)?;
        let uptime = dataset.numeric_column(UPTIME_MINUTES)?;
        let downtime = dataset.numeric_column(DOWNTIME_MINUTES)?;
        let latency = dataset.numeric_column(AVG_LATENCY_MS)?;
        let packet_loss = dataset.numeric_column(PACKET_LOSS_PCT)?;

        let mut groups: BTreeMap<Vec<Value>, GroupAcc> = BTreeMap::new();

        for (i, row) in dataset.rows().iter().enumerate() {
            let availability = availability(i, uptime[i], downtime[i])?;
            let key: Vec<Value> = key_idx.iter().map(|&k| row[k].clone()).collect();

            let acc = groups.entry(key).or_default();
            acc.uptime.add(&row[uptime_idx]);
            acc.downtime.add(&row[downtime_idx]);
            acc.availability.add(availability);
            acc.latency.add(latency[i]);
            acc.packet_loss.add(packet_loss[i]);
        }

        let mut out = Dataset::new(CURATED_COLUMNS);
        for (mut key, acc) in groups {
            key.extend([
                acc.uptime.finish(),
                acc.downtime.finish(),
                acc.availability.finish(),
                acc.latency.finish(),
                acc.packet_loss.finish(),
            ]);
            out.push_row(key)?;
        }

        tracing::debug!(rows_in = dataset.len(), rows_out = out.len(), "Aggregated KPI rows");
        Ok(out)
    }
}

/// `uptime / (uptime + downtime)`. A zero-length window is an error.
fn availability(row: usize, uptime: Option<f64>, downtime: Option<f64>) -> Result<Option<f64>, DomainError> {
    match (uptime, downtime) {
        (Some(up), Some(down)) => {
            let total = up + down;
            if total == 0.0 {
                return Err(DomainError::ZeroDuration { row });
            }
            Ok(Some(up / total))
        }
        _ => Ok(None),
    }
}

#[derive(Default)]
struct GroupAcc {
    uptime: SumAcc,
    downtime: SumAcc,
    availability: MeanAcc,
    latency: MeanAcc,
    packet_loss: MeanAcc,
}

/// Sum that stays integral while every input is an integer and the total
/// fits in an `i64`. Otherwise it continues in floating point.
#[derive(Default)]
struct SumAcc {
    int_total: i64,
    float_total: f64,
    saw_float: bool,
    count: usize,
}

impl SumAcc {
    fn add(&mut self, value: &Value) {
        match value {
            Value::Int(i) => {
                match self.int_total.checked_add(*i) {
                    Some(total) => self.int_total = total,
                    None => {
                        tracing::warn!("Integer minute sum overflowed, continuing as float");
                        self.float_total += *i as f64;
                        self.saw_float = true;
                    }
                }
                self.count += 1;
            }
            Value::Float(f) => {
                self.float_total += f;
                self.saw_float = true;
                self.count += 1;
            }
            // Text was rejected by numeric_column already.
            Value::Null | Value::Text(_) => {}
        }
    }

    fn finish(self) -> Value {
        match (self.count, self.saw_float) {
            (0, _) => Value::Null,
            (_, false) => Value::Int(self.int_total),
            (_, true) => Value::Float(self.int_total as f64 + self.float_total),
        }
    }
}

#[derive(Default)]
struct MeanAcc {
    sum: f64,
    count: usize,
}

impl MeanAcc {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(self) -> Value {
        if self.count == 0 {
            Value::Null
        } else {
            Value::Float(self.sum / self.count as f64)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    const RAW_COLUMNS: [&str; 9] = [
        "date_key",
        "site_key",
        "region_key",
        "service_key",
        "vendor_key",
        "uptime_minutes",
        "downtime_minutes",
        "avg_latency_ms",
        "packet_loss_pct",
    ];

    fn raw(site: i64, region: i64, up: i64, down: i64, latency: f64, loss: f64) -> Vec<Value> {
        vec![
            Value::Int(202401),
            Value::Int(site),
            Value::Int(region),
            Value::Int(1),
            Value::Int(1),
            Value::Int(up),
            Value::Int(down),
            Value::Float(latency),
            Value::Float(loss),
        ]
    }

    fn num(ds: &Dataset, row: usize, col: &str) -> f64 {
        ds.value(row, col).and_then(Value::as_f64).unwrap()
    }

    #[test]
    fn test_single_row_scenario() -> Result<()> {
        let ds = Dataset::from_rows(RAW_COLUMNS, vec![raw(1, 1, 40000, 100, 20.0, 0.5)])?;
        let out = KpiAggregator::aggregate(&ds)?;

        assert_eq!(out.len(), 1);
        assert_eq!(out.columns(), CURATED_COLUMNS);
        assert_eq!(out.value(0, "uptime_minutes"), Some(&Value::Int(40000)));
        assert_eq!(out.value(0, "downtime_minutes"), Some(&Value::Int(100)));
        assert!((num(&out, 0, "availability") - 40000.0 / 40100.0).abs() < 1e-12);
        assert!((num(&out, 0, "availability") - 0.9975).abs() < 1e-4);
        assert_eq!(num(&out, 0, "avg_latency_ms"), 20.0);
        assert_eq!(num(&out, 0, "packet_loss_pct"), 0.5);
        Ok(())
    }

    #[test]
    fn test_availability_is_mean_of_ratios() -> Result<()> {
        // Ratios 0.5 and 1.0; the minute-weighted ratio would be 110/120.
        let ds = Dataset::from_rows(
            RAW_COLUMNS,
            vec![raw(1, 7, 10, 10, 10.0, 1.0), raw(2, 7, 100, 0, 30.0, 2.0)],
        )?;
        let out = KpiAggregator::aggregate(&ds)?;

        assert_eq!(out.len(), 1);
        assert_eq!(out.value(0, "uptime_minutes"), Some(&Value::Int(110)));
        assert_eq!(out.value(0, "downtime_minutes"), Some(&Value::Int(10)));
        assert_eq!(num(&out, 0, "availability"), 0.75);
        assert_eq!(num(&out, 0, "avg_latency_ms"), 20.0);
        assert_eq!(num(&out, 0, "packet_loss_pct"), 1.5);
        Ok(())
    }

    #[test]
    fn test_output_is_sorted_by_group_key() -> Result<()> {
        let ds = Dataset::from_rows(
            RAW_COLUMNS,
            vec![
                raw(1, 3, 10, 0, 1.0, 0.1),
                raw(2, 1, 10, 0, 1.0, 0.1),
                raw(3, 2, 10, 0, 1.0, 0.1),
                raw(4, 1, 10, 0, 1.0, 0.1),
            ],
        )?;
        let out = KpiAggregator::aggregate(&ds)?;
        let regions: Vec<_> = out.column("region_key")?.cloned().collect();
        assert_eq!(regions, vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        Ok(())
    }

    #[test]
    fn test_row_count_contracts() -> Result<()> {
        let unique = Dataset::from_rows(
            RAW_COLUMNS,
            vec![raw(1, 1, 10, 1, 1.0, 0.1), raw(2, 2, 10, 1, 1.0, 0.1)],
        )?;
        assert_eq!(KpiAggregator::aggregate(&unique)?.len(), unique.len());

        let shared = Dataset::from_rows(
            RAW_COLUMNS,
            vec![raw(1, 1, 10, 1, 1.0, 0.1), raw(2, 1, 10, 1, 1.0, 0.1)],
        )?;
        assert!(KpiAggregator::aggregate(&shared)?.len() < shared.len());
        Ok(())
    }

    #[test]
    fn test_aggregation_is_idempotent_at_curated_grain() -> Result<()> {
        let ds = Dataset::from_rows(
            RAW_COLUMNS,
            vec![
                raw(1, 1, 40000, 100, 20.0, 0.5),
                raw(2, 2, 39000, 1200, 40.0, 1.5),
                raw(3, 3, 43000, 200, 15.0, 0.2),
            ],
        )?;
        // Every curated key is unique, so each group is a singleton.
        let once = KpiAggregator::aggregate(&ds)?;
        let twice = KpiAggregator::aggregate(&once)?;
        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn test_zero_duration_is_a_domain_error() -> Result<()> {
        let ds = Dataset::from_rows(
            RAW_COLUMNS,
            vec![raw(1, 1, 10, 0, 1.0, 0.1), raw(2, 1, 0, 0, 1.0, 0.1)],
        )?;
        assert_eq!(
            KpiAggregator::aggregate(&ds).unwrap_err(),
            DomainError::ZeroDuration { row: 1 }
        );
        Ok(())
    }

    #[test]
    fn test_null_region_forms_its_own_group() -> Result<()> {
        let mut orphan = raw(9, 0, 10, 0, 1.0, 0.1);
        orphan[2] = Value::Null;
        let ds = Dataset::from_rows(RAW_COLUMNS, vec![raw(1, 1, 10, 0, 1.0, 0.1), orphan])?;
        let out = KpiAggregator::aggregate(&ds)?;
        assert_eq!(out.len(), 2);
        assert_eq!(out.value(0, "region_key"), Some(&Value::Null));
        Ok(())
    }

    #[test]
    fn test_null_measures_are_skipped() -> Result<()> {
        let mut partial = raw(2, 1, 10, 0, 0.0, 0.0);
        partial[6] = Value::Null;
        partial[7] = Value::Null;
        let ds = Dataset::from_rows(RAW_COLUMNS, vec![raw(1, 1, 30, 10, 8.0, 0.4), partial])?;
        let out = KpiAggregator::aggregate(&ds)?;

        assert_eq!(out.value(0, "uptime_minutes"), Some(&Value::Int(40)));
        assert_eq!(out.value(0, "downtime_minutes"), Some(&Value::Int(10)));
        assert_eq!(num(&out, 0, "availability"), 0.75);
        assert_eq!(num(&out, 0, "avg_latency_ms"), 8.0);
        assert_eq!(num(&out, 0, "packet_loss_pct"), 0.2);
        Ok(())
    }

    #[test]
    fn test_missing_region_column_is_a_contract_error() -> Result<()> {
        let ds = Dataset::from_rows(["date_key"], vec![vec![Value::Int(1)]])?;
        assert_eq!(
            KpiAggregator::aggregate(&ds).unwrap_err(),
            DomainError::MissingColumn("region_key".into())
        );
        Ok(())
    }

    #[test]
    fn test_minute_sum_overflow_falls_back_to_float() -> Result<()> {
        let ds = Dataset::from_rows(
            RAW_COLUMNS,
            vec![
                raw(1, 1, i64::MAX, 1, 10.0, 0.1),
                raw(2, 1, i64::MAX, 1, 20.0, 0.2),
            ],
        )?;
        let out = KpiAggregator::aggregate(&ds)?;

        assert_eq!(out.value(0, "uptime_minutes"), Some(&Value::Float(2.0 * i64::MAX as f64)));
        assert_eq!(out.value(0, "downtime_minutes"), Some(&Value::Int(2)));
        Ok(())
    }

    #[test]
    fn test_sum_acc_keeps_integers_until_overflow() {
        let mut acc = SumAcc::default();
        acc.add(&Value::Int(i64::MAX - 1));
        acc.add(&Value::Int(1));
        assert_eq!(acc.finish(), Value::Int(i64::MAX));

        let mut acc = SumAcc::default();
        acc.add(&Value::Int(i64::MAX));
        acc.add(&Value::Int(i64::MAX));
        acc.add(&Value::Int(-5));
        assert!(matches!(acc.finish(), Value::Float(f) if f > i64::MAX as f64));
    }
}
