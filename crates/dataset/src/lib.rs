use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use rand::seq::index;
use tracing::info;

use shared::{
    domain::Record,
    error::{ApiException, ErrorCode},
};

const EXPECTED_HEADER: [&str; 2] = ["eruption_time", "waiting_time"];

/// The fixed two-column dataset. Loaded once at boot, owned for the process
/// lifetime, never mutated.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Reads the dataset from a CSV file with header
    /// `eruption_time,waiting_time`. Called once at startup; any failure here
    /// is fatal to boot, there are no retries.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read dataset file '{}'", path.display()))?;
        let dataset = Self::parse(&raw)
            .with_context(|| format!("malformed dataset file '{}'", path.display()))?;
        info!(path = %path.display(), rows = dataset.len(), "dataset loaded");
        Ok(dataset)
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    fn parse(raw: &str) -> Result<Self> {
        let mut lines = raw.lines();
        let header = lines.next().context("dataset file is empty")?;
        let names: Vec<&str> = header.split(',').map(str::trim).collect();
        if names != EXPECTED_HEADER {
            bail!(
                "unexpected header '{header}', want '{}'",
                EXPECTED_HEADER.join(",")
            );
        }

        let mut records = Vec::new();
        for (index, line) in lines.enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = index + 2;
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() != EXPECTED_HEADER.len() {
                bail!("row {row} has {} columns, want 2", fields.len());
            }
            let eruption_time: f64 = fields[0]
                .parse()
                .with_context(|| format!("row {row}: bad eruption_time '{}'", fields[0]))?;
            let waiting_time: f64 = fields[1]
                .parse()
                .with_context(|| format!("row {row}: bad waiting_time '{}'", fields[1]))?;
            records.push(Record {
                eruption_time,
                waiting_time,
            });
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// Draws `round(fraction * len)` rows uniformly at random without
/// replacement. Calls are independent and unseeded; reproducibility across
/// calls is not a goal. A computed row count of zero yields an empty sample,
/// not an error.
pub fn sample(dataset: &Dataset, fraction: f64) -> Result<Vec<Record>, ApiException> {
    if !fraction.is_finite() || fraction <= 0.0 || fraction > 1.0 {
        return Err(ApiException::new(
            ErrorCode::InvalidParameter,
            format!("sampling fraction must be in (0, 1], got {fraction}"),
        ));
    }

    let amount = (fraction * dataset.len() as f64).round() as usize;
    if amount == 0 {
        return Ok(Vec::new());
    }

    let mut rng = rand::thread_rng();
    let picked = index::sample(&mut rng, dataset.len(), amount);
    Ok(picked.iter().map(|i| dataset.records()[i]).collect())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
