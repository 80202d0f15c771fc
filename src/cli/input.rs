use std::{
    fs::File,
    io::{BufReader, Read},
    path::PathBuf,
};

use clap::Parser;

use crate::{
    core::{
        reading::{RawReading, Reading},
        series::Series,
    },
    prelude::*,
};

#[derive(Parser)]
pub struct InputArgs {
    /// Provider identifier, see `effekt providers`.
    #[clap(long, env = "EFFEKT_PROVIDER")]
    pub provider: String,

    /// JSON array of hourly readings: `[{"timestamp": "2025-01-01 00:00", "usage": 1.25}, …]`.
    #[clap(long, env = "EFFEKT_INPUT")]
    pub input: PathBuf,
}

impl InputArgs {
    #[instrument(skip_all, fields(path = %self.input.display()))]
    pub fn read_series(&self) -> Result<Series> {
        let file = File::open(&self.input)
            .with_context(|| format!("failed to open `{}`", self.input.display()))?;
        let series = parse_series(BufReader::new(file))
            .with_context(|| format!("failed to read `{}`", self.input.display()))?;
        info!(len = series.len(), "read the readings");
        Ok(series)
    }
}

fn parse_series(reader: impl Read) -> Result<Series> {
    let raw: Vec<RawReading> = serde_json::from_reader(reader)?;
    let series = raw
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            Reading::try_from(raw).with_context(|| format!("invalid reading #{index}"))
        })
        .collect::<Result<Series>>()?;
    ensure!(
        series.is_sorted_by_key(|reading| reading.timestamp),
        "readings must be in chronological order",
    );
    Ok(series)
}
