use chrono::NaiveDateTime;

use crate::{prelude::*, quantity::energy::KilowattHours};

/// Single interval reading.
#[must_use]
#[derive(
    Copy,
    Clone,
    Debug,
    Eq,
    PartialEq,
    derive_more::Constructor,
    serde::Deserialize,
    serde::Serialize,
)]
pub struct Reading {
    /// Local wall-clock start of the interval.
    pub timestamp: NaiveDateTime,

    pub usage: KilowattHours,
}

impl Reading {
    pub const fn with_usage(mut self, usage: KilowattHours) -> Self {
        self.usage = usage;
        self
    }
}

/// Already split `(timestamp, usage)` pair as it comes from an upload.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct RawReading {
    pub timestamp: String,
    pub usage: f64,
}

impl RawReading {
    const FORMATS: [&'static str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"];
}

impl TryFrom<RawReading> for Reading {
    type Error = Error;

    fn try_from(raw: RawReading) -> Result<Self> {
        let trimmed = raw.timestamp.trim();
        let timestamp = RawReading::FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .with_context(|| format!("invalid timestamp `{}`", raw.timestamp))?;
        ensure!(raw.usage.is_finite(), "non-finite usage at {timestamp}");
        ensure!(raw.usage >= 0.0, "negative usage at {timestamp} ({})", raw.usage);
        Ok(Self::new(timestamp, KilowattHours(raw.usage)))
    }
}
