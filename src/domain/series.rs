// Accumulated metric series, parallel-indexed by bit depth
use super::metrics::{Channel, Metric, MetricReading, all_pairs};
use super::sweep::BitDepth;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SeriesError {
    #[error("bit depth {next} recorded after {last}; the sweep must strictly descend")]
    OutOfOrder { last: BitDepth, next: BitDepth },
}

/// One ordered series per (channel, metric). Every series has exactly one
/// entry per recorded bit depth and index `i` always refers to
/// `bit_depths()[i]`.
#[derive(Debug, Clone, Default)]
pub struct SeriesCollection {
    bit_depths: Vec<BitDepth>,
    values: [[Vec<Option<f64>>; 3]; 3],
}

/// Read-only view of one series alongside the shared bit-depth index.
#[derive(Debug, Clone, Copy)]
pub struct Trend<'a> {
    pub channel: Channel,
    pub metric: Metric,
    pub bit_depths: &'a [BitDepth],
    pub values: &'a [Option<f64>],
}

impl SeriesCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one sweep point. All nine series and the bit-depth index grow
    /// together.
    pub fn record(&mut self, bit_depth: BitDepth, reading: &MetricReading) -> Result<(), SeriesError> {
        if let Some(&last) = self.bit_depths.last() {
            if bit_depth >= last {
                return Err(SeriesError::OutOfOrder { last, next: bit_depth });
            }
        }

        self.bit_depths.push(bit_depth);
        for (channel, metric) in all_pairs() {
            self.values[channel.index()][metric.index()].push(reading.get(channel, metric));
        }
        Ok(())
    }

    pub fn bit_depths(&self) -> &[BitDepth] {
        &self.bit_depths
    }

    pub(crate) fn len(&self) -> usize {
        self.bit_depths.len()
    }

    pub fn series(&self, channel: Channel, metric: Metric) -> &[Option<f64>] {
        &self.values[channel.index()][metric.index()]
    }

    pub fn trend(&self, channel: Channel, metric: Metric) -> Trend<'_> {
        Trend {
            channel,
            metric,
            bit_depths: &self.bit_depths,
            values: self.series(channel, metric),
        }
    }

    #[cfg(test)]
    pub fn value_at(&self, channel: Channel, metric: Metric, bit_depth: BitDepth) -> Option<Option<f64>> {
        let idx = self.bit_depths.iter().position(|&b| b == bit_depth)?;
        Some(self.series(channel, metric)[idx])
    }
}

impl Trend<'_> {
    /// (bits, value) pairs in sweep order.
    pub fn points(&self) -> impl Iterator<Item = (f64, Option<f64>)> + '_ {
        self.bit_depths
            .iter()
            .zip(self.values)
            .map(|(b, v)| (f64::from(b.bits()), *v))
    }
}
