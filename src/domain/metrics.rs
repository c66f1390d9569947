// Metric schema - closed set of channels and fidelity metrics

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Left,
    Right,
    Average,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Left, Channel::Right, Channel::Average];

    /// Label the comparator prints in front of the metric name.
    pub fn report_label(self) -> &'static str {
        match self {
            Channel::Left => "Channel 0",
            Channel::Right => "Channel 1",
            Channel::Average => "Average",
        }
    }

    /// Short name used in figure file names.
    pub fn file_label(self) -> &'static str {
        match self {
            Channel::Left => "left",
            Channel::Right => "right",
            Channel::Average => "avg",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    Rmse,
    Snr,
    MaxError,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Rmse, Metric::Snr, Metric::MaxError];

    pub fn report_label(self) -> &'static str {
        match self {
            Metric::Rmse => "RMSE",
            Metric::Snr => "SNR",
            Metric::MaxError => "Max error",
        }
    }

    pub fn file_label(self) -> &'static str {
        match self {
            Metric::Rmse => "rmse",
            Metric::Snr => "snr",
            Metric::MaxError => "max",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Full label of one report line, e.g. "Channel 1 Max error".
pub fn report_label(channel: Channel, metric: Metric) -> String {
    format!("{} {}", channel.report_label(), metric.report_label())
}

/// Every (channel, metric) pair, channel-major.
pub fn all_pairs() -> impl Iterator<Item = (Channel, Metric)> {
    Channel::ALL
        .into_iter()
        .flat_map(|c| Metric::ALL.into_iter().map(move |m| (c, m)))
}

/// The nine values extracted from one comparator report. `None` marks a
/// metric the report did not contain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricReading {
    values: [[Option<f64>; 3]; 3],
}

impl MetricReading {
    pub fn get(&self, channel: Channel, metric: Metric) -> Option<f64> {
        self.values[channel.index()][metric.index()]
    }

    pub fn set(&mut self, channel: Channel, metric: Metric, value: f64) {
        self.values[channel.index()][metric.index()] = Some(value);
    }

    pub fn missing(&self) -> impl Iterator<Item = (Channel, Metric)> + '_ {
        all_pairs().filter(|&(c, m)| self.get(c, m).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_labels() {
        assert_eq!(report_label(Channel::Left, Metric::Rmse), "Channel 0 RMSE");
        assert_eq!(report_label(Channel::Right, Metric::MaxError), "Channel 1 Max error");
        assert_eq!(report_label(Channel::Average, Metric::Snr), "Average SNR");
    }

    #[test]
    fn test_all_pairs_covers_nine_combinations() {
        let pairs: Vec<_> = all_pairs().collect();
        assert_eq!(pairs.len(), 9);
        assert_eq!(pairs[0], (Channel::Left, Metric::Rmse));
        assert_eq!(pairs[8], (Channel::Average, Metric::MaxError));
    }

    #[test]
    fn test_reading_tracks_missing_cells() {
        let mut reading = MetricReading::default();
        for (c, m) in all_pairs() {
            if (c, m) != (Channel::Right, Metric::Snr) {
                reading.set(c, m, 1.0);
            }
        }
        let missing: Vec<_> = reading.missing().collect();
        assert_eq!(missing, vec![(Channel::Right, Metric::Snr)]);
    }
}
