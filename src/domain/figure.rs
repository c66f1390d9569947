// Figure domain model - per (channel, metric) plotting policy
use super::metrics::{Channel, Metric, all_pairs};

/// Reference line and visible ceiling of the logarithmic plots.
pub const LOG_CAP: f64 = 1e5;

pub const X_AXIS_LABEL: &str = "Quantization Bits";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum YScale {
    Linear,
    /// Log axis whose visible range stops at `cap`, with a reference line there.
    Log { cap: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, PartialEq)]
pub struct FigureSpec {
    pub channel: Channel,
    pub metric: Metric,
    pub y_label: &'static str,
    pub color: Rgb,
    pub scale: YScale,
}

impl FigureSpec {
    pub fn new(channel: Channel, metric: Metric) -> Self {
        let (y_label, color, scale) = match metric {
            Metric::Snr => ("SNR (dB)", Rgb(0x1f, 0x77, 0xb4), YScale::Linear),
            Metric::Rmse => ("RMSE", Rgb(0xff, 0x7f, 0x0e), YScale::Log { cap: LOG_CAP }),
            Metric::MaxError => ("Max Error", Rgb(0x2c, 0xa0, 0x2c), YScale::Log { cap: LOG_CAP }),
        };
        Self {
            channel,
            metric,
            y_label,
            color,
            scale,
        }
    }

    /// One spec per (channel, metric); nine in total.
    pub fn all() -> Vec<FigureSpec> {
        all_pairs().map(|(c, m)| FigureSpec::new(c, m)).collect()
    }
}
