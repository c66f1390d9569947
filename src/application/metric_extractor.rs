// Metric extractor - Comparator report to MetricReading
//
// Report grammar, one record per line:
//
//   record  := label ':' literal [unit]
//   label   := channel ' ' metric
//   literal := [+-]? (digits ['.' digits*] | '.' digits) ([eE] [+-]? digits)?
//
// Lines that are not records for a known label are ignored.
use crate::domain::metrics::{MetricReading, all_pairs, report_label};

/// One `label: value` line of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<'a> {
    pub label: &'a str,
    pub value: f64,
}

/// Extract the nine metrics from a comparator report. The first valid record
/// for a label wins; labels with no valid record stay missing.
pub fn extract_metrics(report: &str) -> MetricReading {
    let records: Vec<Record<'_>> = report.lines().filter_map(parse_record).collect();

    let mut reading = MetricReading::default();
    for (channel, metric) in all_pairs() {
        let label = report_label(channel, metric);
        if let Some(record) = records.iter().find(|r| r.label == label) {
            reading.set(channel, metric, record.value);
        }
    }
    reading
}

/// Parse a single line as a record. Returns `None` for anything else.
pub fn parse_record(line: &str) -> Option<Record<'_>> {
    let (label, rest) = line.split_once(':')?;
    let label = label.trim();
    if label.is_empty() {
        return None;
    }

    let literal = rest.split_whitespace().next()?;
    if !is_numeric_literal(literal) {
        return None;
    }
    let value = literal.parse::<f64>().ok()?;

    Some(Record { label, value })
}

/// Integer, decimal or scientific literal with optional sign. Rejects the
/// `inf`/`nan` spellings `f64::from_str` would otherwise accept.
pub fn is_numeric_literal(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        frac_digits = i - frac_start;
    }

    if int_digits == 0 && frac_digits == 0 {
        return false;
    }

    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        i += 1;
        if i < bytes.len() && matches!(bytes[i], b'+' | b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }

    i == bytes.len()
}
