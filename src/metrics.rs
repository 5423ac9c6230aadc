//! Per-venue execution quality over joined rows.
//!
//! Each row is derived independently (speed, then clipped improvement), rows
//! missing the venue or either metric are dropped, and what is left is
//! grouped by LastMkt and averaged.

use crate::{join::OutputRow, orders::Side, price::parse_price};
use anyhow::{anyhow, Result};
use chrono::NaiveDateTime;
use itertools::Itertools;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

/// Derived metrics of one joined row; `None` where the input did not allow
/// the value to be computed.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMetrics {
    pub venue: Option<String>,
    pub exec_speed_secs: Option<f64>,
    pub price_improvement: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRow {
    #[serde(rename = "LastMkt")]
    pub last_mkt: String,
    #[serde(rename = "AvgPriceImprovement")]
    pub avg_price_improvement: Decimal,
    #[serde(rename = "AvgExecSpeedSecs")]
    pub avg_exec_speed_secs: f64,
}

pub const METRICS_COLUMNS: [&str; 3] = ["LastMkt", "AvgPriceImprovement", "AvgExecSpeedSecs"];

#[derive(Debug, Clone)]
pub struct MetricsOptions {
    pub timestamp_format: String,
    pub improvement_decimals: u32,
    pub sort_venues: bool,
}

/// Parse a TransactTime. The value must end in `.` plus 1 to 6 fractional
/// digits and carry no surrounding whitespace; chrono alone would accept a
/// missing fraction.
pub fn parse_timestamp(s: &str, format: &str) -> Option<NaiveDateTime> {
    if s.trim() != s {
        return None;
    }
    let (_, frac) = s.rsplit_once('.')?;
    if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDateTime::parse_from_str(s, format).ok()
}

/// Signed seconds from order to execution; negative when the pair is inverted.
pub fn exec_speed_secs(order_time: &str, exec_time: &str, format: &str) -> Option<f64> {
    let order_time = parse_timestamp(order_time, format)?;
    let exec_time = parse_timestamp(exec_time, format)?;
    let micros = exec_time.signed_duration_since(order_time).num_microseconds()?;
    Some(micros as f64 / 1_000_000.0)
}

/// Favourable distance between the limit and the average fill price before
/// clipping. Only defined for buys and sells; `None` on overflow.
pub fn raw_price_improvement(side: &Side, limit_price: &str, avg_px: &str) -> Option<Decimal> {
    let limit = parse_price(limit_price)?;
    let avg = parse_price(avg_px)?;
    match side {
        Side::Buy => limit.checked_sub(avg),
        Side::Sell => avg.checked_sub(limit),
        Side::Other(_) => None,
    }
}

pub fn derive_row(row: &OutputRow, timestamp_format: &str) -> RowMetrics {
    let venue = Some(row.last_mkt.clone()).filter(|v| !v.is_empty());
    let exec_speed_secs = exec_speed_secs(
        &row.order_transact_time,
        &row.execution_transact_time,
        timestamp_format,
    );
    let price_improvement = raw_price_improvement(&row.side, &row.limit_price, &row.avg_px)
        .map(|pi| pi.max(dec!(0)));
    RowMetrics { venue, exec_speed_secs, price_improvement }
}

/// Average the derived metrics per venue. Fails only if a venue's summed
/// price improvement leaves the `Decimal` range.
pub fn compute(rows: &[OutputRow], opts: &MetricsOptions) -> Result<Vec<MetricsRow>> {
    let groups = rows
        .iter()
        .map(|row| derive_row(row, &opts.timestamp_format))
        .filter_map(|m| Some((m.venue?, m.exec_speed_secs?, m.price_improvement?)))
        .into_group_map_by(|(venue, _, _)| venue.clone());

    let mut out: Vec<MetricsRow> = groups
        .into_iter()
        .map(|(venue, group)| {
            let n = group.len();
            let pi_sum = group
                .iter()
                .try_fold(Decimal::ZERO, |acc, (_, _, pi)| acc.checked_add(*pi))
                .ok_or_else(|| anyhow!("price improvement sum overflowed for venue {venue}"))?;
            let speed_sum: f64 = group.iter().map(|(_, speed, _)| *speed).sum();
            Ok(MetricsRow {
                avg_price_improvement: (pi_sum / Decimal::from(n))
                    .round_dp(opts.improvement_decimals)
                    .normalize(),
                avg_exec_speed_secs: speed_sum / n as f64,
                last_mkt: venue,
            })
        })
        .collect::<Result<_>>()?;
    if opts.sort_venues {
        out.sort_by(|a, b| a.last_mkt.cmp(&b.last_mkt));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TS: &str = "%Y%m%d-%H:%M:%S%.f";

    fn opts() -> MetricsOptions {
        MetricsOptions {
            timestamp_format: TS.to_string(),
            improvement_decimals: 10,
            sort_venues: true,
        }
    }

    fn row(side: &str, limit: &str, avg: &str, mkt: &str, t0: &str, t1: &str) -> OutputRow {
        OutputRow {
            order_id: "ID1".to_string(),
            order_transact_time: t0.to_string(),
            execution_transact_time: t1.to_string(),
            symbol: "NIO".to_string(),
            side: Side::from(side),
            order_qty: "1".to_string(),
            limit_price: limit.to_string(),
            avg_px: avg.to_string(),
            last_mkt: mkt.to_string(),
        }
    }

    #[test]
    fn test_exec_speed() {
        let s = exec_speed_secs("20250910-08:00:00.377", "20250910-08:00:00.509", TS).unwrap();
        assert!((s - 0.132).abs() < 1e-9);
        let s = exec_speed_secs("20250910-08:00:01.000000", "20250910-08:00:00.500000", TS).unwrap();
        assert!((s + 0.5).abs() < 1e-9);
        assert_eq!(exec_speed_secs("bogus", "20250910-08:00:00.509", TS), None);
        assert_eq!(exec_speed_secs("20250910-08:00:00.509", "", TS), None);
    }

    #[test]
    fn test_improvement_sign_by_side() {
        assert_eq!(raw_price_improvement(&Side::Buy, "10.00", "9.50"), Some(dec!(0.5)));
        assert_eq!(raw_price_improvement(&Side::Sell, "10.00", "10.50"), Some(dec!(0.5)));
        assert_eq!(raw_price_improvement(&Side::Buy, "10.00", "10.50"), Some(dec!(-0.5)));
        assert_eq!(raw_price_improvement(&Side::from("3"), "10.00", "9.50"), None);
        assert_eq!(raw_price_improvement(&Side::Buy, "x", "9.50"), None);
    }

    #[test]
    fn test_clip_never_negative() {
        let t0 = "20250910-08:00:00.000";
        let t1 = "20250910-08:00:01.000";
        for (side, limit, avg) in [("1", "10", "10.5"), ("2", "10", "9"), ("1", "1", "1"), ("2", "5", "6")] {
            let m = derive_row(&row(side, limit, avg, "V", t0, t1), TS);
            assert!(m.price_improvement.unwrap() >= dec!(0));
        }
        let m = derive_row(&row("1", "10.000000", "10.500000", "V", t0, t1), TS);
        assert_eq!(m.price_improvement, Some(dec!(0)));
    }

    #[test]
    fn test_rows_with_nulls_dropped() {
        let t0 = "20250910-08:00:00.000";
        let t1 = "20250910-08:00:01.000";
        let rows = vec![
            row("1", "10", "9", "", t0, t1),
            row("1", "10", "9", "A", "garbage", t1),
            row("5", "10", "9", "A", t0, t1),
            row("1", "10", "9", "A", t0, t1),
        ];
        let out = compute(&rows, &opts()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].last_mkt, "A");
        assert_eq!(out[0].avg_price_improvement, dec!(1));
        assert!((out[0].avg_exec_speed_secs - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_means_per_venue_sorted() {
        let rows = vec![
            row("1", "6.26", "6.03", "ID1517", "20250910-08:00:01.195", "20250910-08:00:01.324"),
            row("1", "23.70", "23.17", "ID1516", "20250910-08:00:00.377", "20250910-08:00:00.509"),
            row("2", "159.56", "160.11", "ID1516", "20250910-08:00:00.866", "20250910-08:00:01.006"),
            row("2", "50.20", "50.00", "ID1516", "20250910-08:00:01.000", "20250910-08:00:01.100"),
        ];
        let out = compute(&rows, &opts()).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].last_mkt, "ID1516");
        // (0.53 + 0.55 + 0) / 3
        assert_eq!(out[0].avg_price_improvement, dec!(0.36));
        assert!((out[0].avg_exec_speed_secs - (0.132 + 0.140 + 0.100) / 3.0).abs() < 1e-9);
        assert_eq!(out[1].last_mkt, "ID1517");
        assert_eq!(out[1].avg_price_improvement, dec!(0.23));
    }

    #[test]
    fn test_empty_input() {
        assert!(compute(&[], &opts()).unwrap().is_empty());
    }

    #[test]
    fn test_timestamp_requires_fraction() {
        assert_eq!(exec_speed_secs("20250910-08:00:00", "20250910-08:00:01", TS), None);
        assert_eq!(exec_speed_secs("20250910-08:00:00.", "20250910-08:00:01.0", TS), None);
        assert_eq!(exec_speed_secs("20250910-08:00:00.0000001", "20250910-08:00:01.0", TS), None);
        let rows = vec![row("1", "10", "9", "V", "20250910-08:00:00", "20250910-08:00:01")];
        assert!(compute(&rows, &opts()).unwrap().is_empty());
    }

    #[test]
    fn test_timestamp_whitespace_rejected() {
        assert_eq!(exec_speed_secs(" 20250910-08:00:00.000", "20250910-08:00:01.000", TS), None);
        assert_eq!(exec_speed_secs("20250910-08:00:00.000", "20250910-08:00:01.000 ", TS), None);
        assert!(exec_speed_secs("20250910-08:00:00.000", "20250910-08:00:01.000", TS).is_some());
    }

    #[test]
    fn test_improvement_overflow_is_null() {
        assert_eq!(raw_price_improvement(&Side::Buy, "7e28", "-7e28"), None);
        let t0 = "20250910-08:00:00.000";
        let t1 = "20250910-08:00:01.000";
        let rows = vec![row("1", "7e28", "-7e28", "V", t0, t1), row("1", "10", "9", "W", t0, t1)];
        let out = compute(&rows, &opts()).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].last_mkt, "W");
    }

    #[test]
    fn test_group_sum_overflow_is_error() {
        let t0 = "20250910-08:00:00.000";
        let t1 = "20250910-08:00:01.000";
        let rows = vec![row("1", "7e28", "0", "V", t0, t1), row("1", "7e28", "0", "V", t0, t1)];
        assert!(compute(&rows, &opts()).is_err());
    }

    #[test]
    fn test_venue_kept_verbatim() {
        let t0 = "20250910-08:00:00.000";
        let t1 = "20250910-08:00:01.000";
        let rows = vec![row("1", "10", "9", " A", t0, t1), row("1", "10", "9", "A", t0, t1)];
        let out = compute(&rows, &opts()).unwrap();
        let venues: Vec<&str> = out.iter().map(|m| m.last_mkt.as_str()).collect();
        assert_eq!(venues, [" A", "A"]);
    }
}
