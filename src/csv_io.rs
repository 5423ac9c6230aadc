use crate::{
    join::{OutputRow, OUTPUT_COLUMNS},
    metrics::{MetricsRow, METRICS_COLUMNS},
    orders::Side,
};
use anyhow::{bail, Context, Result};
use log::warn;
use std::io::{Read, Write};

pub fn write_rows<W: Write>(wtr: W, rows: &[OutputRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(wtr);
    wtr.write_record(OUTPUT_COLUMNS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Read back a joined CSV. Every column of [`OUTPUT_COLUMNS`] must be in the
/// header; order and extra columns don't matter. Cells missing from a short
/// row read as empty, which the metrics stage treats as absent values.
pub fn read_rows<R: Read>(rdr: R) -> Result<Vec<OutputRow>> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_reader(rdr);
    let headers = rdr.headers().with_context(|| "reading csv header")?.clone();
    let missing: Vec<&str> =
        OUTPUT_COLUMNS.iter().copied().filter(|c| !headers.iter().any(|h| h == *c)).collect();
    if !missing.is_empty() {
        bail!("Missing required columns in input CSV: {missing:?}");
    }
    let idx = OUTPUT_COLUMNS.map(|c| headers.iter().position(|h| h == c).unwrap_or_default());
    let mut rows = vec![];
    let mut short = 0usize;
    for (i, record) in rdr.records().enumerate() {
        // header is line 1
        let record = record.with_context(|| format!("csv line {}", i + 2))?;
        if record.len() < headers.len() {
            short += 1;
        }
        let cell = |col: usize| record.get(idx[col]).unwrap_or("").to_string();
        rows.push(OutputRow {
            order_id: cell(0),
            order_transact_time: cell(1),
            execution_transact_time: cell(2),
            symbol: cell(3),
            side: Side::from(cell(4)),
            order_qty: cell(5),
            limit_price: cell(6),
            avg_px: cell(7),
            last_mkt: cell(8),
        });
    }
    if short > 0 {
        warn!("{short} csv rows had fewer cells than the header");
    }
    Ok(rows)
}

pub fn write_metrics<W: Write>(wtr: W, metrics: &[MetricsRow]) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().has_headers(false).from_writer(wtr);
    wtr.write_record(METRICS_COLUMNS)?;
    for m in metrics {
        wtr.serialize(m)?;
    }
    wtr.flush()?;
    Ok(())
}
