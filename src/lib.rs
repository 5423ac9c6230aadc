use crate::{
    classify::Classified,
    config::Config,
    fills::FillLog,
    join::JoinOutcome,
    metrics::MetricsOptions,
    orders::OrderStore,
};
use anyhow::Result;
use log::{info, trace, warn};
use std::io::BufRead;

pub mod classify;
pub mod config;
pub mod csv_io;
pub mod fills;
pub mod join;
pub mod metrics;
pub mod orders;
pub mod price;
pub mod tags;
pub mod tokenizer;
pub mod utils;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestStats {
    pub lines: usize,
    // no prefix separator or no tag=value pair
    pub malformed: usize,
    pub orders: usize,
    pub fills: usize,
    pub missing_cl_ord_id: usize,
    pub ignored: usize,
}

/// Everything one run owns: ingest everything first, then join.
#[derive(Debug, Default)]
pub struct RunCtx {
    pub config: Config,
    pub orders: OrderStore,
    pub fills: FillLog,
    pub stats: IngestStats,
}

impl RunCtx {
    pub fn new(config: Config) -> Self {
        Self { config, ..Default::default() }
    }

    pub fn ingest_line(&mut self, line: &str) {
        self.stats.lines += 1;
        let msg = match tokenizer::tokenize(line, &self.config) {
            Some(msg) if !msg.is_empty() => msg,
            _ => {
                trace!("skipping malformed line {}", self.stats.lines);
                self.stats.malformed += 1;
                return;
            }
        };
        match classify::classify(&msg) {
            Classified::Order(order) => {
                self.stats.orders += 1;
                if let Some(prev) = self.orders.put(order) {
                    trace!("order {} replaced", prev.cl_ord_id);
                }
            }
            Classified::Fill(fill) => {
                self.stats.fills += 1;
                self.fills.append(fill);
            }
            Classified::MissingClOrdId => {
                trace!("dropping message without ClOrdID on line {}", self.stats.lines);
                self.stats.missing_cl_ord_id += 1;
            }
            Classified::Ignored => self.stats.ignored += 1,
        }
    }

    /// Consume a whole log. Invalid UTF-8 is replaced rather than failing the
    /// run; only read errors are fatal.
    pub fn ingest<R: BufRead>(&mut self, mut rdr: R) -> Result<()> {
        let mut buf = vec![];
        loop {
            buf.clear();
            if rdr.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.ingest_line(&line);
        }
        let s = &self.stats;
        info!(
            "ingested {} lines: {} orders ({} distinct), {} fills, {} ignored, {} malformed, {} without ClOrdID",
            s.lines,
            s.orders,
            self.orders.len(),
            s.fills,
            s.ignored,
            s.malformed,
            s.missing_cl_ord_id
        );
        if s.malformed > 0 {
            warn!("{} malformed lines skipped", s.malformed);
        }
        Ok(())
    }

    pub fn join(&self) -> JoinOutcome {
        let outcome = join::join(&self.orders, &self.fills, self.config.price_decimals);
        if outcome.unmatched > 0 {
            warn!("{} fills had no matching order", outcome.unmatched);
        }
        outcome
    }

    pub fn metrics_options(&self) -> MetricsOptions {
        MetricsOptions {
            timestamp_format: self.config.timestamp_format.clone(),
            improvement_decimals: self.config.improvement_decimals,
            sort_venues: self.config.sort_venues,
        }
    }
}
