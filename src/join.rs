use crate::{fills::FillLog, orders::OrderStore, orders::Side, price::format_price};
use log::debug;
use serde::{Deserialize, Serialize};

/// Column order of the joined CSV.
pub const OUTPUT_COLUMNS: [&str; 9] = [
    "OrderID",
    "OrderTransactTime",
    "ExecutionTransactTime",
    "Symbol",
    "Side",
    "OrderQty",
    "LimitPrice",
    "AvgPx",
    "LastMkt",
];

/// One fill joined with the order it executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "OrderTransactTime")]
    pub order_transact_time: String,
    #[serde(rename = "ExecutionTransactTime")]
    pub execution_transact_time: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Side")]
    pub side: Side,
    #[serde(rename = "OrderQty")]
    pub order_qty: String,
    #[serde(rename = "LimitPrice")]
    pub limit_price: String,
    #[serde(rename = "AvgPx")]
    pub avg_px: String,
    #[serde(rename = "LastMkt")]
    pub last_mkt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinOutcome {
    pub rows: Vec<OutputRow>,
    /// fills whose ClOrdID never appeared on a qualifying order
    pub unmatched: usize,
}

/// Resolve every collected fill against the fully built order store. Rows
/// come out in fill arrival order; the stores are not touched, so joining
/// twice gives the same result.
pub fn join(orders: &OrderStore, fills: &FillLog, price_decimals: u32) -> JoinOutcome {
    let mut outcome = JoinOutcome::default();
    for fill in fills {
        let Some(order) = orders.get(&fill.cl_ord_id) else {
            debug!("no order for fill {} on {}", fill.cl_ord_id, fill.last_mkt);
            outcome.unmatched += 1;
            continue;
        };
        outcome.rows.push(OutputRow {
            order_id: fill.cl_ord_id.clone(),
            order_transact_time: order.transact_time.clone(),
            execution_transact_time: fill.transact_time.clone(),
            symbol: order.symbol.clone(),
            side: order.side.clone(),
            order_qty: order.order_qty.clone(),
            limit_price: format_price(&order.limit_price, price_decimals),
            avg_px: format_price(&fill.avg_px, price_decimals),
            last_mkt: fill.last_mkt.clone(),
        });
    }
    outcome
}
