use crate::tags;
use fxhash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Side (54). Unknown codes are kept verbatim so they round-trip to the
/// output unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Side {
    Buy,
    Sell,
    Other(String),
}

impl Side {
    pub fn as_str(&self) -> &str {
        match self {
            Side::Buy => tags::side::BUY,
            Side::Sell => tags::side::SELL,
            Side::Other(s) => s,
        }
    }
}

impl From<&str> for Side {
    fn from(s: &str) -> Self {
        match s {
            tags::side::BUY => Side::Buy,
            tags::side::SELL => Side::Sell,
            other => Side::Other(other.to_string()),
        }
    }
}

impl From<String> for Side {
    fn from(s: String) -> Self {
        match s.as_str() {
            tags::side::BUY => Side::Buy,
            tags::side::SELL => Side::Sell,
            _ => Side::Other(s),
        }
    }
}

impl From<Side> for String {
    fn from(side: Side) -> Self {
        match side {
            Side::Other(s) => s,
            side => side.as_str().to_string(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The parts of a New Order Single needed to build an output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub cl_ord_id: String,
    pub transact_time: String,
    pub symbol: String,
    pub side: Side,
    pub order_qty: String,
    pub limit_price: String,
}

/// ClOrdID => most recent qualifying order. Lives for one run; nothing is
/// ever evicted.
#[derive(Debug, Default)]
pub struct OrderStore {
    orders: FxHashMap<String, OrderRecord>,
}

impl OrderStore {
    /// Insert or overwrite; returns the replaced order if there was one.
    pub fn put(&mut self, order: OrderRecord) -> Option<OrderRecord> {
        self.orders.insert(order.cl_ord_id.clone(), order)
    }

    pub fn get(&self, cl_ord_id: &str) -> Option<&OrderRecord> {
        self.orders.get(cl_ord_id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
