//! FIX tag numbers and enumerated field values used by the classifier.

pub const AVG_PX: u32 = 6;
pub const CL_ORD_ID: u32 = 11;
pub const LAST_MKT: u32 = 30;
pub const MSG_TYPE: u32 = 35;
pub const ORDER_QTY: u32 = 38;
pub const ORD_STATUS: u32 = 39;
pub const ORD_TYPE: u32 = 40;
pub const PRICE: u32 = 44;
pub const SIDE: u32 = 54;
pub const SYMBOL: u32 = 55;
pub const TRANSACT_TIME: u32 = 60;
pub const EXEC_TYPE: u32 = 150;

/// MsgType (35) values
pub mod msg_type {
    pub const EXECUTION_REPORT: &str = "8";
    pub const NEW_ORDER_SINGLE: &str = "D";
}

/// OrdType (40) = Limit
pub const ORD_TYPE_LIMIT: &str = "2";

/// ExecType (150) = Fill
pub const EXEC_TYPE_FILL: &str = "2";

/// OrdStatus (39) = Filled
pub const ORD_STATUS_FILLED: &str = "2";

/// Side (54) values
pub mod side {
    pub const BUY: &str = "1";
    pub const SELL: &str = "2";
}
