use crate::{
    fills::FillRecord,
    orders::{OrderRecord, Side},
    tags::{self, msg_type},
    tokenizer::RawMessage,
};

/// What one tokenized message means for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Order(OrderRecord),
    Fill(FillRecord),
    /// qualifying message type, but ClOrdID (11) missing or empty
    MissingClOrdId,
    Ignored,
}

/// New Order Single for a limit order.
pub fn is_qualifying_order(msg: &RawMessage) -> bool {
    msg.get(tags::MSG_TYPE) == Some(msg_type::NEW_ORDER_SINGLE)
        && msg.get(tags::ORD_TYPE) == Some(tags::ORD_TYPE_LIMIT)
}

/// Execution Report for a complete fill of a limit order. Partial fills,
/// cancels, rejects and non-limit orders all fail at least one leg.
pub fn is_qualifying_fill(msg: &RawMessage) -> bool {
    msg.get(tags::MSG_TYPE) == Some(msg_type::EXECUTION_REPORT)
        && msg.get(tags::EXEC_TYPE) == Some(tags::EXEC_TYPE_FILL)
        && msg.get(tags::ORD_STATUS) == Some(tags::ORD_STATUS_FILLED)
        && msg.get(tags::ORD_TYPE) == Some(tags::ORD_TYPE_LIMIT)
}

pub fn classify(msg: &RawMessage) -> Classified {
    let cl_ord_id = msg.get_or_empty(tags::CL_ORD_ID);
    if is_qualifying_order(msg) {
        if cl_ord_id.is_empty() {
            return Classified::MissingClOrdId;
        }
        Classified::Order(OrderRecord {
            cl_ord_id: cl_ord_id.to_string(),
            transact_time: msg.get_or_empty(tags::TRANSACT_TIME).to_string(),
            symbol: msg.get_or_empty(tags::SYMBOL).to_string(),
            side: Side::from(msg.get_or_empty(tags::SIDE)),
            order_qty: msg.get_or_empty(tags::ORDER_QTY).to_string(),
            limit_price: msg.get_or_empty(tags::PRICE).to_string(),
        })
    } else if is_qualifying_fill(msg) {
        if cl_ord_id.is_empty() {
            return Classified::MissingClOrdId;
        }
        Classified::Fill(FillRecord {
            cl_ord_id: cl_ord_id.to_string(),
            transact_time: msg.get_or_empty(tags::TRANSACT_TIME).to_string(),
            avg_px: msg.get_or_empty(tags::AVG_PX).to_string(),
            last_mkt: msg.get_or_empty(tags::LAST_MKT).to_string(),
        })
    } else {
        Classified::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(pairs: &[(u32, &str)]) -> RawMessage {
        pairs.iter().map(|(t, v)| (*t, v.to_string())).collect()
    }

    #[test]
    fn test_limit_new_order() {
        let m = msg(&[
            (35, "D"),
            (11, "ID1"),
            (40, "2"),
            (54, "1"),
            (55, "AMD"),
            (38, "80"),
            (44, "159.56"),
            (60, "20250910-08:00:00.866"),
        ]);
        match classify(&m) {
            Classified::Order(o) => {
                assert_eq!(o.cl_ord_id, "ID1");
                assert_eq!(o.side, Side::Buy);
                assert_eq!(o.symbol, "AMD");
                assert_eq!(o.order_qty, "80");
                assert_eq!(o.limit_price, "159.56");
                assert_eq!(o.transact_time, "20250910-08:00:00.866");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_market_order_ignored() {
        let m = msg(&[(35, "D"), (11, "ID1"), (40, "1")]);
        assert_eq!(classify(&m), Classified::Ignored);
    }

    #[test]
    fn test_full_fill() {
        let m = msg(&[
            (35, "8"),
            (11, "ID1"),
            (150, "2"),
            (39, "2"),
            (40, "2"),
            (6, "160.11"),
            (30, "ID1516"),
            (60, "20250910-08:00:01.006"),
        ]);
        assert_eq!(
            classify(&m),
            Classified::Fill(FillRecord {
                cl_ord_id: "ID1".to_string(),
                transact_time: "20250910-08:00:01.006".to_string(),
                avg_px: "160.11".to_string(),
                last_mkt: "ID1516".to_string(),
            })
        );
    }

    #[test]
    fn test_partial_fill_ignored() {
        let partial = msg(&[(35, "8"), (11, "ID1"), (150, "1"), (39, "1"), (40, "2")]);
        assert_eq!(classify(&partial), Classified::Ignored);
        let exec_only = msg(&[(35, "8"), (11, "ID1"), (150, "2"), (39, "1"), (40, "2")]);
        assert_eq!(classify(&exec_only), Classified::Ignored);
        let no_ord_type = msg(&[(35, "8"), (11, "ID1"), (150, "2"), (39, "2")]);
        assert_eq!(classify(&no_ord_type), Classified::Ignored);
    }

    #[test]
    fn test_missing_cl_ord_id() {
        let order = msg(&[(35, "D"), (40, "2")]);
        assert_eq!(classify(&order), Classified::MissingClOrdId);
        let fill = msg(&[(35, "8"), (11, ""), (150, "2"), (39, "2"), (40, "2")]);
        assert_eq!(classify(&fill), Classified::MissingClOrdId);
    }

    #[test]
    fn test_other_msg_type_ignored() {
        assert_eq!(classify(&msg(&[(35, "F"), (11, "ID1"), (40, "2")])), Classified::Ignored);
        assert_eq!(classify(&RawMessage::default()), Classified::Ignored);
    }
}
