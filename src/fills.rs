/// A full fill on a limit order, as reported by an Execution Report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FillRecord {
    pub cl_ord_id: String,
    pub transact_time: String,
    pub avg_px: String,
    pub last_mkt: String,
}

/// Fills in arrival order. Duplicates (same ClOrdID, possibly different
/// venues) are kept; nothing is mutated after append.
#[derive(Debug, Default)]
pub struct FillLog {
    fills: Vec<FillRecord>,
}

impl FillLog {
    pub fn append(&mut self, fill: FillRecord) {
        self.fills.push(fill);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FillRecord> {
        self.fills.iter()
    }

    pub fn len(&self) -> usize {
        self.fills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fills.is_empty()
    }
}

impl<'a> IntoIterator for &'a FillLog {
    type Item = &'a FillRecord;
    type IntoIter = std::slice::Iter<'a, FillRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.fills.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_keeps_order_and_duplicates() {
        let mut log = FillLog::default();
        for mkt in ["ID1516", "ID1517", "ID1516"] {
            log.append(FillRecord {
                cl_ord_id: "ID1832".to_string(),
                transact_time: "20250910-08:00:01.324".to_string(),
                avg_px: "6.03".to_string(),
                last_mkt: mkt.to_string(),
            });
        }
        assert_eq!(log.len(), 3);
        let venues: Vec<&str> = log.iter().map(|f| f.last_mkt.as_str()).collect();
        assert_eq!(venues, ["ID1516", "ID1517", "ID1516"]);
    }
}
