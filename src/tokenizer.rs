use crate::config::Config;

pub const SOH: char = '\x01';

/// One FIX message as (tag, value) pairs in wire order. Tags may repeat;
/// lookups resolve to the last occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMessage {
    fields: Vec<(u32, String)>,
}

impl RawMessage {
    pub fn get(&self, tag: u32) -> Option<&str> {
        self.fields.iter().rev().find(|(t, _)| *t == tag).map(|(_, v)| v.as_str())
    }

    /// Value of `tag`, or "" when absent.
    pub fn get_or_empty(&self, tag: u32) -> &str {
        self.get(tag).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.fields.iter().map(|(t, v)| (*t, v.as_str()))
    }
}

impl FromIterator<(u32, String)> for RawMessage {
    fn from_iter<I: IntoIterator<Item = (u32, String)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

/// Split a log line of the form `<prefix> : 35=D^A11=ID1^A...` into its
/// fields. Returns `None` when the line has no prefix separator; a line with
/// a separator but no usable `tag=value` pair yields an empty message.
pub fn tokenize(line: &str, config: &Config) -> Option<RawMessage> {
    let (_prefix, body) = line.split_once(config.prefix_separator.as_str())?;
    let body = body.trim_end_matches(['\r', '\n']);
    let body = body.replace(config.escaped_delimiter.as_str(), "\x01");
    // trailer marker, not validated
    let body = body.trim_end_matches([SOH, '$']);
    Some(
        body.split(SOH)
            .filter_map(|part| {
                let (tag, value) = part.split_once('=')?;
                let tag = tag.trim().parse::<u32>().ok()?;
                Some((tag, value.to_string()))
            })
            .collect(),
    )
}
