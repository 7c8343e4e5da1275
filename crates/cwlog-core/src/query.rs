use serde::{Deserialize, Serialize};

use crate::range::DateRange;

/// Time range, text pattern and case flag handed to the log query layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryDescriptor {
    pub start_time: i64,
    pub end_time: i64,
    pub filter_pattern: Option<String>,
    pub case_sensitive: bool,
}

impl QueryDescriptor {
    pub fn new(range: DateRange, filter_pattern: Option<String>, case_sensitive: bool) -> Self {
        Self {
            start_time: range.start,
            end_time: range.end,
            filter_pattern,
            case_sensitive,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::QueryDescriptor;
    use crate::range::DateRange;

    #[test]
    fn serializes_camel_case() {
        let query = QueryDescriptor::new(
            DateRange {
                start: 1_000,
                end: 2_000,
            },
            None,
            true,
        );
        let json = serde_json::to_value(&query).unwrap();
        assert_eq!(json["startTime"], 1_000);
        assert_eq!(json["endTime"], 2_000);
        assert!(json["filterPattern"].is_null());
        assert_eq!(json["caseSensitive"], true);
    }
}
