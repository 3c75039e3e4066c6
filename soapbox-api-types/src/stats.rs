use serde::{Deserialize, Serialize};

/// One group-by bucket: a label (category, priority or status value) and
/// how many complaints fall into it. Order follows the query's ordering
/// and carries through to chart axes unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountBucket {
    pub label: String,
    pub count: i64,
}

impl CountBucket {
    /// Splits buckets into the (labels, values) pair the chart renderer
    /// consumes, preserving order.
    pub fn split(buckets: &[CountBucket]) -> (Vec<String>, Vec<i64>) {
        buckets
            .iter()
            .map(|bucket| (bucket.label.clone(), bucket.count))
            .unzip()
    }
}

/// Headline numbers for the operator dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardTotals {
    pub total: u64,
    pub pending: u64,
    pub in_progress: u64,
    pub resolved: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_preserves_order() {
        let buckets = vec![
            CountBucket {
                label: "Water".to_string(),
                count: 4,
            },
            CountBucket {
                label: "Roads".to_string(),
                count: 1,
            },
        ];
        let (labels, values) = CountBucket::split(&buckets);
        assert_eq!(labels, vec!["Water", "Roads"]);
        assert_eq!(values, vec![4, 1]);
    }
}
