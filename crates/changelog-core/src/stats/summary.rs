use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::record::{Category, EstimatedRecord};

/// Totals for the dashboard summary tiles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateSummary {
    pub total_minutes: u64,
    pub total_records: usize,
    /// Minutes per category; only categories that occur are present
    pub minutes_by_category: BTreeMap<Category, u64>,
}

impl AggregateSummary {
    /// Minutes attributed to `category`, zero if none.
    pub fn minutes_for(&self, category: Category) -> u64 {
        self.minutes_by_category.get(&category).copied().unwrap_or(0)
    }

    /// Mean estimate per record, zero for an empty summary.
    pub fn average_minutes(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.total_minutes as f64 / self.total_records as f64
        }
    }
}

/// Aggregate totals in a single pass.
pub fn aggregate(records: &[EstimatedRecord]) -> AggregateSummary {
    records
        .iter()
        .fold(AggregateSummary::default(), |mut summary, r| {
            let minutes = r.estimated_minutes as u64;
            summary.total_minutes += minutes;
            summary.total_records += 1;
            *summary
                .minutes_by_category
                .entry(r.record.category)
                .or_insert(0) += minutes;
            summary
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ChangeRecord;
    use chrono::Utc;

    fn estimated(category: Category, minutes: u32) -> EstimatedRecord {
        EstimatedRecord::new(ChangeRecord::new("x", "Work", category, Utc::now()), minutes)
    }

    #[test]
    fn test_aggregate_totals() {
        let records = vec![
            estimated(Category::Feature, 45),
            estimated(Category::Feature, 90),
            estimated(Category::Bugfix, 36),
            estimated(Category::Unknown, 30),
        ];
        let summary = aggregate(&records);
        assert_eq!(summary.total_minutes, 201);
        assert_eq!(summary.total_records, 4);
        assert_eq!(summary.minutes_for(Category::Feature), 135);
        assert_eq!(summary.minutes_for(Category::Bugfix), 36);
        assert_eq!(summary.minutes_for(Category::Unknown), 30);
        assert_eq!(summary.minutes_for(Category::Security), 0);
        assert_eq!(
            summary.minutes_by_category.values().sum::<u64>(),
            summary.total_minutes
        );
    }

    #[test]
    fn test_aggregate_empty() {
        let summary = aggregate(&[]);
        assert_eq!(summary, AggregateSummary::default());
        assert_eq!(summary.average_minutes(), 0.0);
    }

    #[test]
    fn test_category_keys_serialize_as_strings() {
        let summary = aggregate(&[estimated(Category::Security, 42)]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["minutes_by_category"]["security"], 42);
    }
}
