use serde::Serialize;

use super::repo::ReportRow;

#[derive(Debug, Default, Serialize, PartialEq)]
pub struct Report {
    pub name: String,
    pub total_goals: i64,
    pub completed_goals: i64,
    pub pending_goals: i64,
    pub completion_percentage: f64,
}

/// completed / total * 100, two decimals, 0 for no goals.
pub fn completion_percentage(total: i64, completed: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let pct = completed as f64 / total as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

impl From<Option<ReportRow>> for Report {
    fn from(row: Option<ReportRow>) -> Self {
        let Some(row) = row else {
            return Report::default();
        };
        Report {
            completion_percentage: completion_percentage(row.total_goals, row.completed_goals),
            name: row.name,
            total_goals: row.total_goals,
            completed_goals: row.completed_goals,
            pending_goals: row.pending_goals,
        }
    }
}
