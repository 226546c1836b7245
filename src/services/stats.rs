use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::data::{ClubActivity, ClubReviewCounts, MonthlyAmount, ReviewCounts, TxKind};

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub audited_clubs_count: i64,
    pub flagged_transaction_count: i64,
    pub average_expense_ratio: f64,
    pub average_receipt_ratio: f64,
    pub audit_completion_rate: f64,
}

/// The auditor landing-page numbers. Ratios are averaged per club account,
/// not over all transactions, so small clubs weigh the same as big ones.
pub fn dashboard_summary(
    club_count: i64,
    review: &ReviewCounts,
    activity: &[ClubActivity],
) -> DashboardSummary {
    let mut expense_ratios: Vec<f64> = Vec::new();
    let mut receipt_ratios: Vec<f64> = Vec::new();

    for club in activity {
        if club.total <= 0 {
            continue;
        }

        expense_ratios.push(club.expenses as f64 / club.total as f64 * 100.0);
        receipt_ratios.push(club.receipted as f64 / club.total as f64 * 100.0);
    }

    let completion_rate = if review.total > 0 {
        review.completed as f64 / review.total as f64 * 100.0
    } else {
        0.0
    };

    return DashboardSummary {
        audited_clubs_count: club_count,
        flagged_transaction_count: review.total - review.completed,
        average_expense_ratio: round1(mean(&expense_ratios)),
        average_receipt_ratio: round1(mean(&receipt_ratios)),
        audit_completion_rate: round1(completion_rate),
    };
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct ClubReviewSummary {
    pub club: String,
    pub total: i64,
    pub completed: i64,
    pub in_progress: i64,
    pub not_reviewed: i64,
    pub completion_rate: f64,
}

pub fn club_review_summaries(rows: Vec<ClubReviewCounts>) -> Vec<ClubReviewSummary> {
    return rows
        .into_iter()
        .map(|row| {
            let rate = if row.total > 0 {
                row.completed as f64 / row.total as f64 * 100.0
            } else {
                0.0
            };

            ClubReviewSummary {
                club: row.club,
                total: row.total,
                completed: row.completed,
                in_progress: row.in_progress,
                not_reviewed: row.not_reviewed,
                completion_rate: round1(rate),
            }
        })
        .collect();
}

#[derive(Debug, PartialEq, Serialize, ToSchema)]
pub struct MonthlySummary {
    pub month: String,
    pub income: i64,
    pub expense: i64,
}

/// Folds per-(month, kind) sums into one row per month, months ascending.
pub fn fold_monthly(rows: Vec<MonthlyAmount>) -> Vec<MonthlySummary> {
    let mut by_month: BTreeMap<String, (i64, i64)> = BTreeMap::new();

    for row in rows {
        let entry = by_month.entry(row.month).or_default();
        match row.kind {
            TxKind::Income => entry.0 += row.total,
            TxKind::Expense => entry.1 += row.total,
        }
    }

    return by_month
        .into_iter()
        .map(|(month, (income, expense))| MonthlySummary {
            month,
            income,
            expense,
        })
        .collect();
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    return values.iter().sum::<f64>() / values.len() as f64;
}

fn round1(value: f64) -> f64 {
    return (value * 10.0).round() / 10.0;
}

#[cfg(test)]
mod test {
    use super::{dashboard_summary, fold_monthly};
    use crate::data::{ClubActivity, MonthlyAmount, ReviewCounts, TxKind};

    #[test]
    fn dashboard_averages_per_club() {
        let review = ReviewCounts {
            total: 6,
            completed: 3,
            in_progress: 1,
            not_reviewed: 2,
        };
        let activity = vec![
            ClubActivity {
                user_id: "a".to_owned(),
                total: 2,
                expenses: 1,
                receipted: 1,
            },
            ClubActivity {
                user_id: "b".to_owned(),
                total: 4,
                expenses: 3,
                receipted: 2,
            },
        ];

        let summary = dashboard_summary(2, &review, &activity);

        assert_eq!(summary.audited_clubs_count, 2);
        assert_eq!(summary.flagged_transaction_count, 3);
        // (50 + 75) / 2
        assert_eq!(summary.average_expense_ratio, 62.5);
        // (50 + 50) / 2
        assert_eq!(summary.average_receipt_ratio, 50.0);
        assert_eq!(summary.audit_completion_rate, 50.0);
    }

    #[test]
    fn dashboard_handles_no_activity() {
        let review = ReviewCounts {
            total: 0,
            completed: 0,
            in_progress: 0,
            not_reviewed: 0,
        };

        let summary = dashboard_summary(0, &review, &[]);

        assert_eq!(summary.average_expense_ratio, 0.0);
        assert_eq!(summary.average_receipt_ratio, 0.0);
        assert_eq!(summary.audit_completion_rate, 0.0);
    }

    #[test]
    fn monthly_rows_merge_by_month() {
        let rows = vec![
            MonthlyAmount {
                month: "2024-04".to_owned(),
                kind: TxKind::Expense,
                total: 30000,
            },
            MonthlyAmount {
                month: "2024-03".to_owned(),
                kind: TxKind::Income,
                total: 50000,
            },
            MonthlyAmount {
                month: "2024-03".to_owned(),
                kind: TxKind::Expense,
                total: 20000,
            },
        ];

        let summaries = fold_monthly(rows);

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].month, "2024-03");
        assert_eq!(summaries[0].income, 50000);
        assert_eq!(summaries[0].expense, 20000);
        assert_eq!(summaries[1].month, "2024-04");
        assert_eq!(summaries[1].income, 0);
        assert_eq!(summaries[1].expense, 30000);
    }
}
