//! Dashboard aggregation
//!
//! Counters are recomputed from the full application list on every request;
//! there are no incremental counters to fall out of sync.

use crate::models::{ApplicationStatus, DashboardStats, VendorApplication};

/// Compute dashboard counters over a list of applications.
///
/// `pending` counts applications waiting on an administrator, i.e. both
/// `pending_review` and `under_review`.
pub fn compute_stats(applications: &[VendorApplication]) -> DashboardStats {
    let mut stats = DashboardStats {
        total: applications.len(),
        pending: 0,
        approved: 0,
        rejected: 0,
    };

    for app in applications {
        match app.status {
            ApplicationStatus::PendingReview | ApplicationStatus::UnderReview => {
                stats.pending += 1
            }
            ApplicationStatus::Approved => stats.approved += 1,
            ApplicationStatus::Rejected => stats.rejected += 1,
            ApplicationStatus::Draft | ApplicationStatus::OnHold => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::application;
    use crate::models::VendorType;

    #[test]
    fn empty_list_yields_zeroes() {
        assert_eq!(
            compute_stats(&[]),
            DashboardStats {
                total: 0,
                pending: 0,
                approved: 0,
                rejected: 0
            }
        );
    }

    #[test]
    fn pending_counts_both_review_states() {
        let apps = vec![
            application(VendorType::Domestic, ApplicationStatus::PendingReview),
            application(VendorType::Domestic, ApplicationStatus::UnderReview),
            application(VendorType::International, ApplicationStatus::Approved),
            application(VendorType::Domestic, ApplicationStatus::Rejected),
        ];

        assert_eq!(
            compute_stats(&apps),
            DashboardStats {
                total: 4,
                pending: 2,
                approved: 1,
                rejected: 1
            }
        );
    }

    #[test]
    fn drafts_and_on_hold_only_count_toward_total() {
        let apps = vec![
            application(VendorType::Domestic, ApplicationStatus::Draft),
            application(VendorType::Domestic, ApplicationStatus::OnHold),
        ];

        assert_eq!(
            compute_stats(&apps),
            DashboardStats {
                total: 2,
                pending: 0,
                approved: 0,
                rejected: 0
            }
        );
    }
}
