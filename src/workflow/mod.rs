//! Status workflow core
//!
//! Owns every status transition and its side effects: stamping or clearing
//! the approval date and guarding rejections behind a non-empty reason.
//! Handlers merge a patch into the stored record through [`apply_update`]
//! and persist the result in a single row write, so the invariant
//! "`approved_date` is set iff the last transition entered approved" cannot
//! drift between call sites.

pub mod codes;
pub mod stats;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{ApplicationStatus, UpdateApplication, VendorApplication};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("rejection reason required")]
    RejectionReasonRequired,
}

/// Merge a partial update into an application record.
///
/// Non-status fields are copied over first; if the patch carries a
/// recognizable status, the transition (and its side effects) is applied on
/// top. A patch without a status change may still set or clear the approval
/// date explicitly, as the review UI does when correcting a record.
pub fn apply_update(
    app: &mut VendorApplication,
    patch: &UpdateApplication,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    patch.merge_into(app);

    let target = patch
        .status
        .as_deref()
        .and_then(ApplicationStatus::normalize);

    match target {
        Some(target) => apply_transition(
            app,
            target,
            patch.approved_date,
            patch.rejection_reason.as_deref(),
            now,
        ),
        None => {
            if let Some(explicit) = patch.approved_date {
                app.approved_date = explicit;
            }
            if let Some(reason) = non_blank(patch.rejection_reason.as_deref()) {
                app.rejection_reason = Some(reason);
            }
            Ok(())
        }
    }
}

/// Move an application into `target`, applying transition side effects.
///
/// * entering `rejected` requires a non-empty reason (the incoming one, or
///   the reason already on record); the check fails before any persistence
///   call is made
/// * entering `approved` stamps `approved_date` with `now` unless an
///   explicit override is supplied, and clears any rejection reason
/// * every other target clears `approved_date` unless overridden
pub fn apply_transition(
    app: &mut VendorApplication,
    target: ApplicationStatus,
    approved_date_override: Option<Option<DateTime<Utc>>>,
    rejection_reason: Option<&str>,
    now: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    match target {
        ApplicationStatus::Rejected => {
            let reason = non_blank(rejection_reason)
                .or_else(|| non_blank(app.rejection_reason.as_deref()))
                .ok_or(WorkflowError::RejectionReasonRequired)?;
            app.rejection_reason = Some(reason);
        }
        ApplicationStatus::Approved => {
            app.rejection_reason = None;
        }
        _ => {
            if let Some(reason) = non_blank(rejection_reason) {
                app.rejection_reason = Some(reason);
            }
        }
    }

    app.approved_date = match (target, approved_date_override) {
        (_, Some(explicit)) => explicit,
        (ApplicationStatus::Approved, None) => Some(now),
        (_, None) => None,
    };

    app.status = target;
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::application;
    use crate::models::VendorType;

    fn pending() -> VendorApplication {
        application(VendorType::Domestic, ApplicationStatus::PendingReview)
    }

    #[test]
    fn reject_without_reason_fails_before_persistence() {
        let mut app = pending();
        let err = apply_transition(&mut app, ApplicationStatus::Rejected, None, None, Utc::now())
            .unwrap_err();
        assert_eq!(err, WorkflowError::RejectionReasonRequired);
        // The record is left as it was.
        assert_eq!(app.status, ApplicationStatus::PendingReview);
        assert_eq!(app.rejection_reason, None);
    }

    #[test]
    fn reject_with_whitespace_reason_fails() {
        let mut app = pending();
        let err = apply_transition(
            &mut app,
            ApplicationStatus::Rejected,
            None,
            Some("   "),
            Utc::now(),
        )
        .unwrap_err();
        assert_eq!(err, WorkflowError::RejectionReasonRequired);
    }

    #[test]
    fn reject_sets_reason_and_clears_approved_date() {
        let mut app = pending();
        app.approved_date = Some(Utc::now());

        apply_transition(
            &mut app,
            ApplicationStatus::Rejected,
            None,
            Some("incomplete tax documents"),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(app.status, ApplicationStatus::Rejected);
        assert_eq!(
            app.rejection_reason.as_deref(),
            Some("incomplete tax documents")
        );
        assert_eq!(app.approved_date, None);
    }

    #[test]
    fn reject_falls_back_to_stored_reason() {
        let mut app = pending();
        app.rejection_reason = Some("missing insurance certificate".to_string());

        apply_transition(&mut app, ApplicationStatus::Rejected, None, None, Utc::now()).unwrap();
        assert_eq!(
            app.rejection_reason.as_deref(),
            Some("missing insurance certificate")
        );
    }

    #[test]
    fn approve_stamps_now_and_clears_rejection_reason() {
        let mut app = pending();
        app.rejection_reason = Some("previously rejected".to_string());
        let now = Utc::now();

        apply_transition(&mut app, ApplicationStatus::Approved, None, None, now).unwrap();

        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.approved_date, Some(now));
        assert_eq!(app.rejection_reason, None);
    }

    #[test]
    fn approve_respects_explicit_date_override() {
        let mut app = pending();
        let explicit = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();

        apply_transition(
            &mut app,
            ApplicationStatus::Approved,
            Some(Some(explicit)),
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(app.approved_date, Some(explicit));
    }

    #[test]
    fn non_approved_target_clears_approved_date() {
        let mut app = application(VendorType::International, ApplicationStatus::Approved);
        app.approved_date = Some(Utc::now());

        apply_transition(&mut app, ApplicationStatus::OnHold, None, None, Utc::now()).unwrap();

        assert_eq!(app.status, ApplicationStatus::OnHold);
        assert_eq!(app.approved_date, None);
    }

    #[test]
    fn non_approved_target_keeps_explicit_override() {
        let mut app = pending();
        let explicit = "2024-03-01T12:00:00Z".parse::<DateTime<Utc>>().unwrap();

        apply_transition(
            &mut app,
            ApplicationStatus::UnderReview,
            Some(Some(explicit)),
            None,
            Utc::now(),
        )
        .unwrap();

        assert_eq!(app.approved_date, Some(explicit));
    }

    #[test]
    fn update_without_status_change_leaves_workflow_state_alone() {
        let mut app = application(VendorType::Domestic, ApplicationStatus::Approved);
        let approved_at = Utc::now();
        app.approved_date = Some(approved_at);

        let patch = UpdateApplication {
            website: Some("https://acme.example".to_string()),
            ..Default::default()
        };
        apply_update(&mut app, &patch, Utc::now()).unwrap();

        assert_eq!(app.status, ApplicationStatus::Approved);
        assert_eq!(app.approved_date, Some(approved_at));
        assert_eq!(app.website.as_deref(), Some("https://acme.example"));
    }

    #[test]
    fn update_with_unknown_status_is_ignored() {
        let mut app = pending();
        let patch = UpdateApplication {
            status: Some("archived".to_string()),
            ..Default::default()
        };
        apply_update(&mut app, &patch, Utc::now()).unwrap();
        assert_eq!(app.status, ApplicationStatus::PendingReview);
    }

    #[test]
    fn update_accepts_uppercase_status() {
        let mut app = pending();
        let patch = UpdateApplication {
            status: Some("UNDER_REVIEW".to_string()),
            ..Default::default()
        };
        apply_update(&mut app, &patch, Utc::now()).unwrap();
        assert_eq!(app.status, ApplicationStatus::UnderReview);
    }

    #[test]
    fn update_can_clear_approved_date_explicitly() {
        let mut app = application(VendorType::Domestic, ApplicationStatus::Approved);
        app.approved_date = Some(Utc::now());

        let patch = UpdateApplication {
            approved_date: Some(None),
            ..Default::default()
        };
        apply_update(&mut app, &patch, Utc::now()).unwrap();
        assert_eq!(app.approved_date, None);
    }

    #[test]
    fn update_carries_admin_notes_through_transitions() {
        let mut app = pending();
        let patch = UpdateApplication {
            status: Some("under_review".to_string()),
            admin_notes: Some("called the vendor, awaiting W-9".to_string()),
            ..Default::default()
        };
        apply_update(&mut app, &patch, Utc::now()).unwrap();

        assert_eq!(app.status, ApplicationStatus::UnderReview);
        assert_eq!(
            app.admin_notes.as_deref(),
            Some("called the vendor, awaiting W-9")
        );
    }
}
