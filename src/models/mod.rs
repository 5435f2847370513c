//! Data models for the application

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

// =============================================================================
// Enums
// =============================================================================

/// Lifecycle status of a vendor application.
///
/// Stored uppercase in Postgres (`DRAFT`, `PENDING_REVIEW`, ...) and exposed
/// lower-cased on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Draft,
    PendingReview,
    UnderReview,
    Approved,
    Rejected,
    OnHold,
}

impl ApplicationStatus {
    /// Parse a client-supplied status string, case-insensitively.
    ///
    /// Unknown or empty values yield `None` and leave the stored status
    /// untouched, mirroring how the API treats unrecognized statuses.
    pub fn normalize(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "pending_review" => Some(Self::PendingReview),
            "under_review" => Some(Self::UnderReview),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "on_hold" => Some(Self::OnHold),
            _ => None,
        }
    }

    /// Applicants may edit and resubmit only drafts and rejected applications.
    pub fn applicant_editable(self) -> bool {
        matches!(self, Self::Draft | Self::Rejected)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "vendor_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VendorType {
    Domestic,
    International,
}

// =============================================================================
// Vendor Application
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct VendorApplication {
    pub id: Uuid,
    pub application_code: String,
    pub vendor_type: VendorType,
    pub status: ApplicationStatus,

    // Company profile
    pub company_name: String,
    pub business_type: Option<String>,
    pub industry: Option<String>,
    pub years_in_business: Option<i32>,
    pub annual_revenue_range: Option<String>,
    pub website: Option<String>,
    pub services_offered: Option<String>,

    // Tax identifiers: tax_id for domestic, vat_number + country of
    // incorporation for international
    pub tax_id: Option<String>,
    pub vat_number: Option<String>,
    pub country_of_incorporation: Option<String>,

    // Primary contact
    pub primary_contact_name: String,
    pub primary_contact_email: String,
    pub primary_contact_phone: Option<String>,

    // Address
    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,

    // Document references (URLs returned by the upload endpoint)
    pub business_license_url: Option<String>,
    pub tax_document_url: Option<String>,
    pub insurance_certificate_url: Option<String>,
    pub business_registration_url: Option<String>,
    pub vat_registration_url: Option<String>,
    pub certificate_of_good_standing_url: Option<String>,
    pub bank_details_document_url: Option<String>,
    pub import_export_license_url: Option<String>,
    pub compliance_certificates_url: Option<String>,

    // Banking details (international vendors)
    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub swift_code: Option<String>,
    pub iban: Option<String>,
    pub preferred_currency: Option<String>,

    // Review metadata
    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,
    pub approved_date: Option<DateTime<Utc>>,

    pub created_date: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a new application.
///
/// The server assigns `id`, `application_code` (unless a non-empty code is
/// supplied) and `created_date`; the status defaults to draft.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateApplication {
    pub vendor_type: VendorType,

    #[validate(length(min = 1, max = 255, message = "company_name is required"))]
    pub company_name: String,
    pub business_type: Option<String>,
    pub industry: Option<String>,
    pub years_in_business: Option<i32>,
    pub annual_revenue_range: Option<String>,
    pub website: Option<String>,
    pub services_offered: Option<String>,

    pub tax_id: Option<String>,
    pub vat_number: Option<String>,
    pub country_of_incorporation: Option<String>,

    #[validate(length(min = 1, max = 255, message = "primary_contact_name is required"))]
    pub primary_contact_name: String,
    #[validate(email(message = "primary_contact_email must be a valid email"))]
    pub primary_contact_email: String,
    pub primary_contact_phone: Option<String>,

    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,

    pub business_license_url: Option<String>,
    pub tax_document_url: Option<String>,
    pub insurance_certificate_url: Option<String>,
    pub business_registration_url: Option<String>,
    pub vat_registration_url: Option<String>,
    pub certificate_of_good_standing_url: Option<String>,
    pub bank_details_document_url: Option<String>,
    pub import_export_license_url: Option<String>,
    pub compliance_certificates_url: Option<String>,

    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub swift_code: Option<String>,
    pub iban: Option<String>,
    pub preferred_currency: Option<String>,

    /// Optional caller-provided code; the caller asserts uniqueness.
    pub application_code: Option<String>,
    /// Requested initial status, normalized case-insensitively.
    pub status: Option<String>,
    /// Explicit approval date override.
    pub approved_date: Option<DateTime<Utc>>,
}

/// Partial update payload. `None` leaves the stored value unchanged.
///
/// `approved_date` distinguishes "absent" (no change unless a status
/// transition dictates one) from an explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateApplication {
    pub company_name: Option<String>,
    pub business_type: Option<String>,
    pub industry: Option<String>,
    pub years_in_business: Option<i32>,
    pub annual_revenue_range: Option<String>,
    pub website: Option<String>,
    pub services_offered: Option<String>,

    pub tax_id: Option<String>,
    pub vat_number: Option<String>,
    pub country_of_incorporation: Option<String>,

    pub primary_contact_name: Option<String>,
    pub primary_contact_email: Option<String>,
    pub primary_contact_phone: Option<String>,

    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,

    pub business_license_url: Option<String>,
    pub tax_document_url: Option<String>,
    pub insurance_certificate_url: Option<String>,
    pub business_registration_url: Option<String>,
    pub vat_registration_url: Option<String>,
    pub certificate_of_good_standing_url: Option<String>,
    pub bank_details_document_url: Option<String>,
    pub import_export_license_url: Option<String>,
    pub compliance_certificates_url: Option<String>,

    pub bank_name: Option<String>,
    pub bank_account_number: Option<String>,
    pub swift_code: Option<String>,
    pub iban: Option<String>,
    pub preferred_currency: Option<String>,

    pub admin_notes: Option<String>,
    pub rejection_reason: Option<String>,

    /// Target status, normalized case-insensitively through the workflow core.
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub approved_date: Option<Option<DateTime<Utc>>>,
}

impl UpdateApplication {
    /// Merge non-status fields into an existing record.
    ///
    /// Status, `approved_date` and `rejection_reason` are owned by the
    /// workflow core and are deliberately not touched here.
    pub fn merge_into(&self, app: &mut VendorApplication) {
        macro_rules! merge {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field.clone() {
                    app.$field = Some(value);
                })*
            };
        }

        if let Some(ref name) = self.company_name {
            app.company_name = name.clone();
        }
        if let Some(ref name) = self.primary_contact_name {
            app.primary_contact_name = name.clone();
        }
        if let Some(ref email) = self.primary_contact_email {
            app.primary_contact_email = email.clone();
        }

        merge!(
            business_type,
            industry,
            years_in_business,
            annual_revenue_range,
            website,
            services_offered,
            tax_id,
            vat_number,
            country_of_incorporation,
            primary_contact_phone,
            business_address,
            city,
            state,
            zip_code,
            country,
            business_license_url,
            tax_document_url,
            insurance_certificate_url,
            business_registration_url,
            vat_registration_url,
            certificate_of_good_standing_url,
            bank_details_document_url,
            import_export_license_url,
            compliance_certificates_url,
            bank_name,
            bank_account_number,
            swift_code,
            iban,
            preferred_currency,
            admin_notes,
        );
    }
}

/// Deserialize a field that may be absent, `null`, or a value.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// =============================================================================
// Derived Views
// =============================================================================

/// Dashboard counters derived from the full application list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub pending: usize,
    pub approved: usize,
    pub rejected: usize,
}

/// Submission-eligibility report for one application.
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionChecklist {
    pub vendor_type: VendorType,
    /// Whether the applicant may still edit and resubmit.
    pub editable: bool,
    pub ready: bool,
    pub missing_fields: Vec<&'static str>,
}

/// Result of storing an uploaded document.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub file_url: String,
}

// =============================================================================
// API Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_normalize_is_case_insensitive() {
        assert_eq!(
            ApplicationStatus::normalize("pending_review"),
            Some(ApplicationStatus::PendingReview)
        );
        assert_eq!(
            ApplicationStatus::normalize("PENDING_REVIEW"),
            Some(ApplicationStatus::PendingReview)
        );
        assert_eq!(
            ApplicationStatus::normalize("  On_Hold "),
            Some(ApplicationStatus::OnHold)
        );
    }

    #[test]
    fn status_normalize_rejects_unknown_values() {
        assert_eq!(ApplicationStatus::normalize(""), None);
        assert_eq!(ApplicationStatus::normalize("archived"), None);
    }

    #[test]
    fn only_draft_and_rejected_are_applicant_editable() {
        assert!(ApplicationStatus::Draft.applicant_editable());
        assert!(ApplicationStatus::Rejected.applicant_editable());
        assert!(!ApplicationStatus::PendingReview.applicant_editable());
        assert!(!ApplicationStatus::UnderReview.applicant_editable());
        assert!(!ApplicationStatus::Approved.applicant_editable());
        assert!(!ApplicationStatus::OnHold.applicant_editable());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ApplicationStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");
    }

    #[test]
    fn approved_date_distinguishes_null_from_absent() {
        let absent: UpdateApplication = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.approved_date, None);

        let cleared: UpdateApplication =
            serde_json::from_str(r#"{"approved_date": null}"#).unwrap();
        assert_eq!(cleared.approved_date, Some(None));

        let set: UpdateApplication =
            serde_json::from_str(r#"{"approved_date": "2024-03-01T12:00:00Z"}"#).unwrap();
        assert!(matches!(set.approved_date, Some(Some(_))));
    }
}
