//! Input validation module
//!
//! Domain validation rules: the submission-eligibility field sets per vendor
//! type, and upload checks for vendor documents.

use crate::models::{VendorApplication, VendorType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid file type: {mime_type}")]
    InvalidFileType { mime_type: String },

    #[error("File too large (max {max_mb} MB)")]
    FileTooLarge { max_mb: usize },
}

// =============================================================================
// Submission Eligibility
// =============================================================================

/// Fields every application needs before it can be submitted for review.
const REQUIRED_ALWAYS: &[&str] = &[
    "company_name",
    "business_type",
    "industry",
    "primary_contact_name",
    "primary_contact_email",
    "country",
];

/// Additional requirements for domestic vendors.
const REQUIRED_DOMESTIC: &[&str] = &[
    "tax_id",
    "business_license_url",
    "tax_document_url",
    "insurance_certificate_url",
];

/// Additional requirements for international vendors. The insurance
/// certificate and import/export license stay optional for this set.
const REQUIRED_INTERNATIONAL: &[&str] = &[
    "vat_number",
    "country_of_incorporation",
    "business_registration_url",
    "tax_document_url",
    "vat_registration_url",
    "certificate_of_good_standing_url",
    "bank_details_document_url",
];

/// Report which required fields are still blank for the application's
/// vendor type.
///
/// The report is advisory: callers surface it to the applicant but do not
/// hard-block the transition to review.
pub fn missing_required_fields(app: &VendorApplication) -> Vec<&'static str> {
    let type_specific = match app.vendor_type {
        VendorType::Domestic => REQUIRED_DOMESTIC,
        VendorType::International => REQUIRED_INTERNATIONAL,
    };

    REQUIRED_ALWAYS
        .iter()
        .chain(type_specific)
        .copied()
        .filter(|field| is_blank(field_value(app, field)))
        .collect()
}

fn is_blank(value: Option<&str>) -> bool {
    value.map(str::trim).filter(|v| !v.is_empty()).is_none()
}

fn field_value<'a>(app: &'a VendorApplication, field: &str) -> Option<&'a str> {
    match field {
        "company_name" => Some(app.company_name.as_str()),
        "business_type" => app.business_type.as_deref(),
        "industry" => app.industry.as_deref(),
        "primary_contact_name" => Some(app.primary_contact_name.as_str()),
        "primary_contact_email" => Some(app.primary_contact_email.as_str()),
        "country" => app.country.as_deref(),
        "tax_id" => app.tax_id.as_deref(),
        "vat_number" => app.vat_number.as_deref(),
        "country_of_incorporation" => app.country_of_incorporation.as_deref(),
        "business_license_url" => app.business_license_url.as_deref(),
        "tax_document_url" => app.tax_document_url.as_deref(),
        "insurance_certificate_url" => app.insurance_certificate_url.as_deref(),
        "business_registration_url" => app.business_registration_url.as_deref(),
        "vat_registration_url" => app.vat_registration_url.as_deref(),
        "certificate_of_good_standing_url" => app.certificate_of_good_standing_url.as_deref(),
        "bank_details_document_url" => app.bank_details_document_url.as_deref(),
        _ => None,
    }
}

// =============================================================================
// Document Uploads
// =============================================================================

/// MIME types accepted for vendor documents. Licenses and certificates are
/// frequently scans, so common image formats are allowed alongside office
/// documents. No HTML/XML to prevent XSS via stored files.
const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
    "image/jpeg",
    "image/png",
    "image/webp",
];

/// File extensions that could be executed if the upload dir is ever
/// misconfigured behind a web server.
const DANGEROUS_EXTENSIONS: &[&str] = &[
    ".php", ".phtml", ".asp", ".aspx", ".jsp", ".cgi", ".pl", ".py", ".rb", ".exe", ".bat",
    ".cmd", ".com", ".msi", ".dll", ".sh", ".bash", ".js", ".mjs", ".jar", ".war", ".htaccess",
];

/// Validate an uploaded document before it is written to storage.
///
/// The declared Content-Type is cross-checked against the file's magic bytes;
/// when the bytes identify a known type, that identification wins.
pub fn validate_file_upload(
    declared_mime: &str,
    bytes: &[u8],
    max_size_bytes: usize,
) -> Result<(), ValidationError> {
    if bytes.len() > max_size_bytes {
        return Err(ValidationError::FileTooLarge {
            max_mb: max_size_bytes / (1024 * 1024),
        });
    }

    let effective_mime = infer::get(bytes)
        .map(|kind| kind.mime_type())
        .unwrap_or(declared_mime);

    if !ALLOWED_MIME_TYPES.contains(&effective_mime) {
        return Err(ValidationError::InvalidFileType {
            mime_type: effective_mime.to_string(),
        });
    }

    Ok(())
}

/// Check a filename for dangerous extensions, including doubled ones like
/// `invoice.php.pdf`.
pub fn validate_filename_extensions(filename: &str) -> Result<(), ValidationError> {
    let lower = filename.to_lowercase();

    for ext in DANGEROUS_EXTENSIONS {
        if lower.ends_with(ext) || lower.contains(&format!("{}.", ext)) {
            return Err(ValidationError::InvalidFileType {
                mime_type: format!("filename contains dangerous extension: {}", ext),
            });
        }
    }

    Ok(())
}
