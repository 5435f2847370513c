//! Persistence gateway for vendor applications
//!
//! Plain query functions over the shared pool. Not-found is modeled as
//! `Ok(None)`; callers translate it to their own error surface.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ApplicationStatus, CreateApplication, VendorApplication};

/// Insert a new application. The server-side defaults fill `id`,
/// `created_date` and `updated_at`.
pub async fn create(
    pool: &PgPool,
    application_code: &str,
    status: ApplicationStatus,
    approved_date: Option<DateTime<Utc>>,
    input: &CreateApplication,
) -> Result<VendorApplication, sqlx::Error> {
    sqlx::query_as::<_, VendorApplication>(
        r#"
        INSERT INTO vendor_applications (
            application_code, vendor_type, status,
            company_name, business_type, industry, years_in_business,
            annual_revenue_range, website, services_offered,
            tax_id, vat_number, country_of_incorporation,
            primary_contact_name, primary_contact_email, primary_contact_phone,
            business_address, city, state, zip_code, country,
            business_license_url, tax_document_url, insurance_certificate_url,
            business_registration_url, vat_registration_url,
            certificate_of_good_standing_url, bank_details_document_url,
            import_export_license_url, compliance_certificates_url,
            bank_name, bank_account_number, swift_code, iban,
            preferred_currency, approved_date
        )
        VALUES (
            $1, $2, $3,
            $4, $5, $6, $7,
            $8, $9, $10,
            $11, $12, $13,
            $14, $15, $16,
            $17, $18, $19, $20, $21,
            $22, $23, $24,
            $25, $26,
            $27, $28,
            $29, $30,
            $31, $32, $33, $34,
            $35, $36
        )
        RETURNING *
        "#,
    )
    .bind(application_code)
    .bind(input.vendor_type)
    .bind(status)
    .bind(&input.company_name)
    .bind(&input.business_type)
    .bind(&input.industry)
    .bind(input.years_in_business)
    .bind(&input.annual_revenue_range)
    .bind(&input.website)
    .bind(&input.services_offered)
    .bind(&input.tax_id)
    .bind(&input.vat_number)
    .bind(&input.country_of_incorporation)
    .bind(&input.primary_contact_name)
    .bind(&input.primary_contact_email)
    .bind(&input.primary_contact_phone)
    .bind(&input.business_address)
    .bind(&input.city)
    .bind(&input.state)
    .bind(&input.zip_code)
    .bind(&input.country)
    .bind(&input.business_license_url)
    .bind(&input.tax_document_url)
    .bind(&input.insurance_certificate_url)
    .bind(&input.business_registration_url)
    .bind(&input.vat_registration_url)
    .bind(&input.certificate_of_good_standing_url)
    .bind(&input.bank_details_document_url)
    .bind(&input.import_export_license_url)
    .bind(&input.compliance_certificates_url)
    .bind(&input.bank_name)
    .bind(&input.bank_account_number)
    .bind(&input.swift_code)
    .bind(&input.iban)
    .bind(&input.preferred_currency)
    .bind(approved_date)
    .fetch_one(pool)
    .await
}

pub async fn get_by_id(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<VendorApplication>, sqlx::Error> {
    sqlx::query_as::<_, VendorApplication>("SELECT * FROM vendor_applications WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Unauthenticated applicant lookup. The email comparison is
/// case-insensitive; a code match with the wrong email is indistinguishable
/// from an unknown code.
pub async fn get_by_code_and_email(
    pool: &PgPool,
    code: &str,
    email: &str,
) -> Result<Option<VendorApplication>, sqlx::Error> {
    sqlx::query_as::<_, VendorApplication>(
        r#"
        SELECT * FROM vendor_applications
        WHERE application_code = $1
          AND LOWER(primary_contact_email) = LOWER($2)
        "#,
    )
    .bind(code)
    .bind(email.trim())
    .fetch_optional(pool)
    .await
}

pub async fn list_all(pool: &PgPool) -> Result<Vec<VendorApplication>, sqlx::Error> {
    sqlx::query_as::<_, VendorApplication>(
        "SELECT * FROM vendor_applications ORDER BY created_date DESC",
    )
    .fetch_all(pool)
    .await
}

/// Persist a merged record in a single row write. The id, code and creation
/// timestamp never change; `updated_at` is refreshed by the trigger.
pub async fn update(
    pool: &PgPool,
    app: &VendorApplication,
) -> Result<Option<VendorApplication>, sqlx::Error> {
    sqlx::query_as::<_, VendorApplication>(
        r#"
        UPDATE vendor_applications SET
            status = $1,
            company_name = $2,
            business_type = $3,
            industry = $4,
            years_in_business = $5,
            annual_revenue_range = $6,
            website = $7,
            services_offered = $8,
            tax_id = $9,
            vat_number = $10,
            country_of_incorporation = $11,
            primary_contact_name = $12,
            primary_contact_email = $13,
            primary_contact_phone = $14,
            business_address = $15,
            city = $16,
            state = $17,
            zip_code = $18,
            country = $19,
            business_license_url = $20,
            tax_document_url = $21,
            insurance_certificate_url = $22,
            business_registration_url = $23,
            vat_registration_url = $24,
            certificate_of_good_standing_url = $25,
            bank_details_document_url = $26,
            import_export_license_url = $27,
            compliance_certificates_url = $28,
            bank_name = $29,
            bank_account_number = $30,
            swift_code = $31,
            iban = $32,
            preferred_currency = $33,
            admin_notes = $34,
            rejection_reason = $35,
            approved_date = $36
        WHERE id = $37
        RETURNING *
        "#,
    )
    .bind(app.status)
    .bind(&app.company_name)
    .bind(&app.business_type)
    .bind(&app.industry)
    .bind(app.years_in_business)
    .bind(&app.annual_revenue_range)
    .bind(&app.website)
    .bind(&app.services_offered)
    .bind(&app.tax_id)
    .bind(&app.vat_number)
    .bind(&app.country_of_incorporation)
    .bind(&app.primary_contact_name)
    .bind(&app.primary_contact_email)
    .bind(&app.primary_contact_phone)
    .bind(&app.business_address)
    .bind(&app.city)
    .bind(&app.state)
    .bind(&app.zip_code)
    .bind(&app.country)
    .bind(&app.business_license_url)
    .bind(&app.tax_document_url)
    .bind(&app.insurance_certificate_url)
    .bind(&app.business_registration_url)
    .bind(&app.vat_registration_url)
    .bind(&app.certificate_of_good_standing_url)
    .bind(&app.bank_details_document_url)
    .bind(&app.import_export_license_url)
    .bind(&app.compliance_certificates_url)
    .bind(&app.bank_name)
    .bind(&app.bank_account_number)
    .bind(&app.swift_code)
    .bind(&app.iban)
    .bind(&app.preferred_currency)
    .bind(&app.admin_notes)
    .bind(&app.rejection_reason)
    .bind(app.approved_date)
    .bind(app.id)
    .fetch_optional(pool)
    .await
}

/// Administrative hard delete. Returns whether a row was removed.
pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM vendor_applications WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
