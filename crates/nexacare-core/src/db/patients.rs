//! Patient repository.
//!
//! The three medical list fields are persisted as JSON arrays of strings
//! and normalized on every write, so free-text intake and numeric junk
//! never reach the store. Reads join the assigned doctor's display name.

use rusqlite::{params, params_from_iter, OptionalExtension, ToSql};

use super::{Database, DbError, DbResult};
use crate::models::{
    CivilStatus, Gender, NewPatient, PatientPatch, PatientRecord, PatientStatus, ReferralSource,
    VisitType,
};
use crate::normalize::{clean_list_field, ListInput};
use crate::validation::{parse_enum, require_field, validate_name, ValidationError};

const PATIENT_COLUMNS: &str = "p.id, p.patient_code, p.full_name, p.birthdate, p.gender,
    p.civil_status, p.phone, p.address, p.emergency_contact_name, p.emergency_contact_phone,
    p.visit_type, p.assigned_doctor, p.visit_date, p.insurance_provider, p.referral_source,
    p.allergies, p.chronic_illnesses, p.current_medications, p.remarks, p.status,
    p.photo_path, p.created_at,
    d.first_name || ' ' || d.last_name AS doctor_name";

impl Database {
    /// Register a patient. Validates required fields and enum membership,
    /// assigns a patient code when none is supplied, and normalizes the
    /// medical list fields. Returns the patient code.
    pub fn add_patient(&self, new: &NewPatient) -> DbResult<String> {
        require_field("Full name", &new.full_name)?;
        validate_name("Full name", &new.full_name)?;
        require_field("Birthdate", &new.birthdate)?;
        require_field("Phone", &new.phone)?;
        require_field("Address", &new.address)?;
        require_field("Emergency contact name", &new.emergency_contact_name)?;
        require_field("Emergency contact phone", &new.emergency_contact_phone)?;

        let gender = parse_enum("gender", &new.gender, Gender::parse)?;
        let civil_status = parse_enum("civil status", &new.civil_status, CivilStatus::parse)?;
        let status = match new.status.as_deref() {
            Some(s) => parse_enum("status", s, PatientStatus::parse)?,
            None => PatientStatus::Pending,
        };
        let visit_type = match new.visit_type.as_deref() {
            Some(s) => parse_enum("visit type", s, VisitType::parse)?,
            None => VisitType::NewPatient,
        };
        let referral_source = match new.referral_source.as_deref() {
            Some(s) => Some(parse_enum("referral source", s, ReferralSource::parse)?),
            None => None,
        };

        let patient_code = match &new.patient_code {
            Some(code) if !code.trim().is_empty() => code.clone(),
            _ => self.next_patient_code()?,
        };

        let allergies = encode_list(new.allergies.as_ref())?;
        let chronic_illnesses = encode_list(new.chronic_illnesses.as_ref())?;
        let current_medications = encode_list(new.current_medications.as_ref())?;

        // An empty assignment means unassigned, not a doctor with id ""
        let assigned_doctor = new
            .assigned_doctor
            .as_deref()
            .filter(|id| !id.trim().is_empty());

        self.conn.execute(
            "INSERT INTO patients (
                patient_code, full_name, birthdate, gender, civil_status, phone, address,
                emergency_contact_name, emergency_contact_phone,
                visit_type, assigned_doctor, visit_date, insurance_provider, referral_source,
                allergies, chronic_illnesses, current_medications, remarks, status, photo_path
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10,
                      ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20)",
            params![
                patient_code,
                new.full_name,
                new.birthdate,
                gender.as_str(),
                civil_status.as_str(),
                new.phone,
                new.address,
                new.emergency_contact_name,
                new.emergency_contact_phone,
                visit_type.as_str(),
                assigned_doctor,
                new.visit_date,
                new.insurance_provider,
                referral_source.map(|r| r.as_str()),
                allergies,
                chronic_illnesses,
                current_medications,
                new.remarks,
                status.as_str(),
                new.photo_path,
            ],
        )?;

        tracing::info!(patient_code = %patient_code, "patient added");
        Ok(patient_code)
    }

    /// Partial patient update: only supplied fields are written. Supplied
    /// enum fields are re-validated and supplied list fields re-normalized.
    pub fn update_patient(&self, id: i64, patch: &PatientPatch) -> DbResult<()> {
        let mut assignments: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(full_name) = &patch.full_name {
            require_field("Full name", full_name)?;
            validate_name("Full name", full_name)?;
            assignments.push("full_name = ?");
            values.push(Box::new(full_name.clone()));
        }
        if let Some(birthdate) = &patch.birthdate {
            assignments.push("birthdate = ?");
            values.push(Box::new(birthdate.clone()));
        }
        if let Some(gender) = &patch.gender {
            let gender = parse_enum("gender", gender, Gender::parse)?;
            assignments.push("gender = ?");
            values.push(Box::new(gender.as_str()));
        }
        if let Some(civil_status) = &patch.civil_status {
            let civil_status = parse_enum("civil status", civil_status, CivilStatus::parse)?;
            assignments.push("civil_status = ?");
            values.push(Box::new(civil_status.as_str()));
        }
        if let Some(phone) = &patch.phone {
            assignments.push("phone = ?");
            values.push(Box::new(phone.clone()));
        }
        if let Some(address) = &patch.address {
            assignments.push("address = ?");
            values.push(Box::new(address.clone()));
        }
        if let Some(name) = &patch.emergency_contact_name {
            assignments.push("emergency_contact_name = ?");
            values.push(Box::new(name.clone()));
        }
        if let Some(phone) = &patch.emergency_contact_phone {
            assignments.push("emergency_contact_phone = ?");
            values.push(Box::new(phone.clone()));
        }
        if let Some(code) = &patch.patient_code {
            assignments.push("patient_code = ?");
            values.push(Box::new(code.clone()));
        }
        if let Some(visit_type) = &patch.visit_type {
            let visit_type = parse_enum("visit type", visit_type, VisitType::parse)?;
            assignments.push("visit_type = ?");
            values.push(Box::new(visit_type.as_str()));
        }
        if let Some(doctor_id) = &patch.assigned_doctor {
            // Empty string clears the assignment
            let doctor_id = Some(doctor_id.clone()).filter(|d| !d.trim().is_empty());
            assignments.push("assigned_doctor = ?");
            values.push(Box::new(doctor_id));
        }
        if let Some(visit_date) = &patch.visit_date {
            assignments.push("visit_date = ?");
            values.push(Box::new(visit_date.clone()));
        }
        if let Some(provider) = &patch.insurance_provider {
            assignments.push("insurance_provider = ?");
            values.push(Box::new(provider.clone()));
        }
        if let Some(source) = &patch.referral_source {
            let source = parse_enum("referral source", source, ReferralSource::parse)?;
            assignments.push("referral_source = ?");
            values.push(Box::new(source.as_str()));
        }
        if let Some(allergies) = &patch.allergies {
            assignments.push("allergies = ?");
            values.push(Box::new(encode_list(Some(allergies))?));
        }
        if let Some(illnesses) = &patch.chronic_illnesses {
            assignments.push("chronic_illnesses = ?");
            values.push(Box::new(encode_list(Some(illnesses))?));
        }
        if let Some(medications) = &patch.current_medications {
            assignments.push("current_medications = ?");
            values.push(Box::new(encode_list(Some(medications))?));
        }
        if let Some(remarks) = &patch.remarks {
            assignments.push("remarks = ?");
            values.push(Box::new(remarks.clone()));
        }
        if let Some(status) = &patch.status {
            let status = parse_enum("status", status, PatientStatus::parse)?;
            assignments.push("status = ?");
            values.push(Box::new(status.as_str()));
        }
        if let Some(photo_path) = &patch.photo_path {
            assignments.push("photo_path = ?");
            values.push(Box::new(photo_path.clone()));
        }

        if assignments.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }

        let query = format!(
            "UPDATE patients SET {} WHERE id = ?",
            assignments.join(", ")
        );
        values.push(Box::new(id));

        let rows_affected = self
            .conn
            .execute(&query, params_from_iter(values.iter().map(|v| v.as_ref())))?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {}", id)));
        }
        Ok(())
    }

    /// Delete a patient. Appointments for the patient are deleted by the
    /// schema's cascade rule.
    pub fn delete_patient(&self, id: i64) -> DbResult<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {}", id)));
        }
        tracing::info!(patient_id = id, "patient deleted");
        Ok(())
    }

    /// Move a patient to a new lifecycle status.
    pub fn update_patient_status(&self, id: i64, new_status: &str) -> DbResult<()> {
        let status = parse_enum("status", new_status, PatientStatus::parse)?;
        let rows_affected = self.conn.execute(
            "UPDATE patients SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("patient {}", id)));
        }
        Ok(())
    }

    /// List all patients, newest first, joined to the assigned doctor's
    /// display name. The joined schema is a hard precondition; there is
    /// no fallback query.
    pub fn list_patients(&self) -> DbResult<Vec<PatientRecord>> {
        let query = format!(
            "SELECT {PATIENT_COLUMNS}
             FROM patients p
             LEFT JOIN doctors d ON p.assigned_doctor = d.user_id
             ORDER BY p.created_at DESC, p.id DESC"
        );
        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map([], read_patient_row)?;

        let mut patients = Vec::new();
        for row in rows {
            patients.push(row?.into());
        }
        Ok(patients)
    }

    /// Get a single patient by surrogate id.
    pub fn get_patient(&self, id: i64) -> DbResult<Option<PatientRecord>> {
        let query = format!(
            "SELECT {PATIENT_COLUMNS}
             FROM patients p
             LEFT JOIN doctors d ON p.assigned_doctor = d.user_id
             WHERE p.id = ?"
        );
        let row = self
            .conn
            .query_row(&query, [id], read_patient_row)
            .optional()?;
        Ok(row.map(Into::into))
    }
}

/// Normalize a submitted list field and encode it as a JSON array.
fn encode_list(input: Option<&ListInput>) -> DbResult<String> {
    let items = input.map(clean_list_field).unwrap_or_default();
    Ok(serde_json::to_string(&items)?)
}

/// Intermediate row struct for database mapping.
struct PatientRow {
    id: i64,
    patient_code: Option<String>,
    full_name: String,
    birthdate: String,
    gender: String,
    civil_status: String,
    phone: String,
    address: String,
    emergency_contact_name: String,
    emergency_contact_phone: String,
    visit_type: String,
    assigned_doctor: Option<String>,
    visit_date: Option<String>,
    insurance_provider: Option<String>,
    referral_source: Option<String>,
    allergies: String,
    chronic_illnesses: String,
    current_medications: String,
    remarks: Option<String>,
    status: String,
    photo_path: Option<String>,
    created_at: String,
    doctor_name: Option<String>,
}

fn read_patient_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        patient_code: row.get(1)?,
        full_name: row.get(2)?,
        birthdate: row.get(3)?,
        gender: row.get(4)?,
        civil_status: row.get(5)?,
        phone: row.get(6)?,
        address: row.get(7)?,
        emergency_contact_name: row.get(8)?,
        emergency_contact_phone: row.get(9)?,
        visit_type: row.get(10)?,
        assigned_doctor: row.get(11)?,
        visit_date: row.get(12)?,
        insurance_provider: row.get(13)?,
        referral_source: row.get(14)?,
        allergies: row.get(15)?,
        chronic_illnesses: row.get(16)?,
        current_medications: row.get(17)?,
        remarks: row.get(18)?,
        status: row.get(19)?,
        photo_path: row.get(20)?,
        created_at: row.get(21)?,
        doctor_name: row.get(22)?,
    })
}

impl From<PatientRow> for PatientRecord {
    fn from(row: PatientRow) -> Self {
        PatientRecord {
            id: row.id,
            patient_code: row.patient_code,
            full_name: row.full_name,
            birthdate: row.birthdate,
            gender: row.gender,
            civil_status: row.civil_status,
            phone: row.phone,
            address: row.address,
            emergency_contact_name: row.emergency_contact_name,
            emergency_contact_phone: row.emergency_contact_phone,
            visit_type: row.visit_type,
            assigned_doctor: row.assigned_doctor,
            doctor_name: row.doctor_name,
            visit_date: row.visit_date,
            insurance_provider: row.insurance_provider,
            referral_source: row.referral_source,
            allergies: decode_list(&row.allergies),
            chronic_illnesses: decode_list(&row.chronic_illnesses),
            current_medications: decode_list(&row.current_medications),
            remarks: row.remarks,
            status: row.status,
            photo_path: row.photo_path,
            created_at: row.created_at,
        }
    }
}

/// A list column that fails to parse degrades to an empty list rather
/// than failing the whole read.
fn decode_list(json: &str) -> Vec<String> {
    serde_json::from_str(json).unwrap_or_default()
}
