//! Patient models and enum vocabularies.
//!
//! Enum fields are persisted as their exact display strings (the
//! vocabularies the intake forms submit), so every enum carries an
//! `as_str`/`parse` pair.

use serde::{Deserialize, Serialize};

use crate::normalize::ListInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Prefer not to say")]
    PreferNotToSay,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::PreferNotToSay => "Prefer not to say",
        }
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s {
            "Male" => Some(Gender::Male),
            "Female" => Some(Gender::Female),
            "Other" => Some(Gender::Other),
            "Prefer not to say" => Some(Gender::PreferNotToSay),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CivilStatus {
    Single,
    Married,
    Separated,
    Divorced,
    Widowed,
    Other,
}

impl CivilStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CivilStatus::Single => "Single",
            CivilStatus::Married => "Married",
            CivilStatus::Separated => "Separated",
            CivilStatus::Divorced => "Divorced",
            CivilStatus::Widowed => "Widowed",
            CivilStatus::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<CivilStatus> {
        match s {
            "Single" => Some(CivilStatus::Single),
            "Married" => Some(CivilStatus::Married),
            "Separated" => Some(CivilStatus::Separated),
            "Divorced" => Some(CivilStatus::Divorced),
            "Widowed" => Some(CivilStatus::Widowed),
            "Other" => Some(CivilStatus::Other),
            _ => None,
        }
    }
}

/// Patient record status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatientStatus {
    Pending,
    Scheduled,
    Completed,
    Cancelled,
    #[serde(rename = "No Show")]
    NoShow,
}

impl PatientStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatientStatus::Pending => "Pending",
            PatientStatus::Scheduled => "Scheduled",
            PatientStatus::Completed => "Completed",
            PatientStatus::Cancelled => "Cancelled",
            PatientStatus::NoShow => "No Show",
        }
    }

    pub fn parse(s: &str) -> Option<PatientStatus> {
        match s {
            "Pending" => Some(PatientStatus::Pending),
            "Scheduled" => Some(PatientStatus::Scheduled),
            "Completed" => Some(PatientStatus::Completed),
            "Cancelled" => Some(PatientStatus::Cancelled),
            "No Show" => Some(PatientStatus::NoShow),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisitType {
    #[serde(rename = "New Patient")]
    NewPatient,
    #[serde(rename = "Follow-up")]
    FollowUp,
    #[serde(rename = "Walk-in")]
    WalkIn,
}

impl VisitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisitType::NewPatient => "New Patient",
            VisitType::FollowUp => "Follow-up",
            VisitType::WalkIn => "Walk-in",
        }
    }

    pub fn parse(s: &str) -> Option<VisitType> {
        match s {
            "New Patient" => Some(VisitType::NewPatient),
            "Follow-up" => Some(VisitType::FollowUp),
            "Walk-in" => Some(VisitType::WalkIn),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferralSource {
    #[serde(rename = "Walk-in")]
    WalkIn,
    Friend,
    Facebook,
    Other,
}

impl ReferralSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferralSource::WalkIn => "Walk-in",
            ReferralSource::Friend => "Friend",
            ReferralSource::Facebook => "Facebook",
            ReferralSource::Other => "Other",
        }
    }

    pub fn parse(s: &str) -> Option<ReferralSource> {
        match s {
            "Walk-in" => Some(ReferralSource::WalkIn),
            "Friend" => Some(ReferralSource::Friend),
            "Facebook" => Some(ReferralSource::Facebook),
            "Other" => Some(ReferralSource::Other),
            _ => None,
        }
    }
}

/// Input for patient intake. Enum-valued fields arrive as the strings the
/// form submitted and are validated against their vocabularies before the
/// write; the three medical list fields accept either free text or a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewPatient {
    pub full_name: String,
    pub birthdate: String,
    pub gender: String,
    pub civil_status: String,
    pub phone: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    /// Human-facing code; generated (`NXCP0001`, ...) when absent.
    pub patient_code: Option<String>,
    pub visit_type: Option<String>,
    pub assigned_doctor: Option<String>,
    pub visit_date: Option<String>,
    pub insurance_provider: Option<String>,
    pub referral_source: Option<String>,
    pub allergies: Option<ListInput>,
    pub chronic_illnesses: Option<ListInput>,
    pub current_medications: Option<ListInput>,
    pub remarks: Option<String>,
    pub status: Option<String>,
    pub photo_path: Option<String>,
}

/// Partial patient update. `None` fields are left untouched; an empty
/// `assigned_doctor` string clears the assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientPatch {
    pub full_name: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub civil_status: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub patient_code: Option<String>,
    pub visit_type: Option<String>,
    pub assigned_doctor: Option<String>,
    pub visit_date: Option<String>,
    pub insurance_provider: Option<String>,
    pub referral_source: Option<String>,
    pub allergies: Option<ListInput>,
    pub chronic_illnesses: Option<ListInput>,
    pub current_medications: Option<ListInput>,
    pub remarks: Option<String>,
    pub status: Option<String>,
    pub photo_path: Option<String>,
}

/// A patient as read back for display: list fields deserialized, the
/// assigned doctor's display name joined in (None when unassigned).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRecord {
    pub id: i64,
    pub patient_code: Option<String>,
    pub full_name: String,
    pub birthdate: String,
    pub gender: String,
    pub civil_status: String,
    pub phone: String,
    pub address: String,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub visit_type: String,
    pub assigned_doctor: Option<String>,
    pub doctor_name: Option<String>,
    pub visit_date: Option<String>,
    pub insurance_provider: Option<String>,
    pub referral_source: Option<String>,
    pub allergies: Vec<String>,
    pub chronic_illnesses: Vec<String>,
    pub current_medications: Vec<String>,
    pub remarks: Option<String>,
    pub status: String,
    pub photo_path: Option<String>,
    pub created_at: String,
}
