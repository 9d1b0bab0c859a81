//! Appointment models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Pending,
    Cancelled,
    #[serde(rename = "No Show")]
    NoShow,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "No Show",
        }
    }

    pub fn parse(s: &str) -> Option<AppointmentStatus> {
        match s {
            "Scheduled" => Some(AppointmentStatus::Scheduled),
            "Completed" => Some(AppointmentStatus::Completed),
            "Pending" => Some(AppointmentStatus::Pending),
            "Cancelled" => Some(AppointmentStatus::Cancelled),
            "No Show" => Some(AppointmentStatus::NoShow),
            _ => None,
        }
    }
}

/// Input for booking an appointment. Both foreign keys must reference
/// existing rows; the store enforces that.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub patient_id: i64,
    pub doctor_id: String,
    /// Combined date+time, e.g. `2025-06-01 09:30:00`.
    pub appointment_date: String,
    pub consultation_type: String,
    /// Defaults to Scheduled when absent.
    pub status: Option<String>,
    pub notes: Option<String>,
}

/// An appointment joined to patient and doctor identity for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentView {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: String,
    pub appointment_date: String,
    pub consultation_type: String,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: String,
    pub patient_name: String,
    pub doctor_name: String,
}
