//! Appointment repository.
//!
//! Both foreign keys are enforced by the store: deleting a patient or a
//! doctor removes their appointments. Reads are always the joined view;
//! an appointment whose patient or doctor row is gone cannot exist.

use rusqlite::params;

use super::{Database, DbError, DbResult};
use crate::models::{AppointmentStatus, AppointmentView, NewAppointment};
use crate::validation::{parse_enum, require_field};

const APPOINTMENT_COLUMNS: &str = "a.id, a.patient_id, a.doctor_id, a.appointment_date,
    a.consultation_type, a.status, a.notes, a.created_at,
    p.full_name AS patient_name,
    d.first_name || ' ' || d.last_name AS doctor_name";

impl Database {
    /// Book an appointment. Returns the new appointment's id. An unknown
    /// patient or doctor is rejected by the store's foreign keys.
    pub fn add_appointment(&self, new: &NewAppointment) -> DbResult<i64> {
        require_field("Appointment date", &new.appointment_date)?;
        require_field("Consultation type", &new.consultation_type)?;
        let status = match new.status.as_deref() {
            Some(s) => parse_enum("status", s, AppointmentStatus::parse)?,
            None => AppointmentStatus::Scheduled,
        };

        self.conn.execute(
            "INSERT INTO appointments (patient_id, doctor_id, appointment_date,
                 consultation_type, status, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                new.patient_id,
                new.doctor_id,
                new.appointment_date,
                new.consultation_type,
                status.as_str(),
                new.notes,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        tracing::info!(
            appointment_id = id,
            patient_id = new.patient_id,
            doctor_id = %new.doctor_id,
            "appointment booked"
        );
        Ok(id)
    }

    /// List all appointments joined to patient and doctor identity,
    /// most recent appointment date first.
    pub fn list_appointments(&self) -> DbResult<Vec<AppointmentView>> {
        self.query_appointments(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS}
                 FROM appointments a
                 INNER JOIN patients p ON a.patient_id = p.id
                 INNER JOIN doctors d ON a.doctor_id = d.user_id
                 ORDER BY a.appointment_date DESC, a.id DESC"
            ),
            params![],
        )
    }

    /// List a doctor's appointments, most recent first.
    pub fn list_appointments_for_doctor(&self, doctor_id: &str) -> DbResult<Vec<AppointmentView>> {
        self.query_appointments(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS}
                 FROM appointments a
                 INNER JOIN patients p ON a.patient_id = p.id
                 INNER JOIN doctors d ON a.doctor_id = d.user_id
                 WHERE a.doctor_id = ?1
                 ORDER BY a.appointment_date DESC, a.id DESC"
            ),
            params![doctor_id],
        )
    }

    /// List a patient's appointments, most recent first.
    pub fn list_appointments_for_patient(&self, patient_id: i64) -> DbResult<Vec<AppointmentView>> {
        self.query_appointments(
            &format!(
                "SELECT {APPOINTMENT_COLUMNS}
                 FROM appointments a
                 INNER JOIN patients p ON a.patient_id = p.id
                 INNER JOIN doctors d ON a.doctor_id = d.user_id
                 WHERE a.patient_id = ?1
                 ORDER BY a.appointment_date DESC, a.id DESC"
            ),
            params![patient_id],
        )
    }

    /// Move an appointment to a new status.
    pub fn update_appointment_status(&self, id: i64, new_status: &str) -> DbResult<()> {
        let status = parse_enum("status", new_status, AppointmentStatus::parse)?;
        let rows_affected = self.conn.execute(
            "UPDATE appointments SET status = ? WHERE id = ?",
            params![status.as_str(), id],
        )?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("appointment {}", id)));
        }
        Ok(())
    }

    /// Cancel-and-remove an appointment.
    pub fn delete_appointment(&self, id: i64) -> DbResult<()> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("appointment {}", id)));
        }
        tracing::info!(appointment_id = id, "appointment deleted");
        Ok(())
    }

    fn query_appointments<P: rusqlite::Params>(
        &self,
        query: &str,
        params: P,
    ) -> DbResult<Vec<AppointmentView>> {
        let mut stmt = self.conn.prepare(query)?;
        let rows = stmt.query_map(params, |row| {
            Ok(AppointmentView {
                id: row.get(0)?,
                patient_id: row.get(1)?,
                doctor_id: row.get(2)?,
                appointment_date: row.get(3)?,
                consultation_type: row.get(4)?,
                status: row.get(5)?,
                notes: row.get(6)?,
                created_at: row.get(7)?,
                patient_name: row.get(8)?,
                doctor_name: row.get(9)?,
            })
        })?;

        let mut appointments = Vec::new();
        for row in rows {
            appointments.push(row?);
        }
        Ok(appointments)
    }
}
