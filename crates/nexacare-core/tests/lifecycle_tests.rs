//! End-to-end lifecycle tests over a fresh database: bootstrap seeding,
//! staff onboarding with the verification gate, patient intake, and
//! appointment booking with cascade behavior.

use nexacare_core::db::{SEED_ADMIN_ID, SEED_HR_ID};
use nexacare_core::{
    AccountUpdate, Database, DbError, ListInput, NewAccount, NewAppointment, NewPatient,
    PatientPatch, Role, ValidationError,
};

fn fresh_clinic() -> Database {
    let db = Database::open_in_memory().unwrap();
    db.seed_initial_accounts().unwrap();
    db
}

fn doctor_account(first: &str, last: &str, email: &str) -> NewAccount {
    NewAccount {
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        password: "password1".into(),
        role: "Doctor".into(),
    }
}

fn intake(full_name: &str) -> NewPatient {
    NewPatient {
        full_name: full_name.into(),
        birthdate: "1988-11-02".into(),
        gender: "Male".into(),
        civil_status: "Married".into(),
        phone: "5550110".into(),
        address: "22 Harbor St".into(),
        emergency_contact_name: "Lena Reyes".into(),
        emergency_contact_phone: "5550111".into(),
        ..Default::default()
    }
}

#[test]
fn test_bootstrap_accounts_can_login() {
    let db = fresh_clinic();

    let admin = db
        .login("admin@nexacare.med", "admin123", Role::Admin)
        .unwrap();
    assert_eq!(admin.user_id, SEED_ADMIN_ID);

    let hr = db.login("hr@nexacare.med", "hrmanager123", Role::Hr).unwrap();
    assert_eq!(hr.user_id, SEED_HR_ID);
}

#[test]
fn test_doctor_onboarding_flow() {
    let db = fresh_clinic();

    // Registration succeeds but the new doctor cannot log in yet
    let doctor_id = db
        .create_account(&doctor_account("Jo", "Lee", "jo.lee@nexacare.med"))
        .unwrap();
    assert!(matches!(
        db.login("jo.lee@nexacare.med", "password1", Role::Doctor)
            .unwrap_err(),
        DbError::AccountNotVerified
    ));

    // HR approves; login now works by email or by id
    db.verify_account(Role::Doctor, &doctor_id).unwrap();
    db.login("jo.lee@nexacare.med", "password1", Role::Doctor)
        .unwrap();
    let account = db.login(&doctor_id, "password1", Role::Doctor).unwrap();
    assert_eq!(account.display_name(), "Jo Lee");
}

#[test]
fn test_generated_ids_are_sequential_per_role() {
    let db = fresh_clinic();

    let first = db
        .create_account(&doctor_account("Jo", "Lee", "jo.lee@nexacare.med"))
        .unwrap();
    let second = db
        .create_account(&doctor_account("Bo", "Tan", "bo.tan@nexacare.med"))
        .unwrap();
    assert!(first.ends_with("D0001"), "got {}", first);
    assert!(second.ends_with("D0002"), "got {}", second);

    // The seeded HR account already occupies H0001
    let hr = db
        .create_account(&NewAccount {
            role: "HR".into(),
            ..doctor_account("An", "Cruz", "an.cruz@nexacare.med")
        })
        .unwrap();
    assert!(hr.ends_with("H0002"), "got {}", hr);
}

#[test]
fn test_password_change_invalidates_old_credential() {
    let db = fresh_clinic();
    let doctor_id = db
        .create_account(&doctor_account("Jo", "Lee", "jo.lee@nexacare.med"))
        .unwrap();
    db.verify_account(Role::Doctor, &doctor_id).unwrap();

    db.update_account(
        Role::Doctor,
        &doctor_id,
        &AccountUpdate {
            password: Some("new-secret-9".into()),
            ..Default::default()
        },
    )
    .unwrap();

    assert!(matches!(
        db.login(&doctor_id, "password1", Role::Doctor).unwrap_err(),
        DbError::NotFound(_)
    ));
    db.login(&doctor_id, "new-secret-9", Role::Doctor).unwrap();
}

#[test]
fn test_stored_credentials_are_hashed() {
    let db = fresh_clinic();
    db.create_account(&doctor_account("Jo", "Lee", "jo.lee@nexacare.med"))
        .unwrap();

    let stored: String = db
        .conn()
        .query_row("SELECT password_hash FROM doctors", [], |r| r.get(0))
        .unwrap();
    assert_ne!(stored, "password1");
    assert!(!stored.contains("password1"));
}

#[test]
fn test_patient_intake_to_appointment() {
    let db = fresh_clinic();
    let doctor_id = db
        .create_account(&doctor_account("Jo", "Lee", "jo.lee@nexacare.med"))
        .unwrap();
    db.verify_account(Role::Doctor, &doctor_id).unwrap();

    let code = db
        .add_patient(&NewPatient {
            assigned_doctor: Some(doctor_id.clone()),
            allergies: Some(ListInput::Text("penicillin, latex".into())),
            ..intake("Pedro Santos")
        })
        .unwrap();
    assert_eq!(code, "NXCP0001");

    let patient = db.list_patients().unwrap().remove(0);
    assert_eq!(patient.doctor_name.as_deref(), Some("Jo Lee"));
    assert_eq!(patient.allergies, vec!["penicillin", "latex"]);

    let appointment_id = db
        .add_appointment(&NewAppointment {
            patient_id: patient.id,
            doctor_id: doctor_id.clone(),
            appointment_date: "2025-09-03 10:00:00".into(),
            consultation_type: "Check-up".into(),
            status: None,
            notes: Some("first visit".into()),
        })
        .unwrap();

    db.update_patient_status(patient.id, "Scheduled").unwrap();
    db.update_appointment_status(appointment_id, "Completed")
        .unwrap();
    db.update_patient_status(patient.id, "Completed").unwrap();

    let view = db.list_appointments().unwrap().remove(0);
    assert_eq!(view.patient_name, "Pedro Santos");
    assert_eq!(view.status, "Completed");
}

#[test]
fn test_doctor_offboarding_detaches_patients_and_drops_appointments() {
    let db = fresh_clinic();
    let doctor_id = db
        .create_account(&doctor_account("Jo", "Lee", "jo.lee@nexacare.med"))
        .unwrap();
    db.verify_account(Role::Doctor, &doctor_id).unwrap();

    db.add_patient(&NewPatient {
        assigned_doctor: Some(doctor_id.clone()),
        ..intake("Pedro Santos")
    })
    .unwrap();
    let patient = db.list_patients().unwrap().remove(0);
    db.add_appointment(&NewAppointment {
        patient_id: patient.id,
        doctor_id: doctor_id.clone(),
        appointment_date: "2025-09-03 10:00:00".into(),
        consultation_type: "Check-up".into(),
        status: None,
        notes: None,
    })
    .unwrap();

    db.delete_account(Role::Doctor, &doctor_id).unwrap();

    let patient = db.get_patient(patient.id).unwrap().unwrap();
    assert_eq!(patient.assigned_doctor, None);
    assert_eq!(patient.doctor_name, None);
    assert!(db.list_appointments().unwrap().is_empty());
}

#[test]
fn test_patient_edit_preserves_unrelated_fields() {
    let db = fresh_clinic();
    db.add_patient(&NewPatient {
        current_medications: Some(ListInput::Text("metformin".into())),
        ..intake("Pedro Santos")
    })
    .unwrap();
    let id = db.list_patients().unwrap()[0].id;

    db.update_patient(
        id,
        &PatientPatch {
            address: Some("7 Elm Ave".into()),
            ..Default::default()
        },
    )
    .unwrap();

    let patient = db.get_patient(id).unwrap().unwrap();
    assert_eq!(patient.address, "7 Elm Ave");
    assert_eq!(patient.current_medications, vec!["metformin"]);
    assert_eq!(patient.full_name, "Pedro Santos");
}

#[test]
fn test_validation_blocks_writes_before_storage() {
    let db = fresh_clinic();

    let err = db
        .create_account(&NewAccount {
            email: "jo.lee@gmail.com".into(),
            ..doctor_account("Jo", "Lee", "")
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Email must end with @nexacare.med");

    let err = db
        .add_patient(&NewPatient {
            civil_status: "Engaged".into(),
            ..intake("Pedro Santos")
        })
        .unwrap_err();
    assert!(matches!(
        err,
        DbError::Validation(ValidationError::InvalidEnumValue {
            field: "civil status",
            ..
        })
    ));

    // Nothing was written
    assert!(db.list_accounts(Role::Doctor).unwrap().is_empty());
    assert!(db.list_patients().unwrap().is_empty());
}

#[test]
fn test_on_disk_database_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nexacare.db");

    {
        let db = Database::open(&path).unwrap();
        db.seed_initial_accounts().unwrap();
        db.add_patient(&intake("Pedro Santos")).unwrap();
    }

    let db = Database::open(&path).unwrap();
    db.login("admin@nexacare.med", "admin123", Role::Admin)
        .unwrap();
    assert_eq!(db.list_patients().unwrap().len(), 1);
}
