//! SQLite schema definition.

/// Complete database schema for the NexaCare core.
pub const SCHEMA: &str = r#"
-- Enable foreign keys
PRAGMA foreign_keys = ON;

-- ============================================================================
-- Accounts (one table per role)
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    user_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL CHECK (LENGTH(first_name) >= 2),
    last_name TEXT NOT NULL CHECK (LENGTH(last_name) >= 2),
    email TEXT NOT NULL UNIQUE CHECK (email LIKE '%@nexacare.med'),
    password_hash TEXT NOT NULL,
    is_verified INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS hrs (
    user_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL CHECK (LENGTH(first_name) >= 2),
    last_name TEXT NOT NULL CHECK (LENGTH(last_name) >= 2),
    email TEXT NOT NULL UNIQUE CHECK (email LIKE '%@nexacare.med'),
    password_hash TEXT NOT NULL,
    is_verified INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Admins are verified at creation; there is no separate approval step.
CREATE TABLE IF NOT EXISTS admins (
    user_id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL CHECK (LENGTH(first_name) >= 2),
    last_name TEXT NOT NULL CHECK (LENGTH(last_name) >= 2),
    email TEXT NOT NULL UNIQUE CHECK (email LIKE '%@nexacare.med'),
    password_hash TEXT NOT NULL,
    is_verified INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_code TEXT UNIQUE,
    full_name TEXT NOT NULL CHECK (LENGTH(full_name) >= 2),
    birthdate TEXT NOT NULL,
    gender TEXT NOT NULL,
    civil_status TEXT NOT NULL,
    phone TEXT NOT NULL CHECK (LENGTH(phone) >= 7),
    address TEXT NOT NULL,
    emergency_contact_name TEXT NOT NULL,
    emergency_contact_phone TEXT NOT NULL,
    visit_type TEXT NOT NULL DEFAULT 'New Patient',
    assigned_doctor TEXT REFERENCES doctors(user_id)
        ON DELETE SET NULL ON UPDATE CASCADE,
    visit_date TEXT,
    insurance_provider TEXT,
    referral_source TEXT,
    allergies TEXT NOT NULL DEFAULT '[]',             -- JSON array of strings
    chronic_illnesses TEXT NOT NULL DEFAULT '[]',     -- JSON array of strings
    current_medications TEXT NOT NULL DEFAULT '[]',   -- JSON array of strings
    remarks TEXT,
    status TEXT NOT NULL DEFAULT 'Pending',
    photo_path TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_patients_assigned_doctor ON patients(assigned_doctor);
CREATE INDEX IF NOT EXISTS idx_patients_status ON patients(status);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    patient_id INTEGER NOT NULL REFERENCES patients(id)
        ON DELETE CASCADE ON UPDATE CASCADE,
    doctor_id TEXT NOT NULL REFERENCES doctors(user_id)
        ON DELETE CASCADE ON UPDATE CASCADE,
    appointment_date TEXT NOT NULL,
    consultation_type TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'Scheduled',
    notes TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_appointments_patient ON appointments(patient_id);
CREATE INDEX IF NOT EXISTS idx_appointments_doctor ON appointments(doctor_id);
CREATE INDEX IF NOT EXISTS idx_appointments_date ON appointments(appointment_date);
"#;
