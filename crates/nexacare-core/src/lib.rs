//! NexaCare Core Library
//!
//! Storage and domain core for a clinic front desk: role-based staff
//! accounts, patient records, and appointments over a local SQLite
//! database.
//!
//! # Architecture
//!
//! ```text
//! Intake form input
//!        │
//!        ▼
//!  Validation ── field rules, enum vocabularies, role membership
//!        │
//!        ▼
//!  Normalization ── medical list fields: split, trim, drop numeric junk
//!        │
//!        ▼
//!  Repositories (impl Database)
//!    ├─ accounts: doctors / hrs / admins, verification gate, login
//!    ├─ patients: JSON list fields, partial updates, doctor join
//!    └─ appointments: FK-enforced booking, joined views
//! ```
//!
//! # Core Principle
//!
//! **Validation happens before any write.** Storage constraints back the
//! same rules but are never the first line of defense, and every failure
//! crosses the boundary as a typed [`DbError`] carrying its user-facing
//! message.
//!
//! # Modules
//!
//! - [`db`]: SQLite database layer and per-entity repositories
//! - [`models`]: Domain types (Account, PatientRecord, AppointmentView, etc.)
//! - [`normalize`]: Medical list-field normalizer
//! - [`validation`]: Field-level validation rules
//! - [`password`]: PBKDF2 password hashing and verification
//! - [`config`]: Application data paths

pub mod config;
pub mod db;
pub mod models;
pub mod normalize;
pub mod password;
pub mod validation;

// Re-export commonly used types
pub use db::{Database, DbError, DbResult};
pub use models::{
    Account, AccountSummary, AccountUpdate, AppointmentStatus, AppointmentView, CivilStatus,
    Gender, NewAccount, NewAppointment, NewPatient, PatientPatch, PatientRecord, PatientStatus,
    ReferralSource, Role, VisitType,
};
pub use normalize::ListInput;
pub use validation::ValidationError;
