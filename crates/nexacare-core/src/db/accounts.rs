//! Account repository: Doctor, HR, and Admin CRUD, verification, and
//! credential checks.
//!
//! Role-to-table dispatch goes through [`Role::table`]; user input is
//! never spliced into SQL identifiers.

use rusqlite::{params, params_from_iter, OptionalExtension, ToSql};

use super::{Database, DbError, DbResult};
use crate::models::{Account, AccountSummary, AccountUpdate, NewAccount, Role};
use crate::password::{hash_password, verify_password};
use crate::validation::{
    validate_email, validate_name, validate_password, validate_role, ValidationError,
};

/// Well-known bootstrap account ids.
pub const SEED_ADMIN_ID: &str = "2025A0001";
pub const SEED_HR_ID: &str = "2025H0001";

impl Database {
    /// Create an account in the role's table. Runs field validation and
    /// the per-role email uniqueness check before generating an id and
    /// inserting. Doctors and HR start unverified; admins are created
    /// only through [`Database::seed_initial_accounts`].
    pub fn create_account(&self, new: &NewAccount) -> DbResult<String> {
        let role = validate_role(&new.role)?;
        validate_name("First name", &new.first_name)?;
        validate_name("Last name", &new.last_name)?;
        validate_password(&new.password)?;
        validate_email(&new.email)?;
        if self.email_exists(role, &new.email, None)? {
            return Err(DbError::DuplicateEmail);
        }

        let user_id = self.next_user_id(role)?;
        let is_verified = role == Role::Admin;
        self.insert_account(
            role,
            &user_id,
            &new.first_name,
            &new.last_name,
            &new.email,
            &hash_password(&new.password),
            is_verified,
        )?;

        tracing::info!(role = role.as_str(), user_id = %user_id, "account created");
        Ok(user_id)
    }

    /// Set the verification flag. Idempotent for an already-verified
    /// account; unknown ids are NotFound.
    pub fn verify_account(&self, role: Role, user_id: &str) -> DbResult<()> {
        let query = format!(
            "UPDATE {} SET is_verified = 1 WHERE user_id = ?",
            role.table()
        );
        let rows_affected = self.conn.execute(&query, [user_id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("{} {}", role.as_str(), user_id)));
        }
        tracing::info!(role = role.as_str(), user_id = %user_id, "account verified");
        Ok(())
    }

    /// Delete an account. Doctor deletion detaches assigned patients and
    /// cascades deletion of the doctor's appointments (schema FK rules).
    pub fn delete_account(&self, role: Role, user_id: &str) -> DbResult<()> {
        let query = format!("DELETE FROM {} WHERE user_id = ?", role.table());
        let rows_affected = self.conn.execute(&query, [user_id])?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("{} {}", role.as_str(), user_id)));
        }
        tracing::info!(role = role.as_str(), user_id = %user_id, "account deleted");
        Ok(())
    }

    /// Partial account update: only supplied fields are written. Changed
    /// fields are re-validated; a changed email is re-checked for
    /// uniqueness excluding this account's own row; a changed password
    /// is re-hashed.
    pub fn update_account(
        &self,
        role: Role,
        user_id: &str,
        update: &AccountUpdate,
    ) -> DbResult<()> {
        if update.is_empty() {
            return Err(ValidationError::EmptyUpdate.into());
        }

        let mut assignments: Vec<&'static str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(first_name) = &update.first_name {
            validate_name("First name", first_name)?;
            assignments.push("first_name = ?");
            values.push(Box::new(first_name.clone()));
        }
        if let Some(last_name) = &update.last_name {
            validate_name("Last name", last_name)?;
            assignments.push("last_name = ?");
            values.push(Box::new(last_name.clone()));
        }
        if let Some(email) = &update.email {
            validate_email(email)?;
            if self.email_exists(role, email, Some(user_id))? {
                return Err(DbError::DuplicateEmail);
            }
            assignments.push("email = ?");
            values.push(Box::new(email.clone()));
        }
        if let Some(password) = &update.password {
            validate_password(password)?;
            assignments.push("password_hash = ?");
            values.push(Box::new(hash_password(password)));
        }
        if let Some(is_verified) = update.is_verified {
            assignments.push("is_verified = ?");
            values.push(Box::new(is_verified));
        }

        let query = format!(
            "UPDATE {} SET {} WHERE user_id = ?",
            role.table(),
            assignments.join(", ")
        );
        values.push(Box::new(user_id.to_string()));

        let rows_affected = self
            .conn
            .execute(&query, params_from_iter(values.iter().map(|v| v.as_ref())))?;
        if rows_affected == 0 {
            return Err(DbError::NotFound(format!("{} {}", role.as_str(), user_id)));
        }
        Ok(())
    }

    /// List accounts of a role, newest first. The credential hash is
    /// never part of the projection.
    pub fn list_accounts(&self, role: Role) -> DbResult<Vec<AccountSummary>> {
        let query = format!(
            "SELECT user_id, first_name, last_name, email, is_verified
             FROM {}
             ORDER BY created_at DESC, user_id DESC",
            role.table()
        );
        let mut stmt = self.conn.prepare(&query)?;
        let rows = stmt.query_map([], |row| {
            Ok(AccountSummary {
                user_id: row.get(0)?,
                first_name: row.get(1)?,
                last_name: row.get(2)?,
                email: row.get(3)?,
                is_verified: row.get(4)?,
            })
        })?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Credential lookup by email or user id. A match is returned even
    /// for an unverified account; [`Database::login`] applies the
    /// verification gate.
    pub fn authenticate(
        &self,
        identifier: &str,
        password: &str,
        role: Role,
    ) -> DbResult<Option<Account>> {
        let query = format!(
            "SELECT user_id, first_name, last_name, email, is_verified, created_at,
                    password_hash
             FROM {}
             WHERE email = ?1 OR user_id = ?1",
            role.table()
        );
        let row: Option<(Account, String)> = self
            .conn
            .query_row(&query, [identifier], |row| {
                Ok((
                    Account {
                        user_id: row.get(0)?,
                        first_name: row.get(1)?,
                        last_name: row.get(2)?,
                        email: row.get(3)?,
                        is_verified: row.get(4)?,
                        created_at: row.get(5)?,
                    },
                    row.get(6)?,
                ))
            })
            .optional()?;

        match row {
            Some((account, stored_hash)) if verify_password(password, &stored_hash) => {
                Ok(Some(account))
            }
            _ => Ok(None),
        }
    }

    /// Authenticate and enforce the verification gate: an unverified
    /// Doctor or HR match is a valid credential lookup but an invalid
    /// login attempt.
    pub fn login(&self, identifier: &str, password: &str, role: Role) -> DbResult<Account> {
        let account = self.authenticate(identifier, password, role)?.ok_or_else(|| {
            tracing::warn!(role = role.as_str(), identifier = %identifier, "failed login attempt");
            DbError::NotFound("account with matching credentials".into())
        })?;
        if role != Role::Admin && !account.is_verified {
            tracing::warn!(
                role = role.as_str(),
                user_id = %account.user_id,
                "login blocked: account not verified"
            );
            return Err(DbError::AccountNotVerified);
        }
        Ok(account)
    }

    /// Seed the well-known bootstrap Admin and HR accounts if they do
    /// not exist yet. Idempotent: keyed on the fixed user ids.
    pub fn seed_initial_accounts(&self) -> DbResult<()> {
        if !self.account_exists(Role::Admin, SEED_ADMIN_ID)? {
            self.insert_account(
                Role::Admin,
                SEED_ADMIN_ID,
                "Axel",
                "Admin",
                "admin@nexacare.med",
                &hash_password("admin123"),
                true,
            )?;
            tracing::info!(user_id = SEED_ADMIN_ID, "seeded initial admin account");
        }
        if !self.account_exists(Role::Hr, SEED_HR_ID)? {
            self.insert_account(
                Role::Hr,
                SEED_HR_ID,
                "HR",
                "Manager",
                "hr@nexacare.med",
                &hash_password("hrmanager123"),
                true,
            )?;
            tracing::info!(user_id = SEED_HR_ID, "seeded initial HR account");
        }
        Ok(())
    }

    /// Check whether an email is taken within a role's table, optionally
    /// excluding one account (for updates against the account's own row).
    pub fn email_exists(
        &self,
        role: Role,
        email: &str,
        exclude_user_id: Option<&str>,
    ) -> DbResult<bool> {
        let count: i64 = match exclude_user_id {
            Some(user_id) => self.conn.query_row(
                &format!(
                    "SELECT COUNT(*) FROM {} WHERE email = ? AND user_id != ?",
                    role.table()
                ),
                params![email, user_id],
                |row| row.get(0),
            )?,
            None => self.conn.query_row(
                &format!("SELECT COUNT(*) FROM {} WHERE email = ?", role.table()),
                [email],
                |row| row.get(0),
            )?,
        };
        Ok(count > 0)
    }

    fn account_exists(&self, role: Role, user_id: &str) -> DbResult<bool> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE user_id = ?", role.table()),
            [user_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_account(
        &self,
        role: Role,
        user_id: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        password_hash: &str,
        is_verified: bool,
    ) -> DbResult<()> {
        let query = format!(
            "INSERT INTO {} (user_id, first_name, last_name, email, password_hash, is_verified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            role.table()
        );
        self.conn.execute(
            &query,
            params![user_id, first_name, last_name, email, password_hash, is_verified],
        )?;
        Ok(())
    }
}
