//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Rows are converted back through the validated domain constructors, so a
//! record that violates the role or verification invariants surfaces as a
//! query error instead of an inconsistent account.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    DisplayName, EmailAddress, PasswordHash, UserAccount, UserId, UserRole, UserType,
    UserValidationError, VerificationPin, VerificationState,
};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error, pool_error_message};
use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Unique constraint guarding `users.admin_id`.
const ADMIN_ID_CONSTRAINT: &str = "users_admin_id_key";

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(pool_error_message(error))
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    match classify_diesel_error(&error) {
        DieselFailure::UniqueViolation { constraint }
            if constraint.as_deref() == Some(ADMIN_ID_CONSTRAINT) =>
        {
            UserPersistenceError::duplicate_admin_id()
        }
        DieselFailure::UniqueViolation { .. } => UserPersistenceError::duplicate_email(),
        DieselFailure::Connection(message) => UserPersistenceError::connection(message),
        DieselFailure::Query(message) => UserPersistenceError::query(message),
    }
}

/// Split a role into its nullable storage columns:
/// `(organization_type, registration_number, admin_id)`.
fn role_columns(role: &UserRole) -> (Option<&str>, Option<&str>, Option<i64>) {
    match role {
        UserRole::Individual => (None, None, None),
        UserRole::Organization {
            registration_number,
            organization_type,
        } => (
            Some(organization_type.as_str()),
            Some(registration_number.as_str()),
            None,
        ),
        UserRole::Admin { admin_id } => (None, None, Some(admin_id.get())),
    }
}

/// Convert a database row into a validated domain account.
fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let UserRow {
        id,
        display_name,
        email,
        password_hash,
        user_type,
        organization_type,
        registration_number,
        admin_id,
        is_verified,
        verification_pin,
        created_at,
    } = row;
    let invalid = |err: UserValidationError| {
        UserPersistenceError::query(format!("stored user {id} is invalid: {err}"))
    };

    let user_type: UserType = user_type.parse().map_err(invalid)?;
    let role = UserRole::from_parts(
        user_type,
        organization_type.as_deref(),
        registration_number.as_deref(),
        admin_id,
    )
    .map_err(invalid)?;

    let verification = match (is_verified, verification_pin) {
        (true, None) => VerificationState::Verified,
        (false, Some(pin)) => VerificationState::Pending {
            pin: VerificationPin::parse(&pin).map_err(invalid)?,
        },
        _ => {
            return Err(UserPersistenceError::query(format!(
                "stored user {id} has an inconsistent verification state"
            )));
        }
    };

    Ok(UserAccount {
        id: UserId::from_uuid(id),
        display_name: DisplayName::new(display_name).map_err(invalid)?,
        email: EmailAddress::new(email).map_err(invalid)?,
        password_hash: PasswordHash::new(password_hash),
        role,
        verification,
        created_at,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (organization_type, registration_number, admin_id) = role_columns(&user.role);

        let new_row = NewUserRow {
            id: *user.id.as_uuid(),
            display_name: user.display_name.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.as_str(),
            user_type: user.user_type().as_str(),
            organization_type,
            registration_number,
            admin_id,
            is_verified: user.is_verified(),
            verification_pin: user.pending_pin().map(VerificationPin::as_str),
            created_at: user.created_at,
        };

        diesel::insert_into(users::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::id.eq(id.as_uuid()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_display_name(
        &self,
        name: &DisplayName,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = users::table
            .filter(users::display_name.eq(name.as_ref()))
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .first::<UserRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_account).transpose()
    }

    async fn confirm_verification(
        &self,
        id: &UserId,
        pin: &VerificationPin,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let updated = diesel::update(
            users::table
                .filter(users::id.eq(id.as_uuid()))
                .filter(users::is_verified.eq(false))
                .filter(users::verification_pin.eq(pin.as_str())),
        )
        .set((
            users::is_verified.eq(true),
            users::verification_pin.eq(None::<String>),
            users::updated_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(updated == 1)
    }
}
