use validator::Validate;

use crate::auth;
use crate::config::Config;
use crate::error::ApiError;
use crate::models::user::{LoginRequest, RegisterRequest, Role, User};
use crate::store::Store;

pub async fn register(store: &Store, input: &RegisterRequest) -> Result<User, ApiError> {
    input.validate()?;

    if store.find_user_by_email(&input.email).await?.is_some() {
        return Err(ApiError::Conflict("User already exists".to_string()));
    }

    let password_hash = bcrypt::hash(&input.password, bcrypt::DEFAULT_COST)?;
    let role = input.role.unwrap_or(Role::User);

    store
        .insert_user(&input.name, &input.email, &password_hash, role)
        .await
        .map_err(|err| match &err {
            // Lost the register/register race on the email unique index.
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                ApiError::Conflict("User already exists".to_string())
            }
            _ => ApiError::from(err),
        })
}

/// Verifies credentials and issues a bearer token carrying id, name and
/// role. Unknown email and wrong password are indistinguishable.
pub async fn login(
    store: &Store,
    config: &Config,
    input: &LoginRequest,
) -> Result<(User, String), ApiError> {
    input.validate()?;

    let invalid = || ApiError::Unauthorized("Invalid email or password".to_string());

    let user = store
        .find_user_by_email(&input.email)
        .await?
        .ok_or_else(invalid)?;

    if !bcrypt::verify(&input.password, &user.password_hash)? {
        return Err(invalid());
    }

    let token = auth::issue_token(&user, config)?;
    Ok((user, token))
}
