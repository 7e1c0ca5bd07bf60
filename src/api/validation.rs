//! Fail-fast request validation.
//!
//! Each request shape is checked field by field in a fixed order and the
//! first failing rule is reported. A field counts as present when it has at
//! least one character after trimming.
//!
//! Emails are parsed as a single RFC 5322 mailbox: a bare addr-spec, an
//! angle-addr, or a display name followed by an angle-addr.

use email_address::{EmailAddress, Options};
use mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::api::dto::user::{CreateUserRequest, SignInRequest, UpdateUserRequest};
use crate::response::StdResponse;

/// Path parameter carrying a user id.
pub const PARAM_ID: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    MandatoryMissing(&'static str),

    #[error("{0} is invalid data")]
    InvalidData(&'static str),
}

impl<T> From<ValidationError> for StdResponse<T> {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MandatoryMissing(field) => StdResponse::mandatory_missing(field),
            ValidationError::InvalidData(field) => StdResponse::invalid_data(field),
        }
    }
}

/// Request shapes that can be checked before reaching the usecase layer.
pub trait RequestValidation {
    fn validate_request(&self) -> Result<(), ValidationError>;
}

impl RequestValidation for CreateUserRequest {
    fn validate_request(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require_email(&self.email)?;
        require("password", &self.password)
    }
}

impl RequestValidation for SignInRequest {
    fn validate_request(&self) -> Result<(), ValidationError> {
        require_email(&self.email)?;
        require("password", &self.password)
    }
}

impl RequestValidation for UpdateUserRequest {
    fn validate_request(&self) -> Result<(), ValidationError> {
        if is_blank(&self.name) && is_blank(&self.email) {
            return Err(ValidationError::MandatoryMissing("name or email"));
        }
        if !is_blank(&self.email) && !is_valid_email(&self.email) {
            return Err(ValidationError::InvalidData("email"));
        }
        Ok(())
    }
}

/// Checks that `id` is a 24-hex-character object id.
pub fn validate_id(id: &str) -> Result<(), ValidationError> {
    ObjectId::parse_str(id)
        .map(|_| ())
        .map_err(|_| ValidationError::InvalidData(PARAM_ID))
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::MandatoryMissing(field));
    }
    Ok(())
}

fn require_email(email: &str) -> Result<(), ValidationError> {
    require("email", email)?;
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidData("email"));
    }
    Ok(())
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    // `<local@domain>` without a display name is still one valid mailbox.
    let email = email
        .strip_prefix('<')
        .and_then(|rest| rest.strip_suffix('>'))
        .unwrap_or(email);

    EmailAddress::parse_with_options(email, Options::default()).is_ok()
}
