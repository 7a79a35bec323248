//! Shape checks on inbound payloads.

use crate::error::{ApiError, ApiResult};
use crate::models::principal::{RegisterRequest, UpdatePrincipalRequest};

const NAME_LEN: std::ops::RangeInclusive<usize> = 2..=64;
const PASSWORD_LEN: std::ops::RangeInclusive<usize> = 4..=255;

fn missing(msg: &str) -> ApiError {
    ApiError::MissingFields(msg.to_string())
}

pub fn first_name(value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(missing("Not content, first name is empty please provide first name"));
    }
    if !NAME_LEN.contains(&value.chars().count()) {
        return Err(missing(
            "First name exceeds min or max length, make sure that first name length is greater than 2 and less than 64",
        ));
    }
    Ok(())
}

pub fn last_name(value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(missing("Error, last name not added, please make sure to add last name"));
    }
    if !NAME_LEN.contains(&value.chars().count()) {
        return Err(missing(
            "Error, last name exceeds min or max length, make sure the last name length is greater than 2 and less than 64",
        ));
    }
    Ok(())
}

pub fn email(value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(missing("Error, email is empty please send email address"));
    }
    if !is_plausible_email(value) {
        return Err(missing("Error, please make sure you use the correct format for email"));
    }
    Ok(())
}

pub fn password(value: &str) -> ApiResult<()> {
    if value.is_empty() {
        return Err(missing(
            "Error, password is empty, please make sure to provide a password in the request",
        ));
    }
    if !PASSWORD_LEN.contains(&value.chars().count()) {
        return Err(missing(
            "Please make sure the length of the password is at least 4 characters and less than 255",
        ));
    }
    Ok(())
}

pub fn registration(req: &RegisterRequest) -> ApiResult<()> {
    first_name(&req.first_name)?;
    last_name(&req.last_name)?;
    email(&req.email)?;
    password(&req.password)
}

/// Only the fields that are present are checked.
pub fn principal_update(req: &UpdatePrincipalRequest) -> ApiResult<()> {
    if let Some(v) = &req.first_name {
        first_name(v)?;
    }
    if let Some(v) = &req.last_name {
        last_name(v)?;
    }
    if let Some(v) = &req.email {
        email(v)?;
    }
    if let Some(v) = &req.password {
        password(v)?;
    }
    Ok(())
}

fn is_plausible_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| !label.is_empty())
}
