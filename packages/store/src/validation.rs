//! # Form records and field-level validation
//!
//! Each form is a plain record ([`LoginFields`], [`RegisterFields`]) with a matching
//! error record ([`LoginErrors`], [`RegisterErrors`]) holding at most one
//! [`FieldError`] per input. Validation is synchronous and runs before any request
//! goes out.
//!
//! | Field | Rule |
//! |-------|------|
//! | email | required; `local@domain.tld` shape, no whitespace |
//! | password | required; at least [`MIN_PASSWORD_LEN`] characters |
//! | name | required; at least [`MIN_NAME_LEN`] characters |
//! | confirm password | required; equal to password |

use std::sync::LazyLock;

use api::{LoginRequest, RegisterRequest};
use regex::Regex;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_NAME_LEN: usize = 2;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Names each input of the auth forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Password,
    ConfirmPassword,
}

impl FormField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("Email is required")]
    EmailRequired,
    #[error("Invalid email format")]
    EmailInvalid,
    #[error("Password is required")]
    PasswordRequired,
    #[error("Password must be at least {} characters", MIN_PASSWORD_LEN)]
    PasswordTooShort,
    #[error("Name is required")]
    NameRequired,
    #[error("Name must be at least {} characters", MIN_NAME_LEN)]
    NameTooShort,
    #[error("Please confirm your password")]
    ConfirmRequired,
    #[error("Passwords do not match")]
    ConfirmMismatch,
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if email.is_empty() {
        return Err(FieldError::EmailRequired);
    }
    if !EMAIL_RE.is_match(email) {
        return Err(FieldError::EmailInvalid);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), FieldError> {
    if password.is_empty() {
        return Err(FieldError::PasswordRequired);
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FieldError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    if name.is_empty() {
        return Err(FieldError::NameRequired);
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(FieldError::NameTooShort);
    }
    Ok(())
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Result<(), FieldError> {
    if confirm.is_empty() {
        return Err(FieldError::ConfirmRequired);
    }
    if password != confirm {
        return Err(FieldError::ConfirmMismatch);
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginFields {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoginErrors {
    pub email: Option<FieldError>,
    pub password: Option<FieldError>,
}

impl LoginErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }

    pub fn get(&self, field: FormField) -> Option<FieldError> {
        match field {
            FormField::Email => self.email,
            FormField::Password => self.password,
            FormField::Name | FormField::ConfirmPassword => None,
        }
    }
}

impl LoginFields {
    pub fn validate(&self) -> Result<(), LoginErrors> {
        let errors = LoginErrors {
            email: validate_email(&self.email).err(),
            password: validate_password(&self.password).err(),
        };
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validate a single input, for live feedback while typing.
    pub fn validate_field(&self, field: FormField) -> Option<FieldError> {
        match field {
            FormField::Email => validate_email(&self.email).err(),
            FormField::Password => validate_password(&self.password).err(),
            FormField::Name | FormField::ConfirmPassword => None,
        }
    }

    pub fn to_request(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterFields {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterErrors {
    pub name: Option<FieldError>,
    pub email: Option<FieldError>,
    pub password: Option<FieldError>,
    pub confirm_password: Option<FieldError>,
}

impl RegisterErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.confirm_password.is_none()
    }

    pub fn get(&self, field: FormField) -> Option<FieldError> {
        match field {
            FormField::Name => self.name,
            FormField::Email => self.email,
            FormField::Password => self.password,
            FormField::ConfirmPassword => self.confirm_password,
        }
    }
}

impl RegisterFields {
    pub fn validate(&self) -> Result<(), RegisterErrors> {
        let errors = RegisterErrors {
            name: validate_name(&self.name).err(),
            email: validate_email(&self.email).err(),
            password: validate_password(&self.password).err(),
            confirm_password: validate_confirm_password(&self.password, &self.confirm_password)
                .err(),
        };
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    pub fn validate_field(&self, field: FormField) -> Option<FieldError> {
        match field {
            FormField::Name => validate_name(&self.name).err(),
            FormField::Email => validate_email(&self.email).err(),
            FormField::Password => validate_password(&self.password).err(),
            FormField::ConfirmPassword => {
                validate_confirm_password(&self.password, &self.confirm_password).err()
            }
        }
    }

    pub fn to_request(&self) -> RegisterRequest {
        RegisterRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }
}
