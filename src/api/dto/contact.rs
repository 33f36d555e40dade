/*
 * Responsibility
 * - /contact の request/response DTO
 * - ContactSubmission は validate 済みの値しか作れない (serde try_from 経由)
 * - source / status は受け付けない (未知フィールドは無視)
 */
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Host;

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 120;
const PHONE_MAX: usize = 60;
const MESSAGE_MIN: usize = 5;
const MESSAGE_MAX: usize = 5000;

const EMAIL_LOCAL_MAX: usize = 64;
const EMAIL_LABEL_MAX: usize = 63;
const EMAIL_DOMAIN_MAX: usize = 253;
// Printable characters that are only allowed inside quoted local parts, which we do not accept.
const EMAIL_LOCAL_SPECIALS: [char; 12] = ['@', '"', '(', ')', ',', ':', ';', '<', '>', '[', '\\', ']'];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must be between {min} and {max} characters")]
    Length {
        field: &'static str,
        min: usize,
        max: usize,
    },
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("email is not a valid email address")]
    Email,
}

/// Raw request body, before any field constraint is checked.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
}

/// A contact submission whose fields satisfy every constraint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "ContactRequest")]
pub struct ContactSubmission {
    name: String,
    email: String,
    phone: Option<String>,
    message: String,
}

impl ContactSubmission {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl TryFrom<ContactRequest> for ContactSubmission {
    type Error = ValidationError;

    fn try_from(req: ContactRequest) -> Result<Self, Self::Error> {
        check_length("name", &req.name, NAME_MIN, NAME_MAX)?;

        let email = normalize_email(&req.email).ok_or(ValidationError::Email)?;

        if let Some(phone) = &req.phone
            && phone.chars().count() > PHONE_MAX
        {
            return Err(ValidationError::TooLong {
                field: "phone",
                max: PHONE_MAX,
            });
        }

        check_length("message", &req.message, MESSAGE_MIN, MESSAGE_MAX)?;

        Ok(Self {
            name: req.name,
            email,
            phone: req.phone,
            message: req.message,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ContactCreatedResponse {
    pub success: bool,
    pub id: String,
}

fn check_length(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError::Length { field, min, max });
    }
    Ok(())
}

// Returns the address with its domain lowercased, or None if the syntax is not accepted.
fn normalize_email(raw: &str) -> Option<String> {
    let (local, domain) = raw.split_once('@')?;

    if !is_valid_local_part(local) || !is_valid_domain(domain) {
        return None;
    }

    Some(format!("{local}@{}", domain.to_lowercase()))
}

// Non-ASCII characters are allowed (SMTPUTF8 addresses).
fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > EMAIL_LOCAL_MAX {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(|c| {
        if c.is_ascii() {
            c.is_ascii_graphic() && !EMAIL_LOCAL_SPECIALS.contains(&c)
        } else {
            !c.is_whitespace() && !c.is_control()
        }
    })
}

// Internationalised domains are checked in their ASCII (punycode) form.
fn is_valid_domain(domain: &str) -> bool {
    // Host::parse percent-decodes its input
    if domain.contains('%') {
        return false;
    }
    let Ok(Host::Domain(ascii)) = Host::parse(domain) else {
        return false;
    };
    if ascii.len() > EMAIL_DOMAIN_MAX {
        return false;
    }

    let labels: Vec<&str> = ascii.split('.').collect();
    if labels.len() < 2 {
        return false;
    }

    let label_ok = |label: &&str| {
        !label.is_empty()
            && label.len() <= EMAIL_LABEL_MAX
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    };
    if !labels.iter().all(label_ok) {
        return false;
    }

    // labels is non-empty here
    let tld = labels[labels.len() - 1];
    tld.starts_with("xn--") || (tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
}
