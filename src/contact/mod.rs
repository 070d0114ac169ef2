//! Contact form validation.
//!
//! The form is plain data; [`ContactForm::validate`] reports every field
//! error at once so the page can mark all offending inputs in one pass.

use crate::config::ContactLimits;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Subjects that reveal the recipe selection field.
const RECIPE_SUBJECTS: &[&str] = &["recipe-request", "cooking-question"];

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#,
        )
        .expect("email pattern is valid")
    })
}

/// Whether `email` looks like a deliverable address.
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(&email.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Subject,
    Message,
    Consent,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::FirstName => "first_name",
            Field::LastName => "last_name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
            Field::Consent => "consent",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    fn new(field: Field, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

/// State of the message character counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterStatus {
    Normal,
    Warning,
    Error,
}

/// Counter state for a message of `len` characters.
pub fn character_status(len: usize, limits: &ContactLimits) -> CharacterStatus {
    if len > limits.max_len {
        CharacterStatus::Error
    } else if len > limits.warning_len {
        CharacterStatus::Warning
    } else {
        CharacterStatus::Normal
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Selected subject value, empty when none is chosen
    pub subject: String,
    /// Recipe the message is about, for recipe-related subjects
    pub recipe: Option<String>,
    pub message: String,
    pub consent: bool,
}

impl ContactForm {
    /// Validates with the default limits.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        self.validate_with(&ContactLimits::default())
    }

    pub fn validate_with(&self, limits: &ContactLimits) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if self.first_name.trim().is_empty() {
            errors.push(FieldError::new(Field::FirstName, "First name is required"));
        }
        if self.last_name.trim().is_empty() {
            errors.push(FieldError::new(Field::LastName, "Last name is required"));
        }

        if self.email.trim().is_empty() {
            errors.push(FieldError::new(Field::Email, "Email is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new(Field::Email, "Invalid email"));
        }

        if self.subject.is_empty() {
            errors.push(FieldError::new(Field::Subject, "Select a subject"));
        }

        if self.message.trim().is_empty() {
            errors.push(FieldError::new(Field::Message, "Message is required"));
        } else if self.message_len() < limits.min_message_len {
            errors.push(FieldError::new(
                Field::Message,
                format!("Too short (min {} chars)", limits.min_message_len),
            ));
        }

        if !self.consent {
            errors.push(FieldError::new(Field::Consent, "You must agree"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Message length as the site's counter shows it, in UTF-16 code units.
    ///
    /// Characters outside the Basic Multilingual Plane, such as most emoji,
    /// count twice.
    pub fn message_len(&self) -> usize {
        self.message.encode_utf16().count()
    }

    pub fn character_status(&self, limits: &ContactLimits) -> CharacterStatus {
        character_status(self.message_len(), limits)
    }

    /// Whether the recipe selection field applies to the chosen subject.
    pub fn shows_recipe_field(&self) -> bool {
        RECIPE_SUBJECTS.contains(&self.subject.as_str())
    }
}
