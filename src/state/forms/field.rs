//! Form field value objects

use crate::error::FieldError;
use std::fmt;
use std::str::FromStr;

/// One of the four inputs of the contact form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Company,
    Message,
}

impl ContactField {
    /// Fields in tab order
    pub const ALL: [ContactField; 4] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Company,
        ContactField::Message,
    ];

    /// Key used in the delivery payload
    pub fn key(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Company => "company",
            ContactField::Message => "message",
        }
    }

    /// Label shown above the input
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "Name",
            ContactField::Email => "Email",
            ContactField::Company => "Company (Optional)",
            ContactField::Message => "Message",
        }
    }

    /// Declared presence requirement; only the company is optional
    pub fn is_required(self) -> bool {
        !matches!(self, ContactField::Company)
    }

    pub fn is_multiline(self) -> bool {
        matches!(self, ContactField::Message)
    }

    /// Position in tab order
    pub fn index(self) -> usize {
        match self {
            ContactField::Name => 0,
            ContactField::Email => 1,
            ContactField::Company => 2,
            ContactField::Message => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ContactField {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(ContactField::Name),
            "email" => Ok(ContactField::Email),
            "company" => Ok(ContactField::Company),
            "message" => Ok(ContactField::Message),
            other => Err(FieldError::UnknownField(other.to_string())),
        }
    }
}
