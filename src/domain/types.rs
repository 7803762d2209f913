//! Strongly-typed value objects used by domain entities.
//!
//! Domain structs should carry these wrappers instead of raw primitives so that
//! identifiers, text values and region codes are enforced at the boundary.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;
use validator::ValidateEmail;

/// Value a region or city picker reports while nothing is selected.
pub const UNSET_SENTINEL: &str = "0";

/// Errors produced when attempting to construct constrained domain types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// An identifier was zero or negative.
    #[error("{0} must be greater than zero")]
    NonPositiveId(&'static str),
    /// A string was empty or whitespace-only after trimming.
    #[error("{0} cannot be empty")]
    EmptyString(&'static str),
    /// Email validation failed.
    #[error("{0} must be a valid email address")]
    InvalidEmail(&'static str),
    /// Region codes are two ASCII letters.
    #[error("region code must be two letters, got `{0}`")]
    InvalidRegionCode(String),
    /// A coordinate component was not finite or outside its range.
    #[error("{0} is out of range")]
    OutOfRange(&'static str),
    /// Catch-all for custom validation failures.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

fn trim_and_require_non_empty<S: Into<String>>(
    value: S,
    field: &'static str,
) -> Result<String, TypeConstraintError> {
    let trimmed = value.into().trim().to_string();
    if trimmed.is_empty() {
        Err(TypeConstraintError::EmptyString(field))
    } else {
        Ok(trimmed)
    }
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(
            Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
        )]
        #[serde(transparent)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId($field))
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<i32> for $name {
            fn eq(&self, other: &i32) -> bool {
                self.0 == *other
            }
        }
    };
}

macro_rules! non_empty_string_newtype {
    ($name:ident, $doc:expr, $field:expr) => {
        #[doc = $doc]
        #[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Constructs a trimmed, non-empty value.
            pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
                trim_and_require_non_empty(value, $field).map(Self)
            }

            /// Borrow the value as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper and return the owned string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                self.as_str()
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl TryFrom<&str> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }
    };
}

id_newtype!(ItemId, "Identifier of a collectible item category.", "item_id");
id_newtype!(PointId, "Identifier of a collection point.", "point_id");

non_empty_string_newtype!(ItemTitle, "Display title of an item category.", "item title");
non_empty_string_newtype!(PointName, "Name of the entity running a point.", "point name");
non_empty_string_newtype!(CityName, "City name as reported by the directory.", "city");
non_empty_string_newtype!(PhoneNumber, "Contact phone (WhatsApp) number.", "whatsapp");
non_empty_string_newtype!(
    ImageRef,
    "Image reference: an uploaded file name or an absolute URL.",
    "image"
);

/// Validated contact email.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "email")?;
        if !trimmed.as_str().validate_email() {
            return Err(TypeConstraintError::InvalidEmail("email"));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for Email {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

/// Two-letter code of a state (`UF`), always upper case.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct RegionCode(String);

impl RegionCode {
    pub fn new<S: Into<String>>(value: S) -> Result<Self, TypeConstraintError> {
        let trimmed = trim_and_require_non_empty(value, "region")?;
        if trimmed.len() != 2 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(TypeConstraintError::InvalidRegionCode(trimmed));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for RegionCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RegionCode {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RegionCode {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegionCode> for String {
    fn from(value: RegionCode) -> Self {
        value.0
    }
}

impl PartialEq<&str> for RegionCode {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

/// Region picker value: either the unset sentinel or a concrete state code.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum RegionChoice {
    #[default]
    Unset,
    Code(RegionCode),
}

impl RegionChoice {
    pub fn code(&self) -> Option<&RegionCode> {
        match self {
            Self::Unset => None,
            Self::Code(code) => Some(code),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Code(_))
    }
}

impl FromStr for RegionChoice {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == UNSET_SENTINEL {
            return Ok(Self::Unset);
        }
        RegionCode::new(trimmed).map(Self::Code)
    }
}

impl From<RegionCode> for RegionChoice {
    fn from(value: RegionCode) -> Self {
        Self::Code(value)
    }
}

impl Display for RegionChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "{UNSET_SENTINEL}"),
            Self::Code(code) => write!(f, "{code}"),
        }
    }
}

/// City picker value: either the unset sentinel or a city name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CityChoice {
    #[default]
    Unset,
    Name(CityName),
}

impl CityChoice {
    pub fn name(&self) -> Option<&CityName> {
        match self {
            Self::Unset => None,
            Self::Name(name) => Some(name),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, Self::Name(_))
    }
}

impl FromStr for CityChoice {
    type Err = TypeConstraintError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed == UNSET_SENTINEL {
            return Ok(Self::Unset);
        }
        CityName::new(trimmed).map(Self::Name)
    }
}

impl From<CityName> for CityChoice {
    fn from(value: CityName) -> Self {
        Self::Name(value)
    }
}

impl Display for CityChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unset => write!(f, "{UNSET_SENTINEL}"),
            Self::Name(name) => write!(f, "{name}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_non_empty_strings() {
        let value = CityName::new("  Blumenau  ").unwrap();
        assert_eq!(value.as_str(), "Blumenau");
    }

    #[test]
    fn rejects_non_positive_ids() {
        let err = ItemId::new(0).unwrap_err();
        assert_eq!(err, TypeConstraintError::NonPositiveId("item_id"));
    }

    #[test]
    fn region_codes_are_normalised_to_upper_case() {
        assert_eq!(RegionCode::new("sc").unwrap(), "SC");
        assert!(matches!(
            RegionCode::new("SCX"),
            Err(TypeConstraintError::InvalidRegionCode(_))
        ));
        assert!(RegionCode::new("S1").is_err());
    }

    #[test]
    fn sentinel_parses_as_unset_region() {
        assert_eq!("0".parse::<RegionChoice>().unwrap(), RegionChoice::Unset);
        assert_eq!("".parse::<RegionChoice>().unwrap(), RegionChoice::Unset);
        assert_eq!(
            "rs".parse::<RegionChoice>().unwrap(),
            RegionChoice::Code(RegionCode::new("RS").unwrap())
        );
    }

    #[test]
    fn sentinel_parses_as_unset_city() {
        assert_eq!("0".parse::<CityChoice>().unwrap(), CityChoice::Unset);
        assert_eq!(" ".parse::<CityChoice>().unwrap(), CityChoice::Unset);
        assert_eq!(
            " Blumenau ".parse::<CityChoice>().unwrap(),
            CityChoice::Name(CityName::new("Blumenau").unwrap())
        );
    }

    #[test]
    fn validates_emails() {
        assert!(Email::new("contato@mercado.com.br").is_ok());
        assert_eq!(
            Email::new("not-an-email").unwrap_err(),
            TypeConstraintError::InvalidEmail("email")
        );
    }

    #[test]
    fn deserialization_enforces_constraints() {
        let parsed: Result<CityName, _> = serde_json::from_str("\"   \"");
        assert!(parsed.is_err());
        let parsed: RegionCode = serde_json::from_str("\"sp\"").unwrap();
        assert_eq!(parsed, "SP");
    }
}
