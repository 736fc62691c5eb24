//! Passenger value object.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Passenger gender as accepted by the booking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(ValidationError::invalid_format(
                "gender",
                format!("expected 'Male' or 'Female', got '{}'", other),
            )),
        }
    }
}

/// The person travelling on a booked launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
    pub birthday: NaiveDate,
}

impl Passenger {
    /// Creates a passenger, trimming names and rejecting blank ones.
    pub fn try_new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        gender: Gender,
        birthday: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let first_name = first_name.into().trim().to_string();
        let last_name = last_name.into().trim().to_string();

        if first_name.is_empty() {
            return Err(ValidationError::empty_field("first_name"));
        }
        if last_name.is_empty() {
            return Err(ValidationError::empty_field("last_name"));
        }

        Ok(Self {
            first_name,
            last_name,
            gender,
            birthday,
        })
    }
}
