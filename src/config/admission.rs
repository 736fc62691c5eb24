//! Admission engine configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Tuning of the admission coordinator.
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionConfig {
    /// Attempts for a transaction aborted by a concurrent writer
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl AdmissionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_attempts == 0 || self.max_attempts > 10 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        Ok(())
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_max_attempts() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admission_defaults() {
        let config = AdmissionConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_bounds() {
        assert!(AdmissionConfig { max_attempts: 0 }.validate().is_err());
        assert!(AdmissionConfig { max_attempts: 11 }.validate().is_err());
        assert!(AdmissionConfig { max_attempts: 10 }.validate().is_ok());
    }
}
