use crate::error::{Result, ScoringError};

/// Collects numeric field problems so a caller sees all of them at once
/// (not just the first).
#[derive(Debug, Default)]
pub struct FieldChecks {
    errors: Vec<String>,
}

impl FieldChecks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finite(&mut self, field: &str, value: f64) -> &mut Self {
        if !value.is_finite() {
            self.errors.push(format!("{}: must be a finite number", field));
        }
        self
    }

    /// Inclusive range check; non-finite values are reported once, as non-finite.
    pub fn within(&mut self, field: &str, value: f64, low: f64, high: f64) -> &mut Self {
        if !value.is_finite() {
            return self.finite(field, value);
        }
        if value < low || value > high {
            self.errors
                .push(format!("{}: must be between {} and {}", field, low, high));
        }
        self
    }

    pub fn finish(&mut self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ScoringError::validation(std::mem::take(&mut self.errors).join("; ")))
        }
    }
}
