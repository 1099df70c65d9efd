//! Timing and Repeat elements

use crate::choice::Bounds;
use crate::element::{CodeableConcept, Extensions};
use crate::error::{Error, Result};

/// A recurrence schedule
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timing {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Explicit instants at which the event occurs
    pub event: Option<Vec<String>>,

    /// When the event is to occur
    pub repeat: Option<Repeat>,

    /// BID | TID | QID | AM | PM | QD | QOD | +
    pub code: Option<CodeableConcept>,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl Timing {
    pub fn validate(&self) -> Result<()> {
        if let Some(repeat) = &self.repeat {
            repeat.validate()?;
        }
        if let Some(code) = &self.code {
            code.validate()?;
        }
        Ok(())
    }
}

/// Recurrence rule for a [`Timing`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Repeat {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Outer limits of the schedule
    pub bounds: Option<Bounds>,

    /// Number of times to repeat
    pub count: Option<i32>,

    /// Maximum number of times to repeat
    pub count_max: Option<i32>,

    /// How long when it happens
    pub duration: Option<f64>,

    /// How long when it happens, at most
    pub duration_max: Option<f64>,

    /// Unit of time (UCUM)
    pub duration_unit: Option<String>,

    /// Event occurs `frequency` times per period
    pub frequency: Option<i32>,

    /// Event occurs up to `frequency_max` times per period
    pub frequency_max: Option<i32>,

    /// Length of the period over which frequency applies
    pub period: Option<f64>,

    /// Upper limit of the period
    pub period_max: Option<f64>,

    /// Unit of time (UCUM)
    pub period_unit: Option<String>,

    /// Days of week
    pub day_of_week: Option<Vec<String>>,

    /// Times of day for the action
    pub time_of_day: Option<Vec<String>>,

    /// Codes for the time period of occurrence
    pub when: Option<Vec<String>>,

    /// Minutes from the event, before or after
    pub offset: Option<i32>,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl Repeat {
    /// Check local invariants: counts, frequencies and period lengths are
    /// non-negative.
    pub fn validate(&self) -> Result<()> {
        if let Some(bounds) = &self.bounds {
            bounds.validate()?;
        }

        let int_fields = [
            ("Repeat.count", self.count),
            ("Repeat.countMax", self.count_max),
            ("Repeat.frequency", self.frequency),
            ("Repeat.frequencyMax", self.frequency_max),
            ("Repeat.offset", self.offset),
        ];
        for (field, value) in int_fields {
            if value.is_some_and(|v| v < 0) {
                return Err(Error::InvalidFieldValue {
                    field,
                    reason: "must be non-negative",
                });
            }
        }

        let decimal_fields = [
            ("Repeat.duration", self.duration),
            ("Repeat.durationMax", self.duration_max),
            ("Repeat.period", self.period),
            ("Repeat.periodMax", self.period_max),
        ];
        for (field, value) in decimal_fields {
            if value.is_some_and(|v| !(v.is_finite() && v >= 0.0)) {
                return Err(Error::InvalidFieldValue {
                    field,
                    reason: "must be a non-negative finite number",
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeat_rejects_negative_numerics() {
        let repeat = Repeat {
            frequency: Some(-1),
            ..Default::default()
        };
        assert!(repeat.validate().is_err());

        let repeat = Repeat {
            period: Some(-6.0),
            ..Default::default()
        };
        assert!(repeat.validate().is_err());

        let repeat = Repeat {
            frequency: Some(3),
            period: Some(1.0),
            period_unit: Some("d".to_string()),
            ..Default::default()
        };
        assert!(repeat.validate().is_ok());
    }
}
