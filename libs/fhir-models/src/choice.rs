//! Choice-group sum types
//!
//! The exchange encoding expresses a choice position as several sibling fields
//! of which at most one may be populated (`medicationCodeableConcept` vs
//! `medicationReference`, and so on). In the model each of those positions is
//! a tagged union, so a multi-populated state cannot be represented at all;
//! the codec is the only place that ever sees the sibling-field form.

use crate::element::{CodeableConcept, Duration, Period, Quantity, Range, Ratio, Reference};
use crate::error::Result;

/// What medication was administered or taken: an inline concept or a
/// reference to a Medication resource
#[derive(Debug, Clone, PartialEq)]
pub enum Medication {
    CodeableConcept(CodeableConcept),
    Reference(Reference),
}

impl Medication {
    pub fn validate(&self) -> Result<()> {
        match self {
            Medication::CodeableConcept(concept) => concept.validate(),
            Medication::Reference(reference) => reference.validate(),
        }
    }
}

/// When the administration or statement took effect: a single instant or a
/// span
#[derive(Debug, Clone, PartialEq)]
pub enum Effective {
    DateTime(String),
    Period(Period),
}

impl Effective {
    pub fn validate(&self) -> Result<()> {
        match self {
            Effective::DateTime(_) => Ok(()),
            Effective::Period(period) => period.validate(),
        }
    }
}

/// Amount of medication per dose
#[derive(Debug, Clone, PartialEq)]
pub enum Dose {
    Range(Range),
    Quantity(Quantity),
}

impl Dose {
    pub fn validate(&self) -> Result<()> {
        match self {
            Dose::Range(range) => range.validate(),
            Dose::Quantity(quantity) => quantity.validate(),
        }
    }
}

/// Amount of medication per unit of time
#[derive(Debug, Clone, PartialEq)]
pub enum Rate {
    Ratio(Ratio),
    Range(Range),
    Quantity(Quantity),
}

impl Rate {
    pub fn validate(&self) -> Result<()> {
        match self {
            Rate::Ratio(ratio) => ratio.validate(),
            Rate::Range(range) => range.validate(),
            Rate::Quantity(quantity) => quantity.validate(),
        }
    }
}

/// Take-as-needed flag, optionally qualified by the precondition concept
#[derive(Debug, Clone, PartialEq)]
pub enum AsNeeded {
    Boolean(bool),
    CodeableConcept(CodeableConcept),
}

impl AsNeeded {
    pub fn validate(&self) -> Result<()> {
        match self {
            AsNeeded::Boolean(_) => Ok(()),
            AsNeeded::CodeableConcept(concept) => concept.validate(),
        }
    }
}

/// Outer limits of a recurrence schedule
#[derive(Debug, Clone, PartialEq)]
pub enum Bounds {
    Duration(Duration),
    Range(Range),
    Period(Period),
}

impl Bounds {
    pub fn validate(&self) -> Result<()> {
        match self {
            Bounds::Duration(duration) => duration.validate(),
            Bounds::Range(range) => range.validate(),
            Bounds::Period(period) => period.validate(),
        }
    }
}

/// Who authored an annotation: a resource reference or a plain name
#[derive(Debug, Clone, PartialEq)]
pub enum AnnotationAuthor {
    Reference(Reference),
    String(String),
}

impl AnnotationAuthor {
    pub fn validate(&self) -> Result<()> {
        match self {
            AnnotationAuthor::Reference(reference) => reference.validate(),
            AnnotationAuthor::String(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_reaches_the_selected_alternative() {
        let rate = Rate::Quantity(Quantity {
            value: Some(f64::INFINITY),
            ..Default::default()
        });
        assert!(rate.validate().is_err());

        let bounds = Bounds::Period(Period {
            start: Some("2024-03-01T00:00:00Z".to_string()),
            end: Some("2024-01-01T00:00:00Z".to_string()),
            ..Default::default()
        });
        assert!(bounds.validate().is_err());
    }
}
