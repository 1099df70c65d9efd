//! MedicationStatement resource

use crate::choice::{Effective, Medication};
use crate::dosage::Dosage;
use crate::element::{CodeableConcept, Extensions, Identifier, Reference};
use crate::error::Result;
use crate::Annotation;

/// Record of a patient's medication use, possibly self-reported
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationStatement {
    /// Logical id of this artifact
    pub id: Option<String>,

    /// External identifiers
    pub identifier: Option<Vec<Identifier>>,

    /// Fulfils plan, proposal or order
    pub based_on: Option<Vec<Reference>>,

    /// Part of referenced event
    pub part_of: Option<Vec<Reference>>,

    /// State of the statement
    pub status: MedicationStatementStatus,

    /// Reason for the current status
    pub status_reason: Option<Vec<CodeableConcept>>,

    /// Type of medication usage
    pub category: Option<CodeableConcept>,

    /// What is/was being taken
    pub medication: Medication,

    /// Who is/was taking the medication
    pub subject: Option<Reference>,

    /// Encounter or episode associated with the statement
    pub context: Option<Reference>,

    /// When the medication is/was taken; open when unknown
    pub effective: Option<Effective>,

    /// When the statement was asserted
    pub date_asserted: Option<String>,

    /// Person or organization that provided the information
    pub information_source: Option<Reference>,

    /// Additional supporting information
    pub derived_from: Option<Vec<Reference>>,

    /// Reason the medication is being/was taken
    pub reason_code: Option<Vec<CodeableConcept>>,

    /// Condition or observation that supports why
    pub reason_reference: Option<Vec<Reference>>,

    /// Further information about the statement
    pub note: Option<Vec<Annotation>>,

    /// Details of how the medication is/was taken
    pub dosage: Option<Vec<Dosage>>,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl MedicationStatement {
    /// Resource with the minimal required fields; everything else is absent.
    pub fn new(status: MedicationStatementStatus, medication: Medication) -> Self {
        Self {
            id: None,
            identifier: None,
            based_on: None,
            part_of: None,
            status,
            status_reason: None,
            category: None,
            medication,
            subject: None,
            context: None,
            effective: None,
            date_asserted: None,
            information_source: None,
            derived_from: None,
            reason_code: None,
            reason_reference: None,
            note: None,
            dosage: None,
            extensions: Extensions::new(),
        }
    }

    /// Run every element's local validation predicate.
    pub fn validate(&self) -> Result<()> {
        for identifier in self.identifier.as_deref().unwrap_or(&[]) {
            identifier.validate()?;
        }
        for list in [&self.based_on, &self.part_of] {
            for reference in list.as_deref().unwrap_or(&[]) {
                reference.validate()?;
            }
        }
        for concept in self.status_reason.as_deref().unwrap_or(&[]) {
            concept.validate()?;
        }
        if let Some(category) = &self.category {
            category.validate()?;
        }
        self.medication.validate()?;
        for reference in [&self.subject, &self.context, &self.information_source]
            .into_iter()
            .flatten()
        {
            reference.validate()?;
        }
        if let Some(effective) = &self.effective {
            effective.validate()?;
        }
        for reference in self.derived_from.as_deref().unwrap_or(&[]) {
            reference.validate()?;
        }
        for concept in self.reason_code.as_deref().unwrap_or(&[]) {
            concept.validate()?;
        }
        for reference in self.reason_reference.as_deref().unwrap_or(&[]) {
            reference.validate()?;
        }
        for note in self.note.as_deref().unwrap_or(&[]) {
            note.validate()?;
        }
        for dosage in self.dosage.as_deref().unwrap_or(&[]) {
            dosage.validate()?;
        }
        Ok(())
    }
}

/// State of a medication statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationStatementStatus {
    Active,
    Completed,
    EnteredInError,
    Intended,
    Stopped,
    OnHold,
    Unknown,
    NotTaken,
}

impl MedicationStatementStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "entered-in-error" => Some(Self::EnteredInError),
            "intended" => Some(Self::Intended),
            "stopped" => Some(Self::Stopped),
            "on-hold" => Some(Self::OnHold),
            "unknown" => Some(Self::Unknown),
            "not-taken" => Some(Self::NotTaken),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::EnteredInError => "entered-in-error",
            Self::Intended => "intended",
            Self::Stopped => "stopped",
            Self::OnHold => "on-hold",
            Self::Unknown => "unknown",
            Self::NotTaken => "not-taken",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip() {
        for code in [
            "active",
            "completed",
            "entered-in-error",
            "intended",
            "stopped",
            "on-hold",
            "unknown",
            "not-taken",
        ] {
            let status = MedicationStatementStatus::from_code(code).unwrap();
            assert_eq!(status.as_code(), code);
        }
        assert!(MedicationStatementStatus::from_code("current").is_none());
    }

    #[test]
    fn effective_time_is_optional() {
        let statement = MedicationStatement::new(
            MedicationStatementStatus::Active,
            Medication::Reference(Reference::literal("Medication/aspirin")),
        );
        assert!(statement.effective.is_none());
        assert!(statement.validate().is_ok());
    }
}
