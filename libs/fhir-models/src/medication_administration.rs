//! MedicationAdministration resource

use serde::{Deserialize, Serialize};

use crate::choice::{Effective, Medication};
use crate::dosage::Dosage;
use crate::element::{CodeableConcept, Extensions, Identifier, Reference};
use crate::error::Result;
use crate::Annotation;

/// Record that a medication was given to a patient (or was not given)
#[derive(Debug, Clone, PartialEq)]
pub struct MedicationAdministration {
    /// Logical id of this artifact
    pub id: Option<String>,

    /// External identifiers
    pub identifier: Option<Vec<Identifier>>,

    /// Instantiates protocol or definition
    pub instantiates: Option<Vec<String>>,

    /// Part of referenced event
    pub part_of: Option<Vec<Reference>>,

    /// State of the administration
    pub status: MedicationAdministrationStatus,

    /// Reason the administration was not performed
    pub status_reason: Option<Vec<CodeableConcept>>,

    /// Type of medication usage
    pub category: Option<CodeableConcept>,

    /// What was administered
    pub medication: Medication,

    /// Who received the medication
    pub subject: Option<Reference>,

    /// Encounter or episode of care administered as part of
    pub context: Option<Reference>,

    /// Additional information supporting the administration
    pub supporting_information: Option<Vec<Reference>>,

    /// When the administration took effect
    pub effective: Effective,

    /// Who performed the administration and what they did
    pub performer: Option<Vec<Performer>>,

    /// Reason the administration was performed
    pub reason_code: Option<Vec<CodeableConcept>>,

    /// Condition or observation that supports why
    pub reason_reference: Option<Vec<Reference>>,

    /// Request this administration was performed against
    pub request: Option<Reference>,

    /// Device used to administer
    pub device: Option<Vec<Reference>>,

    /// Information about the administration
    pub note: Option<Vec<Annotation>>,

    /// Details of how the medication was taken
    pub dosage: Option<Dosage>,

    /// Events of interest in the lifecycle
    pub event_history: Option<Vec<Reference>>,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl MedicationAdministration {
    /// Resource with the minimal required fields; everything else is absent.
    pub fn new(
        status: MedicationAdministrationStatus,
        medication: Medication,
        effective: Effective,
    ) -> Self {
        Self {
            id: None,
            identifier: None,
            instantiates: None,
            part_of: None,
            status,
            status_reason: None,
            category: None,
            medication,
            subject: None,
            context: None,
            supporting_information: None,
            effective,
            performer: None,
            reason_code: None,
            reason_reference: None,
            request: None,
            device: None,
            note: None,
            dosage: None,
            event_history: None,
            extensions: Extensions::new(),
        }
    }

    /// Run every element's local validation predicate.
    pub fn validate(&self) -> Result<()> {
        for identifier in self.identifier.as_deref().unwrap_or(&[]) {
            identifier.validate()?;
        }
        for reference in self.part_of.as_deref().unwrap_or(&[]) {
            reference.validate()?;
        }
        for concept in self.status_reason.as_deref().unwrap_or(&[]) {
            concept.validate()?;
        }
        if let Some(category) = &self.category {
            category.validate()?;
        }
        self.medication.validate()?;
        for reference in [&self.subject, &self.context, &self.request]
            .into_iter()
            .flatten()
        {
            reference.validate()?;
        }
        for reference in self.supporting_information.as_deref().unwrap_or(&[]) {
            reference.validate()?;
        }
        self.effective.validate()?;
        for performer in self.performer.as_deref().unwrap_or(&[]) {
            performer.validate()?;
        }
        for concept in self.reason_code.as_deref().unwrap_or(&[]) {
            concept.validate()?;
        }
        for reference in self.reason_reference.as_deref().unwrap_or(&[]) {
            reference.validate()?;
        }
        for reference in self.device.as_deref().unwrap_or(&[]) {
            reference.validate()?;
        }
        for note in self.note.as_deref().unwrap_or(&[]) {
            note.validate()?;
        }
        if let Some(dosage) = &self.dosage {
            dosage.validate()?;
        }
        for reference in self.event_history.as_deref().unwrap_or(&[]) {
            reference.validate()?;
        }
        Ok(())
    }
}

/// State of a medication administration
///
/// `unknown` is a reserved member of the enumeration: it records genuine
/// uncertainty and is valid data, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MedicationAdministrationStatus {
    InProgress,
    NotDone,
    OnHold,
    Completed,
    EnteredInError,
    Stopped,
    Unknown,
}

impl MedicationAdministrationStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "in-progress" => Some(Self::InProgress),
            "not-done" => Some(Self::NotDone),
            "on-hold" => Some(Self::OnHold),
            "completed" => Some(Self::Completed),
            "entered-in-error" => Some(Self::EnteredInError),
            "stopped" => Some(Self::Stopped),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::InProgress => "in-progress",
            Self::NotDone => "not-done",
            Self::OnHold => "on-hold",
            Self::Completed => "completed",
            Self::EnteredInError => "entered-in-error",
            Self::Stopped => "stopped",
            Self::Unknown => "unknown",
        }
    }
}

/// Who performed a medication administration and what they did
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Performer {
    /// Type of performance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<CodeableConcept>,

    /// Who performed the administration
    pub actor: Reference,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Performer {
    pub fn validate(&self) -> Result<()> {
        if let Some(function) = &self.function {
            function.validate()?;
        }
        self.actor.validate()
    }
}
