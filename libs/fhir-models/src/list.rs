//! List resource

use serde::{Deserialize, Serialize};

use crate::element::{CodeableConcept, Extensions, Identifier, Reference};
use crate::error::Result;
use crate::Annotation;

/// An ordered collection of resource references with metadata
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    /// Logical id of this artifact
    pub id: Option<String>,

    /// Business identifiers
    pub identifier: Option<Vec<Identifier>>,

    /// State of the list
    pub status: ListStatus,

    /// How the list was built and what it represents
    pub mode: ListMode,

    /// Descriptive name for the list
    pub title: Option<String>,

    /// What the purpose of this list is
    pub code: Option<CodeableConcept>,

    /// If all resources have the same subject
    pub subject: Option<Reference>,

    /// Context in which the list was created
    pub encounter: Option<Reference>,

    /// When the list was prepared
    pub date: Option<String>,

    /// Who and/or what defined the list contents
    pub source: Option<Reference>,

    /// What order the list has
    pub ordered_by: Option<CodeableConcept>,

    /// Comments about the list
    pub note: Option<Vec<Annotation>>,

    /// Entries in the list
    pub entry: Option<Vec<ListEntry>>,

    /// Why the list is empty
    pub empty_reason: Option<CodeableConcept>,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl List {
    /// Resource with the minimal required fields; everything else is absent.
    pub fn new(status: ListStatus, mode: ListMode) -> Self {
        Self {
            id: None,
            identifier: None,
            status,
            mode,
            title: None,
            code: None,
            subject: None,
            encounter: None,
            date: None,
            source: None,
            ordered_by: None,
            note: None,
            entry: None,
            empty_reason: None,
            extensions: Extensions::new(),
        }
    }

    /// Entries as a slice, empty when absent.
    pub fn entries(&self) -> &[ListEntry] {
        self.entry.as_deref().unwrap_or(&[])
    }

    /// Run every element's local validation predicate.
    pub fn validate(&self) -> Result<()> {
        for identifier in self.identifier.as_deref().unwrap_or(&[]) {
            identifier.validate()?;
        }
        for concept in [&self.code, &self.ordered_by, &self.empty_reason]
            .into_iter()
            .flatten()
        {
            concept.validate()?;
        }
        for reference in [&self.subject, &self.encounter, &self.source]
            .into_iter()
            .flatten()
        {
            reference.validate()?;
        }
        for note in self.note.as_deref().unwrap_or(&[]) {
            note.validate()?;
        }
        for entry in self.entries() {
            entry.validate()?;
        }
        Ok(())
    }
}

/// State of a list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Current,
    Retired,
    EnteredInError,
}

impl ListStatus {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "current" => Some(Self::Current),
            "retired" => Some(Self::Retired),
            "entered-in-error" => Some(Self::EnteredInError),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Retired => "retired",
            Self::EnteredInError => "entered-in-error",
        }
    }
}

/// How a list was built and what it represents
///
/// `empty` asserts there is deliberately nothing in the list; such a list must
/// carry an `emptyReason` and no entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    Working,
    Snapshot,
    Changes,
    Empty,
}

impl ListMode {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "working" => Some(Self::Working),
            "snapshot" => Some(Self::Snapshot),
            "changes" => Some(Self::Changes),
            "empty" => Some(Self::Empty),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::Working => "working",
            Self::Snapshot => "snapshot",
            Self::Changes => "changes",
            Self::Empty => "empty",
        }
    }
}

/// One entry in a [`List`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListEntry {
    /// Status/workflow information about this item
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<CodeableConcept>,

    /// If this item is actually marked as deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,

    /// When the item was added to the list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// The actual entry
    pub item: Reference,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl ListEntry {
    pub fn new(item: Reference) -> Self {
        Self {
            flag: None,
            deleted: None,
            date: None,
            item,
            extensions: Extensions::new(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(flag) = &self.flag {
            flag.validate()?;
        }
        self.item.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_mode_codes_round_trip() {
        for code in ["current", "retired", "entered-in-error"] {
            assert_eq!(ListStatus::from_code(code).unwrap().as_code(), code);
        }
        for code in ["working", "snapshot", "changes", "empty"] {
            assert_eq!(ListMode::from_code(code).unwrap().as_code(), code);
        }
        assert!(ListStatus::from_code("active").is_none());
        assert!(ListMode::from_code("draft").is_none());
    }

    #[test]
    fn entries_slice_is_empty_when_absent() {
        let list = List::new(ListStatus::Current, ListMode::Working);
        assert!(list.entries().is_empty());
    }
}
