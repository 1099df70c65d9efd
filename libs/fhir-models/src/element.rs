//! Element types shared across the medication resources
//!
//! Pure value types with no cross-resource behavior. Each type validates only
//! its own invariants; whether a Reference actually resolves is the concern of
//! whatever stores the records.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque, order-preserving carrier for content the schema does not model.
///
/// Every element carries one of these via `#[serde(flatten)]`. Unrecognized
/// keys are captured on decode and re-emitted on encode with the same key set
/// and nested structure; their internal shape is never interpreted.
pub type Extensions = serde_json::Map<String, Value>;

/// A business identifier for some real-world entity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Identifier {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// usual | official | temp | secondary | old (if known)
    #[serde(rename = "use", skip_serializing_if = "Option::is_none")]
    pub use_: Option<String>,

    /// Description of the identifier
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<CodeableConcept>,

    /// The namespace for the identifier value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// The value that is unique within the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Time period when the id is/was valid for use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<Period>,

    /// Organization that issued the id (may be just text)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigner: Option<Box<Reference>>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Identifier {
    /// Check local invariants: `value` is required when `system` is present.
    pub fn validate(&self) -> Result<()> {
        if self.system.is_some() && self.value.is_none() {
            return Err(Error::InvalidFieldValue {
                field: "Identifier.value",
                reason: "required when system is present",
            });
        }
        if let Some(type_) = &self.type_ {
            type_.validate()?;
        }
        if let Some(period) = &self.period {
            period.validate()?;
        }
        if let Some(assigner) = &self.assigner {
            assigner.validate()?;
        }
        Ok(())
    }
}

/// A concept expressed as coded terms and/or free text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CodeableConcept {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Codes defined by terminology systems
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coding: Option<Vec<Coding>>,

    /// Plain text representation of the concept
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl CodeableConcept {
    /// Concept with only a text representation
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Whether the concept carries at least one coding or a non-empty text.
    ///
    /// This is a soft invariant: an instance failing it is vacuous but not
    /// rejected on decode.
    pub fn is_meaningful(&self) -> bool {
        self.coding.as_deref().is_some_and(|c| !c.is_empty())
            || self.text.as_deref().is_some_and(|t| !t.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        for coding in self.coding.as_deref().unwrap_or(&[]) {
            coding.validate()?;
        }
        Ok(())
    }
}

/// One coded representation of a concept
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Coding {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Identity of the terminology system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Version of the system, if relevant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Symbol in syntax defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Representation defined by the system
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// If this coding was chosen directly by the user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_selected: Option<bool>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Coding {
    /// Check local invariants: `code` is required when `system` is present.
    pub fn validate(&self) -> Result<()> {
        if self.system.is_some() && self.code.is_none() {
            return Err(Error::InvalidFieldValue {
                field: "Coding.code",
                reason: "required when system is present",
            });
        }
        Ok(())
    }
}

/// A measured amount with a unit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Quantity {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Numerical value, with implicit precision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Unit representation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// System that defines the unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Coded form of the unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Quantity {
    /// Check local invariants: the value must be a finite number.
    ///
    /// JSON cannot encode NaN or infinities, so this only guards values built
    /// in-process before encoding.
    pub fn validate(&self) -> Result<()> {
        if let Some(value) = self.value {
            if !value.is_finite() {
                return Err(Error::InvalidFieldValue {
                    field: "Quantity.value",
                    reason: "must be a finite number",
                });
            }
        }
        Ok(())
    }
}

/// A length of time, same shape as [`Quantity`] with UCUM time units
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Duration {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Duration length, with implicit precision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Unit representation (s, min, h, d, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// System that defines the unit (UCUM)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Coded form of the unit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Duration {
    pub fn validate(&self) -> Result<()> {
        if let Some(value) = self.value {
            if !value.is_finite() {
                return Err(Error::InvalidFieldValue {
                    field: "Duration.value",
                    reason: "must be a finite number",
                });
            }
        }
        Ok(())
    }
}

/// A bounded interval of quantities
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Range {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Low limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low: Option<Quantity>,

    /// High limit
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<Quantity>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Range {
    /// Check local invariants: `low.value <= high.value` when both limits are
    /// present and expressed in the same unit code and system.
    pub fn validate(&self) -> Result<()> {
        if let Some(low) = &self.low {
            low.validate()?;
        }
        if let Some(high) = &self.high {
            high.validate()?;
        }
        if let (Some(low), Some(high)) = (&self.low, &self.high) {
            let comparable = low.code == high.code && low.system == high.system;
            if comparable {
                if let (Some(l), Some(h)) = (low.value, high.value) {
                    if l > h {
                        return Err(Error::InvalidFieldValue {
                            field: "Range",
                            reason: "low must not exceed high",
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

/// A numerator/denominator pair of quantities
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ratio {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Numerator value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numerator: Option<Quantity>,

    /// Denominator value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub denominator: Option<Quantity>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Ratio {
    /// Check local invariants: a present denominator value must be non-zero.
    ///
    /// Every Ratio in this model sits in a dose or rate position, where a zero
    /// denominator has no meaning.
    pub fn validate(&self) -> Result<()> {
        if let Some(numerator) = &self.numerator {
            numerator.validate()?;
        }
        if let Some(denominator) = &self.denominator {
            denominator.validate()?;
            if denominator.value == Some(0.0) {
                return Err(Error::InvalidFieldValue {
                    field: "Ratio.denominator",
                    reason: "must be non-zero",
                });
            }
        }
        Ok(())
    }
}

/// A time span; either end may be open
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Start of the period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,

    /// End of the period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Period {
    /// Check local invariants: `start <= end` when both are present.
    ///
    /// FHIR dateTimes may be partial ("2024", "2024-01"); the ordering check
    /// only applies when both ends parse as full RFC 3339 instants.
    pub fn validate(&self) -> Result<()> {
        if let (Some(start), Some(end)) = (&self.start, &self.end) {
            let start = chrono::DateTime::parse_from_rfc3339(start);
            let end = chrono::DateTime::parse_from_rfc3339(end);
            if let (Ok(start), Ok(end)) = (start, end) {
                if start > end {
                    return Err(Error::InvalidFieldValue {
                        field: "Period",
                        reason: "start must not be after end",
                    });
                }
            }
        }
        Ok(())
    }
}

/// A non-owning pointer to another resource, by literal URL or by logical
/// identifier
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    /// Unique id for inter-element referencing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Literal reference: relative, internal or absolute URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,

    /// Type the reference refers to (e.g. "Patient")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// Logical reference, when a literal reference is not known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<Box<Identifier>>,

    /// Text alternative for the resource
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<String>,

    /// Additional content beyond core fields
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Reference {
    /// Literal reference to `Type/id`
    pub fn literal(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(identifier) = &self.identifier {
            identifier.validate()?;
        }
        Ok(())
    }
}
