//! Data model for FHIR medication records
//!
//! In-memory representation of MedicationAdministration, MedicationStatement
//! and List, together with the element types they compose. The model keeps
//! full structural fidelity with the exchange encoding:
//!
//! - every optional field tracks presence (`Option`), never a zero default;
//! - every element carries an order-preserving [`element::Extensions`] map
//!   holding content the schema does not model;
//! - every choice position ("exactly one of N differently-typed fields") is a
//!   tagged union in [`choice`], so a conflicting state is unrepresentable.
//!
//! Conversion to and from the wire encoding lives in the `dosette-codec`
//! crate; this crate is pure data plus per-element validation predicates.

pub mod annotation;
pub mod choice;
pub mod dosage;
pub mod element;
pub mod error;
pub mod list;
pub mod medication_administration;
pub mod medication_statement;
pub mod timing;

// Re-export commonly used types
pub use annotation::Annotation;
pub use choice::{AnnotationAuthor, AsNeeded, Bounds, Dose, Effective, Medication, Rate};
pub use dosage::{Dosage, DoseAndRate};
pub use element::*;
pub use error::{Error, Result};
pub use list::{List, ListEntry, ListMode, ListStatus};
pub use medication_administration::{
    MedicationAdministration, MedicationAdministrationStatus, Performer,
};
pub use medication_statement::{MedicationStatement, MedicationStatementStatus};
pub use timing::{Repeat, Timing};
