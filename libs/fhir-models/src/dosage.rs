//! Dosage instructions

use crate::choice::{AsNeeded, Dose, Rate};
use crate::element::{CodeableConcept, Extensions, Quantity, Ratio};
use crate::error::Result;
use crate::timing::Timing;

/// Instructions for administering a medication
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dosage {
    /// Unique id for inter-element referencing
    pub id: Option<String>,

    /// Order of the dosage instructions
    pub sequence: Option<i32>,

    /// Free text dosage instructions, e.g. SIG
    pub text: Option<String>,

    /// Supplemental instruction, e.g. "with meals"
    pub additional_instruction: Option<Vec<CodeableConcept>>,

    /// Patient or consumer oriented instructions
    pub patient_instruction: Option<String>,

    /// When the medication should be administered
    pub timing: Option<Timing>,

    /// Take "as needed"
    pub as_needed: Option<AsNeeded>,

    /// Body site to administer to
    pub site: Option<CodeableConcept>,

    /// How the drug should enter the body
    pub route: Option<CodeableConcept>,

    /// Technique for administering the medication
    pub method: Option<CodeableConcept>,

    /// Amount of medication administered
    pub dose_and_rate: Option<Vec<DoseAndRate>>,

    /// Upper limit on medication per unit of time
    pub max_dose_per_period: Option<Ratio>,

    /// Upper limit on medication per administration
    pub max_dose_per_administration: Option<Quantity>,

    /// Upper limit on medication per lifetime of the patient
    pub max_dose_per_lifetime: Option<Quantity>,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl Dosage {
    pub fn validate(&self) -> Result<()> {
        for concept in self.additional_instruction.as_deref().unwrap_or(&[]) {
            concept.validate()?;
        }
        if let Some(timing) = &self.timing {
            timing.validate()?;
        }
        if let Some(as_needed) = &self.as_needed {
            as_needed.validate()?;
        }
        for concept in [&self.site, &self.route, &self.method].into_iter().flatten() {
            concept.validate()?;
        }
        for entry in self.dose_and_rate.as_deref().unwrap_or(&[]) {
            entry.validate()?;
        }
        if let Some(ratio) = &self.max_dose_per_period {
            ratio.validate()?;
        }
        for quantity in [
            &self.max_dose_per_administration,
            &self.max_dose_per_lifetime,
        ]
        .into_iter()
        .flatten()
        {
            quantity.validate()?;
        }
        Ok(())
    }
}

/// One dose/rate entry of a [`Dosage`]
///
/// The dose and rate positions are independent choice groups; each entry may
/// satisfy either, both or neither.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DoseAndRate {
    /// The kind of dose or rate specified
    pub type_: Option<CodeableConcept>,

    /// Amount of medication per dose
    pub dose: Option<Dose>,

    /// Amount of medication per unit of time
    pub rate: Option<Rate>,

    /// Additional content beyond core fields
    pub extensions: Extensions,
}

impl DoseAndRate {
    pub fn validate(&self) -> Result<()> {
        if let Some(type_) = &self.type_ {
            type_.validate()?;
        }
        if let Some(dose) = &self.dose {
            dose.validate()?;
        }
        if let Some(rate) = &self.rate {
            rate.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dosage_validation_walks_nested_entries() {
        let dosage = Dosage {
            text: Some("100mg daily".to_string()),
            dose_and_rate: Some(vec![DoseAndRate {
                dose: Some(Dose::Quantity(Quantity {
                    value: Some(100.0),
                    unit: Some("mg".to_string()),
                    ..Default::default()
                })),
                ..Default::default()
            }]),
            ..Default::default()
        };
        assert!(dosage.validate().is_ok());

        let dosage = Dosage {
            max_dose_per_period: Some(Ratio {
                numerator: Some(Quantity {
                    value: Some(300.0),
                    ..Default::default()
                }),
                denominator: Some(Quantity {
                    value: Some(0.0),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(dosage.validate().is_err());
    }
}
