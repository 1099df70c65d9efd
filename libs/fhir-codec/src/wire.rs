//! Wire twins for choice-bearing types
//!
//! The exchange encoding spells each choice group out as sibling fields, so
//! every type that contains one (directly or through a child) gets a private
//! serde twin here mirroring the encoding exactly. Decoding maps a twin into
//! its model type through the choice resolver and the construction-time
//! checks; encoding is the structural inverse and emits exactly the one
//! populated member of each group. Types without choice content (Identifier,
//! CodeableConcept, Performer, ListEntry, ...) serialize directly and need no
//! twin.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use dosette_models::{
    Annotation, AnnotationAuthor, AsNeeded, Bounds, CodeableConcept, Dosage, Dose, DoseAndRate,
    Duration, Effective, Extensions, Identifier, List, ListEntry, ListMode, ListStatus, Medication,
    MedicationAdministration, MedicationAdministrationStatus, MedicationStatement,
    MedicationStatementStatus, Performer, Period, Quantity, Range, Rate, Ratio, Reference, Repeat,
    Timing,
};

use crate::choice;
use crate::error::{Error, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AnnotationWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    author_reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    author_string: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl AnnotationWire {
    fn into_model(self) -> Result<Annotation> {
        let author = choice::resolve(
            "author",
            vec![
                ("authorReference", self.author_reference.map(AnnotationAuthor::Reference)),
                ("authorString", self.author_string.map(AnnotationAuthor::String)),
            ],
        )?;

        Ok(Annotation {
            id: self.id,
            author,
            time: self.time,
            text: self.text.ok_or(Error::MissingField("Annotation.text"))?,
            extensions: self.extensions,
        })
    }

    fn from_model(model: &Annotation) -> Self {
        let (author_reference, author_string) = match &model.author {
            Some(AnnotationAuthor::Reference(reference)) => (Some(reference.clone()), None),
            Some(AnnotationAuthor::String(name)) => (None, Some(name.clone())),
            None => (None, None),
        };

        Self {
            id: model.id.clone(),
            author_reference,
            author_string,
            time: model.time.clone(),
            text: Some(model.text.clone()),
            extensions: model.extensions.clone(),
        }
    }
}

fn annotations_into(wire: Option<Vec<AnnotationWire>>) -> Result<Option<Vec<Annotation>>> {
    wire.map(|notes| notes.into_iter().map(AnnotationWire::into_model).collect())
        .transpose()
}

fn annotations_from(model: &Option<Vec<Annotation>>) -> Option<Vec<AnnotationWire>> {
    model
        .as_ref()
        .map(|notes| notes.iter().map(AnnotationWire::from_model).collect())
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RepeatWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    bounds_duration: Option<Duration>,

    #[serde(skip_serializing_if = "Option::is_none")]
    bounds_range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    bounds_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    count_max: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    duration: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    duration_max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    duration_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    frequency: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_max: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    period: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    period_max: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    period_unit: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    day_of_week: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    time_of_day: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    when: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    offset: Option<i32>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl RepeatWire {
    fn into_model(self) -> Result<Repeat> {
        let bounds = choice::resolve(
            "bounds",
            vec![
                ("boundsDuration", self.bounds_duration.map(Bounds::Duration)),
                ("boundsRange", self.bounds_range.map(Bounds::Range)),
                ("boundsPeriod", self.bounds_period.map(Bounds::Period)),
            ],
        )?;

        Ok(Repeat {
            id: self.id,
            bounds,
            count: self.count,
            count_max: self.count_max,
            duration: self.duration,
            duration_max: self.duration_max,
            duration_unit: self.duration_unit,
            frequency: self.frequency,
            frequency_max: self.frequency_max,
            period: self.period,
            period_max: self.period_max,
            period_unit: self.period_unit,
            day_of_week: self.day_of_week,
            time_of_day: self.time_of_day,
            when: self.when,
            offset: self.offset,
            extensions: self.extensions,
        })
    }

    fn from_model(model: &Repeat) -> Self {
        let (bounds_duration, bounds_range, bounds_period) = match &model.bounds {
            Some(Bounds::Duration(duration)) => (Some(duration.clone()), None, None),
            Some(Bounds::Range(range)) => (None, Some(range.clone()), None),
            Some(Bounds::Period(period)) => (None, None, Some(period.clone())),
            None => (None, None, None),
        };

        Self {
            id: model.id.clone(),
            bounds_duration,
            bounds_range,
            bounds_period,
            count: model.count,
            count_max: model.count_max,
            duration: model.duration,
            duration_max: model.duration_max,
            duration_unit: model.duration_unit.clone(),
            frequency: model.frequency,
            frequency_max: model.frequency_max,
            period: model.period,
            period_max: model.period_max,
            period_unit: model.period_unit.clone(),
            day_of_week: model.day_of_week.clone(),
            time_of_day: model.time_of_day.clone(),
            when: model.when.clone(),
            offset: model.offset,
            extensions: model.extensions.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct TimingWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    event: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    repeat: Option<RepeatWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<CodeableConcept>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl TimingWire {
    fn into_model(self) -> Result<Timing> {
        Ok(Timing {
            id: self.id,
            event: self.event,
            repeat: self.repeat.map(RepeatWire::into_model).transpose()?,
            code: self.code,
            extensions: self.extensions,
        })
    }

    fn from_model(model: &Timing) -> Self {
        Self {
            id: model.id.clone(),
            event: model.event.clone(),
            repeat: model.repeat.as_ref().map(RepeatWire::from_model),
            code: model.code.clone(),
            extensions: model.extensions.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DoseAndRateWire {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    type_: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    dose_range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    dose_quantity: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    rate_ratio: Option<Ratio>,

    #[serde(skip_serializing_if = "Option::is_none")]
    rate_range: Option<Range>,

    #[serde(skip_serializing_if = "Option::is_none")]
    rate_quantity: Option<Quantity>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl DoseAndRateWire {
    fn into_model(self) -> Result<DoseAndRate> {
        // The dose and rate positions are independent groups; each resolves
        // on its own.
        let dose = choice::resolve(
            "dose",
            vec![
                ("doseRange", self.dose_range.map(Dose::Range)),
                ("doseQuantity", self.dose_quantity.map(Dose::Quantity)),
            ],
        )?;
        let rate = choice::resolve(
            "rate",
            vec![
                ("rateRatio", self.rate_ratio.map(Rate::Ratio)),
                ("rateRange", self.rate_range.map(Rate::Range)),
                ("rateQuantity", self.rate_quantity.map(Rate::Quantity)),
            ],
        )?;

        Ok(DoseAndRate {
            type_: self.type_,
            dose,
            rate,
            extensions: self.extensions,
        })
    }

    fn from_model(model: &DoseAndRate) -> Self {
        let (dose_range, dose_quantity) = match &model.dose {
            Some(Dose::Range(range)) => (Some(range.clone()), None),
            Some(Dose::Quantity(quantity)) => (None, Some(quantity.clone())),
            None => (None, None),
        };
        let (rate_ratio, rate_range, rate_quantity) = match &model.rate {
            Some(Rate::Ratio(ratio)) => (Some(ratio.clone()), None, None),
            Some(Rate::Range(range)) => (None, Some(range.clone()), None),
            Some(Rate::Quantity(quantity)) => (None, None, Some(quantity.clone())),
            None => (None, None, None),
        };

        Self {
            type_: model.type_.clone(),
            dose_range,
            dose_quantity,
            rate_ratio,
            rate_range,
            rate_quantity,
            extensions: model.extensions.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DosageWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    sequence: Option<i32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    additional_instruction: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    patient_instruction: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    timing: Option<TimingWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    as_needed_boolean: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    as_needed_codeable_concept: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    site: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    route: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    method: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    dose_and_rate: Option<Vec<DoseAndRateWire>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_dose_per_period: Option<Ratio>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_dose_per_administration: Option<Quantity>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_dose_per_lifetime: Option<Quantity>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl DosageWire {
    fn into_model(self) -> Result<Dosage> {
        let as_needed = choice::resolve(
            "asNeeded",
            vec![
                ("asNeededBoolean", self.as_needed_boolean.map(AsNeeded::Boolean)),
                (
                    "asNeededCodeableConcept",
                    self.as_needed_codeable_concept.map(AsNeeded::CodeableConcept),
                ),
            ],
        )?;

        Ok(Dosage {
            id: self.id,
            sequence: self.sequence,
            text: self.text,
            additional_instruction: self.additional_instruction,
            patient_instruction: self.patient_instruction,
            timing: self.timing.map(TimingWire::into_model).transpose()?,
            as_needed,
            site: self.site,
            route: self.route,
            method: self.method,
            dose_and_rate: self
                .dose_and_rate
                .map(|entries| {
                    entries
                        .into_iter()
                        .map(DoseAndRateWire::into_model)
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?,
            max_dose_per_period: self.max_dose_per_period,
            max_dose_per_administration: self.max_dose_per_administration,
            max_dose_per_lifetime: self.max_dose_per_lifetime,
            extensions: self.extensions,
        })
    }

    fn from_model(model: &Dosage) -> Self {
        let (as_needed_boolean, as_needed_codeable_concept) = match &model.as_needed {
            Some(AsNeeded::Boolean(flag)) => (Some(*flag), None),
            Some(AsNeeded::CodeableConcept(concept)) => (None, Some(concept.clone())),
            None => (None, None),
        };

        Self {
            id: model.id.clone(),
            sequence: model.sequence,
            text: model.text.clone(),
            additional_instruction: model.additional_instruction.clone(),
            patient_instruction: model.patient_instruction.clone(),
            timing: model.timing.as_ref().map(TimingWire::from_model),
            as_needed_boolean,
            as_needed_codeable_concept,
            site: model.site.clone(),
            route: model.route.clone(),
            method: model.method.clone(),
            dose_and_rate: model
                .dose_and_rate
                .as_ref()
                .map(|entries| entries.iter().map(DoseAndRateWire::from_model).collect()),
            max_dose_per_period: model.max_dose_per_period.clone(),
            max_dose_per_administration: model.max_dose_per_administration.clone(),
            max_dose_per_lifetime: model.max_dose_per_lifetime.clone(),
            extensions: model.extensions.clone(),
        }
    }
}

fn medication_into(
    codeable_concept: Option<CodeableConcept>,
    reference: Option<Reference>,
) -> Result<Medication> {
    choice::require(
        "medication",
        vec![
            (
                "medicationCodeableConcept",
                codeable_concept.map(Medication::CodeableConcept),
            ),
            ("medicationReference", reference.map(Medication::Reference)),
        ],
    )
}

fn medication_from(model: &Medication) -> (Option<CodeableConcept>, Option<Reference>) {
    match model {
        Medication::CodeableConcept(concept) => (Some(concept.clone()), None),
        Medication::Reference(reference) => (None, Some(reference.clone())),
    }
}

fn effective_into(
    date_time: Option<String>,
    period: Option<Period>,
) -> Result<Option<Effective>> {
    choice::resolve(
        "effective",
        vec![
            ("effectiveDateTime", date_time.map(Effective::DateTime)),
            ("effectivePeriod", period.map(Effective::Period)),
        ],
    )
}

fn effective_from(model: &Effective) -> (Option<String>, Option<Period>) {
    match model {
        Effective::DateTime(instant) => (Some(instant.clone()), None),
        Effective::Period(period) => (None, Some(period.clone())),
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MedicationAdministrationWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    instantiates: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    part_of: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status_reason: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    medication_codeable_concept: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    medication_reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    supporting_information: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    effective_date_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    effective_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    performer: Option<Vec<Performer>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason_code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason_reference: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    request: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<Vec<AnnotationWire>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    dosage: Option<DosageWire>,

    #[serde(skip_serializing_if = "Option::is_none")]
    event_history: Option<Vec<Reference>>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl MedicationAdministrationWire {
    pub(crate) fn into_model(self) -> Result<MedicationAdministration> {
        let status_code = self.status.ok_or(Error::MissingField("status"))?;
        let status = MedicationAdministrationStatus::from_code(&status_code).ok_or(
            Error::InvalidEnumValue {
                field: "status",
                value: status_code,
            },
        )?;

        let medication =
            medication_into(self.medication_codeable_concept, self.medication_reference)?;
        // Mandatory for an administration record: the event either happened at
        // a known time or over a known span.
        let effective = effective_into(self.effective_date_time, self.effective_period)?
            .ok_or(Error::ChoiceGroupEmpty { group: "effective" })?;

        Ok(MedicationAdministration {
            id: self.id,
            identifier: self.identifier,
            instantiates: self.instantiates,
            part_of: self.part_of,
            status,
            status_reason: self.status_reason,
            category: self.category,
            medication,
            subject: self.subject,
            context: self.context,
            supporting_information: self.supporting_information,
            effective,
            performer: self.performer,
            reason_code: self.reason_code,
            reason_reference: self.reason_reference,
            request: self.request,
            device: self.device,
            note: annotations_into(self.note)?,
            dosage: self.dosage.map(DosageWire::into_model).transpose()?,
            event_history: self.event_history,
            extensions: self.extensions,
        })
    }

    pub(crate) fn from_model(model: &MedicationAdministration) -> Self {
        let (medication_codeable_concept, medication_reference) =
            medication_from(&model.medication);
        let (effective_date_time, effective_period) = effective_from(&model.effective);

        Self {
            id: model.id.clone(),
            resource_type: "MedicationAdministration".to_string(),
            identifier: model.identifier.clone(),
            instantiates: model.instantiates.clone(),
            part_of: model.part_of.clone(),
            status: Some(model.status.as_code().to_string()),
            status_reason: model.status_reason.clone(),
            category: model.category.clone(),
            medication_codeable_concept,
            medication_reference,
            subject: model.subject.clone(),
            context: model.context.clone(),
            supporting_information: model.supporting_information.clone(),
            effective_date_time,
            effective_period,
            performer: model.performer.clone(),
            reason_code: model.reason_code.clone(),
            reason_reference: model.reason_reference.clone(),
            request: model.request.clone(),
            device: model.device.clone(),
            note: annotations_from(&model.note),
            dosage: model.dosage.as_ref().map(DosageWire::from_model),
            event_history: model.event_history.clone(),
            extensions: model.extensions.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MedicationStatementWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    based_on: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    part_of: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status_reason: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    category: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    medication_codeable_concept: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    medication_reference: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    context: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    effective_date_time: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    effective_period: Option<Period>,

    #[serde(skip_serializing_if = "Option::is_none")]
    date_asserted: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    information_source: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    derived_from: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason_code: Option<Vec<CodeableConcept>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    reason_reference: Option<Vec<Reference>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<Vec<AnnotationWire>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    dosage: Option<Vec<DosageWire>>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl MedicationStatementWire {
    pub(crate) fn into_model(self) -> Result<MedicationStatement> {
        let status_code = self.status.ok_or(Error::MissingField("status"))?;
        let status = MedicationStatementStatus::from_code(&status_code).ok_or(
            Error::InvalidEnumValue {
                field: "status",
                value: status_code,
            },
        )?;

        let medication =
            medication_into(self.medication_codeable_concept, self.medication_reference)?;
        // A statement may record use without knowing when; the group stays
        // optional here.
        let effective = effective_into(self.effective_date_time, self.effective_period)?;

        Ok(MedicationStatement {
            id: self.id,
            identifier: self.identifier,
            based_on: self.based_on,
            part_of: self.part_of,
            status,
            status_reason: self.status_reason,
            category: self.category,
            medication,
            subject: self.subject,
            context: self.context,
            effective,
            date_asserted: self.date_asserted,
            information_source: self.information_source,
            derived_from: self.derived_from,
            reason_code: self.reason_code,
            reason_reference: self.reason_reference,
            note: annotations_into(self.note)?,
            dosage: self
                .dosage
                .map(|dosages| {
                    dosages
                        .into_iter()
                        .map(DosageWire::into_model)
                        .collect::<Result<Vec<_>>>()
                })
                .transpose()?,
            extensions: self.extensions,
        })
    }

    pub(crate) fn from_model(model: &MedicationStatement) -> Self {
        let (medication_codeable_concept, medication_reference) =
            medication_from(&model.medication);
        let (effective_date_time, effective_period) = match &model.effective {
            Some(effective) => {
                let (date_time, period) = effective_from(effective);
                (date_time, period)
            }
            None => (None, None),
        };

        Self {
            id: model.id.clone(),
            resource_type: "MedicationStatement".to_string(),
            identifier: model.identifier.clone(),
            based_on: model.based_on.clone(),
            part_of: model.part_of.clone(),
            status: Some(model.status.as_code().to_string()),
            status_reason: model.status_reason.clone(),
            category: model.category.clone(),
            medication_codeable_concept,
            medication_reference,
            subject: model.subject.clone(),
            context: model.context.clone(),
            effective_date_time,
            effective_period,
            date_asserted: model.date_asserted.clone(),
            information_source: model.information_source.clone(),
            derived_from: model.derived_from.clone(),
            reason_code: model.reason_code.clone(),
            reason_reference: model.reason_reference.clone(),
            note: annotations_from(&model.note),
            dosage: model
                .dosage
                .as_ref()
                .map(|dosages| dosages.iter().map(DosageWire::from_model).collect()),
            extensions: model.extensions.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListWire {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,

    resource_type: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<Vec<Identifier>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    subject: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    encounter: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    date: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<Reference>,

    #[serde(skip_serializing_if = "Option::is_none")]
    ordered_by: Option<CodeableConcept>,

    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<Vec<AnnotationWire>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    entry: Option<Vec<ListEntry>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    empty_reason: Option<CodeableConcept>,

    #[serde(flatten)]
    extensions: Extensions,
}

impl ListWire {
    pub(crate) fn into_model(self) -> Result<List> {
        let status_code = self.status.ok_or(Error::MissingField("status"))?;
        let status = ListStatus::from_code(&status_code).ok_or(Error::InvalidEnumValue {
            field: "status",
            value: status_code,
        })?;

        let mode_code = self.mode.ok_or(Error::MissingField("mode"))?;
        let mode = ListMode::from_code(&mode_code).ok_or(Error::InvalidEnumValue {
            field: "mode",
            value: mode_code,
        })?;

        let list = List {
            id: self.id,
            identifier: self.identifier,
            status,
            mode,
            title: self.title,
            code: self.code,
            subject: self.subject,
            encounter: self.encounter,
            date: self.date,
            source: self.source,
            ordered_by: self.ordered_by,
            note: annotations_into(self.note)?,
            entry: self.entry,
            empty_reason: self.empty_reason,
            extensions: self.extensions,
        };

        // Checked after entries are parsed: a deliberately empty list asserts
        // why it is empty and carries nothing.
        if list.mode == ListMode::Empty
            && (!list.entries().is_empty() || list.empty_reason.is_none())
        {
            return Err(Error::InconsistentListMode);
        }

        Ok(list)
    }

    pub(crate) fn from_model(model: &List) -> Self {
        Self {
            id: model.id.clone(),
            resource_type: "List".to_string(),
            identifier: model.identifier.clone(),
            status: Some(model.status.as_code().to_string()),
            mode: Some(model.mode.as_code().to_string()),
            title: model.title.clone(),
            code: model.code.clone(),
            subject: model.subject.clone(),
            encounter: model.encounter.clone(),
            date: model.date.clone(),
            source: model.source.clone(),
            ordered_by: model.ordered_by.clone(),
            note: annotations_from(&model.note),
            entry: model.entry.clone(),
            empty_reason: model.empty_reason.clone(),
            extensions: model.extensions.clone(),
        }
    }
}

/// Decode a wire value into a model through its twin.
pub(crate) fn from_wire_value<W, M>(value: Value, into_model: fn(W) -> Result<M>) -> Result<M>
where
    W: serde::de::DeserializeOwned,
{
    let wire: W = serde_json::from_value(value).map_err(Error::TypeMismatch)?;
    into_model(wire)
}
