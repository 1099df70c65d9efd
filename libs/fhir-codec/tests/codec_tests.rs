//! End-to-end decode/encode tests over the three resource kinds

use serde_json::{json, Value};

use dosette_codec::{decode_any, decode_any_value, encode_any, Error, Resource};
use dosette_models::{Effective, ListMode, Medication, MedicationStatementStatus};

fn round_trip(input: Value) -> Value {
    let resource = decode_any_value(input).expect("decode");
    let bytes = encode_any(&resource).expect("encode");
    let output: Value = serde_json::from_slice(&bytes).expect("re-parse");
    // Re-decode to make sure the emitted form is itself valid and equivalent.
    let again = decode_any_value(output.clone()).expect("re-decode");
    assert_eq!(resource, again);
    output
}

#[test]
fn medication_administration_round_trip() {
    let input = json!({
        "id": "ma-1",
        "resourceType": "MedicationAdministration",
        "identifier": [{
            "system": "http://hospital.example.org/administrations",
            "value": "2024-000123"
        }],
        "status": "completed",
        "medicationReference": {
            "reference": "Medication/insulin-glargine",
            "display": "Insulin glargine 100 U/mL"
        },
        "subject": {"reference": "Patient/42"},
        "context": {"reference": "Encounter/icu-7"},
        "effectivePeriod": {
            "start": "2024-05-01T08:00:00Z",
            "end": "2024-05-01T08:05:00Z"
        },
        "performer": [{
            "function": {"text": "administering nurse"},
            "actor": {"reference": "Practitioner/rn-9"}
        }],
        "note": [{
            "authorReference": {"reference": "Practitioner/rn-9"},
            "time": "2024-05-01T08:10:00Z",
            "text": "patient tolerated the injection"
        }],
        "dosage": {
            "text": "10 units subcutaneously",
            "route": {"coding": [{
                "system": "http://snomed.info/sct",
                "code": "34206005",
                "display": "Subcutaneous route"
            }]},
            "doseAndRate": [{
                "doseQuantity": {
                    "value": 10.0,
                    "unit": "U",
                    "system": "http://unitsofmeasure.org",
                    "code": "U"
                }
            }]
        }
    });

    let output = round_trip(input.clone());
    assert_eq!(output, input);
}

#[test]
fn medication_statement_round_trip() {
    let input = json!({
        "id": "ms-1",
        "resourceType": "MedicationStatement",
        "status": "active",
        "medicationCodeableConcept": {
            "coding": [{
                "system": "http://www.nlm.nih.gov/research/umls/rxnorm",
                "code": "1191",
                "display": "Aspirin"
            }],
            "text": "Aspirin 100mg"
        },
        "subject": {"reference": "Patient/42"},
        "effectiveDateTime": "2024-01-01T00:00:00Z",
        "dateAsserted": "2024-02-10T00:00:00Z",
        "informationSource": {"reference": "Patient/42", "display": "self-reported"},
        "dosage": [{
            "sequence": 1,
            "text": "100mg daily with breakfast",
            "asNeededBoolean": false,
            "timing": {
                "repeat": {
                    "boundsDuration": {"value": 30.0, "unit": "d", "code": "d"},
                    "frequency": 1,
                    "period": 1.0,
                    "periodUnit": "d"
                }
            }
        }]
    });

    let output = round_trip(input.clone());
    assert_eq!(output, input);
}

#[test]
fn list_round_trip() {
    let input = json!({
        "id": "current-meds",
        "resourceType": "List",
        "status": "current",
        "mode": "snapshot",
        "title": "Current medications",
        "subject": {"reference": "Patient/42"},
        "date": "2024-06-01T12:00:00Z",
        "entry": [
            {"item": {"reference": "MedicationStatement/ms-1"}},
            {
                "flag": {"text": "stopped last visit"},
                "deleted": true,
                "item": {"reference": "MedicationStatement/ms-0"}
            }
        ]
    });

    let output = round_trip(input.clone());
    assert_eq!(output, input);
}

#[test]
fn absent_and_empty_collections_stay_distinct() {
    // No "note" key at all.
    let without = json!({
        "resourceType": "MedicationStatement",
        "status": "active",
        "medicationCodeableConcept": {"text": "Aspirin"}
    });
    // "note" present but empty.
    let with_empty = json!({
        "resourceType": "MedicationStatement",
        "status": "active",
        "medicationCodeableConcept": {"text": "Aspirin"},
        "note": []
    });

    let decoded_without = decode_any_value(without.clone()).unwrap();
    let decoded_with_empty = decode_any_value(with_empty.clone()).unwrap();
    assert_ne!(decoded_without, decoded_with_empty);

    assert_eq!(round_trip(without.clone()), without);
    assert_eq!(round_trip(with_empty.clone()), with_empty);
}

#[test]
fn unknown_keys_survive_at_any_depth() {
    let input = json!({
        "resourceType": "MedicationAdministration",
        "status": "completed",
        "vendorAuditTrail": {"entries": [{"who": "etl", "at": "2024-05-01"}]},
        "medicationCodeableConcept": {
            "text": "Aspirin",
            "profileHint": ["a", "b"]
        },
        "effectiveDateTime": "2024-05-01T08:00:00Z",
        "dosage": {
            "doseAndRate": [{
                "doseQuantity": {"value": 100.0, "annotationCode": 7}
            }],
            "localFlag": true
        }
    });

    let output = round_trip(input.clone());
    assert_eq!(output, input);
}

#[test]
fn choice_conflicts_fail_for_every_group() {
    let conflicts = [
        // medication
        json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "medicationReference": {"reference": "Medication/aspirin"}
        }),
        // effective
        json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "effectiveDateTime": "2024-01-01T00:00:00Z",
            "effectivePeriod": {"start": "2024-01-01T00:00:00Z"}
        }),
        // asNeeded
        json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "dosage": [{
                "asNeededBoolean": true,
                "asNeededCodeableConcept": {"text": "for headache"}
            }]
        }),
        // bounds
        json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "dosage": [{"timing": {"repeat": {
                "boundsDuration": {"value": 10.0, "code": "d"},
                "boundsRange": {"low": {"value": 1.0}}
            }}}]
        }),
        // author
        json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "note": [{
                "text": "note",
                "authorString": "someone",
                "authorReference": {"reference": "Practitioner/1"}
            }]
        }),
        // rate
        json!({
            "resourceType": "MedicationAdministration",
            "status": "completed",
            "medicationCodeableConcept": {"text": "Heparin"},
            "effectiveDateTime": "2024-01-01T00:00:00Z",
            "dosage": {"doseAndRate": [{
                "rateQuantity": {"value": 5.0},
                "rateRange": {"low": {"value": 1.0}, "high": {"value": 9.0}}
            }]}
        }),
    ];

    for input in conflicts {
        let err = decode_any_value(input).unwrap_err();
        assert!(
            matches!(err, Error::ChoiceGroupConflict { .. }),
            "expected conflict, got {err:?}"
        );
    }
}

#[test]
fn mandatory_medication_group_must_be_populated() {
    let input = json!({
        "resourceType": "MedicationStatement",
        "status": "active"
    });
    let err = decode_any_value(input).unwrap_err();
    assert!(matches!(
        err,
        Error::ChoiceGroupEmpty { group: "medication" }
    ));
}

#[test]
fn administration_requires_an_effective_time() {
    let input = json!({
        "resourceType": "MedicationAdministration",
        "status": "completed",
        "medicationCodeableConcept": {"text": "Aspirin"}
    });
    let err = decode_any_value(input).unwrap_err();
    assert!(matches!(err, Error::ChoiceGroupEmpty { group: "effective" }));

    // A statement may omit it.
    let input = json!({
        "resourceType": "MedicationStatement",
        "status": "active",
        "medicationCodeableConcept": {"text": "Aspirin"}
    });
    match decode_any_value(input).unwrap() {
        Resource::MedicationStatement(statement) => assert!(statement.effective.is_none()),
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn status_enumeration_is_enforced() {
    for code in [
        "in-progress",
        "not-done",
        "on-hold",
        "completed",
        "entered-in-error",
        "stopped",
        "unknown",
    ] {
        let input = json!({
            "resourceType": "MedicationAdministration",
            "status": code,
            "medicationCodeableConcept": {"text": "Aspirin"},
            "effectiveDateTime": "2024-01-01T00:00:00Z"
        });
        assert!(decode_any_value(input).is_ok(), "status {code} must decode");
    }

    let input = json!({
        "resourceType": "MedicationAdministration",
        "status": "paused",
        "medicationCodeableConcept": {"text": "Aspirin"},
        "effectiveDateTime": "2024-01-01T00:00:00Z"
    });
    let err = decode_any_value(input).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidEnumValue { field: "status", value } if value == "paused"
    ));
}

#[test]
fn list_empty_mode_consistency() {
    // Empty mode with entries is inconsistent.
    let input = json!({
        "resourceType": "List",
        "status": "current",
        "mode": "empty",
        "emptyReason": {"text": "nil known"},
        "entry": [{"item": {"reference": "MedicationStatement/ms-1"}}]
    });
    assert!(matches!(
        decode_any_value(input).unwrap_err(),
        Error::InconsistentListMode
    ));

    // Empty mode without a reason is inconsistent too.
    let input = json!({
        "resourceType": "List",
        "status": "current",
        "mode": "empty"
    });
    assert!(matches!(
        decode_any_value(input).unwrap_err(),
        Error::InconsistentListMode
    ));

    // Empty mode, no entries, reason given: fine.
    let input = json!({
        "resourceType": "List",
        "status": "current",
        "mode": "empty",
        "emptyReason": {"text": "nil known"}
    });
    match decode_any_value(input).unwrap() {
        Resource::List(list) => {
            assert_eq!(list.mode, ListMode::Empty);
            assert!(list.entries().is_empty());
        }
        other => panic!("unexpected kind {other:?}"),
    }

    // An unknown mode is an enum error, not a consistency error.
    let input = json!({
        "resourceType": "List",
        "status": "current",
        "mode": "draft"
    });
    assert!(matches!(
        decode_any_value(input).unwrap_err(),
        Error::InvalidEnumValue { field: "mode", .. }
    ));
}

#[test]
fn aspirin_statement_scenario() {
    let input = json!({
        "resourceType": "MedicationStatement",
        "status": "active",
        "medicationCodeableConcept": {"text": "Aspirin"},
        "effectiveDateTime": "2024-01-01T00:00:00Z"
    });

    let statement = match decode_any_value(input.clone()).unwrap() {
        Resource::MedicationStatement(statement) => statement,
        other => panic!("unexpected kind {other:?}"),
    };

    assert_eq!(statement.status, MedicationStatementStatus::Active);
    match &statement.medication {
        Medication::CodeableConcept(concept) => {
            assert_eq!(concept.text.as_deref(), Some("Aspirin"));
        }
        other => panic!("expected concept, got {other:?}"),
    }
    match &statement.effective {
        Some(Effective::DateTime(instant)) => {
            assert_eq!(instant, "2024-01-01T00:00:00Z");
        }
        other => panic!("expected datetime, got {other:?}"),
    }

    // Adding the period alternative turns the same input into a conflict.
    let mut conflicted = input;
    conflicted["effectivePeriod"] = json!({"start": "2024-01-01T00:00:00Z"});
    match decode_any_value(conflicted).unwrap_err() {
        Error::ChoiceGroupConflict { group, populated } => {
            assert_eq!(group, "effective");
            assert_eq!(populated, vec!["effectiveDateTime", "effectivePeriod"]);
        }
        other => panic!("expected conflict, got {other:?}"),
    }
}

#[test]
fn invalid_element_content_aborts_the_whole_decode() {
    // Identifier with a system but no value violates its local invariant.
    let input = json!({
        "resourceType": "MedicationStatement",
        "status": "active",
        "medicationCodeableConcept": {"text": "Aspirin"},
        "identifier": [{"system": "http://hospital.example.org/mrn"}]
    });
    assert!(matches!(
        decode_any_value(input).unwrap_err(),
        Error::Invalid(_)
    ));
}

#[test]
fn decode_via_bytes_api_matches_value_api() {
    let input = json!({
        "resourceType": "List",
        "status": "current",
        "mode": "working",
        "entry": [{"item": {"reference": "MedicationAdministration/ma-1"}}]
    });
    let bytes = serde_json::to_vec(&input).unwrap();
    let from_bytes = decode_any(&bytes).unwrap();
    let from_value = decode_any_value(input).unwrap();
    assert_eq!(from_bytes, from_value);
}
