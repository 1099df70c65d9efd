//! Wire codec for FHIR medication records
//!
//! Converts between the in-memory model (`dosette-models`) and the JSON
//! exchange encoding, enforcing the structural rules on decode:
//!
//! - the `resourceType` discriminator must match the expected type;
//! - status/mode codes must belong to their fixed enumerations (the literal
//!   `"unknown"` is a reserved member, valid where the format defines it);
//! - every choice group resolves through one uniform routine ([`choice`]);
//! - a field that is absent stays distinguishable from one that is present
//!   but empty, and encode never reintroduces absent fields;
//! - unrecognized content never errors; it is preserved verbatim in each
//!   element's extension carrier and re-emitted on encode.
//!
//! The codec holds no state: each decode or encode call is an independent,
//! pure computation, safe to run concurrently on distinct inputs.

pub mod choice;
pub mod error;
mod wire;

use serde_json::Value;

use dosette_models::{List, MedicationAdministration, MedicationStatement};

pub use error::{Error, Result};

use wire::{ListWire, MedicationAdministrationWire, MedicationStatementWire};

/// A resource kind the codec understands
pub trait ResourceCodec: Sized {
    /// Fixed value of the `resourceType` discriminator.
    const TYPE_NAME: &'static str;

    /// Decode from an already-parsed JSON value, running the full structural
    /// validation pipeline.
    fn decode_value(value: Value) -> Result<Self>;

    /// Encode to a JSON value; the structural inverse of [`decode_value`].
    ///
    /// [`decode_value`]: ResourceCodec::decode_value
    fn encode_value(&self) -> Result<Value>;
}

impl ResourceCodec for MedicationAdministration {
    const TYPE_NAME: &'static str = "MedicationAdministration";

    fn decode_value(value: Value) -> Result<Self> {
        check_envelope(&value, Self::TYPE_NAME)?;
        let model = wire::from_wire_value(value, MedicationAdministrationWire::into_model)?;
        model.validate()?;
        Ok(model)
    }

    fn encode_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(
            MedicationAdministrationWire::from_model(self),
        )?)
    }
}

impl ResourceCodec for MedicationStatement {
    const TYPE_NAME: &'static str = "MedicationStatement";

    fn decode_value(value: Value) -> Result<Self> {
        check_envelope(&value, Self::TYPE_NAME)?;
        let model = wire::from_wire_value(value, MedicationStatementWire::into_model)?;
        model.validate()?;
        Ok(model)
    }

    fn encode_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(MedicationStatementWire::from_model(
            self,
        ))?)
    }
}

impl ResourceCodec for List {
    const TYPE_NAME: &'static str = "List";

    fn decode_value(value: Value) -> Result<Self> {
        check_envelope(&value, Self::TYPE_NAME)?;
        let model = wire::from_wire_value(value, ListWire::into_model)?;
        model.validate()?;
        Ok(model)
    }

    fn encode_value(&self) -> Result<Value> {
        Ok(serde_json::to_value(ListWire::from_model(self))?)
    }
}

/// Decode a resource of a known kind from raw bytes.
pub fn decode<R: ResourceCodec>(bytes: &[u8]) -> Result<R> {
    let value: Value = serde_json::from_slice(bytes)?;
    R::decode_value(value)
}

/// Encode a resource to bytes.
pub fn encode<R: ResourceCodec>(resource: &R) -> Result<Vec<u8>> {
    let value = resource.encode_value()?;
    Ok(serde_json::to_vec(&value)?)
}

/// Any resource kind the codec understands
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    MedicationAdministration(MedicationAdministration),
    MedicationStatement(MedicationStatement),
    List(List),
}

impl Resource {
    /// The resource kinds this codec can dispatch on.
    pub const SUPPORTED: [&'static str; 3] = [
        MedicationAdministration::TYPE_NAME,
        MedicationStatement::TYPE_NAME,
        List::TYPE_NAME,
    ];

    pub fn type_name(&self) -> &'static str {
        match self {
            Resource::MedicationAdministration(_) => MedicationAdministration::TYPE_NAME,
            Resource::MedicationStatement(_) => MedicationStatement::TYPE_NAME,
            Resource::List(_) => List::TYPE_NAME,
        }
    }

    pub fn encode_value(&self) -> Result<Value> {
        match self {
            Resource::MedicationAdministration(resource) => resource.encode_value(),
            Resource::MedicationStatement(resource) => resource.encode_value(),
            Resource::List(resource) => resource.encode_value(),
        }
    }
}

/// Decode any supported resource, dispatching on the `resourceType`
/// discriminator.
pub fn decode_any(bytes: &[u8]) -> Result<Resource> {
    let value: Value = serde_json::from_slice(bytes)?;
    decode_any_value(value)
}

/// [`decode_any`] over an already-parsed value.
pub fn decode_any_value(value: Value) -> Result<Resource> {
    match envelope_type(&value)? {
        t if t == MedicationAdministration::TYPE_NAME => Ok(Resource::MedicationAdministration(
            MedicationAdministration::decode_value(value)?,
        )),
        t if t == MedicationStatement::TYPE_NAME => Ok(Resource::MedicationStatement(
            MedicationStatement::decode_value(value)?,
        )),
        t if t == List::TYPE_NAME => Ok(Resource::List(List::decode_value(value)?)),
        other => Err(Error::UnsupportedResourceType(other.to_string())),
    }
}

/// Decode with an out-of-band type hint (e.g. a request path segment).
///
/// The hint must name a supported kind and must agree with the envelope's own
/// discriminator; a disagreement is a [`Error::ResourceTypeMismatch`], never a
/// silent re-dispatch.
pub fn decode_hinted(bytes: &[u8], expected: &str) -> Result<Resource> {
    if !Resource::SUPPORTED.contains(&expected) {
        return Err(Error::UnsupportedResourceType(expected.to_string()));
    }

    let value: Value = serde_json::from_slice(bytes)?;
    let found = envelope_type(&value)?;
    if found != expected {
        return Err(Error::ResourceTypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }

    decode_any_value(value)
}

/// Encode any resource to bytes.
pub fn encode_any(resource: &Resource) -> Result<Vec<u8>> {
    let value = resource.encode_value()?;
    Ok(serde_json::to_vec(&value)?)
}

fn envelope_type(value: &Value) -> Result<&str> {
    let object = value.as_object().ok_or(Error::ExpectedObject)?;
    object
        .get("resourceType")
        .and_then(Value::as_str)
        .ok_or(Error::MissingField("resourceType"))
}

fn check_envelope(value: &Value, expected: &'static str) -> Result<()> {
    let found = envelope_type(value)?;
    if found != expected {
        return Err(Error::ResourceTypeMismatch {
            expected: expected.to_string(),
            found: found.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_must_be_an_object() {
        let err = decode_any(b"[1, 2, 3]").unwrap_err();
        assert!(matches!(err, Error::ExpectedObject));
    }

    #[test]
    fn envelope_must_carry_a_resource_type() {
        let err = decode_any(b"{\"status\": \"active\"}").unwrap_err();
        assert!(matches!(err, Error::MissingField("resourceType")));
    }

    #[test]
    fn unsupported_kind_is_reported() {
        let bytes = serde_json::to_vec(&json!({"resourceType": "Patient"})).unwrap();
        let err = decode_any(&bytes).unwrap_err();
        assert!(matches!(err, Error::UnsupportedResourceType(t) if t == "Patient"));
    }

    #[test]
    fn hint_disagreement_is_a_mismatch() {
        let bytes = serde_json::to_vec(&json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"}
        }))
        .unwrap();

        let err = decode_hinted(&bytes, "List").unwrap_err();
        assert!(matches!(
            err,
            Error::ResourceTypeMismatch { expected, found }
                if expected == "List" && found == "MedicationStatement"
        ));

        assert!(decode_hinted(&bytes, "MedicationStatement").is_ok());
    }

    #[test]
    fn malformed_bytes_are_a_json_error() {
        let err = decode_any(b"{not json").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }

    #[test]
    fn wrong_primitive_shape_is_a_type_mismatch() {
        let bytes = serde_json::to_vec(&json!({
            "resourceType": "MedicationStatement",
            "status": "active",
            "medicationCodeableConcept": {"text": "Aspirin"},
            "dosage": [{"doseAndRate": [{"doseQuantity": {"value": "one hundred"}}]}]
        }))
        .unwrap();

        let err = decode_any(&bytes).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(_)));
    }
}
