use serde_json::{Map, Value};

use crate::error::TypeError;

/// Required field naming the device-type collection a payload belongs to.
pub const FIELD_DEVICE_TYPE: &str = "device_type";

/// Required field naming the device the payload configures.
pub const FIELD_DEVICE_NAME: &str = "device_name";

/// A validated device configuration payload.
///
/// Every payload must carry two string fields: [`FIELD_DEVICE_TYPE`] (which
/// device-type collection stores it) and [`FIELD_DEVICE_NAME`] (which device
/// it configures). Everything else is an open bag of arbitrary JSON carried
/// through unchanged. Validation happens once at the boundary, in
/// [`DevicePayload::from_value`]; the rest of the system works with the
/// typed structure.
#[derive(Clone, Debug, PartialEq)]
pub struct DevicePayload {
    pub device_type: String,
    pub device_name: String,
    /// Additional configuration fields, possibly nested.
    pub extra: Map<String, Value>,
}

impl DevicePayload {
    /// Create a payload with no extra fields.
    pub fn new(device_type: impl Into<String>, device_name: impl Into<String>) -> Self {
        Self {
            device_type: device_type.into(),
            device_name: device_name.into(),
            extra: Map::new(),
        }
    }

    /// Builder-style addition of one configuration field.
    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Validate and destructure a raw JSON payload.
    ///
    /// Fails with [`TypeError::NotAnObject`] if the payload is not a JSON
    /// object, or [`TypeError::MissingField`] if either required field is
    /// absent or not a string.
    pub fn from_value(value: Value) -> Result<Self, TypeError> {
        let Value::Object(mut map) = value else {
            return Err(TypeError::NotAnObject);
        };

        let device_type = take_string(&mut map, FIELD_DEVICE_TYPE)?;
        let device_name = take_string(&mut map, FIELD_DEVICE_NAME)?;

        Ok(Self {
            device_type,
            device_name,
            extra: map,
        })
    }

    /// Reconstitute the full JSON mapping, required fields included.
    ///
    /// This is the form that gets stored and deduplicated, so round-tripping
    /// through `from_value` / `to_value` preserves content equality.
    pub fn to_value(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert(
            FIELD_DEVICE_TYPE.to_string(),
            Value::String(self.device_type.clone()),
        );
        map.insert(
            FIELD_DEVICE_NAME.to_string(),
            Value::String(self.device_name.clone()),
        );
        Value::Object(map)
    }
}

fn take_string(map: &mut Map<String, Value>, field: &'static str) -> Result<String, TypeError> {
    match map.remove(field) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(TypeError::MissingField { field }),
    }
}
