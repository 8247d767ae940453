use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::cash_out::{AccountType, EmvType, KeyType, OwnerType};
use super::records::OperationalError;
use super::selector::{Operation, OperationSelector, Resource};

/// An option field: a closed set of wire values with a form default.
pub trait ParameterOption: DeserializeOwned + Default {
    const OPTIONS: &'static [&'static str];
}

impl ParameterOption for AccountType {
    const OPTIONS: &'static [&'static str] = &["CACC", "TRAN", "SLRY", "SVGS"];
}

impl ParameterOption for EmvType {
    const OPTIONS: &'static [&'static str] = &["STATIC_QRCODE", "IMMEDIATE_QRCODE", "DUEDATE_QRCODE"];
}

impl ParameterOption for KeyType {
    const OPTIONS: &'static [&'static str] = &["EVP", "CPF", "CNPJ", "EMAIL", "PHONE"];
}

impl ParameterOption for OwnerType {
    const OPTIONS: &'static [&'static str] = &["NATURAL_PERSON", "LEGAL_PERSON"];
}

/// Named parameter values of one input item, as supplied by the host.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct ItemParameters(Map<String, Value>);

impl ItemParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.0.insert(name.to_string(), value.into());
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        self.0.insert(name.to_string(), value.into());
    }

    fn value(&self, name: &str) -> Option<&Value> {
        match self.0.get(name) {
            None | Some(Value::Null) => None,
            Some(v) => Some(v),
        }
    }

    /// Selector with the form defaults for missing values.
    pub fn selector(&self) -> Result<OperationSelector, OperationalError> {
        let resource = self.string_or("resource", Resource::default().as_str())?;
        let operation = self.string_or("operation", Operation::default().as_str())?;

        Ok(OperationSelector::new(resource, operation))
    }

    /// Missing strings read as empty.
    pub fn string(&self, name: &str) -> Result<String, OperationalError> {
        self.string_or(name, "")
    }

    /// Any value rendered as text: strings verbatim, other values as JSON.
    pub fn text(&self, name: &str) -> String {
        match self.value(name) {
            None => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(v) => v.to_string(),
        }
    }

    fn string_or(&self, name: &str, default: &str) -> Result<String, OperationalError> {
        match self.value(name) {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(_) => Err(invalid(name, "a string")),
        }
    }

    /// Integral numbers only; `5.0` is accepted, `5.5` is not.
    pub fn integer(&self, name: &str, default: i64) -> Result<i64, OperationalError> {
        let value = match self.value(name) {
            None => return Ok(default),
            Some(v) => v,
        };

        if let Some(n) = value.as_i64() {
            return Ok(n);
        }

        match value.as_f64() {
            Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
                Ok(f as i64)
            }
            _ => Err(invalid(name, "an integer")),
        }
    }

    pub fn option<T: ParameterOption>(&self, name: &str) -> Result<T, OperationalError> {
        match self.value(name) {
            None => Ok(T::default()),
            Some(v) => serde_json::from_value(v.clone())
                .map_err(|_| invalid(name, &format!("one of {}", T::OPTIONS.join(", ")))),
        }
    }
}

impl From<Map<String, Value>> for ItemParameters {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn invalid(name: &str, expected: &str) -> OperationalError {
    OperationalError::InvalidParameter {
        name: name.to_string(),
        expected: expected.to_string(),
    }
}
