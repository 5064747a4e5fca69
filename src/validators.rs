use std::{borrow::Cow, collections::BTreeMap};

use email_address::EmailAddress;
use serde::{Deserialize, Serialize};
use serde_json::{json, to_value, Value};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ValidationError {
    // The message has the form "<field>:<rule>".
    pub message: Cow<'static, str>,
    pub params: BTreeMap<Cow<'static, str>, Value>,
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let params = to_value(&self.params).unwrap_or_default();
        write!(f, "{}", json!({ "message": self.message, "params": params }))
    }
}

impl ValidationError {
    pub fn new<'a>(message: &'a str) -> Self {
        ValidationError {
            message: Cow::from(message.to_string()),
            params: BTreeMap::new(),
        }
    }
    pub fn add_param<'a, T: Serialize>(&mut self, name: Cow<'a, str>, val: &T) -> Self {
        self.params.insert(name.to_string().into(), to_value(val).unwrap_or_default());
        self.to_owned()
    }
    /// The name of the field that the error belongs to.
    pub fn field(&self) -> &str {
        self.message.split(':').next().unwrap_or_default()
    }
}

pub fn msg_validation(validation_errors: &[ValidationError]) -> String {
    validation_errors.iter().map(|v| format!("{} # ", v.message)).collect()
}

pub struct ValidationChecks {}

impl ValidationChecks {
    /// Checking if a value is present.
    pub fn required<T>(value: Option<&T>, msg: &str) -> Result<(), ValidationError> {
        if value.is_none() {
            let mut err = ValidationError::new(msg);
            err.add_param(Cow::Borrowed("required"), &true);
            return Err(err);
        }
        Ok(())
    }
    /// Checking that the value is a string (or null).
    pub fn string<'a>(value: &'a Value, msg: &str) -> Result<Option<&'a str>, ValidationError> {
        match value {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text.as_str())),
            _ => {
                let mut err = ValidationError::new(msg);
                err.add_param(Cow::Borrowed("string"), &json!({ "actualType": Self::type_name(value) }));
                Err(err)
            }
        }
    }
    /// Checking the length of a string (in characters) with a minimum value.
    pub fn min_length(value: &str, min: usize, msg: &str) -> Result<(), ValidationError> {
        let len: usize = value.chars().count();
        if len < min {
            let mut err = ValidationError::new(msg);
            let json = json!({ "actualLength": len, "requiredLength": min });
            err.add_param(Cow::Borrowed("minlength"), &json);
            return Err(err);
        }
        Ok(())
    }
    /// Checking the length of a string (in characters) with a maximum value.
    pub fn max_length(value: &str, max: usize, msg: &str) -> Result<(), ValidationError> {
        let len: usize = value.chars().count();
        if max < len {
            let mut err = ValidationError::new(msg);
            let json = json!({ "actualLength": len, "requiredLength": max });
            err.add_param(Cow::Borrowed("maxlength"), &json);
            return Err(err);
        }
        Ok(())
    }
    /// Checking whether the string matches the email structure.
    pub fn email(value: &str, msg: &str) -> Result<(), ValidationError> {
        if !EmailAddress::is_valid(value) {
            let mut err = ValidationError::new(msg);
            err.add_param(Cow::Borrowed("email"), &true);
            return Err(err);
        }
        Ok(())
    }
    /// Checking that the value is not used by another record.
    pub fn unique(is_unique: bool, msg: &str) -> Result<(), ValidationError> {
        if !is_unique {
            let mut err = ValidationError::new(msg);
            err.add_param(Cow::Borrowed("unique"), &true);
            return Err(err);
        }
        Ok(())
    }

    fn type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
