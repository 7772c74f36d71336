use serde::Deserialize;

use crate::{Error, Result};

/// A degree value as clients send it: a JSON number or a numeric string.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    /// Converts to a finite `f64`. `field` names the value in error messages.
    pub fn to_f64(&self, field: &str) -> Result<f64> {
        let value = match self {
            Self::Number(v) => *v,
            Self::Text(s) => s.trim().parse::<f64>().map_err(|_| {
                Error::invalid_input(format!("{field} is not a number: {s:?}"))
            })?,
        };

        if !value.is_finite() {
            return Err(Error::invalid_input(format!("{field} must be finite")));
        }
        Ok(value)
    }
}

impl From<f64> for Degrees {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for Degrees {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Degrees {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}
