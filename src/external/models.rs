//! Positional job records served by the external jobs API.
//!
//! The API returns every job as an array `[title, salary, location, skills]`
//! where any position may be missing or `null`.
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub const TITLE_POSITION: usize = 0;
pub const SALARY_POSITION: usize = 1;
pub const LOCATION_POSITION: usize = 2;
pub const SKILLS_POSITION: usize = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("External job record is not an array")]
    NotAnArray,

    #[error("External job record has an unexpected value at position {position}")]
    WrongType { position: usize },
}

/// One external job, decoded from its positional form. `None` means the
/// position was missing or `null`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExternalJobTuple {
    pub title: Option<String>,
    pub salary: Option<f64>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
}

fn present(items: &[Value], position: usize) -> Option<&Value> {
    items.get(position).filter(|v| !v.is_null())
}

fn string_at(items: &[Value], position: usize) -> Result<Option<String>, ShapeError> {
    match present(items, position) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ShapeError::WrongType { position }),
    }
}

fn number_at(items: &[Value], position: usize) -> Result<Option<f64>, ShapeError> {
    match present(items, position) {
        None => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or(ShapeError::WrongType { position }),
    }
}

fn skills_at(items: &[Value], strict: bool) -> Result<Option<Vec<String>>, ShapeError> {
    let wrong_type = ShapeError::WrongType {
        position: SKILLS_POSITION,
    };
    match present(items, SKILLS_POSITION) {
        None => Ok(None),
        Some(Value::Array(values)) => {
            let mut skills = Vec::with_capacity(values.len());
            for value in values {
                match value {
                    Value::String(s) => skills.push(s.clone()),
                    _ if strict => return Err(wrong_type),
                    _ => debug!("Dropping non-string skill {}", value),
                }
            }
            Ok(Some(skills))
        }
        Some(_) => Err(wrong_type),
    }
}

impl ExternalJobTuple {
    /// Strict decoding: any value of the wrong type is an error.
    pub fn parse(value: &Value) -> Result<Self, ShapeError> {
        let items = value.as_array().ok_or(ShapeError::NotAnArray)?;
        Ok(Self {
            title: string_at(items, TITLE_POSITION)?,
            salary: number_at(items, SALARY_POSITION)?,
            location: string_at(items, LOCATION_POSITION)?,
            skills: skills_at(items, true)?,
        })
    }

    /// Decoding that never fails. Records the strict decoder rejects are
    /// salvaged: positions holding the wrong type are treated as absent,
    /// non-string skills are dropped and a record that is not an array
    /// decodes to an all-absent tuple.
    pub fn parse_lenient(value: &Value) -> Self {
        Self::parse(value).unwrap_or_else(|err| {
            debug!("{}, keeping what decodes: {}", err, value);
            Self::salvage(value)
        })
    }

    fn salvage(value: &Value) -> Self {
        let Some(items) = value.as_array() else {
            return Self::default();
        };
        Self {
            title: string_at(items, TITLE_POSITION).unwrap_or_default(),
            salary: number_at(items, SALARY_POSITION).unwrap_or_default(),
            location: string_at(items, LOCATION_POSITION).unwrap_or_default(),
            skills: skills_at(items, false).unwrap_or_default(),
        }
    }
}
