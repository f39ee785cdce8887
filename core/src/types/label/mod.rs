//! Label model: one (field, typed value) assertion attached to a document.
//!
//! A [`Label`] owns its field name, its value and the caller-facing
//! [`ExternalLabel`] it was built from. Ownership of the external strings moves
//! out through [`into_external`] or [`release`]; nothing is ever freed twice.

use crate::types::field::FieldType;
use crate::types::name::FieldName;
use error::LabelError;
use serde::{Deserialize, Serialize};

pub mod error {
    use crate::types::name::FieldNameError;
    use thiserror::Error;

    #[derive(Debug, Error)]
    pub enum LabelError {
        #[error("Invalid field name: {0}")]
        InvalidFieldName(#[from] FieldNameError),

        #[error("Unknown field type code: {0:#x}")]
        UnknownFieldType(u32),

        #[error("Value {value:?} of field {field} is not a number")]
        NotANumber { field: String, value: String },

        #[error("Numeric value of field {field} is not finite")]
        NonFiniteNumber { field: String },
    }
}

/// Value slot of a label. The variant is the field type.
#[derive(Debug, Clone, PartialEq)]
pub enum LabelValue {
    FullText(String),
    Numeric(f64),
    Tag(String),
    /// Recognized, but has no encoding; indexing it fails.
    Geo(String),
}

impl LabelValue {
    pub const fn field_type(&self) -> FieldType {
        match self {
            LabelValue::FullText(_) => FieldType::FullText,
            LabelValue::Numeric(_) => FieldType::Numeric,
            LabelValue::Tag(_) => FieldType::Tag,
            LabelValue::Geo(_) => FieldType::Geo,
        }
    }

    fn render(&self) -> String {
        match self {
            LabelValue::FullText(s) | LabelValue::Tag(s) | LabelValue::Geo(s) => s.clone(),
            LabelValue::Numeric(n) => n.to_string(),
        }
    }
}

/// Caller-facing key/value form of a label.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExternalLabel {
    pub key: String,
    pub value: String,
}

impl ExternalLabel {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    field: FieldName,
    value: LabelValue,
    external: ExternalLabel,
}

/// Create operations.
impl Label {
    /// The external form is derived from the field name and the rendered value.
    pub fn new(field: &str, value: LabelValue) -> Result<Self, LabelError> {
        let field = FieldName::try_from(field)?;
        check_finite(&field, &value)?;

        let external = ExternalLabel::new(field.as_str(), value.render());
        Ok(Self {
            field,
            value,
            external,
        })
    }

    pub fn full_text(field: &str, value: impl Into<String>) -> Result<Self, LabelError> {
        Self::new(field, LabelValue::FullText(value.into()))
    }

    pub fn tag(field: &str, value: impl Into<String>) -> Result<Self, LabelError> {
        Self::new(field, LabelValue::Tag(value.into()))
    }

    pub fn numeric(field: &str, value: f64) -> Result<Self, LabelError> {
        Self::new(field, LabelValue::Numeric(value))
    }

    pub fn geo(field: &str, value: impl Into<String>) -> Result<Self, LabelError> {
        Self::new(field, LabelValue::Geo(value.into()))
    }

    /// Builds a label from a caller-owned pair, keeping the pair as received.
    ///
    /// Numeric values are parsed from the external value string.
    pub fn from_external(
        external: ExternalLabel,
        field_type: FieldType,
    ) -> Result<Self, LabelError> {
        let field = FieldName::try_from(external.key.as_str())?;

        let value = match field_type {
            FieldType::FullText => LabelValue::FullText(external.value.clone()),
            FieldType::Tag => LabelValue::Tag(external.value.clone()),
            FieldType::Geo => LabelValue::Geo(external.value.clone()),
            FieldType::Numeric => {
                let number = external.value.trim().parse::<f64>().map_err(|_| {
                    LabelError::NotANumber {
                        field: field.to_string(),
                        value: external.value.clone(),
                    }
                })?;
                LabelValue::Numeric(number)
            }
        };
        check_finite(&field, &value)?;

        Ok(Self {
            field,
            value,
            external,
        })
    }

    /// Same as [`Label::from_external`], taking a raw field type code.
    pub fn from_external_code(external: ExternalLabel, code: u32) -> Result<Self, LabelError> {
        let field_type = FieldType::try_from(code).map_err(LabelError::UnknownFieldType)?;
        Self::from_external(external, field_type)
    }
}

/// Read operations.
impl Label {
    pub fn field(&self) -> &FieldName {
        &self.field
    }

    pub fn value(&self) -> &LabelValue {
        &self.value
    }

    pub const fn field_type(&self) -> FieldType {
        self.value.field_type()
    }

    pub fn external(&self) -> &ExternalLabel {
        &self.external
    }

    /// Gives up the field and value buffers, keeping only the external pair.
    pub fn into_external(self) -> ExternalLabel {
        self.external
    }
}

fn check_finite(field: &FieldName, value: &LabelValue) -> Result<(), LabelError> {
    match value {
        LabelValue::Numeric(n) if !n.is_finite() => Err(LabelError::NonFiniteNumber {
            field: field.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Moves every label's external pair into a new list. The labels are consumed.
pub fn into_external(labels: Vec<Label>) -> Vec<ExternalLabel> {
    labels.into_iter().map(Label::into_external).collect()
}

/// What [`release`] does with the external strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExternalStrings {
    /// Free them together with the rest of the label.
    Release,
    /// Hand them back; the caller keeps ownership.
    Retain,
}

/// Releases every label's field and value buffers.
///
/// With [`ExternalStrings::Retain`] the external pairs are returned in label
/// order; with [`ExternalStrings::Release`] they are dropped and the returned
/// list is empty.
pub fn release(labels: Vec<Label>, external: ExternalStrings) -> Vec<ExternalLabel> {
    match external {
        ExternalStrings::Release => {
            drop(labels);
            Vec::new()
        }
        ExternalStrings::Retain => into_external(labels),
    }
}
