use crate::error::FormError;
use crate::mask::InputMask;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One question as declared in the fields document. Passive data;
/// behavior is resolved into a [`Question`] at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub required: bool,
    /// Enumerable only: option key to display string.
    #[serde(default)]
    pub values: BTreeMap<String, String>,
    #[serde(default)]
    pub allow_multiple_value: bool,
    /// Declared by the document format but unused by rendering.
    #[serde(default)]
    pub allow_custom_value: bool,
    /// Placeholder text of the sentinel option on single selects.
    #[serde(default)]
    pub mask: Option<String>,
}

/// One selectable option of an enumerable field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumOption {
    pub key: String,
    pub label: String,
}

/// Closed set of field flavors. Resolved once per field so no call
/// site ever re-branches on the raw type string.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    SmallText,
    BigText,
    LatLng,
    Email,
    Phone { mask: InputMask },
    EnumerableSingle {
        placeholder: String,
        options: Vec<EnumOption>,
    },
    EnumerableMulti { options: Vec<EnumOption> },
    /// Anything the document declares that this renderer does not
    /// recognize. Renders empty, validates clean, extracts null.
    Unsupported,
}

impl FieldKind {
    pub fn is_text_like(&self) -> bool {
        matches!(
            self,
            FieldKind::SmallText
                | FieldKind::BigText
                | FieldKind::LatLng
                | FieldKind::Email
                | FieldKind::Phone { .. }
        )
    }
}

/// A field with its kind resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl Question {
    pub fn resolve(field: &FieldSchema) -> Question {
        let kind = match field.field_type.as_str() {
            "small_text" => FieldKind::SmallText,
            "big_text" => FieldKind::BigText,
            "lat_lng" => FieldKind::LatLng,
            "email" => FieldKind::Email,
            "phone" => FieldKind::Phone {
                mask: InputMask::cellphone(),
            },
            "enumerable" => {
                let options = field
                    .values
                    .iter()
                    .map(|(key, label)| EnumOption {
                        key: key.clone(),
                        label: label.clone(),
                    })
                    .collect();
                if field.allow_multiple_value {
                    FieldKind::EnumerableMulti { options }
                } else {
                    FieldKind::EnumerableSingle {
                        placeholder: field.mask.clone().unwrap_or_default(),
                        options,
                    }
                }
            }
            _ => FieldKind::Unsupported,
        };

        Question {
            name: field.name.clone(),
            label: field.label.clone(),
            placeholder: field.placeholder.clone(),
            required: field.required,
            kind,
        }
    }

    pub fn resolve_all(fields: &[FieldSchema]) -> Vec<Question> {
        fields.iter().map(Question::resolve).collect()
    }
}

/// The two field lists of a briefing document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub request_fields: Vec<FieldSchema>,
    #[serde(default)]
    pub user_fields: Vec<FieldSchema>,
}

impl FormSchema {
    pub fn from_json(source: &str) -> Result<Self, FormError> {
        let raw: Value = serde_json::from_str(source)
            .map_err(|e| FormError::new("schema.parse", format!("invalid fields document: {e}")))?;
        Self::from_value(raw)
    }

    pub fn from_value(value: Value) -> Result<Self, FormError> {
        serde_json::from_value(value)
            .map_err(|e| FormError::new("schema.parse", format!("invalid fields document: {e}")))
    }

    /// Unwraps the `_embedded` envelope a fields endpoint responds with.
    pub fn from_embedded(raw: &Value) -> Result<Self, FormError> {
        let embedded = raw.get("_embedded").ok_or_else(|| {
            FormError::new("schema.envelope", "fields document has no `_embedded` entry")
        })?;
        Self::from_value(embedded.clone())
    }

    /// Accepts either a bare schema or the `_embedded` envelope.
    pub fn from_document(source: &str) -> Result<Self, FormError> {
        let raw: Value = serde_json::from_str(source)
            .map_err(|e| FormError::new("schema.parse", format!("invalid fields document: {e}")))?;
        if raw.get("_embedded").is_some() {
            Self::from_embedded(&raw)
        } else {
            Self::from_value(raw)
        }
    }
}
