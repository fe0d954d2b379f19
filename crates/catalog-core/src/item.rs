//! Item domain types and scalar field validation.
//!
//! Requests arrive as an [`ItemForm`] whose fields are untyped JSON values.
//! [`ItemForm::validate`] turns it into a typed [`ItemInput`] or fails with
//! [`Error::Validation`]; the image payload is left encoded for the ingestion
//! step. The store only ever sees an [`ItemDraft`], the complete desired
//! state of a row.

use serde::Deserialize;
use serde_json::Value;

use crate::{Error, Result};

/// Maximum length of an item name, in characters.
pub const MAX_NAME_CHARS: usize = 100;

/// Maximum length of an item description, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// Raw create/update request body.
///
/// Every field is kept as a JSON value so that a wrong type is reported as a
/// validation failure instead of a body-parsing failure.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct ItemForm {
    #[schema(value_type = String)]
    pub name: Option<Value>,
    #[schema(value_type = String)]
    pub description: Option<Value>,
    #[schema(value_type = i64)]
    pub price: Option<Value>,
    /// Base64-encoded image bytes. Omitted, `null`, or `""` means no image.
    #[schema(value_type = Option<String>)]
    pub img: Option<Value>,
}

/// Scalar fields that passed validation, plus the still-encoded image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub img: Option<String>,
}

/// Image attached to an item. The MIME type and the bytes only ever travel
/// together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemImage {
    pub mime: String,
    pub data: Vec<u8>,
}

/// Complete desired state of an item, applied by the store in one write.
///
/// `image: None` clears any stored image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
    pub price: i64,
    pub image: Option<ItemImage>,
}

impl ItemForm {
    /// Validate the scalar fields.
    ///
    /// Strings are trimmed before checking. The image payload is not
    /// inspected beyond its JSON type.
    pub fn validate(&self) -> Result<ItemInput> {
        let name = required_string("name", self.name.as_ref(), MAX_NAME_CHARS)?;
        let description =
            required_string("description", self.description.as_ref(), MAX_DESCRIPTION_CHARS)?;
        let price = required_price(self.price.as_ref())?;

        let img = match &self.img {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(Value::String(s)) => Some(s.trim().to_string()),
            Some(_) => return Err(Error::Validation("img must be a base64 string".into())),
        };

        Ok(ItemInput {
            name,
            description,
            price,
            img,
        })
    }
}

impl ItemInput {
    /// Attach the ingested image (or none) to produce the row to persist.
    pub fn into_draft(self, image: Option<ItemImage>) -> ItemDraft {
        ItemDraft {
            name: self.name,
            description: self.description,
            price: self.price,
            image,
        }
    }
}

fn required_string(field: &str, value: Option<&Value>, max_chars: usize) -> Result<String> {
    let s = match value {
        None | Some(Value::Null) => {
            return Err(Error::Validation(format!("{field} is required")));
        }
        Some(Value::String(s)) => s.trim(),
        Some(_) => return Err(Error::Validation(format!("{field} must be a string"))),
    };

    if s.is_empty() {
        return Err(Error::Validation(format!("{field} is required")));
    }

    if s.chars().count() > max_chars {
        return Err(Error::Validation(format!(
            "{field} may not be greater than {max_chars} characters"
        )));
    }

    Ok(s.to_string())
}

fn required_price(value: Option<&Value>) -> Result<i64> {
    let price = match value {
        None | Some(Value::Null) => return Err(Error::Validation("price is required".into())),
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().and_then(integral_f64)),
        Some(Value::String(s)) if s.trim().is_empty() => {
            return Err(Error::Validation("price is required".into()));
        }
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        Some(_) => None,
    };

    match price {
        Some(p) if p < 0 => Err(Error::Validation("price must be at least 0".into())),
        Some(p) => Ok(p),
        None => Err(Error::Validation("price must be an integer".into())),
    }
}

/// `500.0` and `1e2` are integers; `2.5` and out-of-range values are not.
fn integral_f64(f: f64) -> Option<i64> {
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}
