//! Object references.
//!
//! A reference to another entity travels as a single string token of the
//! form `obj_type:id` or `obj_type:id:label`. Only the first two separators
//! are significant, so a label may itself contain `:`.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Separator between the segments of a reference token.
pub const OBJ_REF_SEPARATOR: char = ':';

/// A decoded `obj_type:id:label` reference.
///
/// Decoding is best-effort: a token without an id segment still yields the
/// object type, and the label is optional.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ObjRef {
    /// The referenced object type (e.g. "user", "customer").
    pub obj_type: String,
    /// The referenced entity id, if the token carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display label, if the token carried one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ObjRef {
    /// Creates a reference without a label.
    pub fn new(obj_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            obj_type: obj_type.into(),
            id: Some(id.into()),
            name: None,
        }
    }

    /// Attaches a display label.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns the canonical token for this reference.
    pub fn encode(&self) -> String {
        encode_obj_ref(
            &self.obj_type,
            self.id.as_deref().unwrap_or_default(),
            self.name.as_deref(),
        )
    }
}

impl fmt::Display for ObjRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl FromStr for ObjRef {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(decode_obj_ref(s))
    }
}

/// Encodes a reference token. An empty label is left out.
pub fn encode_obj_ref(obj_type: &str, id: &str, label: Option<&str>) -> String {
    match label {
        Some(label) if !label.is_empty() => {
            format!("{obj_type}{OBJ_REF_SEPARATOR}{id}{OBJ_REF_SEPARATOR}{label}")
        }
        _ => format!("{obj_type}{OBJ_REF_SEPARATOR}{id}"),
    }
}

/// Decodes a reference token.
///
/// Never fails: missing or empty segments come back as `None`.
pub fn decode_obj_ref(token: &str) -> ObjRef {
    let mut parts = token.splitn(3, OBJ_REF_SEPARATOR);
    let obj_type = parts.next().unwrap_or_default().to_string();
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    let id = parts.next().and_then(non_empty);
    let name = parts.next().and_then(non_empty);

    ObjRef { obj_type, id, name }
}
