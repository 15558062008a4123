use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The data type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    #[serde(alias = "string")]
    Text,
    Number,
    Integer,
    Bool,
    Date,
    Timestamp,
    /// Single value resolved against a grouping list.
    Fkey,
    /// Set of grouping ids.
    FkeyMulti,
    /// Reference to another entity.
    Object,
    /// Set of references to other entities.
    ObjectMulti,
    Alias,
    #[serde(other)]
    Unknown,
}

impl FieldType {
    /// `fkey_multi` and `object_multi` hold arrays.
    pub fn is_multi(self) -> bool {
        matches!(self, Self::FkeyMulti | Self::ObjectMulti)
    }

    /// Reference types may carry display labels alongside their ids.
    pub fn is_reference(self) -> bool {
        matches!(
            self,
            Self::Fkey | Self::FkeyMulti | Self::Object | Self::ObjectMulti
        )
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::Timestamp)
    }
}

/// Lifecycle event that triggers a default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultOn {
    Create,
    Update,
    Null,
    Delete,
    #[serde(other)]
    Unknown,
}

/// A default-value rule: apply `value` when `on` fires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultValue {
    pub on: DefaultOn,
    #[serde(default)]
    pub value: Value,
}

/// Describes one field of an object type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(
        default,
        deserialize_with = "crate::value::deserialize_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Unique within the owning definition.
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Referenced object type for `object`/`object_multi`, grouping name
    /// for `fkey`/`fkey_multi`. Empty for object fields that may point at
    /// any type.
    #[serde(default)]
    pub subtype: String,
    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
    #[serde(default)]
    pub readonly: bool,
    #[serde(default)]
    pub required: bool,
}

impl FieldDefinition {
    /// Creates a field with no subtype and no default.
    pub fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            id: None,
            name: name.into(),
            title: String::new(),
            field_type,
            subtype: String::new(),
            default_value: None,
            readonly: false,
            required: false,
        }
    }

    /// Shorthand for a text field.
    pub fn text(name: &str) -> Self {
        Self::new(name, FieldType::Text)
    }

    /// Shorthand for a numeric field.
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Shorthand for a boolean field.
    pub fn bool(name: &str) -> Self {
        Self::new(name, FieldType::Bool)
    }

    /// Shorthand for a date field.
    pub fn date(name: &str) -> Self {
        Self::new(name, FieldType::Date)
    }

    /// Shorthand for a timestamp field.
    pub fn timestamp(name: &str) -> Self {
        Self::new(name, FieldType::Timestamp)
    }

    /// Shorthand for a grouping reference.
    pub fn fkey(name: &str, grouping: &str) -> Self {
        Self::new(name, FieldType::Fkey).with_subtype(grouping)
    }

    /// Shorthand for a multi-valued grouping reference.
    pub fn fkey_multi(name: &str, grouping: &str) -> Self {
        Self::new(name, FieldType::FkeyMulti).with_subtype(grouping)
    }

    /// Shorthand for an entity reference. An empty `obj_type` accepts any type.
    pub fn object(name: &str, obj_type: &str) -> Self {
        Self::new(name, FieldType::Object).with_subtype(obj_type)
    }

    /// Shorthand for a multi-valued entity reference.
    pub fn object_multi(name: &str, obj_type: &str) -> Self {
        Self::new(name, FieldType::ObjectMulti).with_subtype(obj_type)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_subtype(mut self, subtype: &str) -> Self {
        self.subtype = subtype.into();
        self
    }

    /// Attaches a default-value rule.
    pub fn with_default(mut self, on: DefaultOn, value: impl Into<Value>) -> Self {
        self.default_value = Some(DefaultValue {
            on,
            value: value.into(),
        });
        self
    }

    /// Whether this field has a default for `event`.
    pub fn default_for(&self, event: DefaultOn) -> Option<&Value> {
        self.default_value
            .as_ref()
            .filter(|d| d.on == event)
            .map(|d| &d.value)
    }
}
