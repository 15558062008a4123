use crate::field::FieldDefinition;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field names tried, in order, when a definition does not name its title field.
const NAME_FIELD_CANDIDATES: [&str; 4] = ["name", "title", "subject", "full_name"];

/// The field schema of one object type.
///
/// Loaded once per type and shared read-only (`Arc<EntityDefinition>`) by
/// every entity of that type. On the wire the fields are an array; here they
/// are keyed by name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DefinitionPayload", into = "DefinitionPayload")]
pub struct EntityDefinition {
    obj_type: String,
    title: String,
    list_title: Option<String>,
    fields: BTreeMap<String, FieldDefinition>,
}

#[derive(Serialize, Deserialize)]
struct DefinitionPayload {
    obj_type: String,
    #[serde(default)]
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    list_title: Option<String>,
    #[serde(default)]
    fields: Vec<FieldDefinition>,
}

impl From<DefinitionPayload> for EntityDefinition {
    fn from(payload: DefinitionPayload) -> Self {
        let mut def = EntityDefinition::new(payload.obj_type);
        def.title = payload.title;
        def.list_title = payload.list_title.filter(|t| !t.is_empty());
        for field in payload.fields {
            // Later duplicates replace earlier ones.
            def.fields.insert(field.name.clone(), field);
        }
        def
    }
}

impl From<EntityDefinition> for DefinitionPayload {
    fn from(def: EntityDefinition) -> Self {
        Self {
            obj_type: def.obj_type,
            title: def.title,
            list_title: def.list_title,
            fields: def.fields.into_values().collect(),
        }
    }
}

impl EntityDefinition {
    /// Creates a definition with no fields.
    pub fn new(obj_type: impl Into<String>) -> Self {
        Self {
            obj_type: obj_type.into(),
            title: String::new(),
            list_title: None,
            fields: BTreeMap::new(),
        }
    }

    /// Parses a definition payload as returned by the server.
    pub fn from_payload(payload: serde_json::Value) -> netric_types::Result<Self> {
        Ok(serde_json::from_value(payload)?)
    }

    /// Adds (or replaces) a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDefinition) -> Self {
        self.fields.insert(field.name.clone(), field);
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Names the field used as an entity's display name.
    #[must_use]
    pub fn with_list_title(mut self, field_name: impl Into<String>) -> Self {
        self.list_title = Some(field_name.into());
        self
    }

    pub fn obj_type(&self) -> &str {
        &self.obj_type
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn get_field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.get(name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Fields in name order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.values()
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// The field holding an entity's display name, if any.
    pub fn name_field(&self) -> Option<&FieldDefinition> {
        if let Some(field) = self.list_title.as_deref().and_then(|n| self.get_field(n)) {
            return Some(field);
        }
        NAME_FIELD_CANDIDATES
            .iter()
            .find_map(|name| self.get_field(name))
    }
}
