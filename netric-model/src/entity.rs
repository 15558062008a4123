use crate::LABEL_SUFFIX;
use crate::definition::EntityDefinition;
use crate::field::{DefaultOn, FieldDefinition, FieldType};
use crate::member::MemberEntities;
use crate::value::{id_from_value, is_empty_value, same_key, value_key};
use netric_types::decode_obj_ref;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::trace;

/// Display label of one id in a multi-valued field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueLabel {
    pub key: Value,
    pub value: String,
}

impl ValueLabel {
    pub fn new(key: impl Into<Value>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Labels stored for one field.
#[derive(Debug, Clone, PartialEq)]
enum FieldLabel {
    Single(String),
    Multi(Vec<ValueLabel>),
}

/// One business-object record.
///
/// Values are kept raw (`serde_json::Value`) and interpreted through the
/// shared [`EntityDefinition`]. Writes to fields the definition does not
/// know are ignored.
#[derive(Debug, Clone)]
pub struct Entity {
    definition: Arc<EntityDefinition>,
    id: Option<String>,
    values: HashMap<String, Value>,
    labels: HashMap<String, FieldLabel>,
    members: HashMap<String, MemberEntities>,
}

impl Entity {
    /// Creates a blank entity.
    pub fn new(definition: Arc<EntityDefinition>) -> Self {
        Self {
            definition,
            id: None,
            values: HashMap::new(),
            labels: HashMap::new(),
            members: HashMap::new(),
        }
    }

    /// Creates a blank entity with its `create` defaults applied.
    pub fn create(definition: Arc<EntityDefinition>) -> Self {
        let mut entity = Self::new(definition);
        entity.set_default_values(DefaultOn::Create, None);
        entity
    }

    /// Creates an entity hydrated from a JSON record.
    pub fn from_json(definition: Arc<EntityDefinition>, json: &str) -> netric_types::Result<Self> {
        let record = match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => map,
            other => {
                return Err(netric_types::Error::InvalidPayload(format!(
                    "expected an entity record, got {other}"
                )));
            }
        };
        let mut entity = Self::new(definition);
        entity.load_data(&record);
        Ok(entity)
    }

    pub fn definition(&self) -> &Arc<EntityDefinition> {
        &self.definition
    }

    pub fn obj_type(&self) -> &str {
        self.definition.obj_type()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        self.id = (!id.is_empty()).then_some(id);
    }

    /// True until the entity has been saved and received an id.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }

    /// Display name taken from the definition's name field.
    pub fn get_name(&self) -> Option<String> {
        let field = self.definition.name_field()?;
        self.get_value(&field.name).map(value_key)
    }

    // ── Values ───────────────────────────────────────────────────

    /// Sets a field's raw value, with an optional display label for
    /// reference fields.
    ///
    /// Multi-valued fields always store an array: a scalar is wrapped and
    /// null becomes `[]`. An empty label counts as no label.
    pub fn set_value(&mut self, field_name: &str, value: impl Into<Value>, label: Option<&str>) {
        let label = label.filter(|l| !l.is_empty());
        let Some(field) = self.definition.get_field(field_name) else {
            trace!(obj_type = self.obj_type(), field_name, "ignoring unknown field");
            return;
        };
        let field_type = field.field_type;
        let value = value.into();

        if field_type.is_multi() {
            let items = match value {
                Value::Array(items) => items,
                Value::Null => Vec::new(),
                single => vec![single],
            };
            self.retain_multi_labels(field_name, &items);
            if let (Some(label), [only]) = (label, items.as_slice()) {
                self.put_multi_label(field_name, only.clone(), label);
            }
            self.values.insert(field_name.to_string(), Value::Array(items));
            return;
        }

        if field_type.is_reference() {
            match label {
                Some(label) => {
                    self.labels
                        .insert(field_name.to_string(), FieldLabel::Single(label.to_string()));
                }
                None => {
                    let unchanged = self
                        .values
                        .get(field_name)
                        .is_some_and(|current| same_key(current, &value));
                    if !unchanged {
                        self.labels.remove(field_name);
                    }
                }
            }
        }
        self.values.insert(field_name.to_string(), value);
    }

    /// Returns a field's raw value, or `None` when unset.
    pub fn get_value(&self, field_name: &str) -> Option<&Value> {
        self.values.get(field_name).filter(|v| !v.is_null())
    }

    /// Returns a single display label.
    ///
    /// Scalar reference fields return their label and ignore `key`. Multi
    /// fields return the label of `key`; without a key they return `None`,
    /// use [`get_value_names`](Entity::get_value_names) for the full list.
    pub fn get_value_name(&self, field_name: &str, key: Option<&Value>) -> Option<&str> {
        match self.labels.get(field_name)? {
            FieldLabel::Single(label) => Some(label),
            FieldLabel::Multi(labels) => {
                let key = key?;
                labels
                    .iter()
                    .find(|l| same_key(&l.key, key))
                    .map(|l| l.value.as_str())
            }
        }
    }

    /// All labels of a multi field, in value order.
    pub fn get_value_names(&self, field_name: &str) -> &[ValueLabel] {
        match self.labels.get(field_name) {
            Some(FieldLabel::Multi(labels)) => labels,
            _ => &[],
        }
    }

    /// Adds an id to a multi field. Returns false, leaving the stored
    /// label untouched, when the id is already present.
    pub fn add_multi_value(&mut self, field_name: &str, id: impl Into<Value>, label: Option<&str>) -> bool {
        if !self.is_multi_field(field_name) {
            trace!(obj_type = self.obj_type(), field_name, "not a multi field");
            return false;
        }
        let id = id.into();
        let mut items = match self.values.remove(field_name) {
            Some(Value::Array(items)) => items,
            None | Some(Value::Null) => Vec::new(),
            Some(single) => vec![single],
        };
        let present = items.iter().any(|existing| same_key(existing, &id));
        if !present {
            items.push(id.clone());
        }
        self.values.insert(field_name.to_string(), Value::Array(items));
        if present {
            return false;
        }
        if let Some(label) = label {
            self.put_multi_label(field_name, id, label);
        }
        true
    }

    /// Removes an id from a multi field. Returns whether it was present.
    pub fn rem_multi_value(&mut self, field_name: &str, id: impl Into<Value>) -> bool {
        let id = id.into();
        let Some(Value::Array(items)) = self.values.get_mut(field_name) else {
            return false;
        };
        let Some(pos) = items.iter().position(|existing| same_key(existing, &id)) else {
            return false;
        };
        items.remove(pos);
        if let Some(FieldLabel::Multi(labels)) = self.labels.get_mut(field_name) {
            labels.retain(|l| !same_key(&l.key, &id));
        }
        true
    }

    fn is_multi_field(&self, field_name: &str) -> bool {
        self.definition
            .get_field(field_name)
            .is_some_and(|f| f.field_type.is_multi())
    }

    fn put_multi_label(&mut self, field_name: &str, key: Value, label: &str) {
        if label.is_empty() {
            return;
        }
        let entry = self
            .labels
            .entry(field_name.to_string())
            .or_insert_with(|| FieldLabel::Multi(Vec::new()));
        if let FieldLabel::Single(_) = entry {
            *entry = FieldLabel::Multi(Vec::new());
        }
        if let FieldLabel::Multi(labels) = entry {
            match labels.iter_mut().find(|l| same_key(&l.key, &key)) {
                Some(existing) => existing.value = label.to_string(),
                None => labels.push(ValueLabel::new(key, label)),
            }
        }
    }

    fn retain_multi_labels(&mut self, field_name: &str, items: &[Value]) {
        if let Some(FieldLabel::Multi(labels)) = self.labels.get_mut(field_name) {
            labels.retain(|l| items.iter().any(|item| same_key(item, &l.key)));
        }
    }

    // ── Transport shape ──────────────────────────────────────────

    /// Hydrates from a flat server record.
    ///
    /// Reads `id`, every key the definition knows, and the `<field>_fval`
    /// labels: a string for scalar fields, an `{id: label}` map for multi
    /// fields. Other keys are ignored.
    pub fn load_data(&mut self, record: &Map<String, Value>) {
        if let Some(id) = record.get("id") {
            self.id = id_from_value(id);
        }

        for (key, value) in record {
            if key == "id" || key == "obj_type" || key.ends_with(LABEL_SUFFIX) {
                continue;
            }
            let Some(field) = self.definition.get_field(key).cloned() else {
                continue;
            };
            let fval = record.get(&format!("{key}{LABEL_SUFFIX}"));
            self.load_field(&field, value.clone(), fval);
        }
    }

    fn load_field(&mut self, field: &FieldDefinition, value: Value, fval: Option<&Value>) {
        let name = field.name.as_str();
        self.labels.remove(name);

        if field.field_type.is_multi() {
            self.set_value(name, value, None);
            if let Some(Value::Object(names)) = fval {
                let items = match self.values.get(name) {
                    Some(Value::Array(items)) => items.clone(),
                    _ => Vec::new(),
                };
                for item in items {
                    if let Some(Value::String(label)) = names.get(&value_key(&item)) {
                        self.put_multi_label(name, item, label);
                    }
                }
            }
            return;
        }

        let label = match fval {
            Some(Value::String(label)) if !label.is_empty() => Some(label.clone()),
            // Some endpoints send `{id: label}` even for single references.
            Some(Value::Object(names)) => names
                .get(&value_key(&value))
                .and_then(Value::as_str)
                .map(str::to_string),
            _ => self.label_from_token(field, &value),
        };
        self.set_value(name, value, label.as_deref());
    }

    /// Untyped object fields store `obj_type:id:label` tokens.
    fn label_from_token(&self, field: &FieldDefinition, value: &Value) -> Option<String> {
        if field.field_type != FieldType::Object || !field.subtype.is_empty() {
            return None;
        }
        value.as_str().and_then(|token| decode_obj_ref(token).name)
    }

    /// Flattens into the server record shape; the inverse of [`load_data`].
    ///
    /// [`load_data`]: Entity::load_data
    pub fn get_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("obj_type".into(), Value::String(self.obj_type().to_string()));
        data.insert(
            "id".into(),
            self.id.clone().map(Value::String).unwrap_or(Value::Null),
        );

        for (name, value) in &self.values {
            data.insert(name.clone(), value.clone());
        }

        for (name, label) in &self.labels {
            let fval = match label {
                FieldLabel::Single(label) => Value::String(label.clone()),
                FieldLabel::Multi(labels) => Value::Object(
                    labels
                        .iter()
                        .map(|l| (value_key(&l.key), Value::String(l.value.clone())))
                        .collect(),
                ),
            };
            data.insert(format!("{name}{LABEL_SUFFIX}"), fval);
        }
        data
    }

    // ── Defaults ─────────────────────────────────────────────────

    /// Applies the default values registered for `event`.
    ///
    /// A field is only filled while empty, except when `source` carries a
    /// value for it: an override always wins. Calling this twice for the
    /// same event changes nothing the second time.
    pub fn set_default_values(&mut self, event: DefaultOn, source: Option<&Map<String, Value>>) {
        let definition = Arc::clone(&self.definition);
        for field in definition.fields() {
            let Some(default) = field.default_for(event) else {
                continue;
            };
            let name = field.name.as_str();

            if let Some(value) = source.and_then(|s| s.get(name)) {
                let label = source
                    .and_then(|s| s.get(&format!("{name}{LABEL_SUFFIX}")))
                    .and_then(Value::as_str);
                self.set_value(name, value.clone(), label);
                continue;
            }

            if !is_empty_value(self.values.get(name)) {
                continue;
            }
            let value = resolve_default(field, default);
            trace!(obj_type = definition.obj_type(), field = name, ?event, "applying default");
            self.set_value(name, value, None);
        }
    }

    // ── Member entities ──────────────────────────────────────────

    /// Returns the named member collection, creating it on first use.
    pub fn get_member_entity(&mut self, name: &str) -> &mut MemberEntities {
        self.members.entry(name.to_string()).or_default()
    }

    /// Replaces the named member collection.
    pub fn set_member_entity(&mut self, name: &str, members: MemberEntities) {
        self.members.insert(name.to_string(), members);
    }

    /// Read-only lookup that does not create the collection.
    pub fn member_entity(&self, name: &str) -> Option<&MemberEntities> {
        self.members.get(name)
    }
}

/// Expands the symbolic `now` default of date and timestamp fields.
fn resolve_default(field: &FieldDefinition, default: &Value) -> Value {
    if default.as_str() != Some("now") {
        return default.clone();
    }
    let now = chrono::Utc::now();
    match field.field_type {
        FieldType::Date => Value::String(now.format("%Y-%m-%d").to_string()),
        FieldType::Timestamp => Value::String(now.to_rfc3339()),
        _ => default.clone(),
    }
}
