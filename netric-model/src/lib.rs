//! Entity model for netric.
//!
//! Mirrors the server-side business objects for display and editing:
//! - [`EntityDefinition`]: the field schema of one object type
//! - [`FieldDefinition`]: one field with its type, subtype and default-value rule
//! - [`Entity`]: one record with raw values, reference labels, member collections
//! - [`MemberEntities`]: a named set of related entities owned by a parent
//!
//! Records cross the transport boundary as flat JSON maps. Labels of
//! reference fields ride along in `<field>_fval` side-channel keys; inside
//! an [`Entity`] they live in their own label map.

mod definition;
mod entity;
mod field;
mod member;
pub mod value;

pub use definition::EntityDefinition;
pub use entity::{Entity, ValueLabel};
pub use field::{DefaultOn, DefaultValue, FieldDefinition, FieldType};
pub use member::MemberEntities;
pub use netric_types::{ObjRef, decode_obj_ref, encode_obj_ref};

/// Suffix of the side-channel key carrying a field's display label(s).
pub const LABEL_SUFFIX: &str = "_fval";
