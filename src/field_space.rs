//! The `FieldSpace` external collaborator (spec §6).
//!
//! The core depends only on this capability: given a dotted field name,
//! resolve its type and (if it carries one) its filter list. Name
//! resolution, scoping, and the symbol table itself are out of scope —
//! callers supply an implementation.

use serde::{Deserialize, Serialize};

use crate::ast::types::DataType;
use crate::fragment::FragmentSeq;

/// The type shape of a resolved field: its data type and whether looking it
/// up yields an aggregate value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldType {
    pub data_type: DataType,
    pub aggregate: bool,
}

/// One condition in a field's attached filter list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCond {
    pub value: FragmentSeq,
    pub aggregate: bool,
}

/// A resolved field: its type, plus any filter conditions scoped to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEntry {
    pub ty: FieldType,
    #[serde(default)]
    pub filter_list: Vec<FilterCond>,
    /// True when the field itself denotes a struct (nested relation) rather
    /// than an atomic scalar — used by aggregate-function `source`
    /// resolution (spec §9 Open Question (a)).
    #[serde(default)]
    pub is_struct: bool,
}

impl FieldEntry {
    pub fn scalar(data_type: DataType, aggregate: bool) -> Self {
        FieldEntry {
            ty: FieldType {
                data_type,
                aggregate,
            },
            filter_list: Vec::new(),
            is_struct: false,
        }
    }

    pub fn with_filter_list(mut self, filter_list: Vec<FilterCond>) -> Self {
        self.filter_list = filter_list;
        self
    }

    pub fn struct_ref() -> Self {
        FieldEntry {
            ty: FieldType {
                data_type: DataType::Null,
                aggregate: false,
            },
            filter_list: Vec::new(),
            is_struct: true,
        }
    }
}

/// External namespace resolving dotted field names to typed entries.
pub trait FieldSpace {
    fn field(&self, name: &str) -> Option<FieldEntry>;
}

/// A minimal in-memory `FieldSpace`, useful for tests and as a reference
/// implementation for embedders that don't yet have a real symbol table.
#[derive(Debug, Clone, Default)]
pub struct MapFieldSpace {
    fields: std::collections::HashMap<String, FieldEntry>,
}

impl MapFieldSpace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field<S: Into<String>>(mut self, name: S, entry: FieldEntry) -> Self {
        self.fields.insert(name.into(), entry);
        self
    }
}

impl FieldSpace for MapFieldSpace {
    fn field(&self, name: &str) -> Option<FieldEntry> {
        self.fields.get(name).cloned()
    }
}
