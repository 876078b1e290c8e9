//! # Persisted Configuration Model
//!
//! The input representation for the layout pipeline: everything the admin
//! backend stores per content type, plus the schema needed to interpret it.
//! This is designed to be easily produced by a REST configuration endpoint
//! or direct JSON construction.
//!
//! Three pieces travel together for one content type:
//!
//! - `layouts.edit` — rows of `{name, size}` field references, the persisted
//!   arrangement of the edit view on a 12-unit grid
//! - `metadatas` — per-attribute display settings, split into edit-view and
//!   list-view halves
//! - `settings` — view-level settings (default sort, page size, ...), carried
//!   through the pipeline untouched
//!
//! The schema side (`Schema`, `AttributeKind`) is what the persisted layout
//! is resolved *against*: attribute types, relation targets, embedded
//! component references. Schemas of other content types and of components
//! live in a [`Registry`] keyed by uid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything persisted for one content type's admin views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    /// Content-type identifier, e.g. `api::article.article`.
    pub uid: String,

    #[serde(default)]
    pub layouts: Layouts,

    /// Per-attribute display settings, keyed by attribute name.
    #[serde(default)]
    pub metadatas: BTreeMap<String, Metadata>,

    #[serde(default)]
    pub settings: Settings,
}

/// The persisted view layouts: edit grid and list columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layouts {
    /// Rows of field references. Row widths are capped at 12 units; spacers
    /// are never persisted.
    #[serde(default)]
    pub edit: Vec<Vec<FieldRef>>,

    /// Ordered column names of the list view.
    #[serde(default)]
    pub list: Vec<String>,
}

/// One field's placement in a persisted edit row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRef {
    pub name: String,
    /// Column width in grid units, constrained upstream to 1..=12.
    pub size: u32,
}

impl FieldRef {
    pub fn new(name: &str, size: u32) -> Self {
        Self {
            name: name.to_string(),
            size,
        }
    }
}

/// Display settings for one attribute, split by view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    pub edit: EditMetadata,
    #[serde(default)]
    pub list: ListMetadata,
}

/// Edit-view display settings for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditMetadata {
    pub label: Option<String>,
    pub description: Option<String>,
    pub placeholder: Option<String>,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub editable: bool,
    /// For relations and components: the name of the attribute of the target
    /// entity shown as its display value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_field: Option<String>,
}

impl Default for EditMetadata {
    fn default() -> Self {
        Self {
            label: None,
            description: None,
            placeholder: None,
            visible: true,
            editable: true,
            main_field: None,
        }
    }
}

/// List-view display settings for one attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListMetadata {
    pub label: Option<String>,
    #[serde(default = "default_true")]
    pub searchable: bool,
    #[serde(default = "default_true")]
    pub sortable: bool,
}

impl Default for ListMetadata {
    fn default() -> Self {
        Self {
            label: None,
            searchable: true,
            sortable: true,
        }
    }
}

/// View-level settings. The pipeline never interprets these; they are merged
/// back verbatim on serialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// The attribute used as this content type's display value when it is the
    /// target of a relation.
    pub main_field: String,
    pub default_sort_by: String,
    pub default_sort_order: String,
    pub page_size: u32,
    pub searchable: bool,
    pub filterable: bool,
    pub bulkable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            main_field: "id".to_string(),
            default_sort_by: "id".to_string(),
            default_sort_order: "ASC".to_string(),
            page_size: 10,
            searchable: true,
            filterable: true,
            bulkable: true,
        }
    }
}

fn default_true() -> bool {
    true
}

// ── Schema side ────────────────────────────────────────────────

/// The current definition of a content type or component: its attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    pub uid: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, AttributeKind>,
}

impl Schema {
    pub fn attribute(&self, name: &str) -> Option<&AttributeKind> {
        self.attributes.get(name)
    }
}

/// The type of one attribute, as the schema declares it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AttributeKind {
    String,
    Text,
    Richtext,
    Email,
    Password,
    Integer,
    Decimal,
    Boolean,
    Date,
    Datetime,
    Json,
    Enumeration {
        #[serde(default)]
        values: Vec<String>,
    },
    Media,

    /// A reference to another content type.
    Relation { target: String },

    /// An embedded component, defined by its own schema and configuration.
    Component {
        component: String,
        #[serde(default)]
        repeatable: bool,
    },

    /// A polymorphic zone holding any of the listed components. Always laid
    /// out on a full-width row of its own.
    DynamicZone {
        #[serde(default)]
        components: Vec<String>,
    },
}

impl AttributeKind {
    /// Grid width a field of this kind gets when first added to a layout.
    pub fn default_size(&self) -> u32 {
        match self {
            AttributeKind::Json | AttributeKind::Richtext | AttributeKind::DynamicZone { .. } => {
                12
            }
            AttributeKind::Boolean | AttributeKind::Date | AttributeKind::Datetime => 4,
            _ => 6,
        }
    }

    pub fn is_dynamic_zone(&self) -> bool {
        matches!(self, AttributeKind::DynamicZone { .. })
    }
}

/// One known schema (content type or component) with its persisted
/// configuration, as stored in the [`Registry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryEntry {
    pub schema: Schema,
    #[serde(default = "RegistryEntry::default_configuration")]
    pub configuration: Configuration,
}

impl RegistryEntry {
    fn default_configuration() -> Configuration {
        Configuration {
            uid: String::new(),
            layouts: Layouts::default(),
            metadatas: BTreeMap::new(),
            settings: Settings::default(),
        }
    }
}

/// The set of known component and content-type schemas, keyed by uid. Used to
/// resolve relation targets and embedded components during normalization.
pub type Registry = BTreeMap<String, RegistryEntry>;

/// A complete normalization input as one JSON document: the content type's
/// configuration, its schema, and every schema it references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub configuration: Configuration,
    pub schema: Schema,
    #[serde(default)]
    pub components: Registry,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_kind_json_shape() {
        let kind: AttributeKind =
            serde_json::from_str(r#"{"type":"relation","target":"api::author.author"}"#).unwrap();
        assert_eq!(
            kind,
            AttributeKind::Relation {
                target: "api::author.author".to_string()
            }
        );

        let kind: AttributeKind =
            serde_json::from_str(r#"{"type":"dynamiczone","components":["shared.quote"]}"#)
                .unwrap();
        assert!(kind.is_dynamic_zone());
    }

    #[test]
    fn test_default_sizes() {
        assert_eq!(AttributeKind::Boolean.default_size(), 4);
        assert_eq!(AttributeKind::Richtext.default_size(), 12);
        assert_eq!(AttributeKind::String.default_size(), 6);
    }

    #[test]
    fn test_metadata_defaults() {
        let meta: EditMetadata = serde_json::from_str(r#"{"label":"Title"}"#).unwrap();
        assert!(meta.visible);
        assert!(meta.editable);
        assert_eq!(meta.label.as_deref(), Some("Title"));
    }
}
