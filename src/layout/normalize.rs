//! # Layout Normalizer
//!
//! Turns the persisted configuration into the in-memory form model, once per
//! page load. Each persisted `{name, size}` reference is resolved against the
//! current schema and merged with its edit-view metadata; references whose
//! attribute no longer exists are dropped silently — persisted configuration
//! routinely drifts behind the content-type definition, and a stale name is
//! not worth failing the whole view over.
//!
//! Resolution also fills in the `mainField` of relations and components: the
//! field name comes from the attribute's own metadata (relations) or from the
//! target component's settings (components), and its type is looked up in the
//! target schema, falling back to `string` when the referenced attribute
//! cannot be found.
//!
//! After resolution the normalizer seeds fresh order keys for every row and
//! every descriptor, re-packs any row that drifted past twelve units, forces
//! dynamic zones onto full-width rows, and pads each underfull row with a
//! spacer.

use std::collections::BTreeMap;

use crate::model::{AttributeKind, Configuration, EditMetadata, Registry, Schema};
use crate::order_key;

use super::pack;
use super::{Descriptor, FieldMeta, FormModel, Layout, MainField, Row, ROW_WIDTH};

/// Resolves persisted field references against the current schema and the
/// registry of known component/content-type schemas.
pub struct FieldResolver<'a> {
    config: &'a Configuration,
    schema: &'a Schema,
    registry: &'a Registry,
}

impl<'a> FieldResolver<'a> {
    pub fn new(config: &'a Configuration, schema: &'a Schema, registry: &'a Registry) -> Self {
        Self {
            config,
            schema,
            registry,
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeKind> {
        self.schema.attribute(name)
    }

    /// Build the form descriptor for one field reference. Returns `None` when
    /// the attribute is absent from the schema (drift between the persisted
    /// configuration and the current definition).
    ///
    /// The order key is left empty; it is assigned once the row's surviving
    /// fields are known.
    pub fn resolve(&self, name: &str, size: u32) -> Option<FieldMeta> {
        let kind = self.schema.attribute(name)?;
        let meta = self.config.metadatas.get(name).map(|m| &m.edit);

        // Dynamic zones always span the full grid, whatever was persisted.
        let size = if kind.is_dynamic_zone() { ROW_WIDTH } else { size };
        debug_assert!((1..=ROW_WIDTH).contains(&size));

        Some(FieldMeta {
            name: name.to_string(),
            label: meta
                .and_then(|m| m.label.clone())
                .unwrap_or_else(|| name.to_string()),
            description: meta.and_then(|m| m.description.clone()),
            placeholder: meta.and_then(|m| m.placeholder.clone()),
            editable: meta.map(|m| m.editable).unwrap_or(true),
            main_field: self.resolve_main_field(kind, meta),
            size,
            order_key: String::new(),
        })
    }

    /// The display attribute of a relation target or embedded component,
    /// with its type resolved against the target schema. Scalar kinds have
    /// no main field.
    fn resolve_main_field(
        &self,
        kind: &AttributeKind,
        meta: Option<&EditMetadata>,
    ) -> Option<MainField> {
        match kind {
            AttributeKind::Relation { target } => {
                let name = meta
                    .and_then(|m| m.main_field.clone())
                    .unwrap_or_else(|| "id".to_string());
                Some(MainField {
                    kind: self.target_attribute_kind(target, &name),
                    name,
                })
            }
            AttributeKind::Component { component, .. } => {
                let name = self
                    .registry
                    .get(component)
                    .map(|e| e.configuration.settings.main_field.clone())
                    .unwrap_or_else(|| "id".to_string());
                Some(MainField {
                    kind: self.target_attribute_kind(component, &name),
                    name,
                })
            }
            _ => None,
        }
    }

    fn target_attribute_kind(&self, uid: &str, attribute: &str) -> AttributeKind {
        self.registry
            .get(uid)
            .and_then(|e| e.schema.attribute(attribute))
            .cloned()
            .unwrap_or(AttributeKind::String)
    }
}

/// Convert a persisted configuration into the full form model: the content
/// type's edit layout plus a layout for every component its attributes
/// reference (directly or through a dynamic zone).
pub fn normalize(config: &Configuration, schema: &Schema, registry: &Registry) -> FormModel {
    let edit = normalize_layout(config, schema, registry);

    let mut components = BTreeMap::new();
    for kind in schema.attributes.values() {
        match kind {
            AttributeKind::Component { component, .. } => {
                insert_component_layout(&mut components, component, registry);
            }
            AttributeKind::DynamicZone { components: uids } => {
                for uid in uids {
                    insert_component_layout(&mut components, uid, registry);
                }
            }
            _ => {}
        }
    }

    FormModel { edit, components }
}

fn insert_component_layout(
    components: &mut BTreeMap<String, Layout>,
    uid: &str,
    registry: &Registry,
) {
    if components.contains_key(uid) {
        return;
    }
    // A component missing from the registry is the same kind of drift as a
    // stale field reference: skipped, not fatal.
    if let Some(entry) = registry.get(uid) {
        let layout = normalize_layout(&entry.configuration, &entry.schema, registry);
        components.insert(uid.to_string(), layout);
    }
}

/// Normalize one persisted edit layout into form rows: resolve references,
/// re-pack oversize rows, seed order keys, pad with spacers.
pub fn normalize_layout(config: &Configuration, schema: &Schema, registry: &Registry) -> Layout {
    let resolver = FieldResolver::new(config, schema, registry);

    // Resolve every persisted row; rows losing all their references disappear,
    // and rows past twelve units (dynamic-zone promotion, persisted drift) are
    // re-packed in place.
    let mut resolved: Vec<Vec<FieldMeta>> = Vec::new();
    for row in &config.layouts.edit {
        let fields: Vec<FieldMeta> = row
            .iter()
            .filter_map(|r| resolver.resolve(&r.name, r.size))
            .collect();
        if fields.is_empty() {
            continue;
        }
        if fields.iter().map(|f| f.size).sum::<u32>() > ROW_WIDTH {
            resolved.extend(pack::pack_fields(fields));
        } else {
            resolved.push(fields);
        }
    }

    // Evenly spaced keys for rows and for the fields within each row; the
    // spacer key is derived from the last field so it always sorts last.
    let row_keys = order_key::n_keys_between(None, None, resolved.len());
    let rows = resolved
        .into_iter()
        .zip(row_keys)
        .map(|(fields, row_key)| {
            let field_keys = order_key::n_keys_between(None, None, fields.len());
            let children = fields
                .into_iter()
                .zip(field_keys)
                .map(|(mut field, key)| {
                    field.order_key = key;
                    Descriptor::Field(field)
                })
                .collect();
            let mut row = Row {
                order_key: row_key,
                children,
            };
            row.recompute_spacer();
            row
        })
        .collect();

    Layout { rows }
}
