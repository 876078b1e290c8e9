//! # Serializer
//!
//! Converts the form model back into the persisted shape on submit. Two
//! things happen:
//!
//! - the layout is stripped of its ephemera — spacers disappear, order keys
//!   are dropped, rows become plain `{name, size}` lists
//! - each field's (possibly edited) display metadata is merged back into the
//!   persisted `metadatas` by field name; entries for fields outside the edit
//!   layout, and every list-view half, survive untouched
//!
//! Serialization is idempotent: serializing, normalizing the result, and
//! serializing again produces the same persisted rows (order keys and spacers
//! are regenerated deterministically from the same widths).

use std::collections::BTreeMap;

use crate::model::{Configuration, FieldRef, Registry};

use super::{Descriptor, FormModel, Layout};

/// The persisted row shape of a layout: spacers removed, order keys gone.
pub fn to_rows(layout: &Layout) -> Vec<Vec<FieldRef>> {
    layout
        .rows
        .iter()
        .map(|row| {
            row.children
                .iter()
                .filter_map(Descriptor::as_field)
                .map(|f| FieldRef::new(&f.name, f.size))
                .collect::<Vec<FieldRef>>()
        })
        .filter(|row| !row.is_empty())
        .collect()
}

/// Merge one edit layout back into its persisted configuration. `base` is the
/// configuration the session was loaded from; its settings, list layout, and
/// untouched metadata entries carry through as-is.
pub fn serialize(layout: &Layout, base: &Configuration) -> Configuration {
    let mut out = base.clone();
    out.layouts.edit = to_rows(layout);

    for field in layout.fields() {
        let entry = out.metadatas.entry(field.name.clone()).or_default();
        entry.edit.label = Some(field.label.clone());
        entry.edit.description = field.description.clone();
        entry.edit.placeholder = field.placeholder.clone();
        entry.edit.editable = field.editable;
        entry.edit.main_field = field.main_field.as_ref().map(|m| m.name.clone());
    }

    out
}

/// Serialize a whole form model: the content type's configuration plus one
/// configuration per component layout, resolved against the registry's
/// persisted entries. Components missing from the registry are skipped, the
/// same way normalization skipped them.
pub fn serialize_model(
    model: &FormModel,
    base: &Configuration,
    registry: &Registry,
) -> (Configuration, BTreeMap<String, Configuration>) {
    let configuration = serialize(&model.edit, base);
    let components = model
        .components
        .iter()
        .filter_map(|(uid, layout)| {
            let entry = registry.get(uid)?;
            Some((uid.clone(), serialize(layout, &entry.configuration)))
        })
        .collect();
    (configuration, components)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FieldMeta, Row, Spacer};
    use crate::model::{Layouts, Metadata, Settings};

    fn field(name: &str, size: u32, order_key: &str) -> Descriptor {
        Descriptor::Field(FieldMeta {
            name: name.to_string(),
            label: name.to_string(),
            description: None,
            placeholder: None,
            editable: true,
            main_field: None,
            size,
            order_key: order_key.to_string(),
        })
    }

    fn base_config() -> Configuration {
        Configuration {
            uid: "api::article.article".to_string(),
            layouts: Layouts::default(),
            metadatas: BTreeMap::new(),
            settings: Settings::default(),
        }
    }

    #[test]
    fn test_to_rows_strips_spacers_and_keys() {
        let layout = Layout {
            rows: vec![Row {
                order_key: "V".to_string(),
                children: vec![
                    field("a", 4, "G"),
                    field("b", 6, "V"),
                    Descriptor::Spacer(Spacer {
                        size: 2,
                        order_key: "l".to_string(),
                    }),
                ],
            }],
        };
        let rows = to_rows(&layout);
        assert_eq!(rows, vec![vec![FieldRef::new("a", 4), FieldRef::new("b", 6)]]);
    }

    #[test]
    fn test_serialize_merges_edited_metadata() {
        let mut meta = Metadata::default();
        meta.edit.label = Some("Old label".to_string());
        meta.list.sortable = false;

        let mut base = base_config();
        base.metadatas.insert("a".to_string(), meta);
        // A field that is not in the edit layout keeps its metadata whole.
        base.metadatas
            .insert("list_only".to_string(), Metadata::default());

        let mut edited = field("a", 4, "G");
        if let Descriptor::Field(f) = &mut edited {
            f.label = "New label".to_string();
            f.placeholder = Some("hint".to_string());
            f.editable = false;
        }
        let layout = Layout {
            rows: vec![Row {
                order_key: "V".to_string(),
                children: vec![edited],
            }],
        };

        let out = serialize(&layout, &base);
        let merged = out.metadatas.get("a").unwrap();
        assert_eq!(merged.edit.label.as_deref(), Some("New label"));
        assert_eq!(merged.edit.placeholder.as_deref(), Some("hint"));
        assert!(!merged.edit.editable);
        // List half untouched by the edit form.
        assert!(!merged.list.sortable);
        assert!(out.metadatas.contains_key("list_only"));
    }

    #[test]
    fn test_serialize_preserves_settings_and_list_layout() {
        let mut base = base_config();
        base.layouts.list = vec!["a".to_string(), "b".to_string()];
        base.settings.page_size = 50;

        let out = serialize(&Layout::default(), &base);
        assert_eq!(out.layouts.list, base.layouts.list);
        assert_eq!(out.settings, base.settings);
        assert!(out.layouts.edit.is_empty());
    }
}
