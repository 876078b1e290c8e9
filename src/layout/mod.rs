//! # Form Layout Model
//!
//! The in-memory, form-editable representation of one editing session. It is
//! built fresh from the persisted configuration on load
//! ([`normalize`](normalize::normalize)), mutated by value on every
//! drag-and-drop interaction ([`moves`]), and converted back to the persisted
//! shape on submit ([`serialize`](serialize::serialize)).
//!
//! Two things exist here that the persisted shape never sees:
//!
//! - **order keys** — fractional-index strings giving every row and every
//!   descriptor a stable position among its siblings (see
//!   [`order_key`](crate::order_key))
//! - **spacers** — synthetic descriptors padding each underfull row out to
//!   twelve units, so consumers can always render a fixed grid
//!
//! Every function over this model takes a layout and returns a new layout.
//! Nothing here mutates shared state; the caller owns the single source of
//! truth and commits each returned value back into it.

pub mod moves;
pub mod normalize;
pub mod pack;
pub mod serialize;

use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::AttributeKind;
use crate::order_key;

/// Grid width of a full row, in column units.
pub const ROW_WIDTH: u32 = 12;

/// The attribute of a related or embedded entity used as its human-readable
/// display value, with its resolved type.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MainField {
    pub name: String,
    pub kind: AttributeKind,
}

/// One content attribute placed in the layout, with its merged edit-view
/// metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldMeta {
    pub name: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub editable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub main_field: Option<MainField>,
    /// Column width in grid units, 1..=12.
    pub size: u32,
    pub order_key: String,
}

/// Synthetic padding that fills a row out to [`ROW_WIDTH`]. Never persisted,
/// never draggable.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Spacer {
    pub size: u32,
    pub order_key: String,
}

/// One slot in a row: a real field or a spacer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Descriptor {
    Field(FieldMeta),
    Spacer(Spacer),
}

impl Descriptor {
    pub fn size(&self) -> u32 {
        match self {
            Descriptor::Field(f) => f.size,
            Descriptor::Spacer(s) => s.size,
        }
    }

    pub fn order_key(&self) -> &str {
        match self {
            Descriptor::Field(f) => &f.order_key,
            Descriptor::Spacer(s) => &s.order_key,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Descriptor::Spacer(_))
    }

    pub fn as_field(&self) -> Option<&FieldMeta> {
        match self {
            Descriptor::Field(f) => Some(f),
            Descriptor::Spacer(_) => None,
        }
    }
}

/// An ordered run of descriptors spanning the 12-unit grid.
///
/// Invariants once fully built: descriptor order keys strictly increase, and
/// [`Row::width`] is exactly [`ROW_WIDTH`] (a trailing spacer covers any
/// remainder).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub order_key: String,
    pub children: Vec<Descriptor>,
}

impl Row {
    /// Total width including spacers.
    pub fn width(&self) -> u32 {
        self.children.iter().map(Descriptor::size).sum()
    }

    /// Total width of the real fields only.
    pub fn field_width(&self) -> u32 {
        self.children
            .iter()
            .filter_map(Descriptor::as_field)
            .map(|f| f.size)
            .sum()
    }

    /// Number of real fields in the row.
    pub fn field_count(&self) -> usize {
        self.children.iter().filter(|d| !d.is_spacer()).count()
    }

    /// Strip any existing spacer and, if the real fields leave a remainder,
    /// append a fresh one sized to fill the row. A row at exactly twelve
    /// units carries no spacer.
    pub fn recompute_spacer(&mut self) {
        self.children.retain(|d| !d.is_spacer());
        let used = self.field_width();
        if used < ROW_WIDTH && !self.children.is_empty() {
            let key = order_key::key_between(self.children.last().map(|d| d.order_key()), None);
            self.children.push(Descriptor::Spacer(Spacer {
                size: ROW_WIDTH - used,
                order_key: key,
            }));
        }
    }
}

/// An ordered sequence of rows: one view's arrangement of fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    pub rows: Vec<Row>,
}

impl Layout {
    /// Total number of real fields across all rows.
    pub fn field_count(&self) -> usize {
        self.rows.iter().map(Row::field_count).sum()
    }

    /// Iterate the real fields in visual order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldMeta> {
        self.rows
            .iter()
            .flat_map(|r| r.children.iter())
            .filter_map(Descriptor::as_field)
    }
}

/// The full form model for one editing session: the content type's edit
/// layout plus one layout per embedded component its attributes reference,
/// keyed by component uid.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormModel {
    pub edit: Layout,
    pub components: BTreeMap<String, Layout>,
}
