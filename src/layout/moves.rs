//! # Move/Reorder Engine
//!
//! The drag-and-drop mutations over the form model. Every function takes a
//! layout by reference and returns a new layout — the caller commits the
//! result back into its own state, which is what keeps these safe to call
//! from an event loop with no locking.
//!
//! Index semantics: positions are `(row, child)` pairs into the layout as it
//! currently renders, spacers included. The destination child index is
//! interpreted after the source descriptor has been removed, so a same-row
//! forward move of `a` in `[a, b, c]` to position 1 yields `[b, a, c]`.
//!
//! Out-of-range indices are a caller precondition, not validated here: the
//! drag-and-drop surface only issues in-bounds moves by construction.

use crate::order_key;

use super::pack;
use super::{Descriptor, Layout, Row, ROW_WIDTH};

use crate::layout::normalize::FieldResolver;

/// Relocate the descriptor at `from` to `to`, re-packing the destination row
/// if it overflows and recomputing spacers. Moving a spacer is a no-op.
///
/// The moved field keeps its identity and metadata; only its order key, row
/// membership, and the affected spacers change.
pub fn move_field(layout: &Layout, from: (usize, usize), to: (usize, usize)) -> Layout {
    let (from_row, from_idx) = from;
    let (to_row, to_idx) = to;

    let mut next = layout.clone();
    let Descriptor::Field(mut moved) = next.rows[from_row].children.remove(from_idx) else {
        return layout.clone();
    };

    // A key strictly between the destination neighbors. Spacer neighbors are
    // fine as bounds: their keys already sort after every field in the row.
    let dest = &next.rows[to_row].children;
    let lower = to_idx
        .checked_sub(1)
        .and_then(|i| dest.get(i))
        .map(|d| d.order_key().to_string());
    let upper = dest.get(to_idx).map(|d| d.order_key().to_string());
    moved.order_key = order_key::key_between(lower.as_deref(), upper.as_deref());

    next.rows[to_row]
        .children
        .insert(to_idx, Descriptor::Field(moved));

    if next.rows[to_row].field_width() > ROW_WIDTH {
        split_overflowing_row(&mut next, to_row);
    }

    finish(next)
}

/// Append `name` as a new row at the bottom of the layout, with size and
/// metadata defaulted from the schema. Names the schema does not know leave
/// the layout unchanged.
pub fn add_field(layout: &Layout, name: &str, resolver: &FieldResolver) -> Layout {
    let Some(size) = resolver.attribute(name).map(|k| k.default_size()) else {
        return layout.clone();
    };
    let Some(mut field) = resolver.resolve(name, size) else {
        return layout.clone();
    };
    field.order_key = order_key::key_between(None, None);

    let mut next = layout.clone();
    let row_key = order_key::key_between(next.rows.last().map(|r| r.order_key.as_str()), None);
    let mut row = Row {
        order_key: row_key,
        children: vec![Descriptor::Field(field)],
    };
    row.recompute_spacer();
    next.rows.push(row);
    next
}

/// Remove the descriptor at (`row`, `idx`). The row disappears entirely when
/// no real field remains; otherwise its spacer is recomputed.
pub fn remove_field(layout: &Layout, row: usize, idx: usize) -> Layout {
    let mut next = layout.clone();
    next.rows[row].children.remove(idx);
    finish(next)
}

/// Replace the row at `index` with its re-packed fragments, slotted between
/// the row's former neighbors with fresh row keys.
fn split_overflowing_row(layout: &mut Layout, index: usize) {
    let lower = index
        .checked_sub(1)
        .map(|i| layout.rows[i].order_key.clone());
    let upper = layout.rows.get(index + 1).map(|r| r.order_key.clone());

    let children: Vec<Descriptor> = layout.rows[index].children.drain(..).collect();
    let groups = pack::pack_row(children);
    let keys = order_key::n_keys_between(lower.as_deref(), upper.as_deref(), groups.len());

    let rows: Vec<Row> = groups
        .into_iter()
        .zip(keys)
        .map(|(fields, key)| Row {
            order_key: key,
            children: fields.into_iter().map(Descriptor::Field).collect(),
        })
        .collect();

    layout.rows.splice(index..=index, rows);
}

/// Recompute spacers and drop rows holding no real field.
fn finish(mut layout: Layout) -> Layout {
    for row in &mut layout.rows {
        row.recompute_spacer();
    }
    layout.rows.retain(|r| r.field_count() > 0);
    layout
}
