//! # Row Packer
//!
//! Greedy bin fill with a fixed capacity of twelve units. When an insertion
//! pushes a row past the grid width, the packer redistributes that row's
//! fields across as many rows as needed. Field order is always preserved —
//! only the row boundaries move — and no field is ever split or clamped
//! (`size` is constrained to 1..=12 upstream, so a single field always fits
//! a fresh row).
//!
//! Spacers are layout ephemera: any spacer in the input is dropped before
//! packing and recomputed by the caller afterwards.

use super::{Descriptor, FieldMeta, ROW_WIDTH};

/// Partition `fields` into contiguous groups whose sizes each sum to at most
/// twelve. Concatenating the groups in order reproduces the input exactly.
pub fn pack_fields(fields: Vec<FieldMeta>) -> Vec<Vec<FieldMeta>> {
    let mut groups = Vec::new();
    let mut current: Vec<FieldMeta> = Vec::new();
    let mut used = 0;

    for field in fields {
        if !current.is_empty() && used + field.size > ROW_WIDTH {
            groups.push(std::mem::take(&mut current));
            used = 0;
        }
        used += field.size;
        current.push(field);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// [`pack_fields`] over a row's descriptor list: spacers are discarded first.
pub fn pack_row(children: Vec<Descriptor>) -> Vec<Vec<FieldMeta>> {
    let fields = children
        .into_iter()
        .filter_map(|d| match d {
            Descriptor::Field(f) => Some(f),
            Descriptor::Spacer(_) => None,
        })
        .collect();
    pack_fields(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Spacer;

    fn field(name: &str, size: u32) -> FieldMeta {
        FieldMeta {
            name: name.to_string(),
            label: name.to_string(),
            description: None,
            placeholder: None,
            editable: true,
            main_field: None,
            size,
            order_key: "V".to_string(),
        }
    }

    #[test]
    fn test_pack_fits_single_group() {
        let groups = pack_fields(vec![field("a", 4), field("b", 6), field("c", 2)]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].len(), 3);
    }

    #[test]
    fn test_pack_splits_at_capacity() {
        // 8 + 4 fills the first group; 6 starts the second.
        let groups = pack_fields(vec![field("a", 8), field("b", 4), field("c", 6)]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].iter().map(|f| f.size).sum::<u32>(), 12);
        assert_eq!(groups[1].len(), 1);
        assert_eq!(groups[1][0].name, "c");
    }

    #[test]
    fn test_pack_preserves_order() {
        let input = vec![
            field("a", 6),
            field("b", 6),
            field("c", 6),
            field("d", 4),
            field("e", 4),
        ];
        let names: Vec<String> = input.iter().map(|f| f.name.clone()).collect();
        let groups = pack_fields(input);

        let flattened: Vec<String> = groups
            .iter()
            .flat_map(|g| g.iter().map(|f| f.name.clone()))
            .collect();
        assert_eq!(flattened, names);
        for group in &groups {
            assert!(group.iter().map(|f| f.size).sum::<u32>() <= ROW_WIDTH);
        }
    }

    #[test]
    fn test_pack_full_width_fields() {
        let groups = pack_fields(vec![field("a", 12), field("b", 12)]);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].name, "a");
        assert_eq!(groups[1][0].name, "b");
    }

    #[test]
    fn test_pack_row_discards_spacers() {
        let children = vec![
            Descriptor::Field(field("a", 4)),
            Descriptor::Spacer(Spacer {
                size: 8,
                order_key: "l".to_string(),
            }),
            Descriptor::Field(field("b", 10)),
        ];
        let groups = pack_row(children);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0][0].name, "a");
        assert_eq!(groups[1][0].name, "b");
    }

    #[test]
    fn test_pack_empty_input() {
        assert!(pack_fields(vec![]).is_empty());
    }
}
