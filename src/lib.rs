//! # Formgrid
//!
//! A 12-column form-layout configuration engine for headless-CMS admin
//! panels.
//!
//! A content type's edit view is persisted as rows of `{name, size}` field
//! references plus display metadata scattered across attribute, content-type,
//! and component schemas. That shape is compact to store but useless to edit:
//! a drag-and-drop surface needs stable per-element ordering, explicit row
//! padding, and every field's metadata merged into one place. Formgrid is the
//! pure transformation between the two worlds — no network, no persistence,
//! no rendering.
//!
//! ## Architecture
//!
//! ```text
//! Persisted configuration (JSON/API)
//!       ↓
//!   [model]     — configuration, metadatas, settings, schemas
//!       ↓
//!   [normalize] — resolve references, merge metadata, seed order keys,
//!       ↓          pad rows with spacers
//!   [moves]     — drag-and-drop mutations over the in-memory form model
//!       ↓          (row packer keeps every row within twelve units)
//!   [serialize] — strip the ephemera, merge metadata back, persist
//! ```
//!
//! Everything is a pure function over values: each operation takes a layout
//! and returns a new one, so the UI event loop owns the single source of
//! truth and no locking is ever involved.

pub mod error;
pub mod layout;
pub mod model;
pub mod order_key;

pub use error::FormgridError;
pub use layout::moves::{add_field, move_field, remove_field};
pub use layout::normalize::{normalize, normalize_layout, FieldResolver};
pub use layout::serialize::{serialize, serialize_model, to_rows};
pub use layout::{Descriptor, FieldMeta, FormModel, Layout, MainField, Row, Spacer, ROW_WIDTH};

use model::Bundle;

/// Normalize a JSON configuration bundle into the form model, returned as
/// pretty-printed JSON.
///
/// This is the debugging/fixture entry point; library callers use
/// [`normalize`] directly on typed values.
pub fn normalize_json(json: &str) -> Result<String, FormgridError> {
    let bundle = parse_bundle(json)?;
    let model = normalize(&bundle.configuration, &bundle.schema, &bundle.components);
    Ok(serde_json::to_string_pretty(&model)?)
}

/// Normalize a JSON configuration bundle and serialize the result straight
/// back to the persisted shape, returned as pretty-printed JSON. Useful for
/// checking that a stored configuration survives a load/save cycle unchanged.
pub fn roundtrip_json(json: &str) -> Result<String, FormgridError> {
    let bundle = parse_bundle(json)?;
    let model = normalize(&bundle.configuration, &bundle.schema, &bundle.components);
    let persisted = serialize(&model.edit, &bundle.configuration);
    Ok(serde_json::to_string_pretty(&persisted)?)
}

fn parse_bundle(json: &str) -> Result<Bundle, FormgridError> {
    let bundle: Bundle = serde_json::from_str(json)?;
    if bundle.configuration.uid != bundle.schema.uid {
        return Err(FormgridError::UidMismatch {
            config: bundle.configuration.uid,
            schema: bundle.schema.uid,
        });
    }
    Ok(bundle)
}
