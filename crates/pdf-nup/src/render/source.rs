//! Source page extraction
//!
//! Reads the geometry of every page once, honoring attributes that a page
//! inherits from its ancestors in the page tree.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::layout::{Rect, SourcePage};
use crate::types::{Result, Rotation};
use lopdf::{Document, Object, ObjectId};

/// Guard against cyclic `/Parent` chains in damaged files
const MAX_TREE_DEPTH: usize = 64;

/// Object IDs of all pages, in document order
pub fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().values().copied().collect()
}

/// Read the MediaBox and rotation of every page, in document order.
pub fn read_source_pages(doc: &Document) -> Result<Vec<SourcePage>> {
    page_ids(doc)
        .into_iter()
        .enumerate()
        .map(|(index, id)| read_source_page(doc, id, index))
        .collect()
}

fn read_source_page(doc: &Document, page_id: ObjectId, index: usize) -> Result<SourcePage> {
    let media_box = match inherited_attribute(doc, page_id, b"MediaBox")? {
        Some(obj) => parse_box(doc, obj).unwrap_or_else(|| {
            log::warn!("page {} has an unreadable MediaBox, assuming US Letter", index + 1);
            default_box()
        }),
        None => {
            log::warn!("page {} has no MediaBox, assuming US Letter", index + 1);
            default_box()
        }
    };

    let rotation = match inherited_attribute(doc, page_id, b"Rotate")? {
        Some(obj) => {
            // Some producers write the angle as a real, e.g. `90.0`
            let degrees = resolve(doc, obj).and_then(|o| match o {
                Object::Integer(i) => Some(*i),
                Object::Real(r) if r.fract() == 0.0 => Some(*r as i64),
                _ => None,
            });
            degrees
                .and_then(Rotation::from_degrees)
                .unwrap_or_else(|| {
                    log::warn!(
                        "page {} has /Rotate {:?}, which is not a multiple of 90; ignoring it",
                        index + 1,
                        obj
                    );
                    Rotation::None
                })
        }
        None => Rotation::None,
    };

    Ok(SourcePage::new(index, media_box, rotation))
}

/// Look up `key` on a page, walking up through `/Parent` nodes.
pub fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut node = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_TREE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Ok(Some(value));
        }
        match node.get(b"Parent").and_then(|p| p.as_reference()) {
            Ok(parent_id) => node = doc.get_dictionary(parent_id)?,
            Err(_) => return Ok(None),
        }
    }

    Ok(None)
}

/// Follow a reference, if `obj` is one
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

/// Parse a `[x0 y0 x1 y1]` rectangle; corners may be given in any order.
fn parse_box(doc: &Document, obj: &Object) -> Option<Rect> {
    let values = resolve(doc, obj)?.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }

    let mut coords = [0.0f32; 4];
    for (slot, value) in coords.iter_mut().zip(values) {
        *slot = extract_number(resolve(doc, value)?)?;
    }

    let [x0, y0, x1, y1] = coords;
    Some(Rect::new(
        x0.min(x1),
        y0.min(y1),
        (x1 - x0).abs(),
        (y1 - y0).abs(),
    ))
}

fn default_box() -> Rect {
    Rect::new(0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
