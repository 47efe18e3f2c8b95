//! Source pages as Form XObjects
//!
//! Every placed page becomes a form whose BBox is the page's MediaBox and
//! whose resources are copied over from the source document. The sheet's
//! content stream then draws the form through a `cm` matrix.

use crate::layout::Rect;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::source::inherited_attribute;

/// Copies objects from a source document into an output document.
///
/// Each referenced source object is copied at most once; later references
/// to it resolve to the same output object.
pub struct ObjectCopier<'a> {
    source: &'a Document,
    copied: HashMap<ObjectId, ObjectId>,
}

impl<'a> ObjectCopier<'a> {
    pub fn new(source: &'a Document) -> Self {
        Self {
            source,
            copied: HashMap::new(),
        }
    }

    /// Copy `obj` into `output`, following references.
    ///
    /// The output ID of a reference is claimed before its target is copied,
    /// so reference cycles terminate.
    pub fn copy(&mut self, output: &mut Document, obj: &Object) -> Result<Object> {
        let copied = match obj {
            Object::Reference(id) => Object::Reference(self.copy_reference(output, *id)?),
            Object::Dictionary(dict) => Object::Dictionary(self.copy_dictionary(output, dict)?),
            Object::Array(items) => Object::Array(
                items
                    .iter()
                    .map(|item| self.copy(output, item))
                    .collect::<Result<_>>()?,
            ),
            Object::Stream(stream) => {
                let mut copy = Stream::new(
                    self.copy_dictionary(output, &stream.dict)?,
                    stream.content.clone(),
                );
                copy.allows_compression = stream.allows_compression;
                Object::Stream(copy)
            }
            other => other.clone(),
        };
        Ok(copied)
    }

    fn copy_reference(&mut self, output: &mut Document, id: ObjectId) -> Result<ObjectId> {
        if let Some(&known) = self.copied.get(&id) {
            return Ok(known);
        }

        let new_id = output.new_object_id();
        self.copied.insert(id, new_id);

        let target = self.source.get_object(id)?;
        let copy = self.copy(output, target)?;
        output.objects.insert(new_id, copy);
        Ok(new_id)
    }

    fn copy_dictionary(&mut self, output: &mut Document, dict: &Dictionary) -> Result<Dictionary> {
        let mut copy = Dictionary::new();
        for (key, value) in dict.iter() {
            copy.set(key.clone(), self.copy(output, value)?);
        }
        Ok(copy)
    }

    /// Number of source objects copied so far
    pub fn copied_count(&self) -> usize {
        self.copied.len()
    }
}

/// Add a Form XObject for the source page `page_id` to `output`.
pub fn create_page_xobject(
    output: &mut Document,
    copier: &mut ObjectCopier<'_>,
    page_id: ObjectId,
    media_box: &Rect,
) -> Result<ObjectId> {
    let source = copier.source;

    let bbox = [media_box.x, media_box.y, media_box.right(), media_box.top()];
    let mut form = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"XObject".to_vec())),
        ("Subtype", Object::Name(b"Form".to_vec())),
        ("FormType", Object::Integer(1)),
        ("BBox", Object::Array(bbox.into_iter().map(Object::Real).collect())),
    ]);

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources")? {
        form.set("Resources", copier.copy(output, resources)?);
    }

    let content = match page_content(source, page_id)? {
        PageContent::Decoded(data) => data,
        // Keep the encoding so a viewer can still decode the stream
        PageContent::Encoded(stream) => {
            for key in [&b"Filter"[..], b"DecodeParms"] {
                if let Ok(value) = stream.dict.get(key) {
                    form.set(key, copier.copy(output, value)?);
                }
            }
            stream.content.clone()
        }
    };

    Ok(output.add_object(Stream::new(form, content)))
}

enum PageContent<'a> {
    /// Plain content operators
    Decoded(Vec<u8>),
    /// A single stream whose filter could not be undone here
    Encoded(&'a Stream),
}

/// Content of a page; multiple content streams are decoded and joined by
/// newlines.
///
/// A page without `/Contents` is blank and yields no bytes.
fn page_content(doc: &Document, page_id: ObjectId) -> Result<PageContent<'_>> {
    let page = doc.get_dictionary(page_id)?;
    let Ok(contents) = page.get(b"Contents") else {
        return Ok(PageContent::Decoded(Vec::new()));
    };

    // `/Contents` may be a stream, an array of streams, or a reference to either
    let contents = match contents {
        Object::Reference(id) => doc.get_object(*id)?,
        direct => direct,
    };

    let mut data = Vec::new();
    match contents {
        Object::Stream(stream) => {
            return Ok(match decode(stream) {
                Some(decoded) => PageContent::Decoded(decoded),
                None => {
                    log::warn!(
                        "page {:?}: cannot decode content stream, keeping its /Filter",
                        page_id
                    );
                    PageContent::Encoded(stream)
                }
            });
        }
        Object::Array(parts) => {
            for part in parts {
                let Object::Reference(id) = part else { continue };
                let Ok(stream) = doc.get_object(*id)?.as_stream() else { continue };
                match decode(stream) {
                    Some(decoded) => data.extend_from_slice(&decoded),
                    None => log::warn!(
                        "page {:?}: cannot decode content stream {:?}, leaving it out",
                        page_id,
                        id
                    ),
                }
                data.push(b'\n');
            }
        }
        _ => log::warn!("page {:?} has unusable /Contents, drawing it blank", page_id),
    }
    Ok(PageContent::Decoded(data))
}

/// Stream content with its filters undone; `None` when a filter is not supported
fn decode(stream: &Stream) -> Option<Vec<u8>> {
    if stream.dict.get(b"Filter").is_err() {
        return Some(stream.content.clone());
    }
    stream.decompressed_content().ok()
}
