//! Sheet rendering
//!
//! Builds the output document one sheet at a time. A renderer lives for a
//! single invocation; its copy cache is dropped with it.

use crate::constants::{OUTPUT_PDF_VERSION, XOBJECT_NAME_PREFIX};
use crate::layout::Sheet;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::source::page_ids;
use super::xobject::{ObjectCopier, create_page_xobject};

/// Renders [`Sheet`] layouts into a new PDF document
pub struct SheetRenderer<'a> {
    source_page_ids: Vec<ObjectId>,
    output: Document,
    pages_tree_id: ObjectId,
    page_refs: Vec<Object>,
    copier: ObjectCopier<'a>,
}

impl<'a> SheetRenderer<'a> {
    pub fn new(source: &'a Document) -> Self {
        let mut output = Document::with_version(OUTPUT_PDF_VERSION);
        let pages_tree_id = output.new_object_id();

        Self {
            source_page_ids: page_ids(source),
            output,
            pages_tree_id,
            page_refs: Vec::new(),
            copier: ObjectCopier::new(source),
        }
    }

    /// Append one sheet as a page of the output document
    pub fn render(&mut self, sheet: &Sheet) -> Result<ObjectId> {
        let mut content_ops = Vec::with_capacity(sheet.assignments.len());
        let mut xobjects = Dictionary::new();

        for (idx, assignment) in sheet.assignments.iter().enumerate() {
            let page = &assignment.page;
            let source_page_id = *self.source_page_ids.get(page.index).ok_or_else(|| {
                NupError::Validation(format!(
                    "source page {} does not exist in the document",
                    page.index + 1
                ))
            })?;

            let xobject_name = format!("{}{}", XOBJECT_NAME_PREFIX, idx);
            let xobject_id = create_page_xobject(
                &mut self.output,
                &mut self.copier,
                source_page_id,
                &page.media_box,
            )?;
            xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject_id));

            content_ops.push(placement_command(
                &xobject_name,
                assignment.transform.matrix(page),
            ));
        }

        let mut resources = Dictionary::new();
        resources.set("XObject", Object::Dictionary(xobjects));

        let content = content_ops.concat();
        let content_id = self
            .output
            .add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_tree_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(sheet.width),
                Object::Real(sheet.height),
            ]),
        );
        page_dict.set("Contents", Object::Reference(content_id));
        page_dict.set("Resources", Object::Dictionary(resources));

        let page_id = self.output.add_object(page_dict);
        self.page_refs.push(Object::Reference(page_id));

        log::debug!(
            "sheet {}: pages {:?}, {} empty slot(s)",
            sheet.index + 1,
            sheet
                .source_indices()
                .iter()
                .map(|i| i + 1)
                .collect::<Vec<_>>(),
            sheet.empty_slots()
        );

        Ok(page_id)
    }

    /// Close the page tree and return the finished document
    pub fn finish(mut self) -> Document {
        let count = self.page_refs.len() as i64;
        log::debug!(
            "{} sheets rendered, {} source objects copied",
            count,
            self.copier.copied_count()
        );

        let pages_dict = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Pages".to_vec())),
            ("Kids", Object::Array(self.page_refs)),
            ("Count", Object::Integer(count)),
        ]);
        self.output
            .objects
            .insert(self.pages_tree_id, Object::Dictionary(pages_dict));

        let catalog_id = self.output.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Catalog".to_vec())),
            ("Pages", Object::Reference(self.pages_tree_id)),
        ]));
        self.output.trailer.set("Root", catalog_id);

        self.output
    }
}

/// Generate the content stream command that draws one page.
fn placement_command(xobject_name: &str, matrix: [f32; 6]) -> String {
    let [a, b, c, d, e, f] = matrix;
    format!(
        "q {} {} {} {} {} {} cm /{} Do Q\n",
        a, b, c, d, e, f, xobject_name
    )
}
