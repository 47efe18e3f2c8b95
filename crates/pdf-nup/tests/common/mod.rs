#![allow(dead_code)]

use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

pub const A4: (i64, i64) = (595, 842);
pub const A4_LANDSCAPE: (i64, i64) = (842, 595);
pub const LEGAL: (i64, i64) = (612, 1008);

/// Build a document whose page `i` shows the text `i` and carries
/// `/Rotate rotation(i)`.
pub fn create_labeled_pdf(
    num_pages: usize,
    (width, height): (i64, i64),
    rotation: impl Fn(usize) -> i64,
) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let content = format!("BT /F1 48 Tf 100 100 Td ({}) Tj ET", i);
        let content_id = doc.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

        let resources = Dictionary::from_iter(vec![(
            "Font",
            Object::Dictionary(Dictionary::from_iter(vec![("F1", Object::Reference(font_id))])),
        )]);

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(width),
                    Object::Integer(height),
                ]),
            ),
            ("Resources", Object::Dictionary(resources)),
            ("Contents", Object::Reference(content_id)),
        ]);
        let degrees = rotation(i);
        if degrees != 0 {
            page.set("Rotate", Object::Integer(degrees));
        }
        kids.push(Object::Reference(doc.add_object(page)));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", catalog_id);

    doc
}

/// Unrotated labeled document
pub fn create_test_pdf(num_pages: usize, size: (i64, i64)) -> Document {
    create_labeled_pdf(num_pages, size, |_| 0)
}

pub fn pdf_bytes(doc: &mut Document) -> Vec<u8> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).unwrap();
    writer
}

/// One drawn source page on an output sheet
#[derive(Debug)]
pub struct Placement {
    pub label: String,
    pub matrix: [f32; 6],
    pub bbox: [f32; 4],
}

fn number(obj: &Object) -> f32 {
    match obj {
        Object::Integer(i) => *i as f32,
        Object::Real(r) => *r,
        other => panic!("expected a number, got {:?}", other),
    }
}

fn xobject_placement(doc: &Document, page_id: ObjectId, name: &[u8], matrix: [f32; 6]) -> Placement {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let xobject_id = xobjects.get(name).unwrap().as_reference().unwrap();
    let stream = doc.get_object(xobject_id).unwrap().as_stream().unwrap();

    let bbox: Vec<f32> = stream
        .dict
        .get(b"BBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(number)
        .collect();

    let content = Content::decode(&stream.content).unwrap();
    let label = content
        .operations
        .iter()
        .find(|op| op.operator == "Tj")
        .and_then(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(String::from_utf8_lossy(bytes).into_owned()),
            _ => None,
        })
        .unwrap_or_default();

    Placement {
        label,
        matrix,
        bbox: [bbox[0], bbox[1], bbox[2], bbox[3]],
    }
}

/// Drawn pages of every output sheet, in drawing order
pub fn sheet_placements(doc: &Document) -> Vec<Vec<Placement>> {
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            let mut matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
            let mut placements = Vec::new();
            for op in &content.operations {
                match op.operator.as_str() {
                    "cm" => {
                        let values: Vec<f32> = op.operands.iter().map(number).collect();
                        matrix = [values[0], values[1], values[2], values[3], values[4], values[5]];
                    }
                    "Do" => {
                        let name = op.operands[0].as_name().unwrap();
                        placements.push(xobject_placement(doc, page_id, name, matrix));
                    }
                    _ => {}
                }
            }
            placements
        })
        .collect()
}

/// Labels of every output sheet, in drawing order
pub fn sheet_labels(doc: &Document) -> Vec<Vec<String>> {
    sheet_placements(doc)
        .into_iter()
        .map(|sheet| sheet.into_iter().map(|p| p.label).collect())
        .collect()
}

/// Expected labels for `pages` source pages grouped `n` per sheet
pub fn expected_groups(pages: usize, n: usize) -> Vec<Vec<String>> {
    (0..pages)
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .chunks(n)
        .map(|c| c.to_vec())
        .collect()
}

pub fn sheet_size(doc: &Document, page_id: ObjectId) -> (f32, f32) {
    let media_box = doc
        .get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap();
    (number(&media_box[2]), number(&media_box[3]))
}
