mod common;

use common::*;
use lopdf::Document;
use pdf_nup::*;
use std::io::Cursor;

#[test]
fn test_square_counts_on_a4() {
    for size in [A4, A4_LANDSCAPE] {
        let source = create_test_pdf(50, size);
        for n in [4, 9, 16] {
            let output = nup_document(&source, &NupOptions::with_pages_per_sheet(n)).unwrap();
            assert_eq!(output.get_pages().len(), 50usize.div_ceil(n), "n = {}", n);
            assert_eq!(sheet_labels(&output), expected_groups(50, n), "n = {}", n);
        }
    }
}

#[test]
fn test_half_square_counts_on_a4() {
    for size in [A4, A4_LANDSCAPE] {
        let source = create_test_pdf(50, size);
        for n in [2, 8, 18] {
            let output = nup_document(&source, &NupOptions::with_pages_per_sheet(n)).unwrap();
            assert_eq!(output.get_pages().len(), 50usize.div_ceil(n), "n = {}", n);
            assert_eq!(sheet_labels(&output), expected_groups(50, n), "n = {}", n);
        }
    }
}

#[test]
fn test_legal_pages_are_squeezed_but_complete() {
    let source = create_test_pdf(50, LEGAL);
    for n in [2, 4, 8, 9] {
        let output = nup_document(&source, &NupOptions::with_pages_per_sheet(n)).unwrap();
        assert_eq!(sheet_labels(&output), expected_groups(50, n), "n = {}", n);
    }
}

#[test]
fn test_two_up_reading_order() {
    let source = create_test_pdf(10, A4);
    let output = nup_document(&source, &NupOptions::with_pages_per_sheet(2)).unwrap();

    let labels = sheet_labels(&output);
    assert_eq!(labels.len(), 5);
    assert_eq!(labels[0], vec!["0", "1"]);
    assert_eq!(labels[4], vec!["8", "9"]);

    // Two portrait pages share a landscape sheet of the same paper
    let first_sheet = *output.get_pages().values().next().unwrap();
    let (w, h) = sheet_size(&output, first_sheet);
    assert!((w - 842.0).abs() < 0.01 && (h - 595.0).abs() < 0.01);
}

#[test]
fn test_last_sheet_partially_filled() {
    let source = create_test_pdf(10, A4);
    let output = nup_document(&source, &NupOptions::default()).unwrap();

    let placements = sheet_placements(&output);
    assert_eq!(placements.len(), 3);
    assert_eq!(placements[2].len(), 2);
    assert_eq!(placements[2][0].label, "8");
    assert_eq!(placements[2][1].label, "9");
}

#[test]
fn test_direction_changes_slot_positions() {
    let source = create_test_pdf(4, A4);
    let options = NupOptions {
        direction: "column-major,R2L,T2B".parse().unwrap(),
        ..Default::default()
    };
    let output = nup_document(&source, &options).unwrap();
    let sheet = &sheet_placements(&output)[0];

    // Pages still drawn in source order, but page 0 lands top-right
    let labels: Vec<&str> = sheet.iter().map(|p| p.label.as_str()).collect();
    assert_eq!(labels, vec!["0", "1", "2", "3"]);

    let origin = |p: &Placement| (p.matrix[4], p.matrix[5]);
    assert_eq!(origin(&sheet[0]), (297.5, 421.0));
    assert_eq!(origin(&sheet[1]), (297.5, 0.0));
    assert_eq!(origin(&sheet[2]), (0.0, 421.0));
    assert_eq!(origin(&sheet[3]), (0.0, 0.0));
}

#[test]
fn test_rotated_pages_appear_upright() {
    let source = create_labeled_pdf(8, A4, |i| (i % 4) as i64 * 90);
    let output = nup_document(&source, &NupOptions::default()).unwrap();

    let sheets = sheet_placements(&output);
    assert_eq!(sheets.len(), 2);

    let (cell_w, cell_h) = (595.0 / 2.0, 842.0 / 2.0);
    for sheet in &sheets {
        for (slot, placement) in sheet.iter().enumerate() {
            let [x0, y0, x1, y1] = placement.bbox;
            let rotation = placement.label.parse::<usize>().unwrap() % 4;

            // The corner a viewer shows at the top-left of the rotated page
            let visual_top_left = match rotation {
                0 => (x0, y1),
                1 => (x0, y0),
                2 => (x1, y0),
                _ => (x1, y1),
            };
            let [a, b, c, d, e, f] = placement.matrix;
            let mapped = (
                a * visual_top_left.0 + c * visual_top_left.1 + e,
                b * visual_top_left.0 + d * visual_top_left.1 + f,
            );

            let expected = (
                (slot % 2) as f32 * cell_w,
                842.0 - (slot / 2) as f32 * cell_h,
            );
            assert!(
                (mapped.0 - expected.0).abs() < 0.05 && (mapped.1 - expected.1).abs() < 0.05,
                "page {}: top-left mapped to {:?}, expected {:?}",
                placement.label,
                mapped,
                expected
            );
        }
    }
}

#[test]
fn test_rotated_sources_with_all_counts() {
    for size in [A4, A4_LANDSCAPE] {
        let source = create_labeled_pdf(50, size, |i| (i % 4) as i64 * 90);
        for n in [2, 4, 8, 9] {
            let output = nup_document(&source, &NupOptions::with_pages_per_sheet(n)).unwrap();
            assert_eq!(sheet_labels(&output), expected_groups(50, n));
        }
    }
}

#[test]
fn test_resources_are_carried_into_xobjects() {
    let source = create_test_pdf(4, A4);
    let output = nup_document(&source, &NupOptions::default()).unwrap();

    let page_id = *output.get_pages().values().next().unwrap();
    let page = output.get_dictionary(page_id).unwrap();
    let xobjects = page
        .get(b"Resources")
        .unwrap()
        .as_dict()
        .unwrap()
        .get(b"XObject")
        .unwrap()
        .as_dict()
        .unwrap();

    let mut font_refs = Vec::new();
    for name in ["P0", "P1", "P2", "P3"] {
        let id = xobjects.get(name.as_bytes()).unwrap().as_reference().unwrap();
        let stream = output.get_object(id).unwrap().as_stream().unwrap();
        let resources = stream.dict.get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();
        font_refs.push(fonts.get(b"F1").unwrap().as_reference().unwrap());
    }

    // The shared font is copied once
    font_refs.dedup();
    assert_eq!(font_refs.len(), 1);
}

#[test]
fn test_empty_document_is_rejected() {
    let source = create_test_pdf(0, A4);
    match nup_document(&source, &NupOptions::default()) {
        Err(NupError::Validation(_)) => {}
        other => panic!("Expected Validation error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unsupported_count_fails_before_output_is_opened() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("doc.pdf");
    std::fs::write(&input, pdf_bytes(&mut create_test_pdf(6, A4))).unwrap();
    let output = dir.path().join("out.pdf");

    let result = layout_nup(
        Source::path(&input),
        Some(Sink::path(&output)),
        &NupOptions::with_pages_per_sheet(3),
    );
    assert!(matches!(result, Err(NupError::Configuration(_))));
    assert!(!output.exists());

    // Derived outputs are not created either
    let result = layout_nup(Source::path(&input), None, &NupOptions::with_pages_per_sheet(3));
    assert!(matches!(result, Err(NupError::Configuration(_))));
    assert!(!dir.path().join("doc-3up.pdf").exists());
}

#[test]
fn test_path_input_derives_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("test-a4-l.pdf");
    std::fs::write(&input, pdf_bytes(&mut create_test_pdf(10, A4_LANDSCAPE))).unwrap();

    let written = layout_nup(Source::path(&input), None, &NupOptions::with_pages_per_sheet(8))
        .unwrap()
        .unwrap();
    assert_eq!(written, dir.path().join("test-a4-l-8up.pdf"));

    let loaded = Document::load(&written).unwrap();
    assert_eq!(loaded.get_pages().len(), 2);
    assert_eq!(sheet_labels(&loaded), expected_groups(10, 8));
}

#[test]
fn test_custom_output_pattern() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("file.pdf");
    std::fs::write(&input, pdf_bytes(&mut create_test_pdf(3, A4))).unwrap();

    let options = NupOptions {
        output_pattern: "{dirname}/out-{n}up.pdf".to_string(),
        ..NupOptions::with_pages_per_sheet(9)
    };
    let written = layout_nup(Source::path(&input), None, &options).unwrap().unwrap();
    assert_eq!(written, dir.path().join("out-9up.pdf"));
    assert!(written.exists());
}

#[test]
fn test_pattern_naming_the_input_leaves_it_untouched() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let input = dir.path().join("file.pdf");
    let original = pdf_bytes(&mut create_test_pdf(4, A4));
    std::fs::write(&input, &original).unwrap();

    let options = NupOptions {
        output_pattern: "{dirname}/sub/../{base}{ext}".to_string(),
        ..Default::default()
    };
    let result = layout_nup(Source::path(&input), None, &options);
    assert!(matches!(result, Err(NupError::Configuration(_))));
    assert_eq!(std::fs::read(&input).unwrap(), original);
}

#[test]
fn test_stream_input_to_path_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("from-stream.pdf");
    let mut input = Cursor::new(pdf_bytes(&mut create_test_pdf(10, A4_LANDSCAPE)));
    // Reading starts at the beginning regardless of the stream position
    input.set_position(5);

    let written = layout_nup(
        Source::Stream(&mut input),
        Some(Sink::path(&output)),
        &NupOptions::default(),
    )
    .unwrap();
    assert_eq!(written, Some(output.clone()));
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 3);
}

#[test]
fn test_stream_input_without_output_is_rejected() {
    let mut input = Cursor::new(pdf_bytes(&mut create_test_pdf(4, A4)));
    let result = layout_nup(Source::Stream(&mut input), None, &NupOptions::default());
    match result {
        Err(NupError::Validation(msg)) => assert!(msg.contains("output target required")),
        other => panic!("Expected Validation error, got {:?}", other),
    }
}

#[test]
fn test_stream_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("test-a4-l.pdf");
    std::fs::write(&input, pdf_bytes(&mut create_test_pdf(10, A4_LANDSCAPE))).unwrap();

    let mut output = Cursor::new(Vec::new());
    let written = layout_nup(
        Source::path(&input),
        Some(Sink::Stream(&mut output)),
        &NupOptions::default(),
    )
    .unwrap();
    assert_eq!(written, None);

    // Left at the end of the content, not rewound
    assert_eq!(output.position() as usize, output.get_ref().len());

    let data = output.into_inner();
    assert!(data.starts_with(b"%PDF"));
    assert!(data.trim_ascii_end().ends_with(b"%%EOF"));

    let loaded = Document::load_mem(&data).unwrap();
    assert_eq!(loaded.get_pages().len(), 3);
    // No derived file was written next to the input
    assert!(!dir.path().join("test-a4-l-4up.pdf").exists());
}

#[test]
fn test_file_output_stream() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("in.pdf");
    std::fs::write(&input, pdf_bytes(&mut create_test_pdf(5, A4))).unwrap();
    let output_path = dir.path().join("to-file-obj.pdf");

    {
        let mut file = std::fs::File::create(&output_path).unwrap();
        let written = layout_nup(
            Source::path(&input),
            Some(Sink::Stream(&mut file)),
            &NupOptions::default(),
        )
        .unwrap();
        assert!(written.is_none());
    }

    let data = std::fs::read(&output_path).unwrap();
    assert!(data.starts_with(b"%PDF"));
    assert!(data.trim_ascii_end().ends_with(b"%%EOF"));
}

#[test]
fn test_verbose_does_not_change_output() {
    let source_bytes = pdf_bytes(&mut create_test_pdf(6, A4));

    let mut quiet = Vec::new();
    let mut loud = Vec::new();
    for (sink, verbose) in [(&mut quiet, false), (&mut loud, true)] {
        let mut input = Cursor::new(source_bytes.clone());
        let options = NupOptions {
            verbose,
            ..Default::default()
        };
        layout_nup(Source::Stream(&mut input), Some(Sink::Stream(sink)), &options).unwrap();
    }
    assert_eq!(quiet, loud);
}

#[test]
fn test_malformed_input_propagates_pdf_error() {
    let mut input = Cursor::new(b"not a pdf at all".to_vec());
    let mut output = Vec::new();
    let result = layout_nup(
        Source::Stream(&mut input),
        Some(Sink::Stream(&mut output)),
        &NupOptions::default(),
    );
    assert!(matches!(result, Err(NupError::Pdf(_))));
    assert!(output.is_empty());
}

#[test]
fn test_missing_input_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = layout_nup(
        Source::path(dir.path().join("missing.pdf")),
        None,
        &NupOptions::default(),
    );
    assert!(matches!(result, Err(NupError::Io(_))));
}
