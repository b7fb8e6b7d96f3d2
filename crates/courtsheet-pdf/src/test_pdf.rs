//! In-memory PDFs for tests.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

/// Build a PDF with one page per entry; each `(x, y, text)` is shown at its
/// own absolute position.
pub(crate) fn build_pdf(pages: &[&[(f32, f32, &str)]]) -> Vec<u8> {
    let pages = pages
        .iter()
        .map(|fragments| {
            let mut operations = Vec::new();
            for &(x, y, text) in fragments.iter() {
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), 10.into()]));
                operations.push(Operation::new("Td", vec![Object::Real(x), Object::Real(y)]));
                operations.push(Operation::new("Tj", vec![Object::string_literal(text)]));
                operations.push(Operation::new("ET", vec![]));
            }
            operations
        })
        .collect();
    build_pdf_from_ops(pages)
}

/// Build a PDF whose pages run the given operators verbatim. Font `F1` is
/// Courier with WinAnsi encoding.
pub(crate) fn build_pdf_from_ops(pages: Vec<Vec<Operation>>) -> Vec<u8> {
    let streams = pages
        .into_iter()
        .map(|operations| Content { operations }.encode().expect("encode content"))
        .collect();
    build_pdf_from_streams(streams)
}

/// Build a PDF with one page per raw content stream.
pub(crate) fn build_pdf_from_streams(streams: Vec<Vec<u8>>) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for stream in streams {
        let content_id = doc.add_object(Stream::new(dictionary! {}, stream));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("save pdf");
    bytes
}

/// One report page laid out the way the court system prints it.
pub(crate) fn sample_report_pdf() -> Vec<u8> {
    build_pdf(&[
        &[
            (20.0, 760.0, "11-21-25 AM PM REPORT 111 CENTRE"),
            (20.0, 740.0, "Sending Part"),
            (120.0, 740.0, "Defendant"),
            (260.0, 740.0, "Top Charge"),
            (20.0, 720.0, "31 FARBER"),
            (120.0, 720.0, "Cal Mon OUT 11/24"),
            (20.0, 700.0, "PT 51 JS 11/02"),
            (120.0, 700.0, "JONES, ROBERT IND-1234/24"),
            (260.0, 700.0, "ROB 2 ADA KIM"),
        ],
        &[
            (20.0, 760.0, "11-21-25 AM PM REPORT 111 CENTRE"),
            (20.0, 720.0, "52 HARRIS"),
            (120.0, 720.0, "AVAILABLE"),
        ],
    ])
}
