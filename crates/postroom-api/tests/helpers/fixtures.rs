//! Test fixtures: generated PDFs and recipient multipart forms.

use axum_test::multipart::{MultipartForm, Part};
use lopdf::{dictionary, Document, Object};

/// Build a valid PDF with the given number of (empty) pages.
pub fn pdf_with_pages(count: usize) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::with_capacity(count);
    for _ in 0..count {
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count as i64,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).expect("Failed to serialize test PDF");
    bytes
}

/// Multipart part for a PDF upload.
pub fn pdf_part(data: Vec<u8>) -> Part {
    Part::bytes(data)
        .file_name("document.pdf")
        .mime_type("application/pdf")
}

/// Address-only form, no document attached.
pub fn address_form(name: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("name", name)
        .add_text("street", "Avenida Paulista")
        .add_text("number", "1578")
        .add_text("neighborhood", "Bela Vista")
        .add_text("city", "Sao Paulo")
        .add_text("state", "SP")
        .add_text("postal_code", "01310-200")
}

/// Complete recipient form: address fields plus a generated PDF of `pages` pages.
pub fn recipient_form(name: &str, pages: usize) -> MultipartForm {
    address_form(name).add_part("file", pdf_part(pdf_with_pages(pages)))
}
