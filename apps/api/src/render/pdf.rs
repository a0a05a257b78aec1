//! Serializes a laid-out [`RenderedDocument`] into a PDF with `lopdf`.
//!
//! Only the standard-14 Helvetica faces are used, so no font program is
//! embedded. Text is encoded as WinAnsi (cp1252); characters outside it are
//! written as `?`.

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream, StringFormat};

use crate::render::flow::{DrawOp, RenderedDocument};
use crate::render::font_metrics::FontFace;
use crate::render::theme::{Color, Stroke};
use crate::render::RenderError;

/// Writes `document` as a complete PDF file to `writer`.
pub fn write_pdf<W: Write>(
    document: &RenderedDocument,
    title: &str,
    writer: &mut W,
) -> Result<(), RenderError> {
    let mut pdf = Document::with_version("1.7");
    let pages_id = pdf.new_object_id();

    let mut fonts = Dictionary::new();
    for face in FontFace::ALL {
        let font_id = pdf.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = pdf.add_object(dictionary! { "Font" => fonts });

    let geometry = document.geometry;
    let mut page_ids: Vec<Object> = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let content = Content {
            operations: page.ops.iter().flat_map(operations_for).collect::<Vec<Operation>>(),
        };
        let content_id = pdf.add_object(Stream::new(Dictionary::new(), content.encode()?));
        let page_id = pdf.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), geometry.width.into(), geometry.height.into()],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id.into());
    }

    let page_count = page_ids.len() as i64;
    pdf.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => page_ids,
            "Count" => page_count,
        }),
    );

    let catalog_id = pdf.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    pdf.trailer.set("Root", catalog_id);

    let info_id = pdf.add_object(dictionary! {
        "Title" => Object::String(to_win_ansi(title), StringFormat::Literal),
        "Producer" => Object::string_literal(concat!("resume_flow ", env!("CARGO_PKG_VERSION"))),
    });
    pdf.trailer.set("Info", info_id);

    pdf.save_to(writer)?;
    Ok(())
}

/// Convenience wrapper returning the PDF bytes.
pub fn to_pdf_bytes(document: &RenderedDocument, title: &str) -> Result<Vec<u8>, RenderError> {
    let mut buf = Vec::new();
    write_pdf(document, title, &mut buf)?;
    Ok(buf)
}

fn rgb(op: &str, color: Color) -> Operation {
    let [r, g, b] = color.components();
    Operation::new(op, vec![r.into(), g.into(), b.into()])
}

fn stroke_state(stroke: &Stroke) -> [Operation; 2] {
    [
        rgb("RG", stroke.color),
        Operation::new("w", vec![stroke.width.into()]),
    ]
}

fn operations_for(op: &DrawOp) -> Vec<Operation> {
    match op {
        DrawOp::Text {
            x,
            y,
            text,
            face,
            size,
            color,
        } => vec![
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![Object::Name(face.resource_name().as_bytes().to_vec()), (*size).into()],
            ),
            rgb("rg", *color),
            Operation::new("Td", vec![(*x).into(), (*y).into()]),
            Operation::new(
                "Tj",
                vec![Object::String(to_win_ansi(text), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ],
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            let mut ops = vec![Operation::new("q", vec![])];
            if let Some(fill) = fill {
                ops.push(rgb("rg", *fill));
            }
            if let Some(stroke) = stroke {
                ops.extend(stroke_state(stroke));
            }
            ops.push(Operation::new(
                "re",
                vec![(*x).into(), (*y).into(), (*width).into(), (*height).into()],
            ));
            let paint = match (fill.is_some(), stroke.is_some()) {
                (true, true) => "B",
                (true, false) => "f",
                (false, true) => "S",
                (false, false) => "n",
            };
            ops.push(Operation::new(paint, vec![]));
            ops.push(Operation::new("Q", vec![]));
            ops
        }
        DrawOp::Line { from, to, stroke } => {
            let mut ops = vec![Operation::new("q", vec![])];
            ops.extend(stroke_state(stroke));
            ops.push(Operation::new("m", vec![from.0.into(), from.1.into()]));
            ops.push(Operation::new("l", vec![to.0.into(), to.1.into()]));
            ops.push(Operation::new("S", vec![]));
            ops.push(Operation::new("Q", vec![]));
            ops
        }
    }
}

/// Encodes `s` as Windows-1252, the encoding declared for every font.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{0192}' => 0x83,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2020}' => 0x86,
            '\u{2021}' => 0x87,
            '\u{02C6}' => 0x88,
            '\u{2030}' => 0x89,
            '\u{0160}' => 0x8A,
            '\u{2039}' => 0x8B,
            '\u{0152}' => 0x8C,
            '\u{017D}' => 0x8E,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{02DC}' => 0x98,
            '\u{2122}' => 0x99,
            '\u{0161}' => 0x9A,
            '\u{203A}' => 0x9B,
            '\u{0153}' => 0x9C,
            '\u{017E}' => 0x9E,
            '\u{0178}' => 0x9F,
            c if (c as u32) < 0x80 || (0xA0..=0xFF).contains(&(c as u32)) => c as u8,
            _ => b'?',
        })
        .collect()
}
