//! Line reconstruction from positioned PDF text.
//!
//! Walks each page's content stream, records every shown string with the
//! device-space position of its origin, then buckets fragments into rows by
//! baseline. Rows read top to bottom, fragments within a row left to right.

use std::collections::BTreeMap;

use courtsheet_core::ParserConfig;
use lopdf::content::Content;
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, warn};

type Matrix = [f32; 6];

const IDENTITY: Matrix = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

/// `TJ` adjustments more negative than this (thousandths of an em) read as a space.
const TJ_SPACE_THRESHOLD: f32 = -200.0;

/// A shown string and where its origin landed on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFragment {
    pub text: String,
    pub x: f32,
    /// PDF coordinates: larger is higher on the page.
    pub y: f32,
}

impl TextFragment {
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
        }
    }
}

/// Reconstructed lines of one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageText {
    /// 1-based page number.
    pub number: u32,
    pub lines: Vec<String>,
}

impl PageText {
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_blank(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Group fragments into rows and render each row as one line.
pub fn reconstruct_lines(fragments: &[TextFragment], config: &ParserConfig) -> Vec<String> {
    let mut rows: BTreeMap<i64, Vec<&TextFragment>> = BTreeMap::new();
    for fragment in fragments {
        rows.entry(config.row_key(fragment.y))
            .or_default()
            .push(fragment);
    }

    rows.into_values()
        .rev()
        .filter_map(|mut row| {
            row.sort_by(|a, b| a.x.total_cmp(&b.x));
            let line = row
                .iter()
                .map(|f| f.text.trim())
                .filter(|t| !t.is_empty())
                .collect::<Vec<_>>()
                .join(" ");
            (!line.is_empty()).then_some(line)
        })
        .collect()
}

/// Reconstruct every page of `doc`, in page order.
///
/// A page whose content cannot be read comes back blank rather than failing
/// the whole document.
pub fn extract_pages(doc: &Document, config: &ParserConfig) -> Vec<PageText> {
    doc.get_pages()
        .into_iter()
        .map(|(number, page_id)| {
            let fragments = match page_fragments(doc, page_id) {
                Ok(fragments) => fragments,
                Err(e) => {
                    warn!(page = number, error = %e, "could not read page content");
                    Vec::new()
                }
            };
            let lines = reconstruct_lines(&fragments, config);
            debug!(
                page = number,
                fragments = fragments.len(),
                lines = lines.len(),
                "reconstructed page"
            );
            PageText { number, lines }
        })
        .collect()
}

/// Positioned strings shown on one page.
pub fn page_fragments(doc: &Document, page_id: ObjectId) -> Result<Vec<TextFragment>, lopdf::Error> {
    let fonts = doc.get_page_fonts(page_id).unwrap_or_default();
    let content = Content::decode(&doc.get_page_content(page_id)?)?;

    let mut state = TextState::default();
    let mut fragments = Vec::new();

    for op in &content.operations {
        let operands = &op.operands;
        match op.operator.as_str() {
            "q" => state.ctm_stack.push(state.ctm),
            "Q" => {
                if let Some(ctm) = state.ctm_stack.pop() {
                    state.ctm = ctm;
                }
            }
            "cm" => {
                if let Some(m) = matrix_operand(operands) {
                    state.ctm = multiply(&m, &state.ctm);
                }
            }
            "BT" => {
                state.tm = IDENTITY;
                state.tlm = IDENTITY;
            }
            "Tf" => {
                if let Some(name) = operands.first().and_then(|o| o.as_name().ok()) {
                    state.font = name.to_vec();
                }
            }
            "TL" => {
                if let Some(leading) = operands.first().and_then(number) {
                    state.leading = leading;
                }
            }
            "Td" | "TD" => {
                let tx = operands.first().and_then(number).unwrap_or(0.0);
                let ty = operands.get(1).and_then(number).unwrap_or(0.0);
                if op.operator == "TD" {
                    state.leading = -ty;
                }
                state.move_line(tx, ty);
            }
            "Tm" => {
                if let Some(m) = matrix_operand(operands) {
                    state.tm = m;
                    state.tlm = m;
                }
            }
            "T*" => state.next_line(),
            "Tj" => {
                if let Some(text) = operands.first().and_then(|o| decode(doc, &fonts, &state.font, o)) {
                    state.show(text, &mut fragments);
                }
            }
            "TJ" => {
                if let Some(Object::Array(items)) = operands.first() {
                    let text = decode_array(doc, &fonts, &state.font, items);
                    state.show(text, &mut fragments);
                }
            }
            "'" => {
                state.next_line();
                if let Some(text) = operands.first().and_then(|o| decode(doc, &fonts, &state.font, o)) {
                    state.show(text, &mut fragments);
                }
            }
            "\"" => {
                state.next_line();
                if let Some(text) = operands.get(2).and_then(|o| decode(doc, &fonts, &state.font, o)) {
                    state.show(text, &mut fragments);
                }
            }
            _ => {}
        }
    }

    Ok(fragments)
}

#[derive(Debug, Clone)]
struct TextState {
    ctm: Matrix,
    ctm_stack: Vec<Matrix>,
    tm: Matrix,
    tlm: Matrix,
    font: Vec<u8>,
    leading: f32,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            ctm: IDENTITY,
            ctm_stack: Vec::new(),
            tm: IDENTITY,
            tlm: IDENTITY,
            font: Vec::new(),
            leading: 0.0,
        }
    }
}

impl TextState {
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.tlm = multiply(&[1.0, 0.0, 0.0, 1.0, tx, ty], &self.tlm);
        self.tm = self.tlm;
    }

    /// `T*`: unset leading is zero, so the line start stays on its baseline.
    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Device-space origin of the next glyph.
    fn origin(&self) -> (f32, f32) {
        let m = multiply(&self.tm, &self.ctm);
        (m[4], m[5])
    }

    fn show(&self, text: String, out: &mut Vec<TextFragment>) {
        if text.trim().is_empty() {
            return;
        }
        let (x, y) = self.origin();
        out.push(TextFragment { text, x, y });
    }
}

/// `a × b` for PDF affine matrices `[a b c d e f]`.
fn multiply(a: &Matrix, b: &Matrix) -> Matrix {
    [
        a[0] * b[0] + a[1] * b[2],
        a[0] * b[1] + a[1] * b[3],
        a[2] * b[0] + a[3] * b[2],
        a[2] * b[1] + a[3] * b[3],
        a[4] * b[0] + a[5] * b[2] + b[4],
        a[4] * b[1] + a[5] * b[3] + b[5],
    ]
}

fn number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

fn matrix_operand(operands: &[Object]) -> Option<Matrix> {
    if operands.len() < 6 {
        return None;
    }
    let mut m = IDENTITY;
    for (slot, operand) in m.iter_mut().zip(operands) {
        *slot = number(operand)?;
    }
    Some(m)
}

fn decode_array(
    doc: &Document,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    font: &[u8],
    items: &[Object],
) -> String {
    let mut text = String::new();
    for item in items {
        match item {
            Object::String(..) => {
                if let Some(s) = decode(doc, fonts, font, item) {
                    text.push_str(&s);
                }
            }
            other => {
                if number(other).is_some_and(|n| n < TJ_SPACE_THRESHOLD) && !text.ends_with(' ') {
                    text.push(' ');
                }
            }
        }
    }
    text
}

/// Decode a string operand through the font's encoding, falling back to
/// UTF-16BE (with BOM) and then Latin-1.
fn decode(
    doc: &Document,
    fonts: &BTreeMap<Vec<u8>, &Dictionary>,
    font: &[u8],
    obj: &Object,
) -> Option<String> {
    let Object::String(bytes, _) = obj else {
        return None;
    };

    if let Some(dict) = fonts.get(font) {
        if let Ok(encoding) = dict.get_font_encoding(doc) {
            if let Ok(text) = Document::decode_text(&encoding, bytes) {
                return Some(text);
            }
        }
    }

    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        return Some(String::from_utf16_lossy(&units));
    }

    Some(bytes.iter().map(|&b| b as char).collect())
}
