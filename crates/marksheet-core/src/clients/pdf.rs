//! PDF document renderer

use crate::config::MarksheetConfig;
use crate::error::{MarksheetError, Result};
use marksheet_types::{RenderedDocument, StudentRecord};
use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use std::path::PathBuf;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const SCORE_X_MM: f32 = 140.0;

const BODY_SIZE: f32 = 11.0;
const TITLE_SIZE: f32 = 16.0;

/// Roughly how many 11pt Helvetica characters fit on an A4 line
const WRAP_COLUMNS: usize = 90;

/// Renders one feedback document per student record.
///
/// Artifacts are named `"<assignment> - <studentNumber>.pdf"` and written
/// into `output_dir`, overwriting any previous file of that name.
pub struct PdfRenderer {
    assignment: String,
    coordinator: String,
    header: Vec<String>,
    footer: Vec<String>,
    output_dir: PathBuf,
}

impl PdfRenderer {
    pub fn new(config: &MarksheetConfig, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            assignment: config.assignment.clone(),
            coordinator: config.coordinator.clone(),
            header: config.header.clone(),
            footer: config.footer.clone(),
            output_dir: output_dir.into(),
        }
    }

    /// Render the document for one student and write it to disk
    pub fn render(&self, record: &StudentRecord) -> Result<RenderedDocument> {
        let bytes = self.render_bytes(record)?;
        let filename = record.artifact_name(&self.assignment);
        let path = self.output_dir.join(&filename);

        std::fs::write(&path, &bytes).map_err(|e| {
            MarksheetError::Render(format!("Failed to write {}: {}", path.display(), e))
        })?;

        log::debug!("Rendered {} ({} bytes)", path.display(), bytes.len());
        Ok(RenderedDocument { filename, path, bytes })
    }

    fn render_bytes(&self, record: &StudentRecord) -> Result<Vec<u8>> {
        let title = format!("{} - {}", self.assignment, record.number);
        let (doc, page, layer) =
            PdfDocument::new(&title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| MarksheetError::Render(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| MarksheetError::Render(e.to_string()))?;

        let first_layer = doc.get_page(page).get_layer(layer);
        let mut writer = PageWriter::new(&doc, &regular, &bold, first_layer);

        for line in &self.header {
            writer.line(line, BODY_SIZE, false);
        }
        if !self.header.is_empty() {
            writer.blank();
        }

        writer.line(&self.assignment, TITLE_SIZE, true);
        writer.blank();
        writer.line(
            &format!("{} ({})", record.full_name(), record.number),
            BODY_SIZE,
            false,
        );
        writer.blank();

        for criterion in &record.criteria {
            writer.score_row(&criterion.title, &criterion.mark, &criterion.max, false);
        }
        writer.score_row(&record.total.title, &record.total.mark, &record.total.max, true);
        writer.blank();

        if !record.feedback.is_empty() {
            writer.line("Feedback", BODY_SIZE, true);
            for line in wrap(&record.feedback, WRAP_COLUMNS) {
                writer.line(&line, BODY_SIZE, false);
            }
            writer.blank();
        }

        for line in &self.footer {
            writer.line(line, BODY_SIZE, false);
        }
        writer.line(&self.coordinator, BODY_SIZE, false);

        doc.save_to_bytes()
            .map_err(|e| MarksheetError::Render(e.to_string()))
    }
}

/// Cursor over the current page; adds a page when a line would cross
/// the bottom margin.
struct PageWriter<'a> {
    doc: &'a PdfDocumentReference,
    regular: &'a IndirectFontRef,
    bold: &'a IndirectFontRef,
    layer: PdfLayerReference,
    y: f32,
}

impl<'a> PageWriter<'a> {
    fn new(
        doc: &'a PdfDocumentReference,
        regular: &'a IndirectFontRef,
        bold: &'a IndirectFontRef,
        layer: PdfLayerReference,
    ) -> Self {
        Self {
            doc,
            regular,
            bold,
            layer,
            y: PAGE_HEIGHT_MM - MARGIN_MM,
        }
    }

    fn font(&self, bold: bool) -> &'a IndirectFontRef {
        if bold {
            self.bold
        } else {
            self.regular
        }
    }

    fn line(&mut self, text: &str, size: f32, bold: bool) {
        self.layer
            .use_text(text, size, Mm(MARGIN_MM), Mm(self.y), self.font(bold));
        self.advance();
    }

    /// Criterion row: title on the left, "mark / max" in the score column
    fn score_row(&mut self, title: &str, mark: &str, max: &str, bold: bool) {
        let font = self.font(bold);
        self.layer
            .use_text(title, BODY_SIZE, Mm(MARGIN_MM), Mm(self.y), font);
        self.layer.use_text(
            format!("{} / {}", mark, max),
            BODY_SIZE,
            Mm(SCORE_X_MM),
            Mm(self.y),
            font,
        );
        self.advance();
    }

    fn blank(&mut self) {
        self.advance();
    }

    fn advance(&mut self) {
        self.y -= LINE_HEIGHT_MM;
        if self.y < MARGIN_MM {
            let (page, layer) =
                self.doc
                    .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
            self.layer = self.doc.get_page(page).get_layer(layer);
            self.y = PAGE_HEIGHT_MM - MARGIN_MM;
        }
    }
}

/// Greedy word wrap; paragraphs (newlines) are preserved
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(std::mem::take(&mut current));
                current = word.to_string();
            }
        }
        lines.push(current);
    }
    lines
}

/// Cheap sanity check on rendered output
pub fn is_pdf(data: &[u8]) -> bool {
    data.starts_with(b"%PDF")
}
