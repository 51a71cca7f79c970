use super::{render_lines, REPORT_TITLE};
use crate::model::Schedule;
use anyhow::Result;
use std::io::Write;

/// Mise en page du rapport PDF (unités : points PDF).
#[derive(Debug, Clone, Copy)]
pub struct PdfLayout {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub font_size: f32,
    pub line_height: f32,
}

impl Default for PdfLayout {
    /// A4, Helvetica 12, une ligne tous les ~10 mm.
    fn default() -> Self {
        Self {
            page_width: 595.0,
            page_height: 842.0,
            margin: 40.0,
            font_size: 12.0,
            line_height: 28.0,
        }
    }
}

impl PdfLayout {
    pub fn lines_per_page(&self) -> usize {
        let usable = self.page_height - 2.0 * self.margin;
        ((usable / self.line_height).floor() as usize).max(1)
    }
}

/// Rapport paginé : titre centré sur la première page puis une ligne par créneau.
///
/// Le titre occupe deux lignes (titre + blanc) de la première page.
pub fn render_pdf(schedule: &Schedule, layout: &PdfLayout) -> Result<Vec<u8>> {
    let pages = paginate(render_lines(schedule), layout.lines_per_page());
    let page_count = pages.len();

    // 1 catalogue, 2 pages, 3-4 polices, puis (page, contenu) par page.
    let mut objects: Vec<Vec<u8>> = Vec::with_capacity(4 + 2 * page_count);
    let kids: Vec<String> = (0..page_count)
        .map(|i| format!("{} 0 R", 5 + 2 * i))
        .collect();

    objects.push(b"<< /Type /Catalog /Pages 2 0 R >>".to_vec());
    objects.push(
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            page_count
        )
        .into_bytes(),
    );
    objects.push(font_object("Helvetica"));
    objects.push(font_object("Helvetica-Bold"));

    for (index, lines) in pages.iter().enumerate() {
        let content = page_content(index == 0, lines, layout);
        objects.push(
            format!(
                "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 {} {}] /Resources << /Font << /F1 3 0 R /F2 4 0 R >> >> /Contents {} 0 R >>",
                layout.page_width,
                layout.page_height,
                6 + 2 * index
            )
            .into_bytes(),
        );
        let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
        stream.extend_from_slice(&content);
        stream.extend_from_slice(b"\nendstream");
        objects.push(stream);
    }

    let mut out: Vec<u8> = Vec::new();
    out.write_all(b"%PDF-1.4\n")?;
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(out.len());
        write!(out, "{} 0 obj\n", i + 1)?;
        out.write_all(body)?;
        out.write_all(b"\nendobj\n")?;
    }

    let xref = out.len();
    write!(out, "xref\n0 {}\n", objects.len() + 1)?;
    out.write_all(b"0000000000 65535 f \n")?;
    for offset in offsets {
        write!(out, "{:010} 00000 n \n", offset)?;
    }
    write!(
        out,
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
        objects.len() + 1,
        xref
    )?;
    Ok(out)
}

fn font_object(base: &str) -> Vec<u8> {
    format!(
        "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
        base
    )
    .into_bytes()
}

/// Découpe les lignes en pages ; un planning vide produit une page de titre seule.
fn paginate(lines: Vec<String>, per_page: usize) -> Vec<Vec<String>> {
    let first_capacity = per_page.saturating_sub(2).max(1);
    let mut pages = Vec::new();
    let mut rest = lines.into_iter().peekable();

    pages.push(rest.by_ref().take(first_capacity).collect::<Vec<_>>());
    while rest.peek().is_some() {
        pages.push(rest.by_ref().take(per_page).collect());
    }
    pages
}

fn page_content(with_title: bool, lines: &[String], layout: &PdfLayout) -> Vec<u8> {
    let mut ops = String::new();
    let mut y = layout.page_height - layout.margin;

    if with_title {
        // Largeur moyenne Helvetica ~0.5 em : centrage approximatif.
        let width = REPORT_TITLE.chars().count() as f32 * layout.font_size * 0.5;
        let x = ((layout.page_width - width) / 2.0).max(layout.margin);
        ops.push_str(&text_op("F2", layout.font_size, x, y, REPORT_TITLE));
        y -= 2.0 * layout.line_height;
    }

    for line in lines {
        ops.push_str(&text_op("F1", layout.font_size, layout.margin, y, line));
        y -= layout.line_height;
    }

    encode_latin1(&ops)
}

fn text_op(font: &str, size: f32, x: f32, y: f32, text: &str) -> String {
    format!(
        "BT /{} {} Tf {:.2} {:.2} Td ({}) Tj ET\n",
        font,
        size,
        x,
        y,
        escape(text)
    )
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '(' | ')' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// WinAnsi couvre Latin-1 pour les accents courants ; le reste devient `?`.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
