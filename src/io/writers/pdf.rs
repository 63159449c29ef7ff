use std::path::{Path, PathBuf};

use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element, elements};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::report::document::{
    Align, DocumentLayout, DocumentRenderer, FontStyle, LayoutElement, TextLine,
};

const PAGE_MARGIN_MM: i32 = 18;

const REGULAR_FONT: &str = "DejaVuSans.ttf";
const BOLD_FONT: &str = "DejaVuSans-Bold.ttf";
const ITALIC_FONT: &str = "DejaVuSans-Oblique.ttf";
const BOLD_ITALIC_FONT: &str = "DejaVuSans-BoldOblique.ttf";

/// Renders layouts to PDF using Unicode-capable TrueType fonts from `fonts_dir`.
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    fonts_dir: PathBuf,
}

impl PdfRenderer {
    pub fn new(fonts_dir: impl Into<PathBuf>) -> Self {
        Self {
            fonts_dir: fonts_dir.into(),
        }
    }

    fn load_font(&self, file: &str) -> Result<FontData> {
        let path = self.fonts_dir.join(file);
        FontData::load(&path, None)
            .map_err(|e| Error::Document(format!("cannot load font {}: {}", path.display(), e)))
    }

    fn load_fonts(&self) -> Result<FontFamily<FontData>> {
        let regular = self.load_font(REGULAR_FONT)?;
        let bold = self.load_font(BOLD_FONT)?;
        let italic = self.load_font(ITALIC_FONT)?;
        // bold-italic is never used by the layout; bold stands in when missing
        let bold_italic = self
            .load_font(BOLD_ITALIC_FONT)
            .unwrap_or_else(|_| bold.clone());
        Ok(FontFamily {
            regular,
            bold,
            italic,
            bold_italic,
        })
    }
}

impl DocumentRenderer for PdfRenderer {
    fn render(&self, layout: &DocumentLayout, path: &Path) -> Result<()> {
        let mut doc = genpdf::Document::new(self.load_fonts()?);
        doc.set_title(layout.title.clone());

        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(PAGE_MARGIN_MM);
        doc.set_page_decorator(decorator);

        for element in &layout.elements {
            match element {
                LayoutElement::Text(line) => doc.push(paragraph(line)),
                LayoutElement::Space(lines) => doc.push(elements::Break::new(*lines)),
            }
        }

        debug!("Writing PDF to {:?}", path);
        doc.render_to_file(path)
            .map_err(|e| Error::Document(format!("cannot write {}: {}", path.display(), e)))?;
        info!("PDF written: {:?}", path);
        Ok(())
    }
}

fn paragraph(line: &TextLine) -> impl Element + 'static {
    let mut style = Style::new()
        .with_font_size(line.size)
        .with_color(Color::Rgb(line.color.0, line.color.1, line.color.2));
    style = match line.font {
        FontStyle::Regular => style,
        FontStyle::Bold => style.bold(),
        FontStyle::Italic => style.italic(),
    };
    let alignment = match line.align {
        Align::Left => Alignment::Left,
        Align::Center => Alignment::Center,
    };
    elements::Paragraph::new(line.text.clone())
        .aligned(alignment)
        .styled(style)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::document::DocumentLayout;

    #[test]
    fn missing_fonts_surface_as_document_error() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = PdfRenderer::new(dir.path().join("no-fonts"));
        let layout = DocumentLayout {
            title: "t".into(),
            elements: vec![],
        };
        let err = renderer
            .render(&layout, &dir.path().join("out.pdf"))
            .unwrap_err();
        assert!(matches!(err, Error::Document(_)));
        assert!(err.to_string().contains("DejaVuSans.ttf"));
        assert!(!err.is_fatal());
    }
}
