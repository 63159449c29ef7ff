//! Paginated document report.
//!
//! `DocumentReport::layout` turns an `AuditResult` into a `DocumentLayout`,
//! a flat list of styled lines and spacers. A `DocumentRenderer` (PDF in
//! production, see `io::writers::pdf`) turns the layout into a file.
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::io::locale::{Key, Translator};
use crate::types::{AuditResult, Impact};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const ORANGE: Rgb = Rgb(0xFF, 0xA5, 0x00);
    pub const BLUE: Rgb = Rgb(0x1E, 0x90, 0xFF);
    pub const GRAY: Rgb = Rgb(128, 128, 128);
    pub const GREEN: Rgb = Rgb(0, 128, 0);
}

/// Colour of the impact line for each severity tier.
pub fn impact_color(impact: Impact) -> Rgb {
    match impact {
        Impact::Critical => Rgb::RED,
        Impact::Serious => Rgb::ORANGE,
        Impact::Moderate => Rgb::BLUE,
        Impact::Minor => Rgb::GRAY,
        Impact::Unknown => Rgb::BLACK,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font: FontStyle,
    pub size: u8,
    pub color: Rgb,
    pub align: Align,
}

impl TextLine {
    fn new(text: String, font: FontStyle, size: u8, color: Rgb) -> Self {
        Self {
            text,
            font,
            size,
            color,
            align: Align::Left,
        }
    }

    fn centered(mut self) -> Self {
        self.align = Align::Center;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutElement {
    Text(TextLine),
    /// Vertical gap measured in lines.
    Space(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub title: String,
    pub elements: Vec<LayoutElement>,
}

impl DocumentLayout {
    pub fn lines(&self) -> impl Iterator<Item = &TextLine> {
        self.elements.iter().filter_map(|element| match element {
            LayoutElement::Text(line) => Some(line),
            LayoutElement::Space(_) => None,
        })
    }
}

/// Turns a layout into a file at `path`.
pub trait DocumentRenderer {
    fn render(&self, layout: &DocumentLayout, path: &Path) -> Result<()>;
}

pub struct DocumentReport<'a> {
    translator: &'a Translator,
}

impl<'a> DocumentReport<'a> {
    pub fn new(translator: &'a Translator) -> Self {
        Self { translator }
    }

    pub fn layout(&self, result: &AuditResult, generated_at: &str) -> DocumentLayout {
        let tr = self.translator;
        let title = tr.text(Key::PdfTitle);
        let mut elements = vec![
            LayoutElement::Text(TextLine::new(
                title.clone(),
                FontStyle::Bold,
                20,
                Rgb::BLACK,
            )),
            LayoutElement::Text(TextLine::new(
                format!("{}: {}", tr.text(Key::PdfGenerated), generated_at),
                FontStyle::Regular,
                10,
                Rgb::GRAY,
            )),
            LayoutElement::Text(TextLine::new(
                format!("{}: {}", tr.text(Key::PdfUrl), result.display_url()),
                FontStyle::Regular,
                10,
                Rgb::GRAY,
            )),
            LayoutElement::Space(1.5),
        ];

        if result.issues.is_empty() {
            elements.push(LayoutElement::Text(TextLine::new(
                tr.text(Key::PdfNoIssues),
                FontStyle::Bold,
                14,
                Rgb::GREEN,
            )));
        } else {
            elements.push(LayoutElement::Text(TextLine::new(
                tr.t(
                    Key::PdfFoundIssues,
                    &[("count", result.issues.len().to_string())],
                ),
                FontStyle::Bold,
                14,
                Rgb::RED,
            )));
            elements.push(LayoutElement::Space(1.0));

            for (index, issue) in result.issues.iter().enumerate() {
                elements.push(LayoutElement::Text(TextLine::new(
                    format!("{}. {}", index + 1, issue.description),
                    FontStyle::Bold,
                    12,
                    Rgb::BLACK,
                )));
                elements.push(LayoutElement::Text(TextLine::new(
                    format!("{}: {}", tr.text(Key::PdfImpact), issue.impact),
                    FontStyle::Italic,
                    11,
                    impact_color(issue.impact),
                )));
                elements.push(LayoutElement::Text(TextLine::new(
                    format!("{}: {}", tr.text(Key::PdfHelp), issue.help),
                    FontStyle::Regular,
                    10,
                    Rgb::BLACK,
                )));
                elements.push(LayoutElement::Text(TextLine::new(
                    format!("{}: {}", tr.text(Key::PdfTags), issue.joined_tags()),
                    FontStyle::Regular,
                    10,
                    Rgb::BLACK,
                )));
                elements.push(LayoutElement::Space(1.2));
            }
        }

        elements.push(LayoutElement::Space(1.0));
        elements.push(LayoutElement::Text(
            TextLine::new(
                tr.text(Key::PdfFooterNote),
                FontStyle::Italic,
                9,
                Rgb::GRAY,
            )
            .centered(),
        ));

        DocumentLayout { title, elements }
    }
}

/// Resolve `output` under `reports_dir`, dropping any root, `.` or `..`
/// components so documents never land outside the reports root.
pub fn report_path(reports_dir: &Path, output: &Path) -> PathBuf {
    let relative: PathBuf = output
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part),
            _ => None,
        })
        .collect();
    reports_dir.join(relative)
}

/// Lay out `result` and write it to `reports_dir/output`, creating missing
/// directories. Returns the path written.
pub fn render_document(
    result: &AuditResult,
    output: &Path,
    reports_dir: &Path,
    translator: &Translator,
    renderer: &dyn DocumentRenderer,
) -> Result<PathBuf> {
    let path = report_path(reports_dir, output);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let layout = DocumentReport::new(translator).layout(result, &generated_at);
    debug!(
        "Rendering {} layout elements to {:?}",
        layout.elements.len(),
        path
    );
    renderer.render(&layout, &path)?;
    Ok(path)
}
