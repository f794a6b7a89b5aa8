//! Flowing page layout on top of printpdf.
//!
//! Positions are millimetres measured from the top-left corner of the page,
//! the way a reader thinks about a document. Conversion to PDF user space
//! (origin bottom-left) happens only when drawing.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::{ColorType, DynamicImage};
use printpdf::path::PaintMode;
use printpdf::{
    Color, ColorBits, ColorSpace, Image, ImageFilter, ImageTransform, ImageXObject,
    IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference, Px, Rect, Rgb,
};
use tracing::debug;

use super::fonts::{pt_to_mm, FontFace};
use crate::error::Result;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 10.0;
/// Content may not extend below this distance from the bottom edge.
pub const BREAK_MARGIN_MM: f32 = 20.0;
const CELL_PADDING_MM: f32 = 1.0;
const BORDER_WIDTH_PT: f32 = 0.57;
const IMAGE_JPEG_QUALITY: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbColor(pub u8, pub u8, pub u8);

impl RgbColor {
    pub const BLACK: RgbColor = RgbColor(0, 0, 0);
    pub const WHITE: RgbColor = RgbColor(255, 255, 255);

    fn to_pdf(self) -> Color {
        Color::Rgb(Rgb::new(
            f32::from(self.0) / 255.0,
            f32::from(self.1) / 255.0,
            f32::from(self.2) / 255.0,
            None,
        ))
    }
}

/// Text and box styling for one cell.
#[derive(Debug, Clone, Copy)]
pub struct CellStyle {
    pub face: FontFace,
    pub size_pt: f32,
    pub color: RgbColor,
    pub align: Align,
    pub border: bool,
    pub fill: Option<RgbColor>,
}

impl CellStyle {
    pub fn text(face: FontFace, size_pt: f32) -> Self {
        Self {
            face,
            size_pt,
            color: RgbColor::BLACK,
            align: Align::Left,
            border: false,
            fill: None,
        }
    }

    pub fn color(mut self, color: RgbColor) -> Self {
        self.color = color;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn bordered(mut self) -> Self {
        self.border = true;
        self
    }

    pub fn fill(mut self, fill: RgbColor) -> Self {
        self.fill = Some(fill);
        self
    }
}

/// Whether the cursor moves right of the cell or to the start of the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellFlow {
    Right,
    NextLine,
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl Fonts {
    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Oblique => &self.oblique,
        }
    }
}

/// Drawing surface for the current page plus the text cursor.
pub struct PageCanvas {
    doc: PdfDocumentReference,
    layer: Option<PdfLayerReference>,
    fonts: Fonts,
    page_number: usize,
    x: f32,
    y: f32,
}

impl PageCanvas {
    fn new(title: &str) -> Result<Self> {
        let doc = PdfDocument::empty(title);
        let fonts = Fonts {
            regular: doc.add_builtin_font(FontFace::Regular.builtin())?,
            bold: doc.add_builtin_font(FontFace::Bold.builtin())?,
            oblique: doc.add_builtin_font(FontFace::Oblique.builtin())?,
        };
        Ok(Self {
            doc,
            layer: None,
            fonts,
            page_number: 0,
            x: MARGIN_MM,
            y: MARGIN_MM,
        })
    }

    fn start_page(&mut self) {
        self.page_number += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH_MM),
            Mm(PAGE_HEIGHT_MM),
            format!("Page {}", self.page_number),
        );
        self.layer = Some(self.doc.get_page(page).get_layer(layer));
        self.x = MARGIN_MM;
        self.y = MARGIN_MM;
    }

    fn layer(&self) -> Option<&PdfLayerReference> {
        self.layer.as_ref()
    }

    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Move the cursor to `y` and back to the left margin. Negative values count from the bottom.
    pub fn set_y(&mut self, y: f32) {
        self.x = MARGIN_MM;
        self.y = if y < 0.0 { PAGE_HEIGHT_MM + y } else { y };
    }

    pub fn ln(&mut self, height: f32) {
        self.x = MARGIN_MM;
        self.y += height;
    }

    /// Width remaining between the cursor and the right margin.
    pub fn remaining_width(&self) -> f32 {
        PAGE_WIDTH_MM - MARGIN_MM - self.x
    }

    /// Draw a cell at the cursor. A `width` of zero extends it to the right margin.
    pub fn cell(&mut self, width: f32, height: f32, text: &str, style: CellStyle, flow: CellFlow) {
        let width = if width <= 0.0 {
            self.remaining_width()
        } else {
            width
        };

        if let Some(layer) = self.layer() {
            if style.fill.is_some() || style.border {
                let bottom = PAGE_HEIGHT_MM - self.y - height;
                let mode = match (style.fill, style.border) {
                    (Some(_), true) => PaintMode::FillStroke,
                    (Some(_), false) => PaintMode::Fill,
                    _ => PaintMode::Stroke,
                };
                if let Some(fill) = style.fill {
                    layer.set_fill_color(fill.to_pdf());
                }
                layer.set_outline_color(RgbColor::BLACK.to_pdf());
                layer.set_outline_thickness(BORDER_WIDTH_PT);
                layer.add_rect(
                    Rect::new(
                        Mm(self.x),
                        Mm(bottom),
                        Mm(self.x + width),
                        Mm(bottom + height),
                    )
                    .with_mode(mode),
                );
            }

            if !text.is_empty() {
                let text_width = style.face.text_width_mm(text, style.size_pt);
                let text_x = match style.align {
                    Align::Left => self.x + CELL_PADDING_MM,
                    Align::Center => self.x + (width - text_width) / 2.0,
                };
                // Vertically centred baseline
                let baseline = self.y + 0.5 * height + 0.3 * pt_to_mm(style.size_pt);
                layer.set_fill_color(style.color.to_pdf());
                layer.use_text(
                    text,
                    style.size_pt,
                    Mm(text_x),
                    Mm(PAGE_HEIGHT_MM - baseline),
                    self.fonts.get(style.face),
                );
            }
        }

        match flow {
            CellFlow::Right => self.x += width,
            CellFlow::NextLine => self.ln(height),
        }
    }

    /// Place an image with its top-left corner at (`x`, `y`) scaled to `width`.
    /// Returns the rendered height. The cursor does not move.
    pub fn image_at(&mut self, image: &DynamicImage, x: f32, y: f32, width: f32) -> Result<f32> {
        let height = scaled_height(image, width);
        if let Some(layer) = self.layer() {
            let dpi = image.width() as f32 * 25.4 / width;
            Image::from(jpeg_xobject(image)?).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(x)),
                    translate_y: Some(Mm(PAGE_HEIGHT_MM - y - height)),
                    dpi: Some(dpi),
                    ..Default::default()
                },
            );
        }
        Ok(height)
    }
}

/// Embed `image` as a DCT-encoded RGB XObject. Raw pixel streams are stored
/// uncompressed outside release builds.
fn jpeg_xobject(image: &DynamicImage) -> Result<ImageXObject> {
    let rgb = image.to_rgb8();
    let mut encoded = Vec::new();
    JpegEncoder::new_with_quality(&mut encoded, IMAGE_JPEG_QUALITY).encode(
        rgb.as_raw(),
        rgb.width(),
        rgb.height(),
        ColorType::Rgb8,
    )?;

    Ok(ImageXObject {
        width: Px(rgb.width() as usize),
        height: Px(rgb.height() as usize),
        color_space: ColorSpace::Rgb,
        bits_per_component: ColorBits::Bit8,
        interpolate: true,
        image_data: encoded,
        image_filter: Some(ImageFilter::DCT),
        smask: None,
        clipping_bbox: None,
    })
}

/// Height in millimetres of `image` when drawn `width` millimetres wide.
pub fn scaled_height(image: &DynamicImage, width: f32) -> f32 {
    if image.width() == 0 {
        return 0.0;
    }
    width * image.height() as f32 / image.width() as f32
}

/// Drawn at the start and end of every page.
pub trait PageTemplate {
    fn header(&self, canvas: &mut PageCanvas) -> Result<()>;
    fn footer(&self, canvas: &mut PageCanvas) -> Result<()>;
}

/// Flowing layout: blocks are placed top to bottom and a new page starts
/// whenever the next block would cross the bottom break margin.
pub struct PageLayout<T: PageTemplate> {
    canvas: PageCanvas,
    template: T,
}

impl<T: PageTemplate> PageLayout<T> {
    pub fn new(title: &str, template: T) -> Result<Self> {
        Ok(Self {
            canvas: PageCanvas::new(title)?,
            template,
        })
    }

    pub fn add_page(&mut self) -> Result<()> {
        if self.canvas.page_number > 0 {
            self.template.footer(&mut self.canvas)?;
        }
        self.canvas.start_page();
        debug!(page = self.canvas.page_number, "page started");
        self.template.header(&mut self.canvas)
    }

    #[cfg(test)]
    fn page_count(&self) -> usize {
        self.canvas.page_number
    }

    #[cfg(test)]
    fn cursor_y(&self) -> f32 {
        self.canvas.y
    }

    fn page_break_trigger() -> f32 {
        PAGE_HEIGHT_MM - BREAK_MARGIN_MM
    }

    /// Start a new page if a block of `height` does not fit below the cursor.
    pub fn ensure_space(&mut self, height: f32) -> Result<()> {
        if self.canvas.page_number == 0 || self.canvas.y + height > Self::page_break_trigger() {
            self.add_page()?;
        }
        Ok(())
    }

    pub fn cell(
        &mut self,
        width: f32,
        height: f32,
        text: &str,
        style: CellStyle,
        flow: CellFlow,
    ) -> Result<()> {
        // A row continuing to the right never breaks mid-row
        if self.canvas.x <= MARGIN_MM {
            self.ensure_space(height)?;
        }
        self.canvas.cell(width, height, text, style, flow);
        Ok(())
    }

    pub fn ln(&mut self, height: f32) {
        self.canvas.ln(height);
    }

    pub fn content_width(&self) -> f32 {
        PAGE_WIDTH_MM - 2.0 * MARGIN_MM
    }

    /// Place an image at `x` below the cursor and advance past it.
    pub fn image(&mut self, image: &DynamicImage, x: f32, width: f32) -> Result<()> {
        self.ensure_space(scaled_height(image, width))?;
        let y = self.canvas.y;
        let height = self.canvas.image_at(image, x, y, width)?;
        self.canvas.ln(height);
        Ok(())
    }

    /// Close the last page and write the document to `path`, replacing any existing file.
    pub fn save(mut self, path: &Path) -> Result<usize> {
        if self.canvas.page_number == 0 {
            self.add_page()?;
        }
        self.template.footer(&mut self.canvas)?;
        let pages = self.canvas.page_number;
        let bytes = self.canvas.doc.save_to_bytes()?;
        std::fs::write(path, bytes)?;
        Ok(pages)
    }
}
