//! HTML to PDF conversion on top of `lopdf`, using the standard Type1
//! Helvetica faces so no font files need to be embedded.

use image::ImageFormat;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};

use self::html::{EmbeddedImage, Node, TextStyle};
use super::{ConversionError, DocumentConverter};

mod html;


const A4_WIDTH: f32 = 595.0;
const A4_HEIGHT: f32 = 842.0;
const LINE_HEIGHT_FACTOR: f32 = 1.35;
// CSS pixel to PDF point
const PX_TO_PT: f32 = 0.75;

/// Resource name and base font of every face a style can map to.
const FONTS: [(&str, &str); 4] = [
    ("F1", "Helvetica"),
    ("F2", "Helvetica-Bold"),
    ("F3", "Helvetica-Oblique"),
    ("F4", "Helvetica-BoldOblique"),
];

fn font_resource(style: &TextStyle) -> &'static str {
    let index = match (style.bold, style.italic) {
        (false, false) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (true, true) => 3,
    };
    FONTS[index].0
}

/// Approximated Helvetica advance width, good enough for line wrapping.
fn text_width(text: &str, style: &TextStyle) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match c {
            ' ' => 0.28,
            'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.25,
            'm' | 'w' | 'M' | 'W' => 0.85,
            c if c.is_ascii_uppercase() => 0.68,
            c if c.is_ascii_digit() => 0.56,
            _ => 0.52,
        })
        .sum();
    let weight = if style.bold { 1.08 } else { 1.0 };
    em * style.size * weight
}

/// Helvetica is used with WinAnsiEncoding, anything outside Latin-1 is replaced.
fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[derive(Clone, Debug)]
pub struct PdfDocumentConverter {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
}

impl Default for PdfDocumentConverter {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 40.0,
        }
    }
}

#[derive(Default)]
struct Page {
    operations: Vec<Operation>,
    images: Vec<(String, ObjectId)>,
}

struct Layout<'a> {
    converter: &'a PdfDocumentConverter,
    document: &'a mut Document,
    pages: Vec<Page>,
    x: f32,
    y: f32,
    line_height: f32,
    pending_space: bool,
    image_count: usize,
}

impl<'a> Layout<'a> {
    fn new(converter: &'a PdfDocumentConverter, document: &'a mut Document) -> Self {
        Self {
            converter,
            document,
            pages: vec![Page::default()],
            x: converter.margin,
            y: converter.page_height - converter.margin,
            line_height: 0.0,
            pending_space: false,
            image_count: 0,
        }
    }

    fn right_edge(&self) -> f32 {
        self.converter.page_width - self.converter.margin
    }

    fn content_width(&self) -> f32 {
        self.converter.page_width - 2.0 * self.converter.margin
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.x = self.converter.margin;
        self.y = self.converter.page_height - self.converter.margin;
        self.line_height = 0.0;
    }

    fn ensure_vertical_space(&mut self, height: f32) {
        let top = self.converter.page_height - self.converter.margin;
        if self.y - height < self.converter.margin && self.y < top {
            self.new_page();
        }
    }

    fn line_break(&mut self) {
        let advance = if self.line_height > 0.0 {
            self.line_height
        } else {
            html::DEFAULT_FONT_SIZE * LINE_HEIGHT_FACTOR
        };
        self.y -= advance;
        self.x = self.converter.margin;
        self.line_height = 0.0;
        self.pending_space = false;
    }

    fn word(&mut self, text: &str, style: TextStyle) {
        let space = if self.pending_space && self.x > self.converter.margin {
            text_width(" ", &style)
        } else {
            0.0
        };
        let width = text_width(text, &style);

        if self.x + space + width > self.right_edge() && self.x > self.converter.margin {
            self.line_break();
        } else {
            self.x += space;
        }
        self.pending_space = false;

        let line_height = style.size * LINE_HEIGHT_FACTOR;
        self.ensure_vertical_space(line_height);
        self.line_height = self.line_height.max(line_height);

        let (x, baseline) = (self.x, self.y - style.size);
        self.current_page().operations.extend([
            Operation::new("BT", vec![]),
            Operation::new(
                "Tf",
                vec![font_resource(&style).into(), style.size.into()],
            ),
            Operation::new("Td", vec![x.into(), baseline.into()]),
            Operation::new("Tj", vec![Object::string_literal(encode_latin1(text))]),
            Operation::new("ET", vec![]),
        ]);
        self.x += width;
    }

    fn image(&mut self, image: EmbeddedImage) -> Result<(), ConversionError> {
        let decoded = image::load_from_memory_with_format(&image.png, ImageFormat::Png)
            .map_err(|e| ConversionError::Image(e.to_string()))?
            .to_luma8();
        let (pixel_width, pixel_height) = decoded.dimensions();
        if pixel_width == 0 || pixel_height == 0 {
            return Err(ConversionError::Image("empty image".to_owned()));
        }

        let aspect = pixel_height as f32 / pixel_width as f32;
        let mut width = match (image.width, image.height) {
            (Some(width), _) => width * PX_TO_PT,
            (None, Some(height)) => height * PX_TO_PT / aspect,
            (None, None) => pixel_width as f32 * PX_TO_PT,
        };
        width = width.min(self.content_width());
        let height = width * aspect;

        if self.x > self.converter.margin {
            self.line_break();
        }
        self.ensure_vertical_space(height);

        let stream = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => i64::from(pixel_width),
                "Height" => i64::from(pixel_height),
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            decoded.into_raw(),
        );
        let image_id = self.document.add_object(stream);

        self.image_count += 1;
        let name = format!("Im{}", self.image_count);
        let (x, y) = (self.x, self.y - height);

        let page = self.current_page();
        page.operations.extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0.into(),
                    0.into(),
                    height.into(),
                    x.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![Object::Name(name.as_bytes().to_vec())]),
            Operation::new("Q", vec![]),
        ]);
        page.images.push((name, image_id));

        self.y -= height + 4.0;
        self.x = self.converter.margin;
        self.line_height = 0.0;
        Ok(())
    }
}

impl PdfDocumentConverter {
    fn layout(&self, document: &mut Document, nodes: Vec<Node>) -> Result<Vec<Page>, ConversionError> {
        let mut layout = Layout::new(self, document);

        for node in nodes {
            match node {
                Node::Word { text, style } => layout.word(&text, style),
                Node::Space => layout.pending_space = true,
                Node::LineBreak => layout.line_break(),
                Node::Image(image) => layout.image(image)?,
            }
        }

        Ok(layout.pages)
    }
}

impl DocumentConverter for PdfDocumentConverter {
    fn convert(&self, html: &str) -> Result<Vec<u8>, ConversionError> {
        let nodes = html::flatten(html);

        let mut document = Document::with_version("1.5");
        let pages_id = document.new_object_id();

        let mut fonts = lopdf::Dictionary::new();
        for (resource, base_font) in FONTS {
            let font_id = document.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => base_font,
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(resource, font_id);
        }
        let fonts_id = document.add_object(fonts);

        let pages = self.layout(&mut document, nodes)?;

        let mut kids = vec![];
        for page in pages {
            let content = Content {
                operations: page.operations,
            };
            let content_id = document.add_object(Stream::new(
                dictionary! {},
                content
                    .encode()
                    .map_err(|e| ConversionError::Pdf(e.to_string()))?,
            ));

            let mut xobjects = lopdf::Dictionary::new();
            for (name, image_id) in page.images {
                xobjects.set(name, image_id);
            }

            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => fonts_id,
                    "XObject" => xobjects,
                },
            });
            kids.push(Object::from(page_id));
        }

        let count = kids.len() as i64;
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
                "MediaBox" => vec![
                    0.into(),
                    0.into(),
                    self.page_width.into(),
                    self.page_height.into(),
                ],
            }),
        );

        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);
        document.compress();

        let mut output = vec![];
        document
            .save_to(&mut output)
            .map_err(|e| ConversionError::Pdf(e.to_string()))?;

        tracing::debug!(size = output.len(), "Converted document to PDF");
        Ok(output)
    }
}
