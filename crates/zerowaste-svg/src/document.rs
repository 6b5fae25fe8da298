//! SVG document model and writer
//!
//! The layout engine produces an [`SvgDocument`]: canvas size, text styles
//! and an ordered list of layers. Serialization is a plain `Display`
//! implementation; coordinates are written in centimetres with the document
//! size attributes converted to the configured unit.

use crate::error::{ExportError, ExportResult};
use std::fmt;
use std::io::Write;
use std::path::Path;
use zerowaste_core::units::{format_document_length, format_font_size};
use zerowaste_core::{DocumentUnit, FontUnit};

pub const EDGE_COLOR: &str = "#000000";
pub const DIM_COLOR: &str = "#C00000";
pub const AUX_COLOR: &str = "#777777";
pub const ID_COLOR: &str = "#0000FF";

/// Stroke width of every line class (cm)
pub const STROKE_WIDTH_CM: f64 = 0.04;

const FONT_FAMILY: &str = "Arial,Helvetica,sans-serif";

/// Drawing layers, in output order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Outline,
    InternalLines,
    InternalDimensions,
    ExternalDimensions,
    Ordinates,
    Ids,
}

impl LayerKind {
    /// Group id written to the file. These ids are read by downstream
    /// cutting tools and must not change.
    pub fn id(&self) -> &'static str {
        match self {
            LayerKind::Outline => "capa-trazo-patron",
            LayerKind::InternalLines => "capa-lineas-internas",
            LayerKind::InternalDimensions => "capa-medidas-internas",
            LayerKind::ExternalDimensions => "capa-medidas-externas",
            LayerKind::Ordinates => "capa-ordinadas",
            LayerKind::Ids => "capa-ids-vertices",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Edge,
    Dim,
    Aux,
}

impl LineClass {
    fn css(&self) -> &'static str {
        match self {
            LineClass::Edge => "edge",
            LineClass::Dim => "dim",
            LineClass::Aux => "aux",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextClass {
    Main,
    Dim,
    Id,
}

impl TextClass {
    fn css(&self) -> &'static str {
        match self {
            TextClass::Main => "txt",
            TextClass::Dim => "txtDim",
            TextClass::Id => "txtID",
        }
    }
}

/// Text anchoring relative to the label position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Left-aligned on the baseline
    Start,
    /// Horizontally centred on the baseline
    Middle,
    /// Centred on both axes
    Center,
}

/// One drawing primitive, in SVG coordinates (cm, y down)
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Line {
        class: LineClass,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        /// Arrow markers on both ends
        arrows: bool,
    },
    Text {
        class: TextClass,
        x: f64,
        y: f64,
        align: TextAlign,
        text: String,
        /// Bold prefix written before `text`
        label: Option<String>,
        /// Forced rendered width
        text_length: Option<f64>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: &'static str,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

impl Element {
    pub fn line(class: LineClass, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Element::Line {
            class,
            x1,
            y1,
            x2,
            y2,
            arrows: false,
        }
    }

    pub fn text(class: TextClass, x: f64, y: f64, align: TextAlign, text: impl Into<String>) -> Self {
        Element::Text {
            class,
            x,
            y,
            align,
            text: text.into(),
            label: None,
            text_length: None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Element::Text { .. })
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Element::Line {
                class,
                x1,
                y1,
                x2,
                y2,
                arrows,
            } => {
                write!(
                    f,
                    r#"<line class="{}" x1="{:.4}" y1="{:.4}" x2="{:.4}" y2="{:.4}""#,
                    class.css(),
                    x1,
                    y1,
                    x2,
                    y2
                )?;
                if *arrows {
                    write!(f, r#" marker-start="url(#arrow)" marker-end="url(#arrow)""#)?;
                }
                write!(f, "/>")
            }
            Element::Text {
                class,
                x,
                y,
                align,
                text,
                label,
                text_length,
            } => {
                write!(f, r#"<text class="{}" x="{:.4}" y="{:.4}""#, class.css(), x, y)?;
                match align {
                    TextAlign::Start => {}
                    TextAlign::Middle => write!(f, r#" text-anchor="middle""#)?,
                    TextAlign::Center => write!(
                        f,
                        r#" text-anchor="middle" dominant-baseline="middle""#
                    )?,
                }
                if let Some(length) = text_length {
                    write!(f, r#" textLength="{:.4}""#, length)?;
                }
                write!(f, ">")?;
                if let Some(label) = label {
                    write!(f, r#"<tspan font-weight="700">{}</tspan>"#, escape_xml(label))?;
                }
                write!(f, "{}</text>", escape_xml(text))
            }
            Element::Circle { cx, cy, r, fill } => write!(
                f,
                r#"<circle cx="{:.4}" cy="{:.4}" r="{:.4}" fill="{}"/>"#,
                cx, cy, r, fill
            ),
            Element::Rect {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                r#"<rect x="{:.4}" y="{:.4}" width="{:.4}" height="{:.4}" stroke="{}" stroke-width="{:.4}cm" fill="none"/>"#,
                x, y, width, height, EDGE_COLOR, STROKE_WIDTH_CM
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub elements: Vec<Element>,
}

impl Layer {
    pub fn new(kind: LayerKind) -> Self {
        Self {
            kind,
            elements: Vec::new(),
        }
    }

    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    pub fn text_count(&self) -> usize {
        self.elements.iter().filter(|e| e.is_text()).count()
    }
}

/// Resolved text sizes and output units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DocumentStyle {
    pub font_main_cm: f64,
    pub font_dim_cm: f64,
    pub font_id_cm: f64,
    pub font_unit: FontUnit,
    pub document_unit: DocumentUnit,
}

/// A laid-out drawing
#[derive(Debug, Clone, PartialEq)]
pub struct SvgDocument {
    width_cm: f64,
    height_cm: f64,
    style: DocumentStyle,
    layers: Vec<Layer>,
}

impl SvgDocument {
    pub fn new(width_cm: f64, height_cm: f64, style: DocumentStyle, layers: Vec<Layer>) -> Self {
        Self {
            width_cm,
            height_cm,
            style,
            layers,
        }
    }

    pub fn width_cm(&self) -> f64 {
        self.width_cm
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn style(&self) -> &DocumentStyle {
        &self.style
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, kind: LayerKind) -> Option<&Layer> {
        self.layers.iter().find(|l| l.kind == kind)
    }

    pub fn to_svg_string(&self) -> String {
        self.to_string()
    }

    /// Write the drawing, replacing `path` atomically.
    pub fn write_to_file(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(self.to_svg_string().as_bytes())?;
        tmp.flush()?;
        tmp.persist(path).map_err(|e| ExportError::Persist {
            path: path.display().to_string(),
            source: e.error,
        })?;
        tracing::info!("wrote drawing to {}", path.display());
        Ok(())
    }

    fn write_defs(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = &self.style;
        let font = |size: f64| format_font_size(size, style.font_main_cm, style.font_unit);
        let dash = STROKE_WIDTH_CM * 8.0;
        let gap = STROKE_WIDTH_CM * 4.0;

        writeln!(f, "<defs>")?;
        writeln!(f, r#"<style type="text/css"><![CDATA["#)?;
        if style.font_unit == FontUnit::Percent {
            writeln!(f, "svg{{font-size:{:.4}cm;}}", style.font_main_cm)?;
        }
        writeln!(
            f,
            ".edge{{stroke:{};stroke-width:{:.4}cm;fill:none;stroke-linecap:round;stroke-linejoin:round;}}",
            EDGE_COLOR, STROKE_WIDTH_CM
        )?;
        writeln!(
            f,
            ".dim{{stroke:{};stroke-width:{:.4}cm;fill:none;stroke-linecap:round;}}",
            DIM_COLOR, STROKE_WIDTH_CM
        )?;
        writeln!(
            f,
            ".aux{{stroke:{};stroke-width:{:.4}cm;fill:none;stroke-dasharray:{:.3},{:.3};}}",
            AUX_COLOR, STROKE_WIDTH_CM, dash, gap
        )?;
        writeln!(
            f,
            ".txt{{font-family:{};font-size:{};fill:{};}}",
            FONT_FAMILY,
            font(style.font_main_cm),
            EDGE_COLOR
        )?;
        writeln!(
            f,
            ".txtDim{{font-family:{};font-size:{};fill:{};font-weight:600;}}",
            FONT_FAMILY,
            font(style.font_dim_cm),
            DIM_COLOR
        )?;
        writeln!(
            f,
            ".txtID{{font-family:{};font-size:{};fill:{};}}",
            FONT_FAMILY,
            font(style.font_id_cm),
            ID_COLOR
        )?;
        writeln!(f, "]]></style>")?;

        let arrow = style.font_dim_cm * 1.4;
        write!(
            f,
            r#"<marker id="arrow" markerWidth="{0:.3}" markerHeight="{0:.3}" refX="{1:.3}" refY="{1:.3}" orient="auto" markerUnits="userSpaceOnUse">"#,
            arrow,
            arrow * 0.5
        )?;
        writeln!(
            f,
            r#"<path d="M0,0 L0,{:.3} L{:.3},{:.3} z" fill="{}"/></marker>"#,
            arrow,
            arrow * 0.8,
            arrow * 0.5,
            DIM_COLOR
        )?;
        writeln!(f, "</defs>")
    }
}

impl fmt::Display for SvgDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {:.3} {:.3}">"#,
            format_document_length(self.width_cm, self.style.document_unit),
            format_document_length(self.height_cm, self.style.document_unit),
            self.width_cm,
            self.height_cm
        )?;
        self.write_defs(f)?;

        for layer in &self.layers {
            writeln!(f)?;
            writeln!(f, r#"<g id="{}">"#, layer.kind.id())?;
            for element in &layer.elements {
                writeln!(f, "  {}", element)?;
            }
            writeln!(f, "</g>")?;
        }
        writeln!(f, "</svg>")
    }
}

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
