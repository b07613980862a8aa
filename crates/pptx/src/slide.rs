//! Slide part XML generation.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use slidemd_core::{Align, Error, Geometry, Result, TextStyle, VerticalAlign};

use crate::parts::{NS_DRAWING, NS_PRESENTATION, NS_RELATIONSHIPS};

/// English Metric Units per inch.
pub(crate) const EMU_PER_INCH: f64 = 914_400.0;

/// Convert inches to EMU, clamping negatives to zero.
pub(crate) fn emu(inches: f64) -> i64 {
    (inches * EMU_PER_INCH).round().max(0.0) as i64
}

/// A positioned text box on a slide.
#[derive(Debug, Clone)]
pub(crate) struct TextShape {
    pub text: String,
    pub geometry: Geometry,
    pub style: TextStyle,
}

/// One slide being assembled.
#[derive(Debug, Clone, Default)]
pub(crate) struct SlidePart {
    pub background: Option<String>,
    pub shapes: Vec<TextShape>,
}

impl SlidePart {
    /// Serialize to a `ppt/slides/slideN.xml` part.
    pub fn to_xml(&self) -> Result<Vec<u8>> {
        let mut xml = XmlWriter::new();
        xml.declaration()?;
        xml.start(
            "p:sld",
            &[
                ("xmlns:a", NS_DRAWING),
                ("xmlns:r", NS_RELATIONSHIPS),
                ("xmlns:p", NS_PRESENTATION),
            ],
        )?;
        xml.start("p:cSld", &[])?;

        // Background must precede the shape tree.
        if let Some(color) = &self.background {
            xml.start("p:bg", &[])?;
            xml.start("p:bgPr", &[])?;
            xml.solid_fill(color)?;
            xml.empty("a:effectLst", &[])?;
            xml.end("p:bgPr")?;
            xml.end("p:bg")?;
        }

        xml.start("p:spTree", &[])?;
        xml.start("p:nvGrpSpPr", &[])?;
        xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
        xml.empty("p:cNvGrpSpPr", &[])?;
        xml.empty("p:nvPr", &[])?;
        xml.end("p:nvGrpSpPr")?;
        xml.start("p:grpSpPr", &[])?;
        xml.start("a:xfrm", &[])?;
        xml.empty("a:off", &[("x", "0"), ("y", "0")])?;
        xml.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
        xml.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
        xml.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
        xml.end("a:xfrm")?;
        xml.end("p:grpSpPr")?;

        // Shape id 1 is the group itself.
        for (idx, shape) in self.shapes.iter().enumerate() {
            write_text_shape(&mut xml, shape, idx + 2)?;
        }

        xml.end("p:spTree")?;
        xml.end("p:cSld")?;
        xml.start("p:clrMapOvr", &[])?;
        xml.empty("a:masterClrMapping", &[])?;
        xml.end("p:clrMapOvr")?;
        xml.end("p:sld")?;

        Ok(xml.into_inner())
    }
}

fn write_text_shape(xml: &mut XmlWriter, shape: &TextShape, shape_id: usize) -> Result<()> {
    let id = shape_id.to_string();
    let name = format!("TextBox {}", shape_id - 1);
    let g = &shape.geometry;
    let (x, y, cx, cy) = (
        emu(g.x).to_string(),
        emu(g.y).to_string(),
        emu(g.w).to_string(),
        emu(g.h).to_string(),
    );

    xml.start("p:sp", &[])?;

    xml.start("p:nvSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", &id), ("name", &name)])?;
    xml.empty("p:cNvSpPr", &[("txBox", "1")])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvSpPr")?;

    xml.start("p:spPr", &[])?;
    xml.start("a:xfrm", &[])?;
    xml.empty("a:off", &[("x", &x), ("y", &y)])?;
    xml.empty("a:ext", &[("cx", &cx), ("cy", &cy)])?;
    xml.end("a:xfrm")?;
    xml.start("a:prstGeom", &[("prst", "rect")])?;
    xml.empty("a:avLst", &[])?;
    xml.end("a:prstGeom")?;
    xml.empty("a:noFill", &[])?;
    xml.end("p:spPr")?;

    let anchor = match shape.style.valign {
        VerticalAlign::Top => "t",
        VerticalAlign::Middle => "ctr",
    };
    xml.start("p:txBody", &[])?;
    xml.start("a:bodyPr", &[("wrap", "square"), ("rtlCol", "0"), ("anchor", anchor)])?;
    xml.empty("a:noAutofit", &[])?;
    xml.end("a:bodyPr")?;
    xml.empty("a:lstStyle", &[])?;
    for line in shape.text.split('\n') {
        write_paragraph(xml, line, &shape.style)?;
    }
    xml.end("p:txBody")?;

    xml.end("p:sp")
}

fn write_paragraph(xml: &mut XmlWriter, text: &str, style: &TextStyle) -> Result<()> {
    let algn = match style.align {
        Align::Left => "l",
        Align::Right => "r",
    };
    let size = (style.font_size * 100).to_string();
    let mut run_attrs = vec![("lang", "en-US"), ("sz", size.as_str())];
    if style.bold {
        run_attrs.push(("b", "1"));
    }
    run_attrs.push(("dirty", "0"));

    xml.start("a:p", &[])?;
    xml.empty("a:pPr", &[("algn", algn)])?;
    if text.is_empty() {
        xml.empty("a:endParaRPr", &run_attrs)?;
    } else {
        xml.start("a:r", &[])?;
        xml.start("a:rPr", &run_attrs)?;
        xml.solid_fill(&style.color)?;
        xml.end("a:rPr")?;
        xml.start("a:t", &[])?;
        xml.text(text)?;
        xml.end("a:t")?;
        xml.end("a:r")?;
    }
    xml.end("a:p")
}

/// Thin event-writing wrapper mapping quick-xml errors into ours.
pub(crate) struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::XmlError(e.to_string()))
    }

    pub fn declaration(&mut self) -> Result<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(element))
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let element = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(element))
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    pub fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    pub fn solid_fill(&mut self, color: &str) -> Result<()> {
        self.start("a:solidFill", &[])?;
        self.empty("a:srgbClr", &[("val", color)])?;
        self.end("a:solidFill")
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.inner.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shape(text: &str, style: TextStyle) -> TextShape {
        TextShape {
            text: text.to_string(),
            geometry: Geometry::new(0.5, 1.0, 2.0, 0.25),
            style,
        }
    }

    fn style(bold: bool, align: Align, valign: VerticalAlign) -> TextStyle {
        TextStyle {
            font_size: 20,
            bold,
            color: "111827".to_string(),
            align,
            valign,
        }
    }

    #[test]
    fn test_emu() {
        assert_eq!(emu(1.0), 914_400);
        assert_eq!(emu(0.5), 457_200);
        assert_eq!(emu(-1.0), 0);
    }

    #[test]
    fn test_background_before_shape_tree() {
        let part = SlidePart {
            background: Some("0F172A".into()),
            shapes: Vec::new(),
        };
        let xml = String::from_utf8(part.to_xml().unwrap()).unwrap();
        let bg = xml.find("<p:bg>").unwrap();
        let tree = xml.find("<p:spTree>").unwrap();
        assert!(bg < tree);
        assert!(xml.contains(r#"<a:srgbClr val="0F172A"/>"#));
        assert!(xml.starts_with("<?xml"));
    }

    #[test]
    fn test_text_shape_xml() {
        let part = SlidePart {
            background: None,
            shapes: vec![shape("Title & <more>", style(true, Align::Left, VerticalAlign::Middle))],
        };
        let xml = String::from_utf8(part.to_xml().unwrap()).unwrap();

        assert!(!xml.contains("<p:bg>"));
        assert!(xml.contains(r#"<p:cNvPr id="2" name="TextBox 1"/>"#));
        assert!(xml.contains(r#"<a:off x="457200" y="914400"/>"#));
        assert!(xml.contains(r#"<a:ext cx="1828800" cy="228600"/>"#));
        assert!(xml.contains(r#"anchor="ctr""#));
        assert!(xml.contains(r#"<a:pPr algn="l"/>"#));
        assert!(xml.contains(r#"sz="2000" b="1""#));
        assert!(xml.contains("Title &amp; &lt;more&gt;"));
    }

    #[test]
    fn test_lines_become_paragraphs() {
        let part = SlidePart {
            background: None,
            shapes: vec![shape("- one\n- two\n", style(false, Align::Right, VerticalAlign::Top))],
        };
        let xml = String::from_utf8(part.to_xml().unwrap()).unwrap();

        assert_eq!(xml.matches("<a:p>").count(), 3);
        assert_eq!(xml.matches("<a:endParaRPr").count(), 1);
        assert!(xml.contains(r#"<a:pPr algn="r"/>"#));
        assert!(xml.contains(r#"anchor="t""#));
        assert!(!xml.contains(r#"b="1""#));
    }
}
