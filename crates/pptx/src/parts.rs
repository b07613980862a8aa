//! Package-level parts: content types, relationships, document
//! properties, and the fixed theme / master / layout.

use quick_xml::escape::escape;
use slidemd_core::layout::{CANVAS_HEIGHT, CANVAS_WIDTH};

use crate::slide::emu;

pub(crate) const NS_DRAWING: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_PRESENTATION: &str =
    "http://schemas.openxmlformats.org/presentationml/2006/main";

const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_TYPE_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";

/// Relationship ids in presentation.xml.rels before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// Deck-level document properties.
#[derive(Debug, Clone)]
pub(crate) struct DocProps {
    pub title: String,
    pub author: String,
    pub subject: String,
}

pub(crate) fn content_types(slide_count: usize) -> String {
    let mut xml = format!(
        r#"{XML_DECL}
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
  <Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>
  <Override PartName="/ppt/presProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presProps+xml"/>
  <Override PartName="/ppt/viewProps.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.viewProps+xml"/>
  <Override PartName="/ppt/tableStyles.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml"/>
  <Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>
  <Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/>
  <Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/>
  <Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>
  <Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>
"#
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            "  <Override PartName=\"/ppt/slides/slide{n}.xml\" ContentType=\"application/vnd.openxmlformats-officedocument.presentationml.slide+xml\"/>\n"
        ));
    }
    xml.push_str("</Types>");
    xml
}

pub(crate) fn root_rels() -> String {
    format!(
        r#"{XML_DECL}
<Relationships xmlns="{NS_PACKAGE_RELS}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>
</Relationships>"#
    )
}

pub(crate) fn core_props(props: &DocProps) -> String {
    format!(
        r#"{XML_DECL}
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
  <dc:title>{}</dc:title>
  <dc:subject>{}</dc:subject>
  <dc:creator>{}</dc:creator>
  <cp:lastModifiedBy>{}</cp:lastModifiedBy>
</cp:coreProperties>"#,
        escape(props.title.as_str()),
        escape(props.subject.as_str()),
        escape(props.author.as_str()),
        escape(props.author.as_str()),
    )
}

pub(crate) fn app_props(slide_count: usize) -> String {
    format!(
        r#"{XML_DECL}
<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
  <Application>slidemd</Application>
  <PresentationFormat>Widescreen</PresentationFormat>
  <Slides>{slide_count}</Slides>
  <Notes>0</Notes>
  <HiddenSlides>0</HiddenSlides>
</Properties>"#
    )
}

/// presentation.xml; slides are `rId6`, `rId7`, ... in order.
pub(crate) fn presentation(slide_count: usize) -> String {
    let mut slide_ids = String::new();
    for n in 1..=slide_count {
        slide_ids.push_str(&format!(
            "    <p:sldId id=\"{}\" r:id=\"rId{}\"/>\n",
            255 + n,
            FIXED_PRESENTATION_RELS + n
        ));
    }
    let (cx, cy) = (emu(CANVAS_WIDTH), emu(CANVAS_HEIGHT));
    format!(
        r#"{XML_DECL}
<p:presentation xmlns:a="{NS_DRAWING}" xmlns:r="{NS_RELATIONSHIPS}" xmlns:p="{NS_PRESENTATION}" saveSubsetFonts="1">
  <p:sldMasterIdLst>
    <p:sldMasterId id="2147483648" r:id="rId1"/>
  </p:sldMasterIdLst>
  <p:sldIdLst>
{slide_ids}  </p:sldIdLst>
  <p:sldSz cx="{cx}" cy="{cy}"/>
  <p:notesSz cx="{cy}" cy="{cx}"/>
</p:presentation>"#
    )
}

pub(crate) fn presentation_rels(slide_count: usize) -> String {
    let mut xml = format!(
        r#"{XML_DECL}
<Relationships xmlns="{NS_PACKAGE_RELS}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="slideMasters/slideMaster1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="theme/theme1.xml"/>
  <Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps" Target="presProps.xml"/>
  <Relationship Id="rId4" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/viewProps" Target="viewProps.xml"/>
  <Relationship Id="rId5" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles" Target="tableStyles.xml"/>
"#
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            "  <Relationship Id=\"rId{}\" Type=\"{REL_TYPE_SLIDE}\" Target=\"slides/slide{n}.xml\"/>\n",
            FIXED_PRESENTATION_RELS + n
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

pub(crate) fn slide_rels() -> String {
    format!(
        r#"{XML_DECL}
<Relationships xmlns="{NS_PACKAGE_RELS}">
  <Relationship Id="rId1" Type="{REL_TYPE_SLIDE_LAYOUT}" Target="../slideLayouts/slideLayout1.xml"/>
</Relationships>"#
    )
}

pub(crate) fn pres_props() -> String {
    format!(
        r#"{XML_DECL}
<p:presentationPr xmlns:a="{NS_DRAWING}" xmlns:r="{NS_RELATIONSHIPS}" xmlns:p="{NS_PRESENTATION}"/>"#
    )
}

pub(crate) fn view_props() -> String {
    format!(
        r#"{XML_DECL}
<p:viewPr xmlns:a="{NS_DRAWING}" xmlns:r="{NS_RELATIONSHIPS}" xmlns:p="{NS_PRESENTATION}">
  <p:normalViewPr>
    <p:restoredLeft sz="15620"/>
    <p:restoredTop sz="94660"/>
  </p:normalViewPr>
  <p:gridSpacing cx="76200" cy="76200"/>
</p:viewPr>"#
    )
}

pub(crate) fn table_styles() -> String {
    format!(
        r#"{XML_DECL}
<a:tblStyleLst xmlns:a="{NS_DRAWING}" def="{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}"/>"#
    )
}

pub(crate) fn theme() -> String {
    format!(
        r#"{XML_DECL}
<a:theme xmlns:a="{NS_DRAWING}" name="slidemd">
  <a:themeElements>
    <a:clrScheme name="slidemd">
      <a:dk1><a:srgbClr val="111827"/></a:dk1>
      <a:lt1><a:srgbClr val="FFFFFF"/></a:lt1>
      <a:dk2><a:srgbClr val="1F2937"/></a:dk2>
      <a:lt2><a:srgbClr val="F9FAFB"/></a:lt2>
      <a:accent1><a:srgbClr val="2563EB"/></a:accent1>
      <a:accent2><a:srgbClr val="DB2777"/></a:accent2>
      <a:accent3><a:srgbClr val="16A34A"/></a:accent3>
      <a:accent4><a:srgbClr val="CA8A04"/></a:accent4>
      <a:accent5><a:srgbClr val="7C3AED"/></a:accent5>
      <a:accent6><a:srgbClr val="0891B2"/></a:accent6>
      <a:hlink><a:srgbClr val="2563EB"/></a:hlink>
      <a:folHlink><a:srgbClr val="7C3AED"/></a:folHlink>
    </a:clrScheme>
    <a:fontScheme name="slidemd">
      <a:majorFont><a:latin typeface="Calibri Light"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont>
      <a:minorFont><a:latin typeface="Calibri"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont>
    </a:fontScheme>
    <a:fmtScheme name="slidemd">
      <a:fillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:fillStyleLst>
      <a:lnStyleLst>
        <a:ln w="6350"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="12700"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
        <a:ln w="19050"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln>
      </a:lnStyleLst>
      <a:effectStyleLst>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
        <a:effectStyle><a:effectLst/></a:effectStyle>
      </a:effectStyleLst>
      <a:bgFillStyleLst>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
        <a:solidFill><a:schemeClr val="phClr"/></a:solidFill>
      </a:bgFillStyleLst>
    </a:fmtScheme>
  </a:themeElements>
</a:theme>"#
    )
}

pub(crate) fn slide_master() -> String {
    format!(
        r#"{XML_DECL}
<p:sldMaster xmlns:a="{NS_DRAWING}" xmlns:r="{NS_RELATIONSHIPS}" xmlns:p="{NS_PRESENTATION}">
  <p:cSld>
    <p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg>
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/>
  <p:sldLayoutIdLst>
    <p:sldLayoutId id="2147483649" r:id="rId1"/>
  </p:sldLayoutIdLst>
</p:sldMaster>"#
    )
}

pub(crate) fn slide_master_rels() -> String {
    format!(
        r#"{XML_DECL}
<Relationships xmlns="{NS_PACKAGE_RELS}">
  <Relationship Id="rId1" Type="{REL_TYPE_SLIDE_LAYOUT}" Target="../slideLayouts/slideLayout1.xml"/>
  <Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme" Target="../theme/theme1.xml"/>
</Relationships>"#
    )
}

pub(crate) fn slide_layout() -> String {
    format!(
        r#"{XML_DECL}
<p:sldLayout xmlns:a="{NS_DRAWING}" xmlns:r="{NS_RELATIONSHIPS}" xmlns:p="{NS_PRESENTATION}" type="blank" preserve="1">
  <p:cSld name="Blank">
    <p:spTree>
      <p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>
      <p:grpSpPr/>
    </p:spTree>
  </p:cSld>
  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>
</p:sldLayout>"#
    )
}

pub(crate) fn slide_layout_rels() -> String {
    format!(
        r#"{XML_DECL}
<Relationships xmlns="{NS_PACKAGE_RELS}">
  <Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster" Target="../slideMasters/slideMaster1.xml"/>
</Relationships>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_list_slides() {
        let xml = content_types(2);
        assert!(xml.contains("/ppt/slides/slide1.xml"));
        assert!(xml.contains("/ppt/slides/slide2.xml"));
        assert!(!xml.contains("/ppt/slides/slide3.xml"));
    }

    #[test]
    fn test_presentation_ids_match_rels() {
        let pres = presentation(2);
        let rels = presentation_rels(2);
        assert!(pres.contains(r#"<p:sldId id="256" r:id="rId6"/>"#));
        assert!(pres.contains(r#"<p:sldId id="257" r:id="rId7"/>"#));
        assert!(rels.contains(r#"Id="rId6""#) && rels.contains("slides/slide1.xml"));
        assert!(rels.contains(r#"Id="rId7""#) && rels.contains("slides/slide2.xml"));
        assert!(pres.contains(r#"<p:sldSz cx="12192000" cy="6858000"/>"#));
    }

    #[test]
    fn test_core_props_escaped() {
        let xml = core_props(&DocProps {
            title: "Q&A <draft>.md".into(),
            author: "slidemd".into(),
            subject: "Subject".into(),
        });
        assert!(xml.contains("<dc:title>Q&amp;A &lt;draft&gt;.md</dc:title>"));
        assert!(xml.contains("<dc:creator>slidemd</dc:creator>"));
    }

    #[test]
    fn test_table_styles_keeps_braces() {
        assert!(table_styles().contains(r#"def="{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}""#));
    }
}
