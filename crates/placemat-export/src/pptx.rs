//! PPTX (Office Open XML presentation) export.
//!
//! Writes a single-slide presentation package: one slide master, one blank
//! layout, one theme and one slide holding a rectangle shape with a text
//! body for every box in the scene. The package is a deflate-compressed ZIP
//! with no timestamps, so identical scenes produce identical bytes.

use placemat_core::{
    inches_to_emu, points_to_emu, Color, ExportError, TextAlign, EMU_PER_INCH,
};
use placemat_render::{DrawBox, Scene, SlideBackend};
use std::io::{Cursor, Write};
use tracing::{debug, debug_span};
use zip::write::{FileOptions, ZipWriter};
use zip::CompressionMethod;

const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
const NS_R: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
const NS_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

const XML_DECL: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Smallest and largest slide edge PowerPoint accepts (1 in to 56 in).
const MIN_SLIDE_EMU: i64 = 914_400;
const MAX_SLIDE_EMU: i64 = 51_206_400;

/// PPTX export options.
#[derive(Debug, Clone)]
pub struct PptxOptions {
    /// Title written to the document properties. Falls back to the scene title.
    pub title: Option<String>,
    /// Author written to the document properties.
    pub creator: String,
    /// Application name written to the extended properties.
    pub application: String,
}

impl Default for PptxOptions {
    fn default() -> Self {
        Self {
            title: None,
            creator: "Placemat Engine".to_string(),
            application: "Placemat Engine".to_string(),
        }
    }
}

/// Export a scene to PPTX.
pub fn export(scene: &Scene) -> Result<Vec<u8>, ExportError> {
    export_with_options(scene, &PptxOptions::default())
}

/// Export a scene to PPTX with custom options.
pub fn export_with_options(scene: &Scene, options: &PptxOptions) -> Result<Vec<u8>, ExportError> {
    let _span = debug_span!("export_pptx", boxes = scene.len()).entered();

    let mut builder = PptxBuilder::new(options);
    scene.render(&mut builder)?;
    let bytes = builder.finish()?;

    debug!(bytes = bytes.len(), "pptx package written");
    Ok(bytes)
}

/// Builder for a single-slide PPTX package.
pub struct PptxBuilder<'a> {
    options: &'a PptxOptions,
    title: String,
    font_family: String,
    slide_cx: i64,
    slide_cy: i64,
    shapes: String,
    shape_count: usize,
}

impl<'a> PptxBuilder<'a> {
    pub fn new(options: &'a PptxOptions) -> Self {
        Self {
            options,
            title: String::new(),
            font_family: "Arial".to_string(),
            slide_cx: 0,
            slide_cy: 0,
            shapes: String::new(),
            shape_count: 0,
        }
    }

    /// Number of shapes written so far.
    pub fn shape_count(&self) -> usize {
        self.shape_count
    }

    /// Assemble the package.
    pub fn finish(self) -> Result<Vec<u8>, ExportError> {
        if self.slide_cx == 0 || self.slide_cy == 0 {
            return Err(ExportError::InvalidSlide {
                reason: "no scene was rendered".to_string(),
            });
        }

        let buffer = Cursor::new(Vec::new());
        let mut zip = ZipWriter::new(buffer);

        let file_options: FileOptions<'_, ()> =
            FileOptions::default().compression_method(CompressionMethod::Deflated);

        let parts: [(&str, String); 16] = [
            ("[Content_Types].xml", self.content_types_xml()),
            ("_rels/.rels", self.root_rels_xml()),
            ("docProps/core.xml", self.core_xml()),
            ("docProps/app.xml", self.app_xml()),
            ("ppt/presentation.xml", self.presentation_xml()),
            ("ppt/_rels/presentation.xml.rels", self.presentation_rels_xml()),
            ("ppt/slideMasters/slideMaster1.xml", self.slide_master_xml()),
            (
                "ppt/slideMasters/_rels/slideMaster1.xml.rels",
                self.slide_master_rels_xml(),
            ),
            ("ppt/slideLayouts/slideLayout1.xml", self.slide_layout_xml()),
            (
                "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
                self.slide_layout_rels_xml(),
            ),
            ("ppt/slides/slide1.xml", self.slide_xml()),
            ("ppt/slides/_rels/slide1.xml.rels", self.slide_rels_xml()),
            ("ppt/theme/theme1.xml", self.theme_xml()),
            ("ppt/presProps.xml", self.pres_props_xml()),
            ("ppt/viewProps.xml", self.view_props_xml()),
            ("ppt/tableStyles.xml", self.table_styles_xml()),
        ];

        for (name, content) in &parts {
            zip.start_file(*name, file_options.clone()).map_err(archive_error)?;
            zip.write_all(content.as_bytes())?;
        }

        let result = zip.finish().map_err(archive_error)?;
        Ok(result.into_inner())
    }

    fn title(&self) -> &str {
        self.options.title.as_deref().unwrap_or(&self.title)
    }

    fn content_types_xml(&self) -> String {
        const PML: &str = "application/vnd.openxmlformats-officedocument.presentationml";
        let mut xml = String::from(XML_DECL);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
  <Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
  <Default Extension="xml" ContentType="application/xml"/>
"#,
        );
        let overrides = [
            ("/ppt/presentation.xml", format!("{PML}.presentation.main+xml")),
            ("/ppt/slideMasters/slideMaster1.xml", format!("{PML}.slideMaster+xml")),
            ("/ppt/slideLayouts/slideLayout1.xml", format!("{PML}.slideLayout+xml")),
            ("/ppt/slides/slide1.xml", format!("{PML}.slide+xml")),
            ("/ppt/presProps.xml", format!("{PML}.presProps+xml")),
            ("/ppt/viewProps.xml", format!("{PML}.viewProps+xml")),
            ("/ppt/tableStyles.xml", format!("{PML}.tableStyles+xml")),
            (
                "/ppt/theme/theme1.xml",
                "application/vnd.openxmlformats-officedocument.theme+xml".to_string(),
            ),
            (
                "/docProps/core.xml",
                "application/vnd.openxmlformats-package.core-properties+xml".to_string(),
            ),
            (
                "/docProps/app.xml",
                "application/vnd.openxmlformats-officedocument.extended-properties+xml".to_string(),
            ),
        ];
        for (part, content_type) in overrides {
            xml.push_str(&format!(
                "  <Override PartName=\"{part}\" ContentType=\"{content_type}\"/>\n"
            ));
        }
        xml.push_str("</Types>\n");
        xml
    }

    fn root_rels_xml(&self) -> String {
        relationships(&[
            ("rId1", &format!("{REL_BASE}/officeDocument"), "ppt/presentation.xml"),
            (
                "rId2",
                "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties",
                "docProps/core.xml",
            ),
            ("rId3", &format!("{REL_BASE}/extended-properties"), "docProps/app.xml"),
        ])
    }

    fn core_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(
            r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">
"#,
        );
        xml.push_str(&format!("  <dc:title>{}</dc:title>\n", escape_xml(self.title())));
        xml.push_str(&format!(
            "  <dc:creator>{}</dc:creator>\n",
            escape_xml(&self.options.creator)
        ));
        xml.push_str("</cp:coreProperties>\n");
        xml
    }

    fn app_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">
"#,
        );
        xml.push_str(&format!(
            "  <Application>{}</Application>\n",
            escape_xml(&self.options.application)
        ));
        xml.push_str("  <Slides>1</Slides>\n");
        xml.push_str("</Properties>\n");
        xml
    }

    fn presentation_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(
            "<p:presentation xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" saveSubsetFonts=\"1\">\n"
        ));
        xml.push_str("  <p:sldMasterIdLst><p:sldMasterId id=\"2147483648\" r:id=\"rId1\"/></p:sldMasterIdLst>\n");
        xml.push_str("  <p:sldIdLst><p:sldId id=\"256\" r:id=\"rId2\"/></p:sldIdLst>\n");
        xml.push_str(&format!(
            "  <p:sldSz cx=\"{}\" cy=\"{}\"/>\n",
            self.slide_cx, self.slide_cy
        ));
        xml.push_str("  <p:notesSz cx=\"6858000\" cy=\"9144000\"/>\n");
        xml.push_str("</p:presentation>\n");
        xml
    }

    fn presentation_rels_xml(&self) -> String {
        relationships(&[
            ("rId1", &format!("{REL_BASE}/slideMaster"), "slideMasters/slideMaster1.xml"),
            ("rId2", &format!("{REL_BASE}/slide"), "slides/slide1.xml"),
            ("rId3", &format!("{REL_BASE}/presProps"), "presProps.xml"),
            ("rId4", &format!("{REL_BASE}/viewProps"), "viewProps.xml"),
            ("rId5", &format!("{REL_BASE}/theme"), "theme/theme1.xml"),
            ("rId6", &format!("{REL_BASE}/tableStyles"), "tableStyles.xml"),
        ])
    }

    fn slide_master_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(
            "<p:sldMaster xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\n"
        ));
        xml.push_str("  <p:cSld>\n");
        xml.push_str("    <p:bg><p:bgRef idx=\"1001\"><a:schemeClr val=\"bg1\"/></p:bgRef></p:bg>\n");
        xml.push_str(&format!("    <p:spTree>{}</p:spTree>\n", GROUP_PROPERTIES));
        xml.push_str("  </p:cSld>\n");
        xml.push_str("  <p:clrMap bg1=\"lt1\" tx1=\"dk1\" bg2=\"lt2\" tx2=\"dk2\" accent1=\"accent1\" accent2=\"accent2\" accent3=\"accent3\" accent4=\"accent4\" accent5=\"accent5\" accent6=\"accent6\" hlink=\"hlink\" folHlink=\"folHlink\"/>\n");
        xml.push_str("  <p:sldLayoutIdLst><p:sldLayoutId id=\"2147483649\" r:id=\"rId1\"/></p:sldLayoutIdLst>\n");
        xml.push_str("  <p:txStyles><p:titleStyle/><p:bodyStyle/><p:otherStyle/></p:txStyles>\n");
        xml.push_str("</p:sldMaster>\n");
        xml
    }

    fn slide_master_rels_xml(&self) -> String {
        relationships(&[
            ("rId1", &format!("{REL_BASE}/slideLayout"), "../slideLayouts/slideLayout1.xml"),
            ("rId2", &format!("{REL_BASE}/theme"), "../theme/theme1.xml"),
        ])
    }

    fn slide_layout_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(
            "<p:sldLayout xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\" type=\"blank\" preserve=\"1\">\n"
        ));
        xml.push_str(&format!(
            "  <p:cSld name=\"Blank\"><p:spTree>{}</p:spTree></p:cSld>\n",
            GROUP_PROPERTIES
        ));
        xml.push_str("  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\n");
        xml.push_str("</p:sldLayout>\n");
        xml
    }

    fn slide_layout_rels_xml(&self) -> String {
        relationships(&[(
            "rId1",
            &format!("{REL_BASE}/slideMaster"),
            "../slideMasters/slideMaster1.xml",
        )])
    }

    fn slide_xml(&self) -> String {
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!(
            "<p:sld xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\">\n"
        ));
        xml.push_str("  <p:cSld>\n    <p:spTree>\n");
        xml.push_str(&format!("      {}\n", GROUP_PROPERTIES));
        xml.push_str(&self.shapes);
        xml.push_str("    </p:spTree>\n  </p:cSld>\n");
        xml.push_str("  <p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>\n");
        xml.push_str("</p:sld>\n");
        xml
    }

    fn slide_rels_xml(&self) -> String {
        relationships(&[(
            "rId1",
            &format!("{REL_BASE}/slideLayout"),
            "../slideLayouts/slideLayout1.xml",
        )])
    }

    fn theme_xml(&self) -> String {
        let font = escape_xml(&self.font_family);
        let mut xml = String::from(XML_DECL);
        xml.push_str(&format!("<a:theme xmlns:a=\"{NS_A}\" name=\"Placemat\">\n"));
        xml.push_str("  <a:themeElements>\n");

        xml.push_str("    <a:clrScheme name=\"Placemat\">\n");
        xml.push_str("      <a:dk1><a:sysClr val=\"windowText\" lastClr=\"000000\"/></a:dk1>\n");
        xml.push_str("      <a:lt1><a:sysClr val=\"window\" lastClr=\"FFFFFF\"/></a:lt1>\n");
        for (slot, hex) in [
            ("dk2", "44546A"),
            ("lt2", "E7E6E6"),
            ("accent1", "4472C4"),
            ("accent2", "ED7D31"),
            ("accent3", "A5A5A5"),
            ("accent4", "FFC000"),
            ("accent5", "5B9BD5"),
            ("accent6", "70AD47"),
            ("hlink", "0563C1"),
            ("folHlink", "954F72"),
        ] {
            xml.push_str(&format!("      <a:{slot}><a:srgbClr val=\"{hex}\"/></a:{slot}>\n"));
        }
        xml.push_str("    </a:clrScheme>\n");

        xml.push_str("    <a:fontScheme name=\"Placemat\">\n");
        for scheme in ["majorFont", "minorFont"] {
            xml.push_str(&format!(
                "      <a:{scheme}><a:latin typeface=\"{font}\"/><a:ea typeface=\"\"/><a:cs typeface=\"\"/></a:{scheme}>\n"
            ));
        }
        xml.push_str("    </a:fontScheme>\n");

        let fill = "<a:solidFill><a:schemeClr val=\"phClr\"/></a:solidFill>";
        xml.push_str("    <a:fmtScheme name=\"Placemat\">\n");
        xml.push_str(&format!("      <a:fillStyleLst>{fill}{fill}{fill}</a:fillStyleLst>\n"));
        xml.push_str("      <a:lnStyleLst>");
        for width in [6350, 12700, 19050] {
            xml.push_str(&format!(
                "<a:ln w=\"{width}\" cap=\"flat\" cmpd=\"sng\" algn=\"ctr\">{fill}<a:prstDash val=\"solid\"/><a:miter lim=\"800000\"/></a:ln>"
            ));
        }
        xml.push_str("</a:lnStyleLst>\n");
        xml.push_str("      <a:effectStyleLst>");
        for _ in 0..3 {
            xml.push_str("<a:effectStyle><a:effectLst/></a:effectStyle>");
        }
        xml.push_str("</a:effectStyleLst>\n");
        xml.push_str(&format!("      <a:bgFillStyleLst>{fill}{fill}{fill}</a:bgFillStyleLst>\n"));
        xml.push_str("    </a:fmtScheme>\n");

        xml.push_str("  </a:themeElements>\n");
        xml.push_str("  <a:objectDefaults/>\n  <a:extraClrSchemeLst/>\n");
        xml.push_str("</a:theme>\n");
        xml
    }

    fn pres_props_xml(&self) -> String {
        format!("{XML_DECL}<p:presentationPr xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\"/>\n")
    }

    fn view_props_xml(&self) -> String {
        format!("{XML_DECL}<p:viewPr xmlns:a=\"{NS_A}\" xmlns:r=\"{NS_R}\" xmlns:p=\"{NS_P}\"/>\n")
    }

    fn table_styles_xml(&self) -> String {
        format!(
            "{XML_DECL}<a:tblStyleLst xmlns:a=\"{NS_A}\" def=\"{{5C22544A-7EE6-4342-B048-85BDC9FD1C3A}}\"/>\n"
        )
    }

    fn write_shape(&mut self, command: &DrawBox, font_family: &str) {
        // Id 1 belongs to the shape tree itself.
        let id = self.shape_count + 2;
        self.shape_count += 1;

        let style = &command.style;
        let rect = &command.rect;
        let xml = &mut self.shapes;

        xml.push_str("      <p:sp>\n");
        xml.push_str(&format!(
            "        <p:nvSpPr><p:cNvPr id=\"{id}\" name=\"Box {}\"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr>\n",
            id - 1
        ));

        xml.push_str("        <p:spPr>\n");
        xml.push_str(&format!(
            "          <a:xfrm><a:off x=\"{}\" y=\"{}\"/><a:ext cx=\"{}\" cy=\"{}\"/></a:xfrm>\n",
            inches_to_emu(rect.x),
            inches_to_emu(rect.y),
            inches_to_emu(rect.width).max(1),
            inches_to_emu(rect.height).max(1),
        ));
        xml.push_str("          <a:prstGeom prst=\"rect\"><a:avLst/></a:prstGeom>\n");
        match style.fill {
            Some(color) => xml.push_str(&format!("          {}\n", solid_fill(color))),
            None => xml.push_str("          <a:noFill/>\n"),
        }
        match style.outline {
            Some(outline) => xml.push_str(&format!(
                "          <a:ln w=\"{}\">{}</a:ln>\n",
                points_to_emu(outline.width),
                solid_fill(outline.color)
            )),
            None => xml.push_str("          <a:ln><a:noFill/></a:ln>\n"),
        }
        xml.push_str("        </p:spPr>\n");

        let inset = points_to_emu(style.text_inset);
        let vert = if style.vertical_text { " vert=\"vert270\"" } else { "" };
        xml.push_str("        <p:txBody>\n");
        xml.push_str(&format!(
            "          <a:bodyPr wrap=\"square\" lIns=\"{inset}\" tIns=\"{inset}\" rIns=\"{inset}\" bIns=\"{inset}\" rtlCol=\"0\" anchor=\"ctr\"{vert}><a:noAutofit/></a:bodyPr>\n"
        ));
        xml.push_str("          <a:lstStyle/>\n");

        let size = (style.font_size * 100.0).round().clamp(100.0, 400_000.0) as i64;
        let bold = if style.bold { " b=\"1\"" } else { "" };
        let run_fill = solid_fill(style.font_color);
        let font = escape_xml(font_family);
        let align = alignment(style.align);

        for line in command.text.split('\n') {
            xml.push_str(&format!("          <a:p><a:pPr algn=\"{align}\"/>"));
            if line.is_empty() {
                xml.push_str(&format!(
                    "<a:endParaRPr lang=\"en-US\" sz=\"{size}\"{bold} dirty=\"0\"/>"
                ));
            } else {
                xml.push_str(&format!(
                    "<a:r><a:rPr lang=\"en-US\" sz=\"{size}\"{bold} dirty=\"0\">{run_fill}<a:latin typeface=\"{font}\"/><a:cs typeface=\"{font}\"/></a:rPr><a:t>{}</a:t></a:r>",
                    escape_xml(line)
                ));
            }
            xml.push_str("</a:p>\n");
        }
        xml.push_str("        </p:txBody>\n");
        xml.push_str("      </p:sp>\n");
    }
}

impl SlideBackend for PptxBuilder<'_> {
    fn begin(&mut self, scene: &Scene) -> Result<(), ExportError> {
        let slide_cx = inches_to_emu(scene.width);
        let slide_cy = inches_to_emu(scene.height);
        for (edge, value) in [("width", slide_cx), ("height", slide_cy)] {
            if !(MIN_SLIDE_EMU..=MAX_SLIDE_EMU).contains(&value) {
                return Err(ExportError::InvalidSlide {
                    reason: format!(
                        "slide {edge} {:.3} in is outside the 1 in to 56 in range",
                        value as f64 / EMU_PER_INCH
                    ),
                });
            }
        }

        self.slide_cx = slide_cx;
        self.slide_cy = slide_cy;
        self.title = scene.title.clone();
        self.font_family = scene.font_family.clone();
        self.shapes.clear();
        self.shape_count = 0;
        Ok(())
    }

    fn draw_box(&mut self, command: &DrawBox, font_family: &str) -> Result<(), ExportError> {
        self.write_shape(command, font_family);
        Ok(())
    }
}

/// Markup shared by every shape tree.
const GROUP_PROPERTIES: &str = "<p:nvGrpSpPr><p:cNvPr id=\"1\" name=\"\"/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x=\"0\" y=\"0\"/><a:ext cx=\"0\" cy=\"0\"/><a:chOff x=\"0\" y=\"0\"/><a:chExt cx=\"0\" cy=\"0\"/></a:xfrm></p:grpSpPr>";

fn relationships(entries: &[(&str, &str, &str)]) -> String {
    let mut xml = String::from(XML_DECL);
    xml.push_str(&format!("<Relationships xmlns=\"{NS_RELS}\">\n"));
    for (id, kind, target) in entries {
        xml.push_str(&format!(
            "  <Relationship Id=\"{id}\" Type=\"{kind}\" Target=\"{target}\"/>\n"
        ));
    }
    xml.push_str("</Relationships>\n");
    xml
}

fn solid_fill(color: Color) -> String {
    format!("<a:solidFill><a:srgbClr val=\"{}\"/></a:solidFill>", color.to_hex())
}

fn alignment(align: TextAlign) -> &'static str {
    match align {
        TextAlign::Left => "l",
        TextAlign::Center => "ctr",
        TextAlign::Right => "r",
    }
}

fn archive_error(err: zip::result::ZipError) -> ExportError {
    ExportError::Archive { reason: err.to_string() }
}

/// Escape special XML characters and drop control characters XML 1.0
/// cannot carry.
fn escape_xml(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control() || *c == '\t')
        .collect::<String>()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
