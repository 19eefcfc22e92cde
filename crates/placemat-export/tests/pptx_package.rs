//! Integration tests that open the generated PPTX as a ZIP package.

use std::io::{Cursor, Read};

use placemat_core::{LayoutNode, Padding, Placemat, SlideSize, StyleSpec, Theme, Track};
use placemat_export::{export_pptx, export_pptx_with_options, render_placemat, PptxOptions};
use zip::ZipArchive;

const REQUIRED_PARTS: &[&str] = &[
    "[Content_Types].xml",
    "_rels/.rels",
    "docProps/core.xml",
    "docProps/app.xml",
    "ppt/presentation.xml",
    "ppt/_rels/presentation.xml.rels",
    "ppt/slideMasters/slideMaster1.xml",
    "ppt/slideMasters/_rels/slideMaster1.xml.rels",
    "ppt/slideLayouts/slideLayout1.xml",
    "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
    "ppt/slides/slide1.xml",
    "ppt/slides/_rels/slide1.xml.rels",
    "ppt/theme/theme1.xml",
    "ppt/presProps.xml",
    "ppt/viewProps.xml",
    "ppt/tableStyles.xml",
];

fn placemat() -> Placemat {
    let mut theme = Theme::default();
    theme.styles.insert(
        "header".into(),
        StyleSpec {
            fill: Some("#404040".into()),
            font_color: "#FFFFFF".into(),
            bold: true,
            font_size: 9.0,
            ..Default::default()
        },
    );
    theme.styles.insert(
        "cell".into(),
        StyleSpec {
            fill: Some("#FFFFFF".into()),
            ..Default::default()
        },
    );

    Placemat {
        title: "Infrastructure".to_string(),
        slide: SlideSize { width: 13.333, height: 7.5 },
        theme,
        root: LayoutNode::inset(
            Padding::uniform(0.2),
            LayoutNode::row(
                0.1,
                vec![
                    Track::span(3, LayoutNode::grid(["Scale", "Ceph", "Flash"], 3, "cell")),
                    Track::span(2, LayoutNode::grid(["AIX", "IBM i"], 2, "cell")),
                    Track::fixed(2.0, LayoutNode::label("Power & Z", "header")),
                ],
            ),
        ),
    }
}

fn read_part(archive: &mut ZipArchive<Cursor<Vec<u8>>>, name: &str) -> String {
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_package_contains_every_part() {
    let scene = render_placemat(&placemat()).unwrap();
    let bytes = export_pptx(&scene).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

    assert_eq!(archive.len(), REQUIRED_PARTS.len());
    for part in REQUIRED_PARTS {
        assert!(archive.by_name(part).is_ok(), "missing part {part}");
    }

    let content_types = read_part(&mut archive, "[Content_Types].xml");
    assert!(content_types.contains("PartName=\"/ppt/slides/slide1.xml\""));
}

#[test]
fn test_slide_holds_one_shape_per_box() {
    let scene = render_placemat(&placemat()).unwrap();
    let bytes = export_pptx(&scene).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

    let slide = read_part(&mut archive, "ppt/slides/slide1.xml");
    assert_eq!(slide.matches("<p:sp>").count(), scene.len());
    for text in ["Scale", "Ceph", "Flash", "AIX", "IBM i", "Power &amp; Z"] {
        assert!(slide.contains(&format!("<a:t>{text}</a:t>")), "missing {text}");
    }
}

#[test]
fn test_presentation_metadata() {
    let scene = render_placemat(&placemat()).unwrap();
    let options = PptxOptions {
        creator: "Portfolio Team".to_string(),
        ..Default::default()
    };
    let bytes = export_pptx_with_options(&scene, &options).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

    let presentation = read_part(&mut archive, "ppt/presentation.xml");
    assert!(presentation.contains("<p:sldSz cx=\"12191695\" cy=\"6858000\"/>"));

    let core = read_part(&mut archive, "docProps/core.xml");
    assert!(core.contains("<dc:title>Infrastructure</dc:title>"));
    assert!(core.contains("<dc:creator>Portfolio Team</dc:creator>"));
}

#[test]
fn test_parts_are_deflated() {
    let scene = render_placemat(&placemat()).unwrap();
    let bytes = export_pptx(&scene).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();

    let slide = archive.by_name("ppt/slides/slide1.xml").unwrap();
    assert_eq!(slide.compression(), zip::CompressionMethod::Deflated);
}
