//! SVG preview export.
//!
//! Draws the same scene the PPTX writer consumes at 96 pixels per inch so a
//! layout can be checked in a browser without an office suite.

use placemat_core::{Color, ExportError, TextAlign};
use placemat_render::{DrawBox, Scene, SlideBackend};

/// Preview resolution.
pub const PIXELS_PER_INCH: f64 = 96.0;

/// Export a scene to an SVG document.
pub fn export(scene: &Scene) -> Result<String, ExportError> {
    let mut builder = SvgBuilder::default();
    scene.render(&mut builder)?;
    builder.svg.push_str("</svg>\n");
    Ok(builder.svg)
}

#[derive(Default)]
struct SvgBuilder {
    svg: String,
}

impl SlideBackend for SvgBuilder {
    fn begin(&mut self, scene: &Scene) -> Result<(), ExportError> {
        if !(scene.width > 0.0 && scene.height > 0.0) {
            return Err(ExportError::InvalidSlide {
                reason: format!("slide size {} x {} has no area", scene.width, scene.height),
            });
        }

        let width = px(scene.width);
        let height = px(scene.height);
        self.svg.clear();
        self.svg.push_str(&format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
"#
        ));
        if !scene.title.is_empty() {
            self.svg
                .push_str(&format!("  <title>{}</title>\n", escape_xml(&scene.title)));
        }
        self.svg.push_str(&format!(
            "  <rect x=\"0\" y=\"0\" width=\"{width}\" height=\"{height}\" fill=\"{}\"/>\n",
            Color::WHITE
        ));
        Ok(())
    }

    fn draw_box(&mut self, command: &DrawBox, font_family: &str) -> Result<(), ExportError> {
        let style = &command.style;
        let rect = &command.rect;
        let (x, y, w, h) = (px(rect.x), px(rect.y), px(rect.width), px(rect.height));

        let fill = style
            .fill
            .map(|color| color.to_string())
            .unwrap_or_else(|| "none".to_string());
        self.svg.push_str("  <g>\n");
        self.svg.push_str(&format!(
            "    <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{fill}\""
        ));
        if let Some(outline) = style.outline {
            // Points to pixels.
            let stroke = round(outline.width * PIXELS_PER_INCH / 72.0);
            self.svg
                .push_str(&format!(" stroke=\"{}\" stroke-width=\"{stroke}\"", outline.color));
        }
        self.svg.push_str("/>\n");

        if command.text.is_empty() {
            self.svg.push_str("  </g>\n");
            return Ok(());
        }

        let inset = round(style.text_inset * PIXELS_PER_INCH / 72.0);
        let (anchor, tx) = match style.align {
            TextAlign::Left => ("start", x + inset),
            TextAlign::Center => ("middle", round(x + w / 2.0)),
            TextAlign::Right => ("end", x + w - inset),
        };
        let cy = round(y + h / 2.0);
        let font_px = round(style.font_size * PIXELS_PER_INCH / 72.0);
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
        let transform = if style.vertical_text {
            let cx = round(x + w / 2.0);
            format!(" transform=\"rotate(-90 {cx} {cy})\"")
        } else {
            String::new()
        };
        let tx = if style.vertical_text { round(x + w / 2.0) } else { tx };
        let anchor = if style.vertical_text { "middle" } else { anchor };

        self.svg.push_str(&format!(
            "    <text x=\"{tx}\" y=\"{cy}\" font-family=\"{}\" font-size=\"{font_px}\"{weight} fill=\"{}\" text-anchor=\"{anchor}\" dominant-baseline=\"middle\"{transform}>",
            escape_xml(font_family),
            style.font_color,
        ));

        let lines: Vec<&str> = command.text.split('\n').collect();
        if lines.len() == 1 {
            self.svg.push_str(&escape_xml(lines[0]));
        } else {
            let line_px = round(font_px * 1.2);
            let first = round(-(lines.len() as f64 - 1.0) / 2.0 * line_px);
            for (i, line) in lines.iter().enumerate() {
                let dy = if i == 0 { first } else { line_px };
                self.svg.push_str(&format!(
                    "<tspan x=\"{tx}\" dy=\"{dy}\">{}</tspan>",
                    escape_xml(line)
                ));
            }
        }
        self.svg.push_str("</text>\n  </g>\n");
        Ok(())
    }
}

fn px(inches: f64) -> f64 {
    round(inches * PIXELS_PER_INCH)
}

fn round(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn escape_xml(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_control())
        .collect::<String>()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use placemat_core::{BoxStyle, Outline, Rect};
    use placemat_layout::BoxKind;

    fn draw(text: &str, style: BoxStyle) -> DrawBox {
        DrawBox {
            rect: Rect::new(1.0, 0.5, 2.0, 0.5),
            text: text.to_string(),
            style,
            kind: BoxKind::Label,
        }
    }

    #[test]
    fn test_svg_canvas_size() {
        let svg = export(&Scene::new(22.0, 13.0, "Arial")).unwrap();
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("width=\"2112\" height=\"1248\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_svg_box() {
        let mut scene = Scene::new(10.0, 5.0, "Arial").with_title("Preview");
        scene.push(draw(
            "Db2",
            BoxStyle {
                fill: Some(Color::rgb(0, 32, 96)),
                font_color: Color::WHITE,
                outline: Some(Outline { color: Color::BLACK, width: 0.75 }),
                bold: true,
                ..Default::default()
            },
        ));
        let svg = export(&scene).unwrap();
        assert!(svg.contains("<title>Preview</title>"));
        assert!(svg.contains(
            "<rect x=\"96\" y=\"48\" width=\"192\" height=\"48\" fill=\"#002060\" stroke=\"#000000\" stroke-width=\"1\"/>"
        ));
        assert!(svg.contains("font-weight=\"bold\""));
        assert!(svg.contains(">Db2</text>"));
        assert!(svg.contains("text-anchor=\"middle\""));
    }

    #[test]
    fn test_svg_vertical_text_is_rotated() {
        let mut scene = Scene::new(10.0, 5.0, "Arial");
        scene.push(draw("Client Engineering", BoxStyle { vertical_text: true, ..Default::default() }));
        let svg = export(&scene).unwrap();
        assert!(svg.contains("transform=\"rotate(-90 192 72)\""));
    }

    #[test]
    fn test_svg_multiline_and_escaping() {
        let mut scene = Scene::new(10.0, 5.0, "Arial");
        scene.push(draw("Red Hat\nA & B", BoxStyle::default()));
        let svg = export(&scene).unwrap();
        assert_eq!(svg.matches("<tspan").count(), 2);
        assert!(svg.contains("A &amp; B"));
    }

    #[test]
    fn test_svg_rejects_empty_slide() {
        let result = export(&Scene::new(0.0, 5.0, "Arial"));
        assert!(matches!(result, Err(ExportError::InvalidSlide { .. })));
    }
}
