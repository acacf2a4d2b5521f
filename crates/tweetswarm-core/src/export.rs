//! Scene export
//!
//! Supports writing a rendered scene to:
//! - SVG: standalone vector image
//! - JSON: the retained scene tree, for tooling and tests

use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, ExportResult};
use crate::scene::{Attr, Scene, SceneNode, Shape, ShapeKind, Text};

/// Export format for scenes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// SVG scalable vector graphics
    #[default]
    Svg,
    /// JSON dump of the scene tree
    Json,
}

impl ExportFormat {
    /// Get file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension
    pub fn from_path(path: impl AsRef<Path>) -> Option<Self> {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "svg" => Ok(ExportFormat::Svg),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Serialize a scene
pub fn export_scene(scene: &Scene, format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Svg => Ok(scene_to_svg(scene)),
        ExportFormat::Json => {
            serde_json::to_string_pretty(scene).map_err(|e| ExportError::Serialize(e.to_string()))
        }
    }
}

/// Serialize a scene and write it to a file
pub fn write_scene(scene: &Scene, path: impl AsRef<Path>, format: ExportFormat) -> ExportResult<()> {
    let path = path.as_ref();
    let content = export_scene(scene, format)?;
    std::fs::write(path, content).map_err(|e| ExportError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    tracing::info!("Wrote {} scene to {:?}", format.extension(), path);
    Ok(())
}

/// Render a scene as a standalone SVG document
pub fn scene_to_svg(scene: &Scene) -> String {
    let mut svg = String::new();
    let _ = writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = num(scene.width),
        h = num(scene.height)
    );

    for node in scene.nodes() {
        match node {
            SceneNode::Shape(shape) => write_shape(&mut svg, shape),
            SceneNode::Text(text) => write_text(&mut svg, text),
        }
    }

    svg.push_str("</svg>\n");
    svg
}

fn write_shape(svg: &mut String, shape: &Shape) {
    let tag = match shape.kind {
        ShapeKind::Circle => "circle",
        ShapeKind::Rect => "rect",
    };
    let _ = write!(svg, "  <{}", tag);

    for attr in &shape.attrs {
        let _ = match attr {
            Attr::Cx(v) => write!(svg, r#" cx="{}""#, num(*v)),
            Attr::Cy(v) => write!(svg, r#" cy="{}""#, num(*v)),
            Attr::R(v) => write!(svg, r#" r="{}""#, num(*v)),
            Attr::X(v) => write!(svg, r#" x="{}""#, num(*v)),
            Attr::Y(v) => write!(svg, r#" y="{}""#, num(*v)),
            Attr::Width(v) => write!(svg, r#" width="{}""#, num(*v)),
            Attr::Height(v) => write!(svg, r#" height="{}""#, num(*v)),
            Attr::Fill(p) => write!(svg, r#" fill="{}""#, p.to_svg()),
            Attr::Stroke(p) => write!(svg, r#" stroke="{}""#, p.to_svg()),
            Attr::StrokeWidth(v) => write!(svg, r#" stroke-width="{}""#, num(*v)),
            Attr::Cursor(c) => write!(svg, r#" cursor="{}""#, c.as_str()),
        };
    }

    match shape.record() {
        Some(record) => {
            let _ = writeln!(svg, "><title>{}</title></{}>", escape(&record.text), tag);
        }
        None => svg.push_str("/>\n"),
    }
}

fn write_text(svg: &mut String, text: &Text) {
    let weight = if text.style.bold { "bold" } else { "normal" };
    let _ = writeln!(
        svg,
        r#"  <text x="{}" y="{}" font-size="{}px" font-weight="{}" text-anchor="{}">{}</text>"#,
        num(text.position.x),
        num(text.position.y),
        num(text.style.font_size),
        weight,
        text.style.anchor.as_str(),
        escape(&text.content)
    );
}

/// Format a coordinate with at most two decimals
fn num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else {
        format!("{}", rounded)
    }
}

fn escape(text: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::POSITIVE;
    use crate::scene::{Cursor, Paint, Point, SceneAction, Surface, TextAnchor, TextStyle};
    use tweetswarm_io::{Category, Record};

    fn sample_scene() -> Scene {
        let mut scene = Scene::new(200.0, 100.0);
        let handle = scene.draw_shape(
            ShapeKind::Circle,
            vec![
                Attr::Cx(10.256),
                Attr::Cy(20.0),
                Attr::R(5.0),
                Attr::Fill(Paint::Color(POSITIVE)),
                Attr::Stroke(Paint::None),
                Attr::Cursor(Cursor::Pointer),
            ],
        );
        scene.on_click(
            handle,
            SceneAction::Toggle(Record::new("fish & <chips>", Category::March)),
        );
        scene.draw_text(
            "April",
            Point::new(50.0, 125.0),
            TextStyle::bold(16.0).with_anchor(TextAnchor::End),
        );
        scene
    }

    #[test]
    fn test_export_format_extension() {
        assert_eq!(ExportFormat::Svg.extension(), "svg");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::from_path("out/plot.SVG"), Some(ExportFormat::Svg));
        assert_eq!(ExportFormat::from_path("plot.png"), None);
        assert!(matches!(
            "pdf".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_svg_output() {
        let svg = export_scene(&sample_scene(), ExportFormat::Svg).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"width="200" height="100""#));
        assert!(svg.contains(r#"cx="10.26""#));
        assert!(svg.contains(r##"fill="#4daf4a""##));
        assert!(svg.contains(r#"stroke="none""#));
        assert!(svg.contains(r#"cursor="pointer""#));
        assert!(svg.contains("<title>fish &amp; &lt;chips&gt;</title>"));
        assert!(svg.contains(r#"text-anchor="end""#));
        assert!(svg.contains(">April</text>"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_json_output() {
        let json = export_scene(&sample_scene(), ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["width"], 200.0);
        let nodes = value["root"].as_array().unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0]["node"], "shape");
        assert_eq!(nodes[0]["action"]["record"]["RawTweet"], "fish & <chips>");
        assert_eq!(nodes[1]["content"], "April");
    }

    #[test]
    fn test_write_scene() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        write_scene(&sample_scene(), &path, ExportFormat::Svg).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("<circle"));

        let bad = dir.path().join("missing").join("plot.svg");
        assert!(matches!(
            write_scene(&sample_scene(), &bad, ExportFormat::Svg),
            Err(ExportError::Write { .. })
        ));
    }

    #[test]
    fn test_num_formatting() {
        assert_eq!(num(300.0), "300");
        assert_eq!(num(-0.001), "0");
        assert_eq!(num(2.004), "2");
        assert_eq!(num(12.5), "12.5");
    }
}
