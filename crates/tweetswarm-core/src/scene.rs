//! Retained drawing surface
//!
//! The renderer talks to a [`Surface`]: a minimal retained-mode canvas that
//! can draw circles, rectangles and text, update shape attributes, and bind a
//! click action to a shape. [`Scene`] is the in-memory implementation used by
//! the plot view, the exporters and the tests. It keeps everything under a
//! single root in draw order, so clearing the root clears the whole scene.

use serde::Serialize;

use crate::color::Rgb;
use tweetswarm_io::Record;

/// Opaque reference to a drawn shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ShapeHandle(pub usize);

/// Kind of primitive
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rect,
}

/// Fill or stroke paint
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Paint {
    None,
    Color(Rgb),
}

impl Paint {
    /// SVG paint value
    pub fn to_svg(&self) -> String {
        match self {
            Paint::None => "none".to_string(),
            Paint::Color(c) => c.to_hex(),
        }
    }
}

/// Mouse cursor shown over a shape
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

impl Cursor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Pointer => "pointer",
        }
    }
}

/// A single shape attribute
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Attr {
    Cx(f64),
    Cy(f64),
    R(f64),
    X(f64),
    Y(f64),
    Width(f64),
    Height(f64),
    Fill(Paint),
    Stroke(Paint),
    StrokeWidth(f64),
    Cursor(Cursor),
}

/// Attribute name, used to replace an attribute in place
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttrKey {
    Cx,
    Cy,
    R,
    X,
    Y,
    Width,
    Height,
    Fill,
    Stroke,
    StrokeWidth,
    Cursor,
}

impl Attr {
    pub fn key(&self) -> AttrKey {
        match self {
            Attr::Cx(_) => AttrKey::Cx,
            Attr::Cy(_) => AttrKey::Cy,
            Attr::R(_) => AttrKey::R,
            Attr::X(_) => AttrKey::X,
            Attr::Y(_) => AttrKey::Y,
            Attr::Width(_) => AttrKey::Width,
            Attr::Height(_) => AttrKey::Height,
            Attr::Fill(_) => AttrKey::Fill,
            Attr::Stroke(_) => AttrKey::Stroke,
            Attr::StrokeWidth(_) => AttrKey::StrokeWidth,
            Attr::Cursor(_) => AttrKey::Cursor,
        }
    }

    fn number(&self) -> Option<f64> {
        match *self {
            Attr::Cx(v)
            | Attr::Cy(v)
            | Attr::R(v)
            | Attr::X(v)
            | Attr::Y(v)
            | Attr::Width(v)
            | Attr::Height(v)
            | Attr::StrokeWidth(v) => Some(v),
            _ => None,
        }
    }
}

/// A position in canvas pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Horizontal text alignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    #[default]
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Font settings of a text node
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub font_size: f64,
    pub bold: bool,
    pub anchor: TextAnchor,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            bold: false,
            anchor: TextAnchor::Start,
        }
    }
}

impl TextStyle {
    /// Bold text of the given size
    pub fn bold(font_size: f64) -> Self {
        Self {
            font_size,
            bold: true,
            ..Self::default()
        }
    }

    pub fn with_anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// What happens when a shape is clicked
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", content = "record", rename_all = "lowercase")]
pub enum SceneAction {
    /// Toggle the record in the selection
    Toggle(Record),
}

/// Retained-mode canvas
pub trait Surface {
    /// Set the canvas size
    fn resize(&mut self, width: f64, height: f64);

    /// Remove everything under the root
    fn clear_all(&mut self);

    /// Add a shape and return its handle
    fn draw_shape(&mut self, kind: ShapeKind, attrs: Vec<Attr>) -> ShapeHandle;

    /// Set or replace one attribute of a shape
    fn set_attr(&mut self, handle: ShapeHandle, attr: Attr);

    /// Bind a click action to a shape, replacing any previous one
    fn on_click(&mut self, handle: ShapeHandle, action: SceneAction);

    /// Add a text node
    fn draw_text(&mut self, content: &str, position: Point, style: TextStyle);
}

/// A drawn shape
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Shape {
    pub kind: ShapeKind,
    pub attrs: Vec<Attr>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<SceneAction>,
}

impl Shape {
    /// Look up an attribute by name
    pub fn attr(&self, key: AttrKey) -> Option<&Attr> {
        self.attrs.iter().find(|a| a.key() == key)
    }

    /// Numeric attribute value, if set
    pub fn number(&self, key: AttrKey) -> Option<f64> {
        self.attr(key).and_then(Attr::number)
    }

    pub fn fill(&self) -> Option<Paint> {
        match self.attr(AttrKey::Fill) {
            Some(Attr::Fill(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn stroke(&self) -> Option<Paint> {
        match self.attr(AttrKey::Stroke) {
            Some(Attr::Stroke(p)) => Some(*p),
            _ => None,
        }
    }

    /// Center of a circle
    pub fn center(&self) -> Option<Point> {
        match self.kind {
            ShapeKind::Circle => Some(Point::new(
                self.number(AttrKey::Cx)?,
                self.number(AttrKey::Cy)?,
            )),
            ShapeKind::Rect => None,
        }
    }

    /// Record toggled by clicking this shape
    pub fn record(&self) -> Option<&Record> {
        match &self.action {
            Some(SceneAction::Toggle(record)) => Some(record),
            None => None,
        }
    }

    fn set(&mut self, attr: Attr) {
        let key = attr.key();
        match self.attrs.iter_mut().find(|a| a.key() == key) {
            Some(slot) => *slot = attr,
            None => self.attrs.push(attr),
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        match self.kind {
            ShapeKind::Circle => match (self.center(), self.number(AttrKey::R)) {
                (Some(c), Some(r)) => (x - c.x).hypot(y - c.y) <= r,
                _ => false,
            },
            ShapeKind::Rect => {
                let left = self.number(AttrKey::X).unwrap_or(0.0);
                let top = self.number(AttrKey::Y).unwrap_or(0.0);
                let width = self.number(AttrKey::Width).unwrap_or(0.0);
                let height = self.number(AttrKey::Height).unwrap_or(0.0);
                x >= left && x <= left + width && y >= top && y <= top + height
            }
        }
    }
}

/// A text node
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Text {
    pub content: String,
    pub position: Point,
    pub style: TextStyle,
}

/// Child of the scene root
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "node", rename_all = "lowercase")]
pub enum SceneNode {
    Shape(Shape),
    Text(Text),
}

/// In-memory scene with a single root
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    root: Vec<SceneNode>,
}

impl Scene {
    /// Create an empty scene
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            root: Vec::new(),
        }
    }

    /// All nodes in draw order
    pub fn nodes(&self) -> &[SceneNode] {
        &self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }

    /// Get a shape by handle
    pub fn shape(&self, handle: ShapeHandle) -> Option<&Shape> {
        match self.root.get(handle.0) {
            Some(SceneNode::Shape(shape)) => Some(shape),
            _ => None,
        }
    }

    /// Shapes with their handles, in draw order
    pub fn shapes(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.root.iter().enumerate().filter_map(|(i, node)| match node {
            SceneNode::Shape(shape) => Some((ShapeHandle(i), shape)),
            SceneNode::Text(_) => None,
        })
    }

    /// Circles with their handles, in draw order
    pub fn circles(&self) -> impl Iterator<Item = (ShapeHandle, &Shape)> {
        self.shapes()
            .filter(|(_, shape)| shape.kind == ShapeKind::Circle)
    }

    /// Text nodes in draw order
    pub fn texts(&self) -> impl Iterator<Item = &Text> {
        self.root.iter().filter_map(|node| match node {
            SceneNode::Text(text) => Some(text),
            SceneNode::Shape(_) => None,
        })
    }

    /// Action bound to a shape
    pub fn click(&self, handle: ShapeHandle) -> Option<&SceneAction> {
        self.shape(handle).and_then(|shape| shape.action.as_ref())
    }

    /// Top-most clickable shape under a canvas position
    pub fn hit_test(&self, x: f64, y: f64) -> Option<ShapeHandle> {
        self.shapes()
            .filter(|(_, shape)| shape.action.is_some() && shape.contains(x, y))
            .last()
            .map(|(handle, _)| handle)
    }

    /// Circle bound to the record with this text
    pub fn handle_for_text(&self, text: &str) -> Option<ShapeHandle> {
        self.circles()
            .find(|(_, shape)| shape.record().is_some_and(|r| r.text == text))
            .map(|(handle, _)| handle)
    }

    fn shape_mut(&mut self, handle: ShapeHandle) -> Option<&mut Shape> {
        match self.root.get_mut(handle.0) {
            Some(SceneNode::Shape(shape)) => Some(shape),
            _ => None,
        }
    }
}

impl Surface for Scene {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn clear_all(&mut self) {
        self.root.clear();
    }

    fn draw_shape(&mut self, kind: ShapeKind, attrs: Vec<Attr>) -> ShapeHandle {
        let mut shape = Shape {
            kind,
            attrs: Vec::with_capacity(attrs.len()),
            action: None,
        };
        for attr in attrs {
            shape.set(attr);
        }
        self.root.push(SceneNode::Shape(shape));
        ShapeHandle(self.root.len() - 1)
    }

    fn set_attr(&mut self, handle: ShapeHandle, attr: Attr) {
        match self.shape_mut(handle) {
            Some(shape) => shape.set(attr),
            None => tracing::debug!("set_attr on missing shape {:?}", handle),
        }
    }

    fn on_click(&mut self, handle: ShapeHandle, action: SceneAction) {
        match self.shape_mut(handle) {
            Some(shape) => shape.action = Some(action),
            None => tracing::debug!("on_click on missing shape {:?}", handle),
        }
    }

    fn draw_text(&mut self, content: &str, position: Point, style: TextStyle) {
        self.root.push(SceneNode::Text(Text {
            content: content.to_string(),
            position,
            style,
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tweetswarm_io::Category;

    fn circle(scene: &mut Scene, cx: f64, cy: f64) -> ShapeHandle {
        scene.draw_shape(
            ShapeKind::Circle,
            vec![Attr::Cx(cx), Attr::Cy(cy), Attr::R(5.0)],
        )
    }

    #[test]
    fn test_draw_and_lookup() {
        let mut scene = Scene::new(100.0, 100.0);
        let handle = circle(&mut scene, 10.0, 20.0);
        scene.draw_text("March", Point::new(0.0, 0.0), TextStyle::bold(16.0));

        let shape = scene.shape(handle).unwrap();
        assert_eq!(shape.center(), Some(Point::new(10.0, 20.0)));
        assert_eq!(scene.texts().count(), 1);
        assert_eq!(scene.circles().count(), 1);
    }

    #[test]
    fn test_set_attr_replaces() {
        let mut scene = Scene::new(100.0, 100.0);
        let handle = circle(&mut scene, 10.0, 20.0);
        scene.set_attr(handle, Attr::Stroke(Paint::Color(Rgb::BLACK)));
        scene.set_attr(handle, Attr::Stroke(Paint::None));

        let shape = scene.shape(handle).unwrap();
        assert_eq!(shape.stroke(), Some(Paint::None));
        assert_eq!(shape.attrs.len(), 4);
    }

    #[test]
    fn test_click_and_hit_test() {
        let mut scene = Scene::new(100.0, 100.0);
        let a = circle(&mut scene, 10.0, 10.0);
        let b = circle(&mut scene, 14.0, 10.0);
        let record = Record::new("b", Category::May);
        scene.on_click(a, SceneAction::Toggle(Record::new("a", Category::May)));
        scene.on_click(b, SceneAction::Toggle(record.clone()));

        assert_eq!(scene.click(b), Some(&SceneAction::Toggle(record)));
        // overlapping area resolves to the shape drawn last
        assert_eq!(scene.hit_test(12.0, 10.0), Some(b));
        assert_eq!(scene.hit_test(6.0, 10.0), Some(a));
        assert_eq!(scene.hit_test(60.0, 60.0), None);
        assert_eq!(scene.handle_for_text("a"), Some(a));
    }

    #[test]
    fn test_clear_all_empties_root() {
        let mut scene = Scene::new(100.0, 100.0);
        circle(&mut scene, 1.0, 1.0);
        scene.clear_all();
        assert!(scene.is_empty());
        assert_eq!(scene.shape(ShapeHandle(0)), None);
    }

    #[test]
    fn test_set_attr_on_text_is_ignored() {
        let mut scene = Scene::new(100.0, 100.0);
        scene.draw_text("x", Point::default(), TextStyle::default());
        scene.set_attr(ShapeHandle(0), Attr::R(3.0));
        assert_eq!(scene.shapes().count(), 0);
    }
}
