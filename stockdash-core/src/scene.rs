//! Scene: an ordered display list in logical pixel coordinates.
//!
//! Origin is the top-left corner of the panel surface and y grows downward.
//! Front ends paint shapes in order; a panel render always returns a brand
//! new scene, so nothing from a previous render can leak into the next one.

use serde::{Deserialize, Serialize};

/// 24-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fallback for series without an assigned color.
    pub const FALLBACK: Color = Color::rgb(0x44, 0x44, 0x44);
    /// Volume bars.
    pub const VOLUME: Color = Color::rgb(0xBB, 0xBB, 0xBB);
    /// Split markers.
    pub const SPLIT: Color = Color::rgb(0x00, 0x00, 0xFF);
    /// Scatter points.
    pub const POINT: Color = Color::rgb(0x00, 0x72, 0xB2);
    /// Regression line.
    pub const FIT: Color = Color::rgb(0xD5, 0x5E, 0x00);
    pub const TEXT: Color = Color::rgb(0x11, 0x11, 0x11);
    pub const BOX: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Horizontal text alignment relative to the anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchor {
    Start,
    Middle,
    End,
}

/// Side of the plot an axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisSide {
    Bottom,
    Left,
    Right,
}

/// A labelled tick at a pixel offset along its axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis line at `offset` (y for bottom, x for left/right) spanning `span`.
    Axis {
        side: AxisSide,
        offset: f64,
        span: (f64, f64),
        ticks: Vec<Tick>,
    },
    Polyline {
        points: Vec<(f64, f64)>,
        color: Color,
        width: f64,
        opacity: f64,
    },
    Line {
        from: (f64, f64),
        to: (f64, f64),
        color: Color,
        width: f64,
        dashed: bool,
        opacity: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Color,
        opacity: f64,
    },
    Circle {
        center: (f64, f64),
        radius: f64,
        fill: Color,
        opacity: f64,
    },
    Text {
        at: (f64, f64),
        text: String,
        anchor: Anchor,
        size: f64,
        bold: bool,
        /// Rotated -90° (vertical axis titles).
        vertical: bool,
    },
}

/// Display list for one panel surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub shapes: Vec<Shape>,
    /// Message shown instead of a chart.
    pub placeholder: Option<String>,
}

impl Scene {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
            placeholder: None,
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Panel title centered at the top.
    pub fn title(&mut self, text: impl Into<String>) {
        self.push(Shape::Text {
            at: (self.width / 2.0, 16.0),
            text: text.into(),
            anchor: Anchor::Middle,
            size: 12.0,
            bold: true,
            vertical: false,
        });
    }

    pub fn label(&mut self, at: (f64, f64), text: impl Into<String>, anchor: Anchor, size: f64) {
        self.push(Shape::Text {
            at,
            text: text.into(),
            anchor,
            size,
            bold: false,
            vertical: false,
        });
    }

    pub fn vertical_label(&mut self, at: (f64, f64), text: impl Into<String>) {
        self.push(Shape::Text {
            at,
            text: text.into(),
            anchor: Anchor::Middle,
            size: 11.0,
            bold: false,
            vertical: true,
        });
    }

    /// Replace whatever was drawn with a single message.
    pub fn set_placeholder(&mut self, message: impl Into<String>, at: (f64, f64)) {
        let message = message.into();
        self.shapes.retain(|s| matches!(s, Shape::Text { bold: true, .. }));
        self.label(at, message.clone(), Anchor::Start, 12.0);
        self.placeholder = Some(message);
    }

    pub fn axes(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter().filter(|s| matches!(s, Shape::Axis { .. }))
    }

    pub fn polylines(&self) -> impl Iterator<Item = &Shape> {
        self.shapes
            .iter()
            .filter(|s| matches!(s, Shape::Polyline { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn count<F: Fn(&Shape) -> bool>(&self, pred: F) -> usize {
        self.shapes.iter().filter(|s| pred(s)).count()
    }

    /// True when nothing but text was drawn.
    pub fn is_text_only(&self) -> bool {
        self.shapes.iter().all(|s| matches!(s, Shape::Text { .. }))
    }
}
