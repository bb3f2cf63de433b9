//! Paint a core `Scene` onto a ratatui canvas.
//!
//! Scene coordinates are logical pixels with y growing downward; the canvas
//! y axis grows upward, so every y is flipped against the scene height.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{self, Canvas, Context, Points, Rectangle};
use ratatui::widgets::{Paragraph, Widget, Wrap};

use stockdash_core::scene::{AxisSide, Scene, Shape};

use crate::theme::Theme;

/// Dashed markers alternate drawn/skipped segments of this many pixels.
const DASH: f64 = 4.0;

pub struct SceneView<'a> {
    scene: &'a Scene,
    brush: Option<(f64, f64)>,
    theme: &'a Theme,
}

impl<'a> SceneView<'a> {
    pub fn new(scene: &'a Scene, theme: &'a Theme) -> Self {
        Self {
            scene,
            brush: None,
            theme,
        }
    }

    /// Highlight `[x0, x1]` (scene pixels) as the active brush.
    pub fn brush(mut self, brush: Option<(f64, f64)>) -> Self {
        self.brush = brush;
        self
    }

    fn flip(&self, y: f64) -> f64 {
        self.scene.height - y
    }

    fn paint(&self, ctx: &mut Context<'_>) {
        let theme = self.theme;
        for shape in &self.scene.shapes {
            match shape {
                Shape::Axis {
                    side,
                    offset,
                    span,
                    ticks,
                } => self.paint_axis(ctx, *side, *offset, *span, ticks),
                Shape::Polyline { points, color, .. } => {
                    let color = theme.scene_color(*color);
                    for pair in points.windows(2) {
                        ctx.draw(&canvas::Line {
                            x1: pair[0].0,
                            y1: self.flip(pair[0].1),
                            x2: pair[1].0,
                            y2: self.flip(pair[1].1),
                            color,
                        });
                    }
                }
                Shape::Line {
                    from,
                    to,
                    color,
                    dashed,
                    ..
                } => {
                    let color = theme.scene_color(*color);
                    if *dashed {
                        self.paint_dashed(ctx, *from, *to, color);
                    } else {
                        ctx.draw(&canvas::Line {
                            x1: from.0,
                            y1: self.flip(from.1),
                            x2: to.0,
                            y2: self.flip(to.1),
                            color,
                        });
                    }
                }
                Shape::Rect {
                    x,
                    y,
                    width,
                    height,
                    fill,
                    ..
                } => {
                    // Boxes behind labels only matter on a light page.
                    if *fill == stockdash_core::scene::Color::BOX {
                        continue;
                    }
                    ctx.draw(&Rectangle {
                        x: *x,
                        y: self.flip(y + height),
                        width: *width,
                        height: *height,
                        color: theme.scene_color(*fill),
                    });
                }
                Shape::Circle { center, fill, .. } => {
                    ctx.draw(&Points {
                        coords: &[(center.0, self.flip(center.1))],
                        color: theme.scene_color(*fill),
                    });
                }
                Shape::Text { .. } => {}
            }
        }

        if let Some((x0, x1)) = self.brush {
            let top = self.scene.height - 26.0;
            for x in [x0, x1] {
                ctx.draw(&canvas::Line {
                    x1: x,
                    y1: 46.0,
                    x2: x,
                    y2: top,
                    color: theme.accent,
                });
            }
        }

        // Text goes on its own layer so lines never overwrite labels.
        ctx.layer();
        for shape in &self.scene.shapes {
            if let Shape::Text {
                at,
                text,
                bold,
                vertical: false,
                ..
            } = shape
            {
                let mut style = Style::default().fg(theme.text_primary);
                if *bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                ctx.print(at.0, self.flip(at.1), Line::from(Span::styled(text.clone(), style)));
            }
        }
    }

    fn paint_axis(
        &self,
        ctx: &mut Context<'_>,
        side: AxisSide,
        offset: f64,
        span: (f64, f64),
        ticks: &[stockdash_core::scene::Tick],
    ) {
        let color = self.theme.axis;
        let label = Style::default().fg(self.theme.text_secondary);
        match side {
            AxisSide::Bottom => {
                let y = self.flip(offset);
                ctx.draw(&canvas::Line {
                    x1: span.0,
                    y1: y,
                    x2: span.1,
                    y2: y,
                    color,
                });
                for tick in ticks {
                    ctx.print(tick.position, y - 12.0, Line::from(Span::styled(tick.label.clone(), label)));
                }
            }
            AxisSide::Left | AxisSide::Right => {
                ctx.draw(&canvas::Line {
                    x1: offset,
                    y1: self.flip(span.0),
                    x2: offset,
                    y2: self.flip(span.1),
                    color,
                });
                let dx = if side == AxisSide::Left { -50.0 } else { 4.0 };
                for tick in ticks {
                    ctx.print(
                        offset + dx,
                        self.flip(tick.position),
                        Line::from(Span::styled(tick.label.clone(), label)),
                    );
                }
            }
        }
    }

    fn paint_dashed(&self, ctx: &mut Context<'_>, from: (f64, f64), to: (f64, f64), color: ratatui::style::Color) {
        let (dx, dy) = (to.0 - from.0, to.1 - from.1);
        let length = (dx * dx + dy * dy).sqrt();
        if length == 0.0 {
            return;
        }
        let mut t = 0.0;
        while t < length {
            let end = (t + DASH).min(length);
            ctx.draw(&canvas::Line {
                x1: from.0 + dx * t / length,
                y1: self.flip(from.1 + dy * t / length),
                x2: from.0 + dx * end / length,
                y2: self.flip(from.1 + dy * end / length),
                color,
            });
            t += 2.0 * DASH;
        }
    }
}

impl<'a> Widget for SceneView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if let Some(message) = &self.scene.placeholder {
            let para = Paragraph::new(Line::from(Span::styled(
                message.clone(),
                Style::default().fg(self.theme.text_secondary),
            )))
            .wrap(Wrap { trim: true });
            para.render(area, buf);
            return;
        }

        Canvas::default()
            .marker(Marker::Braille)
            .background_color(self.theme.background)
            .x_bounds([0.0, self.scene.width])
            .y_bounds([0.0, self.scene.height])
            .paint(|ctx| self.paint(ctx))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockdash_core::scene::{Anchor, Color};

    fn buffer_text(buf: &Buffer, area: Rect) -> String {
        let mut out = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                out.push_str(buf.cell((x, y)).unwrap().symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn placeholder_renders_message() {
        let theme = Theme::default();
        let mut scene = Scene::new(900.0, 250.0);
        scene.title("NVIDIA Detailed View");
        scene.set_placeholder("No data in this selected range.", (60.0, 56.0));

        let area = Rect::new(0, 0, 60, 5);
        let mut buf = Buffer::empty(area);
        SceneView::new(&scene, &theme).render(area, &mut buf);
        assert!(buffer_text(&buf, area).contains("No data in this selected range."));
    }

    #[test]
    fn polyline_paints_braille_cells() {
        let theme = Theme::default();
        let mut scene = Scene::new(900.0, 250.0);
        scene.push(Shape::Polyline {
            points: vec![(60.0, 200.0), (880.0, 30.0)],
            color: Color::rgb(0xD5, 0x5E, 0x00),
            width: 2.0,
            opacity: 1.0,
        });

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        SceneView::new(&scene, &theme).render(area, &mut buf);
        let painted = buffer_text(&buf, area)
            .chars()
            .filter(|c| ('\u{2801}'..='\u{28FF}').contains(c))
            .count();
        assert!(painted > 10, "expected a diagonal of braille cells, got {painted}");
    }

    #[test]
    fn labels_are_printed() {
        let theme = Theme::default();
        let mut scene = Scene::new(900.0, 250.0);
        scene.label((100.0, 120.0), "AMD", Anchor::Start, 11.0);

        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        SceneView::new(&scene, &theme).render(area, &mut buf);
        assert!(buffer_text(&buf, area).contains("AMD"));
    }

    #[test]
    fn brush_edges_are_drawn() {
        let theme = Theme::default();
        let scene = Scene::new(900.0, 250.0);
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        SceneView::new(&scene, &theme)
            .brush(Some((300.0, 600.0)))
            .render(area, &mut buf);
        let painted = buffer_text(&buf, area)
            .chars()
            .filter(|c| ('\u{2801}'..='\u{28FF}').contains(c))
            .count();
        assert!(painted >= 10);
    }
}
