// Drawing surface the animator paints on. The browser hands us a
// CanvasRenderingContext2d; tests and headless hosts use RecordingSurface.

use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use crate::error::Result;

pub trait Surface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()>;

    /// Filled circle, `style` is any CSS color string.
    fn fill_circle(&mut self, center: [f64; 2], radius: f64, style: &str) -> Result<()>;

    fn stroke_line(&mut self, from: [f64; 2], to: [f64; 2], style: &str, width: f64)
        -> Result<()>;
}

impl Surface for CanvasRenderingContext2d {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> Result<()> {
        CanvasRenderingContext2d::clear_rect(self, x, y, width, height);
        Ok(())
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, style: &str) -> Result<()> {
        self.begin_path();
        self.arc(center[0], center[1], radius, 0.0, PI * 2.0)?;
        self.set_fill_style_str(style);
        self.fill();
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        style: &str,
        width: f64,
    ) -> Result<()> {
        self.begin_path();
        self.move_to(from[0], from[1]);
        self.line_to(to[0], to[1]);
        self.set_stroke_style_str(style);
        self.set_line_width(width);
        self.stroke();
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear {
        width: f64,
        height: f64,
    },
    Circle {
        center: [f64; 2],
        radius: f64,
        style: String,
    },
    Line {
        from: [f64; 2],
        to: [f64; 2],
        style: String,
        width: f64,
    },
}

// Keeps every call in order so a frame can be inspected after the fact
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl Surface for RecordingSurface {
    // Always clears from the origin, so only the extent is kept
    fn clear_rect(&mut self, _x: f64, _y: f64, width: f64, height: f64) -> Result<()> {
        self.commands.push(DrawCommand::Clear { width, height });
        Ok(())
    }

    fn fill_circle(&mut self, center: [f64; 2], radius: f64, style: &str) -> Result<()> {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            style: style.to_owned(),
        });
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: [f64; 2],
        to: [f64; 2],
        style: &str,
        width: f64,
    ) -> Result<()> {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            style: style.to_owned(),
            width,
        });
        Ok(())
    }
}
