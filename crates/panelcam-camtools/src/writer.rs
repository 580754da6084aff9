//! Line-oriented G-code writer.
//!
//! Generators describe motion through this writer; the writer owns the
//! dialect spelling and operand formatting.

use crate::dialect::DialectSyntax;
use panelcam_core::units::{format_feed, format_mm, format_speed};
use panelcam_core::CompensationSide;

/// Accumulates program lines for one dialect
#[derive(Debug, Clone)]
pub struct GcodeWriter {
    syntax: DialectSyntax,
    lines: Vec<String>,
}

impl GcodeWriter {
    /// Create a new, empty writer
    pub fn new(syntax: DialectSyntax) -> Self {
        Self {
            syntax,
            lines: Vec::new(),
        }
    }

    pub fn comment(&mut self, text: impl AsRef<str>) {
        let line = self.syntax.comment(text.as_ref());
        self.lines.push(line);
    }

    pub fn absolute_positioning(&mut self) {
        let line = self
            .syntax
            .annotated(self.syntax.absolute.to_string(), "Absolute positioning");
        self.lines.push(line);
    }

    pub fn millimeter_units(&mut self) {
        let line = self
            .syntax
            .annotated(self.syntax.metric.to_string(), "Millimeter units");
        self.lines.push(line);
    }

    pub fn rapid_xy(&mut self, x: f64, y: f64) {
        self.lines.push(format!(
            "{} X{} Y{}",
            self.syntax.rapid,
            format_mm(x),
            format_mm(y)
        ));
    }

    pub fn rapid_z(&mut self, z: f64) {
        self.lines
            .push(format!("{} Z{}", self.syntax.rapid, format_mm(z)));
    }

    /// Rapid to Z with an explanatory note (header and footer moves)
    pub fn rapid_z_noted(&mut self, z: f64, note: &str) {
        let command = format!("{} Z{}", self.syntax.rapid, format_mm(z));
        let line = self.syntax.annotated(command, note);
        self.lines.push(line);
    }

    pub fn linear_z(&mut self, z: f64, feed: f64) {
        self.lines.push(format!(
            "{} Z{} F{}",
            self.syntax.linear,
            format_mm(z),
            format_feed(feed)
        ));
    }

    pub fn linear_xy(&mut self, x: f64, y: f64, feed: f64) {
        self.lines.push(format!(
            "{} X{} Y{} F{}",
            self.syntax.linear,
            format_mm(x),
            format_mm(y),
            format_feed(feed)
        ));
    }

    pub fn linear_xyz(&mut self, x: f64, y: f64, z: f64, feed: f64) {
        self.lines.push(format!(
            "{} X{} Y{} Z{} F{}",
            self.syntax.linear,
            format_mm(x),
            format_mm(y),
            format_mm(z),
            format_feed(feed)
        ));
    }

    /// Clockwise helical move; `i`/`j` are the center offsets from the
    /// current position.
    pub fn helix_cw(&mut self, x: f64, y: f64, i: f64, j: f64, z: f64, feed: f64) {
        self.lines.push(format!(
            "{} X{} Y{} I{} J{} Z{} F{}",
            self.syntax.arc_cw,
            format_mm(x),
            format_mm(y),
            format_mm(i),
            format_mm(j),
            format_mm(z),
            format_feed(feed)
        ));
    }

    pub fn spindle_on(&mut self, rpm: u32) {
        self.lines
            .push(format!("{} S{}", self.syntax.spindle_on, format_speed(rpm)));
    }

    /// Start the spindle with an explanatory note (header)
    pub fn spindle_on_noted(&mut self, rpm: u32, note: &str) {
        let command = format!("{} S{}", self.syntax.spindle_on, format_speed(rpm));
        let line = self.syntax.annotated(command, note);
        self.lines.push(line);
    }

    pub fn spindle_off(&mut self) {
        let line = self
            .syntax
            .annotated(self.syntax.spindle_off.to_string(), "Stop spindle");
        self.lines.push(line);
    }

    pub fn program_end(&mut self) {
        let line = self
            .syntax
            .annotated(self.syntax.program_end.to_string(), "End program");
        self.lines.push(line);
    }

    /// Activate tool-radius compensation. `CompensationSide::None` is a no-op.
    pub fn compensation_on(&mut self, side: CompensationSide, diameter: f64) {
        let word = match side {
            CompensationSide::Left => self.syntax.compensation_left,
            CompensationSide::Right => self.syntax.compensation_right,
            CompensationSide::None => return,
        };
        self.lines.push(format!("{} D{}", word, format_mm(diameter)));
    }

    pub fn compensation_off(&mut self) {
        self.lines.push(self.syntax.compensation_off.to_string());
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}
