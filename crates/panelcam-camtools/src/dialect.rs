//! Instruction spelling per machine dialect.
//!
//! Dialects differ only in how commands and comments are written. The
//! order and numeric content of the emitted program is the same for all
//! of them.

use panelcam_settings::MachineDialect;

/// Comment syntax used by a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentStyle {
    /// `; text`
    Semicolon,
    /// `(text)`
    Parentheses,
}

/// Command words for one dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectSyntax {
    pub rapid: &'static str,
    pub linear: &'static str,
    pub arc_cw: &'static str,
    pub absolute: &'static str,
    pub metric: &'static str,
    pub spindle_on: &'static str,
    pub spindle_off: &'static str,
    pub program_end: &'static str,
    pub compensation_left: &'static str,
    pub compensation_right: &'static str,
    pub compensation_off: &'static str,
    pub comments: CommentStyle,
    /// Append short explanatory notes to setup and shutdown lines
    pub annotate: bool,
}

const GENERIC: DialectSyntax = DialectSyntax {
    rapid: "G0",
    linear: "G1",
    arc_cw: "G2",
    absolute: "G90",
    metric: "G21",
    spindle_on: "M3",
    spindle_off: "M5",
    program_end: "M30",
    compensation_left: "G41",
    compensation_right: "G42",
    compensation_off: "G40",
    comments: CommentStyle::Semicolon,
    annotate: true,
};

impl DialectSyntax {
    /// Get the syntax table for a dialect
    pub fn for_dialect(dialect: MachineDialect) -> Self {
        match dialect {
            MachineDialect::Generic => GENERIC,
            MachineDialect::Biesse => Self {
                rapid: "G00",
                linear: "G01",
                arc_cw: "G02",
                spindle_on: "M03",
                spindle_off: "M05",
                comments: CommentStyle::Parentheses,
                ..GENERIC
            },
            MachineDialect::Homag => Self {
                spindle_on: "M03",
                spindle_off: "M05",
                comments: CommentStyle::Parentheses,
                ..GENERIC
            },
            MachineDialect::Scm => Self {
                rapid: "G00",
                linear: "G01",
                arc_cw: "G02",
                spindle_on: "M03",
                spindle_off: "M05",
                program_end: "M02",
                ..GENERIC
            },
            MachineDialect::Grbl => Self {
                program_end: "M2",
                annotate: false,
                ..GENERIC
            },
        }
    }

    /// Render a comment line
    pub fn comment(&self, text: &str) -> String {
        match self.comments {
            CommentStyle::Semicolon => format!("; {}", single_line(text)),
            CommentStyle::Parentheses => format!("({})", parenthesised(text)),
        }
    }

    /// Append an explanatory note to a command when the dialect wants one
    pub fn annotated(&self, command: String, note: &str) -> String {
        if !self.annotate {
            return command;
        }
        match self.comments {
            CommentStyle::Semicolon => format!("{} ; {}", command, single_line(note)),
            CommentStyle::Parentheses => format!("{} ({})", command, parenthesised(note)),
        }
    }
}

/// Comment text may come from job files; a line break would start a new block.
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

// Nested parentheses would end the comment early.
fn parenthesised(text: &str) -> String {
    single_line(text).replace('(', "[").replace(')', "]")
}
