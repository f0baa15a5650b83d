//! Typed KRL program model.
//!
//! Programs are assembled from [`Statement`]s rather than strings, so every
//! interpolated value is either a number, a validated [`Identifier`] or a
//! single-line [`Comment`].

use std::borrow::Cow;
use std::fmt;

use crate::{
    error::{KrlError, Result},
    mapper::WorkspaceCoordinate,
};

/// Extension of generated program files
pub const PROGRAM_FILE_EXTENSION: &str = "src";

/// Orientation and configuration carried by every target
pub const FIXED_ORIENTATION: &str = "A 0, B 0, C 0, S 6, T 27";

const INDENT: &str = "  ";
const MAX_IDENTIFIER_LEN: usize = 24;

/// A KRL name: letter or underscore first, then letters, digits or
/// underscores, at most 24 characters
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(Cow<'static, str>);

impl Identifier {
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if is_valid_identifier(&name) {
            Ok(Self(Cow::Owned(name)))
        } else {
            Err(KrlError::InvalidIdentifier(name))
        }
    }

    /// For names fixed in this crate
    pub(crate) const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    name.len() <= MAX_IDENTIFIER_LEN
        && (first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Comment text, flattened to one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment(String);

impl Comment {
    pub fn new(text: impl AsRef<str>) -> Self {
        let flattened: String = text
            .as_ref()
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        Self(flattened.trim().to_string())
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "; {}", self.0)
    }
}

/// A numeric pose field
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    /// Written as the shortest exact decimal, always with a fractional
    /// digit (`200.0`, `233.33`)
    Decimal(f64),
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{}", value),
            Self::Decimal(value) if value.fract() == 0.0 => write!(f, "{:.1}", value),
            Self::Decimal(value) => write!(f, "{}", value),
        }
    }
}

/// Position part of an E6POS target; orientation is always fixed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub x: Number,
    pub y: Number,
    pub z: Number,
}

impl Pose {
    pub const fn integer(x: i64, y: i64, z: i64) -> Self {
        Self {
            x: Number::Integer(x),
            y: Number::Integer(y),
            z: Number::Integer(z),
        }
    }

    /// Every axis multiplied by `factor`
    pub const fn scaled((x, y, z): (i64, i64, i64), factor: i64) -> Self {
        Self::integer(x * factor, y * factor, z * factor)
    }
}

impl From<WorkspaceCoordinate> for Pose {
    fn from(coordinate: WorkspaceCoordinate) -> Self {
        // the plane height is a whole-millimetre constant, written as declared
        let z = if coordinate.z.fract() == 0.0 {
            Number::Integer(coordinate.z as i64)
        } else {
            Number::Decimal(coordinate.z)
        };
        Self {
            x: Number::Decimal(coordinate.x),
            y: Number::Decimal(coordinate.y),
            z,
        }
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{X {}, Y {}, Z {}, {}}}", self.x, self.y, self.z, FIXED_ORIENTATION)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Def(Identifier),
    End,
    Ini,
    DeclE6Pos { name: Identifier, pose: Pose },
    /// PTP to a declared position
    PtpTo(Identifier),
    Ptp(Pose),
    Lin(Pose),
    Circ { auxiliary: Pose, end: Pose },
    Spline,
    Spl(Pose),
    EndSpline,
    Comment(Comment),
    Blank,
}

impl Statement {
    /// True for statements that command robot motion
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            Self::PtpTo(_) | Self::Ptp(_) | Self::Lin(_) | Self::Circ { .. } | Self::Spline
        )
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Def(name) => write!(f, "DEF {}()", name),
            Self::End => f.write_str("END"),
            Self::Ini => f.write_str("INI"),
            Self::DeclE6Pos { name, pose } => write!(f, "DECL E6POS {} = {}", name, pose),
            Self::PtpTo(name) => write!(f, "PTP {}", name),
            Self::Ptp(pose) => write!(f, "PTP {}", pose),
            Self::Lin(pose) => write!(f, "LIN {} C_VEL", pose),
            Self::Circ { auxiliary, end } => write!(f, "CIRC {}, {} C_VEL", auxiliary, end),
            Self::Spline => f.write_str("SPLINE"),
            Self::Spl(pose) => write!(f, "SPL {}", pose),
            Self::EndSpline => f.write_str("ENDSPLINE"),
            Self::Comment(comment) => write!(f, "{}", comment),
            Self::Blank => Ok(()),
        }
    }
}

/// One output line: indentation, statement and an optional trailing comment
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub depth: usize,
    pub statement: Statement,
    pub trailing: Option<Comment>,
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..self.depth {
            f.write_str(INDENT)?;
        }
        write!(f, "{}", self.statement)?;
        if let Some(comment) = &self.trailing {
            write!(f, " {}", comment)?;
        }
        Ok(())
    }
}

/// A complete program, rendered line by line through `Display`
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    name: Identifier,
    lines: Vec<Line>,
}

impl Program {
    /// Default download name, e.g. `sketch_program.src`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, PROGRAM_FILE_EXTENSION)
    }

    pub fn motion_count(&self) -> usize {
        self.lines.iter().filter(|line| line.statement.is_motion()).count()
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// Appends lines to a program between its `DEF` and `END`
pub struct ProgramBuilder {
    name: Identifier,
    lines: Vec<Line>,
}

impl ProgramBuilder {
    pub fn new(name: Identifier) -> Self {
        let header = Line {
            depth: 0,
            statement: Statement::Def(name.clone()),
            trailing: None,
        };
        Self {
            name,
            lines: vec![header],
        }
    }

    fn push(&mut self, depth: usize, statement: Statement, trailing: Option<Comment>) -> &mut Self {
        self.lines.push(Line { depth, statement, trailing });
        self
    }

    pub fn statement(&mut self, statement: Statement) -> &mut Self {
        self.push(1, statement, None)
    }

    pub fn statement_with_comment(&mut self, statement: Statement, comment: impl AsRef<str>) -> &mut Self {
        self.push(1, statement, Some(Comment::new(comment)))
    }

    pub fn comment(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.push(1, Statement::Comment(Comment::new(text)), None)
    }

    pub fn blank(&mut self) -> &mut Self {
        self.push(1, Statement::Blank, None)
    }

    /// `SPLINE` block with one `SPL` per target
    pub fn spline<I>(&mut self, targets: I) -> &mut Self
    where
        I: IntoIterator<Item = (Pose, Option<Comment>)>,
    {
        self.push(1, Statement::Spline, None);
        for (pose, comment) in targets {
            self.push(2, Statement::Spl(pose), comment);
        }
        self.push(1, Statement::EndSpline, None)
    }

    pub fn finish(mut self) -> Program {
        self.push(0, Statement::End, None);
        Program {
            name: self.name,
            lines: self.lines,
        }
    }
}
