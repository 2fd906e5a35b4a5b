//! Field type resolution for model scaffolding
//!
//! Fields are declared on the command line as `name:type`. The type token is a
//! human-facing *surface type* that resolves to a Go storage type plus a hint.
//!
//! # Surface Types
//!
//! | surface                  | resolved  | hint       |
//! |--------------------------|-----------|------------|
//! | `text`                   | `string`  |            |
//! | `float`                  | `float64` |            |
//! | `boolean`                | `bool`    |            |
//! | `integer`                | `int`     |            |
//! | `decimal`                | `int64`   |            |
//! | `time`, `date`, `datetime` | `int64` | `temporal` |
//!
//! Any other token passes through unchanged, so Go types can be given directly
//! (`int16`, `int32`, `string`, ...).
//!
//! # Examples
//!
//! ```text
//! Title:text            → string
//! Views:integer         → int
//! Price:decimal         → int64
//! PublishedAt:datetime  → int64 (temporal)
//! Rank:int16            → int16
//! ```

use serde::{Serialize, Serializer};
use std::fmt;

use super::helpers::TemplateHelpers;
use crate::error::{Result, ScaffoldError};

/// Layout string for temporal parsing (Go reference time)
pub const TEMPORAL_LAYOUT: &str = "2006-01-02 15:04:05";

/// Marker appended to the left-hand side of fallible parse assignments
pub const FALLIBLE_MARKER: &str = ", _";

/// Target type a field is stored and parsed as
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ResolvedType {
    /// `string`
    String,
    /// `float64`
    Float64,
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `int16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// Any other token, kept verbatim
    PassThrough(String),
}

/// Auxiliary flag distinguishing otherwise identical resolved types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Hint {
    /// No hint
    #[default]
    None,
    /// Value is a date/time carried as `int64`
    Temporal,
}

impl ResolvedType {
    /// Interpret an already-resolved type token
    ///
    /// Unknown tokens become [`ResolvedType::PassThrough`].
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "string" => Self::String,
            "float64" => Self::Float64,
            "bool" => Self::Bool,
            "int" => Self::Int,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            other => Self::PassThrough(other.to_string()),
        }
    }

    /// Go spelling of this type
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::String => "string",
            Self::Float64 => "float64",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::PassThrough(token) => token,
        }
    }

    /// Whether this is one of the fixed-width integers that parse through a temporary
    #[must_use]
    pub const fn is_fixed_width(&self) -> bool {
        matches!(self, Self::Int16 | Self::Int32 | Self::Int64)
    }

    /// Whether parsing a string into this type can fail
    #[must_use]
    pub const fn is_fallible(&self) -> bool {
        matches!(
            self,
            Self::Int | Self::Float64 | Self::Int16 | Self::Int32 | Self::Int64 | Self::Bool
        )
    }

    /// Go expression parsing the string expression `origin` into this type
    ///
    /// The temporal hint only matters for `int64`, where it takes precedence over
    /// numeric parsing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gin_scaffold::scaffold::field_type::{Hint, ResolvedType};
    /// assert_eq!(ResolvedType::Int.parse_expr("s", Hint::None), "strconv.Atoi(s)");
    /// assert_eq!(
    ///     ResolvedType::Int64.parse_expr("s", Hint::Temporal),
    ///     "time.Parse(\"2006-01-02 15:04:05\", s)"
    /// );
    /// assert_eq!(ResolvedType::String.parse_expr("s", Hint::None), "s");
    /// ```
    #[must_use]
    pub fn parse_expr(&self, origin: &str, hint: Hint) -> String {
        match (self, hint) {
            (Self::Int, _) => format!("strconv.Atoi({origin})"),
            (Self::Int16, _) => format!("strconv.ParseInt({origin}, 10, 16)"),
            (Self::Int32, _) => format!("strconv.ParseInt({origin}, 10, 32)"),
            (Self::Int64, Hint::Temporal) => format!("time.Parse(\"{TEMPORAL_LAYOUT}\", {origin})"),
            (Self::Int64, Hint::None) => format!("strconv.ParseInt({origin}, 10, 64)"),
            (Self::Float64, _) => format!("strconv.ParseFloat({origin}, 64)"),
            (Self::Bool, _) => format!("strconv.ParseBool({origin})"),
            (Self::String | Self::PassThrough(_), _) => origin.to_string(),
        }
    }
}

impl Hint {
    /// Interpret a hint token; anything but `temporal` is no hint
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        if token == "temporal" {
            Self::Temporal
        } else {
            Self::None
        }
    }

    /// Token exposed to templates
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Temporal => "temporal",
        }
    }
}

/// Resolve a surface type token into its target type and hint
///
/// # Examples
///
/// ```
/// # use gin_scaffold::scaffold::field_type::{resolve, Hint, ResolvedType};
/// assert_eq!(resolve("text"), (ResolvedType::String, Hint::None));
/// assert_eq!(resolve("datetime"), (ResolvedType::Int64, Hint::Temporal));
/// assert_eq!(resolve("int32"), (ResolvedType::Int32, Hint::None));
/// ```
#[must_use]
pub fn resolve(surface: &str) -> (ResolvedType, Hint) {
    match surface {
        "text" => (ResolvedType::String, Hint::None),
        "float" => (ResolvedType::Float64, Hint::None),
        "boolean" => (ResolvedType::Bool, Hint::None),
        "integer" => (ResolvedType::Int, Hint::None),
        "decimal" => (ResolvedType::Int64, Hint::None),
        "time" | "date" | "datetime" => (ResolvedType::Int64, Hint::Temporal),
        other => (ResolvedType::from_token(other), Hint::None),
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ResolvedType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for Hint {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A field parsed from a `name:type` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Field label (`PascalCase`, e.g. `PublishedAt`)
    pub name: String,
    /// Type token as given on the command line
    pub surface_type: String,
    /// Resolved Go type
    pub resolved_type: ResolvedType,
    /// Auxiliary hint
    pub hint: Hint,
}

impl FieldSpec {
    /// Parse a `name:type` declaration
    ///
    /// The declaration splits on the first `:` only, so the type part may
    /// itself contain colons. The name is converted to `PascalCase`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use gin_scaffold::scaffold::field_type::{FieldSpec, Hint, ResolvedType};
    /// let field = FieldSpec::parse("published_at:datetime").unwrap();
    /// assert_eq!(field.name, "PublishedAt");
    /// assert_eq!(field.resolved_type, ResolvedType::Int64);
    /// assert_eq!(field.hint, Hint::Temporal);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`ScaffoldError::InvalidField`] if there is no `:` or the name is empty.
    pub fn parse(declaration: &str) -> Result<Self> {
        let (name, surface) = declaration
            .split_once(':')
            .ok_or_else(|| ScaffoldError::InvalidField(declaration.to_string()))?;

        let name = TemplateHelpers::to_type_name(name.trim());
        if name.is_empty() {
            return Err(ScaffoldError::InvalidField(declaration.to_string()));
        }

        let (resolved_type, hint) = resolve(surface);
        Ok(Self {
            name,
            surface_type: surface.to_string(),
            resolved_type,
            hint,
        })
    }
}

impl fmt::Display for FieldSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.name, self.surface_type)
    }
}
