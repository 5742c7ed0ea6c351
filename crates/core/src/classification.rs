//! Complaint classification taxonomy: familia -> grupo -> subgrupo -> requerimiento.
//!
//! Holds the code generation scheme, node-name validation and the
//! requerimiento severity scale. Persistence and sibling-uniqueness checks
//! live in the repository layer; this module only decides what a valid
//! node looks like.

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Number of leading name characters used as the code prefix.
pub const CODE_PREFIX_LEN: usize = 3;

/// Minimum width of the zero-padded sequence suffix.
pub const CODE_SEQUENCE_WIDTH: usize = 3;

/// Maximum length of a familia, grupo or subgrupo name.
pub const MAX_NODE_NAME_LENGTH: usize = 100;

/// Maximum length of a requerimiento name.
pub const MAX_REQUERIMIENTO_NAME_LENGTH: usize = 200;

/// First key of the PostgreSQL advisory locks that serialize code
/// generation. Each level adds its own offset; the second key is the parent.
pub const CODE_LOCK_NAMESPACE: i32 = 731_400;

// ---------------------------------------------------------------------------
// Levels
// ---------------------------------------------------------------------------

/// A level of the four-level classification tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Familia,
    Grupo,
    Subgrupo,
    Requerimiento,
}

impl Level {
    /// Human-readable singular name, used in error messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Familia => "familia",
            Self::Grupo => "grupo",
            Self::Subgrupo => "subgrupo",
            Self::Requerimiento => "requerimiento",
        }
    }

    /// The level directly below this one, if any.
    pub fn child(self) -> Option<Level> {
        match self {
            Self::Familia => Some(Self::Grupo),
            Self::Grupo => Some(Self::Subgrupo),
            Self::Subgrupo => Some(Self::Requerimiento),
            Self::Requerimiento => None,
        }
    }

    /// Maximum accepted name length for nodes at this level.
    pub fn max_name_length(self) -> usize {
        match self {
            Self::Requerimiento => MAX_REQUERIMIENTO_NAME_LENGTH,
            _ => MAX_NODE_NAME_LENGTH,
        }
    }

    /// Error returned when a node at this level cannot be created because
    /// its parent does not exist.
    pub fn missing_parent(self) -> CoreError {
        let parent = match self {
            Self::Familia => "parent",
            Self::Grupo => "familia",
            Self::Subgrupo => "grupo",
            Self::Requerimiento => "subgrupo",
        };
        CoreError::unknown_reference(parent)
    }

    /// Conflict returned when deleting a node that still has children.
    pub fn has_children(self) -> CoreError {
        let child = self.child().map(Level::label).unwrap_or("dependent record");
        CoreError::Conflict(format!(
            "Cannot delete the {} because it has associated {child} records. \
             Remove the {child} records first.",
            self.label()
        ))
    }

    /// Advisory lock class for code generation at this level.
    pub fn lock_class(self) -> i32 {
        let offset = match self {
            Self::Familia => 0,
            Self::Grupo => 1,
            Self::Subgrupo => 2,
            Self::Requerimiento => 3,
        };
        CODE_LOCK_NAMESPACE + offset
    }

    /// Conflict returned when a sibling with the same name already exists.
    pub fn duplicate_name(self, name: &str) -> CoreError {
        CoreError::Conflict(format!(
            "A {} named '{name}' already exists in this scope",
            self.label()
        ))
    }
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Uppercased first [`CODE_PREFIX_LEN`] characters of the trimmed name.
///
/// Names shorter than the prefix length yield a shorter prefix.
pub fn code_prefix(name: &str) -> String {
    name.trim()
        .chars()
        .take(CODE_PREFIX_LEN)
        .collect::<String>()
        .to_uppercase()
}

/// Build a node code from its name and a 1-based sequence number.
///
/// # Examples
///
/// ```
/// use seguridad_core::classification::generate_code;
///
/// assert_eq!(generate_code("Ruidos Molestos", 4), "RUI004");
/// assert_eq!(generate_code("Robo", 1234), "ROB1234");
/// ```
pub fn generate_code(name: &str, sequence: i64) -> String {
    format!(
        "{}{:0width$}",
        code_prefix(name),
        sequence,
        width = CODE_SEQUENCE_WIDTH
    )
}

/// Pick the first free code for a new node.
///
/// The sequence starts at `sibling_count + 1` and is bumped until the
/// resulting code is not in `taken` (codes already used in the scope).
pub fn next_free_code(name: &str, sibling_count: i64, taken: &[String]) -> String {
    let mut sequence = sibling_count + 1;
    loop {
        let code = generate_code(name, sequence);
        if !taken.iter().any(|t| t == &code) {
            return code;
        }
        sequence += 1;
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a node name and return it trimmed.
///
/// `field` is the request field the name came from, so the error can name it.
pub fn validate_node_name(level: Level, field: &str, name: &str) -> Result<String, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::missing_field(field));
    }
    let max = level.max_name_length();
    if trimmed.chars().count() > max {
        return Err(CoreError::Validation(format!(
            "The {} name must be at most {max} characters",
            level.label()
        )));
    }
    Ok(trimmed.to_string())
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity classification of a requerimiento.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// All valid severity strings.
const VALID_SEVERITY_STRINGS: &[&str] = &["low", "medium", "high"];

impl Severity {
    /// Return the severity as a lowercase string slice.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse a severity from a string slice (case-insensitive).
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(CoreError::Validation(format!(
                "Invalid severity '{s}'. Must be one of: {}",
                VALID_SEVERITY_STRINGS.join(", ")
            ))),
        }
    }
}
