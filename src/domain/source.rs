//! Data source descriptors
//!
//! A [`Source`] describes one exportable slice of the document store: the
//! top-level collection holding the parent documents and the shape of the
//! nested data beneath each parent. Sources are resolved once, at
//! configuration-load time, into these tagged forms; the traversal never
//! re-inspects shapes per record.

use std::fmt;

use super::ids::CollectionId;

/// A resolved data source descriptor
///
/// Immutable once built. The `name` doubles as the default output file stem
/// (`<name>.csv` / `<name>.json`) unless an explicit `output` name is given.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Descriptor name, unique within a configuration
    pub name: String,

    /// Top-level collection holding the parent documents
    pub collection: CollectionId,

    /// Where each parent's records come from
    pub shape: SourceShape,

    /// Explicit output file name, overriding the `<name>.<ext>` default
    pub output: Option<String>,
}

impl Source {
    /// Output file name for this source under the given format extension
    pub fn output_file_name(&self, extension: &str) -> String {
        match &self.output {
            Some(name) => name.clone(),
            None => format!("{}.{}", self.name, extension),
        }
    }
}

/// The shape of the nested data under each parent document
#[derive(Debug, Clone, PartialEq)]
pub enum SourceShape {
    /// Documents of a named subcollection under each parent
    Subcollection {
        /// Subcollection name
        collection: CollectionId,
    },

    /// Elements of an array stored on the parent node itself
    Array {
        /// Where the array sits on the node
        location: ArrayLocation,
        /// Optional path to a per-parent summary mapping, emitted as one
        /// extra record with the path's final segment as its identifier
        summary: Option<FieldPath>,
    },
}

/// Where a record array sits on a parent node
///
/// Fixed when the configuration is loaded; the two layouts the store has
/// historically held are an array directly in a field, and an array nested
/// one level down under a fixed key.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayLocation {
    /// The field's value is the array itself
    Direct { field: String },

    /// The field's value is a mapping holding the array under `key`
    Wrapped { field: String, key: String },
}

impl ArrayLocation {
    /// Name of the node field the array hangs off
    pub fn field(&self) -> &str {
        match self {
            ArrayLocation::Direct { field } => field,
            ArrayLocation::Wrapped { field, .. } => field,
        }
    }
}

/// A dot-separated path into a node's nested mappings
///
/// # Examples
///
/// ```
/// use quarry::domain::source::FieldPath;
///
/// let path = FieldPath::parse("summary.final").unwrap();
/// assert_eq!(path.segments(), ["summary", "final"]);
/// assert_eq!(path.sentinel(), "final");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Parses a dot-separated path; every segment must be non-empty
    pub fn parse(path: &str) -> Result<Self, String> {
        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.trim().is_empty()) {
            return Err(format!("Field path has an empty segment: '{}'", path));
        }
        Ok(Self { segments })
    }

    /// The path's segments in order
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The final segment, used as the sentinel identifier for summary
    /// records (`summary.final` → `"final"`)
    pub fn sentinel(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}
