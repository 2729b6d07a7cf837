use std::fmt;
use std::iter;

use snafu::ensure;

use super::error::{DirectoryTreeError, InvalidArgumentSnafu, Operation};

const SEPARATOR: char = '/';

/// A parsed, non-empty path of directory names.
///
/// The terminal name is kept apart from its parents so that every path
/// always has a node to point at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryPath {
    parents: Vec<String>,
    name: String,
}

impl DirectoryPath {
    pub fn parse(raw: &str, operation: Operation) -> Result<Self, DirectoryTreeError> {
        ensure!(
            !raw.is_empty(),
            InvalidArgumentSnafu {
                operation,
                reason: "You must supply a directory name or a path to a directory.",
            }
        );

        let mut parents: Vec<String> = raw.split(SEPARATOR).map(str::to_owned).collect();
        if let Some(position) = parents.iter().position(String::is_empty) {
            return InvalidArgumentSnafu {
                operation,
                reason: format!("Segment {} of '{raw}' is empty.", position + 1),
            }
            .fail();
        }

        // `split` always yields at least one item
        let name = parents.pop().unwrap_or_default();
        Ok(Self { parents, name })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All segments from the forest root down to and including the name.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.parent_segments().chain(iter::once(self.name.as_str()))
    }

    pub fn parent_segments(&self) -> impl Iterator<Item = &str> {
        self.parents.iter().map(String::as_str)
    }

    pub fn child(&self, name: &str) -> Self {
        let mut parents = self.parents.clone();
        parents.push(self.name.clone());
        Self {
            parents,
            name: name.to_owned(),
        }
    }

    /// Whether this path equals `ancestor` or lies below it.
    pub fn is_within(&self, ancestor: &DirectoryPath) -> bool {
        let mut own = self.segments();
        ancestor.segments().all(|segment| own.next() == Some(segment))
    }
}

impl fmt::Display for DirectoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for parent in &self.parents {
            write!(f, "{parent}{SEPARATOR}")?;
        }
        write!(f, "{}", self.name)
    }
}
