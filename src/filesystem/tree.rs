use std::mem;
use std::vec;

use hashlink::LinkedHashMap;
use hashlink::linked_hash_map::Entry;
use snafu::{location, prelude::*};
use tracing::{debug, error, info};

use super::error::{
    AlreadyExistsSnafu, CyclicMoveSnafu, DirectoryTreeError, InvalidArgumentSnafu, NotFoundSnafu,
    Operation,
};
use super::manager::DirectoryManager;
use super::path::DirectoryPath;

/// Prefix repeated once per nesting level in listings
const INDENT_MARKER: &str = "--";

/// A directory node. Its name is the key under which its parent stores it.
///
/// Trees may be arbitrarily deep, so nothing here walks them recursively:
/// listing keeps an explicit stack and dropping drains into a work list.
#[derive(Debug, Default)]
struct Directory {
    children: LinkedHashMap<String, Directory>,
}

impl Directory {
    /// Builds a node holding a single chain of descendants, one per name.
    fn with_descendants(names: &[&str]) -> Self {
        names.iter().rev().fold(Self::default(), |child, name| {
            let mut parent = Self::default();
            parent.children.insert((*name).to_owned(), child);
            parent
        })
    }

    fn resolve<'a>(
        &self,
        segments: impl IntoIterator<Item = &'a str>,
        path: &DirectoryPath,
        operation: Operation,
    ) -> Result<&Directory, DirectoryTreeError> {
        let mut current = self;
        for segment in segments {
            current = current.children.get(segment).with_context(|| NotFoundSnafu {
                operation,
                path: path.to_string(),
                segment,
            })?;
        }
        Ok(current)
    }

    fn resolve_mut<'a>(
        &mut self,
        segments: impl IntoIterator<Item = &'a str>,
        path: &DirectoryPath,
        operation: Operation,
    ) -> Result<&mut Directory, DirectoryTreeError> {
        let mut current = self;
        for segment in segments {
            current = current
                .children
                .get_mut(segment)
                .with_context(|| NotFoundSnafu {
                    operation,
                    path: path.to_string(),
                    segment,
                })?;
        }
        Ok(current)
    }

    fn sorted_children(&self) -> vec::IntoIter<(&String, &Directory)> {
        let mut children = self.children.iter().collect::<Vec<_>>();
        children.sort_unstable_by(|(left, _), (right, _)| left.cmp(right));
        children.into_iter()
    }

    /// Pre-order rendering of everything below this node.
    fn render(&self, output: &mut String) {
        let mut pending = vec![(0, self.sorted_children())];

        while let Some((depth, siblings)) = pending.last_mut() {
            let depth = *depth;
            match siblings.next() {
                Some((name, child)) => {
                    output.push_str(&INDENT_MARKER.repeat(depth));
                    output.push_str(name);
                    output.push('\n');
                    pending.push((depth + 1, child.sorted_children()));
                }
                None => {
                    pending.pop();
                }
            }
        }
    }
}

impl Drop for Directory {
    fn drop(&mut self) {
        let mut pending = mem::take(&mut self.children)
            .into_iter()
            .map(|(_, child)| child)
            .collect::<Vec<_>>();

        // Each popped node is dropped with no children left
        while let Some(mut directory) = pending.pop() {
            pending.extend(
                mem::take(&mut directory.children)
                    .into_iter()
                    .map(|(_, child)| child),
            );
        }
    }
}

/// The top-level collection of directories.
///
/// The forest root is an unnamed directory that is never listed itself;
/// its children are the top-level directories.
#[derive(Debug, Default)]
pub struct DirectoryForest {
    root: Directory,
}

impl DirectoryForest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes the node at `path` from its parent and hands back the subtree.
    fn detach(
        &mut self,
        path: &DirectoryPath,
        operation: Operation,
    ) -> Result<Directory, DirectoryTreeError> {
        let parent = self
            .root
            .resolve_mut(path.parent_segments(), path, operation)?;
        parent
            .children
            .remove(path.name())
            .with_context(|| NotFoundSnafu {
                operation,
                path: path.to_string(),
                segment: path.name(),
            })
    }

    /// Inserts `subtree` as `name` below `destination`.
    /// On failure the subtree is returned together with the error so the
    /// caller still owns it.
    fn attach(
        &mut self,
        destination: &DirectoryPath,
        name: &str,
        subtree: Directory,
    ) -> Result<(), (DirectoryTreeError, Directory)> {
        match self
            .root
            .resolve_mut(destination.segments(), destination, Operation::MoveInto)
        {
            Ok(parent) => {
                parent.children.insert(name.to_owned(), subtree);
                Ok(())
            }
            Err(error) => Err((error, subtree)),
        }
    }

    /// Puts a detached subtree back under its original parent.
    ///
    /// Fails only if that parent disappeared since the detach, in which case
    /// the subtree is lost and the error says where it came from.
    fn restore(
        &mut self,
        path: &DirectoryPath,
        subtree: Directory,
    ) -> Result<(), DirectoryTreeError> {
        match self
            .root
            .resolve_mut(path.parent_segments(), path, Operation::Move)
        {
            Ok(parent) => {
                parent.children.insert(path.name().to_owned(), subtree);
                debug!("Restored {} after an aborted move", path);
                Ok(())
            }
            Err(restore_error) => {
                error!(
                    "Failed to restore {} after an aborted move, its subtree is lost: {} {}",
                    path,
                    restore_error,
                    location!()
                );
                Err(restore_error)
            }
        }
    }
}

impl DirectoryManager for DirectoryForest {
    fn list_directories(&self) -> String {
        let mut output = String::new();
        self.root.render(&mut output);
        output
    }

    fn create_directory(&mut self, path: &str) -> Result<(), DirectoryTreeError> {
        let path = DirectoryPath::parse(path, Operation::Create)?;
        let mut segments = path.segments().peekable();
        let mut current = &mut self.root;

        while let Some(segment) = segments.next() {
            let is_last = segments.peek().is_none();

            match current.children.entry(segment.to_owned()) {
                Entry::Occupied(_) if is_last => {
                    return AlreadyExistsSnafu {
                        path: path.to_string(),
                    }
                    .fail();
                }
                Entry::Occupied(existing) => {
                    current = existing.into_mut();
                }
                Entry::Vacant(vacant) => {
                    // Nothing below a new node can exist yet
                    let remaining = segments.by_ref().collect::<Vec<_>>();
                    vacant.insert(Directory::with_descendants(&remaining));
                    info!("Created directory {}", path);
                    return Ok(());
                }
            }
        }

        Ok(())
    }

    fn delete_directory(&mut self, path: &str) -> Result<(), DirectoryTreeError> {
        let path = DirectoryPath::parse(path, Operation::Delete)?;
        self.detach(&path, Operation::Delete)?;
        info!("Deleted directory {}", path);
        Ok(())
    }

    fn move_directory(&mut self, from: &str, to: &str) -> Result<(), DirectoryTreeError> {
        ensure!(
            !from.is_empty() && !to.is_empty(),
            InvalidArgumentSnafu {
                operation: Operation::Move,
                reason: "You must supply both the source directory and the destination directory.",
            }
        );
        let from = DirectoryPath::parse(from, Operation::Move)?;
        let to = DirectoryPath::parse(to, Operation::Move)?;

        self.root.resolve(from.segments(), &from, Operation::Move)?;
        ensure!(
            !to.is_within(&from),
            CyclicMoveSnafu {
                from: from.to_string(),
                to: to.to_string(),
            }
        );

        let destination = self.root.resolve(to.segments(), &to, Operation::MoveInto)?;
        ensure!(
            !destination.children.contains_key(from.name()),
            AlreadyExistsSnafu {
                path: to.child(from.name()).to_string(),
            }
        );

        let subtree = self.detach(&from, Operation::Move)?;
        if let Err((attach_error, subtree)) = self.attach(&to, from.name(), subtree) {
            debug!("Attaching {} to {} failed, rolling back", from, to);
            self.restore(&from, subtree)?;
            return Err(attach_error);
        }

        info!("Moved directory {} to {}", from, to);
        Ok(())
    }
}
