use super::DirectoryTreeError;

/// The four operations a caller can perform on a directory tree.
pub trait DirectoryManager {
    /// Renders the tree depth-first, siblings in lexicographic order, each
    /// line indented by `--` once per level.
    fn list_directories(&self) -> String;
    /// Creates the directory at `path`, along with any missing parents.
    fn create_directory(&mut self, path: &str) -> Result<(), DirectoryTreeError>;
    /// Removes the directory at `path` together with everything below it.
    fn delete_directory(&mut self, path: &str) -> Result<(), DirectoryTreeError>;
    /// Relocates the directory at `from` into the directory at `to`.
    /// Either the whole subtree moves or nothing changes.
    fn move_directory(&mut self, from: &str, to: &str) -> Result<(), DirectoryTreeError>;
}
