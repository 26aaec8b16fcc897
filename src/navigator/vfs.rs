use snafu::Snafu;
use tracing::{debug, info};

use crate::filesystem::{NodeId, Tree, structural_hash};
use crate::loader::{LoadError, LoadedTree, parse_document};

use super::bootstrap::{DEFAULT_LABEL, default_tree};

/// A virtual filesystem tree plus the navigation cursor of one session.
#[derive(Debug, Clone)]
pub struct Vfs {
    tree: Tree,
    current_dir: NodeId,
    label: String,
}

impl Default for Vfs {
    fn default() -> Self {
        Self::bootstrap()
    }
}

impl From<LoadedTree> for Vfs {
    fn from(loaded: LoadedTree) -> Self {
        Vfs::new(loaded.tree, loaded.label)
    }
}

impl Vfs {
    pub fn new(tree: Tree, label: impl Into<String>) -> Self {
        let current_dir = tree.root();
        Vfs {
            tree,
            current_dir,
            label: label.into(),
        }
    }

    /// The built-in tree used when no document is supplied.
    pub fn bootstrap() -> Self {
        Vfs::new(default_tree(), DEFAULT_LABEL)
    }

    pub fn from_document(contents: &str) -> Result<Self, LoadError> {
        parse_document(contents).map(Vfs::from)
    }

    /// Replaces the whole tree with the one described by `contents`.
    ///
    /// The new tree is built completely before anything is swapped; on error
    /// the current tree, cursor and label are left exactly as they were.
    pub fn load_document(&mut self, contents: &str) -> Result<(), LoadError> {
        let loaded = parse_document(contents)?;
        self.install(loaded);
        Ok(())
    }

    pub fn install(&mut self, loaded: LoadedTree) {
        info!(
            "Installing VFS '{}' ({} nodes) in place of '{}'",
            loaded.label,
            loaded.tree.node_count(),
            self.label
        );
        *self = Vfs::from(loaded);
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn current_dir(&self) -> NodeId {
        self.current_dir
    }

    pub fn structural_hash(&self) -> String {
        structural_hash(&self.tree)
    }

    /// Resolves `path` to a directory without moving the cursor.
    ///
    /// Absolute paths start at the root, relative ones at the current
    /// directory. Empty segments and `.` are skipped, `..` stops at the root.
    pub fn resolve(&self, path: &str) -> Result<NodeId, NavigationError> {
        let mut node = if path.starts_with('/') {
            self.tree.root()
        } else {
            self.current_dir
        };

        for segment in path.split('/') {
            match segment {
                "" | "." => {}
                ".." => node = self.tree.parent(node).unwrap_or(node),
                name => {
                    let child = self.tree.child(node, name).ok_or_else(|| {
                        NavigationError::DirectoryNotFound {
                            path: path.to_string(),
                        }
                    })?;
                    if !self.tree.node(child).is_directory() {
                        return Err(NavigationError::NotADirectory {
                            path: path.to_string(),
                        });
                    }
                    node = child;
                }
            }
        }

        Ok(node)
    }

    /// Moves the cursor to `path`; the cursor only changes if every segment resolves.
    pub fn resolve_and_enter(&mut self, path: &str) -> Result<(), NavigationError> {
        match self.resolve(path) {
            Ok(node) => {
                self.current_dir = node;
                debug!("Changed directory to {}", self.get_path());
                Ok(())
            }
            Err(e) => {
                debug!("Failed to change directory: {}", e);
                Err(e)
            }
        }
    }

    /// Child names of the directory at `path` (or the current one), in
    /// insertion order. A path that does not name a directory lists as empty.
    pub fn list(&self, path: Option<&str>) -> Vec<String> {
        let target = match path {
            Some(path) => match self.resolve(path) {
                Ok(node) => node,
                Err(e) => {
                    debug!("Listing nothing: {}", e);
                    return Vec::new();
                }
            },
            None => self.current_dir,
        };

        self.tree
            .children(target)
            .map(|id| self.tree.node(id).name().to_string())
            .collect()
    }

    pub fn list_directory(&self) -> Vec<String> {
        self.list(None)
    }

    pub fn absolute_path(&self, node: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(node);
        while let Some(id) = current {
            let node = self.tree.node(id);
            if node.parent().is_some() {
                names.push(node.name());
            }
            current = node.parent();
        }
        names.reverse();
        format!("/{}", names.join("/"))
    }

    pub fn get_path(&self) -> String {
        self.absolute_path(self.current_dir)
    }

    /// Case-insensitive substring search over node names, in preorder,
    /// starting at (and including) `search_root`, or the current directory.
    ///
    /// Each hit is the `/`-joined names from the search root down to the
    /// match, so paths are relative to where the search started. The VFS root
    /// has an empty name, which makes searches from `/` come out absolute.
    pub fn find(&self, pattern: &str, search_root: Option<NodeId>) -> Vec<String> {
        let needle = pattern.to_lowercase();
        let start = search_root.unwrap_or(self.current_dir);
        let mut results = Vec::new();
        let mut pending = vec![(start, self.tree.node(start).name().to_string())];

        while let Some((id, path)) = pending.pop() {
            let node = self.tree.node(id);
            if node.name().to_lowercase().contains(&needle) {
                results.push(if path.is_empty() {
                    "/".to_string()
                } else {
                    path.clone()
                });
            }

            let children: Vec<_> = self.tree.children(id).collect();
            for child in children.into_iter().rev() {
                let child_path = format!("{}/{}", path, self.tree.node(child).name());
                pending.push((child, child_path));
            }
        }

        debug!("find '{}' matched {} entries", pattern, results.len());
        results
    }
}

#[derive(Debug, Snafu, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[snafu(display("{}: No such directory", path))]
    DirectoryNotFound { path: String },
    #[snafu(display("{}: Not a directory", path))]
    NotADirectory { path: String },
}
