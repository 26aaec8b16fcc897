use hashlink::LinkedHashMap;

use crate::filesystem::{NodeId, NodeKind, Tree};

pub const DEFAULT_LABEL: &str = "default";

const README: &str = "Welcome to vfsh.\n\
Type 'help' to list the available commands.\n";

const CONFIG: &str = "prompt=default\n\
theme=dark\n";

const HOSTS: &str = "127.0.0.1 localhost\n";

fn directory() -> NodeKind {
    NodeKind::Directory {
        children: LinkedHashMap::new(),
    }
}

fn file(content: &str) -> NodeKind {
    NodeKind::File {
        content: content.to_string(),
    }
}

fn attach(tree: &mut Tree, parent: NodeId, name: &str, kind: NodeKind) -> NodeId {
    tree.attach(parent, name.to_string(), kind)
}

/// Builds the fixed tree a session starts with when no document is loaded:
///
/// ```text
/// /
/// ├── home/user/{readme.txt, config.txt}
/// ├── etc/hosts
/// └── var/log/
/// ```
pub fn default_tree() -> Tree {
    let mut tree = Tree::new();
    let root = tree.root();

    // Static names, unique within each directory.
    let home = attach(&mut tree, root, "home", directory());
    let user = attach(&mut tree, home, "user", directory());
    attach(&mut tree, user, "readme.txt", file(README));
    attach(&mut tree, user, "config.txt", file(CONFIG));

    let etc = attach(&mut tree, root, "etc", directory());
    attach(&mut tree, etc, "hosts", file(HOSTS));

    let var = attach(&mut tree, root, "var", directory());
    attach(&mut tree, var, "log", directory());

    tree
}
