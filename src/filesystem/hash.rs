use sha2::{Digest, Sha256};

use super::{NodeId, NodeKind, Tree};

const FILE_TAG: &str = "(file)";
const DIR_TAG: &str = "(dir)";
const END_TAG: &str = "(end)";

enum Step {
    Visit(NodeId),
    Close,
}

/// Canonical preorder serialization of the whole tree.
///
/// Each node contributes its name and a type tag; files append `[content]`,
/// directories append their children in insertion order followed by `(end)`.
/// The closing tag pins every node to its depth.
pub fn canonical_form(tree: &Tree) -> String {
    let mut out = String::new();
    let mut pending = vec![Step::Visit(tree.root())];

    while let Some(step) = pending.pop() {
        let id = match step {
            Step::Visit(id) => id,
            Step::Close => {
                out.push_str(END_TAG);
                continue;
            }
        };

        let node = tree.node(id);
        out.push_str(node.name());
        match node.kind() {
            NodeKind::File { content } => {
                out.push_str(FILE_TAG);
                out.push('[');
                out.push_str(content);
                out.push(']');
            }
            NodeKind::Directory { children } => {
                out.push_str(DIR_TAG);
                pending.push(Step::Close);
                // Reversed so the first child is popped first.
                pending.extend(children.values().rev().copied().map(Step::Visit));
            }
        }
    }

    out
}

/// Lowercase hex SHA-256 of [`canonical_form`].
pub fn structural_hash(tree: &Tree) -> String {
    hex::encode(Sha256::digest(canonical_form(tree).as_bytes()))
}
