use base64::{Engine as _, engine::general_purpose::STANDARD};
use snafu::prelude::*;

use crate::filesystem::{NodeId, NodeKind, Tree, is_document_char};

use super::document::{BASE64_ENCODING, CONTENT_TAG, ENTRY_TAG};

/// How file contents are emitted by [`write_document_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContentEncoding {
    /// Plain text, falling back to base64 for content XML cannot carry verbatim.
    #[default]
    Auto,
    Base64,
}

pub fn write_document(tree: &Tree, label: &str) -> Result<String, WriteError> {
    write_document_with(tree, label, ContentEncoding::Auto)
}

/// Serializes `tree` into the bootstrap document format.
///
/// Node names are already restricted to document characters; the label is
/// checked here.
pub fn write_document_with(
    tree: &Tree,
    label: &str,
    encoding: ContentEncoding,
) -> Result<String, WriteError> {
    ensure!(
        label.chars().all(is_document_char),
        InvalidLabelSnafu { label }
    );

    let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str(&format!("<vfs name=\"{}\">\n", escape_attribute(label)));
    for child in tree.children(tree.root()) {
        write_entry(tree, child, 1, encoding, &mut out);
    }
    out.push_str("</vfs>\n");
    Ok(out)
}

fn write_entry(tree: &Tree, id: NodeId, depth: usize, encoding: ContentEncoding, out: &mut String) {
    let node = tree.node(id);
    let indent = "  ".repeat(depth);
    let name = escape_attribute(node.name());

    match node.kind() {
        NodeKind::File { content } if content.is_empty() => {
            out.push_str(&format!("{indent}<{ENTRY_TAG} name=\"{name}\" type=\"file\"/>\n"));
        }
        NodeKind::File { content } => {
            let block = if encoding == ContentEncoding::Base64 || needs_base64(content) {
                format!(
                    "<{CONTENT_TAG} encoding=\"{BASE64_ENCODING}\">{}</{CONTENT_TAG}>",
                    STANDARD.encode(content)
                )
            } else {
                format!("<{CONTENT_TAG}>{}</{CONTENT_TAG}>", escape_text(content))
            };
            out.push_str(&format!(
                "{indent}<{ENTRY_TAG} name=\"{name}\" type=\"file\">{block}</{ENTRY_TAG}>\n"
            ));
        }
        NodeKind::Directory { children } if children.is_empty() => {
            out.push_str(&format!("{indent}<{ENTRY_TAG} name=\"{name}\"/>\n"));
        }
        NodeKind::Directory { children } => {
            out.push_str(&format!("{indent}<{ENTRY_TAG} name=\"{name}\">\n"));
            for child in children.values() {
                write_entry(tree, *child, depth + 1, encoding, out);
            }
            out.push_str(&format!("{indent}</{ENTRY_TAG}>\n"));
        }
    }
}

// Parsers turn `\r\n` into `\n` in text, and some characters have no XML form.
fn needs_base64(content: &str) -> bool {
    content.chars().any(|c| c == '\r' || !is_document_char(c))
}

fn escape_text(text: &str) -> String {
    escape(text, false)
}

// Attribute values are whitespace-normalized unless written as references.
fn escape_attribute(text: &str) -> String {
    escape(text, true)
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            '\r' if attribute => escaped.push_str("&#13;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[derive(Debug, Snafu, PartialEq, Eq)]
pub enum WriteError {
    #[snafu(display("Label {:?} contains characters a VFS document cannot hold", label))]
    InvalidLabel { label: String },
}
