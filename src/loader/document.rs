use base64::{Engine as _, engine::general_purpose::STANDARD};
use roxmltree::{Document, Node as XmlNode};
use snafu::prelude::*;
use tracing::debug;

use crate::filesystem::{NodeId, Tree, TreeError};

pub(crate) const ENTRY_TAG: &str = "node";
pub(crate) const CONTENT_TAG: &str = "content";
pub(crate) const BASE64_ENCODING: &str = "base64";

/// A fully built tree together with the label of the document it came from.
#[derive(Debug, Clone)]
pub struct LoadedTree {
    pub tree: Tree,
    pub label: String,
}

impl TryFrom<&str> for LoadedTree {
    type Error = LoadError;

    fn try_from(contents: &str) -> Result<Self, Self::Error> {
        let document = Document::parse(contents).context(XmlSnafu)?;
        let root_element = document.root_element();

        let label = root_element
            .attribute("name")
            .context(MissingLabelSnafu)?
            .to_string();
        debug!("Parsing VFS document '{}'", label);

        let mut tree = Tree::new();
        let root = tree.root();
        add_entries(&mut tree, root, root_element)?;

        debug!("Parsed {} nodes from VFS document '{}'", tree.node_count(), label);
        Ok(LoadedTree { tree, label })
    }
}

/// Parses a bootstrap document. The caller's state is never touched; any
/// error discards the partially built tree.
pub fn parse_document(contents: &str) -> Result<LoadedTree, LoadError> {
    contents.try_into()
}

fn add_entries(tree: &mut Tree, parent: NodeId, element: XmlNode) -> Result<(), LoadError> {
    for entry in element
        .children()
        .filter(|child| child.has_tag_name(ENTRY_TAG))
    {
        let line = line_of(entry);
        let name = entry
            .attribute("name")
            .context(MissingNameSnafu { line })?;

        match entry.attribute("type").unwrap_or("dir") {
            "dir" => {
                let id = tree
                    .add_directory(parent, name)
                    .context(StructureSnafu { line })?;
                add_entries(tree, id, entry)?;
            }
            "file" => {
                let content = read_content(entry, name)?;
                tree.add_file(parent, name, content)
                    .context(StructureSnafu { line })?;
            }
            other => {
                return UnknownTypeSnafu {
                    name,
                    kind: other,
                    line,
                }
                .fail();
            }
        }
    }

    Ok(())
}

fn read_content(entry: XmlNode, name: &str) -> Result<String, LoadError> {
    let Some(block) = entry
        .children()
        .find(|child| child.has_tag_name(CONTENT_TAG))
    else {
        return Ok(String::new());
    };

    let text: String = block
        .children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect();

    match block.attribute("encoding") {
        None => Ok(text),
        Some(BASE64_ENCODING) => {
            let cleaned: String = text.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = STANDARD
                .decode(cleaned)
                .context(InvalidBase64Snafu { name })?;
            String::from_utf8(bytes).context(InvalidUtf8Snafu { name })
        }
        Some(other) => UnknownEncodingSnafu {
            name,
            encoding: other,
            line: line_of(block),
        }
        .fail(),
    }
}

fn line_of(node: XmlNode) -> u32 {
    node.document().text_pos_at(node.range().start).row
}

#[derive(Debug, Snafu)]
pub enum LoadError {
    #[snafu(display("Failed to parse the VFS document"))]
    XmlError { source: roxmltree::Error },
    #[snafu(display("Root element of the VFS document has no 'name' attribute"))]
    MissingLabel,
    #[snafu(display("Entry on line {} has no 'name' attribute", line))]
    MissingName { line: u32 },
    #[snafu(display("Entry '{}' on line {} has unknown type '{}'", name, line, kind))]
    UnknownType {
        name: String,
        kind: String,
        line: u32,
    },
    #[snafu(display(
        "Content of '{}' on line {} has unknown encoding '{}'",
        name,
        line,
        encoding
    ))]
    UnknownEncoding {
        name: String,
        encoding: String,
        line: u32,
    },
    #[snafu(display("Content of '{}' is not valid base64", name))]
    InvalidBase64 {
        name: String,
        source: base64::DecodeError,
    },
    #[snafu(display("Decoded content of '{}' is not valid UTF-8", name))]
    InvalidUtf8 {
        name: String,
        source: std::string::FromUtf8Error,
    },
    #[snafu(display("Malformed tree structure on line {}", line))]
    StructureError { line: u32, source: TreeError },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<vfs name="sample">
  <node name="home">
    <node name="user">
      <node name="readme.txt" type="file">
        <content>Hello &amp; welcome</content>
      </node>
      <node name="secret.txt" type="file">
        <content encoding="base64">
          c2VjcmV0
          IHZhbHVl
        </content>
      </node>
    </node>
  </node>
  <node name="empty.txt" type="file"/>
  <node name="tmp" type="dir"/>
</vfs>
"#;

    fn names(tree: &Tree, id: NodeId) -> Vec<String> {
        tree.children(id)
            .map(|child| tree.node(child).name().to_string())
            .collect()
    }

    #[test]
    fn document_builds_ordered_tree() {
        let loaded = parse_document(SAMPLE).unwrap();
        let tree = &loaded.tree;

        assert_eq!(loaded.label, "sample");
        assert_eq!(names(tree, tree.root()), vec!["home", "empty.txt", "tmp"]);

        let home = tree.child(tree.root(), "home").unwrap();
        let user = tree.child(home, "user").unwrap();
        assert_eq!(names(tree, user), vec!["readme.txt", "secret.txt"]);
    }

    #[test]
    fn document_decodes_plain_and_base64_content() {
        let loaded = parse_document(SAMPLE).unwrap();
        let tree = &loaded.tree;
        let home = tree.child(tree.root(), "home").unwrap();
        let user = tree.child(home, "user").unwrap();

        let readme = tree.child(user, "readme.txt").unwrap();
        let secret = tree.child(user, "secret.txt").unwrap();
        let empty = tree.child(tree.root(), "empty.txt").unwrap();

        assert_eq!(tree.node(readme).content(), Some("Hello & welcome"));
        assert_eq!(tree.node(secret).content(), Some("secret value"));
        assert_eq!(tree.node(empty).content(), Some(""));
    }

    #[test]
    fn document_ignores_foreign_markup() {
        let document = r#"<vfs name="x">
  <comment>not a node</comment>
  <node name="a"><meta owner="root"/><node name="b"/></node>
</vfs>"#;

        let loaded = parse_document(document).unwrap();
        let tree = &loaded.tree;
        let a = tree.child(tree.root(), "a").unwrap();

        assert_eq!(names(tree, tree.root()), vec!["a"]);
        assert_eq!(names(tree, a), vec!["b"]);
    }

    #[test]
    fn document_returns_error_on_invalid_xml() {
        let result = parse_document("<vfs name=\"x\"><node name=\"a\"></vfs>");
        assert!(matches!(result, Err(LoadError::XmlError { .. })));
    }

    #[test]
    fn document_returns_error_on_missing_label() {
        let result = parse_document("<vfs><node name=\"a\"/></vfs>");
        assert!(matches!(result, Err(LoadError::MissingLabel)));
    }

    #[test]
    fn document_returns_error_on_missing_entry_name() {
        let result = parse_document("<vfs name=\"x\">\n<node type=\"dir\"/>\n</vfs>");
        assert!(matches!(result, Err(LoadError::MissingName { line: 2 })));
    }

    #[test]
    fn document_returns_error_on_unknown_type() {
        let result = parse_document("<vfs name=\"x\"><node name=\"a\" type=\"link\"/></vfs>");
        assert!(matches!(
            result,
            Err(LoadError::UnknownType { ref kind, .. }) if kind == "link"
        ));
    }

    #[test]
    fn document_returns_error_on_unknown_encoding() {
        let document = r#"<vfs name="x"><node name="a" type="file"><content encoding="hex">00</content></node></vfs>"#;
        let result = parse_document(document);
        assert!(matches!(result, Err(LoadError::UnknownEncoding { .. })));
    }

    #[rstest]
    #[case("not base64!!")]
    #[case("/w==")]
    fn document_returns_error_on_undecodable_content(#[case] payload: &str) {
        let document = format!(
            r#"<vfs name="x"><node name="a" type="file"><content encoding="base64">{payload}</content></node></vfs>"#
        );
        let result = parse_document(&document);
        assert!(matches!(
            result,
            Err(LoadError::InvalidBase64 { .. }) | Err(LoadError::InvalidUtf8 { .. })
        ));
    }

    #[test]
    fn document_returns_error_on_duplicate_names() {
        let document = r#"<vfs name="x"><node name="a"/><node name="a" type="file"/></vfs>"#;
        let result = parse_document(document);
        assert!(matches!(
            result,
            Err(LoadError::StructureError {
                source: TreeError::DuplicateName { .. },
                ..
            })
        ));
    }

    #[rstest]
    #[case("..")]
    #[case("a/b")]
    #[case("")]
    fn document_returns_error_on_invalid_names(#[case] name: &str) {
        let document = format!(r#"<vfs name="x"><node name="{name}"/></vfs>"#);
        let result = parse_document(&document);
        assert!(matches!(
            result,
            Err(LoadError::StructureError {
                source: TreeError::InvalidName { .. },
                ..
            })
        ));
    }

    #[test]
    fn files_ignore_nested_entries() {
        let document = r#"<vfs name="x"><node name="a" type="file"><node name="b"/></node></vfs>"#;
        let loaded = parse_document(document).unwrap();
        let a = loaded.tree.child(loaded.tree.root(), "a").unwrap();
        assert_eq!(loaded.tree.children(a).count(), 0);
        assert_eq!(loaded.tree.node_count(), 2);
    }

    #[test]
    fn demo_document_loads() {
        let loaded = parse_document(include_str!("../../demos/filesystem.xml")).unwrap();
        let tree = &loaded.tree;
        let home = tree.child(tree.root(), "home").unwrap();
        let user = tree.child(home, "user").unwrap();
        let notes = tree.child(user, "notes.txt").unwrap();

        assert_eq!(loaded.label, "demo");
        assert_eq!(names(tree, tree.root()), vec!["home", "etc", "tmp"]);
        assert_eq!(
            tree.node(notes).content(),
            Some("remember: the tree is read-only\n")
        );
    }
}
