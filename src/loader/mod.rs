mod document;
mod writer;

pub use document::{LoadError, LoadedTree, parse_document};
pub use writer::{ContentEncoding, WriteError, write_document, write_document_with};
