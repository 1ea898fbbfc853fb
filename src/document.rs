//! # Document Loader
//!
//! Parses a game-server XML file (`types.xml`, `mapgroupproto.xml`,
//! `mapgrouppos.xml`, ...) into an in-memory tree and exposes it as an ordered
//! sequence of keyed *records*: the direct children of the root element that
//! carry a given tag, identified by their `name` attribute.
//!
//! The tree is held in an [`xot::Xot`] arena, which keeps every node that was
//! parsed: comments, whitespace, attribute order and element order. Only the
//! nodes an algorithm explicitly edits change; everything else serializes back
//! exactly as it was read.
//!
//! A few differences are lexical only and do not change the document's
//! meaning: whitespace between prolog comments and the root element is not
//! kept, CDATA sections come back as escaped text, and `&apos;` is written as
//! a literal quote. The XML declaration, a UTF-8 byte order mark, CRLF line
//! endings and the final newline are restored as they were read.
//!
//! ```
//! use xml_keysync::document::Document;
//!
//! let doc = Document::parse(r#"<types><type name="Apple"><lifetime>3600</lifetime></type></types>"#).unwrap();
//! let records = doc.records("type");
//! assert_eq!(records.len(), 1);
//! assert_eq!(doc.key(records[0]), Some("Apple"));
//! let lifetime = doc.field(records[0], "lifetime").unwrap();
//! assert_eq!(doc.text(lifetime), "3600");
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use xot::Xot;

pub use xot::Node;

use crate::error::{Error, Result};

/// Attribute carrying the identity of a record.
pub const KEY_ATTRIBUTE: &str = "name";

const BOM: char = '\u{feff}';

/// A parsed XML document, owned exclusively by whoever loaded it.
pub struct Document {
    xot: Xot,
    root: Node,
    element: Node,
    declaration: Option<String>,
    bom: bool,
    crlf: bool,
    trailing_newline: bool,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("path", &self.path)
            .field("declaration", &self.declaration)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Parse a document from a string.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_path(text, None)
    }

    /// Load and parse the file at `path`.
    ///
    /// The file handle is closed as soon as its contents are read.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::MissingFile {
                path: path.to_path_buf(),
            },
            ErrorKind::InvalidData => Error::MalformedDocument {
                path: Some(path.to_path_buf()),
                message: format!("not valid UTF-8: {}", e),
            },
            _ => Error::Io(e),
        })?;

        let doc = Self::parse_with_path(&text, Some(path.to_path_buf()))?;
        log::debug!("Loaded {}", path.display());
        Ok(doc)
    }

    fn parse_with_path(text: &str, path: Option<PathBuf>) -> Result<Self> {
        let malformed = |message: String| Error::MalformedDocument {
            path: path.clone(),
            message,
        };

        let bom = text.starts_with(BOM);
        let body = text.trim_start_matches(BOM);

        let mut xot = Xot::new();
        let root = xot.parse(body).map_err(|e| malformed(e.to_string()))?;
        let element = xot
            .children(root)
            .find(|&node| xot.is_element(node))
            .ok_or_else(|| malformed("document has no root element".to_string()))?;

        Ok(Self {
            xot,
            root,
            element,
            declaration: declaration_of(body),
            bom,
            crlf: body.contains("\r\n"),
            trailing_newline: body.ends_with('\n'),
            path,
        })
    }

    /// The file this document was loaded from, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// All records with the given tag, in document order.
    ///
    /// Only direct children of the root element are records; nested elements
    /// with the same tag are fields, not records.
    pub fn records(&self, tag: &str) -> Vec<Node> {
        self.child_elements(self.element, tag).collect()
    }

    /// The key of a record: its `name` attribute.
    pub fn key(&self, record: Node) -> Option<&str> {
        self.attribute(record, KEY_ATTRIBUTE)
    }

    /// The first child element of `record` named `name`.
    pub fn field(&self, record: Node, name: &str) -> Option<Node> {
        self.child_elements(record, name).next()
    }

    /// The text held directly by an element.
    ///
    /// Text of nested elements is not included. An empty element yields an
    /// empty string.
    pub fn text(&self, node: Node) -> String {
        self.xot
            .children(node)
            .filter_map(|child| self.xot.text_str(child))
            .collect()
    }

    /// Replace the text held directly by an element.
    ///
    /// Child elements of `node`, if any, are kept in place.
    pub fn set_text(&mut self, node: Node, value: &str) -> Result<()> {
        let texts: Vec<Node> = self
            .xot
            .children(node)
            .filter(|&child| self.xot.text_str(child).is_some())
            .collect();
        for text in texts {
            self.xot
                .remove(text)
                .map_err(|e| Error::tree("clear field text", e))?;
        }

        if !value.is_empty() {
            let text = self.xot.new_text(value);
            self.xot
                .prepend(node, text)
                .map_err(|e| Error::tree("set field text", e))?;
        }
        Ok(())
    }

    /// Append a new field `<name>value</name>` as the last child element of
    /// `record` and return it.
    ///
    /// When the record is laid out on several indented lines the new field is
    /// placed on its own line with the indentation of the first existing child.
    pub fn append_field(&mut self, record: Node, name: &str, value: &str) -> Result<Node> {
        let name_id = self.xot.add_name(name);
        let field = self.xot.new_element(name_id);
        if !value.is_empty() {
            let text = self.xot.new_text(value);
            self.xot
                .append(field, text)
                .map_err(|e| Error::tree("create field", e))?;
        }

        let indent = self
            .xot
            .first_child(record)
            .and_then(|first| self.xot.text_str(first))
            .filter(|s| is_indentation(s))
            .map(str::to_string);
        let closing = self
            .xot
            .last_child(record)
            .filter(|&last| self.xot.text_str(last).is_some_and(is_indentation));

        match (closing, indent) {
            (Some(closing), Some(indent)) => {
                self.xot
                    .insert_before(closing, field)
                    .map_err(|e| Error::tree("append field", e))?;
                let indent = self.xot.new_text(&indent);
                self.xot
                    .insert_before(field, indent)
                    .map_err(|e| Error::tree("indent field", e))?;
            }
            _ => {
                self.xot
                    .append(record, field)
                    .map_err(|e| Error::tree("append field", e))?;
            }
        }
        Ok(field)
    }

    /// Value of an attribute on an element.
    pub fn attribute(&self, node: Node, name: &str) -> Option<&str> {
        let name_id = self.xot.name(name)?;
        self.xot.get_attribute(node, name_id)
    }

    /// Set an attribute on an element, creating it if needed.
    ///
    /// An existing attribute keeps its position among the element's attributes.
    pub fn set_attribute(&mut self, node: Node, name: &str, value: &str) {
        let name_id = self.xot.add_name(name);
        self.xot.set_attribute(node, name_id, value);
    }

    /// Serialize the document, including the XML declaration it was parsed with.
    pub fn to_xml_string(&self) -> Result<String> {
        let body = self
            .xot
            .to_string(self.root)
            .map_err(|e| Error::tree("serialize document", e))?;

        let mut out = String::with_capacity(body.len() + 64);
        if self.bom {
            out.push(BOM);
        }
        if let Some(declaration) = &self.declaration {
            if !body.starts_with("<?xml") {
                out.push_str(declaration);
                out.push('\n');
            }
        }
        out.push_str(&body);
        if self.trailing_newline && !out.ends_with('\n') {
            out.push('\n');
        }
        if self.crlf {
            out = to_crlf(&out);
        }
        Ok(out)
    }

    fn child_elements<'a>(&'a self, parent: Node, tag: &str) -> impl Iterator<Item = Node> + 'a {
        let name_id = self.xot.name(tag);
        self.xot.children(parent).filter(move |&child| {
            match (name_id, self.xot.element(child)) {
                (Some(name_id), Some(element)) => element.name() == name_id,
                _ => false,
            }
        })
    }
}

/// The `<?xml ...?>` declaration at the start of `text`, if present.
fn declaration_of(text: &str) -> Option<String> {
    let text = text.trim_start();
    if !text.starts_with("<?xml") {
        return None;
    }
    let after = text[5..].chars().next()?;
    if !after.is_whitespace() && after != '?' {
        return None;
    }
    text.find("?>").map(|end| text[..end + 2].to_string())
}

/// Turn bare `\n` line endings into `\r\n`, leaving existing `\r\n` alone.
fn to_crlf(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 16);
    let mut previous = None;
    for ch in text.chars() {
        if ch == '\n' && previous != Some('\r') {
            out.push('\r');
        }
        out.push(ch);
        previous = Some(ch);
    }
    out
}

fn is_indentation(s: &str) -> bool {
    s.contains('\n') && s.chars().all(char::is_whitespace)
}
