//! Declaration output nodes seen by after-declaration transforms.
//!
//! The engine lowers each emitted `.d.ts` into a [`DeclarationFile`], runs
//! the registered [`DeclarationTransform`]s over it, then prints it.
//!
//! ```text
//! DeclarationFile
//! └── statements: Vec<Node>
//!     ├── Text                 verbatim line (imports, aliases, functions)
//!     ├── PropertySignature    `name?: Type;`
//!     └── Block                `export declare class A {` … `}`
//!         └── members: Vec<Node>
//! ```

use std::fmt::{self, Write};
use std::path::PathBuf;

/// Name of a property signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyName {
    /// `foo`
    Identifier(String),
    /// `#foo` (text includes the `#`)
    PrivateIdentifier(String),
    /// `"foo"` (text excludes the quotes)
    StringLiteral(String),
    /// `0`
    NumericLiteral(String),
    /// `[Symbol.iterator]` (text excludes the brackets)
    Computed(String),
}

impl PropertyName {
    /// The name's text as the compiler stores it.
    pub fn text(&self) -> &str {
        match self {
            Self::Identifier(text)
            | Self::PrivateIdentifier(text)
            | Self::StringLiteral(text)
            | Self::NumericLiteral(text)
            | Self::Computed(text) => text,
        }
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(text) | Self::PrivateIdentifier(text) | Self::NumericLiteral(text) => {
                f.write_str(text)
            }
            Self::StringLiteral(text) => {
                // JSON string escaping matches the printer's double-quoted form
                let quoted = serde_json::to_string(text).map_err(|_| fmt::Error)?;
                f.write_str(&quoted)
            }
            Self::Computed(text) => write!(f, "[{text}]"),
        }
    }
}

/// `readonly name?: Type;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySignature {
    /// Modifier keywords in source order (`readonly`, `static`, ...).
    pub modifiers: Vec<String>,
    /// Property name.
    pub name: PropertyName,
    /// Whether the property is optional.
    pub question_token: bool,
    /// Type annotation text.
    pub type_annotation: Option<String>,
}

impl PropertySignature {
    /// Create a required property without modifiers.
    pub fn new(name: PropertyName, type_annotation: Option<String>) -> Self {
        Self {
            modifiers: Vec::new(),
            name,
            question_token: false,
            type_annotation,
        }
    }
}

impl fmt::Display for PropertySignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{modifier} ")?;
        }
        write!(f, "{}", self.name)?;
        if self.question_token {
            f.write_char('?')?;
        }
        if let Some(ty) = &self.type_annotation {
            write!(f, ": {ty}")?;
        }
        f.write_char(';')
    }
}

/// A braced declaration body (class, interface, namespace, type literal).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// Opening line, including the `{`.
    pub header: String,
    /// Body members.
    pub members: Vec<Node>,
    /// Closing line, including the `}`.
    pub footer: String,
}

/// A declaration output node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Verbatim line.
    Text(String),
    /// Property signature.
    PropertySignature(PropertySignature),
    /// Braced body.
    Block(Block),
}

/// An emitted declaration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationFile {
    /// Output file name (`.d.ts`).
    pub file_name: PathBuf,
    /// Top-level statements.
    pub statements: Vec<Node>,
}

impl DeclarationFile {
    /// Create a declaration file.
    pub fn new(file_name: impl Into<PathBuf>, statements: Vec<Node>) -> Self {
        Self {
            file_name: file_name.into(),
            statements,
        }
    }

    /// Run a transform over every node.
    pub fn transform(&mut self, transform: &mut dyn DeclarationTransform) {
        walk_nodes(transform, &mut self.statements);
    }

    /// Print with four-space indentation.
    pub fn print(&self) -> String {
        let mut out = String::new();
        print_nodes(&mut out, &self.statements, 0);
        out
    }
}

fn print_nodes(out: &mut String, nodes: &[Node], depth: usize) {
    let indent = "    ".repeat(depth);
    for node in nodes {
        match node {
            Node::Text(text) => {
                let _ = writeln!(out, "{indent}{text}");
            }
            Node::PropertySignature(sig) => {
                let _ = writeln!(out, "{indent}{sig}");
            }
            Node::Block(block) => {
                let _ = writeln!(out, "{indent}{}", block.header);
                print_nodes(out, &block.members, depth + 1);
                let _ = writeln!(out, "{indent}{}", block.footer);
            }
        }
    }
}

// =============================================================================
// Transforms
// =============================================================================

/// A transform applied to declaration output after it is generated.
pub trait DeclarationTransform {
    /// Rewrite a property signature in place.
    fn visit_property_signature(&mut self, _node: &mut PropertySignature) {}
}

/// Visit `nodes` and every nested block.
pub fn walk_nodes(transform: &mut dyn DeclarationTransform, nodes: &mut [Node]) {
    for node in nodes {
        match node {
            Node::Text(_) => {}
            Node::PropertySignature(sig) => transform.visit_property_signature(sig),
            Node::Block(block) => walk_nodes(transform, &mut block.members),
        }
    }
}

/// Transforms handed to the engine's emit.
#[derive(Default)]
pub struct CustomTransformers {
    /// Run on declaration output.
    pub after_declarations: Vec<Box<dyn DeclarationTransform>>,
}

impl CustomTransformers {
    /// Create an empty transformer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an after-declarations transform.
    pub fn with_after_declarations(mut self, transform: impl DeclarationTransform + 'static) -> Self {
        self.after_declarations.push(Box::new(transform));
        self
    }

    /// Apply every after-declarations transform to `file`, in order.
    pub fn apply_after_declarations(&mut self, file: &mut DeclarationFile) {
        for transform in &mut self.after_declarations {
            file.transform(transform.as_mut());
        }
    }
}

impl fmt::Debug for CustomTransformers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomTransformers")
            .field("after_declarations", &self.after_declarations.len())
            .finish()
    }
}
