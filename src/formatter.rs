//! Message formatter.
//!
//! Walks a parsed message and replaces tags, void tags and placeholders with caller
//! supplied values, producing an ordered list of chunks.
//!
//! The string `"text <tag>tag text</tag> %placeholder%"` formatted with
//!
//! ```text
//! tag:         render(|chunks| format!("<b>{chunks}</b>"))
//! placeholder: text("placeholder text")
//! ```
//!
//! yields `["text ", "<b>tag text</b>", " ", "placeholder text"]`.
//!
//! The chunk type is generic: anything implementing [`Markup`] can be produced, so a UI
//! layer can plug its own node type in and keep rich values separate from literal text.

use std::collections::HashMap;

use crate::{
    error::Error,
    nodes::{Node, max_depth},
    options::DEFAULT_MAX_DEPTH,
    parser::parse,
};

/// Tags rendered by default when the caller does not provide a value for them.
pub const DEFAULT_TAGS: [&str; 6] = ["p", "b", "strong", "tt", "s", "i"];

/// Output chunk type of the formatter.
pub trait Markup: From<String> + Sized {
    /// Joins the formatted children of a tag into the value handed to its renderer.
    fn join(chunks: Vec<Self>) -> Self;

    /// Builds the element used for tags rendered by default, such as `<b>`.
    fn element(tag: &str, children: Self) -> Self;
}

impl Markup for String {
    fn join(chunks: Vec<Self>) -> Self {
        chunks.concat()
    }

    fn element(tag: &str, children: Self) -> Self {
        if children.is_empty() {
            format!("<{}/>", tag)
        } else {
            format!("<{tag}>{children}</{tag}>")
        }
    }
}

/// Renderer for a paired tag: receives the joined children.
pub type RenderFn<'a, T> = Box<dyn Fn(T) -> T + 'a>;

/// Value substituted for a tag or placeholder.
pub enum Value<'a, T> {
    /// Literal text, usable for every node kind.
    Text(String),
    /// Renderer, usable for paired tags only.
    Render(RenderFn<'a, T>),
}

impl<'a, T> Value<'a, T> {
    /// Literal value from anything printable, e.g. a count.
    pub fn text(value: impl ToString) -> Self {
        Value::Text(value.to_string())
    }

    pub fn render(f: impl Fn(T) -> T + 'a) -> Self {
        Value::Render(Box::new(f))
    }
}

impl<T> std::fmt::Debug for Value<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => f.debug_tuple("Text").field(text).finish(),
            Value::Render(_) => f.write_str("Render(..)"),
        }
    }
}

impl<T> From<&str> for Value<'_, T> {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl<T> From<String> for Value<'_, T> {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

/// Table of values keyed by tag or placeholder name.
#[derive(Debug)]
pub struct Values<'a, T = String> {
    entries: HashMap<String, Value<'a, T>>,
}

impl<T> Default for Values<'_, T> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<'a, T> Values<'a, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a literal value.
    pub fn with_text(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, Value::text(value));
        self
    }

    /// Adds a tag renderer.
    pub fn with_render(mut self, name: impl Into<String>, f: impl Fn(T) -> T + 'a) -> Self {
        self.insert(name, Value::render(f));
        self
    }

    /// Inserts a value, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value<'a, T>) {
        self.entries.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value<'a, T>> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds a fresh table with renderers for [`DEFAULT_TAGS`].
pub fn default_values<'a, T: Markup + 'a>() -> Values<'a, T> {
    let mut values = Values::new();
    for tag in DEFAULT_TAGS {
        values.insert(tag, Value::render(move |children: T| T::element(tag, children)));
    }
    values
}

/// Formats a message string.
///
/// # Example
///
/// ```rust
/// use langmarkup::{Values, format};
///
/// let values = Values::new().with_render("a", |chunks: String| format!("<a href=\"#\">{chunks}</a>"));
/// let formatted = format("<a>some text</a>", &values)?;
/// assert_eq!(formatted, vec!["<a href=\"#\">some text</a>".to_string()]);
/// # Ok::<(), langmarkup::Error>(())
/// ```
pub fn format<'a, T: Markup + 'a>(
    message: &str,
    values: &Values<'a, T>,
) -> Result<Vec<T>, Error> {
    let ast = parse(message)?;
    format_ast(&ast, values)
}

/// Formats an already parsed message.
pub fn format_ast<'a, T: Markup + 'a>(
    ast: &[Node],
    values: &Values<'a, T>,
) -> Result<Vec<T>, Error> {
    let defaults = default_values::<T>();
    format_layered(ast, &[values, &defaults])
}

/// Formats a parsed message looking names up through `layers` in order.
///
/// Unlike [`format_ast`], no default tag renderers are added.
pub fn format_layered<'a, T: Markup + 'a>(
    ast: &[Node],
    layers: &[&Values<'a, T>],
) -> Result<Vec<T>, Error> {
    if max_depth(ast) > DEFAULT_MAX_DEPTH {
        return Err(Error::NestingTooDeep {
            limit: DEFAULT_MAX_DEPTH,
        });
    }

    Formatter { layers }.format_nodes(ast)
}

struct Formatter<'v, 'a, T> {
    layers: &'v [&'v Values<'a, T>],
}

impl<'a, T: Markup> Formatter<'_, 'a, T> {
    fn lookup(&self, name: &str) -> Option<&Value<'a, T>> {
        self.layers.iter().find_map(|values| values.get(name))
    }

    fn format_nodes(&self, nodes: &[Node]) -> Result<Vec<T>, Error> {
        nodes.iter().map(|node| self.format_node(node)).collect()
    }

    fn format_node(&self, node: &Node) -> Result<T, Error> {
        match node {
            Node::Text { value } => Ok(T::from(value.clone())),
            Node::Tag { name, children } => {
                let children = T::join(self.format_nodes(children)?);
                match self.lookup(name) {
                    Some(Value::Render(render)) => Ok(render(children)),
                    Some(Value::Text(text)) => Ok(T::from(text.clone())),
                    None => Err(Error::missing_value(name.as_str())),
                }
            }
            Node::VoidTag { name } | Node::Placeholder { name } => match self.lookup(name) {
                Some(Value::Text(text)) => Ok(T::from(text.clone())),
                _ => Err(Error::missing_value(name.as_str())),
            },
        }
    }
}
