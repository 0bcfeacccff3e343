//! Message parser.
//!
//! A single pass, character-level state machine turning a message such as
//! `"You agree to our <eula>EULA</eula>, %name%"` into a sequence of [`Node`]s.
//!
//! Three states are used:
//! - text: plain characters, or content between an open and a close tag;
//! - tag: entered on `<`, left on `>`;
//! - placeholder: entered on `%`, left on the next `%`.
//!
//! An unterminated tag or placeholder at the end of input is kept as literal text,
//! and a second `<` inside a tag means the first one was literal text. `%%` is an
//! escaped `%`.

use std::{collections::VecDeque, mem};

use tracing::trace;

use crate::{error::Error, nodes::Node, options::ParseOptions};

const TAG_OPEN_BRACE: char = '<';
const TAG_CLOSE_BRACE: char = '>';
const CLOSING_TAG_MARK: char = '/';
const PLACEHOLDER_MARK: char = '%';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Text,
    Tag,
    Placeholder,
}

/// Entry of the parser stack.
#[derive(Debug)]
enum Pending {
    /// Raw name of a tag that was opened and is waiting for its close tag.
    TagName(String),
    /// A parsed node waiting to be attached to its enclosing tag.
    Node(Node),
}

struct Context<'s> {
    source: &'s str,
    max_depth: usize,
    stack: Vec<Pending>,
    result: Vec<Node>,
    text: String,
    tag: String,
    placeholder: String,
    /// Byte index where the last switch out of the text state happened, used to
    /// restore text if that switch turns out to be wrong.
    last_switch: usize,
    depth: usize,
}

impl<'s> Context<'s> {
    fn new(source: &'s str, options: &ParseOptions) -> Self {
        Self {
            source,
            max_depth: options.max_depth,
            stack: Vec::new(),
            result: Vec::new(),
            text: String::new(),
            tag: String::new(),
            placeholder: String::new(),
            last_switch: 0,
            depth: 0,
        }
    }

    /// Adds a node to the innermost open tag, or to the result at top level.
    fn push_node(&mut self, node: Node) {
        if self.stack.is_empty() {
            self.result.push(node);
        } else {
            self.stack.push(Pending::Node(node));
        }
    }

    fn flush_text(&mut self) {
        if !self.text.is_empty() {
            let text = mem::take(&mut self.text);
            self.push_node(Node::text(text));
        }
    }

    fn unbalanced(&self) -> Error {
        Error::unbalanced(self.source)
    }

    fn on_text(&mut self, idx: usize, ch: char) -> State {
        match ch {
            TAG_OPEN_BRACE => {
                self.last_switch = idx;
                State::Tag
            }
            PLACEHOLDER_MARK => {
                self.last_switch = idx;
                State::Placeholder
            }
            _ => {
                self.text.push(ch);
                State::Text
            }
        }
    }

    fn on_placeholder(&mut self, idx: usize, ch: char) -> State {
        if ch != PLACEHOLDER_MARK {
            self.placeholder.push(ch);
            return State::Placeholder;
        }

        // "%%" right after the opening mark is an escaped percent sign
        if idx - self.last_switch == 1 {
            self.text.push(PLACEHOLDER_MARK);
            return State::Text;
        }

        self.flush_text();
        let name = mem::take(&mut self.placeholder);
        self.push_node(Node::placeholder(name));
        State::Text
    }

    fn on_tag(&mut self, idx: usize, ch: char) -> Result<State, Error> {
        match ch {
            TAG_CLOSE_BRACE => {
                let tag = mem::take(&mut self.tag);
                if let Some(name) = tag.strip_prefix(CLOSING_TAG_MARK) {
                    self.close_tag(name)?;
                } else if let Some(name) = tag.strip_suffix(CLOSING_TAG_MARK) {
                    if has_attributes(name) {
                        return Err(Error::TagHasAttributes(self.source.to_string()));
                    }
                    self.flush_text();
                    self.push_node(Node::void_tag(name));
                } else {
                    self.open_tag(tag)?;
                }
                Ok(State::Text)
            }
            TAG_OPEN_BRACE => {
                // the previous "<" did not start a tag
                let literal = &self.source[self.last_switch..idx];
                trace!(literal, "stray tag brace kept as text");
                self.text.push_str(literal);
                self.last_switch = idx;
                self.tag.clear();
                Ok(State::Tag)
            }
            _ => {
                self.tag.push(ch);
                Ok(State::Tag)
            }
        }
    }

    fn open_tag(&mut self, name: String) -> Result<(), Error> {
        if self.depth >= self.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.max_depth,
            });
        }
        self.flush_text();
        self.stack.push(Pending::TagName(name));
        self.depth += 1;
        Ok(())
    }

    /// Pops the stack down to the matching open tag, collecting everything above it as children.
    fn close_tag(&mut self, name: &str) -> Result<(), Error> {
        if has_attributes(name) {
            return Err(Error::TagHasAttributes(self.source.to_string()));
        }

        let mut children = VecDeque::new();
        if !self.text.is_empty() {
            children.push_back(Node::text(mem::take(&mut self.text)));
        }

        loop {
            match self.stack.pop() {
                Some(Pending::TagName(open)) if open == name => {
                    self.depth -= 1;
                    let node = Node::tag(name, children.into());
                    self.push_node(node);
                    return Ok(());
                }
                Some(Pending::Node(node)) => children.push_front(node),
                Some(Pending::TagName(open)) if has_attributes(&open) => {
                    return Err(Error::TagHasAttributes(self.source.to_string()));
                }
                Some(Pending::TagName(_)) | None => return Err(self.unbalanced()),
            }
        }
    }

    fn finish(mut self, state: State) -> Result<Vec<Node>, Error> {
        if state == State::Text {
            if !self.text.is_empty() {
                self.result.push(Node::text(mem::take(&mut self.text)));
            }
        } else {
            // tag or placeholder was never closed, keep it as text
            let rest = &self.source[self.last_switch..];
            trace!(rest, "unterminated tag or placeholder kept as text");
            let mut text = mem::take(&mut self.text);
            text.push_str(rest);
            if !text.is_empty() {
                self.result.push(Node::text(text));
            }
        }

        if !self.stack.is_empty() {
            return Err(self.unbalanced());
        }

        Ok(self.result)
    }
}

/// A space inside a trimmed tag name, e.g. `a class` or `a href='#'`.
fn has_attributes(name: &str) -> bool {
    name.trim().contains(' ')
}

/// Parses a message into its top-level nodes using default [`ParseOptions`].
///
/// An empty message yields an empty sequence.
///
/// # Example
///
/// ```rust
/// use langmarkup::{Node, parse};
///
/// let ast = parse("String to <a>translate</a>")?;
/// assert_eq!(
///     ast,
///     vec![
///         Node::text("String to "),
///         Node::tag("a", vec![Node::text("translate")]),
///     ]
/// );
/// # Ok::<(), langmarkup::Error>(())
/// ```
pub fn parse(message: &str) -> Result<Vec<Node>, Error> {
    parse_with(message, &ParseOptions::default())
}

/// Parses a message with explicit options.
pub fn parse_with(message: &str, options: &ParseOptions) -> Result<Vec<Node>, Error> {
    let mut context = Context::new(message, options);
    let mut state = State::Text;

    for (idx, ch) in message.char_indices() {
        state = match state {
            State::Text => context.on_text(idx, ch),
            State::Tag => context.on_tag(idx, ch)?,
            State::Placeholder => context.on_placeholder(idx, ch),
        };
    }

    context.finish(state)
}
