#![forbid(unsafe_code)]
//! Localizable UI strings with inline markup and plural forms.
//!
//! Messages use a small markup: paired tags (`<a>...</a>`), void tags (`<img/>`),
//! placeholders (`%name%`, with `%%` for a literal percent sign) and `|`-separated
//! plural forms. The crate parses them into an AST, formats them with caller supplied
//! values, and checks that a translation keeps the structure of its base message.
//!
//! # Quick Start
//!
//! ```rust
//! use langmarkup::{Values, format, is_translation_valid};
//!
//! let values = Values::new()
//!     .with_render("a", |chunks: String| format!("<a href=\"#\">{chunks}</a>"))
//!     .with_text("count", 3);
//! let chunks = format("<a>%count% new</a> messages", &values)?;
//! assert_eq!(chunks.concat(), "<a href=\"#\">3 new</a> messages");
//!
//! assert!(is_translation_valid(
//!     "<b>b node</b> <a>a node</a>",
//!     "<a>a нода</a> <b>b нода</b>",
//!     "ru",
//! )?);
//! # Ok::<(), langmarkup::Error>(())
//! ```
//!
//! # Modules
//!
//! - [`parser`]: message string to [`Node`] sequence
//! - [`formatter`]: AST plus values to output chunks, generic over [`Markup`]
//! - [`plural`]: plural form splitting and per-locale selection
//! - [`validator`]: structural comparison of base and translated messages
//! - [`translator`]: key lookup with base-locale fallback over a [`MessageSource`]
//!
//! All operations are synchronous and keep no state between calls.

pub mod error;
pub mod formatter;
pub mod nodes;
pub mod options;
pub mod parser;
pub mod plural;
pub mod translator;
pub mod validator;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    formatter::{Markup, Value, Values, default_values, format, format_ast, format_layered},
    nodes::{Node, NodeKind},
    options::{DEFAULT_MAX_DEPTH, ParseOptions},
    parser::{parse, parse_with},
    plural::{
        PluralCategory, PluralRule, expected_form_count, get_form, get_forms, has_plural_form,
        is_plural_form_valid, plural_rule, select_form_index,
    },
    translator::{MessageSource, Translator, TranslatorBuilder},
    validator::is_translation_valid,
};
