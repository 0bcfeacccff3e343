//! Message lookup façade over the formatter.
//!
//! A [`Translator`] resolves a key through a [`MessageSource`] (current locale first,
//! then the base locale), formats the message and hands the chunks to a message
//! constructor which decides the final output type.
//!
//! # Example
//!
//! ```rust
//! use langmarkup::{MessageSource, Translator, Values};
//!
//! struct English;
//!
//! impl MessageSource for English {
//!     fn message(&self, key: &str) -> Option<String> {
//!         match key {
//!             "hours" => Some("| %count% hour | %count% hours".to_string()),
//!             _ => None,
//!         }
//!     }
//!     fn locale(&self) -> String {
//!         "en".to_string()
//!     }
//!     fn base_message(&self, key: &str) -> Option<String> {
//!         self.message(key)
//!     }
//!     fn base_locale(&self) -> String {
//!         "en".to_string()
//!     }
//! }
//!
//! let translator = Translator::new(English);
//! assert_eq!(translator.get_plural("hours", 2, &Values::new())?, "2 hours");
//! # Ok::<(), langmarkup::Error>(())
//! ```

use tracing::debug;

use crate::{
    error::Error,
    formatter::{Markup, Value, Values, default_values, format_layered},
    parser::parse,
    plural::get_form,
};

/// Placeholder filled with the quantity by [`Translator::get_plural`] unless the caller sets it.
pub const COUNT_PLACEHOLDER: &str = "count";

/// Supplies raw messages for the current and the base locale.
///
/// Empty messages are treated as missing.
pub trait MessageSource {
    /// Message for `key` in the current locale.
    fn message(&self, key: &str) -> Option<String>;

    /// Current locale code, e.g. `"ru"`.
    fn locale(&self) -> String;

    /// Message for `key` in the base locale.
    fn base_message(&self, key: &str) -> Option<String>;

    /// Base locale code.
    fn base_locale(&self) -> String;
}

/// Builds the final output from formatted chunks.
pub type MessageConstructor<'a, T, O> = Box<dyn Fn(Vec<T>) -> O + 'a>;

pub struct Translator<'a, S, T = String, O = String> {
    source: S,
    constructor: MessageConstructor<'a, T, O>,
    values: Values<'a, T>,
    defaults: Values<'a, T>,
}

impl<'a, S: MessageSource> Translator<'a, S> {
    /// Creates a string translator which joins formatted chunks.
    pub fn new(source: S) -> Self {
        Self::builder(source).build()
    }

    pub fn builder(source: S) -> TranslatorBuilder<'a, S> {
        TranslatorBuilder::new(source, |chunks: Vec<String>| chunks.concat())
    }
}

impl<'a, S, T, O> Translator<'a, S, T, O>
where
    S: MessageSource,
    T: Markup + 'a,
{
    /// Formats the message stored under `key`.
    pub fn get_message(&self, key: &str, params: &Values<'_, T>) -> Result<O, Error> {
        let (message, _) = self.resolve(key)?;
        let ast = parse(&message)?;
        let formatted = format_layered(&ast, &[params, &self.values, &self.defaults])?;
        Ok((self.constructor)(formatted))
    }

    /// Formats the plural form of the message stored under `key` applying to `number`.
    ///
    /// The form is selected with the locale of whichever source supplied the message.
    pub fn get_plural(&self, key: &str, number: u64, params: &Values<'_, T>) -> Result<O, Error> {
        let (message, locale) = self.resolve(key)?;
        let form = get_form(&message, number, &locale, key)?;
        let ast = parse(&form)?;
        let count = Values::new().with_text(COUNT_PLACEHOLDER, number);
        let formatted = format_layered(&ast, &[params, &self.values, &count, &self.defaults])?;
        Ok((self.constructor)(formatted))
    }

    /// Returns the source this translator reads from.
    pub fn source(&self) -> &S {
        &self.source
    }

    fn resolve(&self, key: &str) -> Result<(String, String), Error> {
        if let Some(message) = self.source.message(key).filter(|m| !m.is_empty()) {
            return Ok((message, self.source.locale()));
        }

        debug!(key, "message missing for current locale, using base locale");
        match self.source.base_message(key).filter(|m| !m.is_empty()) {
            Some(message) => Ok((message, self.source.base_locale())),
            None => Err(Error::MessageNotFound(key.to_string())),
        }
    }
}

/// Builder for [`Translator`].
///
/// ```rust
/// # use langmarkup::{MessageSource, Translator, Value, Values};
/// # struct Source;
/// # impl MessageSource for Source {
/// #     fn message(&self, _: &str) -> Option<String> { Some("<bold>hi</bold> %who%".to_string()) }
/// #     fn locale(&self) -> String { "en".to_string() }
/// #     fn base_message(&self, _: &str) -> Option<String> { None }
/// #     fn base_locale(&self) -> String { "en".to_string() }
/// # }
/// let translator = Translator::builder(Source)
///     .default_tag("bold", "b")
///     .value("who", Value::text("you"))
///     .build();
/// assert_eq!(translator.get_message("greeting", &Values::new())?, "<b>hi</b> you");
/// # Ok::<(), langmarkup::Error>(())
/// ```
pub struct TranslatorBuilder<'a, S, T = String, O = String> {
    source: S,
    constructor: MessageConstructor<'a, T, O>,
    values: Values<'a, T>,
    default_tags: Vec<(String, String)>,
    override_defaults: bool,
}

impl<'a, S, T, O> TranslatorBuilder<'a, S, T, O>
where
    S: MessageSource,
    T: Markup + 'a,
{
    /// Creates a builder with a custom message constructor.
    pub fn new(source: S, constructor: impl Fn(Vec<T>) -> O + 'a) -> Self {
        Self {
            source,
            constructor: Box::new(constructor),
            values: Values::new(),
            default_tags: Vec::new(),
            override_defaults: false,
        }
    }

    /// Adds a value used by every call, overridden by call parameters.
    pub fn value(mut self, name: impl Into<String>, value: Value<'a, T>) -> Self {
        self.values.insert(name, value);
        self
    }

    /// Renders `<key>` by default as the `element` built by [`Markup::element`].
    pub fn default_tag(mut self, key: impl Into<String>, element: impl Into<String>) -> Self {
        self.default_tags.push((key.into(), element.into()));
        self
    }

    /// Drops the built-in renderers for `p b strong tt s i`, keeping only custom default tags.
    pub fn override_defaults(mut self, override_defaults: bool) -> Self {
        self.override_defaults = override_defaults;
        self
    }

    pub fn build(self) -> Translator<'a, S, T, O> {
        let mut defaults = if self.override_defaults {
            Values::new()
        } else {
            default_values()
        };
        for (key, element) in self.default_tags {
            defaults.insert(
                key,
                Value::render(move |children: T| T::element(&element, children)),
            );
        }

        Translator {
            source: self.source,
            constructor: self.constructor,
            values: self.values,
            defaults,
        }
    }
}
