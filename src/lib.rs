//! Build markup trees with function calls and render them to a string.
//!
//! ```
//! use aitch::{attrs, el, text};
//!
//! let link = el!(r#"a.nav[href="/"]"#, attrs! { "title" => "Home" }, text("Home & away"));
//! assert!(link.render().starts_with("<a "));
//! assert!(link.render().ends_with(">Home &amp; away</a>"));
//! ```

/// Attribute values and the mergeable attribute container
pub mod attributes;
/// Construction helpers
mod builder;
/// Element tree and rendering
pub mod node;

pub use attributes::{Attributes, Value};
pub use builder::{comment, each, element, fragment, raw, render, text, when, when_else};
pub use node::{Content, Datum, Node};

/// Build an [`Attributes`] from `name => value` pairs
#[macro_export]
macro_rules! attrs {
    ($($name:expr => $value:expr),* $(,)?) => {{
        let attributes = $crate::Attributes::new();
        $(let attributes = attributes.set($name, $value);)*
        attributes
    }};
}

/// `el!(selector, data...)`, see [`element`]
#[macro_export]
macro_rules! el {
    ($selector:expr $(, $data:expr)* $(,)?) => {{
        let data: ::std::vec::Vec<$crate::Datum> = ::std::vec![$($crate::Datum::from($data)),*];
        $crate::element($selector, data)
    }};
}

/// `frag!(data...)`, see [`fragment`]
#[macro_export]
macro_rules! frag {
    ($($data:expr),* $(,)?) => {{
        let data: ::std::vec::Vec<$crate::Datum> = ::std::vec![$($crate::Datum::from($data)),*];
        $crate::fragment(data)
    }};
}

#[cfg(test)]
mod tests;
