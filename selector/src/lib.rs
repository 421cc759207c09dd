//! Parser for the compact `tag#id.class[attr=value]` selector language used
//! to describe an element and its initial attributes in a single string.

use tracing::{trace, warn};

/// Tag used when a selector names attributes but no tag.
pub const DEFAULT_TAG: &str = "div";

/// A parsed selector. An empty `tag` denotes a fragment.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Selector {
    pub tag: String,
    pub parts: Vec<Part>,
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Part {
    // #name
    Id(String),
    // .name
    Class(String),
    // [name] or [name=value]
    Attribute { name: String, value: Option<String> },
}

#[macro_export]
macro_rules! part {
    (#$x:expr) => {
        $crate::Part::Id($x.to_string())
    };
    (.$x:expr) => {
        $crate::Part::Class($x.to_string())
    };
    ([$name:expr]) => {
        $crate::Part::Attribute {
            name: $name.to_string(),
            value: None,
        }
    };
    ([$name:expr => $value:expr]) => {
        $crate::Part::Attribute {
            name: $name.to_string(),
            value: Some($value.to_string()),
        }
    };
}

impl Selector {
    pub fn is_fragment(&self) -> bool {
        self.tag.is_empty()
    }

    pub fn id(&self) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Id(id) => Some(id.as_str()),
            _ => None,
        })
    }
}

/// Parse a selector, removing all whitespace first so selectors may be
/// spread over several indented lines.
///
/// Never fails: input the grammar cannot consume is logged and ignored.
pub fn parse(input: &str) -> Selector {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Selector::default();
    }
    match parsing::selector(&compact) {
        Ok((rest, selector)) => {
            if !rest.is_empty() {
                warn!(selector = %compact, ignored = %rest, "Unparsed selector input");
            }
            trace!(selector = %compact, tag = %selector.tag, parts = selector.parts.len(), "Parsed selector");
            selector
        }
        Err(err) => {
            warn!(selector = %compact, "Could not parse selector: {}", err);
            Selector {
                tag: DEFAULT_TAG.to_string(),
                parts: vec![],
            }
        }
    }
}

mod parsing;
