use askama_escape::{escape, Html};
use selector::Part;
use std::collections::HashMap;
use std::fmt::{self, Display};
use tracing::debug;

/// An attribute value as supplied by a caller.
///
/// `Classes` and `Styles` are the nested forms of `class` and `style`;
/// `Absent` asks for the attribute to be left out of this merge.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Absent,
    Bool(bool),
    Text(String),
    Classes(HashMap<String, bool>),
    Styles(HashMap<String, String>),
}

impl Value {
    /// Class names mapped to whether they are active
    pub fn classes<K: Into<String>>(classes: impl IntoIterator<Item = (K, bool)>) -> Self {
        Value::Classes(classes.into_iter().map(|(k, on)| (k.into(), on)).collect())
    }

    /// CSS properties mapped to their values
    pub fn styles<K, V>(styles: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Value::Styles(styles.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(o: Option<T>) -> Self {
        o.map_or(Value::Absent, Into::into)
    }
}

macro_rules! value_from_display {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Text(v.to_string())
            }
        })*
    };
}

value_from_display!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

/// Attributes of an element, keyed by name.
///
/// `class` and `style` are always held in their nested form so that repeated
/// contributions accumulate; every other name is last-writer-wins. Rendering
/// order is unspecified.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Attributes(HashMap<String, Value>);

impl Attributes {
    pub fn new() -> Self {
        Self(HashMap::new())
    }

    /// Merge a single attribute into the container
    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name.into(), value.into());
        self
    }

    pub fn class(self, value: impl Into<Value>) -> Self {
        self.set("class", value)
    }

    pub fn style(self, value: impl Into<Value>) -> Self {
        self.set("style", value)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Apply every entry of `other` on top of these attributes
    pub fn merge(&mut self, other: Attributes) {
        for (name, value) in other.0 {
            self.insert(name, value);
        }
    }

    fn insert(&mut self, name: String, value: Value) {
        match (name.as_str(), value) {
            (_, Value::Absent) => {}
            ("class", value) => self.merge_classes(value),
            ("style", value) => self.merge_styles(value),
            (_, value) => {
                self.0.insert(name, value);
            }
        }
    }

    fn merge_classes(&mut self, value: Value) {
        let incoming: Vec<(String, bool)> = match value {
            Value::Text(text) => text
                .split_whitespace()
                .map(|class| (class.to_string(), true))
                .collect(),
            Value::Classes(classes) => classes.into_iter().collect(),
            other => {
                debug!(value = ?other, "Ignoring unsupported class value");
                return;
            }
        };
        let entry = self
            .0
            .entry("class".to_string())
            .or_insert_with(|| Value::Classes(HashMap::new()));
        if let Value::Classes(classes) = entry {
            classes.extend(incoming);
        }
    }

    fn merge_styles(&mut self, value: Value) {
        let incoming: Vec<(String, String)> = match value {
            Value::Text(text) => parse_style(&text),
            Value::Styles(styles) => styles.into_iter().collect(),
            other => {
                debug!(value = ?other, "Ignoring unsupported style value");
                return;
            }
        };
        let entry = self
            .0
            .entry("style".to_string())
            .or_insert_with(|| Value::Styles(HashMap::new()));
        if let Value::Styles(styles) = entry {
            styles.extend(incoming);
        }
    }
}

/// Split `prop: value; prop: value` into pairs. Declarations without a `:`
/// are skipped and the rest are still read.
fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter_map(|decl| match decl.split_once(':') {
            Some((prop, value)) if !prop.trim().is_empty() => {
                Some((prop.trim().to_string(), value.trim().to_string()))
            }
            _ => {
                debug!(declaration = decl, "Skipping malformed style declaration");
                None
            }
        })
        .collect()
}

#[cfg(test)]
#[test]
fn test_parse_style() {
    assert_eq!(
        parse_style("color: red; margin:0 ;"),
        vec![
            ("color".to_string(), "red".to_string()),
            ("margin".to_string(), "0".to_string())
        ]
    );
    assert_eq!(
        parse_style("color red; font-size: 2em"),
        vec![("font-size".to_string(), "2em".to_string())]
    );
    assert!(parse_style(" ; :x; ").is_empty());
}

impl From<Part> for Attributes {
    fn from(part: Part) -> Self {
        match part {
            Part::Id(id) => Attributes::new().set("id", id),
            Part::Class(class) => Attributes::new().class(class),
            Part::Attribute { name, value: None } => Attributes::new().set(name, true),
            Part::Attribute {
                name,
                value: Some(value),
            } => Attributes::new().set(name, value),
        }
    }
}

impl Display for Attributes {
    /// Each attribute is written with a leading space; `false` writes nothing
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, value) in &self.0 {
            match value {
                Value::Absent | Value::Bool(false) => {}
                Value::Bool(true) => write!(f, " {}", name)?,
                Value::Text(text) => write!(f, " {}=\"{}\"", name, escape(text, Html))?,
                Value::Classes(classes) => {
                    let active: Vec<&str> = classes
                        .iter()
                        .filter(|(_, on)| **on)
                        .map(|(class, _)| class.as_str())
                        .collect();
                    if !active.is_empty() {
                        write!(f, " {}=\"{}\"", name, escape(&active.join(" "), Html))?;
                    }
                }
                Value::Styles(styles) => {
                    if !styles.is_empty() {
                        let declarations: Vec<String> = styles
                            .iter()
                            .map(|(prop, value)| format!("{}: {};", prop, value))
                            .collect();
                        write!(f, " {}=\"{}\"", name, escape(&declarations.join(" "), Html))?;
                    }
                }
            }
        }
        Ok(())
    }
}
