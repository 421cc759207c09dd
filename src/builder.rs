use crate::attributes::Attributes;
use crate::node::{Content, Datum, Node};
use tracing::trace;

/// Build an element from a selector such as `a#home.nav[href="/"]`,
/// then fold `data` into it left to right.
///
/// An empty selector builds a fragment.
pub fn element<I>(selector: &str, data: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Datum>,
{
    let parsed = selector::parse(selector);
    trace!(selector, tag = %parsed.tag, "Building element");
    let mut node = Node::new(parsed.tag);
    for part in parsed.parts {
        node.push(Datum::Attributes(Attributes::from(part)));
    }
    fold(node, data)
}

/// Group `data` without any wrapping tag
pub fn fragment<I>(data: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Datum>,
{
    fold(Node::default(), data)
}

fn fold<I>(mut node: Node, data: I) -> Node
where
    I: IntoIterator,
    I::Item: Into<Datum>,
{
    for datum in data {
        node.push(datum.into());
    }
    node
}

pub fn text(content: impl Into<String>) -> Content {
    Content::Text(content.into())
}

/// Markup written exactly as given. The caller is responsible for its safety.
pub fn raw(content: impl Into<String>) -> Content {
    Content::Raw(content.into())
}

pub fn comment(content: impl Into<String>) -> Content {
    Content::Comment(content.into())
}

/// `data` when `cond` holds, otherwise an empty fragment.
/// `data` is only built when it is used.
pub fn when<D, F>(cond: bool, data: F) -> Datum
where
    D: Into<Datum>,
    F: FnOnce() -> D,
{
    if cond {
        data().into()
    } else {
        Node::default().into()
    }
}

pub fn when_else<D, E, F, G>(cond: bool, data_if: F, data_else: G) -> Datum
where
    D: Into<Datum>,
    E: Into<Datum>,
    F: FnOnce() -> D,
    G: FnOnce() -> E,
{
    if cond {
        data_if().into()
    } else {
        data_else().into()
    }
}

/// Call `f` with each item and its index, collecting the results into one fragment
pub fn each<I, D, F>(items: I, mut f: F) -> Datum
where
    I: IntoIterator,
    D: Into<Datum>,
    F: FnMut(usize, I::Item) -> D,
{
    fragment(items.into_iter().enumerate().map(|(i, item)| f(i, item))).into()
}

pub fn render(node: &Node) -> String {
    node.render()
}
