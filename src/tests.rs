use super::*;
use std::fmt::Display;
use std::sync::Once;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Attribute order is unspecified, so accept any of `wants`
fn check(node: impl Display, wants: &[&str]) {
    init_logging();
    let got = node.to_string();
    assert!(
        wants.contains(&got.as_str()),
        "got '{}', want one of {:?}",
        got,
        wants
    );
}

// Rendering

#[test]
fn test_render_element() {
    check(el!("span"), &["<span />"]);
}

#[test]
fn test_render_raw() {
    check(raw("aitch best templating <div />"), &["aitch best templating <div />"]);
    check(raw("<div>"), &["<div>"]);
}

#[test]
fn test_render_escaped_text() {
    check(text("hi! <div>Hmmm</div>"), &["hi! &lt;div&gt;Hmmm&lt;/div&gt;"]);
    check(text("<div>"), &["&lt;div&gt;"]);
    check(text("fish & \"chips\""), &["fish &amp; &quot;chips&quot;"]);
}

#[test]
fn test_render_fragment() {
    check(frag!(el!("span"), text("woohoo!!")), &["<span />woohoo!!"]);
    check(frag!(), &[""]);
}

#[test]
fn test_render_comment() {
    check(el!("span", comment("woohoo!!")), &["<span><!-- woohoo!! --></span>"]);
}

#[test]
fn test_render_twice_is_identical() {
    let node = el!("ul.list", el!("li", text("a")), el!("li", raw("<b>b</b>")));
    assert_eq!(node.render(), node.render());
    assert_eq!(render(&node), node.to_string());
}

// Attributes

#[test]
fn test_render_attribute() {
    check(
        el!("img", attrs! { "src" => "/path/image.png" }),
        &[r#"<img src="/path/image.png" />"#],
    );
}

#[test]
fn test_render_boolean_attributes() {
    check(el!("div", attrs! { "hidden" => true }), &["<div hidden />"]);
    check(el!("div", attrs! { "hidden" => false }), &["<div />"]);
    check(
        el!("div", attrs! { "hidden" => true }, attrs! { "hidden" => false }),
        &["<div />"],
    );
    check(
        el!("div", attrs! { "hidden" => true }, attrs! { "hidden" => true }),
        &["<div hidden />"],
    );
}

#[test]
fn test_absent_attribute_is_skipped() {
    let title: Option<&str> = None;
    check(
        el!("div", attrs! { "id" => "x" }, attrs! { "id" => title }),
        &[r#"<div id="x" />"#],
    );
    check(el!("div", attrs! { "title" => Some("hi") }), &[r#"<div title="hi" />"#]);
}

#[test]
fn test_other_values_coerced_to_text() {
    check(
        el!("input", attrs! { "maxlength" => 12, "step" => 0.5 }),
        &[
            r#"<input maxlength="12" step="0.5" />"#,
            r#"<input step="0.5" maxlength="12" />"#,
        ],
    );
}

#[test]
fn test_attribute_values_are_escaped() {
    check(
        el!("a", attrs! { "href" => "/?a=1&b=\"2\"" }),
        &[r#"<a href="/?a=1&amp;b=&quot;2&quot;" />"#],
    );
}

#[test]
fn test_render_multiple_attributes_separate_arguments() {
    check(
        el!("a", attrs! { "aria-hidden" => "true" }, attrs! { "href" => "#some-heading" }),
        &[
            r##"<a aria-hidden="true" href="#some-heading" />"##,
            r##"<a href="#some-heading" aria-hidden="true" />"##,
        ],
    );
}

#[test]
fn test_last_attribute_wins() {
    check(
        el!("a", attrs! { "href" => "/one" }, attrs! { "href" => "/two" }),
        &[r#"<a href="/two" />"#],
    );
}

#[test]
fn test_merge_consecutive_class_attributes() {
    check(
        el!("div", attrs! { "class" => "big" }, attrs! { "class" => "green" }),
        &[r#"<div class="big green" />"#, r#"<div class="green big" />"#],
    );
    check(
        el!("div", attrs! { "class" => "big" }, attrs! { "class" => "big" }),
        &[r#"<div class="big" />"#],
    );
}

#[test]
fn test_class_map() {
    check(
        el!(
            "div.card",
            attrs! { "class" => Value::classes([("active", true), ("disabled", false)]) }
        ),
        &[r#"<div class="card active" />"#, r#"<div class="active card" />"#],
    );
    check(
        el!("div.card", attrs! { "class" => Value::classes([("card", false)]) }),
        &["<div />"],
    );
}

#[test]
fn test_merge_style_attributes() {
    check(
        el!("p", attrs! { "style" => "color: red" }, attrs! { "style" => "color:blue" }),
        &[r#"<p style="color: blue;" />"#],
    );
    check(
        el!(
            "p",
            attrs! { "style" => "color: red" },
            Attributes::new().style(Value::styles([("margin", "0")]))
        ),
        &[
            r#"<p style="color: red; margin: 0;" />"#,
            r#"<p style="margin: 0; color: red;" />"#,
        ],
    );
}

#[test]
fn test_malformed_style_segment_is_skipped() {
    check(
        el!("p", attrs! { "style" => "bogus; color: red" }),
        &[r#"<p style="color: red;" />"#],
    );
    let node = el!("p", attrs! { "style" => "bogus" });
    assert_eq!(node.render(), "<p />");
    assert!(node.attributes().get("class").is_none());
}

// Selectors

#[test]
fn test_class_selector() {
    check(el!("div.test"), &[r#"<div class="test" />"#]);
}

#[test]
fn test_id_selector() {
    check(el!("div#test"), &[r#"<div id="test" />"#]);
}

#[test]
fn test_default_selector_tag() {
    check(el!(".test"), &[r#"<div class="test" />"#]);
}

#[test]
fn test_only_add_first_id() {
    check(el!("div#test#test2"), &[r#"<div id="test" />"#]);
}

#[test]
fn test_id_and_class_selector() {
    let wants = [
        r#"<div id="test" class="test2" />"#,
        r#"<div class="test2" id="test" />"#,
    ];
    check(el!("div#test.test2"), &wants);
    check(el!("div.test2#test"), &wants);
}

#[test]
fn test_multiple_classes_selector() {
    check(
        el!("div.test.test2"),
        &[r#"<div class="test test2" />"#, r#"<div class="test2 test" />"#],
    );
}

#[test]
fn test_classes_selector_and_class_attribute() {
    check(
        el!("div.test", attrs! { "class" => "test2" }),
        &[r#"<div class="test test2" />"#, r#"<div class="test2 test" />"#],
    );
}

#[test]
fn test_render_custom_attributes() {
    check(el!(r#"div[test="thing"]"#), &[r#"<div test="thing" />"#]);
    check(
        el!(r#"div[test="thing"][test2='thing']"#),
        &[
            r#"<div test="thing" test2="thing" />"#,
            r#"<div test2="thing" test="thing" />"#,
        ],
    );
    check(el!("div[test]"), &["<div test />"]);
}

#[test]
fn test_compacts_selector() {
    check(
        el!(
            r#"div
            .test
            [test2="thing"]
        "#
        ),
        &[
            r#"<div class="test" test2="thing" />"#,
            r#"<div test2="thing" class="test" />"#,
        ],
    );
}

#[test]
fn test_empty_selector_is_fragment() {
    check(el!("", el!("b"), text("x")), &["<b />x"]);
}

// Nesting

#[test]
fn test_render_child_elements() {
    check(el!("div", el!("div", el!("div"))), &["<div><div><div /></div></div>"]);
}

#[test]
fn test_render_child_text() {
    check(el!("div", text("Hello!!")), &["<div>Hello!!</div>"]);
}

#[test]
fn test_prevent_self_closing_with_empty_children() {
    check(el!("div", text("")), &["<div></div>"]);
    check(el!("div", frag!()), &["<div></div>"]);
}

#[test]
fn test_children_keep_order() {
    let node = el!("p", text("a"), el!("br"), text("b"), comment("c"));
    assert_eq!(node.children().len(), 4);
    check(node, &["<p>a<br />b<!-- c --></p>"]);
}

// Conditional rendering

#[test]
fn test_when() {
    check(el!("div", when(true, || el!("span"))), &["<div><span /></div>"]);
    check(el!("div", when(false, || el!("span"))), &["<div></div>"]);
    check(frag!(when(false, || text("never"))), &[""]);
}

#[test]
fn test_when_is_lazy() {
    let mut built = false;
    let _ = when(false, || {
        built = true;
        el!("span")
    });
    assert!(!built);
}

#[test]
fn test_when_attributes() {
    check(
        el!("button", when(true, || attrs! { "disabled" => true })),
        &["<button disabled />"],
    );
    check(
        el!("button", when(false, || attrs! { "disabled" => true })),
        &["<button></button>"],
    );
}

#[test]
fn test_when_else() {
    check(
        el!("div", when_else(true, || el!("span"), || el!("div"))),
        &["<div><span /></div>"],
    );
    check(
        el!("div", when_else(false, || el!("span"), || text("no"))),
        &["<div>no</div>"],
    );
}

#[test]
fn test_each() {
    let names = ["Jon", "Lawrie", "Jade"];
    check(
        el!("div", each(names, |_, name| el!("span", text(name)))),
        &["<div><span>Jon</span><span>Lawrie</span><span>Jade</span></div>"],
    );
    check(
        frag!(each(["a", "b"], |_, item| el!("li", text(item)))),
        &["<li>a</li><li>b</li>"],
    );
    check(
        frag!(each(["x", "y"], |i, item| text(format!("{}{}", i, item)))),
        &["0x1y"],
    );
}

#[test]
fn test_each_empty() {
    let items: Vec<String> = vec![];
    check(frag!(each(items, |_, item| text(item))), &[""]);
    check(el!("ul", each(Vec::<&str>::new(), |_, item| text(item))), &["<ul></ul>"]);
}

#[test]
fn test_example_html() {
    let img_src = "/logo.png";
    check(
        frag!(
            el!("!DOCTYPE[html]"),
            el!(
                r#"html[lang="en"]"#,
                el!("head", el!("title", text("Example HTML"))),
                el!(
                    "body",
                    el!(
                        "header",
                        el!(".container", el!("img", attrs! { "src" => img_src, "alt" => "" }))
                    ),
                    el!("main", el!("div", el!("h1#title", text("Title goes here")))),
                    el!("footer", el!(r#"a[href="/"]"#, text("Home")))
                )
            )
        ),
        &[
            r#"<!DOCTYPE html /><html lang="en"><head><title>Example HTML</title></head><body><header><div class="container"><img src="/logo.png" alt="" /></div></header><main><div><h1 id="title">Title goes here</h1></div></main><footer><a href="/">Home</a></footer></body></html>"#,
            r#"<!DOCTYPE html /><html lang="en"><head><title>Example HTML</title></head><body><header><div class="container"><img alt="" src="/logo.png" /></div></header><main><div><h1 id="title">Title goes here</h1></div></main><footer><a href="/">Home</a></footer></body></html>"#,
        ],
    );
}
