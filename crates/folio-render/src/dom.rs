//! Host document model.
//!
//! A light-weight, lossless view over the host HTML page. Elements are located
//! by scanning start tags; writes splice the page source in place, so every
//! byte the loaders do not touch is preserved exactly as authored.

use std::fmt::Write as _;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Matches a start or end tag. Quoted attribute values may contain `>`.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<(/?)([a-zA-Z][a-zA-Z0-9-]*)((?:"[^"]*"|'[^']*'|[^'">])*)>"#)
        .expect("Invalid tag regex")
});

/// Matches `name`, `name="v"`, `name='v'` or `name=v`.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("Invalid attribute regex")
});

/// Comments, and the bodies of raw-text elements, whose contents are not
/// markup.
static OPAQUE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?is)(<!--.*?(?:-->|\z))|<(?:script|style|textarea)\b(?:"[^"]*"|'[^']*'|[^'">])*>(.*?)(?:</(?:script|style|textarea)\s*>|\z)"#,
    )
    .expect("Invalid opaque range regex")
});

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Selects one element of the host document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector<'a> {
    /// Element with the given `id` attribute
    Id(&'a str),
    /// `<meta name="...">` tag
    Meta(&'a str),
    /// The n-th (0-indexed) element with the given tag name
    Tag(&'a str, usize),
}

impl<'a> From<&'a str> for Selector<'a> {
    fn from(id: &'a str) -> Self {
        Selector::Id(id)
    }
}

#[derive(Debug, Clone)]
struct Attribute {
    name: String,
    /// Raw (still escaped) value
    value: Option<String>,
}

#[derive(Debug, Clone)]
struct Element {
    name: String,
    open: Range<usize>,
    attrs: Vec<Attribute>,
    self_closing: bool,
    /// Byte range between the start and end tag; `None` for void elements and
    /// unclosed tags.
    content: Option<Range<usize>>,
}

impl Element {
    fn attr(&self, name: &str) -> Option<&Attribute> {
        self.attrs
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(name))
    }
}

/// The page the section loaders render into.
#[derive(Debug, Clone, PartialEq)]
pub struct HostDocument {
    html: String,
}

impl HostDocument {
    /// Wrap an HTML page. Parsing never fails; unrecognized markup is kept
    /// verbatim.
    pub fn parse(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Current page source.
    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }

    /// Whether the selected element exists.
    pub fn contains<'s>(&self, selector: impl Into<Selector<'s>>) -> bool {
        self.find(selector.into()).is_some()
    }

    /// Number of elements with the given tag name.
    pub fn count(&self, tag: &str) -> usize {
        let opaque = opaque_ranges(&self.html);
        TAG_RE
            .captures_iter(&self.html)
            .filter(|caps| caps[1].is_empty() && caps[2].eq_ignore_ascii_case(tag))
            .filter(|caps| caps.get(0).is_some_and(|m| !is_opaque(&opaque, m.start())))
            .count()
    }

    /// Markup between the element's start and end tag.
    pub fn inner_html<'s>(&self, selector: impl Into<Selector<'s>>) -> Option<&str> {
        let element = self.find(selector.into())?;
        element.content.map(|range| &self.html[range])
    }

    /// Text of the element with all tags stripped and entities decoded.
    pub fn text_content<'s>(&self, selector: impl Into<Selector<'s>>) -> Option<String> {
        let inner = self.inner_html(selector)?;
        Some(unescape_html(&TAG_RE.replace_all(inner, "")))
    }

    /// Replace the element's children with `markup`.
    ///
    /// Returns `false` when the element is absent or cannot hold children.
    pub fn set_inner_html<'s>(&mut self, selector: impl Into<Selector<'s>>, markup: &str) -> bool {
        let Some(range) = self.find(selector.into()).and_then(|e| e.content) else {
            return false;
        };
        self.html.replace_range(range, markup);
        true
    }

    /// Replace the element's children with escaped text.
    pub fn set_text<'s>(&mut self, selector: impl Into<Selector<'s>>, text: &str) -> bool {
        self.set_inner_html(selector, &escape_html(text))
    }

    /// Decoded attribute value.
    pub fn attribute<'s>(&self, selector: impl Into<Selector<'s>>, name: &str) -> Option<String> {
        let element = self.find(selector.into())?;
        let attr = element.attr(name)?;
        Some(attr.value.as_deref().map(unescape_html).unwrap_or_default())
    }

    /// Set (or add) an attribute on the element's start tag.
    pub fn set_attribute<'s>(
        &mut self,
        selector: impl Into<Selector<'s>>,
        name: &str,
        value: &str,
    ) -> bool {
        let Some(mut element) = self.find(selector.into()) else {
            return false;
        };

        let escaped = escape_html(value);
        match element
            .attrs
            .iter_mut()
            .find(|a| a.name.eq_ignore_ascii_case(name))
        {
            Some(attr) => attr.value = Some(escaped),
            None => element.attrs.push(Attribute {
                name: name.to_string(),
                value: Some(escaped),
            }),
        }

        self.rewrite_start_tag(&element);
        true
    }

    /// Classes of the element, in document order.
    pub fn classes<'s>(&self, selector: impl Into<Selector<'s>>) -> Vec<String> {
        self.attribute(selector, "class")
            .map(|c| c.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_class<'s>(&self, selector: impl Into<Selector<'s>>, class: &str) -> bool {
        self.classes(selector).iter().any(|c| c == class)
    }

    /// Add a class. Returns `false` when the element is absent.
    pub fn add_class<'s>(&mut self, selector: impl Into<Selector<'s>>, class: &str) -> bool {
        let selector = selector.into();
        if !self.contains(selector) {
            return false;
        }
        let mut classes = self.classes(selector);
        if classes.iter().any(|c| c == class) {
            return true;
        }
        classes.push(class.to_string());
        self.set_attribute(selector, "class", &classes.join(" "))
    }

    /// Remove a class. Returns `false` when the element is absent.
    pub fn remove_class<'s>(&mut self, selector: impl Into<Selector<'s>>, class: &str) -> bool {
        let selector = selector.into();
        if !self.contains(selector) {
            return false;
        }
        let classes = self.classes(selector);
        if !classes.iter().any(|c| c == class) {
            return true;
        }
        let kept: Vec<String> = classes.into_iter().filter(|c| c != class).collect();
        self.set_attribute(selector, "class", &kept.join(" "))
    }

    /// Toggle a class, returning whether it is now present.
    pub fn toggle_class<'s>(
        &mut self,
        selector: impl Into<Selector<'s>>,
        class: &str,
    ) -> Option<bool> {
        let selector = selector.into();
        if !self.contains(selector) {
            return None;
        }
        if self.has_class(selector, class) {
            self.remove_class(selector, class);
            Some(false)
        } else {
            self.add_class(selector, class);
            Some(true)
        }
    }

    /// Value of one inline style property.
    pub fn style_property<'s>(
        &self,
        selector: impl Into<Selector<'s>>,
        property: &str,
    ) -> Option<String> {
        let style = self.attribute(selector, "style")?;
        parse_style(&style)
            .into_iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
            .map(|(_, value)| value)
    }

    /// Set one inline style property, keeping the others.
    pub fn set_style_property<'s>(
        &mut self,
        selector: impl Into<Selector<'s>>,
        property: &str,
        value: &str,
    ) -> bool {
        let selector = selector.into();
        if !self.contains(selector) {
            return false;
        }

        let mut declarations = self
            .attribute(selector, "style")
            .map(|s| parse_style(&s))
            .unwrap_or_default();

        match declarations
            .iter_mut()
            .find(|(name, _)| name.eq_ignore_ascii_case(property))
        {
            Some(declaration) => declaration.1 = value.to_string(),
            None => declarations.push((property.to_string(), value.to_string())),
        }

        let style = declarations
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect::<Vec<_>>()
            .join("; ");
        self.set_attribute(selector, "style", &style)
    }

    /// Insert markup right before `</body>`, or at the end of the page when
    /// there is no body end tag.
    pub fn insert_before_body_end(&mut self, markup: &str) {
        let position = self
            .html
            .to_ascii_lowercase()
            .rfind("</body>")
            .unwrap_or(self.html.len());
        self.html.insert_str(position, markup);
    }

    /// Locate the first element matching `selector`.
    fn find(&self, selector: Selector<'_>) -> Option<Element> {
        let opaque = opaque_ranges(&self.html);
        let mut nth = 0;

        for caps in TAG_RE.captures_iter(&self.html) {
            let start = caps.get(0)?.start();
            if !caps[1].is_empty() || is_opaque(&opaque, start) {
                continue;
            }
            let name = &caps[2];
            let attrs = parse_attributes(&caps[3]);

            let matched = match selector {
                Selector::Id(id) => attr_equals(&attrs, "id", id),
                Selector::Meta(meta) => {
                    name.eq_ignore_ascii_case("meta") && attr_equals(&attrs, "name", meta)
                }
                Selector::Tag(tag, index) => {
                    if name.eq_ignore_ascii_case(tag) {
                        nth += 1;
                        nth - 1 == index
                    } else {
                        false
                    }
                }
            };

            if matched {
                let open = caps.get(0)?.range();
                let self_closing = caps[3].trim_end().ends_with('/');
                let is_void = VOID_ELEMENTS.iter().any(|v| name.eq_ignore_ascii_case(v));
                let content = if self_closing || is_void {
                    None
                } else {
                    self.find_close(name, open.end, &opaque)
                        .map(|close_start| open.end..close_start)
                };

                return Some(Element {
                    name: name.to_string(),
                    open,
                    attrs,
                    self_closing,
                    content,
                });
            }
        }

        None
    }

    /// Find the start of the end tag matching an element opened before `from`,
    /// handling nested elements of the same name.
    fn find_close(&self, name: &str, from: usize, opaque: &[Range<usize>]) -> Option<usize> {
        let mut depth = 1;

        for caps in TAG_RE.captures_iter(&self.html[from..]) {
            let whole = caps.get(0)?;
            if !caps[2].eq_ignore_ascii_case(name) || is_opaque(opaque, from + whole.start()) {
                continue;
            }
            if caps[1].is_empty() {
                if !caps[3].trim_end().ends_with('/') {
                    depth += 1;
                }
            } else {
                depth -= 1;
                if depth == 0 {
                    return Some(from + whole.start());
                }
            }
        }

        None
    }

    fn rewrite_start_tag(&mut self, element: &Element) {
        let mut tag = format!("<{}", element.name);
        for attr in &element.attrs {
            match &attr.value {
                Some(value) => {
                    let _ = write!(tag, " {}=\"{}\"", attr.name, value);
                }
                None => {
                    let _ = write!(tag, " {}", attr.name);
                }
            }
        }
        tag.push_str(if element.self_closing { " />" } else { ">" });

        self.html.replace_range(element.open.clone(), &tag);
    }
}

/// Byte ranges of comments and raw-text element bodies. Tags starting inside
/// them are ignored.
fn opaque_ranges(html: &str) -> Vec<Range<usize>> {
    OPAQUE_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1).or_else(|| caps.get(2)).map(|m| m.range()))
        .collect()
}

fn is_opaque(ranges: &[Range<usize>], position: usize) -> bool {
    ranges.iter().any(|range| range.contains(&position))
}

fn parse_attributes(raw: &str) -> Vec<Attribute> {
    let raw = raw.trim_end().trim_end_matches('/');

    ATTR_RE
        .captures_iter(raw)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_string();
            let value = if let Some(m) = caps.get(2) {
                Some(m.as_str().to_string())
            } else if let Some(m) = caps.get(3) {
                // Re-quoted with double quotes on rewrite
                Some(m.as_str().replace('"', "&quot;"))
            } else {
                caps.get(4).map(|m| m.as_str().to_string())
            };
            Some(Attribute { name, value })
        })
        .collect()
}

fn attr_equals(attrs: &[Attribute], name: &str, expected: &str) -> bool {
    attrs.iter().any(|a| {
        a.name.eq_ignore_ascii_case(name)
            && a.value.as_deref().map(unescape_html).as_deref() == Some(expected)
    })
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Escape HTML special characters, including quotes for attribute contexts.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Decode the entities produced by [`escape_html`] plus common variants.
pub fn unescape_html(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Loading</title>
  <meta name="description" content="">
  <meta name="author" content="">
</head>
<body>
  <nav><span id="nav-brand">Brand</span><ul id="nav-menu" class="nav-menu"></ul></nav>
  <section id="hero"><div id="hero-cta"><div class="inner"><div>nested</div></div></div></section>
  <section><p id='quoted' data-x="a > b">Quote</p></section>
  <button id="back-to-top" style="display: none">Top</button>
</body>
</html>"#;

    fn page() -> HostDocument {
        HostDocument::parse(PAGE)
    }

    #[test]
    fn ignores_elements_inside_comments() {
        let mut doc = HostDocument::parse(
            "<!-- old: <p id=\"footer-text\">legacy</p> -->\n<p id=\"footer-text\">placeholder</p>",
        );

        assert!(doc.set_text("footer-text", "Bye"));

        assert_eq!(
            doc.html(),
            "<!-- old: <p id=\"footer-text\">legacy</p> -->\n<p id=\"footer-text\">Bye</p>"
        );
    }

    #[test]
    fn close_tags_inside_comments_do_not_end_element() {
        let mut doc =
            HostDocument::parse(r#"<div id="work-grid"><!-- </div> --><p>Loading</p></div><p>after</p>"#);

        assert!(doc.set_inner_html("work-grid", "<div class=\"work-card\"></div>"));

        assert_eq!(
            doc.html(),
            r#"<div id="work-grid"><div class="work-card"></div></div><p>after</p>"#
        );
    }

    #[test]
    fn raw_text_bodies_are_not_markup() {
        let doc = HostDocument::parse(
            r#"<script id="boot">document.write("<section id='x'></section>");</script>
<style>/* <section> */</style>
<section id="real"></section>
<!-- <section></section> -->"#,
        );

        assert_eq!(doc.count("section"), 1);
        assert!(!doc.contains("x"));
        assert!(doc.contains("real"));
        assert_eq!(
            doc.inner_html("boot"),
            Some(r#"document.write("<section id='x'></section>");"#)
        );
    }

    #[test]
    fn finds_elements_by_id() {
        let doc = page();

        assert!(doc.contains("nav-brand"));
        assert!(!doc.contains("work-title"));
        assert_eq!(doc.inner_html("nav-brand"), Some("Brand"));
    }

    #[test]
    fn matches_nested_close_tags() {
        let doc = page();

        assert_eq!(
            doc.inner_html("hero-cta"),
            Some(r#"<div class="inner"><div>nested</div></div>"#)
        );
    }

    #[test]
    fn handles_quoted_gt_in_attributes() {
        let doc = page();

        assert_eq!(doc.text_content("quoted").as_deref(), Some("Quote"));
        assert_eq!(doc.attribute("quoted", "data-x").as_deref(), Some("a > b"));
    }

    #[test]
    fn set_text_escapes_markup() {
        let mut doc = page();

        assert!(doc.set_text("nav-brand", "<b>Jane & Co</b>"));

        assert_eq!(
            doc.inner_html("nav-brand"),
            Some("&lt;b&gt;Jane &amp; Co&lt;/b&gt;")
        );
        assert_eq!(
            doc.text_content("nav-brand").as_deref(),
            Some("<b>Jane & Co</b>")
        );
    }

    #[test]
    fn set_inner_html_preserves_rest_of_page() {
        let mut doc = page();

        doc.set_inner_html("nav-menu", "<li>One</li>");

        assert_eq!(doc.inner_html("nav-menu"), Some("<li>One</li>"));
        assert_eq!(doc.inner_html("nav-brand"), Some("Brand"));
        assert!(doc.html().ends_with("</html>"));
    }

    #[test]
    fn writes_to_absent_elements_are_refused() {
        let mut doc = page();
        let before = doc.html().to_string();

        assert!(!doc.set_text("missing", "x"));
        assert!(!doc.set_attribute("missing", "class", "x"));
        assert_eq!(doc.html(), before);
    }

    #[test]
    fn updates_meta_and_title() {
        let mut doc = page();

        assert!(doc.set_text(Selector::Tag("title", 0), "Jane Doe"));
        assert!(doc.set_attribute(Selector::Meta("author"), "content", "Jane"));

        assert_eq!(
            doc.text_content(Selector::Tag("title", 0)).as_deref(),
            Some("Jane Doe")
        );
        assert_eq!(
            doc.attribute(Selector::Meta("author"), "content").as_deref(),
            Some("Jane")
        );
        assert_eq!(
            doc.attribute(Selector::Meta("description"), "content").as_deref(),
            Some("")
        );
    }

    #[test]
    fn void_elements_hold_no_children() {
        let mut doc = page();

        assert!(doc.contains(Selector::Meta("author")));
        assert!(!doc.set_inner_html(Selector::Meta("author"), "x"));
    }

    #[test]
    fn toggles_classes() {
        let mut doc = page();

        assert_eq!(doc.toggle_class("nav-menu", "active"), Some(true));
        assert_eq!(doc.classes("nav-menu"), vec!["nav-menu", "active"]);
        assert_eq!(doc.toggle_class("nav-menu", "active"), Some(false));
        assert_eq!(doc.classes("nav-menu"), vec!["nav-menu"]);
        assert_eq!(doc.toggle_class("missing", "active"), None);
    }

    #[test]
    fn adds_class_to_nth_tag() {
        let mut doc = page();

        assert_eq!(doc.count("section"), 2);
        assert!(doc.add_class(Selector::Tag("section", 1), "visible"));

        assert!(doc.has_class(Selector::Tag("section", 1), "visible"));
        assert!(!doc.has_class(Selector::Tag("section", 0), "visible"));
        assert_eq!(doc.text_content("quoted").as_deref(), Some("Quote"));
    }

    #[test]
    fn sets_style_properties() {
        let mut doc = page();

        assert_eq!(
            doc.style_property("back-to-top", "display").as_deref(),
            Some("none")
        );
        doc.set_style_property("back-to-top", "display", "flex");
        doc.set_style_property("back-to-top", "opacity", "1");

        assert_eq!(
            doc.attribute("back-to-top", "style").as_deref(),
            Some("display: flex; opacity: 1")
        );
    }

    #[test]
    fn inserts_before_body_end() {
        let mut doc = page();

        doc.insert_before_body_end("<script src=\"x.js\"></script>\n");

        assert!(doc
            .html()
            .contains("<script src=\"x.js\"></script>\n</body>"));
    }

    #[test]
    fn escape_round_trips() {
        let raw = r#"<a href="x">'&'</a>"#;

        assert_eq!(unescape_html(&escape_html(raw)), raw);
    }
}
