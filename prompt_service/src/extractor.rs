//! HTML to plain text.
//!
//! Pages arrive from the browser extension as serialized DOM, sometimes
//! entity-escaped a second time. [`html_to_text`] decodes entities first and
//! only then parses, so markup that appears after decoding is stripped too.
//!
//! Extraction never fails: html5ever recovers from any input, and when the
//! boilerplate filter leaves nothing the page is re-read with only non-text
//! elements removed.

use std::collections::{HashMap, HashSet};

use scraper::{node::Node, ElementRef, Html};

/// Elements whose content is never readable text.
const NON_TEXT_TAGS: &[&str] = &[
    "head", "script", "style", "noscript", "template", "iframe", "svg", "canvas", "object",
    "embed",
];

const BOILERPLATE_TAGS: &[&str] = &["nav", "header", "footer", "aside", "form", "menu"];

const BOILERPLATE_ROLES: &[&str] = &["navigation", "banner", "contentinfo", "complementary", "search"];

/// `id`/`class` tokens (split on `-` and `_`) that mark page chrome.
const BOILERPLATE_MARKERS: &[&str] = &[
    "nav", "navbar", "navigation", "menu", "sidebar", "ad", "ads", "advert", "advertisement",
    "sponsor", "sponsored", "promo", "banner", "cookie", "cookies", "consent", "social", "share",
    "sharing", "breadcrumb", "breadcrumbs", "newsletter", "popup", "modal",
];

/// Containers that never lose their content to a marker match.
const CONTENT_CONTAINERS: &[&str] = &["html", "body", "main", "article"];

/// Chrome tags that belong to the content when nested inside a content root.
const SECTION_CHROME_TAGS: &[&str] = &["header", "footer"];

const BLOCK_TAGS: &[&str] = &[
    "html", "body", "address", "article", "aside", "blockquote", "br", "caption", "dd", "details",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "h1", "h2", "h3", "h4", "h5",
    "h6", "header", "hr", "legend", "li", "main", "nav", "ol", "p", "pre", "section", "summary",
    "table", "tr", "ul",
];

const CELL_TAGS: &[&str] = &["td", "th"];

/// Elements whose text counts towards a container's paragraph score.
const PARAGRAPH_TAGS: &[&str] = &["p", "pre", "blockquote"];

/// Decodes named, decimal and hex character references.
pub fn unescape(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}

/// Unescapes, then extracts the readable text of the page.
pub fn html_to_text(raw: &str) -> String {
    extract(&unescape(raw))
}

/// Returns the readable body text of `html`, one block per line.
///
/// Scripts, styles and page chrome (navigation, ads, banners, footers) are
/// dropped. The result may be empty.
pub fn extract(html: &str) -> String {
    let document = Html::parse_document(html);

    // Ancestors of a content root are kept whatever their class names say.
    let mut guards_content = HashSet::new();
    let roots = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(is_content_root);
    for root in roots {
        for ancestor in root.ancestors() {
            if !guards_content.insert(ancestor.id()) {
                break;
            }
        }
    }

    // Without a content root, the container holding most paragraph text and
    // its ancestors are exempt from class/id marker matches.
    let mut holds_body_text = HashSet::new();
    if guards_content.is_empty() {
        if let Some(block) = densest_text_block(&document) {
            holds_body_text.insert(block.id());
            holds_body_text.extend(block.ancestors().map(|ancestor| ancestor.id()));
        }
    }

    let guards = |element: ElementRef<'_>| {
        if guards_content.contains(&element.id()) {
            Guard::Content
        } else if holds_body_text.contains(&element.id()) {
            Guard::BodyText
        } else {
            Guard::None
        }
    };

    let readable = collect(&document, Pass::Readable, &guards);
    if !readable.is_empty() {
        return readable;
    }

    let lenient = collect(&document, Pass::Lenient, &guards);
    if !lenient.is_empty() {
        tracing::debug!("boilerplate filter removed all text, using lenient extraction");
    }
    lenient
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guard {
    /// A content root's ancestor: never dropped for boilerplate.
    Content,
    /// Holds the page's body text: exempt from class/id markers only.
    BodyText,
    None,
}

/// Returns the element whose direct paragraph children carry the most
/// non-link text. Earlier elements win ties.
fn densest_text_block(document: &Html) -> Option<ElementRef<'_>> {
    let mut scores = HashMap::new();
    for paragraph in document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|element| PARAGRAPH_TAGS.contains(&element.value().name()))
    {
        let score = non_link_chars(paragraph);
        if score == 0 {
            continue;
        }
        if let Some(parent) = paragraph.parent().and_then(ElementRef::wrap) {
            *scores.entry(parent.id()).or_insert(0usize) += score;
        }
    }

    let mut best: Option<(ElementRef<'_>, usize)> = None;
    for element in document.root_element().descendants().filter_map(ElementRef::wrap) {
        if let Some(&score) = scores.get(&element.id()) {
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((element, score));
            }
        }
    }
    best.map(|(element, _)| element)
}

fn non_link_chars(element: ElementRef<'_>) -> usize {
    let chars = |e: ElementRef<'_>| {
        e.text()
            .flat_map(str::split_whitespace)
            .map(|word| word.chars().count())
            .sum::<usize>()
    };
    let linked: usize = element
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| e.value().name() == "a")
        .map(chars)
        .sum();
    chars(element).saturating_sub(linked)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Readable,
    Lenient,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Block,
    Cell,
    Inline,
}

impl Boundary {
    fn of(tag: &str) -> Self {
        if BLOCK_TAGS.contains(&tag) {
            Boundary::Block
        } else if CELL_TAGS.contains(&tag) {
            Boundary::Cell
        } else {
            Boundary::Inline
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct Context {
    /// Inside `main`, `article` or `role="main"`.
    in_content: bool,
    /// Inside `pre`: whitespace is kept as written.
    preformatted: bool,
}

enum Step<'a> {
    Open(ElementRef<'a>, Context),
    Close(Boundary),
    Text(&'a str, bool),
}

// Walks with an explicit stack: the tree builder does not cap nesting depth.
fn collect<F>(document: &Html, pass: Pass, guards: &F) -> String
where
    F: Fn(ElementRef<'_>) -> Guard,
{
    let mut out = TextBuffer::default();
    let mut stack = vec![Step::Open(document.root_element(), Context::default())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text, true) => out.push_preformatted(text),
            Step::Text(text, false) => out.push_text(text),
            Step::Close(boundary) => out.boundary(boundary),
            Step::Open(element, context) => {
                let name = element.value().name();
                let boundary = Boundary::of(name);
                out.boundary(boundary);
                stack.push(Step::Close(boundary));
                let context = Context {
                    in_content: context.in_content || is_content_root(&element),
                    preformatted: context.preformatted || name == "pre",
                };

                let children: Vec<_> = element.children().collect();
                for child in children.into_iter().rev() {
                    match child.value() {
                        Node::Text(text) => {
                            let text: &str = text;
                            stack.push(Step::Text(text, context.preformatted));
                        }
                        Node::Element(_) => {
                            if let Some(child) = ElementRef::wrap(child) {
                                let guard = guards(child);
                                if !is_skipped(child, pass, context.in_content, guard) {
                                    stack.push(Step::Open(child, context));
                                }
                            }
                        }
                        _ => {}
                    }
                }
            }
        }
    }

    out.finish()
}

fn is_content_root(element: &ElementRef<'_>) -> bool {
    let element = element.value();
    matches!(element.name(), "main" | "article")
        || element
            .attr("role")
            .is_some_and(|role| role.trim().eq_ignore_ascii_case("main"))
}

fn is_skipped(element: ElementRef<'_>, pass: Pass, in_content: bool, guard: Guard) -> bool {
    if is_hidden(element) {
        return true;
    }
    if guard == Guard::Content || is_content_root(&element) {
        return false;
    }
    let element = element.value();
    let name = element.name();

    if pass == Pass::Lenient || CONTENT_CONTAINERS.contains(&name) {
        return false;
    }

    let part_of_content = in_content && SECTION_CHROME_TAGS.contains(&name);
    if BOILERPLATE_TAGS.contains(&name) && !part_of_content {
        return true;
    }
    if !part_of_content
        && element
            .attr("role")
            .is_some_and(|role| BOILERPLATE_ROLES.contains(&role.trim().to_ascii_lowercase().as_str()))
    {
        return true;
    }

    if guard == Guard::BodyText {
        return false;
    }
    element.id().into_iter().chain(element.classes()).any(|marker| {
        marker
            .to_ascii_lowercase()
            .split(['-', '_'])
            .any(|token| BOILERPLATE_MARKERS.contains(&token))
    })
}

fn is_hidden(element: ElementRef<'_>) -> bool {
    let element = element.value();
    NON_TEXT_TAGS.contains(&element.name())
        || element.attr("hidden").is_some()
        || element.attr("aria-hidden") == Some("true")
}

/// Accumulates lines of text, collapsing runs of whitespace.
#[derive(Default)]
struct TextBuffer {
    lines: Vec<String>,
    line: String,
    pending_space: bool,
}

impl TextBuffer {
    fn push_text(&mut self, text: &str) {
        let leading = text.starts_with(char::is_whitespace);
        for (i, word) in text.split_whitespace().enumerate() {
            if (i > 0 || leading || self.pending_space) && !self.line.is_empty() {
                self.line.push(' ');
            }
            self.line.push_str(word);
            self.pending_space = false;
        }
        if text.ends_with(char::is_whitespace) {
            self.pending_space = true;
        }
    }

    /// Appends `text` as written, one output line per source line.
    fn push_preformatted(&mut self, text: &str) {
        for (i, segment) in text.split('\n').enumerate() {
            if i > 0 {
                self.lines.push(std::mem::take(&mut self.line));
            }
            self.line.push_str(segment);
        }
        self.pending_space = false;
    }

    fn boundary(&mut self, boundary: Boundary) {
        match boundary {
            Boundary::Block => self.break_line(),
            Boundary::Cell => self.pending_space = true,
            Boundary::Inline => {}
        }
    }

    fn break_line(&mut self) {
        if !self.line.is_empty() {
            self.lines.push(std::mem::take(&mut self.line));
        }
        self.pending_space = false;
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_entities_before_stripping_markup() {
        assert_eq!(html_to_text("&lt;b&gt;Hello&lt;/b&gt;"), "Hello");
    }

    #[test]
    fn unescape_leaves_plain_text_alone() {
        assert_eq!(unescape("1 &lt; 2 &amp;&amp; 3 &gt; 2"), "1 < 2 && 3 > 2");
        assert_eq!(unescape("&#39;quoted&#x27; &quot;x&quot;"), "'quoted' \"x\"");
        assert_eq!(unescape("no entities <here>"), "no entities <here>");
    }

    #[test]
    fn drops_script_and_style_content() {
        let html = r#"
            <html>
              <head><title>Ignored</title><style>body { color: red }</style></head>
              <body>
                <script>evil()</script>
                <p>Hello World</p>
                <noscript>enable js</noscript>
              </body>
            </html>"#;
        let text = extract(html);

        assert_eq!(text, "Hello World");
    }

    #[test]
    fn escaped_page_from_extension() {
        let raw = "&lt;html&gt;&lt;body&gt;&lt;script&gt;evil()&lt;/script&gt;&lt;p&gt;Hello World&lt;/p&gt;&lt;/body&gt;&lt;/html&gt;";
        assert_eq!(html_to_text(raw), "Hello World");
    }

    #[test]
    fn keeps_article_text_and_drops_chrome() {
        let html = r#"
            <body>
              <nav><a href="/">Home</a><a href="/about">About</a></nav>
              <div class="ad-slot">Buy now!</div>
              <div id="cookie_banner">We use cookies</div>
              <article>
                <h1>Rust 2024</h1>
                <p>The edition ships with <em>many</em> improvements.</p>
                <p>Upgrade today.</p>
              </article>
              <aside>Related links</aside>
              <footer>(c) somebody</footer>
            </body>"#;
        let text = extract(html);

        assert_eq!(
            text,
            "Rust 2024\nThe edition ships with many improvements.\nUpgrade today."
        );
    }

    #[test]
    fn inline_elements_do_not_split_words() {
        assert_eq!(extract("<p>Hel<b>lo</b> <i>there</i>, friend</p>"), "Hello there, friend");
    }

    #[test]
    fn table_cells_are_space_separated() {
        let html = "<table><tr><th>Name</th><th>Age</th></tr><tr><td>Ann</td><td>41</td></tr></table>";
        assert_eq!(extract(html), "Name Age\nAnn 41");
    }

    #[test]
    fn hidden_elements_are_skipped() {
        let html = r#"<p>shown</p><p hidden>secret</p><div aria-hidden="true">icon</div>"#;
        assert_eq!(extract(html), "shown");
    }

    #[test]
    fn falls_back_when_everything_looks_like_boilerplate() {
        let html = r#"<nav><a href="/">Home</a> <a href="/docs">Docs</a></nav>"#;
        assert_eq!(extract(html), "Home Docs");
    }

    #[test]
    fn body_class_markers_do_not_hide_the_page() {
        let html = r#"<body class="sidebar-open"><p>Main text</p></body>"#;
        assert_eq!(extract(html), "Main text");
    }

    #[test]
    fn marker_classed_wrapper_keeps_its_article() {
        let html = r#"<body><h1>My Blog</h1><div class="site-content has-sidebar"><article><p>The real article body.</p></article></div></body>"#;
        assert_eq!(extract(html), "My Blog\nThe real article body.");
    }

    #[test]
    fn wrapper_around_role_main_is_kept() {
        let html = r#"
            <div class="menu-open">
              <div class="nav-links"><a href="/">Home</a></div>
              <div role="main"><p>Welcome to the docs.</p></div>
            </div>
            <p>Other</p>"#;
        assert_eq!(extract(html), "Welcome to the docs.\nOther");
    }

    #[test]
    fn article_header_and_footer_are_content() {
        let html = r#"
            <header><a href="/">Site logo</a></header>
            <article>
              <header><h1>Important Title</h1></header>
              <p>Body text.</p>
              <div class="share-buttons">Tweet this</div>
              <footer>Posted by Ann</footer>
            </article>
            <footer>(c) site</footer>"#;
        assert_eq!(extract(html), "Important Title\nBody text.\nPosted by Ann");
    }

    #[test]
    fn marker_classed_wrapper_without_content_root_keeps_body_text() {
        let html = r#"<body><div class="header-nav">Links</div><div class="content has-sidebar"><p>Only text of the page, long paragraph.</p></div><p>x</p></body>"#;
        assert_eq!(extract(html), "Only text of the page, long paragraph.\nx");
    }

    #[test]
    fn densest_block_does_not_shelter_nested_chrome() {
        let html = r#"
            <div class="page with-sidebar">
              <p>First paragraph of the story.</p>
              <div class="social-share"><p>Share on every network</p></div>
              <p>Second paragraph of the story.</p>
            </div>
            <div class="sidebar"><p>Short aside</p></div>"#;
        assert_eq!(
            extract(html),
            "First paragraph of the story.\nSecond paragraph of the story."
        );
    }

    #[test]
    fn link_lists_do_not_count_as_body_text() {
        let html = r#"
            <div class="menu"><p><a href="/a">A very long link label for the menu</a></p></div>
            <div class="main-ad"><p>Buy</p></div>
            <div><p>Real words here.</p></div>"#;
        assert_eq!(extract(html), "Real words here.");
    }

    #[test]
    fn preformatted_text_keeps_its_layout() {
        let html = "<p>Example:</p><pre>fn main() {\n    println!(\"hi\");\n}</pre><p>Done.</p>";
        assert_eq!(
            extract(html),
            "Example:\nfn main() {\n    println!(\"hi\");\n}\nDone."
        );
    }

    #[test]
    fn inline_markup_inside_pre_is_verbatim() {
        let html = "<pre><code><span>let</span> x =  1;\n\tx + 1</code></pre>";
        assert_eq!(extract(html), "let x =  1;\n\tx + 1");
    }

    #[test]
    fn malformed_input_degrades_gracefully() {
        let inputs = [
            "",
            "<",
            "<scr",
            "</p></p><<>>&&;",
            "<html><body><p>Unclosed <b>bold <div>still here",
            "<div><span>mismatched</div></span>",
            "&lt;p&gt;truncated &lt;b",
            "\u{0}\u{fffd} binary-ish <p>\u{1}</p>",
        ];
        for input in inputs {
            let _ = html_to_text(input);
        }

        assert_eq!(extract(""), "");
        assert!(extract("<html><body><p>Unclosed <b>bold <div>still here").contains("still here"));
    }

    #[test]
    fn script_only_page_is_empty() {
        assert_eq!(extract("<html><head><script>track()</script></head><body></body></html>"), "");
    }

    #[test]
    fn deeply_nested_markup_does_not_overflow() {
        let depth = 5_000;
        let html = format!("{}deep{}", "<div>".repeat(depth), "</div>".repeat(depth));
        assert_eq!(extract(&html), "deep");
    }
}
