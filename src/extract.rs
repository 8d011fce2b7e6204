use std::sync::LazyLock;

use scraper::node::Element;
use scraper::{Html, Node, Selector};
use tracing::{debug, warn};
use url::Url;

static EXERCISE_SEL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[data-type="exercise"]"#).unwrap());
static REWRITE_SEL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img, a[href]").unwrap());

/// Attribute holding the real image URL; `src` is only a placeholder.
const LAZY_SRC_ATTR: &str = "data-lazy-src";

pub const OUT_OF_RANGE_TEXT: &str = "Question index out of range.";

/// One exercise container, detached from the page it was found in.
#[derive(Debug, Clone)]
pub struct ExerciseBlock {
    markup: String,
}

impl ExerciseBlock {
    pub fn new(markup: impl Into<String>) -> Self {
        ExerciseBlock {
            markup: markup.into(),
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }
}

/// Result of picking one question out of a pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionOutcome {
    Fragment(String),
    OutOfRange { index: usize },
}

impl QuestionOutcome {
    /// Markup as it goes into the document; out-of-range becomes literal text.
    pub fn as_markup(&self) -> &str {
        match self {
            QuestionOutcome::Fragment(html) => html,
            QuestionOutcome::OutOfRange { .. } => OUT_OF_RANGE_TEXT,
        }
    }
}

/// All exercise containers of a page, in document order. A missing page has none.
pub fn extract_exercises(page: Option<&Html>) -> Vec<ExerciseBlock> {
    let Some(page) = page else {
        return Vec::new();
    };
    page.select(&EXERCISE_SEL)
        .map(|el| ExerciseBlock::new(el.html()))
        .collect()
}

/// Pick the 1-based `index` from `exercises` and return its markup with image
/// sources resolved against `img_base` and links against `link_base`.
pub fn select_and_rewrite(
    exercises: &[ExerciseBlock],
    index: usize,
    img_base: &Url,
    link_base: &Url,
) -> QuestionOutcome {
    let Some(block) = index.checked_sub(1).and_then(|i| exercises.get(i)) else {
        debug!(index, available = exercises.len(), "Question index out of range");
        return QuestionOutcome::OutOfRange { index };
    };
    debug!(index, "Processing exercise");

    // The block is re-parsed into a tree of its own, so edits never reach the pool.
    let mut fragment = Html::parse_fragment(block.markup());
    let targets: Vec<_> = fragment.select(&REWRITE_SEL).map(|el| el.id()).collect();
    for id in targets {
        if let Some(mut node) = fragment.tree.get_mut(id) {
            if let Node::Element(el) = node.value() {
                rewrite_element(el, img_base, link_base);
            }
        }
    }
    QuestionOutcome::Fragment(fragment.root_element().inner_html())
}

fn rewrite_element(el: &mut Element, img_base: &Url, link_base: &Url) {
    match el.name() {
        "img" => {
            // Pages without lazy loading still get absolute sources.
            let source = el.attr(LAZY_SRC_ATTR).or_else(|| el.attr("src"));
            if let Some(src) = source.map(|s| resolve(img_base, s)) {
                set_attr(el, "src", src);
            }
        }
        "a" => {
            if let Some(href) = el.attr("href").map(|h| resolve(link_base, h)) {
                set_attr(el, "href", href);
            }
        }
        _ => {}
    }
}

/// Overwrite a plain (unprefixed) attribute in place, or append it.
fn set_attr(el: &mut Element, local: &str, value: String) {
    let existing = el
        .attrs
        .iter_mut()
        .find(|(name, _)| name.prefix.is_none() && name.ns.is_empty() && &*name.local == local);
    if let Some((_, v)) = existing {
        *v = value.into();
        return;
    }

    // Borrow the qualified name of another plain attribute and rename it.
    let template = el
        .attrs
        .keys()
        .find(|name| name.prefix.is_none() && name.ns.is_empty())
        .cloned();
    if let Some(mut name) = template {
        name.local = local.into();
        el.attrs.insert(name, value.into());
    }
}

fn resolve(base: &Url, reference: &str) -> String {
    match base.join(reference) {
        Ok(url) => url.into(),
        Err(e) => {
            warn!(base = %base, reference, error = %e, "Could not resolve URL, keeping it as is");
            reference.to_string()
        }
    }
}

// ── Tests ──
