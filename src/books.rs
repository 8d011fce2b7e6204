use url::Url;

use crate::error::{Result, SheetError};

const CHAPTER_PLACEHOLDER: &str = "{}";

/// One textbook edition and where its end-of-chapter pages live.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookProfile {
    pub key: String,
    /// Conceptual questions page, `{}` stands for the chapter number.
    pub conceptual_template: String,
    /// Problems & exercises page, `{}` stands for the chapter number.
    pub problem_template: String,
    /// Base for relative hyperlinks inside exercises.
    pub link_base: String,
}

impl BookProfile {
    pub fn new(
        key: impl Into<String>,
        conceptual_template: impl Into<String>,
        problem_template: impl Into<String>,
        link_base: impl Into<String>,
    ) -> Self {
        BookProfile {
            key: key.into(),
            conceptual_template: conceptual_template.into(),
            problem_template: problem_template.into(),
            link_base: link_base.into(),
        }
    }

    pub fn conceptual_url(&self, chapter: u32) -> Result<Url> {
        chapter_url(&self.conceptual_template, chapter)
    }

    pub fn problem_url(&self, chapter: u32) -> Result<Url> {
        chapter_url(&self.problem_template, chapter)
    }

    pub fn link_base_url(&self) -> Result<Url> {
        parse_url(&self.link_base)
    }
}

fn chapter_url(template: &str, chapter: u32) -> Result<Url> {
    let raw = template.replacen(CHAPTER_PLACEHOLDER, &chapter.to_string(), 1);
    parse_url(&raw)
}

pub fn parse_url(raw: &str) -> Result<Url> {
    Url::parse(raw).map_err(|source| SheetError::InvalidUrl {
        url: raw.to_string(),
        source,
    })
}

/// Immutable set of known books, in registration order.
#[derive(Debug, Clone, Default)]
pub struct BookRegistry {
    books: Vec<BookProfile>,
}

impl BookRegistry {
    pub fn new(books: Vec<BookProfile>) -> Self {
        BookRegistry { books }
    }

    /// The OpenStax physics titles the tool was written for.
    pub fn builtin() -> Self {
        BookRegistry::new(vec![
            BookProfile::new(
                "College Physics AP",
                "https://openstax.org/books/college-physics-ap-courses-2e/pages/{}-conceptual-questions",
                "https://openstax.org/books/college-physics-ap-courses-2e/pages/{}-problems-exercises",
                "https://openstax.org/books/college-physics-ap-courses-2e/pages/",
            ),
            BookProfile::new(
                "University Physics Vol. 1",
                "https://openstax.org/books/university-physics-volume-1/pages/{}-conceptual-questions",
                "https://openstax.org/books/university-physics-volume-1/pages/{}-problems",
                "https://openstax.org/books/university-physics-volume-1/pages/",
            ),
            BookProfile::new(
                "University Physics Vol. 2",
                "https://openstax.org/books/university-physics-volume-2/pages/{}-conceptual-questions",
                "https://openstax.org/books/university-physics-volume-2/pages/{}-problems",
                "https://openstax.org/books/university-physics-volume-2/pages/",
            ),
        ])
    }

    pub fn get(&self, key: &str) -> Result<&BookProfile> {
        self.books
            .iter()
            .find(|b| b.key == key)
            .ok_or_else(|| SheetError::UnknownBook(key.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &BookProfile> {
        self.books.iter()
    }
}

// ── Tests ──
