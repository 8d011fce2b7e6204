use tracing::info;
use url::Url;

use crate::books::BookRegistry;
use crate::error::Result;
use crate::extract::{extract_exercises, select_and_rewrite, QuestionOutcome};
use crate::fetch::PageSource;

/// Everything needed to render one chapter's question sheet.
#[derive(Debug, Clone)]
pub struct AssembledDocument {
    pub chapter: u32,
    pub conceptual: Vec<usize>,
    pub problems: Vec<usize>,
    /// Conceptual picks first, then problems, each in the order requested.
    pub questions: Vec<QuestionOutcome>,
}

pub struct Assembler<S> {
    source: S,
    books: BookRegistry,
    img_base: Url,
}

impl<S: PageSource> Assembler<S> {
    pub fn new(source: S, books: BookRegistry, img_base: Url) -> Self {
        Assembler {
            source,
            books,
            img_base,
        }
    }

    /// Fetch both chapter pages and pick the requested questions.
    ///
    /// Only an unknown book or a malformed URL fails the run. A page that
    /// cannot be fetched contributes an empty pool, so every pick from it
    /// comes back out of range while the other pool is used as normal.
    pub async fn assemble(
        &self,
        book_key: &str,
        chapter: u32,
        conceptual: &[usize],
        problems: &[usize],
    ) -> Result<AssembledDocument> {
        let book = self.books.get(book_key)?;
        let conceptual_url = book.conceptual_url(chapter)?;
        let problem_url = book.problem_url(chapter)?;
        let link_base = book.link_base_url()?;

        info!(book = %book.key, chapter, "Fetching chapter pages");
        let (conceptual_page, problem_page) = tokio::join!(
            self.source.fetch(&conceptual_url),
            self.source.fetch(&problem_url)
        );

        let conceptual_pool = extract_exercises(conceptual_page.as_ref());
        let problem_pool = extract_exercises(problem_page.as_ref());
        drop((conceptual_page, problem_page));
        info!(
            conceptual = conceptual_pool.len(),
            problems = problem_pool.len(),
            "Exercises found"
        );

        let questions = conceptual
            .iter()
            .map(|&i| select_and_rewrite(&conceptual_pool, i, &self.img_base, &link_base))
            .chain(
                problems
                    .iter()
                    .map(|&i| select_and_rewrite(&problem_pool, i, &self.img_base, &link_base)),
            )
            .collect();

        Ok(AssembledDocument {
            chapter,
            conceptual: conceptual.to_vec(),
            problems: problems.to_vec(),
            questions,
        })
    }
}

// ── Tests ──
