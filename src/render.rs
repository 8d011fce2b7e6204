use crate::assemble::AssembledDocument;
use crate::selection::join_list;

const HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>Chapter {chapter} Questions</title>
    <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/katex@0.13.11/dist/katex.min.css">
    <script defer src="https://cdn.jsdelivr.net/npm/katex@0.13.11/dist/katex.min.js"></script>
    <script defer src="https://cdn.jsdelivr.net/npm/katex@0.13.11/dist/contrib/auto-render.min.js"
            onload="renderMathInElement(document.body);"></script>
    <style>
        body {
            font-family: 'Calibri', sans-serif;
            font-size: 20px;
        }
        .page-break {
            page-break-after: always;
        }
        .mathjax {
            display: inline-block;
        }
    </style>
</head>
<body>
"#;

const PAGE_BREAK: &str = "    <div class=\"page-break\"></div>\n";

impl AssembledDocument {
    /// Render the printable sheet.
    ///
    /// Question markup is inserted verbatim so embedded math and figures keep
    /// working. That trusts the source pages: anything fetched from a host
    /// that could serve hostile markup must be sanitized before it gets here.
    pub fn render(&self) -> String {
        let mut out = HEAD.replace("{chapter}", &self.chapter.to_string());

        out.push_str("    <div>\n");
        out.push_str(&format!("        <h2>Chapter: {}</h2>\n", self.chapter));
        if !self.conceptual.is_empty() {
            out.push_str(&format!(
                "        <h2>Conceptual Problems: {}</h2>\n",
                join_list(&self.conceptual)
            ));
        }
        if !self.problems.is_empty() {
            out.push_str(&format!(
                "        <h2>Problems and Exercises: {}</h2>\n",
                join_list(&self.problems)
            ));
        }
        out.push_str("    </div>\n");
        out.push_str(PAGE_BREAK);

        for question in &self.questions {
            out.push_str("    <div class=\"mathjax\">");
            out.push_str(question.as_markup());
            out.push_str("</div>\n");
            out.push_str(PAGE_BREAK);
        }

        out.push_str("</body>\n</html>\n");
        out
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::QuestionOutcome;

    fn doc(
        conceptual: Vec<usize>,
        problems: Vec<usize>,
        questions: Vec<QuestionOutcome>,
    ) -> AssembledDocument {
        AssembledDocument {
            chapter: 7,
            conceptual,
            problems,
            questions,
        }
    }

    #[test]
    fn header_lists_only_non_empty_selections() {
        let html = doc(vec![3, 1], vec![], vec![]).render();
        assert!(html.contains("<title>Chapter 7 Questions</title>"));
        assert!(html.contains("<h2>Chapter: 7</h2>"));
        assert!(html.contains("<h2>Conceptual Problems: 3, 1</h2>"));
        assert!(!html.contains("Problems and Exercises"));

        let html = doc(vec![], vec![2, 2], vec![]).render();
        assert!(!html.contains("Conceptual Problems"));
        assert!(html.contains("<h2>Problems and Exercises: 2, 2</h2>"));
    }

    #[test]
    fn every_question_is_followed_by_a_page_break() {
        let html = doc(
            vec![1],
            vec![1],
            vec![
                QuestionOutcome::Fragment("<div id=\"a\">A</div>".into()),
                QuestionOutcome::Fragment("<div id=\"b\">B</div>".into()),
            ],
        )
        .render();

        // one after the header, one per question
        assert_eq!(html.matches("class=\"page-break\"").count(), 3);
        let a = html.find("id=\"a\"").unwrap();
        let b = html.find("id=\"b\"").unwrap();
        assert!(a < b);
        let between = &html[a..b];
        assert!(between.contains("page-break"));
        assert!(html[b..].contains("page-break"));
    }

    #[test]
    fn fragments_are_not_escaped() {
        let html = doc(
            vec![1],
            vec![],
            vec![QuestionOutcome::Fragment(
                "<p>x &lt; y <a href=\"https://openstax.org/x\">link</a></p>".into(),
            )],
        )
        .render();
        assert!(html.contains(
            "<div class=\"mathjax\"><p>x &lt; y <a href=\"https://openstax.org/x\">link</a></p></div>"
        ));
    }

    #[test]
    fn out_of_range_renders_as_text() {
        let html = doc(vec![9], vec![], vec![QuestionOutcome::OutOfRange { index: 9 }]).render();
        assert!(html.contains("<div class=\"mathjax\">Question index out of range.</div>"));
    }

    #[test]
    fn loads_katex() {
        let html = doc(vec![1], vec![], vec![]).render();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("katex.min.js"));
        assert!(html.contains("renderMathInElement(document.body);"));
        assert!(html.trim_end().ends_with("</html>"));
    }
}
