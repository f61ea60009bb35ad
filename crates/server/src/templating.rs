//! HTML rendering of the upload page.

use minijinja::Environment;
use serde::Serialize;

const INDEX_TEMPLATE: &str = include_str!("../templates/index.html");

/// Context for `index.html`.
#[derive(Debug, Serialize)]
pub struct IndexPage<'a> {
    pub max_tokens: usize,
    pub model: &'a str,
    /// Set once a document has been processed.
    pub filename: Option<&'a str>,
    pub chunks: &'a [String],
    pub error: Option<&'a str>,
}

/// Holds the compiled page templates.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self, minijinja::Error> {
        let mut env = Environment::new();
        env.add_template("index.html", INDEX_TEMPLATE)?;
        Ok(Self { env })
    }

    pub fn render_index(&self, page: &IndexPage<'_>) -> Result<String, minijinja::Error> {
        self.env.get_template("index.html")?.render(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page<'a>(filename: Option<&'a str>, chunks: &'a [String], error: Option<&'a str>) -> IndexPage<'a> {
        IndexPage {
            max_tokens: 3500,
            model: "gpt-4",
            filename,
            chunks,
            error,
        }
    }

    #[test]
    fn empty_page_shows_form_only() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer.render_index(&page(None, &[], None)).unwrap();
        assert!(html.contains("enctype=\"multipart/form-data\""));
        assert!(html.contains("3500 tokens"));
        assert!(!html.contains("<ol>"));
    }

    #[test]
    fn lists_chunk_files() {
        let renderer = PageRenderer::new().unwrap();
        let chunks = vec!["a_chunk_1.txt".to_string(), "a_chunk_2.txt".to_string()];
        let html = renderer.render_index(&page(Some("a.pdf"), &chunks, None)).unwrap();
        assert!(html.contains("<code>a_chunk_1.txt</code>"));
        assert!(html.contains("<code>a_chunk_2.txt</code>"));
        assert!(html.contains("2 chunk files written"));
    }

    #[test]
    fn zero_chunks_shows_notice() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer.render_index(&page(Some("scan.pdf"), &[], None)).unwrap();
        assert!(html.contains("no chunks were produced"));
    }

    #[test]
    fn escapes_user_supplied_text() {
        let renderer = PageRenderer::new().unwrap();
        let html = renderer
            .render_index(&page(None, &[], Some("<script>bad</script>")))
            .unwrap();
        assert!(!html.contains("<script>bad"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
