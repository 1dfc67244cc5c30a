//! Markdown rendering via pulldown-cmark, sanitized with ammonia.

use pulldown_cmark::{Options, Parser, html};

use quill_core::ports::MarkdownRenderer;

/// CommonMark renderer producing sanitized HTML.
///
/// Sanitization runs on every render: post content is author-supplied,
/// and the produced HTML goes straight into browsers.
pub struct PulldownRenderer {
    options: Options,
}

impl PulldownRenderer {
    pub fn new() -> Self {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_STRIKETHROUGH);
        Self { options }
    }
}

impl Default for PulldownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MarkdownRenderer for PulldownRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut raw = String::with_capacity(markdown.len() * 2);
        html::push_html(&mut raw, parser);
        ammonia::clean(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heading_renders_to_h1() {
        let renderer = PulldownRenderer::new();
        assert_eq!(renderer.render("# Hi"), "<h1>Hi</h1>\n");
    }

    #[test]
    fn rendering_is_idempotent_over_refetch() {
        let renderer = PulldownRenderer::new();
        let source = "## Title\n\nsome *emphasis* and a [link](https://example.com)\n";
        assert_eq!(renderer.render(source), renderer.render(source));
    }

    #[test]
    fn embedded_scripts_are_stripped() {
        let renderer = PulldownRenderer::new();
        let out = renderer.render("hello <script>alert('xss')</script> world");
        assert!(!out.contains("<script"));
        assert!(out.contains("hello"));
    }

    #[test]
    fn event_handler_attributes_are_stripped() {
        let renderer = PulldownRenderer::new();
        let out = renderer.render("<p onclick=\"steal()\">click me</p>");
        assert!(!out.contains("onclick"));
        assert!(out.contains("click me"));
    }
}
