/// Markdown renderer port.
///
/// Pure text-to-text mapping with no side effects. Implementations must
/// not let embedded scripts survive into the produced HTML, and must be
/// deterministic: rendering the same source twice yields identical output.
pub trait MarkdownRenderer: Send + Sync {
    fn render(&self, markdown: &str) -> String;
}
