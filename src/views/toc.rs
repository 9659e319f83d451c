//! Table of contents sidebar

use crate::content::TocEntry;
use crate::helpers::html_escape;

/// Render the table of contents with `active` highlighted.
///
/// An empty table renders nothing at all.
pub fn render_toc(entries: &[TocEntry], active: Option<usize>, offset: f64) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut html = format!(
        r#"<nav class="table-of-contents" data-offset="{}"><ul>"#,
        offset
    );
    for (index, entry) in entries.iter().enumerate() {
        let class = if active == Some(index) {
            "toc-link active"
        } else {
            "toc-link"
        };
        html.push_str(&format!(
            r##"<li class="toc-item toc-level-{}"><a class="{}" href="#{}">{}</a></li>"##,
            entry.level,
            class,
            html_escape(&entry.id),
            html_escape(&entry.title)
        ));
    }
    html.push_str("</ul></nav>");
    html
}
