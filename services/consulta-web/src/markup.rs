//! Light markup to HTML.
//!
//! Handles the subset produced by the lookup: `#` headers, `**bold**`,
//! `` `code` ``, `---` rules and blank-line separated paragraphs. All text is
//! escaped.

use handlebars::html_escape;

pub fn render_markup(text: &str) -> String {
    text.split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_block(block: &str) -> String {
    if block == "---" {
        return "<hr>".to_string();
    }

    if let Some((level, heading)) = heading(block) {
        return format!("<h{level}>{}</h{level}>", render_inline(heading));
    }

    let lines: Vec<String> = block.lines().map(render_inline).collect();
    format!("<p>{}</p>", lines.join("<br>"))
}

fn heading(block: &str) -> Option<(usize, &str)> {
    let level = block.chars().take_while(|c| *c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    block[level..].strip_prefix(' ').map(|rest| (level, rest.trim()))
}

fn render_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    let mut bold = false;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("**") {
            out.push_str(if bold { "</strong>" } else { "<strong>" });
            bold = !bold;
            rest = after;
            continue;
        }

        if let Some(after) = rest.strip_prefix('`') {
            if let Some(end) = after.find('`') {
                out.push_str("<code>");
                out.push_str(&html_escape(&after[..end]));
                out.push_str("</code>");
                rest = &after[end + 1..];
                continue;
            }
        }

        // plain text up to the next marker candidate
        let next = rest
            .char_indices()
            .skip(1)
            .find(|(_, c)| *c == '*' || *c == '`')
            .map(|(i, _)| i)
            .unwrap_or(rest.len());
        out.push_str(&html_escape(&rest[..next]));
        rest = &rest[next..];
    }

    if bold {
        out.push_str("</strong>");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_result_markup() {
        let html = render_markup(
            "#### ➡️ Pedido `42`\n\n---\n\n**Máquina/Processo:** Fagor\n\n**Produto:** Chapa A – 3,500 tons",
        );

        assert_eq!(
            html,
            "<h4>➡️ Pedido <code>42</code></h4>\n<hr>\n<p><strong>Máquina/Processo:</strong> Fagor</p>\n<p><strong>Produto:</strong> Chapa A – 3,500 tons</p>"
        );
    }

    #[test]
    fn test_escapes_user_text() {
        let html = render_markup("❌ **Pedido `<script>` não encontrado.**");
        assert!(html.contains("<code>&lt;script&gt;</code>"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_unmatched_markers_are_text() {
        assert_eq!(render_markup("a * b"), "<p>a * b</p>");
        assert!(!render_markup("a ` c").contains("<code>"));
        assert_eq!(render_markup("**open"), "<p><strong>open</strong></p>");
        assert_eq!(render_markup("#nospace"), "<p>#nospace</p>");
    }
}
