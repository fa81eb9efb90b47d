//! Text rendering of decoded blocks.

use csspack_core::{Block, MediaRule, Rule};

/// Render blocks as stylesheet text, one blank line between entries.
///
/// Media blocks with an empty query render their rules bare; raw blocks are
/// written verbatim.
pub fn render_blocks(blocks: &[Block], indent: &str) -> String {
    let mut parts = Vec::with_capacity(blocks.len());
    for block in blocks {
        match block {
            Block::Media(media) if media.query.is_empty() => {
                parts.extend(media.rules.iter().map(|rule| render_rule(rule, "", indent)));
            }
            Block::Media(media) => parts.push(render_media(media, indent)),
            Block::Raw(text) if text.is_empty() => {}
            Block::Raw(text) => parts.push(text.clone()),
        }
    }
    parts.join("\n\n")
}

/// Render one rule at the given nesting prefix.
pub fn render_rule(rule: &Rule, prefix: &str, indent: &str) -> String {
    let mut out = String::new();
    out.push_str(prefix);
    out.push_str(&rule.selectors.join(&format!(",\n{}", prefix)));
    out.push_str(" {\n");
    for decl in &rule.declarations {
        out.push_str(prefix);
        out.push_str(indent);
        out.push_str(&decl.property);
        out.push_str(": ");
        out.push_str(&decl.value);
        out.push_str(";\n");
    }
    out.push_str(prefix);
    out.push('}');
    out
}

fn render_media(media: &MediaRule, indent: &str) -> String {
    let body: Vec<String> = media
        .rules
        .iter()
        .map(|rule| render_rule(rule, indent, indent))
        .collect();
    if body.is_empty() {
        return format!("@media {} {{\n}}", media.query);
    }
    format!("@media {} {{\n{}\n}}", media.query, body.join("\n\n"))
}
