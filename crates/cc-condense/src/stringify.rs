//! Tree serialization, compact or readable.

use cc_core::{Declaration, Keyframe, KeyframesRule, MediaRule, Rule, StyleRule, Stylesheet};

/// Render a stylesheet. Compact mode emits no separators or indents;
/// readable mode separates rules with a blank line and indents bodies.
pub fn stringify(sheet: &Stylesheet, compress: bool) -> String {
    let rendered: Vec<String> = sheet.rules.iter().map(|r| visit(r, compress)).collect();
    rendered.join(if compress { "" } else { "\n\n" })
}

fn visit(rule: &Rule, compress: bool) -> String {
    match rule {
        Rule::Charset(value) => format!("@charset {value};"),
        Rule::Import(target) => format!("@import {target};"),
        Rule::Media(media) => visit_media(media, compress),
        Rule::Keyframes(kf) => visit_keyframes(kf, compress),
        Rule::Style(style) | Rule::FontFace(style) => visit_style(style, compress),
    }
}

fn visit_media(node: &MediaRule, compress: bool) -> String {
    if compress {
        let body: String = node.rules.iter().map(|r| visit(r, true)).collect();
        return format!("@media {}{{{}}}", node.condition, body);
    }
    let body = node
        .rules
        .iter()
        .map(|r| format!("  {}", visit(r, false)))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("@media {} {{\n{}\n}}", node.condition, body)
}

fn visit_keyframes(node: &KeyframesRule, compress: bool) -> String {
    let vendor = node.vendor.as_deref().unwrap_or("");
    if compress {
        let body: String = node.keyframes.iter().map(|f| visit_keyframe(f, true)).collect();
        return format!("@{}keyframes {}{{{}}}", vendor, node.name, body);
    }
    let body = node
        .keyframes
        .iter()
        .map(|f| visit_keyframe(f, false))
        .collect::<Vec<_>>()
        .join("\n");
    format!("@{}keyframes {} {{\n{}}}", vendor, node.name, body)
}

fn visit_keyframe(node: &Keyframe, compress: bool) -> String {
    if compress {
        let decls = node
            .declarations
            .iter()
            .map(|d| declaration(d, true))
            .collect::<Vec<_>>()
            .join(";");
        return format!("{}{{{}}}", node.selectors.join(","), decls);
    }
    let decls = node
        .declarations
        .iter()
        .map(|d| format!("  {}", declaration(d, false)))
        .collect::<Vec<_>>()
        .join(";\n");
    format!("  {} {{\n{}\n  }}\n", node.selectors.join(", "), decls)
}

fn visit_style(node: &StyleRule, compress: bool) -> String {
    if compress {
        let decls = node
            .declarations
            .iter()
            .map(|d| declaration(d, true))
            .collect::<Vec<_>>()
            .join(";");
        return format!("{}{{{}}}", node.selectors.join(","), decls);
    }
    let decls = node
        .declarations
        .iter()
        .map(|d| declaration(d, false))
        .collect::<Vec<_>>()
        .join(";\n");
    format!("{} {{\n{}\n}}", node.selectors.join(",\n"), decls)
}

fn declaration(node: &Declaration, compress: bool) -> String {
    if compress {
        format!("{}:{}", node.property, node.value)
    } else {
        format!("  {}: {}", node.property, node.value)
    }
}
