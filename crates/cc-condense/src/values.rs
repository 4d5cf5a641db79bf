//! Per-token value compression: units, colors, `url()`, shorthands.

use cc_core::Declaration;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Properties whose lone `none` value collapses to `0`.
const ZEROABLE: [&str; 11] = [
    "background",
    "border",
    "border-left",
    "border-right",
    "border-top",
    "border-bottom",
    "outline",
    "outline-left",
    "outline-right",
    "outline-top",
    "outline-bottom",
];

static RE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)^url\(["'](.*?)["']\)$"#).unwrap());
static RE_DIMENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\.?[0-9]+|[0-9]+\.[0-9]+)(%|em|ex|in|cm|mm|pt|pc|px)$").unwrap()
});
static RE_ZERO: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^0*\.?0*$").unwrap());
static RE_RGB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^rgb\(([0-9]+),([0-9]+),([0-9]+)\)$").unwrap());
static RE_HEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^#[0-9a-f]+$").unwrap());
static RE_UNVENDOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:_|\*|-[a-z]+-)(.*)$").unwrap());
static RE_WS_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static RE_COMBINATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" ?([+>~]) ?").unwrap());
static RE_COMMA_WS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*,\s*").unwrap());
static RE_OPEN_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\(\s*)+").unwrap());
static RE_CLOSE_PARENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\s*\))+").unwrap());
static RE_IMPORTANT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*!important$").unwrap());

/// Strip a vendor (`-moz-`), underscore or star-hack prefix for
/// property identity comparisons. The prefix stays in the output.
pub fn unvendor(property: &str) -> &str {
    match RE_UNVENDOR.captures(property) {
        Some(caps) => caps.get(1).map(|m| m.as_str()).unwrap_or(property),
        None => property,
    }
}

/// `rgb` channels to `#rrggbb`, lowercase, zero-padded.
pub fn rgb_to_hex(channels: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", channels[0], channels[1], channels[2])
}

/// Compress a single value token. `count` is the number of sibling
/// tokens in the declaration's value.
pub fn compress_identifier(identifier: &str, property: &str, count: usize) -> String {
    // `border: none` → `border: 0`, but only for a lone token.
    if identifier == "none" && count == 1 && ZEROABLE.contains(&unvendor(property)) {
        return "0".into();
    }

    // `url("x")` → `url(x)`. No quote-safety check, like the original.
    if let Some(caps) = RE_URL.captures(identifier) {
        return format!("url({})", &caps[1]);
    }

    // Dimensions: drop zero magnitudes entirely, otherwise trim
    // redundant zeros around the decimal point.
    if let Some(caps) = RE_DIMENSION.captures(identifier) {
        let num = &caps[1];
        let unit = &caps[2];
        if RE_ZERO.is_match(num) {
            return "0".into();
        }
        let mut num = num.trim_start_matches('0').to_string();
        if num.contains('.') {
            num = num.trim_end_matches('0').to_string();
        }
        return format!("{num}{unit}");
    }

    let mut identifier = identifier.to_string();
    if let Some(caps) = RE_RGB.captures(&identifier) {
        let channel = |i: usize| caps[i].parse::<u64>().map(|v| v.min(255)).unwrap_or(255) as u8;
        identifier = rgb_to_hex([channel(1), channel(2), channel(3)]);
    }

    if RE_HEX.is_match(&identifier) {
        identifier = identifier.to_lowercase();
        let b = identifier.as_bytes();
        if b.len() == 7 && b[1] == b[2] && b[3] == b[4] && b[5] == b[6] {
            return format!("#{}{}{}", b[1] as char, b[3] as char, b[5] as char);
        }
        return identifier;
    }

    identifier
}

/// Collapse `margin`/`padding` token lists: 4 → 2 when vertical and
/// horizontal pairs repeat, then 2 → 1 when both remaining are equal.
pub fn compress_padding(mut values: Vec<String>) -> Vec<String> {
    if values.len() == 4 && values[0] == values[2] && values[1] == values[3] {
        values.truncate(2);
    }
    if values.len() == 2 && values[0] == values[1] {
        values.truncate(1);
    }
    values
}

/// Collapse whitespace runs and spaces around combinators.
pub fn compress_selector(selector: &str) -> String {
    let selector = RE_WS_RUN.replace_all(selector, " ");
    RE_COMBINATOR.replace_all(&selector, "${1}").into_owned()
}

/// Split a declaration value into tokens. `font-family` splits on
/// commas with surrounding quotes stripped; everything else splits on
/// whitespace outside quotes and parentheses.
pub fn value_split(property: &str, value: &str) -> Vec<String> {
    if property == "font-family" {
        return value
            .split(',')
            .map(|token| {
                let token = token.trim();
                let b = token.as_bytes();
                // Strip quotes only as a matched pair; an unterminated
                // quote (or a multibyte final char) stays verbatim.
                if b.len() >= 2 && (b[0] == b'"' || b[0] == b'\'') && b[b.len() - 1] == b[0] {
                    token[1..token.len() - 1].to_string()
                } else {
                    token.to_string()
                }
            })
            .collect();
    }

    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut depth = 0usize;
    let mut escaped = false;
    for ch in value.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }
        match ch {
            '\\' if quote.is_some() => {
                current.push(ch);
                escaped = true;
            }
            '\'' | '"' => {
                if quote == Some(ch) {
                    quote = None;
                } else if quote.is_none() {
                    quote = Some(ch);
                }
                current.push(ch);
            }
            '(' if quote.is_none() => {
                depth += 1;
                current.push(ch);
            }
            ')' if quote.is_none() => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            c if c.is_whitespace() && quote.is_none() && depth == 0 => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}

fn squeeze(caps: &Captures) -> String {
    caps[0].chars().filter(|c| !c.is_whitespace()).collect()
}

/// Compress one declaration in place.
pub fn compress_declaration(declaration: &mut Declaration) {
    declaration.property = declaration.property.trim().to_string();

    let mut value = declaration.value.clone();
    // Whitespace around commas and parens is only collapsed when the
    // value carries no quoted strings; quoted content stays verbatim.
    if !value.contains('\'') && !value.contains('"') {
        value = RE_COMMA_WS.replace_all(&value, ",").into_owned();
        value = RE_OPEN_PARENS.replace_all(&value, squeeze).into_owned();
        value = RE_CLOSE_PARENS.replace_all(&value, squeeze).into_owned();
    }

    let tokens = value_split(&declaration.property, &value);
    let count = tokens.len();
    let mut tokens: Vec<String> = tokens
        .iter()
        .map(|t| compress_identifier(t, &declaration.property, count))
        .collect();

    if declaration.property == "margin" || declaration.property == "padding" {
        tokens = compress_padding(tokens);
    }

    let joined = if declaration.property == "font-family" {
        tokens.join(",")
    } else {
        tokens.join(" ")
    };
    declaration.value = RE_IMPORTANT.replace(&joined, "!important").into_owned();
}
