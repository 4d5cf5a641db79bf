//! Textual pre/post passes around the core pipeline: bang-comment
//! extraction, comment stripping, and IE5/Mac hack protection.

use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_BANG_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*!.*?\*/").unwrap());
static RE_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());
// `/* ... \*/ <content> /* ... */` — the legacy IE5/Mac comment hack.
static RE_IE5_HACK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\\\*/(.+?)/\*.*?\*/").unwrap());
static RE_SENTINEL_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*#x[0-9]+ie5machack\{start:1\}\s*").unwrap());
static RE_SENTINEL_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*#x[0-9]+ie5machack\{end:1\}\s*").unwrap());

/// Bang comments lifted out of the source, plus the remaining code.
pub struct BangComments {
    pub comments: Vec<String>,
    pub code: String,
}

/// Pull every `/*! ... */` comment out of the input, in order. Each is
/// trimmed and newline-terminated; they are re-prepended verbatim to
/// the final output.
pub fn extract_bang_comments(input: &str) -> BangComments {
    let mut comments = Vec::new();
    let code = RE_BANG_COMMENT
        .replace_all(input, |caps: &Captures| {
            comments.push(format!("{}\n", caps[0].trim()));
            String::new()
        })
        .into_owned();
    BangComments { comments, code }
}

/// Run every textual pre-pass in pipeline order: lift bang comments
/// out, shield the IE5/Mac hack behind sentinel rules, drop the rest.
/// The returned `code` is what the parser sees.
pub fn prepare(input: &str) -> BangComments {
    let parts = extract_bang_comments(input);
    let code = strip_comments(&protect_ie5_hacks(&parts.code));
    BangComments {
        comments: parts.comments,
        code,
    }
}

/// Remove all remaining comments.
pub fn strip_comments(input: &str) -> String {
    RE_COMMENT.replace_all(input, "").into_owned()
}

/// Replace each IE5/Mac hack with paired sentinel rules the parser can
/// treat as ordinary rules; `restore_ie5_hacks` swaps them back.
pub fn protect_ie5_hacks(input: &str) -> String {
    let mut n = 0usize;
    RE_IE5_HACK
        .replace_all(input, |caps: &Captures| {
            let start = n;
            let end = n + 1;
            n = end;
            format!(
                "#x{start}ie5machack{{start:1}}{}#x{end}ie5machack{{end:1}}",
                &caps[1]
            )
        })
        .into_owned()
}

/// Swap sentinel rules back to the literal comment markers.
pub fn restore_ie5_hacks(output: &str) -> String {
    let output = RE_SENTINEL_START.replace_all(output, r"/*\*/");
    RE_SENTINEL_END.replace_all(&output, "/**/").into_owned()
}
