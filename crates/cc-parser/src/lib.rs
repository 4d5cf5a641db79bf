//! Recursive-descent CSS parser.
//!
//! Turns stylesheet text into the typed rule tree in `cc-core`. The
//! grammar is deliberately permissive: on a mismatch the parser stops
//! accumulating rules at the current nesting level and returns the tree
//! built so far. `parse` never fails; `parse_strict` reports leftover
//! input as an error while still describing where parsing stopped.

use cc_core::{
    CondenseError, Declaration, Keyframe, KeyframesRule, MediaRule, Result, Rule, StyleRule,
    Stylesheet,
};
use regex::{Captures, Regex};
use std::sync::LazyLock;

static RE_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s+").unwrap());
static RE_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\{\s*").unwrap());
static RE_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\}\s*").unwrap());
// Selector text runs to `{`; quoted strings are opaque so braces and
// commas inside them do not terminate or split the list.
static RE_SELECTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^((?:'(?:\\'|.)*?'|"(?:\\"|.)*?"|[^{])+)"#).unwrap()
});
static RE_SELECTOR_SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)(?:'(?:\\'|.)*?'|"(?:\\"|.)*?"|[^,])+"#).unwrap()
});
static RE_PROPERTY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\*?[-\w]+)\s*").unwrap());
static RE_COLON: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^:\s*").unwrap());
// Value runs to `;` or `}`, with quoted strings and single-level
// parenthesized groups opaque.
static RE_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)^((?:'(?:\\'|.)*?'|"(?:\\"|.)*?"|\([^)]*?\)|[^};])+)\s*"#).unwrap()
});
static RE_DECL_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[;\s]*").unwrap());
static RE_KEYFRAMES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@([-\w]+)?keyframes *").unwrap());
static RE_NAME: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^([-\w]+)\s*").unwrap());
static RE_KEYFRAME_SELECTOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(from|to|\d+%)\s*").unwrap());
static RE_COMMA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^,\s*").unwrap());
static RE_MEDIA: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^@media *([^{]+)").unwrap());
static RE_IMPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@import *([^;\n]+);\s*").unwrap());
static RE_CHARSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^@charset *([^;\n]+);\s*").unwrap());

/// Parse CSS text into a stylesheet, best-effort.
pub fn parse(text: &str) -> Stylesheet {
    let mut parser = Parser::new(text);
    let rules = parser.rules();
    if !parser.rest.trim().is_empty() {
        tracing::trace!(
            offset = text.len() - parser.rest.len(),
            "parser stopped before end of input"
        );
    }
    Stylesheet { rules }
}

/// Parse CSS text, reporting leftover input as an error.
pub fn parse_strict(text: &str) -> Result<Stylesheet> {
    let mut parser = Parser::new(text);
    let rules = parser.rules();
    parser.whitespace();
    if parser.rest.is_empty() {
        Ok(Stylesheet { rules })
    } else {
        let offset = text.len() - parser.rest.len();
        let snippet: String = parser.rest.chars().take(32).collect();
        Err(CondenseError::Parse {
            offset,
            message: format!("unparsed input starting at {snippet:?}"),
        })
    }
}

struct Parser<'a> {
    rest: &'a str,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Match an anchored pattern and advance past it.
    fn eat(&mut self, re: &Regex) -> Option<Captures<'a>> {
        let caps = re.captures(self.rest)?;
        let end = caps.get(0).map(|m| m.end()).unwrap_or(0);
        self.rest = &self.rest[end..];
        Some(caps)
    }

    fn whitespace(&mut self) {
        self.eat(&RE_WHITESPACE);
    }

    fn comments(&mut self) {
        while self.comment() {}
    }

    fn comment(&mut self) -> bool {
        if !self.rest.starts_with("/*") {
            return false;
        }
        // An unterminated comment swallows the rest of the input.
        match self.rest[2..].find("*/") {
            Some(i) => self.rest = &self.rest[i + 4..],
            None => self.rest = "",
        }
        self.whitespace();
        true
    }

    fn open(&mut self) -> Option<()> {
        self.eat(&RE_OPEN).map(|_| ())
    }

    fn close(&mut self) -> Option<()> {
        self.eat(&RE_CLOSE).map(|_| ())
    }

    /// Rules of one context, up to a closing brace or end of input.
    fn rules(&mut self) -> Vec<Rule> {
        let mut rules = Vec::new();
        self.whitespace();
        self.comments();
        while !self.rest.starts_with('}') {
            let Some(node) = self.atrule().or_else(|| self.rule()) else {
                break;
            };
            rules.push(node);
            self.comments();
        }
        rules
    }

    fn atrule(&mut self) -> Option<Rule> {
        if !self.rest.starts_with('@') {
            return None;
        }
        self.keyframes()
            .or_else(|| self.media())
            .or_else(|| self.import())
            .or_else(|| self.charset())
    }

    fn keyframes(&mut self) -> Option<Rule> {
        let caps = self.eat(&RE_KEYFRAMES)?;
        let vendor = caps.get(1).map(|m| m.as_str().to_string());
        let name = self.eat(&RE_NAME)?[1].to_string();
        self.open()?;
        self.comments();
        let mut frames = Vec::new();
        while let Some(frame) = self.keyframe() {
            frames.push(frame);
            self.comments();
        }
        self.close()?;
        Some(Rule::Keyframes(KeyframesRule {
            name,
            vendor,
            keyframes: frames,
        }))
    }

    fn keyframe(&mut self) -> Option<Keyframe> {
        let mut selectors = Vec::new();
        while let Some(caps) = self.eat(&RE_KEYFRAME_SELECTOR) {
            selectors.push(caps[1].to_string());
            self.eat(&RE_COMMA);
        }
        if selectors.is_empty() {
            return None;
        }
        let declarations = self.declarations()?;
        Some(Keyframe {
            selectors,
            declarations,
        })
    }

    fn media(&mut self) -> Option<Rule> {
        let caps = self.eat(&RE_MEDIA)?;
        let condition = caps[1].trim().to_string();
        self.open()?;
        self.comments();
        let rules = self.rules();
        self.close()?;
        Some(Rule::Media(MediaRule { condition, rules }))
    }

    fn import(&mut self) -> Option<Rule> {
        let caps = self.eat(&RE_IMPORT)?;
        Some(Rule::Import(caps[1].trim().to_string()))
    }

    fn charset(&mut self) -> Option<Rule> {
        let caps = self.eat(&RE_CHARSET)?;
        Some(Rule::Charset(caps[1].trim().to_string()))
    }

    fn rule(&mut self) -> Option<Rule> {
        let selectors = self.selector()?;
        self.comments();
        let declarations = self.declarations()?;
        let rule = StyleRule {
            selectors,
            declarations,
        };
        if rule.selectors.first().map(String::as_str) == Some("@font-face") {
            Some(Rule::FontFace(rule))
        } else {
            Some(Rule::Style(rule))
        }
    }

    fn selector(&mut self) -> Option<Vec<String>> {
        let caps = self.eat(&RE_SELECTOR)?;
        let text = caps.get(1)?.as_str().trim();
        let selectors: Vec<String> = RE_SELECTOR_SEGMENT
            .find_iter(text)
            .map(|m| m.as_str().trim().to_string())
            .collect();
        if selectors.is_empty() {
            return None;
        }
        Some(selectors)
    }

    fn declarations(&mut self) -> Option<Vec<Declaration>> {
        self.open()?;
        self.comments();
        let mut declarations = Vec::new();
        while let Some(decl) = self.declaration() {
            declarations.push(decl);
            self.comments();
        }
        self.close()?;
        Some(declarations)
    }

    fn declaration(&mut self) -> Option<Declaration> {
        let property = self.eat(&RE_PROPERTY)?[1].to_string();
        self.eat(&RE_COLON)?;
        let value = self.eat(&RE_VALUE)?[1].trim().to_string();
        self.eat(&RE_DECL_END);
        Some(Declaration::new(property, value))
    }
}
