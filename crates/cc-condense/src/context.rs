//! Per-context consolidation passes.
//!
//! A context is the top-level stylesheet or a media rule's body. Each
//! invocation allocates its own caches and recurses into nested media
//! bodies, so nothing persists across contexts or pipeline runs.
//! Removed rules leave a tombstone (`None` slot) until the context is
//! compacted at the end.

use crate::values::{compress_declaration, compress_selector, unvendor};
use cc_core::types::{declarations_key, selectors_key};
use cc_core::{Options, Rule, StyleRule};
use std::collections::{HashMap, HashSet};

/// Consolidate one context's rule list in place.
pub fn condense_context(rules: &mut Vec<Rule>, opts: &Options) {
    let mut slots = bucket(rules);

    let mut media_cache: HashMap<String, usize> = HashMap::new();
    let mut declaration_cache: HashMap<String, usize> = HashMap::new();
    let mut selector_cache: HashMap<String, usize> = HashMap::new();

    // Pass 1: normalize, merge media blocks, merge equal declaration sets.
    for i in 0..slots.len() {
        let Some(mut rule) = slots[i].take() else {
            continue;
        };
        let keep = match &mut rule {
            Rule::Media(media) => {
                if !opts.safe {
                    let key = media.condition.clone();
                    if let Some(&prev) = media_cache.get(&key) {
                        if let Some(Rule::Media(absorbed)) = slots[prev].take() {
                            let mut merged = absorbed.rules;
                            merged.append(&mut media.rules);
                            media.rules = merged;
                        }
                    }
                    media_cache.insert(key, i);
                }
                true
            }
            Rule::Style(style) => {
                if style_rule(style, true, opts) {
                    consolidate_via_declarations(style, i, &mut slots, &mut declaration_cache, opts);
                    true
                } else {
                    false
                }
            }
            Rule::FontFace(style) => style_rule(style, false, opts),
            _ => true,
        };
        if keep {
            slots[i] = Some(rule);
        }
    }

    // Pass 2: merge rules sharing a selector list.
    for i in 0..slots.len() {
        let Some(mut rule) = slots[i].take() else {
            continue;
        };
        if let Rule::Style(style) = &mut rule {
            consolidate_via_selectors(style, i, &mut slots, &mut selector_cache, opts);
        }
        slots[i] = Some(rule);
    }

    // Pass 3: re-converge declaration merges (pass 2 can create new
    // duplicates), dedupe selectors, recurse into nested contexts.
    declaration_cache.clear();
    for i in 0..slots.len() {
        let Some(mut rule) = slots[i].take() else {
            continue;
        };
        match &mut rule {
            Rule::Style(style) => {
                consolidate_via_declarations(style, i, &mut slots, &mut declaration_cache, opts);
                undupe_selectors(&mut style.selectors);
            }
            Rule::Media(media) => condense_context(&mut media.rules, opts),
            Rule::Keyframes(kf) => {
                kf.keyframes.retain_mut(|frame| {
                    if frame.declarations.is_empty() {
                        return false;
                    }
                    sort_declarations(&mut frame.declarations, opts);
                    for decl in frame.declarations.iter_mut() {
                        compress_declaration(decl);
                    }
                    true
                });
            }
            _ => {}
        }
        slots[i] = Some(rule);
    }

    *rules = slots.into_iter().flatten().collect();
}

/// Pass 0: reorder into charset ++ keyframes ++ fonts ++ other, with
/// imports first among other. Extra charsets are dropped; font-face
/// rules deduplicate on their identity key, first occurrence winning.
fn bucket(rules: &mut Vec<Rule>) -> Vec<Option<Rule>> {
    let mut charset: Option<Rule> = None;
    let mut keyframes = Vec::new();
    let mut fonts = Vec::new();
    let mut seen_fonts: HashSet<String> = HashSet::new();
    let mut imports = Vec::new();
    let mut other = Vec::new();

    for rule in rules.drain(..) {
        match &rule {
            Rule::Charset(_) => {
                if charset.is_none() {
                    charset = Some(rule);
                }
            }
            Rule::Keyframes(_) => keyframes.push(rule),
            Rule::FontFace(style) => {
                if let Some(identity) = font_identity(style) {
                    if seen_fonts.insert(identity) {
                        fonts.push(rule);
                    }
                }
            }
            Rule::Import(_) => imports.push(rule),
            _ => other.push(rule),
        }
    }

    let mut slots = Vec::with_capacity(
        charset.iter().len() + keyframes.len() + fonts.len() + imports.len() + other.len(),
    );
    slots.extend(charset.map(Some));
    slots.extend(keyframes.into_iter().map(Some));
    slots.extend(fonts.into_iter().map(Some));
    slots.extend(imports.into_iter().map(Some));
    slots.extend(other.into_iter().map(Some));
    slots
}

/// Identity key for `@font-face` dedup: family, weight and style.
/// Rules without a `font-family` are dropped, like the original.
fn font_identity(rule: &StyleRule) -> Option<String> {
    let find = |prop: &str| {
        rule.declarations
            .iter()
            .find(|d| d.property.trim() == prop)
            .map(|d| d.value.trim())
    };
    let family = find("font-family")?;
    Some(format!(
        "{}/{}/{}",
        family,
        find("font-weight").unwrap_or(""),
        find("font-style").unwrap_or("")
    ))
}

/// Last-wins merge keyed by the canonical declaration list: the later
/// rule absorbs the cached rule's selectors, prepended to keep cascade
/// order, and the cached slot is tombstoned.
fn consolidate_via_declarations(
    rule: &mut StyleRule,
    i: usize,
    slots: &mut [Option<Rule>],
    cache: &mut HashMap<String, usize>,
    opts: &Options,
) {
    if opts.safe {
        return;
    }
    let key = declarations_key(&rule.declarations);
    if let Some(&prev) = cache.get(&key) {
        if let Some(absorbed) = take_style(slots, prev) {
            let mut merged = absorbed.selectors;
            merged.append(&mut rule.selectors);
            rule.selectors = merged;
        }
    }
    cache.insert(key, i);
    sort_selectors(&mut rule.selectors, opts);
}

/// Last-wins merge keyed by the canonical selector list; the absorbed
/// rule's declarations are prepended so later values still win.
fn consolidate_via_selectors(
    rule: &mut StyleRule,
    i: usize,
    slots: &mut [Option<Rule>],
    cache: &mut HashMap<String, usize>,
    opts: &Options,
) {
    if opts.safe {
        return;
    }
    let key = selectors_key(&rule.selectors);
    if let Some(&prev) = cache.get(&key) {
        if let Some(absorbed) = take_style(slots, prev) {
            let mut merged = absorbed.declarations;
            merged.append(&mut rule.declarations);
            rule.declarations = merged;
        }
    }
    cache.insert(key, i);
    sort_declarations(&mut rule.declarations, opts);
}

fn take_style(slots: &mut [Option<Rule>], i: usize) -> Option<StyleRule> {
    match slots[i].take() {
        Some(Rule::Style(style)) => Some(style),
        other => {
            slots[i] = other;
            None
        }
    }
}

/// Normalize a style or font-face rule. Returns false when the rule
/// has no declarations and should be dropped.
fn style_rule(rule: &mut StyleRule, is_style: bool, opts: &Options) -> bool {
    if rule.declarations.is_empty() {
        return false;
    }
    if is_style {
        for selector in rule.selectors.iter_mut() {
            *selector = compress_selector(selector);
        }
        sort_selectors(&mut rule.selectors, opts);
    }
    sort_declarations(&mut rule.declarations, opts);
    for decl in rule.declarations.iter_mut() {
        compress_declaration(decl);
    }
    true
}

fn sort_selectors(selectors: &mut [String], opts: &Options) {
    if !opts.sort || selectors.len() <= 1 {
        return;
    }
    selectors.sort();
}

/// Stable sort by unvendored property name; the stamped pre-sort index
/// breaks ties so equal properties keep their cascade order.
fn sort_declarations(declarations: &mut [cc_core::Declaration], opts: &Options) {
    if !opts.sort || declarations.len() <= 1 {
        return;
    }
    for (i, decl) in declarations.iter_mut().enumerate() {
        decl.index = i;
    }
    declarations.sort_by(|a, b| {
        (unvendor(&a.property), a.index).cmp(&(unvendor(&b.property), b.index))
    });
}

/// Drop repeated selectors, keeping first occurrence order.
fn undupe_selectors(selectors: &mut Vec<String>) {
    let mut seen: HashSet<String> = HashSet::new();
    selectors.retain(|s| seen.insert(s.clone()));
}
