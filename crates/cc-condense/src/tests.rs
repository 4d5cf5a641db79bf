use crate::comments;
use crate::pipeline::CondensePipeline;
use crate::values;
use crate::{compress, stringify::stringify};
use cc_core::{Declaration, Options};

fn condense(input: &str) -> String {
    compress(input, &Options::default())
}

// ========== Value compressor: identifiers ==========

#[test]
fn test_zero_dimension_collapses() {
    assert_eq!(values::compress_identifier("0px", "width", 1), "0");
    assert_eq!(values::compress_identifier("0.000em", "width", 1), "0");
    assert_eq!(values::compress_identifier(".0%", "width", 1), "0");
}

#[test]
fn test_dimension_zero_trimming() {
    assert_eq!(values::compress_identifier("0.50em", "width", 1), ".5em");
    assert_eq!(values::compress_identifier("00.25pt", "width", 1), ".25pt");
    assert_eq!(values::compress_identifier("10px", "width", 1), "10px");
    assert_eq!(values::compress_identifier("100%", "width", 1), "100%");
}

#[test]
fn test_non_dimension_untouched() {
    assert_eq!(values::compress_identifier("0.5", "opacity", 1), "0.5");
    assert_eq!(values::compress_identifier("10deg", "rotate", 1), "10deg");
}

#[test]
fn test_hex_lowercase_and_shorten() {
    assert_eq!(values::compress_identifier("#FFFFFF", "color", 1), "#fff");
    assert_eq!(values::compress_identifier("#ffffee", "color", 1), "#ffe");
    assert_eq!(values::compress_identifier("#123456", "color", 1), "#123456");
    assert_eq!(values::compress_identifier("#ABC", "color", 1), "#abc");
}

#[test]
fn test_rgb_to_hex() {
    assert_eq!(values::compress_identifier("rgb(255,0,0)", "color", 1), "#f00");
    assert_eq!(
        values::compress_identifier("rgb(18,52,86)", "color", 1),
        "#123456"
    );
    assert_eq!(values::rgb_to_hex([1, 2, 3]), "#010203");
}

#[test]
fn test_url_quotes_stripped() {
    assert_eq!(
        values::compress_identifier("url(\"x.png\")", "background", 1),
        "url(x.png)"
    );
    assert_eq!(
        values::compress_identifier("url('x.png')", "background", 1),
        "url(x.png)"
    );
    assert_eq!(
        values::compress_identifier("url(x.png)", "background", 1),
        "url(x.png)"
    );
}

#[test]
fn test_none_collapses_for_zeroable_only() {
    assert_eq!(values::compress_identifier("none", "border", 1), "0");
    assert_eq!(values::compress_identifier("none", "outline", 1), "0");
    assert_eq!(values::compress_identifier("none", "-moz-border", 1), "0");
    // Not alone in the value, or not a zeroable property: unchanged.
    assert_eq!(values::compress_identifier("none", "border", 2), "none");
    assert_eq!(values::compress_identifier("none", "display", 1), "none");
}

#[test]
fn test_unvendor() {
    assert_eq!(values::unvendor("-moz-border"), "border");
    assert_eq!(values::unvendor("_height"), "height");
    assert_eq!(values::unvendor("*zoom"), "zoom");
    assert_eq!(values::unvendor("border"), "border");
}

// ========== Value compressor: declarations ==========

fn compressed_value(property: &str, value: &str) -> String {
    let mut decl = Declaration::new(property, value);
    values::compress_declaration(&mut decl);
    decl.value
}

#[test]
fn test_margin_collapse_four_to_one() {
    assert_eq!(compressed_value("margin", "10px 10px 10px 10px"), "10px");
}

#[test]
fn test_padding_collapse_four_to_two() {
    assert_eq!(compressed_value("padding", "1px 2px 1px 2px"), "1px 2px");
}

#[test]
fn test_no_collapse_for_other_shorthand() {
    assert_eq!(
        compressed_value("border-width", "1px 1px 1px 1px"),
        "1px 1px 1px 1px"
    );
}

#[test]
fn test_font_family_joined_with_commas() {
    assert_eq!(
        compressed_value("font-family", "Helvetica, \"Arial Black\" , sans-serif"),
        "Helvetica,Arial Black,sans-serif"
    );
}

#[test]
fn test_font_family_unterminated_quote_kept() {
    // An opening quote with no closing partner is left verbatim, even
    // when the token ends on a multibyte character.
    let tokens = values::value_split("font-family", "\"あ");
    assert_eq!(tokens, vec!["\"あ"]);
    let tokens = values::value_split("font-family", "'Arial, sans-serif");
    assert_eq!(tokens, vec!["'Arial", "sans-serif"]);
}

#[test]
fn test_important_whitespace_stripped() {
    assert_eq!(compressed_value("color", "red !important"), "red!important");
}

#[test]
fn test_function_whitespace_collapsed() {
    assert_eq!(
        compressed_value("color", "rgb( 255, 0 , 0 )"),
        "#f00"
    );
    assert_eq!(
        compressed_value("background", "rgba( 0, 0, 0, 0.5 )"),
        "rgba(0,0,0,0.5)"
    );
}

#[test]
fn test_quoted_value_untouched() {
    assert_eq!(
        compressed_value("content", "\"a , b\""),
        "\"a , b\""
    );
}

#[test]
fn test_value_split_respects_parens() {
    let tokens = values::value_split("background", "url(a b.png) no-repeat");
    assert_eq!(tokens, vec!["url(a b.png)", "no-repeat"]);
}

#[test]
fn test_selector_compression() {
    assert_eq!(values::compress_selector("a   >  b"), "a>b");
    assert_eq!(values::compress_selector("div > p + span ~ i"), "div>p+span~i");
    assert_eq!(values::compress_selector("ul\n li"), "ul li");
}

// ========== Consolidation ==========

#[test]
fn test_merge_same_declarations() {
    assert_eq!(condense("a{color:red}b{color:red}"), "a,b{color:red}");
}

#[test]
fn test_merge_lands_at_last_position() {
    assert_eq!(
        condense("a{color:red}z{margin:0}b{color:red}"),
        "z{margin:0}a,b{color:red}"
    );
}

#[test]
fn test_merge_same_selectors() {
    assert_eq!(condense("a{color:red}a{margin:0}"), "a{color:red;margin:0}");
}

#[test]
fn test_media_blocks_merged() {
    assert_eq!(
        condense("@media screen{a{color:red}}@media screen{b{color:blue}}"),
        "@media screen{a{color:red}b{color:blue}}"
    );
}

#[test]
fn test_media_conditions_kept_apart() {
    let out = condense("@media screen{a{color:red}}@media print{b{color:blue}}");
    assert_eq!(out.matches("@media").count(), 2);
}

#[test]
fn test_merge_inside_media() {
    assert_eq!(
        condense("@media screen{a{color:red}b{color:red}}"),
        "@media screen{a,b{color:red}}"
    );
}

#[test]
fn test_selector_dedupe() {
    assert_eq!(condense("a{color:red}a{color:red}"), "a{color:red}");
}

#[test]
fn test_font_face_dedup_first_wins() {
    let out = condense(
        "@font-face{font-family:X;src:url(a.woff)}@font-face{font-family:X;src:url(b.woff)}",
    );
    assert_eq!(out, "@font-face{font-family:X;src:url(a.woff)}");
}

#[test]
fn test_font_face_distinct_weights_kept() {
    let out = condense(
        "@font-face{font-family:X;font-weight:400;src:url(a.woff)}\
         @font-face{font-family:X;font-weight:700;src:url(b.woff)}",
    );
    assert_eq!(out.matches("@font-face").count(), 2);
}

#[test]
fn test_charset_first_and_single() {
    assert_eq!(
        condense("a{color:red}@charset \"utf-8\";"),
        "@charset \"utf-8\";a{color:red}"
    );
    let out = condense("@charset \"utf-8\";@charset \"latin1\";a{color:red}");
    assert_eq!(out.matches("@charset").count(), 1);
    assert!(out.contains("utf-8"));
}

#[test]
fn test_import_ordered_before_rules() {
    assert_eq!(
        condense("a{color:red}@import url(x.css);"),
        "@import url(x.css);a{color:red}"
    );
}

#[test]
fn test_empty_rule_elided() {
    assert_eq!(condense("a{}"), "");
    assert_eq!(condense("a{}b{color:red}"), "b{color:red}");
}

#[test]
fn test_selectors_sorted() {
    assert_eq!(condense("b,a{color:red}"), "a,b{color:red}");
}

#[test]
fn test_declarations_sorted() {
    assert_eq!(
        condense("a{padding:1px;margin:2px}"),
        "a{margin:2px;padding:1px}"
    );
}

#[test]
fn test_vendor_prefixes_sort_together() {
    assert_eq!(
        condense("a{zoom:1;-moz-box-shadow:none;box-shadow:none}"),
        "a{-moz-box-shadow:none;box-shadow:none;zoom:1}"
    );
}

#[test]
fn test_keyframes_preserved_and_compressed() {
    assert_eq!(
        condense("@keyframes fade { from { opacity: 0 } to { opacity: 1 } }"),
        "@keyframes fade{from{opacity:0}to{opacity:1}}"
    );
}

#[test]
fn test_keyframes_vendor_not_merged() {
    let out = condense(
        "@-webkit-keyframes fade{from{opacity:0}}@keyframes fade{from{opacity:0}}",
    );
    assert!(out.contains("@-webkit-keyframes fade"));
    assert!(out.contains("@keyframes fade"));
}

#[test]
fn test_safe_mode_never_merges() {
    let out = compress("a{color:red}b{color:red}", &Options::safe());
    assert_eq!(out, "a{color:red}b{color:red}");
    let media = compress(
        "@media screen{a{color:red}}@media screen{b{color:blue}}",
        &Options::safe(),
    );
    assert_eq!(media.matches("@media").count(), 2);
}

#[test]
fn test_safe_mode_still_compresses_values() {
    let out = compress("a{color:#FFFFFF}", &Options::safe());
    assert_eq!(out, "a{color:#fff}");
}

#[test]
fn test_sort_disabled() {
    let opts = Options {
        sort: false,
        ..Options::default()
    };
    assert_eq!(compress("b,a{color:red}", &opts), "b,a{color:red}");
    assert_eq!(
        compress("a{padding:1px;margin:2px}", &opts),
        "a{padding:1px;margin:2px}"
    );
}

// ========== Serializer ==========

#[test]
fn test_pretty_output() {
    let out = compress("a{color:red}b{color:blue}", &Options::pretty());
    assert_eq!(out, "a {\n  color: red\n}\n\nb {\n  color: blue\n}");
}

#[test]
fn test_pretty_media_indents() {
    let out = compress("@media screen{a{color:red}}", &Options::pretty());
    assert!(out.starts_with("@media screen {\n"));
    assert!(out.ends_with("\n}"));
}

#[test]
fn test_pretty_keyframes() {
    let out = compress(
        "@keyframes fade{from{opacity:0}to{opacity:1}}",
        &Options::pretty(),
    );
    assert_eq!(
        out,
        "@keyframes fade {\n  from {\n    opacity: 0\n  }\n\n  to {\n    opacity: 1\n  }\n}"
    );
}

#[test]
fn test_stringify_charset_and_import() {
    let sheet = cc_parser::parse("@charset \"utf-8\";@import url(x.css);");
    assert_eq!(
        stringify(&sheet, true),
        "@charset \"utf-8\";@import url(x.css);"
    );
}

// ========== Pipeline ==========

#[test]
fn test_comments_stripped() {
    assert_eq!(condense("/* x */a{color:red}/* y */"), "a{color:red}");
}

#[test]
fn test_bang_comments_preserved() {
    let out = condense("/*! (c) 2012 */\na{color:red}");
    assert_eq!(out, "/*! (c) 2012 */\na{color:red}");
}

#[test]
fn test_bang_comments_keep_order() {
    let out = condense("/*! one */a{color:red}/*! two */b{color:blue}");
    assert!(out.starts_with("/*! one */\n/*! two */\n"));
}

#[test]
fn test_ie5_mac_hack_survives() {
    let out = condense("/*\\*/.a{color:red}/**/");
    assert_eq!(out, "/*\\*/.a{color:red}/**/");
}

#[test]
fn test_line_breaks_option() {
    let opts = Options {
        line_breaks: true,
        ..Options::default()
    };
    assert_eq!(compress("a{color:red}b{color:blue}", &opts), "a{color:red}\nb{color:blue}\n");
}

#[test]
fn test_debug_dump_prepended() {
    let opts = Options {
        debug: true,
        ..Options::default()
    };
    let out = compress("a{color:red}", &opts);
    assert!(out.starts_with("/*\n"));
    assert!(out.ends_with("a{color:red}"));
}

#[test]
fn test_idempotent_under_defaults() {
    let inputs = [
        "a{color:red}b{color:red}",
        "@media screen{a{color:red}}@media screen{b{color:blue}}",
        "a{margin:10px 10px 10px 10px;color:#FFFFFF}",
    ];
    for input in inputs {
        let once = condense(input);
        let twice = condense(&once);
        assert_eq!(once, twice, "not idempotent for {input}");
    }
}

#[test]
fn test_round_trip_reparses_to_same_tree() {
    let out = condense("b , a{color:#FFFFFF;margin:0px}");
    let reparsed = cc_parser::parse(&out);
    assert_eq!(condense(&out), out);
    assert_eq!(reparsed.rules.len(), 1);
}

#[test]
fn test_common_value_shortenings() {
    assert_eq!(condense("a{color: #FFFFFF}"), "a{color:#fff}");
    assert_eq!(condense("a{margin: 10px 10px 10px 10px}"), "a{margin:10px}");
    assert_eq!(condense("a{width: 0.50em}"), "a{width:.5em}");
    assert_eq!(condense("a{border: none}"), "a{border:0}");
}

#[test]
fn test_font_family_unterminated_quote_survives_pipeline() {
    assert_eq!(condense("a{font-family:\"あ}"), "a{font-family:\"あ}");
}

#[test]
fn test_empty_input() {
    assert_eq!(condense(""), "");
}

#[test]
fn test_result_statistics() {
    let pipeline = CondensePipeline::default();
    let result = pipeline.condense("a {  color : #FFFFFF ; }");
    assert!(result.condensed_len <= result.original_len);
    assert!(result.ratio() <= 1.0);
    assert!(result.reduction_pct >= 0.0);
    assert_eq!(result.output, "a{color:#fff}");
}

#[test]
fn test_truncated_input_yields_partial_output() {
    assert_eq!(condense("a{color:red}b{color:blue"), "a{color:red}");
}

// ========== Comment helpers ==========

#[test]
fn test_extract_bang_comments() {
    let parts = comments::extract_bang_comments("/*! keep */ a{} /* drop */");
    assert_eq!(parts.comments, vec!["/*! keep */\n"]);
    assert!(!parts.code.contains("keep"));
    assert!(parts.code.contains("drop"));
}

#[test]
fn test_prepare_runs_passes_in_order() {
    let parts = comments::prepare("/*! keep */ /*\\*/ .a{} /**/ /* drop */");
    assert_eq!(parts.comments, vec!["/*! keep */\n"]);
    assert!(parts.code.contains("ie5machack{start:1}"));
    assert!(parts.code.contains("ie5machack{end:1}"));
    assert!(!parts.code.contains("drop"));
}

#[test]
fn test_strip_comments() {
    assert_eq!(comments::strip_comments("a/* x */b/* y */c"), "abc");
}

#[test]
fn test_ie5_sentinels_round_trip() {
    let protected = comments::protect_ie5_hacks("/*\\*/ x /**/");
    assert!(protected.contains("ie5machack{start:1}"));
    assert!(protected.contains("ie5machack{end:1}"));
    let restored = comments::restore_ie5_hacks(&protected);
    assert_eq!(restored, "/*\\*/x/**/");
}
