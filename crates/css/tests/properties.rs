//! End-to-end tests for quill-css
//!
//! Parses stylesheets, edits them and checks the rendered output.

use quill_css::value::{Value, ValueParser};
use quill_css::cursor::Cursor;
use quill_css::{
    parse, parse_with_settings, render, CssError, Declaration, Document, ListSeparator, OutputFormat,
    Position, Positioned, Selector, Settings, Statement,
};

const STYLESHEETS: &[&str] = &[
    "p { color: red; }",
    "h1, h2 > span.title { font: italic bold 12px/1.6 \"Helvetica Neue\", Arial, sans-serif; margin: 0 auto !important }",
    "@import url(\"print.css\") print;\n@charset \"utf-8\";",
    "@media screen and (max-width: 600px) { .nav { display: none } a:hover { color: #070 } }",
    "@font-face { font-family: Quill; src: url(quill.woff2) format(\"woff2\"), url(quill.woff) format(\"woff\") }",
    "@keyframes pulse { from { opacity: 0 } 50% { opacity: .5 } to { opacity: 1 } }",
    "div { width: calc(100% - (2 * 1.5em)); background: rgba(0, 0, 0, .25) url(bg.png) no-repeat; }",
    "a[href^=\"http\"]::after { content: \"\\2192\"; transition: color .3s ease-in, opacity 1s }",
    ".grid { grid-template-columns: [full-start] 1fr [main-start] 2fr [main-end full-end]; color: rgb(10% 20% 30% / 50%) }",
    "p::before { content: \"\\A 1\"; white-space: pre }",
];

fn strict() -> Settings {
    Settings::default().be_strict()
}

fn value(text: &str, property: &str) -> Value {
    let mut cursor = Cursor::new(text, Settings::default(), 1);
    ValueParser::parse_value(&mut cursor, ValueParser::list_delimiters_for_property(property)).unwrap()
}

fn declarations(document: &Document, format: &OutputFormat) -> Vec<String> {
    document
        .all_rule_sets()
        .into_iter()
        .flat_map(|rule_set| rule_set.declarations(None))
        .map(|declaration| quill_css::Render::render(declaration, format).unwrap())
        .collect()
}

#[test]
fn test_compact_round_trip_keeps_declarations() {
    let compact = OutputFormat::compact();
    for css in STYLESHEETS.iter().filter(|css| !css.contains("@charset")) {
        let document = parse_with_settings(css, strict()).unwrap();
        let rendered = render(&document, Some(&compact)).unwrap();
        let reparsed = parse_with_settings(&rendered, strict()).unwrap();
        assert_eq!(
            declarations(&document, &compact),
            declarations(&reparsed, &compact),
            "round trip changed {}",
            css
        );
    }
}

#[test]
fn test_rendering_is_idempotent() {
    let formats = [OutputFormat::plain(), OutputFormat::compact(), OutputFormat::pretty()];
    for css in STYLESHEETS {
        for format in &formats {
            let once = render(&parse(css).unwrap(), Some(format)).unwrap();
            let twice = render(&parse(&once).unwrap(), Some(format)).unwrap();
            assert_eq!(once, twice, "rendering {} is not stable", css);
        }
    }
}

#[test]
fn test_specificity() {
    assert_eq!(Selector::new("a").specificity(), 1);
    assert_eq!(Selector::new(".x").specificity(), 10);
    assert_eq!(Selector::new("#id").specificity(), 100);
    assert_eq!(Selector::new("li.green").specificity(), 11);
    assert_eq!(Selector::new("ol li::before").specificity(), 3);
}

#[test]
fn test_applied_declaration_last_wins() {
    let document = parse("p{border-width:1px;border-width:2px;}").unwrap();
    let rule_set = document.all_rule_sets()[0];
    let applied = rule_set.applied_declaration("border-width").unwrap();
    assert_eq!(
        quill_css::Render::render(applied, &OutputFormat::default()).unwrap(),
        "border-width: 2px;"
    );
}

#[test]
fn test_applied_declaration_respects_important() {
    let document = parse("p{color:red !important;color:blue}").unwrap();
    let applied = document.all_rule_sets()[0].applied_declaration("color").unwrap();
    assert!(applied.is_important());
    assert_eq!(applied.value().and_then(Value::as_keyword), Some("red"));
}

#[test]
fn test_prefix_matching() {
    let document = parse("p { font: 12px serif; font-size: 14px; color: red }").unwrap();
    let rule_set = document.all_rule_sets()[0];
    let names = |pattern| {
        rule_set
            .declarations(Some(pattern))
            .iter()
            .map(|d| d.name().to_string())
            .collect::<Vec<_>>()
    };
    assert_eq!(names("font-"), ["font", "font-size"]);
    assert_eq!(names("font"), ["font"]);
}

#[test]
fn test_font_shorthand_folding() {
    let folded = value("bold 12px/1.6 serif", "font");
    let list = folded.as_list().unwrap();
    assert_eq!(list.separator(), ListSeparator::Space);
    assert_eq!(list.len(), 3);
    assert_eq!(list.components()[0].as_keyword(), Some("bold"));
    let slashed = list.components()[1].as_list().unwrap();
    assert_eq!(slashed.separator(), ListSeparator::Slash);
    assert_eq!(slashed.components()[0].as_size().unwrap().unit(), Some("px"));
    assert_eq!(slashed.components()[1].as_size().unwrap().magnitude(), 1.6);
    assert_eq!(list.components()[2].as_keyword(), Some("serif"));
}

#[test]
fn test_calc_operator_spacing() {
    let result = parse_with_settings("div { width: calc(100%-20px) }", strict());
    assert!(matches!(result, Err(CssError::UnexpectedToken { .. })));

    let document = parse_with_settings("div { width: calc(100% - 20px) }", strict()).unwrap();
    assert_eq!(render(&document, None).unwrap(), "div {width: calc(100% - 20px);}");
}

#[test]
fn test_color_round_trip() {
    let document = parse("a { color: #070 } b { color: rgb(0,118,0) }").unwrap();
    assert_eq!(
        render(&document, None).unwrap(),
        "a {color: #070;}\nb {color: #007600;}"
    );

    let functional = OutputFormat::default().with_rgb_hash_notation(false);
    assert_eq!(
        render(&document, Some(&functional)).unwrap(),
        "a {color: rgb(0,119,0);}\nb {color: rgb(0,118,0);}"
    );
}

#[test]
fn test_sibling_insertion_renumbers_columns() {
    let mut document = parse("p { color: red; margin: 0; padding: 0 }").unwrap();
    let rule_set = document.all_rule_sets_mut().remove(0);
    let index = rule_set.add_declaration(
        Declaration::new("border").with_value(Value::keyword("none")),
        Some(1),
    );
    assert_eq!(index, 1);

    let declarations = rule_set.declarations(None);
    let names: Vec<_> = declarations.iter().map(|d| d.name()).collect();
    assert_eq!(names, ["color", "border", "margin", "padding"]);

    let mut positions: Vec<Position> = declarations.iter().filter_map(|d| d.position()).collect();
    assert_eq!(positions.len(), 4);
    assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    positions.dedup();
    assert_eq!(positions.len(), 4);
}

#[test]
fn test_malformed_declaration_lenient_and_strict() {
    let css = "p { color: red; width: ; margin: 0 }";

    let document = parse(css).unwrap();
    let names: Vec<_> = document.all_rule_sets()[0]
        .declarations(None)
        .iter()
        .map(|d| d.name().to_string())
        .collect();
    assert_eq!(names, ["color", "margin"]);

    let result = parse_with_settings(css, strict());
    assert!(matches!(result, Err(CssError::UnexpectedToken { .. })));
}

#[test]
fn test_edit_between_renders() {
    let mut document = parse("a { color: red } b { color: blue }").unwrap();
    document.all_declaration_blocks_mut()[0]
        .selectors_mut()
        .push(Selector::new("em"));
    document.list_mut().remove(1);
    assert_eq!(
        render(&document, Some(&OutputFormat::compact())).unwrap(),
        "a,em{color:red}"
    );
}

#[test]
fn test_nested_pretty_output() {
    let document = parse("@media print { a { color: red; margin: 0 } }").unwrap();
    assert!(matches!(document.contents()[0], Statement::AtRuleBlockList(_)));
    assert_eq!(
        render(&document, Some(&OutputFormat::pretty())).unwrap(),
        "\n@media print {\n\ta {\n\t\tcolor: red;\n\t\tmargin: 0;\n\t}\n}"
    );
}

#[test]
fn test_render_failure_can_be_ignored() {
    let mut document = parse("a { color: red } b { color: blue }").unwrap();
    document.all_declaration_blocks_mut()[0].set_selectors(Vec::new());
    assert!(matches!(render(&document, None), Err(CssError::Render { .. })));

    let lenient = OutputFormat::compact().with_ignore_exceptions(true);
    assert_eq!(render(&document, Some(&lenient)).unwrap(), "b{color:blue}");
}
