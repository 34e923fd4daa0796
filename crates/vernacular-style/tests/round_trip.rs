//! Round-trip and idempotence of localized source.

use std::sync::Arc;

use vernacular_style::prelude::*;

fn compiler() -> Compiler {
    Compiler::with_defaults().unwrap()
}

fn sample_rules() -> RuleMap {
    let mut rules = RuleMap::new();
    rules.set("body", "color", "red");
    rules.set("body", "background-color", "#ffffff");
    rules.set(".card", "width", "10px");
    rules.set(".card", "margin", "0 auto");
    rules.set(".card", "border-radius", "8px");
    rules.set(".card", "position", "absolute");
    rules.set("#sidebar", "transform", "rotate(45deg)");
    rules.set(".profile-card .avatar-anchor", "--layout-mode", "overlay");
    rules.set(".profile-card .avatar-anchor", "--anchor-position", "bottom-right");
    rules.set(".profile-card .avatar-anchor", "--offset-x", "5px");
    rules
}

#[test]
fn localized_text_parses_back_to_the_same_rules() {
    let compiler = compiler();
    let rules = sample_rules();

    let text = compiler.generator().to_localized(&rules);
    let parsed = compiler.parser().parse(&text);

    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(parsed.rules, rules);
}

#[test]
fn compound_values_survive_a_round_trip() {
    let compiler = compiler();
    let mut rules = RuleMap::new();
    rules.set(".card", "content", "\"a\" \"b\"");
    rules.set("#sidebar", "transform", "rotate(45deg) translate(10px, 5px)");
    rules.set("body", "font-family", "\"Noto Sans\", serif");

    let text = compiler.generator().to_localized(&rules);
    assert!(text.contains("内容：\"a\" \"b\""), "{text}");

    let parsed = compiler.parser().parse(&text);
    assert!(parsed.warnings.is_empty(), "{:?}", parsed.warnings);
    assert_eq!(parsed.rules, rules);

    let full_width = compiler.compile("#sidebar {\n变换: 旋转（45度） 平移（10像素, 5像素）\n}");
    assert_eq!(
        full_width.rules.value("#sidebar", "transform"),
        Some("rotate(45deg) translate(10px, 5px)")
    );
}

#[test]
fn regeneration_is_idempotent() {
    let compiler = compiler();
    let source = "\
卡片 {
  宽度: 12像素
  外边距: 0 自动
  背景颜色: 白色
}
头像框 {
  布局模式: 挤压
  锚点位置: 右上
}
";

    let once = compiler.compile(source);
    let twice = compiler.compile(&once.localized);
    let thrice = compiler.compile(&twice.localized);

    assert_eq!(once.rules, twice.rules);
    assert_eq!(twice.localized, thrice.localized);
    assert_eq!(once.canonical, twice.canonical);
}

#[test]
fn every_unit_round_trips() {
    let translator = ValueTranslator::new(Arc::new(Dictionary::builtin().unwrap()));
    let units: Vec<(String, String)> = translator
        .dictionary()
        .units()
        .pairs()
        .map(|(alias, canonical)| (alias.to_string(), canonical.to_string()))
        .collect();

    for (alias, canonical) in units {
        for n in [0, 7, 240, -3] {
            let localized = format!("{n}{alias}");
            let translated = translator.translate_value(&localized, "width");
            assert_eq!(translated, format!("{n}{canonical}"));
            assert_eq!(translator.format_value(&translated, "width"), localized);
        }
    }
}

#[test]
fn unknown_aliases_pass_through() {
    let dictionary = Dictionary::builtin().unwrap();

    assert_eq!(dictionary.resolve_property("未登记的属性"), "未登记的属性");
    assert_eq!(dictionary.resolve_element("未登记的元素"), "未登记的元素");
    assert_eq!(dictionary.resolve_keyword("未登记的关键字"), "未登记的关键字");
}

#[test]
fn four_equal_margins_emit_one_shorthand() {
    let compiler = compiler();
    let output = compiler.compile(
        "卡片 {\n上外边距: 4像素\n右外边距: 4像素\n下外边距: 4像素\n左外边距: 4像素\n}",
    );

    assert_eq!(output.canonical, ".card {\n  margin: 4px;\n}\n");
}

#[test]
fn user_aliases_extend_the_dialect() {
    let config = VernacularConfig::from_toml_str(
        r##"
        [aliases.elements]
        "评论区" = ".comments"

        [aliases.keywords]
        "朱红" = "#e34234"
        "##,
    )
    .unwrap();
    let compiler = Compiler::new(&config).unwrap();

    let output = compiler.compile("评论区 {\n颜色: 朱红\n}");
    assert_eq!(output.rules.value(".comments", "color"), Some("#e34234"));
    assert!(output.localized.contains("评论区 {"));
}
