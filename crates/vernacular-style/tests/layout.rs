//! Layout intent scenarios through the full compile pipeline.

use vernacular_style::prelude::*;

const ANCHOR: &str = ".profile-card .avatar-anchor";

fn compile(source: &str) -> CompileOutput {
    Compiler::with_defaults().unwrap().compile(source)
}

#[test]
fn overlay_bottom_right_offsets_from_the_right() {
    let output = compile("头像框 {\n布局模式: 悬浮\n锚点位置: 下右\n水平偏移: 5像素\n垂直偏移: 0像素\n}");

    let container = output.expanded.get(ANCHOR).unwrap();
    assert_eq!(container.get("position"), Some("absolute"));
    assert_eq!(container.get("right"), Some("5px"));
    assert_eq!(container.get("bottom"), Some("0px"));
    assert_eq!(container.get("left"), Some("auto"));
    assert!(output.canonical.contains("  right: 5px;\n"));
}

#[test]
fn squeeze_right_top_flows_as_a_row_and_comes_last() {
    let output = compile("头像框 {\n布局模式: 挤压\n锚点位置: 右上\n}");

    assert_eq!(output.expanded.value(".profile-card", "display"), Some("flex"));
    assert_eq!(output.expanded.value(".profile-card", "flex-direction"), Some("row"));
    assert_eq!(output.expanded.value(ANCHOR, "order"), Some("1"));
    assert_eq!(output.expanded.value(ANCHOR, "position"), Some("static"));
}

#[test]
fn squeeze_top_left_flows_as_a_column_in_dom_order() {
    let output = compile("头像框 {\n布局模式: 挤压\n锚点位置: 上左\n}");

    assert_eq!(output.expanded.value(".profile-card", "flex-direction"), Some("column"));
    assert_eq!(output.expanded.value(ANCHOR, "order"), None);
}

#[test]
fn switching_to_squeeze_drops_overlay_rotation() {
    let compiler = Compiler::with_defaults().unwrap();

    let overlay = compiler.compile("头像框 {\n布局模式: 悬浮\n旋转角度: 30度\n}");
    assert_eq!(overlay.expanded.value(ANCHOR, "transform"), Some("rotate(30deg)"));

    let squeeze = compiler.compile("头像框 {\n布局模式: 挤压\n旋转角度: 0度\n}");
    assert_eq!(squeeze.expanded.value(ANCHOR, "transform"), Some("none"));
}

#[test]
fn visual_properties_move_to_the_content_selector() {
    let output = compile("头像框 {\n布局模式: 悬浮\n宽度: 64像素\n}");

    let content = format!("{ANCHOR} > .anchor-content");
    assert_eq!(output.expanded.value(&content, "width"), Some("64px"));
    assert_eq!(output.expanded.value(ANCHOR, "width"), None);
    // The authored rule is what gets redisplayed.
    assert_eq!(output.rules.value(ANCHOR, "width"), Some("64px"));
}

#[test]
fn rules_without_intent_are_untouched() {
    let output = compile("卡片 {\n宽度: 1像素\n}");
    assert_eq!(output.expanded, output.rules);
}
