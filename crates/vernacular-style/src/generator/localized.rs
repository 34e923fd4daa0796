//! Localized source output, grouped by category.

use std::fmt::Write as _;

use crate::rules::{RuleMap, StyleRule};
use crate::translate::ValueTranslator;

pub(crate) fn generate(translator: &ValueTranslator, rules: &RuleMap) -> String {
    let dictionary = translator.dictionary();

    let mut titles: Vec<&str> = dictionary
        .categories_by_rank()
        .into_iter()
        .map(|c| c.title.as_str())
        .collect();
    titles.push(dictionary.fallback_category());

    let mut out = String::new();
    for title in titles {
        let bucket: Vec<&StyleRule> = rules
            .iter()
            .filter(|rule| dictionary.category_of(&rule.selector) == title)
            .collect();
        if bucket.is_empty() {
            continue;
        }

        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "# {title}");
        for rule in bucket {
            let _ = writeln!(out, "{} {{", dictionary.localize_element(&rule.selector));
            for (property, value) in rule.properties.iter() {
                let _ = writeln!(
                    out,
                    "  {}：{}",
                    dictionary.localize_property(property),
                    translator.format_value(value, property)
                );
            }
            out.push_str("}\n");
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::dictionary::Dictionary;

    #[test]
    fn groups_under_ranked_headers() {
        let translator = ValueTranslator::new(Arc::new(Dictionary::builtin().unwrap()));
        let mut rules = RuleMap::new();
        rules.set("#sidebar", "width", "10px");
        rules.set(".card", "border-radius", "8px");
        rules.set("body", "color", "red");

        let text = generate(&translator, &rules);
        assert_eq!(
            text,
            "# 页面结构\n页面 {\n  颜色：红色\n}\n\n\
             # 卡片组件\n卡片 {\n  圆角：8像素\n}\n\n\
             # 其他\n#sidebar {\n  宽度：10像素\n}\n"
        );
    }
}
