//! Top-level component splitting for declaration values.
//!
//! Values like `旋转(45度) 缩放(1.2)` or `0 0 5像素 红色, 0 0 2像素 蓝色` are
//! split on whitespace and commas that are not nested inside a function,
//! parenthesis or quoted string. Tokenizing uses `cssparser`, which treats
//! non-ASCII text as identifier characters, so localized words and units stay
//! attached to their numbers. The same property means full-width `（）` are
//! never blocks to the tokenizer; their depth is tracked from the token text.

use cssparser::{ParseError as CssParseError, Parser, ParserInput, Token};

/// One top-level piece of a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Piece<'v> {
    /// A run of tokens without top-level whitespace or commas.
    Word(&'v str),
    /// A top-level comma.
    Comma,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Step {
    Space,
    Comma,
    Block,
    Other,
    End,
}

/// Split a value into top-level words and commas.
pub(crate) fn split(value: &str) -> Vec<Piece<'_>> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    let mut pieces = Vec::new();

    let mut start = parser.position();
    let mut end = start;
    let mut in_word = false;
    let mut full_width = 0usize;

    loop {
        let before = parser.position();
        let mut quoted = false;
        let step = match parser.next_including_whitespace() {
            Ok(Token::WhiteSpace(_)) => Step::Space,
            Ok(Token::Comma) => Step::Comma,
            Ok(Token::Function(_))
            | Ok(Token::ParenthesisBlock)
            | Ok(Token::SquareBracketBlock)
            | Ok(Token::CurlyBracketBlock) => Step::Block,
            Ok(Token::QuotedString(_)) => {
                quoted = true;
                Step::Other
            }
            Ok(_) => Step::Other,
            Err(_) => Step::End,
        };

        match step {
            Step::Space | Step::Comma if full_width > 0 => {
                end = parser.position();
            }
            Step::Block | Step::Other => {
                if !in_word {
                    start = before;
                    in_word = true;
                }
                if step == Step::Block {
                    // Consume the whole nested block so the word ends after it.
                    let _ = parser.parse_nested_block(|_| Ok::<_, CssParseError<'_, ()>>(()));
                }
                end = parser.position();
                if !quoted {
                    full_width = track_full_width(full_width, parser.slice(before..end));
                }
            }
            Step::Space | Step::Comma | Step::End => {
                if in_word {
                    pieces.push(Piece::Word(parser.slice(start..end)));
                    in_word = false;
                }
                if step == Step::Comma {
                    pieces.push(Piece::Comma);
                }
                if step == Step::End {
                    break;
                }
            }
        }
    }

    pieces
}

/// Open full-width parentheses after `text`, starting from `depth`.
fn track_full_width(depth: usize, text: &str) -> usize {
    text.chars().fold(depth, |depth, c| match c {
        '（' => depth + 1,
        '）' => depth.saturating_sub(1),
        _ => depth,
    })
}

/// Count the top-level words of a value.
pub(crate) fn word_count(value: &str) -> usize {
    split(value)
        .iter()
        .filter(|p| matches!(p, Piece::Word(_)))
        .count()
}

/// Join translated pieces back into a value, normalizing separators to
/// single spaces and `", "`.
pub(crate) fn join<S: AsRef<str>>(pieces: &[Option<S>]) -> String {
    let mut out = String::new();
    let mut need_space = false;
    for piece in pieces {
        match piece {
            Some(word) => {
                if need_space {
                    out.push(' ');
                }
                out.push_str(word.as_ref());
                need_space = true;
            }
            None => {
                out.push(',');
                need_space = true;
            }
        }
    }
    out
}

/// Translate each word with `f`, keeping commas, and join the result.
pub(crate) fn map_words<F>(value: &str, mut f: F) -> String
where
    F: FnMut(&str) -> String,
{
    let mapped: Vec<Option<String>> = split(value)
        .into_iter()
        .map(|piece| match piece {
            Piece::Word(word) => Some(f(word)),
            Piece::Comma => None,
        })
        .collect();
    join(&mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(value: &str) -> Vec<Piece<'_>> {
        split(value)
    }

    #[test]
    fn splits_on_top_level_whitespace() {
        assert_eq!(
            words("1像素 实线 红色"),
            vec![Piece::Word("1像素"), Piece::Word("实线"), Piece::Word("红色")]
        );
    }

    #[test]
    fn keeps_function_arguments_together() {
        assert_eq!(
            words("旋转(45度) 平移(10像素, 5像素)"),
            vec![Piece::Word("旋转(45度)"), Piece::Word("平移(10像素, 5像素)")]
        );
        assert_eq!(words("calc(50% + 5px)"), vec![Piece::Word("calc(50% + 5px)")]);
    }

    #[test]
    fn full_width_calls_keep_their_arguments() {
        assert_eq!(
            words("旋转（45度） 平移（10像素, 5像素）"),
            vec![Piece::Word("旋转（45度）"), Piece::Word("平移（10像素, 5像素）")]
        );
        assert_eq!(
            words("平移（1像素,2像素）, 缩放（2）"),
            vec![Piece::Word("平移（1像素,2像素）"), Piece::Comma, Piece::Word("缩放（2）")]
        );
        assert_eq!(words("\"（\" 红色"), vec![Piece::Word("\"（\""), Piece::Word("红色")]);
    }

    #[test]
    fn commas_are_separate_pieces() {
        assert_eq!(
            words("0 0 5px red,0 0 2px blue"),
            vec![
                Piece::Word("0"),
                Piece::Word("0"),
                Piece::Word("5px"),
                Piece::Word("red"),
                Piece::Comma,
                Piece::Word("0"),
                Piece::Word("0"),
                Piece::Word("2px"),
                Piece::Word("blue"),
            ]
        );
    }

    #[test]
    fn quoted_strings_stay_whole() {
        assert_eq!(
            words("\"Noto Sans\", serif"),
            vec![Piece::Word("\"Noto Sans\""), Piece::Comma, Piece::Word("serif")]
        );
    }

    #[test]
    fn join_normalizes_separators() {
        assert_eq!(map_words("a ,b   c", str::to_uppercase), "A, B C");
        assert_eq!(word_count("  "), 0);
        assert_eq!(word_count("url(a b.png) no-repeat"), 2);
    }
}
