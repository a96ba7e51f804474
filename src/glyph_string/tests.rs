// src/glyph_string/tests.rs

use super::*;
use crate::glyph::Glyph;
use test_log::test;

const RED: Rgba = Rgba::opaque(255, 0, 0);

fn texts(lines: &[GlyphString]) -> Vec<String> {
    lines.iter().map(GlyphString::text).collect()
}

#[test]
fn escape_colors_following_glyphs() {
    let s = GlyphString::of("\\e[255;000;000mHi").unwrap();
    assert_eq!(s.len(), 2);
    assert_eq!(s.text(), "Hi");
    assert!(s.iter().all(|g| g.fg() == RED));
    assert!(s.iter().all(|g| g.bg() == Rgba::TRANSPARENT));
}

#[test]
fn text_before_escape_stays_white() {
    let s = GlyphString::of("a\\e[000;128;255mb").unwrap();
    assert_eq!(s.text(), "ab");
    assert_eq!(s.get(0).unwrap().fg(), Rgba::WHITE);
    assert_eq!(s.get(1).unwrap().fg(), Rgba::opaque(0, 128, 255));
}

#[test]
fn consecutive_escapes_apply_the_last_color() {
    let s = GlyphString::of("\\e[001;002;003m\\e[004;005;006mx").unwrap();
    assert_eq!(s.len(), 1);
    assert_eq!(s.get(0).unwrap().fg(), Rgba::opaque(4, 5, 6));
}

#[test]
fn escape_at_end_emits_nothing() {
    let s = GlyphString::of("ok\\e[010;010;010m").unwrap();
    assert_eq!(s.text(), "ok");
}

#[test]
fn backslash_without_e_is_literal() {
    let s = GlyphString::of("a\\b\\").unwrap();
    assert_eq!(s.text(), "a\\b\\");
}

#[test]
fn truncated_escape_is_an_error() {
    let err = GlyphString::of("xy\\e[255;00").unwrap_err();
    assert_eq!(
        err,
        GridError::MalformedEscape {
            offset: 2,
            reason: "escape sequence is truncated".to_string(),
        }
    );
}

#[test]
fn non_digit_component_is_an_error() {
    assert!(matches!(
        GlyphString::of("\\e[2a5;000;000mX"),
        Err(GridError::MalformedEscape { offset: 0, .. })
    ));
}

#[test]
fn component_above_255_is_an_error() {
    assert!(matches!(
        GlyphString::of("\\e[256;000;000mX"),
        Err(GridError::MalformedEscape { .. })
    ));
}

#[test]
fn wrong_delimiters_are_errors() {
    assert!(GlyphString::of("\\e(255;000;000mX").is_err());
    assert!(GlyphString::of("\\e[255,000;000mX").is_err());
    assert!(GlyphString::of("\\e[255;000;000nX").is_err());
}

#[test]
fn colorize_round_trips_through_parser() {
    let color = Rgba::opaque(10, 200, 7);
    let encoded = colorize("go", color);
    assert_eq!(encoded, "\\e[010;200;007mgo\\e[255;255;255m");
    let s = GlyphString::of(&(encoded + "!")).unwrap();
    assert_eq!(s.text(), "go!");
    assert_eq!(s.get(0).unwrap().fg(), color);
    assert_eq!(s.get(2).unwrap().fg(), Rgba::WHITE);
}

#[test]
fn transforms_leave_receiver_untouched() {
    let base = GlyphString::plain("abc", Rgba::WHITE);
    let x = Glyph::from('x');

    assert_eq!(base.append(x).text(), "abcx");
    assert_eq!(base.insert(1, x).text(), "axbc");
    assert_eq!(base.set(2, x).text(), "abx");
    assert_eq!(base.concat(&base).text(), "abcabc");
    assert_eq!(base.substring(1..3).text(), "bc");
    assert_eq!(base.text(), "abc");
}

#[test]
fn concat_keeps_each_sides_colors() {
    let red = GlyphString::plain("r", RED);
    let white = GlyphString::plain("w", Rgba::WHITE);
    let joined = red.concat(&white);
    assert_eq!(joined.get(0).unwrap().fg(), RED);
    assert_eq!(joined.get(1).unwrap().fg(), Rgba::WHITE);
}

#[test]
fn blank_is_spaces_in_default_colors() {
    let blank = GlyphString::blank(4);
    assert_eq!(blank.text(), "    ");
    assert!(blank.iter().all(|g| *g == crate::glyph::DEFAULT_GLYPH));
}

#[test]
fn overwrite_stops_at_end() {
    let base = GlyphString::blank(3);
    let (written, count) = base.overwrite(1, GlyphString::plain("xyz", RED).glyphs());
    assert_eq!(count, 2);
    assert_eq!(written.text(), " xy");
}

#[test]
fn wrap_breaks_at_space() {
    let s = GlyphString::plain("hello world", Rgba::WHITE);
    assert_eq!(texts(&s.wrap(5)), vec!["hello", "world"]);
}

#[test]
fn wrap_short_string_is_unchanged() {
    let s = GlyphString::plain("tiny", Rgba::WHITE);
    assert_eq!(texts(&s.wrap(10)), vec!["tiny"]);
}

#[test]
fn wrap_prefers_last_space_in_window() {
    let s = GlyphString::plain("aa bb cc dd", Rgba::WHITE);
    assert_eq!(texts(&s.wrap(5)), vec!["aa bb", "cc dd"]);
}

#[test]
fn wrap_hard_breaks_unbroken_runs() {
    let s = GlyphString::plain("abcdefghij", Rgba::WHITE);
    assert_eq!(texts(&s.wrap(4)), vec!["abcd", "efgh", "ij"]);
}

#[test]
fn wrap_zero_width_still_terminates() {
    let s = GlyphString::plain("abc", Rgba::WHITE);
    assert_eq!(texts(&s.wrap(0)), vec!["a", "b", "c"]);
}

#[test]
fn wrap_lines_fit_and_reassemble() {
    let samples = [
        "the quick brown fox jumps over the lazy dog",
        "a b c d e f g h i j k l m n o p",
        "lorem ipsum dolor sit amet consectetur",
    ];
    for text in samples {
        let s = GlyphString::plain(text, Rgba::WHITE);
        for max in 3..12 {
            let lines = s.wrap(max);
            assert!(lines.iter().all(|l| l.len() <= max), "{text:?} @ {max}");
            // With single spaces and every word fitting, each break drops one space.
            let words_fit = text.split(' ').all(|w| w.len() <= max);
            if words_fit {
                let rebuilt = texts(&lines).join(" ");
                assert_eq!(rebuilt, text, "max {max}");
            }
        }
    }
}
