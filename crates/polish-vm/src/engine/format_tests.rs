use polish_bytecode::Width;

use super::error::RuntimeError;
use super::format::sfmt;
use super::scan::scan;
use super::stack::Stack;

enum Arg<'a> {
    Num(u64, Width),
    Str(&'a str),
}

/// Push the operands bottom first, then the format, and run `sfmt`.
fn render(args: &[Arg], fmt: &str) -> Result<Stack, RuntimeError> {
    let mut stack = Stack::new(128);
    for arg in args {
        match *arg {
            Arg::Num(value, width) => stack.push_value(value, width)?,
            Arg::Str(s) => stack.push_string(s.as_bytes())?,
        }
    }
    stack.push_string(fmt.as_bytes())?;
    sfmt(&mut stack)?;
    Ok(stack)
}

fn text(args: &[Arg], fmt: &str) -> String {
    let stack = render(args, fmt).unwrap();
    let bytes = stack.as_bytes();
    assert_eq!(bytes[0], 0, "result must be a lone string: {bytes:?}");
    String::from_utf8(bytes[1..].to_vec()).unwrap()
}

#[test]
fn int_replaces_operand_and_format() {
    let stack = render(&[Arg::Num(42, Width::Int)], "%i").unwrap();

    assert_eq!(stack.as_bytes(), b"\x0042");
}

#[test]
fn literal_text_is_kept() {
    assert_eq!(text(&[Arg::Num(7, Width::Char)], "n=%c!"), "n=7!");
    assert_eq!(text(&[], "100%%"), "100%");
    assert_eq!(text(&[], "plain"), "plain");
}

#[test]
fn operands_are_read_nearest_first() {
    let args = [Arg::Num(1, Width::Int), Arg::Num(2, Width::Red)];

    assert_eq!(text(&args, "%r,%i"), "2,1");
}

#[test]
fn signed_directives() {
    assert_eq!(text(&[Arg::Num(0xFF, Width::Char)], "%C"), "-1");
    assert_eq!(text(&[Arg::Num(0xFF, Width::Char)], "%c"), "255");
    assert_eq!(text(&[Arg::Num(5, Width::Red)], "%+R"), "+5");
    assert_eq!(text(&[Arg::Num(5, Width::Red)], "%+r"), "+5");
    assert_eq!(text(&[Arg::Num(u64::MAX, Width::Long)], "%+L"), "-1");
}

#[test]
fn padding() {
    assert_eq!(text(&[Arg::Num(42, Width::Int)], "[%5i]"), "[   42]");
    assert_eq!(text(&[Arg::Num(42, Width::Int)], "[%05i]"), "[00042]");
    assert_eq!(text(&[Arg::Num(0xFE, Width::Char)], "[%05C]"), "[-0002]");
    assert_eq!(text(&[Arg::Num(0xFE, Width::Char)], "[%5C]"), "[   -2]");
    assert_eq!(text(&[Arg::Num(123, Width::Int)], "[%2i]"), "[123]");
}

#[test]
fn zero_padding_follows_sign() {
    let minus_42 = 42u64.wrapping_neg() & Width::Int.mask();
    let cases = [
        (minus_42, "%05I", "-0042"),
        (42, "%+05i", "+0042"),
        (42, "%+05I", "+0042"),
    ];
    for (value, fmt, expected) in cases {
        let rendered = text(&[Arg::Num(value, Width::Int)], fmt);
        assert_eq!(rendered, expected, "{fmt}");

        let scanned = scan(rendered.as_bytes(), fmt.as_bytes()).unwrap();
        assert_eq!(scanned, (value as u32).to_le_bytes(), "{fmt}");
    }
}

#[test]
fn bases() {
    assert_eq!(text(&[Arg::Num(255, Width::Int)], "%iH"), "FF");
    assert_eq!(text(&[Arg::Num(5, Width::Int)], "%ib"), "101");
    assert_eq!(text(&[Arg::Num(0, Width::Int)], "%io"), "0");
    assert_eq!(text(&[Arg::Num(3, Width::Char)], "%cu"), "111");
    assert_eq!(text(&[Arg::Num(0, Width::Char)], "[%cu]"), "[]");
}

#[test]
fn signed_tally_uses_magnitude() {
    assert_eq!(text(&[Arg::Num(0xFFFF_FFFE, Width::Int)], "%Iu"), "-11");
    assert_eq!(text(&[Arg::Num(u64::MAX, Width::Long)], "%Lu"), "-1");
    assert_eq!(text(&[Arg::Num(0xFD, Width::Char)], "%+Cu"), "-111");
    assert_eq!(text(&[Arg::Num(2, Width::Char)], "%+Cu"), "+11");
}

#[test]
fn oversized_tally_overflows() {
    assert!(matches!(
        render(&[Arg::Num(1 << 40, Width::Long)], "%lu"),
        Err(RuntimeError::StackOverflow { .. })
    ));
    // Unsigned, so 0xFFFF_FFFE is a huge count rather than -2.
    assert!(matches!(
        render(&[Arg::Num(0xFFFF_FFFE, Width::Int)], "%iu"),
        Err(RuntimeError::StackOverflow { .. })
    ));
}

#[test]
fn strings() {
    assert_eq!(text(&[Arg::Str("world")], "hello %s"), "hello world");
    assert_eq!(text(&[Arg::Str("ab")], "[%4s]"), "[  ab]");
    assert_eq!(
        text(&[Arg::Str("x"), Arg::Num(3, Width::Char)], "%c%s"),
        "3x"
    );
}

#[test]
fn values_below_are_untouched() {
    let mut stack = Stack::new(64);
    stack.push_value(0xAA, Width::Char).unwrap();
    stack.push_value(9, Width::Char).unwrap();
    stack.push_string(b"%c").unwrap();

    sfmt(&mut stack).unwrap();

    assert_eq!(stack.as_bytes(), b"\xAA\x009");
}

#[test]
fn missing_operand_underflows() {
    assert!(matches!(
        render(&[], "%i"),
        Err(RuntimeError::StackUnderflow { .. })
    ));
}

#[test]
fn bad_directive() {
    assert_eq!(
        render(&[], "%k").err(),
        Some(RuntimeError::InvalidFormat("`%k` at 0".to_string()))
    );
}

#[test]
fn growth_past_capacity_overflows() {
    let mut stack = Stack::new(8);
    stack.push_value(0, Width::Char).unwrap();
    stack.push_string(b"%9c").unwrap();

    assert!(matches!(
        sfmt(&mut stack),
        Err(RuntimeError::StackOverflow { .. })
    ));
}
