use super::radix::{BASE_LETTERS, base_of, digit_char, digit_value};

#[test]
fn base_letters() {
    assert_eq!(base_of(b'u'), Some(1));
    assert_eq!(base_of(b'b'), Some(2));
    assert_eq!(base_of(b'd'), Some(10));
    assert_eq!(base_of(b'U'), Some(11));
    assert_eq!(base_of(b'h'), Some(6));
    assert_eq!(base_of(b'H'), Some(16));
    assert_eq!(base_of(b'v'), Some(20));
    assert_eq!(base_of(b'x'), None);
    assert_eq!(base_of(b'0'), None);
}

#[test]
fn every_letter_names_its_position() {
    for (i, &letter) in BASE_LETTERS.iter().enumerate() {
        assert_eq!(base_of(letter), Some(i as u32 + 1), "{}", letter as char);
    }
}

#[test]
fn digits() {
    assert_eq!(digit_char(0), b'0');
    assert_eq!(digit_char(9), b'9');
    assert_eq!(digit_char(15), b'F');
    assert_eq!(digit_char(19), b'J');

    assert_eq!(digit_value(b'7'), Some(7));
    assert_eq!(digit_value(b'f'), Some(15));
    assert_eq!(digit_value(b'F'), Some(15));
    assert_eq!(digit_value(b'j'), Some(19));
    assert_eq!(digit_value(b'-'), None);
}
