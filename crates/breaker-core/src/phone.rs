//! Phone number helpers for the login flow.
//!
//! Numbers are entered as country code + area code + number, e.g.
//! `5516999999999`. Validation happens before any code is requested.

/// Minimum digits for a full international number.
pub const MIN_PHONE_DIGITS: usize = 10;
/// Maximum digits for a full international number.
pub const MAX_PHONE_DIGITS: usize = 15;

/// Sanitize raw input: keep digits and at most one leading `+`.
///
/// Everything else (spaces, dashes, parentheses, stray `+` characters) is
/// dropped.
pub fn sanitize(input: &str) -> String {
    let kept: String = input.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect();

    if let Some(rest) = kept.strip_prefix('+') {
        let digits: String = rest.chars().filter(char::is_ascii_digit).collect();
        format!("+{}", digits)
    } else {
        kept.chars().filter(char::is_ascii_digit).collect()
    }
}

/// Strip everything but digits.
pub fn digits_only(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

/// Whether `digits` is a valid full number: digits only, 10 to 15 long.
pub fn is_valid(digits: &str) -> bool {
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && (MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len())
}

/// Format a number for display.
///
/// 13-digit numbers (the common Brazilian mobile shape) render as
/// `+CC (AA) NNNNN-NNNN`; anything else is returned unchanged.
pub fn format_display(phone: &str) -> String {
    let digits = digits_only(phone);
    if digits.len() == 13 {
        format!(
            "+{} ({}) {}-{}",
            &digits[0..2],
            &digits[2..4],
            &digits[4..9],
            &digits[9..]
        )
    } else {
        phone.to_string()
    }
}
