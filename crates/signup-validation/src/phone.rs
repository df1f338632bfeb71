//! Phone plausibility for OTP delivery.
//!
//! Codes go out over SMS, so a number must reduce to something dialable:
//! 7 to 15 digits (the E.164 ceiling), with a country code either written
//! as a leading `+` or implied by a number long enough to carry one.
//! Formatting noise such as spaces, dashes and parentheses is tolerated on
//! input and stripped here.

const MIN_DIGITS: usize = 7;
const MAX_DIGITS: usize = 15;
/// Shortest digit count at which a bare number is assumed to already
/// include its country code.
const IMPLIED_PREFIX_DIGITS: usize = 10;

/// Reduce a number to `+<digits>`, the form handed to the OTP sender.
pub fn normalize(number: &str) -> Result<String, String> {
    let has_prefix = number.trim_start().starts_with('+');
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();

    match digits.len() {
        0 => Err("no digits in phone number".into()),
        n if n < MIN_DIGITS => Err(format!("{n} digits is too short to receive a code")),
        n if n > MAX_DIGITS => Err(format!("{n} digits exceeds the dialable maximum")),
        n if has_prefix || n >= IMPLIED_PREFIX_DIGITS => Ok(format!("+{digits}")),
        _ => Err("country code missing".into()),
    }
}

/// Whether the number has a plausible shape for OTP delivery.
pub fn is_plausible(number: &str) -> bool {
    normalize(number).is_ok()
}
