//! Input number classification and normalization.
//!
//! Decides, from the shape of the input alone, whether a number is a short
//! local number, a fixed-line number (answered by a [`LandlineStore`]), or a
//! mobile number (answered by the binary index).
//!
//! [`LandlineStore`]: crate::LandlineStore

use once_cell::sync::Lazy;
use regex::Regex;

use crate::binary::MOBILE_KEY_DIGITS;
use crate::{Error, Result};

/// Mobile number prefixes: second digit and the allowed third digits.
/// Every mobile number starts with `1`.
pub const MOBILE_PREFIXES: &[(char, &str)] = &[
    ('3', "0123456789"),
    ('4', "01456879"),
    ('5', "012356789"),
    ('6', "2567"),
    ('7', "012345678"),
    ('8', "0123456789"),
    ('9', "012356789"),
];

/// Mobile number, optionally with one leading `0`.
static MOBILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let prefixes = MOBILE_PREFIXES
        .iter()
        .map(|(second, thirds)| format!("{}[{}]", second, thirds))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"^0?1(?:{})[0-9]{{8}}$", prefixes)).unwrap()
});

/// Fixed-line shapes: area code + subscriber, bare subscriber, or
/// short service numbers.
static FIXED_LINE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
        ^(?:
            0[0-9]{2,3}[0-9]{7,8}   # area code + subscriber
            | [1-9][0-9]{6,7}       # subscriber without area code
            | 123[0-9]{2}           # 123xx service numbers
            | 1[0-2][0-9]           # 110, 120, ...
        )$
    ",
    )
    .unwrap()
});

/// Shape of an input number after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumberClass {
    /// Seven or eight characters: a local subscriber number
    Short { number: String },
    /// Fixed-line number; `prefixes` are the 3- and 4-digit area code candidates
    Landline {
        number: String,
        prefixes: [String; 2],
    },
    /// Mobile number, normalized, with its index key
    Mobile { number: String, key: u32 },
}

/// Check whether the third digit is valid after `1` + `second`.
pub fn is_mobile_prefix(second: char, third: char) -> bool {
    MOBILE_PREFIXES
        .iter()
        .any(|(s, thirds)| *s == second && thirds.contains(third))
}

/// Check whether `number` is a mobile number (optionally `0`-prefixed).
pub fn is_mobile(number: &str) -> bool {
    MOBILE_PATTERN.is_match(number)
}

/// Check whether `number` has a fixed-line shape.
pub fn is_fixed_line(number: &str) -> bool {
    FIXED_LINE_PATTERN.is_match(number)
}

/// Strip one leading `0` from a `0`-prefixed mobile number.
///
/// Any other input is returned unchanged.
pub fn strip_mobile_zero(number: &str) -> &str {
    match number.strip_prefix('0') {
        Some(rest) if is_mobile(number) => rest,
        _ => number,
    }
}

/// Parse a base-10 digit string into an index key.
pub fn parse_key(digits: &str) -> Result<u32> {
    if digits.is_empty() {
        return Err(Error::InvalidNumber(digits.to_string()));
    }
    digits.bytes().try_fold(0u32, |acc, b| {
        if !b.is_ascii_digit() {
            return Err(Error::InvalidNumber(digits.to_string()));
        }
        acc.checked_mul(10)
            .and_then(|n| n.checked_add(u32::from(b - b'0')))
            .ok_or_else(|| Error::InvalidNumber(digits.to_string()))
    })
}

/// Index key of a mobile number: its first seven digits.
pub fn mobile_key(number: &str) -> Result<u32> {
    let digits = number
        .get(..MOBILE_KEY_DIGITS)
        .ok_or_else(|| Error::InvalidNumber(number.to_string()))?;
    parse_key(digits)
}

/// Classify and normalize an input number.
///
/// Dispatch is by length only; this is not a general-purpose validator.
/// 7 or 8 characters is a short local number, whatever they are. 11 or 12
/// is tested as a `0`-prefixed or bare mobile number first, then as
/// fixed-line; anything that is neither is looked up as mobile by its first
/// seven characters, which must be digits ([`Error::InvalidNumber`]
/// otherwise). Any other length is [`Error::UnknownNumberFormat`].
pub fn classify(number: &str) -> Result<NumberClass> {
    match number.len() {
        7 | 8 | 11 | 12 => {}
        _ => return Err(Error::UnknownNumberFormat(number.to_string())),
    }

    if number.len() <= 8 {
        return Ok(NumberClass::Short {
            number: number.to_string(),
        });
    }

    if !is_mobile(number) && is_fixed_line(number) {
        return Ok(NumberClass::Landline {
            number: number.to_string(),
            prefixes: [number[..3].to_string(), number[..4].to_string()],
        });
    }

    let normalized = strip_mobile_zero(number);
    Ok(NumberClass::Mobile {
        number: normalized.to_string(),
        key: mobile_key(normalized)?,
    })
}
