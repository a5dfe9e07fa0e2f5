//! Line normalization, tokenizing, and operand shape checks.
//!
//! Shape checks are purely syntactic. Whether a register name exists or a
//! literal fits is decided later by the encoder, so a line that has the
//! right shape but a bad operand fails instead of falling through to a
//! later form.

/// Replaces commas with spaces, collapses whitespace runs, lowercases, and
/// trims.
#[must_use]
pub fn normalize(line: &str) -> String {
    line.replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// A normalized line split into mnemonic and operand tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine<'a> {
    /// First token.
    pub mnemonic: &'a str,
    /// Remaining tokens in source order.
    pub operands: Vec<&'a str>,
}

/// Splits a normalized line on spaces. Returns `None` for an empty line.
#[must_use]
pub fn tokenize(normalized: &str) -> Option<TokenizedLine<'_>> {
    let mut tokens = normalized.split(' ').filter(|token| !token.is_empty());
    let mnemonic = tokens.next()?;
    Some(TokenizedLine {
        mnemonic,
        operands: tokens.collect(),
    })
}

/// Syntactic class an operand token must belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandShape {
    /// `$` followed by word characters.
    Register,
    /// Decimal or `0x` hex digits, no sign.
    Unsigned,
    /// [`OperandShape::Unsigned`] with an optional leading `-`.
    Signed,
    /// `<signed>($reg)`.
    Memory,
}

impl OperandShape {
    /// Returns `true` when `token` has this shape.
    #[must_use]
    pub fn matches(self, token: &str) -> bool {
        match self {
            Self::Register => is_register_token(token),
            Self::Unsigned => is_unsigned_token(token),
            Self::Signed => is_signed_token(token),
            Self::Memory => split_memory(token).is_some(),
        }
    }
}

fn is_register_token(token: &str) -> bool {
    token.strip_prefix('$').is_some_and(|name| {
        !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
    })
}

fn is_unsigned_token(token: &str) -> bool {
    let digits = token.strip_prefix("0x").unwrap_or(token);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_hexdigit())
}

fn is_signed_token(token: &str) -> bool {
    is_unsigned_token(token.strip_prefix('-').unwrap_or(token))
}

/// Splits `imm($reg)` into its offset and base tokens.
#[must_use]
pub fn split_memory(token: &str) -> Option<(&str, &str)> {
    let (offset, rest) = token.split_once('(')?;
    let base = rest.strip_suffix(')')?;
    (is_signed_token(offset) && is_register_token(base)).then_some((offset, base))
}

/// Parses a decimal or `0x` hex literal with an optional leading `-`.
///
/// Tokens that pass the shape check but carry hex digits without the `0x`
/// prefix (`ff`) are rejected, as are values that overflow `i64`.
#[must_use]
pub fn parse_literal(token: &str) -> Option<i64> {
    let (negative, body) = token
        .strip_prefix('-')
        .map_or((false, token), |rest| (true, rest));
    let magnitude = match body.strip_prefix("0x") {
        Some(hex) if !hex.is_empty() => i64::from_str_radix(hex, 16).ok()?,
        Some(_) => return None,
        None if !body.is_empty() && body.chars().all(|c| c.is_ascii_digit()) => {
            body.parse::<i64>().ok()?
        }
        None => return None,
    };
    Some(if negative { -magnitude } else { magnitude })
}
