//! Cell address codec: `"B7"` ↔ 0-based `(row, col)`.
//!
//! Column letters are a base-26 digit string with digits 1–26 and no zero
//! digit: "A" = 1, ..., "Z" = 26, "AA" = 27. Row numbers are 1-based in
//! the textual form, 0-based internally.

use crate::error::{BindError, BindResult};

/// Convert column letters to a 0-based column index.
/// "A" → 0, "Z" → 25, "AA" → 26.
pub fn column_index(letters: &str) -> BindResult<usize> {
    if letters.is_empty() || !letters.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(BindError::InvalidAddress(letters.to_string()));
    }
    let mut index = 0usize;
    for b in letters.bytes() {
        index = index * 26 + (b - b'A' + 1) as usize;
    }
    Ok(index - 1)
}

/// Convert a 0-based column index to column letters.
/// 0 → "A", 25 → "Z", 26 → "AA".
pub fn column_letters(col: usize) -> String {
    let mut letters = String::new();
    let mut n = col;
    loop {
        letters.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters
}

/// Parse a textual address into 0-based `(row, col)`.
/// "A1" → (0, 0), "AA100" → (99, 26).
pub fn decode(address: &str) -> BindResult<(usize, usize)> {
    let letters_end = address
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(address.len());
    let (letters, digits) = address.split_at(letters_end);

    if letters.is_empty() || digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BindError::InvalidAddress(address.to_string()));
    }

    let row: usize = digits
        .parse()
        .map_err(|_| BindError::InvalidAddress(address.to_string()))?;
    if row == 0 {
        // Row numbers are 1-based
        return Err(BindError::InvalidAddress(address.to_string()));
    }

    Ok((row - 1, column_index(letters)?))
}

/// Render 0-based `(row, col)` as a textual address.
/// (0, 0) → "A1", (99, 26) → "AA100".
pub fn encode(row: usize, col: usize) -> String {
    format!("{}{}", column_letters(col), row + 1)
}
