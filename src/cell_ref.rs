//! Spreadsheet-style column names and cell references.
//!
//! Column names are bijective base-26 numerals over `A..=Z` with no zero
//! digit: 1 -> A, 26 -> Z, 27 -> AA, 702 -> ZZ, 703 -> AAA.

/// Convert a 1-based column number to its letter name.
///
/// Returns an empty string for `0`, which has no name.
pub fn column_name_for_number(number: usize) -> String {
    let mut letters = Vec::new();
    let mut n = number;
    while n > 0 {
        let digit = (n - 1) % 26;
        // digit < 26, so the narrowing is lossless
        letters.push(char::from(b'A' + u8::try_from(digit).unwrap_or(0)));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Convert a column letter name back to its 1-based number.
///
/// Letters are case-insensitive. Returns `None` for an empty name, a
/// non-letter character, or a name that overflows `usize`.
pub fn column_number_for_name(name: &str) -> Option<usize> {
    if name.is_empty() {
        return None;
    }
    let mut result: usize = 0;
    for b in name.bytes() {
        if !b.is_ascii_alphabetic() {
            return None;
        }
        let value = usize::from(b.to_ascii_uppercase() - b'A') + 1;
        result = result.checked_mul(26)?.checked_add(value)?;
    }
    Some(result)
}

/// Parse a cell reference like "B3" into 0-based `(row, col)`.
pub fn parse_cell_ref(cell_ref: &str) -> Option<(usize, usize)> {
    let cell_ref = cell_ref.trim();
    let split = cell_ref.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = cell_ref.split_at(split);
    let col = column_number_for_name(letters)?;
    let row: usize = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

/// Parse a range like "A1:C4" (or a single "B2") into 0-based
/// `(top, left, bottom, right)`, normalized so top <= bottom and left <= right.
pub fn parse_cell_range(range: &str) -> Option<(usize, usize, usize, usize)> {
    let (start, end) = match range.split_once(':') {
        Some((start, end)) => (parse_cell_ref(start)?, parse_cell_ref(end)?),
        None => {
            let single = parse_cell_ref(range)?;
            (single, single)
        }
    };
    Some((
        start.0.min(end.0),
        start.1.min(end.1),
        start.0.max(end.0),
        start.1.max(end.1),
    ))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;

    #[test]
    fn names_at_digit_boundaries() {
        assert_eq!(column_name_for_number(1), "A");
        assert_eq!(column_name_for_number(26), "Z");
        assert_eq!(column_name_for_number(27), "AA");
        assert_eq!(column_name_for_number(52), "AZ");
        assert_eq!(column_name_for_number(702), "ZZ");
        assert_eq!(column_name_for_number(703), "AAA");
        assert_eq!(column_name_for_number(0), "");
    }

    #[test]
    fn names_decode_case_insensitively() {
        assert_eq!(column_number_for_name("aa"), Some(27));
        assert_eq!(column_number_for_name("Zz"), Some(702));
        assert_eq!(column_number_for_name(""), None);
        assert_eq!(column_number_for_name("A1"), None);
    }

    #[test]
    fn encoding_is_inverse_of_decoding() {
        for n in 1..=20_000 {
            let name = column_name_for_number(n);
            assert_eq!(column_number_for_name(&name), Some(n), "{name}");
        }
    }

    #[test]
    fn parse_refs_and_ranges() {
        assert_eq!(parse_cell_ref("A1"), Some((0, 0)));
        assert_eq!(parse_cell_ref("c12"), Some((11, 2)));
        assert_eq!(parse_cell_ref("A0"), None);
        assert_eq!(parse_cell_ref("12"), None);
        assert_eq!(parse_cell_range("D4:B2"), Some((1, 1, 3, 3)));
        assert_eq!(parse_cell_range("B2"), Some((1, 1, 1, 1)));
    }
}
