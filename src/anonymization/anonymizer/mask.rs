//! Mask operator

/// Overwrite the first `number_of_chars` characters of `value` with `mask_char`
///
/// Masking always starts at the beginning of the span; characters past the
/// cap are kept. A cap larger than the span masks the whole span.
pub fn mask_span(value: &str, mask_char: char, number_of_chars: usize) -> String {
    value
        .chars()
        .enumerate()
        .map(|(i, c)| if i < number_of_chars { mask_char } else { c })
        .collect()
}
