//! Number formatting helpers for profile display.

/// Left-pad the decimal representation of `value` with zeros to at least `width` characters.
///
/// Values wider than `width` are returned unchanged.
pub fn pad_number(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_number() {
        assert_eq!(pad_number(0, 4), "0000");
        assert_eq!(pad_number(7, 4), "0007");
        assert_eq!(pad_number(1234, 4), "1234");
        assert_eq!(pad_number(12345, 4), "12345");
        assert_eq!(pad_number(42, 0), "42");
    }
}
