/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([(); 8].map(|_| (256. * random()) as u8))
}

/// Formats a value for the three-digit counters in the header.
pub(crate) fn format_for_counter(value: i32) -> String {
    let value = value.clamp(-99, 999);
    if value < 0 {
        format!("-{:02}", -value)
    } else {
        format!("{:03}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_three_characters_wide() {
        assert_eq!(format_for_counter(7), "007");
        assert_eq!(format_for_counter(-3), "-03");
        assert_eq!(format_for_counter(1234), "999");
        assert_eq!(format_for_counter(-500), "-99");
    }
}
