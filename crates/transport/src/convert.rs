use logwire_core::{ClientError, Result};

/// Narrows a count to the wire-mandated 32-bit signed width. Anything
/// outside `[i32::MIN, i32::MAX]` is rejected before the cast, never
/// truncated.
pub fn to_wire_i32(n: i64) -> Result<i32> {
    i32::try_from(n).map_err(|_| ClientError::IntegerOverflow(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_full_i32_range() {
        assert_eq!(to_wire_i32(0).unwrap(), 0);
        assert_eq!(to_wire_i32(i64::from(i32::MAX)).unwrap(), i32::MAX);
        assert_eq!(to_wire_i32(i64::from(i32::MIN)).unwrap(), i32::MIN);
    }

    #[test]
    fn rejects_one_past_each_bound() {
        assert!(matches!(
            to_wire_i32(i64::from(i32::MAX) + 1),
            Err(ClientError::IntegerOverflow(_))
        ));
        assert!(matches!(
            to_wire_i32(i64::from(i32::MIN) - 1),
            Err(ClientError::IntegerOverflow(_))
        ));
    }
}
