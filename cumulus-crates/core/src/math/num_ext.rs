//! Extensions for numbers that are not present in the stable standard library.

pub(crate) trait NumExt {
    /// Division with rounding up.
    fn div_ceil(self, other: Self) -> Self;
}

impl NumExt for i64 {
    fn div_ceil(self, other: Self) -> Self {
        let d = self / other;
        let r = self % other;
        if (r > 0 && other > 0) || (r < 0 && other < 0) {
            d + 1
        } else {
            d
        }
    }
}

#[cfg(test)]
mod tests {
    use super::NumExt;

    #[test]
    fn rounding_is_towards_positive_infinity() {
        assert_eq!(NumExt::div_ceil(7_i64, 2), 4);
        assert_eq!(NumExt::div_ceil(-7_i64, 2), -3);
        assert_eq!(NumExt::div_ceil(6_i64, 3), 2);
        assert_eq!(NumExt::div_ceil(0_i64, 3), 0);
    }
}
