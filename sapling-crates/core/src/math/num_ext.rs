//! Rounding divisions used when mapping bounds through views and linear sums.

pub(crate) trait NumExt {
    /// Division with rounding up.
    fn div_ceil(self, other: Self) -> Self;

    /// Division with rounding down.
    ///
    /// Note this is different from truncating, which is rounding toward zero.
    fn div_floor(self, other: Self) -> Self;
}

macro_rules! impl_num_ext {
    ($($int:ty),+) => {
        $(impl NumExt for $int {
            fn div_ceil(self, other: Self) -> Self {
                let quotient = self / other;
                let remainder = self % other;
                if (remainder > 0 && other > 0) || (remainder < 0 && other < 0) {
                    quotient + 1
                } else {
                    quotient
                }
            }

            fn div_floor(self, other: Self) -> Self {
                let quotient = self / other;
                let remainder = self % other;
                if (remainder > 0 && other < 0) || (remainder < 0 && other > 0) {
                    quotient - 1
                } else {
                    quotient
                }
            }
        })+
    };
}

impl_num_ext!(i32, i64);
