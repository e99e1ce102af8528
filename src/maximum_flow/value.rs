use num_traits::NumAssign;
use std::fmt::Debug;

/// Numeric type a flow network is measured in.
///
/// Integers compare residual capacities and excesses to zero exactly. Floats
/// treat anything at or below [`FlowValue::EPSILON`] as zero, which absorbs the
/// rounding error accumulated by repeated pushes.
pub trait FlowValue: NumAssign + PartialOrd + Copy + Default + Debug {
    const EPSILON: Self;

    #[inline]
    fn exceeds_epsilon(self) -> bool {
        self > Self::EPSILON
    }

    fn is_valid_capacity(self) -> bool;

    fn checked_sum(self, other: Self) -> Option<Self>;

    #[inline]
    fn min_flow(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }
}

macro_rules! impl_exact_flow_value {
    ($($t:ty),*) => {
        $(
            impl FlowValue for $t {
                const EPSILON: Self = 0;

                #[inline]
                fn is_valid_capacity(self) -> bool {
                    self >= 0
                }

                #[inline]
                fn checked_sum(self, other: Self) -> Option<Self> {
                    self.checked_add(other)
                }
            }
        )*
    };
}

macro_rules! impl_approximate_flow_value {
    ($($t:ty),*) => {
        $(
            impl FlowValue for $t {
                const EPSILON: Self = 0.0001;

                #[inline]
                fn is_valid_capacity(self) -> bool {
                    self.is_finite() && self >= 0.0
                }

                #[inline]
                fn checked_sum(self, other: Self) -> Option<Self> {
                    let sum = self + other;
                    sum.is_finite().then_some(sum)
                }
            }
        )*
    };
}

impl_exact_flow_value!(i8, i16, i32, i64, i128, isize);
impl_approximate_flow_value!(f32, f64);

#[cfg(test)]
mod test {
    use super::FlowValue;
    use rstest::rstest;

    #[rstest]
    #[case(0, false)]
    #[case(1, true)]
    #[case(-3, false)]
    fn integer_epsilon_is_zero(#[case] value: i64, #[case] expected: bool) {
        assert_eq!(value.exceeds_epsilon(), expected);
    }

    #[rstest]
    #[case(0.0, false)]
    #[case(0.00005, false)]
    #[case(0.0001, false)]
    #[case(0.001, true)]
    fn float_values_below_epsilon_are_zero(#[case] value: f64, #[case] expected: bool) {
        assert_eq!(value.exceeds_epsilon(), expected);
    }

    #[test]
    fn capacities_must_be_non_negative_and_finite() {
        assert!(0i32.is_valid_capacity());
        assert!(!(-1i32).is_valid_capacity());
        assert!(2.5f64.is_valid_capacity());
        assert!(!f64::NAN.is_valid_capacity());
        assert!(!f64::INFINITY.is_valid_capacity());
        assert!(!(-0.5f64).is_valid_capacity());
    }

    #[test]
    fn checked_sum_detects_overflow() {
        assert_eq!(i32::MAX.checked_sum(1), None);
        assert_eq!((i32::MAX - 1).checked_sum(1), Some(i32::MAX));
        assert_eq!(f64::MAX.checked_sum(f64::MAX), None);
        assert_eq!(1.5f64.checked_sum(2.0), Some(3.5));
    }

    fn default_of<Flow: FlowValue>() -> Flow {
        Flow::default()
    }

    #[test]
    fn default_is_zero() {
        assert_eq!(default_of::<i32>(), 0);
        assert_eq!(default_of::<f64>(), 0.0);
    }

    #[test]
    fn min_flow_picks_smaller() {
        assert_eq!(3i64.min_flow(7), 3);
        assert_eq!(7i64.min_flow(3), 3);
        assert_eq!(2.5f64.min_flow(1.5), 1.5);
    }
}
