//! Leveled assertions for checking internal invariants of the propagators.
//!
//! The cheap checks are always enabled; the more expensive ones are only executed when the
//! `debug-checks` feature is enabled.
#[cfg(not(feature = "debug-checks"))]
pub const CUMULUS_ASSERT_LEVEL_DEFINITION: u8 = CUMULUS_ASSERT_SIMPLE;

#[cfg(feature = "debug-checks")]
pub const CUMULUS_ASSERT_LEVEL_DEFINITION: u8 = CUMULUS_ASSERT_EXTREME;

pub const CUMULUS_ASSERT_SIMPLE: u8 = 1;
pub const CUMULUS_ASSERT_MODERATE: u8 = 2;
pub const CUMULUS_ASSERT_ADVANCED: u8 = 3;
pub const CUMULUS_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! cumulus_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::CUMULUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CUMULUS_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! cumulus_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::CUMULUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CUMULUS_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! cumulus_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::CUMULUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CUMULUS_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! cumulus_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::CUMULUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CUMULUS_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! cumulus_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::CUMULUS_ASSERT_LEVEL_DEFINITION >= $crate::asserts::CUMULUS_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
