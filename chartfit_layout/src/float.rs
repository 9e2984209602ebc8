// Copyright 2026 the Chartfit Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float helpers for `no_std` builds.
//!
//! `f64::floor`, `f64::log10` and friends live in `std`, not `core`. Without the `std`
//! feature, modules import [`FloatExt`] and get the same method names backed by `libm`.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn log10(self) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
    fn powf(self, n: Self) -> Self;
    fn powi(self, n: i32) -> Self;
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
macro_rules! unary_libm {
    ($($method:ident => $func:ident),* $(,)?) => {
        $(
            fn $method(self) -> Self {
                libm::$func(self)
            }
        )*
    };
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    unary_libm! {
        floor => floor,
        ceil => ceil,
        round => round,
        log10 => log10,
        sin => sin,
        cos => cos,
    }

    fn powf(self, n: Self) -> Self {
        libm::pow(self, n)
    }

    fn powi(self, n: i32) -> Self {
        // Integer powers are exact enough through `pow`; ticks snap afterwards anyway.
        libm::pow(self, f64::from(n))
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("chartfit_layout requires either the `std` or `libm` feature");
