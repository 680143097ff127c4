// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float functions routed through `std` or `libm`.

#[cfg(not(any(feature = "std", feature = "libm")))]
compile_error!("understory_quadtree requires either the `std` or `libm` feature");

#[cfg(feature = "std")]
pub(crate) fn sin(v: f64) -> f64 {
    v.sin()
}

#[cfg(feature = "std")]
pub(crate) fn cos(v: f64) -> f64 {
    v.cos()
}

#[cfg(feature = "std")]
pub(crate) fn sqrt(v: f64) -> f64 {
    v.sqrt()
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn sin(v: f64) -> f64 {
    libm::sin(v)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn cos(v: f64) -> f64 {
    libm::cos(v)
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
pub(crate) fn sqrt(v: f64) -> f64 {
    libm::sqrt(v)
}
