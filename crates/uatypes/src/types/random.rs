// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Per-thread pseudo-random source for identifier helpers.
//!
//! Not for cryptographic use. The engine itself never touches this state.

use std::cell::RefCell;

thread_local! {
    static RNG: RefCell<fastrand::Rng> = RefCell::new(fastrand::Rng::new());
}

/// Reseed the calling thread's generator.
pub fn random_seed(seed: u64) {
    RNG.with(|rng| rng.borrow_mut().seed(seed));
}

/// Next pseudo-random `u32` from the calling thread's generator.
pub fn random_u32() -> u32 {
    RNG.with(|rng| rng.borrow_mut().u32(..))
}

/// Fill `buf` from the calling thread's generator.
pub(crate) fn random_fill(buf: &mut [u8]) {
    RNG.with(|rng| rng.borrow_mut().fill(buf));
}
