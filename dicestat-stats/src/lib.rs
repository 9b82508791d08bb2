// dicestat-stats/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod summary;
pub mod chi_squared;
pub mod critical;
