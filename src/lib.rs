#![no_std]
#![deny(warnings)]

extern crate alloc;

pub mod error;
pub mod hypersplit;
pub mod linear;
pub mod packet;
pub mod pool;
pub mod rfg;
pub mod rule;
pub mod shadow;
pub mod simulation;

// Tests can use std
#[cfg(test)]
extern crate std;
