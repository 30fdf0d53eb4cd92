//! Prize wheel state and geometry, kept free of I/O and clocks so the
//! full spin lifecycle can be driven deterministically.

pub mod roster;
pub mod wheel;
