//! # Secretsplit
//! `no_std` library implementing Shamir secret sharing over GF(2^8). A secret
//! byte sequence is split into `n` opaque shares of which any `t` reconstruct
//! it exactly, while fewer than `t` reveal nothing about it.
//!
#![no_std]

extern crate alloc;

pub mod gf256;
pub mod sharing;

pub use sharing::shamir::ShamirSecretSharing;
