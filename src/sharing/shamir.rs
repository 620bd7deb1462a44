use alloc::vec;
use alloc::vec::Vec;

use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};
use rand_core::OsRng;
use zeroize::Zeroize;

use crate::gf256;
use crate::sharing::{SharingAlgorithm, SharingError};

/// Threshold sharing after Shamir: every secret byte becomes the constant
/// term of a fresh random polynomial of degree `t - 1`, and share `i` holds
/// that polynomial's value at a non-zero field point. The point is stored as
/// the final byte of the share, so a share is `secret length + 1` bytes with
/// no further framing.
pub struct ShamirSecretSharing;

impl SharingAlgorithm for ShamirSecretSharing {
	fn share(&self, data: &[u8], n: u8, t: u8) -> Result<Vec<Vec<u8>>, SharingError> {
		split_with_rng(data, n, t, &mut OsRng)
	}

	fn reconstruct(&self, inp: &[Vec<u8>]) -> Result<Vec<u8>, SharingError> {
		combine(inp)
	}
}

/// Splits `secret` into `n` shares of which any `t` reconstruct it. The rng
/// supplies the polynomial coefficients and must be cryptographically secure;
/// a threshold below 2 is rejected rather than degraded to plain copies.
pub fn split_with_rng<R: RngCore + CryptoRng>(
	secret: &[u8],
	n: u8,
	t: u8,
	rng: &mut R,
) -> Result<Vec<Vec<u8>>, SharingError> {
	if t < 2 || t > n {
		return Err(SharingError::InvalidParameters(n, t))
	}
	if secret.is_empty() {
		return Err(SharingError::InvalidParameters(n, t))
	}

	// evaluation points 1..=n, handed to shares in randomized order
	let mut tags: Vec<u8> = (1..=n).collect();
	tags.shuffle(rng);

	let mut shares: Vec<Vec<u8>> = tags
		.iter()
		.map(|&x| {
			let mut share = vec![0u8; secret.len() + 1];
			share[secret.len()] = x;
			share
		})
		.collect();

	// coefficients[0] is the current secret byte, the higher-degree
	// coefficients are redrawn for every byte position
	let mut coefficients = vec![0u8; t as usize];
	for (pos, &byte) in secret.iter().enumerate() {
		coefficients[0] = byte;
		rng.fill_bytes(&mut coefficients[1..]);
		for (share, &x) in shares.iter_mut().zip(tags.iter()) {
			share[pos] = evaluate(&coefficients, x);
		}
	}
	coefficients.zeroize();

	Ok(shares)
}

/// Reconstructs the secret from at least the threshold number of shares.
/// The collection is validated structurally (equal lengths, distinct
/// non-zero tags) but carries no checksum, so a below-threshold or
/// corrupted set yields a wrong secret without an error.
pub fn combine(shares: &[Vec<u8>]) -> Result<Vec<u8>, SharingError> {
	if shares.len() < 2 {
		return Err(SharingError::InsufficientShares(shares.len()))
	}

	let share_len = shares[0].len();
	if share_len < 2 {
		return Err(SharingError::MalformedShares)
	}
	if shares.iter().any(|share| share.len() != share_len) {
		return Err(SharingError::MalformedShares)
	}

	let mut seen = [false; 256];
	let mut tags = Vec::with_capacity(shares.len());
	for share in shares {
		let x = share[share_len - 1];
		if x == 0 {
			return Err(SharingError::MalformedShares)
		}
		if seen[x as usize] {
			return Err(SharingError::DuplicateShare(x))
		}
		seen[x as usize] = true;
		tags.push(x);
	}

	let mut secret = Vec::with_capacity(share_len - 1);
	for pos in 0..share_len - 1 {
		secret.push(interpolate_at_zero(&tags, shares, pos)?);
	}
	Ok(secret)
}

// Horner evaluation, lowest coefficient last
fn evaluate(coefficients: &[u8], x: u8) -> u8 {
	let mut acc = 0u8;
	for &c in coefficients.iter().rev() {
		acc = gf256::add(gf256::mul(acc, x), c);
	}
	acc
}

// Lagrange interpolation at x = 0 for one byte position. The division is
// over pairwise tag differences, which validation has made non-zero.
fn interpolate_at_zero(tags: &[u8], shares: &[Vec<u8>], pos: usize) -> Result<u8, SharingError> {
	let mut acc = 0u8;
	for (i, &xi) in tags.iter().enumerate() {
		let mut basis = 1u8;
		for (j, &xj) in tags.iter().enumerate() {
			if i == j {
				continue
			}
			basis = gf256::mul(basis, gf256::div(xj, gf256::add(xj, xi))?);
		}
		acc = gf256::add(acc, gf256::mul(shares[i][pos], basis));
	}
	Ok(acc)
}
