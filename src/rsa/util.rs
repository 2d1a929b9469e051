use num_bigint::{BigInt, BigUint, RandBigInt, ToBigInt};
use num_traits::{One, Zero};
use rand::thread_rng;

/// Does mathematical modulo (similar to remainder `%`).
///
/// The difference is that `-1 % 5 = -1`, but `-1 mod 5 = 4`.
fn math_mod(x: &BigInt, n: &BigUint) -> BigUint {
    let n_bigint = n.to_bigint().unwrap();

    (((x % &n_bigint) + &n_bigint) % &n_bigint)
        .to_biguint()
        .unwrap()
}

/// [Extended Euclidean algorithm](https://en.wikipedia.org/wiki/Extended_Euclidean_algorithm)
///
/// Naive implementation.
#[allow(clippy::many_single_char_names)]
pub fn egcd(a: BigInt, b: BigInt) -> (BigInt, BigInt, BigInt) {
    if a.is_zero() {
        return (b, BigInt::from(0_usize), BigInt::from(1_usize));
    }

    let (g, y, x) = egcd(&b % &a, a.clone());

    (g, x - (b / a) * &y, y)
}

/// [Modular multiplicative inverse](https://en.wikipedia.org/wiki/Modular_multiplicative_inverse)
///
/// Returns the unique `x` in `[0, n)` with `a * x = 1 (mod n)`, or `None`
/// when `gcd(a, n) != 1`.
///
/// # Panics
///
/// If `a` >= `n`.
pub fn inv_mod(a: BigUint, n: &BigUint) -> Option<BigUint> {
    assert!(&a < n);

    let (g, x, _) = egcd(BigInt::from(a), n.to_bigint().unwrap());

    if !g.is_one() {
        return None;
    }

    Some(math_mod(&x, n))
}

/// [Modular exponentiation](https://en.wikipedia.org/wiki/Modular_exponentiation)
/// by square-and-multiply, scanning exponent bits LSB-first.
///
/// The accumulator and the repeatedly squared base are reduced after every
/// multiplication so intermediates never exceed `modulus^2`. Operands are
/// copied, never mutated.
///
/// # Panics
///
/// If `modulus` is zero.
#[must_use]
pub fn pow_mod(base: &BigUint, exp: &BigUint, modulus: &BigUint) -> BigUint {
    let mut acc = BigUint::one();
    let mut square = base.clone();

    for i in 0..exp.bits() {
        if exp.bit(i) {
            acc = acc * &square % modulus;
        }
        square = &square * &square % modulus;
    }

    acc
}

/// Draw a uniformly random integer of bit length exactly `bits` from the
/// thread-local CSPRNG.
///
/// Samples whose top bit came out zero are rejected and redrawn, which is
/// the only deviation from uniformity. Returns zero when `bits == 0`.
#[must_use]
pub fn random_bits(bits: u64) -> BigUint {
    if bits == 0 {
        return BigUint::zero();
    }

    let mut rng = thread_rng();

    loop {
        let candidate = rng.gen_biguint(bits);

        if candidate.bits() == bits {
            return candidate;
        }
    }
}

/// Left-extend `bytes` with zeros to exactly `size` bytes.
///
/// Buffers already at (or beyond) `size` are returned untouched.
#[must_use]
pub fn pad_left(bytes: Vec<u8>, size: usize) -> Vec<u8> {
    if bytes.len() >= size {
        return bytes;
    }

    let mut padded = vec![0; size];
    padded[size - bytes.len()..].copy_from_slice(&bytes);

    padded
}
