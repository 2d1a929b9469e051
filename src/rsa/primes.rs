use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use once_cell::sync::Lazy;

use super::util::{pow_mod, random_bits};

/// Fixed [Miller-Rabin](https://en.wikipedia.org/wiki/Miller%E2%80%93Rabin_primality_test)
/// witness list. 24 rounds over the primes up to 97 leave a vanishing
/// composite-acceptance probability at the key widths this crate supports.
pub static MILLER_RABIN_BASES: Lazy<Vec<BigUint>> = Lazy::new(|| {
    [
        3_u32, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83,
        89, 97,
    ]
    .iter()
    .map(|&base| BigUint::from(base))
    .collect()
});

/// Divisors screened before any witness round.
const TRIAL_DIVISORS: [u32; 3] = [3, 5, 7];

// Rewrite into `n = 2^h * d` with d odd
fn rewrite(mut d: BigUint) -> (u64, BigUint) {
    let mut h = 0;

    while d.is_even() {
        d >>= 1;
        h += 1;
    }

    (h, d)
}

// One Miller-Rabin round: does `base` witness `candidate` being composite?
//
// `candidate_minus_one = 2^h * d` is the caller's 2-adic split of
// `candidate - 1`.
fn satisfies_witness(
    candidate: &BigUint,
    candidate_minus_one: &BigUint,
    h: u64,
    d: &BigUint,
    base: &BigUint,
) -> bool {
    if candidate == base {
        return true;
    }

    let mut x = pow_mod(base, d, candidate);

    if x.is_one() || &x == candidate_minus_one {
        return true;
    }

    for _ in 1..h {
        x = &x * &x % candidate;

        if x.is_one() {
            return false;
        }

        if &x == candidate_minus_one {
            return true;
        }
    }

    false
}

/// Probabilistic primality test: a small-divisor screen followed by one
/// Miller-Rabin round per base in `MILLER_RABIN_BASES`.
///
/// Zero, one and even numbers are composite, as are multiples of 3, 5
/// and 7. The screen classifies 2, 3, 5 and 7 themselves as composite;
/// the prime search only ever feeds this odd candidates well above the
/// witness range, where the test is accurate.
#[must_use]
pub fn is_prime(candidate: &BigUint) -> bool {
    if candidate.is_zero() || candidate.is_one() {
        return false;
    }

    if candidate.is_even() {
        return false;
    }

    for divisor in TRIAL_DIVISORS {
        if (candidate % divisor).is_zero() {
            return false;
        }
    }

    let candidate_minus_one = candidate - 1_u32;
    let (h, d) = rewrite(candidate_minus_one.clone());

    MILLER_RABIN_BASES
        .iter()
        .all(|base| satisfies_witness(candidate, &candidate_minus_one, h, &d, base))
}

/// Walk upward from `start` in steps of 2 until [`is_prime`] holds.
///
/// Even starts are first bumped by 1; the first candidate actually tested
/// is always strictly greater than `start`, so a prime input yields the
/// next prime after it, not itself.
#[must_use]
pub fn next_prime(start: &BigUint) -> BigUint {
    let mut candidate = start.clone();

    if candidate.is_even() {
        candidate += 1_u32;
    }

    let mut tested = 0_u64;

    loop {
        candidate += 2_u32;
        tested += 1;

        if is_prime(&candidate) {
            log::debug!(
                "prime found after {} candidates ({} bits)",
                tested,
                candidate.bits()
            );

            return candidate;
        }
    }
}

/// Draw a random starting point of bit length exactly `bits` and walk to
/// the next prime.
///
/// The walk can spill into `bits + 1` territory when the random start sat
/// just below a power of two; callers that need an exact width re-draw.
#[must_use]
pub fn random_prime(bits: u64) -> BigUint {
    next_prime(&random_bits(bits))
}
