//! [RSA](https://en.wikipedia.org/wiki/RSA_(cryptosystem)) public-key cryptosystem.
//!
//! Keypair generation from a random prime search, plus the textbook
//! (unpadded) block operations the streaming file codec is built on.

mod files;
mod primes;
mod util;

use std::thread;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::error::{Error, Result};
use util::{inv_mod, pad_left, pow_mod, random_bits};

pub use files::{decrypt_file, encrypt_file, get_keys, get_private_key, get_public_key, save_keys};
pub use primes::{is_prime, next_prime, random_prime};

/// An RSA public key.
///
/// Encrypts a block that only the matching [`PrivateKey`] can open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    n: BigUint,
    e: BigUint,
}

/// An RSA private key.
///
/// Opens blocks sealed by its matching [`PublicKey`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PrivateKey {
    n: BigUint,
    d: BigUint,
}

impl PublicKey {
    /// Bit length of the modulus.
    #[must_use]
    pub fn modulus_bits(&self) -> u64 {
        self.n.bits()
    }

    /// Byte width `k` of a ciphertext block.
    #[must_use]
    pub fn modulus_bytes(&self) -> usize {
        (self.n.bits() / 8) as usize
    }

    /// Encrypt one block with textbook RSA, left-padded with zeros to
    /// exactly `size` bytes.
    ///
    /// # Errors
    ///
    /// [`Error::BlockSize`] when `data` exceeds the modulus byte width.
    pub fn encrypt(&self, data: &[u8], size: usize) -> Result<Vec<u8>> {
        let limit = self.modulus_bytes();

        if data.len() > limit {
            return Err(Error::BlockSize {
                len: data.len(),
                limit,
            });
        }

        let sealed = pow_mod(&BigUint::from_bytes_be(data), &self.e, &self.n);

        Ok(pad_left(sealed.to_bytes_be(), size))
    }

    /// Render as `<hex-n>-<hex-e>`: lower-case, no leading zeros, no prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:x}-{:x}", self.n, self.e)
    }

    /// Parse the [`to_hex`](PublicKey::to_hex) form.
    ///
    /// # Errors
    ///
    /// [`Error::KeyParse`] unless the input is exactly two `-`-separated
    /// hex fields, both non-zero.
    pub fn from_hex(text: &str) -> Result<PublicKey> {
        let (n, e) = parse_hex_pair(text)?;

        Ok(PublicKey { n, e })
    }
}

impl PrivateKey {
    /// Bit length of the modulus.
    #[must_use]
    pub fn modulus_bits(&self) -> u64 {
        self.n.bits()
    }

    /// Byte width `k` of a ciphertext block.
    #[must_use]
    pub fn modulus_bytes(&self) -> usize {
        (self.n.bits() / 8) as usize
    }

    /// Decrypt one block with textbook RSA, left-padded with zeros to
    /// exactly `size` bytes.
    ///
    /// The padding is what lets the file codec hand back blocks whose
    /// numeric value has fewer significant bytes than the block width.
    ///
    /// # Errors
    ///
    /// [`Error::BlockSize`] when `data` exceeds the modulus byte width.
    pub fn decrypt(&self, data: &[u8], size: usize) -> Result<Vec<u8>> {
        let limit = self.modulus_bytes();

        if data.len() > limit {
            return Err(Error::BlockSize {
                len: data.len(),
                limit,
            });
        }

        let opened = pow_mod(&BigUint::from_bytes_be(data), &self.d, &self.n);

        Ok(pad_left(opened.to_bytes_be(), size))
    }

    /// Render as `<hex-n>-<hex-d>`: lower-case, no leading zeros, no prefix.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("{:x}-{:x}", self.n, self.d)
    }

    /// Parse the [`to_hex`](PrivateKey::to_hex) form.
    ///
    /// # Errors
    ///
    /// [`Error::KeyParse`] unless the input is exactly two `-`-separated
    /// hex fields, both non-zero.
    pub fn from_hex(text: &str) -> Result<PrivateKey> {
        let (n, d) = parse_hex_pair(text)?;

        Ok(PrivateKey { n, d })
    }
}

fn parse_hex_pair(text: &str) -> Result<(BigUint, BigUint)> {
    let mut fields = text.split('-');

    let (first, second) = match (fields.next(), fields.next(), fields.next()) {
        (Some(first), Some(second), None) => (first, second),
        _ => {
            return Err(Error::KeyParse(
                "expected two `-`-separated hexadecimal fields",
            ))
        }
    };

    let first = BigUint::parse_bytes(first.as_bytes(), 16)
        .ok_or(Error::KeyParse("field is not valid hexadecimal"))?;
    let second = BigUint::parse_bytes(second.as_bytes(), 16)
        .ok_or(Error::KeyParse("field is not valid hexadecimal"))?;

    if first.is_zero() || second.is_zero() {
        return Err(Error::KeyParse("key component is zero"));
    }

    Ok((first, second))
}

/// Generate a fresh RSA keypair of modulus bit length exactly `bits`.
///
/// The two prime searches run concurrently on scoped threads. The public
/// exponent is a random `bits / 4`-wide prime that does not divide the
/// totient, which makes it coprime to it; the private exponent is its
/// modular inverse.
///
/// # Errors
///
/// [`Error::KeySize`] when `bits` is not a multiple of 64.
pub fn create_keys(bits: u64) -> Result<(PublicKey, PrivateKey)> {
    if bits % 64 != 0 {
        return Err(Error::KeySize(bits));
    }

    let prime_bits = bits / 2;
    log::info!("computing RSA keys: {} bits", bits);

    loop {
        let (p1, p2) = thread::scope(|s| {
            let first = s.spawn(|| fixed_width_prime(prime_bits));
            let second = s.spawn(|| fixed_width_prime(prime_bits));

            (
                first.join().expect("prime search panicked"),
                second.join().expect("prime search panicked"),
            )
        });

        let n = &p1 * &p2;

        if n.bits() != bits {
            // Two B-bit primes can multiply into 2B-1 bits
            log::debug!("modulus came out at {} bits, redrawing primes", n.bits());
            continue;
        }

        let phi = (p1 - 1_u32) * (p2 - 1_u32);
        let e = select_public_exponent(bits / 4, &phi);
        let d = inv_mod(e.clone(), &phi).expect("exponent is prime and does not divide the totient");

        log::info!("modulus ready: {} bits", n.bits());

        return Ok((PublicKey { n: n.clone(), e }, PrivateKey { n, d }));
    }
}

// Random prime of bit length exactly `bits`; the search re-draws whenever
// stepping to the next prime spilled past the requested width.
fn fixed_width_prime(bits: u64) -> BigUint {
    loop {
        let prime = random_prime(bits);

        if prime.bits() == bits {
            log::info!("prime found ({} bits)", prime.bits());
            return prime;
        }

        log::debug!("prime spilled to {} bits, redrawing", prime.bits());
    }
}

// Random prime exponent of roughly `bits` width, coprime to `phi`.
fn select_public_exponent(bits: u64, phi: &BigUint) -> BigUint {
    let mut e = random_bits(bits);

    loop {
        e = next_prime(&e);

        if !(phi % &e).is_zero() {
            return e;
        }

        log::debug!("exponent candidate divides the totient, stepping past it");
    }
}
