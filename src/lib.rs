//! Textbook [RSA](https://en.wikipedia.org/wiki/RSA_(cryptosystem)) file cipher
//! implemented from scratch in [Rust](https://www.rust-lang.org/).
//!
//! Generates RSA keypairs out of a Miller-Rabin prime search, stores them as
//! plain hex text files, and encrypts/decrypts whole files by chunking them
//! into key-sized blocks.
//!
//! This is **not** a crypto library _(don't roll your own crypto!)_: the RSA
//! here is unpadded, deterministic and malleable. It exists to show how the
//! pieces fit together, not to protect anything.

#![deny(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::use_self)] // Not sure about this :/
#![allow(clippy::cast_possible_truncation)] // Bit widths comfortably fit usize on every supported target
#![allow(clippy::module_name_repetitions)] // Anti-pattern IMHO

pub mod error;
pub mod rsa;

pub use error::{Error, Result};
