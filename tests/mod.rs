#![deny(clippy::correctness)]
#![warn(clippy::style)]
#![warn(clippy::complexity)]
#![warn(clippy::perf)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::use_self)] // Not sure about this :/
#![allow(clippy::module_name_repetitions)] // Anti-pattern IMHO

mod file_codec;

use std::path::PathBuf;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};

use once_cell::sync::Lazy;
use rand::{distributions, Rng};

use cipher::rsa::{create_keys, PrivateKey, PublicKey};

/// Key generation is the expensive part of every end-to-end scenario, so
/// one 256-bit keypair is shared across all of them.
static KEYPAIR_256: Lazy<(PublicKey, PrivateKey)> =
    Lazy::new(|| create_keys(256).expect("256 is a multiple of 64"));

static TEMP_COUNTER: AtomicUsize = AtomicUsize::new(0);

/// A process-unique scratch path under the system temp directory.
fn temp_path(label: &str) -> PathBuf {
    let unique = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

    std::env::temp_dir().join(format!("cipher-test-{}-{}-{}", process::id(), unique, label))
}

fn gen_random_bytes(length: usize) -> Vec<u8> {
    let rng = rand::thread_rng();

    rng.sample_iter(&distributions::Standard)
        .take(length)
        .collect::<Vec<_>>()
}
