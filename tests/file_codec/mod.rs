use std::fs;
use std::path::PathBuf;

use cipher::rsa::{decrypt_file, encrypt_file, save_keys};

use crate::{gen_random_bytes, temp_path, KEYPAIR_256};

const BLOCK_BYTES: usize = 32; // k for a 256-bit modulus
const PLAIN_BYTES: usize = 31; // B = k - 1

// Encrypt `plaintext` to a file and decrypt it back, returning the raw
// encrypted bytes and the decrypted bytes.
fn run(label: &str, plaintext: &[u8]) -> (Vec<u8>, Vec<u8>) {
    let (public, private) = &*KEYPAIR_256;

    let base = temp_path(&format!("{}-keys", label));
    save_keys(&base, public, private).unwrap();

    let public_key = PathBuf::from(format!("{}.pub", base.display()));
    let private_key = PathBuf::from(format!("{}.key", base.display()));
    let source = temp_path(&format!("{}-plain", label));
    let sealed_path = temp_path(&format!("{}-sealed", label));
    let opened_path = temp_path(&format!("{}-opened", label));

    fs::write(&source, plaintext).unwrap();

    encrypt_file(&source, &sealed_path, &public_key).unwrap();
    decrypt_file(&sealed_path, &opened_path, &private_key).unwrap();

    let sealed = fs::read(&sealed_path).unwrap();
    let opened = fs::read(&opened_path).unwrap();

    for path in [&source, &sealed_path, &opened_path, &public_key, &private_key] {
        fs::remove_file(path).ok();
    }

    (sealed, opened)
}

fn trailer(sealed: &[u8]) -> &[u8] {
    &sealed[sealed.len() - 2..]
}

#[test]
fn single_byte_file() {
    let (sealed, opened) = run("single-byte", b"A");

    assert_eq!(sealed.len(), BLOCK_BYTES + 2);
    assert_eq!(trailer(&sealed), [1, 0]);
    assert_eq!(opened, b"A");
}

#[test]
fn reference_31_byte_block() {
    let plaintext = [
        15_u8, 211, 218, 155, 207, 209, 212, 102, 241, 192, 130, 92, 10, 92, 213, 236, 172, 190,
        189, 213, 116, 66, 8, 33, 132, 16, 66, 8, 33, 132, 16,
    ];

    let (sealed, opened) = run("reference-block", &plaintext);

    assert_eq!(sealed.len(), BLOCK_BYTES + 2);
    assert_eq!(trailer(&sealed), [31, 0]);
    assert_eq!(hex::encode(&opened), hex::encode(plaintext));
}

#[test]
fn empty_file() {
    let (sealed, opened) = run("empty", &[]);

    assert_eq!(sealed, [0, 0]);
    assert!(opened.is_empty());
}

#[test]
fn short_final_block() {
    let plaintext = gen_random_bytes(2 * PLAIN_BYTES + 3);

    let (sealed, opened) = run("short-final", &plaintext);

    assert_eq!(sealed.len(), 3 * BLOCK_BYTES + 2);
    assert_eq!(trailer(&sealed), [3, 0]);
    assert_eq!(hex::encode(&opened), hex::encode(plaintext));
}

// The subtle boundary: a source that is an exact multiple of B emits no
// block for its final zero-length read, and the trailer records a full
// block length instead.
#[test]
fn exact_multiple_of_block_size() {
    let plaintext = gen_random_bytes(2 * PLAIN_BYTES);

    let (sealed, opened) = run("exact-multiple", &plaintext);

    assert_eq!(sealed.len(), 2 * BLOCK_BYTES + 2);
    assert_eq!(trailer(&sealed), [PLAIN_BYTES as u8, 0]);
    assert_eq!(hex::encode(&opened), hex::encode(plaintext));
}

#[test]
fn assorted_lengths_round_trip() {
    for length in [1, 30, 31, 32, 62, 63, 100, 10 * PLAIN_BYTES] {
        let plaintext = gen_random_bytes(length);

        let (sealed, opened) = run(&format!("assorted-{}", length), &plaintext);

        // Every ciphertext block is exactly k bytes wide
        let blocks = (length + PLAIN_BYTES - 1) / PLAIN_BYTES;
        assert_eq!(sealed.len(), blocks * BLOCK_BYTES + 2);

        assert_eq!(
            hex::encode(&opened),
            hex::encode(&plaintext),
            "round trip broke at length {}",
            length
        );
    }
}
