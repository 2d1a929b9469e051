//! Key persistence and the streaming file codec.
//!
//! An encrypted file is a run of ciphertext blocks of exactly `k` bytes
//! (`k` = modulus byte width) followed by a 2-byte little-endian trailer
//! holding the byte length of the last plaintext block. Plaintext is
//! consumed in blocks of `B = k - 1` bytes so every block value stays
//! below the modulus; the trailer is what lets decryption restore the
//! original byte count exactly.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};

use super::{PrivateKey, PublicKey};
use crate::error::Result;

/// Write `<path>.pub` and `<path>.key` next to each other.
///
/// # Errors
///
/// Any I/O failure, verbatim.
pub fn save_keys(
    path: impl AsRef<Path>,
    public: &PublicKey,
    private: &PrivateKey,
) -> Result<()> {
    fs::write(with_suffix(path.as_ref(), ".pub"), public.to_hex())?;
    fs::write(with_suffix(path.as_ref(), ".key"), private.to_hex())?;

    Ok(())
}

/// Load a public key from its hex text file.
///
/// # Errors
///
/// I/O failures verbatim, [`crate::Error::KeyParse`] for malformed content.
pub fn get_public_key(path: impl AsRef<Path>) -> Result<PublicKey> {
    PublicKey::from_hex(&fs::read_to_string(path)?)
}

/// Load a private key from its hex text file.
///
/// # Errors
///
/// I/O failures verbatim, [`crate::Error::KeyParse`] for malformed content.
pub fn get_private_key(path: impl AsRef<Path>) -> Result<PrivateKey> {
    PrivateKey::from_hex(&fs::read_to_string(path)?)
}

/// Load the `<path>.pub` / `<path>.key` pair written by [`save_keys`].
///
/// # Errors
///
/// I/O failures verbatim, [`crate::Error::KeyParse`] for malformed content.
pub fn get_keys(path: impl AsRef<Path>) -> Result<(PublicKey, PrivateKey)> {
    let public = get_public_key(with_suffix(path.as_ref(), ".pub"))?;
    let private = get_private_key(with_suffix(path.as_ref(), ".key"))?;

    Ok((public, private))
}

/// Encrypt `source` into `target` with the public key at `key_path`.
///
/// Reads plaintext in blocks of up to `B` bytes (the final block may be
/// short, or empty for an empty source), writes one `k`-byte ciphertext
/// block per read, then the 2-byte trailer with the last block's length.
///
/// # Errors
///
/// Key loading and I/O errors, verbatim. A partially written target is
/// left in place.
pub fn encrypt_file(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    key_path: impl AsRef<Path>,
) -> Result<()> {
    let public = get_public_key(key_path)?;
    let block_bytes = public.modulus_bytes();
    let plain_bytes = block_bytes - 1;

    let mut reader = File::open(source)?;
    let mut writer = File::create(target)?;

    let mut block = vec![0_u8; plain_bytes];
    let mut last_len = 0_usize;

    loop {
        let read = read_up_to(&mut reader, &mut block)?;

        if read == 0 {
            break;
        }

        let sealed = public.encrypt(&block[..read], block_bytes)?;
        writer.write_all(&sealed)?;
        last_len = read;
    }

    // A source that is an exact multiple of B ends on a zero-length read,
    // so the trailer records the previous (full) block's length.
    let mut trailer = [0_u8; 2];
    LittleEndian::write_u16(&mut trailer, last_len as u16);
    writer.write_all(&trailer)?;

    Ok(())
}

/// Decrypt `source` into `target` with the private key at `key_path`.
///
/// Reads `k`-byte chunks with a one-chunk lookahead: a block is only
/// decrypted once its successor is read, so the 2-byte trailer can trim
/// the final block to its recorded length.
///
/// # Errors
///
/// Key loading and I/O errors, verbatim. A partially written target is
/// left in place.
pub fn decrypt_file(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    key_path: impl AsRef<Path>,
) -> Result<()> {
    let private = get_private_key(key_path)?;
    let block_bytes = private.modulus_bytes();
    let plain_bytes = block_bytes - 1;

    let mut reader = File::open(source)?;
    let mut writer = File::create(target)?;

    let mut chunk = vec![0_u8; block_bytes];
    let mut pending: Option<Vec<u8>> = None;

    loop {
        let read = read_up_to(&mut reader, &mut chunk)?;

        if read == 0 {
            break;
        }

        if let Some(sealed) = pending.take() {
            let mut opened = private.decrypt(&sealed, plain_bytes)?;

            if read == 2 {
                // Trailer: keep only the last `kept` bytes of the final block
                let kept = usize::from(LittleEndian::read_u16(&chunk[..2]));
                opened.drain(..plain_bytes.saturating_sub(kept));
            }

            writer.write_all(&opened)?;
        }

        pending = Some(chunk[..read].to_vec());
    }

    Ok(())
}

// Fill `buf` from `reader`, looping over short reads. Returns the number
// of bytes read; less than `buf.len()` only at end of input.
fn read_up_to(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;

    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }

    Ok(filled)
}

// Append `suffix` to the file name without touching any existing extension.
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);

    PathBuf::from(name)
}
