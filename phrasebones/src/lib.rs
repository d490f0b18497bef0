use std::{fmt, str::FromStr};

use base64ct::{Base64, Encoding};
use rand::Rng;
use thiserror::Error;

pub const DIGEST_SIZE: usize = 32;

/// Length of every derived password, in characters.
pub const PASSWORD_LEN: usize = 16;

/// Number of base64 characters of the digest kept before the insertions.
pub const PREFIX_LEN: usize = 12;

pub const INSERTIONS: usize = 4;

pub const SYMBOLS: &[u8] = b"!@#$%^&*";

pub const ALPHABET: &[u8; 70] =
  b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*";

// Padded base64 of a 32 octet digest is exactly 44 characters.
const ENCODED_DIGEST_SIZE: usize = 44;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("input is blank")]
  BlankInput,
  #[error("digest computation failed")]
  DigestFailed,
  #[error("digest encoding failed")]
  EncodingFailed,
  #[error("unknown scheme {0:?}")]
  UnknownScheme(Box<str>),
}

/// Computes the 256-bit digest the derivation starts from.
pub trait Digester {
  fn digest(&self, bytes: &[u8]) -> Result<[u8; DIGEST_SIZE], Error>;
}

/// SHA-256, the only digest the derivation is defined for.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256;

impl Digester for Sha256 {
  fn digest(&self, bytes: &[u8]) -> Result<[u8; DIGEST_SIZE], Error> {
    Ok(hmac_sha256::Hash::hash(bytes))
  }
}

/// How the four extra characters get chosen and placed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Scheme {
  /// Characters and positions drawn from the random source.  The same input
  /// gives a different password on every call.
  #[default]
  Scattered,
  /// Characters and positions drawn from a hash chain seeded by the digest.
  /// The same input always gives the same password.
  Deterministic,
}

impl Scheme {
  pub const fn as_str(&self) -> &'static str {
    match self {
      Scheme::Scattered => "scattered",
      Scheme::Deterministic => "deterministic",
    }
  }
}

impl fmt::Display for Scheme {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Scheme {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "scattered" => Ok(Scheme::Scattered),
      "deterministic" => Ok(Scheme::Deterministic),
      _ => Err(Error::UnknownScheme(s.into())),
    }
  }
}

#[derive(Clone, PartialEq, Eq)]
#[repr(transparent)]
/// A derived password.  `Debug` never shows the value so that it does not
/// end up in logs by accident.
pub struct Password(Box<str>);

impl Password {
  pub fn as_str(&self) -> &str {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.chars().count()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password([secret])")
  }
}

/// True when the input is empty or consists of whitespace only.
pub fn is_blank(input: &str) -> bool {
  input.trim().is_empty()
}

/// Derives a password from `input` using the given scheme.  The random
/// source is left untouched by [`Scheme::Deterministic`].
pub fn derive_with<D, R>(
  scheme: Scheme,
  input: &str,
  digester: &D,
  rng: &mut R,
) -> Result<Password, Error>
where
  D: Digester + ?Sized,
  R: Rng + ?Sized,
{
  match scheme {
    Scheme::Scattered => derive(input, digester, rng),
    Scheme::Deterministic => derive_deterministic(input, digester),
  }
}

/// Derives a password by scattering four random alphabet characters over
/// the first twelve base64 characters of the input's digest.
pub fn derive<D, R>(
  input: &str,
  digester: &D,
  rng: &mut R,
) -> Result<Password, Error>
where
  D: Digester + ?Sized,
  R: Rng + ?Sized,
{
  let (_, mut buffer) = digest_prefix(input, digester)?;
  for _ in 0..INSERTIONS {
    let c = ALPHABET[rng.gen_range(0..ALPHABET.len())];
    let pos = rng.gen_range(0..buffer.len());
    buffer.insert(pos, c);
  }
  finish(buffer)
}

/// Like [`derive`] but every choice comes from a hash chain over the digest,
/// so equal inputs give equal passwords.
pub fn derive_deterministic<D>(
  input: &str,
  digester: &D,
) -> Result<Password, Error>
where
  D: Digester + ?Sized,
{
  let (digest, mut buffer) = digest_prefix(input, digester)?;
  let mut chain = HashChain::new(digester, digest);
  for _ in 0..INSERTIONS {
    let c = ALPHABET[chain.next_index(ALPHABET.len())?];
    let pos = chain.next_index(buffer.len())?;
    buffer.insert(pos, c);
  }
  finish(buffer)
}

fn digest_prefix<D>(
  input: &str,
  digester: &D,
) -> Result<([u8; DIGEST_SIZE], Vec<u8>), Error>
where
  D: Digester + ?Sized,
{
  if is_blank(input) {
    return Err(Error::BlankInput);
  }
  let digest = digester.digest(input.as_bytes())?;
  let mut encoded = [0u8; ENCODED_DIGEST_SIZE];
  let encoded = Base64::encode(&digest, &mut encoded)
    .map_err(|_| Error::EncodingFailed)?;
  let mut buffer = Vec::with_capacity(PREFIX_LEN + INSERTIONS);
  buffer.extend_from_slice(&encoded.as_bytes()[..PREFIX_LEN]);
  Ok((digest, buffer))
}

fn finish(mut buffer: Vec<u8>) -> Result<Password, Error> {
  buffer.truncate(PASSWORD_LEN);
  let password = String::from_utf8(buffer).map_err(|_| Error::EncodingFailed)?;
  Ok(Password(password.into_boxed_str()))
}

/// Stream of indices taken two octets at a time from the blocks
/// `h(i+1) = H(seed || h(i))` where `h(0)` is the seed itself.
struct HashChain<'a, D: ?Sized> {
  digester: &'a D,
  seed: [u8; DIGEST_SIZE],
  block: [u8; DIGEST_SIZE],
  offset: usize,
}

impl<'a, D> HashChain<'a, D>
where
  D: Digester + ?Sized,
{
  fn new(digester: &'a D, seed: [u8; DIGEST_SIZE]) -> Self {
    HashChain {
      digester,
      seed,
      block: seed,
      // Forces a fresh block before the first draw.
      offset: DIGEST_SIZE,
    }
  }

  fn next_index(&mut self, bound: usize) -> Result<usize, Error> {
    if self.offset + 2 > DIGEST_SIZE {
      let mut material = [0u8; 2 * DIGEST_SIZE];
      material[..DIGEST_SIZE].copy_from_slice(&self.seed);
      material[DIGEST_SIZE..].copy_from_slice(&self.block);
      self.block = self.digester.digest(&material)?;
      self.offset = 0;
    }
    let value =
      u16::from_be_bytes([self.block[self.offset], self.block[self.offset + 1]]);
    self.offset += 2;
    Ok(value as usize % bound)
  }
}

impl<'a, D: ?Sized> Drop for HashChain<'a, D> {
  fn drop(&mut self) {
    self.seed = [0u8; DIGEST_SIZE];
    self.block = [0u8; DIGEST_SIZE];
  }
}
