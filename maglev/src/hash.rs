//! Keyed hash pair / 带密钥的哈希对
//!
//! Maglev needs two independent 64-bit hashes per backend name: H1 picks the
//! first preferred slot, H2 the stride. Client keys are hashed with H1.
//! Maglev 需要两个独立的 64 位哈希：H1 决定首选槽位，H2 决定步长。客户端键用 H1 哈希。

use std::hash::Hasher;

use siphasher::sip::SipHasher24;

use crate::consts::{OFFSET_SEED, SKIP_SEED};

/// Two independent keyed hashes / 两个独立的带密钥哈希
pub trait KeyHash: Send + Sync {
  /// H1, slot offset and client key / H1，槽位偏移与客户端键
  fn offset(&self, data: &[u8]) -> u64;

  /// H2, slot skip / H2，槽位步长
  fn skip(&self, data: &[u8]) -> u64;
}

/// SipHash-2-4 pair / SipHash-2-4 哈希对
///
/// With default seeds the output matches tables already deployed with the
/// `(0xdeadbabe, 0)` / `(0xdeadbeef, 0)` key pairs.
/// 默认密钥下与已部署的 `(0xdeadbabe, 0)` / `(0xdeadbeef, 0)` 查找表输出一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sip {
  offset_seed: u64,
  skip_seed: u64,
}

impl Sip {
  #[inline]
  pub fn new(offset_seed: u64, skip_seed: u64) -> Self {
    Self {
      offset_seed,
      skip_seed,
    }
  }
}

impl Default for Sip {
  fn default() -> Self {
    Self::new(OFFSET_SEED, SKIP_SEED)
  }
}

#[inline(always)]
fn sip(seed: u64, data: &[u8]) -> u64 {
  let mut h = SipHasher24::new_with_keys(seed, 0);
  h.write(data);
  h.finish()
}

impl KeyHash for Sip {
  #[inline(always)]
  fn offset(&self, data: &[u8]) -> u64 {
    sip(self.offset_seed, data)
  }

  #[inline(always)]
  fn skip(&self, data: &[u8]) -> u64 {
    sip(self.skip_seed, data)
  }
}

/// GxHash pair, faster but not compatible with [`Sip`] tables
/// GxHash 哈希对，更快，但与 [`Sip`] 查找表不兼容
#[cfg(feature = "gxhash")]
#[cfg_attr(docsrs, doc(cfg(feature = "gxhash")))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gx {
  offset_seed: i64,
  skip_seed: i64,
}

#[cfg(feature = "gxhash")]
impl Gx {
  #[inline]
  pub fn new(offset_seed: u64, skip_seed: u64) -> Self {
    Self {
      offset_seed: offset_seed as i64,
      skip_seed: skip_seed as i64,
    }
  }
}

#[cfg(feature = "gxhash")]
impl Default for Gx {
  fn default() -> Self {
    Self::new(OFFSET_SEED, SKIP_SEED)
  }
}

#[cfg(feature = "gxhash")]
impl KeyHash for Gx {
  #[inline(always)]
  fn offset(&self, data: &[u8]) -> u64 {
    gxhash::gxhash64(data, self.offset_seed)
  }

  #[inline(always)]
  fn skip(&self, data: &[u8]) -> u64 {
    gxhash::gxhash64(data, self.skip_seed)
  }
}
