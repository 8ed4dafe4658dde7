//! Defaults / 默认值

/// Default lookup table size, prime / 默认查找表大小（素数）
pub const DEFAULT_SIZE: u64 = 65537;

/// SipHash key of H1 (slot offset and client key) / H1 的 SipHash 密钥（偏移与客户端键）
pub const OFFSET_SEED: u64 = 0xdead_babe;

/// SipHash key of H2 (slot skip) / H2 的 SipHash 密钥（步长）
pub const SKIP_SEED: u64 = 0xdead_beef;
