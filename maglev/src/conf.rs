//! Table configuration / 查找表配置

use crate::consts::{DEFAULT_SIZE, OFFSET_SEED, SKIP_SEED};

/// Configuration options / 配置选项
#[derive(Debug, Clone, Copy)]
pub enum Conf {
  /// Lookup table size, must be prime / 查找表大小，必须是素数
  Size(u64),
  /// Key of the offset hash (H1) / 偏移哈希（H1）密钥
  OffsetSeed(u64),
  /// Key of the skip hash (H2) / 步长哈希（H2）密钥
  SkipSeed(u64),
}

/// Parsed config / 解析后的配置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedConf {
  pub size: u64,
  pub offset_seed: u64,
  pub skip_seed: u64,
}

impl Default for ParsedConf {
  fn default() -> Self {
    Self {
      size: DEFAULT_SIZE,
      offset_seed: OFFSET_SEED,
      skip_seed: SKIP_SEED,
    }
  }
}

impl ParsedConf {
  pub fn parse(conf: &[Conf]) -> Self {
    let mut c = Self::default();
    for item in conf {
      match *item {
        Conf::Size(v) => c.size = v,
        Conf::OffsetSeed(v) => c.offset_seed = v,
        Conf::SkipSeed(v) => c.skip_seed = v,
      }
    }
    c
  }
}
