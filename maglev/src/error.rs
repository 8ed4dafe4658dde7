use hipstr::HipStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  #[error("table size {0} is not a prime / 查找表大小 {0} 不是素数")]
  InvalidTableSize(u64),

  #[error("{n} backends exceed table size {size} / 后端数 {n} 超过查找表大小 {size}")]
  TooManyBackends { n: usize, size: u64 },

  #[error("backend exists: {0} / 后端已存在")]
  DuplicateBackend(HipStr<'static>),

  #[error("table full: {0} backends / 查找表已满")]
  TableFull(usize),

  #[error("backend not found: {0} / 后端不存在")]
  NotFound(HipStr<'static>),

  #[error("empty table / 查找表为空")]
  EmptyTable,
}

pub type Result<T> = std::result::Result<T, Error>;
