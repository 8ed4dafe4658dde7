//! Sorted backend set / 有序后端集合
//!
//! Every mutation returns a new list; the caller's list is never touched, so a
//! failed mutation leaves nothing half-applied.
//! 每次变更都返回新列表，不修改调用方的列表，失败的变更不会留下部分结果。

use hipstr::HipStr;

use crate::{Error, Result, prime::is_prime};

/// Backend name / 后端名
pub type Name = HipStr<'static>;

/// Largest usable table size, lookup entries are `u32`
/// 可用的最大查找表大小，查找表条目为 `u32`
const MAX_SIZE: u64 = u32::MAX as u64;

/// Check table size / 检查查找表大小
pub fn check_size(size: u64) -> Result<usize> {
  if size > MAX_SIZE || !is_prime(size) {
    return Err(Error::InvalidTableSize(size));
  }
  Ok(size as usize)
}

/// Sorted, deduplicated copy of `names`, at most `size` entries
/// `names` 排序去重后的副本，最多 `size` 个
pub fn sorted<I, S>(names: I, size: usize) -> Result<Vec<Name>>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut li: Vec<Name> = names
    .into_iter()
    .map(|s| HipStr::from(s.as_ref().to_owned()))
    .collect();
  li.sort_unstable();
  li.dedup();
  if li.len() > size {
    return Err(Error::TooManyBackends {
      n: li.len(),
      size: size as u64,
    });
  }
  Ok(li)
}

/// `li` plus `name` / 在 `li` 中加入 `name`
pub fn add(li: &[Name], name: &str, size: usize) -> Result<Vec<Name>> {
  let pos = match find(li, name) {
    Ok(_) => return Err(Error::DuplicateBackend(HipStr::from(name.to_owned()))),
    Err(pos) => pos,
  };
  if li.len() >= size {
    return Err(Error::TableFull(li.len()));
  }
  let mut r = Vec::with_capacity(li.len() + 1);
  r.extend_from_slice(&li[..pos]);
  r.push(HipStr::from(name.to_owned()));
  r.extend_from_slice(&li[pos..]);
  Ok(r)
}

/// `li` without `name` / 从 `li` 中移除 `name`
pub fn rm(li: &[Name], name: &str) -> Result<Vec<Name>> {
  let pos = find(li, name).map_err(|_| Error::NotFound(HipStr::from(name.to_owned())))?;
  let mut r = Vec::with_capacity(li.len() - 1);
  r.extend_from_slice(&li[..pos]);
  r.extend_from_slice(&li[pos + 1..]);
  Ok(r)
}

/// Binary search in sorted `li` / 在有序 `li` 中二分查找
#[inline]
pub fn find(li: &[Name], name: &str) -> std::result::Result<usize, usize> {
  li.binary_search_by(|n| n.as_str().cmp(name))
}
