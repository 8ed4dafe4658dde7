//! Permutation rows / 排列行
//!
//! Row of backend `s` over `M` slots: `row[j] = (offset + j * skip) mod M`,
//! where `offset = H1(s) mod M` and `skip = H2(s) mod (M - 1) + 1`.
//! For prime `M` any `skip` in `[1, M)` visits every slot once.
//! 后端 `s` 在 `M` 个槽位上的排列；`M` 为素数时，`[1, M)` 内的任意步长恰好遍历每个槽位一次。
//!
//! A row is kept as its `(offset, skip)` pair and expanded on demand.
//! 排列行只保存 `(offset, skip)`，按需展开。

use crate::KeyHash;

/// Preference list of one backend / 单个后端的偏好列表
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Perm {
  offset: usize,
  skip: usize,
  size: usize,
}

impl Perm {
  /// `size` must be prime / `size` 必须是素数
  pub fn new<H: KeyHash + ?Sized>(hash: &H, name: &str, size: usize) -> Self {
    let m = size as u64;
    let offset = (hash.offset(name.as_bytes()) % m) as usize;
    let skip = if m > 1 {
      (hash.skip(name.as_bytes()) % (m - 1) + 1) as usize
    } else {
      1
    };
    Self { offset, skip, size }
  }

  #[inline(always)]
  pub fn offset(&self) -> usize {
    self.offset
  }

  #[inline(always)]
  pub fn skip(&self) -> usize {
    self.skip
  }

  /// j-th preferred slot / 第 j 个偏好槽位
  #[inline]
  pub fn at(&self, j: usize) -> usize {
    let m = self.size as u128;
    ((self.offset as u128 + j as u128 * self.skip as u128) % m) as usize
  }

  /// Full row, `size` slots / 完整排列行，共 `size` 个槽位
  pub fn row(&self) -> Row {
    Row {
      slot: self.offset,
      skip: self.skip,
      size: self.size,
      left: self.size,
    }
  }
}

/// Iterator over a permutation row / 排列行迭代器
#[derive(Debug, Clone)]
pub struct Row {
  slot: usize,
  skip: usize,
  size: usize,
  left: usize,
}

impl Iterator for Row {
  type Item = usize;

  #[inline]
  fn next(&mut self) -> Option<usize> {
    if self.left == 0 {
      return None;
    }
    self.left -= 1;
    let slot = self.slot;
    self.slot = step(slot, self.skip, self.size);
    Some(slot)
  }

  #[inline]
  fn size_hint(&self) -> (usize, Option<usize>) {
    (self.left, Some(self.left))
  }
}

impl ExactSizeIterator for Row {}

/// `(slot + skip) mod size` without overflow, both operands below `size`
/// 无溢出的 `(slot + skip) mod size`，两个操作数都小于 `size`
#[inline(always)]
pub(crate) fn step(slot: usize, skip: usize, size: usize) -> usize {
  let gap = size - slot;
  if skip >= gap { skip - gap } else { slot + skip }
}
