//! Round-robin table population / 轮询填充查找表
//!
//! Backends take turns in sorted order; each claims the first free slot of its
//! own preference list. Stops once every slot is owned.
//! 后端按排序依次轮流，各自在偏好列表中认领第一个空闲槽位，所有槽位被占满即停止。

use crate::{Perm, perm::step};

/// Fill `size` slots from `perms`, slot → backend index
/// 由 `perms` 填充 `size` 个槽位，槽位 → 后端下标
///
/// Empty when `perms` is empty. `perms.len()` must not exceed `size`.
/// `perms` 为空时返回空表。`perms.len()` 不得超过 `size`。
pub fn populate(perms: &[Perm], size: usize) -> Box<[u32]> {
  if perms.is_empty() || size == 0 {
    return Box::default();
  }

  // Next candidate slot of each backend / 每个后端的下一个候选槽位
  let mut next: Vec<usize> = perms.iter().map(Perm::offset).collect();
  let mut entry: Vec<Option<u32>> = vec![None; size];
  let mut filled = 0;

  loop {
    for (i, perm) in perms.iter().enumerate() {
      let mut c = next[i];
      while entry[c].is_some() {
        c = step(c, perm.skip(), size);
      }
      entry[c] = Some(i as u32);
      next[i] = step(c, perm.skip(), size);
      filled += 1;
      if filled == size {
        return entry.into_iter().flatten().collect();
      }
    }
  }
}
