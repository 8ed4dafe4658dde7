//! Immutable table generation / 不可变的查找表代
//!
//! Backend list, permutation rows and lookup table are built together and
//! never change afterwards; a mutation publishes a whole new snapshot.
//! 后端列表、排列行与查找表一起构建，之后不再改变；变更会发布一个全新快照。

use crate::{Error, KeyHash, Perm, Result, nodes::Name, populate::populate};

/// One generation of the table / 查找表的一代
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
  nodes: Box<[Name]>,
  perms: Box<[Perm]>,
  lookup: Box<[u32]>,
  size: usize,
}

impl Snapshot {
  /// Empty snapshot / 空快照
  pub(crate) fn empty(size: usize) -> Self {
    Self {
      size,
      ..Default::default()
    }
  }

  /// Build from sorted backend names / 由有序后端名构建
  pub(crate) fn build<H: KeyHash + ?Sized>(hash: &H, nodes: Vec<Name>, size: usize) -> Self {
    let perms: Box<[Perm]> = nodes
      .iter()
      .map(|name| Perm::new(hash, name, size))
      .collect();
    let lookup = populate(&perms, size);
    Self {
      nodes: nodes.into_boxed_slice(),
      perms,
      lookup,
      size,
    }
  }

  /// Sorted backend names / 有序后端名
  #[inline]
  pub fn backends(&self) -> &[Name] {
    &self.nodes
  }

  /// Permutation rows, index-aligned with [`Self::backends`]
  /// 排列行，下标与 [`Self::backends`] 对齐
  #[inline]
  pub fn perms(&self) -> &[Perm] {
    &self.perms
  }

  /// Slot → backend index, empty when no backend
  /// 槽位 → 后端下标，无后端时为空
  #[inline]
  pub fn lookup(&self) -> &[u32] {
    &self.lookup
  }

  /// Table size M / 查找表大小 M
  #[inline]
  pub fn size(&self) -> usize {
    self.size
  }

  /// Backend count N / 后端数量 N
  #[inline]
  pub fn len(&self) -> usize {
    self.nodes.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.nodes.is_empty()
  }

  /// Slot of `key` / `key` 所在槽位
  #[inline]
  pub fn slot<H: KeyHash + ?Sized>(&self, hash: &H, key: &[u8]) -> usize {
    (hash.offset(key) % self.size as u64) as usize
  }

  /// Backend owning `key` / `key` 所属后端
  #[inline]
  pub fn get<H: KeyHash + ?Sized>(&self, hash: &H, key: &[u8]) -> Result<&Name> {
    if self.nodes.is_empty() {
      return Err(Error::EmptyTable);
    }
    let i = self.lookup[self.slot(hash, key)];
    Ok(&self.nodes[i as usize])
  }

  /// Slot count of every backend / 每个后端拥有的槽位数
  pub fn owned(&self) -> Vec<usize> {
    let mut count = vec![0; self.nodes.len()];
    for &i in self.lookup.iter() {
      count[i as usize] += 1;
    }
    count
  }

  /// Slots whose backend changed from `old` to `new`, tables of different sizes count every slot
  /// 从 `old` 到 `new` 所属后端发生变化的槽位数，大小不同的表按全部槽位计
  pub fn moved(old: &Snapshot, new: &Snapshot) -> usize {
    if old.size != new.size {
      return old.size.max(new.size);
    }
    match (old.is_empty(), new.is_empty()) {
      (true, true) => 0,
      (false, false) => old
        .lookup
        .iter()
        .zip(new.lookup.iter())
        .filter(|&(&a, &b)| old.nodes[a as usize] != new.nodes[b as usize])
        .count(),
      _ => old.size,
    }
  }
}
