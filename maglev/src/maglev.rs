//! Concurrent Maglev table / 并发 Maglev 查找表

use std::{fmt, sync::Arc};

use log::{Level, debug, log_enabled};
use parking_lot::{Mutex, RwLock};

use crate::{
  Conf, KeyHash, ParsedConf, Result, Sip, Snapshot,
  nodes::{self, Name, check_size},
};

/// Maglev consistent hashing table / Maglev 一致性哈希查找表
///
/// Readers clone the current [`Snapshot`] under a read lock; writers are
/// serialized by a mutex, rebuild off-lock and swap the snapshot in one step.
/// 读者在读锁下克隆当前 [`Snapshot`]；写者由互斥锁串行化，在锁外重建后一步替换快照。
///
/// ```
/// use maglev::Maglev;
///
/// let table = Maglev::new(["backend-0", "backend-1", "backend-2"], 13).unwrap();
/// let a = table.get("IP1").unwrap();
/// assert_eq!(a, table.get("IP1").unwrap());
///
/// table.rm("backend-1").unwrap();
/// assert_eq!(table.len(), 2);
/// ```
pub struct Maglev<H: KeyHash = Sip> {
  hash: H,
  size: usize,
  snap: RwLock<Arc<Snapshot>>,
  // Serializes writers / 串行化写者
  w: Mutex<()>,
}

impl Maglev<Sip> {
  /// Table of `size` slots with default SipHash seeds
  /// 使用默认 SipHash 密钥，创建 `size` 个槽位的查找表
  pub fn new<I, S>(backends: I, size: u64) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    Self::with_hash(backends, size, Sip::default())
  }

  /// Table from config / 按配置创建查找表
  pub fn with_conf<I, S>(backends: I, conf: &[Conf]) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let c = ParsedConf::parse(conf);
    Self::with_hash(backends, c.size, Sip::new(c.offset_seed, c.skip_seed))
  }
}

impl<H: KeyHash> Maglev<H> {
  /// Table with custom hash pair / 使用自定义哈希对创建查找表
  pub fn with_hash<I, S>(backends: I, size: u64, hash: H) -> Result<Self>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let size = check_size(size)?;
    let li = nodes::sorted(backends, size)?;
    let snap = Snapshot::build(&hash, li, size);
    debug!("maglev built: n={}, m={size}", snap.len());
    Ok(Self {
      hash,
      size,
      snap: RwLock::new(Arc::new(snap)),
      w: Mutex::new(()),
    })
  }

  /// Replace all backends / 替换全部后端
  pub fn set<I, S>(&self, backends: I) -> Result<()>
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let li = nodes::sorted(backends, self.size)?;
    let _w = self.w.lock();
    self.publish(li);
    Ok(())
  }

  /// Add one backend / 添加一个后端
  pub fn add(&self, name: &str) -> Result<()> {
    let _w = self.w.lock();
    let li = nodes::add(self.snapshot().backends(), name, self.size)?;
    self.publish(li);
    Ok(())
  }

  /// Remove one backend / 移除一个后端
  pub fn rm(&self, name: &str) -> Result<()> {
    let _w = self.w.lock();
    let li = nodes::rm(self.snapshot().backends(), name)?;
    self.publish(li);
    Ok(())
  }

  /// Backend owning `key` / `key` 所属后端
  pub fn get(&self, key: impl AsRef<[u8]>) -> Result<Name> {
    let snap = self.snapshot();
    let name = snap.get(&self.hash, key.as_ref())?;
    Ok(name.clone())
  }

  /// Drop all backends / 清空所有后端
  pub fn clear(&self) {
    let _w = self.w.lock();
    *self.snap.write() = Arc::new(Snapshot::empty(self.size));
    debug!("maglev cleared: m={}", self.size);
  }

  /// Current generation / 当前代快照
  #[inline]
  pub fn snapshot(&self) -> Arc<Snapshot> {
    self.snap.read().clone()
  }

  /// Sorted backend names / 有序后端名
  pub fn backends(&self) -> Vec<Name> {
    self.snapshot().backends().to_vec()
  }

  pub fn contains(&self, name: &str) -> bool {
    nodes::find(self.snapshot().backends(), name).is_ok()
  }

  /// Backend count / 后端数量
  #[inline]
  pub fn len(&self) -> usize {
    self.snap.read().len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  /// Table size / 查找表大小
  #[inline]
  pub fn size(&self) -> usize {
    self.size
  }

  #[inline]
  pub fn hash(&self) -> &H {
    &self.hash
  }

  /// Caller holds `w` / 调用方持有 `w`
  fn publish(&self, li: Vec<Name>) {
    let new = Arc::new(Snapshot::build(&self.hash, li, self.size));
    let old = std::mem::replace(&mut *self.snap.write(), new.clone());
    if log_enabled!(Level::Debug) {
      debug!(
        "maglev rebuilt: n={}, m={}, moved={}",
        new.len(),
        self.size,
        Snapshot::moved(&old, &new)
      );
    }
  }
}

impl<H: KeyHash> fmt::Debug for Maglev<H> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let snap = self.snapshot();
    f.debug_struct("Maglev")
      .field("size", &self.size)
      .field("backends", &snap.backends())
      .finish()
  }
}
