use std::{collections::HashSet, sync::Arc, thread};

use aok::{OK, Void};
use log::info;
use maglev::{Conf, DEFAULT_SIZE, Error, KeyHash, Maglev, Sip, Snapshot};

#[static_init::constructor(0)]
extern "C" fn _log_init() {
  log_init::init();
}

const N: usize = 5;
const M: u64 = 13;

fn names(n: usize) -> Vec<String> {
  (0..n).map(|i| format!("backend-{i}")).collect()
}

fn keys() -> Vec<String> {
  (0..1024).map(|i| format!("IP{i}")).collect()
}

#[test]
fn test_simple() -> Void {
  info!("> 基本查找");
  let li = names(N);
  let table = Maglev::new(&li, M)?;

  let snap = table.snapshot();
  assert_eq!(snap.lookup().len(), M as usize);
  assert_eq!(snap.perms().len(), N);

  let v = table.get("IP1")?;
  assert!(li.iter().any(|n| n == v.as_str()), "{v} not in backends");
  assert_eq!(v, table.get("IP1")?);
  OK
}

#[test]
fn test_compat_lookup() -> Void {
  info!("> 与已部署查找表一致");
  let table = Maglev::new(names(N), M)?;
  assert_eq!(table.snapshot().lookup(), [1, 4, 3, 1, 2, 0, 0, 2, 4, 1, 0, 3, 2]);

  assert_eq!(Sip::default().offset(b"IP1"), 0x089d_d029_c19a_ba36);
  assert_eq!(table.get("IP1")?, "backend-2");
  assert_eq!(table.get("IP2")?, "backend-1");
  assert_eq!(table.get("IPasdasdwni2")?, "backend-0");

  table.rm("backend-0")?;
  assert_eq!(table.snapshot().lookup(), [0, 3, 2, 0, 1, 0, 0, 2, 3, 1, 3, 2, 1]);
  OK
}

#[test]
fn test_order_independent() -> Void {
  info!("> 顺序无关");
  let li = names(N);
  let rev: Vec<String> = li.iter().rev().cloned().collect();
  let mut shuffled = li.clone();
  fastrand::Rng::with_seed(7).shuffle(&mut shuffled);

  let a = Maglev::new(&li, M)?;
  let b = Maglev::new(&rev, M)?;
  let c = Maglev::new(&shuffled, M)?;
  assert_eq!(a.snapshot().lookup(), b.snapshot().lookup());
  assert_eq!(a.snapshot().lookup(), c.snapshot().lookup());

  for k in keys() {
    let x = a.get(&k)?;
    assert_eq!(x, b.get(&k)?);
    assert_eq!(x, c.get(&k)?);
  }
  OK
}

#[test]
fn test_set_add_rm() -> Void {
  info!("> Set / Add / Rm");
  let li = names(N);
  let table = Maglev::new(&li, M)?;

  table.add("backend-test")?;
  assert_eq!(table.len(), N + 1);
  assert!(table.contains("backend-test"));
  let snap = table.snapshot();
  assert_eq!(snap.lookup().len(), M as usize);
  assert_eq!(snap.perms().len(), snap.len());
  assert!(snap.backends().windows(2).all(|w| w[0] < w[1]));

  table.rm("backend-test")?;
  table.rm(&li[0])?;
  assert_eq!(table.len(), N - 1);
  assert!(!table.contains("backend-test"));
  assert!(!table.contains(&li[0]));
  let snap = table.snapshot();
  assert_eq!(snap.lookup().len(), M as usize);
  assert_eq!(snap.perms().len(), snap.len());

  table.set(["backend-0", "backend-1"])?;
  assert_eq!(table.backends(), ["backend-0", "backend-1"]);
  assert_eq!(table.snapshot().lookup().len(), M as usize);

  let too_many = names(M as usize + 1);
  assert_eq!(
    table.set(&too_many),
    Err(Error::TooManyBackends {
      n: M as usize + 1,
      size: M
    })
  );
  // failed set keeps the old table / 失败的 set 保留旧表
  assert_eq!(table.backends(), ["backend-0", "backend-1"]);
  OK
}

#[test]
fn test_errors() -> Void {
  info!("> 错误");
  let empty = Maglev::new(Vec::<String>::new(), M)?;
  assert_eq!(empty.get("x"), Err(Error::EmptyTable));
  assert!(empty.is_empty());

  assert_eq!(
    Maglev::new(names(5), 4).map(|_| ()),
    Err(Error::InvalidTableSize(4))
  );
  assert_eq!(
    Maglev::new(names(5), 3).map(|_| ()),
    Err(Error::TooManyBackends { n: 5, size: 3 })
  );
  assert_eq!(
    Maglev::new(names(3), 12).map(|_| ()),
    Err(Error::InvalidTableSize(12))
  );

  let table = Maglev::new(names(N), M)?;
  let before = table.snapshot();
  assert_eq!(
    table.add("backend-1"),
    Err(Error::DuplicateBackend("backend-1".into()))
  );
  assert_eq!(table.rm("backend-9"), Err(Error::NotFound("backend-9".into())));
  assert_eq!(table.rm("a"), Err(Error::NotFound("a".into())));
  assert!(Arc::ptr_eq(&before, &table.snapshot()));

  let full = Maglev::new(names(M as usize), M)?;
  assert_eq!(full.add("extra"), Err(Error::TableFull(M as usize)));
  OK
}

#[test]
fn test_full_table_one_slot_each() -> Void {
  let table = Maglev::new(names(M as usize), M)?;
  assert_eq!(table.snapshot().owned(), vec![1; M as usize]);
  OK
}

#[test]
fn test_coverage() -> Void {
  info!("> 覆盖与均衡");
  for (n, m) in [(1, 13), (5, 13), (7, 101), (10, 65537)] {
    let table = Maglev::new(names(n), m)?;
    let owned = table.snapshot().owned();
    let min = owned.iter().copied().min().unwrap_or(0);
    let max = owned.iter().copied().max().unwrap_or(0);
    assert!(min >= m as usize / n, "n={n} m={m} {owned:?}");
    assert!(max - min <= 1, "n={n} m={m} {owned:?}");
  }
  OK
}

#[test]
fn test_remove_keeps_surviving_keys() -> Void {
  info!("> 删除后端后存活键稳定");
  let li = names(N);
  let keys = keys();

  for gone in &li {
    let table = Maglev::new(&li, M)?;
    let before: Vec<_> = keys.iter().map(|k| table.get(k)).collect::<Result<_, _>>()?;
    let old = table.snapshot();
    table.rm(gone)?;
    let after: Vec<_> = keys.iter().map(|k| table.get(k)).collect::<Result<_, _>>()?;

    let mut total = 0;
    let mut kept = 0;
    for (b, a) in before.iter().zip(after.iter()) {
      assert_ne!(a.as_str(), gone.as_str());
      if b.as_str() != gone.as_str() {
        total += 1;
        if a == b {
          kept += 1;
        }
      }
    }
    info!("rm {gone}: {kept}/{total} kept");
    assert!(kept * 4 >= total * 3, "rm {gone}: {kept}/{total}");

    let moved = Snapshot::moved(&old, &table.snapshot());
    assert!(moved > 0 && moved < M as usize);
  }
  OK
}

#[test]
fn test_remove_until_empty() -> Void {
  let li = names(N);
  let table = Maglev::new(&li, M)?;

  let mut found = HashSet::new();
  for k in keys() {
    found.insert(table.get(&k)?);
  }
  assert!(found.len() >= 2);

  for (i, name) in li.iter().enumerate() {
    if i != 3 {
      table.rm(name)?;
    }
  }
  let mut found = HashSet::new();
  for k in keys() {
    found.insert(table.get(&k)?);
  }
  assert_eq!(found.len(), 1);
  assert!(found.contains(li[3].as_str()));

  table.rm(&li[3])?;
  assert_eq!(table.get("IP1"), Err(Error::EmptyTable));
  OK
}

#[test]
fn test_clear() -> Void {
  let table = Maglev::new(names(N), M)?;
  table.clear();
  assert!(table.is_empty());
  assert!(table.snapshot().lookup().is_empty());
  assert!(table.snapshot().perms().is_empty());
  assert_eq!(table.get("IP1"), Err(Error::EmptyTable));

  // usable again after clear / 清空后可再次使用
  table.add("backend-0")?;
  assert_eq!(table.get("IP1")?, "backend-0");
  assert_eq!(table.snapshot().owned(), [M as usize]);
  OK
}

#[test]
fn test_conf() -> Void {
  let table = Maglev::with_conf(names(N), &[])?;
  assert_eq!(table.size(), DEFAULT_SIZE as usize);

  let a = Maglev::with_conf(names(N), &[Conf::Size(M)])?;
  let b = Maglev::new(names(N), M)?;
  assert_eq!(a.snapshot().lookup(), b.snapshot().lookup());

  let c = Maglev::with_conf(
    names(N),
    &[Conf::Size(101), Conf::OffsetSeed(1), Conf::SkipSeed(2)],
  )?;
  assert_eq!(c.size(), 101);
  assert_eq!(*c.hash(), Sip::new(1, 2));
  OK
}

#[test]
fn test_custom_hash() -> Void {
  struct Fixed;

  impl KeyHash for Fixed {
    fn offset(&self, data: &[u8]) -> u64 {
      data.iter().map(|&b| b as u64).sum()
    }

    fn skip(&self, _: &[u8]) -> u64 {
      0
    }
  }

  let table = Maglev::with_hash(["a", "b"], 5, Fixed)?;
  // a: offset 97 % 5 = 2, b: 98 % 5 = 3, skip 1 for both
  // round 1: a→2 b→3, round 2: a→4 b→0, round 3: a→1
  assert_eq!(table.snapshot().lookup(), [1, 0, 0, 1, 0]);
  assert_eq!(table.get([0u8])?, "b");
  assert_eq!(table.get([2u8])?, "a");
  OK
}

#[test]
fn test_concurrent_readers() -> Void {
  info!("> 并发读写");
  let table = Maglev::new(names(N), M)?;
  let all = names(N + 1);

  thread::scope(|s| {
    for _ in 0..4 {
      s.spawn(|| {
        for k in keys() {
          let snap = table.snapshot();
          assert_eq!(snap.lookup().len(), M as usize);
          assert_eq!(snap.perms().len(), snap.len());
          assert!(snap.lookup().iter().all(|&i| (i as usize) < snap.len()));
          let v = table.get(&k).expect("get");
          assert!(all.iter().any(|n| n == v.as_str()));
        }
      });
    }
    s.spawn(|| {
      for _ in 0..64 {
        table.add("backend-5").expect("add");
        table.rm("backend-5").expect("rm");
      }
    });
  });

  assert_eq!(table.len(), N);
  OK
}
