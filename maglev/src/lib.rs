//! # maglev - Maglev consistent hashing / Maglev 一致性哈希
//!
//! Maps client keys to one of a dynamic set of backends in O(1). The mapping
//! depends only on the backend set, not on the order it was given in, and a
//! change of the set moves as few keys as the permutations allow.
//! 以 O(1) 将客户端键映射到动态后端集合中的一个。映射只取决于后端集合本身，
//! 与传入顺序无关；集合变化时尽量少地迁移键。
//!
//! Reference: <https://research.google/pubs/pub44824/>

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod conf;
pub mod consts;
pub mod error;
pub mod hash;
mod maglev;
mod nodes;
mod perm;
mod populate;
mod prime;
mod snapshot;

pub use conf::{Conf, ParsedConf};
pub use consts::DEFAULT_SIZE;
pub use error::{Error, Result};
#[cfg(feature = "gxhash")]
pub use hash::Gx;
pub use hash::{KeyHash, Sip};
pub use maglev::Maglev;
pub use nodes::Name;
pub use perm::{Perm, Row};
pub use prime::is_prime;
pub use snapshot::Snapshot;
