//! A scored, ordered skip list map.
//!
//! Keys are kept sorted by a pluggable [`KeyOrder`] policy. Each key is
//! first projected to an `f64` [score](Scorable) so most comparisons are a
//! single float compare, and the policy is consulted only on ties.
//!
//! ```rust
//! use skiplist::{Ascending, SkipList};
//!
//! let mut list = SkipList::new(Ascending).unwrap();
//! list.set(20, "Hello");
//! list.set(10, "World");
//! list.set(40, "!");
//!
//! assert_eq!(list.get_value(&10), Some(&"World"));
//! assert_eq!(list.find(&15).map(|node| *node.key()), Some(20));
//! assert_eq!(*list.front().unwrap().key(), 10);
//!
//! let removed = list.remove(&40).unwrap();
//! assert_eq!(removed.into_value(), "!");
//! assert_eq!(list.len(), 2);
//! ```
//!
//! A list is not synchronized. Heights are drawn from a shared, locked
//! generator unless [`SkipList::set_rand_source`] installs a private one.

mod error;
pub mod level;
mod node;
mod option;
pub mod order;
pub mod score;
mod skip_list;

pub use error::{Error, Result};
pub use level::{
    DEFAULT_MAX_LEVEL, GlobalRandSource, default_max_level, seed_global_rand,
    set_default_max_level,
};
pub use node::{Node, NodeRef};
pub use option::Options;
pub use order::{Ascending, Descending, GreaterThan, KeyOrder, LessThan, Orientation, Reversed};
pub use score::{Scorable, calc_score};
pub use skip_list::{Iter, SkipList};
