//! Fenwick - a growable Fenwick tree (Binary Indexed Tree) for prefix sums.
//!
//! Prefix-sum queries and point updates run in O(log n). Unlike a fixed-size
//! Fenwick tree, elements can be appended and removed at the end in amortized
//! O(log n), and [`FenwickTree::index_of`] inverts the prefix sum by binary
//! lifting.
//!
//! # Quick Start
//!
//! ```
//! use fenwick::FenwickTree;
//!
//! let mut tree = FenwickTree::from_slice(&[1, 2, 3, 4]);
//! assert_eq!(tree.prefix_sum(4), Ok(10));
//!
//! // Relative update at 1-based position 2.
//! tree.update(2, 5).unwrap();
//! assert_eq!(tree.prefix_sum(2), Ok(8));
//!
//! // Grow and shrink at the end.
//! tree.push(10);
//! assert_eq!(tree.total(), 25);
//! assert!(tree.pop());
//!
//! // First position whose running total exceeds 8.
//! assert_eq!(tree.index_of(8), 3);
//! ```
//!
//! # Logging
//!
//! Enable the `tracing` feature to get a span around bulk construction and
//! events for pushes, pops and rejected indices.

pub mod error;
pub mod fenwick;
pub mod summand;

pub use error::FenwickError;
pub use error::Result;
pub use fenwick::FenwickTree;
pub use summand::Summand;
