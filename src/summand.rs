//! Numeric cell types for a [`FenwickTree`](crate::FenwickTree).

use std::fmt::Debug;
use std::ops::Add;
use std::ops::AddAssign;
use std::ops::Sub;
use std::ops::SubAssign;

/// A value that can be stored in a Fenwick tree cell.
///
/// The tree only ever adds and subtracts cells, so all it needs is an
/// additive identity and the usual arithmetic operators. Ordering is used by
/// [`FenwickTree::index_of`](crate::FenwickTree::index_of) to compare running
/// totals against a target sum.
pub trait Summand:
    Copy
    + Debug
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + AddAssign
    + SubAssign
{
    /// The additive identity.
    fn zero() -> Self;
}

macro_rules! impl_summand {
    ($zero:literal => $($ty:ty),*) => {
        $(
            impl Summand for $ty {
                #[inline]
                fn zero() -> Self {
                    $zero
                }
            }
        )*
    };
}

impl_summand!(0 => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_summand!(0.0 => f32, f64);
