//! Sentinel-based slot indices.
//!
//! Links between queued nodes are slot indices into the pool rather than
//! pointers. A reserved sentinel (`MAX` of the integer type) stands in for
//! "no successor", which keeps a link the size of the index itself instead
//! of `Option<Idx>`.

/// A copyable slot index with a sentinel "none" value.
///
/// # Example
///
/// ```
/// use nexus_prio::Index;
///
/// let idx: u16 = 5;
/// let none: u16 = u16::NONE;
///
/// assert!(idx.is_some());
/// assert!(none.is_none());
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no slot".
    const NONE: Self;

    /// Number of slots this index type can address.
    ///
    /// Every value except `NONE`, so `0..MAX_SLOTS` are valid slot indices.
    const MAX_SLOTS: usize;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the index as a `usize` for array access.
    fn as_usize(self) -> usize;

    /// Creates an index from a slot position.
    ///
    /// The caller guarantees `val < MAX_SLOTS`.
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_index_for_unsigned {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;
                const MAX_SLOTS: usize = <$ty>::MAX as usize;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    debug_assert!(val < Self::MAX_SLOTS);
                    val as Self
                }
            }
        )*
    };
}

impl_index_for_unsigned!(u8, u16, u32);
