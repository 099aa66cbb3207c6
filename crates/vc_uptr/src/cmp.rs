use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::{Deleter, Handle, UniquePtr};

// -----------------------------------------------------------------------------
// Null

/// The null literal, for comparing owners against "owns nothing".
///
/// # Examples
///
/// ```
/// use vc_uptr::{Null, UniquePtr};
///
/// let p = UniquePtr::from_box(Box::new(1));
/// assert!(p != Null);
/// assert!(Null < p);
///
/// let q: UniquePtr<i32> = Null.into();
/// assert!(q == Null);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Null;

impl<T: ?Sized, D: Deleter<T> + Default> From<Null> for UniquePtr<T, D> {
    #[inline]
    fn from(_: Null) -> Self {
        Self::null()
    }
}

// -----------------------------------------------------------------------------
// Owner against owner

/// Owners compare by their handles, never by the objects behind them.
impl<T1, D1, T2, D2> PartialEq<UniquePtr<T2, D2>> for UniquePtr<T1, D1>
where
    T1: ?Sized,
    D1: Deleter<T1>,
    T2: ?Sized,
    D2: Deleter<T2>,
    D1::Pointer: PartialEq<D2::Pointer>,
{
    #[inline]
    fn eq(&self, other: &UniquePtr<T2, D2>) -> bool {
        self.get() == other.get()
    }
}

impl<T: ?Sized, D: Deleter<T>> Eq for UniquePtr<T, D> where D::Pointer: Eq {}

/// Only `<` of the handles is consulted, the other relations derive from it.
impl<T1, D1, T2, D2> PartialOrd<UniquePtr<T2, D2>> for UniquePtr<T1, D1>
where
    T1: ?Sized,
    D1: Deleter<T1>,
    T2: ?Sized,
    D2: Deleter<T2>,
    D1::Pointer: PartialOrd<D2::Pointer>,
    D2::Pointer: PartialOrd<D1::Pointer>,
{
    #[inline]
    fn partial_cmp(&self, other: &UniquePtr<T2, D2>) -> Option<Ordering> {
        self.get().partial_cmp(&other.get())
    }

    #[inline]
    fn lt(&self, other: &UniquePtr<T2, D2>) -> bool {
        self.get() < other.get()
    }

    #[inline]
    fn le(&self, other: &UniquePtr<T2, D2>) -> bool {
        !(other.get() < self.get())
    }

    #[inline]
    fn gt(&self, other: &UniquePtr<T2, D2>) -> bool {
        other.get() < self.get()
    }

    #[inline]
    fn ge(&self, other: &UniquePtr<T2, D2>) -> bool {
        !(self.get() < other.get())
    }
}

impl<T: ?Sized, D: Deleter<T>> Ord for UniquePtr<T, D>
where
    D::Pointer: Ord,
{
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.get().cmp(&other.get())
    }
}

/// Hashes the handle, consistent with [`PartialEq`].
impl<T: ?Sized, D: Deleter<T>> Hash for UniquePtr<T, D>
where
    D::Pointer: Hash,
{
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.get().hash(state);
    }
}

// -----------------------------------------------------------------------------
// Owner against null

impl<T: ?Sized, D: Deleter<T>> PartialEq<Null> for UniquePtr<T, D> {
    #[inline]
    fn eq(&self, _: &Null) -> bool {
        self.is_null()
    }
}

impl<T: ?Sized, D: Deleter<T>> PartialEq<UniquePtr<T, D>> for Null {
    #[inline]
    fn eq(&self, other: &UniquePtr<T, D>) -> bool {
        other.is_null()
    }
}

impl<T: ?Sized, D: Deleter<T>> PartialOrd<Null> for UniquePtr<T, D> {
    #[inline]
    fn partial_cmp(&self, _: &Null) -> Option<Ordering> {
        self.get().partial_cmp(&D::Pointer::null())
    }

    #[inline]
    fn lt(&self, _: &Null) -> bool {
        self.get() < D::Pointer::null()
    }

    #[inline]
    fn le(&self, _: &Null) -> bool {
        !(D::Pointer::null() < self.get())
    }

    #[inline]
    fn gt(&self, _: &Null) -> bool {
        D::Pointer::null() < self.get()
    }

    #[inline]
    fn ge(&self, _: &Null) -> bool {
        !(self.get() < D::Pointer::null())
    }
}

impl<T: ?Sized, D: Deleter<T>> PartialOrd<UniquePtr<T, D>> for Null {
    #[inline]
    fn partial_cmp(&self, other: &UniquePtr<T, D>) -> Option<Ordering> {
        D::Pointer::null().partial_cmp(&other.get())
    }

    #[inline]
    fn lt(&self, other: &UniquePtr<T, D>) -> bool {
        D::Pointer::null() < other.get()
    }

    #[inline]
    fn le(&self, other: &UniquePtr<T, D>) -> bool {
        !(other.get() < D::Pointer::null())
    }

    #[inline]
    fn gt(&self, other: &UniquePtr<T, D>) -> bool {
        other.get() < D::Pointer::null()
    }

    #[inline]
    fn ge(&self, other: &UniquePtr<T, D>) -> bool {
        !(D::Pointer::null() < other.get())
    }
}

#[cfg(test)]
mod tests {
    use super::Null;
    use crate::{Deleter, UniquePtr};
    use alloc::boxed::Box;
    use core::cmp::Ordering;
    use core::hash::{Hash, Hasher};

    /// Leaves the slot alone on disposal.
    #[derive(Default)]
    struct Borrowed;

    impl Deleter<i32> for Borrowed {
        type Pointer = *mut i32;

        unsafe fn delete(&mut self, _ptr: *mut i32) {}
    }

    fn borrowed(slot: *mut i32) -> UniquePtr<i32, Borrowed> {
        unsafe { UniquePtr::from_raw(slot) }
    }

    /// FNV-1a, enough to compare hashes in tests.
    struct Fnv(u64);

    impl Hasher for Fnv {
        fn finish(&self) -> u64 {
            self.0
        }

        fn write(&mut self, bytes: &[u8]) {
            for byte in bytes {
                self.0 = (self.0 ^ u64::from(*byte)).wrapping_mul(0x100_0000_01b3);
            }
        }
    }

    fn fnv<T: Hash>(value: &T) -> u64 {
        let mut state = Fnv(0xcbf2_9ce4_8422_2325);
        value.hash(&mut state);
        state.finish()
    }

    #[test]
    fn equality_follows_handles() {
        let mut slots = [1, 1];
        let base = slots.as_mut_ptr();
        let a = borrowed(base);
        let b = borrowed(base);
        let c = borrowed(base.wrapping_add(1));

        assert!(a == b);
        assert!(a != c);
        assert_eq!(fnv(&a), fnv(&b));

        let n1 = UniquePtr::<i32, Borrowed>::null();
        let n2 = UniquePtr::<i32, Borrowed>::null();
        assert!(n1 == n2);
        assert!(a != n1);
    }

    #[test]
    fn ordering_follows_handles() {
        let mut slots = [0; 2];
        let base = slots.as_mut_ptr();
        let lo = borrowed(base);
        let hi = borrowed(base.wrapping_add(1));

        assert!(lo < hi);
        assert!(lo <= hi);
        assert!(hi > lo);
        assert!(hi >= lo);
        assert!(lo <= borrowed(base));
        assert!(lo >= borrowed(base));

        // `<` and `==` never hold together.
        assert!(!(lo < borrowed(base) && lo == borrowed(base)));
        assert!(!(lo < hi && lo == hi));
        assert!(!(hi < lo && hi == lo));
        assert!(lo != hi);
        assert_eq!(lo.cmp(&hi), Ordering::Less);
        assert_eq!(hi.partial_cmp(&lo), Some(Ordering::Greater));
    }

    #[test]
    fn null_orders_before_objects() {
        let p = UniquePtr::from_box(Box::new(1));
        let empty = UniquePtr::<i32>::null();

        assert!(empty < p);
        assert!(p != Null);
        assert!(Null != p);
        assert!(empty == Null);
        assert!(Null == empty);

        assert!(Null < p);
        assert!(Null <= p);
        assert!(p > Null);
        assert!(p >= Null);
        assert!(!(p < Null));
        assert!(!(p <= Null));
        assert!(!(Null > p));
        assert!(!(Null >= p));

        assert!(empty <= Null);
        assert!(empty >= Null);
        assert!(!(empty < Null));
        assert_eq!(empty.partial_cmp(&Null), Some(Ordering::Equal));
        assert_eq!(Null.partial_cmp(&p), Some(Ordering::Less));
    }

    #[test]
    fn from_null() {
        let p: UniquePtr<[u8]> = Null.into();
        assert!(p.is_null());
        assert_eq!(Null, Null::default());
    }
}
