use core::ptr::{self, NonNull};

use crate::Upcast;

// -----------------------------------------------------------------------------
// Handle

/// A pointer-like value that a [`UniquePtr`](crate::UniquePtr) stores.
///
/// A handle is plain data: copying it never duplicates ownership, the owner
/// decides who is responsible for it. Every handle type has a null sentinel
/// meaning "owns nothing", and an owner holding the null sentinel never calls
/// its deleter.
///
/// Ordering comes straight from the handle's own [`PartialOrd`], no total-order
/// adaptor is applied on top of it.
///
/// # Examples
///
/// ```
/// use vc_uptr::Handle;
/// use core::ptr::NonNull;
///
/// assert!(<Option<NonNull<u32>>>::null().is_null());
/// assert!(<*mut u32>::null().is_null());
///
/// let mut x = 1u32;
/// assert!(!Some(NonNull::from(&mut x)).is_null());
/// ```
pub trait Handle: Copy + PartialEq + PartialOrd {
    /// Returns the null sentinel.
    fn null() -> Self;

    /// Returns `true` if `self` is the null sentinel.
    fn is_null(&self) -> bool;
}

impl<T: ?Sized> Handle for Option<NonNull<T>> {
    #[inline(always)]
    fn null() -> Self {
        None
    }

    #[inline(always)]
    fn is_null(&self) -> bool {
        self.is_none()
    }
}

impl<T> Handle for *mut T {
    #[inline(always)]
    fn null() -> Self {
        ptr::null_mut()
    }

    #[inline(always)]
    fn is_null(&self) -> bool {
        <*mut T>::is_null(*self)
    }
}

// -----------------------------------------------------------------------------
// RawHandle

/// A [`Handle`] that addresses memory holding a `Target`.
///
/// Owners only offer dereferencing and indexing when their handle implements
/// this trait.
///
/// # Safety
///
/// - [`as_non_null`](Self::as_non_null) returns `None` exactly when the handle
///   is the null sentinel.
/// - A non-null result points to the object the handle stands for, so an owner
///   of the handle may hand out references to it.
/// - The handle carries no thread affinity of its own: sending it to another
///   thread is sound whenever sending the `Target` is.
pub unsafe trait RawHandle: Handle {
    /// The type the handle points at.
    type Target: ?Sized;

    /// Views the handle as a nullable `NonNull`.
    fn as_non_null(self) -> Option<NonNull<Self::Target>>;
}

// SAFETY: `None` is the null sentinel and `Some` holds the pointer itself.
unsafe impl<T: ?Sized> RawHandle for Option<NonNull<T>> {
    type Target = T;

    #[inline(always)]
    fn as_non_null(self) -> Option<NonNull<T>> {
        self
    }
}

// SAFETY: `NonNull::new` maps exactly the null pointer to `None`.
unsafe impl<T> RawHandle for *mut T {
    type Target = T;

    #[inline(always)]
    fn as_non_null(self) -> Option<NonNull<T>> {
        NonNull::new(self)
    }
}

// -----------------------------------------------------------------------------
// PointerFrom

/// Handle convertibility: a `P` handle may be re-typed as `Self`.
///
/// This is the handle half of the conversion rules used by
/// [`UniquePtr::from_unique`](crate::UniquePtr::from_unique). For the
/// built-in handles it holds exactly when the source element type implements
/// [`Upcast`] to the destination element type.
///
/// # Safety
///
/// - The null sentinel of `P` must convert to the null sentinel of `Self`.
/// - A non-null handle must convert to a handle for the same object, so
///   disposing the result disposes the same object.
pub unsafe trait PointerFrom<P>: Handle {
    /// Re-types `ptr`.
    fn pointer_from(ptr: P) -> Self;
}

// SAFETY: `Upcast` keeps the address, and `None` stays `None`.
unsafe impl<T, U> PointerFrom<Option<NonNull<U>>> for Option<NonNull<T>>
where
    T: ?Sized,
    U: ?Sized + Upcast<T>,
{
    #[inline(always)]
    fn pointer_from(ptr: Option<NonNull<U>>) -> Self {
        ptr.map(U::upcast)
    }
}

// SAFETY: `Upcast` keeps the address, and null stays null.
unsafe impl<T, U: Upcast<T>> PointerFrom<*mut U> for *mut T {
    #[inline]
    fn pointer_from(ptr: *mut U) -> Self {
        match NonNull::new(ptr) {
            Some(ptr) => U::upcast(ptr).as_ptr(),
            None => ptr::null_mut(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, PointerFrom, RawHandle};
    use core::ptr::{self, NonNull};

    #[test]
    fn null_sentinels() {
        assert!(<Option<NonNull<[u8]>>>::null().is_null());
        assert!(<*mut u8>::null().is_null());
        assert_eq!(<*mut u8>::null(), ptr::null_mut());

        assert_eq!(RawHandle::as_non_null(<*mut u8>::null()), None);
        assert_eq!(<Option<NonNull<u8>>>::null().as_non_null(), None);
    }

    #[test]
    fn raw_views_keep_address() {
        let mut x = 3u64;
        let raw = &raw mut x;

        let nn = RawHandle::as_non_null(raw).unwrap();
        assert_eq!(nn.as_ptr(), raw);
        assert_eq!(Some(nn).as_non_null(), Some(nn));
    }

    #[test]
    fn null_converts_to_null() {
        let p = <Option<NonNull<u8>> as PointerFrom<Option<NonNull<u8>>>>::pointer_from(None);
        assert!(p.is_null());

        let p = <*mut u8 as PointerFrom<*mut u8>>::pointer_from(ptr::null_mut());
        assert!(Handle::is_null(&p));
    }

    #[test]
    fn null_orders_first() {
        let mut x = 0u8;
        let some = Some(NonNull::from(&mut x));
        assert!(<Option<NonNull<u8>>>::null() < some);
        assert!(<*mut u8>::null() < &raw mut x);
    }
}
