use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use crate::Handle;

// -----------------------------------------------------------------------------
// Deleter

/// A disposal policy for objects of type `T`.
///
/// The policy nominates the [`Handle`] type an owner stores, and disposes of
/// non-null handles of that type.
///
/// Policies can be stateless (zero-sized, costing nothing inside the owner) or
/// carry state. A `&mut D` is itself a policy that forwards to `D`, so several
/// owners can share one stateful policy over time without copying it.
///
/// # Examples
///
/// ```
/// use vc_uptr::{Deleter, UniquePtr};
///
/// /// Counts disposals instead of freeing anything.
/// #[derive(Default)]
/// struct Tally(usize);
///
/// impl Deleter<u32> for Tally {
///     type Pointer = *mut u32;
///
///     unsafe fn delete(&mut self, _ptr: *mut u32) {
///         self.0 += 1;
///     }
/// }
///
/// let mut slot = 5u32;
/// let mut tally = Tally::default();
/// {
///     let _owner = unsafe { UniquePtr::<u32, &mut Tally>::from_raw_with(&raw mut slot, &mut tally) };
/// }
/// assert_eq!(tally.0, 1);
/// ```
pub trait Deleter<T: ?Sized> {
    /// The handle type stored by owners using this policy.
    type Pointer: Handle;

    /// Disposes of the object behind `ptr`.
    ///
    /// Implementations must not panic.
    ///
    /// # Safety
    ///
    /// - `ptr` is not null.
    /// - `ptr` is owned by the caller and is never used again after this call.
    unsafe fn delete(&mut self, ptr: Self::Pointer);
}

impl<T: ?Sized, D: ?Sized + Deleter<T>> Deleter<T> for &mut D {
    type Pointer = D::Pointer;

    #[inline(always)]
    unsafe fn delete(&mut self, ptr: Self::Pointer) {
        // SAFETY: forwarded from the caller.
        unsafe { (**self).delete(ptr) }
    }
}

impl<T: ?Sized, P: Handle> Deleter<T> for fn(P) {
    type Pointer = P;

    #[inline(always)]
    unsafe fn delete(&mut self, ptr: P) {
        (*self)(ptr)
    }
}

impl<T: ?Sized, P: Handle> Deleter<T> for unsafe fn(P) {
    type Pointer = P;

    #[inline(always)]
    unsafe fn delete(&mut self, ptr: P) {
        // SAFETY: forwarded from the caller.
        unsafe { (*self)(ptr) }
    }
}

// -----------------------------------------------------------------------------
// DefaultDelete

/// The default policy: disposes of objects that were allocated as a [`Box`].
///
/// One zero-sized value serves every element type. Re-viewing an owner from
/// `UniquePtr<U>` to `UniquePtr<T>` therefore never converts the policy, the
/// element compatibility of `U` and `T` alone decides whether it is allowed.
///
/// For an array owner (`T = [E]`) the handle is a slice pointer, and disposal
/// drops every element before freeing the allocation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DefaultDelete;

impl<T: ?Sized> Deleter<T> for DefaultDelete {
    type Pointer = Option<NonNull<T>>;

    #[inline]
    unsafe fn delete(&mut self, ptr: Option<NonNull<T>>) {
        if let Some(ptr) = ptr {
            // SAFETY: owners using this policy only hold pointers obtained from
            // `Box`, see `UniquePtr::from_raw`.
            drop(unsafe { Box::from_raw(ptr.as_ptr()) });
        }
    }
}

// -----------------------------------------------------------------------------
// FnDelete

/// Adapts a closure taking handles of type `P` into a [`Deleter`].
///
/// # Examples
///
/// ```
/// use vc_uptr::{FnDelete, UniquePtr};
///
/// let mut slot = 1i32;
/// let owner = unsafe {
///     UniquePtr::<i32, _>::from_raw_with(&raw mut slot, FnDelete::new(|p: *mut i32| unsafe { *p = 0 }))
/// };
/// drop(owner);
/// assert_eq!(slot, 0);
/// ```
pub struct FnDelete<F, P> {
    func: F,
    _marker: PhantomData<fn(P)>,
}

impl<F, P> FnDelete<F, P> {
    /// Wraps `func`.
    #[inline(always)]
    pub const fn new(func: F) -> Self {
        Self {
            func,
            _marker: PhantomData,
        }
    }

    /// Returns the wrapped closure.
    #[inline(always)]
    pub fn into_inner(self) -> F {
        self.func
    }
}

impl<F: Clone, P> Clone for FnDelete<F, P> {
    fn clone(&self) -> Self {
        Self::new(self.func.clone())
    }
}

impl<F: Default, P> Default for FnDelete<F, P> {
    fn default() -> Self {
        Self::new(F::default())
    }
}

impl<F, P> fmt::Debug for FnDelete<F, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnDelete")
    }
}

impl<T: ?Sized, P: Handle, F: FnMut(P)> Deleter<T> for FnDelete<F, P> {
    type Pointer = P;

    #[inline(always)]
    unsafe fn delete(&mut self, ptr: P) {
        (self.func)(ptr)
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultDelete, Deleter, FnDelete};
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;
    use core::ptr::NonNull;

    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn default_delete_is_zero_sized() {
        assert_eq!(size_of::<DefaultDelete>(), 0);
    }

    #[test]
    fn default_delete_single() {
        let drops = Rc::new(Cell::new(0));
        let ptr = NonNull::from(Box::leak(Box::new(Tracked(drops.clone()))));

        unsafe { <DefaultDelete as Deleter<Tracked>>::delete(&mut DefaultDelete, Some(ptr)) };
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn default_delete_array_drops_every_element() {
        let drops = Rc::new(Cell::new(0));
        let items = vec![
            Tracked(drops.clone()),
            Tracked(drops.clone()),
            Tracked(drops.clone()),
        ];
        let ptr = NonNull::from(Box::leak(items.into_boxed_slice()));

        unsafe { <DefaultDelete as Deleter<[Tracked]>>::delete(&mut DefaultDelete, Some(ptr)) };
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn default_delete_ignores_null() {
        unsafe { <DefaultDelete as Deleter<Tracked>>::delete(&mut DefaultDelete, None) };
    }

    #[test]
    fn reference_policy_forwards() {
        let calls = Cell::new(0);
        let mut inner: FnDelete<_, *mut u8> = FnDelete::new(|_: *mut u8| calls.set(calls.get() + 1));
        let mut outer = &mut inner;

        let mut byte = 0u8;
        unsafe { <&mut _ as Deleter<u8>>::delete(&mut outer, &raw mut byte) };
        unsafe { <&mut _ as Deleter<u8>>::delete(&mut outer, &raw mut byte) };
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn fn_pointer_policy() {
        fn zero(p: *mut i32) {
            unsafe { *p = 0 };
        }

        let mut x = 9;
        let mut policy: fn(*mut i32) = zero;
        unsafe { Deleter::<i32>::delete(&mut policy, &raw mut x) };
        assert_eq!(x, 0);
    }
}
