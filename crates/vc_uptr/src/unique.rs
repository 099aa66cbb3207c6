use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;
use core::mem::{self, ManuallyDrop};
use core::ptr::{self, NonNull};

use crate::{DefaultDelete, Deleter, Handle, RawHandle};

// -----------------------------------------------------------------------------
// UniquePtr

/// An exclusively-owning pointer with a pluggable disposal policy.
///
/// A `UniquePtr<T, D>` bundles one handle of type [`D::Pointer`](Deleter::Pointer)
/// with one policy `D`. When the owner is dropped or its handle is replaced,
/// the policy disposes of the old handle, unless it is null.
///
/// # Ownership
///
/// - At most one owner holds a given non-null handle. The methods of this type
///   never produce two owners of one handle. Adopting raw handles is `unsafe`
///   because the caller could duplicate them.
/// - A transfer is a plain Rust move (`let b = a;`), or [`take`](Self::take)
///   when the source has to stay usable (and becomes null).
/// - Owners of related element types convert into each other through
///   [`from_unique`](Self::from_unique), gated at compile time.
///
/// # Element modes
///
/// A single-object owner (`UniquePtr<T>`) dereferences to `T`. An array owner
/// (`UniquePtr<[E]>`) is indexed instead. Neither offers the other's access.
///
/// # Examples
///
/// ```
/// use vc_uptr::UniquePtr;
///
/// let mut a = UniquePtr::from_box(Box::new(7));
/// assert_eq!(*a, 7);
///
/// let b = a.take();
/// assert!(a.is_null());
/// assert_eq!(*b, 7);
///
/// let xs: UniquePtr<[i32]> = UniquePtr::from_box(Box::from([1, 2, 3]));
/// assert_eq!(xs[2], 3);
/// ```
pub struct UniquePtr<T: ?Sized, D: Deleter<T> = DefaultDelete> {
    ptr: D::Pointer,
    deleter: D,
    _marker: PhantomData<T>,
}

impl<T: ?Sized, D: Deleter<T>> Drop for UniquePtr<T, D> {
    fn drop(&mut self) {
        if !self.ptr.is_null() {
            // SAFETY: the handle is owned by `self` and unreachable afterwards.
            unsafe { self.deleter.delete(self.ptr) };
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> UniquePtr<T, D> {
    /// Creates an owner that owns nothing, with a default policy.
    ///
    /// Reference policies (`&mut D`) have no default and must use
    /// [`null_with`](Self::null_with).
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    ///
    /// let p = UniquePtr::<String>::null();
    /// assert!(p.is_null());
    /// assert!(p.get().is_none());
    /// ```
    #[inline]
    pub fn null() -> Self
    where
        D: Default,
    {
        Self::null_with(D::default())
    }

    /// Creates an owner that owns nothing, with the given policy.
    #[inline]
    pub fn null_with(deleter: D) -> Self {
        Self {
            ptr: D::Pointer::null(),
            deleter,
            _marker: PhantomData,
        }
    }

    /// Takes ownership of `ptr`, with a default policy.
    ///
    /// # Safety
    ///
    /// - `ptr` is null, or `D::default()` can dispose of it.
    ///   For [`DefaultDelete`] this means `ptr` came from a [`Box<T>`].
    /// - Nothing else owns `ptr`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    /// use core::ptr::NonNull;
    ///
    /// let raw = NonNull::from(Box::leak(Box::new(3u8)));
    /// let p = unsafe { UniquePtr::<u8>::from_raw(Some(raw)) };
    /// assert_eq!(p.get(), Some(raw));
    /// ```
    #[inline]
    pub unsafe fn from_raw(ptr: D::Pointer) -> Self
    where
        D: Default,
    {
        // SAFETY: guaranteed by the caller.
        unsafe { Self::from_raw_with(ptr, D::default()) }
    }

    /// Takes ownership of `ptr`, to be disposed by `deleter`.
    ///
    /// To share a stateful policy, pass `&mut policy` and use `&mut D` as the
    /// policy type. To copy one, pass a clone.
    ///
    /// # Safety
    ///
    /// - `ptr` is null, or `deleter` can dispose of it.
    /// - Nothing else owns `ptr`.
    #[inline]
    pub unsafe fn from_raw_with(ptr: D::Pointer, deleter: D) -> Self {
        Self {
            ptr,
            deleter,
            _marker: PhantomData,
        }
    }

    /// Returns the handle, without giving up ownership.
    #[inline(always)]
    pub fn get(&self) -> D::Pointer {
        self.ptr
    }

    /// Returns the policy.
    #[inline(always)]
    pub fn get_deleter(&self) -> &D {
        &self.deleter
    }

    /// Returns the policy mutably.
    #[inline(always)]
    pub fn get_deleter_mut(&mut self) -> &mut D {
        &mut self.deleter
    }

    /// Returns `true` if the owner holds the null handle.
    ///
    /// This is the owner's only boolean conversion; `bool::from(&owner)` is
    /// `!owner.is_null()`.
    #[inline(always)]
    pub fn is_null(&self) -> bool {
        self.ptr.is_null()
    }

    /// Gives up ownership of the handle without disposing of it.
    ///
    /// The owner becomes null and the caller is responsible for the returned
    /// handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    ///
    /// let mut p = UniquePtr::from_box(Box::new(1));
    /// let before = p.get();
    ///
    /// let raw = p.release();
    /// assert_eq!(raw, before);
    /// assert!(p.is_null());
    ///
    /// // The handle came from a `Box`, so it goes back into one.
    /// drop(unsafe { Box::from_raw(raw.unwrap().as_ptr()) });
    /// ```
    #[inline]
    #[must_use = "losing the released handle leaks the object"]
    pub fn release(&mut self) -> D::Pointer {
        mem::replace(&mut self.ptr, D::Pointer::null())
    }

    /// Disposes of the current object, if any, and becomes null.
    #[inline]
    pub fn reset(&mut self) {
        // SAFETY: the null handle carries no ownership.
        unsafe { self.reset_to(D::Pointer::null()) }
    }

    /// Replaces the handle with `ptr`, then disposes of the old one.
    ///
    /// `ptr` is installed before the policy runs, so the policy never observes
    /// the owner holding a handle that is being disposed.
    ///
    /// The old handle is disposed even when it compares equal to `ptr`. Equal
    /// handles do not imply one object: every `Box` of a zero-sized type has
    /// the same address.
    ///
    /// # Safety
    ///
    /// The same as [`from_raw_with`](Self::from_raw_with) with this owner's
    /// policy. In particular `ptr` must not stand for the object this owner
    /// already holds, since that object is disposed.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    /// use core::ptr::NonNull;
    ///
    /// let mut p = UniquePtr::from_box(Box::new(String::from("old")));
    /// let next = NonNull::from(Box::leak(Box::new(String::from("new"))));
    ///
    /// unsafe { p.reset_to(Some(next)) };
    /// assert_eq!(p.get(), Some(next));
    /// assert_eq!(p.as_str(), "new");
    /// ```
    pub unsafe fn reset_to(&mut self, ptr: D::Pointer) {
        let old = mem::replace(&mut self.ptr, ptr);
        if !old.is_null() {
            // SAFETY: `old` was owned by `self` and is no longer reachable from it.
            unsafe { self.deleter.delete(old) };
        }
    }

    /// Exchanges handles and policies with `other`.
    ///
    /// Nothing is disposed. [`core::mem::swap`] does the same for any two
    /// owners of one type.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    ///
    /// let mut a = UniquePtr::from_box(Box::new(1));
    /// let mut b = UniquePtr::from_box(Box::new(2));
    ///
    /// a.swap(&mut b);
    /// assert_eq!((*a, *b), (2, 1));
    ///
    /// core::mem::swap(&mut a, &mut b);
    /// assert_eq!((*a, *b), (1, 2));
    /// ```
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.deleter, &mut other.deleter);
    }

    /// Transfers ownership into a new owner, leaving `self` null.
    ///
    /// The policy moves along with the handle, and `self` keeps a default one.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    ///
    /// let mut a = UniquePtr::from_box(Box::new(1));
    /// let handle = a.get();
    ///
    /// let b = a.take();
    /// assert!(a.is_null());
    /// assert_eq!(b.get(), handle);
    /// ```
    #[inline]
    pub fn take(&mut self) -> Self
    where
        D: Default,
    {
        let ptr = self.release();
        let deleter = mem::take(&mut self.deleter);
        Self {
            ptr,
            deleter,
            _marker: PhantomData,
        }
    }

    /// Transfers ownership from `other` into `self`.
    ///
    /// The object `self` owned is disposed by the old policy, then `self`
    /// adopts both the handle and the policy of `other`.
    ///
    /// Assigning an owner to itself does not compile: `other` is moved while
    /// `self` is borrowed.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    ///
    /// let mut a = UniquePtr::from_box(Box::new(1));
    /// let b = UniquePtr::from_box(Box::new(2));
    ///
    /// a.assign(b);
    /// assert_eq!(*a, 2);
    /// ```
    #[inline]
    pub fn assign(&mut self, other: Self) {
        let (ptr, deleter) = other.into_raw_parts();
        // SAFETY: `ptr` came from an owner with the same policy type.
        unsafe { self.reset_to(ptr) };
        self.deleter = deleter;
    }

    /// Decomposes the owner into its handle and policy without disposing of
    /// anything.
    #[inline]
    #[must_use = "losing the handle leaks the object"]
    pub fn into_raw_parts(self) -> (D::Pointer, D) {
        let this = ManuallyDrop::new(self);
        // SAFETY: `this` is never dropped, so the policy is moved out exactly once.
        let deleter = unsafe { ptr::read(&this.deleter) };
        (this.ptr, deleter)
    }
}

// -----------------------------------------------------------------------------
// Box interop

impl<T: ?Sized> UniquePtr<T, DefaultDelete> {
    /// Adopts the object held by `value`.
    ///
    /// This allocates nothing, the box's allocation is reused.
    #[inline]
    pub fn from_box(value: Box<T>) -> Self {
        Self {
            ptr: Some(NonNull::from(Box::leak(value))),
            deleter: DefaultDelete,
            _marker: PhantomData,
        }
    }

    /// Hands the object back as a [`Box`], or `None` if the owner is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    ///
    /// let p = UniquePtr::from_box(Box::new([1, 2]));
    /// assert_eq!(p.into_box().as_deref(), Some(&[1, 2]));
    ///
    /// assert!(UniquePtr::<u8>::null().into_box().is_none());
    /// ```
    #[inline]
    pub fn into_box(self) -> Option<Box<T>> {
        let (ptr, _) = self.into_raw_parts();
        // SAFETY: owners using `DefaultDelete` only hold pointers from `Box`.
        ptr.map(|ptr| unsafe { Box::from_raw(ptr.as_ptr()) })
    }

    /// Gives up ownership and returns a reference that lives as long as
    /// needed. The object is never disposed.
    #[inline]
    pub fn leak<'a>(self) -> Option<&'a mut T>
    where
        T: 'a,
    {
        let leaked = self.into_box().map(Box::leak);
        if let Some(value) = &leaked {
            log::debug!("UniquePtr::leak gave up {:p} without disposal", &raw const **value);
        }
        leaked
    }
}

impl<T: ?Sized> From<Box<T>> for UniquePtr<T, DefaultDelete> {
    #[inline]
    fn from(value: Box<T>) -> Self {
        Self::from_box(value)
    }
}

// -----------------------------------------------------------------------------
// Traits

impl<T: ?Sized, D: Deleter<T> + Default> Default for UniquePtr<T, D> {
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

impl<T: ?Sized, D: Deleter<T>> From<&UniquePtr<T, D>> for bool {
    #[inline(always)]
    fn from(value: &UniquePtr<T, D>) -> Self {
        !value.is_null()
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Debug for UniquePtr<T, D>
where
    D::Pointer: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UniquePtr").field(&self.ptr).finish()
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Pointer for UniquePtr<T, D>
where
    D::Pointer: RawHandle,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ptr.as_non_null() {
            Some(ptr) => fmt::Pointer::fmt(&ptr, f),
            None => fmt::Pointer::fmt(&ptr::null::<u8>(), f),
        }
    }
}

// SAFETY: the owner is the only holder of its handle, and `RawHandle`
// guarantees the handle has no thread affinity of its own, as with `Box<T>`.
unsafe impl<T, D> Send for UniquePtr<T, D>
where
    T: ?Sized + Send,
    D: Deleter<T> + Send,
    D::Pointer: RawHandle,
{
}

// SAFETY: shared access only reaches `&T` and `&D`.
unsafe impl<T, D> Sync for UniquePtr<T, D>
where
    T: ?Sized + Sync,
    D: Deleter<T> + Sync,
    D::Pointer: RawHandle,
{
}
