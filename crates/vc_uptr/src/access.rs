use core::ops::{Deref, DerefMut, Index, IndexMut};

use crate::{AccessError, Deleter, Element, RawHandle, Single, UniquePtr};

#[cold]
#[track_caller]
fn null_access(action: &str) -> ! {
    panic!("{action} a null UniquePtr")
}

// -----------------------------------------------------------------------------
// Single object

impl<T, D> UniquePtr<T, D>
where
    T: ?Sized + Element<Mode = Single>,
    D: Deleter<T>,
    D::Pointer: RawHandle<Target = T>,
{
    /// Returns a reference to the owned object, or `None` if the owner is null.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::UniquePtr;
    ///
    /// assert_eq!(UniquePtr::from_box(Box::new(4)).as_ref(), Some(&4));
    /// assert_eq!(UniquePtr::<i32>::null().as_ref(), None);
    /// ```
    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        // SAFETY: a non-null handle points to the object owned by `self`.
        self.get().as_non_null().map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Returns a mutable reference to the owned object, or `None` if the owner
    /// is null.
    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        // SAFETY: a non-null handle points to the object owned by `self`, and
        // `&mut self` makes the access exclusive.
        self.get().as_non_null().map(|mut ptr| unsafe { ptr.as_mut() })
    }
}

/// Dereferencing a null owner panics.
impl<T, D> Deref for UniquePtr<T, D>
where
    T: ?Sized + Element<Mode = Single>,
    D: Deleter<T>,
    D::Pointer: RawHandle<Target = T>,
{
    type Target = T;

    #[inline]
    #[track_caller]
    fn deref(&self) -> &T {
        match self.as_ref() {
            Some(value) => value,
            None => null_access("dereferenced"),
        }
    }
}

impl<T, D> DerefMut for UniquePtr<T, D>
where
    T: ?Sized + Element<Mode = Single>,
    D: Deleter<T>,
    D::Pointer: RawHandle<Target = T>,
{
    #[inline]
    #[track_caller]
    fn deref_mut(&mut self) -> &mut T {
        match self.as_mut() {
            Some(value) => value,
            None => null_access("dereferenced"),
        }
    }
}

// -----------------------------------------------------------------------------
// Array

impl<E, D> UniquePtr<[E], D>
where
    D: Deleter<[E]>,
    D::Pointer: RawHandle<Target = [E]>,
{
    /// Returns the owned elements, or `None` if the owner is null.
    #[inline]
    pub fn as_slice(&self) -> Option<&[E]> {
        // SAFETY: a non-null handle points to the elements owned by `self`.
        self.get().as_non_null().map(|ptr| unsafe { ptr.as_ref() })
    }

    /// Returns the owned elements mutably, or `None` if the owner is null.
    #[inline]
    pub fn as_mut_slice(&mut self) -> Option<&mut [E]> {
        // SAFETY: see `as_mut`.
        self.get().as_non_null().map(|mut ptr| unsafe { ptr.as_mut() })
    }

    /// Number of owned elements, `0` for a null owner.
    #[inline]
    pub fn len(&self) -> usize {
        self.get().as_non_null().map_or(0, |ptr| ptr.len())
    }

    /// Checked indexing.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::{AccessError, UniquePtr};
    ///
    /// let xs: UniquePtr<[u8]> = UniquePtr::from_box(Box::from([1, 2]));
    /// assert_eq!(xs.try_index(1), Ok(&2));
    /// assert_eq!(xs.try_index(2), Err(AccessError::OutOfBounds { index: 2, len: 2 }));
    ///
    /// let empty = UniquePtr::<[u8]>::null();
    /// assert_eq!(empty.try_index(0), Err(AccessError::Null));
    /// ```
    pub fn try_index(&self, index: usize) -> Result<&E, AccessError> {
        let slice = self.as_slice().ok_or(AccessError::Null)?;
        let len = slice.len();
        slice.get(index).ok_or(AccessError::OutOfBounds { index, len })
    }

    /// Checked mutable indexing.
    pub fn try_index_mut(&mut self, index: usize) -> Result<&mut E, AccessError> {
        let slice = self.as_mut_slice().ok_or(AccessError::Null)?;
        let len = slice.len();
        slice.get_mut(index).ok_or(AccessError::OutOfBounds { index, len })
    }

    /// Indexes the elements without checking the bounds.
    ///
    /// # Safety
    ///
    /// - The owner is not null.
    /// - `index` is in-bounds.
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_unchecked(&self, index: usize) -> &E {
        // debug_assert! Use if branch to determine whether to execute.
        // Therefore, #[cfg] is needed.
        #[cfg(debug_assertions)]
        assert!(!self.is_null(), "indexed a null UniquePtr");

        // SAFETY: the caller guarantees a non-null owner and an in-bounds `index`.
        unsafe {
            let ptr = self.get().as_non_null().unwrap_unchecked();
            &*ptr.as_ptr().cast::<E>().add(index)
        }
    }

    /// Mutably indexes the elements without checking the bounds.
    ///
    /// # Safety
    ///
    /// See [`get_unchecked`](Self::get_unchecked).
    #[cfg_attr(debug_assertions, track_caller)]
    #[cfg_attr(not(debug_assertions), inline(always))]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut E {
        #[cfg(debug_assertions)]
        assert!(!self.is_null(), "indexed a null UniquePtr");

        // SAFETY: the caller guarantees a non-null owner and an in-bounds `index`.
        unsafe {
            let ptr = self.get().as_non_null().unwrap_unchecked();
            &mut *ptr.as_ptr().cast::<E>().add(index)
        }
    }
}

/// Indexing a null owner panics, as does an out-of-bounds index.
impl<E, D> Index<usize> for UniquePtr<[E], D>
where
    D: Deleter<[E]>,
    D::Pointer: RawHandle<Target = [E]>,
{
    type Output = E;

    #[inline]
    #[track_caller]
    fn index(&self, index: usize) -> &E {
        match self.as_slice() {
            Some(slice) => &slice[index],
            None => null_access("indexed"),
        }
    }
}

impl<E, D> IndexMut<usize> for UniquePtr<[E], D>
where
    D: Deleter<[E]>,
    D::Pointer: RawHandle<Target = [E]>,
{
    #[inline]
    #[track_caller]
    fn index_mut(&mut self, index: usize) -> &mut E {
        match self.as_mut_slice() {
            Some(slice) => &mut slice[index],
            None => null_access("indexed"),
        }
    }
}
