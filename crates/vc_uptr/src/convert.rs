use crate::{Deleter, Element, PointerFrom, UniquePtr};

// -----------------------------------------------------------------------------
// Conversions between owners

/// Owners convert into each other when all of the following hold:
///
/// 1. Both element types have the same [`ElementMode`](crate::ElementMode).
/// 2. The source handle converts to the destination handle, see [`PointerFrom`].
/// 3. The source policy converts to the destination policy through [`From`].
///
/// [`DefaultDelete`](crate::DefaultDelete) serves every element type, so with
/// default policies only the first two rules matter.
impl<T, D> UniquePtr<T, D>
where
    T: ?Sized + Element,
    D: Deleter<T>,
{
    /// Takes over the object and the policy of `other`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vc_uptr::{UniquePtr, upcast};
    /// use core::fmt::{self, Display};
    ///
    /// struct Meters(u32);
    ///
    /// impl Display for Meters {
    ///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    ///         write!(f, "{} m", self.0)
    ///     }
    /// }
    ///
    /// upcast!(Meters => dyn Display);
    ///
    /// let n = UniquePtr::from_box(Box::new(Meters(12)));
    /// let shown = UniquePtr::<dyn Display>::from_unique(n);
    /// assert_eq!(shown.to_string(), "12 m");
    /// ```
    #[inline]
    pub fn from_unique<U, E>(other: UniquePtr<U, E>) -> Self
    where
        U: ?Sized + Element<Mode = T::Mode>,
        E: Deleter<U>,
        D::Pointer: PointerFrom<E::Pointer>,
        D: From<E>,
    {
        let (ptr, deleter) = other.into_raw_parts();
        let ptr = <D::Pointer as PointerFrom<E::Pointer>>::pointer_from(ptr);
        // SAFETY: `ptr` stands for the object `other` owned, and the converted
        // policy disposes of it the way the source policy would.
        unsafe { Self::from_raw_with(ptr, D::from(deleter)) }
    }

    /// Converts `self` into an owner of a related element type.
    ///
    /// The same as [`UniquePtr::from_unique`], read from the source side.
    #[inline]
    pub fn convert<U, E>(self) -> UniquePtr<U, E>
    where
        U: ?Sized + Element<Mode = T::Mode>,
        E: Deleter<U> + From<D>,
        E::Pointer: PointerFrom<D::Pointer>,
    {
        let (ptr, deleter) = self.into_raw_parts();
        let ptr = <E::Pointer as PointerFrom<D::Pointer>>::pointer_from(ptr);
        // SAFETY: see `from_unique`.
        unsafe { UniquePtr::from_raw_with(ptr, E::from(deleter)) }
    }

    /// Transfers the object and the policy of `other` into `self`.
    ///
    /// The object `self` owned is disposed by its own policy first.
    #[inline]
    pub fn assign_unique<U, E>(&mut self, other: UniquePtr<U, E>)
    where
        U: ?Sized + Element<Mode = T::Mode>,
        E: Deleter<U>,
        D::Pointer: PointerFrom<E::Pointer>,
        D: From<E>,
    {
        self.assign(Self::from_unique(other));
    }
}
