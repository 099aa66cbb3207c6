use core::any::Any;
use core::error::Error;
use core::fmt;
use core::ptr::NonNull;

// -----------------------------------------------------------------------------
// Element modes

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::Single {}
    impl Sealed for super::Array {}
}

/// The two ways an owner can view what it points at.
///
/// This trait is sealed, [`Single`] and [`Array`] are the only modes.
pub trait ElementMode: sealed::Sealed {
    /// `true` for [`Array`].
    const IS_ARRAY: bool;
}

/// Single-object mode: the owner dereferences to the element and cannot be
/// indexed.
pub enum Single {}

/// Array mode: the owner can be indexed and cannot be dereferenced.
pub enum Array {}

impl ElementMode for Single {
    const IS_ARRAY: bool = false;
}

impl ElementMode for Array {
    const IS_ARRAY: bool = true;
}

// -----------------------------------------------------------------------------
// Element

/// Classifies an element type as [`Single`] or [`Array`].
///
/// Every sized type is a single object, `[E]` is an array of `E`, and `str` is
/// a single object. The trait objects of `Any`, `Debug`, `Display` and `Error`
/// are single objects too. Other unsized types (usually `dyn Trait` of a local
/// trait) opt in through [`single_object!`](crate::single_object).
///
/// Conversions between owners never cross modes.
pub trait Element {
    /// The mode of this element type.
    type Mode: ElementMode;
}

impl<T> Element for T {
    type Mode = Single;
}

impl<E> Element for [E] {
    type Mode = Array;
}

impl Element for str {
    type Mode = Single;
}

/// Declares unsized types, usually trait objects, as single objects.
///
/// # Examples
///
/// ```
/// use vc_uptr::{Element, ElementMode, single_object};
///
/// trait Shape {}
/// single_object!(dyn Shape, dyn Shape + Send);
///
/// assert!(!<<dyn Shape as Element>::Mode as ElementMode>::IS_ARRAY);
/// ```
#[macro_export]
macro_rules! single_object {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::Element for $ty {
                type Mode = $crate::Single;
            }
        )+
    };
}

single_object!(
    dyn Any,
    dyn Any + Send,
    dyn Any + Send + Sync,
    dyn fmt::Debug,
    dyn fmt::Debug + Send + Sync,
    dyn fmt::Display,
    dyn fmt::Display + Send + Sync,
    dyn Error,
    dyn Error + Send + Sync,
);

// -----------------------------------------------------------------------------
// Upcast

/// Element compatibility: a pointer to `Self` may be viewed as a pointer to `T`.
///
/// Every type upcasts to itself. Other single-object upcasts are declared by
/// the user, normally through [`upcast!`](crate::upcast) for unsizing
/// coercions such as `Circle => dyn Shape`.
///
/// Arrays only ever upcast to themselves. `[Derived]` cannot be declared to
/// upcast to `[Base]`: neither slice type is local to the declaring crate, so
/// the orphan rule rejects the impl.
///
/// # Safety
///
/// - [`upcast`](Self::upcast) returns a pointer to the same object.
/// - A deleter that disposes both `Self` and `T` must dispose the object
///   identically through either view. For
///   [`DefaultDelete`](crate::DefaultDelete) this means `T` must describe the
///   real layout, as unsizing coercions do. Layout-prefix casts (a
///   `#[repr(C)]` base at offset zero) are only sound with a deleter that does
///   not depend on the static type.
pub unsafe trait Upcast<T: ?Sized> {
    /// Views `ptr` as a pointer to `T`.
    fn upcast(ptr: NonNull<Self>) -> NonNull<T>;
}

// SAFETY: identity.
unsafe impl<T: ?Sized> Upcast<T> for T {
    #[inline(always)]
    fn upcast(ptr: NonNull<T>) -> NonNull<T> {
        ptr
    }
}

/// Declares unsizing upcasts, e.g. from a concrete type to a trait object.
///
/// The expansion relies on the unsizing coercion `NonNull<From> -> NonNull<To>`,
/// so only conversions the compiler can coerce are accepted.
///
/// # Examples
///
/// ```
/// use vc_uptr::{UniquePtr, single_object, upcast};
///
/// trait Shape {
///     fn area(&self) -> f64;
/// }
///
/// struct Square(f64);
///
/// impl Shape for Square {
///     fn area(&self) -> f64 {
///         self.0 * self.0
///     }
/// }
///
/// single_object!(dyn Shape);
/// upcast!(Square => dyn Shape);
///
/// let square: UniquePtr<Square> = Box::new(Square(3.0)).into();
/// let shape: UniquePtr<dyn Shape> = square.convert();
/// assert_eq!(shape.area(), 9.0);
/// ```
#[macro_export]
macro_rules! upcast {
    ($($from:ty => $to:ty),+ $(,)?) => {
        $(
            // SAFETY: an unsizing coercion keeps the address and attaches the
            // metadata of the concrete type.
            unsafe impl $crate::Upcast<$to> for $from {
                #[inline(always)]
                fn upcast(ptr: ::core::ptr::NonNull<Self>) -> ::core::ptr::NonNull<$to> {
                    ptr
                }
            }
        )+
    };
}

#[cfg(test)]
mod tests {
    use super::{Array, Element, ElementMode, Single, Upcast};
    use core::fmt::Debug;
    use core::ptr::NonNull;

    fn is_array<T: ?Sized + Element>() -> bool {
        <T::Mode as ElementMode>::IS_ARRAY
    }

    trait Named {
        fn name(&self) -> &'static str;
    }

    struct Cat;

    impl Named for Cat {
        fn name(&self) -> &'static str {
            "cat"
        }
    }

    crate::single_object!(dyn Named);
    crate::upcast!(Cat => dyn Named, u8 => dyn Debug);

    #[test]
    fn modes() {
        assert!(!is_array::<u32>());
        assert!(!is_array::<[u32; 4]>());
        assert!(!is_array::<str>());
        assert!(!is_array::<dyn Named>());
        assert!(is_array::<[u32]>());

        assert!(!Single::IS_ARRAY);
        assert!(Array::IS_ARRAY);
    }

    #[test]
    fn upcast_keeps_address() {
        let mut cat = Cat;
        let ptr = NonNull::from(&mut cat);
        let named: NonNull<dyn Named> = <Cat as Upcast<dyn Named>>::upcast(ptr);

        assert_eq!(named.cast::<Cat>(), ptr);
        assert_eq!(unsafe { named.as_ref() }.name(), "cat");

        let mut byte = 7u8;
        let debug = <u8 as Upcast<dyn Debug>>::upcast(NonNull::from(&mut byte));
        assert_eq!(debug.cast::<u8>().as_ptr(), &raw mut byte);
    }

    #[test]
    fn upcast_is_reflexive() {
        let mut xs = [1, 2, 3];
        let slice: NonNull<[i32]> = NonNull::from(&mut xs[..]);
        assert_eq!(<[i32] as Upcast<[i32]>>::upcast(slice), slice);
    }
}
