//! An exclusively-owning smart pointer with a pluggable disposal policy.
//!
//! **UniquePtr**
//!
//! [`UniquePtr<T, D>`] owns one object (or one array) through a handle and
//! disposes of it with its policy `D` when dropped or reset. Ownership moves
//! with the value, and [`take`](UniquePtr::take) moves it out of a place that
//! has to stay usable.
//!
//! **Deleter**
//!
//! A [`Deleter`] nominates the [`Handle`] type an owner stores and disposes of
//! non-null handles. [`DefaultDelete`] frees [`Box`](alloc::boxed::Box)
//! allocations, function pointers and [`FnDelete`] wrap plain functions and
//! closures, and `&mut D` shares a stateful policy.
//!
//! **Element modes**
//!
//! `UniquePtr<T>` is a single-object owner that dereferences to `T`, and
//! `UniquePtr<[E]>` is an array owner that is indexed. See [`Element`].
//!
//! **Conversions**
//!
//! [`UniquePtr::from_unique`] re-types an owner when the element modes match,
//! the handle converts ([`PointerFrom`], built on [`Upcast`]) and the policy
//! converts through [`From`]. Everything else is rejected at compile time.
//!
//! Upcasting an array is rejected, even with layout-compatible elements:
//!
//! ```compile_fail
//! use vc_uptr::UniquePtr;
//!
//! #[repr(C)]
//! struct Base(u32);
//!
//! #[repr(C)]
//! struct Derived(Base, u32);
//!
//! let xs: UniquePtr<[Derived]> = UniquePtr::from_box(Box::from([Derived(Base(1), 2)]));
//! let ys: UniquePtr<[Base]> = xs.convert();
//! ```
//!
//! and the orphan rule keeps such an upcast from being declared:
//!
//! ```compile_fail
//! use vc_uptr::Upcast;
//! use core::ptr::NonNull;
//!
//! #[repr(C)]
//! struct Base(u32);
//!
//! #[repr(C)]
//! struct Derived(Base, u32);
//!
//! unsafe impl Upcast<[Base]> for [Derived] {
//!     fn upcast(ptr: NonNull<[Derived]>) -> NonNull<[Base]> {
//!         NonNull::slice_from_raw_parts(ptr.cast(), ptr.len())
//!     }
//! }
//! ```
//!
//! Conversions never cross modes:
//!
//! ```compile_fail
//! use vc_uptr::UniquePtr;
//!
//! let xs = UniquePtr::from_box(Box::new([1u8, 2, 3]));
//! let ys: UniquePtr<[u8]> = UniquePtr::from_unique(xs);
//! ```
//!
//! Policies convert only through [`From`]. Two unrelated stateful policies do
//! not:
//!
//! ```compile_fail
//! use vc_uptr::{Deleter, UniquePtr};
//!
//! struct Pool(u32);
//! struct Arena(u32);
//!
//! impl Deleter<u8> for Pool {
//!     type Pointer = *mut u8;
//!     unsafe fn delete(&mut self, _ptr: *mut u8) {}
//! }
//!
//! impl Deleter<u8> for Arena {
//!     type Pointer = *mut u8;
//!     unsafe fn delete(&mut self, _ptr: *mut u8) {}
//! }
//!
//! let mut byte = 0u8;
//! let p = unsafe { UniquePtr::<u8, Pool>::from_raw_with(&raw mut byte, Pool(1)) };
//! let q: UniquePtr<u8, Arena> = p.convert();
//! ```
//!
//! and a reference policy is only built from the same reference type:
//!
//! ```compile_fail
//! use vc_uptr::{Deleter, UniquePtr};
//!
//! struct Pool(u32);
//! struct Arena(u32);
//!
//! impl Deleter<u8> for Pool {
//!     type Pointer = *mut u8;
//!     unsafe fn delete(&mut self, _ptr: *mut u8) {}
//! }
//!
//! impl Deleter<u8> for Arena {
//!     type Pointer = *mut u8;
//!     unsafe fn delete(&mut self, _ptr: *mut u8) {}
//! }
//!
//! let mut byte = 0u8;
//! let mut arena = Arena(0);
//! let p = unsafe { UniquePtr::<u8, &mut Arena>::from_raw_with(&raw mut byte, &mut arena) };
//! let q: UniquePtr<u8, &mut Pool> = UniquePtr::from_unique(p);
//! ```
//!
//! ```compile_fail
//! use vc_uptr::{Deleter, UniquePtr};
//!
//! struct Pool(u32);
//!
//! impl Deleter<u8> for Pool {
//!     type Pointer = *mut u8;
//!     unsafe fn delete(&mut self, _ptr: *mut u8) {}
//! }
//!
//! let mut byte = 0u8;
//! let p = unsafe { UniquePtr::<u8, Pool>::from_raw_with(&raw mut byte, Pool(1)) };
//! let q: UniquePtr<u8, &mut Pool> = p.convert();
//! ```
//!
//! An array owner cannot be dereferenced, and a single-object owner cannot be
//! indexed:
//!
//! ```compile_fail
//! use vc_uptr::UniquePtr;
//!
//! let xs: UniquePtr<[u8]> = UniquePtr::from_box(Box::from([1, 2]));
//! let first = *xs;
//! ```
//!
//! ```compile_fail
//! use vc_uptr::UniquePtr;
//!
//! let p = UniquePtr::from_box(Box::new(5u32));
//! let first = p[0];
//! ```
//!
//! An owner cannot be assigned from itself:
//!
//! ```compile_fail
//! use vc_uptr::UniquePtr;
//!
//! let mut p = UniquePtr::from_box(Box::new(5u32));
//! p.assign(p);
//! ```
#![expect(unsafe_code, reason = "Owning raw handles is inherently unsafe.")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod access;
mod cmp;
mod convert;
mod deleter;
mod element;
mod error;
mod handle;
mod unique;

#[cfg(feature = "serde")]
mod serde;

// -----------------------------------------------------------------------------
// Top-level exports

pub use cmp::Null;
pub use deleter::{DefaultDelete, Deleter, FnDelete};
pub use element::{Array, Element, ElementMode, Single, Upcast};
pub use error::AccessError;
pub use handle::{Handle, PointerFrom, RawHandle};
pub use unique::UniquePtr;
