use serde_core::{Serialize, Serializer};

use crate::{Deleter, RawHandle, UniquePtr};

/// Serializes like `Option<&T>`: `none` for a null owner, otherwise `some`
/// holding the object, or the elements of an array owner.
impl<T, D> Serialize for UniquePtr<T, D>
where
    T: ?Sized + Serialize,
    D: Deleter<T>,
    D::Pointer: RawHandle<Target = T>,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.get().as_non_null() {
            // SAFETY: a non-null handle points to the object owned by `self`.
            Some(ptr) => serializer.serialize_some(unsafe { ptr.as_ref() }),
            None => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::UniquePtr;
    use alloc::boxed::Box;
    use alloc::string::String;

    #[test]
    fn serialize_owners() {
        let n = UniquePtr::from_box(Box::new(7u32));
        assert_eq!(serde_json::to_string(&n).unwrap(), "7");

        let s: UniquePtr<str> = UniquePtr::from_box(Box::from("hi"));
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"hi\"");

        let xs: UniquePtr<[String]> = UniquePtr::from_box(Box::from([String::from("a"), String::from("b")]));
        assert_eq!(serde_json::to_string(&xs).unwrap(), "[\"a\",\"b\"]");

        let empty = UniquePtr::<u32>::null();
        assert_eq!(serde_json::to_string(&empty).unwrap(), "null");
    }
}
