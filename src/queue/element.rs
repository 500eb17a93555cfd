use std::fmt::{self, Debug, Display, Formatter};

use crate::error::QueueError;

/// The payload of a [`Queue`](crate::Queue) node: one owned string.
///
/// Elements are ordered by the byte-wise order of their values.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Element {
    value: String,
}

impl Element {
    /// Copies `value` into a freshly reserved string, returning
    /// [`QueueError::AllocFailed`] if the storage cannot be reserved.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Element;
    ///
    /// let element = Element::try_new("dolphin").unwrap();
    /// assert_eq!(element.value(), "dolphin");
    /// ```
    pub fn try_new(value: &str) -> Result<Self, QueueError> {
        let mut owned = String::new();
        owned.try_reserve_exact(value.len()).map_err(|err| {
            tracing::debug!(len = value.len(), %err, "element storage allocation failed");
            QueueError::AllocFailed
        })?;
        owned.push_str(value);
        Ok(Self { value: owned })
    }

    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    pub fn into_value(self) -> String {
        self.value
    }

    /// Copies as much of the value as fits into `buf`, keeping one byte for
    /// the terminating NUL, and returns the number of value bytes copied.
    ///
    /// The copy may end in the middle of a multi-byte character. Nothing is
    /// written into an empty buffer.
    ///
    /// # Examples
    ///
    /// ```
    /// use cyclic_queue::Element;
    ///
    /// let element = Element::try_new("bear").unwrap();
    /// let mut buf = [0xff; 4];
    /// assert_eq!(element.copy_to(&mut buf), 3);
    /// assert_eq!(&buf, b"bea\0");
    /// ```
    pub fn copy_to(&self, buf: &mut [u8]) -> usize {
        let Some(room) = buf.len().checked_sub(1) else {
            return 0;
        };
        let bytes = self.value.as_bytes();
        let n = bytes.len().min(room);
        buf[..n].copy_from_slice(&bytes[..n]);
        buf[n] = 0;
        n
    }
}

impl From<String> for Element {
    fn from(value: String) -> Self {
        Self { value }
    }
}

impl From<Element> for String {
    fn from(element: Element) -> Self {
        element.into_value()
    }
}

impl AsRef<str> for Element {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

impl PartialEq<str> for Element {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Element {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.value, f)
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::Element;

    #[test]
    fn element_copy_to() {
        let element = Element::try_new("gerbil").unwrap();

        let mut buf = [0xffu8; 16];
        assert_eq!(element.copy_to(&mut buf), 6);
        assert_eq!(&buf[..7], b"gerbil\0");
        assert_eq!(buf[7], 0xff);

        let mut buf = [0xffu8; 7];
        assert_eq!(element.copy_to(&mut buf), 6);
        assert_eq!(&buf, b"gerbil\0");

        let mut buf = [0xffu8; 1];
        assert_eq!(element.copy_to(&mut buf), 0);
        assert_eq!(buf, [0]);

        let mut buf = [0u8; 0];
        assert_eq!(element.copy_to(&mut buf), 0);
    }

    #[test]
    fn element_order() {
        let a = Element::try_new("a").unwrap();
        let b = Element::try_new("b").unwrap();
        let upper = Element::try_new("B").unwrap();
        let longer = Element::try_new("ab").unwrap();
        assert!(a < b);
        assert!(upper < a);
        assert!(a < longer);
        assert_eq!(a, "a");
        assert_eq!(Element::try_new("").unwrap(), Element::default());
        assert_eq!(String::from(b), "b");
    }
}
