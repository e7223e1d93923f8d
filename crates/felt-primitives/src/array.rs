//! Append-only growable array

/// Ordered, singly-owned sequence that only grows at the back.
///
/// Reads are bounds-checked and return `None` out of range; escalating that
/// into a panic is left to the caller.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Array<T> {
    data: Vec<T>,
}

impl<T> Array<T> {
    /// Create a new empty array
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Push a value at the back
    pub fn append(&mut self, value: T) {
        self.data.push(value);
    }

    /// Value at `index`, or `None` when `index >= len`
    pub fn at(&self, index: usize) -> Option<&T> {
        self.data.get(index)
    }

    /// Number of appended elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate in append order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// View as slice
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl<T> Default for Array<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<T> FromIterator<T> for Array<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            data: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Array<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.append(value);
        }
    }
}

impl<'a, T> IntoIterator for &'a Array<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let arr: Array<u32> = Array::new();
        assert!(arr.is_empty());
        assert_eq!(arr.len(), 0);
        assert_eq!(arr.at(0), None);
    }

    #[test]
    fn test_append_and_at() {
        let mut arr = Array::new();
        arr.append(10);
        arr.append(11);
        arr.append(12);
        assert_eq!(arr.len(), 3);
        assert_eq!(arr.at(0), Some(&10));
        assert_eq!(arr.at(1), Some(&11));
        assert_eq!(arr.at(2), Some(&12));
        assert_eq!(arr.at(3), None);
        assert_eq!(arr.at(11), None);
    }

    #[test]
    fn test_at_does_not_mutate() {
        let arr: Array<u8> = [1, 2].into_iter().collect();
        let before = arr.clone();
        let _ = arr.at(5);
        assert_eq!(arr, before);
    }

    #[test]
    fn test_extend_keeps_order() {
        let mut arr: Array<u8> = Array::default();
        arr.append(1);
        arr.extend([2, 3]);
        assert_eq!(arr.as_slice(), &[1, 2, 3]);
        let collected: Vec<u8> = arr.iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }

    #[test]
    fn test_owned_values() {
        let mut arr = Array::new();
        arr.append(String::from("a"));
        arr.append(String::from("b"));
        assert_eq!(arr.at(1).map(String::as_str), Some("b"));
        assert_eq!(format!("{:?}", arr), r#"["a", "b"]"#);
    }
}
