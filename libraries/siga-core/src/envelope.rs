//! Response envelope shared by local and remote repositories

use serde::{Deserialize, Serialize};

/// `{ "data": ... }` wrapper every repository call resolves to
///
/// Containers only ever unwrap this shape, so a local store and a REST
/// backend can be swapped behind the same `Repository` trait.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }

    pub fn into_inner(self) -> T {
        self.data
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope { data: f(self.data) }
    }
}

impl<T> From<T> for Envelope<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_under_data_key() {
        let value = serde_json::to_value(Envelope::new(vec![1, 2])).unwrap();
        assert_eq!(value, serde_json::json!({ "data": [1, 2] }));
    }

    #[test]
    fn map_keeps_the_wrapper() {
        let len = Envelope::new("abc").map(str::len);
        assert_eq!(len.into_inner(), 3);
    }
}
