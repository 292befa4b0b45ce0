//! Code for handling string labels which identify customers and event kinds
use std::fmt::Display;
use std::hash::Hash;

/// A trait alias for ID types
pub trait IDLike: Eq + Ord + Hash + std::borrow::Borrow<str> + Clone + Display + From<String> {}
impl<T> IDLike for T where T: Eq + Ord + Hash + std::borrow::Borrow<str> + Clone + Display + From<String> {}

macro_rules! define_id_type {
    ($name:ident) => {
        #[derive(
            Clone,
            std::hash::Hash,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            serde::Deserialize,
            Debug,
            serde::Serialize,
        )]
        /// An ID type (e.g. `CustomerID`, `EventKind`, etc.)
        pub struct $name(pub std::rc::Rc<str>);

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                $name(std::rc::Rc::from(s))
            }
        }

        impl $name {
            /// Create a new ID from a string slice
            pub fn new(id: &str) -> Self {
                $name(std::rc::Rc::from(id))
            }

            /// The ID as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }
    };
}
pub(crate) use define_id_type;

#[cfg(test)]
define_id_type!(GenericID);

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Borrow;

    fn check_id_like<ID: IDLike>(id: &ID, expected: &str) {
        let s: &str = id.borrow();
        assert_eq!(s, expected);
        assert_eq!(id.to_string(), expected);
    }

    #[test]
    fn test_id_conversions() {
        let id = GenericID::new("customer0");
        check_id_like(&id, "customer0");
        assert_eq!(id, GenericID::from("customer0"));
        assert_eq!(id, GenericID::from("customer0".to_string()));
        assert_eq!(id.as_str(), "customer0");
    }

    #[test]
    fn test_id_ordering_is_lexicographic() {
        let mut ids: Vec<GenericID> = ["sold", "arrival", "leave", "Sold"]
            .into_iter()
            .map(GenericID::from)
            .collect();
        ids.sort();
        let ids: Vec<&str> = ids.iter().map(GenericID::as_str).collect();
        assert_eq!(ids, ["Sold", "arrival", "leave", "sold"]);
    }
}
