//! Attribute construction macro
//!
//! Builds the attribute list a log call takes without spelling out
//! `Attr::new` per pair.
//!
//! # Examples
//!
//! ```
//! use rust_log_facade::attrs;
//!
//! let empty = attrs![];
//! assert!(empty.is_empty());
//!
//! let pairs = attrs! {
//!     "port" => 8080,
//!     "tls" => true,
//!     "peer" => "10.0.0.1",
//! };
//! assert_eq!(pairs.len(), 3);
//! ```

/// Build a `Vec<Attr>` from `key => value` pairs. Values go through the
/// `From` conversions on [`Value`](crate::core::Value).
#[macro_export]
macro_rules! attrs {
    () => {
        ::std::vec::Vec::<$crate::core::Attr>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        vec![$($crate::core::Attr::new($key, $value)),+]
    };
}

#[cfg(test)]
mod tests {
    use crate::core::Value;

    #[test]
    fn test_attrs_macro_empty() {
        let attrs = attrs![];
        assert!(attrs.is_empty());
    }

    #[test]
    fn test_attrs_macro_pairs() {
        let attrs = attrs! {
            "port" => 8080i64,
            "name" => "api",
        };
        assert_eq!(attrs[0].key, "port");
        assert_eq!(attrs[0].value, Value::Int64(8080));
        assert_eq!(attrs[1].value, Value::String("api".to_string()));
    }
}
