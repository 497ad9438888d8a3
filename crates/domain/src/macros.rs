//! Macro for enums that travel on the wire as fixed strings
//!
//! Generates `as_str`, a `VALUES` table, `Display` and a case-insensitive
//! `FromStr` whose error is [`DialplaneError::InvalidInput`] naming the
//! accepted values.
//!
//! # Example
//!
//! ```rust
//! use dialplane_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Direction {
//!     Ascending,
//!     Descending,
//! }
//!
//! impl_wire_enum_conversions!(Direction {
//!     Ascending => "ASC",
//!     Descending => "DESC",
//! });
//!
//! assert_eq!("asc".parse::<Direction>().unwrap(), Direction::Ascending);
//! assert_eq!(Direction::Descending.to_string(), "DESC");
//! ```
//!
//! [`DialplaneError::InvalidInput`]: crate::DialplaneError::InvalidInput

/// Implements wire-string conversions for a fieldless enum
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Every accepted wire value, in declaration order.
            pub const VALUES: &'static [&'static str] = &[$($str),+];

            /// The wire representation of this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::DialplaneError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(if s.eq_ignore_ascii_case($str) {
                    return Ok(Self::$variant);
                })+
                Err($crate::DialplaneError::InvalidInput(format!(
                    "invalid {} '{}', expected one of: {}",
                    stringify!($enum_name),
                    s,
                    Self::VALUES.join(", ")
                )))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use crate::DialplaneError;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestMode {
        Fast,
        Slow,
    }

    impl_wire_enum_conversions!(TestMode {
        Fast => "fast",
        Slow => "SLOW",
    });

    #[test]
    fn test_display_uses_wire_value() {
        assert_eq!(TestMode::Fast.to_string(), "fast");
        assert_eq!(TestMode::Slow.to_string(), "SLOW");
    }

    #[test]
    fn test_fromstr_is_case_insensitive() {
        assert_eq!(TestMode::from_str("FAST").unwrap(), TestMode::Fast);
        assert_eq!(TestMode::from_str("slow").unwrap(), TestMode::Slow);
        assert_eq!(TestMode::from_str("Slow").unwrap(), TestMode::Slow);
    }

    #[test]
    fn test_fromstr_invalid_lists_accepted_values() {
        let err = TestMode::from_str("medium").unwrap_err();
        match err {
            DialplaneError::InvalidInput(msg) => {
                assert!(msg.contains("TestMode"));
                assert!(msg.contains("medium"));
                assert!(msg.contains("fast, SLOW"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_values_table() {
        assert_eq!(TestMode::VALUES, &["fast", "SLOW"]);
    }
}
