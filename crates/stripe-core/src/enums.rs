//! # Open String Enumerations
//!
//! Stripe adds new status, type and category values without bumping the API
//! version. Every enumerated field is therefore a newtype over a string with
//! the currently documented values exposed as associated constants. Values
//! this build has never seen decode without error and re-encode verbatim.
//!
//! ```rust,ignore
//! stripe_core::open_enum! {
//!     /// Status of a payout.
//!     pub struct PayoutStatus {
//!         CANCELED = "canceled",
//!         PAID = "paid",
//!     }
//! }
//!
//! let status: PayoutStatus = serde_json::from_str("\"in_transit\"")?;
//! assert!(!status.is_known());
//! assert_eq!(status, "in_transit");
//! ```

/// Declares an open string enumeration.
#[macro_export]
macro_rules! open_enum {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis struct $name(::std::borrow::Cow<'static, str>);

        #[allow(dead_code)]
        impl $name {
            $(
                $(#[$vmeta])*
                pub const $variant: $name = $name(::std::borrow::Cow::Borrowed($wire));
            )*

            /// Wire values documented at the time this type was generated.
            pub const KNOWN: &'static [&'static str] = &[$($wire),*];

            /// Wraps an arbitrary wire value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(::std::borrow::Cow::Owned(value.into()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// True when the value is one of the documented constants.
            pub fn is_known(&self) -> bool {
                Self::KNOWN.contains(&self.as_str())
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.as_str()
            }
        }

        impl ::std::convert::From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl ::std::convert::From<String> for $name {
            fn from(value: String) -> Self {
                Self::new(value)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self::new(s))
            }
        }

        impl ::std::cmp::PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.as_str() == other
            }
        }

        impl ::std::cmp::PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.as_str() == *other
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: $crate::__serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: $crate::__serde::Deserializer<'de>,
            {
                <String as $crate::__serde::Deserialize>::deserialize(deserializer).map(Self::new)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    crate::open_enum! {
        /// Test enumeration.
        pub struct Weather {
            SUNNY = "sunny",
            RAIN = "rain",
        }
    }

    #[test]
    fn test_known_value_round_trip() {
        let w: Weather = serde_json::from_str("\"sunny\"").unwrap();
        assert_eq!(w, Weather::SUNNY);
        assert!(w.is_known());
        assert_eq!(serde_json::to_string(&w).unwrap(), "\"sunny\"");
    }

    #[test]
    fn test_unknown_value_passes_through() {
        let w: Weather = serde_json::from_str("\"volcanic_ash\"").unwrap();
        assert!(!w.is_known());
        assert_eq!(w, "volcanic_ash");
        assert_eq!(w.to_string(), "volcanic_ash");
        assert_eq!(serde_json::to_string(&w).unwrap(), "\"volcanic_ash\"");
    }

    #[test]
    fn test_non_string_is_a_decode_error() {
        assert!(serde_json::from_str::<Weather>("42").is_err());
    }

    #[test]
    fn test_default_is_empty() {
        let w = Weather::default();
        assert!(w.is_empty());
        assert_ne!(w, Weather::RAIN);
        assert_eq!(Weather::KNOWN, &["sunny", "rain"]);
    }

    #[test]
    fn test_from_str_is_infallible() {
        let w: Weather = "rain".parse().unwrap();
        assert_eq!(w, Weather::RAIN);
    }
}
