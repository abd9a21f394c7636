/// Declares an enum backed by a fixed set of wire literals.
///
/// The `open` form adds an `Other(String)` variant that keeps any value
/// outside the documented set.
macro_rules! literal_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($lit),+];

            pub fn from_literal(value: &str) -> Option<Self> {
                match value {
                    $( $lit => Some($name::$variant), )+
                    _ => None,
                }
            }

            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $lit, )+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };

    (
        open
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $lit:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// Value outside the documented set, kept verbatim.
            Other(String),
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($lit),+];

            pub fn from_literal(value: &str) -> Self {
                match value {
                    $( $lit => $name::$variant, )+
                    other => $name::Other(other.to_string()),
                }
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $lit, )+
                    $name::Other(value) => value.as_str(),
                }
            }

            pub fn is_documented(&self) -> bool {
                !matches!(self, $name::Other(_))
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

pub mod message;
pub mod status;
pub mod transaction;
pub mod validation;
