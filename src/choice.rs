//! Option-list fields.
//!
//! The studio offers a fixed list of values for many fields (hero height,
//! column counts, alignment). [`choice!`] declares a `Copy` enum for such a
//! list. Decoding never fails: an absent, `null` or unrecognised value falls
//! back to the field's initial value, so one stale option doesn't drop a whole
//! block. The raw value list is exposed as `VALUES` for the schema registry.

macro_rules! choice {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
        default $default:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $($variant),+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($value),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $value),+
                }
            }

            pub fn parse(raw: &str) -> Option<Self> {
                match raw {
                    $($value => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw =
                    <Option<serde_json::Value> as serde::Deserialize>::deserialize(deserializer)?;
                let parsed = match raw {
                    Some(serde_json::Value::String(s)) => Self::parse(&s),
                    Some(serde_json::Value::Number(n)) => Self::parse(&n.to_string()),
                    _ => None,
                };
                Ok(parsed.unwrap_or_default())
            }
        }
    };
}

pub(crate) use choice;

#[cfg(test)]
mod tests {
    choice! {
        enum Size {
            Small => "small",
            Large => "large",
        }
        default Large
    }

    #[test]
    fn known_value_parses() {
        let size: Size = serde_json::from_str("\"small\"").unwrap();
        assert_eq!(size, Size::Small);
    }

    #[test]
    fn unknown_and_null_fall_back_to_default() {
        assert_eq!(serde_json::from_str::<Size>("\"huge\"").unwrap(), Size::Large);
        assert_eq!(serde_json::from_str::<Size>("null").unwrap(), Size::Large);
    }

    #[test]
    fn numbers_match_their_string_form() {
        choice! {
            enum Cols { Two => "2", Three => "3" } default Three
        }
        assert_eq!(serde_json::from_str::<Cols>("2").unwrap(), Cols::Two);
    }

    #[test]
    fn values_lists_every_option() {
        assert_eq!(Size::VALUES, &["small", "large"]);
        assert_eq!(Size::Small.to_string(), "small");
    }
}
