//! Slug newtypes for attribute term references.
//!
//! Colour, size, and logo-position terms are referenced by slug throughout
//! the engine. The `define_slug!` macro creates a distinct newtype per term
//! family so a colour slug can never be passed where a size slug is
//! expected.

/// Errors that can occur when parsing a slug.
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9_-]`.
    #[error("slug contains invalid character {found:?}")]
    InvalidCharacter {
        /// The first offending character.
        found: char,
    },
}

/// Maximum length of a slug (the host platform's term slug limit).
pub const MAX_SLUG_LENGTH: usize = 200;

/// Validate a slug string: non-empty, bounded, lowercase `[a-z0-9_-]` only.
///
/// # Errors
///
/// Returns a [`SlugError`] describing the first violation found.
pub fn validate_slug(s: &str) -> Result<(), SlugError> {
    if s.is_empty() {
        return Err(SlugError::Empty);
    }

    if s.len() > MAX_SLUG_LENGTH {
        return Err(SlugError::TooLong {
            max: MAX_SLUG_LENGTH,
        });
    }

    if let Some(found) = s
        .chars()
        .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || *c == '_'))
    {
        return Err(SlugError::InvalidCharacter { found });
    }

    Ok(())
}

/// Macro to define a type-safe slug wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `parse()` validation (non-empty, bounded, `[a-z0-9_-]` only)
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `Ord`
/// - `as_str()`, `Display`, `FromStr`, and `AsRef<str>`
///
/// # Example
///
/// ```rust
/// # use size_grid_core::define_slug;
/// define_slug!(ColorSlug);
///
/// let navy = ColorSlug::parse("navy").unwrap();
/// assert_eq!(navy.as_str(), "navy");
/// assert!(ColorSlug::parse("Not A Slug").is_err());
/// ```
#[macro_export]
macro_rules! define_slug {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Parse a slug from a string.
            ///
            /// # Errors
            ///
            /// Returns a `SlugError` if the input is empty, too long, or
            /// contains characters outside `[a-z0-9_-]`.
            pub fn parse(s: &str) -> Result<Self, $crate::SlugError> {
                $crate::types::slug::validate_slug(s)?;
                Ok(Self(s.to_owned()))
            }

            /// Returns the slug as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consumes the slug and returns its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::SlugError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define the term families the engine works with
define_slug!(ColorSlug);
define_slug!(SizeSlug);
define_slug!(PositionSlug);
