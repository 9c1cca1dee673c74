use std::str::FromStr;

use crate::Error;

/// Strategy for converting one token's text into a typed value.
///
/// The cursor logic in [`Tokens`](crate::Tokens) is written once against
/// this trait; which conversion runs is resolved at compile time through
/// the strategy type parameter. Two strategies are built in:
///
/// - [`Std`] delegates to [`FromStr`] (numerics, `bool`, `char`, `String`, ...)
/// - [`ParseWith`] wraps an arbitrary converter function
///
/// Both a fallible and a probing form are required, mirroring the two
/// extraction contracts: fallible reads ([`Tokens::value`]) report
/// conversion failures, probing reads ([`Tokens::opt_value`]) treat them
/// as absence.
///
/// [`Tokens::value`]: crate::Tokens::value
/// [`Tokens::opt_value`]: crate::Tokens::opt_value
pub trait TokenParse<T> {
    /// Convert `token`, or describe why it cannot be converted.
    fn parse(&self, token: &str) -> Result<T, Error>;

    /// Convert `token`, discarding the failure cause.
    #[inline]
    fn try_parse(&self, token: &str) -> Option<T> {
        self.parse(token).ok()
    }
}

/// The standard strategy: parse any [`FromStr`] type.
///
/// The `FromStr` implementations for the built-in numeric types, `bool`,
/// and `char` are locale-independent, so parsing is deterministic
/// regardless of the host environment. `String`'s implementation is the
/// identity conversion; for borrowed, allocation-free access to token text
/// use [`Tokens::spans`](crate::Tokens::spans) instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Std;

impl<T> TokenParse<T> for Std
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    #[inline]
    fn parse(&self, token: &str) -> Result<T, Error> {
        token.parse().map_err(|source: T::Err| Error::Parse {
            token: token.to_owned(),
            source: Box::new(source),
        })
    }
}

/// A converter-function strategy for types without a usable [`FromStr`],
/// or with a nonstandard text form.
///
/// # Example
///
/// ```ignore
/// use linekit_core::{ParseWith, ReadConfig, Tokens};
///
/// // Read "a:1 b:2" as (name, score) pairs.
/// let pair = ParseWith(|tok: &str| {
///     let (name, score) = tok.split_once(':').ok_or("missing ':'")?;
///     Ok((name.to_owned(), score.parse::<u32>()?))
/// });
/// let mut tokens = Tokens::with_parser("a:1 b:2", pair, ReadConfig::DEFAULT);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ParseWith<F>(pub F);

impl<T, F> TokenParse<T> for ParseWith<F>
where
    F: Fn(&str) -> Result<T, Box<dyn std::error::Error + Send + Sync>>,
{
    #[inline]
    fn parse(&self, token: &str) -> Result<T, Error> {
        (self.0)(token).map_err(|source| Error::Parse {
            token: token.to_owned(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_parses_integers() {
        let value: i32 = Std.parse("-42").unwrap();
        assert_eq!(value, -42);
    }

    #[test]
    fn test_std_reports_offending_token() {
        let err = <Std as TokenParse<i32>>::parse(&Std, "x7").unwrap_err();
        assert!(matches!(err, Error::Parse { ref token, .. } if token == "x7"));
    }

    #[test]
    fn test_try_parse_discards_cause() {
        assert_eq!(<Std as TokenParse<u8>>::try_parse(&Std, "300"), None);
        assert_eq!(<Std as TokenParse<u8>>::try_parse(&Std, "30"), Some(30));
    }

    #[test]
    fn test_parse_with_converter() {
        fn hex_digit(tok: &str) -> Result<u32, Box<dyn std::error::Error + Send + Sync>> {
            Ok(u32::from_str_radix(tok, 16)?)
        }
        let hex = ParseWith(hex_digit);
        assert_eq!(hex.parse("ff").unwrap(), 255);
        assert!(hex.parse("zz").is_err());
    }
}
