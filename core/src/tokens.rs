use std::fmt;
use std::marker::PhantomData;

use memchr::memchr;

use crate::Error;
use crate::config::ReadConfig;
use crate::count::count_byte;
use crate::parse::{Std, TokenParse};

/// A cursor over the separator-delimited tokens of one line.
///
/// `Tokens` borrows the line and tracks a byte position into it; the text
/// itself is never copied or mutated. Three access patterns are supported:
///
/// - single values: [`value`](Tokens::value), [`opt_value`](Tokens::opt_value)
/// - fixed arity: [`array`](Tokens::array) — `let [a, b, c] = t.array()?;`
/// - sequences: [`iter`](Tokens::iter), [`spans`](Tokens::spans),
///   [`into_vec`](Tokens::into_vec)
///
/// # Position Invariants
///
/// The position is always a character boundary in `[0, line.len()]` and
/// only moves forward as tokens are consumed. A token is available iff the
/// span between the position and the next separator (or end of line) is
/// non-empty: a trailing separator opens no empty final token, and two
/// adjacent separators stop probing access without yielding one.
///
/// # Restarting
///
/// [`iter`](Tokens::iter) and [`spans`](Tokens::spans) capture an
/// independent copy of the cursor state, so iteration never advances the
/// stream itself: iterating the same `Tokens` twice produces identical
/// sequences. Only the consuming reads and [`rewind`](Tokens::rewind) move
/// the stream; [`fork`](Tokens::fork) gives an independent cursor.
///
/// # Example
///
/// ```ignore
/// use linekit_core::Tokens;
///
/// let mut t = Tokens::<i64>::new("100 200 300");
/// let [a, b, c] = t.array()?;
/// assert_eq!((a, b, c), (100, 200, 300));
/// ```
pub struct Tokens<'line, T, P = Std> {
    line: &'line str,
    pos: usize,
    separator: u8,
    parser: P,
    _value: PhantomData<fn() -> T>,
}

/// Locate the token starting at `pos`: its text and the position after
/// consuming it. `None` when the span up to the next separator (or end of
/// line) is empty.
///
/// `separator` is ASCII, so `idx` and `pos + idx + 1` are always character
/// boundaries.
#[inline]
fn split_at_separator(line: &str, pos: usize, separator: u8) -> Option<(&str, usize)> {
    let rest = &line[pos..];
    match memchr(separator, rest.as_bytes()) {
        Some(0) => None,
        Some(idx) => Some((&rest[..idx], pos + idx + 1)),
        None if rest.is_empty() => None,
        None => Some((rest, line.len())),
    }
}

impl<'line, T> Tokens<'line, T> {
    /// Creates a cursor with the default configuration (space separator).
    #[inline]
    pub fn new(line: &'line str) -> Self {
        Self::with_config(line, ReadConfig::DEFAULT)
    }

    /// Creates a cursor with an explicit configuration.
    #[inline]
    pub fn with_config(line: &'line str, config: ReadConfig) -> Self {
        Self::with_parser(line, Std, config)
    }
}

impl<'line, T, P> Tokens<'line, T, P> {
    /// Creates a cursor with an explicit parsing strategy.
    #[inline]
    pub fn with_parser(line: &'line str, parser: P, config: ReadConfig) -> Self {
        Self {
            line,
            pos: 0,
            separator: config.separator,
            parser,
            _value: PhantomData,
        }
    }

    /// Byte offset of the cursor into the line.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.pos
    }

    /// The unread remainder of the line.
    #[inline]
    pub fn rest(&self) -> &'line str {
        &self.line[self.pos..]
    }

    /// Moves the cursor to `pos`.
    ///
    /// `pos` should be a value previously returned by
    /// [`cursor`](Tokens::cursor); `rewind(0)` restarts the stream.
    ///
    /// # Panics
    ///
    /// Panics if `pos` is past the end of the line or not a character
    /// boundary.
    #[inline]
    pub fn rewind(&mut self, pos: usize) {
        assert!(
            self.line.is_char_boundary(pos),
            "rewind target must be a character boundary within the line"
        );
        self.pos = pos;
    }

    /// Returns `true` when no token remains.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peek_span().is_none()
    }

    /// The next token's text, without consuming it.
    #[inline]
    pub fn peek_span(&self) -> Option<&'line str> {
        split_at_separator(self.line, self.pos, self.separator).map(|(span, _)| span)
    }

    /// The next token's text, consuming it.
    ///
    /// This is the probing form of the advance primitive: at end of line,
    /// after a trailing separator, or between adjacent separators it
    /// returns `None` and leaves the cursor in place.
    #[inline]
    pub fn next_span(&mut self) -> Option<&'line str> {
        let (span, next) = split_at_separator(self.line, self.pos, self.separator)?;
        self.pos = next;
        Some(span)
    }

    /// Exact number of tokens remaining, by probing scan.
    ///
    /// Walks the remaining text span by span. Buffer sizing ahead of
    /// [`into_vec`](Tokens::into_vec) uses the vectorized separator count
    /// instead.
    pub fn remaining(&self) -> usize {
        self.spans().count()
    }

    /// Borrowed iterator over the remaining token texts.
    ///
    /// Zero-copy and parse-free; the identity counterpart of the typed
    /// accessors. The iterator holds its own cursor, so the stream does
    /// not move.
    #[inline]
    pub fn spans(&self) -> Spans<'line> {
        Spans {
            line: self.line,
            pos: self.pos,
            separator: self.separator,
        }
    }

    /// An independent cursor at the same position.
    #[inline]
    pub fn fork(&self) -> Self
    where
        P: Clone,
    {
        self.clone()
    }
}

impl<'line, T, P: TokenParse<T>> Tokens<'line, T, P> {
    /// Reads the next token as a `T`.
    ///
    /// This is the fallible form of the advance primitive: exactly one
    /// token must be present.
    ///
    /// # Errors
    ///
    /// [`Error::MissingToken`] when no token remains before the next
    /// separator or end of line; [`Error::Parse`] when the token text does
    /// not convert. A parse failure still consumes the token.
    pub fn value(&mut self) -> Result<T, Error> {
        let at = self.pos;
        let span = self.next_span().ok_or(Error::MissingToken { at })?;
        self.parser.parse(span)
    }

    /// Reads the next token as a `T` if one is present and converts.
    ///
    /// The cursor advances only on success; a missing or malformed token
    /// leaves it in place and returns `None`.
    pub fn opt_value(&mut self) -> Option<T> {
        let (span, next) = split_at_separator(self.line, self.pos, self.separator)?;
        let value = self.parser.try_parse(span)?;
        self.pos = next;
        Some(value)
    }

    /// Reads exactly `N` tokens, left to right.
    ///
    /// Fails on the first missing or malformed token; values parsed before
    /// the failure are discarded. Tokens beyond the `N`th are left unread
    /// and are not an error.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let [a, b] = Tokens::<f64>::new("-10.99 10.99").array()?;
    /// assert_eq!(a + b, 0.0);
    /// ```
    pub fn array<const N: usize>(&mut self) -> Result<[T; N], Error> {
        let mut slots: [Option<T>; N] = [const { None }; N];
        for slot in slots.iter_mut() {
            *slot = Some(self.value()?);
        }
        Ok(slots.map(|slot| match slot {
            Some(value) => value,
            None => unreachable!("every slot is filled above"),
        }))
    }

    /// Consumes every remaining token into a `Vec`.
    ///
    /// The output is allocated exactly once: separators in the unread text
    /// are counted with the vectorized scan, and the token count is that
    /// plus one — unless the text is empty (zero tokens) or ends exactly on
    /// a separator (the final separator opens no token). The fill then
    /// re-runs the fallible read per slot, so malformed input such as
    /// doubled separators surfaces as [`Error::MissingToken`] rather than
    /// as empty tokens.
    pub fn into_vec(mut self) -> Result<Vec<T>, Error> {
        let rest = self.rest().as_bytes();
        if rest.is_empty() {
            return Ok(Vec::new());
        }
        let mut len = count_byte(rest, self.separator);
        if rest[rest.len() - 1] != self.separator {
            len += 1;
        }
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            values.push(self.value()?);
        }
        Ok(values)
    }

    /// Lazy parsing iterator over the remaining tokens.
    ///
    /// Yields `Result<T, Error>`: malformed tokens surface as `Err` items,
    /// and exhaustion terminates iteration without error. The iterator
    /// holds its own cursor copy, so the stream does not move and repeated
    /// calls replay the same sequence.
    #[inline]
    pub fn iter(&self) -> Iter<'_, 'line, T, P> {
        Iter {
            line: self.line,
            pos: self.pos,
            separator: self.separator,
            parser: &self.parser,
            _value: PhantomData,
        }
    }
}

impl<'line, T, P: Clone> Clone for Tokens<'line, T, P> {
    fn clone(&self) -> Self {
        Self {
            line: self.line,
            pos: self.pos,
            separator: self.separator,
            parser: self.parser.clone(),
            _value: PhantomData,
        }
    }
}

impl<T, P: fmt::Debug> fmt::Debug for Tokens<'_, T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("line", &self.line)
            .field("pos", &self.pos)
            .field("separator", &self.separator)
            .field("parser", &self.parser)
            .finish()
    }
}

impl<'s, 'line, T, P: TokenParse<T>> IntoIterator for &'s Tokens<'line, T, P> {
    type Item = Result<T, Error>;
    type IntoIter = Iter<'s, 'line, T, P>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy parsing iterator returned by [`Tokens::iter`].
pub struct Iter<'s, 'line, T, P> {
    line: &'line str,
    pos: usize,
    separator: u8,
    parser: &'s P,
    _value: PhantomData<fn() -> T>,
}

impl<T, P: TokenParse<T>> Iterator for Iter<'_, '_, T, P> {
    type Item = Result<T, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        let (span, next) = split_at_separator(self.line, self.pos, self.separator)?;
        self.pos = next;
        Some(self.parser.parse(span))
    }
}

/// Borrowed iterator over token texts, returned by [`Tokens::spans`].
#[derive(Debug, Clone)]
pub struct Spans<'line> {
    line: &'line str,
    pos: usize,
    separator: u8,
}

impl<'line> Iterator for Spans<'line> {
    type Item = &'line str;

    fn next(&mut self) -> Option<Self::Item> {
        let (span, next) = split_at_separator(self.line, self.pos, self.separator)?;
        self.pos = next;
        Some(span)
    }
}
