use std::io::{self, BufRead, StdinLock};

use crate::Error;
use crate::config::ReadConfig;
use crate::parse::{Std, TokenParse};
use crate::tokens::Tokens;

/// A token reader over locked standard input.
///
/// The lock is held for the reader's lifetime; callers sharing stdin
/// across threads must serialize access themselves.
///
/// # Example
///
/// ```ignore
/// use linekit_core::stdin;
///
/// let mut input = stdin();
/// let n: usize = input.value()?;
/// let scores: Vec<i64> = input.to_vec()?;
/// ```
pub fn stdin() -> LineReader<StdinLock<'static>> {
    LineReader::new(io::stdin().lock())
}

/// Reads physical lines from a [`BufRead`] source and hands out token
/// cursors over them.
///
/// The reader owns one line buffer that is reused across calls: each
/// [`line`](LineReader::line) call replaces the previous line's contents,
/// so the returned cursor borrows the reader until the next read. Once the
/// buffer has grown to the longest line seen, per-line reads allocate
/// nothing.
pub struct LineReader<R> {
    source: R,
    buf: String,
    config: ReadConfig,
}

impl<R: BufRead> LineReader<R> {
    /// Wraps a buffered source with the default configuration.
    #[inline]
    pub fn new(source: R) -> Self {
        Self::with_config(source, ReadConfig::DEFAULT)
    }

    /// Wraps a buffered source with an explicit default configuration.
    #[inline]
    pub fn with_config(source: R, config: ReadConfig) -> Self {
        Self {
            source,
            buf: String::new(),
            config,
        }
    }

    /// Reads the next physical line and returns a cursor over its tokens.
    ///
    /// The trailing `\n` or `\r\n` is stripped.
    ///
    /// # Errors
    ///
    /// [`Error::EndOfInput`] at end of stream, [`Error::Io`] if the source
    /// fails mid-line.
    pub fn line<T>(&mut self) -> Result<Tokens<'_, T>, Error> {
        let config = self.config;
        self.line_with(config)
    }

    /// Like [`line`](LineReader::line), with a per-call configuration.
    pub fn line_with<T>(&mut self, config: ReadConfig) -> Result<Tokens<'_, T>, Error> {
        let line = self.next_line()?;
        Ok(Tokens::with_config(line, config))
    }

    /// Like [`line`](LineReader::line), with an explicit parsing strategy.
    pub fn line_using<T, P: TokenParse<T>>(
        &mut self,
        parser: P,
        config: ReadConfig,
    ) -> Result<Tokens<'_, T, P>, Error> {
        let line = self.next_line()?;
        Ok(Tokens::with_parser(line, parser, config))
    }

    /// Reads a line and takes its first token as a `T`.
    pub fn value<T>(&mut self) -> Result<T, Error>
    where
        Std: TokenParse<T>,
    {
        self.line()?.value()
    }

    /// Reads a line and takes its first `N` tokens.
    ///
    /// ```ignore
    /// let [w, h]: [u32; 2] = input.array()?;
    /// ```
    pub fn array<T, const N: usize>(&mut self) -> Result<[T; N], Error>
    where
        Std: TokenParse<T>,
    {
        self.line()?.array()
    }

    /// Reads a line and collects every token on it.
    pub fn to_vec<T>(&mut self) -> Result<Vec<T>, Error>
    where
        Std: TokenParse<T>,
    {
        self.line()?.into_vec()
    }

    fn next_line(&mut self) -> Result<&str, Error> {
        self.buf.clear();
        let read = self.source.read_line(&mut self.buf)?;
        if read == 0 {
            return Err(Error::EndOfInput);
        }
        if self.buf.ends_with('\n') {
            self.buf.pop();
            if self.buf.ends_with('\r') {
                self.buf.pop();
            }
        }
        Ok(self.buf.as_str())
    }
}
