use std::borrow::Cow;

#[inline]
pub(crate) fn from_utf8_lossy(bytes: &[u8]) -> Cow<'_, str> {
    String::from_utf8_lossy(bytes)
}

// [\r\n]
const LINE: u8 = 1 << 0;
// [ \t]
const SPACE: u8 = 1 << 1;
// [ \r\n\t]
const WHITESPACE: u8 = 1 << 2;

static TABLE: [u8; 256] = {
    const __: u8 = 0;
    const LN: u8 = WHITESPACE | LINE;
    const NL: u8 = WHITESPACE | SPACE;
    [
        //  _1  _2  _3  _4  _5  _6  _7  _8  _9  _A  _B  _C  _D  _E  _F
        __, __, __, __, __, __, __, __, __, NL, LN, __, __, LN, __, __, // 0_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 1_
        NL, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 2_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 3_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 4_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 5_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 6_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 7_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 8_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // 9_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // A_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // B_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // C_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // D_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // E_
        __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, __, // F_
    ]
};

#[inline]
fn is_space(b: u8) -> bool {
    TABLE[b as usize] & SPACE != 0
}

#[inline]
fn is_whitespace(b: u8) -> bool {
    TABLE[b as usize] & WHITESPACE != 0
}

/// Peekable cursor over OBJ/MTL text.
///
/// Words never span lines: once the cursor reaches `\r` or `\n`, [`word`]
/// returns `None` until [`skip_line`] moves past the line end.
///
/// [`word`]: Self::word
/// [`skip_line`]: Self::skip_line
#[derive(Clone, Copy)]
pub(crate) struct Cursor<'a> {
    s: &'a [u8],
}

impl<'a> Cursor<'a> {
    #[inline]
    pub(crate) fn new(s: &'a [u8]) -> Self {
        Self { s }
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<u8> {
        self.s.first().copied()
    }

    #[inline]
    pub(crate) fn advance(&mut self) {
        self.s = self.s.get(1..).unwrap_or_default();
    }

    #[inline]
    pub(crate) fn at_end(&self) -> bool {
        self.s.is_empty()
    }

    /// Number of bytes left. Used to locate errors.
    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.s.len()
    }

    /// Skips spaces or tabs, and returns `true` if one or more spaces or tabs are
    /// present. (not consumes line characters)
    #[inline]
    pub(crate) fn skip_spaces(&mut self) -> bool {
        let start = self.s.len();
        while let Some(b) = self.peek() {
            if !is_space(b) {
                break;
            }
            self.advance();
        }
        start != self.s.len()
    }

    /// Skips non-line (non-`[\r\n]`) characters. (consumes line character)
    #[inline]
    pub(crate) fn skip_line(&mut self) {
        match memchr::memchr2(b'\n', b'\r', self.s) {
            Some(n) => self.s = &self.s[n + 1..],
            None => self.s = &[],
        }
    }

    /// Reads the next whitespace-delimited word on the current line.
    pub(crate) fn word(&mut self) -> Option<&'a [u8]> {
        self.skip_spaces();
        let start = self.s;
        while let Some(b) = self.peek() {
            if is_whitespace(b) {
                break;
            }
            self.advance();
        }
        let word = &start[..start.len() - self.s.len()];
        if word.is_empty() {
            None
        } else {
            Some(word)
        }
    }

    /// Reads the rest of the current line with leading and trailing
    /// whitespace removed. (not consumes line character)
    pub(crate) fn rest_of_line(&mut self) -> &'a [u8] {
        self.skip_spaces();
        let start = self.s;
        let n = memchr::memchr2(b'\n', b'\r', start).unwrap_or(start.len());
        self.s = &start[n..];
        let mut rest = &start[..n];
        while let Some((&b, rest_next)) = rest.split_last() {
            if !is_whitespace(b) {
                break;
            }
            rest = rest_next;
        }
        rest
    }
}
