// Decimal integer parser.
//
// Accepts `[sign] digit {digit}`; overflow is an error rather than wrapping.

#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use self::integer::RawInteger;

#[inline]
pub(crate) fn parse<T: Integer>(bytes: &[u8]) -> Option<T> {
    T::parse(bytes)
}

#[inline]
pub(crate) fn parse_partial<T: Integer>(bytes: &[u8]) -> Option<(T, usize)> {
    T::parse_partial(bytes)
}

mod integer {
    pub trait RawInteger: Copy {
        /// Largest magnitude representable by a non-negative value.
        const MAX: u64;
        const IS_SIGNED: bool;
        fn from_u64(v: u64, negative: bool) -> Self;
    }
}

pub(crate) trait Integer: integer::RawInteger {
    #[inline]
    fn parse(bytes: &[u8]) -> Option<Self> {
        match Self::parse_partial(bytes) {
            Some((v, n)) if n == bytes.len() => Some(v),
            _ => None,
        }
    }
    #[inline]
    fn parse_partial(bytes: &[u8]) -> Option<(Self, usize)> {
        dec2int(bytes)
    }
}

macro_rules! uint {
    ($ty:ident) => {
        impl RawInteger for $ty {
            const MAX: u64 = $ty::MAX as u64;
            const IS_SIGNED: bool = false;
            #[inline]
            fn from_u64(v: u64, negative: bool) -> Self {
                debug_assert!(!negative);
                v as $ty
            }
        }
        impl Integer for $ty {}
    };
}
macro_rules! int {
    ($ty:ident) => {
        impl RawInteger for $ty {
            const MAX: u64 = $ty::MAX as u64;
            const IS_SIGNED: bool = true;
            #[inline]
            fn from_u64(v: u64, negative: bool) -> Self {
                if negative {
                    // v <= MAX + 1, so this never overflows (`-(MAX + 1)` is `MIN`)
                    (v as $ty).wrapping_neg()
                } else {
                    v as $ty
                }
            }
        }
        impl Integer for $ty {}
    };
}
uint!(u32);
uint!(u8);
int!(i64);
int!(i32);

#[inline]
fn dec2int<I: RawInteger>(mut s: &[u8]) -> Option<(I, usize)> {
    let start = s.len();
    let negative = match s.first()? {
        b'-' if I::IS_SIGNED => {
            s = &s[1..];
            true
        }
        b'+' => {
            s = &s[1..];
            false
        }
        _ => false,
    };

    let digits_start = s.len();
    let mut v = 0_u64;
    while let Some((&c, s_next)) = s.split_first() {
        if !c.is_ascii_digit() {
            break;
        }
        v = v.checked_mul(10)?.checked_add(u64::from(c - b'0'))?;
        s = s_next;
    }
    if s.len() == digits_start {
        return None;
    }

    // check overflow
    if v > I::MAX + u64::from(negative) {
        return None;
    }

    Some((I::from_u64(v, negative), start - s.len()))
}

#[cfg(test)]
#[path = "tests/int.rs"]
mod tests;
