// Float parser for OBJ/MTL numeric literals.
//
// Accepts the following grammar:
//
//   sign    = "+" | "-" ;
//   digit   = "0" | "1" | "2" | "3" | "4" | "5" | "6" | "7" | "8" | "9" ;
//   integer = [sign] , digit , {digit} ;
//   decimal = integer , ["." , {digit}] ;
//   float   = decimal , [("E" | "e") , integer] ;
//
// e.g. `-0`, `+3.1417e+2`, `-0.0E-3`, `1.0324`, `-1.41`, `11e2`.
//
// Fractional digits are weighted with a table of negative powers of ten rather
// than by repeated division, and the decimal exponent is applied as
// `mantissa * 5^e * 2^e` (the `2^e` part is an exact binary scale).

#![allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]

// 10^-k for k in 0..8
const NEG_POW10: [f64; 8] = [1.0, 0.1, 0.01, 0.001, 0.0001, 0.00001, 0.000001, 0.0000001];

/// Parses the whole of `bytes` as a float.
#[cfg(test)]
fn parse(bytes: &[u8]) -> Option<f64> {
    match parse_partial(bytes) {
        Some((v, n)) if n == bytes.len() => Some(v),
        _ => None,
    }
}

/// Parses the longest prefix of `bytes` that matches the grammar and returns
/// the value and the number of bytes consumed.
pub(crate) fn parse_partial(bytes: &[u8]) -> Option<(f64, usize)> {
    let mut s = bytes;

    let negative = match s.first()? {
        b'-' => {
            s = &s[1..];
            true
        }
        b'+' => {
            s = &s[1..];
            false
        }
        _ => false,
    };

    // integer part
    let mut mantissa = 0.0_f64;
    let start = s.len();
    while let Some((&c, s_next)) = s.split_first() {
        if !c.is_ascii_digit() {
            break;
        }
        mantissa = mantissa * 10.0 + f64::from(c - b'0');
        s = s_next;
    }
    if s.len() == start {
        return None;
    }

    // fractional part
    if let [b'.', s_next @ ..] = s {
        s = s_next;
        let mut k = 1_usize;
        while let Some((&c, s_next)) = s.split_first() {
            if !c.is_ascii_digit() {
                break;
            }
            let weight = match NEG_POW10.get(k) {
                Some(&w) => w,
                None => 10_f64.powi(-(k.min(i32::MAX as usize) as i32)),
            };
            mantissa += f64::from(c - b'0') * weight;
            k += 1;
            s = s_next;
        }
    }

    // exponent part
    let mut exponent = 0_i32;
    if let [b'e' | b'E', s_next @ ..] = s {
        s = s_next;
        let exp_negative = match s.first() {
            Some(b'-') => {
                s = &s[1..];
                true
            }
            Some(b'+') => {
                s = &s[1..];
                false
            }
            _ => false,
        };
        let start = s.len();
        while let Some((&c, s_next)) = s.split_first() {
            if !c.is_ascii_digit() {
                break;
            }
            exponent = exponent
                .saturating_mul(10)
                .saturating_add(i32::from(c - b'0'));
            s = s_next;
        }
        // empty exponent is not allowed
        if s.len() == start {
            return None;
        }
        if exp_negative {
            exponent = -exponent;
        }
    }

    let mut value = if exponent != 0 && mantissa != 0.0 {
        ldexp(mantissa * 5_f64.powi(exponent), exponent)
    } else {
        mantissa
    };
    if negative {
        value = -value;
    }
    Some((value, bytes.len() - s.len()))
}

/// `x * 2^exp`
#[inline]
fn ldexp(x: f64, exp: i32) -> f64 {
    // Split the scale so that 2^exp never overflows on its own while x is finite.
    let half = exp / 2;
    x * 2_f64.powi(half) * 2_f64.powi(exp - half)
}

#[cfg(test)]
#[path = "tests/float.rs"]
mod tests;
