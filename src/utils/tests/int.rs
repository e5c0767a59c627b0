use super::*;

#[test]
fn uint() {
    assert_eq!(parse::<u32>(u32::MAX.to_string().as_bytes()), Some(u32::MAX));
    assert_eq!(parse::<u32>(b"+42"), Some(42));
    assert_eq!(parse::<u32>(b"0000000000000000000007"), Some(7));
    assert_eq!(parse::<u32>(b"4294967296"), None);
    assert_eq!(parse::<u32>(b"-1"), None);
    assert_eq!(parse::<u8>(b"255"), Some(255));
    assert_eq!(parse::<u8>(b"256"), None);
}

#[test]
fn int() {
    assert_eq!(parse::<i32>(i32::MAX.to_string().as_bytes()), Some(i32::MAX));
    assert_eq!(parse::<i32>(i32::MIN.to_string().as_bytes()), Some(i32::MIN));
    assert_eq!(parse::<i32>(b"2147483648"), None);
    assert_eq!(parse::<i32>(b"-2147483649"), None);
    assert_eq!(parse::<i64>(i64::MIN.to_string().as_bytes()), Some(i64::MIN));
    assert_eq!(parse::<i64>(b"99999999999999999999999"), None);
    assert_eq!(parse::<i32>(b"-0"), Some(0));
    assert_eq!(parse::<i32>(b"-3"), Some(-3));
}

#[test]
fn reject() {
    assert_eq!(parse::<i32>(b""), None);
    assert_eq!(parse::<i32>(b"-"), None);
    assert_eq!(parse::<i32>(b"+"), None);
    assert_eq!(parse::<i32>(b"1.5"), None);
    assert_eq!(parse::<i32>(b"x1"), None);
    assert_eq!(parse_partial::<i32>(b"12/3"), Some((12, 2)));
}

mod quickcheck_int {
    use super::*;
    ::quickcheck::quickcheck! {
        fn parse_i32(x: i32) -> bool {
            assert_eq!(parse::<i32>(x.to_string().as_bytes()), Some(x));
            true
        }
        fn parse_i64(x: i64) -> bool {
            assert_eq!(parse::<i64>(x.to_string().as_bytes()), Some(x));
            true
        }
        fn parse_u32(x: u32) -> bool {
            assert_eq!(parse::<u32>(x.to_string().as_bytes()), Some(x));
            true
        }
        fn parse_str(x: String) -> bool {
            assert_eq!(parse::<i64>(x.as_bytes()), x.parse::<i64>().ok(), "{x:?}");
            true
        }
    }
}
