pub(crate) mod bytes;
pub(crate) mod float;
pub(crate) mod int;

pub(crate) mod utf16 {
    use std::{borrow::Cow, io};

    const UTF32BE_BOM: &[u8] = &[0xFF, 0xFE, 00, 00];
    const UTF32LE_BOM: &[u8] = &[00, 00, 0xFE, 0xFF];
    const UTF16BE_BOM: &[u8] = &[0xFE, 0xFF];
    const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];
    const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

    /// Converts to UTF-8 if bytes are UTF-16 and have BOM.
    /// This does not handle UTF-16 without BOM or other UTF-8 incompatible encodings,
    /// so the resulting bytes must not be trusted as a valid UTF-8.
    pub(crate) fn decode_bytes(bytes: &[u8]) -> io::Result<Cow<'_, [u8]>> {
        if bytes.starts_with(UTF8_BOM) {
            Ok(Cow::Borrowed(&bytes[UTF8_BOM.len()..]))
        } else if bytes.starts_with(UTF32BE_BOM) || bytes.starts_with(UTF32LE_BOM) {
            bail!("utf-32 is not supported")
        } else if bytes.starts_with(UTF16BE_BOM) {
            from_utf16be(&bytes[UTF16BE_BOM.len()..])
                .map(String::into_bytes)
                .map(Into::into)
        } else if bytes.starts_with(UTF16LE_BOM) {
            from_utf16le(&bytes[UTF16LE_BOM.len()..])
                .map(String::into_bytes)
                .map(Into::into)
        } else {
            Ok(Cow::Borrowed(bytes))
        }
    }

    #[cold]
    #[inline(never)]
    fn from_utf16be(bytes: &[u8]) -> io::Result<String> {
        if bytes.len() % 2 != 0 {
            bail!("invalid utf-16: lone surrogate found");
        }
        char::decode_utf16(
            bytes
                .chunks_exact(2)
                .map(|b| u16::from_be_bytes([b[0], b[1]])),
        )
        .collect::<Result<String, _>>()
        .map_err(crate::error::invalid_data)
    }

    #[cold]
    #[inline(never)]
    fn from_utf16le(bytes: &[u8]) -> io::Result<String> {
        if bytes.len() % 2 != 0 {
            bail!("invalid utf-16: lone surrogate found");
        }
        char::decode_utf16(
            bytes
                .chunks_exact(2)
                .map(|b| u16::from_le_bytes([b[0], b[1]])),
        )
        .collect::<Result<String, _>>()
        .map_err(crate::error::invalid_data)
    }

}
