/*!
Conversion of text at the native boundary.

Text is passed to the native library as UTF-8 bytes followed by a NUL byte.
This is deterministic, and independent of locale, and for ASCII text matches the encoding the native library documents.

Text from the native library is decoded lossily, and a null pointer decodes to the empty string.
Native text is owned by the context which returned it and is only valid until the next call on that context, so decoding happens before the context is released.
*/

use std::ffi::{c_char, CStr, CString};

use crate::types::err::{self, ErrorKind};

/// Encodes `text` for the native library, as part of `operation`.
pub fn to_native(operation: &'static str, text: &str) -> Result<CString, ErrorKind> {
    CString::new(text).map_err(|e| {
        ErrorKind::from(err::UsageError::InteriorNul {
            operation,
            position: e.nul_position(),
        })
    })
}

/// Decodes text returned by the native library.
///
/// # Safety
/// `text` must be null, or point to a NUL terminated string which remains valid for the duration of the call.
pub unsafe fn from_native(text: *const c_char) -> String {
    match text.is_null() {
        true => String::new(),
        false => CStr::from_ptr(text).to_string_lossy().into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_round_trip() {
        let text = "(declare-const x (_ BitVec 8))";
        let native = to_native("test", text).unwrap();
        assert_eq!(unsafe { from_native(native.as_ptr()) }, text);
    }

    #[test]
    fn null_is_empty() {
        assert_eq!(unsafe { from_native(std::ptr::null()) }, "");
    }

    #[test]
    fn interior_nul() {
        match to_native("mk_string_symbol", "ab\0c") {
            Err(ErrorKind::Usage(err::UsageError::InteriorNul {
                operation,
                position,
            })) => {
                assert_eq!(operation, "mk_string_symbol");
                assert_eq!(position, 2);
            }
            otherwise => panic!("unexpected: {otherwise:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let bytes = [b'a', 0xff, b'b', 0];
        let decoded = unsafe { from_native(bytes.as_ptr() as *const c_char) };
        assert_eq!(decoded, "a\u{fffd}b");
    }
}
