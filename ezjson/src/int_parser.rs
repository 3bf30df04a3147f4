// SPDX-License-Identifier: Apache-2.0

// Int parser module, mostly borrowed from core::num::parse::radix

/// A custom error type for const integer parsing.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ConstParseIntegerError {
    /// The input byte slice was empty.
    Empty,
    /// The input consisted only of a sign character (`+` or `-`).
    SignOnly,
    /// An invalid character was found that was not a base-10 digit.
    InvalidDigit,
    /// The number overflowed or underflowed the target integer type.
    Overflow,
}

/// Creates a panic-free, const-stable, base-10 parser for a specific integer type.
///
/// The whole slice must be consumed: trailing bytes are `InvalidDigit`.
macro_rules! define_const_parser {
    ($fn_name:ident, $int_ty:ty) => {
        /// Parses a byte slice into a(n) `
        #[doc = stringify!($int_ty)]
        /// ` in a `const` context.
        ///
        /// This function is guaranteed not to panic.
        pub const fn $fn_name(src: &[u8]) -> Result<$int_ty, ConstParseIntegerError> {
            let (is_negative, mut digits) = match src {
                [] => return Err(ConstParseIntegerError::Empty),
                [b'+', rest @ ..] => (false, rest),
                [b'-', rest @ ..] => (true, rest),
                _ => (false, src),
            };

            if digits.is_empty() {
                return Err(ConstParseIntegerError::SignOnly);
            }

            let mut result: $int_ty = 0;

            while let Some((&byte, rest)) = digits.split_first() {
                let digit = match byte {
                    b'0'..=b'9' => (byte - b'0') as $int_ty,
                    _ => return Err(ConstParseIntegerError::InvalidDigit),
                };

                result = match result.checked_mul(10) {
                    Some(val) => val,
                    None => return Err(ConstParseIntegerError::Overflow),
                };

                // Building the number negatively from the start correctly handles MIN.
                if is_negative {
                    result = match result.checked_sub(digit) {
                        Some(val) => val,
                        None => return Err(ConstParseIntegerError::Overflow),
                    }
                } else {
                    result = match result.checked_add(digit) {
                        Some(val) => val,
                        None => return Err(ConstParseIntegerError::Overflow),
                    }
                }

                digits = rest;
            }

            Ok(result)
        }
    };
}

define_const_parser!(from_ascii_i64, i64);
define_const_parser!(from_ascii_usize, usize);

#[cfg(test)]
mod tests {
    use super::*;

    mod test_i64 {
        use super::*;

        #[test]
        fn test_from_ascii_i64_simple() {
            assert_eq!(from_ascii_i64(b"0"), Ok(0));
            assert_eq!(from_ascii_i64(b"1234567890"), Ok(1234567890));
            assert_eq!(from_ascii_i64(b"-1234567890"), Ok(-1234567890));
            assert_eq!(from_ascii_i64(b"+1234567890"), Ok(1234567890));
        }

        #[test]
        fn test_from_ascii_i64_limits() {
            assert_eq!(from_ascii_i64(b"9223372036854775807"), Ok(i64::MAX));
            assert_eq!(from_ascii_i64(b"-9223372036854775808"), Ok(i64::MIN));
            assert_eq!(
                from_ascii_i64(b"-5514085325291784739"),
                Ok(-5514085325291784739)
            );
        }

        #[test]
        fn test_from_ascii_i64_overflow() {
            assert_eq!(
                from_ascii_i64(b"9223372036854775808"),
                Err(ConstParseIntegerError::Overflow)
            );
            assert_eq!(
                from_ascii_i64(b"-9223372036854775809"),
                Err(ConstParseIntegerError::Overflow)
            );
        }

        #[test]
        fn test_from_ascii_i64_errors() {
            assert_eq!(from_ascii_i64(b""), Err(ConstParseIntegerError::Empty));
            assert_eq!(from_ascii_i64(b"-"), Err(ConstParseIntegerError::SignOnly));
            assert_eq!(from_ascii_i64(b"+"), Err(ConstParseIntegerError::SignOnly));
            assert_eq!(
                from_ascii_i64(b"123a4567890"),
                Err(ConstParseIntegerError::InvalidDigit)
            );
        }
    }

    mod test_usize {
        use super::*;

        #[test]
        fn test_from_ascii_usize() {
            assert_eq!(from_ascii_usize(b"0"), Ok(0));
            assert_eq!(from_ascii_usize(b"42"), Ok(42));
            assert_eq!(from_ascii_usize(b"-1"), Err(ConstParseIntegerError::Overflow));
            assert_eq!(from_ascii_usize(b"-0"), Ok(0));
            assert_eq!(
                from_ascii_usize(b"2 "),
                Err(ConstParseIntegerError::InvalidDigit)
            );
            assert_eq!(
                from_ascii_usize(b"1x"),
                Err(ConstParseIntegerError::InvalidDigit)
            );
        }
    }
}
