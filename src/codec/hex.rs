// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reader for frames written as hexadecimal text, e.g. `"1103006B0003"`.

use super::reader::Cursor;
use crate::util::Scalar;
use byteorder::BigEndian;

/// Parse a `T` from `2 * T::SIZE` hex digits at `cursor`.
///
/// Digits are read most significant first. A cursor that already
/// failed, too little remaining text or a non hex digit yield
/// `T::default()` and a failed cursor.
#[must_use]
pub fn read_hex_at<T: Scalar>(text: &str, cursor: Cursor) -> (T, Cursor) {
    let Some(pos) = cursor else {
        return (T::default(), None);
    };
    let Some(end) = pos.checked_add(T::SIZE * 2) else {
        return (T::default(), None);
    };
    let Some(digits) = text.as_bytes().get(pos..end) else {
        return (T::default(), None);
    };
    let mut bits = 0_u64;
    for &digit in digits {
        let Some(nibble) = char::from(digit).to_digit(16) else {
            return (T::default(), None);
        };
        bits = bits << 4 | u64::from(nibble);
    }
    let bytes = bits.to_be_bytes();
    (T::read::<BigEndian>(&bytes[8 - T::SIZE..]), Some(end))
}

/// Sequential reader over hexadecimal text, two digits per byte.
///
/// Shares the failure policy of [`super::Reader`]: after the first
/// failed read every further read yields a zero value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexReader<'s> {
    text: &'s str,
    cursor: Cursor,
}

impl<'s> HexReader<'s> {
    #[must_use]
    pub const fn new(text: &'s str) -> Self {
        Self {
            text,
            cursor: Some(0),
        }
    }

    /// Read the next field.
    pub fn read<T: Scalar>(&mut self) -> T {
        let (value, cursor) = read_hex_at::<T>(self.text, self.cursor);
        self.cursor = cursor;
        value
    }

    /// Fill `buf` byte by byte.
    ///
    /// Returns `false` if the reader failed.
    pub fn read_bytes(&mut self, buf: &mut [u8]) -> bool {
        for byte in buf.iter_mut() {
            *byte = self.read();
        }
        !self.is_failed()
    }

    /// Current cursor (an offset into the text).
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.cursor.is_none()
    }
}
