// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cursor based binary field reader.

use crate::util::Scalar;
use byteorder::ByteOrder;
use core::marker::PhantomData;

/// Position of the next unread byte, `None` once a read failed.
pub type Cursor = Option<usize>;

/// Read a `T` in byte order `E` at `cursor`.
///
/// Returns the value together with the advanced cursor. If the cursor
/// already failed or `buf` is too short, the value is `T::default()` and
/// the returned cursor is failed.
#[must_use]
pub fn read_at<T: Scalar, E: ByteOrder>(buf: &[u8], cursor: Cursor) -> (T, Cursor) {
    let Some(pos) = cursor else {
        return (T::default(), None);
    };
    let Some(end) = pos.checked_add(T::SIZE) else {
        return (T::default(), None);
    };
    match buf.get(pos..end) {
        Some(field) => (T::read::<E>(field), Some(end)),
        None => (T::default(), None),
    }
}

/// Sequential reader over a byte buffer.
///
/// All fields are read in the byte order `E`. Once a read runs past the
/// end of the buffer the reader stays failed and every following read
/// yields a zero value, so a decoder only has to check [`Reader::is_failed`]
/// after a sequence of reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reader<'b, E> {
    buf: &'b [u8],
    cursor: Cursor,
    order: PhantomData<E>,
}

impl<'b, E: ByteOrder> Reader<'b, E> {
    #[must_use]
    pub const fn new(buf: &'b [u8]) -> Self {
        Self {
            buf,
            cursor: Some(0),
            order: PhantomData,
        }
    }

    /// Read the next field.
    pub fn read<T: Scalar>(&mut self) -> T {
        let (value, cursor) = read_at::<T, E>(self.buf, self.cursor);
        self.cursor = cursor;
        value
    }

    /// Current cursor.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        self.cursor.is_none()
    }

    /// All bytes before the cursor (empty once failed).
    #[must_use]
    pub fn consumed(&self) -> &'b [u8] {
        match self.cursor {
            Some(pos) => &self.buf[..pos],
            None => &[],
        }
    }
}
