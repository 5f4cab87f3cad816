// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common helpers

use crate::error::Error;
use byteorder::{ByteOrder, NativeEndian};

/// A fixed-width value that can be read from and written to raw bytes.
pub trait Scalar: Copy + Default {
    /// Number of bytes occupied in memory and on the wire.
    const SIZE: usize;

    /// Read the value from the first `SIZE` bytes of `buf` in byte order `E`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than `SIZE`.
    fn read<E: ByteOrder>(buf: &[u8]) -> Self;

    /// Write the value into the first `SIZE` bytes of `buf` in byte order `E`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than `SIZE`.
    fn write<E: ByteOrder>(self, buf: &mut [u8]);

    /// Reverse the byte order of the value.
    #[must_use]
    fn swap_bytes(self) -> Self;
}

impl Scalar for u8 {
    const SIZE: usize = 1;

    fn read<E: ByteOrder>(buf: &[u8]) -> Self {
        buf[0]
    }

    fn write<E: ByteOrder>(self, buf: &mut [u8]) {
        buf[0] = self;
    }

    fn swap_bytes(self) -> Self {
        self
    }
}

impl Scalar for i8 {
    const SIZE: usize = 1;

    fn read<E: ByteOrder>(buf: &[u8]) -> Self {
        buf[0] as i8
    }

    fn write<E: ByteOrder>(self, buf: &mut [u8]) {
        buf[0] = self as u8;
    }

    fn swap_bytes(self) -> Self {
        self
    }
}

macro_rules! impl_scalar {
    ($ty:ty, $size:expr, $read:ident, $write:ident) => {
        impl Scalar for $ty {
            const SIZE: usize = $size;

            fn read<E: ByteOrder>(buf: &[u8]) -> Self {
                E::$read(buf)
            }

            fn write<E: ByteOrder>(self, buf: &mut [u8]) {
                E::$write(buf, self);
            }

            fn swap_bytes(self) -> Self {
                <$ty>::swap_bytes(self)
            }
        }
    };
}

impl_scalar!(u16, 2, read_u16, write_u16);
impl_scalar!(i16, 2, read_i16, write_i16);
impl_scalar!(u32, 4, read_u32, write_u32);
impl_scalar!(i32, 4, read_i32, write_i32);
impl_scalar!(u64, 8, read_u64, write_u64);
impl_scalar!(i64, 8, read_i64, write_i64);

impl Scalar for f32 {
    const SIZE: usize = 4;

    fn read<E: ByteOrder>(buf: &[u8]) -> Self {
        E::read_f32(buf)
    }

    fn write<E: ByteOrder>(self, buf: &mut [u8]) {
        E::write_f32(buf, self);
    }

    fn swap_bytes(self) -> Self {
        f32::from_bits(self.to_bits().swap_bytes())
    }
}

impl Scalar for f64 {
    const SIZE: usize = 8;

    fn read<E: ByteOrder>(buf: &[u8]) -> Self {
        E::read_f64(buf)
    }

    fn write<E: ByteOrder>(self, buf: &mut [u8]) {
        E::write_f64(buf, self);
    }

    fn swap_bytes(self) -> Self {
        f64::from_bits(self.to_bits().swap_bytes())
    }
}

/// Reinterpret the bytes at `offset` as a `T` in host byte order.
///
/// Returns `None` if the buffer does not hold `T::SIZE` bytes at `offset`.
#[must_use]
pub fn load<T: Scalar>(buf: &[u8], offset: usize) -> Option<T> {
    let end = offset.checked_add(T::SIZE)?;
    buf.get(offset..end).map(T::read::<NativeEndian>)
}

/// Like [`load`], but with the byte order of the value reversed.
#[must_use]
pub fn load_swapped<T: Scalar>(buf: &[u8], offset: usize) -> Option<T> {
    load::<T>(buf, offset).map(byteswap)
}

/// Reverse the byte order of any [`Scalar`].
#[must_use]
pub fn byteswap<T: Scalar>(value: T) -> T {
    value.swap_bytes()
}

/// Turn a bool into a u16 coil value
#[must_use]
pub const fn bool_to_u16_coil(state: bool) -> u16 {
    if state { 0xFF00 } else { 0x0000 }
}

/// Turn a u16 coil value into a boolean value.
pub const fn u16_coil_to_bool(coil: u16) -> Result<bool, Error> {
    match coil {
        0xFF00 => Ok(true),
        0x0000 => Ok(false),
        _ => Err(Error::CoilValue(coil)),
    }
}
