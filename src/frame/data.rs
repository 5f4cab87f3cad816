// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::*;
use crate::util::Scalar;
use byteorder::{BigEndian, ByteOrder};

/// Decoded block of registers covering the addresses `FROM..=TO`.
///
/// The view borrows the register bytes from the response buffer
/// without copying them, so it can not outlive that buffer. Words are
/// kept in wire byte order and converted on access.
///
/// Setting `SWAP` reverses the two bytes of every register on access.
/// Some devices need that for values spanning several registers.
///
/// A default constructed view is empty: it is invalid and every
/// accessor yields `0`.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RegisterView<'r, const FROM: u16, const TO: u16, const SWAP: bool = false> {
    data: Option<&'r [u8]>,
}

impl<'r, const FROM: u16, const TO: u16, const SWAP: bool> RegisterView<'r, FROM, TO, SWAP> {
    /// Address of the first register.
    pub const BASE_ADDRESS: Address = FROM;

    /// Number of registers covered by the view.
    pub const NUMBER_OF_REGISTERS: Quantity = {
        assert!(FROM <= TO, "Register range is reversed");
        let n = TO - FROM;
        assert!(n < MAX_REGISTERS, "Register range exceeds the RTU frame limit");
        n + 1
    };

    /// An empty view representing a failed decode.
    #[must_use]
    pub const fn empty() -> Self {
        Self { data: None }
    }

    /// Wrap the raw register bytes of a decoded response.
    ///
    /// `data` has to hold exactly two bytes per register.
    pub(crate) fn new(data: &'r [u8]) -> Self {
        debug_assert_eq!(data.len(), usize::from(Self::NUMBER_OF_REGISTERS) * 2);
        Self { data: Some(data) }
    }

    /// Returns `true` if the view holds decoded registers.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.data.is_some()
    }

    /// Quantity of registers (`0` for an empty view).
    #[must_use]
    pub const fn len(&self) -> usize {
        match self.data {
            Some(data) => data.len() / 2,
            None => 0,
        }
    }

    ///  Returns `true` if the view has no registers.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the register at address `ADDR`.
    ///
    /// Addresses outside of `FROM..=TO` are rejected at compile time.
    #[must_use]
    pub fn get<const ADDR: u16>(&self) -> Word {
        const {
            assert!(ADDR >= FROM && ADDR <= TO, "Register address outside range");
        }
        self.word_at(usize::from(ADDR - FROM))
    }

    /// Compose a `T` from the consecutive registers starting at `ADDR`.
    ///
    /// The registers are concatenated in address order, the first one
    /// providing the most significant bytes. Each register goes through
    /// the same `SWAP` correction as [`RegisterView::get`].
    #[must_use]
    pub fn get_as<const ADDR: u16, T: Scalar>(&self) -> T {
        const {
            assert!(
                T::SIZE % 2 == 0 && T::SIZE <= 8,
                "Type has to span whole registers"
            );
            assert!(
                ADDR >= FROM && ADDR as usize + T::SIZE / 2 <= TO as usize + 1,
                "Register address outside range"
            );
        }
        let index = usize::from(ADDR - FROM);
        let mut bytes = [0; 8];
        for (i, chunk) in bytes[..T::SIZE].chunks_exact_mut(2).enumerate() {
            BigEndian::write_u16(chunk, self.word_at(index + i));
        }
        T::read::<BigEndian>(&bytes[..T::SIZE])
    }

    /// Get a specific word by its index relative to `FROM`.
    #[must_use]
    pub fn word(&self, idx: usize) -> Option<Word> {
        if idx >= self.len() {
            return None;
        }
        Some(self.word_at(idx))
    }

    /// The raw register bytes in wire order.
    #[must_use]
    pub const fn payload(&self) -> &'r [u8] {
        match self.data {
            Some(data) => data,
            None => &[],
        }
    }

    fn word_at(&self, idx: usize) -> Word {
        let Some(data) = self.data else {
            return 0;
        };
        let word = BigEndian::read_u16(&data[idx * 2..]);
        if SWAP { word.swap_bytes() } else { word }
    }
}

impl<const FROM: u16, const TO: u16, const SWAP: bool> fmt::Display
    for RegisterView<'_, FROM, TO, SWAP>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, word) in (*self).into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{word}")?;
        }
        f.write_str("]")
    }
}

/// Register iterator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterIter<'r, const FROM: u16, const TO: u16, const SWAP: bool> {
    cnt: usize,
    view: RegisterView<'r, FROM, TO, SWAP>,
}

impl<const FROM: u16, const TO: u16, const SWAP: bool> Iterator
    for RegisterIter<'_, FROM, TO, SWAP>
{
    type Item = Word;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.view.word(self.cnt);
        self.cnt += 1;
        result
    }
}

impl<'r, const FROM: u16, const TO: u16, const SWAP: bool> IntoIterator
    for RegisterView<'r, FROM, TO, SWAP>
{
    type Item = Word;
    type IntoIter = RegisterIter<'r, FROM, TO, SWAP>;

    fn into_iter(self) -> Self::IntoIter {
        RegisterIter { cnt: 0, view: self }
    }
}
