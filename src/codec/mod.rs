// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::{error::*, frame::*, util::*};
use byteorder::{BigEndian, LittleEndian};

pub mod hex;
pub mod reader;
pub mod rtu;

pub use self::{
    hex::HexReader,
    reader::{Cursor, Reader},
};

/// Reader for multi-byte wire fields, which are big-endian.
pub(crate) type WireReader<'b> = Reader<'b, BigEndian>;
