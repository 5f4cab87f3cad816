// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::frame::Exception;
use core::{
    fmt,
    hash::{Hash, Hasher},
};

/// Offset added to the exception code reported by a slave.
pub const EXCEPTION_CODE_OFFSET: u8 = 0x80;

/// Result code of a decode operation.
///
/// The numeric values form an 8 bit code space. Codes `1`, `8` and `10`
/// are reserved, the band `0x80..=0xFF` carries slave exception codes.
///
/// Codes compare and hash by their [`ErrorCode::value`], so
/// `Exception(0x02)` and `Exception(0x82)` are the same code.
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Default, Clone, Copy)]
pub enum ErrorCode {
    /// The frame was accepted.
    #[default]
    NoError,
    /// Unexpected error
    Unexpected,
    /// The cursor ran past the end of the buffer.
    BufferLen,
    /// The declared payload exceeds the available bytes.
    PayloadLen,
    /// Version mismatch (reserved)
    Version,
    /// Length checksum mismatch (reserved)
    LChecksum,
    /// CRC mismatch
    Checksum,
    /// Station, function code or byte count does not match the request.
    MismatchHeader,
    /// The frame is too short to contain a header.
    MissingData,
    /// Exception reported by the slave, holding the raw code modulo `0x80`.
    ///
    /// Only the low 7 bits of the payload are significant.
    Exception(u8),
}

impl ErrorCode {
    /// Create an [`ErrorCode`] from its numeric `value`.
    ///
    /// Reserved and unassigned values yield `None`.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        let code = match value {
            0 => Self::NoError,
            2 => Self::Unexpected,
            3 => Self::BufferLen,
            4 => Self::PayloadLen,
            5 => Self::Version,
            6 => Self::LChecksum,
            7 => Self::Checksum,
            9 => Self::MismatchHeader,
            11 => Self::MissingData,
            0x80..=0xFF => Self::Exception(value - EXCEPTION_CODE_OFFSET),
            _ => return None,
        };
        Some(code)
    }

    /// Map an exception code received from a slave into the exception band.
    #[must_use]
    pub const fn from_exception_code(raw: u8) -> Self {
        Self::Exception(raw % EXCEPTION_CODE_OFFSET)
    }

    /// Get the [`u8`] value of the current [`ErrorCode`].
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::NoError => 0,
            Self::Unexpected => 2,
            Self::BufferLen => 3,
            Self::PayloadLen => 4,
            Self::Version => 5,
            Self::LChecksum => 6,
            Self::Checksum => 7,
            Self::MismatchHeader => 9,
            Self::MissingData => 11,
            Self::Exception(code) => EXCEPTION_CODE_OFFSET + (code % EXCEPTION_CODE_OFFSET),
        }
    }

    /// Returns `true` if the frame was accepted.
    #[must_use]
    pub const fn is_ok(self) -> bool {
        matches!(self, Self::NoError)
    }

    /// The standard Modbus exception, if this is a known slave exception.
    #[must_use]
    pub fn exception(self) -> Option<Exception> {
        match self {
            Self::Exception(code) => Exception::try_from(code % EXCEPTION_CODE_OFFSET).ok(),
            _ => None,
        }
    }

    /// Fixed human readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::NoError => "none",
            Self::Unexpected => "unexpected modbus error",
            Self::BufferLen => "modbus buffer length error",
            Self::PayloadLen => "modbus payload length error",
            Self::Version => "modbus mismatch version error",
            Self::LChecksum => "modbus lchecksum error",
            Self::Checksum => "modbus checksum error",
            Self::MismatchHeader => "modbus mismatch error",
            Self::MissingData => "invalid frame or no data error",
            Self::Exception(_) => "modbus vendor exception code",
        }
    }
}

impl PartialEq for ErrorCode {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for ErrorCode {}

impl Hash for ErrorCode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value().hash(state);
    }
}

impl From<ErrorCode> for u8 {
    fn from(code: ErrorCode) -> u8 {
        code.value()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Exception(_) => {
                write!(f, "{}: {}", self.description(), self.value())?;
                if let Some(ex) = self.exception() {
                    write!(f, " ({ex})")?;
                }
                Ok(())
            }
            _ => f.write_str(self.description()),
        }
    }
}

/// modbus-rtu-codec Error
#[cfg_attr(all(feature = "defmt", target_os = "none"), derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Invalid coil value
    CoilValue(u16),
    /// Invalid buffer size
    BufferSize,
    /// Rejected response frame
    Frame(ErrorCode),
}

impl Error {
    /// The decode result code carried by this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Frame(code) => *code,
            Self::CoilValue(_) | Self::BufferSize => ErrorCode::Unexpected,
        }
    }
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Self::Frame(code)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use Error::*;

        match self {
            CoilValue(v) => write!(f, "Invalid coil value: 0x{v:0>4X}"),
            BufferSize => write!(f, "Invalid buffer size"),
            Frame(code) => write!(f, "Invalid response frame: {code}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
