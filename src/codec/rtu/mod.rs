// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU

use super::*;

pub mod client;

// [MODBUS over Serial Line Specification and Implementation Guide V1.02](http://modbus.org/docs/Modbus_over_serial_line_V1_02.pdf), page 13
// "The maximum size of a MODBUS RTU frame is 256 bytes."
pub const MAX_FRAME_LEN: usize = 256;

/// Size of a request frame, which is also the size of a single write response.
pub const REQUEST_LEN: usize = 8;

/// Size of the shortest valid response (an exception response).
pub const MIN_RESPONSE_LEN: usize = 5;

/// Calculate the CRC (Cyclic Redundancy Check) sum.
///
/// The sum is transmitted low byte first.
#[must_use]
pub fn crc16(data: &[u8]) -> u16 {
    let mut crc = 0xFFFF;
    for x in data {
        crc ^= u16::from(*x);
        for _ in 0..8 {
            // if we followed clippy's suggestion to move out the crc >>= 1, the condition may not be met any more
            // the recommended action therefore makes no sense and it is better to allow this lint
            #[allow(clippy::branches_sharing_code)]
            if (crc & 0x0001) != 0 {
                crc >>= 1;
                crc ^= 0xA001;
            } else {
                crc >>= 1;
            }
        }
    }
    crc
}

/// Encode a request made of two 16 bit fields.
///
/// Reads pass the start address and the register count, single writes
/// the address and the value.
#[must_use]
pub fn encode_request_16_16(
    station: SlaveId,
    function: FunctionCode,
    first: u16,
    second: u16,
) -> [u8; REQUEST_LEN] {
    let mut buf = [0; REQUEST_LEN];
    buf[0] = station;
    buf[1] = function.value();
    first.write::<BigEndian>(&mut buf[2..4]);
    second.write::<BigEndian>(&mut buf[4..6]);
    crc16(&buf[..6]).write::<LittleEndian>(&mut buf[6..]);
    buf
}

/// Decode a response to a read of `count` registers.
///
/// On success the raw register bytes are returned, borrowed from `buf`
/// and still in wire byte order.
pub fn decode_multi(
    station: SlaveId,
    function: FunctionCode,
    count: Quantity,
    buf: &[u8],
) -> Result<&[u8], ErrorCode> {
    let (mut reader, rec_station, rec_function) = read_header(buf)?;

    let size: u8 = reader.read();
    if rec_station != station
        || rec_function != function.value()
        || usize::from(size) != usize::from(count) * 2
    {
        return Err(ErrorCode::MismatchHeader);
    }

    let data_start = reader.consumed().len();
    for _ in 0..count {
        let _: Word = reader.read();
    }
    if reader.is_failed() {
        return Err(ErrorCode::PayloadLen);
    }

    verify_crc(&mut reader)?;
    Ok(&buf[data_start..data_start + usize::from(count) * 2])
}

/// Decode the echo of a single write.
pub fn decode_single(
    station: SlaveId,
    function: FunctionCode,
    buf: &[u8],
) -> Result<Echo, ErrorCode> {
    let (mut reader, rec_station, rec_function) = read_header(buf)?;

    if rec_function != function.value() || rec_station != station {
        return Err(ErrorCode::MismatchHeader);
    }

    let address = reader.read();
    let value = reader.read();
    if reader.is_failed() {
        return Err(ErrorCode::BufferLen);
    }

    verify_crc(&mut reader)?;
    Ok(Echo { address, value })
}

/// Read station and function code, turning exception responses into errors.
fn read_header(buf: &[u8]) -> Result<(WireReader<'_>, SlaveId, u8), ErrorCode> {
    if buf.len() < MIN_RESPONSE_LEN {
        return Err(ErrorCode::MissingData);
    }
    let mut reader = WireReader::new(buf);
    let station = reader.read();
    let function: u8 = reader.read();
    if function > EXCEPTION_CODE_OFFSET {
        let code = reader.read();
        return Err(ErrorCode::from_exception_code(code));
    }
    Ok((reader, station, function))
}

/// Compare the CRC over all bytes read so far with the trailing CRC field.
fn verify_crc(reader: &mut WireReader<'_>) -> Result<(), ErrorCode> {
    // The field is read as big-endian but transmitted low byte first.
    let expected = crc16(reader.consumed()).swap_bytes();
    let actual: u16 = reader.read();
    if actual != expected {
        #[cfg(feature = "log")]
        log::trace!("Invalid CRC: expected = 0x{expected:0>4X}, actual = 0x{actual:0>4X}");
        return Err(ErrorCode::Checksum);
    }
    if reader.is_failed() {
        return Err(ErrorCode::BufferLen);
    }
    Ok(())
}
