// SPDX-FileCopyrightText: Copyright (c) 2018-2025 slowtec GmbH <post@slowtec.de>
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modbus RTU client (master) commands.
//!
//! A command fixes its function code and register addresses in the type,
//! so address ranges are validated at compile time. Only the station
//! address is chosen at runtime.
//!
//! ```
//! use modbus_rtu_codec::rtu::client::ReadHoldingRegisters;
//!
//! let cmd = ReadHoldingRegisters::<0x006B, 0x006D>::new(0x11);
//! assert_eq!(cmd.encode(), [0x11, 0x03, 0x00, 0x6B, 0x00, 0x03, 0x76, 0x87]);
//!
//! let rsp = [0x11, 0x03, 0x06, 0x02, 0x2B, 0x00, 0x00, 0x00, 0x64, 0xC8, 0xBA];
//! let view = cmd.decode(&rsp).unwrap();
//! assert_eq!(view.get::<0x006B>(), 0x022B);
//! assert_eq!(view.get::<0x006D>(), 0x0064);
//! ```
use super::*;
use core::marker::PhantomData;

/// Function code of a multi register read.
pub trait ReadFunction {
    const CODE: FunctionCode;
}

/// Function code and value type of a single write.
pub trait WriteFunction {
    const CODE: FunctionCode;

    /// The value written.
    type Value: Copy;

    /// Wire representation of the value.
    fn to_word(value: Self::Value) -> Word;
}

/// Read input registers (`0x04`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Input;

impl ReadFunction for Input {
    const CODE: FunctionCode = FunctionCode::ReadInputRegisters;
}

/// Read holding registers (`0x03`) or write a single one (`0x06`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Holding;

impl ReadFunction for Holding {
    const CODE: FunctionCode = FunctionCode::ReadHoldingRegisters;
}

impl WriteFunction for Holding {
    const CODE: FunctionCode = FunctionCode::WriteSingleRegister;
    type Value = Word;

    fn to_word(value: Word) -> Word {
        value
    }
}

/// Write a single coil (`0x05`).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Coil;

impl WriteFunction for Coil {
    const CODE: FunctionCode = FunctionCode::WriteSingleCoil;
    type Value = bool;

    fn to_word(value: bool) -> Word {
        bool_to_u16_coil(value)
    }
}

/// Read the registers `FROM..=TO` of a station.
///
/// The range must not be reversed and must fit into a single RTU frame
/// ([`MAX_REGISTERS`]). See [`RegisterView`] for `SWAP`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadRegisters<F, const FROM: u16, const TO: u16, const SWAP: bool = false> {
    pub station: SlaveId,
    function: PhantomData<F>,
}

/// Read input registers `FROM..=TO`.
pub type ReadInputRegisters<const FROM: u16, const TO: u16> =
    ReadRegisters<Input, FROM, TO, false>;

/// Read holding registers `FROM..=TO`.
pub type ReadHoldingRegisters<const FROM: u16, const TO: u16> =
    ReadRegisters<Holding, FROM, TO, false>;

impl<F: ReadFunction, const FROM: u16, const TO: u16, const SWAP: bool>
    ReadRegisters<F, FROM, TO, SWAP>
{
    /// Address of the first register.
    pub const BASE_ADDRESS: Address = FROM;

    /// Number of registers read.
    pub const NUMBER_OF_REGISTERS: Quantity =
        RegisterView::<'static, FROM, TO, SWAP>::NUMBER_OF_REGISTERS;

    /// Size of the expected response frame.
    pub const RECV_BUFFER_SIZE: usize = {
        let size = 1 + 1 + (1 + 2 * Self::NUMBER_OF_REGISTERS as usize) + 2;
        assert!(size <= MAX_FRAME_LEN);
        size
    };

    #[must_use]
    pub const fn new(station: SlaveId) -> Self {
        let _ = Self::RECV_BUFFER_SIZE;
        Self {
            station,
            function: PhantomData,
        }
    }

    /// The function code sent.
    #[must_use]
    pub const fn function(&self) -> FunctionCode {
        F::CODE
    }

    /// Encode the read request.
    #[must_use]
    pub fn encode(&self) -> [u8; REQUEST_LEN] {
        encode_request_16_16(self.station, F::CODE, FROM, Self::NUMBER_OF_REGISTERS)
    }

    /// Encode the read request into `buf`.
    ///
    /// Returns the number of bytes written.
    pub fn encode_request(&self, buf: &mut [u8]) -> Result<usize, Error> {
        let Some(target) = buf.get_mut(..REQUEST_LEN) else {
            return Err(Error::BufferSize);
        };
        target.copy_from_slice(&self.encode());
        Ok(REQUEST_LEN)
    }

    /// Decode a response.
    ///
    /// If the frame is rejected the returned view is empty.
    #[must_use]
    pub fn decode_response<'r>(
        &self,
        buf: &'r [u8],
    ) -> (RegisterView<'r, FROM, TO, SWAP>, ErrorCode) {
        match decode_multi(self.station, F::CODE, Self::NUMBER_OF_REGISTERS, buf) {
            Ok(data) => (RegisterView::new(data), ErrorCode::NoError),
            Err(code) => {
                #[cfg(feature = "log")]
                log_rejected(self.station, F::CODE, code);
                (RegisterView::empty(), code)
            }
        }
    }

    /// Decode a response, failing on any rejected frame.
    pub fn decode<'r>(&self, buf: &'r [u8]) -> Result<RegisterView<'r, FROM, TO, SWAP>, Error> {
        match self.decode_response(buf) {
            (view, ErrorCode::NoError) => Ok(view),
            (_, code) => Err(Error::Frame(code)),
        }
    }
}

/// Write a single value at `ADDR` of a station.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteSingle<F, const ADDR: u16> {
    pub station: SlaveId,
    function: PhantomData<F>,
}

/// Write the holding register at `ADDR`.
pub type WriteRegister<const ADDR: u16> = WriteSingle<Holding, ADDR>;

/// Write the coil at `ADDR`.
pub type WriteCoil<const ADDR: u16> = WriteSingle<Coil, ADDR>;

impl<F: WriteFunction, const ADDR: u16> WriteSingle<F, ADDR> {
    /// Address written.
    pub const ADDRESS: Address = ADDR;

    /// Size of the expected response frame.
    pub const RECV_BUFFER_SIZE: usize = REQUEST_LEN;

    #[must_use]
    pub const fn new(station: SlaveId) -> Self {
        Self {
            station,
            function: PhantomData,
        }
    }

    /// The function code sent.
    #[must_use]
    pub const fn function(&self) -> FunctionCode {
        F::CODE
    }

    /// Encode the write request.
    #[must_use]
    pub fn encode(&self, value: F::Value) -> [u8; REQUEST_LEN] {
        encode_request_16_16(self.station, F::CODE, ADDR, F::to_word(value))
    }

    /// Encode the write request into `buf`.
    ///
    /// Returns the number of bytes written.
    pub fn encode_request(&self, buf: &mut [u8], value: F::Value) -> Result<usize, Error> {
        let Some(target) = buf.get_mut(..REQUEST_LEN) else {
            return Err(Error::BufferSize);
        };
        target.copy_from_slice(&self.encode(value));
        Ok(REQUEST_LEN)
    }

    /// Decode the echo of the slave.
    ///
    /// If the frame is rejected the returned echo is zeroed.
    #[must_use]
    pub fn decode_response(&self, buf: &[u8]) -> (Echo, ErrorCode) {
        match decode_single(self.station, F::CODE, buf) {
            Ok(echo) => (echo, ErrorCode::NoError),
            Err(code) => {
                #[cfg(feature = "log")]
                log_rejected(self.station, F::CODE, code);
                (Echo::default(), code)
            }
        }
    }

    /// Decode the echo of the slave, failing on any rejected frame.
    pub fn decode(&self, buf: &[u8]) -> Result<Echo, Error> {
        match self.decode_response(buf) {
            (echo, ErrorCode::NoError) => Ok(echo),
            (_, code) => Err(Error::Frame(code)),
        }
    }
}

#[cfg(feature = "log")]
fn log_rejected(station: SlaveId, function: FunctionCode, code: ErrorCode) {
    if let ErrorCode::Exception(_) = code {
        log::debug!("Station {station} answered function {function} with an exception: {code}");
    } else {
        log::warn!("Failed to decode response of station {station} to function {function}: {code}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seal(frame: &mut [u8]) -> &[u8] {
        let n = frame.len() - 2;
        let crc = crc16(&frame[..n]);
        crc.write::<LittleEndian>(&mut frame[n..]);
        frame
    }

    mod read {
        use super::*;

        type Cmd = ReadHoldingRegisters<0x006B, 0x006D>;

        const RSP: &[u8] = &[
            0x11, // slave address
            0x03, // function code
            0x06, // byte count
            0x02, // 0x006B
            0x2B, //
            0x00, // 0x006C
            0x00, //
            0x00, // 0x006D
            0x64, //
            0xC8, // crc
            0xBA, // crc
        ];

        #[test]
        fn command_constants() {
            assert_eq!(Cmd::BASE_ADDRESS, 0x006B);
            assert_eq!(Cmd::NUMBER_OF_REGISTERS, 3);
            assert_eq!(Cmd::RECV_BUFFER_SIZE, 11);
            assert_eq!(ReadInputRegisters::<0, 124>::RECV_BUFFER_SIZE, 255);
            assert_eq!(Cmd::new(1).function(), FunctionCode::ReadHoldingRegisters);
            assert_eq!(
                ReadInputRegisters::<0, 0>::new(1).function(),
                FunctionCode::ReadInputRegisters
            );
        }

        #[test]
        fn default_station_is_zero() {
            assert_eq!(Cmd::default().station, 0);
            assert_eq!(Cmd::default().encode()[0], 0);
        }

        #[test]
        fn encode_read_request() {
            let cmd = Cmd::new(0x11);
            assert_eq!(
                cmd.encode(),
                [0x11, 0x03, 0x00, 0x6B, 0x00, 0x03, 0x76, 0x87]
            );

            let cmd = ReadInputRegisters::<0, 0>::new(1);
            assert_eq!(
                cmd.encode(),
                [0x01, 0x04, 0x00, 0x00, 0x00, 0x01, 0x31, 0xCA]
            );
        }

        #[test]
        fn encode_into_buffer() {
            let cmd = Cmd::new(0x11);
            let buf = &mut [0xFF; 10];
            assert_eq!(cmd.encode_request(buf), Ok(8));
            assert_eq!(&buf[..8], &cmd.encode());
            assert_eq!(&buf[8..], &[0xFF, 0xFF]);

            assert_eq!(cmd.encode_request(&mut [0; 7]), Err(Error::BufferSize));
        }

        #[test]
        fn decode_response() {
            assert_eq!(RSP.len(), Cmd::RECV_BUFFER_SIZE);
            let (view, code) = Cmd::new(0x11).decode_response(RSP);
            assert_eq!(code, ErrorCode::NoError);
            assert!(view.is_valid());
            assert_eq!(view.get::<0x006B>(), 0x022B);
            assert_eq!(view.get::<0x006C>(), 0x0000);
            assert_eq!(view.get::<0x006D>(), 0x0064);
            assert_eq!(view.get_as::<0x006B, u32>(), 0x022B_0000);
        }

        #[test]
        fn decode_swapped_response() {
            let cmd = ReadRegisters::<Holding, 0x006B, 0x006D, true>::new(0x11);
            let view = cmd.decode(RSP).unwrap();
            assert_eq!(view.get::<0x006B>(), 0x2B02);
            assert_eq!(view.get::<0x006D>(), 0x6400);
        }

        #[test]
        fn rejected_response_yields_empty_view() {
            let (view, code) = Cmd::new(0x12).decode_response(RSP);
            assert_eq!(code, ErrorCode::MismatchHeader);
            assert!(!view.is_valid());
            assert_eq!(view.get::<0x006B>(), 0);

            let (view, code) = Cmd::new(0x11).decode_response(&RSP[..4]);
            assert_eq!(code, ErrorCode::MissingData);
            assert!(!view.is_valid());
        }

        #[test]
        fn decode_fails_with_code() {
            assert_eq!(
                Cmd::new(0x12).decode(RSP),
                Err(Error::Frame(ErrorCode::MismatchHeader))
            );

            let rsp = &mut [0x11, 0x83, 0x02, 0x00, 0x00];
            let err = Cmd::new(0x11).decode(seal(rsp)).unwrap_err();
            assert_eq!(err, Error::Frame(ErrorCode::Exception(0x02)));
            assert_eq!(err.code().exception(), Some(Exception::IllegalDataAddress));
        }

        #[test]
        fn input_command_rejects_holding_response() {
            let cmd = ReadInputRegisters::<0x006B, 0x006D>::new(0x11);
            assert_eq!(
                cmd.decode(RSP),
                Err(Error::Frame(ErrorCode::MismatchHeader))
            );
        }

        #[test]
        fn loopback() {
            let cmd = ReadInputRegisters::<0x0200, 0x0201>::new(0x33);
            let req = cmd.encode();
            let rsp = &mut [req[0], req[1], 0x04, 0x3F, 0x80, 0x00, 0x00, 0x00, 0x00];
            let view = cmd.decode(seal(rsp)).unwrap();
            assert_eq!(view.get_as::<0x0200, f32>(), 1.0);
        }
    }

    mod write {
        use super::*;

        #[test]
        fn command_constants() {
            assert_eq!(WriteRegister::<0x2222>::ADDRESS, 0x2222);
            assert_eq!(WriteCoil::<0x00AC>::RECV_BUFFER_SIZE, 8);
            assert_eq!(
                WriteRegister::<1>::new(1).function(),
                FunctionCode::WriteSingleRegister
            );
            assert_eq!(
                WriteCoil::<1>::new(1).function(),
                FunctionCode::WriteSingleCoil
            );
        }

        #[test]
        fn encode_write_register_request() {
            let cmd = WriteRegister::<0x2222>::new(0x12);
            assert_eq!(
                cmd.encode(0xABCD),
                [
                    0x12, // slave address
                    0x06, // function code
                    0x22, // addr
                    0x22, // addr
                    0xAB, // value
                    0xCD, // value
                    0x9F, // crc
                    0xBE, // crc
                ]
            );
        }

        #[test]
        fn encode_write_coil_request() {
            let cmd = WriteCoil::<0x00AC>::new(0x12);
            assert_eq!(
                cmd.encode(true),
                [0x12, 0x05, 0x00, 0xAC, 0xFF, 0x00, 0x4E, 0xB8]
            );
            let req = cmd.encode(false);
            assert_eq!(&req[4..6], &[0x00, 0x00]);
            assert_eq!(u16::read::<LittleEndian>(&req[6..]), crc16(&req[..6]));
        }

        #[test]
        fn encode_into_buffer() {
            let cmd = WriteCoil::<0x00AC>::new(0x12);
            let buf = &mut [0; 8];
            assert_eq!(cmd.encode_request(buf, true), Ok(8));
            assert_eq!(buf, &cmd.encode(true));
            assert_eq!(
                cmd.encode_request(&mut [0; 4], true),
                Err(Error::BufferSize)
            );
        }

        #[test]
        fn decode_echo() {
            let cmd = WriteRegister::<0x2222>::new(0x12);
            let rsp = &[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD, 0x9F, 0xBE];
            let (echo, code) = cmd.decode_response(rsp);
            assert_eq!(code, ErrorCode::NoError);
            assert_eq!(
                echo,
                Echo {
                    address: 0x2222,
                    value: 0xABCD
                }
            );
            assert_eq!(cmd.decode(rsp), Ok(echo));
        }

        #[test]
        fn decode_coil_echo() {
            let cmd = WriteCoil::<0x00AC>::new(0x12);
            let echo = cmd.decode(&cmd.encode(true)).unwrap();
            assert_eq!(echo.coil(), Ok(true));
        }

        #[test]
        fn rejected_echo_is_zeroed() {
            let cmd = WriteRegister::<0x2222>::new(0x12);
            let rsp = &[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD, 0x5F, 0xBE];
            let (echo, code) = cmd.decode_response(rsp);
            assert_eq!(code, ErrorCode::Checksum);
            assert_eq!(echo, Echo::default());
            assert_eq!(cmd.decode(rsp), Err(Error::Frame(ErrorCode::Checksum)));
        }

        #[test]
        fn coil_command_rejects_register_echo() {
            let cmd = WriteCoil::<0x2222>::new(0x12);
            let rsp = &[0x12, 0x06, 0x22, 0x22, 0xAB, 0xCD, 0x9F, 0xBE];
            assert_eq!(cmd.decode(rsp), Err(Error::Frame(ErrorCode::MismatchHeader)));
        }
    }
}
