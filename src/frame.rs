//! Frame construction for every controller command.
//!
//! Each `encode_*` function validates its arguments and returns a complete
//! [`Frame`]. Nothing here touches a transport, so a frame either exists in
//! full or not at all.

use std::fmt;

use crate::constants::*;
use crate::error::{Result, ServoError};
use crate::types::{is_valid_servo_id, Command, ServoConfig};

/// One complete command as it appears on the wire.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Frame {
    bytes: [u8; MAX_FRAME_LEN],
    len: usize,
    command: Option<Command>,
}

impl Frame {
    fn new(command: Option<Command>, head: &[u8], data: &[u8]) -> Self {
        let mut bytes = [0u8; MAX_FRAME_LEN];
        bytes[..head.len()].copy_from_slice(head);
        bytes[head.len()..head.len() + data.len()].copy_from_slice(data);
        Frame {
            bytes,
            len: head.len() + data.len(),
            command,
        }
    }

    fn servo(command: Command, servo_id: u8, data: &[u8]) -> Self {
        Frame::new(
            Some(command),
            &[SYNC_BYTE, SERVO_DEVICE_ID, command as u8, servo_id],
            data,
        )
    }

    fn addressing(value: u8) -> Self {
        Frame::new(None, &[SYNC_BYTE, ADDRESSING_DEVICE_ID], &[value])
    }

    /// Servo command carried by the frame; `None` for the controller
    /// addressing frames (base number set and blink).
    pub fn command(&self) -> Option<Command> {
        self.command
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame({:02x?})", self.as_bytes())
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.as_bytes().iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

fn check_servo_id(servo_id: u8) -> Result<()> {
    if is_valid_servo_id(servo_id) {
        Ok(())
    } else {
        Err(ServoError::InvalidServoId(servo_id))
    }
}

fn check_absolute_position(position: u16) -> Result<()> {
    if (MIN_ABSOLUTE_POSITION..=MAX_ABSOLUTE_POSITION).contains(&position) {
        Ok(())
    } else {
        Err(ServoError::InvalidPosition {
            position,
            min: MIN_ABSOLUTE_POSITION,
            max: MAX_ABSOLUTE_POSITION,
        })
    }
}

// High part first, seven bits per byte.
fn split_14bit(value: u16) -> [u8; 2] {
    [((value >> 7) as u8) & DATA_MASK, (value as u8) & DATA_MASK]
}

pub fn encode_set_speed(servo_id: u8, speed: u8) -> Result<Frame> {
    check_servo_id(servo_id)?;
    if speed > MAX_SPEED {
        return Err(ServoError::InvalidSpeed(speed));
    }
    Ok(Frame::servo(Command::SetSpeed, servo_id, &[speed]))
}

/// 8-bit relative position. Bit 7 of `position` travels in the first data
/// byte, the low seven bits in the second.
pub fn encode_set_position(servo_id: u8, position: u8) -> Result<Frame> {
    check_servo_id(servo_id)?;
    let data = [(position >> 7) & 0x01, position & DATA_MASK];
    Ok(Frame::servo(Command::SetPosition8Bit, servo_id, &data))
}

pub fn encode_set_position_7bit(servo_id: u8, position: u8) -> Result<Frame> {
    check_servo_id(servo_id)?;
    if position > MAX_POSITION_7BIT {
        return Err(ServoError::InvalidPosition {
            position: position.into(),
            min: 0,
            max: MAX_POSITION_7BIT.into(),
        });
    }
    Ok(Frame::servo(Command::SetPosition7Bit, servo_id, &[position]))
}

pub fn encode_set_position_absolute(servo_id: u8, position: u16) -> Result<Frame> {
    check_servo_id(servo_id)?;
    check_absolute_position(position)?;
    Ok(Frame::servo(
        Command::SetPositionAbsolute,
        servo_id,
        &split_14bit(position),
    ))
}

pub fn encode_set_neutral(servo_id: u8, position: u16) -> Result<Frame> {
    check_servo_id(servo_id)?;
    check_absolute_position(position)?;
    Ok(Frame::servo(Command::SetNeutral, servo_id, &split_14bit(position)))
}

pub fn encode_configure_servo(servo_id: u8, config: ServoConfig) -> Result<Frame> {
    check_servo_id(servo_id)?;
    if config.range > MAX_RANGE {
        return Err(ServoError::InvalidRange(config.range));
    }
    Ok(Frame::servo(Command::SetParameters, servo_id, &[config.packed()]))
}

/// Accepts 0x00 through 0x10 inclusive. The vendor manual gives 0-15 in
/// prose but 0x10 in its examples; the wider range is kept.
pub fn encode_set_base_number(base_number: u8) -> Result<Frame> {
    if base_number > MAX_BASE_NUMBER {
        return Err(ServoError::InvalidBaseNumber(base_number));
    }
    Ok(Frame::addressing(base_number))
}

pub fn encode_blink_base_number() -> Frame {
    Frame::addressing(BLINK_BASE_NUMBER)
}
