use tracing::{debug, trace, warn};

use crate::{
    constants::*,
    error::Result,
    frame::{self, Frame},
    transport::ByteSink,
    types::{self, Command, ServoConfig},
};

/// Drives a Pololu serial servo controller over a borrowed byte sink.
///
/// The controller never owns, closes, or reconfigures the transport after
/// construction. Every operation validates fully, then writes one frame.
/// There is no internal locking; share a port across threads through
/// `Arc<parking_lot::Mutex<_>>`.
pub struct Controller<'a, T: ByteSink + ?Sized> {
    transport: &'a mut T,
    baud_rate: u32,
}

impl<'a, T: ByteSink + ?Sized> Controller<'a, T> {
    pub fn new(transport: &'a mut T) -> Result<Self> {
        Self::with_baud_rate(transport, DEFAULT_BAUD_RATE)
    }

    /// Initializes the transport at `baud_rate`. Rates above 40000 are
    /// allowed but the vendor reports controller faults past that point.
    pub fn with_baud_rate(transport: &'a mut T, baud_rate: u32) -> Result<Self> {
        if baud_rate > RECOMMENDED_MAX_BAUD_RATE {
            warn!(
                baud_rate,
                recommended = RECOMMENDED_MAX_BAUD_RATE,
                "baud rate above recommended maximum"
            );
        }
        transport.initialize(baud_rate)?;
        debug!(baud_rate, "servo controller initialized");
        Ok(Controller {
            transport,
            baud_rate,
        })
    }

    pub fn baud_rate(&self) -> u32 {
        self.baud_rate
    }

    pub fn is_valid_servo_id(id: u8) -> bool {
        types::is_valid_servo_id(id)
    }

    /// Speed 0 is unlimited; 1 is slowest and 127 the fastest limited speed.
    pub fn set_speed(&mut self, servo_id: u8, speed: u8) -> Result<()> {
        self.send_frame(frame::encode_set_speed(servo_id, speed)?)
    }

    /// Relative 8-bit position, adjusted by the servo's neutral and
    /// direction settings.
    pub fn set_position(&mut self, servo_id: u8, position: u8) -> Result<()> {
        self.send_frame(frame::encode_set_position(servo_id, position)?)
    }

    pub fn set_position_7bit(&mut self, servo_id: u8, position: u8) -> Result<()> {
        self.send_frame(frame::encode_set_position_7bit(servo_id, position)?)
    }

    /// Drives the pulse generator directly, 500-5500, ignoring neutral and
    /// direction.
    pub fn set_position_absolute(&mut self, servo_id: u8, position: u16) -> Result<()> {
        self.send_frame(frame::encode_set_position_absolute(servo_id, position)?)
    }

    pub fn set_neutral(&mut self, servo_id: u8, position: u16) -> Result<()> {
        self.send_frame(frame::encode_set_neutral(servo_id, position)?)
    }

    pub fn configure_servo(&mut self, servo_id: u8, config: ServoConfig) -> Result<()> {
        self.send_frame(frame::encode_configure_servo(servo_id, config)?)
    }

    /// Reprograms the servo-number offset of every controller on the bus.
    /// Only one controller should be attached, and it must be power-cycled
    /// before the new base takes effect.
    pub fn set_servo_number_base_number(&mut self, base_number: u8) -> Result<()> {
        self.send_frame(frame::encode_set_base_number(base_number)?)
    }

    /// Makes every controller on the bus blink its base number on the
    /// green LED.
    pub fn blink_servo_number_base_number(&mut self) -> Result<()> {
        self.send_frame(frame::encode_blink_base_number())
    }

    /// Writes a frame built by one of the `encode_*` functions.
    pub fn send_frame(&mut self, frame: Frame) -> Result<()> {
        let command = frame.command().map_or("addressing", Command::name);
        trace!(command, frame = %frame, "writing frame");
        self.transport.write_frame(frame.as_bytes())?;
        Ok(())
    }
}
