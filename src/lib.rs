mod constants;
mod controller;
mod error;
mod frame;
mod transport;
mod types;

pub use controller::Controller;
pub use error::{Result, ServoError};
pub use frame::{
    encode_blink_base_number, encode_configure_servo, encode_set_base_number,
    encode_set_neutral, encode_set_position, encode_set_position_7bit,
    encode_set_position_absolute, encode_set_speed, Frame,
};
pub use transport::{open_serial, ByteSink, RecordingSink};
pub use types::{is_valid_servo_id, Command, ServoConfig};

// Re-export commonly used items
pub use constants::{
    DEFAULT_ABSOLUTE_POSITION, DEFAULT_BASE_NUMBER, DEFAULT_BAUD_RATE, DEFAULT_NEUTRAL,
    DEFAULT_POSITION, DEFAULT_RANGE, DEFAULT_SPEED, MAX_ABSOLUTE_POSITION, MAX_BASE_NUMBER,
    MAX_RANGE, MAX_SERVO_ID, MIN_ABSOLUTE_POSITION, RECOMMENDED_MAX_BAUD_RATE,
};
