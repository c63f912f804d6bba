// Framing
pub const SYNC_BYTE: u8 = 0x80;
pub const SERVO_DEVICE_ID: u8 = 0x01;
pub const ADDRESSING_DEVICE_ID: u8 = 0x02;
pub const BLINK_BASE_NUMBER: u8 = 0x10;
pub const DATA_MASK: u8 = 0x7f;
pub const MAX_FRAME_LEN: usize = 6;

// Serial link
pub const DEFAULT_BAUD_RATE: u32 = 40_000;
pub const RECOMMENDED_MAX_BAUD_RATE: u32 = 40_000;

// Value ranges
pub const MAX_SERVO_ID: u8 = 127;
pub const MAX_SPEED: u8 = 127;
pub const MAX_POSITION_7BIT: u8 = 127;
pub const MIN_ABSOLUTE_POSITION: u16 = 500;
pub const MAX_ABSOLUTE_POSITION: u16 = 5500;
pub const MAX_RANGE: u8 = 31;
pub const MAX_BASE_NUMBER: u8 = 0x10;

// Parameter byte layout
pub const PARAM_ENABLED_BIT: u8 = 1 << 6;
pub const PARAM_REVERSE_BIT: u8 = 1 << 5;

// Defaults
pub const DEFAULT_SPEED: u8 = 0;
pub const DEFAULT_POSITION: u8 = 0;
pub const DEFAULT_ABSOLUTE_POSITION: u16 = 500;
pub const DEFAULT_NEUTRAL: u16 = 3000;
pub const DEFAULT_RANGE: u8 = 15;
pub const DEFAULT_BASE_NUMBER: u8 = 0x00;
