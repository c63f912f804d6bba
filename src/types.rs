use strum_macros::{EnumIter, IntoStaticStr};

use crate::constants::{DEFAULT_RANGE, MAX_SERVO_ID, PARAM_ENABLED_BIT, PARAM_REVERSE_BIT};

/// Command bytes understood by the controller in Pololu mode.
#[derive(Debug, EnumIter, IntoStaticStr, Clone, Copy, Eq, PartialEq, Hash)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    SetParameters = 0x00,
    SetSpeed = 0x01,
    #[strum(serialize = "set_position_7bit")]
    SetPosition7Bit = 0x02,
    #[strum(serialize = "set_position_8bit")]
    SetPosition8Bit = 0x03,
    SetPositionAbsolute = 0x04,
    SetNeutral = 0x05,
}

impl Command {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Per-servo settings sent with the "set parameters" command.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct ServoConfig {
    pub enabled: bool,
    /// Direction used by the relative position commands. Absolute
    /// positioning ignores it.
    pub forward_direction: bool,
    /// Pulse-length scaling, 0-31. 0 pins the servo at neutral; 15 gives
    /// roughly 180 degrees for 8-bit commands.
    pub range: u8,
}

impl Default for ServoConfig {
    fn default() -> Self {
        ServoConfig {
            enabled: true,
            forward_direction: true,
            range: DEFAULT_RANGE,
        }
    }
}

impl ServoConfig {
    /// Packs the settings into the parameter data byte. `range` is masked to
    /// its five bits; callers validate it beforehand.
    pub(crate) fn packed(&self) -> u8 {
        let mut byte = self.range & 0x1f;
        if self.enabled {
            byte |= PARAM_ENABLED_BIT;
        }
        if !self.forward_direction {
            byte |= PARAM_REVERSE_BIT;
        }
        byte
    }
}

pub const fn is_valid_servo_id(id: u8) -> bool {
    id <= MAX_SERVO_ID
}
