//! Joystick decoding into a per-tick direction and button.
//!
//! - **Direction:** every available analog axis is read. Axis 0 is horizontal
//!   (negative = LEFT, positive = RIGHT) and axis 1 is vertical (negative = UP,
//!   positive = DOWN). Any other axis is ignored. There is no deadzone, so any
//!   non-zero reading sets a flag. Flags from both axes are OR'd together, which
//!   is how diagonal input is represented.
//!
//! - **Button:** buttons are scanned in ascending index order and the first one
//!   held down is reported. Simultaneous presses are not merged; the lowest
//!   index wins.
//!
//! Both values live for exactly one tick. Nothing here keeps state between
//! frames; the device (or a `JoystickSnapshot`) is the only source of truth.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

const HORIZONTAL_AXIS: u32 = 0;
const VERTICAL_AXIS: u32 = 1;

/// Read-only view of a joystick's current axis and button state.
pub trait JoystickState {
    fn num_axes(&self) -> u32;
    fn axis(&self, index: u32) -> i16;
    fn num_buttons(&self) -> u32;
    fn button(&self, index: u32) -> bool;
}

/// Axis and button state captured as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoystickSnapshot {
    pub axes: Vec<i16>,
    pub buttons: Vec<bool>,
}

impl JoystickSnapshot {
    pub fn new(axes: Vec<i16>, buttons: Vec<bool>) -> Self {
        Self { axes, buttons }
    }

    /// Copy the current state out of any joystick source.
    pub fn capture(source: &impl JoystickState) -> Self {
        let axes = (0..source.num_axes()).map(|i| source.axis(i)).collect();
        let buttons = (0..source.num_buttons()).map(|i| source.button(i)).collect();
        Self { axes, buttons }
    }
}

impl JoystickState for JoystickSnapshot {
    fn num_axes(&self) -> u32 {
        self.axes.len() as u32
    }

    fn axis(&self, index: u32) -> i16 {
        self.axes.get(index as usize).copied().unwrap_or(0)
    }

    fn num_buttons(&self) -> u32 {
        self.buttons.len() as u32
    }

    fn button(&self, index: u32) -> bool {
        self.buttons.get(index as usize).copied().unwrap_or(false)
    }
}

/// OR-combinable set of movement flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Direction(u8);

impl Direction {
    pub const NONE: Direction = Direction(0);
    pub const UP: Direction = Direction(1);
    pub const DOWN: Direction = Direction(2);
    pub const LEFT: Direction = Direction(4);
    pub const RIGHT: Direction = Direction(8);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn contains(self, other: Direction) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }

    pub fn up(self) -> bool {
        self.contains(Self::UP)
    }

    pub fn down(self) -> bool {
        self.contains(Self::DOWN)
    }

    pub fn left(self) -> bool {
        self.contains(Self::LEFT)
    }

    pub fn right(self) -> bool {
        self.contains(Self::RIGHT)
    }
}

impl BitOr for Direction {
    type Output = Direction;

    fn bitor(self, rhs: Direction) -> Direction {
        Direction(self.0 | rhs.0)
    }
}

impl BitOrAssign for Direction {
    fn bitor_assign(&mut self, rhs: Direction) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let names = [
            (Self::UP, "UP"),
            (Self::DOWN, "DOWN"),
            (Self::LEFT, "LEFT"),
            (Self::RIGHT, "RIGHT"),
        ];
        let mut first = true;
        for (flag, name) in names {
            if self.contains(flag) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Named joystick buttons. Indices follow the pad layout the game was built
/// around; anything else is carried through as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    B,
    A,
    Select,
    Start,
    Other(u32),
}

impl Button {
    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Self::B,
            1 => Self::A,
            8 => Self::Select,
            9 => Self::Start,
            other => Self::Other(other),
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Self::B => 0,
            Self::A => 1,
            Self::Select => 8,
            Self::Start => 9,
            Self::Other(index) => index,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::A => "A",
            Self::Select => "SELECT",
            Self::Start => "START",
            Self::Other(_) => "NOT A BUTTON",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn decode_direction(joystick: &impl JoystickState) -> Direction {
    let mut direction = Direction::NONE;
    for i in 0..joystick.num_axes() {
        let value = joystick.axis(i);
        if value == 0 {
            continue;
        }
        match i {
            VERTICAL_AXIS => {
                direction |= if value < 0 {
                    Direction::UP
                } else {
                    Direction::DOWN
                };
            }
            HORIZONTAL_AXIS => {
                direction |= if value < 0 {
                    Direction::LEFT
                } else {
                    Direction::RIGHT
                };
            }
            _ => {}
        }
    }
    direction
}

/// Index of the lowest-numbered pressed button, if any.
pub fn decode_button(joystick: &impl JoystickState) -> Option<u32> {
    (0..joystick.num_buttons()).find(|&i| joystick.button(i))
}

/// Integer form of `decode_button`, with -1 meaning "nothing pressed".
pub fn button_code(joystick: &impl JoystickState) -> i32 {
    decode_button(joystick).map_or(-1, |i| i as i32)
}
