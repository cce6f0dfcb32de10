use std::fmt;

pub mod quiz;
pub mod timer;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mode {
    Timed,
    Practice,
}

impl Mode {
    pub fn toggled(self) -> Mode {
        match self {
            Mode::Timed => Mode::Practice,
            Mode::Practice => Mode::Timed,
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Timed
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Timed => f.pad("Timed"),
            Mode::Practice => f.pad("Practice"),
        }
    }
}
