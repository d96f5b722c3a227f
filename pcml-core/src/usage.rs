//! Calling direction of a program parameter.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Direction in which a field's value flows across a program call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Usage {
    /// Value is passed into the program.
    Input,
    /// Value is returned by the program.
    Output,
    /// Value flows both ways.
    #[default]
    InputOutput,
}

impl Usage {
    /// Returns the descriptor literal for this usage.
    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
            Self::InputOutput => "inputoutput",
        }
    }

    /// Resolves the usage attribute of a descriptor field.
    ///
    /// Only the exact literals `input` and `output` select a single direction;
    /// an absent attribute or any other literal means [`Usage::InputOutput`].
    #[must_use]
    pub fn resolve(literal: Option<&str>) -> Self {
        match literal {
            Some("input") => Self::Input,
            Some("output") => Self::Output,
            _ => Self::InputOutput,
        }
    }

    /// Returns true if the value is sent to the program.
    #[must_use]
    pub const fn is_input(&self) -> bool {
        matches!(self, Self::Input | Self::InputOutput)
    }

    /// Returns true if the value is read back from the program.
    #[must_use]
    pub const fn is_output(&self) -> bool {
        matches!(self, Self::Output | Self::InputOutput)
    }
}

impl fmt::Display for Usage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

impl FromStr for Usage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "input" => Ok(Self::Input),
            "output" => Ok(Self::Output),
            "inputoutput" => Ok(Self::InputOutput),
            _ => Err(Error::UnknownUsage {
                value: s.to_string(),
            }),
        }
    }
}
