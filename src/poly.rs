pub mod approximate;
pub mod bounds;
pub mod factor;
pub mod sturm;
pub mod univariate;

use std::fmt::Display;

use smartstring::{LazyCompact, SmartString};

/// A polynomial variable. Only its name is stored, which is used for printing.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Variable {
    name: SmartString<LazyCompact>,
}

impl Variable {
    pub fn new(name: &str) -> Variable {
        Variable { name: name.into() }
    }
}

impl Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}
