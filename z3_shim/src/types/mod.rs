pub mod err;

use crate::sys::{self};

/// A three-valued truth value, as returned by solver checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Lbool {
    False,
    Undef,
    True,
}

impl From<sys::Z3_lbool> for Lbool {
    fn from(raw: sys::Z3_lbool) -> Self {
        match raw {
            sys::Z3_L_TRUE => Lbool::True,
            sys::Z3_L_FALSE => Lbool::False,
            _ => Lbool::Undef,
        }
    }
}

impl std::fmt::Display for Lbool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Lbool::True => write!(f, "sat"),
            Lbool::False => write!(f, "unsat"),
            Lbool::Undef => write!(f, "unknown"),
        }
    }
}
