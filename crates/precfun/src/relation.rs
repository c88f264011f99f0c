//! Cells of a precedence matrix.

use std::fmt;

/// The precedence relation between a row symbol and a column symbol.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum Relation {
    /// The row yields precedence to the column (`<`).
    Less,
    /// The row takes precedence over the column (`>`).
    Greater,
    /// Both sides have the same precedence (`=`).
    Equal,
    /// No valid relation between the two symbols.
    #[default]
    None,
}

impl Relation {
    /// Parse a relation from its one-character notation.
    ///
    /// `x` is accepted as an alias of `.`.
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '<' => Some(Self::Less),
            '>' => Some(Self::Greater),
            '=' => Some(Self::Equal),
            '.' | 'x' => Some(Self::None),
            _ => None,
        }
    }

    /// Return whether `f(row)` compared with `g(col)` reproduces this relation.
    ///
    /// `Relation::None` is satisfied by any pair of values.
    pub fn holds(self, f: u32, g: u32) -> bool {
        match self {
            Self::Less => f < g,
            Self::Greater => f > g,
            Self::Equal => f == g,
            Self::None => true,
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Less => "<",
            Self::Greater => ">",
            Self::Equal => "=",
            Self::None => ".",
        })
    }
}
