use std::fmt;

use serde::{Deserialize, Serialize};

/// One coordinate value of a dimension index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Coord {
    Num(f64),
    Label(String),
}

impl Coord {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            Coord::Num(_) => None,
            Coord::Label(label) => Some(label),
        }
    }
}

impl From<f64> for Coord {
    fn from(value: f64) -> Self {
        Coord::Num(value)
    }
}

impl From<f32> for Coord {
    fn from(value: f32) -> Self {
        Coord::Num(value as f64)
    }
}

impl From<i32> for Coord {
    fn from(value: i32) -> Self {
        Coord::Num(value as f64)
    }
}

impl From<i64> for Coord {
    fn from(value: i64) -> Self {
        Coord::Num(value as f64)
    }
}

impl From<&str> for Coord {
    fn from(value: &str) -> Self {
        Coord::Label(value.to_string())
    }
}

impl From<String> for Coord {
    fn from(value: String) -> Self {
        Coord::Label(value)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coord::Num(value) => write!(f, "{}", value),
            Coord::Label(label) => write!(f, "{:?}", label),
        }
    }
}
