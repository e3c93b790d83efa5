use std::fmt;
use std::str::FromStr;

use elevator_errors::{ElevatorError, ElevatorResult};
use serde::Serialize;

/// 楼层号，只能通过校验构造，保证为正整数
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct Floor(i64);

impl Floor {
    pub fn new(value: i64) -> ElevatorResult<Self> {
        if value <= 0 {
            return Err(ElevatorError::invalid_floor(value));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> i64 {
        self.0
    }

    pub fn distance_to(self, other: Floor) -> u64 {
        self.0.abs_diff(other.0)
    }
}

impl TryFrom<i64> for Floor {
    type Error = ElevatorError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Floor> for i64 {
    fn from(floor: Floor) -> Self {
        floor.0
    }
}

impl fmt::Display for Floor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 电梯当前运行方向，由调用方每次查询时提供
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TravelDirection {
    #[default]
    Stationary,
    Up,
    Down,
}

impl TravelDirection {
    /// 反方向；静止状态没有反方向
    pub fn opposite(self) -> Option<Self> {
        match self {
            TravelDirection::Stationary => None,
            TravelDirection::Up => Some(TravelDirection::Down),
            TravelDirection::Down => Some(TravelDirection::Up),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelDirection::Stationary => "Stationary",
            TravelDirection::Up => "Up",
            TravelDirection::Down => "Down",
        }
    }
}

impl FromStr for TravelDirection {
    type Err = ElevatorError;

    // 同时接受名称（不区分大小写）和数值 0/1/2
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "stationary" | "0" => Ok(TravelDirection::Stationary),
            "up" | "1" => Ok(TravelDirection::Up),
            "down" | "2" => Ok(TravelDirection::Down),
            _ => Err(ElevatorError::invalid_direction(s)),
        }
    }
}

impl fmt::Display for TravelDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
