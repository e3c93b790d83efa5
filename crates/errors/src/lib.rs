use thiserror::Error;

/// 调度核心产生的错误，均由调用方输入导致
#[derive(Debug, Error)]
pub enum ElevatorError {
    #[error("无效的楼层号: {floor}，楼层号必须是正整数")]
    InvalidFloor { floor: i64 },
    #[error("无效的运行方向: {0}")]
    InvalidDirection(String),
}

pub type ElevatorResult<T> = Result<T, ElevatorError>;

impl ElevatorError {
    pub fn invalid_floor(floor: i64) -> Self {
        Self::InvalidFloor { floor }
    }
    pub fn invalid_direction<S: Into<String>>(value: S) -> Self {
        Self::InvalidDirection(value.into())
    }
    pub fn user_message(&self) -> &str {
        match self {
            ElevatorError::InvalidFloor { .. } => "请提供大于 0 的整数楼层号",
            ElevatorError::InvalidDirection(_) => "可用的运行方向: Stationary、Up、Down",
        }
    }
}
