// ==========================================
// 钢板精整线排程引擎 - 矫直机状态
// ==========================================
// 单台串行资源，可用时间单调推进
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelerState {
    available_at: Option<NaiveDateTime>,
}

impl LevelerState {
    pub fn seeded(at: NaiveDateTime) -> Self {
        Self {
            available_at: Some(at),
        }
    }

    pub fn available_at(&self) -> Option<NaiveDateTime> {
        self.available_at
    }

    /// 最早可开工时间 = max(钢板就绪, 矫直机可用)
    pub fn earliest_start(&self, ready_at: NaiveDateTime) -> NaiveDateTime {
        match self.available_at {
            Some(at) if at > ready_at => at,
            _ => ready_at,
        }
    }

    pub(crate) fn advance(&mut self, to: NaiveDateTime) {
        if self.available_at.map_or(true, |at| to > at) {
            self.available_at = Some(to);
        }
    }
}
