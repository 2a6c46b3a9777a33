// ==========================================
// 钢板精整线排程引擎 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工序 (Stage)
// ==========================================
// 顺序即工艺路线顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Cooling,         // 冷却
    Shearing,        // 剪切
    Trimming,        // 切边
    Ultrasonic,      // 探伤
    Punching,        // 打号
    Inspection,      // 检查
    Normalizing,     // 常化
    Levelling,       // 矫直
    FinalInspection, // 终检
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Cooling => write!(f, "COOLING"),
            Stage::Shearing => write!(f, "SHEARING"),
            Stage::Trimming => write!(f, "TRIMMING"),
            Stage::Ultrasonic => write!(f, "ULTRASONIC"),
            Stage::Punching => write!(f, "PUNCHING"),
            Stage::Inspection => write!(f, "INSPECTION"),
            Stage::Normalizing => write!(f, "NORMALIZING"),
            Stage::Levelling => write!(f, "LEVELLING"),
            Stage::FinalInspection => write!(f, "FINAL_INSPECTION"),
        }
    }
}

// ==========================================
// 完工路径 (Route)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Route {
    Direct,     // 检查后直接完工
    Normalized, // 常化 + 矫直 + 终检后完工
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Direct => write!(f, "DIRECT"),
            Route::Normalized => write!(f, "NORMALIZED"),
        }
    }
}

// ==========================================
// 无法排程原因 (Unschedulable Reason)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnschedulableReason {
    /// 单板厚度超过所有炉子的容量，任何炉都装不下
    ExceedsAllFurnaces {
        thickness_mm: f64,
        max_capacity_mm: f64,
    },
    /// 严格轮换下当班炉一块都装不下，组炉终止；该板本可装入其他炉
    RotationHalted {
        thickness_mm: f64,
        furnace_id: String,
        capacity_mm: f64,
    },
}

impl fmt::Display for UnschedulableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnschedulableReason::ExceedsAllFurnaces {
                thickness_mm,
                max_capacity_mm,
            } => write!(
                f,
                "EXCEEDS_ALL_FURNACES: thickness_mm={}, max_capacity_mm={}",
                thickness_mm, max_capacity_mm
            ),
            UnschedulableReason::RotationHalted {
                thickness_mm,
                furnace_id,
                capacity_mm,
            } => write!(
                f,
                "ROTATION_HALTED: thickness_mm={}, furnace={}, capacity_mm={}",
                thickness_mm, furnace_id, capacity_mm
            ),
        }
    }
}

// ==========================================
// 排程状态 (Schedule Status)
// ==========================================
// 红线: finish_at 有值 <=> Completed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleStatus {
    /// 等待常化组炉（仅存在于流水线与组炉之间，最终结果中不会出现）
    AwaitingNormalizing,
    Completed { route: Route },
    Unschedulable { reason: UnschedulableReason },
}

impl ScheduleStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, ScheduleStatus::Completed { .. })
    }

    pub fn is_unschedulable(&self) -> bool {
        matches!(self, ScheduleStatus::Unschedulable { .. })
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleStatus::AwaitingNormalizing => write!(f, "AWAITING_NORMALIZING"),
            ScheduleStatus::Completed { route } => write!(f, "COMPLETED_{}", route),
            ScheduleStatus::Unschedulable { reason } => write!(f, "UNSCHEDULABLE ({})", reason),
        }
    }
}

// ==========================================
// 矫直排队顺序 (Leveler Order)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelerOrder {
    /// 按组炉顺序（炉次形成顺序，炉内按装炉顺序）
    #[default]
    BatchOrder,
    /// 按钢板输入顺序
    InputOrder,
    /// 按出炉时间升序（同出炉时间保持组炉顺序）
    FurnaceEndTime,
}

impl fmt::Display for LevelerOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelerOrder::BatchOrder => write!(f, "BATCH_ORDER"),
            LevelerOrder::InputOrder => write!(f, "INPUT_ORDER"),
            LevelerOrder::FurnaceEndTime => write!(f, "FURNACE_END_TIME"),
        }
    }
}
