// ==========================================
// 钢板精整线排程引擎 - 钢板领域模型
// ==========================================
// 职责: 钢板输入属性 + 逐工序排程结果
// 红线: 排程结果只增不改（字段只会被填充，不会被回写）
// ==========================================

use crate::domain::types::{Route, ScheduleStatus, Stage};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// PlateRecord - 钢板输入记录
// ==========================================
// 由导入层校验后生成，引擎只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateRecord {
    pub plate_index: usize,           // 输入序号（稳定标识）
    pub plate_no: Option<String>,     // 钢板号（可选，原样透传）
    pub arrival_at: NaiveDateTime,    // 轧制完成/到达时间
    pub thickness_mm: f64,            // 厚度 (mm)，> 0
    pub edge_condition: String,       // 边部状态
    pub ut_marker: Option<String>,    // 探伤要求（空白视为无）
    pub supply_condition: String,     // 交货状态
}

impl PlateRecord {
    /// 是否需要切边
    ///
    /// 边部状态包含 `marker`（区分大小写）即需要切边
    pub fn requires_trimming(&self, marker: &str) -> bool {
        self.edge_condition.contains(marker)
    }

    /// 是否需要探伤
    ///
    /// 唯一判定口径: 探伤字段存在且去空白后非空
    pub fn requires_ut(&self) -> bool {
        self.ut_marker
            .as_deref()
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }

    /// 交货状态是否为常化（去空白后不区分大小写完全相等）
    pub fn is_normalized_supply(&self, marker: &str) -> bool {
        self.supply_condition.trim().eq_ignore_ascii_case(marker.trim())
    }
}

// ==========================================
// StageWindow - 工序时间窗
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl StageWindow {
    pub fn new(start: NaiveDateTime, duration: Duration) -> Self {
        Self {
            start,
            end: start + duration,
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// 两个时间窗是否重叠（首尾相接不算重叠）
    pub fn overlaps(&self, other: &StageWindow) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// 共享资源工序的分配结果（切边机 / 探伤仪）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceAssignment {
    pub resource_id: String,
    pub window: StageWindow,
}

/// 常化装炉结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FurnaceAssignment {
    pub furnace_id: String,
    pub batch_no: usize,
    pub window: StageWindow,
}

// ==========================================
// PlateSchedule - 单块钢板排程结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlateSchedule {
    pub plate_index: usize,

    // ===== 无限资源工序 =====
    pub cooling: StageWindow,
    pub shearing: Option<StageWindow>,

    // ===== 共享资源工序 =====
    pub trimming: Option<ResourceAssignment>,
    pub ut: Option<ResourceAssignment>,

    pub punching: StageWindow,
    pub inspection: StageWindow,

    // ===== 常化路径 =====
    pub norm_ready_at: Option<NaiveDateTime>,
    pub normalizing: Option<FurnaceAssignment>,
    pub leveling: Option<StageWindow>,
    pub final_inspection: Option<StageWindow>,

    // ===== 完工 =====
    pub finish_at: Option<NaiveDateTime>,
    pub status: ScheduleStatus,
}

impl PlateSchedule {
    /// 已执行工序的时间窗（按工艺顺序）
    pub fn stage_windows(&self) -> Vec<(Stage, StageWindow)> {
        let mut windows = vec![(Stage::Cooling, self.cooling)];
        if let Some(w) = self.shearing {
            windows.push((Stage::Shearing, w));
        }
        if let Some(a) = &self.trimming {
            windows.push((Stage::Trimming, a.window));
        }
        if let Some(a) = &self.ut {
            windows.push((Stage::Ultrasonic, a.window));
        }
        windows.push((Stage::Punching, self.punching));
        windows.push((Stage::Inspection, self.inspection));
        if let Some(a) = &self.normalizing {
            windows.push((Stage::Normalizing, a.window));
        }
        if let Some(w) = self.leveling {
            windows.push((Stage::Levelling, w));
        }
        if let Some(w) = self.final_inspection {
            windows.push((Stage::FinalInspection, w));
        }
        windows
    }

    pub fn route(&self) -> Option<Route> {
        match self.status {
            ScheduleStatus::Completed { route } => Some(route),
            _ => None,
        }
    }
}

/// 钢板输入 + 排程结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledPlate {
    pub record: PlateRecord,
    pub schedule: PlateSchedule,
}
