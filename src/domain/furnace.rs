// ==========================================
// 钢板精整线排程引擎 - 常化炉领域模型
// ==========================================
// 用途: 炉次装炉、炉子可用时间、轮换指针
// 红线: 炉次总厚度不得超过炉容量
// ==========================================

use crate::domain::plate::StageWindow;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// FurnaceUnit - 单座常化炉
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnaceUnit {
    pub furnace_id: String,
    pub capacity_mm: f64,            // 装炉容量（与厚度同单位）
    pub available_at: NaiveDateTime, // 下一可接炉时间（含冷却间隔）
}

// ==========================================
// FurnaceState - 炉群状态 + 轮换指针
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FurnaceState {
    furnaces: Vec<FurnaceUnit>,
    turn: usize,
}

impl FurnaceState {
    /// 创建炉群状态，轮换从第一座炉开始
    ///
    /// `specs` 为空时返回 None
    pub fn new(specs: &[(String, f64)], initial_available_at: NaiveDateTime) -> Option<Self> {
        if specs.is_empty() {
            return None;
        }
        Some(Self {
            furnaces: specs
                .iter()
                .map(|(id, capacity)| FurnaceUnit {
                    furnace_id: id.clone(),
                    capacity_mm: *capacity,
                    available_at: initial_available_at,
                })
                .collect(),
            turn: 0,
        })
    }

    pub fn furnaces(&self) -> &[FurnaceUnit] {
        &self.furnaces
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn len(&self) -> usize {
        self.furnaces.len()
    }

    pub fn unit(&self, idx: usize) -> &FurnaceUnit {
        &self.furnaces[idx]
    }

    /// 从当班炉开始的轮换顺序
    pub fn rotation(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.furnaces.len();
        (0..n).map(move |offset| (self.turn + offset) % n)
    }

    /// 装炉完成: 推进炉子可用时间，轮换到下一座炉
    pub(crate) fn commit_batch(&mut self, idx: usize, next_available_at: NaiveDateTime) {
        let unit = &mut self.furnaces[idx];
        if next_available_at > unit.available_at {
            unit.available_at = next_available_at;
        }
        self.turn = (idx + 1) % self.furnaces.len();
    }
}

// ==========================================
// Trait: CapacityConstraint
// ==========================================
// 用途: 组炉时的容量门控
pub trait CapacityConstraint {
    /// 检查是否可再装入指定厚度
    fn can_add(&self, thickness_mm: f64) -> bool;

    /// 剩余容量
    fn remaining_mm(&self) -> f64;
}

/// 组炉过程中的装炉量
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FurnaceLoad {
    pub capacity_mm: f64,
    pub used_mm: f64,
}

impl FurnaceLoad {
    pub fn empty(capacity_mm: f64) -> Self {
        Self {
            capacity_mm,
            used_mm: 0.0,
        }
    }

    pub fn add(&mut self, thickness_mm: f64) {
        self.used_mm += thickness_mm;
    }
}

impl CapacityConstraint for FurnaceLoad {
    fn can_add(&self, thickness_mm: f64) -> bool {
        self.used_mm + thickness_mm <= self.capacity_mm
    }

    fn remaining_mm(&self) -> f64 {
        (self.capacity_mm - self.used_mm).max(0.0)
    }
}

// ==========================================
// FurnaceBatch - 炉次
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnaceBatch {
    pub batch_no: usize,               // 炉次号（形成顺序，从 1 开始）
    pub furnace_id: String,
    pub members: Vec<usize>,           // 钢板输入序号（装炉顺序）
    pub total_thickness_mm: f64,
    pub capacity_mm: f64,
    pub window: StageWindow,
}

impl FurnaceBatch {
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity_mm <= 0.0 {
            return 0.0;
        }
        self.total_thickness_mm / self.capacity_mm
    }
}
