// ==========================================
// 钢板精整线排程引擎 - 常化组炉引擎
// ==========================================
// 职责: 将待常化钢板按就绪时间装入容量受限的常化炉，炉子轮换
// 输入: 常化候选钢板 + 炉群状态
// 输出: 炉次列表 + 装不下的钢板
// ==========================================
// 规则:
// 1) 待装队列按就绪时间升序（同时刻按输入顺序）
// 2) 当班炉对剩余队列整体扫描，能装就装（先到先装，不做最优装箱）
// 3) 开炉 = max(炉子可用, 炉内最晚就绪)；出炉 = 开炉 + 周期；炉子可用 = 出炉 + 冷却
// 4) 当班炉一块都装不下时终止（可配置让其余炉子先尝试）
// ==========================================

use crate::config::line_config::NormalizingConfig;
use crate::domain::furnace::{
    CapacityConstraint, FurnaceBatch, FurnaceLoad, FurnaceState, FurnaceUnit,
};
use crate::domain::plate::StageWindow;
use crate::domain::types::UnschedulableReason;
use crate::engine::pipeline::NormalizingCandidate;
use chrono::Duration;
use tracing::{debug, instrument, warn};

/// 组炉结果
#[derive(Debug, Clone, Default)]
pub struct GroupingOutcome {
    pub batches: Vec<FurnaceBatch>,
    pub unschedulable: Vec<(usize, UnschedulableReason)>,
}

// ==========================================
// FurnaceBatchGrouper - 组炉引擎
// ==========================================
pub struct FurnaceBatchGrouper<'a> {
    config: &'a NormalizingConfig,
}

impl<'a> FurnaceBatchGrouper<'a> {
    pub fn new(config: &'a NormalizingConfig) -> Self {
        Self { config }
    }

    /// 执行组炉
    ///
    /// # 参数
    /// - `candidates`: 常化候选钢板（任意顺序）
    /// - `furnaces`: 炉群状态（可用时间与轮换指针会被修改）
    #[instrument(skip_all, fields(candidates = candidates.len()))]
    pub fn group(
        &self,
        mut candidates: Vec<NormalizingCandidate>,
        furnaces: &mut FurnaceState,
    ) -> GroupingOutcome {
        let cycle = Duration::minutes(self.config.cycle_minutes);
        let cooldown = Duration::minutes(self.config.cooldown_minutes);

        // 待装队列: 就绪时间升序，同时刻按输入顺序
        candidates.sort_by(|a, b| {
            a.ready_at
                .cmp(&b.ready_at)
                .then(a.plate_index.cmp(&b.plate_index))
        });
        let mut worklist = candidates;
        let mut outcome = GroupingOutcome::default();

        while !worklist.is_empty() {
            let Some((furnace_idx, picked)) = self.pick_batch(&worklist, furnaces) else {
                break;
            };

            let unit = furnaces.unit(furnace_idx);
            let start = picked
                .iter()
                .map(|&pos| worklist[pos].ready_at)
                .fold(unit.available_at, |acc, ready| acc.max(ready));
            let window = StageWindow::new(start, cycle);

            let batch = FurnaceBatch {
                batch_no: outcome.batches.len() + 1,
                furnace_id: unit.furnace_id.clone(),
                members: picked.iter().map(|&pos| worklist[pos].plate_index).collect(),
                total_thickness_mm: picked.iter().map(|&pos| worklist[pos].thickness_mm).sum(),
                capacity_mm: unit.capacity_mm,
                window,
            };

            debug!(
                batch_no = batch.batch_no,
                furnace = %batch.furnace_id,
                members = batch.members.len(),
                total_thickness_mm = batch.total_thickness_mm,
                start = %window.start,
                end = %window.end,
                "炉次形成"
            );

            furnaces.commit_batch(furnace_idx, window.end + cooldown);
            remove_positions(&mut worklist, &picked);
            outcome.batches.push(batch);
        }

        if !worklist.is_empty() {
            let halting = furnaces.unit(furnaces.turn());
            let max_capacity_mm = furnaces
                .furnaces()
                .iter()
                .map(|f| f.capacity_mm)
                .fold(f64::MIN, f64::max);
            warn!(
                remaining = worklist.len(),
                furnace = %halting.furnace_id,
                capacity_mm = halting.capacity_mm,
                max_capacity_mm,
                "组炉终止，剩余钢板无法装炉"
            );
            outcome.unschedulable = worklist
                .into_iter()
                .map(|c| (c.plate_index, unpackable_reason(&c, halting, max_capacity_mm)))
                .collect();
        }

        outcome
    }

    /// 选出本轮装炉的炉子与钢板（钢板以队列下标表示，升序）
    fn pick_batch(
        &self,
        worklist: &[NormalizingCandidate],
        furnaces: &FurnaceState,
    ) -> Option<(usize, Vec<usize>)> {
        let attempts: Vec<usize> = if self.config.furnace_fallback {
            furnaces.rotation().collect()
        } else {
            vec![furnaces.turn()]
        };

        attempts.into_iter().find_map(|idx| {
            let picked = first_fit(worklist, furnaces.unit(idx).capacity_mm);
            (!picked.is_empty()).then_some((idx, picked))
        })
    }
}

/// 剩余钢板的原因: 超过最大炉容量为装不下，否则为轮换终止
fn unpackable_reason(
    candidate: &NormalizingCandidate,
    halting: &FurnaceUnit,
    max_capacity_mm: f64,
) -> UnschedulableReason {
    if candidate.thickness_mm > max_capacity_mm {
        UnschedulableReason::ExceedsAllFurnaces {
            thickness_mm: candidate.thickness_mm,
            max_capacity_mm,
        }
    } else {
        UnschedulableReason::RotationHalted {
            thickness_mm: candidate.thickness_mm,
            furnace_id: halting.furnace_id.clone(),
            capacity_mm: halting.capacity_mm,
        }
    }
}

/// 按队列顺序能装就装
fn first_fit(worklist: &[NormalizingCandidate], capacity_mm: f64) -> Vec<usize> {
    let mut load = FurnaceLoad::empty(capacity_mm);
    let mut picked = Vec::new();
    for (pos, candidate) in worklist.iter().enumerate() {
        if load.can_add(candidate.thickness_mm) {
            load.add(candidate.thickness_mm);
            picked.push(pos);
        }
    }
    picked
}

/// 从队列中移除已装炉钢板（`positions` 升序）
fn remove_positions(worklist: &mut Vec<NormalizingCandidate>, positions: &[usize]) {
    let mut next = positions.iter().peekable();
    let mut pos = 0;
    worklist.retain(|_| {
        let remove = next.peek().is_some_and(|&&p| p == pos);
        if remove {
            next.next();
        }
        pos += 1;
        !remove
    });
}
