// ==========================================
// 钢板精整线排程引擎 - 引擎编排器
// ==========================================
// 用途: 流水线 → 组炉 → 矫直 → 完工 的执行顺序
// 红线: 一次排程是输入序列的纯函数（run_id 除外）
// ==========================================

use crate::config::error::ConfigResult;
use crate::config::line_config::LineConfig;
use crate::domain::furnace::FurnaceBatch;
use crate::domain::plate::{FurnaceAssignment, PlateRecord, PlateSchedule, ScheduledPlate};
use crate::domain::types::{Route, ScheduleStatus};
use crate::engine::context::ScheduleContext;
use crate::engine::finish_resolver::FinishTimeResolver;
use crate::engine::furnace_grouper::FurnaceBatchGrouper;
use crate::engine::leveler::LevelerSequencer;
use crate::engine::pipeline::StagePipeline;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// ScheduleResult - 排程结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub run_id: Uuid,
    pub plates: Vec<ScheduledPlate>,
    pub batches: Vec<FurnaceBatch>,
    pub summary: ScheduleSummary,
}

impl ScheduleResult {
    pub fn unschedulable(&self) -> impl Iterator<Item = &ScheduledPlate> {
        self.plates.iter().filter(|p| p.schedule.status.is_unschedulable())
    }
}

/// 排程汇总
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_plates: usize,
    pub direct_count: usize,
    pub normalized_count: usize,
    pub unschedulable_count: usize,
    pub batch_count: usize,
    pub batches_per_furnace: BTreeMap<String, usize>,
    pub earliest_arrival: Option<NaiveDateTime>,
    pub latest_finish: Option<NaiveDateTime>,
}

impl ScheduleSummary {
    fn from_parts(plates: &[ScheduledPlate], batches: &[FurnaceBatch]) -> Self {
        let mut summary = ScheduleSummary {
            total_plates: plates.len(),
            batch_count: batches.len(),
            ..Default::default()
        };

        for plate in plates {
            match &plate.schedule.status {
                ScheduleStatus::Completed {
                    route: Route::Direct,
                } => summary.direct_count += 1,
                ScheduleStatus::Completed {
                    route: Route::Normalized,
                } => summary.normalized_count += 1,
                ScheduleStatus::Unschedulable { .. } => summary.unschedulable_count += 1,
                ScheduleStatus::AwaitingNormalizing => {}
            }
        }

        for batch in batches {
            *summary
                .batches_per_furnace
                .entry(batch.furnace_id.clone())
                .or_insert(0) += 1;
        }

        summary.earliest_arrival = plates.iter().map(|p| p.record.arrival_at).min();
        summary.latest_finish = plates.iter().filter_map(|p| p.schedule.finish_at).max();
        summary
    }
}

// ==========================================
// ScheduleOrchestrator - 引擎编排器
// ==========================================
pub struct ScheduleOrchestrator {
    config: LineConfig,
}

impl ScheduleOrchestrator {
    /// 创建编排器（参数先校验）
    pub fn new(config: LineConfig) -> ConfigResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    /// 执行完整排程
    ///
    /// 钢板以其在 `plates` 中的位置作为本次排程的序号；
    /// 结果中 `PlateSchedule::plate_index` 与炉次成员均使用该序号。
    #[instrument(skip_all, fields(plates = plates.len()))]
    pub fn execute(&self, plates: &[PlateRecord]) -> ConfigResult<ScheduleResult> {
        let run_id = Uuid::new_v4();

        let Some(origin) = plates.iter().map(|p| p.arrival_at).min() else {
            info!(%run_id, "无钢板输入，返回空排程");
            return Ok(ScheduleResult {
                run_id,
                plates: Vec::new(),
                batches: Vec::new(),
                summary: ScheduleSummary::default(),
            });
        };

        info!(%run_id, plates = plates.len(), origin = %origin, "开始执行排程");
        let mut ctx = ScheduleContext::new(&self.config, origin)?;

        // ==========================================
        // 步骤1: 顺序工序流水线
        // ==========================================
        let pipeline = StagePipeline::new(&self.config);
        let mut schedules: Vec<PlateSchedule> = Vec::with_capacity(plates.len());
        let mut candidates = Vec::new();
        for (idx, plate) in plates.iter().enumerate() {
            if plate.plate_index != idx {
                warn!(
                    plate_index = plate.plate_index,
                    position = idx,
                    "钢板序号与输入位置不一致，按输入位置排程"
                );
            }
            let out = pipeline.run_plate(idx, plate, &mut ctx);
            schedules.push(out.schedule);
            candidates.extend(out.normalizing);
        }
        debug!(normalizing = candidates.len(), "步骤1完成: 流水线");

        // ==========================================
        // 步骤2: 常化组炉
        // ==========================================
        let outcome = FurnaceBatchGrouper::new(&self.config.normalizing)
            .group(candidates, &mut ctx.furnaces);
        for batch in &outcome.batches {
            for &idx in &batch.members {
                schedules[idx].normalizing = Some(FurnaceAssignment {
                    furnace_id: batch.furnace_id.clone(),
                    batch_no: batch.batch_no,
                    window: batch.window,
                });
            }
        }
        debug!(batches = outcome.batches.len(), "步骤2完成: 组炉");

        // ==========================================
        // 步骤3: 矫直排队
        // ==========================================
        let slots = LevelerSequencer::new(&self.config.leveling)
            .sequence(&outcome.batches, &mut ctx.leveler);
        for slot in &slots {
            schedules[slot.plate_index].leveling = Some(slot.window);
        }
        debug!(leveled = slots.len(), "步骤3完成: 矫直");

        // ==========================================
        // 步骤4: 完工时间
        // ==========================================
        let resolver = FinishTimeResolver::new(&self.config);
        for slot in &slots {
            let thickness = plates[slot.plate_index].thickness_mm;
            resolver.resolve_normalized(&mut schedules[slot.plate_index], thickness);
        }
        for (idx, reason) in outcome.unschedulable {
            resolver.mark_unschedulable(&mut schedules[idx], reason);
        }

        let plates: Vec<ScheduledPlate> = plates
            .iter()
            .cloned()
            .zip(schedules)
            .map(|(record, schedule)| ScheduledPlate { record, schedule })
            .collect();
        let summary = ScheduleSummary::from_parts(&plates, &outcome.batches);

        info!(
            %run_id,
            direct = summary.direct_count,
            normalized = summary.normalized_count,
            unschedulable = summary.unschedulable_count,
            batches = summary.batch_count,
            latest_finish = ?summary.latest_finish,
            "排程完成"
        );
        if summary.unschedulable_count > 0 {
            warn!(
                unschedulable = summary.unschedulable_count,
                "存在无法装炉的钢板，已在结果中标记"
            );
        }

        Ok(ScheduleResult {
            run_id,
            plates,
            batches: outcome.batches,
            summary,
        })
    }
}
