// ==========================================
// 钢板精整线排程引擎 - 顺序工序流水线
// ==========================================
// 职责: 按输入顺序逐块推进 冷却 → 剪切 → 切边 → 探伤 → 打号 → 检查
// 红线: 严格按输入顺序处理（决定资源并列裁决结果）
// 红线: 跳过的工序不留时间戳，也不推进钢板时钟
// ==========================================

use crate::config::line_config::LineConfig;
use crate::domain::plate::{PlateRecord, PlateSchedule, StageWindow};
use crate::domain::types::ScheduleStatus;
use crate::engine::allocator::ResourceAllocator;
use crate::engine::context::ScheduleContext;
use crate::engine::finish_resolver::FinishTimeResolver;
use chrono::{Duration, NaiveDateTime};
use tracing::debug;

/// 进入常化组炉的候选钢板
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizingCandidate {
    pub plate_index: usize,
    pub ready_at: NaiveDateTime,
    pub thickness_mm: f64,
}

/// 单块钢板流水线结果
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub schedule: PlateSchedule,
    pub normalizing: Option<NormalizingCandidate>,
}

// ==========================================
// StagePipeline - 顺序工序流水线
// ==========================================
pub struct StagePipeline<'a> {
    config: &'a LineConfig,
    allocator: ResourceAllocator,
    resolver: FinishTimeResolver,
}

impl<'a> StagePipeline<'a> {
    pub fn new(config: &'a LineConfig) -> Self {
        Self {
            config,
            allocator: ResourceAllocator::new(),
            resolver: FinishTimeResolver::new(config),
        }
    }

    /// 推进单块钢板
    ///
    /// # 参数
    /// - `plate_index`: 本次输入中的序号
    /// - `plate`: 钢板输入记录
    /// - `ctx`: 排程上下文（切边机 / 探伤仪状态会被修改）
    pub fn run_plate(
        &self,
        plate_index: usize,
        plate: &PlateRecord,
        ctx: &mut ScheduleContext,
    ) -> PipelineOutput {
        let cfg = self.config;
        let thickness = plate.thickness_mm;

        // 1. 冷却（无限资源）
        let cooling = StageWindow::new(plate.arrival_at, cfg.cooling.duration_for(thickness));
        let mut clock = cooling.end;

        // 2. 剪切（厚板）
        let shearing = if thickness >= cfg.shearing.min_thickness_mm {
            let w = StageWindow::new(clock, Duration::minutes(cfg.shearing.duration_minutes));
            clock = w.end;
            Some(w)
        } else {
            None
        };

        // 3. 切边（按厚度分组选机）
        let trimming = if plate.requires_trimming(&cfg.trimming.edge_marker) {
            let pool = if thickness <= cfg.trimming.group_threshold_mm {
                &mut ctx.thin_cutters
            } else {
                &mut ctx.thick_cutters
            };
            let a = self.allocator.allocate(pool, plate_index, clock);
            clock = a.window.end;
            Some(a)
        } else {
            None
        };

        // 4. 探伤
        let ut = if plate.requires_ut() {
            let a = self.allocator.allocate(&mut ctx.ut_testers, plate_index, clock);
            clock = a.window.end;
            Some(a)
        } else {
            None
        };

        // 5. 打号 / 6. 检查
        let punching = StageWindow::new(clock, cfg.punching_duration());
        let inspection = StageWindow::new(punching.end, cfg.inspection_duration());

        let mut schedule = PlateSchedule {
            plate_index,
            cooling,
            shearing,
            trimming,
            ut,
            punching,
            inspection,
            norm_ready_at: None,
            normalizing: None,
            leveling: None,
            final_inspection: None,
            finish_at: None,
            status: ScheduleStatus::AwaitingNormalizing,
        };

        // 7. 分流: 常化 or 直发
        let goes_to_furnace = plate.is_normalized_supply(&cfg.normalizing.supply_marker)
            && thickness >= cfg.normalizing.min_thickness_mm;

        let normalizing = if goes_to_furnace {
            let ready_at = inspection.end + Duration::minutes(cfg.normalizing.ready_delay_minutes);
            schedule.norm_ready_at = Some(ready_at);
            debug!(plate_index, ready_at = %ready_at, "钢板进入常化组炉队列");
            Some(NormalizingCandidate {
                plate_index,
                ready_at,
                thickness_mm: thickness,
            })
        } else {
            self.resolver.resolve_direct(&mut schedule);
            None
        };

        PipelineOutput {
            schedule,
            normalizing,
        }
    }
}
