// ==========================================
// 钢板精整线排程引擎 - 排程上下文
// ==========================================
// 职责: 承载一次排程中所有共享资源的可变状态
// 红线: 状态只通过函数参数传递，无全局状态
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::line_config::{LineConfig, MachineSpec};
use crate::domain::furnace::FurnaceState;
use crate::domain::leveler::LevelerState;
use crate::domain::resource::ResourcePool;
use chrono::NaiveDateTime;

/// 切边机薄板组名称
pub const THIN_CUTTER_POOL: &str = "<=40";
/// 切边机厚板组名称
pub const THICK_CUTTER_POOL: &str = ">40";
/// 探伤仪资源池名称
pub const UT_POOL: &str = "UT";

#[derive(Debug, Clone)]
pub struct ScheduleContext {
    pub thin_cutters: ResourcePool,
    pub thick_cutters: ResourcePool,
    pub ut_testers: ResourcePool,
    pub furnaces: FurnaceState,
    pub leveler: LevelerState,
}

impl ScheduleContext {
    /// 按产线参数初始化所有资源
    ///
    /// # 参数
    /// - config: 产线参数
    /// - origin: 初始可用时间（本批钢板最早到达时间）
    pub fn new(config: &LineConfig, origin: NaiveDateTime) -> ConfigResult<Self> {
        let thin_cutters = ResourcePool::new(
            THIN_CUTTER_POOL,
            &machine_specs(&config.trimming.thin_group),
            origin,
        )
        .ok_or_else(|| ConfigError::EmptyPool("trimming.thin_group".to_string()))?;

        let thick_cutters = ResourcePool::new(
            THICK_CUTTER_POOL,
            &machine_specs(&config.trimming.thick_group),
            origin,
        )
        .ok_or_else(|| ConfigError::EmptyPool("trimming.thick_group".to_string()))?;

        let ut_specs: Vec<(String, i64)> = config
            .ultrasonic
            .tester_ids
            .iter()
            .map(|id| (id.clone(), config.ultrasonic.service_minutes))
            .collect();
        let ut_testers = ResourcePool::new(UT_POOL, &ut_specs, origin)
            .ok_or_else(|| ConfigError::EmptyPool("ultrasonic.tester_ids".to_string()))?;

        let furnace_specs: Vec<(String, f64)> = config
            .normalizing
            .furnaces
            .iter()
            .map(|f| (f.furnace_id.clone(), f.capacity_mm))
            .collect();
        let furnaces = FurnaceState::new(&furnace_specs, origin)
            .ok_or_else(|| ConfigError::EmptyPool("normalizing.furnaces".to_string()))?;

        Ok(Self {
            thin_cutters,
            thick_cutters,
            ut_testers,
            furnaces,
            leveler: LevelerState::default(),
        })
    }
}

fn machine_specs(group: &[MachineSpec]) -> Vec<(String, i64)> {
    group
        .iter()
        .map(|m| (m.machine_id.clone(), m.service_minutes))
        .collect()
}
