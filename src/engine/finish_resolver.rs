// ==========================================
// 钢板精整线排程引擎 - 完工时间计算
// ==========================================
// 直发: 完工 = 检查结束 + 完工缓冲
// 常化: 终检从矫直结束开始，完工 = 终检结束 + 完工缓冲
// 未装炉: 不产生完工时间，状态标记为无法排程
// ==========================================

use crate::config::line_config::{FinalInspectionConfig, LineConfig};
use crate::domain::plate::{PlateSchedule, StageWindow};
use crate::domain::types::{Route, ScheduleStatus, UnschedulableReason};
use chrono::Duration;

#[derive(Debug, Clone)]
pub struct FinishTimeResolver {
    finish_buffer: Duration,
    final_inspection: FinalInspectionConfig,
}

impl FinishTimeResolver {
    pub fn new(config: &LineConfig) -> Self {
        Self {
            finish_buffer: config.finish_buffer(),
            final_inspection: config.final_inspection.clone(),
        }
    }

    /// 直发路径
    pub fn resolve_direct(&self, schedule: &mut PlateSchedule) {
        schedule.finish_at = Some(schedule.inspection.end + self.finish_buffer);
        schedule.status = ScheduleStatus::Completed {
            route: Route::Direct,
        };
    }

    /// 常化路径（要求已完成矫直排程）
    ///
    /// # 返回
    /// - false: 钢板尚无矫直时间窗，不做任何修改
    pub fn resolve_normalized(&self, schedule: &mut PlateSchedule, thickness_mm: f64) -> bool {
        let Some(leveling) = schedule.leveling else {
            return false;
        };

        let final_inspection =
            StageWindow::new(leveling.end, self.final_inspection.duration_for(thickness_mm));
        schedule.final_inspection = Some(final_inspection);
        schedule.finish_at = Some(final_inspection.end + self.finish_buffer);
        schedule.status = ScheduleStatus::Completed {
            route: Route::Normalized,
        };
        true
    }

    /// 无法装炉: 显式标记，不产生完工时间
    pub fn mark_unschedulable(&self, schedule: &mut PlateSchedule, reason: UnschedulableReason) {
        schedule.finish_at = None;
        schedule.status = ScheduleStatus::Unschedulable { reason };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn t(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn base_schedule() -> PlateSchedule {
        PlateSchedule {
            plate_index: 0,
            cooling: StageWindow::new(t(0, 0), Duration::hours(8)),
            shearing: None,
            trimming: None,
            ut: None,
            punching: StageWindow::new(t(8, 0), Duration::minutes(5)),
            inspection: StageWindow::new(t(8, 5), Duration::minutes(5)),
            norm_ready_at: None,
            normalizing: None,
            leveling: None,
            final_inspection: None,
            finish_at: None,
            status: ScheduleStatus::AwaitingNormalizing,
        }
    }

    #[test]
    fn test_direct_finish_adds_buffer() {
        let resolver = FinishTimeResolver::new(&LineConfig::default());
        let mut schedule = base_schedule();
        resolver.resolve_direct(&mut schedule);
        assert_eq!(schedule.finish_at, Some(t(12, 10)));
        assert_eq!(schedule.route(), Some(Route::Direct));
    }

    #[test]
    fn test_normalized_finish_uses_final_inspection() {
        let resolver = FinishTimeResolver::new(&LineConfig::default());
        let mut schedule = base_schedule();
        schedule.leveling = Some(StageWindow::new(t(10, 0), Duration::minutes(10)));

        assert!(resolver.resolve_normalized(&mut schedule, 50.0));
        let fi = schedule.final_inspection.unwrap();
        assert_eq!(fi.start, t(10, 10));
        assert_eq!(fi.end, t(11, 50));
        assert_eq!(schedule.finish_at, Some(t(15, 50)));
    }

    #[test]
    fn test_normalized_without_leveling_is_noop() {
        let resolver = FinishTimeResolver::new(&LineConfig::default());
        let mut schedule = base_schedule();
        assert!(!resolver.resolve_normalized(&mut schedule, 50.0));
        assert_eq!(schedule.finish_at, None);
        assert_eq!(schedule.status, ScheduleStatus::AwaitingNormalizing);
    }
}
