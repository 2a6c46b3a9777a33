// ==========================================
// 钢板精整线排程引擎 - 矫直排队
// ==========================================
// 职责: 出炉钢板逐块串行通过唯一一台矫直机
// 规则: 矫直机起始可用 = 最早出炉时间 + 出炉等待
//       每块: 开工 = max(出炉 + 出炉等待, 矫直机可用)，完工后推进矫直机
// ==========================================

use crate::config::line_config::LevelingConfig;
use crate::domain::furnace::FurnaceBatch;
use crate::domain::leveler::LevelerState;
use crate::domain::plate::StageWindow;
use crate::domain::types::LevelerOrder;
use chrono::{Duration, NaiveDateTime};
use tracing::debug;

/// 单块钢板的矫直排程
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelingSlot {
    pub plate_index: usize,
    pub window: StageWindow,
}

pub struct LevelerSequencer<'a> {
    config: &'a LevelingConfig,
}

impl<'a> LevelerSequencer<'a> {
    pub fn new(config: &'a LevelingConfig) -> Self {
        Self { config }
    }

    /// 为所有已装炉钢板排矫直
    ///
    /// # 参数
    /// - `batches`: 炉次（组炉形成顺序）
    /// - `leveler`: 矫直机状态（会被重新起算并推进）
    pub fn sequence(&self, batches: &[FurnaceBatch], leveler: &mut LevelerState) -> Vec<LevelingSlot> {
        let delay = Duration::minutes(self.config.delay_after_furnace_minutes);
        let service = Duration::minutes(self.config.service_minutes);

        let Some(earliest_end) = batches.iter().map(|b| b.window.end).min() else {
            return Vec::new();
        };
        *leveler = LevelerState::seeded(earliest_end + delay);

        let queue = self.queue(batches);
        let mut slots = Vec::with_capacity(queue.len());
        for (plate_index, furnace_end) in queue {
            let start = leveler.earliest_start(furnace_end + delay);
            let window = StageWindow::new(start, service);
            leveler.advance(window.end);
            slots.push(LevelingSlot { plate_index, window });
        }

        debug!(
            plates = slots.len(),
            order = %self.config.order,
            last_end = ?slots.last().map(|s| s.window.end),
            "矫直排队完成"
        );
        slots
    }

    /// 按配置的顺序展开 (钢板序号, 出炉时间)
    fn queue(&self, batches: &[FurnaceBatch]) -> Vec<(usize, NaiveDateTime)> {
        let mut queue: Vec<(usize, NaiveDateTime)> = batches
            .iter()
            .flat_map(|b| b.members.iter().map(move |&idx| (idx, b.window.end)))
            .collect();

        match self.config.order {
            LevelerOrder::BatchOrder => {}
            LevelerOrder::InputOrder => queue.sort_by_key(|&(idx, _)| idx),
            // 稳定排序，同出炉时间保持组炉顺序
            LevelerOrder::FurnaceEndTime => queue.sort_by_key(|&(_, end)| end),
        }
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn t(h: i64, m: i64) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
            + Duration::hours(h)
            + Duration::minutes(m)
    }

    fn batch(batch_no: usize, members: Vec<usize>, start_h: i64) -> FurnaceBatch {
        FurnaceBatch {
            batch_no,
            furnace_id: if batch_no % 2 == 1 { "NF1" } else { "NF2" }.to_string(),
            members,
            total_thickness_mm: 0.0,
            capacity_mm: 1630.0,
            window: StageWindow::new(t(start_h, 0), Duration::hours(12)),
        }
    }

    #[test]
    fn test_empty_batches() {
        let config = LevelingConfig::default();
        let mut leveler = LevelerState::default();
        assert!(LevelerSequencer::new(&config).sequence(&[], &mut leveler).is_empty());
        assert_eq!(leveler.available_at(), None);
    }

    #[test]
    fn test_serial_within_batch() {
        let config = LevelingConfig::default();
        let mut leveler = LevelerState::default();
        let slots = LevelerSequencer::new(&config).sequence(&[batch(1, vec![3, 1, 2], 0)], &mut leveler);

        // 出炉 12:00 + 8h = 20:00
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].plate_index, 3);
        assert_eq!(slots[0].window.start, t(20, 0));
        assert_eq!(slots[1].window.start, t(20, 10));
        assert_eq!(slots[2].window.end, t(20, 30));
        assert_eq!(leveler.available_at(), Some(t(20, 30)));
    }

    #[test]
    fn test_batch_order_vs_furnace_end_order() {
        // 第 1 炉晚出炉，第 2 炉早出炉
        let batches = vec![batch(1, vec![0], 10), batch(2, vec![1], 0)];

        let batch_cfg = LevelingConfig::default();
        let mut leveler = LevelerState::default();
        let slots = LevelerSequencer::new(&batch_cfg).sequence(&batches, &mut leveler);
        assert_eq!(slots[0].plate_index, 0);
        assert_eq!(slots[0].window.start, t(30, 0));
        // 按组炉顺序，早出炉的第 2 炉钢板被排在后面
        assert_eq!(slots[1].window.start, t(30, 10));

        let end_cfg = LevelingConfig {
            order: LevelerOrder::FurnaceEndTime,
            ..LevelingConfig::default()
        };
        let mut leveler = LevelerState::default();
        let slots = LevelerSequencer::new(&end_cfg).sequence(&batches, &mut leveler);
        assert_eq!(slots[0].plate_index, 1);
        assert_eq!(slots[0].window.start, t(20, 0));
        assert_eq!(slots[1].plate_index, 0);
        assert_eq!(slots[1].window.start, t(30, 0));
    }

    #[test]
    fn test_input_order() {
        let batches = vec![batch(1, vec![2, 0], 0), batch(2, vec![1], 0)];
        let cfg = LevelingConfig {
            order: LevelerOrder::InputOrder,
            ..LevelingConfig::default()
        };
        let mut leveler = LevelerState::default();
        let slots = LevelerSequencer::new(&cfg).sequence(&batches, &mut leveler);
        let order: Vec<_> = slots.iter().map(|s| s.plate_index).collect();
        assert_eq!(order, vec![0, 1, 2]);
    }

    #[test]
    fn test_end_times_non_decreasing() {
        let batches = vec![batch(1, vec![0, 1], 10), batch(2, vec![2], 0), batch(3, vec![3], 40)];
        for order in [
            LevelerOrder::BatchOrder,
            LevelerOrder::InputOrder,
            LevelerOrder::FurnaceEndTime,
        ] {
            let cfg = LevelingConfig {
                order,
                ..LevelingConfig::default()
            };
            let mut leveler = LevelerState::default();
            let slots = LevelerSequencer::new(&cfg).sequence(&batches, &mut leveler);
            for pair in slots.windows(2) {
                assert!(pair[1].window.start >= pair[0].window.end);
            }
        }
    }
}
