// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use plate_line_sched::domain::plate::PlateRecord;

/// 测试基准时间 2026-03-01 06:00:00
pub fn t0() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_opt(6, 0, 0)
        .unwrap()
}

/// 基准时间 + 分钟
pub fn at(minutes: i64) -> NaiveDateTime {
    t0() + Duration::minutes(minutes)
}

// ==========================================
// PlateRecord 构建器
// ==========================================

pub struct PlateBuilder {
    plate_no: Option<String>,
    arrival_at: NaiveDateTime,
    thickness_mm: f64,
    edge_condition: String,
    ut_marker: Option<String>,
    supply_condition: String,
}

impl PlateBuilder {
    pub fn new(thickness_mm: f64) -> Self {
        Self {
            plate_no: None,
            arrival_at: t0(),
            thickness_mm,
            edge_condition: "Mill Edge".to_string(),
            ut_marker: None,
            supply_condition: "As Rolled".to_string(),
        }
    }

    pub fn plate_no(mut self, no: &str) -> Self {
        self.plate_no = Some(no.to_string());
        self
    }

    pub fn arrival(mut self, at: NaiveDateTime) -> Self {
        self.arrival_at = at;
        self
    }

    pub fn trimmed(mut self) -> Self {
        self.edge_condition = "Trimmed".to_string();
        self
    }

    pub fn ut(mut self) -> Self {
        self.ut_marker = Some("Y".to_string());
        self
    }

    pub fn normalized(mut self) -> Self {
        self.supply_condition = "Normalized".to_string();
        self
    }

    /// 生成记录；plate_index 由 `build_all` 按位置回填
    pub fn build(self) -> PlateRecord {
        PlateRecord {
            plate_index: 0,
            plate_no: self.plate_no,
            arrival_at: self.arrival_at,
            thickness_mm: self.thickness_mm,
            edge_condition: self.edge_condition,
            ut_marker: self.ut_marker,
            supply_condition: self.supply_condition,
        }
    }
}

/// 按输入位置回填 plate_index
pub fn build_all(builders: Vec<PlateBuilder>) -> Vec<PlateRecord> {
    builders
        .into_iter()
        .enumerate()
        .map(|(idx, b)| PlateRecord {
            plate_index: idx,
            ..b.build()
        })
        .collect()
}

/// 混合场景数据集（确定性）
pub fn mixed_plates(count: usize) -> Vec<PlateRecord> {
    build_all(
        (0..count)
            .map(|i| {
                let mut b = PlateBuilder::new(8.0 + (i % 23) as f64 * 3.5)
                    .plate_no(&format!("PL{:04}", i))
                    .arrival(at(7 * i as i64));
                if i % 2 == 0 {
                    b = b.trimmed();
                }
                if i % 3 == 1 {
                    b = b.ut();
                }
                if i % 4 == 1 || i % 4 == 2 {
                    b = b.normalized();
                }
                b
            })
            .collect(),
    )
}
