// ==========================================
// 钢板精整线排程引擎 - 输入校验器
// ==========================================
// 职责: 类型转换 + 校验，一次收集全部错误
// 红线: 到达时间 / 厚度 不允许缺省值，任一行出错整批失败
// ==========================================

use crate::domain::plate::PlateRecord;
use crate::importer::error::{FieldViolation, ImportError, ImportResult};
use crate::importer::field_mapper::{PlateField, RawPlateRecord};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use tracing::warn;

/// 支持的时间格式（按顺序尝试）
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

// Excel 序列日期有效范围（1900-01-01 ~ 9999-12-31）
const EXCEL_SERIAL_MIN: f64 = 1.0;
const EXCEL_SERIAL_MAX: f64 = 2_958_466.0;

/// 解析到达时间文本
///
/// 先尝试文本格式，再尝试纯日期，最后按 Excel 序列日期解释
/// （1899-12-30 起算的天数，小数部分为当日时刻，精确到秒）。
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(dt);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    let serial: f64 = value.parse().ok()?;
    if !(EXCEL_SERIAL_MIN..EXCEL_SERIAL_MAX).contains(&serial) {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::seconds(seconds))
}

/// 输入校验器
pub struct PlateValidator;

impl PlateValidator {
    pub fn new() -> Self {
        Self
    }

    /// 把映射后的记录转换为 PlateRecord
    ///
    /// `plate_index` 为记录在输入中的位置
    pub fn validate(&self, records: &[RawPlateRecord]) -> ImportResult<Vec<PlateRecord>> {
        let mut violations = Vec::new();
        let mut plates = Vec::with_capacity(records.len());

        for (plate_index, record) in records.iter().enumerate() {
            if let Some(plate) = self.validate_record(plate_index, record, &mut violations) {
                plates.push(plate);
            }
        }

        if !violations.is_empty() {
            return Err(ImportError::ValidationFailed { violations });
        }

        self.warn_duplicate_plate_no(records);
        Ok(plates)
    }

    fn validate_record(
        &self,
        plate_index: usize,
        record: &RawPlateRecord,
        violations: &mut Vec<FieldViolation>,
    ) -> Option<PlateRecord> {
        let mut violate = |field: PlateField, message: String| {
            violations.push(FieldViolation {
                row: record.row_number,
                field: field.column().to_string(),
                message,
            });
        };

        let arrival_at = match record.rolling_time.as_deref() {
            None => {
                violate(PlateField::RollingTime, "到达时间为空".to_string());
                None
            }
            Some(raw) => {
                let parsed = parse_timestamp(raw);
                if parsed.is_none() {
                    violate(PlateField::RollingTime, format!("无法解析的时间: {}", raw));
                }
                parsed
            }
        };

        let thickness_mm = match record.thickness.as_deref() {
            None => {
                violate(PlateField::Thickness, "厚度为空".to_string());
                None
            }
            Some(raw) => match raw.parse::<f64>() {
                Ok(v) if v.is_finite() && v > 0.0 => Some(v),
                Ok(v) => {
                    violate(PlateField::Thickness, format!("厚度必须为正数: {}", v));
                    None
                }
                Err(_) => {
                    violate(PlateField::Thickness, format!("无法解析为数值: {}", raw));
                    None
                }
            },
        };

        Some(PlateRecord {
            plate_index,
            plate_no: record.plate_no.clone(),
            arrival_at: arrival_at?,
            thickness_mm: thickness_mm?,
            edge_condition: record.edge_condition.clone().unwrap_or_default(),
            ut_marker: record.ut.clone(),
            supply_condition: record.supply_condition.clone().unwrap_or_default(),
        })
    }

    // 钢板号重复不影响排程（以输入位置为准），只告警
    fn warn_duplicate_plate_no(&self, records: &[RawPlateRecord]) {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        for record in records {
            let Some(no) = record.plate_no.as_deref() else {
                continue;
            };
            if let Some(first_row) = seen.insert(no, record.row_number) {
                warn!(
                    plate_no = no,
                    first_row,
                    row = record.row_number,
                    "钢板号重复"
                );
            }
        }
    }
}

impl Default for PlateValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn raw(row: usize, time: Option<&str>, thickness: Option<&str>) -> RawPlateRecord {
        RawPlateRecord {
            row_number: row,
            rolling_time: time.map(|s| s.to_string()),
            thickness: thickness.map(|s| s.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_timestamp_text_formats() {
        let expected = dt(2026, 3, 1, 6, 30, 0);
        assert_eq!(parse_timestamp("2026-03-01 06:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01 06:30"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01T06:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2026/03/01 06:30"), Some(expected));
        assert_eq!(parse_timestamp("2026-03-01"), Some(dt(2026, 3, 1, 0, 0, 0)));
    }

    #[test]
    fn test_parse_timestamp_fractional_seconds() {
        let parsed = parse_timestamp("2026-03-01 06:30:00.250").unwrap();
        assert_eq!(parsed, dt(2026, 3, 1, 6, 30, 0) + Duration::milliseconds(250));
    }

    #[test]
    fn test_parse_timestamp_excel_serial() {
        // 46082 = 2026-03-01
        assert_eq!(parse_timestamp("46082"), Some(dt(2026, 3, 1, 0, 0, 0)));
        assert_eq!(parse_timestamp("46082.25"), Some(dt(2026, 3, 1, 6, 0, 0)));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("-3"), None);
        assert_eq!(parse_timestamp(""), None);
    }

    #[test]
    fn test_validate_defaults_optional_fields() {
        let plates = PlateValidator::new()
            .validate(&[raw(2, Some("2026-03-01 06:00"), Some("25"))])
            .unwrap();
        assert_eq!(plates.len(), 1);
        assert_eq!(plates[0].plate_index, 0);
        assert_eq!(plates[0].edge_condition, "");
        assert_eq!(plates[0].ut_marker, None);
        assert_eq!(plates[0].supply_condition, "");
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let records = vec![
            raw(2, Some("2026-03-01 06:00"), Some("25")),
            raw(3, None, Some("abc")),
            raw(4, Some("not a time"), Some("-5")),
            raw(5, Some("2026-03-01 08:00"), None),
        ];

        match PlateValidator::new().validate(&records) {
            Err(ImportError::ValidationFailed { violations }) => {
                assert_eq!(violations.len(), 5);
                let rows: Vec<_> = violations.iter().map(|v| v.row).collect();
                assert_eq!(rows, vec![3, 3, 4, 4, 5]);
                assert_eq!(violations[0].field, "Rolling Time");
                assert_eq!(violations[1].field, "Thickness");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
