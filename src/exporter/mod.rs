// ==========================================
// 钢板精整线排程引擎 - 导出层
// ==========================================
// 职责: 排程结果写出（CSV 排程表 / JSON 报告）
// ==========================================

pub mod csv_writer;
pub mod error;
pub mod json_report;

pub use csv_writer::{schedule_cells, ScheduleCsvWriter, SCHEDULE_COLUMNS, TIMESTAMP_FORMAT};
pub use error::{ExportError, ExportResult};
pub use json_report::ScheduleReport;
