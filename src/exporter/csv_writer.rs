// ==========================================
// 钢板精整线排程引擎 - CSV 排程表导出
// ==========================================
// 输出: 输入列原样回写 + 各工序起止时间 + 完工时间 + 状态
// 未执行的工序留空
// ==========================================

use crate::domain::plate::{ResourceAssignment, ScheduledPlate, StageWindow};
use crate::engine::orchestrator::ScheduleResult;
use crate::exporter::error::{ExportError, ExportResult};
use crate::importer::field_mapper::PlateField;
use crate::importer::file_parser::RawTable;
use chrono::NaiveDateTime;
use csv::Writer;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 时间输出格式
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 排程列（跟在输入列之后）
pub const SCHEDULE_COLUMNS: &[&str] = &[
    "Start Cooling",
    "End Cooling",
    "Start Shearing",
    "End Shearing",
    "Trimming Station",
    "Start Trimming",
    "End Trimming",
    "UT Station",
    "Start UT",
    "End UT",
    "Start Punching",
    "End Punching",
    "Start Inspection",
    "End Inspection",
    "Norm Ready Time",
    "Furnace",
    "Start Normalizing",
    "End Normalizing",
    "Start Levelling",
    "End Levelling",
    "Start Final Inspection",
    "End Final Inspection",
    "Finish Time",
    "Status",
];

fn ts(value: Option<NaiveDateTime>) -> String {
    value
        .map(|t| t.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

fn window(w: Option<StageWindow>) -> [String; 2] {
    [ts(w.map(|w| w.start)), ts(w.map(|w| w.end))]
}

fn station(a: Option<&ResourceAssignment>) -> [String; 3] {
    let [start, end] = window(a.map(|a| a.window));
    [a.map(|a| a.resource_id.clone()).unwrap_or_default(), start, end]
}

/// 单块钢板的排程列
pub fn schedule_cells(plate: &ScheduledPlate) -> Vec<String> {
    let s = &plate.schedule;
    let mut cells = Vec::with_capacity(SCHEDULE_COLUMNS.len());

    cells.extend(window(Some(s.cooling)));
    cells.extend(window(s.shearing));
    cells.extend(station(s.trimming.as_ref()));
    cells.extend(station(s.ut.as_ref()));
    cells.extend(window(Some(s.punching)));
    cells.extend(window(Some(s.inspection)));
    cells.push(ts(s.norm_ready_at));
    cells.push(
        s.normalizing
            .as_ref()
            .map(|n| n.furnace_id.clone())
            .unwrap_or_default(),
    );
    cells.extend(window(s.normalizing.as_ref().map(|n| n.window)));
    cells.extend(window(s.leveling));
    cells.extend(window(s.final_inspection));
    cells.push(ts(s.finish_at));
    cells.push(s.status.to_string());
    cells
}

/// 无原始表格时使用的输入列
fn standard_input_cells(plate: &ScheduledPlate) -> Vec<String> {
    let r = &plate.record;
    vec![
        r.plate_no.clone().unwrap_or_default(),
        r.arrival_at.format(TIMESTAMP_FORMAT).to_string(),
        r.thickness_mm.to_string(),
        r.edge_condition.clone(),
        r.ut_marker.clone().unwrap_or_default(),
        r.supply_condition.clone(),
    ]
}

const STANDARD_INPUT_FIELDS: [PlateField; 6] = [
    PlateField::PlateNo,
    PlateField::RollingTime,
    PlateField::Thickness,
    PlateField::EdgeCondition,
    PlateField::Ut,
    PlateField::SupplyCondition,
];

// ==========================================
// ScheduleCsvWriter - CSV 排程表导出器
// ==========================================
pub struct ScheduleCsvWriter;

impl ScheduleCsvWriter {
    /// 写入任意 writer
    ///
    /// # 参数
    /// - `table`: 原始输入表格；提供时按原列位置回写（重名列各自保留），否则输出标准输入列
    pub fn write_to<W: Write>(
        &self,
        writer: W,
        result: &ScheduleResult,
        table: Option<&RawTable>,
    ) -> ExportResult<()> {
        if let Some(table) = table {
            if table.rows.len() != result.plates.len() {
                return Err(ExportError::RowCountMismatch {
                    table_rows: table.rows.len(),
                    plates: result.plates.len(),
                });
            }
        }

        let mut out = Writer::from_writer(writer);

        // 与排程列同名的输入列不回写，以排程值为准
        let echoed: Vec<usize> = table
            .map(|t| {
                (0..t.headers.len())
                    .filter(|&idx| !SCHEDULE_COLUMNS.contains(&t.headers[idx].as_str()))
                    .collect()
            })
            .unwrap_or_default();

        let mut header: Vec<String> = match table {
            Some(t) => echoed.iter().map(|&idx| t.headers[idx].clone()).collect(),
            None => STANDARD_INPUT_FIELDS
                .iter()
                .map(|f| f.column().to_string())
                .collect(),
        };
        header.extend(SCHEDULE_COLUMNS.iter().map(|c| c.to_string()));
        out.write_record(&header)?;

        for (idx, plate) in result.plates.iter().enumerate() {
            let mut row: Vec<String> = match table {
                Some(t) => {
                    let raw = &t.rows[idx];
                    echoed
                        .iter()
                        .map(|&col| raw.cell(col).unwrap_or("").to_string())
                        .collect()
                }
                None => standard_input_cells(plate),
            };
            row.extend(schedule_cells(plate));
            out.write_record(&row)?;
        }

        out.flush()?;
        Ok(())
    }

    /// 写入文件
    pub fn write_file<P: AsRef<Path>>(
        &self,
        path: P,
        result: &ScheduleResult,
        table: Option<&RawTable>,
    ) -> ExportResult<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path)?;
        self.write_to(file, result, table)?;
        info!(path = %path.display(), plates = result.plates.len(), "排程表已导出");
        Ok(())
    }
}
