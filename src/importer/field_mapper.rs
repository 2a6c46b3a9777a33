// ==========================================
// 钢板精整线排程引擎 - 字段映射器实现
// ==========================================
// 职责: 源列名（含中文别名）→ 标准字段
// 只做取值，不做类型转换（转换与校验见 validator）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, RawTable};

/// 标准字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlateField {
    PlateNo,
    RollingTime,
    Thickness,
    EdgeCondition,
    Ut,
    SupplyCondition,
}

impl PlateField {
    /// 标准列名
    pub fn column(&self) -> &'static str {
        match self {
            PlateField::PlateNo => "Plate No",
            PlateField::RollingTime => "Rolling Time",
            PlateField::Thickness => "Thickness",
            PlateField::EdgeCondition => "Edge Condition",
            PlateField::Ut => "UT",
            PlateField::SupplyCondition => "Supply Condition",
        }
    }

    /// 可接受的列名
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            PlateField::PlateNo => &["Plate No", "钢板号"],
            PlateField::RollingTime => &["Rolling Time", "轧制时间", "Arrival Time"],
            PlateField::Thickness => &["Thickness", "厚度", "Thickness (mm)"],
            PlateField::EdgeCondition => &["Edge Condition", "边部状态"],
            PlateField::Ut => &["UT", "探伤", "Test Required"],
            PlateField::SupplyCondition => &["Supply Condition", "交货状态"],
        }
    }

    fn is_required(&self) -> bool {
        matches!(self, PlateField::RollingTime | PlateField::Thickness)
    }
}

/// 映射后的原始钢板记录（字段均未转换）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawPlateRecord {
    pub row_number: usize,
    pub plate_no: Option<String>,
    pub rolling_time: Option<String>,
    pub thickness: Option<String>,
    pub edge_condition: Option<String>,
    pub ut: Option<String>,
    pub supply_condition: Option<String>,
}

/// 表头解析结果: 每个标准字段对应的列位置
#[derive(Debug, Clone)]
pub struct FieldMapper {
    plate_no: Option<usize>,
    rolling_time: usize,
    thickness: usize,
    edge_condition: Option<usize>,
    ut: Option<usize>,
    supply_condition: Option<usize>,
}

impl FieldMapper {
    /// 根据表头确定列映射；缺少必需列直接失败
    ///
    /// 别名按优先级匹配；同名列出现多次时取第一个
    pub fn from_headers(headers: &[String]) -> ImportResult<Self> {
        let optional = |field: PlateField| -> Option<usize> {
            field
                .aliases()
                .iter()
                .find_map(|alias| headers.iter().position(|h| h == alias))
        };
        let required = |field: PlateField| -> ImportResult<usize> {
            optional(field).ok_or_else(|| ImportError::MissingColumn {
                column: field.column().to_string(),
                aliases: field.aliases().join(" / "),
            })
        };

        Ok(Self {
            plate_no: optional(PlateField::PlateNo),
            rolling_time: required(PlateField::RollingTime)?,
            thickness: required(PlateField::Thickness)?,
            edge_condition: optional(PlateField::EdgeCondition),
            ut: optional(PlateField::Ut),
            supply_condition: optional(PlateField::SupplyCondition),
        })
    }

    pub fn map_row(&self, row: &RawRow) -> RawPlateRecord {
        let get = |column: Option<usize>| -> Option<String> {
            column
                .and_then(|idx| row.cell(idx))
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(|v| v.to_string())
        };

        RawPlateRecord {
            row_number: row.row_number,
            plate_no: get(self.plate_no),
            rolling_time: get(Some(self.rolling_time)),
            thickness: get(Some(self.thickness)),
            edge_condition: get(self.edge_condition),
            ut: get(self.ut),
            supply_condition: get(self.supply_condition),
        }
    }

    pub fn map_table(&self, table: &RawTable) -> Vec<RawPlateRecord> {
        table.rows.iter().map(|row| self.map_row(row)).collect()
    }
}
