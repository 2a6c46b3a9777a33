// ==========================================
// 钢板精整线排程引擎 - 钢板数据导入器
// ==========================================
// 职责: 整合导入流程，从文件到 PlateRecord
// 流程: 解析 → 列映射 → 校验
// ==========================================

use crate::domain::plate::PlateRecord;
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{RawTable, UniversalFileParser};
use crate::importer::validator::PlateValidator;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// 导入结果: 钢板记录 + 原始表格（导出时回写输入列）
///
/// `plates[i]` 对应 `table.rows[i]`
#[derive(Debug, Clone)]
pub struct ImportedPlates {
    pub plates: Vec<PlateRecord>,
    pub table: RawTable,
}

// ==========================================
// PlateImporter - 钢板数据导入器
// ==========================================
pub struct PlateImporter {
    file_parser: UniversalFileParser,
    validator: PlateValidator,
}

impl PlateImporter {
    pub fn new() -> Self {
        Self {
            file_parser: UniversalFileParser,
            validator: PlateValidator::new(),
        }
    }

    /// 从 CSV / Excel 文件导入
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import_file<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<ImportedPlates> {
        let start_time = Instant::now();
        info!("开始导入钢板数据");

        let table = self.file_parser.parse(file_path.as_ref())?;
        debug!(rows = table.rows.len(), headers = ?table.headers, "文件解析完成");

        let plates = self.import_table(&table)?;
        info!(
            plates = plates.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "钢板数据导入完成"
        );
        Ok(ImportedPlates { plates, table })
    }

    /// 从已解析的表格导入
    pub fn import_table(&self, table: &RawTable) -> ImportResult<Vec<PlateRecord>> {
        let mapper = FieldMapper::from_headers(&table.headers)?;
        let records = mapper.map_table(table);
        self.validator.validate(&records)
    }
}

impl Default for PlateImporter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::error::ImportError;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_import_csv_file() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Plate No,Rolling Time,Thickness,Edge Condition,UT,Supply Condition").unwrap();
        writeln!(file, "P1,2026-03-01 06:00:00,25,Trimmed,,As Rolled").unwrap();
        writeln!(file, "P2,2026-03-01 06:30:00,55,Mill Edge,Y,Normalized").unwrap();

        let imported = PlateImporter::new().import_file(file.path()).unwrap();
        assert_eq!(imported.plates.len(), 2);
        assert_eq!(imported.table.rows.len(), 2);
        assert_eq!(imported.plates[1].plate_index, 1);
        assert_eq!(imported.plates[1].plate_no.as_deref(), Some("P2"));
        assert!(imported.plates[1].requires_ut());
        assert!(!imported.plates[0].requires_ut());
    }

    #[test]
    fn test_import_fails_whole_run_on_bad_row() {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "Rolling Time,Thickness").unwrap();
        writeln!(file, "2026-03-01 06:00:00,25").unwrap();
        writeln!(file, "2026-03-01 06:30:00,").unwrap();

        let result = PlateImporter::new().import_file(file.path());
        assert!(matches!(result, Err(ImportError::ValidationFailed { .. })));
    }
}
