// ==========================================
// 钢板精整线排程引擎 - 导入层
// ==========================================
// 职责: 外部数据导入，生成 PlateRecord
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod plate_importer;
pub mod validator;

// 重导出核心类型
pub use error::{FieldViolation, ImportError, ImportResult};
pub use field_mapper::{FieldMapper, PlateField, RawPlateRecord};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, RawTable, UniversalFileParser};
pub use plate_importer::{ImportedPlates, PlateImporter};
pub use validator::{parse_timestamp, PlateValidator};
