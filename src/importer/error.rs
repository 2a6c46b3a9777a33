// ==========================================
// 钢板精整线排程引擎 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use std::fmt;
use thiserror::Error;

/// 单个字段校验失败
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    /// 数据行号（表头为第 1 行，数据从第 2 行开始）
    pub row: usize,
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "行 {} 字段 {}: {}", self.row, self.field, self.message)
    }
}

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("缺少必需列: {column}（可用别名: {aliases}）")]
    MissingColumn { column: String, aliases: String },

    // ===== 数据质量错误 =====
    #[error("输入校验失败，共 {} 处错误: {}", .violations.len(), summarize(.violations))]
    ValidationFailed { violations: Vec<FieldViolation> },
}

fn summarize(violations: &[FieldViolation]) -> String {
    const SHOWN: usize = 5;
    let mut text = violations
        .iter()
        .take(SHOWN)
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ");
    if violations.len() > SHOWN {
        text.push_str(&format!("; 其余 {} 处省略", violations.len() - SHOWN));
    }
    text
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_truncates() {
        let violations: Vec<_> = (0..8)
            .map(|i| FieldViolation {
                row: i + 2,
                field: "Thickness".to_string(),
                message: "为空".to_string(),
            })
            .collect();
        let err = ImportError::ValidationFailed { violations };
        let text = err.to_string();
        assert!(text.contains("共 8 处错误"));
        assert!(text.contains("行 2 字段 Thickness"));
        assert!(text.contains("其余 3 处省略"));
    }
}
