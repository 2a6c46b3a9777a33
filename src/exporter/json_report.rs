// ==========================================
// 钢板精整线排程引擎 - JSON 排程报告
// ==========================================
// 内容: 运行 ID + 参数快照 + 汇总 + 每块钢板排程 + 炉次
// ==========================================

use crate::config::line_config::LineConfig;
use crate::domain::furnace::FurnaceBatch;
use crate::domain::plate::ScheduledPlate;
use crate::engine::orchestrator::{ScheduleResult, ScheduleSummary};
use crate::exporter::error::ExportResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub app_version: String,
    pub config: LineConfig,
    pub summary: ScheduleSummary,
    pub plates: Vec<ScheduledPlate>,
    pub batches: Vec<FurnaceBatch>,
}

impl ScheduleReport {
    pub fn new(result: &ScheduleResult, config: &LineConfig) -> Self {
        Self {
            run_id: result.run_id,
            generated_at: Utc::now(),
            app_version: crate::VERSION.to_string(),
            config: config.clone(),
            summary: result.summary.clone(),
            plates: result.plates.clone(),
            batches: result.batches.clone(),
        }
    }

    pub fn to_json(&self) -> ExportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write_file<P: AsRef<Path>>(&self, path: P) -> ExportResult<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!(path = %path.display(), run_id = %self.run_id, "排程报告已导出");
        Ok(())
    }
}
