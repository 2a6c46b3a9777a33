// ==========================================
// 钢板精整线排程引擎 - 核心库
// ==========================================
// 工序: 冷却 → 剪切 → 切边 → 探伤 → 打号 → 检查 → (常化 → 矫直 → 终检) → 完工
// 系统定位: 离线排程计算（输入钢板清单，输出逐工序时间表）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排程规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - 排程表 / 报告
pub mod exporter;

// 配置层 - 产线参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LevelerOrder, Route, ScheduleStatus, Stage, UnschedulableReason};

// 领域实体
pub use domain::{
    FurnaceBatch, FurnaceState, LevelerState, PlateRecord, PlateSchedule, ResourcePool,
    ScheduledPlate, StageWindow,
};

// 引擎
pub use engine::{
    FurnaceBatchGrouper, LevelerSequencer, ResourceAllocator, ScheduleOrchestrator,
    ScheduleResult, ScheduleSummary, StagePipeline,
};

// 配置
pub use config::{ConfigManager, LineConfig};

// 导入 / 导出
pub use exporter::{ScheduleCsvWriter, ScheduleReport};
pub use importer::{ImportError, PlateImporter};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "钢板精整线排程引擎";
