// ==========================================
// 钢板精整线排程引擎 - 配置层
// ==========================================
// 职责: 产线参数管理,支持 JSON 文件覆写
// ==========================================

pub mod config_manager;
pub mod error;
pub mod line_config;

// 重导出核心配置类型
pub use config_manager::{default_config_path, ConfigManager, CONFIG_PATH_ENV};
pub use error::{ConfigError, ConfigResult};
pub use line_config::{
    CoolingConfig, FinalInspectionConfig, FurnaceSpec, LevelingConfig, LineConfig, MachineSpec,
    NormalizingConfig, ShearingConfig, TrimmingConfig, UltrasonicConfig,
};
