// ==========================================
// 钢板精整线排程引擎 - 配置管理器
// ==========================================
// 职责: 配置加载、校验、快照
// 存储: JSON 文件（未提供时使用内置默认值）
// 查找顺序: 显式路径 > 环境变量 > 用户配置目录 > 默认值
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::line_config::LineConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 配置文件路径环境变量
pub const CONFIG_PATH_ENV: &str = "PLATE_LINE_SCHED_CONFIG";

/// 用户配置目录下的子目录与文件名
const CONFIG_DIR_NAME: &str = "plate-line-sched";
const CONFIG_FILE_NAME: &str = "line_config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    config: LineConfig,
    source: Option<PathBuf>,
}

impl ConfigManager {
    /// 使用内置默认参数
    pub fn with_defaults() -> Self {
        Self {
            config: LineConfig::default(),
            source: None,
        }
    }

    /// 从指定 JSON 文件加载（加载后立即校验）
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        let config: LineConfig = serde_json::from_str(&raw)?;
        config.validate()?;

        info!(path = %path.display(), "已加载产线配置");
        Ok(Self {
            config,
            source: Some(path.to_path_buf()),
        })
    }

    /// 按查找顺序加载配置
    ///
    /// # 参数
    /// - explicit: 命令行显式指定的路径（指定但不存在时报错）
    pub fn discover(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_PATH_ENV) {
            let env_path = env_path.trim();
            if !env_path.is_empty() {
                return Self::from_file(env_path);
            }
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                return Self::from_file(path);
            }
            debug!(path = %path.display(), "用户配置不存在，使用默认参数");
        }

        Ok(Self::with_defaults())
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }

    pub fn into_config(self) -> LineConfig {
        self.config
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 获取配置快照（JSON格式，用于随排程结果一起输出）
    pub fn config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.config)?)
    }

    /// 从配置快照恢复
    pub fn restore_from_snapshot(snapshot_json: &str) -> ConfigResult<Self> {
        let config: LineConfig = serde_json::from_str(snapshot_json)?;
        config.validate()?;
        Ok(Self {
            config,
            source: None,
        })
    }

    /// 写出当前配置（用于生成配置模板）
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let json = serde_json::to_string_pretty(&self.config)?;
        fs::write(path, json)?;
        Ok(())
    }
}

/// 用户配置目录下的默认配置路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
