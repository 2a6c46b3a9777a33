// ==========================================
// 钢板精整线排程引擎 - 产线参数
// ==========================================
// 职责: 工序时长、资源池、炉容量、矫直参数
// 说明: 所有字段均带默认值，配置文件只需写需要覆写的项
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::LevelerOrder;
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

// ==========================================
// LineConfig - 产线参数全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineConfig {
    pub cooling: CoolingConfig,
    pub shearing: ShearingConfig,
    pub trimming: TrimmingConfig,
    pub ultrasonic: UltrasonicConfig,
    /// 打号时长（分钟）
    pub punching_minutes: i64,
    /// 检查时长（分钟）
    pub inspection_minutes: i64,
    /// 完工缓冲（分钟），直发与常化两条路径共用
    pub finish_buffer_minutes: i64,
    pub normalizing: NormalizingConfig,
    pub leveling: LevelingConfig,
    pub final_inspection: FinalInspectionConfig,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self {
            cooling: CoolingConfig::default(),
            shearing: ShearingConfig::default(),
            trimming: TrimmingConfig::default(),
            ultrasonic: UltrasonicConfig::default(),
            punching_minutes: 5,
            inspection_minutes: 5,
            finish_buffer_minutes: 4 * 60,
            normalizing: NormalizingConfig::default(),
            leveling: LevelingConfig::default(),
            final_inspection: FinalInspectionConfig::default(),
        }
    }
}

/// 冷却: 厚度 < 阈值 用薄板时长，否则用厚板时长
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoolingConfig {
    pub thick_threshold_mm: f64,
    pub thin_minutes: i64,
    pub thick_minutes: i64,
}

impl Default for CoolingConfig {
    fn default() -> Self {
        Self {
            thick_threshold_mm: 40.0,
            thin_minutes: 8 * 60,
            thick_minutes: 24 * 60,
        }
    }
}

impl CoolingConfig {
    pub fn duration_for(&self, thickness_mm: f64) -> Duration {
        if thickness_mm < self.thick_threshold_mm {
            Duration::minutes(self.thin_minutes)
        } else {
            Duration::minutes(self.thick_minutes)
        }
    }
}

/// 剪切: 厚度 >= 阈值 才执行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShearingConfig {
    pub min_thickness_mm: f64,
    pub duration_minutes: i64,
}

impl Default for ShearingConfig {
    fn default() -> Self {
        Self {
            min_thickness_mm: 40.0,
            duration_minutes: 60,
        }
    }
}

/// 切边机
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSpec {
    pub machine_id: String,
    pub service_minutes: i64,
}

impl MachineSpec {
    /// 火焰/等离子切割机 35 分钟，其余机型 90 分钟
    pub fn by_class(machine_id: &str) -> Self {
        let service_minutes = if machine_id.starts_with("Oxy") || machine_id.starts_with("Plasma") {
            35
        } else {
            90
        };
        Self {
            machine_id: machine_id.to_string(),
            service_minutes,
        }
    }
}

/// 切边: 厚度 <= 分组阈值 用薄板组，否则用厚板组
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrimmingConfig {
    pub edge_marker: String,
    pub group_threshold_mm: f64,
    pub thin_group: Vec<MachineSpec>,
    pub thick_group: Vec<MachineSpec>,
}

impl Default for TrimmingConfig {
    fn default() -> Self {
        Self {
            edge_marker: "Trimmed".to_string(),
            group_threshold_mm: 40.0,
            thin_group: ["Oxy1", "Plasma1", "Pug1", "Pug2"]
                .iter()
                .map(|id| MachineSpec::by_class(id))
                .collect(),
            thick_group: ["Oxy2", "Pug3", "Pug4", "Pug5", "Pug6", "Pug7"]
                .iter()
                .map(|id| MachineSpec::by_class(id))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UltrasonicConfig {
    pub tester_ids: Vec<String>,
    pub service_minutes: i64,
}

impl Default for UltrasonicConfig {
    fn default() -> Self {
        Self {
            tester_ids: vec!["UT1".to_string(), "UT2".to_string(), "UT3".to_string()],
            service_minutes: 15,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FurnaceSpec {
    pub furnace_id: String,
    pub capacity_mm: f64,
}

/// 常化: 交货状态匹配且厚度 >= 下限 才进入组炉
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizingConfig {
    pub supply_marker: String,
    pub min_thickness_mm: f64,
    /// 检查结束到可装炉的等待（分钟）
    pub ready_delay_minutes: i64,
    /// 轮换顺序即列表顺序
    pub furnaces: Vec<FurnaceSpec>,
    pub cycle_minutes: i64,
    pub cooldown_minutes: i64,
    /// 当班炉装不下任何钢板时，是否让其余炉子尝试
    pub furnace_fallback: bool,
}

impl Default for NormalizingConfig {
    fn default() -> Self {
        Self {
            supply_marker: "normalized".to_string(),
            min_thickness_mm: 14.0,
            ready_delay_minutes: 3 * 60,
            furnaces: vec![
                FurnaceSpec {
                    furnace_id: "NF1".to_string(),
                    capacity_mm: 1630.0,
                },
                FurnaceSpec {
                    furnace_id: "NF2".to_string(),
                    capacity_mm: 800.0,
                },
            ],
            cycle_minutes: 12 * 60,
            cooldown_minutes: 6 * 60,
            furnace_fallback: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelingConfig {
    /// 出炉到可矫直的等待（分钟）
    pub delay_after_furnace_minutes: i64,
    pub service_minutes: i64,
    pub order: LevelerOrder,
}

impl Default for LevelingConfig {
    fn default() -> Self {
        Self {
            delay_after_furnace_minutes: 8 * 60,
            service_minutes: 10,
            order: LevelerOrder::BatchOrder,
        }
    }
}

/// 终检: 时长 = 厚度 × 每毫米分钟数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinalInspectionConfig {
    pub minutes_per_mm: i64,
    /// 厚度先取整（截断小数）再计算
    pub truncate_thickness: bool,
}

impl Default for FinalInspectionConfig {
    fn default() -> Self {
        Self {
            minutes_per_mm: 2,
            truncate_thickness: true,
        }
    }
}

impl FinalInspectionConfig {
    pub fn duration_for(&self, thickness_mm: f64) -> Duration {
        if self.truncate_thickness {
            Duration::minutes(thickness_mm.trunc() as i64 * self.minutes_per_mm)
        } else {
            let seconds = thickness_mm * self.minutes_per_mm as f64 * 60.0;
            Duration::seconds(seconds.round() as i64)
        }
    }
}

// ==========================================
// 校验
// ==========================================
impl LineConfig {
    /// 校验参数合法性
    ///
    /// 资源池不可为空、ID 不可重复、时长不可为负、炉容量必须为正
    pub fn validate(&self) -> ConfigResult<()> {
        check_minutes("cooling.thin_minutes", self.cooling.thin_minutes)?;
        check_minutes("cooling.thick_minutes", self.cooling.thick_minutes)?;
        check_minutes("shearing.duration_minutes", self.shearing.duration_minutes)?;
        check_minutes("punching_minutes", self.punching_minutes)?;
        check_minutes("inspection_minutes", self.inspection_minutes)?;
        check_minutes("finish_buffer_minutes", self.finish_buffer_minutes)?;
        check_minutes("ultrasonic.service_minutes", self.ultrasonic.service_minutes)?;
        check_minutes("normalizing.ready_delay_minutes", self.normalizing.ready_delay_minutes)?;
        check_minutes("normalizing.cycle_minutes", self.normalizing.cycle_minutes)?;
        check_minutes("normalizing.cooldown_minutes", self.normalizing.cooldown_minutes)?;
        check_minutes(
            "leveling.delay_after_furnace_minutes",
            self.leveling.delay_after_furnace_minutes,
        )?;
        check_minutes("leveling.service_minutes", self.leveling.service_minutes)?;
        check_minutes(
            "final_inspection.minutes_per_mm",
            self.final_inspection.minutes_per_mm,
        )?;

        check_machines("trimming.thin_group", &self.trimming.thin_group)?;
        check_machines("trimming.thick_group", &self.trimming.thick_group)?;
        check_unique_ids(
            "ultrasonic.tester_ids",
            self.ultrasonic.tester_ids.iter().map(|s| s.as_str()),
        )?;

        if self.normalizing.furnaces.is_empty() {
            return Err(ConfigError::EmptyPool("normalizing.furnaces".to_string()));
        }
        check_unique_ids(
            "normalizing.furnaces",
            self.normalizing.furnaces.iter().map(|f| f.furnace_id.as_str()),
        )?;
        for furnace in &self.normalizing.furnaces {
            if !furnace.capacity_mm.is_finite() || furnace.capacity_mm <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: format!("normalizing.furnaces[{}].capacity_mm", furnace.furnace_id),
                    value: furnace.capacity_mm.to_string(),
                    message: "炉容量必须为正数".to_string(),
                });
            }
        }

        Ok(())
    }

    // 常用时长换算
    pub fn punching_duration(&self) -> Duration {
        Duration::minutes(self.punching_minutes)
    }

    pub fn inspection_duration(&self) -> Duration {
        Duration::minutes(self.inspection_minutes)
    }

    pub fn finish_buffer(&self) -> Duration {
        Duration::minutes(self.finish_buffer_minutes)
    }
}

fn check_minutes(key: &str, minutes: i64) -> ConfigResult<()> {
    if minutes < 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            value: minutes.to_string(),
            message: "时长不可为负".to_string(),
        });
    }
    Ok(())
}

fn check_machines(key: &str, machines: &[MachineSpec]) -> ConfigResult<()> {
    if machines.is_empty() {
        return Err(ConfigError::EmptyPool(key.to_string()));
    }
    for machine in machines {
        check_minutes(&format!("{}[{}]", key, machine.machine_id), machine.service_minutes)?;
    }
    check_unique_ids(key, machines.iter().map(|m| m.machine_id.as_str()))
}

fn check_unique_ids<'a>(key: &str, ids: impl Iterator<Item = &'a str>) -> ConfigResult<()> {
    let mut seen = HashSet::new();
    let mut count = 0;
    for id in ids {
        count += 1;
        if !seen.insert(id) {
            return Err(ConfigError::DuplicateId {
                key: key.to_string(),
                id: id.to_string(),
            });
        }
    }
    if count == 0 {
        return Err(ConfigError::EmptyPool(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = LineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trimming.thin_group.len(), 4);
        assert_eq!(config.trimming.thick_group.len(), 6);
        assert_eq!(config.ultrasonic.tester_ids.len(), 3);
        assert_eq!(config.normalizing.furnaces[0].capacity_mm, 1630.0);
    }

    #[test]
    fn test_machine_class_durations() {
        assert_eq!(MachineSpec::by_class("Oxy1").service_minutes, 35);
        assert_eq!(MachineSpec::by_class("Plasma1").service_minutes, 35);
        assert_eq!(MachineSpec::by_class("Pug4").service_minutes, 90);
    }

    #[test]
    fn test_cooling_threshold() {
        let cooling = CoolingConfig::default();
        assert_eq!(cooling.duration_for(39.9), Duration::hours(8));
        assert_eq!(cooling.duration_for(40.0), Duration::hours(24));
    }

    #[test]
    fn test_final_inspection_truncates_thickness() {
        let fi = FinalInspectionConfig::default();
        assert_eq!(fi.duration_for(20.7), Duration::minutes(40));

        let exact = FinalInspectionConfig {
            truncate_thickness: false,
            ..FinalInspectionConfig::default()
        };
        assert_eq!(exact.duration_for(20.5), Duration::minutes(41));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: LineConfig =
            serde_json::from_str(r#"{"punching_minutes": 7, "leveling": {"order": "INPUT_ORDER"}}"#)
                .unwrap();
        assert_eq!(config.punching_minutes, 7);
        assert_eq!(config.inspection_minutes, 5);
        assert_eq!(config.leveling.order, LevelerOrder::InputOrder);
        assert_eq!(config.leveling.service_minutes, 10);
    }

    #[test]
    fn test_validate_rejects_empty_group() {
        let mut config = LineConfig::default();
        config.trimming.thick_group.clear();
        assert!(matches!(config.validate(), Err(ConfigError::EmptyPool(_))));
    }

    #[test]
    fn test_validate_rejects_duplicate_tester() {
        let mut config = LineConfig::default();
        config.ultrasonic.tester_ids = vec!["UT1".to_string(), "UT1".to_string()];
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DuplicateId { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_positive_capacity() {
        let mut config = LineConfig::default();
        config.normalizing.furnaces[1].capacity_mm = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
