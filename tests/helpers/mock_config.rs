// ==========================================
// 测试用产线配置
// ==========================================

use plate_line_sched::config::{FurnaceSpec, LineConfig};
use plate_line_sched::domain::types::LevelerOrder;

/// 默认产线参数
pub fn default_config() -> LineConfig {
    LineConfig::default()
}

/// 自定义炉容量
pub fn config_with_furnaces(furnaces: &[(&str, f64)]) -> LineConfig {
    let mut config = LineConfig::default();
    config.normalizing.furnaces = furnaces
        .iter()
        .map(|(id, cap)| FurnaceSpec {
            furnace_id: id.to_string(),
            capacity_mm: *cap,
        })
        .collect();
    config
}

/// 打开装炉回退（轮到的炉装不下时尝试其它炉）
pub fn config_with_fallback() -> LineConfig {
    let mut config = LineConfig::default();
    config.normalizing.furnace_fallback = true;
    config
}

pub fn config_with_leveler_order(order: LevelerOrder) -> LineConfig {
    let mut config = LineConfig::default();
    config.leveling.order = order;
    config
}
