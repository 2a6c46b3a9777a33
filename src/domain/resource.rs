// ==========================================
// 钢板精整线排程引擎 - 共享资源池领域模型
// ==========================================
// 用途: 切边机组 / 探伤仪 的"下一可用时间"管理
// 红线: 资源可用时间只增不减，只由自身分配事务更新
// ==========================================

use crate::domain::plate::StageWindow;
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// PoolResource - 单台资源
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolResource {
    pub resource_id: String,
    pub service_minutes: i64,          // 固定作业时长（按资源，不按钢板）
    pub available_at: NaiveDateTime,   // 下一可用时间
}

impl PoolResource {
    pub fn service_duration(&self) -> Duration {
        Duration::minutes(self.service_minutes)
    }
}

/// 单次分配记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub resource_id: String,
    pub plate_index: usize,
    pub window: StageWindow,
}

// ==========================================
// ResourcePool - 资源池
// ==========================================
// 资源顺序即并列时的裁决顺序
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourcePool {
    pub pool_name: String,
    resources: Vec<PoolResource>,
    ledger: Vec<Allocation>,
}

impl ResourcePool {
    /// 创建资源池
    ///
    /// # 参数
    /// - `pool_name`: 资源池名称（日志用）
    /// - `specs`: (资源ID, 作业分钟) 列表，顺序即裁决顺序
    /// - `initial_available_at`: 所有资源的初始可用时间
    ///
    /// # 返回
    /// - None: `specs` 为空（资源池至少需要一台资源）
    pub fn new(
        pool_name: impl Into<String>,
        specs: &[(String, i64)],
        initial_available_at: NaiveDateTime,
    ) -> Option<Self> {
        if specs.is_empty() {
            return None;
        }
        Some(Self {
            pool_name: pool_name.into(),
            resources: specs
                .iter()
                .map(|(id, minutes)| PoolResource {
                    resource_id: id.clone(),
                    service_minutes: *minutes,
                    available_at: initial_available_at,
                })
                .collect(),
            ledger: Vec::new(),
        })
    }

    pub fn resources(&self) -> &[PoolResource] {
        &self.resources
    }

    pub fn ledger(&self) -> &[Allocation] {
        &self.ledger
    }

    pub fn available_at(&self, resource_id: &str) -> Option<NaiveDateTime> {
        self.resources
            .iter()
            .find(|r| r.resource_id == resource_id)
            .map(|r| r.available_at)
    }

    /// 可用时间最早的资源下标（并列取枚举顺序靠前者）
    pub(crate) fn least_loaded(&self) -> usize {
        let mut best = 0;
        for (idx, resource) in self.resources.iter().enumerate().skip(1) {
            if resource.available_at < self.resources[best].available_at {
                best = idx;
            }
        }
        best
    }

    pub(crate) fn resource(&self, idx: usize) -> &PoolResource {
        &self.resources[idx]
    }

    /// 提交一次分配: 推进资源可用时间并记账
    pub(crate) fn commit(&mut self, idx: usize, plate_index: usize, window: StageWindow) {
        let resource = &mut self.resources[idx];
        debug_assert!(window.start >= resource.available_at);
        resource.available_at = window.end;
        self.ledger.push(Allocation {
            resource_id: resource.resource_id.clone(),
            plate_index,
            window,
        });
    }
}
