// ==========================================
// 钢板精整线排程引擎 - 共享资源分配器
// ==========================================
// 职责: 选可用时间最早的资源，计算开工/完工，推进资源可用时间
// 红线: 并列按资源枚举顺序裁决，与请求先后无关
// ==========================================

use crate::domain::plate::{ResourceAssignment, StageWindow};
use crate::domain::resource::ResourcePool;
use chrono::NaiveDateTime;
use tracing::trace;

// ==========================================
// ResourceAllocator - 资源分配器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct ResourceAllocator {
    // 无状态引擎，资源状态由 ResourcePool 承载
}

impl ResourceAllocator {
    pub fn new() -> Self {
        Self {}
    }

    /// 分配一台资源
    ///
    /// start = max(ready_at, 资源可用时间)；end = start + 资源固定作业时长。
    /// 唯一副作用: 该资源可用时间推进到 end。
    ///
    /// # 参数
    /// - `pool`: 候选资源池（会被修改）
    /// - `plate_index`: 钢板序号（记账用）
    /// - `ready_at`: 钢板到达本工序的时间
    pub fn allocate(
        &self,
        pool: &mut ResourcePool,
        plate_index: usize,
        ready_at: NaiveDateTime,
    ) -> ResourceAssignment {
        let idx = pool.least_loaded();
        let resource = pool.resource(idx);
        let start = ready_at.max(resource.available_at);
        let window = StageWindow::new(start, resource.service_duration());
        let resource_id = resource.resource_id.clone();

        trace!(
            pool = %pool.pool_name,
            resource = %resource_id,
            plate_index,
            start = %window.start,
            end = %window.end,
            "资源分配"
        );

        pool.commit(idx, plate_index, window);
        ResourceAssignment {
            resource_id,
            window,
        }
    }
}
