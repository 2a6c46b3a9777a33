// ==========================================
// 钢板精整线排程引擎 - 领域模型层
// ==========================================
// 职责: 定义钢板、资源池、常化炉、矫直机等领域实体
// 红线: 不含文件读写逻辑,不含引擎逻辑
// ==========================================

pub mod furnace;
pub mod leveler;
pub mod plate;
pub mod resource;
pub mod types;

// 重导出核心类型
pub use furnace::{CapacityConstraint, FurnaceBatch, FurnaceLoad, FurnaceState, FurnaceUnit};
pub use leveler::LevelerState;
pub use plate::{
    FurnaceAssignment, PlateRecord, PlateSchedule, ResourceAssignment, ScheduledPlate,
    StageWindow,
};
pub use resource::{Allocation, PoolResource, ResourcePool};
pub use types::{LevelerOrder, Route, ScheduleStatus, Stage, UnschedulableReason};
