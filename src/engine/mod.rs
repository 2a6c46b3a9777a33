// ==========================================
// 钢板精整线排程引擎 - 引擎层
// ==========================================
// 职责: 资源分配 / 工序流水线 / 常化组炉 / 矫直排队 / 完工时间
// 红线: 引擎无 I/O，同一输入必然得到同一排程
// ==========================================

pub mod allocator;
pub mod context;
pub mod finish_resolver;
pub mod furnace_grouper;
pub mod leveler;
pub mod orchestrator;
pub mod pipeline;

// 重导出核心引擎
pub use allocator::ResourceAllocator;
pub use context::{ScheduleContext, THICK_CUTTER_POOL, THIN_CUTTER_POOL, UT_POOL};
pub use finish_resolver::FinishTimeResolver;
pub use furnace_grouper::{FurnaceBatchGrouper, GroupingOutcome};
pub use leveler::{LevelerSequencer, LevelingSlot};
pub use orchestrator::{ScheduleOrchestrator, ScheduleResult, ScheduleSummary};
pub use pipeline::{NormalizingCandidate, PipelineOutput, StagePipeline};
