// ==========================================
// 末端配送车队仿真 - 引擎层
// ==========================================
// 职责: 实现仿真业务规则,不拼 SQL
// 红线: Engine 不做 I/O,不修改输入快照
// ==========================================

pub mod error;
pub mod simulation;
pub mod simulation_core;
pub mod validation;

// 重导出核心引擎
pub use error::{SimulationError, SimulationResult, ValidationError};
pub use simulation::{run_simulation, SelectedDriver, SimulationEngine};
pub use simulation_core::SimulationCore;
pub use validation::ParameterValidator;
