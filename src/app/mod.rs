// ==========================================
// 末端配送车队仿真 - 应用层
// ==========================================
// 职责: 装配仓储、配置与 API 实例
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
