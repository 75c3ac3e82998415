// ==========================================
// 末端配送车队仿真 - 日志初始化
// ==========================================
// 输出: 仿真运行摘要 (info)、跳过订单 (warn)、配置回退 (warn)
// 过滤: RUST_LOG，默认 info
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 初始化命令行进程的日志（fleet-sim / seed_fleet_data 启动时调用一次）
///
/// # 环境变量
/// - RUST_LOG: 例如 RUST_LOG=fleet_sim=debug 可看到逐单分配明细
///
/// # 示例
/// ```no_run
/// use fleet_sim::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// 测试日志：debug 级别写入测试输出，ApiTestEnv 每次构建都会调用
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
