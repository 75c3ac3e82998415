// ==========================================
// 末端配送车队仿真 - 命令行入口
// ==========================================
// 用法: fleet-sim <availableDrivers> <startTime> <maxHoursPerDay>
// 环境变量:
// - FLEET_SIM_USER / FLEET_SIM_PASSWORD: 调度管理员凭据
// - FLEET_SIM_DB_PATH / FLEET_SIM_JWT_SECRET: 见 config::AppConfig
// 输出: SimulationResponse (JSON)
// ==========================================

use anyhow::{bail, Context};
use fleet_sim::app::AppState;
use fleet_sim::config::AppConfig;
use fleet_sim::domain::SimulationParams;

const ENV_USER: &str = "FLEET_SIM_USER";
const ENV_PASSWORD: &str = "FLEET_SIM_PASSWORD";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fleet_sim::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", fleet_sim::APP_NAME, fleet_sim::VERSION);
    tracing::info!("==================================================");

    let params = parse_args(std::env::args().skip(1).collect())?;

    let config = AppConfig::from_env();
    tracing::info!("使用数据库: {}", config.db_path);
    let state = AppState::new(config).map_err(anyhow::Error::msg)?;

    let username = std::env::var(ENV_USER).with_context(|| format!("{} 未设置", ENV_USER))?;
    let password = std::env::var(ENV_PASSWORD).with_context(|| format!("{} 未设置", ENV_PASSWORD))?;

    let login = state.auth_api.login(&username, &password)?;
    let caller = state.auth_api.authenticate(&login.token)?;

    let response = state.simulation_api.run_simulation(&caller, params).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}

/// 解析位置参数；缺失的参数保留为 None，由仿真校验报告
fn parse_args(args: Vec<String>) -> anyhow::Result<SimulationParams> {
    if args.len() > 3 {
        bail!("用法: fleet-sim <availableDrivers> <startTime> <maxHoursPerDay>");
    }

    let mut args = args.into_iter();
    let available_drivers = args
        .next()
        .map(|s| s.parse::<i64>().with_context(|| format!("availableDrivers 不是整数: {}", s)))
        .transpose()?;
    let start_time = args.next();
    let max_hours_per_day = args
        .next()
        .map(|s| s.parse::<i64>().with_context(|| format!("maxHoursPerDay 不是整数: {}", s)))
        .transpose()?;

    Ok(SimulationParams {
        available_drivers,
        start_time,
        max_hours_per_day,
    })
}
