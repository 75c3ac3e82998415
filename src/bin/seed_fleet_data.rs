// ==========================================
// 末端配送车队仿真 - 种子数据导入工具
// ==========================================
// 用法: seed_fleet_data <csv_dir> [db_path]
// 目录约定: drivers.csv / routes.csv / orders.csv（缺失文件跳过）
// 可选: FLEET_SIM_USER / FLEET_SIM_PASSWORD 同时注册调度管理员
// ==========================================

use anyhow::{bail, Context};
use fleet_sim::api::ApiError;
use fleet_sim::app::AppState;
use fleet_sim::config::{default_db_path, AppConfig};
use fleet_sim::importer::FleetImporter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fleet_sim::logging::init();

    let mut args = std::env::args().skip(1);
    let Some(csv_dir) = args.next() else {
        bail!("用法: seed_fleet_data <csv_dir> [db_path]");
    };
    let db_path = args.next().unwrap_or_else(default_db_path);

    let mut config = AppConfig::from_env();
    config.db_path = db_path;
    let state = AppState::new(config).map_err(anyhow::Error::msg)?;

    let results = state
        .importer
        .import_directory(&csv_dir)
        .await
        .with_context(|| format!("导入目录失败: {}", csv_dir))?;

    let mut failed_files = 0;
    for result in &results {
        match result {
            Ok(summary) => println!(
                "{:<8} {:>5} 行, 导入 {:>5}, 失败 {:>5}  ({})",
                format!("{:?}", summary.entity),
                summary.total_rows,
                summary.imported,
                summary.failed,
                summary.file
            ),
            Err(msg) => {
                failed_files += 1;
                eprintln!("{}", msg);
            }
        }
    }

    if let (Ok(user), Ok(password)) = (
        std::env::var("FLEET_SIM_USER"),
        std::env::var("FLEET_SIM_PASSWORD"),
    ) {
        match state.auth_api.register_manager(&user, &password) {
            Ok(()) => println!("已注册调度管理员: {}", user),
            Err(ApiError::Conflict(_)) => println!("调度管理员已存在: {}", user),
            Err(e) => return Err(e.into()),
        }
    }

    if failed_files > 0 {
        bail!("{} 个文件导入失败", failed_files);
    }
    Ok(())
}
