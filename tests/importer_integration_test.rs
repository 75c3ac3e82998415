// ==========================================
// 车队数据导入集成测试
// ==========================================
// 测试范围:
// 1. 目录批量导入（并发）与行级错误汇总
// 2. 重复导入幂等
// 3. 导入后直接运行仿真
// ==========================================

mod test_helpers;

use std::path::PathBuf;
use std::sync::Arc;

use fleet_sim::domain::SimulationParams;
use fleet_sim::engine::run_simulation;
use fleet_sim::importer::{FleetEntity, FleetImporter, FleetImporterImpl, ImportError};
use fleet_sim::repository::{DriverRepository, OrderRepository, RouteRepository};

struct ImportEnv {
    importer: FleetImporterImpl,
    driver_repo: Arc<DriverRepository>,
    route_repo: Arc<RouteRepository>,
    order_repo: Arc<OrderRepository>,
    _temp_file: tempfile::NamedTempFile,
}

fn setup() -> ImportEnv {
    let (temp_file, db_path) = test_helpers::create_test_db().expect("无法创建测试数据库");
    let conn = test_helpers::open_shared_connection(&db_path).expect("无法打开数据库");

    let driver_repo = Arc::new(DriverRepository::new(conn.clone()));
    let route_repo = Arc::new(RouteRepository::new(conn.clone()));
    let order_repo = Arc::new(OrderRepository::new(conn));
    let importer = FleetImporterImpl::new(driver_repo.clone(), route_repo.clone(), order_repo.clone());

    ImportEnv {
        importer,
        driver_repo,
        route_repo,
        order_repo,
        _temp_file: temp_file,
    }
}

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fleet")
}

#[tokio::test]
async fn test_import_directory_批量导入() {
    let env = setup();

    let results = env
        .importer
        .import_directory(fixture_dir())
        .await
        .expect("导入失败");
    assert_eq!(results.len(), 3);

    let summaries: Vec<_> = results.into_iter().map(|r| r.expect("文件导入失败")).collect();

    let drivers = summaries.iter().find(|s| s.entity == FleetEntity::Drivers).unwrap();
    assert_eq!(drivers.total_rows, 4);
    assert_eq!(drivers.imported, 3);
    assert_eq!(drivers.failed, 1);
    assert_eq!(drivers.errors[0].row_number, 5);

    let routes = summaries.iter().find(|s| s.entity == FleetEntity::Routes).unwrap();
    assert_eq!(routes.imported, 3);
    assert_eq!(routes.failed, 1);

    // 空行被跳过，金额为 0 的订单被拒绝
    let orders = summaries.iter().find(|s| s.entity == FleetEntity::Orders).unwrap();
    assert_eq!(orders.total_rows, 4);
    assert_eq!(orders.imported, 3);

    let roster = env.driver_repo.list_all().unwrap();
    let names: Vec<&str> = roster.iter().map(|d| d.driver_id.as_str()).collect();
    assert_eq!(names, vec!["Amit", "Priya", "Rohit"]);
    assert_eq!(roster[0].past_7_day_work_hours, 51.0);
    assert_eq!(roster[2].past_7_day_work_hours, 42.5);
}

#[tokio::test]
async fn test_reimport_幂等() {
    let env = setup();

    env.importer.import_directory(fixture_dir()).await.expect("导入失败");
    env.importer.import_directory(fixture_dir()).await.expect("导入失败");

    assert_eq!(env.driver_repo.count().unwrap(), 3);
    assert_eq!(env.route_repo.list_all().unwrap().len(), 3);
    assert_eq!(env.order_repo.list_all().unwrap().len(), 3);
}

#[tokio::test]
async fn test_import_then_simulate_导入后仿真() {
    let env = setup();
    env.importer.import_directory(fixture_dir()).await.expect("导入失败");

    let outcome = run_simulation(
        &SimulationParams::new(3, "09:00", 8),
        &env.driver_repo.list_all().unwrap(),
        &env.route_repo.list_all().unwrap(),
        &env.order_repo.list_all().unwrap(),
    )
    .expect("仿真失败");

    assert_eq!(outcome.results.total_profit, 2415);
    assert_eq!(outcome.results.efficiency_score, 66.67);
}

#[tokio::test]
async fn test_import_single_file_部分文件() {
    let env = setup();
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("routes.csv"),
        "route_id,distance,traffic,base_time\n1,25,High,125\n2,12,Medium,48\n",
    )
    .unwrap();

    let results = env.importer.import_directory(dir.path()).await.expect("导入失败");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].as_ref().unwrap().imported, 2);

    let summary = env
        .importer
        .import_routes(dir.path().join("routes.csv"))
        .await
        .expect("导入失败");
    assert_eq!(summary.imported, 2);
    assert_eq!(env.route_repo.find_by_id("1").unwrap().unwrap().base_time_min, 125.0);
}

#[tokio::test]
async fn test_import_missing_path_路径不存在() {
    let env = setup();

    let err = env
        .importer
        .import_directory("/nonexistent/fleet-data")
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));

    let err = env
        .importer
        .import_drivers("/nonexistent/drivers.csv")
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}
