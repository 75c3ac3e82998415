// ==========================================
// Repository 层集成测试
// ==========================================
// 测试范围:
// 1. 司机/线路/订单仓储的增删改查与约束
// 2. 仿真历史仓储: 追加、倒序查询、JSON 列还原
// 3. 管理员账号仓储
// 4. 仿真输入快照: 并发写入下线路与订单一致
// ==========================================

mod test_helpers;

use chrono::{Duration, NaiveDate};
use fleet_sim::domain::{
    DeliveryBreakdown, Driver, FuelCostBreakdown, Manager, Order, Route, SimulationResults,
    SimulationRun, TrafficLevel,
};
use fleet_sim::repository::{
    DriverRepository, FleetSnapshotRepository, ManagerRepository, OrderRepository,
    RepositoryError, RouteRepository, SimulationRunRepository,
};
use std::collections::HashSet;
use std::thread;

fn sample_run(id: &str, minutes: i64, profit: i64) -> SimulationRun {
    let base = NaiveDate::from_ymd_opt(2026, 3, 1)
        .unwrap()
        .and_hms_milli_opt(9, 0, 0, 250)
        .unwrap();
    SimulationRun {
        simulation_id: id.to_string(),
        created_at: base + Duration::minutes(minutes),
        created_by: Some("dispatcher".to_string()),
        available_drivers: 3,
        start_time: "09:00".to_string(),
        max_hours_per_day: 8,
        results: SimulationResults {
            total_profit: profit,
            efficiency_score: 66.67,
            on_time_deliveries: 2,
            total_deliveries: 3,
            fuel_cost: 155,
            penalties: 50,
            bonuses: 120,
        },
        delivery_breakdown: DeliveryBreakdown { on_time: 2, late: 1 },
        fuel_cost_breakdown: FuelCostBreakdown {
            low: 60,
            medium: 25,
            high: 70,
        },
    }
}

#[test]
fn test_driver_repository_upsert_保留名册顺序() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared_connection(&db_path).unwrap();
    let repo = DriverRepository::new(conn);

    for driver in test_helpers::standard_drivers() {
        repo.create(&driver).unwrap();
    }
    repo.upsert(&Driver::new("D1", "Amit K", 7.5, 44.0)).unwrap();

    let roster = repo.list_all().unwrap();
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0].driver_id, "D1");
    assert_eq!(roster[0].name, "Amit K");
    assert_eq!(roster[0].current_shift_hours, 7.5);

    let err = repo.create(&Driver::new("D2", "dup", 1.0, 1.0)).unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));

    let err = repo.update(&Driver::new("D404", "ghost", 1.0, 1.0)).unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
}

#[test]
fn test_route_repository_路况往返() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared_connection(&db_path).unwrap();
    let repo = RouteRepository::new(conn);

    for route in test_helpers::standard_routes() {
        repo.create(&route).unwrap();
    }

    let loaded = repo.list_all().unwrap();
    assert_eq!(loaded, test_helpers::standard_routes());
    assert_eq!(repo.find_by_id("R1").unwrap().unwrap().traffic_level, TrafficLevel::High);
    assert!(repo.find_by_id("R404").unwrap().is_none());

    repo.upsert(&Route::new("R1", 11.0, TrafficLevel::Low, 28.0)).unwrap();
    assert_eq!(repo.find_by_id("R1").unwrap().unwrap().distance_km, 11.0);
}

#[test]
fn test_order_repository_悬空线路允许() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared_connection(&db_path).unwrap();
    let repo = OrderRepository::new(conn);

    repo.create(&Order::new("O1", 250.0, "R404", "10:00")).unwrap();
    let order = repo.find_by_id("O1").unwrap().unwrap();
    assert_eq!(order.route_id, "R404");
    assert_eq!(order.delivery_timestamp, "10:00");

    repo.delete("O1").unwrap();
    assert!(matches!(repo.delete("O1"), Err(RepositoryError::NotFound { .. })));
}

#[test]
fn test_simulation_run_repository_倒序查询() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared_connection(&db_path).unwrap();
    let repo = SimulationRunRepository::new(conn);

    assert!(repo.find_latest().unwrap().is_none());

    repo.insert(&sample_run("run-b", 10, 2000)).unwrap();
    repo.insert(&sample_run("run-a", 0, 1000)).unwrap();
    repo.insert(&sample_run("run-c", 20, 3000)).unwrap();

    let recent = repo.list_recent(10).unwrap();
    let ids: Vec<&str> = recent.iter().map(|r| r.simulation_id.as_str()).collect();
    assert_eq!(ids, vec!["run-c", "run-b", "run-a"]);
    assert_eq!(repo.count().unwrap(), 3);

    let latest = repo.find_latest().unwrap().unwrap();
    assert_eq!(latest, sample_run("run-c", 20, 3000));

    let err = repo.insert(&sample_run("run-a", 30, 0)).unwrap_err();
    assert!(matches!(err, RepositoryError::UniqueConstraintViolation(_)));
}

#[test]
fn test_manager_repository_账号() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared_connection(&db_path).unwrap();
    let repo = ManagerRepository::new(conn);

    let created_at = NaiveDate::from_ymd_opt(2026, 1, 5)
        .unwrap()
        .and_hms_opt(8, 30, 0)
        .unwrap();
    let manager = Manager {
        username: "ops".to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        created_at,
    };
    repo.create(&manager).unwrap();

    let loaded = repo.find_by_username("ops").unwrap().unwrap();
    assert_eq!(loaded.password_hash, manager.password_hash);
    assert_eq!(loaded.created_at, created_at);
    assert!(repo.find_by_username("nobody").unwrap().is_none());
}

#[test]
fn test_fleet_snapshot_标准车队() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared_connection(&db_path).unwrap();
    let driver_repo = DriverRepository::new(conn.clone());
    let route_repo = RouteRepository::new(conn.clone());
    let order_repo = OrderRepository::new(conn.clone());
    let snapshot_repo = FleetSnapshotRepository::new(conn);

    assert!(snapshot_repo.load().unwrap().orders.is_empty());

    for driver in test_helpers::standard_drivers() {
        driver_repo.create(&driver).unwrap();
    }
    for route in test_helpers::standard_routes() {
        route_repo.create(&route).unwrap();
    }
    for order in test_helpers::standard_orders() {
        order_repo.create(&order).unwrap();
    }

    let snapshot = snapshot_repo.load().unwrap();
    assert_eq!(snapshot.drivers, test_helpers::standard_drivers());
    assert_eq!(snapshot.routes, test_helpers::standard_routes());
    assert_eq!(snapshot.orders, test_helpers::standard_orders());
}

#[test]
fn test_fleet_snapshot_并发写入不出现悬空订单() {
    let (_tmp, db_path) = test_helpers::create_test_db().unwrap();
    let conn = test_helpers::open_shared_connection(&db_path).unwrap();
    let snapshot_repo = FleetSnapshotRepository::new(conn.clone());

    // 写入方总是先写线路再写引用它的订单
    let writer = {
        let route_repo = RouteRepository::new(conn.clone());
        let order_repo = OrderRepository::new(conn);
        thread::spawn(move || {
            for i in 0..200 {
                let route_id = format!("R{}", i);
                route_repo
                    .create(&Route::new(route_id.as_str(), 5.0, TrafficLevel::Low, 20.0))
                    .expect("创建线路失败");
                order_repo
                    .create(&Order::new(format!("O{}", i), 500.0, route_id, "10:00"))
                    .expect("创建订单失败");
            }
        })
    };

    let mut last_seen = 0;
    while last_seen < 200 {
        let snapshot = snapshot_repo.load().expect("加载快照失败");
        let route_ids: HashSet<&str> = snapshot.routes.iter().map(|r| r.route_id.as_str()).collect();
        for order in &snapshot.orders {
            assert!(
                route_ids.contains(order.route_id.as_str()),
                "订单 {} 的线路 {} 不在同一快照中",
                order.order_id,
                order.route_id
            );
        }
        assert!(snapshot.orders.len() >= last_seen);
        last_seen = snapshot.orders.len();
        if writer.is_finished() && last_seen < 200 {
            // 写入已结束，再读一次即应看到全部订单
            last_seen = snapshot_repo.load().expect("加载快照失败").orders.len();
            assert_eq!(last_seen, 200);
        }
    }

    writer.join().expect("写入线程异常退出");
}
