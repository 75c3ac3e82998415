// ==========================================
// 末端配送车队仿真 - 仿真引擎
// ==========================================
// 输入: 仿真参数 + 司机名册 + 线路目录 + 订单批次（只读快照）
// 输出: SimulationOutcome（单订单投影 + 汇总 + 分布）
// 红线: 不做 I/O，不修改调用方数据；相同输入产出相同结果
// ==========================================

use std::collections::{BTreeMap, HashMap};

use tracing::{debug, info, instrument, warn};

use crate::config::SimulationRules;
use crate::domain::driver::Driver;
use crate::domain::order::Order;
use crate::domain::route::Route;
use crate::domain::simulation::{
    DeliveryBreakdown, FuelCostBreakdown, OrderOutcome, SimulationOutcome, SimulationParams,
    SimulationResults,
};
use crate::domain::types::TrafficLevel;
use crate::engine::error::{SimulationError, SimulationResult};
use crate::engine::simulation_core::SimulationCore;
use crate::engine::validation::ParameterValidator;

/// 按默认规则执行一次仿真
pub fn run_simulation(
    params: &SimulationParams,
    drivers: &[Driver],
    routes: &[Route],
    orders: &[Order],
) -> SimulationResult<SimulationOutcome> {
    SimulationEngine::default().run(params, drivers, routes, orders)
}

// ==========================================
// SelectedDriver - 本次仿真选中的司机
// ==========================================
// 疲劳标记在每次运行开始时重新计算，只在本次运行内有效
#[derive(Debug, Clone, Copy)]
pub struct SelectedDriver<'a> {
    pub driver: &'a Driver,
    pub is_fatigued: bool,
}

// ==========================================
// RunTotals - 运行中累加器
// ==========================================
#[derive(Debug)]
struct RunTotals {
    profit: f64,
    fuel_cost: f64,
    penalties: i64,
    bonuses: f64,
    on_time: usize,
    fuel_by_tier: BTreeMap<TrafficLevel, f64>,
}

impl Default for RunTotals {
    fn default() -> Self {
        Self {
            profit: 0.0,
            fuel_cost: 0.0,
            penalties: 0,
            bonuses: 0.0,
            on_time: 0,
            fuel_by_tier: TrafficLevel::ALL.iter().map(|level| (*level, 0.0)).collect(),
        }
    }
}

impl RunTotals {
    fn record(&mut self, outcome: &OrderOutcome) {
        self.profit += outcome.profit;
        self.fuel_cost += outcome.fuel_cost;
        self.penalties += outcome.penalty;
        self.bonuses += outcome.bonus;
        if outcome.is_on_time {
            self.on_time += 1;
        }
        *self.fuel_by_tier.entry(outcome.traffic_level).or_insert(0.0) += outcome.fuel_cost;
    }

    fn tier(&self, level: TrafficLevel) -> i64 {
        let cost = self.fuel_by_tier.get(&level).copied().unwrap_or(0.0);
        SimulationCore::round_half_up(cost) as i64
    }
}

// ==========================================
// SimulationEngine - 仿真引擎
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct SimulationEngine {
    rules: SimulationRules,
}

impl SimulationEngine {
    /// 创建使用指定规则的引擎
    pub fn new(rules: SimulationRules) -> Self {
        Self { rules }
    }

    /// 执行一次仿真
    ///
    /// # 流程
    /// 1. 参数校验（失败即返回，不触碰数据）
    /// 2. 取名册前 N 名司机，不足则 InsufficientDrivers
    /// 3. 重新计算疲劳标记
    /// 4. 构建线路索引
    /// 5. 按订单顺序轮询分配司机并计算时长/罚金/奖励/燃油
    /// 6. 汇总效率与分布
    #[instrument(skip_all, fields(drivers = drivers.len(), routes = routes.len(), orders = orders.len()))]
    pub fn run(
        &self,
        params: &SimulationParams,
        drivers: &[Driver],
        routes: &[Route],
        orders: &[Order],
    ) -> SimulationResult<SimulationOutcome> {
        // === 步骤 1: 参数校验 ===
        let validated = ParameterValidator::validate(params)?;

        // === 步骤 2-3: 选取司机 + 疲劳判定 ===
        let selected = self.select_drivers(drivers, validated.available_drivers)?;

        // === 步骤 4: 线路索引 ===
        // route_id 唯一性由存储层保证；重复时以后出现者为准
        let route_index: HashMap<&str, &Route> =
            routes.iter().map(|r| (r.route_id.as_str(), r)).collect();

        // === 步骤 5: 逐单计算 ===
        let mut totals = RunTotals::default();
        let mut order_outcomes = Vec::with_capacity(orders.len());
        let mut skipped_order_ids = Vec::new();

        for (idx, order) in orders.iter().enumerate() {
            let route = match route_index.get(order.route_id.as_str()) {
                Some(route) => *route,
                None => {
                    warn!(
                        order_id = %order.order_id,
                        route_id = %order.route_id,
                        "订单线路不存在，跳过"
                    );
                    skipped_order_ids.push(order.order_id.clone());
                    continue;
                }
            };

            // 轮询下标按订单位置计算（被跳过的订单同样占位）
            let driver = selected[idx % selected.len()];
            let outcome = self.evaluate_order(order, route, driver);
            debug!(
                order_id = %outcome.order_id,
                driver_id = %outcome.assigned_driver_id,
                actual_delivery_time = outcome.actual_delivery_time,
                on_time = outcome.is_on_time,
                "订单计算完成"
            );

            totals.record(&outcome);
            order_outcomes.push(outcome);
        }

        // === 步骤 6: 汇总 ===
        let total_deliveries = orders.len();
        let efficiency_score = SimulationCore::efficiency_score(totals.on_time, total_deliveries);

        let results = SimulationResults {
            total_profit: SimulationCore::round_half_up(totals.profit) as i64,
            efficiency_score,
            on_time_deliveries: totals.on_time,
            total_deliveries,
            fuel_cost: SimulationCore::round_half_up(totals.fuel_cost) as i64,
            penalties: totals.penalties,
            bonuses: SimulationCore::round_half_up(totals.bonuses) as i64,
        };

        let delivery_breakdown = DeliveryBreakdown {
            on_time: totals.on_time,
            late: total_deliveries - totals.on_time,
        };

        let fuel_cost_breakdown = FuelCostBreakdown {
            low: totals.tier(TrafficLevel::Low),
            medium: totals.tier(TrafficLevel::Medium),
            high: totals.tier(TrafficLevel::High),
        };

        info!(
            total_profit = results.total_profit,
            efficiency_score = results.efficiency_score,
            on_time = results.on_time_deliveries,
            total = results.total_deliveries,
            skipped = skipped_order_ids.len(),
            "仿真完成"
        );

        Ok(SimulationOutcome {
            params: validated,
            results,
            delivery_breakdown,
            fuel_cost_breakdown,
            order_outcomes,
            skipped_order_ids,
        })
    }

    /// 取名册前 `requested` 名司机并计算疲劳标记
    ///
    /// 名册顺序即存储返回顺序，不重新排序
    pub fn select_drivers<'a>(
        &self,
        drivers: &'a [Driver],
        requested: usize,
    ) -> SimulationResult<Vec<SelectedDriver<'a>>> {
        if drivers.len() < requested {
            return Err(SimulationError::InsufficientDrivers {
                found: drivers.len(),
                requested,
            });
        }

        Ok(drivers
            .iter()
            .take(requested)
            .map(|driver| SelectedDriver {
                driver,
                is_fatigued: SimulationCore::is_fatigued(driver.current_shift_hours, &self.rules),
            })
            .collect())
    }

    /// 计算单个订单的结果投影
    pub fn evaluate_order(&self, order: &Order, route: &Route, driver: SelectedDriver<'_>) -> OrderOutcome {
        let rules = &self.rules;

        let actual_delivery_time =
            SimulationCore::actual_delivery_time(route.base_time_min, driver.is_fatigued, rules);
        let is_late = SimulationCore::is_late(actual_delivery_time, route.base_time_min, rules);

        let (penalty, bonus) = if is_late {
            (rules.late_penalty, 0.0)
        } else {
            (0, SimulationCore::on_time_bonus(order.value_rs, rules))
        };

        let fuel_cost = SimulationCore::fuel_cost(route.distance_km, route.traffic_level, rules);
        let profit = order.value_rs + bonus - penalty as f64 - fuel_cost;

        OrderOutcome {
            order_id: order.order_id.clone(),
            route_id: route.route_id.clone(),
            assigned_driver_id: driver.driver.driver_id.clone(),
            driver_fatigued: driver.is_fatigued,
            traffic_level: route.traffic_level,
            actual_delivery_time,
            is_on_time: !is_late,
            penalty,
            bonus,
            fuel_cost,
            profit,
            delivery_timestamp: order.delivery_timestamp.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ValidationError;

    fn driver(id: &str, shift: f64) -> Driver {
        Driver::new(id, format!("司机{}", id), shift, 40.0)
    }

    fn params(n: i64) -> SimulationParams {
        SimulationParams::new(n, "09:00", 8)
    }

    #[test]
    fn test_scenario_non_fatigued_high_traffic() {
        let drivers = vec![driver("D1", 6.0)];
        let routes = vec![Route::new("R1", 10.0, TrafficLevel::High, 30.0)];
        let orders = vec![Order::new("O1", 500.0, "R1", "10:00")];

        let outcome = run_simulation(&params(1), &drivers, &routes, &orders).unwrap();
        let o = &outcome.order_outcomes[0];
        assert_eq!(o.actual_delivery_time, 30);
        assert!(o.is_on_time);
        assert_eq!(o.fuel_cost, 70.0);
        assert_eq!(o.penalty, 0);
        assert_eq!(outcome.results.total_profit, 430);
    }

    #[test]
    fn test_scenario_fatigued_still_on_time() {
        let drivers = vec![driver("D1", 9.0)];
        let routes = vec![Route::new("R1", 10.0, TrafficLevel::High, 30.0)];
        let orders = vec![Order::new("O1", 500.0, "R1", "10:00")];

        let outcome = run_simulation(&params(1), &drivers, &routes, &orders).unwrap();
        let o = &outcome.order_outcomes[0];
        assert!(o.driver_fatigued);
        assert_eq!(o.actual_delivery_time, 39);
        assert!(o.is_on_time);
    }

    #[test]
    fn test_scenario_fatigued_late_penalty() {
        let drivers = vec![driver("D1", 10.0)];
        let routes = vec![Route::new("R1", 4.0, TrafficLevel::Low, 40.0)];
        let orders = vec![Order::new("O1", 1500.0, "R1", "10:00")];

        let outcome = run_simulation(&params(1), &drivers, &routes, &orders).unwrap();
        let o = &outcome.order_outcomes[0];
        assert_eq!(o.actual_delivery_time, 52);
        assert!(!o.is_on_time);
        assert_eq!(o.penalty, 50);
        assert_eq!(o.bonus, 0.0); // 延误不发奖励
        assert_eq!(outcome.results.penalties, 50);
        assert_eq!(outcome.delivery_breakdown, DeliveryBreakdown { on_time: 0, late: 1 });
    }

    #[test]
    fn test_round_robin_assignment() {
        let drivers = vec![driver("D1", 1.0), driver("D2", 1.0), driver("D3", 1.0)];
        let routes = vec![Route::new("R1", 1.0, TrafficLevel::Low, 10.0)];
        let orders: Vec<Order> = (0..5)
            .map(|i| Order::new(format!("O{}", i), 100.0, "R1", ""))
            .collect();

        // 只用前 2 名司机
        let outcome = run_simulation(&params(2), &drivers, &routes, &orders).unwrap();
        let assigned: Vec<&str> = outcome
            .order_outcomes
            .iter()
            .map(|o| o.assigned_driver_id.as_str())
            .collect();
        assert_eq!(assigned, vec!["D1", "D2", "D1", "D2", "D1"]);
    }

    #[test]
    fn test_dangling_route_is_skipped_but_counted() {
        let drivers = vec![driver("D1", 1.0), driver("D2", 12.0)];
        let routes = vec![Route::new("R1", 2.0, TrafficLevel::Medium, 20.0)];
        let orders = vec![
            Order::new("O1", 100.0, "R1", ""),
            Order::new("O2", 100.0, "R404", ""),
            Order::new("O3", 100.0, "R1", ""),
        ];

        let outcome = run_simulation(&params(2), &drivers, &routes, &orders).unwrap();
        assert_eq!(outcome.skipped_order_ids, vec!["O2".to_string()]);
        assert_eq!(outcome.order_outcomes.len(), 2);
        // O3 位于下标 2 → 司机 D1
        assert_eq!(outcome.order_outcomes[1].assigned_driver_id, "D1");
        assert_eq!(outcome.results.total_deliveries, 3);
        assert_eq!(outcome.results.on_time_deliveries, 2);
        assert_eq!(outcome.results.efficiency_score, 66.67);
    }

    #[test]
    fn test_insufficient_drivers() {
        let drivers = vec![driver("D1", 1.0)];
        let err = run_simulation(&params(3), &drivers, &[], &[]).unwrap_err();
        assert_eq!(err, SimulationError::InsufficientDrivers { found: 1, requested: 3 });
    }

    #[test]
    fn test_validation_precedes_driver_check() {
        let err = run_simulation(&params(0), &[], &[], &[]).unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Validation(ValidationError::DriverCountOutOfRange { .. })
        ));
    }

    #[test]
    fn test_custom_rules() {
        let rules = SimulationRules {
            late_penalty: 80,
            late_grace_minutes: 0,
            ..SimulationRules::default()
        };
        let engine = SimulationEngine::new(rules);
        let drivers = vec![driver("D1", 9.0)];
        let routes = vec![Route::new("R1", 1.0, TrafficLevel::Low, 10.0)];
        let orders = vec![Order::new("O1", 100.0, "R1", "")];

        let outcome = engine.run(&params(1), &drivers, &routes, &orders).unwrap();
        assert_eq!(outcome.order_outcomes[0].actual_delivery_time, 13);
        assert_eq!(outcome.results.penalties, 80);
    }
}
