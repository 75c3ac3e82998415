// ==========================================
// 末端配送车队仿真 - 车队数据 API
// ==========================================
// 职责: 司机名册、线路、订单的增删改查
// 校验: 写入前经 EntityValidator 做边界校验
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::EntityValidator;
use crate::domain::driver::Driver;
use crate::domain::order::Order;
use crate::domain::route::Route;
use crate::repository::driver_repo::DriverRepository;
use crate::repository::order_repo::OrderRepository;
use crate::repository::route_repo::RouteRepository;

// ==========================================
// FleetApi
// ==========================================
pub struct FleetApi {
    driver_repo: Arc<DriverRepository>,
    route_repo: Arc<RouteRepository>,
    order_repo: Arc<OrderRepository>,
}

impl FleetApi {
    pub fn new(
        driver_repo: Arc<DriverRepository>,
        route_repo: Arc<RouteRepository>,
        order_repo: Arc<OrderRepository>,
    ) -> Self {
        Self {
            driver_repo,
            route_repo,
            order_repo,
        }
    }

    // ==========================================
    // 司机
    // ==========================================

    /// 名册顺序列出全部司机
    pub fn list_drivers(&self) -> ApiResult<Vec<Driver>> {
        Ok(self.driver_repo.list_all()?)
    }

    pub fn get_driver(&self, driver_id: &str) -> ApiResult<Driver> {
        require_id("driver_id", driver_id)?;
        self.driver_repo
            .find_by_id(driver_id)?
            .ok_or_else(|| ApiError::NotFound(format!("司机(id={})不存在", driver_id)))
    }

    /// 新增司机（追加到名册末尾）
    pub fn create_driver(&self, driver: Driver) -> ApiResult<Driver> {
        EntityValidator::validate_driver(&driver)?;
        self.driver_repo.create(&driver)?;
        info!(driver_id = %driver.driver_id, "司机已创建");
        Ok(driver)
    }

    pub fn update_driver(&self, driver: Driver) -> ApiResult<Driver> {
        EntityValidator::validate_driver(&driver)?;
        self.driver_repo.update(&driver)?;
        info!(driver_id = %driver.driver_id, "司机已更新");
        Ok(driver)
    }

    pub fn delete_driver(&self, driver_id: &str) -> ApiResult<()> {
        require_id("driver_id", driver_id)?;
        self.driver_repo.delete(driver_id)?;
        info!(driver_id = %driver_id, "司机已删除");
        Ok(())
    }

    // ==========================================
    // 线路
    // ==========================================

    pub fn list_routes(&self) -> ApiResult<Vec<Route>> {
        Ok(self.route_repo.list_all()?)
    }

    pub fn get_route(&self, route_id: &str) -> ApiResult<Route> {
        require_id("route_id", route_id)?;
        self.route_repo
            .find_by_id(route_id)?
            .ok_or_else(|| ApiError::NotFound(format!("线路(id={})不存在", route_id)))
    }

    pub fn create_route(&self, route: Route) -> ApiResult<Route> {
        EntityValidator::validate_route(&route)?;
        self.route_repo.create(&route)?;
        info!(route_id = %route.route_id, traffic = %route.traffic_level, "线路已创建");
        Ok(route)
    }

    pub fn update_route(&self, route: Route) -> ApiResult<Route> {
        EntityValidator::validate_route(&route)?;
        self.route_repo.update(&route)?;
        info!(route_id = %route.route_id, "线路已更新");
        Ok(route)
    }

    /// 删除线路
    ///
    /// 引用该线路的订单保留，仿真时按悬空引用跳过
    pub fn delete_route(&self, route_id: &str) -> ApiResult<()> {
        require_id("route_id", route_id)?;
        self.route_repo.delete(route_id)?;
        info!(route_id = %route_id, "线路已删除");
        Ok(())
    }

    // ==========================================
    // 订单
    // ==========================================

    pub fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.order_repo.list_all()?)
    }

    pub fn get_order(&self, order_id: &str) -> ApiResult<Order> {
        require_id("order_id", order_id)?;
        self.order_repo
            .find_by_id(order_id)?
            .ok_or_else(|| ApiError::NotFound(format!("订单(id={})不存在", order_id)))
    }

    /// 新增订单
    ///
    /// 线路不存在时仍允许写入，仅记录警告
    pub fn create_order(&self, order: Order) -> ApiResult<Order> {
        EntityValidator::validate_order(&order)?;
        self.warn_if_route_missing(&order)?;
        self.order_repo.create(&order)?;
        info!(order_id = %order.order_id, route_id = %order.route_id, "订单已创建");
        Ok(order)
    }

    pub fn update_order(&self, order: Order) -> ApiResult<Order> {
        EntityValidator::validate_order(&order)?;
        self.warn_if_route_missing(&order)?;
        self.order_repo.update(&order)?;
        info!(order_id = %order.order_id, "订单已更新");
        Ok(order)
    }

    pub fn delete_order(&self, order_id: &str) -> ApiResult<()> {
        require_id("order_id", order_id)?;
        self.order_repo.delete(order_id)?;
        info!(order_id = %order_id, "订单已删除");
        Ok(())
    }

    fn warn_if_route_missing(&self, order: &Order) -> ApiResult<()> {
        if self.route_repo.find_by_id(&order.route_id)?.is_none() {
            warn!(
                order_id = %order.order_id,
                route_id = %order.route_id,
                "订单引用的线路不存在，仿真时将被跳过"
            );
        }
        Ok(())
    }
}

fn require_id(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    Ok(())
}
