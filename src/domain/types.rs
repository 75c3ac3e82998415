// ==========================================
// 末端配送车队仿真 - 领域类型定义
// ==========================================
// 职责: 路况等级等跨实体共享的枚举类型
// 序列化格式: Low / Medium / High (与数据库、导入文件一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 路况等级 (Traffic Level)
// ==========================================
// 仅 High 产生燃油附加费
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TrafficLevel {
    Low,    // 畅通
    Medium, // 一般
    High,   // 拥堵
}

impl TrafficLevel {
    /// 全部路况等级（燃油分档汇总按此顺序输出）
    pub const ALL: [TrafficLevel; 3] = [TrafficLevel::Low, TrafficLevel::Medium, TrafficLevel::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrafficLevel::Low => "Low",
            TrafficLevel::Medium => "Medium",
            TrafficLevel::High => "High",
        }
    }
}

impl fmt::Display for TrafficLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TrafficLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(TrafficLevel::Low),
            "medium" => Ok(TrafficLevel::Medium),
            "high" => Ok(TrafficLevel::High),
            other => Err(format!("未知路况等级: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_traffic_level_parse() {
        assert_eq!("High".parse::<TrafficLevel>().unwrap(), TrafficLevel::High);
        assert_eq!(" low ".parse::<TrafficLevel>().unwrap(), TrafficLevel::Low);
        assert_eq!("MEDIUM".parse::<TrafficLevel>().unwrap(), TrafficLevel::Medium);
        assert!("jam".parse::<TrafficLevel>().is_err());
    }

    #[test]
    fn test_traffic_level_display_roundtrip() {
        for level in TrafficLevel::ALL {
            assert_eq!(level.to_string().parse::<TrafficLevel>().unwrap(), level);
        }
    }
}
