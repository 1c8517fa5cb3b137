//! 거래 목표와 달성률.
//!
//! 목표 자체는 저장하지 않으며, 달성률은 매번 현재 통계로부터 계산합니다.

use chrono::{DateTime, Utc};
use journal_core::DecimalExt;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::Statistics;

/// 목표 기간 유형.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalKind {
    /// 주간 목표 (거래 횟수 기준)
    Weekly,
    /// 월간 목표 (수익률 기준)
    Monthly,
}

impl fmt::Display for GoalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GoalKind::Weekly => write!(f, "weekly"),
            GoalKind::Monthly => write!(f, "monthly"),
        }
    }
}

/// 거래 목표.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    /// 목표치 (월간: 수익률 %, 주간: 거래 횟수)
    pub target: Decimal,
    pub description: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Goal {
    /// 새 목표를 생성합니다.
    pub fn new(kind: GoalKind, target: Decimal, description: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            target,
            description: description.into(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// 현재 통계 기준 달성률 (%, 최대 100).
    ///
    /// 목표치가 0 이하이면 0을 반환합니다.
    pub fn progress(&self, stats: &Statistics) -> Decimal {
        if self.target <= Decimal::ZERO {
            return Decimal::ZERO;
        }

        let value = match self.kind {
            GoalKind::Monthly => stats.total_return,
            GoalKind::Weekly => Decimal::from(stats.total_trades),
        };

        value
            .div_or_zero(self.target)
            .mul_or_saturate(dec!(100))
            .min(dec!(100))
    }

    /// 목표를 달성했는지 확인합니다.
    pub fn is_achieved(&self, stats: &Statistics) -> bool {
        self.progress(stats) >= dec!(100)
    }
}

/// 기본 목표: 월 수익률 5%, 주간 거래 10회.
pub fn default_goals() -> Vec<Goal> {
    vec![
        Goal::new(GoalKind::Monthly, dec!(5), "Monthly Return Target"),
        Goal::new(GoalKind::Weekly, dec!(10), "Max Trades per Week"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(total_return: Decimal, total_trades: usize) -> Statistics {
        Statistics {
            total_return,
            total_trades,
            ..Statistics::default()
        }
    }

    #[test]
    fn test_default_goals() {
        let goals = default_goals();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].kind, GoalKind::Monthly);
        assert_eq!(goals[0].target, dec!(5));
        assert_eq!(goals[1].kind, GoalKind::Weekly);
        assert_eq!(goals[1].target, dec!(10));
        assert!(goals.iter().all(|g| g.is_active));
        assert_ne!(goals[0].id, goals[1].id);
    }

    #[test]
    fn test_monthly_progress() {
        let goal = Goal::new(GoalKind::Monthly, dec!(5), "return");

        assert_eq!(goal.progress(&stats(dec!(2), 0)), dec!(40));
        assert_eq!(goal.progress(&stats(dec!(12), 0)), dec!(100));
        assert!(goal.is_achieved(&stats(dec!(5), 0)));
        assert!(!goal.is_achieved(&stats(dec!(4.9), 0)));
    }

    #[test]
    fn test_weekly_progress() {
        let goal = Goal::new(GoalKind::Weekly, dec!(10), "trades");

        assert_eq!(goal.progress(&stats(Decimal::ZERO, 3)), dec!(30));
        assert_eq!(goal.progress(&stats(Decimal::ZERO, 25)), dec!(100));
    }

    #[test]
    fn test_non_positive_target() {
        let goal = Goal::new(GoalKind::Weekly, Decimal::ZERO, "none");
        assert_eq!(goal.progress(&stats(Decimal::ZERO, 5)), Decimal::ZERO);
    }

    #[test]
    fn test_json_shape() {
        let goal = Goal::new(GoalKind::Monthly, dec!(5), "return");
        let value = serde_json::to_value(&goal).unwrap();

        assert_eq!(value["type"], "monthly");
        assert_eq!(value["isActive"], true);
        assert!(value.get("createdAt").is_some());
    }
}
