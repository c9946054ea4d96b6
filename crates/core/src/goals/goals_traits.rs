//! Goal repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::goals_model::{Goal, GoalUpdate, NewGoal};
use crate::errors::Result;

/// Trait defining the contract for Goal repository operations.
#[async_trait]
pub trait GoalRepositoryTrait: Send + Sync {
    async fn create(&self, goal: Goal) -> Result<Goal>;

    async fn update(&self, goal: Goal) -> Result<Goal>;

    async fn delete(&self, goal_id: &str, user_id: &str) -> Result<usize>;

    fn get_by_id(&self, goal_id: &str, user_id: &str) -> Result<Goal>;

    fn list(&self, user_id: &str) -> Result<Vec<Goal>>;
}

/// Trait defining the contract for Goal service operations.
#[async_trait]
pub trait GoalServiceTrait: Send + Sync {
    async fn create_goal(&self, new_goal: NewGoal, user_id: &str) -> Result<Goal>;

    /// Edits descriptive fields; rejected once the goal is completed.
    async fn update_goal(&self, goal_id: &str, update: GoalUpdate, user_id: &str) -> Result<Goal>;

    /// Deposits into an in-progress goal, completing it when the target is
    /// reached.
    async fn add_amount(&self, goal_id: &str, amount: Decimal, user_id: &str) -> Result<Goal>;

    async fn delete_goal(&self, goal_id: &str, user_id: &str) -> Result<()>;

    fn get_goal(&self, goal_id: &str, user_id: &str) -> Result<Goal>;

    fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>>;
}
