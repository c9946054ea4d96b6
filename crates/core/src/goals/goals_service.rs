use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::goals_errors::GoalError;
use super::goals_model::{Goal, GoalStatus, GoalUpdate, NewGoal};
use super::goals_traits::{GoalRepositoryTrait, GoalServiceTrait};
use crate::errors::Result;
use crate::time::Clock;

/// Service for managing savings goals.
pub struct GoalService {
    repository: Arc<dyn GoalRepositoryTrait>,
    clock: Arc<dyn Clock>,
}

impl GoalService {
    pub fn new(repository: Arc<dyn GoalRepositoryTrait>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }
}

#[async_trait]
impl GoalServiceTrait for GoalService {
    async fn create_goal(&self, new_goal: NewGoal, user_id: &str) -> Result<Goal> {
        let now = self.clock.now();
        let goal = Goal {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: new_goal.name,
            target_amount: new_goal.target_amount,
            current_amount: new_goal.current_amount.unwrap_or(Decimal::ZERO),
            deadline: new_goal.deadline,
            status: GoalStatus::InProgress,
            notes: new_goal.notes,
            created_at: now,
            updated_at: now,
        };
        self.repository.create(goal).await
    }

    async fn update_goal(&self, goal_id: &str, update: GoalUpdate, user_id: &str) -> Result<Goal> {
        let mut goal = self.repository.get_by_id(goal_id, user_id)?;

        if goal.status == GoalStatus::Completed {
            return Err(GoalError::CompletedImmutable.into());
        }

        goal.name = update.name;
        goal.target_amount = update.target_amount;
        goal.deadline = update.deadline;
        goal.notes = update.notes;
        goal.updated_at = self.clock.now();

        self.repository.update(goal).await
    }

    async fn add_amount(&self, goal_id: &str, amount: Decimal, user_id: &str) -> Result<Goal> {
        let mut goal = self.repository.get_by_id(goal_id, user_id)?;

        if goal.status != GoalStatus::InProgress {
            return Err(GoalError::NotInProgress.into());
        }

        goal.current_amount += amount;
        if goal.current_amount >= goal.target_amount {
            goal.status = GoalStatus::Completed;
        }
        goal.updated_at = self.clock.now();

        self.repository.update(goal).await
    }

    async fn delete_goal(&self, goal_id: &str, user_id: &str) -> Result<()> {
        self.repository.delete(goal_id, user_id).await?;
        Ok(())
    }

    fn get_goal(&self, goal_id: &str, user_id: &str) -> Result<Goal> {
        self.repository.get_by_id(goal_id, user_id)
    }

    fn list_goals(&self, user_id: &str) -> Result<Vec<Goal>> {
        self.repository.list(user_id)
    }
}
