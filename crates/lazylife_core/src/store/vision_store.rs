//! Vision store: goals with owned milestones and vision board cards.

use super::{Collection, DomainStore, Draft, Patch, Record};
use crate::model::vision::{
    Goal, GoalPatch, Milestone, NewGoal, NewVisionItem, VisionItem, VisionItemPatch,
};
use crate::model::EntityId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionStore {
    goals: Collection<Goal>,
    vision_items: Collection<VisionItem>,
    initialized: bool,
}

impl VisionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn goals(&self) -> &[Goal] {
        self.goals.as_slice()
    }

    pub fn vision_items(&self) -> &[VisionItem] {
        self.vision_items.as_slice()
    }

    pub fn goal(&self, id: EntityId) -> Option<&Goal> {
        self.goals.get(id)
    }

    /// Creates a goal; every milestone name becomes an open milestone.
    pub fn add_goal(&mut self, goal: NewGoal) -> EntityId {
        self.goals.add(goal)
    }

    pub fn update_goal(&mut self, id: EntityId, patch: GoalPatch) -> bool {
        self.goals.update(id, patch)
    }

    pub fn delete_goal(&mut self, id: EntityId) -> bool {
        self.goals.remove(id).is_some()
    }

    /// Returns `None` when the goal does not exist.
    pub fn add_milestone(&mut self, goal_id: EntityId, name: impl Into<String>) -> Option<EntityId> {
        let goal = self.goals.get_mut(goal_id)?;
        let id = fresh_milestone_id(goal);
        goal.milestones.push(Milestone {
            id,
            name: name.into(),
            completed: false,
        });
        Some(id)
    }

    /// Flips one milestone; returns its new state.
    pub fn toggle_milestone(&mut self, goal_id: EntityId, milestone_id: EntityId) -> Option<bool> {
        let milestone = self
            .goals
            .get_mut(goal_id)?
            .milestones
            .iter_mut()
            .find(|milestone| milestone.id == milestone_id)?;
        milestone.completed = !milestone.completed;
        Some(milestone.completed)
    }

    pub fn delete_milestone(&mut self, goal_id: EntityId, milestone_id: EntityId) -> bool {
        let Some(goal) = self.goals.get_mut(goal_id) else {
            return false;
        };
        let before = goal.milestones.len();
        goal.milestones.retain(|milestone| milestone.id != milestone_id);
        goal.milestones.len() != before
    }

    pub fn add_vision_item(&mut self, item: NewVisionItem) -> EntityId {
        self.vision_items.add(item)
    }

    pub fn update_vision_item(&mut self, id: EntityId, patch: VisionItemPatch) -> bool {
        self.vision_items.update(id, patch)
    }

    pub fn delete_vision_item(&mut self, id: EntityId) -> bool {
        self.vision_items.remove(id).is_some()
    }
}

impl DomainStore for VisionStore {
    const SLOT_KEY: &'static str = "vision-store";

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    fn seed_defaults(&mut self) {
        if !self.vision_items.is_empty() {
            return;
        }
        let defaults = [
            ("Run a marathon", "Finish a full marathon under 4 hours", "health"),
            ("Financial freedom", "Live debt free with a six month buffer", "finance"),
            ("Travel the world", "Visit a new country every year", "adventure"),
        ];
        for (title, description, category) in defaults {
            self.vision_items.add(NewVisionItem {
                title: title.to_string(),
                description: description.to_string(),
                category: category.to_string(),
                image_url: None,
            });
        }
    }
}

fn fresh_milestone_id(goal: &Goal) -> EntityId {
    loop {
        let candidate = Uuid::new_v4();
        if goal.milestones.iter().all(|milestone| milestone.id != candidate) {
            return candidate;
        }
    }
}

impl Record for Goal {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewGoal {
    type Record = Goal;

    fn into_record(self, id: EntityId) -> Goal {
        let mut goal = Goal {
            id,
            title: self.title,
            status: self.status,
            milestones: Vec::with_capacity(self.milestones.len()),
            category: self.category,
            timeframe: self.timeframe,
            deadline: self.deadline,
        };
        for name in self.milestones {
            let milestone_id = fresh_milestone_id(&goal);
            goal.milestones.push(Milestone {
                id: milestone_id,
                name,
                completed: false,
            });
        }
        goal
    }
}

impl Patch<Goal> for GoalPatch {
    fn apply_to(self, target: &mut Goal) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(status) = self.status {
            target.status = status;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(timeframe) = self.timeframe {
            target.timeframe = timeframe;
        }
        if let Some(deadline) = self.deadline {
            target.deadline = deadline;
        }
    }
}

impl Record for VisionItem {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Draft for NewVisionItem {
    type Record = VisionItem;

    fn into_record(self, id: EntityId) -> VisionItem {
        VisionItem {
            id,
            title: self.title,
            description: self.description,
            category: self.category,
            image_url: self.image_url,
            achieved: false,
        }
    }
}

impl Patch<VisionItem> for VisionItemPatch {
    fn apply_to(self, target: &mut VisionItem) {
        if let Some(title) = self.title {
            target.title = title;
        }
        if let Some(description) = self.description {
            target.description = description;
        }
        if let Some(category) = self.category {
            target.category = category;
        }
        if let Some(image_url) = self.image_url {
            target.image_url = image_url;
        }
        if let Some(achieved) = self.achieved {
            target.achieved = achieved;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VisionStore;
    use crate::model::vision::{GoalPatch, GoalStatus, NewGoal, Timeframe};
    use chrono::NaiveDate;

    fn launch_goal() -> NewGoal {
        NewGoal {
            title: "Launch side project".to_string(),
            status: GoalStatus::InProgress,
            milestones: vec!["Prototype".to_string(), "Beta".to_string()],
            category: "career".to_string(),
            timeframe: Timeframe::MediumTerm,
            deadline: NaiveDate::from_ymd_opt(2026, 6, 30),
        }
    }

    #[test]
    fn milestones_are_owned_by_their_goal() {
        let mut store = VisionStore::new();
        let goal_id = store.add_goal(launch_goal());
        let first = store.goal(goal_id).expect("goal").milestones[0].id;

        assert_eq!(store.toggle_milestone(goal_id, first), Some(true));
        let launch = store.add_milestone(goal_id, "Launch").expect("goal exists");
        assert_eq!(store.goal(goal_id).expect("goal").milestones.len(), 3);
        assert!(store.delete_milestone(goal_id, launch));
        assert!(!store.delete_milestone(goal_id, launch));

        assert!(store.delete_goal(goal_id));
        assert_eq!(store.toggle_milestone(goal_id, first), None);
    }

    #[test]
    fn patch_can_clear_deadline() {
        let mut store = VisionStore::new();
        let goal_id = store.add_goal(launch_goal());
        assert!(store.update_goal(
            goal_id,
            GoalPatch {
                deadline: Some(None),
                status: Some(GoalStatus::Completed),
                ..GoalPatch::default()
            }
        ));
        let goal = store.goal(goal_id).expect("goal");
        assert_eq!(goal.deadline, None);
        assert_eq!(goal.status, GoalStatus::Completed);
        assert_eq!(goal.title, "Launch side project");
    }
}
