//! Skill training state transition.
//!
//! Only the bookkeeping lives here: which skill sits in the training slot
//! and what the owner is told. Training duration is someone else's concern.

use std::rc::Rc;

use cargohold_foundation::{AttributeId, Error, ErrorKind, ItemFlag, Notification, Result};
use tracing::{error, trace};

use crate::cache::ItemCache;
use crate::item::{InventoryItem, ItemRef};

impl InventoryItem {
    /// Starts training `skill` on this character.
    ///
    /// Any skill already in training is moved back to the skill flag. A
    /// skill book that is not yet a trained skill is moved into this
    /// character with level and points reset to zero.
    ///
    /// # Errors
    ///
    /// Fails if this item is not a pilot, or if `skill` carries the skill
    /// flag but belongs to some other container.
    pub fn train_skill(self: &Rc<Self>, cache: &ItemCache, skill: &ItemRef) -> Result<()> {
        if self.flag() != ItemFlag::PILOT {
            error!(character = %self.id(), skill = %skill.id(), "training on a non-pilot item");
            return Err(invalid(self, "not a pilot"));
        }
        if skill.flag() == ItemFlag::SKILL_IN_TRAINING {
            trace!(character = %self.id(), skill = %skill.id(), "skill already in training");
            return Ok(());
        }

        self.load_contents(cache, false)?;
        let is_book = skill.flag() != ItemFlag::SKILL;
        if !is_book && !self.contains_item(skill.id(), false) {
            error!(character = %self.id(), skill = %skill.id(), "skill belongs to another container");
            return Err(invalid(self, "skill is not contained in this character"));
        }

        for training in self.find_by_flag(ItemFlag::SKILL_IN_TRAINING) {
            training.change_flag(cache, ItemFlag::SKILL, false)?;
            self.notify_owner(
                cache,
                Notification::SkillTrainingStopped {
                    skill: training.id(),
                },
            );
        }

        if is_book {
            trace!(character = %self.id(), skill = %skill.id(), "initial training of skill");
            skill.move_into(cache, self, ItemFlag::SKILL_IN_TRAINING, false)?;
            skill.set_attribute(cache, AttributeId::SKILL_LEVEL, 0_i64)?;
            skill.set_attribute(cache, AttributeId::SKILL_POINTS, 0_i64)?;
        } else {
            trace!(character = %self.id(), skill = %skill.id(), "resuming training of skill");
            skill.change_flag(cache, ItemFlag::SKILL_IN_TRAINING, true)?;
        }

        self.notify_owner(cache, Notification::SkillTrainingStarted { skill: skill.id() });
        Ok(())
    }
}

fn invalid(character: &InventoryItem, message: &str) -> Error {
    Error::new(ErrorKind::InvalidTraining {
        character: character.id(),
        message: message.to_string(),
    })
}
