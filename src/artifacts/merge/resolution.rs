//! Per-file three-way merge classification
//!
//! Every file named by the split point, the current head or the other tip is
//! classified by comparing snapshot ids (absence counts as a value of its
//! own):
//!
//! | ours vs split | theirs vs split | ours vs theirs | outcome                      |
//! |---------------|-----------------|----------------|------------------------------|
//! | same          | same            | -              | keep                         |
//! | changed       | same            | -              | keep                         |
//! | same          | changed         | -              | take theirs (remove if gone) |
//! | changed       | changed         | same           | keep                         |
//! | changed       | changed         | different      | conflict                     |

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ChangeSet: u8 {
        const NONE = 0b000;
        /// The current head departs from the split point
        const OURS = 0b001;
        /// The other tip departs from the split point
        const THEIRS = 0b010;
        const BOTH = Self::OURS.bits() | Self::THEIRS.bits();
        /// Both tips hold the same snapshot (or both lack the file)
        const AGREE = 0b100;
    }
}

impl ChangeSet {
    pub fn classify(
        split: Option<&ObjectId>,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> Self {
        let mut changes = ChangeSet::NONE;

        if ours != split {
            changes |= ChangeSet::OURS;
        }
        if theirs != split {
            changes |= ChangeSet::THEIRS;
        }
        if ours == theirs {
            changes |= ChangeSet::AGREE;
        }

        changes
    }
}

/// What the merge does with one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Leave the current version (or absence) untouched
    Keep,
    /// Stage the file for removal and delete it
    Remove,
    /// Check out and stage the other tip's snapshot
    TakeTheirs(ObjectId),
    /// Write both versions between conflict markers and stage the result
    Conflict {
        ours: Option<ObjectId>,
        theirs: Option<ObjectId>,
    },
}

impl Resolution {
    pub fn resolve(
        split: Option<&ObjectId>,
        ours: Option<&ObjectId>,
        theirs: Option<&ObjectId>,
    ) -> Self {
        let changes = ChangeSet::classify(split, ours, theirs);

        if changes.contains(ChangeSet::AGREE) || !changes.contains(ChangeSet::THEIRS) {
            Resolution::Keep
        } else if !changes.contains(ChangeSet::OURS) {
            match theirs {
                Some(theirs) => Resolution::TakeTheirs(theirs.clone()),
                None => Resolution::Remove,
            }
        } else {
            Resolution::Conflict {
                ours: ours.cloned(),
                theirs: theirs.cloned(),
            }
        }
    }

    /// Snapshot the working file must match for the merge to overwrite it
    ///
    /// Conflicted files are rewritten with markers, so no existing content
    /// matches them.
    pub fn target(&self) -> Option<&ObjectId> {
        match self {
            Resolution::Keep | Resolution::Remove | Resolution::Conflict { .. } => None,
            Resolution::TakeTheirs(theirs) => Some(theirs),
        }
    }
}
