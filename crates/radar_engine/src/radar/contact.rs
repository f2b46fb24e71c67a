//! Contacts and the host entity source
//!
//! The radar never owns entity state. Hosts expose their entities through
//! [`Contact`] views and hand out candidate slices through [`ContactSource`].

use crate::foundation::math::Point2;
use serde::{Deserialize, Serialize};

/// Relationship of a contact to the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    /// Owned by the viewer
    Friendly,
    /// Hostile
    Enemy,
    /// Unaligned
    Neutral,
    /// Another faction fighting alongside the viewer
    Allied,
}

impl Relationship {
    /// Mask bit for this relationship
    pub fn mask(self) -> RelationshipMask {
        match self {
            Self::Friendly => RelationshipMask::FRIENDLY,
            Self::Enemy => RelationshipMask::ENEMY,
            Self::Neutral => RelationshipMask::NEUTRAL,
            Self::Allied => RelationshipMask::ALLIED,
        }
    }
}

bitflags::bitflags! {
    /// Set of relationships
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RelationshipMask: u8 {
        /// Friendly contacts
        const FRIENDLY = 1 << 0;
        /// Enemy contacts
        const ENEMY = 1 << 1;
        /// Neutral contacts
        const NEUTRAL = 1 << 2;
        /// Allied contacts
        const ALLIED = 1 << 3;
    }
}

impl RelationshipMask {
    /// Whether the mask contains `relationship`
    pub fn includes(self, relationship: Relationship) -> bool {
        self.contains(relationship.mask())
    }
}

/// Read-only view of a world entity considered for radar display
pub trait Contact {
    /// World position
    fn position(&self) -> Point2;

    /// Collision or visual radius in world units
    fn radius(&self) -> f32;

    /// Relationship to the viewer
    fn relationship(&self) -> Relationship;

    /// Whether the viewer can currently see this entity (fog of war)
    fn is_visible(&self) -> bool;

    /// Entity-type identifier matched against the exclusion lists
    fn kind_id(&self) -> &str;
}

/// Host-side supplier of the viewer and its candidate contacts
pub trait ContactSource {
    /// Concrete contact type
    type Contact: Contact;

    /// Position of the tracked viewer, `None` when there is none this tick
    fn viewer_position(&self) -> Option<Point2>;

    /// Candidate contacts for a scan
    ///
    /// `center` and `radius` describe the area the radar will show; hosts
    /// with a spatial index may use them to pre-select, others can return
    /// everything. Exact range checks happen in the filter either way.
    fn candidates(&self, center: Point2, radius: f32) -> &[Self::Contact];
}
