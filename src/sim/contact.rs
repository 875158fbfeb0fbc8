//! Contact classification
//!
//! The host physics reports raw contacts between participants. Only two of
//! them matter to gameplay: trash entering a squid's pickup detector, and
//! trash hitting the top of the boat.

use serde::{Deserialize, Serialize};

use super::trash::TrashId;

/// Identifies a pickup detector (the trigger zone attached to a squid)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DetectorId(pub u32);

/// Something the host physics can report as touching something else
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Participant {
    Squid,
    Detector(DetectorId),
    BoatTop,
    Trash(TrashId),
    /// Scenery, walls, anything without gameplay meaning
    Other(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContactKind {
    /// Sensor overlap began
    TriggerEnter,
    /// Solid collision began
    CollisionEnter,
}

/// A contact reported by the host for this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub kind: ContactKind,
    pub a: Participant,
    pub b: Participant,
}

impl Contact {
    pub fn trigger(a: Participant, b: Participant) -> Self {
        Self {
            kind: ContactKind::TriggerEnter,
            a,
            b,
        }
    }

    pub fn collision(a: Participant, b: Participant) -> Self {
        Self {
            kind: ContactKind::CollisionEnter,
            a,
            b,
        }
    }
}

/// A contact that means something to gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    /// Trash entered a pickup detector
    DetectorOverlap { detector: DetectorId, trash: TrashId },
    /// Trash hit the boat
    BoatHit { trash: TrashId },
}

/// Turn a raw contact into an interaction, or None if it doesn't matter
pub fn classify(contact: &Contact) -> Option<Interaction> {
    if contact.a == contact.b {
        return None;
    }

    // Participants may be reported in either order
    let pairs = [(contact.a, contact.b), (contact.b, contact.a)];

    for (first, second) in pairs {
        match (contact.kind, first, second) {
            (
                ContactKind::TriggerEnter,
                Participant::Detector(detector),
                Participant::Trash(trash),
            ) => {
                return Some(Interaction::DetectorOverlap { detector, trash });
            }
            (ContactKind::CollisionEnter, Participant::BoatTop, Participant::Trash(trash)) => {
                return Some(Interaction::BoatHit { trash });
            }
            _ => {}
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detector_overlap_either_order() {
        let det = Participant::Detector(DetectorId(1));
        let trash = Participant::Trash(TrashId(7));

        let expected = Some(Interaction::DetectorOverlap {
            detector: DetectorId(1),
            trash: TrashId(7),
        });
        assert_eq!(classify(&Contact::trigger(det, trash)), expected);
        assert_eq!(classify(&Contact::trigger(trash, det)), expected);
    }

    #[test]
    fn test_boat_hit_requires_collision() {
        let boat = Participant::BoatTop;
        let trash = Participant::Trash(TrashId(3));

        assert_eq!(
            classify(&Contact::collision(trash, boat)),
            Some(Interaction::BoatHit { trash: TrashId(3) })
        );
        // Boat top is a solid, a trigger report from it means nothing
        assert_eq!(classify(&Contact::trigger(boat, trash)), None);
    }

    #[test]
    fn test_irrelevant_contacts_ignored() {
        let trash = Participant::Trash(TrashId(2));
        assert_eq!(classify(&Contact::collision(trash, trash)), None);
        assert_eq!(classify(&Contact::collision(Participant::Squid, trash)), None);
        let detector = Participant::Detector(DetectorId(0));
        assert_eq!(classify(&Contact::trigger(detector, Participant::Other(9))), None);
        assert_eq!(classify(&Contact::collision(Participant::BoatTop, Participant::Squid)), None);
    }
}
