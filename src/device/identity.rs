//! Camera identity and front-camera enumeration.

use thiserror::Error;
use tracing::debug;

/// Which way a camera faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    /// Oriented toward the device user.
    Front,
    /// Oriented away from the device user.
    Back,
    /// Externally attached, orientation unknown.
    External,
}

/// Opaque identity of a physical camera.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraIdentity {
    id: String,
    facing: Facing,
}

impl CameraIdentity {
    /// Creates an identity from a platform id and facing attribute.
    pub fn new(id: impl Into<String>, facing: Facing) -> Self {
        Self {
            id: id.into(),
            facing,
        }
    }

    /// Returns the platform identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the facing attribute.
    pub fn facing(&self) -> Facing {
        self.facing
    }
}

/// Errors that can occur during camera enumeration.
#[derive(Debug, Clone, Error)]
pub enum EnumerationError {
    #[error("front camera not found")]
    NotFound,
    #[error("camera enumeration failed: {0}")]
    Access(String),
}

/// Platform collaborator that lists the available camera identities.
pub trait DeviceLister {
    /// Returns all camera identities the platform exposes.
    fn list(&self) -> Result<Vec<CameraIdentity>, EnumerationError>;
}

/// A lister backed by a fixed set of identities, for tests and demos.
#[derive(Debug, Clone, Default)]
pub struct FixedDeviceList {
    identities: Vec<CameraIdentity>,
}

impl FixedDeviceList {
    /// Creates a lister that reports the given identities in order.
    pub fn new(identities: Vec<CameraIdentity>) -> Self {
        Self { identities }
    }
}

impl DeviceLister for FixedDeviceList {
    fn list(&self) -> Result<Vec<CameraIdentity>, EnumerationError> {
        Ok(self.identities.clone())
    }
}

/// Finds the first front-facing camera the platform reports.
///
/// Identities are inspected in list order and the first front-facing
/// match wins. Both an empty result and an enumeration failure are
/// terminal: the caller must not start a preview without an identity.
pub fn find_front_camera<L: DeviceLister>(lister: &L) -> Result<CameraIdentity, EnumerationError> {
    let identities = lister.list()?;
    for identity in identities {
        if identity.facing() == Facing::Front {
            debug!(id = %identity.id(), "found front camera");
            return Ok(identity);
        }
    }
    Err(EnumerationError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_front_match_wins() {
        let lister = FixedDeviceList::new(vec![
            CameraIdentity::new("0", Facing::Back),
            CameraIdentity::new("1", Facing::Front),
            CameraIdentity::new("2", Facing::Front),
        ]);
        let camera = find_front_camera(&lister).expect("front camera");
        assert_eq!(camera.id(), "1");
    }

    #[test]
    fn test_no_front_camera_is_not_found() {
        let lister = FixedDeviceList::new(vec![
            CameraIdentity::new("0", Facing::Back),
            CameraIdentity::new("1", Facing::External),
        ]);
        assert!(matches!(
            find_front_camera(&lister),
            Err(EnumerationError::NotFound)
        ));
    }

    #[test]
    fn test_empty_list_is_not_found() {
        let lister = FixedDeviceList::new(vec![]);
        assert!(matches!(
            find_front_camera(&lister),
            Err(EnumerationError::NotFound)
        ));
    }

    #[test]
    fn test_enumeration_failure_propagates() {
        struct FailingLister;
        impl DeviceLister for FailingLister {
            fn list(&self) -> Result<Vec<CameraIdentity>, EnumerationError> {
                Err(EnumerationError::Access("camera service unavailable".into()))
            }
        }
        assert!(matches!(
            find_front_camera(&FailingLister),
            Err(EnumerationError::Access(_))
        ));
    }

    fn arb_facing() -> impl Strategy<Value = Facing> {
        prop_oneof![
            Just(Facing::Front),
            Just(Facing::Back),
            Just(Facing::External),
        ]
    }

    proptest! {
        #[test]
        fn prop_returns_first_front_in_list_order(facings in prop::collection::vec(arb_facing(), 0..16)) {
            let identities: Vec<CameraIdentity> = facings
                .iter()
                .enumerate()
                .map(|(i, f)| CameraIdentity::new(i.to_string(), *f))
                .collect();
            let expected = identities
                .iter()
                .find(|c| c.facing() == Facing::Front)
                .cloned();
            let lister = FixedDeviceList::new(identities);

            match (find_front_camera(&lister), expected) {
                (Ok(found), Some(first)) => prop_assert_eq!(found, first),
                (Err(EnumerationError::NotFound), None) => {}
                (found, expected) => {
                    prop_assert!(false, "mismatch: {:?} vs {:?}", found, expected);
                }
            }
        }
    }
}
