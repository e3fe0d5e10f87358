//! # Actors and Role Gating
//!
//! Authentication happens outside the core; callers hand in an `Actor`
//! already resolved from their session. The core only decides whether the
//! actor's roles permit a gated action and reports `CoreError::Permission`
//! through its normal result type.
//!
//! ## Authorization Matrix
//!
//! | Action | Allowed Roles |
//! |--------|---------------|
//! | `SubmitRecord` | ASSESSOR, RESPONDER, COORDINATOR, ADMIN |
//! | `VerifyRecord` | COORDINATOR, ADMIN |
//! | `RejectRecord` | COORDINATOR, ADMIN |
//! | `ConfigureAutoApproval` | COORDINATOR, ADMIN |

use serde::{Deserialize, Serialize};

use crate::entities::ActorId;
use crate::errors::CoreError;

/// Role held by an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Assessor,
    Responder,
    Coordinator,
    Donor,
    Admin,
}

/// Role-gated operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GatedAction {
    SubmitRecord,
    VerifyRecord,
    RejectRecord,
    ConfigureAutoApproval,
}

impl GatedAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            GatedAction::SubmitRecord => "submit records",
            GatedAction::VerifyRecord => "verify records",
            GatedAction::RejectRecord => "reject records",
            GatedAction::ConfigureAutoApproval => "configure auto-approval",
        }
    }

    fn allowed_roles(&self) -> &'static [Role] {
        match self {
            GatedAction::SubmitRecord => &[
                Role::Assessor,
                Role::Responder,
                Role::Coordinator,
                Role::Admin,
            ],
            GatedAction::VerifyRecord
            | GatedAction::RejectRecord
            | GatedAction::ConfigureAutoApproval => &[Role::Coordinator, Role::Admin],
        }
    }
}

/// An authenticated caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub roles: Vec<Role>,
}

impl Actor {
    pub fn new(id: impl Into<ActorId>, roles: &[Role]) -> Self {
        Self {
            id: id.into(),
            roles: roles.to_vec(),
        }
    }

    pub fn coordinator(id: impl Into<ActorId>) -> Self {
        Self::new(id, &[Role::Coordinator])
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Ok when any of the actor's roles is allowed to perform `action`.
    pub fn authorize(&self, action: GatedAction) -> Result<(), CoreError> {
        if action
            .allowed_roles()
            .iter()
            .any(|role| self.has_role(*role))
        {
            Ok(())
        } else {
            Err(CoreError::Permission {
                actor: self.id.to_string(),
                action: action.as_str(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinator_can_review() {
        let actor = Actor::coordinator("coord-1");
        assert!(actor.authorize(GatedAction::VerifyRecord).is_ok());
        assert!(actor.authorize(GatedAction::RejectRecord).is_ok());
        assert!(actor.authorize(GatedAction::ConfigureAutoApproval).is_ok());
    }

    #[test]
    fn test_assessor_cannot_verify() {
        let actor = Actor::new("field-3", &[Role::Assessor]);
        assert!(actor.authorize(GatedAction::SubmitRecord).is_ok());
        let err = actor.authorize(GatedAction::VerifyRecord).unwrap_err();
        assert_eq!(err.http_status(), 403);
    }

    #[test]
    fn test_donor_cannot_submit() {
        let actor = Actor::new("donor-user", &[Role::Donor]);
        assert!(matches!(
            actor.authorize(GatedAction::SubmitRecord),
            Err(CoreError::Permission { .. })
        ));
    }
}
