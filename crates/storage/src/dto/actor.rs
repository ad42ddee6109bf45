use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::{Result, StorageError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActorRole {
    Staff,
    Institution,
}

/// Authorization context supplied by the upstream auth collaborator. Every
/// state-machine and ledger operation takes this as its scoping parameter.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub struct Actor {
    pub user_id: Uuid,
    pub role: ActorRole,
    pub event_id: Option<Uuid>,
    pub institution_id: Option<Uuid>,
}

impl Actor {
    /// Staff actions are scoped to a single event. Out-of-scope rows are
    /// reported as NotFound so their existence is not leaked.
    pub fn require_staff_for_event(&self, event_id: Uuid) -> Result<()> {
        if self.role == ActorRole::Staff && self.event_id == Some(event_id) {
            Ok(())
        } else {
            Err(StorageError::NotFound)
        }
    }

    /// Self-service actions are scoped to the actor's own institution.
    pub fn require_institution(&self, institution_id: Uuid) -> Result<Uuid> {
        match (self.role, self.institution_id) {
            (ActorRole::Institution, Some(own)) if own == institution_id => Ok(own),
            _ => Err(StorageError::NotFound),
        }
    }

    pub fn own_institution(&self) -> Result<Uuid> {
        match (self.role, self.institution_id) {
            (ActorRole::Institution, Some(own)) => Ok(own),
            _ => Err(StorageError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(event_id: Uuid) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            role: ActorRole::Staff,
            event_id: Some(event_id),
            institution_id: None,
        }
    }

    #[test]
    fn staff_scope_is_per_event() {
        let event_id = Uuid::new_v4();
        assert!(staff(event_id).require_staff_for_event(event_id).is_ok());
        assert!(matches!(
            staff(event_id).require_staff_for_event(Uuid::new_v4()),
            Err(StorageError::NotFound)
        ));
    }

    #[test]
    fn institution_actor_cannot_act_for_another_institution() {
        let own = Uuid::new_v4();
        let actor = Actor {
            user_id: Uuid::new_v4(),
            role: ActorRole::Institution,
            event_id: None,
            institution_id: Some(own),
        };
        assert!(actor.require_institution(own).is_ok());
        assert!(matches!(
            actor.require_institution(Uuid::new_v4()),
            Err(StorageError::NotFound)
        ));
        assert!(matches!(
            staff(Uuid::new_v4()).own_institution(),
            Err(StorageError::NotFound)
        ));
    }
}
