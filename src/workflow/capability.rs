//! Mutation capability handed in by the authentication layer

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StockflowError};
use crate::schemas::Stage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Operator,
    /// Inspection, inbound, quality control and rejections only
    Inspector,
    Viewer,
}

impl Role {
    pub fn may_mutate(self, stage: Stage) -> bool {
        match self {
            Role::Admin | Role::Operator => true,
            Role::Inspector => matches!(
                stage,
                Stage::ArrivalInspection
                    | Stage::InboundRegister
                    | Stage::QualityControl
                    | Stage::RejectedOrder
            ),
            Role::Viewer => false,
        }
    }
}

/// Who is acting, and with which role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capability {
    actor: String,
    role: Role,
}

impl Capability {
    pub fn new(actor: impl Into<String>, role: Role) -> Self {
        Capability {
            actor: actor.into(),
            role,
        }
    }

    /// Build from a plain "may mutate" flag
    pub fn from_flag(actor: impl Into<String>, may_mutate: bool) -> Self {
        let role = if may_mutate { Role::Operator } else { Role::Viewer };
        Capability::new(actor, role)
    }

    pub fn actor(&self) -> &str {
        &self.actor
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// `Forbidden` unless this capability may mutate `stage`
    pub fn authorize(&self, stage: Stage) -> Result<()> {
        if self.role.may_mutate(stage) {
            return Ok(());
        }
        Err(StockflowError::Forbidden {
            actor: self.actor.clone(),
            stage,
        })
    }
}
