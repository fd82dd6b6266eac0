use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, service_record};

pub const REGISTRATION_MAX_LEN: usize = 9;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collaborator")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub registration: String,
    #[sea_orm(unique)]
    pub email: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    ServiceRecord,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::ServiceRecord => Entity::has_many(service_record::Entity).into(),
        }
    }
}

impl Related<service_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_registration(registration: &str) -> Result<(), ModelError> {
    let len = registration.trim().chars().count();
    if len == 0 || len > REGISTRATION_MAX_LEN {
        return Err(ModelError::Validation(format!(
            "registration must have 1 to {REGISTRATION_MAX_LEN} characters"
        )));
    }
    Ok(())
}
