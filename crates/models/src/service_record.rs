//! Work orders linking a vehicle to the collaborator responsible for it.
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{collaborator, vehicle};

pub const DESCRIPTION_MAX_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ServiceStatus {
    #[default]
    #[sea_orm(string_value = "Pendente")]
    Pendente,
    #[sea_orm(string_value = "EmAndamento")]
    EmAndamento,
    #[sea_orm(string_value = "Concluido")]
    Concluido,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_record")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub status: ServiceStatus,
    pub vehicle_id: i32,
    pub collaborator_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Vehicle,
    Collaborator,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Vehicle => Entity::belongs_to(vehicle::Entity)
                .from(Column::VehicleId)
                .to(vehicle::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
            Relation::Collaborator => Entity::belongs_to(collaborator::Entity)
                .from(Column::CollaboratorId)
                .to(collaborator::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<vehicle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vehicle.def()
    }
}

impl Related<collaborator::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collaborator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_description(description: &str) -> Result<(), ModelError> {
    if description.trim().is_empty() {
        return Err(ModelError::Validation("description required".into()));
    }
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(ModelError::Validation(format!("description longer than {DESCRIPTION_MAX_LEN} characters")));
    }
    Ok(())
}
