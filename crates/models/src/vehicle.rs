use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{errors::ModelError, service_record};

pub const PLATE_LEN: usize = 7;
pub const CHASSIS_LEN: usize = 17;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum VehicleModel {
    #[sea_orm(string_value = "MOTTU_POP")]
    #[serde(rename = "MOTTU_POP")]
    MottuPop,
    #[sea_orm(string_value = "MOTTU_SPORT")]
    #[serde(rename = "MOTTU_SPORT")]
    MottuSport,
    #[sea_orm(string_value = "MOTTU_E")]
    #[serde(rename = "MOTTU_E")]
    MottuE,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum VehicleStatus {
    /// In the workshop.
    #[sea_orm(string_value = "MANUTENCAO")]
    #[serde(rename = "MANUTENCAO")]
    Maintenance,
    #[sea_orm(string_value = "DISPONIVEL")]
    #[serde(rename = "DISPONIVEL")]
    Available,
    #[sea_orm(string_value = "AVALIACAO")]
    #[serde(rename = "AVALIACAO")]
    Evaluation,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "vehicle")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub plate: String,
    pub chassis: String,
    pub model: VehicleModel,
    pub status: VehicleStatus,
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

pub fn validate_plate(plate: &str) -> Result<(), ModelError> {
    if plate.chars().count() != PLATE_LEN {
        return Err(ModelError::Validation(format!("plate must have exactly {PLATE_LEN} characters")));
    }
    Ok(())
}

pub fn validate_chassis(chassis: &str) -> Result<(), ModelError> {
    if chassis.chars().count() != CHASSIS_LEN {
        return Err(ModelError::Validation(format!("chassis must have exactly {CHASSIS_LEN} characters")));
    }
    Ok(())
}
