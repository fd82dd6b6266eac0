use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

pub const CODE_MAX_LEN: usize = 10;
pub const DESCRIPTION_MAX_LEN: usize = 1024;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "part")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub code: String,
    pub description: String,
    pub stock: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { panic!("no relations defined here") }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_code(code: &str) -> Result<(), ModelError> {
    let len = code.trim().chars().count();
    if len == 0 || len > CODE_MAX_LEN {
        return Err(ModelError::Validation(format!("code must have 1 to {CODE_MAX_LEN} characters")));
    }
    Ok(())
}

/// May be empty.
pub fn validate_description(description: &str) -> Result<(), ModelError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(ModelError::Validation(format!("description longer than {DESCRIPTION_MAX_LEN} characters")));
    }
    Ok(())
}

pub fn validate_stock(stock: i32) -> Result<(), ModelError> {
    if stock < 0 {
        return Err(ModelError::Validation("stock cannot be negative".into()));
    }
    Ok(())
}
