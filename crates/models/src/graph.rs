//! Read shapes that bundle a row with its eagerly loaded relations.
//!
//! The parent's columns are flattened into the JSON object, next to the
//! relation fields.
use serde::{Deserialize, Serialize};

use crate::{collaborator, service_record, vehicle};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceWithCollaborator {
    #[serde(flatten)]
    pub service: service_record::Model,
    pub collaborator: Option<collaborator::Model>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VehicleGraph {
    #[serde(flatten)]
    pub vehicle: vehicle::Model,
    #[serde(default)]
    pub services: Vec<ServiceWithCollaborator>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorGraph {
    #[serde(flatten)]
    pub collaborator: collaborator::Model,
    #[serde(default)]
    pub services: Vec<service_record::Model>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecordGraph {
    #[serde(flatten)]
    pub service: service_record::Model,
    pub vehicle: Option<vehicle::Model>,
    pub collaborator: Option<collaborator::Model>,
}

impl From<vehicle::Model> for VehicleGraph {
    fn from(vehicle: vehicle::Model) -> Self {
        Self { vehicle, services: Vec::new() }
    }
}

impl From<collaborator::Model> for CollaboratorGraph {
    fn from(collaborator: collaborator::Model) -> Self {
        Self { collaborator, services: Vec::new() }
    }
}

impl From<service_record::Model> for ServiceRecordGraph {
    fn from(service: service_record::Model) -> Self {
        Self { service, vehicle: None, collaborator: None }
    }
}
