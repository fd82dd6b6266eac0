use crate::{collaborator, part, service_record, user, vehicle};
use crate::service_record::ServiceStatus;
use crate::vehicle::{VehicleModel, VehicleStatus};
use anyhow::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, EntityTrait, LoaderTrait, PaginatorTrait, Set};

async fn seed_vehicle(db: &sea_orm::DatabaseConnection, plate: &str) -> Result<vehicle::Model> {
    let am = vehicle::ActiveModel {
        plate: Set(plate.into()),
        chassis: Set("9BWZZZ377VT004251".into()),
        model: Set(VehicleModel::MottuSport),
        status: Set(VehicleStatus::Available),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

async fn seed_collaborator(db: &sea_orm::DatabaseConnection, email: &str, registration: &str) -> Result<collaborator::Model> {
    let am = collaborator::ActiveModel {
        name: Set("Ana".into()),
        registration: Set(registration.into()),
        email: Set(email.into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

async fn seed_service(db: &sea_orm::DatabaseConnection, vehicle_id: i32, collaborator_id: i32) -> Result<service_record::Model> {
    let am = service_record::ActiveModel {
        description: Set("oil change".into()),
        created_at: Set(Utc::now().into()),
        status: Set(ServiceStatus::default()),
        vehicle_id: Set(vehicle_id),
        collaborator_id: Set(collaborator_id),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

#[tokio::test]
async fn test_enums_stored_as_strings() -> Result<()> {
    let db = super::setup_test_db().await?;
    let v = seed_vehicle(&db, "ABC1D23").await?;
    assert!(v.id > 0);

    let found = vehicle::Entity::find_by_id(v.id).one(&db).await?.expect("vehicle");
    assert_eq!(found.model, VehicleModel::MottuSport);
    assert_eq!(found.status, VehicleStatus::Available);

    let json = serde_json::to_value(&found)?;
    assert_eq!(json["model"], "MOTTU_SPORT");
    assert_eq!(json["status"], "DISPONIVEL");
    Ok(())
}

#[tokio::test]
async fn test_loader_follows_relations() -> Result<()> {
    let db = super::setup_test_db().await?;
    let v = seed_vehicle(&db, "ABC1D23").await?;
    let c = seed_collaborator(&db, "ana@mottu.com", "RM12345").await?;
    seed_service(&db, v.id, c.id).await?;
    seed_service(&db, v.id, c.id).await?;

    let vehicles = vehicle::Entity::find().all(&db).await?;
    let services = vehicles.load_many(service_record::Entity, &db).await?;
    assert_eq!(services.len(), 1);
    assert_eq!(services[0].len(), 2);

    let collaborators = services[0].load_one(collaborator::Entity, &db).await?;
    assert!(collaborators.iter().all(|c| c.as_ref().map(|c| c.email.as_str()) == Some("ana@mottu.com")));
    Ok(())
}

#[tokio::test]
async fn test_cascade_delete_removes_services() -> Result<()> {
    let db = super::setup_test_db().await?;
    let v = seed_vehicle(&db, "ABC1D23").await?;
    let c = seed_collaborator(&db, "ana@mottu.com", "RM12345").await?;
    seed_service(&db, v.id, c.id).await?;

    vehicle::Entity::delete_by_id(v.id).exec(&db).await?;
    assert_eq!(service_record::Entity::find().count(&db).await?, 0);
    assert_eq!(collaborator::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_unique_email_enforced_by_store() -> Result<()> {
    let db = super::setup_test_db().await?;
    seed_collaborator(&db, "ana@mottu.com", "RM12345").await?;
    let dup = seed_collaborator(&db, "ana@mottu.com", "RM99999").await;
    assert!(dup.is_err());
    assert_eq!(collaborator::Entity::find().count(&db).await?, 1);
    Ok(())
}

#[tokio::test]
async fn test_user_hash_not_serialised() -> Result<()> {
    let db = super::setup_test_db().await?;
    let u = user::ActiveModel {
        name: Set("Bob".into()),
        email: Set("bob@mottu.com".into()),
        password_hash: Set("$argon2id$stub".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;
    let json = serde_json::to_value(&u)?;
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["email"], "bob@mottu.com");
    Ok(())
}

#[test]
fn test_field_validators() {
    assert!(vehicle::validate_plate("ABC1D23").is_ok());
    assert!(vehicle::validate_plate("ABC123").is_err());
    assert!(vehicle::validate_chassis("9BWZZZ377VT004251").is_ok());
    assert!(vehicle::validate_chassis("9BWZZZ").is_err());
    assert!(collaborator::validate_registration("RM12345").is_ok());
    assert!(collaborator::validate_registration("RM123456789").is_err());
    assert!(part::validate_code("P-001").is_ok());
    assert!(part::validate_code("").is_err());
    assert!(part::validate_stock(-1).is_err());
    assert!(user::validate_email("bob@mottu.com").is_ok());
    assert!(user::validate_email("bob").is_err());
    assert!(user::validate_name("  ").is_err());
}

#[test]
fn test_validators_follow_column_widths() {
    assert!(user::validate_name(&"a".repeat(user::NAME_MAX_LEN)).is_ok());
    assert!(user::validate_name(&"a".repeat(user::NAME_MAX_LEN + 1)).is_err());
    let long_email = format!("{}@mottu.com", "a".repeat(user::EMAIL_MAX_LEN));
    assert!(user::validate_email(&long_email).is_err());
    assert!(service_record::validate_description("oil change").is_ok());
    assert!(service_record::validate_description(" ").is_err());
    assert!(service_record::validate_description(&"x".repeat(service_record::DESCRIPTION_MAX_LEN + 1)).is_err());
    assert!(part::validate_description("").is_ok());
    assert!(part::validate_description(&"x".repeat(part::DESCRIPTION_MAX_LEN + 1)).is_err());
}
