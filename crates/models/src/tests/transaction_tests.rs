use anyhow::Result;
use sea_orm::{EntityTrait, TransactionTrait};
use uuid::Uuid;

use super::{setup_test_db, unique_username};
use crate::classroom_collaborator::Role;
use crate::{classroom, classroom_collaborator, user};

/// Classroom and owner membership commit together
#[tokio::test]
async fn test_transaction_commit() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let owner = user::create(&db, Uuid::new_v4(), &unique_username("txc"), "Tx Owner", "h", None).await?;
    let class_id = classroom::generate_class_id();
    if classroom::Entity::find_by_id(class_id.clone()).one(&db).await?.is_some() {
        user::Entity::delete_by_id(owner.id).exec(&db).await?;
        return Ok(());
    }

    let txn = db.begin().await?;
    classroom::create(&txn, &class_id, "Tx Class", None, false, owner.id).await?;
    classroom_collaborator::create(&txn, owner.id, &class_id, Role::Teacher).await?;
    txn.commit().await?;

    assert!(classroom::Entity::find_by_id(class_id.clone()).one(&db).await?.is_some());
    let membership = classroom_collaborator::Entity::find_by_id((owner.id, class_id)).one(&db).await?;
    assert_eq!(membership.map(|m| m.role), Some(Role::Teacher));

    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}

/// Nothing survives a rollback
#[tokio::test]
async fn test_transaction_rollback() -> Result<()> {
    let Some(db) = setup_test_db().await? else { return Ok(()) };

    let owner = user::create(&db, Uuid::new_v4(), &unique_username("txr"), "Tx Owner", "h", None).await?;
    let class_id = classroom::generate_class_id();
    if classroom::Entity::find_by_id(class_id.clone()).one(&db).await?.is_some() {
        user::Entity::delete_by_id(owner.id).exec(&db).await?;
        return Ok(());
    }

    let txn = db.begin().await?;
    classroom::create(&txn, &class_id, "Rolled Back", None, false, owner.id).await?;
    txn.rollback().await?;

    assert!(classroom::Entity::find_by_id(class_id).one(&db).await?.is_none());
    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    Ok(())
}
