//! Account lifecycle: registration, profile updates, deletion with
//! password re-verification and cascades.

mod common;

use common::{PASSWORD, create_project, register_user, test_context};
use taskboard::Error;
use taskboard::apps::projects::commands::add_user_to_project;
use taskboard::apps::users::commands::{create_user, delete_user, update_user};
use taskboard::apps::users::models::{CreateUser, UpdateUser};
use taskboard::apps::users::queries::{list_users, list_users_by_project};
use taskboard::policy::Role;

fn registration(username: &str, mail: &str) -> CreateUser {
	CreateUser {
		username: username.to_string(),
		name: "Test".to_string(),
		aftername: "User".to_string(),
		mail: mail.to_string(),
		password: PASSWORD.to_string(),
	}
}

#[tokio::test]
async fn registration_rejects_bad_mail_and_duplicate_usernames() {
	let ctx = test_context().await;

	let err = create_user(&ctx, registration("ada", "not-a-mail"))
		.await
		.unwrap_err();
	assert!(matches!(err, Error::InvalidArgument(_)));

	create_user(&ctx, registration("ada", "ada@example.com"))
		.await
		.unwrap();
	let err = create_user(&ctx, registration("ada", "other@example.com"))
		.await
		.unwrap_err();
	assert!(matches!(err, Error::Conflict(_)));
}

#[tokio::test]
async fn profile_update_requires_at_least_one_field() {
	let ctx = test_context().await;
	let user = register_user(&ctx, "ada").await;

	let err = update_user(&ctx, Some(user), UpdateUser::default())
		.await
		.unwrap_err();
	assert!(matches!(err, Error::InvalidArgument(_)));

	update_user(
		&ctx,
		Some(user),
		UpdateUser {
			name: Some("Augusta".to_string()),
			..Default::default()
		},
	)
	.await
	.unwrap();

	let (name,): (String,) = sqlx::query_as("SELECT name FROM users WHERE id = ?")
		.bind(user.to_string())
		.fetch_one(ctx.db.pool())
		.await
		.unwrap();
	assert_eq!(name, "Augusta");
}

#[tokio::test]
async fn delete_with_wrong_password_is_forbidden_and_keeps_the_row() {
	let ctx = test_context().await;
	let user = register_user(&ctx, "ada").await;

	let err = delete_user(&ctx, Some(user), "wrong-password")
		.await
		.unwrap_err();
	assert!(matches!(err, Error::Forbidden(_)));

	let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
		.bind(user.to_string())
		.fetch_all(ctx.db.pool())
		.await
		.unwrap();
	assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn delete_cascades_memberships_and_solo_projects() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let member = register_user(&ctx, "member").await;

	// member joins the owner's project and owns a solo project
	let shared = create_project(&ctx, owner, "shared").await;
	add_user_to_project(&ctx, Some(owner), shared, &member.to_string(), None)
		.await
		.unwrap();
	let solo = create_project(&ctx, member, "solo").await;

	delete_user(&ctx, Some(member), PASSWORD).await.unwrap();

	let memberships: Vec<(i64,)> =
		sqlx::query_as("SELECT id FROM project_user_rel WHERE user_id = ?")
			.bind(member.to_string())
			.fetch_all(ctx.db.pool())
			.await
			.unwrap();
	assert!(memberships.is_empty());

	let solo_project: Vec<(i64,)> = sqlx::query_as("SELECT id FROM projects WHERE id = ?")
		.bind(solo)
		.fetch_all(ctx.db.pool())
		.await
		.unwrap();
	assert!(solo_project.is_empty());

	// the shared project survives with its chief
	let shared_members: Vec<(String,)> =
		sqlx::query_as("SELECT user_id FROM project_user_rel WHERE project_id = ?")
			.bind(shared)
			.fetch_all(ctx.db.pool())
			.await
			.unwrap();
	assert_eq!(shared_members.len(), 1);
	assert_eq!(shared_members[0].0, owner.to_string());
}

#[tokio::test]
async fn sole_chief_of_a_populated_project_cannot_leave() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let member = register_user(&ctx, "member").await;
	let project_id = create_project(&ctx, owner, "apollo").await;
	add_user_to_project(&ctx, Some(owner), project_id, &member.to_string(), None)
		.await
		.unwrap();

	let err = delete_user(&ctx, Some(owner), PASSWORD).await.unwrap_err();
	assert!(matches!(err, Error::Conflict(_)));

	// still there
	let rows: Vec<(String,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
		.bind(owner.to_string())
		.fetch_all(ctx.db.pool())
		.await
		.unwrap();
	assert_eq!(rows.len(), 1);
}

#[tokio::test]
async fn member_listings_are_scoped() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let member = register_user(&ctx, "member").await;
	let outsider = register_user(&ctx, "outsider").await;
	let project_id = create_project(&ctx, owner, "apollo").await;
	add_user_to_project(&ctx, Some(owner), project_id, &member.to_string(), None)
		.await
		.unwrap();

	// others, not self
	let others = list_users(&ctx, Some(owner)).await.unwrap();
	let names: Vec<_> = others.iter().map(|u| u.username.as_str()).collect();
	assert!(names.contains(&"member") && names.contains(&"outsider"));
	assert!(!names.contains(&"owner"));

	// project members visible to the chief
	let members = list_users_by_project(&ctx, Some(owner), project_id, &[Role::Chief])
		.await
		.unwrap();
	assert_eq!(members.len(), 1);
	assert_eq!(members[0].username, "member");

	// outsider holds no role at all
	let err = list_users_by_project(&ctx, Some(outsider), project_id, &Role::ALL)
		.await
		.unwrap_err();
	assert!(matches!(err, Error::Forbidden(_)));
}
