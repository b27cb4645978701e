//! Access policy evaluation against real membership and assignment rows.

mod common;

use common::{create_project, register_user, test_context};
use taskboard::Error;
use taskboard::apps::projects::commands::add_user_to_project;
use taskboard::apps::tasks::commands::create_task;
use taskboard::apps::tasks::models::CreateTask;
use taskboard::apps::tasks::subtasks::commands::create_subtask;
use taskboard::apps::tasks::subtasks::models::CreateSubtask;
use taskboard::policy::{Action, Decision, Denial, Resource};

fn task_input(project_id: i64, priority_id: i64) -> CreateTask {
	CreateTask {
		title: "write report".to_string(),
		content: "quarterly numbers".to_string(),
		priority_id,
		project_id,
		deadline: None,
		status_id: None,
	}
}

async fn seed_priority(ctx: &taskboard::AppContext) -> i64 {
	use taskboard::apps::priorities::commands::create_priority;
	use taskboard::apps::priorities::models::CreatePriority;
	let owner = register_user(ctx, "prio-seeder").await;
	create_priority(
		ctx,
		Some(owner),
		CreatePriority {
			title: "Urgent".to_string(),
			rank: 1,
			description: None,
		},
	)
	.await
	.unwrap()
}

#[tokio::test]
async fn non_member_cannot_update_a_project() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let stranger = register_user(&ctx, "stranger").await;
	let project_id = create_project(&ctx, owner, "apollo").await;

	let decision = ctx
		.policy
		.authorize(Some(stranger), Action::Update, Resource::Project(project_id))
		.await
		.unwrap();
	assert_eq!(decision, Decision::Denied(Denial::InsufficientRole));
}

#[tokio::test]
async fn missing_identity_is_not_logged_in() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let project_id = create_project(&ctx, owner, "apollo").await;

	let decision = ctx
		.policy
		.authorize(None, Action::Read, Resource::Project(project_id))
		.await
		.unwrap();
	assert_eq!(decision, Decision::Denied(Denial::NotLoggedIn));
}

#[tokio::test]
async fn chief_and_assignee_can_touch_a_task_others_cannot() {
	let ctx = test_context().await;
	let chief = register_user(&ctx, "chief").await;
	let worker = register_user(&ctx, "worker").await;
	let outsider = register_user(&ctx, "outsider").await;
	let project_id = create_project(&ctx, chief, "apollo").await;
	let priority_id = seed_priority(&ctx).await;

	add_user_to_project(
		&ctx,
		Some(chief),
		project_id,
		&worker.to_string(),
		Some("collaborator"),
	)
	.await
	.unwrap();
	let task_id = create_task(&ctx, Some(worker), task_input(project_id, priority_id))
		.await
		.unwrap();

	// assignee
	assert!(ctx
		.policy
		.authorize(Some(worker), Action::Update, Resource::Task(task_id))
		.await
		.unwrap()
		.is_allowed());
	// chief of the owning project, no assignment row
	assert!(ctx
		.policy
		.authorize(Some(chief), Action::Update, Resource::Task(task_id))
		.await
		.unwrap()
		.is_allowed());
	// no relation at all
	let decision = ctx
		.policy
		.authorize(Some(outsider), Action::Update, Resource::Task(task_id))
		.await
		.unwrap();
	assert_eq!(decision, Decision::Denied(Denial::InsufficientRole));
}

#[tokio::test]
async fn subtasks_are_scoped_through_their_task() {
	let ctx = test_context().await;
	let chief = register_user(&ctx, "chief").await;
	let outsider = register_user(&ctx, "outsider").await;
	let project_id = create_project(&ctx, chief, "apollo").await;
	let priority_id = seed_priority(&ctx).await;

	let task_id = create_task(&ctx, Some(chief), task_input(project_id, priority_id))
		.await
		.unwrap();
	let subtask_id = create_subtask(
		&ctx,
		Some(chief),
		task_id,
		CreateSubtask {
			title: "collect numbers".to_string(),
			content: "ask finance".to_string(),
			status_id: Some(1),
		},
	)
	.await
	.unwrap();

	assert!(ctx
		.policy
		.authorize(Some(chief), Action::Delete, Resource::Subtask(subtask_id))
		.await
		.unwrap()
		.is_allowed());
	assert!(!ctx
		.policy
		.authorize(Some(outsider), Action::Read, Resource::Subtask(subtask_id))
		.await
		.unwrap()
		.is_allowed());
}

#[tokio::test]
async fn plain_member_cannot_assign_tasks() {
	let ctx = test_context().await;
	let chief = register_user(&ctx, "chief").await;
	let member = register_user(&ctx, "member").await;
	let project_id = create_project(&ctx, chief, "apollo").await;
	let priority_id = seed_priority(&ctx).await;

	add_user_to_project(&ctx, Some(chief), project_id, &member.to_string(), None)
		.await
		.unwrap();
	let task_id = create_task(&ctx, Some(chief), task_input(project_id, priority_id))
		.await
		.unwrap();

	let err = taskboard::apps::tasks::commands::assign_task_to_project(
		&ctx,
		Some(member),
		task_id,
		project_id,
		None,
	)
	.await
	.unwrap_err();
	assert!(matches!(err, Error::Forbidden(_)));
}
