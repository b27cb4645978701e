//! Task visibility: filters, grouped listing, date serialization and
//! subtask scoping.

mod common;

use common::{create_project, register_user, test_context};
use taskboard::AppContext;
use taskboard::apps::priorities::commands::create_priority;
use taskboard::apps::priorities::models::CreatePriority;
use taskboard::apps::projects::commands::add_user_to_project;
use taskboard::apps::tasks::commands::{assign_task_to_project, create_task, update_task};
use taskboard::apps::tasks::models::{CreateTask, TaskFilters, UpdateTask};
use taskboard::apps::tasks::queries::{
	get_task_by_id, list_tasks, list_tasks_grouped_by_project,
};
use taskboard::apps::tasks::subtasks::commands::create_subtask;
use taskboard::apps::tasks::subtasks::models::CreateSubtask;
use taskboard::apps::tasks::subtasks::queries::list_subtasks_by_task;
use uuid::Uuid;

async fn seed_priorities(ctx: &AppContext, owner: Uuid) -> (i64, i64) {
	let urgent = create_priority(
		ctx,
		Some(owner),
		CreatePriority {
			title: "Urgent".to_string(),
			rank: 1,
			description: None,
		},
	)
	.await
	.unwrap();
	let relaxed = create_priority(
		ctx,
		Some(owner),
		CreatePriority {
			title: "Relaxed".to_string(),
			rank: 9,
			description: None,
		},
	)
	.await
	.unwrap();
	(urgent, relaxed)
}

fn task(project_id: i64, priority_id: i64, title: &str, deadline: Option<&str>) -> CreateTask {
	CreateTask {
		title: title.to_string(),
		content: "content".to_string(),
		priority_id,
		project_id,
		deadline: deadline.map(|d| d.to_string()),
		status_id: None,
	}
}

#[tokio::test]
async fn priority_filter_narrows_and_absent_filters_do_not() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let project_id = create_project(&ctx, owner, "apollo").await;
	let (urgent, relaxed) = seed_priorities(&ctx, owner).await;

	create_task(&ctx, Some(owner), task(project_id, urgent, "hot", None))
		.await
		.unwrap();
	create_task(&ctx, Some(owner), task(project_id, relaxed, "cold", None))
		.await
		.unwrap();

	let filtered = list_tasks(
		&ctx,
		Some(owner),
		&TaskFilters {
			priority_id: Some(urgent),
			..Default::default()
		},
	)
	.await
	.unwrap();
	assert_eq!(filtered.len(), 1);
	assert_eq!(filtered[0].title, "hot");

	let unfiltered = list_tasks(&ctx, Some(owner), &TaskFilters::default())
		.await
		.unwrap();
	assert_eq!(unfiltered.len(), 2);
}

#[tokio::test]
async fn deadline_filter_and_serialization() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let project_id = create_project(&ctx, owner, "apollo").await;
	let (urgent, _) = seed_priorities(&ctx, owner).await;

	let soon = create_task(
		&ctx,
		Some(owner),
		task(project_id, urgent, "soon", Some("15/03/2031")),
	)
	.await
	.unwrap();
	create_task(
		&ctx,
		Some(owner),
		task(project_id, urgent, "later", Some("15/03/2032")),
	)
	.await
	.unwrap();
	create_task(&ctx, Some(owner), task(project_id, urgent, "never", None))
		.await
		.unwrap();

	let before = list_tasks(
		&ctx,
		Some(owner),
		&TaskFilters {
			deadline_before: Some(common::parse_wire_date("31/12/2031")),
			..Default::default()
		},
	)
	.await
	.unwrap();
	assert_eq!(before.len(), 1);
	assert_eq!(before[0].id, soon);

	// deadline serializes day-first, or to an explicit null
	let with_deadline = get_task_by_id(&ctx, Some(owner), soon).await.unwrap();
	assert_eq!(with_deadline.deadline.as_deref(), Some("15/03/2031"));
	let all = list_tasks(&ctx, Some(owner), &TaskFilters::default())
		.await
		.unwrap();
	let never = all.iter().find(|t| t.title == "never").unwrap();
	assert!(never.deadline.is_none());
	let json = serde_json::to_value(never).unwrap();
	assert!(json["deadline"].is_null());
}

#[tokio::test]
async fn grouped_listing_nests_tasks_under_their_projects() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let helper = register_user(&ctx, "helper").await;
	let apollo = create_project(&ctx, owner, "apollo").await;
	let gemini = create_project(&ctx, owner, "gemini").await;
	let (urgent, _) = seed_priorities(&ctx, owner).await;

	add_user_to_project(
		&ctx,
		Some(owner),
		apollo,
		&helper.to_string(),
		Some("collaborator"),
	)
	.await
	.unwrap();
	let t1 = create_task(&ctx, Some(owner), task(apollo, urgent, "one", None))
		.await
		.unwrap();
	let t2 = create_task(&ctx, Some(helper), task(apollo, urgent, "two", None))
		.await
		.unwrap();

	// owner is chief of apollo: sees both tasks, and empty gemini
	let grouped = list_tasks_grouped_by_project(&ctx, Some(owner)).await.unwrap();
	assert_eq!(grouped.len(), 2);
	let apollo_group = grouped.iter().find(|g| g.project.id == apollo).unwrap();
	let mut ids: Vec<_> = apollo_group.tasks.iter().map(|t| t.id).collect();
	ids.sort_unstable();
	assert_eq!(ids, vec![t1, t2]);
	let gemini_group = grouped.iter().find(|g| g.project.id == gemini).unwrap();
	assert!(gemini_group.tasks.is_empty());

	// helper is a collaborator: sees only the assigned task
	let grouped = list_tasks_grouped_by_project(&ctx, Some(helper)).await.unwrap();
	assert_eq!(grouped.len(), 1);
	assert_eq!(grouped[0].project.id, apollo);
	let ids: Vec<_> = grouped[0].tasks.iter().map(|t| t.id).collect();
	assert_eq!(ids, vec![t2]);
}

#[tokio::test]
async fn duplicate_assignment_is_a_conflict() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let project_id = create_project(&ctx, owner, "apollo").await;
	let (urgent, _) = seed_priorities(&ctx, owner).await;
	let task_id = create_task(&ctx, Some(owner), task(project_id, urgent, "one", None))
		.await
		.unwrap();

	// create_task already assigned the creator
	let err = assign_task_to_project(&ctx, Some(owner), task_id, project_id, None)
		.await
		.unwrap_err();
	assert!(matches!(err, taskboard::Error::Conflict(_)));
}

#[tokio::test]
async fn status_is_an_open_reference_without_transition_rules() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let project_id = create_project(&ctx, owner, "apollo").await;
	let (urgent, _) = seed_priorities(&ctx, owner).await;
	let task_id = create_task(&ctx, Some(owner), task(project_id, urgent, "one", None))
		.await
		.unwrap();

	// open -> done -> open, both legal
	for status in [2, 1] {
		update_task(
			&ctx,
			Some(owner),
			task_id,
			UpdateTask {
				status_id: Some(status),
				..Default::default()
			},
		)
		.await
		.unwrap();
		let current = get_task_by_id(&ctx, Some(owner), task_id).await.unwrap();
		assert_eq!(current.status_id, Some(status));
	}
}

#[tokio::test]
async fn subtask_listing_honors_the_status_filter() {
	let ctx = test_context().await;
	let owner = register_user(&ctx, "owner").await;
	let project_id = create_project(&ctx, owner, "apollo").await;
	let (urgent, _) = seed_priorities(&ctx, owner).await;
	let task_id = create_task(&ctx, Some(owner), task(project_id, urgent, "one", None))
		.await
		.unwrap();

	let open = create_subtask(
		&ctx,
		Some(owner),
		task_id,
		CreateSubtask {
			title: "open one".to_string(),
			content: "c".to_string(),
			status_id: Some(1),
		},
	)
	.await
	.unwrap();
	create_subtask(
		&ctx,
		Some(owner),
		task_id,
		CreateSubtask {
			title: "done one".to_string(),
			content: "c".to_string(),
			status_id: Some(2),
		},
	)
	.await
	.unwrap();

	let only_open = list_subtasks_by_task(&ctx, Some(owner), task_id, Some(1))
		.await
		.unwrap();
	assert_eq!(only_open.len(), 1);
	assert_eq!(only_open[0].id, open);

	let all = list_subtasks_by_task(&ctx, Some(owner), task_id, None)
		.await
		.unwrap();
	assert_eq!(all.len(), 2);
}
