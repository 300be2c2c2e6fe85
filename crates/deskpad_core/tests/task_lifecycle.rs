use deskpad_core::{MemoryStateStore, TaskId, TaskLane, TaskService};

fn service_with(contents: &[&str]) -> (TaskService<MemoryStateStore>, Vec<TaskId>) {
    let mut tasks = TaskService::open(MemoryStateStore::new()).unwrap();
    let mut ids = Vec::new();
    for content in contents.iter().rev() {
        let id = tasks.add_task().unwrap();
        tasks.commit_edit(id, content).unwrap();
        ids.insert(0, id);
    }
    (tasks, ids)
}

#[test]
fn add_inserts_blank_task_at_head() {
    let mut tasks = TaskService::open(MemoryStateStore::new()).unwrap();

    let older = tasks.add_task().unwrap();
    let newer = tasks.add_task().unwrap();

    let active: Vec<TaskId> = tasks.active_tasks().iter().map(|task| task.id).collect();
    assert_eq!(active, vec![newer, older]);
    assert!(tasks.active_tasks()[0].content.is_empty());
    assert!(!tasks.active_tasks()[0].completed);
}

#[test]
fn every_live_id_is_in_exactly_one_lane() {
    let (mut tasks, ids) = service_with(&["a", "b", "c", "d"]);

    tasks.set_completed(ids[1], true).unwrap();
    tasks.set_completed(ids[3], true).unwrap();
    tasks.delete_task(ids[0]).unwrap();
    tasks.set_completed(ids[3], false).unwrap();
    let extra = tasks.add_task().unwrap();

    for id in [ids[1], ids[2], ids[3], extra] {
        let in_active = tasks.active_tasks().iter().any(|task| task.id == id);
        let in_completed = tasks.completed_tasks().iter().any(|task| task.id == id);
        assert!(
            in_active ^ in_completed,
            "id must live in exactly one lane"
        );
    }
    assert_eq!(tasks.lane_of(ids[0]), None);
}

#[test]
fn delete_removes_from_holding_lane_and_tolerates_unknown_ids() {
    let (mut tasks, ids) = service_with(&["keep", "drop"]);

    tasks.set_completed(ids[1], true).unwrap();
    tasks.delete_task(ids[1]).unwrap();
    assert_eq!(tasks.completed_tasks().len(), 0);

    // Deleting again is a silent no-op.
    tasks.delete_task(ids[1]).unwrap();
    assert_eq!(tasks.active_tasks().len(), 1);
}

#[test]
fn commit_edit_replaces_content_in_place() {
    let (mut tasks, ids) = service_with(&["first", "second", "third"]);

    tasks.commit_edit(ids[1], "second, revised").unwrap();

    let contents: Vec<&str> = tasks
        .active_tasks()
        .iter()
        .map(|task| task.content.as_str())
        .collect();
    assert_eq!(contents, vec!["first", "second, revised", "third"]);
}

#[test]
fn commit_edit_rejects_blank_content() {
    let (mut tasks, ids) = service_with(&["unchanged"]);

    tasks.commit_edit(ids[0], "   ").unwrap();
    tasks.commit_edit(ids[0], "\t\n").unwrap();
    tasks.commit_edit(ids[0], "").unwrap();

    assert_eq!(tasks.active_tasks()[0].content, "unchanged");
}

#[test]
fn commit_edit_trims_surrounding_whitespace() {
    let (mut tasks, ids) = service_with(&["x"]);

    tasks.commit_edit(ids[0], "  padded  ").unwrap();

    assert_eq!(tasks.active_tasks()[0].content, "padded");
}

#[test]
fn commit_edit_reaches_completed_tasks_too() {
    let (mut tasks, ids) = service_with(&["done thing"]);

    tasks.set_completed(ids[0], true).unwrap();
    tasks.commit_edit(ids[0], "done thing, annotated").unwrap();

    assert_eq!(tasks.completed_tasks()[0].content, "done thing, annotated");
    assert!(tasks.completed_tasks()[0].completed);
}

#[test]
fn completion_moves_to_head_of_completed_lane() {
    let (mut tasks, ids) = service_with(&["a", "b", "c"]);

    tasks.set_completed(ids[2], true).unwrap();
    tasks.set_completed(ids[0], true).unwrap();

    // Newest completion first: the destination lane is prepended.
    let completed: Vec<TaskId> = tasks.completed_tasks().iter().map(|task| task.id).collect();
    assert_eq!(completed, vec![ids[0], ids[2]]);
    assert!(tasks.completed_tasks().iter().all(|task| task.completed));

    let active: Vec<TaskId> = tasks.active_tasks().iter().map(|task| task.id).collect();
    assert_eq!(active, vec![ids[1]]);
}

#[test]
fn reactivation_is_the_exact_inverse_and_keeps_content() {
    let (mut tasks, ids) = service_with(&["round trip"]);

    tasks.set_completed(ids[0], true).unwrap();
    tasks.set_completed(ids[0], false).unwrap();

    assert_eq!(tasks.lane_of(ids[0]), Some(TaskLane::Active));
    assert_eq!(tasks.active_tasks()[0].content, "round trip");
    assert!(!tasks.active_tasks()[0].completed);
    assert!(tasks.completed_tasks().is_empty());
}

#[test]
fn toggling_to_the_current_state_changes_nothing() {
    let (mut tasks, ids) = service_with(&["a", "b"]);
    tasks.set_completed(ids[0], true).unwrap();

    tasks.set_completed(ids[0], true).unwrap();
    tasks.set_completed(ids[1], false).unwrap();

    assert_eq!(tasks.completed_tasks().len(), 1);
    assert_eq!(tasks.active_tasks().len(), 1);
}

#[test]
fn reorder_shifts_intervening_rows() {
    let (mut tasks, ids) = service_with(&["a", "b", "c"]);

    tasks.reorder(TaskLane::Active, 0, 2).unwrap();

    let order: Vec<TaskId> = tasks.active_tasks().iter().map(|task| task.id).collect();
    assert_eq!(order, vec![ids[1], ids[2], ids[0]]);
}

#[test]
fn reorder_toward_head_shifts_the_other_way() {
    let (mut tasks, ids) = service_with(&["a", "b", "c"]);

    tasks.reorder(TaskLane::Active, 2, 0).unwrap();

    let order: Vec<TaskId> = tasks.active_tasks().iter().map(|task| task.id).collect();
    assert_eq!(order, vec![ids[2], ids[0], ids[1]]);
}

#[test]
fn reorder_ignores_out_of_range_indices() {
    let (mut tasks, ids) = service_with(&["a", "b", "c"]);

    tasks.reorder(TaskLane::Active, 0, 3).unwrap();
    tasks.reorder(TaskLane::Active, 5, 1).unwrap();

    let order: Vec<TaskId> = tasks.active_tasks().iter().map(|task| task.id).collect();
    assert_eq!(order, ids);
}

#[test]
fn completed_lane_reorders_independently() {
    let (mut tasks, ids) = service_with(&["a", "b"]);
    tasks.set_completed(ids[0], true).unwrap();
    tasks.set_completed(ids[1], true).unwrap();

    tasks.reorder(TaskLane::Completed, 0, 1).unwrap();

    let completed: Vec<TaskId> = tasks.completed_tasks().iter().map(|task| task.id).collect();
    assert_eq!(completed, vec![ids[0], ids[1]]);
    assert!(tasks.active_tasks().is_empty());
}
