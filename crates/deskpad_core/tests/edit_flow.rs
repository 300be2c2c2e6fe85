use deskpad_core::{EditSession, MemoryStateStore, TaskService};

fn single_task(content: &str) -> (TaskService<MemoryStateStore>, deskpad_core::TaskId) {
    let mut tasks = TaskService::open(MemoryStateStore::new()).unwrap();
    let id = tasks.add_task().unwrap();
    if !content.is_empty() {
        tasks.commit_edit(id, content).unwrap();
    }
    (tasks, id)
}

#[test]
fn typing_then_enter_commits_the_draft() {
    let (mut tasks, id) = single_task("");
    let mut session = EditSession::new();

    session.start(tasks.find_task(id).unwrap());
    session.text_input("buy oat milk");
    session.commit(&mut tasks).unwrap();

    assert!(!session.is_editing());
    assert_eq!(tasks.find_task(id).unwrap().content, "buy oat milk");
}

#[test]
fn blank_draft_commit_leaves_task_prompting_for_input() {
    let (mut tasks, id) = single_task("");
    let mut session = EditSession::new();

    session.start(tasks.find_task(id).unwrap());
    session.text_input("   ");
    session.commit(&mut tasks).unwrap();

    // The session ended but the task never acquired content.
    assert!(!session.is_editing());
    assert!(tasks.find_task(id).unwrap().content.is_empty());
}

#[test]
fn blank_recommit_keeps_previous_content() {
    let (mut tasks, id) = single_task("keep me");
    let mut session = EditSession::new();

    session.start(tasks.find_task(id).unwrap());
    session.text_input("");
    session.commit(&mut tasks).unwrap();

    assert_eq!(tasks.find_task(id).unwrap().content, "keep me");
}

#[test]
fn switching_tasks_mid_edit_leaves_the_first_untouched() {
    let mut tasks = TaskService::open(MemoryStateStore::new()).unwrap();
    let b = tasks.add_task().unwrap();
    let a = tasks.add_task().unwrap();
    tasks.commit_edit(a, "alpha").unwrap();
    tasks.commit_edit(b, "beta").unwrap();

    let mut session = EditSession::new();
    session.start(tasks.find_task(a).unwrap());
    session.text_input("alpha, half-rewritten");

    // Clicking into another row opens a new session; the old draft is gone.
    session.start(tasks.find_task(b).unwrap());
    session.text_input("beta, revised");
    session.commit(&mut tasks).unwrap();

    assert_eq!(tasks.find_task(a).unwrap().content, "alpha");
    assert_eq!(tasks.find_task(b).unwrap().content, "beta, revised");
}

#[test]
fn composed_input_commits_only_the_final_text() {
    let (mut tasks, id) = single_task("");
    let mut session = EditSession::new();

    session.start(tasks.find_task(id).unwrap());
    session.composition_start();
    session.text_input("ㅇ");
    session.text_input("우");
    session.text_input("운");
    session.composition_end("운동하기");
    session.commit(&mut tasks).unwrap();

    assert_eq!(tasks.find_task(id).unwrap().content, "운동하기");
}

#[test]
fn draft_survives_composition_that_never_finishes() {
    let (mut tasks, id) = single_task("typed before");
    let mut session = EditSession::new();

    session.start(tasks.find_task(id).unwrap());
    session.composition_start();
    session.text_input("typed before ㅅ");
    session.commit(&mut tasks).unwrap();

    // Only the pre-composition draft reaches the store.
    assert_eq!(tasks.find_task(id).unwrap().content, "typed before");
}

#[test]
fn commit_while_idle_changes_nothing() {
    let (mut tasks, id) = single_task("stable");
    let mut session = EditSession::new();

    session.commit(&mut tasks).unwrap();

    assert_eq!(tasks.find_task(id).unwrap().content, "stable");
}

#[test]
fn add_then_edit_flow_matches_the_widget_wiring() {
    // The add button creates a blank row and immediately edits it.
    let mut tasks = TaskService::open(MemoryStateStore::new()).unwrap();
    let mut session = EditSession::new();

    let id = tasks.add_task().unwrap();
    session.start(tasks.find_task(id).unwrap());
    assert_eq!(session.draft(), Some(""));

    session.text_input("newly added");
    session.commit(&mut tasks).unwrap();

    assert_eq!(tasks.active_tasks()[0].content, "newly added");
}
