use rusqlite::Connection;
use tasklane_core::db::open_db_in_memory;
use tasklane_core::{BoardStore, Mutation, SqliteSlotRepository, StoreError, TaskDraft};
use uuid::Uuid;

fn open_store(conn: &Connection) -> BoardStore<SqliteSlotRepository<'_>> {
    BoardStore::open(SqliteSlotRepository::new(conn)).unwrap()
}

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        ..TaskDraft::default()
    }
}

#[test]
fn fresh_store_starts_empty() {
    let conn = open_db_in_memory().unwrap();
    let store = open_store(&conn);

    assert!(store.boards().is_empty());
    assert_eq!(store.revision(), 0);
}

#[test]
fn add_board_appends_in_display_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let first = store.add_board("To Do").unwrap();
    let second = store.add_board("Doing").unwrap();
    let third = store.add_board("Done").unwrap();

    let boards = store.boards();
    assert_eq!(boards.len(), 3);
    assert_eq!(boards[0].id, first);
    assert_eq!(boards[1].id, second);
    assert_eq!(boards[2].id, third);
    assert_eq!(boards[0].title, "To Do");
    assert!(boards[0].tasks.is_empty());
}

#[test]
fn add_board_trims_and_rejects_blank_title() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let board_id = store.add_board("  Backlog  ").unwrap();
    assert_eq!(store.find_board(board_id).unwrap().title, "Backlog");

    let err = store.add_board("   ").unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.boards().len(), 1);
}

#[test]
fn every_successful_add_is_counted_once() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let board_a = store.add_board("A").unwrap();
    let board_b = store.add_board("B").unwrap();
    for index in 0..4 {
        let target = if index % 2 == 0 { board_a } else { board_b };
        store.add_task(target, &draft(&format!("task {index}"))).unwrap();
    }

    let total_tasks: usize = store.boards().iter().map(|board| board.tasks.len()).sum();
    assert_eq!(store.boards().len(), 2);
    assert_eq!(total_tasks, 4);
}

#[test]
fn delete_board_cascades_and_leaves_others_untouched() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let doomed = store.add_board("Doomed").unwrap();
    let kept = store.add_board("Kept").unwrap();
    store.add_task(doomed, &draft("gone with the board")).unwrap();
    let kept_task = store.add_task(kept, &draft("survivor")).unwrap().unwrap();

    let outcome = store.delete_board(doomed).unwrap();
    assert!(outcome.is_applied());

    assert_eq!(store.boards().len(), 1);
    assert!(store.find_board(doomed).is_none());
    let kept_board = store.find_board(kept).unwrap();
    assert_eq!(kept_board.tasks.len(), 1);
    assert_eq!(kept_board.tasks[0].id, kept_task);
}

#[test]
fn delete_missing_board_reports_missing_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    store.add_board("Only").unwrap();
    let revision = store.revision();

    let outcome = store.delete_board(Uuid::new_v4()).unwrap();
    assert_eq!(outcome, Mutation::MissingBoard);
    assert_eq!(store.boards().len(), 1);
    assert_eq!(store.revision(), revision);
}

#[test]
fn add_task_appends_to_owning_board() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let board_id = store.add_board("To Do").unwrap();

    let first = store
        .add_task(
            board_id,
            &TaskDraft {
                title: "Write spec".to_string(),
                description: "one page".to_string(),
                due_date: "2026-08-14".to_string(),
            },
        )
        .unwrap()
        .unwrap();
    let second = store.add_task(board_id, &draft("Review spec")).unwrap().unwrap();

    let board = store.find_board(board_id).unwrap();
    assert_eq!(board.tasks.len(), 2);
    assert_eq!(board.tasks[0].id, first);
    assert_eq!(board.tasks[0].description, "one page");
    assert_eq!(board.tasks[0].due_date, "2026-08-14");
    assert_eq!(board.tasks[1].id, second);
}

#[test]
fn add_task_to_missing_board_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    store.add_board("Present").unwrap();
    let revision = store.revision();

    let created = store.add_task(Uuid::new_v4(), &draft("orphan")).unwrap();
    assert_eq!(created, None);
    assert_eq!(store.revision(), revision);
    assert!(store.boards()[0].tasks.is_empty());
}

#[test]
fn update_task_overwrites_fields_in_place() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let board_id = store.add_board("Doing").unwrap();
    let anchor = store.add_task(board_id, &draft("before")).unwrap().unwrap();
    let task_id = store.add_task(board_id, &draft("draft title")).unwrap().unwrap();

    let outcome = store
        .update_task(
            board_id,
            task_id,
            &TaskDraft {
                title: " final title ".to_string(),
                description: "filled in".to_string(),
                due_date: "2026-09-01".to_string(),
            },
        )
        .unwrap();
    assert_eq!(outcome, Mutation::Applied);

    let board = store.find_board(board_id).unwrap();
    // ID and position are stable across updates.
    assert_eq!(board.tasks[0].id, anchor);
    assert_eq!(board.tasks[1].id, task_id);
    assert_eq!(board.tasks[1].title, "final title");
    assert_eq!(board.tasks[1].description, "filled in");
    assert_eq!(board.tasks[1].due_date, "2026-09-01");
}

#[test]
fn update_task_reports_missing_targets() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let board_id = store.add_board("Doing").unwrap();
    let task_id = store.add_task(board_id, &draft("stable")).unwrap().unwrap();
    let revision = store.revision();

    let missing_board = store
        .update_task(Uuid::new_v4(), task_id, &draft("new"))
        .unwrap();
    assert_eq!(missing_board, Mutation::MissingBoard);

    let missing_task = store
        .update_task(board_id, Uuid::new_v4(), &draft("new"))
        .unwrap();
    assert_eq!(missing_task, Mutation::MissingTask);

    assert_eq!(store.revision(), revision);
    assert_eq!(store.find_task(board_id, task_id).unwrap().title, "stable");
}

#[test]
fn update_task_rejects_blank_title_without_mutation() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let board_id = store.add_board("Doing").unwrap();
    let task_id = store.add_task(board_id, &draft("keep me")).unwrap().unwrap();

    let err = store.update_task(board_id, task_id, &draft("  ")).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert_eq!(store.find_task(board_id, task_id).unwrap().title, "keep me");
}

#[test]
fn delete_task_removes_exactly_one() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let board_id = store.add_board("Done").unwrap();
    let first = store.add_task(board_id, &draft("first")).unwrap().unwrap();
    let second = store.add_task(board_id, &draft("second")).unwrap().unwrap();

    let outcome = store.delete_task(board_id, first).unwrap();
    assert_eq!(outcome, Mutation::Applied);

    let board = store.find_board(board_id).unwrap();
    assert_eq!(board.tasks.len(), 1);
    assert_eq!(board.tasks[0].id, second);
}

#[test]
fn delete_missing_task_leaves_board_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let board_id = store.add_board("Done").unwrap();
    store.add_task(board_id, &draft("only")).unwrap();
    let revision = store.revision();

    let outcome = store.delete_task(board_id, Uuid::new_v4()).unwrap();
    assert_eq!(outcome, Mutation::MissingTask);
    assert_eq!(store.find_board(board_id).unwrap().tasks.len(), 1);
    assert_eq!(store.revision(), revision);
}

#[test]
fn find_task_hydrates_edit_form_fields() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);
    let board_id = store.add_board("Doing").unwrap();
    let task_id = store
        .add_task(
            board_id,
            &TaskDraft {
                title: "edit me".to_string(),
                description: "body".to_string(),
                due_date: "2026-10-31".to_string(),
            },
        )
        .unwrap()
        .unwrap();

    let task = store.find_task(board_id, task_id).unwrap();
    assert_eq!(task.title, "edit me");
    assert_eq!(task.description, "body");
    assert_eq!(task.due_date, "2026-10-31");

    assert!(store.find_task(board_id, Uuid::new_v4()).is_none());
    assert!(store.find_task(Uuid::new_v4(), task_id).is_none());
}
