use projboard_core::{
    DragPayload, ProjectForm, ProjectFormInput, ProjectListView, ProjectStatus, ProjectStore,
    StatusChange,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

fn board() -> (ProjectStore, ProjectListView, ProjectListView) {
    let mut store = ProjectStore::new();
    let active = ProjectListView::attach(&mut store, ProjectStatus::Active);
    let ended = ProjectListView::attach(&mut store, ProjectStatus::Ended);
    (store, active, ended)
}

fn notification_counter(store: &mut ProjectStore) -> Arc<Mutex<usize>> {
    let count = Arc::new(Mutex::new(0));
    let sink = Arc::clone(&count);
    store.subscribe(move |_| *sink.lock().unwrap() += 1);
    count
}

#[test]
fn submitted_project_lands_in_active_partition_only() {
    let (mut store, active, ended) = board();
    let form = ProjectForm::default();

    let id = form
        .submit(
            &mut store,
            &ProjectFormInput::new("Website", "Redesign landing page", "3"),
        )
        .unwrap();

    assert_eq!(store.len(), 1);
    let project = store.get(id).unwrap();
    assert!(!project.id.is_nil());
    assert_eq!(project.title, "Website");
    assert_eq!(project.description, "Redesign landing page");
    assert_eq!(project.members, 3);
    assert_eq!(project.status, ProjectStatus::Active);

    assert_eq!(active.projects(), vec![project.clone()]);
    assert!(ended.projects().is_empty());
}

#[test]
fn dragging_into_ended_moves_project_between_partitions() {
    let (mut store, active, ended) = board();
    let form = ProjectForm::default();
    let id = form
        .submit(
            &mut store,
            &ProjectFormInput::new("Website", "Redesign landing page", "3"),
        )
        .unwrap();
    let notifications = notification_counter(&mut store);

    let payload = DragPayload::for_project(store.get(id).unwrap());
    assert!(ended.accepts(&payload));
    let change = ended.drop_project(&mut store, &payload);

    assert_eq!(
        change,
        StatusChange::Changed {
            from: ProjectStatus::Active,
            to: ProjectStatus::Ended,
        }
    );
    assert_eq!(*notifications.lock().unwrap(), 1);
    assert!(active.projects().is_empty());
    let ended_ids: Vec<_> = ended.projects().iter().map(|p| p.id).collect();
    assert_eq!(ended_ids, [id]);
}

#[test]
fn dragging_back_reactivates_project() {
    let (mut store, active, ended) = board();
    let id = store.add_project("Website", "Redesign landing page", 3);
    let payload = DragPayload::for_project(store.get(id).unwrap());

    assert!(ended.drop_project(&mut store, &payload).is_changed());
    assert!(active.drop_project(&mut store, &payload).is_changed());

    assert_eq!(active.projects().len(), 1);
    assert!(ended.projects().is_empty());
}

#[test]
fn dropping_into_current_partition_does_not_rerender() {
    let (mut store, active, ended) = board();
    let id = store.add_project("Website", "Redesign landing page", 3);
    let payload = DragPayload::for_project(store.get(id).unwrap());
    let active_renders = active.render_count();
    let ended_renders = ended.render_count();

    assert_eq!(
        active.drop_project(&mut store, &payload),
        StatusChange::Unchanged
    );
    assert_eq!(active.render_count(), active_renders);
    assert_eq!(ended.render_count(), ended_renders);
}

#[test]
fn rejected_submission_leaves_store_untouched() {
    let (mut store, active, _ended) = board();
    let notifications = notification_counter(&mut store);
    let form = ProjectForm::default();

    let err = form
        .submit(&mut store, &ProjectFormInput::new("   ", "too short", "7"))
        .unwrap_err();

    assert_eq!(err.fields().len(), 3);
    assert!(store.is_empty());
    assert_eq!(*notifications.lock().unwrap(), 0);
    assert_eq!(active.render_count(), 0);
}

#[test]
fn each_add_notifies_every_subscriber_exactly_once() {
    let (mut store, active, ended) = board();
    let first = notification_counter(&mut store);
    let second = notification_counter(&mut store);

    for index in 0..4 {
        let before = store.len();
        let id = store.add_project(format!("project {index}"), "some description", 2);
        assert_eq!(store.len(), before + 1);
        assert_eq!(store.snapshot().last().map(|p| p.id), Some(id));
    }

    assert_eq!(*first.lock().unwrap(), 4);
    assert_eq!(*second.lock().unwrap(), 4);
    assert_eq!(active.render_count(), 4);
    assert_eq!(ended.render_count(), 4);
}

#[test]
fn partitions_preserve_insertion_order() {
    let (mut store, active, ended) = board();
    let ids: Vec<_> = (0..5)
        .map(|index| store.add_project(format!("p{index}"), "some description", 1))
        .collect();
    let _ = store.change_status(ids[1], ProjectStatus::Ended);
    let _ = store.change_status(ids[3], ProjectStatus::Ended);

    let active_ids: Vec<_> = active.projects().iter().map(|p| p.id).collect();
    let ended_ids: Vec<_> = ended.projects().iter().map(|p| p.id).collect();
    assert_eq!(active_ids, [ids[0], ids[2], ids[4]]);
    assert_eq!(ended_ids, [ids[1], ids[3]]);
}

#[test]
fn unknown_id_change_is_a_silent_noop() {
    let (mut store, active, _ended) = board();
    store.add_project("Website", "Redesign landing page", 3);
    let notifications = notification_counter(&mut store);
    let before = store.snapshot();

    assert_eq!(
        store.change_status(Uuid::new_v4(), ProjectStatus::Ended),
        StatusChange::NotFound
    );
    assert_eq!(*notifications.lock().unwrap(), 0);
    assert_eq!(store.snapshot(), before);
    assert_eq!(active.projects().len(), 1);
}

#[test]
fn generated_ids_are_unique() {
    let mut store = ProjectStore::new();
    let ids: HashSet<_> = (0..200)
        .map(|_| store.add_project("t", "some description", 1))
        .collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn cards_carry_render_ready_fields() {
    let (mut store, active, _ended) = board();
    store.add_project("Solo", "one person effort", 1);
    store.add_project("Team", "many people effort", 4);

    let labels: Vec<_> = active
        .cards()
        .into_iter()
        .map(|card| card.members_label)
        .collect();
    assert_eq!(labels, ["1 member assigned", "4 members assigned"]);
}
