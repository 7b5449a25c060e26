//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `projboard_core` linkage without the Flutter/FFI runtime.
//! - Run one scripted submit + drag session with deterministic output.

use projboard_core::{
    DragPayload, ProjectForm, ProjectFormInput, ProjectListView, ProjectStatus, ProjectStore,
};

fn main() {
    println!("projboard_core ping={}", projboard_core::ping());
    println!("projboard_core version={}", projboard_core::core_version());

    let mut store = ProjectStore::new();
    let active = ProjectListView::attach(&mut store, ProjectStatus::Active);
    let ended = ProjectListView::attach(&mut store, ProjectStatus::Ended);
    let form = ProjectForm::default();

    let input = ProjectFormInput::new("Website", "Redesign landing page", "3");
    let id = match form.submit(&mut store, &input) {
        Ok(id) => id,
        Err(err) => {
            eprintln!("submit failed: {err}");
            std::process::exit(1);
        }
    };
    print_board(&[&active, &ended]);

    let Some(project) = store.get(id) else {
        eprintln!("submitted project missing from store");
        std::process::exit(1);
    };
    let payload = DragPayload::for_project(project);
    let change = ended.drop_project(&mut store, &payload);
    println!("drop changed={}", change.is_changed());
    print_board(&[&active, &ended]);
}

fn print_board(views: &[&ProjectListView]) {
    for status in ProjectStatus::ALL {
        let Some(view) = views.iter().find(|view| view.status() == status) else {
            continue;
        };
        let titles = view
            .cards()
            .into_iter()
            .map(|card| format!("{} ({})", card.title, card.members_label))
            .collect::<Vec<_>>();
        println!("{} count={} [{}]", view.list_id(), titles.len(), titles.join(", "));
    }
}
