use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use client_core::{
    project,
    view::{FormView, SearchPanel, TableView, TABLE_HEADERS},
    Action, StatusKind, ViewModel, ViewState,
};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::apply_action;

const SUCCESS_COLOR: egui::Color32 = egui::Color32::from_rgb(46, 125, 50);
const FAILURE_COLOR: egui::Color32 = egui::Color32::from_rgb(198, 40, 40);

pub struct BookManagerApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state: ViewState,
    api_root: String,
    /// Worker and queue health; separate from the page's own status banner.
    bridge_status: String,
}

impl BookManagerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_root: impl Into<String>,
    ) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            state: ViewState::default(),
            api_root: api_root.into(),
            bridge_status: "Backend worker starting...".to_string(),
        };
        app.apply(Action::Mount);
        app
    }

    fn apply(&mut self, action: Action) {
        tracing::trace!(action = action.name(), "ui action");
        apply_action(&mut self.state, action, &self.cmd_tx, &mut self.bridge_status);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    self.bridge_status = "Backend worker ready".to_string();
                }
                UiEvent::BackendFailed(message) => {
                    self.bridge_status = message;
                }
                UiEvent::Completed(action) => self.apply(action),
            }
        }
    }

    fn show_page(&self, ui: &mut egui::Ui) -> Vec<Action> {
        let view = project(&self.state);
        let mut actions = Vec::new();

        ui.heading("📚 Library Management System");
        show_banner(ui, &view);
        ui.add_space(8.0);

        show_form(ui, &view.form, &mut actions);
        ui.separator();

        ui.heading("🔍 Get Book By ID");
        let mut search_id = self.state.search_id.clone();
        ui.horizontal(|ui| {
            let response =
                ui.add(egui::TextEdit::singleline(&mut search_id).hint_text("Enter Book ID"));
            if response.changed() {
                actions.push(Action::EditSearchId(search_id.clone()));
            }
            if ui.button("Fetch").clicked() {
                actions.push(Action::Fetch);
            }
        });
        if let Some(panel) = &view.search {
            show_search_panel(ui, panel);
        }
        ui.separator();

        ui.heading("📖 All Books");
        show_table(ui, &view.table, &mut actions);
        actions
    }
}

fn show_banner(ui: &mut egui::Ui, view: &ViewModel) {
    if let Some(banner) = &view.banner {
        let color = match banner.kind {
            StatusKind::Success => SUCCESS_COLOR,
            StatusKind::Failure => FAILURE_COLOR,
        };
        ui.colored_label(color, banner.text);
    }
}

fn show_form(ui: &mut egui::Ui, form: &FormView, actions: &mut Vec<Action>) {
    egui::Grid::new("book_form")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            for field in &form.fields {
                ui.label(field.placeholder);
                let mut value = field.value.clone();
                let response = ui.add_enabled(
                    field.enabled,
                    egui::TextEdit::singleline(&mut value).hint_text(field.placeholder),
                );
                if response.changed() {
                    actions.push(Action::EditField {
                        field: field.field,
                        value,
                    });
                }
                ui.end_row();
            }
        });
    ui.horizontal(|ui| {
        if ui.button(form.submit.label()).clicked() {
            actions.push(Action::Submit);
        }
        if form.show_cancel && ui.button("Cancel").clicked() {
            actions.push(Action::CancelEdit);
        }
    });
}

fn show_search_panel(ui: &mut egui::Ui, panel: &SearchPanel) {
    ui.group(|ui| {
        egui::Grid::new("search_result").num_columns(2).show(ui, |ui| {
            for (label, value) in &panel.lines {
                ui.strong(*label);
                ui.label(value);
                ui.end_row();
            }
        });
    });
}

fn show_table(ui: &mut egui::Ui, table: &TableView, actions: &mut Vec<Action>) {
    egui::Grid::new("book_table")
        .striped(true)
        .num_columns(TABLE_HEADERS.len())
        .show(ui, |ui| {
            for header in TABLE_HEADERS {
                ui.strong(header);
            }
            ui.end_row();

            match table {
                TableView::Empty { text } => {
                    ui.label(*text);
                    ui.end_row();
                }
                TableView::Rows(rows) => {
                    for row in rows {
                        for cell in &row.cells {
                            ui.label(cell);
                        }
                        ui.horizontal(|ui| {
                            if ui.button("Edit").clicked() {
                                actions.push(Action::SelectForEdit(row.record.clone()));
                            }
                            if ui.button("Delete").clicked() {
                                actions.push(Action::Delete(row.record.id.clone()));
                            }
                        });
                        ui.end_row();
                    }
                }
            }
        });
}

impl eframe::App for BookManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("bridge_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(&self.api_root);
                ui.separator();
                ui.weak(&self.bridge_status);
            });
        });

        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| self.show_page(ui))
                    .inner
            })
            .inner;
        for action in actions {
            self.apply(action);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{Effect, StatusMessage};
    use crossbeam_channel::bounded;
    use shared::domain::BookRecord;

    fn app() -> (BookManagerApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = BookManagerApp::new(cmd_tx, ui_rx, "http://127.0.0.1:8080/bookapi");
        (app, cmd_rx, ui_tx)
    }

    fn next_effect(cmd_rx: &Receiver<BackendCommand>) -> Effect {
        let BackendCommand::Run(effect) = cmd_rx.try_recv().expect("queued command");
        effect
    }

    #[test]
    fn startup_requests_the_list() {
        let (_app, cmd_rx, _ui_tx) = app();
        assert_eq!(next_effect(&cmd_rx), Effect::ListAll { generation: 1 });
        assert!(cmd_rx.try_recv().is_err());
    }

    #[test]
    fn completions_flow_back_through_the_reducer() {
        let (mut app, cmd_rx, ui_tx) = app();
        next_effect(&cmd_rx);

        ui_tx.send(UiEvent::BackendReady).expect("send");
        ui_tx
            .send(UiEvent::Completed(Action::ListLoaded {
                generation: 1,
                result: Ok(vec![BookRecord::new("b1", "Emma")]),
            }))
            .expect("send");
        ui_tx
            .send(UiEvent::Completed(Action::DeleteFinished(Ok(()))))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.bridge_status, "Backend worker ready");
        assert_eq!(app.state.records.len(), 1);
        assert_eq!(app.state.status, Some(StatusMessage::BookDeleted));
        assert_eq!(next_effect(&cmd_rx), Effect::ListAll { generation: 2 });
    }

    #[test]
    fn reloads_arriving_out_of_order_keep_the_newest_list() {
        let (mut app, cmd_rx, ui_tx) = app();
        next_effect(&cmd_rx);

        for _ in 0..2 {
            ui_tx
                .send(UiEvent::Completed(Action::DeleteFinished(Ok(()))))
                .expect("send");
        }
        app.process_ui_events();
        let Effect::ListAll { generation: older } = next_effect(&cmd_rx) else {
            panic!("expected reload");
        };
        let Effect::ListAll { generation: newer } = next_effect(&cmd_rx) else {
            panic!("expected reload");
        };

        let dune = BookRecord::new("b2", "Dune");
        ui_tx
            .send(UiEvent::Completed(Action::ListLoaded {
                generation: newer,
                result: Ok(vec![dune.clone()]),
            }))
            .expect("send");
        ui_tx
            .send(UiEvent::Completed(Action::ListLoaded {
                generation: older,
                result: Ok(vec![BookRecord::new("b1", "Emma"), dune.clone()]),
            }))
            .expect("send");
        app.process_ui_events();

        assert_eq!(app.state.records, vec![dune]);
    }

    #[test]
    fn backend_failure_is_shown_in_status_bar_only() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::BackendFailed("backend worker startup failure".into()))
            .expect("send");
        app.process_ui_events();
        assert_eq!(app.bridge_status, "backend worker startup failure");
        assert_eq!(app.state.status, None);
    }
}
