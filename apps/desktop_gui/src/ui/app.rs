use std::time::Duration;

use client_core::{CatalogController, PageRequest, ViewState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{Artwork, ArtworkId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiEvent},
    orchestration::request_page,
    reducer::{apply_ui_event, StatusLine},
};

const TITLE: &str = "Art Institute — Artworks";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PagerAction {
    First,
    Previous,
    Page(u32),
    Next,
    Last,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableEdit {
    Row { id: ArtworkId, checked: bool },
    WholePage { checked: bool },
}

struct CustomSelectState {
    open: bool,
    count: i64,
}

impl Default for CustomSelectState {
    fn default() -> Self {
        Self { open: false, count: 1 }
    }
}

pub struct ArtworkViewerApp {
    controller: CatalogController,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    status: StatusLine,
    custom_select: CustomSelectState,
    api_base_url: String,
}

impl ArtworkViewerApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        api_base_url: String,
    ) -> Self {
        let mut app = Self {
            controller: CatalogController::default(),
            cmd_tx,
            ui_rx,
            status: StatusLine {
                text: "Loading artworks...".to_string(),
                error: None,
            },
            custom_select: CustomSelectState::default(),
            api_base_url,
        };
        let request = app.controller.load_page(1);
        app.dispatch(request);
        app
    }

    fn dispatch(&mut self, request: PageRequest) {
        request_page(&mut self.controller, &self.cmd_tx, &mut self.status, request);
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.controller, &mut self.status, event);
        }
    }

    fn navigate(&mut self, action: PagerAction) {
        let request = match action {
            PagerAction::First => self.controller.go_first(),
            PagerAction::Previous => self.controller.go_previous(),
            PagerAction::Page(page) => self.controller.load_page(i64::from(page)),
            PagerAction::Next => self.controller.go_next(),
            PagerAction::Last => self.controller.go_last(),
        };
        self.dispatch(request);
    }

    fn apply_table_edit(&mut self, view: &ViewState, edit: TableEdit) {
        let desired = desired_page_selection(view, edit);
        self.controller.toggle_selection_for_page(&desired);
    }

    fn show_header(&mut self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.vertical_centered(|ui| ui.heading(TITLE));
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui.button("Select all on page").clicked() {
                self.controller.select_all_on_page();
            }
            if ui.button("Deselect all on page").clicked() {
                self.controller.deselect_all_on_page();
            }
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Custom select").clicked() {
                    self.custom_select.open = !self.custom_select.open;
                }
                ui.label(egui::RichText::new(&self.status.text).weak());
            });
        });
        ui.add_space(4.0);
    }

    fn show_table(&mut self, ui: &mut egui::Ui, view: &ViewState) {
        if view.loading {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(format!("Loading page {}...", view.page));
            });
        }

        let mut edit = None;
        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("artworks_grid")
                .striped(true)
                .num_columns(6)
                .spacing([12.0, 8.0])
                .show(ui, |ui| {
                    let has_rows = !view.rows.is_empty();
                    let mut whole_page =
                        has_rows && view.selected_ids_on_page.len() == view.rows.len();
                    let header_box = egui::Checkbox::without_text(&mut whole_page);
                    if ui.add_enabled(has_rows, header_box).changed() {
                        edit = Some(TableEdit::WholePage {
                            checked: whole_page,
                        });
                    }
                    for header in ["Title", "Place of Origin", "Artist", "Inscriptions", "Dates"] {
                        ui.label(egui::RichText::new(header).strong());
                    }
                    ui.end_row();

                    for row in &view.rows {
                        let mut checked = view.is_selected(row.id);
                        if ui.checkbox(&mut checked, "").changed() {
                            edit = Some(TableEdit::Row {
                                id: row.id,
                                checked,
                            });
                        }
                        ui.label(row.display_title());
                        ui.label(row.display_place_of_origin());
                        ui.add(egui::Label::new(row.display_artist()).wrap());
                        ui.add(egui::Label::new(row.display_inscriptions()).wrap());
                        ui.label(row.display_dates());
                        ui.end_row();
                    }
                });

            if view.rows.is_empty() && !view.loading {
                ui.label("No artworks to show.");
            }
        });

        if let Some(edit) = edit {
            self.apply_table_edit(view, edit);
        }
    }

    fn show_footer(&mut self, ui: &mut egui::Ui, view: &ViewState) {
        ui.add_space(6.0);
        ui.label(format!("Selected IDs: {}", view.selected_count));

        let mut action = None;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(view.can_go_back, egui::Button::new("««"))
                .clicked()
            {
                action = Some(PagerAction::First);
            }
            if ui
                .add_enabled(view.can_go_back, egui::Button::new("‹"))
                .clicked()
            {
                action = Some(PagerAction::Previous);
            }
            for page in &view.page_window {
                let link = egui::Button::new(page.to_string()).selected(*page == view.page);
                if ui.add(link).clicked() {
                    action = Some(PagerAction::Page(*page));
                }
            }
            if ui
                .add_enabled(view.can_go_forward, egui::Button::new("›"))
                .clicked()
            {
                action = Some(PagerAction::Next);
            }
            if ui
                .add_enabled(view.can_go_forward, egui::Button::new("»»"))
                .clicked()
            {
                action = Some(PagerAction::Last);
            }
        });
        if let Some(action) = action {
            self.navigate(action);
        }

        ui.label(
            egui::RichText::new(format!(
                "page={}, totalRecords={}, totalPages={}  ·  {}",
                view.page, view.total_records, view.total_pages, self.api_base_url
            ))
            .small()
            .weak(),
        );
        ui.add_space(6.0);
    }

    fn show_custom_select_window(&mut self, ctx: &egui::Context) {
        if !self.custom_select.open {
            return;
        }

        let max = i64::from(self.controller.config().page_size);
        let mut keep_open = true;
        let mut apply = false;
        let mut close = false;
        egui::Window::new("Custom select")
            .collapsible(false)
            .resizable(false)
            .open(&mut keep_open)
            .show(ctx, |ui| {
                ui.label(egui::RichText::new("Select first n rows on this page").strong());
                ui.add(
                    egui::DragValue::new(&mut self.custom_select.count)
                        .range(1..=max)
                        .speed(0.1),
                );
                ui.horizontal(|ui| {
                    if ui.button("Apply").clicked() {
                        apply = true;
                    }
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });

        if apply {
            self.controller
                .apply_custom_select(Some(self.custom_select.count));
        }
        self.custom_select.open = keep_open && !apply && !close;
    }
}

fn show_error_banner(ui: &mut egui::Ui, error: &UiError) -> bool {
    let mut dismissed = false;
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(96, 28, 32))
        .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(160, 52, 58)))
        .corner_radius(egui::CornerRadius::same(4))
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(error.headline())
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.label(
                        egui::RichText::new(error.message())
                            .small()
                            .color(egui::Color32::from_rgb(240, 200, 200)),
                    );
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("Dismiss").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}

/// Complete desired selection for the visible rows after one checkbox edit.
fn desired_page_selection(view: &ViewState, edit: TableEdit) -> Vec<Artwork> {
    view.rows
        .iter()
        .filter(|row| match edit {
            TableEdit::Row { id, checked } if id == row.id => checked,
            TableEdit::Row { .. } => view.is_selected(row.id),
            TableEdit::WholePage { checked } => checked,
        })
        .cloned()
        .collect()
}

impl eframe::App for ArtworkViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("viewer_header").show(ctx, |ui| self.show_header(ui));

        if let Some(error) = self.status.error.clone() {
            egui::TopBottomPanel::top("error_banner").show(ctx, |ui| {
                if show_error_banner(ui, &error) {
                    self.status.error = None;
                }
            });
        }

        let view = self.controller.snapshot();
        egui::TopBottomPanel::bottom("pager").show(ctx, |ui| self.show_footer(ui, &view));

        // The footer may have started a new load; render the table from fresh state.
        let view = self.controller.snapshot();
        egui::CentralPanel::default().show(ctx, |ui| self.show_table(ui, &view));

        self.show_custom_select_window(ctx);

        if self.controller.is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use client_core::{ArtworkPage, CatalogController};

    use super::*;

    fn loaded_controller() -> CatalogController {
        let mut controller = CatalogController::default();
        let request = controller.load_page(1);
        controller.apply_page_result(
            request,
            Ok(ArtworkPage {
                rows: (1..=5)
                    .map(|id| Artwork::new(id, format!("Artwork {id}")))
                    .collect(),
                total_records: 5,
            }),
        );
        controller
    }

    fn ids(rows: &[Artwork]) -> Vec<i64> {
        rows.iter().map(|row| row.id.0).collect()
    }

    #[test]
    fn checking_a_row_keeps_the_rest_of_the_page_selection() {
        let mut controller = loaded_controller();
        controller.apply_custom_select(Some(2));
        let view = controller.snapshot();

        let desired = desired_page_selection(
            &view,
            TableEdit::Row {
                id: ArtworkId(4),
                checked: true,
            },
        );
        assert_eq!(ids(&desired), vec![1, 2, 4]);

        let desired = desired_page_selection(
            &view,
            TableEdit::Row {
                id: ArtworkId(1),
                checked: false,
            },
        );
        assert_eq!(ids(&desired), vec![2]);
    }

    #[test]
    fn header_checkbox_selects_or_clears_the_page() {
        let controller = loaded_controller();
        let view = controller.snapshot();

        let all = desired_page_selection(&view, TableEdit::WholePage { checked: true });
        assert_eq!(ids(&all), vec![1, 2, 3, 4, 5]);

        let none = desired_page_selection(&view, TableEdit::WholePage { checked: false });
        assert!(none.is_empty());
    }
}
