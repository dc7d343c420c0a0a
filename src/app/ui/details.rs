use eframe::egui::{self, Context, Ui};

use crate::app::ViewModel;

impl ViewModel {
    pub(in crate::app) fn context_menu_ui(&mut self, ui: &mut Ui) {
        let Some(index) = self.context_node else {
            ui.close();
            return;
        };
        let person_id = self.graph.nodes[index].id;

        if ui.button("View details").clicked() {
            match self.portal.person_detail(person_id) {
                Ok(detail) => self.detail = Some(detail),
                Err(error) => log::error!("failed to load person detail: {error:#}"),
            }
            ui.close();
        }
        ui.separator();
        if ui.button("Manage relationships").clicked() {
            let target = self.portal.relationships_target(person_id);
            log::info!("navigating to {target}");
            ui.close();
        }
    }

    pub(super) fn show_detail_window(&mut self, ctx: &Context) {
        let Some(detail) = self.detail.clone() else {
            return;
        };
        let mut open = true;
        egui::Window::new("Person details")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.heading(&detail.full_name);
                ui.add_space(6.0);
                egui::Grid::new("person_detail_grid")
                    .num_columns(2)
                    .spacing([24.0, 4.0])
                    .show(ui, |ui| {
                        ui.label("Email");
                        ui.label(&detail.email);
                        ui.end_row();
                        ui.label("Gender");
                        ui.label(detail.gender);
                        ui.end_row();
                        ui.label("Relationships");
                        ui.label(detail.relationship_count.to_string());
                        ui.end_row();
                    });
            });
        if !open {
            self.detail = None;
        }
    }
}
