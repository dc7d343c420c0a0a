use std::time::Duration;

use eframe::egui::{self, Context, TextEdit, Ui};

use crate::app::{ViewModel, filter};

impl ViewModel {
    pub(super) fn draw_controls(&mut self, ui: &mut Ui) {
        let search = ui.add(
            TextEdit::singleline(&mut self.search)
                .hint_text("Search people")
                .desired_width(180.0),
        );
        if search.changed() {
            let now = ui.input(|input| input.time);
            self.schedule_search(now);
        }

        let selected_label = if self.relationship_filter.is_empty() {
            "All relationships"
        } else {
            self.relationship_filter.as_str()
        };
        let before = self.relationship_filter.clone();
        egui::ComboBox::from_id_salt("relationship_filter")
            .selected_text(selected_label.to_owned())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut self.relationship_filter, String::new(), "All relationships");
                for code in &self.relationship_codes {
                    ui.selectable_value(&mut self.relationship_filter, code.clone(), code.as_str());
                }
            });
        if self.relationship_filter != before {
            self.apply_relationship_filter();
        }

        if ui.button("Reset view").clicked() {
            let now = ui.input(|input| input.time);
            self.reset_view(now);
        }
    }

    /// Each keystroke restarts the quiet window; only the last one fires.
    pub(in crate::app) fn schedule_search(&mut self, now: f64) {
        self.search_deadline = Some(now + self.config.search_debounce.quiet_secs);
    }

    /// The selector takes over the highlight; a pending search would stomp
    /// on it, so the timer is dropped.
    pub(in crate::app) fn apply_relationship_filter(&mut self) {
        self.search_deadline = None;
        self.opacity = filter::relationship_highlight(
            &self.graph,
            self.config.opacity,
            &self.relationship_filter,
        );
    }

    /// Applies the search once the quiet window has elapsed; returns the
    /// remaining wait while the deadline is still in the future.
    pub(in crate::app) fn poll_search_deadline(&mut self, now: f64) -> Option<Duration> {
        let deadline = self.search_deadline?;
        if now < deadline {
            return Some(Duration::from_secs_f64(deadline - now));
        }
        self.search_deadline = None;
        self.opacity = filter::search_highlight(&self.graph, self.config.opacity, &self.search);
        None
    }

    pub(super) fn evaluate_pending_search(&mut self, ctx: &Context) {
        let now = ctx.input(|input| input.time);
        if let Some(wait) = self.poll_search_deadline(now) {
            ctx.request_repaint_after(wait);
        }
    }
}
