use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, vec2};

use super::ViewModel;
use super::{encoding, filter};

const EDGE_COLOR: Color32 = Color32::from_gray(0x99);
const LABEL_COLOR: Color32 = Color32::from_gray(0xe6);
const HOVER_STROKE: Color32 = Color32::from_gray(0x33);

impl ViewModel {
    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        let now = ui.input(|input| input.time);

        self.advance_reset_animation(now);
        self.handle_zoom(ui, rect, &response);
        let stepped = self.sim.step();

        self.update_screen_space(rect);
        let pointer = ui.input(|input| input.pointer.hover_pos());
        self.hovered = match self.dragged {
            Some(index) => Some(index),
            None => self.hovered_index(pointer),
        };
        self.handle_drag(rect, &response);
        self.update_screen_space(rect);

        if stepped || self.dragged.is_some() || self.reset_anim.is_some() {
            ui.ctx().request_repaint();
        }
        if self.hovered.is_some() {
            ui.output_mut(|output| output.cursor_icon = egui::CursorIcon::PointingHand);
        }

        let edge_width = (2.0 * self.transform.zoom).clamp(0.6, 5.0);
        for (slot, link) in self.graph.links.iter().enumerate() {
            let start = self.screen_positions[link.source];
            let end = self.screen_positions[link.target];
            let color = encoding::fade(EDGE_COLOR, self.opacity.links[slot]);
            painter.line_segment([start, end], Stroke::new(edge_width, color));
        }

        for (index, person) in self.graph.nodes.iter().enumerate() {
            let position = self.screen_positions[index];
            let radius = self.screen_radii[index];
            let opacity = self.opacity.nodes[index];
            let fill = encoding::fade(encoding::color_for(self.config.colors, person.gender), opacity);
            painter.circle_filled(position, radius, fill);

            let (stroke_width, stroke_color) = if self.hovered == Some(index) {
                (4.0, HOVER_STROKE)
            } else {
                (2.0, Color32::WHITE)
            };
            let stroke = Stroke::new(stroke_width, encoding::fade(stroke_color, opacity));
            painter.circle_stroke(position, radius, stroke);
        }

        let font = FontId::proportional((10.0 * self.transform.zoom).clamp(6.0, 24.0));
        for (index, person) in self.graph.nodes.iter().enumerate() {
            let label_opacity = self.opacity.labels[index];
            if label_opacity <= 0.0 {
                continue;
            }
            let anchor = self.screen_positions[index] + vec2(self.screen_radii[index] + 5.0, 0.0);
            painter.text(
                anchor,
                Align2::LEFT_CENTER,
                person.full_name(),
                font.clone(),
                encoding::fade(LABEL_COLOR, label_opacity),
            );
        }

        let status = if let Some(person) = self.hovered.and_then(|index| self.graph.nodes.get(index))
        {
            Some(format!(
                "{}  |  {}  |  {} relationships",
                person.full_name(),
                person.email,
                person.relationship_count
            ))
        } else {
            // Hovering an edge shows the relationship it carries.
            self.hovered_link_index(pointer).map(|slot| {
                let link = &self.graph.links[slot];
                format!(
                    "{} - {}  |  {}",
                    self.graph.nodes[link.source].full_name(),
                    self.graph.nodes[link.target].full_name(),
                    link.relationship_type
                )
            })
        };
        if let Some(status) = status {
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                status,
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        // Click on a node highlights its neighborhood; a background click
        // clears whatever highlight is live.
        if response.clicked_by(egui::PointerButton::Primary) {
            self.opacity = match self.hovered {
                Some(index) => {
                    filter::neighborhood_highlight(&self.graph, self.config.opacity, index)
                }
                None => filter::clear_highlight(&self.graph, self.config.opacity),
            };
        }

        if self.context_menu_enabled {
            if response.secondary_clicked() {
                self.context_node = self.hovered;
            }
            response.context_menu(|ui| self.context_menu_ui(ui));
        }
    }

    fn update_screen_space(&mut self, rect: Rect) {
        self.screen_positions.clear();
        self.screen_radii.clear();
        for (node, radius) in self.sim.nodes().iter().zip(&self.radii) {
            self.screen_positions.push(self.transform.to_screen(rect, node.pos));
            self.screen_radii.push(radius * self.transform.zoom);
        }
    }
}
