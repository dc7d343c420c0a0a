use eframe::egui::{self, Pos2, Rect, Ui};

use super::ViewModel;
use super::filter;
use super::transform::{ResetAnimation, ViewTransform, smoothstep};

const LINK_HOVER_REACH: f32 = 6.0;

impl ViewModel {
    /// Wheel zoom anchored at the pointer. The scene point under the cursor
    /// stays fixed while the scale changes.
    pub(in crate::app) fn handle_zoom(&mut self, ui: &Ui, rect: Rect, response: &egui::Response) {
        if !response.hovered() {
            return;
        }
        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll == 0.0 {
            return;
        }
        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let factor = (1.0 + scroll * 0.0018).clamp(0.85, 1.15);
        self.transform = self.transform.zoomed_about(rect, pointer, factor, self.config.zoom);
    }

    /// A primary drag starting on a node picks it up and pins it to the
    /// pointer; any other drag pans the scene. Release unpins without
    /// reheating, so the node springs back under the still-warm forces.
    pub(in crate::app) fn handle_drag(&mut self, rect: Rect, response: &egui::Response) {
        if response.drag_started_by(egui::PointerButton::Primary)
            && let Some(index) = self.hovered
        {
            self.dragged = Some(index);
            self.sim.reheat(self.config.animation.alpha_target);
            let pos = self.sim.nodes()[index].pos;
            self.sim.pin(index, pos);
        }

        if let Some(index) = self.dragged {
            if response.dragged()
                && let Some(pointer) = response.interact_pointer_pos()
            {
                self.sim.pin(index, self.transform.to_scene(rect, pointer));
            }
            if response.drag_stopped() {
                self.sim.unpin(index);
                self.dragged = None;
            }
            return;
        }

        if response.dragged_by(egui::PointerButton::Primary)
            || response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.transform.pan += response.drag_delta();
        }
    }

    /// Closest node whose screen-space circle contains the pointer.
    pub(in crate::app) fn hovered_index(&self, pointer: Option<Pos2>) -> Option<usize> {
        let pointer = pointer?;
        (0..self.screen_positions.len())
            .filter_map(|index| {
                let distance = self.screen_positions[index].distance(pointer);
                (distance <= self.screen_radii[index]).then_some((index, distance))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(index, _)| index)
    }

    /// Closest link whose screen-space segment passes within reach of the
    /// pointer. Node hover takes precedence; callers check that first.
    pub(in crate::app) fn hovered_link_index(&self, pointer: Option<Pos2>) -> Option<usize> {
        let pointer = pointer?;
        self.graph
            .links
            .iter()
            .enumerate()
            .map(|(slot, link)| {
                let start = self.screen_positions[link.source];
                let end = self.screen_positions[link.target];
                (slot, segment_distance(start, end, pointer))
            })
            .filter(|&(_, distance)| distance <= LINK_HOVER_REACH)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(slot, _)| slot)
    }

    /// Starts the animated return to the identity transform and drops every
    /// active highlight. The layout gets one reheat so it can resettle.
    pub(in crate::app) fn reset_view(&mut self, now: f64) {
        if self.graph.nodes.is_empty() {
            // No canvas pass runs to advance the animation; jump straight home.
            self.transform = ViewTransform::IDENTITY;
            self.reset_anim = None;
        } else {
            self.reset_anim = Some(ResetAnimation {
                from: self.transform,
                started_secs: now,
            });
        }
        self.search.clear();
        self.search_deadline = None;
        self.relationship_filter.clear();
        self.opacity = filter::clear_highlight(&self.graph, self.config.opacity);
        self.sim.reheat(self.config.animation.alpha_target);
    }

    /// Called before the model is replaced. Pins and timers must not leak
    /// into whatever state comes next.
    pub(in crate::app) fn shutdown(&mut self) {
        self.sim.stop();
        self.search_deadline = None;
        self.reset_anim = None;
        self.dragged = None;
    }

    pub(in crate::app) fn advance_reset_animation(&mut self, now: f64) {
        let Some(animation) = &self.reset_anim else {
            return;
        };
        let elapsed = (now - animation.started_secs) as f32;
        let t = elapsed / self.config.reset_animation.duration_secs;
        if t >= 1.0 {
            // Land exactly on identity, never on a lerp approximation.
            self.transform = ViewTransform::IDENTITY;
            self.reset_anim = None;
        } else {
            self.transform =
                ViewTransform::lerp(animation.from, ViewTransform::IDENTITY, smoothstep(t));
        }
    }
}

fn segment_distance(start: Pos2, end: Pos2, point: Pos2) -> f32 {
    let span = end - start;
    let length_sq = span.length_sq();
    if length_sq <= f32::EPSILON {
        return start.distance(point);
    }
    let t = ((point - start).dot(span) / length_sq).clamp(0.0, 1.0);
    (start + span * t).distance(point)
}

#[cfg(test)]
mod tests {
    use eframe::egui::{pos2, vec2};

    use super::super::sim::SimPhase;
    use super::super::{GraphConfig, ViewModel};
    use super::*;
    use crate::network::parse_network_document;

    fn model() -> ViewModel {
        let graph = parse_network_document(
            r#"{
                "nodes": [
                    {"id": 1, "firstName": "Ada", "lastName": "Quinn", "relationshipCount": 1},
                    {"id": 2, "firstName": "Ben", "lastName": "Ruiz", "relationshipCount": 1}
                ],
                "links": [{"source": 1, "target": 2, "relationshipType": "Friend", "relationshipCode": "FRD"}]
            }"#,
        )
        .unwrap();
        ViewModel::new(graph, GraphConfig::default())
    }

    #[test]
    fn reset_clears_filters_and_animates_back_to_identity() {
        let mut model = model();
        model.transform = ViewTransform {
            pan: vec2(50.0, -20.0),
            zoom: 2.0,
        };
        model.search = "ada".to_owned();
        model.relationship_filter = "FRD".to_owned();

        model.reset_view(10.0);
        assert!(model.search.is_empty());
        assert!(model.relationship_filter.is_empty());
        assert_eq!(model.sim.phase(), SimPhase::Running);

        model.advance_reset_animation(10.25);
        assert!(model.reset_anim.is_some());
        assert_ne!(model.transform, ViewTransform::IDENTITY);

        model.advance_reset_animation(10.6);
        assert_eq!(model.transform, ViewTransform::IDENTITY);
        assert!(model.reset_anim.is_none());
    }

    #[test]
    fn shutdown_stops_the_simulation_and_drops_timers() {
        let mut model = model();
        model.search_deadline = Some(5.0);
        model.sim.pin(0, vec2(1.0, 1.0));

        model.shutdown();
        assert!(model.search_deadline.is_none());
        assert!(model.dragged.is_none());
        assert_eq!(model.sim.phase(), SimPhase::Idle);
        assert!(model.sim.nodes().iter().all(|node| node.pin.is_none()));
    }

    #[test]
    fn edge_hover_picks_the_link_nearest_the_pointer() {
        let mut model = model();
        model.screen_positions = vec![pos2(100.0, 100.0), pos2(200.0, 100.0)];
        model.screen_radii = vec![10.0, 10.0];

        assert_eq!(model.hovered_link_index(Some(pos2(150.0, 103.0))), Some(0));
        assert_eq!(model.hovered_link_index(Some(pos2(150.0, 120.0))), None);
        // Past the endpoints the distance is taken from the endpoint itself.
        assert_eq!(model.hovered_link_index(Some(pos2(260.0, 100.0))), None);
        assert_eq!(model.hovered_link_index(None), None);
    }

    #[test]
    fn reset_on_an_empty_graph_jumps_straight_to_identity() {
        let graph = parse_network_document(r#"{"nodes": [], "links": []}"#).unwrap();
        let mut model = ViewModel::new(graph, GraphConfig::default());
        model.transform = ViewTransform {
            pan: vec2(40.0, 9.0),
            zoom: 0.5,
        };

        model.reset_view(3.0);
        assert_eq!(model.transform, ViewTransform::IDENTITY);
        assert!(model.reset_anim.is_none());
    }

    #[test]
    fn hover_picks_the_closest_containing_circle() {
        let mut model = model();
        model.screen_positions = vec![pos2(100.0, 100.0), pos2(112.0, 100.0)];
        model.screen_radii = vec![10.0, 10.0];

        // Inside both circles, closer to the second.
        assert_eq!(model.hovered_index(Some(pos2(107.0, 100.0))), Some(1));
        assert_eq!(model.hovered_index(Some(pos2(98.0, 100.0))), Some(0));
        assert_eq!(model.hovered_index(Some(pos2(300.0, 300.0))), None);
        assert_eq!(model.hovered_index(None), None);
    }
}
