mod controls;
mod details;

use eframe::egui::{self, Context, Vec2};

use crate::network::NetworkGraph;

use super::portal::{LocalPortal, NodePortal};
use super::sim::Simulation;
use super::transform::ViewTransform;
use super::{GraphConfig, ViewModel, encoding, filter};

impl ViewModel {
    pub(super) fn new(graph: NetworkGraph, config: GraphConfig) -> Self {
        let portal = Box::new(LocalPortal::from_graph(&graph));
        Self::with_portal(graph, config, portal)
    }

    fn with_portal(graph: NetworkGraph, config: GraphConfig, portal: Box<dyn NodePortal>) -> Self {
        let radii: Vec<f32> = graph
            .nodes
            .iter()
            .map(|person| {
                encoding::radius_for(config.radius, person.relationship_count, graph.max_connections)
            })
            .collect();

        let mut sim = Simulation::new(config.forces, config.animation);
        sim.start(&graph, &radii, Vec2::ZERO);

        let opacity = filter::clear_highlight(&graph, config.opacity);
        let relationship_codes = graph.relationship_codes();
        let context_menu_enabled = portal.has_context_menu();

        Self {
            graph,
            config,
            sim,
            radii,
            relationship_codes,
            transform: ViewTransform::IDENTITY,
            reset_anim: None,
            search: String::new(),
            search_deadline: None,
            relationship_filter: String::new(),
            opacity,
            hovered: None,
            dragged: None,
            context_node: None,
            detail: None,
            portal,
            context_menu_enabled,
            screen_positions: Vec::new(),
            screen_radii: Vec::new(),
        }
    }

    pub(super) fn show(&mut self, ctx: &Context, reload_requested: &mut bool, is_reloading: bool) {
        self.evaluate_pending_search(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Relationship network");
                ui.separator();
                ui.label(format!("{} people", self.graph.node_count()));
                ui.label(format!("{} relationships", self.graph.link_count()));
                ui.separator();

                self.draw_controls(ui);

                ui.separator();
                let reload = ui.add_enabled(!is_reloading, egui::Button::new("Reload"));
                if reload.clicked() {
                    *reload_requested = true;
                }
                if is_reloading {
                    ui.spinner();
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.graph.nodes.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("No people to display");
                    ui.label("Add people and relationships, then reload.");
                });
            } else {
                self.draw_graph(ui);
            }
        });

        self.show_detail_window(ctx);
    }
}
