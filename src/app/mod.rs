use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2};

use crate::network::{NetworkGraph, load_network_graph};

mod config;
mod encoding;
mod filter;
mod interaction;
mod portal;
mod sim;
mod transform;
mod ui;
mod view;

pub use config::GraphConfig;

use filter::OpacityPartition;
use portal::{NodePortal, PersonDetail};
use sim::Simulation;
use transform::{ResetAnimation, ViewTransform};

pub struct RelationshipGraphApp {
    graph_path: PathBuf,
    state: AppState,
    reload_rx: Option<Receiver<Result<NetworkGraph, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<NetworkGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: NetworkGraph,
    config: GraphConfig,
    sim: Simulation,
    radii: Vec<f32>,
    relationship_codes: Vec<String>,
    transform: ViewTransform,
    reset_anim: Option<ResetAnimation>,
    search: String,
    search_deadline: Option<f64>,
    relationship_filter: String,
    opacity: OpacityPartition,
    hovered: Option<usize>,
    dragged: Option<usize>,
    context_node: Option<usize>,
    detail: Option<PersonDetail>,
    portal: Box<dyn NodePortal>,
    context_menu_enabled: bool,
    screen_positions: Vec<Pos2>,
    screen_radii: Vec<f32>,
}

impl RelationshipGraphApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, graph_path: PathBuf) -> Self {
        let state = Self::start_load(graph_path.clone());
        Self {
            graph_path,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(graph_path: PathBuf) -> Receiver<Result<NetworkGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_network_graph(&graph_path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(graph_path: PathBuf) -> AppState {
        AppState::Loading {
            rx: Self::spawn_load(graph_path),
        }
    }

    fn resolve(graph_path: &Path, result: Result<NetworkGraph, String>) -> AppState {
        match result {
            Ok(graph) => {
                log::info!(
                    "loaded {} people and {} relationships from {}",
                    graph.node_count(),
                    graph.link_count(),
                    graph_path.display()
                );
                AppState::Ready(Box::new(ViewModel::new(graph, GraphConfig::default())))
            }
            Err(error) => {
                log::error!("failed to load relationship graph: {error}");
                AppState::Error(error)
            }
        }
    }
}

impl eframe::App for RelationshipGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                if let Ok(result) = rx.try_recv() {
                    transition = Some(Self::resolve(&self.graph_path, result));
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading relationship network...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load relationship network");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if ui.button("Retry").clicked() {
                        transition = Some(Self::start_load(self.graph_path.clone()));
                    }
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    self.reload_rx = Some(Self::spawn_load(self.graph_path.clone()));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => {
                            model.shutdown();
                            transition = Some(Self::resolve(&self.graph_path, result));
                        }
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                        }
                        Err(TryRecvError::Disconnected) => {
                            model.shutdown();
                            let error = "Background load worker disconnected".to_owned();
                            log::error!("{error}");
                            transition = Some(AppState::Error(error));
                        }
                    }
                }
            }
        }

        if let Some(next_state) = transition {
            self.reload_rx = None;
            self.state = next_state;
        }
    }
}
