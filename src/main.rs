use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use eframe::egui;
use egui::{Align, Layout, RichText, ScrollArea, Ui, ViewportBuilder};
use tracing::{debug, info, warn};

use hn_search::cli::Cli;
use hn_search::config::{Config, LAST_SEARCH_STORAGE_KEY};
use hn_search::hn_client::HackerNewsClient;
use hn_search::loader::Loader;
use hn_search::logging::init_logging;
use hn_search::models::HackerNewsItem;
use hn_search::session::{FetchRequest, SearchSession};
use hn_search::sort::{SortMode, SortState};

// How often to poll the fetch worker while a request is outstanding
const LOADING_REPAINT_INTERVAL: Duration = Duration::from_millis(100);

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_config());

    let config = cli.config();
    let client = HackerNewsClient::new(&config)?;
    info!(base_url = %config.base_url, hits_per_page = config.hits_per_page, "starting");

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("HN Search"),
        ..Default::default()
    };

    let explicit_query = cli.query.clone();
    eframe::run_native(
        "HN Search",
        options,
        Box::new(move |cc| {
            // Fall back to the last submitted search from a previous run
            let persisted = cc
                .storage
                .and_then(|storage| storage.get_string(LAST_SEARCH_STORAGE_KEY));
            let initial = config.initial_query(explicit_query.as_deref(), persisted.as_deref());

            Ok(Box::new(HnSearchApp::new(&config, Arc::new(client), initial)))
        }),
    )
    .map_err(|e| anyhow!("Failed to run window: {}", e))
}

struct HnSearchApp {
    session: SearchSession,
    loader: Loader,
    sort_state: SortState,
    // Focus the search box on the first frame
    focus_search: bool,
}

impl HnSearchApp {
    fn new(config: &Config, client: Arc<HackerNewsClient>, initial_query: String) -> Self {
        debug!(default_query = %config.default_query, %initial_query, "initial search");
        let mut app = Self {
            session: SearchSession::new(initial_query),
            loader: Loader::new(client),
            sort_state: SortState::default(),
            focus_search: true,
        };

        let request = app.session.submit();
        app.start_fetch(request);
        app
    }

    fn start_fetch(&mut self, request: Option<FetchRequest>) {
        if let Some(request) = request {
            self.loader.spawn(request);
        }
    }

    fn check_loading_thread(&mut self) {
        if let Some(outcome) = self.loader.poll() {
            self.session.complete(&outcome.request, outcome.result);
        }
    }

    fn submit_search(&mut self) {
        let request = self.session.submit();
        self.start_fetch(request);
    }

    fn load_more(&mut self) {
        let request = self.session.request_more();
        self.start_fetch(request);
    }

    fn open_link(&self, url: &str) {
        if let Err(e) = open::that(url) {
            warn!(%url, error = %e, "failed to open link");
        }
    }

    fn render_search_form(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            let input = ui.add_sized(
                [ui.available_width() - 90.0, 28.0],
                egui::TextEdit::singleline(&mut self.session.search_term)
                    .hint_text("Search stories...")
                    .id(egui::Id::new("search_input")),
            );

            if self.focus_search {
                input.request_focus();
                self.focus_search = false;
            }

            let entered = input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            let clicked = ui.add_sized([80.0, 28.0], egui::Button::new("Search")).clicked();

            if entered || clicked {
                self.submit_search();
            }
        });
    }

    fn render_results_table(&mut self, ui: &mut Ui) {
        let items = self.session.visible_items(self.sort_state);
        let mut clicked_sort = None;
        let mut dismissed = None;
        let mut link_to_open = None;

        egui::Grid::new("results_table")
            .num_columns(5)
            .striped(true)
            .spacing([16.0, 6.0])
            .min_col_width(60.0)
            .show(ui, |ui| {
                for mode in SortMode::COLUMNS {
                    let active = self.sort_state.mode == mode;
                    let label = sort_header_label(mode, self.sort_state);
                    if ui.selectable_label(active, RichText::new(label).strong()).clicked() {
                        clicked_sort = Some(mode);
                    }
                }
                ui.label(RichText::new("Archive").strong());
                ui.end_row();

                for item in &items {
                    render_row(ui, item, &mut dismissed, &mut link_to_open);
                    ui.end_row();
                }
            });

        if items.is_empty() && !self.session.is_loading() {
            ui.add_space(12.0);
            ui.label(RichText::new("No results.").italics());
        }

        if let Some(mode) = clicked_sort {
            self.sort_state = self.sort_state.toggle(mode);
            debug!(sort = ?self.sort_state, "sort changed");
        }
        if let Some(id) = dismissed {
            debug!(%id, key = self.session.search_key(), "dismissing result");
            self.session.dismiss(&id);
        }
        if let Some(url) = link_to_open {
            self.open_link(&url);
        }
    }

    fn render_more_button(&mut self, ui: &mut Ui) {
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            if self.session.is_loading() {
                ui.spinner();
            } else if ui.button("More").clicked() {
                self.load_more();
            }
        });
    }
}

fn sort_header_label(mode: SortMode, state: SortState) -> String {
    if state.mode != mode {
        return mode.label().to_string();
    }
    let arrow = if state.reversed { "▲" } else { "▼" };
    format!("{} {}", mode.label(), arrow)
}

fn render_row(
    ui: &mut Ui,
    item: &HackerNewsItem,
    dismissed: &mut Option<String>,
    link_to_open: &mut Option<String>,
) {
    let title = ui.add(
        egui::Label::new(RichText::new(item.display_title()).strong()).sense(egui::Sense::click()),
    );
    if let Some(url) = item.url.as_deref().filter(|url| !url.is_empty()) {
        if title.hovered() {
            ui.output_mut(|o| o.cursor_icon = egui::CursorIcon::PointingHand);
        }
        if title.on_hover_text(url).clicked() {
            *link_to_open = Some(url.to_string());
        }
    }

    ui.label(item.display_author());
    ui.label(count_text(item.comments_count));
    ui.label(count_text(item.points));

    if ui.small_button("Dismiss").clicked() {
        *dismissed = Some(item.id.clone());
    }
}

fn count_text(count: Option<u32>) -> String {
    count.map(|n| n.to_string()).unwrap_or_default()
}

impl eframe::App for HnSearchApp {
    // Remember the active search for the next launch
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        if !self.session.search_key().is_empty() {
            storage.set_string(LAST_SEARCH_STORAGE_KEY, self.session.search_key().to_string());
        }
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_loading_thread();

        if self.loader.is_busy() {
            ctx.request_repaint_after(LOADING_REPAINT_INTERVAL);
        }

        egui::TopBottomPanel::top("search_panel").show(ctx, |ui| {
            ui.add_space(8.0);
            self.render_search_form(ui);
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("more_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            self.render_more_button(ui);
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.session.error().is_some() {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(RichText::new("Something went wrong.").size(16.0));
                });
                return;
            }

            ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.render_results_table(ui));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_marks_active_column_and_direction() {
        let state = SortState::default().toggle(SortMode::Title);
        assert_eq!(sort_header_label(SortMode::Title, state), "Title ▼");
        assert_eq!(sort_header_label(SortMode::Title, state.toggle(SortMode::Title)), "Title ▲");
        assert_eq!(sort_header_label(SortMode::Points, state), "Points");
    }

    #[test]
    fn missing_counts_render_blank() {
        assert_eq!(count_text(Some(12)), "12");
        assert_eq!(count_text(None), "");
    }
}
