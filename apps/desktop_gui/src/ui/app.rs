use std::time::Duration;

use client_core::{
    render_company_groups, render_job_cards, summarize, CompanyGroup, JobCard, SearchController,
    SearchError, SearchStatus,
};
use crossbeam_channel::{Receiver, Sender, TryRecvError};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{
    events::{UiError, UiErrorContext, UiEvent},
    orchestration::dispatch_backend_command,
};

const CARD_COLUMNS: usize = 3;
const CARD_WIDTH: f32 = 280.0;

pub struct JobSearchApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: SearchController,
    backend_status: String,
    notice: Option<String>,
}

impl JobSearchApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            controller: SearchController::new(),
            backend_status: "Backend worker starting...".to_string(),
            notice: None,
        }
    }

    fn start_search(&mut self) {
        let Some(pending) = self.controller.begin_search() else {
            return;
        };
        let generation = pending.generation;

        if let Err(reason) = dispatch_backend_command(&self.cmd_tx, BackendCommand::Search(pending))
        {
            self.controller
                .complete_search(generation, Err(SearchError::Transport(reason)));
            self.raise_search_notice();
        }
    }

    fn process_ui_events(&mut self) {
        loop {
            match self.ui_rx.try_recv() {
                Ok(UiEvent::Info(message)) => self.backend_status = message,
                Ok(UiEvent::Error(err)) => self.show_error(err),
                Ok(UiEvent::SearchFinished { generation, result }) => {
                    if self.controller.complete_search(generation, result) {
                        self.raise_search_notice();
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // The worker is gone; a search waiting on it would never resolve.
                    if let Some(generation) = self.controller.in_flight_generation() {
                        self.controller.complete_search(
                            generation,
                            Err(SearchError::Transport("backend worker stopped".into())),
                        );
                        self.raise_search_notice();
                    }
                    break;
                }
            }
        }
    }

    fn raise_search_notice(&mut self) {
        if self.controller.state().status() == SearchStatus::Error {
            self.notice = self.controller.state().last_error_message();
        }
    }

    fn show_error(&mut self, err: UiError) {
        tracing::error!(context = ?err.context(), "{}", err.message());
        if err.context() == UiErrorContext::BackendStartup {
            self.backend_status = "Backend unavailable".to_string();
        }
        self.notice = Some(err.notice());
    }

    fn show_search_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let mut input = self.controller.state().raw_keyword_input().to_owned();
            let searching = self.controller.state().is_searching();

            let response = ui.add(
                egui::TextEdit::singleline(&mut input)
                    .hint_text("e.g., python developer, react developer")
                    .desired_width(ui.available_width() - 140.0),
            );
            if response.changed() {
                self.controller.update_keyword_input(input);
            }
            let enter_pressed =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            let can_submit = self.controller.state().can_submit();
            let label = if searching { "Searching..." } else { "Search" };
            let clicked = ui
                .add_enabled(
                    can_submit,
                    egui::Button::new(label).min_size(egui::vec2(120.0, 0.0)),
                )
                .clicked();
            if searching {
                ui.spinner();
            }

            if clicked || (enter_pressed && can_submit) {
                self.start_search();
            }
        });
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        let state = self.controller.state();

        let groups = render_company_groups(state);
        if !groups.is_empty() {
            show_company_groups(ui, &groups);
            ui.add_space(8.0);
        }

        if state.status() == SearchStatus::Success {
            show_job_cards(ui, &render_job_cards(state));
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = self.notice.clone() else {
            return;
        };

        let mut dismissed = false;
        egui::Window::new("Search")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    dismissed = true;
                }
            });

        if dismissed {
            self.notice = None;
        }
    }
}

fn show_company_groups(ui: &mut egui::Ui, groups: &[CompanyGroup]) {
    egui::CollapsingHeader::new(egui::RichText::new("Companies Hiring by Keyword").heading())
        .id_salt("company_groups")
        .show(ui, |ui| {
            for group in groups {
                ui.label(egui::RichText::new(format!("{}:", group.keyword)).strong());
                ui.horizontal_wrapped(|ui| {
                    for company in &group.companies {
                        egui::Frame::group(ui.style()).show(ui, |ui| {
                            ui.label(company);
                        });
                    }
                });
                ui.add_space(6.0);
            }
        });
}

fn show_job_cards(ui: &mut egui::Ui, cards: &[JobCard]) {
    egui::Grid::new("job_cards")
        .num_columns(CARD_COLUMNS)
        .spacing([12.0, 12.0])
        .show(ui, |ui| {
            for (index, card) in cards.iter().enumerate() {
                show_job_card(ui, card);
                if (index + 1) % CARD_COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });
}

fn show_job_card(ui: &mut egui::Ui, card: &JobCard) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(CARD_WIDTH);
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(&card.title).size(17.0).strong());
            ui.label(egui::RichText::new(&card.company).weak());
            ui.label(format!("Location: {}", card.location));
            ui.label(format!("Keyword: {}", card.keyword));
            if let Some(salary) = &card.salary {
                ui.label(format!("Salary: {salary}"));
            }
            if let Some(posted) = &card.posted_date {
                ui.label(posted);
            }
            if !card.links.is_empty() {
                ui.horizontal(|ui| {
                    for link in &card.links {
                        ui.hyperlink_to(link.kind.label(), link.url.as_str());
                    }
                });
            }
        });
    });
}

impl eframe::App for JobSearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(summarize(self.controller.state()));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.backend_status).weak());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Job Search");
            });
            ui.add_space(12.0);
            self.show_search_bar(ui);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.show_results(ui);
            });
        });

        self.show_notice(ctx);

        let repaint_after = if self.controller.state().is_searching() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(100)
        };
        ctx.request_repaint_after(repaint_after);
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::protocol::{JobPosting, ScrapeJobsResponse};

    use super::*;

    fn app() -> (JobSearchApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(4);
        let (ui_tx, ui_rx) = bounded(4);
        (JobSearchApp::new(cmd_tx, ui_rx), cmd_rx, ui_tx)
    }

    fn posting() -> JobPosting {
        JobPosting {
            title: "Backend Eng".into(),
            company: "Acme".into(),
            location: "Remote".into(),
            keyword: "python developer".into(),
            job_link: None,
            company_link: None,
            salary: None,
            posted_date: None,
        }
    }

    fn queued_generation(cmd_rx: &Receiver<BackendCommand>) -> u64 {
        match cmd_rx.try_recv().expect("queued command") {
            BackendCommand::Search(pending) => pending.generation,
        }
    }

    #[test]
    fn search_round_trips_through_backend_queue() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.controller.update_keyword_input("python developer");
        app.start_search();
        assert!(app.controller.state().is_searching());

        let generation = queued_generation(&cmd_rx);
        ui_tx
            .send(UiEvent::SearchFinished {
                generation,
                result: Ok(ScrapeJobsResponse {
                    jobs: vec![posting()],
                    companies_by_keyword: Default::default(),
                }),
            })
            .expect("send event");
        app.process_ui_events();

        assert_eq!(app.controller.state().status(), SearchStatus::Success);
        assert_eq!(app.notice, None);
    }

    #[test]
    fn failed_search_raises_notice() {
        let (mut app, cmd_rx, ui_tx) = app();
        app.controller.update_keyword_input("python developer");
        app.start_search();

        let generation = queued_generation(&cmd_rx);
        ui_tx
            .send(UiEvent::SearchFinished {
                generation,
                result: Err(SearchError::Service {
                    status: 500,
                    detail: Some("scrape timeout".into()),
                }),
            })
            .expect("send event");
        app.process_ui_events();

        assert_eq!(app.controller.state().status(), SearchStatus::Error);
        assert_eq!(app.notice.as_deref(), Some("scrape timeout"));
    }

    #[test]
    fn second_submit_while_searching_queues_nothing() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.controller.update_keyword_input("rust");
        app.start_search();
        app.start_search();

        assert_eq!(cmd_rx.len(), 1);
    }

    #[test]
    fn disconnected_backend_does_not_leave_search_pending() {
        let (mut app, cmd_rx, ui_tx) = app();
        drop(cmd_rx);
        drop(ui_tx);

        app.controller.update_keyword_input("rust");
        app.start_search();

        assert_eq!(app.controller.state().status(), SearchStatus::Error);
        assert!(app.notice.is_some());
        app.process_ui_events();
        assert_eq!(app.controller.state().status(), SearchStatus::Error);
    }

    #[test]
    fn startup_failure_is_shown_as_notice() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "service url 'ftp://x' must use http or https",
            )))
            .expect("send event");
        app.process_ui_events();

        let notice = app.notice.expect("notice");
        assert!(notice.contains("must use http or https"));
        assert_eq!(app.backend_status, "Backend unavailable");
    }
}
