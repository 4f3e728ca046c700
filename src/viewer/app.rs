use super::ViewerState;
use crate::RecordStore;
use eframe::egui;
use tracing::{error, info};

pub fn run(store: RecordStore, options: eframe::NativeOptions) -> Result<(), eframe::Error> {
    eframe::run_native(
        "FAQ Viewer",
        options,
        Box::new(move |_cc| Ok(Box::new(FaqViewer::load(&store)))),
    )
}

pub struct FaqViewer {
    source: String,
    state: ViewerState,
    filter: String,
}

impl FaqViewer {
    pub fn load(store: &RecordStore) -> Self {
        let mut state = ViewerState::Loading;
        state.finish(store.read_all());

        match &state {
            ViewerState::Failed(msg) => error!("Cannot show FAQs: {}", msg),
            _ => info!(
                "Loaded {} FAQs from {}",
                state.sections().len(),
                store.path().display()
            ),
        }

        FaqViewer {
            source: store.path().display().to_string(),
            state,
            filter: String::new(),
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    pub fn ui(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Frequently asked questions");
            ui.label(egui::RichText::new(&self.source).weak());
            ui.separator();

            if let ViewerState::Failed(msg) = &self.state {
                let color = ui.visuals().error_fg_color;
                ui.colored_label(color, format!("Could not load FAQs: {}", msg));
            } else {
                self.sections_ui(ui);
            }
        });
    }

    fn sections_ui(&mut self, ui: &mut egui::Ui) {
        let visible = self.state.matching(&self.filter);

        ui.horizontal(|ui| {
            ui.add(egui::TextEdit::singleline(&mut self.filter).hint_text("Search"));
            if ui.button("Expand all").clicked() {
                self.state.set_all_expanded(true);
            }
            if ui.button("Collapse all").clicked() {
                self.state.set_all_expanded(false);
            }
            ui.label(format!("{} / {}", visible.len(), self.state.sections().len()));
        });
        ui.separator();

        if self.state.sections().is_empty() {
            ui.label("No FAQs in this file.");
            return;
        }

        let mut clicked = vec![];
        egui::ScrollArea::vertical().show(ui, |ui| {
            for &idx in &visible {
                let section = &self.state.sections()[idx];
                let response = egui::CollapsingHeader::new(section.record.question.as_str())
                    .id_salt(idx)
                    .open(Some(section.expanded))
                    .show(ui, |ui| {
                        if section.record.answer.is_empty() {
                            ui.weak("(no answer)");
                        } else {
                            ui.label(section.record.answer.as_str());
                        }
                    });
                if response.header_response.clicked() {
                    clicked.push(idx);
                }
            }
        });

        for idx in clicked {
            self.state.toggle(idx);
        }
    }
}

impl eframe::App for FaqViewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui(ctx);
    }
}
