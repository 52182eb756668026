use eframe::egui;

use crate::common::PostMessage;
use crate::ui::state::Draft;

pub const CONTENT_INPUT_ID: &str = "content_input";
pub const SEND_LABEL: &str = "Send";

/// Button click and Enter in the content field both end up in `Draft::take_send`.
pub fn render(ui: &mut egui::Ui, draft: &mut Draft) -> Option<PostMessage> {
    let mut send = false;
    ui.horizontal(|ui| {
        ui.label("User");
        ui.add(egui::TextEdit::singleline(&mut draft.user).desired_width(100.0));

        ui.label("Content");
        let response = ui.add(
            egui::TextEdit::singleline(&mut draft.content)
                .id(egui::Id::new(CONTENT_INPUT_ID))
                .desired_width((ui.available_width() - 80.0).max(100.0)),
        );

        if ui.button(SEND_LABEL).clicked() {
            send = true;
        }

        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            send = true;
            response.request_focus();
        }
    });

    if !send {
        return None;
    }
    draft.take_send()
}
