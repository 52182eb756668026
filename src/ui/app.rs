use std::time::Duration;

use eframe::egui;
use tokio::sync::mpsc;

use crate::common::{ClientCommand, ClientEvent, PostMessage};

use super::components::{input_bar, message_list};
use super::state::AppState;

pub struct ChatApp {
    state: AppState,
    command_sender: mpsc::Sender<ClientCommand>,
    event_receiver: mpsc::Receiver<ClientEvent>,
}

impl ChatApp {
    pub fn new(
        default_user: String,
        command_sender: mpsc::Sender<ClientCommand>,
        event_receiver: mpsc::Receiver<ClientEvent>,
    ) -> Self {
        Self {
            state: AppState::new(default_user),
            command_sender,
            event_receiver,
        }
    }

    fn handle_network_events(&mut self) {
        while let Ok(event) = self.event_receiver.try_recv() {
            match event {
                ClientEvent::MessagesUpdated(messages) => self.state.replace_messages(messages),
                ClientEvent::FeedClosed => self.state.feed_closed = true,
            }
        }
    }

    fn send_command(&mut self, post: PostMessage) {
        if let Err(err) = self
            .command_sender
            .try_send(ClientCommand::PostMessage(post))
        {
            log::warn!("Failed to send command to network: {err}");
        }
    }

    fn show(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("compose").show(ctx, |ui| {
            ui.add_space(8.0);
            if let Some(post) = input_bar::render(ui, &mut self.state.draft) {
                self.send_command(post);
            }
            ui.add_space(8.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .stick_to_bottom(true)
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    message_list::render(
                        ui,
                        self.state.messages.as_deref(),
                        &self.state.draft.user,
                    );
                });
        });
    }
}

impl eframe::App for ChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_network_events();
        self.show(ctx);

        if !self.state.feed_closed {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
