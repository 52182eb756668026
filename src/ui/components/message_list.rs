use eframe::egui;

use crate::common::Message;

const ROYAL_BLUE: egui::Color32 = egui::Color32::from_rgb(0x41, 0x69, 0xE1);
const ORANGE: egui::Color32 = egui::Color32::from_rgb(0xFF, 0xA5, 0x00);

const AVATAR_SIZE: f32 = 50.0;
const BUBBLE_MAX_WIDTH: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BubbleStyle {
    pub fill: egui::Color32,
    pub text: egui::Color32,
}

pub const OWN_BUBBLE: BubbleStyle = BubbleStyle {
    fill: ROYAL_BLUE,
    text: egui::Color32::WHITE,
};

pub const OTHER_BUBBLE: BubbleStyle = BubbleStyle {
    fill: ORANGE,
    text: egui::Color32::BLACK,
};

/// How one message is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleRow<'a> {
    pub message: &'a Message,
    pub side: Side,
    pub style: BubbleStyle,
    /// Only messages from other people carry an avatar.
    pub avatar: Option<String>,
}

/// First two characters of the author's name, upper-cased.
pub fn avatar_initials(name: &str) -> String {
    name.chars().take(2).collect::<String>().to_uppercase()
}

/// Lay out the feed for `current_user`. Nothing until the first push.
pub fn layout<'a>(messages: Option<&'a [Message]>, current_user: &str) -> Vec<BubbleRow<'a>> {
    let Some(messages) = messages else {
        return Vec::new();
    };

    messages
        .iter()
        .map(|message| {
            if message.user == current_user {
                BubbleRow {
                    message,
                    side: Side::Right,
                    style: OWN_BUBBLE,
                    avatar: None,
                }
            } else {
                BubbleRow {
                    message,
                    side: Side::Left,
                    style: OTHER_BUBBLE,
                    avatar: Some(avatar_initials(&message.user)),
                }
            }
        })
        .collect()
}

pub fn render(ui: &mut egui::Ui, messages: Option<&[Message]>, current_user: &str) {
    let full_width = ui.available_width();

    for row in layout(messages, current_user) {
        ui.push_id(row.message.id.as_str(), |ui| {
            let direction = match row.side {
                Side::Left => egui::Layout::left_to_right(egui::Align::TOP),
                Side::Right => egui::Layout::right_to_left(egui::Align::TOP),
            };

            ui.with_layout(direction, |ui| {
                if let Some(initials) = &row.avatar {
                    avatar(ui, initials);
                }
                bubble(ui, &row, full_width * BUBBLE_MAX_WIDTH);
            });
        });
        ui.add_space(16.0);
    }
}

fn avatar(ui: &mut egui::Ui, initials: &str) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(AVATAR_SIZE, AVATAR_SIZE),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.circle_stroke(
        rect.center(),
        AVATAR_SIZE / 2.0 - 1.0,
        egui::Stroke::new(2.0, ORANGE),
    );
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        initials,
        egui::FontId::proportional(22.0),
        ui.visuals().text_color(),
    );
    ui.add_space(8.0);
}

fn bubble(ui: &mut egui::Ui, row: &BubbleRow<'_>, max_width: f32) {
    egui::Frame::new()
        .fill(row.style.fill)
        .corner_radius(16.0)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_max_width(max_width);
            ui.add(
                egui::Label::new(
                    egui::RichText::new(&row.message.content).color(row.style.text),
                )
                .wrap(),
            );
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::ID;

    fn message(id: &str, user: &str, content: &str) -> Message {
        Message {
            id: ID::from(id),
            user: user.into(),
            content: content.into(),
        }
    }

    #[test]
    fn nothing_before_first_push() {
        assert!(layout(None, "Ryan").is_empty());
    }

    #[test]
    fn empty_push_renders_empty_list() {
        assert!(layout(Some(Vec::new().as_slice()), "Ryan").is_empty());
    }

    #[test]
    fn rows_follow_pushed_order() {
        let messages = vec![
            message("1", "Ana", "first"),
            message("2", "Ryan", "second"),
            message("3", "Ana", "third"),
        ];
        let contents: Vec<_> = layout(Some(messages.as_slice()), "Ryan")
            .iter()
            .map(|row| row.message.content.as_str())
            .collect();
        assert_eq!(contents, ["first", "second", "third"]);
    }

    #[test]
    fn own_messages_sit_right_without_avatar() {
        let messages = vec![message("1", "Ryan", "mine")];
        let rows = layout(Some(messages.as_slice()), "Ryan");
        assert_eq!(rows[0].side, Side::Right);
        assert_eq!(rows[0].style, OWN_BUBBLE);
        assert_eq!(rows[0].style.text, egui::Color32::WHITE);
        assert_eq!(rows[0].avatar, None);
    }

    #[test]
    fn other_messages_sit_left_with_initials() {
        let messages = vec![message("1", "anastasia", "theirs")];
        let rows = layout(Some(messages.as_slice()), "Ryan");
        assert_eq!(rows[0].side, Side::Left);
        assert_eq!(rows[0].style, OTHER_BUBBLE);
        assert_eq!(rows[0].avatar.as_deref(), Some("AN"));
    }

    #[test]
    fn author_match_is_exact() {
        let messages = vec![message("1", "ryan", "lowercase")];
        let rows = layout(Some(messages.as_slice()), "Ryan");
        assert_eq!(rows[0].side, Side::Left);
    }

    #[test]
    fn initials_handle_short_and_unicode_names() {
        assert_eq!(avatar_initials("R"), "R");
        assert_eq!(avatar_initials(""), "");
        assert_eq!(avatar_initials("élodie"), "ÉL");
    }

    #[test]
    fn renders_headless() {
        let ctx = egui::Context::default();
        let messages = vec![message("1", "Ryan", "mine"), message("2", "Ana", "theirs")];
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                render(ui, Some(messages.as_slice()), "Ryan");
            });
        });
    }
}
