use iced::{
    Alignment, Background, Color, Element, Length, Padding, Size, keyboard,
    widget::{button, column, container, horizontal_space, image, row, text, text_input},
    window,
};
use std::path::PathBuf;

use crate::{
    form::{FormController, FormHandler, Outcome},
    icon, logs,
};

pub fn run_form(controller: FormController) -> Result<(), Box<dyn std::error::Error>> {
    iced::application("Create Desktop Entry", update, view)
        .subscription(subscription)
        .window(window::Settings {
            size: Size::new(600.0, 260.0),
            position: window::Position::Centered,
            resizable: false,
            icon: None,
            exit_on_close_request: true,
            ..Default::default()
        })
        .run_with(move || (FormState::new(controller), iced::Task::none()))?;

    Ok(())
}

#[derive(Debug, Clone)]
pub enum Message {
    NameChanged(String),
    ExecChanged(String),
    IconPathChanged(String),
    ChooseIcon,
    Create,
    Cancel,
    DismissNotice,
    KeyPressed(keyboard::Key),
}

struct FormState {
    controller: FormController,
    preview: image::Handle,
}

impl FormState {
    fn new(controller: FormController) -> Self {
        let mut state = Self {
            controller,
            preview: image::Handle::from_bytes(Vec::new()),
        };
        state.refresh_preview();
        state
    }

    fn refresh_preview(&mut self) {
        let bytes = match self.controller.preview() {
            Some(preview) => preview.png.clone(),
            None => icon::placeholder_icon(&self.controller.spec().name),
        };
        self.preview = image::Handle::from_bytes(bytes);
    }

    fn finish(&mut self, outcome: Outcome) -> iced::Task<Message> {
        match outcome {
            Outcome::Stay => iced::Task::none(),
            Outcome::Created(path) => {
                logs::log_info(&format!("Created launcher {}", path.display()));
                println!("{}", path.display());
                iced::exit()
            }
            Outcome::Cancelled => iced::exit(),
        }
    }
}

fn update(state: &mut FormState, message: Message) -> iced::Task<Message> {
    match message {
        Message::NameChanged(value) => {
            state.controller.on_name_changed(value);
            if state.controller.preview().is_none() {
                state.refresh_preview();
            }
            iced::Task::none()
        }
        Message::ExecChanged(value) => {
            state.controller.on_exec_changed(value);
            iced::Task::none()
        }
        Message::IconPathChanged(value) => {
            state.controller.on_icon_path_changed(value);
            state.refresh_preview();
            iced::Task::none()
        }
        Message::ChooseIcon => {
            let path = PathBuf::from(state.controller.icon_input().trim());
            let outcome = state.controller.on_icon_chosen(path);
            state.refresh_preview();
            state.finish(outcome)
        }
        Message::Create => {
            let outcome = state.controller.on_confirm();
            state.finish(outcome)
        }
        Message::Cancel => {
            let outcome = state.controller.on_cancel();
            state.finish(outcome)
        }
        Message::DismissNotice => {
            state.controller.dismiss_notice();
            iced::Task::none()
        }
        Message::KeyPressed(key) => {
            let notice_open = state.controller.notice().is_some();
            match key {
                keyboard::Key::Named(keyboard::key::Named::Escape | keyboard::key::Named::Enter)
                    if notice_open =>
                {
                    update(state, Message::DismissNotice)
                }
                keyboard::Key::Named(keyboard::key::Named::Escape) => update(state, Message::Cancel),
                keyboard::Key::Named(keyboard::key::Named::Enter) => update(state, Message::Create),
                _ => iced::Task::none(),
            }
        }
    }
}

fn subscription(_state: &FormState) -> iced::Subscription<Message> {
    iced::keyboard::on_key_press(|key, _modifiers| Some(Message::KeyPressed(key)))
}

fn view(state: &FormState) -> Element<'_, Message> {
    if let Some(notice) = state.controller.notice() {
        return notice_view(&notice.title, &notice.message);
    }

    let spec = state.controller.spec();

    let name = text_input("Name", &spec.name)
        .on_input(Message::NameChanged)
        .padding(Padding::from(8))
        .width(Length::Fill);

    let exec = text_input("Command line", &spec.exec)
        .on_input(Message::ExecChanged)
        .on_submit(Message::Create)
        .padding(Padding::from(8))
        .width(Length::Fill);

    let icon_path = text_input("Icon file (PNG or JPEG)", state.controller.icon_input())
        .on_input(Message::IconPathChanged)
        .on_submit(Message::ChooseIcon)
        .padding(Padding::from(8))
        .width(Length::Fill);

    let choose = button(text("Choose Icon")).on_press(Message::ChooseIcon);

    let fields = column![
        name,
        exec,
        row![icon_path, choose].spacing(8).align_y(Alignment::Center),
    ]
    .spacing(8);

    let preview = image(state.preview.clone())
        .width(icon::PREVIEW_SIZE as u16)
        .height(icon::PREVIEW_SIZE as u16);

    let buttons = row![
        horizontal_space(),
        button(text("Cancel")).on_press(Message::Cancel),
        button(text("Create")).on_press(Message::Create),
    ]
    .spacing(8);

    let content = column![
        row![preview, fields].spacing(16).align_y(Alignment::Center),
        buttons,
    ]
    .spacing(16);

    container(content)
        .padding(Padding::from(16))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn notice_view<'a>(title: &'a str, message: &'a str) -> Element<'a, Message> {
    let content = column![
        text(title).size(18),
        text(message).size(14),
        row![
            horizontal_space(),
            button(text("OK")).on_press(Message::DismissNotice)
        ],
    ]
    .spacing(12);

    container(
        container(content)
            .padding(Padding::from(16))
            .width(Length::Fill)
            .style(|_| container::Style {
                background: Some(Background::Color(Color::from_rgb(0.2, 0.2, 0.2))),
                border: iced::Border {
                    color: Color::from_rgb(0.8, 0.3, 0.3),
                    width: 2.0,
                    radius: 6.0.into(),
                },
                shadow: iced::Shadow::default(),
                text_color: Some(Color::from_rgb(0.96, 0.96, 0.96)),
            }),
    )
    .padding(Padding::from(16))
    .width(Length::Fill)
    .height(Length::Fill)
    .center_y(Length::Fill)
    .into()
}
