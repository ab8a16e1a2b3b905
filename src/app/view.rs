// SPDX-License-Identifier: GPL-3.0-only

//! Main application view
//!
//! Widgets are built from the [`View`](crate::app::render::View) model; this
//! module never inspects the screen state directly.

use crate::app::render::{Surface, render};
use crate::app::state::{AppModel, Message};
use crate::constants::ui;
use crate::fl;
use crate::locator::Locator;
use cosmic::Element;
use cosmic::iced::{Alignment, Background, Color, Length};
use cosmic::widget;

impl AppModel {
    /// Build the main application view
    pub fn view(&self) -> Element<'_, Message> {
        let surface = render(&self.screen).surface;
        let image_actions = surface.shows_image_actions();
        match surface {
            Surface::RequestingPermission => {
                self.status_view(widget::text::body(fl!("requesting-permissions")).into())
            }
            Surface::CameraPermissionDenied => self.status_view(
                widget::column()
                    .push(widget::text::body(fl!("camera-permission-denied")))
                    .push(
                        widget::button::suggested(fl!("request-permission"))
                            .on_press(Message::RetryCameraPermission),
                    )
                    .spacing(cosmic::theme::spacing().space_s)
                    .align_x(Alignment::Center)
                    .into(),
            ),
            Surface::Camera { capturing, .. } => self.camera_view(capturing),
            Surface::Home {
                preview,
                picking,
                saving,
            } => self.home_view(preview, image_actions, picking, saving),
        }
    }

    /// Modal dialog for the prompt at the front of the queue
    pub fn prompt_dialog(&self) -> Option<Element<'_, Message>> {
        let prompt = render(&self.screen).prompt?;
        Some(
            widget::dialog()
                .title(prompt.title)
                .body(prompt.body)
                .icon(widget::icon::from_name(prompt.icon_name()).size(64))
                .primary_action(
                    widget::button::suggested(fl!("prompt-ok")).on_press(Message::DismissPrompt),
                )
                .into(),
        )
    }

    fn status_view<'a>(&self, content: Element<'a, Message>) -> Element<'a, Message> {
        widget::container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn home_view(
        &self,
        preview: Option<Locator>,
        image_actions: bool,
        picking: bool,
        saving: bool,
    ) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let mut column = widget::column()
            .push(widget::text::title3(fl!("screen-title")))
            .push(
                widget::button::suggested(fl!("open-camera"))
                    .on_press(Message::OpenCamera)
                    .width(Length::Fixed(ui::BUTTON_WIDTH)),
            )
            .push(
                widget::button::standard(fl!("open-gallery"))
                    .on_press_maybe((!picking).then_some(Message::PickImage))
                    .width(Length::Fixed(ui::BUTTON_WIDTH)),
            )
            .spacing(spacing.space_m)
            .align_x(Alignment::Center);

        // Non-file locators have nothing to draw but can still be saved
        if let Some(path) = preview.as_ref().and_then(Locator::to_path) {
            let image = widget::container(
                widget::image::Image::new(widget::image::Handle::from_path(path))
                    .content_fit(cosmic::iced::ContentFit::Cover)
                    .width(Length::Fixed(ui::PREVIEW_SIZE))
                    .height(Length::Fixed(ui::PREVIEW_SIZE)),
            )
            .style(|_theme| widget::container::Style {
                border: cosmic::iced::Border {
                    radius: ui::PREVIEW_RADIUS.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .clip(true);

            column = column.push(image);
        }

        if image_actions {
            column = column
                .push(
                    widget::button::destructive(fl!("clear-image"))
                        .on_press_maybe((!saving).then_some(Message::ClearImage))
                        .width(Length::Fixed(ui::BUTTON_WIDTH)),
                )
                .push(
                    widget::button::suggested(fl!("save-image"))
                        .on_press_maybe((!saving).then_some(Message::SaveImage))
                        .width(Length::Fixed(ui::BUTTON_WIDTH)),
                );
        }

        widget::scrollable(
            widget::container(column)
                .width(Length::Fill)
                .center_x(Length::Fill)
                .padding(spacing.space_l),
        )
        .into()
    }

    fn camera_view(&self, capturing: bool) -> Element<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let preview: Element<'_, Message> = match &self.preview {
            Some(handle) => widget::image::Image::new(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(cosmic::iced::ContentFit::Cover)
                .into(),
            None => widget::container(widget::text::body(fl!("starting-camera")))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .into(),
        };

        let can_capture = self.session.is_some() && !capturing;
        let controls = widget::row()
            .push(
                widget::button::text(fl!("flip-camera"))
                    .on_press_maybe((!capturing).then_some(Message::ToggleFacing)),
            )
            .push(widget::horizontal_space())
            .push(self.capture_button(can_capture, capturing))
            .push(widget::horizontal_space())
            .push(widget::button::text(fl!("close-camera")).on_press(Message::CloseCamera))
            .align_y(Alignment::Center)
            .padding(spacing.space_s)
            .width(Length::Fill);

        let controls = widget::container(controls).style(|_theme| widget::container::Style {
            background: Some(Background::Color(Color::from_rgba(
                0.0,
                0.0,
                0.0,
                ui::CONTROLS_BACKGROUND_ALPHA,
            ))),
            ..Default::default()
        });

        widget::container(widget::column().push(preview).push(controls))
            .width(Length::Fill)
            .height(Length::Fill)
            .style(|_theme| widget::container::Style {
                background: Some(Background::Color(Color::BLACK)),
                ..Default::default()
            })
            .into()
    }

    /// White circle, gray while a capture runs
    fn capture_button(&self, enabled: bool, capturing: bool) -> Element<'_, Message> {
        let color = if !enabled && !capturing {
            Color::from_rgba(0.5, 0.5, 0.5, 0.3)
        } else if capturing {
            Color::from_rgb(0.7, 0.7, 0.7)
        } else {
            Color::WHITE
        };

        let inner = widget::container(widget::Space::new(
            Length::Fixed(ui::CAPTURE_BUTTON_INNER),
            Length::Fixed(ui::CAPTURE_BUTTON_INNER),
        ))
        .style(move |_theme| widget::container::Style {
            background: Some(Background::Color(color)),
            border: cosmic::iced::Border {
                radius: (ui::CAPTURE_BUTTON_INNER / 2.0).into(),
                ..Default::default()
            },
            ..Default::default()
        });

        widget::button::custom(inner)
            .on_press_maybe(enabled.then_some(Message::Capture))
            .padding(0)
            .width(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .height(Length::Fixed(ui::CAPTURE_BUTTON_OUTER))
            .into()
    }
}
