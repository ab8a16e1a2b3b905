// SPDX-License-Identifier: GPL-3.0-only

//! Settings drawer view

use crate::app::state::{AppModel, ContextPage, Message};
use crate::constants::app_info;
use crate::fl;
use cosmic::Element;
use cosmic::app::context_drawer;
use cosmic::widget;

impl AppModel {
    /// Create the settings view for the context drawer
    pub fn settings_view(&self) -> context_drawer::ContextDrawer<'_, Message> {
        let spacing = cosmic::theme::spacing();

        let theme_dropdown = widget::dropdown(
            &self.theme_options,
            Some(self.config.app_theme.index()),
            Message::SetAppTheme,
        );

        let appearance = widget::settings::section()
            .title(fl!("appearance"))
            .add(widget::settings::item::builder(fl!("theme")).control(theme_dropdown));

        let gallery_dir = crate::storage::gallery_directory(self.config.gallery_folder());
        let clear_toggle = widget::toggler(self.config.clear_after_failed_save)
            .on_toggle(Message::SetClearAfterFailedSave);

        let gallery = widget::settings::section()
            .title(fl!("gallery"))
            .add(
                widget::settings::item::builder(fl!("gallery-folder"))
                    .description(gallery_dir.display().to_string())
                    .control(
                        widget::button::standard(fl!("open-gallery-folder"))
                            .on_press(Message::OpenGalleryFolder),
                    ),
            )
            .add(widget::settings::item::builder(fl!("clear-after-failed-save")).control(clear_toggle));

        let version_info = if app_info::is_flatpak() {
            format!("{} (Flatpak)", fl!("version", version = app_info::version()))
        } else {
            fl!("version", version = app_info::version())
        };

        let settings_column: Element<'_, Message> = widget::column()
            .push(appearance)
            .push(gallery)
            .push(widget::divider::horizontal::default())
            .push(
                widget::text(version_info)
                    .size(12)
                    .class(cosmic::theme::Text::Accent),
            )
            .spacing(spacing.space_m)
            .into();

        context_drawer::context_drawer(
            settings_column,
            Message::ToggleContextPage(ContextPage::Settings),
        )
        .title(fl!("settings"))
    }
}
