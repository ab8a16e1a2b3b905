// SPDX-License-Identifier: GPL-3.0-only

//! Main application module
//!
//! # Architecture
//!
//! - `screen`: View state and its transitions (no host calls)
//! - `render`: Pure mapping from screen state to the view model
//! - `prompt`: Informational prompts shown as modal dialogs
//! - `state`: Application model and messages
//! - `handlers`: Message handlers and the async host calls they start
//! - `update`: Message dispatch
//! - `view`: Widget tree
//! - `settings`: Settings drawer

pub mod handlers;
pub mod prompt;
pub mod render;
pub mod screen;
mod settings;
mod state;
mod update;
mod view;

use crate::backends::Host;
use crate::config::{AppTheme, Config};
use crate::fl;
use cosmic::app::context_drawer;
use cosmic::iced::Subscription;
use cosmic::widget::{self, about::About};
use cosmic::{Element, Task};
use screen::{Screen, UiMode};
pub use state::{AppModel, ContextPage, Message, SessionHandle};
use std::sync::Arc;
use tracing::{error, info};

const REPOSITORY: &str = "https://github.com/snapshot-app/snapshot";

/// Application ID, also the configuration namespace
pub const APP_ID: &str = "io.github.snapshot-app.Snapshot";

impl cosmic::Application for AppModel {
    /// The async executor that will be used to run your application's commands.
    type Executor = cosmic::executor::Default;

    /// Data that your application receives to its init method.
    type Flags = ();

    /// Messages which the application and its widgets will emit.
    type Message = Message;

    /// Unique identifier in RDNN (reverse domain name notation) format.
    const APP_ID: &'static str = APP_ID;

    fn core(&self) -> &cosmic::Core {
        &self.core
    }

    fn core_mut(&mut self) -> &mut cosmic::Core {
        &mut self.core
    }

    /// Initializes the application and starts the permission requests.
    fn init(
        core: cosmic::Core,
        _flags: Self::Flags,
    ) -> (Self, Task<cosmic::Action<Self::Message>>) {
        let about = About::default()
            .name(fl!("app-title"))
            .icon(widget::icon::from_name(Self::APP_ID).handle())
            .version(env!("GIT_VERSION"))
            .links([(fl!("repository"), REPOSITORY)])
            .license(env!("CARGO_PKG_LICENSE"));

        let (config_handler, config) = Config::load(Self::APP_ID);

        // Initialize GStreamer early (required before any GStreamer calls)
        if let Err(e) = gstreamer::init() {
            error!(error = %e, "Failed to initialize GStreamer");
        }

        info!(gallery = %config.gallery_folder(), "Starting application");

        // Images held when the last window closed were never saved
        crate::storage::prune_cache(&crate::storage::cache_directory());

        let app = AppModel {
            core,
            context_page: ContextPage::default(),
            about,
            host: Host::desktop(&config),
            screen: Screen::new(config.clear_after_failed_save),
            config,
            config_handler,
            session: None,
            preview: None,
            theme_options: AppTheme::ALL
                .iter()
                .map(|theme| match theme {
                    AppTheme::System => fl!("match-desktop"),
                    AppTheme::Dark => fl!("dark"),
                    AppTheme::Light => fl!("light"),
                })
                .collect(),
        };

        let startup = app.request_startup_permissions();
        let theme = cosmic::command::set_theme(app.config.app_theme.theme());
        (app, Task::batch([theme, startup]))
    }

    /// Elements to pack at the end of the header bar.
    fn header_end(&self) -> Vec<Element<'_, Self::Message>> {
        vec![
            widget::button::icon(widget::icon::from_name("help-about-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::About))
                .into(),
            widget::button::icon(widget::icon::from_name("preferences-system-symbolic"))
                .on_press(Message::ToggleContextPage(ContextPage::Settings))
                .into(),
        ]
    }

    /// Display a context drawer if the context page is requested.
    fn context_drawer(&self) -> Option<context_drawer::ContextDrawer<'_, Self::Message>> {
        if !self.core.window.show_context {
            return None;
        }

        Some(match self.context_page {
            ContextPage::About => context_drawer::about(
                &self.about,
                |url| Message::LaunchUrl(url.to_string()),
                Message::ToggleContextPage(ContextPage::About),
            ),
            ContextPage::Settings => self.settings_view(),
        })
    }

    /// Modal prompt, one at a time in arrival order.
    fn dialog(&self) -> Option<Element<'_, Self::Message>> {
        self.prompt_dialog()
    }

    /// Describes the interface based on the current state of the application model.
    fn view(&self) -> Element<'_, Self::Message> {
        self.view()
    }

    /// Register subscriptions for this application.
    fn subscription(&self) -> Subscription<Self::Message> {
        let config_sub = self
            .core()
            .watch_config::<Config>(Self::APP_ID)
            .map(|update| Message::UpdateConfig(update.config));

        // Camera runs only in camera mode; restarts when the facing changes
        let camera_sub = if self.screen.mode() == UiMode::Camera {
            handlers::camera::preview_subscription(
                Arc::clone(&self.host.camera),
                self.screen.facing(),
            )
        } else {
            Subscription::none()
        };

        Subscription::batch([config_sub, camera_sub])
    }

    /// Handles messages emitted by the application and its widgets.
    fn update(&mut self, message: Self::Message) -> Task<cosmic::Action<Self::Message>> {
        self.update(message)
    }
}
