// SPDX-License-Identifier: MPL-2.0
//! Control panel with the toast overlay stacked on top.

use super::{DemoEvent, Message};
use crate::midi::MidiNotifier;
use crate::ui::design_tokens::{sizing, spacing, typography};
use crate::ui::notifications::Toast;
use iced::widget::{button, text, Column, Container, Row, Stack, Text};
use iced::{Element, Length};
use std::time::Instant;

/// Panel sections: title key and the (event, label key) buttons inside.
pub(super) const EVENTS: [(&str, &[(DemoEvent, &str)]); 5] = [
    (
        "app-section-devices",
        &[
            (DemoEvent::Connect, "app-button-connect"),
            (DemoEvent::Disconnect, "app-button-disconnect"),
            (DemoEvent::Reject, "app-button-reject"),
            (DemoEvent::Error, "app-button-error"),
        ],
    ),
    (
        "app-section-permission",
        &[
            (DemoEvent::RequestPermission, "app-button-request-permission"),
            (DemoEvent::GrantPermission, "app-button-grant-permission"),
            (DemoEvent::Instructions, "app-button-instructions"),
        ],
    ),
    (
        "app-section-reconnect",
        &[
            (DemoEvent::ReconnectAttempt, "app-button-reconnect-attempt"),
            (DemoEvent::Reconnected, "app-button-reconnected"),
            (DemoEvent::ReconnectFailed, "app-button-reconnect-failed"),
        ],
    ),
    (
        "app-section-environment",
        &[
            (DemoEvent::Unsupported, "app-button-unsupported"),
            (DemoEvent::NoDevices, "app-button-no-devices"),
            (DemoEvent::InsecureContext, "app-button-insecure"),
            (DemoEvent::ExclusiveUse, "app-button-exclusive"),
            (DemoEvent::BrowserUpdate, "app-button-browser-update"),
            (DemoEvent::Checklist, "app-button-checklist"),
        ],
    ),
    (
        "app-section-legacy",
        &[
            (DemoEvent::LegacyConnect, "app-button-legacy-connect"),
            (DemoEvent::LegacyDisconnect, "app-button-legacy-disconnect"),
        ],
    ),
];

/// Buttons per row before wrapping to the next one.
const BUTTONS_PER_ROW: usize = 3;

pub(super) fn view(notifier: &MidiNotifier, now: Instant) -> Element<'_, Message> {
    let catalog = notifier.catalog();

    let mut panel = Column::new()
        .spacing(spacing::MD)
        .padding(spacing::LG)
        .width(Length::Fixed(sizing::PANEL_WIDTH))
        .push(Text::new(catalog.tr("app-title")).size(typography::TITLE_LG));

    for (section_key, events) in EVENTS {
        let rows = events.chunks(BUTTONS_PER_ROW).map(|chunk| {
            chunk
                .iter()
                .fold(Row::new().spacing(spacing::XS), |row, (event, label_key)| {
                    row.push(button(text(catalog.tr(label_key))).on_press(Message::Fire(*event)))
                })
                .into()
        });
        panel = panel.push(
            Column::new()
                .spacing(spacing::XS)
                .push(Text::new(catalog.tr(section_key)).size(typography::TITLE_SM))
                .extend(rows),
        );
    }

    let stats = notifier.stats();
    let active = stats.active_count.to_string();
    let max = stats.max_concurrent.to_string();
    panel = panel.push(
        Row::new()
            .spacing(spacing::MD)
            .push(
                Text::new(catalog.tr_with_args("app-stats", &[("active", &active), ("max", &max)]))
                    .size(typography::BODY_SM),
            )
            .push(button(text(catalog.tr("app-button-dismiss-all"))).on_press(Message::DismissAll)),
    );

    let content = Container::new(panel)
        .width(Length::Fill)
        .height(Length::Fill)
        .padding(spacing::XL);

    Stack::new()
        .push(content)
        .push(Toast::view_overlay(notifier.manager(), now).map(Message::Notification))
        .into()
}
