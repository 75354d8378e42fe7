// SPDX-License-Identifier: MPL-2.0
//! Toast widget for rendering individual notifications.
//!
//! Toasts are small cards with a severity-colored border, a glyph icon, the
//! rich-text body and a close button. Transitions are expressed through the
//! notification's opacity.

use super::manager::{Manager, Message};
use super::markup::{self, Span};
use super::notification::{Countdown, Notification};
use crate::config::Position;
use crate::ui::design_tokens::{
    border, opacity, palette, radius, shadow, sizing, spacing, typography,
};
use iced::widget::{button, container, text, Column, Container, Row, Text};
use iced::{alignment, font, Color, Element, Font, Length, Theme};
use std::time::Instant;

const BOLD: Font = Font {
    weight: font::Weight::Bold,
    ..Font::DEFAULT
};

/// Toast widget configuration.
pub struct Toast;

impl Toast {
    /// Renders a single toast notification as it looks at `now`.
    pub fn view(notification: &Notification, now: Instant) -> Element<'_, Message> {
        let alpha = notification.opacity(now);
        let countdown = notification.countdown();
        let (border_color, border_width) = match countdown {
            Some(countdown) => (countdown.border_color(), border::WIDTH_LG),
            None => (notification.severity().color(), border::WIDTH_MD),
        };

        let icon = Text::new(notification.icon())
            .size(typography::TITLE_SM)
            .style(move |theme: &Theme| text::Style {
                color: Some(fade(theme.palette().text, alpha)),
            });

        let mut body = body_view(notification.body(), alpha);
        if let Some(countdown) = countdown {
            let elapsed = now.saturating_duration_since(notification.created_at());
            body = body.push(countdown_view(countdown, countdown.is_dimmed(elapsed), alpha));
        }

        // Exiting toasts are already gone from the registry.
        let dismiss = (!notification.is_exiting())
            .then(|| Message::Dismiss(notification.id().clone()));
        let dismiss_button = button(Text::new("×").size(typography::BODY_LG))
            .on_press_maybe(dismiss)
            .padding(spacing::XXS)
            .style(dismiss_button_style);

        // Layout: [icon] [body] [dismiss]
        let content = Row::new()
            .spacing(spacing::SM)
            .align_y(alignment::Vertical::Top)
            .push(Container::new(icon).padding(spacing::XXS))
            .push(
                Container::new(body)
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Left),
            )
            .push(dismiss_button);

        Container::new(content)
            .width(Length::Fixed(sizing::TOAST_WIDTH))
            .padding(spacing::SM)
            .style(move |theme: &Theme| {
                toast_container_style(theme, border_color, border_width, alpha)
            })
            .into()
    }

    /// Renders every visible notification stacked in the configured corner.
    pub fn view_overlay(manager: &Manager, now: Instant) -> Element<'_, Message> {
        let toasts: Vec<Element<'_, Message>> = manager
            .visible()
            .map(|notification| Self::view(notification, now))
            .collect();

        if toasts.is_empty() {
            return Container::new(text(""))
                .width(Length::Shrink)
                .height(Length::Shrink)
                .into();
        }

        let (align_x, align_y) = anchor(manager.position());
        let toast_column = Column::with_children(toasts)
            .spacing(spacing::XS)
            .align_x(align_x);

        Container::new(toast_column)
            .width(Length::Fill)
            .height(Length::Fill)
            .align_x(align_x)
            .align_y(align_y)
            .padding(spacing::MD)
            .into()
    }
}

fn anchor(position: Position) -> (alignment::Horizontal, alignment::Vertical) {
    match position {
        Position::TopRight => (alignment::Horizontal::Right, alignment::Vertical::Top),
        Position::TopLeft => (alignment::Horizontal::Left, alignment::Vertical::Top),
        Position::BottomRight => (alignment::Horizontal::Right, alignment::Vertical::Bottom),
        Position::BottomLeft => (alignment::Horizontal::Left, alignment::Vertical::Bottom),
    }
}

fn body_view<'a>(body: &str, alpha: f32) -> Column<'a, Message> {
    markup::parse(body)
        .into_iter()
        .filter(|line| !line.is_empty())
        .fold(Column::new().spacing(spacing::XXS), |column, line| {
            let row = line
                .into_iter()
                .fold(Row::new(), |row, span| row.push(span_view(span, alpha)));
            column.push(row)
        })
}

fn span_view<'a>(span: Span, alpha: f32) -> Text<'a> {
    let size = if span.style.small {
        typography::CAPTION
    } else {
        typography::BODY
    };
    let font = if span.style.code {
        Font::MONOSPACE
    } else if span.style.strong {
        BOLD
    } else {
        Font::DEFAULT
    };
    let secondary = span.style.small;

    Text::new(span.text)
        .size(size)
        .font(font)
        .style(move |theme: &Theme| {
            let base = theme.palette().text;
            let color = if secondary {
                Color {
                    a: opacity::OVERLAY_HOVER,
                    ..base
                }
            } else {
                base
            };
            text::Style {
                color: Some(fade(color, alpha)),
            }
        })
}

fn countdown_view<'a>(countdown: &Countdown, dimmed: bool, alpha: f32) -> Text<'a> {
    let alpha = if dimmed {
        alpha * opacity::OVERLAY_MEDIUM
    } else {
        alpha
    };
    Text::new(countdown.label())
        .size(typography::TITLE_MD)
        .font(BOLD)
        .color(fade(countdown.color(), alpha))
}

fn fade(color: Color, alpha: f32) -> Color {
    Color {
        a: color.a * alpha,
        ..color
    }
}

/// Style function for the toast container.
fn toast_container_style(
    theme: &Theme,
    border_color: Color,
    border_width: f32,
    alpha: f32,
) -> container::Style {
    let bg_color = theme.extended_palette().background.base.color;

    container::Style {
        background: Some(iced::Background::Color(fade(bg_color, alpha))),
        border: iced::Border {
            color: fade(border_color, alpha),
            width: border_width,
            radius: radius::MD.into(),
        },
        shadow: iced::Shadow {
            color: fade(shadow::MD.color, alpha * opacity::OVERLAY_SUBTLE),
            ..shadow::MD
        },
        text_color: Some(fade(theme.palette().text, alpha)),
        ..Default::default()
    }
}

/// Style function for the dismiss button.
fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let hover_background = |a: f32| {
        Some(iced::Background::Color(Color {
            a,
            ..palette::GRAY_400
        }))
    };

    match status {
        button::Status::Active => button::Style {
            background: None,
            text_color: base.text,
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Hovered | button::Status::Pressed => button::Style {
            background: hover_background(if status == button::Status::Hovered {
                opacity::OVERLAY_SUBTLE
            } else {
                opacity::OVERLAY_MEDIUM
            }),
            text_color: base.text,
            border: iced::Border {
                radius: radius::SM.into(),
                ..Default::default()
            },
            shadow: shadow::NONE,
            snap: true,
        },
        button::Status::Disabled => button::Style {
            background: None,
            text_color: Color {
                a: opacity::OVERLAY_MEDIUM,
                ..base.text
            },
            border: iced::Border::default(),
            shadow: shadow::NONE,
            snap: true,
        },
    }
}
