// SPDX-License-Identifier: MPL-2.0
//! Boxed console banners for device events.
//!
//! Each line of a banner is emitted as its own `tracing` event under the
//! [`CONSOLE_TARGET`] target so it can be filtered independently of the
//! structured logs.

/// Tracing target for banner lines.
pub const CONSOLE_TARGET: &str = "midi_notifier::console";

/// Characters between the two vertical borders.
const INNER_WIDTH: usize = 55;
const INDENT: &str = "  ";

/// A titled box with one or more sections of lines.
#[derive(Debug, Clone, Default)]
pub struct Banner {
    title: String,
    sections: Vec<Vec<String>>,
}

impl Banner {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Appends a section separated from the previous one by a rule.
    #[must_use]
    pub fn section<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sections.push(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Renders the banner into its lines.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        let rule = "═".repeat(INNER_WIDTH);
        let mut lines = vec![format!("╔{rule}╗"), row(&format!("     {}", self.title))];
        for section in &self.sections {
            lines.push(format!("╠{rule}╣"));
            lines.extend(section.iter().map(|line| row(line)));
        }
        lines.push(format!("╚{rule}╝"));
        lines
    }

    /// Logs every line at info level.
    pub fn emit(&self) {
        for line in self.lines() {
            tracing::info!(target: CONSOLE_TARGET, "{line}");
        }
    }
}

/// Pads `text` to the box width. Longer text overflows the border.
fn row(text: &str) -> String {
    let used = INDENT.chars().count() + text.chars().count();
    let padding = INNER_WIDTH.saturating_sub(used);
    format!("║{INDENT}{text}{}║", " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banner_lines_share_the_same_width() {
        let banner = Banner::new("🎉 DISPOSITIVO TERRA CONECTADO!")
            .section(["Nome: Korg", "ID: input-1"])
            .section(["✓ Dispositivo pronto para uso"]);
        let lines = banner.lines();

        assert_eq!(lines.len(), 8);
        for line in &lines {
            assert_eq!(line.chars().count(), INNER_WIDTH + 2, "{line}");
        }
        assert!(lines[0].starts_with('╔'));
        assert!(lines[2].starts_with('╠'));
        assert!(lines[7].starts_with('╚'));
    }

    #[test]
    fn long_rows_are_not_truncated() {
        let long = "x".repeat(80);
        let lines = Banner::new("t").section([long.clone()]).lines();
        assert!(lines[3].contains(&long));
    }
}
