use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Paragraph},
};
use rubrics_types::Severity;

use super::roles::{Theme, ThemeRoles};

/// Standard bordered block on the theme's surface color.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(title) = title {
        block = block.title(Span::styled(title, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

pub fn table_header_row_style<T: Theme + ?Sized>(theme: &T) -> Style {
    Style::default()
        .bg(theme.roles().surface_muted)
        .fg(theme.roles().text_secondary)
        .add_modifier(Modifier::BOLD)
}

/// Darkens an RGB color by `factor` (0.0..=1.0); other colors pass through.
pub fn darken_rgb(color: Color, factor: f32) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let factor = factor.clamp(0.0, 1.0);
            let scale = |channel: u8| (channel as f32 * factor).round().clamp(0.0, 255.0) as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    }
}

/// Zebra striping for table rows.
pub fn table_row_style<T: Theme + ?Sized>(theme: &T, row_index: usize) -> Style {
    let ThemeRoles {
        surface,
        surface_muted,
        text,
        ..
    } = *theme.roles();
    let background = if row_index % 2 == 0 { surface } else { surface_muted };
    Style::default().bg(darken_rgb(background, 0.6)).fg(text)
}

pub fn table_selected_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.selection_style().add_modifier(Modifier::BOLD)
}

pub fn input_style<T: Theme + ?Sized>(theme: &T, focused: bool) -> Style {
    let style = panel_style(theme);
    if focused { style.add_modifier(Modifier::BOLD) } else { style }
}

pub fn severity_style<T: Theme + ?Sized>(theme: &T, severity: Severity) -> Style {
    match severity {
        Severity::Info => theme.status_info(),
        Severity::Warning => theme.status_warning(),
        Severity::Error => theme.status_error(),
    }
}

/// Renders a bordered, centered button label.
pub fn render_button<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, label: &str, focused: bool, theme: &T) {
    let style = if focused {
        Style::default()
            .fg(theme.roles().accent_secondary)
            .bg(theme.roles().selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.roles().accent_secondary)
    };
    frame.render_widget(
        Paragraph::new(label)
            .centered()
            .block(Block::bordered().border_style(theme.border_style(focused)))
            .style(style),
        area,
    );
}

/// Builds `key description` hint pairs with the key emphasized.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&'static str, &'static str)]) -> Vec<Span<'static>> {
    hints
        .iter()
        .flat_map(|(key, description)| {
            [
                Span::styled(*key, theme.accent_emphasis_style()),
                Span::styled(*description, theme.text_muted_style()),
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::DraculaTheme;

    #[test]
    fn darken_scales_rgb_only() {
        assert_eq!(darken_rgb(Color::Rgb(100, 50, 0), 0.5), Color::Rgb(50, 25, 0));
        assert_eq!(darken_rgb(Color::Red, 0.5), Color::Red);
    }

    #[test]
    fn hint_spans_alternate_key_and_description() {
        let theme = DraculaTheme::new();
        let spans = build_hint_spans(&theme, &[("Esc", " cancel ")]);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].content, "Esc");
        assert_eq!(spans[1].content, " cancel ");
    }
}
