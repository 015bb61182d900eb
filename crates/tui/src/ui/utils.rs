use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Rect of `percent_x` × `percent_y` centered inside `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let [row] = Layout::vertical([Constraint::Percentage(percent_y)]).flex(Flex::Center).areas(area);
    let [center] = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center).areas(row);
    center
}

/// Like [`centered_rect`], but never smaller than `min` nor larger than `max`
/// (both clamped to `area`).
pub fn centered_min_max(percent_x: u16, percent_y: u16, min: (u16, u16), max: (u16, u16), area: Rect) -> Rect {
    let preferred = centered_rect(percent_x, percent_y, area);
    let width = preferred.width.clamp(min.0.min(area.width), max.0.min(area.width));
    let height = preferred.height.clamp(min.1.min(area.height), max.1.min(area.height));
    let [row] = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center).areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(row);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 60);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 30));
    }

    #[test]
    fn min_max_clamps_to_bounds() {
        let area = Rect::new(0, 0, 200, 60);
        let rect = centered_min_max(10, 10, (60, 20), (80, 30), area);
        assert_eq!((rect.width, rect.height), (60, 20));

        let small = Rect::new(0, 0, 40, 10);
        let rect = centered_min_max(10, 10, (60, 20), (80, 30), small);
        assert_eq!((rect.width, rect.height), (40, 10));
    }
}
