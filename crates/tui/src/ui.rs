use ratatui::layout::Flex;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Padding};

use crate::app::App;
use crate::components::footer;
use crate::ruler::RulerWidget;

pub fn draw(frame: &mut Frame, app: &mut App) {
    let theme = app.theme.clone();

    frame.render_widget(
        Block::default().style(Style::default().bg(theme.bg_page)),
        frame.area(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    let ruler = RulerWidget::new(&app.spec, &theme)
        .offsets(app.animator.current())
        .rows(app.mark_rows, app.highlight_rows);

    let panel_height = ruler.height() + 2;
    let [panel_area] = Layout::vertical([Constraint::Length(panel_height)])
        .flex(Flex::Center)
        .areas(chunks[0]);

    let panel = Block::default()
        .padding(Padding::new(1, 1, 1, 1))
        .style(Style::default().bg(theme.bg_panel));
    let inner = panel.inner(panel_area);
    frame.render_widget(panel, panel_area);
    frame.render_stateful_widget(ruler, inner, &mut app.ruler_state);

    footer::draw(frame, chunks[1], app, &theme);
}

#[cfg(test)]
mod tests {
    use super::*;
    use distind_config::Config;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn renders_ruler_and_footer() {
        let mut app = App::new(&Config::default(), "random");
        let mut terminal = Terminal::new(TestBackend::new(100, 10)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Too Close"));
        assert!(text.contains("Too Far"));
        assert!(text.contains("▲"));
        assert!(text.contains("src:random"));
        assert!(text.contains("Unknown"));
    }

    #[test]
    fn panel_padding_shrinks_track() {
        let mut app = App::new(&Config::default(), "random");
        let mut terminal = Terminal::new(TestBackend::new(100, 10)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();

        // 100 columns minus one column of padding on each side and the labels
        let m = app.ruler_state.measurement();
        assert_eq!(m.ruler.width, (100 - 2 - 9 - 7 - 2) as f64);
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let mut app = App::new(&Config::default(), "random");
        let mut terminal = Terminal::new(TestBackend::new(3, 2)).unwrap();
        terminal.draw(|frame| draw(frame, &mut app)).unwrap();
    }
}
