use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::io::color_scheme::ColorScheme;
use crate::io::seed;
use crate::model::UiConfig;
use crate::tui::app::App;

pub const TERM_W: u16 = 120;
pub const TERM_H: u16 = 40;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing empty lines
    let mut result = lines.join("\n");
    while result.ends_with('\n') {
        result.pop();
    }
    result
}

/// App over the bundled demo boards, dark palette
pub fn demo_app() -> App {
    let state = seed::demo().unwrap();
    App::new(state, &UiConfig::default(), ColorScheme::Dark)
}

/// Lay out and draw the whole screen
pub fn render_app(app: &mut App, w: u16, h: u16) -> String {
    app.sync_layout(Rect::new(0, 0, w, h));
    render_to_string(w, h, |frame, _| super::render(frame, app))
}
