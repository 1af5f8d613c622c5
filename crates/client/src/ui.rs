//! Terminal presentation: the frame as half-block cells plus a one-line HUD.
//!
//! Each terminal cell shows two vertically stacked pixels: `▀` painted with
//! the upper pixel as foreground and the lower one as background.
use std::io;

use ratatui::{
    Terminal,
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use raycast_core::{FrameBuffer, KeyColor, PlayerStatus, Rgba};
use raycast_runtime::{FrameView, HudLog, Presenter};

const HALF_BLOCK: &str = "▀";
/// Rows kept below the view for the HUD.
const HUD_ROWS: u16 = 1;

fn color(pixel: Rgba) -> Color {
    Color::Rgb(pixel.r, pixel.g, pixel.b)
}

/// Paints a frame buffer into the area it is given, clipping what does not fit.
pub struct FrameWidget<'a> {
    pub frame: &'a FrameBuffer,
    pub crosshair: bool,
}

impl Widget for FrameWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pixel = |x: u32, y: u32| self.frame.get(x, y).unwrap_or(Rgba::BLACK);
        for row in 0..area.height {
            for column in 0..area.width {
                let x = u32::from(column);
                let y = u32::from(row) * 2;
                buf[(area.x + column, area.y + row)]
                    .set_symbol(HALF_BLOCK)
                    .set_fg(color(pixel(x, y)))
                    .set_bg(color(pixel(x, y + 1)));
            }
        }
        if self.crosshair && area.width > 0 && area.height > 0 {
            let cell = &mut buf[(area.x + area.width / 2, area.y + area.height / 2)];
            cell.set_symbol("+").set_fg(Color::White);
        }
    }
}

fn key_span(color: KeyColor) -> Span<'static> {
    let (label, fg) = match color {
        KeyColor::Blue => ("B", Color::LightBlue),
        KeyColor::Red => ("R", Color::LightRed),
        KeyColor::Gold => ("G", Color::Yellow),
    };
    Span::styled(label, Style::default().fg(fg).add_modifier(Modifier::BOLD))
}

fn health_style(health: u32) -> Style {
    let fg = match health {
        0 => Color::DarkGray,
        1..=25 => Color::Red,
        26..=60 => Color::Yellow,
        _ => Color::Green,
    };
    Style::default().fg(fg)
}

fn status_spans(status: &PlayerStatus) -> Vec<Span<'static>> {
    let label = Style::default().fg(Color::White);
    let weapon = status
        .weapon
        .map_or_else(|| "unarmed".to_owned(), |kind| kind.to_string());
    let ammo = status
        .ammo
        .map_or_else(|| "--".to_owned(), |ammo| ammo.to_string());

    let mut spans = vec![
        Span::styled("HP ", label),
        Span::styled(status.health.to_string(), health_style(status.health)),
        Span::raw("  "),
        Span::styled(weapon, Style::default().fg(Color::Cyan)),
        Span::raw(" "),
        Span::raw(ammo),
        Span::raw("  "),
    ];
    spans.extend(
        [KeyColor::Blue, KeyColor::Red, KeyColor::Gold]
            .into_iter()
            .filter(|&color| status.keys.holds(color))
            .map(key_span),
    );
    spans
}

/// The HUD line: player status, level name and the newest message.
pub fn hud_line<'a>(hud: &'a HudLog, level: &'a str) -> Line<'a> {
    let mut spans: Vec<Span<'a>> = match hud.player_status() {
        Some(status) => status_spans(status),
        None => Vec::new(),
    };
    spans.push(Span::styled(format!(" [{level}] "), Style::default().fg(Color::DarkGray)));
    if let Some(message) = hud.messages().last() {
        spans.push(Span::styled(
            message.text.as_str(),
            Style::default().add_modifier(Modifier::ITALIC),
        ));
    }
    Line::from(spans)
}

/// [`Presenter`] drawing into a ratatui terminal.
pub struct TerminalPresenter<B: Backend> {
    terminal: Terminal<B>,
    crosshair: bool,
}

impl<B: Backend> TerminalPresenter<B> {
    pub fn new(terminal: Terminal<B>, crosshair: bool) -> Self {
        Self {
            terminal,
            crosshair,
        }
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

impl<B: Backend> Presenter for TerminalPresenter<B> {
    fn viewport(&mut self) -> Option<(u32, u32)> {
        let size = self.terminal.size().ok()?;
        let rows = size.height.saturating_sub(HUD_ROWS);
        (size.width > 0 && rows > 0).then(|| (u32::from(size.width), u32::from(rows) * 2))
    }

    fn present(&mut self, view: &FrameView<'_>) -> io::Result<()> {
        let crosshair = self.crosshair;
        self.terminal.draw(|frame| {
            let [scene, hud] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(HUD_ROWS)]).areas(frame.area());
            frame.render_widget(
                FrameWidget {
                    frame: view.frame,
                    crosshair,
                },
                scene,
            );
            frame.render_widget(Paragraph::new(hud_line(view.hud, view.level)), hud);
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use raycast_core::{DepthBuffer, HudEvent, HudSink, KeyRing, RenderOutput, WeaponKind};

    fn status() -> PlayerStatus {
        PlayerStatus {
            health: 80,
            weapon: Some(WeaponKind::Pistol),
            ammo: Some(8),
            keys: KeyRing::of(KeyColor::Red),
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn hud_line_shows_status_and_newest_message() {
        let mut hud = HudLog::default();
        assert_eq!(text(&hud_line(&hud, "e1m1")), " [e1m1] ");

        hud.status(&status());
        hud.notify(HudEvent::LevelRestarted);
        hud.notify(HudEvent::PlayerDied);
        let line = text(&hud_line(&hud, "e1m1"));
        assert!(line.starts_with("HP 80  pistol 8  R"), "{line}");
        assert!(line.ends_with(&raycast_runtime::describe_event(HudEvent::PlayerDied)), "{line}");
    }

    #[test]
    fn two_pixel_rows_share_a_cell() {
        let mut frame = FrameBuffer::new(2, 4);
        frame.put(0, 0, Rgba::rgb(255, 0, 0));
        frame.put(0, 1, Rgba::rgb(0, 0, 255));

        let area = Rect::new(0, 0, 2, 2);
        let mut buf = Buffer::empty(area);
        FrameWidget {
            frame: &frame,
            crosshair: false,
        }
        .render(area, &mut buf);

        let cell = &buf[(0, 0)];
        assert_eq!(cell.symbol(), HALF_BLOCK);
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn out_of_frame_cells_are_black_and_crosshair_is_centered() {
        let frame = FrameBuffer::new(1, 1);
        let area = Rect::new(0, 0, 3, 3);
        let mut buf = Buffer::empty(area);
        FrameWidget {
            frame: &frame,
            crosshair: true,
        }
        .render(area, &mut buf);

        assert_eq!(buf[(2, 2)].fg, Color::Rgb(0, 0, 0));
        assert_eq!(buf[(1, 1)].symbol(), "+");
    }

    #[test]
    fn presenter_reserves_a_row_for_the_hud() {
        let terminal = Terminal::new(TestBackend::new(40, 13)).unwrap();
        let mut presenter = TerminalPresenter::new(terminal, true);
        assert_eq!(presenter.viewport(), Some((40, 24)));

        let frame = FrameBuffer::new(40, 24);
        let output = RenderOutput {
            depth: DepthBuffer::new(40),
            sprites: Vec::new(),
        };
        let mut hud = HudLog::default();
        hud.status(&status());
        let view = FrameView {
            frame: &frame,
            output: &output,
            hud: &hud,
            level: "e1m1",
            index: 0,
            dt: 0.016,
        };
        presenter.present(&view).unwrap();

        let buffer = presenter.terminal().backend().buffer();
        assert_eq!(buffer[(0, 0)].symbol(), HALF_BLOCK);
        assert_eq!(buffer[(0, 12)].symbol(), "H");
        assert_eq!(buffer[(20, 6)].symbol(), "+");
    }

    #[test]
    fn tiny_terminals_have_no_viewport() {
        let terminal = Terminal::new(TestBackend::new(10, 1)).unwrap();
        assert_eq!(TerminalPresenter::new(terminal, false).viewport(), None);
    }
}
