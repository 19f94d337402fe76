/// Terminal front ends for the glyph rasterizer
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute, queue,
    terminal::{self, ClearType},
};
use meshglyph_core::{Axis, Command, FrameBuffer, ScaleAxis, Scene};
use std::io::{self, stdout, Write};
use std::time::Instant;

pub mod args;
pub mod help;
pub mod line;
pub mod renderer;

pub use line::LineApp;
pub use renderer::GlyphPresenter;

/// Distance moved per key press
pub const TRANSLATE_STEP: f32 = 0.06;

/// Angle turned per key press, in radians
pub const ROTATE_STEP: f32 = 0.08;

/// Factor scaled by per key press
pub const SCALE_STEP: f32 = 1.1;

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Scene(Command),
    ToggleColor,
}

/// Map a key to its action, `None` for unbound keys
pub fn key_action(code: KeyCode) -> Option<KeyAction> {
    let command = match code {
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        KeyCode::Char('h') => Command::Help,
        KeyCode::Char('p') => Command::ToggleProjection,
        KeyCode::Char('t') => Command::ToggleShading,
        KeyCode::Char('r') => Command::Reset,
        KeyCode::Char('c') => return Some(KeyAction::ToggleColor),
        KeyCode::Char('w') | KeyCode::Up => Command::Translate(Axis::Y, TRANSLATE_STEP),
        KeyCode::Char('s') | KeyCode::Down => Command::Translate(Axis::Y, -TRANSLATE_STEP),
        KeyCode::Char('a') | KeyCode::Left => Command::Translate(Axis::X, -TRANSLATE_STEP),
        KeyCode::Char('d') | KeyCode::Right => Command::Translate(Axis::X, TRANSLATE_STEP),
        KeyCode::Char('z') => Command::Translate(Axis::Z, -TRANSLATE_STEP),
        KeyCode::Char('x') => Command::Translate(Axis::Z, TRANSLATE_STEP),
        KeyCode::Char('+') => Command::Scale(ScaleAxis::All, SCALE_STEP),
        KeyCode::Char('-') => Command::Scale(ScaleAxis::All, 1.0 / SCALE_STEP),
        KeyCode::Char('i') => Command::Rotate(Axis::X, ROTATE_STEP),
        KeyCode::Char('k') => Command::Rotate(Axis::X, -ROTATE_STEP),
        KeyCode::Char('j') => Command::Rotate(Axis::Y, ROTATE_STEP),
        KeyCode::Char('l') => Command::Rotate(Axis::Y, -ROTATE_STEP),
        KeyCode::Char('u') => Command::Rotate(Axis::Z, ROTATE_STEP),
        KeyCode::Char('o') => Command::Rotate(Axis::Z, -ROTATE_STEP),
        _ => return None,
    };
    Some(KeyAction::Scene(command))
}

/// Interactive viewer driven by single key presses
///
/// Every key press mutates the scene once and triggers a full redraw; the
/// framebuffer follows the terminal size.
pub struct TerminalApp {
    scene: Scene,
    buffer: FrameBuffer,
    presenter: GlyphPresenter,
    show_frame_time: bool,
    show_help: bool,
    running: bool,
}

impl TerminalApp {
    pub fn new(scene: Scene) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            scene,
            buffer: FrameBuffer::new(width as usize, height as usize),
            presenter: GlyphPresenter::default(),
            show_frame_time: false,
            show_help: true,
            running: true,
        })
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.presenter.color = color;
        self
    }

    pub fn with_frame_time(mut self, show: bool) -> Self {
        self.show_frame_time = show;
        self
    }

    pub fn with_help(mut self, show: bool) -> Self {
        self.show_help = show;
        self
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        if self.show_help {
            self.help()?;
        }

        while self.running {
            self.render()?;
            self.handle_input()?;
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, kind, .. }) if kind != KeyEventKind::Release => {
                match key_action(code) {
                    Some(KeyAction::Scene(Command::Quit)) => self.running = false,
                    Some(KeyAction::Scene(Command::Help)) => self.help()?,
                    Some(KeyAction::Scene(command)) => self.scene.apply(&command, &mut self.buffer),
                    Some(KeyAction::ToggleColor) => self.presenter.color = !self.presenter.color,
                    None => {}
                }
            }
            Event::Resize(width, height) => {
                let resize = Command::Resize(i64::from(width), i64::from(height));
                self.scene.apply(&resize, &mut self.buffer);
            }
            _ => {}
        }
        Ok(())
    }

    fn help(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;
        for (y, text) in help::KEY_HELP.lines().enumerate() {
            queue!(stdout, cursor::MoveTo(0, y as u16))?;
            self.presenter.draw_status(&mut stdout, text)?;
        }
        stdout.flush()?;

        // Any key continues
        loop {
            if let Event::Key(KeyEvent { kind, .. }) = event::read()? {
                if kind != KeyEventKind::Release {
                    break;
                }
            }
        }
        Ok(())
    }

    fn render(&mut self) -> io::Result<()> {
        let frame_start = Instant::now();
        let stats = self.scene.render(&mut self.buffer);
        let render_time = frame_start.elapsed();

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, terminal::Clear(ClearType::All))?;
        self.presenter
            .draw_screen(&mut stdout, &self.buffer, self.scene.shading)?;

        // Draw UI overlay
        let mut status = self.scene.status();
        if self.show_frame_time {
            let frame = renderer::frame_time(frame_start.elapsed(), render_time);
            status = format!("{frame} {status}");
        }
        log::trace!("frame: {stats:?}");
        let status: String = status.chars().take(self.buffer.width()).collect();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.presenter.draw_status(&mut stdout, &status)?;

        stdout.flush()?;
        Ok(())
    }
}
