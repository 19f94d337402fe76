/// Line oriented front end: one typed command per frame
use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{self, ClearType},
};
use meshglyph_core::{Command, CommandReader, FrameBuffer, Scene};
use std::io::{self, BufRead, Write};
use std::time::Instant;

use crate::help::LINE_HELP;
use crate::renderer::{self, GlyphPresenter};

/// Prompt printed under every frame
const PROMPT: &str = "> ";

/// Viewer that redraws after every command read from a line of input
///
/// Works on any reader and writer pair, so it can be scripted through a pipe
/// as well as typed at.
pub struct LineApp {
    scene: Scene,
    buffer: FrameBuffer,
    presenter: GlyphPresenter,
    reader: CommandReader,
    show_frame_time: bool,
    show_help: bool,
}

impl LineApp {
    pub fn new(scene: Scene, width: usize, height: usize) -> Self {
        Self {
            scene,
            buffer: FrameBuffer::new(width, height),
            presenter: GlyphPresenter::default(),
            reader: CommandReader::new(),
            show_frame_time: false,
            show_help: true,
        }
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

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Run on the process stdin and stdout until quit or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.run_with(stdin.lock(), stdout.lock())
    }

    pub fn run_with<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        if self.show_help && !self.help(&mut input, &mut output)? {
            return Ok(());
        }

        loop {
            self.draw(&mut output)?;

            let line = match read_line(&mut input)? {
                Some(line) => line,
                None => break,
            };

            match self.reader.read(&line) {
                Some(Command::Quit) => break,
                Some(Command::Help) => {
                    if !self.help(&mut input, &mut output)? {
                        break;
                    }
                }
                Some(command) => self.scene.apply(&command, &mut self.buffer),
                None => log::debug!("ignoring malformed command {line:?}"),
            }
        }

        queue!(output, Print('\n'))?;
        output.flush()
    }

    /// Show the syntax help, `false` if input ended while waiting
    fn help<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<bool> {
        queue!(
            output,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0),
            Print(LINE_HELP),
            Print('\n')
        )?;
        output.flush()?;
        Ok(read_line(input)?.is_some())
    }

    fn draw<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        let frame_start = Instant::now();
        let stats = self.scene.render(&mut self.buffer);
        let render_time = frame_start.elapsed();
        log::trace!("frame: {stats:?}");

        queue!(output, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        self.presenter
            .draw_lines(output, &self.buffer, self.scene.shading)?;
        self.presenter.draw_status(output, &self.scene.status())?;
        queue!(output, Print('\n'))?;
        if self.show_frame_time {
            let frame = renderer::frame_time(frame_start.elapsed(), render_time);
            queue!(output, Print(frame), Print('\n'))?;
        }
        queue!(output, Print(PROMPT))?;
        output.flush()
    }
}

/// Next input line without its terminator, `None` at end of input
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
