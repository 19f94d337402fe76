/// User commands and the line-oriented command syntax
///
/// ```text
/// t[axis] [amount]  translate          axis: x, y, z
/// r[axis] [amount]  rotate, degrees    axis: x, y, z
/// s[axis] [amount]  scale              axis: x, y, z, a (all)
/// p                 toggle orthographic / perspective
/// l                 toggle light / material shading
/// m                 reset the transform
/// v [width]x[height] resize the viewport
/// h                 help
/// q                 quit
/// ```
use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, i64 as integer, one_of, space1},
    combinator::{all_consuming, map, opt, value, verify},
    number::complete::float,
    sequence::{pair, preceded, separated_pair},
    IResult,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleAxis {
    X,
    Y,
    Z,
    All,
}

/// One mutation of the viewer state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Translate(Axis, f32),
    /// Angle in radians
    Rotate(Axis, f32),
    Scale(ScaleAxis, f32),
    ToggleProjection,
    ToggleShading,
    Reset,
    Resize(i64, i64),
    Help,
    Quit,
}

/// Stateful reader for the line syntax
///
/// An omitted amount reuses the last amount given, and an empty line repeats
/// the previous command.
#[derive(Debug, Clone)]
pub struct CommandReader {
    amount: f32,
    last: Option<String>,
}

impl CommandReader {
    pub fn new() -> Self {
        Self {
            amount: 1.0,
            last: None,
        }
    }

    /// Parse one input line, `None` for malformed input
    pub fn read(&mut self, line: &str) -> Option<Command> {
        let line = line.trim();
        let line = if line.is_empty() {
            self.last.clone()?
        } else {
            line.to_string()
        };

        let (command, amount) = parse_line(&line, self.amount)?;
        if let Some(amount) = amount {
            self.amount = amount;
        }
        self.last = Some(line);
        Some(command)
    }

    /// The amount used when a command omits one
    pub fn amount(&self) -> f32 {
        self.amount
    }
}

impl Default for CommandReader {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a single command, filling a missing amount with `default_amount`.
///
/// Also returns the amount written on the line, if any.
pub fn parse_line(line: &str, default_amount: f32) -> Option<(Command, Option<f32>)> {
    all_consuming(|input| command(input, default_amount))(line.trim())
        .ok()
        .map(|(_, parsed)| parsed)
}

fn command(input: &str, default_amount: f32) -> IResult<&str, (Command, Option<f32>)> {
    let amount_or_default = move |amount: Option<f32>| amount.unwrap_or(default_amount);

    alt((
        map(preceded(char('t'), pair(axis, amount)), move |(axis, amount)| {
            (Command::Translate(axis, amount_or_default(amount)), amount)
        }),
        map(preceded(char('r'), pair(axis, amount)), move |(axis, amount)| {
            let degrees = amount_or_default(amount);
            (Command::Rotate(axis, degrees.to_radians()), amount)
        }),
        map(preceded(char('s'), pair(scale_axis, amount)), move |(axis, amount)| {
            (Command::Scale(axis, amount_or_default(amount)), amount)
        }),
        map(
            preceded(pair(char('v'), space1), separated_pair(integer, char('x'), integer)),
            |(width, height)| (Command::Resize(width, height), None),
        ),
        map(alt((tag("quit"), tag("q"))), |_| (Command::Quit, None)),
        map(alt((tag("help"), tag("h"))), |_| (Command::Help, None)),
        value((Command::ToggleProjection, None), char('p')),
        value((Command::ToggleShading, None), char('l')),
        value((Command::Reset, None), char('m')),
    ))(input)
}

fn axis(input: &str) -> IResult<&str, Axis> {
    map(one_of("xyz"), |c| match c {
        'x' => Axis::X,
        'y' => Axis::Y,
        _ => Axis::Z,
    })(input)
}

fn scale_axis(input: &str) -> IResult<&str, ScaleAxis> {
    map(one_of("xyza"), |c| match c {
        'x' => ScaleAxis::X,
        'y' => ScaleAxis::Y,
        'z' => ScaleAxis::Z,
        _ => ScaleAxis::All,
    })(input)
}

/// Optional finite amount; `nan` and `inf` do not count as numbers here
fn amount(input: &str) -> IResult<&str, Option<f32>> {
    opt(preceded(space1, verify(float, |amount: &f32| amount.is_finite())))(input)
}
