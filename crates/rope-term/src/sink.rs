use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::Print,
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use rope_core::{DrawCommand, Frame, FrameSink};

/// Draws frames by moving the cursor to each cell.
pub struct TerminalSink<W: Write> {
    out: W,
}

impl<W: Write> TerminalSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> FrameSink for TerminalSink<W> {
    type Error = io::Error;

    fn present(&mut self, frame: &Frame) -> io::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        for command in &frame.commands {
            match command {
                DrawCommand::Clear => queue!(self.out, Clear(ClearType::All))?,
                DrawCommand::Cell(cell) => queue!(
                    self.out,
                    cursor::MoveTo(cell.column, cell.row),
                    Print(cell.glyph_char())
                )?,
            }
        }
        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()
    }
}
