use std::io::{self, BufRead, Write};

use rope_core::RopeSize;

/// Ask for a rope size until a valid answer arrives.
///
/// End of input falls back to the small rope.
pub fn ask_size<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<RopeSize> {
    let mut line = String::new();
    loop {
        writeln!(output, "What size rope would you like to use?")?;
        writeln!(output, "1. Small")?;
        writeln!(output, "2. Medium")?;
        writeln!(output, "3. Large\n")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            log::warn!("no rope size given, using small");
            return Ok(RopeSize::Small);
        }
        match line.parse() {
            Ok(size) => return Ok(size),
            Err(e) => {
                log::debug!("{e}");
                writeln!(output, "\nPlease enter 1, 2, or 3\n")?;
            }
        }
    }
}
