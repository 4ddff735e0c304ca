use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{self, DisableLineWrap, EnableLineWrap, EnterAlternateScreen, LeaveAlternateScreen},
};
use rope_core::{GridSize, RopeConfig, RopeSize, Simulation};

mod prompt;
mod sink;

use sink::TerminalSink;

#[derive(Debug, thiserror::Error)]
enum HostError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid rope configuration: {0}")]
    Config(#[from] rope_core::ConfigError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum SizeArg {
    #[value(alias = "1")]
    Small,
    #[value(alias = "2")]
    Medium,
    #[value(alias = "3")]
    Large,
}

impl From<SizeArg> for RopeSize {
    fn from(arg: SizeArg) -> Self {
        match arg {
            SizeArg::Small => RopeSize::Small,
            SizeArg::Medium => RopeSize::Medium,
            SizeArg::Large => RopeSize::Large,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "rope")]
#[command(about = "A hanging rope that follows the mouse, drawn in the terminal", long_about = None)]
struct Args {
    /// Rope size; asked interactively when omitted
    #[arg(long, value_enum)]
    size: Option<SizeArg>,

    /// Frames drawn per second. Physics runs at its own fixed rate.
    #[arg(long, default_value_t = 90)]
    fps: u32,

    /// Physics ticks per second
    #[arg(long, default_value_t = 600)]
    tick_rate: u32,
}

fn main() -> Result<(), HostError> {
    env_logger::init();
    let args = Args::parse();

    let size = match args.size {
        Some(size) => size.into(),
        None => prompt::ask_size(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    let config = RopeConfig {
        frame_rate: args.fps,
        tick_rate: args.tick_rate,
        ..RopeConfig::for_size(size)
    };
    let sim = Simulation::new(config)?;
    log::info!("starting {size} rope");

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    let res = execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        DisableLineWrap,
        cursor::Hide
    )
    .map_err(HostError::from)
    .and_then(|()| run(&mut stdout, sim));

    let restored = restore_terminal(&mut stdout);
    log::info!("terminal restored");

    res.and(restored)
}

/// Undo terminal setup. Raw mode is left even if the escape sequences fail.
fn restore_terminal(stdout: &mut Stdout) -> Result<(), HostError> {
    let screen = execute!(
        stdout,
        cursor::Show,
        EnableLineWrap,
        DisableMouseCapture,
        LeaveAlternateScreen
    );
    terminal::disable_raw_mode()?;
    Ok(screen?)
}

fn run(stdout: &mut Stdout, mut sim: Simulation) -> Result<(), HostError> {
    let (columns, rows) = terminal::size()?;
    let mut grid = GridSize::new(columns, rows);
    sim.set_grid(grid);

    // Until the mouse moves, hang the rope from the middle of the screen.
    let mut anchor = sim.camera.anchor_from_cell(grid.columns / 2, grid.rows / 2, grid);
    let mut sink = TerminalSink::new(&mut *stdout);
    let mut last = Instant::now();

    loop {
        // ----- input (non-blocking) -----
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => {
                    let ctrl_c = k.code == KeyCode::Char('c') && k.modifiers.contains(KeyModifiers::CONTROL);
                    if ctrl_c || matches!(k.code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc) {
                        return Ok(());
                    }
                }
                Event::Mouse(m) => {
                    if matches!(m.kind, MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)) {
                        anchor = sim.camera.anchor_from_cell(m.column, m.row, grid);
                    }
                }
                Event::Resize(columns, rows) => {
                    log::debug!("resized to {columns}x{rows}");
                    grid = GridSize::new(columns, rows);
                    sim.set_grid(grid);
                }
                _ => {}
            }
        }

        // ----- simulate + draw -----
        let now = Instant::now();
        let elapsed = now - last;
        last = now;
        let mut source = rope_core::FixedAnchor(anchor);
        sim.pump(elapsed, &mut source, &mut sink)?;

        // Yield until the next tick is due.
        let tick = sim.config().tick_interval();
        let spent = now.elapsed();
        if spent < tick {
            std::thread::sleep(tick - spent);
        }
    }
}
