use std::cmp::Ordering;

use crate::config::DEFAULT_GLYPHS;
use crate::projection::ProjectedPoint;

/// Number of depth bands, one glyph each.
pub const DEPTH_BANDS: usize = 5;

/// Size of the character grid the host currently displays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GridSize {
    pub columns: u16,
    pub rows: u16,
}

impl GridSize {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Horizontal shift that centres screen x = 0.
    #[inline]
    pub fn shift(&self) -> i32 {
        (self.columns / 2) as i32
    }

    /// Grid row of screen y = 0.
    #[inline]
    pub fn horizon(&self) -> i32 {
        (self.rows / 2) as i32
    }

    /// Grid cell of a projected point, flipping y so screen-up is row 0.
    pub fn cell_for(&self, point: &ProjectedPoint) -> Option<(u16, u16)> {
        let column = self.shift() as i64 + point.screen_x as i64;
        let row = self.horizon() as i64 - point.screen_y as i64;
        if column < 0 || row < 0 || column >= self.columns as i64 || row >= self.rows as i64 {
            return None;
        }
        Some((column as u16, row as u16))
    }
}

/// One glyph placed on the grid.
///
/// Laid out for direct upload to a host buffer: 8 bytes, glyph as a Unicode
/// scalar value.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawCell {
    pub column: u16,
    pub row: u16,
    pub glyph: u32,
}

impl DrawCell {
    pub fn new(column: u16, row: u16, glyph: char) -> Self {
        Self { column, row, glyph: glyph as u32 }
    }

    pub fn glyph_char(&self) -> char {
        char::from_u32(self.glyph).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawCommand {
    Clear,
    Cell(DrawCell),
}

/// Everything the host needs to draw one frame, in order.
///
/// `commands` always starts with a single [`DrawCommand::Clear`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// Points dropped for falling outside the grid or the camera's view.
    pub culled: usize,
    /// Points hidden behind a nearer point in the same cell.
    pub occluded: usize,
}

impl Frame {
    pub fn cells(&self) -> impl Iterator<Item = &DrawCell> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Cell(cell) => Some(cell),
            DrawCommand::Clear => None,
        })
    }

    pub fn cell_count(&self) -> usize {
        self.commands.len().saturating_sub(1)
    }
}

/// Draw order of two projected points: top row first, then left to right,
/// then nearest to the camera first.
///
/// The depth tiebreak is what makes the first point of a cell the visible
/// one.
pub fn draw_order(a: &ProjectedPoint, b: &ProjectedPoint) -> Ordering {
    b.screen_y
        .cmp(&a.screen_y)
        .then_with(|| a.screen_x.cmp(&b.screen_x))
        .then_with(|| a.depth.total_cmp(&b.depth))
}

/// Depth band of `depth` relative to the tail's depth.
///
/// Band `k` holds depths below `(k + 1) / 5 * tail_depth`; anything beyond
/// the fourth boundary falls in the last band.
pub fn depth_band(depth: f32, tail_depth: f32) -> usize {
    (0..DEPTH_BANDS - 1)
        .find(|&k| depth * (DEPTH_BANDS as f32) < (k + 1) as f32 * tail_depth)
        .unwrap_or(DEPTH_BANDS - 1)
}

/// Turns projected points into ordered, deduplicated draw commands.
pub struct Rasterizer {
    glyphs: [char; DEPTH_BANDS],
    visible: Vec<(ProjectedPoint, (u16, u16))>,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_GLYPHS)
    }
}

impl Rasterizer {
    pub fn new(glyphs: [char; DEPTH_BANDS]) -> Self {
        Self { glyphs, visible: Vec::new() }
    }

    pub fn glyph_for(&self, depth: f32, tail_depth: f32) -> char {
        self.glyphs[depth_band(depth, tail_depth)]
    }

    /// Rasterize one tick's projection onto `grid`.
    ///
    /// `None` entries are off-screen projections and count as culled.
    pub fn rasterize(
        &mut self,
        points: &[Option<ProjectedPoint>],
        tail_depth: f32,
        grid: GridSize,
    ) -> Frame {
        let mut culled = 0;
        self.visible.clear();
        for point in points {
            match point.as_ref().and_then(|p| Some((*p, grid.cell_for(p)?))) {
                Some(entry) => self.visible.push(entry),
                None => culled += 1,
            }
        }

        self.visible.sort_unstable_by(|a, b| draw_order(&a.0, &b.0));

        let mut commands = Vec::with_capacity(self.visible.len() + 1);
        commands.push(DrawCommand::Clear);

        let mut occluded = 0;
        let mut last_cell = None;
        for &(p, (column, row)) in &self.visible {
            if last_cell == Some((column, row)) {
                occluded += 1;
                continue;
            }
            last_cell = Some((column, row));
            let glyph = self.glyph_for(p.depth, tail_depth);
            commands.push(DrawCommand::Cell(DrawCell::new(column, row, glyph)));
        }

        Frame { commands, culled, occluded }
    }
}
