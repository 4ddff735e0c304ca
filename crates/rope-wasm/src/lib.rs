use std::time::Duration;

use rope_core::raster::DrawCell;
use rope_core::{GridSize, RopeConfig, RopeSize, Simulation};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct RopeWorld {
    sim: Simulation,
    anchor: glam::Vec3,
    frame_buffer: Vec<DrawCell>,
    frame_ready: bool,
}

#[wasm_bindgen]
impl RopeWorld {
    /// `size` is 1, 2 or 3 for the small, medium and large rope.
    #[wasm_bindgen(constructor)]
    pub fn new(size: u8, columns: u16, rows: u16) -> Result<RopeWorld, JsValue> {
        let size: RopeSize = size.to_string().parse().map_err(to_js)?;
        let mut sim = Simulation::new(RopeConfig::for_size(size)).map_err(to_js)?;
        sim.set_grid(GridSize::new(columns, rows));

        web_sys::console::log_1(
            &format!(
                "WASM RopeWorld created: {} rope, {} particles, {}x{} grid",
                size, sim.particles.count, columns, rows
            )
            .into(),
        );

        Ok(RopeWorld {
            sim,
            anchor: glam::Vec3::ZERO,
            frame_buffer: Vec::new(),
            frame_ready: false,
        })
    }

    /// Advance by `elapsed_ms` of wall-clock time.
    ///
    /// Returns the time spent in the call, in milliseconds. Check
    /// `frame_ready` afterwards to see whether the frame buffer was rewritten.
    #[wasm_bindgen]
    pub fn step(&mut self, elapsed_ms: f64) -> f32 {
        let start = js_sys::Date::now();
        let elapsed = elapsed_from_ms(elapsed_ms);
        let mut anchor = rope_core::FixedAnchor(self.anchor);
        let mut sink = BufferSink { cells: &mut self.frame_buffer, presented: false };
        if let Err(never) = self.sim.pump(elapsed, &mut anchor, &mut sink) {
            match never {}
        }
        self.frame_ready = sink.presented;
        (js_sys::Date::now() - start) as f32
    }

    #[wasm_bindgen]
    pub fn frame_ready(&self) -> bool {
        self.frame_ready
    }

    /// Pointer position as a grid cell.
    #[wasm_bindgen]
    pub fn set_pointer_cell(&mut self, column: u16, row: u16) {
        self.anchor = self.sim.camera.anchor_from_cell(column, row, self.sim.grid());
    }

    /// Pointer position already in simulation units on the projection plane.
    #[wasm_bindgen]
    pub fn set_anchor(&mut self, y: f32, z: f32) {
        self.anchor = glam::Vec3::new(0.0, y, z);
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, columns: u16, rows: u16) {
        self.sim.set_grid(GridSize::new(columns, rows));
    }

    #[wasm_bindgen]
    pub fn particle_count(&self) -> usize {
        self.sim.particles.count
    }

    /// Pointer to the latest frame's cells, laid out as `DrawCell`
    /// (`u16` column, `u16` row, `u32` glyph).
    #[wasm_bindgen]
    pub fn get_frame_ptr(&self) -> *const u8 {
        bytemuck::cast_slice::<DrawCell, u8>(&self.frame_buffer).as_ptr()
    }

    #[wasm_bindgen]
    pub fn get_frame_byte_length(&self) -> usize {
        self.frame_buffer.len() * std::mem::size_of::<DrawCell>()
    }

    #[wasm_bindgen]
    pub fn cell_count(&self) -> usize {
        self.frame_buffer.len()
    }
}

/// Copies each presented frame's cells into the shared buffer.
struct BufferSink<'a> {
    cells: &'a mut Vec<DrawCell>,
    presented: bool,
}

impl rope_core::FrameSink for BufferSink<'_> {
    type Error = std::convert::Infallible;

    fn present(&mut self, frame: &rope_core::Frame) -> Result<(), Self::Error> {
        // The leading clear is implied: JS wipes its surface before drawing the buffer.
        self.cells.clear();
        self.cells.extend(frame.cells().copied());
        self.presented = true;
        Ok(())
    }
}

/// Longest step a single call accepts. Anything past the scheduler's backlog
/// clamp is dropped anyway.
const MAX_STEP_MS: f64 = 60_000.0;

/// NaN and negative inputs count as no time passing.
fn elapsed_from_ms(elapsed_ms: f64) -> Duration {
    if !(elapsed_ms > 0.0) {
        return Duration::ZERO;
    }
    Duration::from_secs_f64(elapsed_ms.min(MAX_STEP_MS) / 1000.0)
}

fn to_js(e: rope_core::ConfigError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
