//! Terminal and PNG output of the board.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::board::Board;
use crate::error::Result;
use crate::metrics::GenerationStats;

/// ANSI sequence that clears the terminal and homes the cursor.
pub const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

const SEPARATOR: &str = "+-+-+-+-+-+-+-+-+-+-+-+-+";

const ALIVE_RGB: [u8; 3] = [255, 255, 255];
const DEAD_RGB: [u8; 3] = [16, 16, 24];

/// Board rows followed by the statistics block.
pub fn render_frame(board: &Board, stats: &GenerationStats, live_marker: char) -> String {
    let mut out = String::with_capacity((board.columns() + 1) * board.rows() + 256);
    for y in 0..board.rows() {
        for x in 0..board.columns() {
            out.push(if board.is_alive(x, y) { live_marker } else { ' ' });
        }
        out.push('\n');
    }

    out.push_str(SEPARATOR);
    out.push('\n');
    out.push_str(&format!("Generation: {}\n", stats.generation));
    out.push_str(&format!("Count living cells: {}\n", stats.living_cells));
    out.push_str(&format!("Count clusters: {}\n", stats.clusters));
    for (name, count) in &stats.census {
        out.push_str(&format!("  {}: {}\n", name, count));
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

/// RGB image data for the board, `scale` pixels per cell.
pub fn board_to_rgb(board: &Board, scale: usize) -> Vec<u8> {
    let scale = scale.max(1);
    let out_width = board.columns() * scale;
    let out_height = board.rows() * scale;
    let mut img = vec![0u8; out_width * out_height * 3];

    for py in 0..out_height {
        for px in 0..out_width {
            let color = if board.is_alive(px / scale, py / scale) {
                ALIVE_RGB
            } else {
                DEAD_RGB
            };
            let offset = (py * out_width + px) * 3;
            img[offset..offset + 3].copy_from_slice(&color);
        }
    }
    img
}

/// Frame path for `generation` inside `frames_dir`.
pub fn frame_filename(frames_dir: impl AsRef<Path>, generation: usize) -> PathBuf {
    frames_dir
        .as_ref()
        .join(format!("frame_{:06}.png", generation))
}

/// Save the board as a PNG frame.
pub fn save_frame(board: &Board, path: impl AsRef<Path>, scale: usize) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let scale = scale.max(1);
    let width = (board.columns() * scale) as u32;
    let height = (board.rows() * scale) as u32;
    let img = board_to_rgb(board, scale);

    let file = File::create(path)?;
    let w = BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Fast);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&img)?;
    Ok(())
}
