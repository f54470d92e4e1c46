use colored::{ColoredString, Colorize as _};
use mazecore::{
    dims::Dims,
    gameboard::{Board, Cell, CellPoint, CellWall},
};

/// Text rendering of a board, three characters per cell plus the walls between them.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    /// Emit terminal colors at all.
    pub colored: bool,
    /// Tint every cell by its depth in the generation tree.
    pub depth_colors: bool,
}

impl Renderer {
    pub fn plain() -> Self {
        Self {
            colored: false,
            depth_colors: false,
        }
    }

    pub fn render(&self, board: &Board) -> String {
        let Dims(rows, columns) = board.size();
        let mut out = String::new();

        out.push_str(&Self::horizontal(board, 0, CellWall::North));
        for row in 0..rows {
            for column in 0..columns {
                let cell = board.cell(Dims(row, column));
                out.push(if cell.has_wall(CellWall::West) { '|' } else { ' ' });
                out.push_str(&self.content(cell).to_string());
            }
            let last = board.cell(Dims(row, columns - 1));
            out.push(if last.has_wall(CellWall::East) { '|' } else { ' ' });
            out.push('\n');

            out.push_str(&Self::horizontal(board, row, CellWall::South));
        }

        out
    }

    fn horizontal(board: &Board, row: i32, wall: CellWall) -> String {
        let mut line = String::from("+");
        for column in 0..board.size().1 {
            line.push_str(if board.cell(Dims(row, column)).has_wall(wall) {
                "---+"
            } else {
                "   +"
            });
        }
        line.push('\n');
        line
    }

    fn content(&self, cell: &Cell) -> ColoredString {
        let text = match cell.point() {
            CellPoint::Start => " S ",
            CellPoint::End => " E ",
            CellPoint::Path => " * ",
            CellPoint::None => "   ",
        };

        if !self.colored {
            return text.normal();
        }

        let text = match cell.point() {
            CellPoint::Start => text.green().bold(),
            CellPoint::End => text.red().bold(),
            CellPoint::Path => text.yellow().bold(),
            CellPoint::None => text.normal(),
        };

        if self.depth_colors {
            let (r, g, b) = depth_color(cell.depth());
            text.on_truecolor(r, g, b)
        } else {
            text
        }
    }
}

/// Hue cycles once every 256 levels of depth, pastel saturation at full value.
pub fn depth_color(depth: u32) -> (u8, u8, u8) {
    let hue = (depth as f64 / 256.0 * 360.0) % 360.0;
    hsv_to_rgb(hue, 0.4, 1.0)
}

fn hsv_to_rgb(hue: f64, saturation: f64, value: f64) -> (u8, u8, u8) {
    let chroma = value * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = value - chroma;

    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let channel = |c: f64| ((c + m) * 255.0).round() as u8;
    (channel(r), channel(g), channel(b))
}
