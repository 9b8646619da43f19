//! Rendering layer.  All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game.  No game logic is performed; this module only translates world
//! coordinates into terminal cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use chicken_chop::compute::Game;
use chicken_chop::entities::{EndReport, Entity, EntityKind, Overlay, Screen, StageItem, Tier};
use chicken_chop::menu::ButtonSpot;
use chicken_chop::{projectile, target};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Yellow;
const C_TEXT: Color = Color::White;
const C_HINT: Color = Color::DarkGrey;
const C_FAR: Color = Color::DarkBlue;
const C_NEAR: Color = Color::DarkGreen;
const C_BLOOD: Color = Color::Red;
const C_PROJECTILE: Color = Color::DarkGrey;
const C_BUCKET: Color = Color::Cyan;
const C_BOARD_BG: Color = Color::White;
const C_BOARD_FG: Color = Color::Black;

// ── Background tiles ──────────────────────────────────────────────────────────

const FAR_TILE: [&str; 3] = [
    "      _|_               |>          ",
    "   __|___|__     ____  _|_____      ",
    "~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~",
];
const NEAR_TILE: [&str; 2] = [
    "  ||    |#|   [] ||   |##|    ",
    "__||____|#|___[]_||___|##|____",
];

/// Largest projectile disc drawn, in world units.  Bigger ones would cover
/// the whole field.
const MAX_DRAWN_RADIUS: f32 = 60.0;

/// World units per terminal cell.
#[derive(Clone, Copy, Debug)]
pub struct CellScale {
    pub width: f32,
    pub height: f32,
}

impl CellScale {
    /// World coordinates of a cell's centre.
    pub fn to_world(&self, col: u16, row: u16) -> (f32, f32) {
        (
            (col as f32 + 0.5) * self.width,
            (row as f32 + 0.5) * self.height,
        )
    }

    fn to_cell(&self, x: f32, y: f32) -> (i32, i32) {
        ((x / self.width).floor() as i32, (y / self.height).floor() as i32)
    }
}

struct Canvas {
    scale: CellScale,
    cols: i32,
    rows: i32,
}

impl Canvas {
    /// Print `text` starting at cell (`col`, `row`), clipped to the terminal.
    fn print<W: Write>(
        &self,
        out: &mut W,
        col: i32,
        row: i32,
        text: &str,
        color: Color,
    ) -> std::io::Result<()> {
        if row < 0 || row >= self.rows {
            return Ok(());
        }
        let mut c = col;
        out.queue(style::SetForegroundColor(color))?;
        for ch in text.chars() {
            if c >= self.cols {
                break;
            }
            if c >= 0 && ch != ' ' {
                out.queue(cursor::MoveTo(c as u16, row as u16))?;
                out.queue(Print(ch))?;
            }
            c += 1;
        }
        Ok(())
    }

    /// Print `text` centred on world point (`x`, `y`).
    fn print_centered<W: Write>(
        &self,
        out: &mut W,
        x: f32,
        y: f32,
        text: &str,
        color: Color,
    ) -> std::io::Result<()> {
        let (col, row) = self.scale.to_cell(x, y);
        let half = text.chars().count() as i32 / 2;
        self.print(out, col - half, row, text, color)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, game: &Game, scale: &CellScale) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let canvas = Canvas {
        scale: *scale,
        cols: (game.viewport.width / scale.width) as i32,
        rows: (game.viewport.height / scale.height) as i32,
    };

    for item in game.stage.items() {
        match item {
            StageItem::Screen(Screen::Start) => draw_start(out, &canvas, game)?,
            StageItem::Screen(Screen::Levels) => draw_levels(out, &canvas, game)?,
            StageItem::Screen(Screen::Map) => draw_map(out, &canvas, game)?,
            StageItem::Screen(Screen::End(report)) => draw_end(out, &canvas, game, report)?,
            StageItem::Entity(entity) => draw_entity(out, &canvas, game, entity)?,
            StageItem::Scoreboard => draw_scoreboard(out, &canvas, game)?,
            StageItem::Overlay(Overlay::Pause) => draw_pause(out, &canvas, game)?,
        }
    }
    for spot in game.buttons() {
        draw_button(out, &canvas, game, &spot)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, 0))?;
    out.flush()?;
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_start<W: Write>(out: &mut W, canvas: &Canvas, game: &Game) -> std::io::Result<()> {
    let cx = game.viewport.width / 2.0;
    let cy = game.viewport.height / 2.0;
    canvas.print_centered(out, cx, cy - 80.0, "CHICKEN CHOP", C_TITLE)?;
    canvas.print_centered(out, cx, cy - 40.0, "Enter your name!", C_TEXT)?;
    let input = format!("> {}_", game.name_input);
    canvas.print_centered(out, cx, cy, &input, C_TEXT)?;
    canvas.print_centered(
        out,
        cx,
        game.viewport.height - canvas.scale.height,
        "click targets · drag or ← → to scroll · P pause · Esc quit",
        C_HINT,
    )
}

fn draw_levels<W: Write>(out: &mut W, canvas: &Canvas, game: &Game) -> std::io::Result<()> {
    let cx = game.viewport.width / 2.0;
    canvas.print_centered(out, cx, game.viewport.height / 4.0, "Select level!", C_TITLE)?;
    if !game.store.name.is_empty() {
        let hello = format!("Good luck, {}", game.store.name);
        canvas.print_centered(out, cx, game.viewport.height / 4.0 + 40.0, &hello, C_HINT)?;
    }
    Ok(())
}

fn draw_end<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    game: &Game,
    report: &EndReport,
) -> std::io::Result<()> {
    let cx = game.viewport.width / 2.0;
    let cy = game.viewport.height / 2.0;
    let (title, color) = if report.won {
        ("YOU WON!", Color::Green)
    } else {
        ("GAME OVER", Color::Red)
    };
    canvas.print_centered(out, cx, cy - 60.0, title, color)?;
    let line = format!("Level {}  ·  Score: {}", report.level.number(), report.score);
    canvas.print_centered(out, cx, cy - 20.0, &line, C_TEXT)
}

fn draw_pause<W: Write>(out: &mut W, canvas: &Canvas, game: &Game) -> std::io::Result<()> {
    let cx = game.viewport.width / 2.0;
    let cy = game.viewport.height / 2.0;
    canvas.print_centered(out, cx, cy - 20.0, "PAUSE", C_TITLE)
}

// ── Map background ────────────────────────────────────────────────────────────

fn draw_tile_rows<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    tile: &[&str],
    first_row: i32,
    offset: f32,
    color: Color,
) -> std::io::Result<()> {
    let shift = (offset / canvas.scale.width).round() as i32;
    for (i, line) in tile.iter().enumerate() {
        let chars: Vec<char> = line.chars().collect();
        let len = chars.len() as i32;
        let row: String = (0..canvas.cols)
            .map(|c| chars[(c - shift).rem_euclid(len) as usize])
            .collect();
        canvas.print(out, 0, first_row + i as i32, &row, color)?;
    }
    Ok(())
}

fn draw_map<W: Write>(out: &mut W, canvas: &Canvas, game: &Game) -> std::io::Result<()> {
    let layers = game.camera.layers;
    draw_tile_rows(out, canvas, &FAR_TILE, 1, layers.far, C_FAR)?;
    let board_row = canvas.scale.to_cell(0.0, game.board.top(game.viewport.height)).1;
    let near_row = board_row - NEAR_TILE.len() as i32;
    draw_tile_rows(out, canvas, &NEAR_TILE, near_row, layers.near, C_NEAR)
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn sprite(tier: Tier) -> (&'static [&'static str], Color) {
    match tier {
        Tier::Light => (&[" ,_ ", "<o) ", " ^^ "], Color::Yellow),
        Tier::Medium => (&["  __ ", "<(o )", "  ^^ "], Color::DarkYellow),
        Tier::Heavy => (&[" \\|/  ", "<(O  )", "  ^ ^ "], Color::Red),
        Tier::Shooter => (&["/\\_/\\", "[@ @]", "\\_^_/"], Color::Magenta),
    }
}

fn mirror(line: &str) -> String {
    line.chars()
        .rev()
        .map(|c| match c {
            '<' => '>',
            '>' => '<',
            '(' => ')',
            ')' => '(',
            '/' => '\\',
            '\\' => '/',
            other => other,
        })
        .collect()
}

fn draw_entity<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    game: &Game,
    entity: &Entity,
) -> std::io::Result<()> {
    if !entity.flags.visible {
        return Ok(());
    }
    match entity.kind {
        EntityKind::Target(tier) => draw_target(out, canvas, entity, tier),
        EntityKind::Projectile => draw_projectile(out, canvas, game, entity),
        EntityKind::Pickup => {
            let x = entity.x + entity.width / 2.0;
            canvas.print_centered(out, x, entity.y, "|~~~|", C_BUCKET)?;
            canvas.print_centered(out, x, entity.y + canvas.scale.height, "\\___/", C_BUCKET)
        }
    }
}

fn draw_target<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    entity: &Entity,
    tier: Tier,
) -> std::io::Result<()> {
    let (lines, color) = sprite(tier);
    let (cx, cy) = target::center(entity);
    let top = cy - canvas.scale.height * (lines.len() as f32 / 2.0);
    for (i, line) in lines.iter().enumerate() {
        let text = if entity.mirrored { mirror(line) } else { line.to_string() };
        canvas.print_centered(out, cx, top + i as f32 * canvas.scale.height, &text, color)?;
    }
    let hp = format!("{}", entity.health);
    canvas.print_centered(out, cx, top - canvas.scale.height, &hp, C_HINT)?;

    for marker in entity.blood.iter().filter(|m| m.visible) {
        let (bx, by) = target::to_world(entity, marker.x, marker.y);
        canvas.print_centered(out, bx, by, "*", C_BLOOD)?;
    }
    Ok(())
}

fn draw_projectile<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    game: &Game,
    entity: &Entity,
) -> std::io::Result<()> {
    let radius = projectile::radius(entity, &game.viewport).min(MAX_DRAWN_RADIUS);
    let (col, row) = canvas.scale.to_cell(entity.x, entity.y);
    let rc = (radius / canvas.scale.width).round() as i32;
    let rr = (radius / canvas.scale.height).round() as i32;
    if rc == 0 || rr == 0 {
        return canvas.print(out, col, row, "•", C_PROJECTILE);
    }
    for dy in -rr..=rr {
        let fy = dy as f32 / rr as f32;
        let span = ((1.0 - fy * fy).max(0.0).sqrt() * rc as f32).round() as i32;
        let line = "█".repeat((2 * span + 1) as usize);
        canvas.print(out, col - span, row + dy, &line, C_PROJECTILE)?;
    }
    Ok(())
}

// ── Scoreboard & buttons ──────────────────────────────────────────────────────

fn draw_scoreboard<W: Write>(out: &mut W, canvas: &Canvas, game: &Game) -> std::io::Result<()> {
    let top = canvas.scale.to_cell(0.0, game.board.top(game.viewport.height)).1.max(0);
    out.queue(style::SetBackgroundColor(C_BOARD_BG))?;
    for row in top..canvas.rows {
        out.queue(cursor::MoveTo(0, row as u16))?;
        out.queue(Print(" ".repeat(canvas.cols.max(0) as usize)))?;
    }
    canvas.print(out, 1, canvas.rows - 1, &game.board.text, C_BOARD_FG)?;
    out.queue(style::SetBackgroundColor(Color::Reset))?;
    Ok(())
}

fn draw_button<W: Write>(
    out: &mut W,
    canvas: &Canvas,
    game: &Game,
    spot: &ButtonSpot,
) -> std::io::Result<()> {
    let x = spot.rect.x + spot.rect.width / 2.0;
    let y = spot.rect.y + spot.rect.height / 2.0;
    let pressed = game.pressed == Some(spot.button);
    if pressed {
        out.queue(style::SetAttribute(Attribute::Reverse))?;
    } else {
        out.queue(style::SetAttribute(Attribute::Bold))?;
    }
    canvas.print_centered(out, x, y, &format!("[{}]", spot.label), C_TEXT)?;
    out.queue(style::SetAttribute(Attribute::Reset))?;
    Ok(())
}
