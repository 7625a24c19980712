//! Startup banner: "STANDUP" in FIGlet letters, shaded diagonally from Slack
//! aubergine to Sheets green.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

const FROM: [u8; 3] = [0x4a, 0x15, 0x4b];
const TO: [u8; 3] = [0x0f, 0x9d, 0x58];

/// Color at `step` of `steps` along the diagonal.
fn shade(step: usize, steps: usize) -> Color {
    let t = if steps == 0 {
        0.0
    } else {
        step.min(steps) as f32 / steps as f32
    };
    let [r, g, b] = std::array::from_fn(|i| {
        (f32::from(FROM[i]) + (f32::from(TO[i]) - f32::from(FROM[i])) * t).round() as u8
    });
    Color::Rgb { r, g, b }
}

fn banner_art() -> String {
    FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("STANDUP").map(|figure| figure.to_string()))
        .unwrap_or_else(|| "STANDUP-SYNC\n".to_string())
}

/// Print the banner and version line. Terminal write errors are ignored.
pub fn print_welcome() {
    let art = banner_art();
    let rows: Vec<Vec<char>> = art.lines().map(|l| l.chars().collect()).collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let steps = width + rows.len();

    let mut out = stdout();
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.iter().enumerate() {
            let _ = out.execute(SetForegroundColor(shade(x + y, steps)));
            let _ = out.execute(Print(ch));
        }
        let _ = out.execute(ResetColor);
        let _ = out.execute(Print("\r\n"));
    }

    let _ = out.execute(SetForegroundColor(shade(steps, steps)));
    let _ = out.execute(Print(format!(
        "standup-sync v{}: Slack standups into Sheets\r\n\r\n",
        env!("CARGO_PKG_VERSION")
    )));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}
