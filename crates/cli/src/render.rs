//! Terminal rendering for generated palettes.

use anyhow::Result;

use swatchy_types::{HslColor, Palette};
use swatchy_util::OutputFormat;

/// Print `palette` to stdout in the requested format.
pub fn print_palette(palette: &Palette, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Swatch => {
            for color in palette {
                println!("{}", swatch_line(color));
            }
        }
        OutputFormat::Plain => {
            for color in palette {
                println!("{}", plain_line(color));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(palette)?);
        }
    }
    Ok(())
}

/// ANSI true-color tile followed by the hex and hsl labels.
fn swatch_line(color: &HslColor) -> String {
    let rgb = color.rgb();
    format!(
        "\x1b[48;2;{};{};{}m        \x1b[0m  {}  {}",
        rgb.r,
        rgb.g,
        rgb.b,
        color.hex(),
        color
    )
}

fn plain_line(color: &HslColor) -> String {
    format!("{}  {}", color.hex(), color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swatch_line_carries_tile_and_labels() {
        let color = HslColor::new(210.0, 60.0, 50.0);
        let line = swatch_line(&color);
        assert!(line.contains("48;2;51;128;204"));
        assert!(line.contains("#3380CC"));
        assert!(line.contains("hsl(210, 60%, 50%)"));
    }

    #[test]
    fn plain_line_pairs_hex_with_hsl() {
        let color = HslColor::new(0.0, 100.0, 50.0);
        assert_eq!(plain_line(&color), "#FF0000  hsl(0, 100%, 50%)");
    }
}
