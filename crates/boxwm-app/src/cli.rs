use std::path::PathBuf;

use boxwm_common::Rect;
use clap::Parser;

/// boxwm: a stacking window manager core, driven headless.
#[derive(Parser, Debug)]
#[command(name = "boxwm", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// JSON-lines script to replay against the headless display.
    #[arg(long)]
    pub replay: Option<PathBuf>,

    /// Screen size for the headless display, as WIDTHxHEIGHT.
    #[arg(long, default_value = "1024x768", value_parser = parse_screen)]
    pub screen: Rect,

    /// Print the effective configuration as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}

fn parse_screen(value: &str) -> Result<Rect, String> {
    let (width, height) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {value:?}"))?;
    let width: i32 = width
        .trim()
        .parse()
        .map_err(|e| format!("bad width {width:?}: {e}"))?;
    let height: i32 = height
        .trim()
        .parse()
        .map_err(|e| format!("bad height {height:?}: {e}"))?;
    if width <= 0 || height <= 0 {
        return Err(format!("screen must be non-empty, got {value:?}"));
    }
    Ok(Rect::new(0, 0, width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_size_parses() {
        assert_eq!(parse_screen("800x600").unwrap(), Rect::new(0, 0, 800, 600));
        assert_eq!(parse_screen("1920X1080").unwrap().width, 1920);
        assert!(parse_screen("800").is_err());
        assert!(parse_screen("0x600").is_err());
        assert!(parse_screen("axb").is_err());
    }

    #[test]
    fn defaults() {
        let args = Args::parse_from(["boxwm"]);
        assert_eq!(args.screen, Rect::new(0, 0, 1024, 768));
        assert!(args.replay.is_none());
        assert!(!args.print_config);
    }
}
