//! Command-line configuration.

use std::time::Duration;

use clap::Parser;

/// Interactive A* visualiser for the terminal
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Side length of the square grid
    #[arg(short, long, default_value = "20", value_parser = clap::value_parser!(u16).range(2..=200))]
    pub rows: u16,

    /// Pause after each search step, in milliseconds
    #[arg(long, default_value = "15")]
    pub delay_ms: u64,

    /// Run searches without redrawing each step
    #[arg(long)]
    pub no_animate: bool,

    /// Barrier probability used by the `r` key
    #[arg(long, default_value = "0.3", value_parser = parse_density)]
    pub density: f64,

    /// Seed for the barrier scatter (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

impl Args {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for Args {
    fn default() -> Self {
        Self {
            rows: 20,
            delay_ms: 15,
            no_animate: false,
            density: 0.3,
            seed: None,
        }
    }
}

fn parse_density(s: &str) -> Result<f64, String> {
    let d: f64 = s.parse().map_err(|e| format!("`{s}` is not a number: {e}"))?;
    if (0.0..=1.0).contains(&d) {
        Ok(d)
    } else {
        Err(format!("density must be within 0..=1, got {d}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_parser() {
        let parsed = Args::try_parse_from(["gridstar"]).unwrap();
        let def = Args::default();
        assert_eq!(parsed.rows, def.rows);
        assert_eq!(parsed.delay_ms, def.delay_ms);
        assert_eq!(parsed.no_animate, def.no_animate);
        assert_eq!(parsed.density, def.density);
        assert_eq!(parsed.seed, def.seed);
    }

    #[test]
    fn options_parse() {
        let a = Args::try_parse_from([
            "gridstar",
            "--rows",
            "8",
            "--delay-ms",
            "0",
            "--no-animate",
            "--density",
            "0.5",
            "--seed",
            "42",
        ])
        .unwrap();
        assert_eq!(a.rows, 8);
        assert_eq!(a.delay(), Duration::ZERO);
        assert!(a.no_animate);
        assert_eq!(a.density, 0.5);
        assert_eq!(a.seed, Some(42));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(Args::try_parse_from(["gridstar", "--rows", "1"]).is_err());
        assert!(Args::try_parse_from(["gridstar", "--rows", "201"]).is_err());
        assert!(Args::try_parse_from(["gridstar", "--density", "1.5"]).is_err());
        assert!(Args::try_parse_from(["gridstar", "--density", "-0.1"]).is_err());
        assert!(Args::try_parse_from(["gridstar", "--density", "abc"]).is_err());
    }
}
