//! `lutgen params`

use anyhow::Result;
use lutgen_core::Parameter;

pub fn run() -> Result<()> {
    println!("name          neutral      min      max  description");
    for p in Parameter::ALL {
        let (min, max) = p.range();
        println!(
            "{:<12} {:>8.2} {:>8.2} {:>8.2}  {}",
            p.name(),
            p.neutral(),
            min,
            max,
            p.description()
        );
    }
    Ok(())
}
